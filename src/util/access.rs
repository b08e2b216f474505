//! Ownership-based authorization.
//!
//! Route-level role gates live in `middlewares::auth_middleware`; this module
//! answers the per-resource question "may this caller touch a resource owned
//! by that id?". For a user account the owner is the account itself, and an
//! admin may touch anything.

use bson::oid::ObjectId;

use crate::model::user::Role;
use crate::util::error::ServiceError;

/// The authenticated principal, attached to the request by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: ObjectId,
    pub role: Role,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

pub fn permits(caller: &Caller, owner: &ObjectId) -> bool {
    caller.id == *owner || caller.is_admin()
}

pub fn require(caller: &Caller, owner: &ObjectId, denied: &str) -> Result<(), ServiceError> {
    if permits(caller, owner) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized(denied.to_string()))
    }
}
