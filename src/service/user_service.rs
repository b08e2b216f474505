use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{error, info, instrument, warn};

use crate::config::AdminUserConfig;
use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest, UserView};
use crate::model::user::{Role, User, UserPatch};
use crate::repository::user_repo::UserRepository;
use crate::util::access::{require, Caller};
use crate::util::error::ServiceError;
use crate::util::extract::DeferredJson;
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

const NOT_FOUND: &str = "User not found";

fn hash(password: &str) -> Result<String, ServiceError> {
    PasswordUtilsImpl::hash_password(password)
        .map_err(|e| ServiceError::InvalidInput(format!("Password hash error: {}", e)))
}

/// Builds an account with a hashed password and the given role.
pub(crate) fn new_account(name: String, email: String, password: &str, role: Role) -> Result<User, ServiceError> {
    Ok(User {
        id: None,
        name,
        email,
        password_hash: hash(password)?,
        role,
        created_at: None,
    })
}

/// Turns an update payload into a patch. `role` survives only when
/// `keep_role` is set; a new password is re-hashed.
pub(crate) fn patch_from(request: UpdateUserRequest, keep_role: bool) -> Result<UserPatch, ServiceError> {
    let password_hash = request.password.as_deref().map(hash).transpose()?;
    Ok(UserPatch {
        name: request.name,
        email: request.email,
        password_hash,
        role: if keep_role { request.role } else { None },
    })
}

#[async_trait]
pub trait UserService: Send + Sync {
    async fn list(&self) -> Result<Vec<UserView>, ServiceError>;
    async fn get(&self, caller: &Caller, id: &ObjectId) -> Result<UserView, ServiceError>;
    async fn create(&self, request: CreateUserRequest) -> Result<UserView, ServiceError>;
    async fn update(
        &self,
        caller: &Caller,
        id: &ObjectId,
        request: DeferredJson<UpdateUserRequest>,
    ) -> Result<UserView, ServiceError>;
    async fn delete(&self, id: &ObjectId) -> Result<(), ServiceError>;
}

pub struct UserServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Creates the configured admin account unless that email is taken.
    pub async fn seed_admin(&self, config: &AdminUserConfig) -> Result<(), ServiceError> {
        if self.user_repo.find_by_email(&config.email).await?.is_some() {
            info!("Admin user already exists, skipping creation.");
            return Ok(());
        }
        let admin = new_account(config.name.clone(), config.email.clone(), &config.password, Role::Admin)?;
        self.user_repo.insert(admin).await.map_err(|e| {
            error!("Failed to create admin user: {}", e);
            ServiceError::from(e)
        })?;
        info!("First admin user created.");
        Ok(())
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn list(&self) -> Result<Vec<UserView>, ServiceError> {
        let users = self.user_repo.list(None).await?;
        Ok(users.into_iter().map(UserView::from).collect())
    }

    #[instrument(skip(self, caller), fields(id = %id, caller = %caller.id))]
    async fn get(&self, caller: &Caller, id: &ObjectId) -> Result<UserView, ServiceError> {
        require(caller, id, "Not authorized to access this user")?;
        self.user_repo
            .find_by_id(id)
            .await?
            .map(UserView::from)
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn create(&self, request: CreateUserRequest) -> Result<UserView, ServiceError> {
        let role = request.role.unwrap_or(Role::Student);
        let user = new_account(request.name, request.email, &request.password, role)?;
        let inserted = self.user_repo.insert(user).await?;
        info!("User created with role {}", role);
        Ok(UserView::from(inserted))
    }

    #[instrument(skip(self, caller, request), fields(id = %id, caller = %caller.id))]
    async fn update(
        &self,
        caller: &Caller,
        id: &ObjectId,
        request: DeferredJson<UpdateUserRequest>,
    ) -> Result<UserView, ServiceError> {
        require(caller, id, "Not authorized to update this user")?;
        let request = request.decode()?;
        if request.role.is_some() && !caller.is_admin() {
            warn!("Role change ignored for non-admin caller");
        }
        let patch = patch_from(request, caller.is_admin())?;
        self.user_repo
            .update(id, patch)
            .await?
            .map(UserView::from)
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &ObjectId) -> Result<(), ServiceError> {
        if !self.user_repo.delete(id).await? {
            return Err(ServiceError::NotFound(NOT_FOUND.to_string()));
        }
        info!("User deleted");
        Ok(())
    }
}
