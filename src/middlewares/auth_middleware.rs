use std::sync::Arc;

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use bson::oid::ObjectId;
use tracing::{debug, warn};

use crate::model::user::Role;
use crate::repository::user_repo::UserRepository;
use crate::util::access::Caller;
use crate::util::error::HandlerError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};

const NOT_AUTHORIZED: &str = "Not authorized to access this route";

/// Per-route gate state. An empty `roles` slice admits any authenticated user.
#[derive(Clone)]
pub struct RoleGate {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
    pub user_repo: Arc<dyn UserRepository>,
    pub roles: &'static [Role],
}

impl RoleGate {
    pub fn new(jwt_utils: Arc<JwtTokenUtilsImpl>, user_repo: Arc<dyn UserRepository>) -> Self {
        RoleGate { jwt_utils, user_repo, roles: &[] }
    }

    pub fn allow(&self, roles: &'static [Role]) -> Arc<Self> {
        Arc::new(RoleGate { roles, ..self.clone() })
    }

    /// Resolves the bearer token to a live account.
    async fn authenticate(&self, auth_header: Option<&str>) -> Result<Caller, HandlerError> {
        let header = auth_header.ok_or_else(|| HandlerError::unauthorized(NOT_AUTHORIZED))?;
        let token = self
            .jwt_utils
            .extract_token_from_header(header)
            .map_err(|_| HandlerError::unauthorized(NOT_AUTHORIZED))?;
        let claims = self.jwt_utils.validate_access_token(&token).map_err(|e| {
            debug!("Rejected access token: {}", e);
            HandlerError::unauthorized(NOT_AUTHORIZED)
        })?;
        let id = ObjectId::parse_str(&claims.sub).map_err(|_| HandlerError::unauthorized(NOT_AUTHORIZED))?;

        // the stored role wins over the one baked into the token
        match self.user_repo.find_by_id(&id).await {
            Ok(Some(user)) => Ok(Caller { id, role: user.role }),
            Ok(None) => {
                warn!("Token subject {} no longer exists", id);
                Err(HandlerError::unauthorized(NOT_AUTHORIZED))
            }
            Err(e) => {
                warn!("Failed to load token subject: {}", e);
                Err(HandlerError::unauthorized(NOT_AUTHORIZED))
            }
        }
    }
}

pub async fn require_roles(
    State(gate): State<Arc<RoleGate>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let caller = gate.authenticate(auth_header.as_deref()).await?;

    if !gate.roles.is_empty() && !gate.roles.contains(&caller.role) {
        return Err(HandlerError::forbidden(format!(
            "User role {} is not authorized to access this route",
            caller.role
        )));
    }

    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}
