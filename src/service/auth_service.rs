use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument, warn};

use crate::dto::user_dto::{AuthResponse, LoginRequest, RegisterRequest, TokenResponse, UserView};
use crate::model::user::{Role, User};
use crate::repository::user_repo::UserRepository;
use crate::util::access::Caller;
use crate::util::error::ServiceError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl, TokenPair};
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, ServiceError>;
    async fn login(&self, request: LoginRequest) -> Result<AuthResponse, ServiceError>;
    async fn refresh_token(&self, refresh_token: String) -> Result<TokenResponse, ServiceError>;
    async fn me(&self, caller: &Caller) -> Result<UserView, ServiceError>;
}

pub struct AuthServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

impl AuthServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt_utils: Arc<JwtTokenUtilsImpl>) -> Self {
        Self { user_repo, jwt_utils }
    }

    fn issue_tokens(&self, user: &User) -> Result<TokenPair, ServiceError> {
        let id = user.id.map(|id| id.to_hex()).unwrap_or_default();
        self.jwt_utils
            .generate_token_pair(&id, &user.email, user.role.as_str())
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))
    }

    fn auth_response(&self, user: User) -> Result<AuthResponse, ServiceError> {
        let tokens = self.issue_tokens(&user)?;
        Ok(AuthResponse {
            success: true,
            token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
            user: UserView::from(user),
        })
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, ServiceError> {
        info!("Registering new student");
        let password_hash = PasswordUtilsImpl::hash_password(&request.password)
            .map_err(|e| ServiceError::InvalidInput(format!("Password hash error: {}", e)))?;
        let user = User {
            id: None,
            name: request.name,
            email: request.email,
            password_hash,
            role: Role::Student,
            created_at: None,
        };
        let inserted = self.user_repo.insert(user).await.map_err(|e| {
            error!("Failed to insert user: {}", e);
            ServiceError::from(e)
        })?;
        info!("Student registered");
        self.auth_response(inserted)
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn login(&self, request: LoginRequest) -> Result<AuthResponse, ServiceError> {
        info!("User login attempt");
        let user = match self.user_repo.find_by_email(&request.email).await? {
            Some(user) => user,
            None => {
                warn!("Login for unknown email");
                return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };
        let valid = PasswordUtilsImpl::verify_password(&request.password, &user.password_hash)
            .map_err(|e| ServiceError::InvalidInput(format!("Password verify error: {}", e)))?;
        if !valid {
            warn!("Wrong password");
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }
        if let Some(role) = request.role {
            if role != user.role {
                warn!("Login role {} does not match account role {}", role, user.role);
                return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        }
        info!("User logged in");
        self.auth_response(user)
    }

    #[instrument(skip(self, refresh_token))]
    async fn refresh_token(&self, refresh_token: String) -> Result<TokenResponse, ServiceError> {
        let claims = self
            .jwt_utils
            .validate_refresh_token(&refresh_token)
            .map_err(|e| ServiceError::Unauthorized(format!("Invalid refresh token: {}", e)))?;
        let id = bson::oid::ObjectId::parse_str(&claims.sub)
            .map_err(|_| ServiceError::Unauthorized("Invalid refresh token".to_string()))?;
        // role and email are re-read so a demoted account does not keep old claims
        let user = self
            .user_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("Invalid refresh token".to_string()))?;
        let tokens = self.issue_tokens(&user)?;
        info!("Token refreshed");
        Ok(TokenResponse {
            success: true,
            token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
        })
    }

    async fn me(&self, caller: &Caller) -> Result<UserView, ServiceError> {
        self.user_repo
            .find_by_id(&caller.id)
            .await?
            .map(UserView::from)
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))
    }
}
