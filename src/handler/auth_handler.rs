use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::dto::user_dto::{LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::service::auth_service::{AuthService, AuthServiceImpl};
use crate::util::access::Caller;
use crate::util::error::HandlerError;
use crate::util::extract::ValidatedJson;
use crate::util::response::{respond, ApiResponse};

pub async fn register_handler(
    State(service): State<Arc<AuthServiceImpl>>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Result<Response, HandlerError> {
    info!("[register_handler] Handler called");
    let res = service.register(payload).await?;
    Ok((StatusCode::CREATED, Json(res)).into_response())
}

pub async fn login_handler(
    State(service): State<Arc<AuthServiceImpl>>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<Response, HandlerError> {
    let res = service.login(payload).await?;
    Ok(Json(res).into_response())
}

pub async fn refresh_token_handler(
    State(service): State<Arc<AuthServiceImpl>>,
    ValidatedJson(payload): ValidatedJson<RefreshTokenRequest>,
) -> Result<Response, HandlerError> {
    let res = service.refresh_token(payload.refresh_token).await?;
    Ok(Json(res).into_response())
}

pub async fn me_handler(
    State(service): State<Arc<AuthServiceImpl>>,
    Extension(caller): Extension<Caller>,
) -> Result<Response, HandlerError> {
    let user = service.me(&caller).await?;
    Ok(respond(StatusCode::OK, ApiResponse::ok(user)))
}
