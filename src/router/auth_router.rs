use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handler::auth_handler::{login_handler, me_handler, refresh_token_handler, register_handler};
use crate::middlewares::auth_middleware::{require_roles, RoleGate};
use crate::service::auth_service::AuthServiceImpl;

pub fn auth_router(service: Arc<AuthServiceImpl>, gate: &RoleGate) -> Router {
    let public = Router::new()
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/refresh-token", post(refresh_token_handler));

    let authenticated = Router::new()
        .route("/api/auth/me", get(me_handler))
        .route_layer(middleware::from_fn_with_state(gate.allow(&[]), require_roles));

    public.merge(authenticated).with_state(service)
}
