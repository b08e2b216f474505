use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get},
    Router,
};

use crate::handler::user_handler::{
    create_user_handler, delete_user_handler, get_user_handler, list_users_handler, update_user_handler,
};
use crate::middlewares::auth_middleware::{require_roles, RoleGate};
use crate::model::user::Role;
use crate::service::user_service::UserServiceImpl;

pub fn user_router(service: Arc<UserServiceImpl>, gate: &RoleGate) -> Router {
    let admin = Router::new()
        .route("/api/users", get(list_users_handler).post(create_user_handler))
        .route("/api/users/{id}", delete(delete_user_handler))
        .route_layer(middleware::from_fn_with_state(gate.allow(&[Role::Admin]), require_roles));

    // self-or-admin is decided by the service
    let account = Router::new()
        .route("/api/users/{id}", get(get_user_handler).put(update_user_handler))
        .route_layer(middleware::from_fn_with_state(gate.allow(&[]), require_roles));

    admin.merge(account).with_state(service)
}
