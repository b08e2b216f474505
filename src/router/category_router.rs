use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::handler::category_handler::{
    create_category_handler, delete_category_handler, get_category_handler, list_categories_handler,
    update_category_handler,
};
use crate::middlewares::auth_middleware::{require_roles, RoleGate};
use crate::model::user::Role;
use crate::service::category_service::CategoryServiceImpl;

pub fn category_router(service: Arc<CategoryServiceImpl>, gate: &RoleGate) -> Router {
    let public = Router::new()
        .route("/api/categories", get(list_categories_handler))
        .route("/api/categories/{id}", get(get_category_handler));

    let admin = Router::new()
        .route("/api/categories", post(create_category_handler))
        .route("/api/categories/{id}", put(update_category_handler).delete(delete_category_handler))
        .route_layer(middleware::from_fn_with_state(gate.allow(&[Role::Admin]), require_roles));

    public.merge(admin).with_state(service)
}
