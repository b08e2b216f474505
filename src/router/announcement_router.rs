use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::handler::announcement_handler::{
    create_announcement_handler, delete_announcement_handler, list_announcements_handler,
};
use crate::middlewares::auth_middleware::{require_roles, RoleGate};
use crate::model::user::Role;
use crate::service::announcement_service::AnnouncementServiceImpl;

pub fn announcement_router(service: Arc<AnnouncementServiceImpl>, gate: &RoleGate) -> Router {
    let public = Router::new().route("/api/announcements", get(list_announcements_handler));

    let admin = Router::new()
        .route("/api/announcements", post(create_announcement_handler))
        .route("/api/announcements/{id}", delete(delete_announcement_handler))
        .route_layer(middleware::from_fn_with_state(gate.allow(&[Role::Admin]), require_roles));

    public.merge(admin).with_state(service)
}
