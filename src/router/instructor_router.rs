use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handler::instructor_handler::{
    create_instructor_handler, delete_instructor_handler, get_instructor_handler, list_instructors_handler,
    update_instructor_handler,
};
use crate::middlewares::auth_middleware::{require_roles, RoleGate};
use crate::model::user::Role;
use crate::service::instructor_service::InstructorServiceImpl;

pub fn instructor_router(service: Arc<InstructorServiceImpl>, gate: &RoleGate) -> Router {
    let public = Router::new()
        .route("/api/instructors", get(list_instructors_handler))
        .route("/api/instructors/{id}", get(get_instructor_handler));

    let admin = Router::new()
        .route("/api/instructors", post(create_instructor_handler))
        .route("/api/instructors/{id}", delete(delete_instructor_handler))
        .route_layer(middleware::from_fn_with_state(gate.allow(&[Role::Admin]), require_roles));

    let staff = Router::new()
        .route("/api/instructors/{id}", put(update_instructor_handler))
        .route_layer(middleware::from_fn_with_state(
            gate.allow(&[Role::Admin, Role::Instructor]),
            require_roles,
        ));

    public.merge(admin).merge(staff).with_state(service)
}
