use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::handler::course_handler::{
    create_course_handler, delete_course_handler, enroll_course_handler, get_course_handler, list_courses_handler,
    update_course_handler,
};
use crate::middlewares::auth_middleware::{require_roles, RoleGate};
use crate::model::user::Role;
use crate::service::course_service::CourseServiceImpl;

pub fn course_router(service: Arc<CourseServiceImpl>, gate: &RoleGate) -> Router {
    let public = Router::new()
        .route("/api/courses", get(list_courses_handler))
        .route("/api/courses/{id}", get(get_course_handler));

    // ownership is checked again in the service
    let teaching = Router::new()
        .route("/api/courses", post(create_course_handler))
        .route("/api/courses/{id}", put(update_course_handler).delete(delete_course_handler))
        .route_layer(middleware::from_fn_with_state(
            gate.allow(&[Role::Instructor, Role::Admin]),
            require_roles,
        ));

    let enrolment = Router::new()
        .route("/api/courses/{id}/enroll", post(enroll_course_handler))
        .route_layer(middleware::from_fn_with_state(gate.allow(&[]), require_roles));

    public.merge(teaching).merge(enrolment).with_state(service)
}
