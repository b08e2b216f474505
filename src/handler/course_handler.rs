use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Response,
};
use tracing::info;

use crate::dto::course_dto::{CreateCourseRequest, UpdateCourseRequest};
use crate::service::course_service::{CourseService, CourseServiceImpl};
use crate::util::access::Caller;
use crate::util::error::HandlerError;
use crate::util::extract::{parse_object_id, DeferredJson, ValidatedJson};
use crate::util::response::{respond, ApiResponse, Empty};

pub async fn list_courses_handler(
    State(service): State<Arc<CourseServiceImpl>>,
) -> Result<Response, HandlerError> {
    let courses = service.list().await?;
    Ok(respond(StatusCode::OK, ApiResponse::list(courses)))
}

pub async fn get_course_handler(
    State(service): State<Arc<CourseServiceImpl>>,
    Path(id): Path<String>,
) -> Result<Response, HandlerError> {
    let id = parse_object_id(&id, "course")?;
    let course = service.get(&id).await?;
    Ok(respond(StatusCode::OK, ApiResponse::ok(course)))
}

pub async fn create_course_handler(
    State(service): State<Arc<CourseServiceImpl>>,
    Extension(caller): Extension<Caller>,
    ValidatedJson(payload): ValidatedJson<CreateCourseRequest>,
) -> Result<Response, HandlerError> {
    info!("[create_course_handler] Handler called by {}", caller.id);
    let course = service.create(&caller, payload).await?;
    Ok(respond(StatusCode::CREATED, ApiResponse::ok(course)))
}

pub async fn update_course_handler(
    State(service): State<Arc<CourseServiceImpl>>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    payload: DeferredJson<UpdateCourseRequest>,
) -> Result<Response, HandlerError> {
    let id = parse_object_id(&id, "course")?;
    let course = service.update(&caller, &id, payload).await?;
    Ok(respond(StatusCode::OK, ApiResponse::ok(course)))
}

pub async fn delete_course_handler(
    State(service): State<Arc<CourseServiceImpl>>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> Result<Response, HandlerError> {
    let id = parse_object_id(&id, "course")?;
    service.delete(&caller, &id).await?;
    Ok(respond(StatusCode::OK, ApiResponse::ok(Empty {})))
}

pub async fn enroll_course_handler(
    State(service): State<Arc<CourseServiceImpl>>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> Result<Response, HandlerError> {
    let id = parse_object_id(&id, "course")?;
    let course = service.enroll(&caller, &id).await?;
    Ok(respond(StatusCode::OK, ApiResponse::ok(course)))
}
