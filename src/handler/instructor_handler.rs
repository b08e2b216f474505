use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Response,
};

use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest};
use crate::service::instructor_service::{InstructorService, InstructorServiceImpl};
use crate::util::access::Caller;
use crate::util::error::HandlerError;
use crate::util::extract::{parse_object_id, DeferredJson, ValidatedJson};
use crate::util::response::{respond, ApiResponse, Empty};

pub async fn list_instructors_handler(
    State(service): State<Arc<InstructorServiceImpl>>,
) -> Result<Response, HandlerError> {
    let instructors = service.list().await?;
    Ok(respond(StatusCode::OK, ApiResponse::list(instructors)))
}

pub async fn get_instructor_handler(
    State(service): State<Arc<InstructorServiceImpl>>,
    Path(id): Path<String>,
) -> Result<Response, HandlerError> {
    let id = parse_object_id(&id, "instructor")?;
    let detail = service.get(&id).await?;
    Ok(respond(StatusCode::OK, ApiResponse::ok(detail)))
}

pub async fn create_instructor_handler(
    State(service): State<Arc<InstructorServiceImpl>>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> Result<Response, HandlerError> {
    let instructor = service.create(payload).await?;
    Ok(respond(StatusCode::CREATED, ApiResponse::ok(instructor)))
}

pub async fn update_instructor_handler(
    State(service): State<Arc<InstructorServiceImpl>>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    payload: DeferredJson<UpdateUserRequest>,
) -> Result<Response, HandlerError> {
    let id = parse_object_id(&id, "instructor")?;
    let instructor = service.update(&caller, &id, payload).await?;
    Ok(respond(StatusCode::OK, ApiResponse::ok(instructor)))
}

pub async fn delete_instructor_handler(
    State(service): State<Arc<InstructorServiceImpl>>,
    Path(id): Path<String>,
) -> Result<Response, HandlerError> {
    let id = parse_object_id(&id, "instructor")?;
    service.delete(&id).await?;
    Ok(respond(StatusCode::OK, ApiResponse::ok(Empty {})))
}
