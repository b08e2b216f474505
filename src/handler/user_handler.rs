use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Response,
};

use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest};
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::access::Caller;
use crate::util::error::HandlerError;
use crate::util::extract::{parse_object_id, DeferredJson, ValidatedJson};
use crate::util::response::{respond, ApiResponse, Empty};

pub async fn list_users_handler(State(service): State<Arc<UserServiceImpl>>) -> Result<Response, HandlerError> {
    let users = service.list().await?;
    Ok(respond(StatusCode::OK, ApiResponse::list(users)))
}

pub async fn get_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> Result<Response, HandlerError> {
    let id = parse_object_id(&id, "user")?;
    let user = service.get(&caller, &id).await?;
    Ok(respond(StatusCode::OK, ApiResponse::ok(user)))
}

pub async fn create_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> Result<Response, HandlerError> {
    let user = service.create(payload).await?;
    Ok(respond(StatusCode::CREATED, ApiResponse::ok(user)))
}

pub async fn update_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    payload: DeferredJson<UpdateUserRequest>,
) -> Result<Response, HandlerError> {
    let id = parse_object_id(&id, "user")?;
    let user = service.update(&caller, &id, payload).await?;
    Ok(respond(StatusCode::OK, ApiResponse::ok(user)))
}

pub async fn delete_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(id): Path<String>,
) -> Result<Response, HandlerError> {
    let id = parse_object_id(&id, "user")?;
    service.delete(&id).await?;
    Ok(respond(StatusCode::OK, ApiResponse::ok(Empty {})))
}
