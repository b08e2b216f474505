use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};

use crate::dto::category_dto::CategoryRequest;
use crate::service::category_service::{CategoryService, CategoryServiceImpl};
use crate::util::error::HandlerError;
use crate::util::extract::{parse_object_id, DeferredJson, ValidatedJson};
use crate::util::response::{respond, ApiResponse, Empty};

pub async fn list_categories_handler(
    State(service): State<Arc<CategoryServiceImpl>>,
) -> Result<Response, HandlerError> {
    let categories = service.list().await?;
    Ok(respond(StatusCode::OK, ApiResponse::list(categories)))
}

pub async fn get_category_handler(
    State(service): State<Arc<CategoryServiceImpl>>,
    Path(id): Path<String>,
) -> Result<Response, HandlerError> {
    let id = parse_object_id(&id, "category")?;
    let category = service.get(&id).await?;
    Ok(respond(StatusCode::OK, ApiResponse::ok(category)))
}

pub async fn create_category_handler(
    State(service): State<Arc<CategoryServiceImpl>>,
    ValidatedJson(payload): ValidatedJson<CategoryRequest>,
) -> Result<Response, HandlerError> {
    let category = service.create(payload.name).await?;
    Ok(respond(StatusCode::CREATED, ApiResponse::ok(category)))
}

pub async fn update_category_handler(
    State(service): State<Arc<CategoryServiceImpl>>,
    Path(id): Path<String>,
    payload: DeferredJson<CategoryRequest>,
) -> Result<Response, HandlerError> {
    let id = parse_object_id(&id, "category")?;
    let category = service.update(&id, payload).await?;
    Ok(respond(StatusCode::OK, ApiResponse::ok(category)))
}

pub async fn delete_category_handler(
    State(service): State<Arc<CategoryServiceImpl>>,
    Path(id): Path<String>,
) -> Result<Response, HandlerError> {
    let id = parse_object_id(&id, "category")?;
    service.delete(&id).await?;
    Ok(respond(StatusCode::OK, ApiResponse::ok(Empty {})))
}
