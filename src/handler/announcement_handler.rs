use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};

use crate::dto::announcement_dto::CreateAnnouncementRequest;
use crate::service::announcement_service::{AnnouncementService, AnnouncementServiceImpl};
use crate::util::error::HandlerError;
use crate::util::extract::{parse_object_id, ValidatedJson};
use crate::util::response::{respond, ApiResponse, Empty};

pub async fn list_announcements_handler(
    State(service): State<Arc<AnnouncementServiceImpl>>,
) -> Result<Response, HandlerError> {
    let announcements = service.list().await?;
    Ok(respond(StatusCode::OK, ApiResponse::list(announcements)))
}

pub async fn create_announcement_handler(
    State(service): State<Arc<AnnouncementServiceImpl>>,
    ValidatedJson(payload): ValidatedJson<CreateAnnouncementRequest>,
) -> Result<Response, HandlerError> {
    let announcement = service.create(payload).await?;
    Ok(respond(StatusCode::CREATED, ApiResponse::ok(announcement)))
}

pub async fn delete_announcement_handler(
    State(service): State<Arc<AnnouncementServiceImpl>>,
    Path(id): Path<String>,
) -> Result<Response, HandlerError> {
    let id = parse_object_id(&id, "announcement")?;
    service.delete(&id).await?;
    Ok(respond(StatusCode::OK, ApiResponse::ok(Empty {})))
}
