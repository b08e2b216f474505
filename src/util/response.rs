use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::Serialize;

/// The `{success, data, count, error}` wrapper every endpoint answers with.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Serializes as `{}`; the payload of successful deletes.
#[derive(Debug, Serialize)]
pub struct Empty {}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse { success: true, count: None, data: Some(data), error: None }
    }

    pub fn failure<M: Into<String>>(message: M) -> Self {
        ApiResponse { success: false, count: None, data: None, error: Some(message.into()) }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    pub fn list(items: Vec<T>) -> Self {
        ApiResponse { success: true, count: Some(items.len()), data: Some(items), error: None }
    }
}

pub fn respond<T: Serialize>(status: StatusCode, body: ApiResponse<T>) -> Response {
    (status, Json(body)).into_response()
}
