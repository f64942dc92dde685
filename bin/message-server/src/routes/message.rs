//! `/api/message`: list and create messages.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tracing::info;
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::schemas::message::{
    CreateMessageRequest, CreateMessageResponse, ErrorResponse, MessageListResponse,
    MessageResponse,
};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(list_messages, create_message),
    components(schemas(
        CreateMessageRequest,
        CreateMessageResponse,
        MessageListResponse,
        MessageResponse,
        ErrorResponse
    ))
)]
pub struct MessageApi;

/// Register message routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/message", get(list_messages).post(create_message))
}

#[utoipa::path(
    get,
    path = "/api/message",
    tag = "messages",
    responses(
        (status = 200, description = "All stored messages", body = MessageListResponse),
        (status = 500, description = "Store error", body = ErrorResponse),
    )
)]
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MessageListResponse>, ServerError> {
    let messages = state.store.list_all().await.map_err(ServerError::Fetch)?;
    Ok(Json(MessageListResponse::success(
        messages.iter().map(|m| m.to_response()).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/message",
    tag = "messages",
    request_body = CreateMessageRequest,
    responses(
        (status = 201, description = "Message created", body = CreateMessageResponse),
        (status = 400, description = "No body or no content", body = ErrorResponse),
        (status = 413, description = "Body over the size limit", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse),
    )
)]
pub async fn create_message(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<CreateMessageResponse>), ServerError> {
    let content = parse_content(&body?)?;
    let message = state
        .store
        .insert(&content)
        .await
        .map_err(ServerError::Create)?;

    info!(id = message.id, "message created");
    Ok((
        StatusCode::CREATED,
        Json(CreateMessageResponse::created(message.to_response())),
    ))
}

/// Validate a raw POST body down to the message text.
///
/// The body is parsed regardless of `Content-Type`. An empty, unparseable or
/// `null` body is "no data"; anything else without a non-empty string
/// `content` field is "content required".
fn parse_content(body: &[u8]) -> Result<String, ServerError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ServerError::NoData)?;
    if value.is_null() {
        return Err(ServerError::NoData);
    }
    // Structs also deserialize from arrays; only objects carry named fields.
    if !value.is_object() {
        return Err(ServerError::ContentRequired);
    }
    serde_json::from_value::<CreateMessageRequest>(value)
        .ok()
        .and_then(CreateMessageRequest::into_content)
        .ok_or(ServerError::ContentRequired)
}
