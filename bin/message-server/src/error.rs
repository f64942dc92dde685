//! Unified server error type.
//!
//! Handlers return `Result<T, ServerError>`; [`IntoResponse`] turns each
//! variant into its status code and a `{"status": "error", "message": …}`
//! body. Store failures keep the driver's description in the message.

use axum::Json;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::entities::StoreError;
use crate::schemas::message::ErrorResponse;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The request body was absent or not JSON.
    #[error("No data provided")]
    NoData,

    /// The body parsed but carried no usable `content`.
    #[error("Content is required")]
    ContentRequired,

    /// The request body exceeded the configured size limit.
    #[error("Request body too large")]
    PayloadTooLarge,

    /// The request body could not be read off the connection.
    #[error("Error reading request body: {0}")]
    BodyRead(String),

    /// Reading messages from the store failed.
    #[error("Error fetching messages: {0}")]
    Fetch(#[source] StoreError),

    /// Inserting a message failed; the store has rolled back.
    #[error("Error creating message: {0}")]
    Create(#[source] StoreError),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::NoData | ServerError::ContentRequired | ServerError::BodyRead(_) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::Fetch(_) | ServerError::Create(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ServerError::NoData
            | ServerError::ContentRequired
            | ServerError::PayloadTooLarge
            | ServerError::BodyRead(_) => {
                warn!(error = %self, "rejected request");
            }
            ServerError::Fetch(e) | ServerError::Create(e) => {
                error!(error = ?e, "{self}");
            }
        }
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

impl From<BytesRejection> for ServerError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ServerError::PayloadTooLarge
        } else {
            ServerError::BodyRead(rejection.body_text())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn body_json(resp: Response) -> Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn client_errors_are_400() {
        assert_eq!(ServerError::NoData.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ServerError::ContentRequired.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn body_errors_map_to_client_statuses() {
        assert_eq!(ServerError::PayloadTooLarge.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        let e = ServerError::BodyRead("client reset".into());
        assert_eq!(e.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(e.to_string(), "Error reading request body: client reset");
    }

    #[test]
    fn store_errors_are_500() {
        let e = ServerError::Fetch(StoreError::Database(sqlx::Error::PoolClosed));
        assert_eq!(e.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let e = ServerError::Create(StoreError::Database(sqlx::Error::RowNotFound));
        assert_eq!(e.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn bad_request_body() {
        let resp = ServerError::ContentRequired.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Content is required");
    }

    #[tokio::test]
    async fn store_error_detail_is_embedded() {
        let e = ServerError::Create(StoreError::Database(sqlx::Error::PoolClosed));
        let detail = sqlx::Error::PoolClosed.to_string();
        let body = body_json(e.into_response()).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], format!("Error creating message: {detail}"));
    }
}
