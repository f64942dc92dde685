use axum::Json;
use utoipa::OpenApi;

use crate::routes::{health, message};

#[derive(OpenApi)]
#[openapi(info(
    title = "message-server",
    description = "Create and list short text messages",
    version = "0.1.0"
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(message::MessageApi::openapi());
    root.merge(health::HealthApi::openapi());
    root
}

/// `GET /api-docs/openapi.json`
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(get_docs())
}
