use std::sync::Arc;
use std::time::Instant;

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::error::ServerError;
use crate::state::AppState;

pub static X_TRACE_ID: &str = "x-trace-id";

/// Largest request body accepted; matches axum's default extractor limit.
pub const MAX_REQUEST_BODY: usize = 2 * 1024 * 1024;

/// JSON bodies up to this size are written to the log verbatim.
const MAX_LOGGED_BODY: usize = 1024;

/// Tags each request with a trace id and logs its start, body and outcome.
///
/// A valid UUID in the incoming `x-trace-id` header is reused; anything else
/// is replaced by a fresh one. The id is echoed on the response.
pub async fn trace_middleware(
    State(_state): State<Arc<AppState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let start_time = Instant::now();

    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);
    let trace_header = HeaderValue::from_str(&trace_id.to_string()).ok();

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        info!("→ request started");

        let (parts, body) = req.into_parts();
        let mut response = match read_request_body(&parts.headers, body).await {
            Ok(req_bytes) => {
                let mut req = Request::from_parts(parts, Body::from(req_bytes));
                if let Some(value) = &trace_header {
                    req.headers_mut().insert(X_TRACE_ID, value.clone());
                }
                let response = next.run(req).await;

                let (parts, body) = response.into_parts();
                let res_bytes = match body.collect().await {
                    Ok(collected) => collected.to_bytes(),
                    Err(e) => {
                        warn!(error = %e, "response body could not be read");
                        Bytes::new()
                    }
                };
                log_body("response", &parts.headers, &res_bytes);
                Response::from_parts(parts, Body::from(res_bytes))
            }
            Err(e) => e.into_response(),
        };

        if let Some(value) = trace_header {
            response.headers_mut().insert(X_TRACE_ID, value);
        }

        info!(
            status = response.status().as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "← response finished"
        );
        response
    }
    .instrument(span)
    .await
}

/// Buffer the request body, refusing more than [`MAX_REQUEST_BODY`] bytes.
///
/// A failed read ends the request here; the handler never sees a truncated
/// body.
async fn read_request_body(headers: &HeaderMap, body: Body) -> Result<Bytes, ServerError> {
    let bytes = match Limited::new(body, MAX_REQUEST_BODY).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            warn!(limit = MAX_REQUEST_BODY, "request body over size limit");
            return Err(ServerError::PayloadTooLarge);
        }
        Err(e) => {
            warn!(error = %e, "request body could not be read");
            return Err(ServerError::BodyRead(e.to_string()));
        }
    };
    log_body("request", headers, &bytes);
    Ok(bytes)
}

/// Log `bytes` verbatim when it is small JSON; otherwise log only its size.
fn log_body(direction: &str, headers: &HeaderMap, bytes: &Bytes) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if content_type.contains("application/json") && bytes.len() < MAX_LOGGED_BODY {
        if let Ok(text) = std::str::from_utf8(bytes) {
            info!("{direction} body: {text}");
        }
    } else if !bytes.is_empty() {
        info!(
            "{direction} body: [skipped: type={content_type}, size={}]",
            bytes.len()
        );
    }
}
