//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (CORS, per-request trace-ID injection)
//! - `/api/message` list/create routes
//! - Health route
//! - Optional OpenAPI document (disable with `MESSAGE_ENABLE_DOCS=false`)

pub mod doc;
mod health;
mod message;

use std::sync::Arc;

use axum::routing::get;
use axum::{Router, middleware};
use tower::ServiceBuilder;

use crate::middleware::{cors, trace};
use crate::state::AppState;

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .merge(health::router())
        .nest("/api", message::router());

    if state.config.enable_docs {
        app = app.route("/api-docs/openapi.json", get(doc::openapi_json));
    }

    app.layer(
        // Layers listed first run first on the way in.
        ServiceBuilder::new()
            .layer(middleware::from_fn_with_state(
                state.clone(),
                trace::trace_middleware,
            ))
            .layer(cors::cors_layer(&state)),
    )
    .with_state(state)
}
