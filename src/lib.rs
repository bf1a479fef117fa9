pub mod config;
pub mod cors;
pub mod error;
pub mod path;
pub mod relay;
pub mod state;

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;

use crate::{cors::with_cors, relay::relay_handler, state::RelayState};

/// Every path and method lands on the relay; the mount prefix is handled by path normalization.
/// Request bodies are not size-limited here; any cap belongs to the hosting runtime.
pub fn relay_router(state: Arc<RelayState>) -> Router {
    with_cors(
        Router::new()
            .fallback(relay_handler)
            .layer(DefaultBodyLimit::disable()),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
