//! Routes the web client talks to.

use crate::{
    app_state::AppState,
    handlers::{ask::ask, upload::upload},
};
use axum::{Router, routing::post};
use std::sync::Arc;

/// Configures `POST /ask` and `POST /upload`.
pub fn create_router_chat() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ask", post(ask))
        .route("/upload", post(upload))
}
