use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use shared::models::{AskRequest, AskResponse};
use tracing::{info, instrument, warn};

use crate::{
    app_state::AppState,
    http::error::{ApiError, AppResult},
};

/// `POST /ask`: answers a prompt within the configured conversation thread.
#[instrument(skip_all)]
pub async fn ask(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> AppResult<Json<AskResponse>> {
    let Json(request) = payload?;

    let prompt = request.prompt.trim();
    if prompt.is_empty() {
        metrics::counter!("ask_requests_total", "status" => "rejected").increment(1);
        return Err(ApiError::validation("Prompt cannot be empty."));
    }

    let thread_id = state.config.llm.thread_id.as_str();
    match state.assistant.chat(prompt, thread_id).await {
        Ok(answer) => {
            metrics::counter!("ask_requests_total", "status" => "ok").increment(1);
            info!(thread_id, chars = answer.len(), "answered prompt");
            Ok(Json(AskResponse { answer }))
        }
        Err(err) => {
            metrics::counter!("ask_requests_total", "status" => "error").increment(1);
            warn!(thread_id, error = %err, "assistant failed");
            Err(err.into())
        }
    }
}
