//! Axum route handler for the chat endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::chat::prompt::build_messages;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// POST /chat
///
/// Answers a recruiter-style question in the first person, grounded in the
/// profile text loaded at startup. Malformed bodies are rejected by the Json
/// extractor before this runs; an upstream model failure maps to 502 without
/// affecting the process.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.query.trim().is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }

    let messages = build_messages(&state.profile_text, &request.query);

    let answer = state.llm.chat(&messages).await?;

    Ok(Json(ChatResponse { answer }))
}
