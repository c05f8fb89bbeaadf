use std::convert::Infallible;

use axum::{
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use futures::StreamExt;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::CAREER_COUNSELOR_SYSTEM;
use crate::llm_client::TextGenerator;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// POST /api/v1/chat/stream
/// Relays generated text verbatim as it arrives. Provider failures appear in-band as a
/// final error fragment; the status is always 200 once streaming starts.
pub async fn handle_chat_stream(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Response, AppError> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }
    info!("Relaying chat stream ({} chars)", message.chars().count());
    Ok(stream_response(state.llm.as_ref(), message))
}

fn stream_response(llm: &dyn TextGenerator, message: &str) -> Response {
    let fragments = llm
        .stream(message, CAREER_COUNSELOR_SYSTEM)
        .map(Ok::<_, Infallible>);

    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(fragments),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::llm_client::FALLBACK_STREAM_NOTICE;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_fragments_are_concatenated_verbatim() {
        let llm = ScriptedGenerator::streaming(&["Consider ", "data ", "engineering."]);
        let response = stream_response(&llm, "What next?");
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert_eq!(body_text(response).await, "Consider data engineering.");
    }

    #[tokio::test]
    async fn test_unconfigured_relays_single_notice() {
        let response = stream_response(&ScriptedGenerator::unconfigured(), "Hi");
        assert_eq!(body_text(response).await, FALLBACK_STREAM_NOTICE);
    }
}
