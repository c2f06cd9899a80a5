//! HTTP handlers for the posting routes.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::pipeline;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProcessJobRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ProcessJobResponse {
    pub message: String,
}

/// POST /api/process_job
///
/// Accepts one raw posting, structures it, and files it as a Notion page.
pub async fn handle_process_job(
    State(state): State<AppState>,
    Json(request): Json<ProcessJobRequest>,
) -> Result<Json<ProcessJobResponse>, AppError> {
    let content = request.content.trim();
    if content.is_empty() {
        return Err(AppError::Validation("求人情報が空です".to_string()));
    }

    let record = pipeline::process_posting(&state.llm, &state.notion, content).await?;
    info!(fields = record.len(), "process_job completed");

    Ok(Json(ProcessJobResponse {
        message: "処理が完了しました".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes_from_frontend_payload() {
        let request: ProcessJobRequest =
            serde_json::from_str(r#"{"content": "【案件名】テスト案件"}"#).unwrap();
        assert_eq!(request.content, "【案件名】テスト案件");
    }

    #[test]
    fn test_response_serializes_completion_message() {
        let response = ProcessJobResponse {
            message: "処理が完了しました".to_string(),
        };
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["message"], "処理が完了しました");
    }

    #[tokio::test]
    async fn test_blank_content_is_rejected_before_any_upstream_call() {
        let state = AppState {
            llm: crate::llm_client::LlmClient::new("test-key".to_string()),
            notion: crate::notion::NotionClient::new("test-token".to_string(), "db".to_string()),
        };

        let result = handle_process_job(
            State(state),
            Json(ProcessJobRequest {
                content: "   \n  ".to_string(),
            }),
        )
        .await;

        assert!(matches!(
            result,
            Err(AppError::Validation(msg)) if msg == "求人情報が空です"
        ));
    }
}
