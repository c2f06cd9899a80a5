#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Client-facing messages are Japanese, matching the frontend. Diagnostic
/// detail goes to the log, never into the response body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Notion error: {0}")]
    Notion(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Extract(e) => {
                tracing::warn!("Extraction failed: {e}");
                let code = match e {
                    ExtractError::MalformedOutput(_) => "MALFORMED_OUTPUT",
                    ExtractError::EmptyRecord => "EMPTY_RECORD",
                };
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    code,
                    "求人情報から有効なレコードを生成できませんでした".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "AI処理中にエラーが発生しました".to_string(),
                )
            }
            AppError::Notion(msg) => {
                tracing::error!("Notion error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "NOTION_ERROR",
                    "Notionページの作成中にエラーが発生しました".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "サーバー内部でエラーが発生しました".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
