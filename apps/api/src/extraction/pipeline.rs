//! End-to-end structuring flow for one posting.
//!
//! `structure_record` is the pure core: model output in, finished record
//! out. `process_posting` wraps it with the model call in front and the
//! Notion write behind.

use tracing::info;

use crate::errors::AppError;
use crate::extraction::record::Record;
use crate::extraction::{parser, prompts, repair, tags, ExtractError};
use crate::llm_client::LlmClient;
use crate::notion::NotionClient;

/// Turns raw model output into a finished record, using `source_text` to
/// recover discarded or missing values. Deterministic and safe to re-run.
pub fn structure_record(raw_output: &str, source_text: &str) -> Result<Record, ExtractError> {
    let mut record = parser::parse_model_output(raw_output)?;
    repair::repair_record(&mut record, source_text)?;
    tags::enrich_tags(&mut record);
    Ok(record)
}

/// Full flow for one posting: model call, structuring, Notion page.
pub async fn process_posting(
    llm: &LlmClient,
    notion: &NotionClient,
    content: &str,
) -> Result<Record, AppError> {
    info!(chars = content.chars().count(), "structuring job posting");

    let prompt = prompts::TRANSFORM_PROMPT_TEMPLATE.replace("{content}", content);
    let raw_output = llm
        .call_text(prompts::TRANSFORM_SYSTEM, &prompt)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    let record = structure_record(&raw_output, content)?;
    info!(fields = record.len(), "record structured");

    notion
        .create_page(&record)
        .await
        .map_err(|e| AppError::Notion(e.to_string()))?;
    info!("notion page created");

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::repair::SENTINEL;
    use crate::extraction::schema::{self, SCHEMA_FIELDS};

    #[test]
    fn test_structure_headerless_line_end_to_end() {
        let raw = format!("山田太郎,Java,開発,東京,,Java経験3年{}", ",".repeat(14));
        let source = "Javaエンジニア募集。勤務地は東京です。";

        let record = structure_record(&raw, source).unwrap();

        assert_eq!(record.len(), SCHEMA_FIELDS.len());
        assert_eq!(record.get_text(schema::NAME), Some("山田太郎"));
        assert_eq!(record.get_text(schema::HOURS), Some(SENTINEL));
        assert_eq!(
            record.get_text(schema::TAGS),
            Some("Java, システム開発, エンジニア")
        );
    }

    #[test]
    fn test_structure_with_header_and_contaminated_column() {
        let mut cells = vec![""; SCHEMA_FIELDS.len()];
        cells[0] = "鈴木次郎";
        cells[1] = "\"Java,AWS,Docker\"";
        cells[10] = "85万円";
        let raw = format!("{}\n{}", SCHEMA_FIELDS.join(","), cells.join(","));
        let source = "【開発環境】Go, Docker\n【給与】月85万円";

        let record = structure_record(&raw, source).unwrap();

        assert_eq!(record.get_text(schema::NAME), Some("鈴木次郎"));
        assert_eq!(record.get_text(schema::TAGS), Some("Java,AWS,Docker"));
        assert_eq!(record.get_text(schema::TECH_STACK), Some("Go, Docker"));
        assert_eq!(record.get_text(schema::COMPENSATION), Some("月85万円"));
    }

    #[test]
    fn test_structure_rejects_unusable_output() {
        let result = structure_record("   \n  ", "本文");
        assert!(matches!(result, Err(ExtractError::MalformedOutput(_))));
    }
}
