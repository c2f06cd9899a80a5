//! Prompt templates for the structuring call.
//!
//! The user message stays in Japanese on purpose: postings are Japanese and
//! mixed-language instructions measurably degrade column alignment.

/// System prompt for the CSV structuring call.
pub const TRANSFORM_SYSTEM: &str = "You are a precise data extraction engine. \
You convert Japanese job postings into exactly one CSV data line. \
Respond with the CSV line only: no header, no code fences, no commentary.";

/// User message template. `{content}` is replaced with the raw posting text.
pub const TRANSFORM_PROMPT_TEMPLATE: &str = r#"以下の求人情報を、次の20列に対応するCSVデータ1行に変換してください。

列の順序:
名前,タグ,仕事内容,勤務地,勤務時間,必須スキル,案件タイトル,案件内容,歓迎スキル,給与,開発環境,雇用形態,業界,ポジション,商材,作業期間,稼働率,作業形態,求める人物像,備考

ルール:
- 出力はデータ1行のみ。ヘッダー行は出力しない。
- 値にカンマを含む場合はダブルクォートで囲む。
- タグ列はカンマ区切りで3〜5個のタグを入れる。
- 該当する情報がない列は空のままにする。
- 金額は給与列のみに入れる。開発環境列には技術名のみを入れる。

求人情報:
{content}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::schema::SCHEMA_FIELDS;

    #[test]
    fn test_template_has_content_placeholder() {
        assert!(TRANSFORM_PROMPT_TEMPLATE.contains("{content}"));
    }

    #[test]
    fn test_template_lists_every_schema_field_in_order() {
        let columns_line = SCHEMA_FIELDS.join(",");
        assert!(
            TRANSFORM_PROMPT_TEMPLATE.contains(&columns_line),
            "column list drifted from the schema"
        );
    }

    #[test]
    fn test_system_prompt_forbids_extra_output() {
        assert!(TRANSFORM_SYSTEM.contains("no header"));
        assert!(TRANSFORM_SYSTEM.contains("no code fences"));
    }
}
