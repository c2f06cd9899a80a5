//! Model output parser — one CSV record, with or without a header row.

use csv::ReaderBuilder;

use crate::extraction::record::Record;
use crate::extraction::schema::SCHEMA_FIELDS;
use crate::extraction::ExtractError;

/// Parses raw model output into a [`Record`].
///
/// The model is asked for exactly one header-less data line, but real output
/// drifts: a header row gets prepended, blank lines appear, extra records
/// follow. Rules:
/// - a first row whose first two cells equal the schema's first two names is
///   a header and is skipped;
/// - the first parseable data row wins, later rows are discarded;
/// - cells map positionally onto [`SCHEMA_FIELDS`], surplus cells are dropped.
pub fn parse_model_output(raw: &str) -> Result<Record, ExtractError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ExtractError::MalformedOutput(
            "model output was empty".to_string(),
        ));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = reader.records();
    let mut last_error = None;

    // The csv reader reports row-level errors individually, so scan past
    // broken rows instead of giving up on the first one.
    let first = loop {
        match rows.next() {
            Some(Ok(row)) => break Some(row),
            Some(Err(e)) => last_error = Some(e),
            None => break None,
        }
    };

    let Some(first) = first else {
        let detail = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no data rows in model output".to_string());
        return Err(ExtractError::MalformedOutput(detail));
    };

    let data = if is_header_row(&first) {
        let mut next_ok = None;
        for row in rows {
            if let Ok(row) = row {
                next_ok = Some(row);
                break;
            }
        }
        match next_ok {
            Some(row) => row,
            None => {
                return Err(ExtractError::MalformedOutput(
                    "header row with no data row".to_string(),
                ))
            }
        }
    } else {
        first
    };

    let mut record = Record::new();
    for (field, cell) in SCHEMA_FIELDS.iter().zip(data.iter()) {
        record.set(*field, cell.trim());
    }
    Ok(record)
}

fn is_header_row(row: &csv::StringRecord) -> bool {
    match (row.get(0), row.get(1)) {
        (Some(first), Some(second)) => {
            first.trim() == SCHEMA_FIELDS[0] && second.trim() == SCHEMA_FIELDS[1]
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::schema;

    fn headerless_line() -> String {
        // 6 populated cells followed by 14 empty ones, 20 in total.
        format!("山田太郎,Java,開発,東京,,Java経験3年{}", ",".repeat(14))
    }

    #[test]
    fn test_parses_headerless_line_positionally() {
        let record = parse_model_output(&headerless_line()).unwrap();
        assert_eq!(record.len(), 20);
        assert_eq!(record.get_text(schema::NAME), Some("山田太郎"));
        assert_eq!(record.get_text(schema::TAGS), Some("Java"));
        assert_eq!(record.get_text(schema::DESCRIPTION), Some("開発"));
        assert_eq!(record.get_text(schema::LOCATION), Some("東京"));
        assert_eq!(record.get_text(schema::HOURS), Some(""));
        assert_eq!(record.get_text(schema::REQUIRED_SKILLS), Some("Java経験3年"));
        assert_eq!(record.get_text(schema::NOTES), Some(""));
    }

    #[test]
    fn test_strips_header_row_when_present() {
        let input = format!("{}\n{}", SCHEMA_FIELDS.join(","), headerless_line());
        let record = parse_model_output(&input).unwrap();
        assert_eq!(record.get_text(schema::NAME), Some("山田太郎"));
    }

    #[test]
    fn test_header_cells_match_after_trimming() {
        let input = format!("名前 ,\tタグ ,仕事内容\n{}", headerless_line());
        let record = parse_model_output(&input).unwrap();
        assert_eq!(record.get_text(schema::NAME), Some("山田太郎"));
    }

    #[test]
    fn test_header_detection_needs_both_leading_names() {
        // First cell alone matching the schema is not enough; this is data.
        let input = "名前,Java,開発";
        let record = parse_model_output(input).unwrap();
        assert_eq!(record.get_text(schema::NAME), Some("名前"));
        assert_eq!(record.get_text(schema::TAGS), Some("Java"));
    }

    #[test]
    fn test_quoted_cells_keep_embedded_commas() {
        let input = "\"山田, 太郎\",\"Java, AWS\",開発";
        let record = parse_model_output(input).unwrap();
        assert_eq!(record.get_text(schema::NAME), Some("山田, 太郎"));
        assert_eq!(record.get_text(schema::TAGS), Some("Java, AWS"));
    }

    #[test]
    fn test_quoted_cell_spans_physical_lines() {
        // A newline inside quotes continues the record, it does not start a
        // second row.
        let input = "山田太郎,Java,\"決済基盤の開発\n保守運用まで\",東京";
        let record = parse_model_output(input).unwrap();
        assert_eq!(
            record.get_text(schema::DESCRIPTION),
            Some("決済基盤の開発\n保守運用まで")
        );
        assert_eq!(record.get_text(schema::LOCATION), Some("東京"));
    }

    #[test]
    fn test_only_first_data_row_is_consumed() {
        let input = "山田太郎,Java,開発\n佐藤花子,Python,運用";
        let record = parse_model_output(input).unwrap();
        assert_eq!(record.get_text(schema::NAME), Some("山田太郎"));
    }

    #[test]
    fn test_extra_cells_beyond_schema_are_dropped() {
        let input = format!("{},余り1,余り2", headerless_line());
        let record = parse_model_output(&input).unwrap();
        assert_eq!(record.len(), 20);
    }

    #[test]
    fn test_short_row_maps_leading_fields_only() {
        let record = parse_model_output("山田太郎,Java,開発").unwrap();
        assert_eq!(record.len(), 3);
        assert_eq!(record.get(schema::LOCATION), None);
    }

    #[test]
    fn test_empty_output_is_malformed() {
        assert!(matches!(
            parse_model_output(""),
            Err(ExtractError::MalformedOutput(_))
        ));
        assert!(matches!(
            parse_model_output("   \n  \n"),
            Err(ExtractError::MalformedOutput(_))
        ));
    }

    #[test]
    fn test_header_without_data_is_malformed() {
        let input = SCHEMA_FIELDS.join(",");
        assert!(matches!(
            parse_model_output(&input),
            Err(ExtractError::MalformedOutput(_))
        ));
    }

    #[test]
    fn test_cells_are_trimmed() {
        let input = " 山田太郎 ,\tJava , 開発 ";
        let record = parse_model_output(input).unwrap();
        assert_eq!(record.get_text(schema::NAME), Some("山田太郎"));
        assert_eq!(record.get_text(schema::TAGS), Some("Java"));
    }
}
