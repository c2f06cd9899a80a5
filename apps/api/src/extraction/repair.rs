//! Field-level repair: normalization, contamination checks, recovery, and
//! length limits.
//!
//! Model output drifts in predictable ways. Values land in the wrong column
//! (a price in 開発環境, a framework list in 作業期間), cells come back
//! empty, and long sections overflow what a Notion property will take. The
//! repairer walks every schema field and leaves each one textual, non-empty,
//! and within the length limit. Running it twice changes nothing.

use tracing::debug;

use crate::extraction::record::{FieldValue, Record};
use crate::extraction::schema::{self, SCHEMA_FIELDS};
use crate::extraction::{sections, ExtractError};

/// Placeholder written into fields that have no usable value.
pub const SENTINEL: &str = "no information available";

/// Upper bound per field, in characters. Notion rich text rejects longer
/// payloads.
pub const MAX_FIELD_CHARS: usize = 2000;

const ELLIPSIS: &str = "...";

/// Substrings that mark a value as monetary.
const CURRENCY_MARKERS: &[&str] = &[
    "万円", "¥", "月額", "時給", "単価", "年収", "月給",
];

/// Substrings that mark a value as a technology listing.
const TECH_NAME_MARKERS: &[&str] = &[
    "Java",
    "Ruby",
    "Rails",
    "Python",
    "PHP",
    "JavaScript",
    "TypeScript",
    "React",
    "Vue",
    "AWS",
    "Docker",
    "Linux",
    "MySQL",
    "PostgreSQL",
];

/// Markers that do not belong in a field. A hit means the model misaligned
/// columns, so the cell content comes from some other section.
struct ContaminationRule {
    field: &'static str,
    markers: &'static [&'static str],
}

const CONTAMINATION_RULES: &[ContaminationRule] = &[
    ContaminationRule {
        field: schema::TECH_STACK,
        markers: CURRENCY_MARKERS,
    },
    ContaminationRule {
        field: schema::UTILIZATION,
        markers: CURRENCY_MARKERS,
    },
    ContaminationRule {
        field: schema::DURATION,
        markers: TECH_NAME_MARKERS,
    },
    ContaminationRule {
        field: schema::COMPENSATION,
        markers: TECH_NAME_MARKERS,
    },
];

/// Repairs every schema field of `record` in place.
///
/// Per field: flatten and trim, swap a blank or missing value for the
/// sentinel, discard contaminated values, try to recover discarded and
/// sentinel values from `source_text`, then truncate. Recovery candidates
/// that would reintroduce a contamination marker are rejected, which keeps
/// the pass idempotent.
pub fn repair_record(record: &mut Record, source_text: &str) -> Result<(), ExtractError> {
    if record.is_empty() {
        return Err(ExtractError::EmptyRecord);
    }

    for field in SCHEMA_FIELDS {
        let mut value = normalize(record.get(field));

        if value != SENTINEL {
            if let Some(marker) = contamination(field, &value) {
                debug!(field, marker, "discarding out-of-section value");
                value = SENTINEL.to_string();
            }
        }

        if value == SENTINEL {
            if let Some(recovered) = sections::recover(field, source_text) {
                if contamination(field, &recovered).is_none() {
                    debug!(field, "recovered value from posting text");
                    value = recovered;
                }
            }
        }

        record.set(field, truncate(value));
    }

    Ok(())
}

fn normalize(value: Option<&FieldValue>) -> String {
    let flattened = value.map(FieldValue::flatten).unwrap_or_default();
    let trimmed = flattened.trim();
    if trimmed.is_empty() {
        SENTINEL.to_string()
    } else {
        trimmed.to_string()
    }
}

/// The marker that flags `value` as foreign to `field`, if any. Latin
/// markers match case-insensitively.
fn contamination(field: &str, value: &str) -> Option<&'static str> {
    let rule = CONTAMINATION_RULES.iter().find(|r| r.field == field)?;
    let lowered = value.to_lowercase();
    rule.markers
        .iter()
        .find(|marker| lowered.contains(&marker.to_lowercase()))
        .copied()
}

/// Caps `value` at [`MAX_FIELD_CHARS`] characters, not bytes. Most field
/// text is Japanese, so a byte cap would split code points. The tag
/// enricher applies the same rule to its write-backs, so every writer of
/// finalized field text shares one truncation.
pub fn truncate(value: String) -> String {
    if value.chars().count() <= MAX_FIELD_CHARS {
        return value;
    }
    let kept: String = value.chars().take(MAX_FIELD_CHARS - ELLIPSIS.len()).collect();
    format!("{kept}{ELLIPSIS}")
}
