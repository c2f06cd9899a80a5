use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single field value as it arrives from parsed model output.
///
/// The CSV parser only ever produces `Text`. `List` exists because loosely
/// structured upstream payloads occasionally hand back an array where a
/// string was expected; the repairer flattens those during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Flattens to display text. List entries are trimmed and joined `", "`.
    pub fn flatten(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::List(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

/// One job posting as a field-name → value mapping.
///
/// Built once per request from parsed model output, repaired in place, then
/// mapped onto Notion page properties. After repair, every schema field is
/// present, textual, non-empty, and at most 2000 characters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Borrowed text of a field, `None` when absent or still a list.
    pub fn get_text(&self, field: &str) -> Option<&str> {
        match self.fields.get(field) {
            Some(FieldValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_deserializes_text_or_list() {
        let text: FieldValue = serde_json::from_str(r#""東京都港区""#).unwrap();
        assert_eq!(text, FieldValue::Text("東京都港区".to_string()));

        let list: FieldValue = serde_json::from_str(r#"["Java", "AWS"]"#).unwrap();
        assert_eq!(
            list,
            FieldValue::List(vec!["Java".to_string(), "AWS".to_string()])
        );
    }

    #[test]
    fn test_flatten_joins_list_with_comma_space() {
        let value = FieldValue::List(vec![
            "Java".to_string(),
            " Spring Boot ".to_string(),
            "".to_string(),
        ]);
        assert_eq!(value.flatten(), "Java, Spring Boot");
    }

    #[test]
    fn test_record_set_and_get() {
        let mut record = Record::new();
        assert!(record.is_empty());

        record.set("勤務地", "東京");
        assert_eq!(record.len(), 1);
        assert_eq!(record.get_text("勤務地"), Some("東京"));
        assert_eq!(record.get_text("給与"), None);
    }

    #[test]
    fn test_get_text_is_none_for_list_values() {
        let mut record = Record::new();
        record.set("タグ", vec!["Java".to_string(), "AWS".to_string()]);
        assert_eq!(record.get_text("タグ"), None);
        assert_eq!(record.get("タグ").unwrap().flatten(), "Java, AWS");
    }

    #[test]
    fn test_record_serializes_as_flat_map() {
        let mut record = Record::new();
        record.set("名前", "山田太郎");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["名前"], "山田太郎");
    }
}
