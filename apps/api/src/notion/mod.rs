/// Notion client — files finished records as pages in the target database.
///
/// ARCHITECTURAL RULE: No other module may call the Notion API directly.
use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::extraction::record::{FieldValue, Record};
use crate::extraction::schema::{self, SCHEMA_FIELDS};
use crate::extraction::tags::split_tags;

const NOTION_API_URL: &str = "https://api.notion.com/v1/pages";
const NOTION_VERSION: &str = "2022-06-28";

#[derive(Debug, Error)]
pub enum NotionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Clone)]
pub struct NotionClient {
    client: Client,
    token: String,
    database_id: String,
}

impl NotionClient {
    pub fn new(token: String, database_id: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            token,
            database_id,
        }
    }

    /// Creates one database page holding `record`.
    pub async fn create_page(&self, record: &Record) -> Result<(), NotionError> {
        let body = json!({
            "parent": { "database_id": self.database_id },
            "properties": page_properties(record),
        });

        let response = self
            .client
            .post(NOTION_API_URL)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NotionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!("Notion page created in database {}", self.database_id);
        Ok(())
    }
}

/// Maps a record onto Notion property payloads. 名前 becomes the page
/// title, タグ a multi-select, every other field rich text. Fields absent
/// from the record are written as empty rich text so the page shape stays
/// uniform.
pub fn page_properties(record: &Record) -> Value {
    let mut properties = serde_json::Map::new();

    for field in SCHEMA_FIELDS {
        let text = record
            .get(field)
            .map(FieldValue::flatten)
            .unwrap_or_default();

        let property = if field == schema::NAME {
            json!({ "title": [{ "text": { "content": text } }] })
        } else if field == schema::TAGS {
            let options: Vec<Value> = split_tags(&text)
                .into_iter()
                .map(|tag| json!({ "name": tag }))
                .collect();
            json!({ "multi_select": options })
        } else {
            json!({ "rich_text": [{ "text": { "content": text } }] })
        };

        properties.insert(field.to_string(), property);
    }

    Value::Object(properties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::repair::SENTINEL;

    #[test]
    fn test_name_maps_to_page_title() {
        let mut record = Record::new();
        record.set(schema::NAME, "山田太郎");

        let properties = page_properties(&record);

        assert_eq!(
            properties["名前"]["title"][0]["text"]["content"],
            "山田太郎"
        );
    }

    #[test]
    fn test_tags_map_to_multi_select_options() {
        let mut record = Record::new();
        record.set(schema::TAGS, "Java, AWS、Docker");

        let properties = page_properties(&record);
        let options = properties["タグ"]["multi_select"].as_array().unwrap();

        assert_eq!(options.len(), 3);
        assert_eq!(options[0]["name"], "Java");
        assert_eq!(options[1]["name"], "AWS");
        assert_eq!(options[2]["name"], "Docker");
    }

    #[test]
    fn test_placeholder_tags_map_to_no_options() {
        let mut record = Record::new();
        record.set(schema::TAGS, SENTINEL);

        let properties = page_properties(&record);

        assert_eq!(properties["タグ"]["multi_select"], json!([]));
    }

    #[test]
    fn test_other_fields_map_to_rich_text() {
        let mut record = Record::new();
        record.set(schema::COMPENSATION, "月60万円〜80万円");

        let properties = page_properties(&record);

        assert_eq!(
            properties["給与"]["rich_text"][0]["text"]["content"],
            "月60万円〜80万円"
        );
    }

    #[test]
    fn test_every_schema_field_is_present_in_properties() {
        let properties = page_properties(&Record::new());
        let map = properties.as_object().unwrap();

        assert_eq!(map.len(), SCHEMA_FIELDS.len());
        assert_eq!(
            properties["備考"]["rich_text"][0]["text"]["content"],
            ""
        );
    }
}
