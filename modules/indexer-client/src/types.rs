use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One ingested or to-be-ingested unit of content.
///
/// Records decoded from the backend carry whatever fields the backend has
/// filled in so far; everything except `id` is optional, and an absent
/// field stays absent through a serialize round trip (no coercion to `""`).
/// Locally constructed records exist only to carry a submission payload and
/// are discarded once the request is sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputRecord {
    /// Never empty. Placeholder ids are assigned client-side by
    /// [`InputRecord::new`]; once the backend returns a persisted record,
    /// its id is authoritative.
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    /// Insertion order is display order. No client-side deduplication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl InputRecord {
    /// An empty record with a fresh UUID v4 placeholder id. The id is
    /// generated here, explicitly, not as a hidden side effect elsewhere.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: None,
            date: None,
            last_updated: None,
            status: None,
            author: None,
            description: None,
            source: None,
            input_type: None,
            thumbnail_url: None,
            topics: None,
            entities: None,
            content: None,
        }
    }
}

impl Default for InputRecord {
    fn default() -> Self {
        Self::new()
    }
}

// Identity is the record id alone.
impl PartialEq for InputRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for InputRecord {}

impl std::hash::Hash for InputRecord {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// JSON body for `POST /index`: a URL or plain note wrapped in a
/// single-field envelope.
#[derive(Debug, Clone, Serialize)]
pub struct IndexEnvelope {
    pub input: String,
}

/// Response shape of `GET /status/{request_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_has_nonempty_unique_id() {
        let a = InputRecord::new();
        let b = InputRecord::new();
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn equality_is_by_id_only() {
        let mut a = InputRecord::new();
        let mut b = a.clone();
        a.title = Some("one".into());
        b.title = Some("two".into());
        assert_eq!(a, b);

        let c = InputRecord::new();
        assert_ne!(a, c);
    }

    #[test]
    fn absent_fields_decode_to_none() {
        let record: InputRecord = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(record.id, "abc");
        assert!(record.title.is_none());
        assert!(record.topics.is_none());
        assert!(record.content.is_none());
    }

    #[test]
    fn absent_fields_stay_absent_on_reserialize() {
        let record: InputRecord =
            serde_json::from_str(r#"{"id": "abc", "title": "A Title"}"#).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.get("title").unwrap(), "A Title");
        assert!(!obj.contains_key("author"));
        assert!(!obj.contains_key("thumbnailUrl"));
        assert!(!obj.contains_key("content"));
    }

    #[test]
    fn wire_names_are_camel_case() {
        let record: InputRecord = serde_json::from_str(
            r#"{
                "id": "abc",
                "lastUpdated": "2024-01-02",
                "thumbnailUrl": "https://example.com/t.png",
                "type": "PDF"
            }"#,
        )
        .unwrap();
        assert_eq!(record.last_updated.as_deref(), Some("2024-01-02"));
        assert_eq!(
            record.thumbnail_url.as_deref(),
            Some("https://example.com/t.png")
        );
        assert_eq!(record.input_type.as_deref(), Some("PDF"));
    }

    #[test]
    fn topic_order_is_preserved() {
        let record: InputRecord = serde_json::from_str(
            r#"{"id": "abc", "topics": ["zebra", "alpha", "zebra"]}"#,
        )
        .unwrap();
        assert_eq!(
            record.topics.unwrap(),
            vec!["zebra", "alpha", "zebra"]
        );
    }

    #[test]
    fn missing_id_is_a_decode_error() {
        let result: std::result::Result<InputRecord, _> =
            serde_json::from_str(r#"{"title": "no id"}"#);
        assert!(result.is_err());
    }
}
