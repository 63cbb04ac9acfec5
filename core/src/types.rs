//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the remote collection's JSON schema but are defined
//! independently of the mock-server crate; integration tests catch schema
//! drift. The server names its identifier `_id`, so the rename lives here and
//! nowhere else.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque, server-assigned identifier of a todo item.
///
/// Servers may send `_id` as a string or an integer; either way it is kept
/// as text and sent back in request paths unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TodoId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match WireId::deserialize(deserializer)? {
            WireId::Text(id) => Self(id),
            WireId::Unsigned(id) => Self(id.to_string()),
            WireId::Signed(id) => Self(id.to_string()),
        })
    }
}

impl TodoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single todo item returned by the API.
///
/// Fields the client does not recognize are ignored, and a missing
/// `completed` is read as `false`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    #[serde(rename = "_id")]
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Request payload for creating a new todo. The server defaults
/// `completed` to `false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            completed: None,
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            title: None,
            completed: Some(completed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_reads_underscore_id() {
        let item: TodoItem =
            serde_json::from_str(r#"{"_id":"abc123","title":"milk","completed":true}"#).unwrap();
        assert_eq!(item.id.as_str(), "abc123");
        assert_eq!(item.title, "milk");
        assert!(item.completed);
    }

    #[test]
    fn item_reads_integer_id_as_text() {
        let item: TodoItem =
            serde_json::from_str(r#"{"_id":1,"title":"milk","completed":false}"#).unwrap();
        assert_eq!(item.id, TodoId::from("1"));

        let items: Vec<TodoItem> =
            serde_json::from_str(r#"[{"_id":-7,"title":"a"},{"_id":"x9","title":"b"}]"#).unwrap();
        assert_eq!(items[0].id.as_str(), "-7");
        assert_eq!(items[1].id.as_str(), "x9");
    }

    #[test]
    fn item_rejects_non_scalar_id() {
        assert!(serde_json::from_str::<TodoItem>(r#"{"_id":{"$oid":"1"},"title":"a"}"#).is_err());
        assert!(serde_json::from_str::<TodoItem>(r#"{"_id":1.5,"title":"a"}"#).is_err());
    }

    #[test]
    fn item_defaults_completed_and_ignores_extra_fields() {
        let item: TodoItem =
            serde_json::from_str(r#"{"_id":"1","title":"bread","__v":0,"createdAt":"x"}"#).unwrap();
        assert!(!item.completed);
    }

    #[test]
    fn item_serializes_id_as_underscore_id() {
        let item = TodoItem {
            id: TodoId::new("42"),
            title: "eggs".to_string(),
            completed: false,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["_id"], "42");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn create_payload_carries_title_only() {
        let json = serde_json::to_value(CreateTodo {
            title: "Buy milk".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"title": "Buy milk"}));
    }

    #[test]
    fn update_payload_omits_absent_fields() {
        let json = serde_json::to_value(UpdateTodo::completed(true)).unwrap();
        assert_eq!(json, serde_json::json!({"completed": true}));
        let json = serde_json::to_value(UpdateTodo::title("x")).unwrap();
        assert_eq!(json, serde_json::json!({"title": "x"}));
    }
}
