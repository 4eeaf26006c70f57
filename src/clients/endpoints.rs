//! Where each resource kind lives in the Open WebUI v1 API.

use crate::model::{Group, Knowledge, Model, User, UserList};
use reconcile_framework::ManagedResource;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Route table of one resource kind.
///
/// Paths are relative to the configured endpoint and include any query string.
pub trait Endpoints: ManagedResource + Serialize + DeserializeOwned {
    fn create_path() -> String;
    fn get_path(id: &str) -> String;
    fn list_path() -> String;
    fn update_path(id: &str) -> String;
    fn delete_path(id: &str) -> String;

    /// Decodes a listing. Accepts a bare array, or an object wrapping one under `data` or
    /// `items`.
    fn decode_list(body: Value) -> Result<Vec<Self>, serde_json::Error> {
        match body {
            Value::Object(mut map) => {
                let items = map
                    .remove("data")
                    .or_else(|| map.remove("items"))
                    .unwrap_or(Value::Array(Vec::new()));
                serde_json::from_value(items)
            }
            Value::Null => Ok(Vec::new()),
            other => serde_json::from_value(other),
        }
    }
}

/// Encodes an identity for use in a path segment or query value.
pub fn encode(id: &str) -> String {
    url::form_urlencoded::byte_serialize(id.as_bytes()).collect()
}

impl Endpoints for Model {
    fn create_path() -> String {
        "/api/v1/models/create".to_string()
    }

    fn get_path(id: &str) -> String {
        format!("/api/v1/models/model?id={}", encode(id))
    }

    fn list_path() -> String {
        "/api/v1/models/".to_string()
    }

    fn update_path(id: &str) -> String {
        format!("/api/v1/models/model/update?id={}", encode(id))
    }

    fn delete_path(id: &str) -> String {
        format!("/api/v1/models/model/delete?id={}", encode(id))
    }
}

impl Endpoints for Knowledge {
    fn create_path() -> String {
        "/api/v1/knowledge/create".to_string()
    }

    fn get_path(id: &str) -> String {
        format!("/api/v1/knowledge/{}", encode(id))
    }

    fn list_path() -> String {
        "/api/v1/knowledge/list".to_string()
    }

    fn update_path(id: &str) -> String {
        format!("/api/v1/knowledge/{}/update", encode(id))
    }

    fn delete_path(id: &str) -> String {
        format!("/api/v1/knowledge/{}/delete", encode(id))
    }
}

impl Endpoints for Group {
    fn create_path() -> String {
        "/api/v1/groups/create".to_string()
    }

    fn get_path(id: &str) -> String {
        format!("/api/v1/groups/id/{}", encode(id))
    }

    fn list_path() -> String {
        "/api/v1/groups/".to_string()
    }

    fn update_path(id: &str) -> String {
        format!("/api/v1/groups/id/{}/update", encode(id))
    }

    fn delete_path(id: &str) -> String {
        format!("/api/v1/groups/id/{}/delete", encode(id))
    }
}

/// Users are created through the admin "add user" route and listed in a `{users, total}`
/// envelope.
impl Endpoints for User {
    fn create_path() -> String {
        "/api/v1/auths/add".to_string()
    }

    fn get_path(id: &str) -> String {
        format!("/api/v1/users/{}", encode(id))
    }

    fn list_path() -> String {
        "/api/v1/users/".to_string()
    }

    fn update_path(id: &str) -> String {
        format!("/api/v1/users/{}/update", encode(id))
    }

    fn delete_path(id: &str) -> String {
        format!("/api/v1/users/{}", encode(id))
    }

    fn decode_list(body: Value) -> Result<Vec<Self>, serde_json::Error> {
        match body {
            Value::Array(_) => serde_json::from_value(body),
            Value::Null => Ok(Vec::new()),
            other => serde_json::from_value::<UserList>(other).map(|list| list.users),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ids_are_encoded() {
        assert_eq!(Model::get_path("my model/v2"), "/api/v1/models/model?id=my+model%2Fv2");
        assert_eq!(Group::delete_path("g-1"), "/api/v1/groups/id/g-1/delete");
    }

    #[test]
    fn test_list_accepts_array_and_wrapped() {
        let bare = Knowledge::decode_list(json!([{"id": "k-1", "name": "Docs"}])).unwrap();
        assert_eq!(bare[0].id.as_deref(), Some("k-1"));

        let wrapped = Knowledge::decode_list(json!({"data": [{"id": "k-2"}]})).unwrap();
        assert_eq!(wrapped[0].id.as_deref(), Some("k-2"));
    }

    #[test]
    fn test_user_list_envelope() {
        let users = User::decode_list(json!({
            "users": [{"id": "u-1", "name": "Alice", "email": "alice@example.com", "role": "user"}],
            "total": 1
        }))
        .unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email.as_deref(), Some("alice@example.com"));
    }
}
