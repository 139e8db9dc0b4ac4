//! GraphQL wire types
//!
//! Request envelope plus the payload shapes returned by the user service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A GraphQL request body: `{"query": ..., "variables": {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest {
    pub query: String,
    pub variables: Map<String, Value>,
}

impl GraphQlRequest {
    /// Request without variables (sent as `{}`)
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: Map::new(),
        }
    }

    /// Add a variable
    pub fn variable(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.variables.insert(name.to_string(), value.into());
        self
    }
}

/// Input object for the `createUser` mutation (`CreateUserDto`)
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl NewUser {
    /// The standard test identity with a unique email
    pub fn unique() -> Self {
        Self::with_email(format!("test_{}@example.com", uuid::Uuid::new_v4()))
    }

    /// The standard test identity with the given email
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: "TestPass123!".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
        }
    }
}

/// A user as returned by `createUser`, `users` and `user`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub status: Option<String>,
    pub created_at: Option<Value>,
}

/// `data.__schema` of an introspection response
#[derive(Debug, Deserialize)]
pub struct SchemaData {
    #[serde(rename = "__schema")]
    pub schema: Schema,
}

#[derive(Debug, Deserialize)]
pub struct Schema {
    pub types: Vec<SchemaType>,
}

#[derive(Debug, Deserialize)]
pub struct SchemaType {
    pub name: Option<String>,
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let request = GraphQlRequest::new("{ users { id } }");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"query": "{ users { id } }", "variables": {}})
        );
    }

    #[test]
    fn test_new_user_serializes_as_create_user_dto() {
        let user = NewUser::with_email("a@example.com");
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({
                "email": "a@example.com",
                "password": "TestPass123!",
                "firstName": "Test",
                "lastName": "User"
            })
        );
    }

    #[test]
    fn test_unique_emails_differ() {
        let a = NewUser::unique();
        let b = NewUser::unique();
        assert_ne!(a.email, b.email);
        assert!(a.email.starts_with("test_"));
        assert!(a.email.ends_with("@example.com"));
    }

    #[test]
    fn test_user_deserializes_camel_case() {
        let user: User = serde_json::from_value(json!({
            "id": "42",
            "email": "a@example.com",
            "firstName": "Test",
            "lastName": "User",
            "status": "active",
            "createdAt": "2024-01-01T00:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(user.first_name, "Test");
        assert_eq!(user.status.as_deref(), Some("active"));
    }
}
