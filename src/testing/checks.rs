//! Individual checks against the user service
//!
//! Each check sends one request and asserts on the response. Values a
//! later check depends on (the created user) are returned, not stored.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::common::{Error, Result};
use crate::graphql::operations;
use crate::graphql::types::SchemaData;
use crate::graphql::{GraphQlClient, GraphQlRequest, NewUser, User};

/// Pagination arguments for the users query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Page {
    fn is_empty(&self) -> bool {
        self.limit.is_none() && self.offset.is_none()
    }
}

/// Probe the liveness URL
pub async fn liveness(client: &GraphQlClient, url: &str) -> Result<StatusCode> {
    client.probe(url).await
}

/// Introspect the schema and require `expected_type` among its types
///
/// Returns the number of types reported.
pub async fn schema_introspection(
    client: &GraphQlClient,
    url: &str,
    expected_type: &str,
) -> Result<usize> {
    let response = client
        .execute(url, &GraphQlRequest::new(operations::INTROSPECTION), StatusCode::OK)
        .await?;

    let data = response.get("data").cloned().unwrap_or(Value::Null);
    let schema: SchemaData = serde_json::from_value(data).map_err(|e| {
        Error::TestAssertion(format!("response has no data.__schema.types list: {}", e))
    })?;

    find_type(&schema, expected_type)?;
    Ok(schema.schema.types.len())
}

/// Create a user and verify the echoed fields
pub async fn create_user(client: &GraphQlClient, url: &str, input: &NewUser) -> Result<User> {
    let request = GraphQlRequest::new(operations::CREATE_USER)
        .variable("input", serde_json::to_value(input)?);
    let response = client.execute(url, &request, StatusCode::OK).await?;

    let user: User = data_field(&response, "createUser")?;
    verify_created(&user, input)?;
    Ok(user)
}

/// List users, requiring `expected` among them when given
pub async fn list_users(
    client: &GraphQlClient,
    url: &str,
    page: Page,
    expected: Option<&User>,
) -> Result<Vec<User>> {
    let request = if page.is_empty() {
        GraphQlRequest::new(operations::LIST_USERS)
    } else {
        let mut request = GraphQlRequest::new(operations::LIST_USERS_PAGE);
        if let Some(limit) = page.limit {
            request = request.variable("limit", limit);
        }
        if let Some(offset) = page.offset {
            request = request.variable("offset", offset);
        }
        request
    };
    let response = client.execute(url, &request, StatusCode::OK).await?;

    let users: Vec<User> = data_field(&response, "users")?;
    if let Some(user) = expected {
        ensure_listed(&users, &user.id)?;
    }
    Ok(users)
}

/// Fetch a single user by id
///
/// A `null` result fails the check. When `expected` is given, the email
/// must match as well.
pub async fn get_user(
    client: &GraphQlClient,
    url: &str,
    id: &str,
    expected: Option<&User>,
) -> Result<User> {
    let request = GraphQlRequest::new(operations::GET_USER).variable("id", id);
    let response = client.execute(url, &request, StatusCode::OK).await?;

    let user: Option<User> = data_field(&response, "user")?;
    let user = user.ok_or_else(|| Error::TestAssertion(format!("user '{}' not found", id)))?;

    if user.id != id {
        return Err(Error::TestAssertion(format!(
            "requested user '{}', got '{}'",
            id, user.id
        )));
    }
    if let Some(expected) = expected {
        if user.email != expected.email {
            return Err(Error::TestAssertion(format!(
                "user '{}': expected email '{}', got '{}'",
                id, expected.email, user.email
            )));
        }
    }
    Ok(user)
}

/// Re-submit an existing user and require the service to reject it
///
/// Returns the rejection message. Only a GraphQL error counts as a
/// rejection; transport and status failures are passed through.
pub async fn duplicate_rejected(
    client: &GraphQlClient,
    url: &str,
    input: &NewUser,
) -> Result<String> {
    match create_user(client, url, input).await {
        Ok(user) => Err(Error::TestAssertion(format!(
            "duplicate email '{}' was accepted as user '{}'",
            input.email, user.id
        ))),
        Err(Error::GraphQl(errors)) => Ok(errors),
        Err(e) => Err(e),
    }
}

/// Deserialize `data.<field>` from a response envelope
fn data_field<T: DeserializeOwned>(response: &Value, field: &str) -> Result<T> {
    let value = response
        .get("data")
        .and_then(|data| data.get(field))
        .ok_or_else(|| Error::TestAssertion(format!("response has no data.{}", field)))?;

    serde_json::from_value(value.clone())
        .map_err(|e| Error::TestAssertion(format!("unexpected data.{} payload: {}", field, e)))
}

fn find_type(schema: &SchemaData, name: &str) -> Result<()> {
    if schema
        .schema
        .types
        .iter()
        .any(|t| t.name.as_deref() == Some(name))
    {
        return Ok(());
    }

    let available: Vec<&str> = schema
        .schema
        .types
        .iter()
        .filter(|t| t.kind == "OBJECT")
        .filter_map(|t| t.name.as_deref())
        .filter(|n| !n.starts_with("__"))
        .collect();
    Err(Error::TestAssertion(format!(
        "type '{}' not in schema. Object types: {:?}",
        name, available
    )))
}

fn verify_created(user: &User, input: &NewUser) -> Result<()> {
    if user.id.is_empty() {
        return Err(Error::TestAssertion("created user has an empty id".to_string()));
    }
    if user.email != input.email {
        return Err(Error::TestAssertion(format!(
            "expected email '{}', got '{}'",
            input.email, user.email
        )));
    }
    if user.status.is_none() {
        return Err(Error::TestAssertion(format!(
            "created user '{}' has no status",
            user.id
        )));
    }
    Ok(())
}

fn ensure_listed(users: &[User], id: &str) -> Result<()> {
    if users.iter().any(|u| u.id == id) {
        Ok(())
    } else {
        Err(Error::TestAssertion(format!(
            "created user '{}' missing from {} listed users",
            id,
            users.len()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(id: &str, email: &str) -> User {
        serde_json::from_value(json!({
            "id": id,
            "email": email,
            "firstName": "Test",
            "lastName": "User",
            "status": "active",
            "createdAt": "2024-01-01T00:00:00.000Z"
        }))
        .unwrap()
    }

    fn schema(names: &[&str]) -> SchemaData {
        let types: Vec<Value> = names
            .iter()
            .map(|n| json!({"name": n, "kind": "OBJECT"}))
            .collect();
        serde_json::from_value(json!({"__schema": {"types": types}})).unwrap()
    }

    #[test]
    fn test_find_type() {
        let schema = schema(&["Query", "Mutation", "UserType", "__Type"]);
        assert!(find_type(&schema, "UserType").is_ok());

        let err = find_type(&schema, "ProductType").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("ProductType"));
        assert!(msg.contains("UserType"));
        assert!(!msg.contains("__Type"));
    }

    #[test]
    fn test_verify_created() {
        let input = NewUser::with_email("a@example.com");
        assert!(verify_created(&user("1", "a@example.com"), &input).is_ok());

        let err = verify_created(&user("1", "b@example.com"), &input).unwrap_err();
        assert!(err.to_string().contains("expected email 'a@example.com'"));

        let err = verify_created(&user("", "a@example.com"), &input).unwrap_err();
        assert!(err.to_string().contains("empty id"));

        let mut no_status = user("1", "a@example.com");
        no_status.status = None;
        assert!(verify_created(&no_status, &input).is_err());
    }

    #[test]
    fn test_ensure_listed() {
        let users = vec![user("1", "a@example.com"), user("2", "b@example.com")];
        assert!(ensure_listed(&users, "2").is_ok());

        let err = ensure_listed(&users, "3").unwrap_err();
        assert!(matches!(err, Error::TestAssertion(_)));
        assert!(err.to_string().contains("missing from 2 listed users"));
    }

    #[test]
    fn test_data_field() {
        let response = json!({"data": {"users": [], "user": null}});
        let users: Vec<User> = data_field(&response, "users").unwrap();
        assert!(users.is_empty());

        let missing: Option<User> = data_field(&response, "user").unwrap();
        assert!(missing.is_none());

        let err = data_field::<Vec<User>>(&response, "products").unwrap_err();
        assert!(err.to_string().contains("no data.products"));

        let err = data_field::<Vec<User>>(&json!({"data": null}), "users").unwrap_err();
        assert!(matches!(err, Error::TestAssertion(_)));
    }

    #[test]
    fn test_page_is_empty() {
        assert!(Page::default().is_empty());
        assert!(!Page {
            limit: Some(5),
            offset: None
        }
        .is_empty());
    }
}
