//! GraphQL documents sent by the checks

/// Schema type names and kinds
pub const INTROSPECTION: &str = r#"
{
  __schema {
    types {
      name
      kind
    }
  }
}
"#;

pub const CREATE_USER: &str = r#"
mutation CreateUser($input: CreateUserDto!) {
  createUser(input: $input) {
    id
    email
    firstName
    lastName
    status
    createdAt
  }
}
"#;

pub const LIST_USERS: &str = r#"
{
  users {
    id
    email
    firstName
    lastName
    status
    createdAt
  }
}
"#;

/// Paginated variant of [`LIST_USERS`]
pub const LIST_USERS_PAGE: &str = r#"
query GetUsers($limit: Float, $offset: Float) {
  users(limit: $limit, offset: $offset) {
    id
    email
    firstName
    lastName
    status
    createdAt
  }
}
"#;

pub const GET_USER: &str = r#"
query GetUser($id: ID!) {
  user(id: $id) {
    id
    email
    firstName
    lastName
    status
    createdAt
  }
}
"#;
