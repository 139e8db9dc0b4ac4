//! GraphQL over HTTP
//!
//! Request/response types, the fixed operation documents and the client
//! that sends them.

mod client;
pub mod operations;
pub mod types;

pub use client::GraphQlClient;
pub use types::{GraphQlRequest, NewUser, User};
