//! GraphQL user service smoke tester
//!
//! Sends a fixed series of GraphQL operations to a user-management API,
//! through its gateway and directly, and reports pass/fail per check.

pub mod cli;
pub mod commands;
pub mod common;
pub mod graphql;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Error, Overrides, Result, Target, TesterConfig};
pub use testing::{Runner, Summary};
