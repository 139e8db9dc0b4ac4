//! Check runner
//!
//! Sends a fixed series of GraphQL operations to the user service, both
//! through the gateway and directly, and asserts on the structured
//! responses rather than on printed output.

pub mod checks;
mod report;
mod runner;

pub use checks::Page;
pub use report::{Summary, Tally};
pub use runner::Runner;
