//! CLI command definitions
//!
//! Defines the clap commands for the tester.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::common::Overrides;

/// Endpoint and configuration options shared by every command
#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    /// Backend base URL (overrides config and env file discovery)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// GraphQL URL of the user service, bypassing the gateway
    #[arg(long, global = true)]
    pub direct_url: Option<String>,

    /// Env file to read REACT_APP_BACKEND_URL from
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Path to a config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Schema type introspection must find (default: UserType)
    #[arg(long, global = true)]
    pub schema_type: Option<String>,
}

impl From<ConnectionArgs> for Overrides {
    fn from(args: ConnectionArgs) -> Self {
        Self {
            backend_url: args.backend_url,
            direct_url: args.direct_url,
            env_file: args.env_file,
            config_path: args.config,
            schema_type: args.schema_type,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full suite against the gateway and the direct service (default)
    Run,

    /// Probe the backend liveness endpoint
    Health,

    /// Check that schema introspection reports the expected type
    Introspect {
        /// Query the user service directly instead of the gateway
        #[arg(long)]
        direct: bool,
    },

    /// Create a user and verify the returned fields
    CreateUser {
        /// Query the user service directly instead of the gateway
        #[arg(long)]
        direct: bool,

        /// Email (default: test_<uuid>@example.com)
        #[arg(long)]
        email: Option<String>,

        #[arg(long, default_value = "TestPass123!")]
        password: String,

        #[arg(long, default_value = "Test")]
        first_name: String,

        #[arg(long, default_value = "User")]
        last_name: String,
    },

    /// List users
    Users {
        /// Query the user service directly instead of the gateway
        #[arg(long)]
        direct: bool,

        /// Maximum number of users to return
        #[arg(long)]
        limit: Option<u32>,

        /// Number of users to skip
        #[arg(long)]
        offset: Option<u32>,
    },

    /// Fetch a single user by id
    User {
        /// User id
        id: String,

        /// Query the user service directly instead of the gateway
        #[arg(long)]
        direct: bool,
    },

    /// Print the resolved configuration
    Config,
}
