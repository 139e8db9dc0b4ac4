//! CLI command handling
//!
//! Resolves configuration and dispatches commands to the runner.

use crate::commands::Commands;
use crate::common::{Overrides, Result, Target, TesterConfig};
use crate::graphql::NewUser;
use crate::testing::{Page, Runner, Summary};

/// Dispatch a CLI command, returning the run summary
pub async fn dispatch(command: Commands, overrides: Overrides) -> Result<Summary> {
    let config = TesterConfig::resolve(overrides)?;
    let mut runner = Runner::new(config)?;

    match command {
        Commands::Config => {
            print_config(runner.config());
            return Ok(Summary { run: 0, passed: 0 });
        }

        Commands::Run => return Ok(runner.run_suite().await),

        Commands::Health => {
            runner.liveness().await;
        }

        Commands::Introspect { direct } => {
            runner.introspect(target(direct)).await;
        }

        Commands::CreateUser {
            direct,
            email,
            password,
            first_name,
            last_name,
        } => {
            let input = NewUser {
                email: email.unwrap_or_else(|| NewUser::unique().email),
                password,
                first_name,
                last_name,
            };
            runner.create_user(target(direct), &input).await;
        }

        Commands::Users {
            direct,
            limit,
            offset,
        } => {
            runner
                .list_users(target(direct), Page { limit, offset }, None)
                .await;
        }

        Commands::User { id, direct } => {
            runner.get_user(target(direct), &id, None).await;
        }
    }

    Ok(runner.finish())
}

fn target(direct: bool) -> Target {
    if direct {
        Target::Direct
    } else {
        Target::Gateway
    }
}

fn print_config(config: &TesterConfig) {
    println!("Backend URL:  {} (from {})", config.backend_url(), config.backend_source());
    println!("Liveness:     {}", config.health_url());
    println!("Gateway:      {}", config.gateway_url());
    println!("Direct:       {}", config.direct_url());
    println!("Schema type:  {}", config.schema_type());
}
