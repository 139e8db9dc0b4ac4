//! Test runner implementation
//!
//! Drives the checks in order against the gateway and the direct service,
//! folding each result into a [`Tally`]. Only the liveness probe gates the
//! run; every other failure is recorded and the suite continues.

use colored::Colorize;

use crate::common::{Result, Target, TesterConfig};
use crate::graphql::{GraphQlClient, NewUser, User};

use super::checks::{self, Page};
use super::report::{Summary, Tally};

/// Executes checks and keeps the pass/fail counts
pub struct Runner {
    client: GraphQlClient,
    config: TesterConfig,
    tally: Tally,
}

impl Runner {
    pub fn new(config: TesterConfig) -> Result<Self> {
        Ok(Self {
            client: GraphQlClient::new()?,
            config,
            tally: Tally::default(),
        })
    }

    /// Resolved endpoints this runner targets
    pub fn config(&self) -> &TesterConfig {
        &self.config
    }

    /// Counts so far
    pub fn summary(&self) -> Summary {
        self.tally.summary()
    }

    /// Print the summary and return it
    pub fn finish(self) -> Summary {
        let summary = self.summary();
        summary.print();
        summary
    }

    /// Run the whole suite: liveness, then gateway and direct contexts
    pub async fn run_suite(mut self) -> Summary {
        println!(
            "\n{} {}",
            "Testing user service via".blue().bold(),
            self.config.backend_url().white().bold()
        );

        if !self.liveness().await {
            println!("{}", "Backend is not reachable, stopping tests".red());
            return self.finish();
        }

        self.run_context(Target::Gateway).await;
        self.run_context(Target::Direct).await;

        self.finish()
    }

    /// Run the functional checks against one endpoint
    ///
    /// The created user lives only for the duration of this context.
    pub async fn run_context(&mut self, target: Target) {
        println!(
            "\n{} {}",
            format!("{} endpoint:", capitalize(target)).cyan(),
            self.config.endpoint(target).dimmed()
        );

        self.introspect(target).await;

        let input = NewUser::unique();
        let created = self.create_user(target, &input).await;

        self.list_users(target, Page::default(), created.as_ref()).await;

        if let Some(user) = &created {
            self.get_user(target, &user.id, Some(user)).await;
            self.duplicate_rejected(target, &input).await;
        }
    }

    /// Liveness probe of `<backend>/api/`
    pub async fn liveness(&mut self) -> bool {
        let url = self.config.health_url();
        let result = checks::liveness(&self.client, &url).await;
        self.tally
            .record("Liveness", result, |status| status.to_string())
            .is_some()
    }

    /// Schema introspection, requiring the configured type
    pub async fn introspect(&mut self, target: Target) -> bool {
        let url = self.config.endpoint(target);
        let result =
            checks::schema_introspection(&self.client, &url, self.config.schema_type()).await;
        self.tally
            .record(&check_name("Schema Introspection", target), result, |count| {
                format!("{} types", count)
            })
            .is_some()
    }

    pub async fn create_user(&mut self, target: Target, input: &NewUser) -> Option<User> {
        let url = self.config.endpoint(target);
        let result = checks::create_user(&self.client, &url, input).await;
        self.tally
            .record(&check_name("Create User", target), result, |user| {
                format!("{} {} <{}> id={}", user.first_name, user.last_name, user.email, user.id)
            })
    }

    pub async fn list_users(
        &mut self,
        target: Target,
        page: Page,
        expected: Option<&User>,
    ) -> Option<Vec<User>> {
        let url = self.config.endpoint(target);
        let result = checks::list_users(&self.client, &url, page, expected).await;
        self.tally
            .record(&check_name("Get Users", target), result, |users| {
                format!("{} users", users.len())
            })
    }

    pub async fn get_user(
        &mut self,
        target: Target,
        id: &str,
        expected: Option<&User>,
    ) -> Option<User> {
        let url = self.config.endpoint(target);
        let result = checks::get_user(&self.client, &url, id, expected).await;
        self.tally
            .record(&check_name("Get User", target), result, |user| {
                format!("{} <{}>", user.id, user.email)
            })
    }

    pub async fn duplicate_rejected(&mut self, target: Target, input: &NewUser) -> bool {
        let url = self.config.endpoint(target);
        let result = checks::duplicate_rejected(&self.client, &url, input).await;
        self.tally
            .record(&check_name("Reject Duplicate Email", target), result, |_| {
                "rejected".to_string()
            })
            .is_some()
    }
}

fn check_name(check: &str, target: Target) -> String {
    format!("{} [{}]", check, target)
}

fn capitalize(target: Target) -> String {
    let name = target.to_string();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_names() {
        assert_eq!(check_name("Create User", Target::Gateway), "Create User [gateway]");
        assert_eq!(capitalize(Target::Direct), "Direct");
    }
}
