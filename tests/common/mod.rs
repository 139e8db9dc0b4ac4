//! In-memory stand-in for the user service, served by wiremock
//!
//! Answers the introspection, createUser, users and user operations by
//! inspecting the query text, and rejects duplicate emails the way the
//! real create handler does.

#![allow(dead_code)]

use std::sync::Mutex;

use gqltest::common::config::FileConfig;
use gqltest::{Overrides, TesterConfig};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Behavior switches for the fake service
#[derive(Debug, Clone, Default)]
pub struct Faults {
    /// Leave the most recently created user out of listings
    pub hide_newest: bool,
    /// Accept a second user with an existing email
    pub allow_duplicates: bool,
    /// Report schema types without `UserType`
    pub without_user_type: bool,
}

pub struct FakeUserService {
    users: Mutex<Vec<Value>>,
    faults: Faults,
}

impl FakeUserService {
    pub fn new() -> Self {
        Self::with_faults(Faults::default())
    }

    pub fn with_faults(faults: Faults) -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            faults,
        }
    }

    fn schema(&self) -> Value {
        let mut names = vec!["Query", "Mutation", "String", "ID", "Float", "__Schema"];
        if !self.faults.without_user_type {
            names.push("UserType");
        }
        let types: Vec<Value> = names
            .into_iter()
            .map(|name| {
                let kind = if matches!(name, "String" | "ID" | "Float") {
                    "SCALAR"
                } else {
                    "OBJECT"
                };
                json!({"name": name, "kind": kind})
            })
            .collect();
        json!({"data": {"__schema": {"types": types}}})
    }

    fn create(&self, input: &Value) -> Value {
        let mut users = self.users.lock().unwrap();
        let email = input["email"].as_str().unwrap_or_default();

        if !self.faults.allow_duplicates && users.iter().any(|u| u["email"] == email) {
            return json!({
                "data": null,
                "errors": [{"message": "User with this email already exists", "path": ["createUser"]}]
            });
        }

        let user = json!({
            "id": format!("user-{}", users.len() + 1),
            "email": email,
            "firstName": input["firstName"],
            "lastName": input["lastName"],
            "status": "active",
            "createdAt": "2024-01-01T00:00:00.000Z"
        });
        users.push(user.clone());
        json!({"data": {"createUser": user}})
    }

    fn list(&self) -> Value {
        let users = self.users.lock().unwrap();
        let visible = if self.faults.hide_newest && !users.is_empty() {
            &users[..users.len() - 1]
        } else {
            &users[..]
        };
        json!({"data": {"users": visible}})
    }

    fn find(&self, id: &Value) -> Value {
        let users = self.users.lock().unwrap();
        let user = users.iter().find(|u| &u["id"] == id).cloned();
        json!({"data": {"user": user}})
    }
}

impl Respond for FakeUserService {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = match serde_json::from_slice(&request.body) {
            Ok(body) => body,
            Err(_) => return ResponseTemplate::new(400).set_body_string("invalid JSON"),
        };
        let query = body["query"].as_str().unwrap_or_default();
        let variables = &body["variables"];

        let response = if query.contains("__schema") {
            self.schema()
        } else if query.contains("createUser") {
            self.create(&variables["input"])
        } else if query.contains("user(id") {
            self.find(&variables["id"])
        } else if query.contains("users") {
            self.list()
        } else {
            json!({"errors": [{"message": "Unknown operation"}]})
        };

        ResponseTemplate::new(200).set_body_json(response)
    }
}

/// A gateway server (`/api/`, `/api/graphql`) and a direct server (`/graphql`)
pub struct Backend {
    pub gateway: MockServer,
    pub direct: MockServer,
}

impl Backend {
    /// Start both servers with the given liveness status and services
    pub async fn start(
        liveness_status: u16,
        gateway_service: FakeUserService,
        direct_service: FakeUserService,
    ) -> Self {
        let gateway = MockServer::start().await;
        let direct = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/"))
            .respond_with(ResponseTemplate::new(liveness_status).set_body_string("Hello World!"))
            .mount(&gateway)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/graphql"))
            .respond_with(gateway_service)
            .mount(&gateway)
            .await;

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(direct_service)
            .mount(&direct)
            .await;

        Self { gateway, direct }
    }

    /// Both servers healthy with fresh, fault-free services
    pub async fn healthy() -> Self {
        Self::start(200, FakeUserService::new(), FakeUserService::new()).await
    }

    pub fn direct_url(&self) -> String {
        format!("{}/graphql", self.direct.uri())
    }

    pub fn config(&self) -> TesterConfig {
        config_for(&self.gateway.uri(), &self.direct_url())
    }

    /// Number of POST requests the gateway and direct servers received
    pub async fn graphql_requests(&self) -> (usize, usize) {
        let count = |requests: Option<Vec<Request>>| {
            requests
                .unwrap_or_default()
                .iter()
                .filter(|r| r.method.as_str() == "POST")
                .count()
        };
        (
            count(self.gateway.received_requests().await),
            count(self.direct.received_requests().await),
        )
    }
}

/// Configuration pointing at explicit URLs, ignoring any env or config file
pub fn config_for(backend_url: &str, direct_url: &str) -> TesterConfig {
    let overrides = Overrides {
        backend_url: Some(backend_url.to_string()),
        direct_url: Some(direct_url.to_string()),
        ..Default::default()
    };
    TesterConfig::from_sources(overrides, FileConfig::default()).unwrap()
}
