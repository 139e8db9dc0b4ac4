//! HTTP client for GraphQL endpoints
//!
//! Every failure is returned as an [`Error`]; nothing here panics or aborts
//! the run, so the caller can record the outcome and move on.

use reqwest::StatusCode;
use serde_json::Value;

use crate::common::{Error, Result};

use super::types::GraphQlRequest;

/// Sends GraphQL requests and liveness probes
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    http: reqwest::Client,
}

impl GraphQlClient {
    /// Create a client with reqwest's default timeouts
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gqltest/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { http })
    }

    /// POST a GraphQL request and return the parsed response envelope
    ///
    /// Fails on transport errors, a status other than `expected`, a body
    /// that is not JSON, or a non-empty `errors` array.
    pub async fn execute(
        &self,
        url: &str,
        request: &GraphQlRequest,
        expected: StatusCode,
    ) -> Result<Value> {
        tracing::debug!(url, query = %request.query.trim(), "sending GraphQL request");

        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::transport(url, e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| Error::transport(url, e))?;
        tracing::debug!(url, status = status.as_u16(), body = %body, "GraphQL response");

        interpret_response(url, status, expected, &body)
    }

    /// GET `url`, succeeding only on 200
    pub async fn probe(&self, url: &str) -> Result<StatusCode> {
        tracing::debug!(url, "probing liveness");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::transport(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::UnexpectedStatus {
                expected: StatusCode::OK.as_u16(),
                actual: status.as_u16(),
                body: describe_body(&body),
            });
        }
        Ok(status)
    }
}

/// Classify a GraphQL HTTP response
pub(crate) fn interpret_response(
    url: &str,
    status: StatusCode,
    expected: StatusCode,
    body: &str,
) -> Result<Value> {
    if status != expected {
        return Err(Error::UnexpectedStatus {
            expected: expected.as_u16(),
            actual: status.as_u16(),
            body: describe_body(body),
        });
    }

    let value: Value = serde_json::from_str(body).map_err(|e| Error::malformed(url, e))?;

    let has_errors = match value.get("errors") {
        None | Some(Value::Null) => false,
        Some(Value::Array(errors)) => !errors.is_empty(),
        Some(_) => true,
    };
    if has_errors {
        return Err(Error::GraphQl(pretty(&value["errors"])));
    }
    Ok(value)
}

/// Pretty JSON when the body parses, raw text otherwise
fn describe_body(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => pretty(&value),
        Err(_) => body.to_string(),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
