// src/github/client.rs
// =============================================================================
// A thin GraphQL client for the GitHub API.
//
// Every query goes through GithubClient::query():
// 1. POST {"query": ..., "variables": ...} to the endpoint
// 2. Reject non-2xx HTTP statuses
// 3. Unwrap the {"data": ..., "errors": [...]} envelope
// 4. Deserialize `data` into whatever shape the caller asked for
//
// The client is built once in main() and handed by reference to whoever
// needs it. There is no retry: a failed call is reported to the caller.
//
// Rust concepts:
// - Generics with trait bounds: query::<T>() works for any DeserializeOwned T
// - thiserror: derive Display/Error for our error enum
// =============================================================================

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::Config;

// GitHub rejects API requests without a User-Agent
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("access token contains characters that are not valid in an HTTP header")]
    InvalidToken,

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("response contained no data")]
    MissingData,

    #[error("repository {0} not found")]
    NotFound(String),

    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlErrorMessage>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

/// Authenticated handle to the GraphQL endpoint.
///
/// Cloning is cheap: reqwest's Client is reference counted internally.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    endpoint: Url,
}

impl GithubClient {
    pub fn new(config: &Config) -> Result<Self, GatewayError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token.expose_secret()))
            .map_err(|_| GatewayError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(GatewayError::Build)?;

        Ok(GithubClient {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    // Runs one GraphQL query and deserializes its `data` field into T
    //
    // Parameters:
    //   query: the GraphQL document
    //   variables: JSON object with the query's $variables
    pub async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, GatewayError> {
        tracing::debug!(endpoint = %self.endpoint, "sending GraphQL query");

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        // GitHub answers auth and rate-limit problems with plain HTTP errors,
        // before any GraphQL envelope exists
        let status = response.status();
        if !status.is_success() {
            // The body is only for the error message, so losing it is fine
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GraphQlResponse = response.json().await?;
        decode_envelope(envelope)
    }
}

// Turns a GraphQL response envelope into the caller's type
//
// Any entry in `errors` fails the whole call, even when GitHub also sent
// partial data alongside it.
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    envelope: GraphQlResponse,
) -> Result<T, GatewayError> {
    if let Some(errors) = envelope.errors {
        if !errors.is_empty() {
            return Err(GatewayError::GraphQl(
                errors.into_iter().map(|e| e.message).collect(),
            ));
        }
    }

    // `"data": null` and a missing `data` key mean the same thing
    match envelope.data {
        Some(Value::Null) | None => Err(GatewayError::MissingData),
        Some(data) => Ok(serde_json::from_value(data)?),
    }
}

#[cfg(test)]
pub(crate) fn envelope_from(json: Value) -> GraphQlResponse {
    serde_json::from_value(json).unwrap()
}
