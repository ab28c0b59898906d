//! HTTP client for the Pushline REST API
//!
//! Every request carries a `code` field: a hex-encoded SHA-256 digest over
//! the request's credential parts and the shared secret. The server
//! recomputes the digest to authenticate the caller without the secret ever
//! leaving the device in clear text on event and tag calls.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::types::{Client, Environment, EventRecord, TagValue};

use super::RemoteApi;

/// Production API endpoint
pub const BASE_URL: &str = "https://api.pushline.io";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP implementation of [`RemoteApi`].
pub struct HttpApi {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Create a client against the production endpoint.
    pub fn new() -> Result<Self> {
        Self::with_base_url(BASE_URL)
    }

    /// Create a client against a specific endpoint (staging, local tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// POST a JSON body and parse a JSON response.
    async fn post_json<T>(&self, path: &str, body: &impl Serialize) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self.http_client.post(&url).json(body).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            // The service wraps errors in a JSON envelope; fall back to the
            // raw body when it does not.
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or(body);
            Err(Error::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl RemoteApi for HttpApi {
    async fn create_client(
        &self,
        token: Option<&str>,
        application_id: i64,
        secret: &str,
        environment: Environment,
    ) -> Result<Client> {
        let code = sign(&[&application_id.to_string(), token.unwrap_or(""), secret]);
        let request = CreateClientRequest {
            application_id,
            token,
            environment,
            code,
        };

        let response: ClientResponse = self.post_json("/1/clients", &request).await?;
        Ok(response.into())
    }

    async fn post_event(
        &self,
        client: &Client,
        secret: &str,
        name: &str,
        value: Option<&str>,
    ) -> Result<EventRecord> {
        let code = sign(&[&client.id.to_string(), name, value.unwrap_or(""), secret]);
        let request = PostEventRequest {
            client_id: client.id,
            name,
            value,
            code,
        };

        let response: EventResponse = self.post_json("/1/events", &request).await?;
        Ok(EventRecord {
            name: response.name,
            value: response.value,
            timestamp: response.timestamp,
        })
    }

    async fn set_tag(
        &self,
        client: &Client,
        secret: &str,
        name: &str,
        value: Option<&str>,
    ) -> Result<TagValue> {
        let code = sign(&[&client.id.to_string(), name, value.unwrap_or(""), secret]);
        let request = SetTagRequest {
            client_id: client.id,
            name,
            value,
            code,
        };

        let response: TagResponse = self.post_json("/1/tags", &request).await?;
        Ok(TagValue {
            name: response.name,
            value: response.value,
        })
    }
}

/// Hex-encoded SHA-256 digest over the given parts.
fn sign(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Request body for POST /1/clients
#[derive(Serialize)]
struct CreateClientRequest<'a> {
    application_id: i64,
    token: Option<&'a str>,
    environment: Environment,
    code: String,
}

/// Response from POST /1/clients
#[derive(Deserialize)]
struct ClientResponse {
    id: i64,
    application_id: i64,
    token: Option<String>,
    environment: Environment,
}

impl From<ClientResponse> for Client {
    fn from(response: ClientResponse) -> Self {
        Client {
            id: response.id,
            application_id: response.application_id,
            token: response.token,
            environment: response.environment,
        }
    }
}

/// Request body for POST /1/events
#[derive(Serialize)]
struct PostEventRequest<'a> {
    client_id: i64,
    name: &'a str,
    value: Option<&'a str>,
    code: String,
}

/// Response from POST /1/events
#[derive(Deserialize)]
struct EventResponse {
    name: String,
    #[serde(default)]
    value: Option<String>,
    timestamp: DateTime<Utc>,
}

/// Request body for POST /1/tags
#[derive(Serialize)]
struct SetTagRequest<'a> {
    client_id: i64,
    name: &'a str,
    value: Option<&'a str>,
    code: String,
}

/// Response from POST /1/tags
#[derive(Deserialize)]
struct TagResponse {
    name: String,
    #[serde(default)]
    value: Option<String>,
}

/// Error envelope returned by the service on non-2xx responses
#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_is_deterministic() {
        let a = sign(&["42", "tok-A", "secret"]);
        let b = sign(&["42", "tok-A", "secret"]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_sign_varies_with_input() {
        assert_ne!(sign(&["42", "tok-A", "s"]), sign(&["42", "tok-B", "s"]));
        assert_ne!(sign(&["42", "tok-A", "s"]), sign(&["42", "tok-A", "t"]));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let api = HttpApi::with_base_url("https://staging.pushline.io/").unwrap();
        assert_eq!(api.base_url, "https://staging.pushline.io");
    }

    #[test]
    fn test_parse_client_response() {
        let json = r#"{
            "id": 7,
            "application_id": 42,
            "token": "tok-A",
            "environment": "production"
        }"#;
        let response: ClientResponse = serde_json::from_str(json).unwrap();
        let client: Client = response.into();
        assert_eq!(client.id, 7);
        assert_eq!(client.application_id, 42);
        assert_eq!(client.token.as_deref(), Some("tok-A"));
        assert_eq!(client.environment, Environment::Production);
    }

    #[test]
    fn test_parse_event_response_without_value() {
        let json = r#"{"name": "launch", "timestamp": "2024-05-01T12:00:00Z"}"#;
        let response: EventResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.name, "launch");
        assert!(response.value.is_none());
    }

    #[test]
    fn test_parse_error_envelope() {
        let body = r#"{"message": "invalid credential"}"#;
        let parsed: ApiErrorBody = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.message.as_deref(), Some("invalid credential"));
    }
}
