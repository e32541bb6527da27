//! Backend API client
//!
//! This module defines the transport seam for the task-market backend and its
//! HTTP implementation. Every operation issues exactly one request, waits up
//! to the configured timeout (5 seconds by default), and maps the outcome to
//! the [`ApiError`](crate::error::ApiError) taxonomy. There are no retries,
//! no backoff, and no circuit breaking.
//!
//! # Examples
//!
//! ```no_run
//! use libtaskmarket::api::{Api, Credentials, HttpApi};
//!
//! # async fn example() -> libtaskmarket::error::Result<()> {
//! let api = HttpApi::new("http://192.168.1.64:3000")?;
//!
//! let creds = Credentials::new("yael1@mail.com", "password0");
//! let response = api.login(&creds).await?;
//! if response.success {
//!     let token = response.token.unwrap_or_default();
//!     let tasks = api.list_tasks(&token).await?;
//!     println!("{} tasks", tasks.len());
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::{ServerConfig, DEFAULT_TIMEOUT_SECS};
use crate::error::{ApiError, Result};

pub mod types;

// Mock transport is available for all builds (not just tests) so integration
// tests can drive the controllers without a backend.
pub mod mock;

pub use types::{Credentials, LoginResponse, RegisterResponse, Task};

use types::{
    AckEnvelope, ErrorBody, LoginRequest, RegisterRequest, TaskEnvelope, TaskRequest, TasksEnvelope,
};

/// Transport seam between the feature controllers and the backend.
///
/// The controllers hold this as a trait object; [`HttpApi`] is the production
/// implementation, [`mock::MockApi`] the in-memory one.
#[async_trait]
pub trait Api: Send + Sync {
    /// Authenticate with email and password.
    ///
    /// A domain-level rejection (unknown account, wrong password) is NOT a
    /// transport error: it comes back as `Ok` with `success == false` and a
    /// server-provided message.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    /// Create an account.
    async fn register(&self, name: &str, credentials: &Credentials) -> Result<RegisterResponse>;

    /// Fetch all tasks owned by the session.
    async fn list_tasks(&self, token: &str) -> Result<Vec<Task>>;

    /// Create a task and return it with its server-assigned id.
    async fn create_task(&self, token: &str, title: &str, content: &str) -> Result<Task>;

    /// Overwrite title and content of an existing task.
    async fn update_task(&self, token: &str, id: i64, title: &str, content: &str) -> Result<()>;

    /// Delete a task by id.
    async fn delete_task(&self, token: &str, id: i64) -> Result<()>;
}

/// HTTP client for the task-market backend
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpApi {
    /// Create a client with the default 5-second timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with an explicit per-request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url.into()),
            timeout,
        })
    }

    /// Create a client from the `[server]` section of the config file.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        Self::with_timeout(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn map_transport_error(&self, error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout(format!("{:?}", self.timeout))
        } else if error.is_connect() {
            ApiError::Network(format!("connection failed: {error}"))
        } else {
            ApiError::Network(error.to_string())
        }
    }

    /// Send a request and decode a 2xx JSON body into `T`.
    ///
    /// Non-2xx responses surface the body's `error` field, or a generic
    /// status line when the body is absent or unparseable.
    async fn execute<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => format!("request failed with status {status}"),
            };
            return Err(ApiError::Server(message).into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()).into())
    }
}

#[async_trait]
impl Api for HttpApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        debug!(email = %credentials.email, "logging in");
        let body = LoginRequest {
            email: &credentials.email,
            password: credentials.password.expose_secret(),
        };
        self.execute(self.client.post(self.endpoint("/api/login")).json(&body))
            .await
    }

    async fn register(&self, name: &str, credentials: &Credentials) -> Result<RegisterResponse> {
        debug!(email = %credentials.email, "registering account");
        let body = RegisterRequest {
            name,
            email: &credentials.email,
            password: credentials.password.expose_secret(),
        };
        self.execute(self.client.post(self.endpoint("/api/register")).json(&body))
            .await
    }

    async fn list_tasks(&self, token: &str) -> Result<Vec<Task>> {
        debug!("fetching task list");
        let envelope: TasksEnvelope = self
            .execute(self.client.get(self.endpoint("/api/tasks")).bearer_auth(token))
            .await?;
        Ok(envelope.tasks)
    }

    async fn create_task(&self, token: &str, title: &str, content: &str) -> Result<Task> {
        debug!(title, "creating task");
        let body = TaskRequest { title, content };
        let envelope: TaskEnvelope = self
            .execute(
                self.client
                    .post(self.endpoint("/api/tasks"))
                    .bearer_auth(token)
                    .json(&body),
            )
            .await?;
        Ok(envelope.task)
    }

    async fn update_task(&self, token: &str, id: i64, title: &str, content: &str) -> Result<()> {
        debug!(id, "updating task");
        let body = TaskRequest { title, content };
        let ack: AckEnvelope = self
            .execute(
                self.client
                    .patch(self.endpoint(&format!("/api/tasks/{id}")))
                    .bearer_auth(token)
                    .json(&body),
            )
            .await?;
        if ack.success {
            Ok(())
        } else {
            Err(ApiError::Rejected("the server declined the update".to_string()).into())
        }
    }

    async fn delete_task(&self, token: &str, id: i64) -> Result<()> {
        debug!(id, "deleting task");
        let ack: AckEnvelope = self
            .execute(
                self.client
                    .delete(self.endpoint(&format!("/api/tasks/{id}")))
                    .bearer_auth(token),
            )
            .await?;
        if ack.success {
            Ok(())
        } else {
            Err(ApiError::Rejected("the server declined the deletion".to_string()).into())
        }
    }
}

/// Strip trailing slashes and default to `http://` when no scheme is given.
/// The backend typically lives on a private network address.
fn normalize_base_url(url: String) -> String {
    let trimmed = url.trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url_plain_host() {
        assert_eq!(
            normalize_base_url("192.168.1.64:3000".to_string()),
            "http://192.168.1.64:3000"
        );
    }

    #[test]
    fn test_normalize_base_url_preserves_scheme() {
        assert_eq!(
            normalize_base_url("https://market.example.com".to_string()),
            "https://market.example.com"
        );
        assert_eq!(
            normalize_base_url("http://127.0.0.1:3000".to_string()),
            "http://127.0.0.1:3000"
        );
    }

    #[test]
    fn test_normalize_base_url_strips_trailing_slash() {
        assert_eq!(
            normalize_base_url("http://127.0.0.1:3000/".to_string()),
            "http://127.0.0.1:3000"
        );
    }

    #[test]
    fn test_endpoint_joining() {
        let api = HttpApi::new("http://127.0.0.1:3000/").expect("Failed to build client");
        assert_eq!(api.endpoint("/api/tasks"), "http://127.0.0.1:3000/api/tasks");
        assert_eq!(
            api.endpoint("/api/tasks/7"),
            "http://127.0.0.1:3000/api/tasks/7"
        );
    }

    #[test]
    fn test_from_config_uses_configured_timeout() {
        let config = ServerConfig {
            base_url: "http://10.0.0.2:3000".to_string(),
            timeout_secs: 2,
        };
        let api = HttpApi::from_config(&config).expect("Failed to build client");
        assert_eq!(api.timeout, Duration::from_secs(2));
        assert_eq!(api.base_url, "http://10.0.0.2:3000");
    }
}
