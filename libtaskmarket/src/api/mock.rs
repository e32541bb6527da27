//! Mock transport for testing
//!
//! An in-memory [`Api`] implementation that answers without a network. It
//! ships with the backend's seeded demo accounts, keeps a task store with
//! server-style auto-incremented ids, and supports failure injection and
//! artificial delays. Call counters let tests assert that client-side
//! validation short-circuits before any transport call.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use tokio::time::sleep;

use crate::api::types::{Credentials, LoginResponse, RegisterResponse, Task};
use crate::api::Api;
use crate::error::{ApiError, Result};

/// Configuration for mock transport behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Seeded accounts as (email, password) pairs
    pub users: Vec<(String, String)>,

    /// Token issued on successful login
    pub token: String,

    /// When set, every operation fails with a clone of this error
    pub fail_with: Option<ApiError>,

    /// Delay before completing operations (simulates network latency)
    pub delay: Duration,

    /// Number of times login has been called
    pub login_calls: Arc<Mutex<usize>>,

    /// Number of times register has been called
    pub register_calls: Arc<Mutex<usize>>,

    /// Number of times any task operation has been called
    pub task_calls: Arc<Mutex<usize>>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            users: vec![
                ("yael1@mail.com".to_string(), "password0".to_string()),
                ("yael2@mail.com".to_string(), "password00".to_string()),
                ("yael3@mail.com".to_string(), "password000".to_string()),
            ],
            token: "mock-token".to_string(),
            fail_with: None,
            delay: Duration::from_millis(0),
            login_calls: Arc::new(Mutex::new(0)),
            register_calls: Arc::new(Mutex::new(0)),
            task_calls: Arc::new(Mutex::new(0)),
        }
    }
}

/// Mock transport for testing
pub struct MockApi {
    config: MockConfig,
    tasks: Arc<Mutex<Vec<Task>>>,
    next_id: Arc<Mutex<i64>>,
}

impl MockApi {
    /// Create a mock transport with the given configuration
    pub fn new(config: MockConfig) -> Self {
        Self {
            config,
            tasks: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    /// Create a mock transport with the seeded demo accounts
    pub fn seeded() -> Self {
        Self::new(MockConfig::default())
    }

    /// Create a mock transport where every operation fails with `error`
    pub fn failing(error: ApiError) -> Self {
        Self::new(MockConfig {
            fail_with: Some(error),
            ..Default::default()
        })
    }

    /// Create a mock transport with an artificial delay
    pub fn with_delay(delay: Duration) -> Self {
        Self::new(MockConfig {
            delay,
            ..Default::default()
        })
    }

    /// Pre-populate the task store. Ids continue after the highest given id.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let api = Self::seeded();
        *api.tasks.lock().unwrap() = tasks;
        *api.next_id.lock().unwrap() = next_id;
        api
    }

    /// The token this mock issues on login
    pub fn token(&self) -> &str {
        &self.config.token
    }

    /// Get the number of times login was called
    pub fn login_call_count(&self) -> usize {
        *self.config.login_calls.lock().unwrap()
    }

    /// Get the number of times register was called
    pub fn register_call_count(&self) -> usize {
        *self.config.register_calls.lock().unwrap()
    }

    /// Get the number of times any task operation was called
    pub fn task_call_count(&self) -> usize {
        *self.config.task_calls.lock().unwrap()
    }

    /// Snapshot of the server-side task store
    pub fn stored_tasks(&self) -> Vec<Task> {
        self.tasks.lock().unwrap().clone()
    }

    async fn simulate(&self) -> Result<()> {
        if !self.config.delay.is_zero() {
            sleep(self.config.delay).await;
        }
        if let Some(error) = &self.config.fail_with {
            return Err(error.clone().into());
        }
        Ok(())
    }

    fn check_token(&self, token: &str) -> Result<()> {
        if token == self.config.token {
            Ok(())
        } else {
            Err(ApiError::Server("invalid or missing token".to_string()).into())
        }
    }
}

#[async_trait]
impl Api for MockApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        *self.config.login_calls.lock().unwrap() += 1;
        self.simulate().await?;

        let known = self.config.users.iter().any(|(email, password)| {
            email == &credentials.email && password == credentials.password.expose_secret()
        });

        if known {
            Ok(LoginResponse {
                success: true,
                message: "Login successful".to_string(),
                token: Some(self.config.token.clone()),
            })
        } else {
            Ok(LoginResponse {
                success: false,
                message: "Invalid credentials".to_string(),
                token: None,
            })
        }
    }

    async fn register(&self, _name: &str, credentials: &Credentials) -> Result<RegisterResponse> {
        *self.config.register_calls.lock().unwrap() += 1;
        self.simulate().await?;

        let taken = self
            .config
            .users
            .iter()
            .any(|(email, _)| email == &credentials.email);

        if taken {
            Ok(RegisterResponse {
                success: false,
                message: "Email already registered".to_string(),
            })
        } else {
            Ok(RegisterResponse {
                success: true,
                message: "Registration successful".to_string(),
            })
        }
    }

    async fn list_tasks(&self, token: &str) -> Result<Vec<Task>> {
        *self.config.task_calls.lock().unwrap() += 1;
        self.simulate().await?;
        self.check_token(token)?;

        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn create_task(&self, token: &str, title: &str, content: &str) -> Result<Task> {
        *self.config.task_calls.lock().unwrap() += 1;
        self.simulate().await?;
        self.check_token(token)?;

        let mut next_id = self.next_id.lock().unwrap();
        let task = Task {
            id: *next_id,
            title: title.to_string(),
            content: content.to_string(),
        };
        *next_id += 1;
        self.tasks.lock().unwrap().push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, token: &str, id: i64, title: &str, content: &str) -> Result<()> {
        *self.config.task_calls.lock().unwrap() += 1;
        self.simulate().await?;
        self.check_token(token)?;

        let mut tasks = self.tasks.lock().unwrap();
        match tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.title = title.to_string();
                task.content = content.to_string();
                Ok(())
            }
            None => Err(ApiError::Server(format!("no task with id {id}")).into()),
        }
    }

    async fn delete_task(&self, token: &str, id: i64) -> Result<()> {
        *self.config.task_calls.lock().unwrap() += 1;
        self.simulate().await?;
        self.check_token(token)?;

        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(ApiError::Server(format!("no task with id {id}")).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_with_seeded_user() {
        let api = MockApi::seeded();
        let creds = Credentials::new("yael1@mail.com", "password0");

        let response = api.login(&creds).await.expect("login should not error");
        assert!(response.success);
        assert_eq!(response.token.as_deref(), Some("mock-token"));
        assert_eq!(api.login_call_count(), 1);
    }

    #[tokio::test]
    async fn test_login_with_unknown_user() {
        let api = MockApi::seeded();
        let creds = Credentials::new("nobody@mail.com", "hunter2");

        let response = api.login(&creds).await.expect("login should not error");
        assert!(!response.success);
        assert_eq!(response.message, "Invalid credentials");
        assert_eq!(response.token, None);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let api = MockApi::seeded();
        let creds = Credentials::new("yael2@mail.com", "whatever");

        let response = api.register("Yael", &creds).await.expect("no error");
        assert!(!response.success);
        assert_eq!(response.message, "Email already registered");
    }

    #[tokio::test]
    async fn test_task_store_round_trip() {
        let api = MockApi::seeded();
        let token = api.token().to_string();

        let created = api
            .create_task(&token, "Buy milk", "Two liters")
            .await
            .expect("create failed");
        assert_eq!(created.id, 1);

        let listed = api.list_tasks(&token).await.expect("list failed");
        assert_eq!(listed, vec![created.clone()]);

        api.update_task(&token, created.id, "Buy milk", "Three liters")
            .await
            .expect("update failed");
        assert_eq!(api.stored_tasks()[0].content, "Three liters");

        api.delete_task(&token, created.id).await.expect("delete failed");
        assert!(api.stored_tasks().is_empty());
    }

    #[tokio::test]
    async fn test_task_operations_require_token() {
        let api = MockApi::seeded();
        let result = api.list_tasks("wrong-token").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update_missing_task() {
        let api = MockApi::seeded();
        let result = api.update_task(api.token(), 99, "a", "b").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let api = MockApi::failing(ApiError::Network("connection refused".to_string()));
        let creds = Credentials::new("yael1@mail.com", "password0");

        let result = api.login(&creds).await;
        assert!(result.is_err());
        assert_eq!(api.login_call_count(), 1);
    }

    #[tokio::test]
    async fn test_with_tasks_continues_ids() {
        let api = MockApi::with_tasks(vec![Task {
            id: 10,
            title: "existing".to_string(),
            content: "task".to_string(),
        }]);

        let created = api
            .create_task(api.token(), "new", "task")
            .await
            .expect("create failed");
        assert_eq!(created.id, 11);
    }
}
