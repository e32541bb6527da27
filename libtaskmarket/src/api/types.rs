//! Wire types for the task-market backend
//!
//! Request and response bodies are plain JSON; failures surface an `error`
//! string field instead of these envelopes.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// A task as the server stores it. The id is server-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// Login credentials. Transient, never persisted.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Response to `POST /api/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub token: Option<String>,
}

/// Response to `POST /api/register`
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct TaskRequest<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TasksEnvelope {
    pub tasks: Vec<Task>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TaskEnvelope {
    pub task: Task,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AckEnvelope {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
