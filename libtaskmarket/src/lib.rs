//! Taskmarket - headless client for a task-market backend
//!
//! This library carries everything the taskmarket tools share: the HTTP
//! client and its mock counterpart, the session-token holder, and the three
//! feature controllers (login, register, tasks) that project each request's
//! outcome onto a closed Idle/Loading/Success/Error UI state.

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod session;

// Re-export commonly used types
pub use api::{Api, Credentials, HttpApi, Task};
pub use config::Config;
pub use error::{ApiError, MarketError, Result};
pub use features::{LoginController, RegisterController, TaskController, UiState};
pub use session::Session;
