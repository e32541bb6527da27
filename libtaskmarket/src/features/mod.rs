//! Feature controllers
//!
//! Each feature (login, register, tasks) is a small state holder that issues
//! one transport call per user action and projects the outcome onto a closed
//! UI-state enumeration. The consuming layer renders the terminal state once
//! and then calls `reset()`; there is no queue of outcomes.

pub mod login;
pub mod register;
pub mod tasks;

pub use login::LoginController;
pub use register::RegisterController;
pub use tasks::TaskController;

/// Outcome of the last user-triggered action.
///
/// At most one value is active per feature. `Success` and `Error` are meant
/// to be consumed exactly once: the caller shows the message, then resets the
/// controller to `Idle` so the feedback cannot re-trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiState {
    Idle,
    Loading,
    Success(String),
    Error(String),
}

impl UiState {
    /// True for `Success` and `Error` — the states a caller must consume.
    pub fn is_terminal(&self) -> bool {
        matches!(self, UiState::Success(_) | UiState::Error(_))
    }

    /// The message carried by a terminal state
    pub fn message(&self) -> Option<&str> {
        match self {
            UiState::Success(message) | UiState::Error(message) => Some(message),
            UiState::Idle | UiState::Loading => None,
        }
    }
}
