//! Session token holder
//!
//! The token is an opaque string issued at login and attached to task
//! requests. It lives for the life of the process, is cleared on logout, and
//! carries no refresh or expiry logic. The session is passed explicitly to
//! whatever needs it rather than living in global state.

/// Process-wide authentication state
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// Create an unauthenticated session
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session from an existing token (e.g. one minted by a prior
    /// `task-login` invocation)
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Store a freshly issued token
    pub fn set(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Log out
    pub fn clear(&mut self) {
        self.token = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
