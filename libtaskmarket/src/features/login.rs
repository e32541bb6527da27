//! Login feature
//!
//! One action: authenticate against the backend. On success the issued token
//! is stored into the [`Session`] and the server's message is surfaced.

use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing::{info, warn};

use crate::api::{Api, Credentials};
use crate::features::UiState;
use crate::session::Session;

pub struct LoginController {
    api: Arc<dyn Api>,
    state: UiState,
}

impl LoginController {
    pub fn new(api: Arc<dyn Api>) -> Self {
        Self {
            api,
            state: UiState::Idle,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Authenticate and store the issued token into `session`.
    ///
    /// Blank email or password is rejected before any transport call. A
    /// server-side rejection (`success == false`) and a transport failure
    /// both land in `Error(message)`.
    pub async fn login(&mut self, session: &mut Session, credentials: &Credentials) {
        if credentials.email.trim().is_empty()
            || credentials.password.expose_secret().trim().is_empty()
        {
            self.state = UiState::Error("Email and password are required".to_string());
            return;
        }

        self.state = UiState::Loading;
        match self.api.login(credentials).await {
            Ok(response) if response.success => match response.token {
                Some(token) if !token.is_empty() => {
                    info!(email = %credentials.email, "login succeeded");
                    session.set(token);
                    self.state = UiState::Success(response.message);
                }
                // A successful login must mint a token; treat anything else
                // as a malformed response.
                _ => {
                    warn!(email = %credentials.email, "login response carried no token");
                    self.state = UiState::Error("Login response carried no token".to_string());
                }
            },
            Ok(response) => {
                warn!(email = %credentials.email, "login rejected");
                self.state = UiState::Error(response.message);
            }
            Err(e) => {
                warn!(error = %e, "login failed");
                self.state = UiState::Error(e.to_string());
            }
        }
    }

    /// Return to `Idle` after the outcome has been shown
    pub fn reset(&mut self) {
        self.state = UiState::Idle;
    }
}
