//! Registration feature

use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing::{info, warn};

use crate::api::{Api, Credentials};
use crate::features::UiState;

pub struct RegisterController {
    api: Arc<dyn Api>,
    state: UiState,
}

impl RegisterController {
    pub fn new(api: Arc<dyn Api>) -> Self {
        Self {
            api,
            state: UiState::Idle,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Create an account. Blank fields are rejected before any transport
    /// call; a server-side rejection surfaces its message as `Error`.
    pub async fn register(&mut self, name: &str, credentials: &Credentials) {
        if name.trim().is_empty()
            || credentials.email.trim().is_empty()
            || credentials.password.expose_secret().trim().is_empty()
        {
            self.state = UiState::Error("All fields are required".to_string());
            return;
        }

        self.state = UiState::Loading;
        match self.api.register(name, credentials).await {
            Ok(response) if response.success => {
                info!(email = %credentials.email, "registration succeeded");
                self.state = UiState::Success(response.message);
            }
            Ok(response) => {
                warn!(email = %credentials.email, "registration rejected");
                self.state = UiState::Error(response.message);
            }
            Err(e) => {
                warn!(error = %e, "registration failed");
                self.state = UiState::Error(e.to_string());
            }
        }
    }

    /// Return to `Idle` after the outcome has been shown
    pub fn reset(&mut self) {
        self.state = UiState::Idle;
    }
}
