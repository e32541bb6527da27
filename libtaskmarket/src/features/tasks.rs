//! Task list feature
//!
//! Holds the in-memory ordered task list alongside the UI state. Mutations
//! patch the list optimistically from the response — there is no re-fetch
//! after a create, update, or delete.

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::{Api, Task};
use crate::features::UiState;
use crate::session::Session;

pub struct TaskController {
    api: Arc<dyn Api>,
    tasks: Vec<Task>,
    state: UiState,
}

impl TaskController {
    pub fn new(api: Arc<dyn Api>) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            state: UiState::Idle,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// The in-memory task list, in server order with local patches applied
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Replace the list with the server's. A successful load is consumed
    /// immediately: the state returns to `Idle`, not `Success`.
    pub async fn load(&mut self, session: &Session) {
        let Some(token) = self.require_token(session) else {
            return;
        };

        self.state = UiState::Loading;
        match self.api.list_tasks(&token).await {
            Ok(tasks) => {
                info!(count = tasks.len(), "loaded task list");
                self.tasks = tasks;
                self.state = UiState::Idle;
            }
            Err(e) => {
                warn!(error = %e, "failed to load tasks");
                self.state = UiState::Error(e.to_string());
            }
        }
    }

    /// Create a task. Blank title or content is rejected before any
    /// transport call; on success the server-assigned task is appended.
    pub async fn create(&mut self, session: &Session, title: &str, content: &str) {
        if title.trim().is_empty() || content.trim().is_empty() {
            self.state = UiState::Error("Title and content are required".to_string());
            return;
        }
        let Some(token) = self.require_token(session) else {
            return;
        };

        self.state = UiState::Loading;
        match self.api.create_task(&token, title, content).await {
            Ok(task) => {
                info!(id = task.id, "created task");
                self.tasks.push(task);
                self.state = UiState::Success("Task created".to_string());
            }
            Err(e) => {
                warn!(error = %e, "failed to create task");
                self.state = UiState::Error(e.to_string());
            }
        }
    }

    /// Update a task; on success the matching list entry is patched in place.
    pub async fn update(&mut self, session: &Session, id: i64, title: &str, content: &str) {
        let Some(token) = self.require_token(session) else {
            return;
        };

        self.state = UiState::Loading;
        match self.api.update_task(&token, id, title, content).await {
            Ok(()) => {
                info!(id, "updated task");
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                    task.title = title.to_string();
                    task.content = content.to_string();
                }
                self.state = UiState::Success("Task updated".to_string());
            }
            Err(e) => {
                warn!(error = %e, "failed to update task");
                self.state = UiState::Error(e.to_string());
            }
        }
    }

    /// Delete a task; on success the matching list entry is removed.
    pub async fn delete(&mut self, session: &Session, id: i64) {
        let Some(token) = self.require_token(session) else {
            return;
        };

        self.state = UiState::Loading;
        match self.api.delete_task(&token, id).await {
            Ok(()) => {
                info!(id, "deleted task");
                self.tasks.retain(|t| t.id != id);
                self.state = UiState::Success("Task deleted".to_string());
            }
            Err(e) => {
                warn!(error = %e, "failed to delete task");
                self.state = UiState::Error(e.to_string());
            }
        }
    }

    /// Return to `Idle` after the outcome has been shown
    pub fn reset(&mut self) {
        self.state = UiState::Idle;
    }

    fn require_token(&mut self, session: &Session) -> Option<String> {
        match session.token() {
            Some(token) => Some(token.to_string()),
            None => {
                self.state = UiState::Error("Not authenticated".to_string());
                None
            }
        }
    }
}
