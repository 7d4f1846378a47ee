//! Typed REST client for the taskdeck backend.
//!
//! This crate is a dumb transport: it owns the request/response shapes for
//! the five task operations and the health probe, and translates non-2xx
//! answers into [`GatewayError`]. Validation is the task store's job.

mod error;

pub use error::GatewayError;

use reqwest::Response;
use serde::{Deserialize, Serialize};
use taskdeck_core::task_patch::{CategoryPatch, TaskDraft, TaskPatch};
use taskdeck_core::{Priority, Task, TaskId};
use tracing::debug;

/// Body for `POST /api/tasks`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTaskBody {
    /// Trimmed task text.
    pub text: String,
    /// Urgency level; omitted to let the backend default to medium.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Trimmed category; omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl From<&TaskDraft> for CreateTaskBody {
    fn from(draft: &TaskDraft) -> Self {
        Self {
            text: draft.text.clone(),
            priority: draft.priority,
            category: draft.category.clone(),
        }
    }
}

/// Body for `PUT /api/tasks/:id`. Absent fields are left untouched by the
/// backend; a cleared category crosses the wire as an explicit `null`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateTaskBody {
    /// Replacement text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// New completion flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    /// New urgency level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// `Some(None)` serializes as `null` to clear the category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<String>>,
}

impl From<&TaskPatch> for UpdateTaskBody {
    fn from(patch: &TaskPatch) -> Self {
        Self {
            text: patch.text.clone(),
            completed: patch.completed,
            priority: patch.priority,
            category: patch.category.as_ref().map(|change| match change {
                CategoryPatch::Set { category } => Some(category.clone()),
                CategoryPatch::Clear => None,
            }),
        }
    }
}

/// Body for `PUT /api/tasks/reorder`.
#[derive(Debug, Clone, Serialize)]
pub struct ReorderBody {
    /// Full id sequence in the new display order.
    pub order: Vec<TaskId>,
}

/// Acknowledgement body returned by delete and reorder.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageBody {
    /// Human-readable confirmation.
    pub message: String,
}

/// Body of `GET /health`, consumed by operational tooling only.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    /// Overall service status.
    pub status: String,
    /// Database connectivity indicator.
    pub db: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP implementation of the remote task gateway.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Wrap a fresh client around the given API base URL
    /// (e.g. `http://localhost:5000/api`). A trailing slash is tolerated.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Fetch all tasks, ordered by display position then creation time.
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport failure or a non-2xx answer.
    pub async fn list(&self) -> Result<Vec<Task>, GatewayError> {
        let url = self.url("/tasks");
        debug!(%url, "listing tasks");
        let response = self.client.get(&url).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// Create a task from an already-normalized draft.
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport failure or a non-2xx answer.
    pub async fn create(&self, draft: &TaskDraft) -> Result<Task, GatewayError> {
        let url = self.url("/tasks");
        debug!(%url, "creating task");
        let body = CreateTaskBody::from(draft);
        let response = self.client.post(&url).json(&body).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// Apply a partial update and return the full task as the backend now
    /// sees it.
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport failure or a non-2xx answer.
    pub async fn update(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, GatewayError> {
        let url = self.url(&format!("/tasks/{id}"));
        debug!(%url, "updating task");
        let body = UpdateTaskBody::from(patch);
        let response = self.client.put(&url).json(&body).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// Delete a task.
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport failure or a non-2xx answer.
    pub async fn delete(&self, id: TaskId) -> Result<(), GatewayError> {
        let url = self.url(&format!("/tasks/{id}"));
        debug!(%url, "deleting task");
        let response = self.client.delete(&url).send().await?;
        check(response).await?.json::<MessageBody>().await?;
        Ok(())
    }

    /// Persist a new total order as a flat id sequence.
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport failure or a non-2xx answer.
    pub async fn reorder(&self, order: &[TaskId]) -> Result<(), GatewayError> {
        let url = self.url("/tasks/reorder");
        debug!(%url, count = order.len(), "reordering tasks");
        let body = ReorderBody {
            order: order.to_vec(),
        };
        let response = self.client.put(&url).json(&body).send().await?;
        check(response).await?.json::<MessageBody>().await?;
        Ok(())
    }

    /// Probe the backend health endpoint. The task store never calls this;
    /// it exists for operational tooling.
    ///
    /// # Errors
    /// Returns [`GatewayError`] on transport failure or a non-2xx answer.
    pub async fn health(&self) -> Result<HealthStatus, GatewayError> {
        let url = self
            .base_url
            .strip_suffix("/api")
            .unwrap_or(&self.base_url)
            .to_owned()
            + "/health";
        debug!(%url, "probing health");
        let response = self.client.get(&url).send().await?;
        Ok(check(response).await?.json().await?)
    }
}

/// Map non-2xx responses to [`GatewayError::Status`], preferring the
/// `{error}` body message over the bare reason phrase.
async fn check(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.text().await {
        Ok(body) => serde_json::from_str::<ErrorBody>(&body)
            .map_or_else(|_| fallback_message(status), |parsed| parsed.error),
        Err(_) => fallback_message(status),
    };
    Err(GatewayError::Status {
        status: status.as_u16(),
        message,
    })
}

fn fallback_message(status: reqwest::StatusCode) -> String {
    status.canonical_reason().unwrap_or("unknown error").to_owned()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn create_body_omits_absent_fields() {
        let draft = TaskDraft::new("Buy milk");
        let json = serde_json::to_value(CreateTaskBody::from(&draft)).expect("serialize");
        assert_eq!(json, serde_json::json!({"text": "Buy milk"}));
    }

    #[test]
    fn create_body_carries_priority_and_category() {
        let draft = TaskDraft {
            text: "Call mom".into(),
            priority: Some(Priority::High),
            category: Some("family".into()),
        };
        let json = serde_json::to_value(CreateTaskBody::from(&draft)).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"text": "Call mom", "priority": "high", "category": "family"})
        );
    }

    #[test]
    fn update_body_serializes_cleared_category_as_null() {
        let patch = TaskPatch {
            category: Some(CategoryPatch::Clear),
            ..TaskPatch::default()
        };
        let json = serde_json::to_value(UpdateTaskBody::from(&patch)).expect("serialize");
        assert_eq!(json, serde_json::json!({"category": null}));
    }

    #[test]
    fn update_body_omits_untouched_fields() {
        let patch = TaskPatch::completed(true);
        let json = serde_json::to_value(UpdateTaskBody::from(&patch)).expect("serialize");
        assert_eq!(json, serde_json::json!({"completed": true}));
    }

    #[test]
    fn reorder_body_is_a_flat_id_array() {
        let body = ReorderBody {
            order: vec![TaskId(3), TaskId(1), TaskId(2)],
        };
        let json = serde_json::to_value(body).expect("serialize");
        assert_eq!(json, serde_json::json!({"order": [3, 1, 2]}));
    }

    #[test]
    fn base_url_trailing_slash_is_tolerated() {
        let gateway = HttpGateway::new("http://localhost:5000/api/");
        assert_eq!(gateway.url("/tasks"), "http://localhost:5000/api/tasks");
    }
}
