//! Gateway abstraction separating the task store from the wire.

use taskdeck_core::task_patch::{TaskDraft, TaskPatch};
use taskdeck_core::{Task, TaskId};
use taskdeck_gateway_http::{GatewayError, HttpGateway};

/// The five logical operations the task store needs from a backend.
///
/// Implementations are dumb transports: no validation, no retries, exactly
/// one request per call. The HTTP implementation lives in
/// `taskdeck-gateway-http`; tests substitute an in-memory mock.
#[allow(async_fn_in_trait)]
pub trait TaskGateway {
    /// Error type bubbled up from the transport.
    type Error: Into<GatewayError>;

    /// Fetch every task in server display order.
    ///
    /// # Errors
    /// Returns a transport-specific error when the request fails.
    async fn list(&self) -> Result<Vec<Task>, Self::Error>;

    /// Create a task from a normalized draft and return the server's copy.
    ///
    /// # Errors
    /// Returns a transport-specific error when the request fails.
    async fn create(&self, draft: &TaskDraft) -> Result<Task, Self::Error>;

    /// Apply a partial update and return the full task echoed by the server.
    ///
    /// # Errors
    /// Returns a transport-specific error when the request fails.
    async fn update(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, Self::Error>;

    /// Delete a task.
    ///
    /// # Errors
    /// Returns a transport-specific error when the request fails.
    async fn delete(&self, id: TaskId) -> Result<(), Self::Error>;

    /// Persist a new total order as the full id sequence.
    ///
    /// # Errors
    /// Returns a transport-specific error when the request fails.
    async fn reorder(&self, order: &[TaskId]) -> Result<(), Self::Error>;
}

impl TaskGateway for HttpGateway {
    type Error = GatewayError;

    async fn list(&self) -> Result<Vec<Task>, Self::Error> {
        Self::list(self).await
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Task, Self::Error> {
        Self::create(self, draft).await
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, Self::Error> {
        Self::update(self, id, patch).await
    }

    async fn delete(&self, id: TaskId) -> Result<(), Self::Error> {
        Self::delete(self, id).await
    }

    async fn reorder(&self, order: &[TaskId]) -> Result<(), Self::Error> {
        Self::reorder(self, order).await
    }
}

impl<G> TaskGateway for &G
where
    G: TaskGateway,
{
    type Error = G::Error;

    async fn list(&self) -> Result<Vec<Task>, Self::Error> {
        (*self).list().await
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Task, Self::Error> {
        (*self).create(draft).await
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, Self::Error> {
        (*self).update(id, patch).await
    }

    async fn delete(&self, id: TaskId) -> Result<(), Self::Error> {
        (*self).delete(id).await
    }

    async fn reorder(&self, order: &[TaskId]) -> Result<(), Self::Error> {
        (*self).reorder(order).await
    }
}

impl<G> TaskGateway for std::sync::Arc<G>
where
    G: TaskGateway,
{
    type Error = G::Error;

    async fn list(&self) -> Result<Vec<Task>, Self::Error> {
        (**self).list().await
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Task, Self::Error> {
        (**self).create(draft).await
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, Self::Error> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: TaskId) -> Result<(), Self::Error> {
        (**self).delete(id).await
    }

    async fn reorder(&self, order: &[TaskId]) -> Result<(), Self::Error> {
        (**self).reorder(order).await
    }
}
