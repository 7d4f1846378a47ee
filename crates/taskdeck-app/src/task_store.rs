//! Single source of truth for the task collection in a running client.

use taskdeck_core::task_patch::{TaskDraft, TaskPatch, ValidationError};
use taskdeck_core::{Task, TaskId, plan_reorder, sort_by_display_order};
use taskdeck_gateway_http::GatewayError;
use tracing::warn;

use crate::gateway::TaskGateway;
use crate::snapshot::SnapshotCache;

/// Errors surfaced by [`TaskStore`] operations.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// Input rejected before any network call was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The local collection has no task with this id.
    #[error("task {0} not found")]
    NotFound(TaskId),
    /// The gateway call failed; local state is as documented per operation.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// Anything uncategorized.
    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

/// Holds the authoritative local copy of all tasks and mediates every
/// mutation through the remote gateway.
///
/// One instance per client session, constructed explicitly and handed to
/// the UI layer. Mutations are confirm-then-apply: local state only ever
/// reflects server-confirmed data, except reorder which commits
/// optimistically because a stale order is cheap to tolerate. Every
/// operation makes exactly one attempt; the caller re-triggers to retry.
pub struct TaskStore<G> {
    gateway: G,
    tasks: Vec<Task>,
    loading: bool,
    snapshot: Option<SnapshotCache>,
}

impl<G> TaskStore<G> {
    /// Construct an empty store over the given gateway.
    pub const fn new(gateway: G) -> Self {
        Self {
            gateway,
            tasks: Vec::new(),
            loading: false,
            snapshot: None,
        }
    }

    /// Construct a store that falls back to (and refreshes) an on-disk
    /// snapshot of the last successfully loaded collection.
    pub const fn with_snapshot(gateway: G, snapshot: SnapshotCache) -> Self {
        Self {
            gateway,
            tasks: Vec::new(),
            loading: false,
            snapshot: Some(snapshot),
        }
    }

    /// Current task collection in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// True while an initial load or a mutation request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Look up a task by id.
    #[must_use]
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    fn position(&self, id: TaskId) -> Result<usize, StoreError> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn persist_snapshot(&self) {
        if let Some(cache) = &self.snapshot {
            if let Err(err) = cache.save(&self.tasks) {
                warn!(error = %err, "failed to refresh task snapshot");
            }
        }
    }
}

impl<G: TaskGateway> TaskStore<G> {
    /// Load the task collection from the backend.
    ///
    /// On gateway failure this falls back to the cached snapshot when one
    /// exists (absorbing the error, logged), otherwise the collection is
    /// left empty and the error is surfaced. The app keeps running either
    /// way; writes will likely also fail until the backend is reachable.
    ///
    /// # Errors
    /// Returns [`StoreError::Gateway`] when the load fails and no snapshot
    /// is available.
    pub async fn initialize(&mut self) -> Result<(), StoreError> {
        self.loading = true;
        let result = self.gateway.list().await;
        self.loading = false;

        match result {
            Ok(mut tasks) => {
                sort_by_display_order(&mut tasks);
                self.tasks = tasks;
                self.persist_snapshot();
                Ok(())
            }
            Err(err) => {
                let err: GatewayError = err.into();
                if let Some(cache) = &self.snapshot {
                    if let Some(mut tasks) = cache.load().unwrap_or_else(|load_err| {
                        warn!(error = %load_err, "failed to read task snapshot");
                        None
                    }) {
                        warn!(error = %err, "backend unreachable, using cached snapshot");
                        sort_by_display_order(&mut tasks);
                        self.tasks = tasks;
                        return Ok(());
                    }
                }
                self.tasks.clear();
                Err(StoreError::Gateway(err))
            }
        }
    }

    /// Create a task and prepend the server-confirmed entry.
    ///
    /// # Errors
    /// Returns [`StoreError::Validation`] (before any network call) when the
    /// draft text is blank or a field is oversized, or
    /// [`StoreError::Gateway`] when the backend rejects the create; local
    /// state is untouched on failure.
    pub async fn create(&mut self, mut draft: TaskDraft) -> Result<&Task, StoreError> {
        draft.normalize()?;

        self.loading = true;
        let result = self.gateway.create(&draft).await;
        self.loading = false;

        let task = result.map_err(Into::<GatewayError>::into)?;
        self.tasks.insert(0, task);
        self.persist_snapshot();
        Ok(&self.tasks[0])
    }

    /// Apply a partial update and adopt the server's echo of the full task.
    ///
    /// The server is authoritative for every field, not just the patched
    /// ones. No speculative patch is applied locally; on failure the task
    /// is exactly as it was before the call.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] or [`StoreError::Validation`] before
    /// any network call, or [`StoreError::Gateway`] when the backend rejects
    /// the update.
    pub async fn update(&mut self, id: TaskId, mut patch: TaskPatch) -> Result<&Task, StoreError> {
        let pos = self.position(id)?;
        patch.normalize()?;

        self.loading = true;
        let result = self.gateway.update(id, &patch).await;
        self.loading = false;

        let task = result.map_err(Into::<GatewayError>::into)?;
        self.tasks[pos] = task;
        self.persist_snapshot();
        Ok(&self.tasks[pos])
    }

    /// Delete a task once the backend confirms.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] before any network call, or
    /// [`StoreError::Gateway`] when the backend rejects the delete; the task
    /// remains in that case.
    pub async fn delete(&mut self, id: TaskId) -> Result<(), StoreError> {
        let pos = self.position(id)?;

        self.loading = true;
        let result = self.gateway.delete(id).await;
        self.loading = false;

        result.map_err(Into::<GatewayError>::into)?;
        self.tasks.remove(pos);
        self.persist_snapshot();
        Ok(())
    }

    /// Move the task at `source` to `destination` and persist the new order.
    ///
    /// A missing or out-of-range destination is a no-op: nothing changes and
    /// no request is sent. Otherwise the new sequence is adopted
    /// optimistically before the gateway call; a failure is surfaced but the
    /// local reorder is retained, since a server-side order mismatch is not
    /// destructive and the next load reconciles it.
    ///
    /// # Errors
    /// Returns [`StoreError::Gateway`] when the backend rejects the reorder.
    pub async fn reorder(&mut self, source: usize, destination: Option<usize>) -> Result<(), StoreError> {
        let Some(plan) = plan_reorder(&self.tasks, source, destination) else {
            return Ok(());
        };
        self.tasks = plan.tasks;

        self.loading = true;
        let result = self.gateway.reorder(&plan.ids).await;
        self.loading = false;

        result.map_err(Into::<GatewayError>::into)?;
        self.persist_snapshot();
        Ok(())
    }
}
