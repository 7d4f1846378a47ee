//! Session object bundling store, filter, and search for a UI layer.

use taskdeck_core::task_patch::{TaskDraft, TaskPatch};
use taskdeck_core::{StatusFilter, Task, TaskId, TaskStats, visible_tasks};
use tokio::sync::watch;

use crate::gateway::TaskGateway;
use crate::search::SearchDebouncer;
use crate::task_store::{StoreError, TaskStore};

/// Explicitly constructed, owned client state: one instance per session,
/// injected into the UI layer instead of living as ambient global state.
///
/// Owns the [`TaskStore`] plus the two pieces of view state the store
/// deliberately does not hold: the status filter and the debounced search
/// term. Everything the UI renders is derived from here.
pub struct TaskSession<G> {
    store: TaskStore<G>,
    filter: StatusFilter,
    search: SearchDebouncer,
}

impl<G> TaskSession<G> {
    /// Wrap a store with default view state (filter `all`, blank search).
    #[must_use]
    pub fn new(store: TaskStore<G>) -> Self {
        Self {
            store,
            filter: StatusFilter::All,
            search: SearchDebouncer::new(),
        }
    }

    /// Borrow the underlying store.
    #[must_use]
    pub const fn store(&self) -> &TaskStore<G> {
        &self.store
    }

    /// Active status filter.
    #[must_use]
    pub const fn filter(&self) -> StatusFilter {
        self.filter
    }

    /// Switch the status filter; takes effect on the next projection.
    pub const fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    /// Submit a search term through the debouncer. Blank terms clear the
    /// search immediately; everything else commits after the quiet window.
    pub fn search(&mut self, term: &str) {
        self.search.submit(term);
    }

    /// The committed (post-debounce) search term.
    #[must_use]
    pub fn search_term(&self) -> String {
        self.search.current()
    }

    /// Subscribe to committed search terms, for UI loops that re-render
    /// when the debounce window settles.
    #[must_use]
    pub fn subscribe_search(&self) -> watch::Receiver<String> {
        self.search.subscribe()
    }

    /// Tasks visible under the current filter and committed search term.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<Task> {
        visible_tasks(self.store.tasks(), self.filter, &self.search.current())
    }

    /// Aggregate counts over the full collection, ignoring filter/search.
    #[must_use]
    pub fn stats(&self) -> TaskStats {
        TaskStats::compute(self.store.tasks())
    }
}

impl<G: TaskGateway> TaskSession<G> {
    /// Load the collection from the backend (or the snapshot fallback).
    ///
    /// # Errors
    /// Propagates [`StoreError`] from [`TaskStore::initialize`].
    pub async fn initialize(&mut self) -> Result<(), StoreError> {
        self.store.initialize().await
    }

    /// Create a task.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from [`TaskStore::create`].
    pub async fn create(&mut self, draft: TaskDraft) -> Result<&Task, StoreError> {
        self.store.create(draft).await
    }

    /// Update a task.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from [`TaskStore::update`].
    pub async fn update(&mut self, id: TaskId, patch: TaskPatch) -> Result<&Task, StoreError> {
        self.store.update(id, patch).await
    }

    /// Delete a task.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from [`TaskStore::delete`].
    pub async fn delete(&mut self, id: TaskId) -> Result<(), StoreError> {
        self.store.delete(id).await
    }

    /// Reorder the *visible* sequence by source/destination index.
    ///
    /// Indexes refer to the currently visible projection, which equals the
    /// full collection when no filter or search is active; reordering while
    /// a filter hides tasks is rejected by the UI layer, so the session maps
    /// indexes straight onto the store sequence.
    ///
    /// # Errors
    /// Propagates [`StoreError`] from [`TaskStore::reorder`].
    pub async fn reorder(&mut self, source: usize, destination: Option<usize>) -> Result<(), StoreError> {
        self.store.reorder(source, destination).await
    }
}
