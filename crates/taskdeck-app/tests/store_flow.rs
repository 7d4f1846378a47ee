//! End-to-end store scenarios against an in-memory backend double.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Mutex;

use taskdeck_app::{SnapshotCache, StoreError, TaskGateway, TaskStore};
use taskdeck_core::task_patch::{TaskDraft, TaskPatch};
use taskdeck_core::{Priority, StatusFilter, Task, TaskId, TaskStats, visible_tasks};
use taskdeck_gateway_http::GatewayError;
use tempfile::tempdir;
use time::OffsetDateTime;

/// Backend double mirroring the real API's create/order semantics.
#[derive(Default)]
struct FakeBackend {
    inner: Mutex<FakeBackendInner>,
}

#[derive(Default)]
struct FakeBackendInner {
    tasks: Vec<Task>,
    next_id: i64,
    clock: i64,
    down: bool,
}

impl FakeBackend {
    fn set_down(&self, down: bool) {
        self.inner.lock().expect("lock backend").down = down;
    }

    fn unreachable() -> GatewayError {
        GatewayError::Status {
            status: 500,
            message: "Failed to fetch tasks".into(),
        }
    }
}

impl TaskGateway for FakeBackend {
    type Error = GatewayError;

    async fn list(&self) -> Result<Vec<Task>, Self::Error> {
        let inner = self.inner.lock().expect("lock backend");
        if inner.down {
            return Err(FakeBackend::unreachable());
        }
        let mut tasks = inner.tasks.clone();
        tasks.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.created_at.cmp(&b.created_at)));
        Ok(tasks)
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Task, Self::Error> {
        let mut inner = self.inner.lock().expect("lock backend");
        if inner.down {
            return Err(FakeBackend::unreachable());
        }
        inner.next_id += 1;
        inner.clock += 1;
        let order = inner.tasks.iter().map(|t| t.order).max().unwrap_or(0) + 1;
        let task = Task {
            id: TaskId(inner.next_id),
            text: draft.text.clone(),
            completed: false,
            priority: draft.priority.unwrap_or_default(),
            category: draft.category.clone(),
            created_at: OffsetDateTime::from_unix_timestamp(inner.clock).expect("valid timestamp"),
            order,
        };
        inner.tasks.push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, Self::Error> {
        let mut inner = self.inner.lock().expect("lock backend");
        if inner.down {
            return Err(FakeBackend::unreachable());
        }
        let task = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(GatewayError::Status {
                status: 404,
                message: "Task not found".into(),
            })?;
        if let Some(text) = &patch.text {
            task.text = text.clone();
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        match &patch.category {
            Some(taskdeck_core::CategoryPatch::Set { category }) => {
                task.category = Some(category.clone());
            }
            Some(taskdeck_core::CategoryPatch::Clear) => task.category = None,
            None => {}
        }
        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> Result<(), Self::Error> {
        let mut inner = self.inner.lock().expect("lock backend");
        if inner.down {
            return Err(FakeBackend::unreachable());
        }
        let pos = inner
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(GatewayError::Status {
                status: 404,
                message: "Task not found".into(),
            })?;
        inner.tasks.remove(pos);
        Ok(())
    }

    async fn reorder(&self, order: &[TaskId]) -> Result<(), Self::Error> {
        let mut inner = self.inner.lock().expect("lock backend");
        if inner.down {
            return Err(FakeBackend::unreachable());
        }
        for (idx, id) in order.iter().enumerate() {
            let Some(task) = inner.tasks.iter_mut().find(|t| t.id == *id) else {
                return Err(GatewayError::Status {
                    status: 400,
                    message: "Some task IDs invalid".into(),
                });
            };
            task.order = i64::try_from(idx).expect("small index");
        }
        Ok(())
    }
}

#[tokio::test]
async fn create_two_tasks_prepends_locally_but_reload_sorts_by_order() {
    let backend = FakeBackend::default();
    let mut store = TaskStore::new(&backend);
    store.initialize().await.expect("initialize");

    store
        .create(TaskDraft::new("Buy milk"))
        .await
        .expect("create first");
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].order, 1);

    store
        .create(TaskDraft {
            text: "Call mom".into(),
            priority: Some(Priority::High),
            category: None,
        })
        .await
        .expect("create second");
    assert_eq!(store.tasks().len(), 2);

    // Prepended locally: newest first.
    assert_eq!(store.tasks()[0].text, "Call mom");
    assert_eq!(store.tasks()[0].order, 2);

    // A server-backed reload restores order-ascending display.
    store.initialize().await.expect("reload");
    assert_eq!(store.tasks()[0].text, "Buy milk");
    assert_eq!(store.tasks()[1].text, "Call mom");
}

#[tokio::test]
async fn full_lifecycle_with_projections_and_stats() {
    let backend = FakeBackend::default();
    let mut store = TaskStore::new(&backend);
    store.initialize().await.expect("initialize");

    store.create(TaskDraft::new("Buy milk")).await.expect("create");
    store
        .create(TaskDraft {
            text: "File taxes".into(),
            priority: Some(Priority::High),
            category: Some("admin".into()),
        })
        .await
        .expect("create");

    let milk_id = store
        .tasks()
        .iter()
        .find(|t| t.text == "Buy milk")
        .expect("milk present")
        .id;
    store
        .update(milk_id, TaskPatch::completed(true))
        .await
        .expect("complete");

    let stats = TaskStats::compute(store.tasks());
    assert_eq!(stats.total, 2);
    assert_eq!(stats.active, 1);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.high_priority, 1);

    let active = visible_tasks(store.tasks(), StatusFilter::Active, "");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].text, "File taxes");

    let searched = visible_tasks(store.tasks(), StatusFilter::All, "TAXES");
    assert_eq!(searched.len(), 1);

    store.delete(milk_id).await.expect("delete");
    let err = store.delete(milk_id).await.expect_err("second delete");
    assert!(matches!(err, StoreError::NotFound(id) if id == milk_id));
}

#[tokio::test]
async fn reorder_survives_a_reload() {
    let backend = FakeBackend::default();
    let mut store = TaskStore::new(&backend);
    store.initialize().await.expect("initialize");

    for text in ["a", "b", "c"] {
        store.create(TaskDraft::new(text)).await.expect("create");
    }
    store.initialize().await.expect("reload in server order");
    let before: Vec<TaskId> = store.tasks().iter().map(|t| t.id).collect();

    store.reorder(2, Some(0)).await.expect("reorder");
    let after: Vec<TaskId> = store.tasks().iter().map(|t| t.id).collect();
    assert_eq!(after, vec![before[2], before[0], before[1]]);

    store.initialize().await.expect("reload");
    let reloaded: Vec<TaskId> = store.tasks().iter().map(|t| t.id).collect();
    assert_eq!(reloaded, after);
}

#[tokio::test]
async fn snapshot_fallback_covers_an_unreachable_backend() {
    let dir = tempdir().expect("tempdir");
    let snapshot_path = dir.path().join("tasks.json");
    let backend = FakeBackend::default();

    {
        let mut store =
            TaskStore::with_snapshot(&backend, SnapshotCache::new(&snapshot_path));
        store.initialize().await.expect("initialize");
        store.create(TaskDraft::new("Remembered")).await.expect("create");
    }

    backend.set_down(true);

    let mut store = TaskStore::with_snapshot(&backend, SnapshotCache::new(&snapshot_path));
    store.initialize().await.expect("fallback succeeds");
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].text, "Remembered");

    // Without a snapshot the same outage is surfaced.
    let mut bare = TaskStore::new(&backend);
    let err = bare.initialize().await.expect_err("must surface");
    assert!(matches!(err, StoreError::Gateway(_)));
}
