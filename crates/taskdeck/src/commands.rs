//! Command handlers shared by the one-shot CLI surface.

use anyhow::{Result, bail};
use taskdeck_app::{AppConfig, SnapshotCache, StoreError, TaskStore};
use taskdeck_core::task_patch::{CategoryPatch, TaskDraft, TaskPatch};
use taskdeck_core::{Task, TaskStats, visible_tasks};
use taskdeck_gateway_http::HttpGateway;
use tracing::warn;

use crate::Command;
use crate::shell;

/// Execute a parsed command against the configured backend.
pub async fn run(command: Command, config: &AppConfig) -> Result<()> {
    let gateway = HttpGateway::new(config.api.base_url.clone());

    if matches!(command, Command::Health) {
        let health = gateway.health().await?;
        println!("status: {}  db: {}", health.status, health.db);
        return Ok(());
    }

    let mut store = build_store(gateway, config);

    if matches!(command, Command::Shell) {
        return shell_entry(store).await;
    }

    initialize(&mut store, &command).await?;

    match command {
        Command::Ls { filter, search } => {
            let tasks = visible_tasks(store.tasks(), filter, &search);
            render_tasks(&tasks);
        }
        Command::Add {
            text,
            priority,
            category,
        } => {
            let task = store
                .create(TaskDraft {
                    text,
                    priority,
                    category,
                })
                .await?;
            println!("created {}", summary(task));
        }
        Command::Toggle { id } => {
            let completed = store
                .find(id)
                .ok_or(StoreError::NotFound(id))?
                .completed;
            let task = store.update(id, TaskPatch::completed(!completed)).await?;
            println!("updated {}", summary(task));
        }
        Command::Edit {
            id,
            text,
            priority,
            category,
            clear_category,
        } => {
            let category = if clear_category {
                Some(CategoryPatch::Clear)
            } else {
                category.map(|category| CategoryPatch::Set { category })
            };
            let patch = TaskPatch {
                text,
                completed: None,
                priority,
                category,
            };
            if patch.is_empty() {
                bail!("nothing to change; pass --text, --priority, --category, or --clear-category");
            }
            let task = store.update(id, patch).await?;
            println!("updated {}", summary(task));
        }
        Command::Rm { id } => {
            store.delete(id).await?;
            println!("deleted task {id}");
        }
        Command::Mv {
            source,
            destination,
        } => {
            if source == 0 || destination == 0 {
                bail!("positions are 1-based, as shown by `ls`");
            }
            if source > store.tasks().len() || destination > store.tasks().len() {
                bail!("position out of range; the list has {} tasks", store.tasks().len());
            }
            store.reorder(source - 1, Some(destination - 1)).await?;
            render_tasks(store.tasks());
        }
        Command::Stats => render_stats(&TaskStats::compute(store.tasks())),
        Command::Health | Command::Shell => unreachable!("handled above"),
    }

    Ok(())
}

fn build_store(gateway: HttpGateway, config: &AppConfig) -> TaskStore<HttpGateway> {
    match config.snapshot_path() {
        Some(path) => TaskStore::with_snapshot(gateway, SnapshotCache::new(path)),
        None => TaskStore::new(gateway),
    }
}

async fn shell_entry(mut store: TaskStore<HttpGateway>) -> Result<()> {
    if let Err(err) = store.initialize().await {
        warn!(error = %err, "initial load failed, starting with an empty list");
    }
    shell::run(taskdeck_app::TaskSession::new(store)).await
}

/// Mutating commands tolerate a failed initial load (the backend may still
/// accept the write); read commands propagate it.
async fn initialize(store: &mut TaskStore<HttpGateway>, command: &Command) -> Result<()> {
    match store.initialize().await {
        Ok(()) => Ok(()),
        Err(err) if matches!(command, Command::Add { .. }) => {
            warn!(error = %err, "initial load failed, attempting the write anyway");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// One line per task: position, id, checkbox, priority, category, text.
pub fn render_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("no tasks");
        return;
    }
    for (pos, task) in tasks.iter().enumerate() {
        println!("{:>3}. {}", pos + 1, summary(task));
    }
}

/// Render aggregate counts.
pub fn render_stats(stats: &TaskStats) {
    println!(
        "total: {}  active: {}  completed: {}  high priority: {}",
        stats.total, stats.active, stats.completed, stats.high_priority
    );
}

/// Compact single-line rendering of a task.
#[must_use]
pub fn summary(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    let category = task
        .category
        .as_deref()
        .map(|c| format!(" #{c}"))
        .unwrap_or_default();
    format!(
        "[{mark}] {} ({}){category} {} (added {})",
        task.id,
        task.priority,
        task.text,
        task.created_at.date()
    )
}
