//! Last-known-good task snapshot persisted to disk.
//!
//! The snapshot is a plain JSON file refreshed after successful loads and
//! mutations, and read in exactly one place: the initial-load fallback when
//! the backend is unreachable. It is not an offline queue.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use taskdeck_core::Task;

/// On-disk cache of the most recently confirmed task collection.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    path: PathBuf,
}

impl SnapshotCache {
    /// Point the cache at a JSON file; nothing is touched until a save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cached collection. `Ok(None)` when no snapshot exists yet.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<Vec<Task>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let tasks = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(Some(tasks))
    }

    /// Overwrite the snapshot with the given collection, creating parent
    /// directories as needed.
    ///
    /// # Errors
    /// Returns an error when serialization or the write fails.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let contents = serde_json::to_string(tasks).context("failed to serialize tasks")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use taskdeck_core::{Priority, TaskId};
    use tempfile::tempdir;
    use time::OffsetDateTime;

    fn task(id: i64) -> Task {
        Task {
            id: TaskId(id),
            text: format!("task {id}"),
            completed: false,
            priority: Priority::Medium,
            category: None,
            created_at: OffsetDateTime::from_unix_timestamp(id).expect("valid timestamp"),
            order: id,
        }
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempdir().expect("tempdir");
        let cache = SnapshotCache::new(dir.path().join("tasks.json"));
        assert!(cache.load().expect("load").is_none());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempdir().expect("tempdir");
        let cache = SnapshotCache::new(dir.path().join("nested").join("tasks.json"));
        cache.save(&[task(1), task(2)]).expect("save");

        let loaded = cache.load().expect("load").expect("snapshot present");
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, TaskId(1));
    }

    #[test]
    fn corrupt_file_surfaces_an_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, "not json").expect("write fixture");
        let cache = SnapshotCache::new(path);
        assert!(cache.load().is_err());
    }
}
