use crate::task::{Priority, Task};

/// Aggregate counts over the full task collection.
///
/// Always computed over every task, independent of any active filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    /// Number of tasks.
    pub total: usize,
    /// Tasks not yet completed.
    pub active: usize,
    /// Completed tasks.
    pub completed: usize,
    /// Tasks with high priority, regardless of completion.
    pub high_priority: usize,
}

impl TaskStats {
    /// Compute the aggregates in a single pass.
    #[must_use]
    pub fn compute(tasks: &[Task]) -> Self {
        let mut stats = Self {
            total: tasks.len(),
            ..Self::default()
        };
        for task in tasks {
            if task.completed {
                stats.completed += 1;
            } else {
                stats.active += 1;
            }
            if task.priority == Priority::High {
                stats.high_priority += 1;
            }
        }
        stats
    }
}
