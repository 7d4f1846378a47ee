use crate::task::{Task, TaskId};

/// Outcome of a drag-and-drop move: the new sequence and the flat id order
/// to send to the backend.
#[derive(Debug, Clone)]
pub struct ReorderPlan {
    /// Tasks in their new display sequence.
    pub tasks: Vec<Task>,
    /// Task ids in the new sequence, for the reorder call.
    pub ids: Vec<TaskId>,
}

/// Translate a source/destination index pair into a new total order.
///
/// Returns `None` when the destination is absent or either index falls
/// outside the sequence; callers treat that as a no-op without any remote
/// call. A move onto the same index still yields a plan, matching the
/// drop-in-place gesture that is legal but changes nothing.
#[must_use]
pub fn plan_reorder(tasks: &[Task], source: usize, destination: Option<usize>) -> Option<ReorderPlan> {
    let destination = destination?;
    if source >= tasks.len() || destination >= tasks.len() {
        return None;
    }

    let mut reordered = tasks.to_vec();
    let moved = reordered.remove(source);
    reordered.insert(destination, moved);

    let ids = reordered.iter().map(|task| task.id).collect();
    Some(ReorderPlan {
        tasks: reordered,
        ids,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::task::Priority;
    use time::OffsetDateTime;

    fn tasks(n: i64) -> Vec<Task> {
        (1..=n)
            .map(|id| Task {
                id: TaskId(id),
                text: format!("task {id}"),
                completed: false,
                priority: Priority::Medium,
                category: None,
                created_at: OffsetDateTime::UNIX_EPOCH,
                order: id,
            })
            .collect()
    }

    fn ids(tasks: &[Task]) -> Vec<TaskId> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn missing_destination_is_a_no_op() {
        assert!(plan_reorder(&tasks(3), 0, None).is_none());
    }

    #[test]
    fn out_of_range_indexes_are_a_no_op() {
        let seq = tasks(3);
        assert!(plan_reorder(&seq, 3, Some(0)).is_none());
        assert!(plan_reorder(&seq, 0, Some(3)).is_none());
    }

    #[test]
    fn move_first_to_last_keeps_relative_order_of_the_rest() {
        let plan = plan_reorder(&tasks(4), 0, Some(3)).expect("plan");
        assert_eq!(plan.ids, vec![TaskId(2), TaskId(3), TaskId(4), TaskId(1)]);
        assert_eq!(ids(&plan.tasks), plan.ids);
    }

    #[test]
    fn move_last_to_first_keeps_relative_order_of_the_rest() {
        let plan = plan_reorder(&tasks(4), 3, Some(0)).expect("plan");
        assert_eq!(plan.ids, vec![TaskId(4), TaskId(1), TaskId(2), TaskId(3)]);
    }

    #[test]
    fn same_index_move_yields_an_unchanged_plan() {
        let seq = tasks(3);
        let plan = plan_reorder(&seq, 1, Some(1)).expect("plan");
        assert_eq!(plan.ids, ids(&seq));
    }

    #[test]
    fn every_move_is_a_permutation() {
        let seq = tasks(5);
        for source in 0..seq.len() {
            for destination in 0..seq.len() {
                let plan = plan_reorder(&seq, source, Some(destination)).expect("plan");
                let mut sorted = plan.ids.clone();
                sorted.sort_unstable();
                assert_eq!(sorted, ids(&seq));
            }
        }
    }
}
