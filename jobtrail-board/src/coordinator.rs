//! Drag-and-drop state machine.
//!
//! The view reports two things: a card was picked up, and the gesture ended.
//! A gesture that ends outside any column arrives as `None`. Everything here
//! is synchronous; the job store update a cross-column drop produces is only
//! an intent, dispatched by the caller.

use jobtrail_core::{ColumnId, ColumnState, JobId, UpdateJobRequest};
use jobtrail_storage::OverrideStore;

/// Where a dragged card came from and where it was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropResult {
    pub source_column: ColumnId,
    pub source_index: usize,
    pub destination_column: ColumnId,
    pub destination_index: usize,
}

impl DropResult {
    pub fn new(
        source_column: ColumnId,
        source_index: usize,
        destination_column: ColumnId,
        destination_index: usize,
    ) -> Self {
        Self {
            source_column,
            source_index,
            destination_column,
            destination_index,
        }
    }

    pub fn is_reorder(&self) -> bool {
        self.source_column == self.destination_column
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        job_id: JobId,
    },
}

/// Layout after a drop, and the update to send if column membership changed.
#[derive(Debug, Clone, PartialEq)]
pub struct DropOutcome {
    pub columns: ColumnState,
    pub update: Option<UpdateJobRequest>,
}

impl DropOutcome {
    fn unchanged(columns: ColumnState) -> Self {
        Self {
            columns,
            update: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct DragDropCoordinator {
    state: DragState,
}

impl DragDropCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// A card was picked up.
    pub fn on_drag_start<O>(&mut self, job_id: JobId, overrides: &O)
    where
        O: OverrideStore + ?Sized,
    {
        self.state = DragState::Dragging { job_id };
        if let Err(err) = overrides.record_drag_start(job_id) {
            tracing::warn!(job_id = %job_id, error = %err, "Failed to record dragged job");
        }
    }

    /// The gesture ended.
    ///
    /// * `None`: cancelled. Layout and override slot are untouched.
    /// * Same column: the card is moved within the column and the new order
    ///   is written to the override slot. No update.
    /// * Different columns: the card leaves the source, enters the
    ///   destination with its `column_id` rewritten, the destination order is
    ///   written to the override slot, and one update is returned.
    ///
    /// A `source_index` past the end of the source column means the layout
    /// changed under the gesture; the drop is ignored. A `destination_index`
    /// past the end appends.
    pub fn on_drop<O>(
        &mut self,
        result: Option<DropResult>,
        current: ColumnState,
        overrides: &O,
    ) -> DropOutcome
    where
        O: OverrideStore + ?Sized,
    {
        self.state = DragState::Idle;

        let Some(result) = result else {
            tracing::debug!("Drag cancelled");
            return DropOutcome::unchanged(current);
        };

        let source_len = current.items(result.source_column).len();
        if result.source_index >= source_len {
            tracing::debug!(
                column = %result.source_column,
                index = result.source_index,
                len = source_len,
                "Ignoring drop with stale source index"
            );
            return DropOutcome::unchanged(current);
        }

        let mut next = current;
        let destination = result.destination_column;
        let mut moved = next
            .column_mut(result.source_column)
            .items
            .remove(result.source_index);

        let update = if result.is_reorder() {
            None
        } else {
            moved.column_id = destination;
            Some(UpdateJobRequest {
                id: moved.id,
                column_id: destination,
            })
        };

        let items = &mut next.column_mut(destination).items;
        let at = result.destination_index.min(items.len());
        items.insert(at, moved);

        if let Err(err) = overrides.write(destination, next.items(destination)) {
            tracing::warn!(column = %destination, error = %err, "Failed to persist column override");
        }

        DropOutcome {
            columns: next,
            update,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobtrail_core::JobRecord;
    use jobtrail_storage::KeyValueStore;
    use jobtrail_test_utils::fixtures::{failing_overrides, memory_overrides, seeded_columns};

    fn ids(items: &[JobRecord]) -> Vec<i64> {
        items.iter().map(|j| j.id.get()).collect()
    }

    #[test]
    fn test_cancelled_drop_changes_nothing() {
        let overrides = memory_overrides();
        let current = seeded_columns(&[(ColumnId::Column1, &[1, 2, 3])]);
        let mut coordinator = DragDropCoordinator::new();
        coordinator.on_drag_start(JobId::new(1), &overrides);
        let entries_before = overrides.kv().snapshot();

        let outcome = coordinator.on_drop(None, current.clone(), &overrides);

        assert_eq!(outcome.columns, current);
        assert_eq!(outcome.update, None);
        assert_eq!(overrides.kv().snapshot(), entries_before);
        assert!(overrides.read().unwrap().is_none());
        assert_eq!(coordinator.state(), DragState::Idle);
    }

    #[test]
    fn test_same_column_reorder_moves_item_to_front() {
        let overrides = memory_overrides();
        let current = seeded_columns(&[(ColumnId::Column2, &[10, 11, 12, 13, 14])]);
        let mut coordinator = DragDropCoordinator::new();

        let drop = DropResult::new(ColumnId::Column2, 2, ColumnId::Column2, 0);
        let outcome = coordinator.on_drop(Some(drop), current, &overrides);

        assert_eq!(ids(outcome.columns.items(ColumnId::Column2)), vec![12, 10, 11, 13, 14]);
        assert_eq!(outcome.update, None);

        let stored = overrides.read().unwrap().unwrap();
        assert_eq!(stored.column_id, ColumnId::Column2);
        assert_eq!(ids(&stored.items), vec![12, 10, 11, 13, 14]);
    }

    #[test]
    fn test_reorder_keeps_column_id() {
        let overrides = memory_overrides();
        let current = seeded_columns(&[(ColumnId::Column4, &[1, 2])]);
        let drop = DropResult::new(ColumnId::Column4, 0, ColumnId::Column4, 1);
        let outcome = DragDropCoordinator::new().on_drop(Some(drop), current, &overrides);
        assert!(outcome
            .columns
            .items(ColumnId::Column4)
            .iter()
            .all(|j| j.column_id == ColumnId::Column4));
        assert_eq!(ids(outcome.columns.items(ColumnId::Column4)), vec![2, 1]);
    }

    #[test]
    fn test_cross_column_drop_moves_item_and_emits_one_update() {
        let overrides = memory_overrides();
        let current = seeded_columns(&[
            (ColumnId::Column1, &[1, 2, 3]),
            (ColumnId::Column3, &[30, 31]),
        ]);
        let mut coordinator = DragDropCoordinator::new();
        coordinator.on_drag_start(JobId::new(1), &overrides);

        let drop = DropResult::new(ColumnId::Column1, 0, ColumnId::Column3, 1);
        let outcome = coordinator.on_drop(Some(drop), current, &overrides);

        assert_eq!(ids(outcome.columns.items(ColumnId::Column1)), vec![2, 3]);
        assert_eq!(ids(outcome.columns.items(ColumnId::Column3)), vec![30, 1, 31]);
        assert_eq!(outcome.columns.items(ColumnId::Column3)[1].column_id, ColumnId::Column3);
        assert_eq!(
            outcome.update,
            Some(UpdateJobRequest {
                id: JobId::new(1),
                column_id: ColumnId::Column3,
            })
        );

        let stored = overrides.read().unwrap().unwrap();
        assert_eq!(stored.column_id, ColumnId::Column3);
        assert_eq!(ids(&stored.items), vec![30, 1, 31]);
        assert_eq!(coordinator.state(), DragState::Idle);
    }

    #[test]
    fn test_out_of_range_source_index_is_noop() {
        let overrides = memory_overrides();
        let current = seeded_columns(&[(ColumnId::Column1, &[1, 2])]);

        let drop = DropResult::new(ColumnId::Column1, 2, ColumnId::Column2, 0);
        let outcome = DragDropCoordinator::new().on_drop(Some(drop), current.clone(), &overrides);

        assert_eq!(outcome.columns, current);
        assert_eq!(outcome.update, None);
        assert!(overrides.read().unwrap().is_none());
    }

    #[test]
    fn test_drop_from_empty_column_is_noop() {
        let overrides = memory_overrides();
        let current = ColumnState::new();
        let drop = DropResult::new(ColumnId::Column5, 0, ColumnId::Column1, 0);
        let outcome = DragDropCoordinator::new().on_drop(Some(drop), current.clone(), &overrides);
        assert_eq!(outcome.columns, current);
        assert_eq!(outcome.update, None);
    }

    #[test]
    fn test_destination_index_past_end_appends() {
        let overrides = memory_overrides();
        let current = seeded_columns(&[
            (ColumnId::Column1, &[1]),
            (ColumnId::Column2, &[20, 21]),
        ]);
        let drop = DropResult::new(ColumnId::Column1, 0, ColumnId::Column2, 99);
        let outcome = DragDropCoordinator::new().on_drop(Some(drop), current, &overrides);
        assert_eq!(ids(outcome.columns.items(ColumnId::Column2)), vec![20, 21, 1]);
        assert!(outcome.columns.items(ColumnId::Column1).is_empty());
    }

    #[test]
    fn test_drag_start_records_job_and_enters_dragging() {
        let overrides = memory_overrides();
        let mut coordinator = DragDropCoordinator::new();
        coordinator.on_drag_start(JobId::new(5), &overrides);
        assert_eq!(coordinator.state(), DragState::Dragging { job_id: JobId::new(5) });
        assert_eq!(overrides.kv().get("test:jobId").unwrap().as_deref(), Some("5"));
    }

    #[test]
    fn test_override_write_failure_still_moves_and_emits_update() {
        let overrides = failing_overrides();
        overrides.write(ColumnId::Column1, &[]).unwrap();
        overrides.kv().fail_writes(true);
        let current = seeded_columns(&[
            (ColumnId::Column1, &[1]),
            (ColumnId::Column3, &[30, 31]),
        ]);
        let mut coordinator = DragDropCoordinator::new();
        coordinator.on_drag_start(JobId::new(31), &overrides);

        let drop = DropResult::new(ColumnId::Column3, 1, ColumnId::Column2, 0);
        let outcome = coordinator.on_drop(Some(drop), current, &overrides);

        assert_eq!(ids(outcome.columns.items(ColumnId::Column3)), vec![30]);
        assert_eq!(ids(outcome.columns.items(ColumnId::Column2)), vec![31]);
        assert_eq!(
            outcome.update,
            Some(UpdateJobRequest {
                id: JobId::new(31),
                column_id: ColumnId::Column2,
            })
        );
        assert_eq!(coordinator.state(), DragState::Idle);
        assert_eq!(overrides.read().unwrap().unwrap().column_id, ColumnId::Column1);
    }

    #[test]
    fn test_drop_result_is_reorder() {
        assert!(DropResult::new(ColumnId::Column1, 0, ColumnId::Column1, 3).is_reorder());
        assert!(!DropResult::new(ColumnId::Column1, 0, ColumnId::Column2, 0).is_reorder());
    }
}
