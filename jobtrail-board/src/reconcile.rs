//! Deriving the column layout from the job list and the override slot.

use jobtrail_core::{ColumnId, ColumnState, JobRecord};
use jobtrail_storage::{ColumnOverride, OverrideError, OverrideStore};

/// Jobs whose `column_id` is `column`, in the order `jobs` lists them.
pub fn server_items(jobs: &[JobRecord], column: ColumnId) -> Vec<JobRecord> {
    jobs.iter()
        .filter(|job| job.column_id == column)
        .cloned()
        .collect()
}

/// Compute the next column layout.
///
/// Each column gets the jobs filed under it, except the column named by the
/// override slot, which gets the override's items verbatim even when they
/// disagree with `jobs`. Column names carry over from `previous`. An
/// unreadable override counts as no override.
pub fn reconcile<O>(jobs: &[JobRecord], previous: &ColumnState, overrides: &O) -> ColumnState
where
    O: OverrideStore + ?Sized,
{
    let column_override = read_override(overrides);
    let mut next = ColumnState::new();

    for &column in ColumnId::all() {
        let items = match &column_override {
            Some(found) if found.column_id == column => found.items.clone(),
            _ => server_items(jobs, column),
        };
        let target = next.column_mut(column);
        target.name.clone_from(&previous.column(column).name);
        target.items = items;
    }

    next
}

fn read_override<O>(overrides: &O) -> Option<ColumnOverride>
where
    O: OverrideStore + ?Sized,
{
    match overrides.read() {
        Ok(found) => found,
        Err(OverrideError::UnknownColumn(err)) => {
            tracing::debug!(error = %err, "Ignoring override for unknown column");
            None
        }
        Err(err) => {
            tracing::warn!(error = %err, "Ignoring unreadable column override");
            None
        }
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use jobtrail_test_utils::fixtures::memory_overrides;
    use jobtrail_test_utils::generators::{arb_column_id, arb_job_list};
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: with no override every job lands in exactly its own column,
        /// in list order
        #[test]
        fn prop_reconcile_partitions_exactly(jobs in arb_job_list(30)) {
            let state = reconcile(&jobs, &ColumnState::new(), &memory_overrides());

            prop_assert_eq!(state.total_items(), jobs.len());
            for &column in ColumnId::all() {
                let expected: Vec<&JobRecord> = jobs.iter().filter(|j| j.column_id == column).collect();
                let actual: Vec<&JobRecord> = state.items(column).iter().collect();
                prop_assert_eq!(actual, expected);
            }
        }

        /// Property: reconciling twice with no override write in between is a no-op
        #[test]
        fn prop_reconcile_idempotent(jobs in arb_job_list(30), pinned in arb_column_id()) {
            let overrides = memory_overrides();
            overrides.write(pinned, &jobs[..jobs.len() / 2]).unwrap();

            let once = reconcile(&jobs, &ColumnState::new(), &overrides);
            let twice = reconcile(&jobs, &once, &overrides);
            prop_assert_eq!(once, twice);
        }

        /// Property: the override column shows the override verbatim and the
        /// rest are derived from the job list
        #[test]
        fn prop_override_precedence(
            jobs in arb_job_list(20),
            pinned_items in arb_job_list(6),
            pinned in arb_column_id(),
        ) {
            let overrides = memory_overrides();
            overrides.write(pinned, &pinned_items).unwrap();

            let state = reconcile(&jobs, &ColumnState::new(), &overrides);
            prop_assert_eq!(state.items(pinned), pinned_items.as_slice());
            for &column in ColumnId::all().iter().filter(|c| **c != pinned) {
                prop_assert_eq!(state.items(column).to_vec(), server_items(&jobs, column));
            }
        }
    }
}
