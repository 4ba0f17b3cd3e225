//! jobtrail Test Utilities
//!
//! Shared test infrastructure for the jobtrail workspace:
//! - A scriptable in-memory job store
//! - A key-value store whose writes can be made to fail
//! - Proptest generators for board types
//! - Fixtures for common board layouts

pub use jobtrail_core::{
    ColumnId, ColumnState, JobId, JobRecord, JobStore, JobStoreError, StorageError,
    UpdateJobRequest,
};
pub use jobtrail_storage::{InMemoryKeyValueStore, KeyValueStore, LocalOverrideStore, OverrideStore};

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

// ============================================================================
// MOCK JOB STORE
// ============================================================================

/// In-memory job store.
///
/// Updates rewrite the stored record's column and echo it back. Either call
/// can be made to fail, and every update request is recorded.
#[derive(Debug, Default)]
pub struct MockJobStore {
    jobs: Mutex<Vec<JobRecord>>,
    updates: Mutex<Vec<UpdateJobRequest>>,
    fetch_error: Mutex<Option<JobStoreError>>,
    update_error: Mutex<Option<JobStoreError>>,
}

impl MockJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jobs(jobs: Vec<JobRecord>) -> Self {
        Self {
            jobs: Mutex::new(jobs),
            ..Self::default()
        }
    }

    /// Make every following `fetch_jobs` fail with `error`.
    pub fn fail_fetch(&self, error: JobStoreError) {
        *lock(&self.fetch_error) = Some(error);
    }

    /// Make every following `update_job` fail with `error`.
    pub fn fail_updates(&self, error: JobStoreError) {
        *lock(&self.update_error) = Some(error);
    }

    pub fn set_jobs(&self, jobs: Vec<JobRecord>) {
        *lock(&self.jobs) = jobs;
    }

    pub fn jobs(&self) -> Vec<JobRecord> {
        lock(&self.jobs).clone()
    }

    /// Update requests received so far, in arrival order.
    pub fn updates(&self) -> Vec<UpdateJobRequest> {
        lock(&self.updates).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl JobStore for MockJobStore {
    async fn fetch_jobs(&self) -> Result<Vec<JobRecord>, JobStoreError> {
        if let Some(err) = lock(&self.fetch_error).clone() {
            return Err(err);
        }
        Ok(self.jobs())
    }

    async fn update_job(&self, request: UpdateJobRequest) -> Result<JobRecord, JobStoreError> {
        lock(&self.updates).push(request);
        if let Some(err) = lock(&self.update_error).clone() {
            return Err(err);
        }

        let mut jobs = lock(&self.jobs);
        let job = jobs
            .iter_mut()
            .find(|job| job.id == request.id)
            .ok_or(JobStoreError::NotFound { id: request.id })?;
        job.column_id = request.column_id;
        Ok(job.clone())
    }
}

// ============================================================================
// FAILING KEY-VALUE STORE
// ============================================================================

/// In-memory key-value store whose writes can be switched off.
///
/// While failing, `set` and `remove` return `StorageError::WriteFailed` and
/// leave the entries untouched. Reads always succeed.
#[derive(Debug, Default)]
pub struct FailingKeyValueStore {
    inner: InMemoryKeyValueStore,
    failing: AtomicBool,
}

impl FailingKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self, key: &str) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::WriteFailed {
                key: key.to_string(),
                reason: "writes disabled".to_string(),
            });
        }
        Ok(())
    }
}

impl KeyValueStore for FailingKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check(key)?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check(key)?;
        self.inner.remove(key)
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for board types.

    use super::*;
    use proptest::prelude::*;

    /// Generate a ColumnId variant.
    pub fn arb_column_id() -> impl Strategy<Value = ColumnId> {
        prop_oneof![
            Just(ColumnId::Column1),
            Just(ColumnId::Column2),
            Just(ColumnId::Column3),
            Just(ColumnId::Column4),
            Just(ColumnId::Column5),
        ]
    }

    /// Generate optional map coordinates.
    pub fn arb_coordinates() -> impl Strategy<Value = Option<(f64, f64)>> {
        prop::option::of((-90.0f64..90.0, -180.0f64..180.0))
    }

    /// Generate a JobRecord with the given id.
    pub fn arb_job_record(id: i64) -> impl Strategy<Value = JobRecord> {
        (
            arb_column_id(),
            "[a-zA-Z ]{0,30}",
            "[a-zA-Z ]{0,30}",
            prop::option::of("[a-zA-Z, ]{1,30}"),
            arb_coordinates(),
        )
            .prop_map(move |(column_id, job_title, company_title, location, coordinates)| {
                let mut job = JobRecord::new(JobId::new(id), column_id)
                    .with_titles(job_title, company_title);
                job.location = location;
                if let Some((lat, long)) = coordinates {
                    job = job.with_coordinates(lat, long);
                }
                job
            })
    }

    /// Generate up to `max` jobs with distinct ids.
    pub fn arb_job_list(max: usize) -> impl Strategy<Value = Vec<JobRecord>> {
        prop::collection::btree_set(1i64..10_000, 0..=max).prop_flat_map(|ids| {
            ids.into_iter()
                .map(arb_job_record)
                .collect::<Vec<_>>()
        })
    }

    /// Generate a layout with up to `max_per_column` jobs in each column.
    ///
    /// Every job sits in the column its `column_id` names.
    pub fn arb_column_state(max_per_column: usize) -> impl Strategy<Value = ColumnState> {
        arb_job_list(max_per_column * ColumnId::COUNT).prop_map(move |jobs| {
            let mut state = ColumnState::new();
            for job in jobs {
                let items = &mut state.column_mut(job.column_id).items;
                if items.len() < max_per_column {
                    items.push(job);
                }
            }
            state
        })
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built fixtures for common board scenarios.

    use super::*;

    /// Override store scope used throughout the tests.
    pub const TEST_SCOPE: &str = "test";

    pub type MemoryOverrides = LocalOverrideStore<Arc<InMemoryKeyValueStore>>;

    /// A titled job in `column`.
    pub fn job(id: i64, column: ColumnId) -> JobRecord {
        JobRecord::new(JobId::new(id), column)
            .with_titles(format!("Engineer {}", id), format!("Company {}", id))
    }

    pub type FailingOverrides = LocalOverrideStore<Arc<FailingKeyValueStore>>;

    /// An empty override slot under [`TEST_SCOPE`].
    pub fn memory_overrides() -> MemoryOverrides {
        LocalOverrideStore::new(Arc::new(InMemoryKeyValueStore::new()), TEST_SCOPE)
    }

    /// An override slot whose writes can be made to fail through `kv()`.
    pub fn failing_overrides() -> FailingOverrides {
        LocalOverrideStore::new(Arc::new(FailingKeyValueStore::new()), TEST_SCOPE)
    }

    /// A layout holding the given job ids per column, in the given order.
    pub fn seeded_columns(layout: &[(ColumnId, &[i64])]) -> ColumnState {
        let mut state = ColumnState::new();
        for (column, ids) in layout {
            state.set_items(*column, ids.iter().map(|id| job(*id, *column)).collect());
        }
        state
    }

    /// One job per column, ids 1 through 5.
    pub fn one_per_column() -> Vec<JobRecord> {
        ColumnId::all()
            .iter()
            .zip(1i64..)
            .map(|(column, id)| job(id, *column))
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_seeded_columns_places_jobs() {
        let state = fixtures::seeded_columns(&[(ColumnId::Column2, &[4, 5])]);
        let ids: Vec<i64> = state.items(ColumnId::Column2).iter().map(|j| j.id.get()).collect();
        assert_eq!(ids, vec![4, 5]);
        assert!(state
            .items(ColumnId::Column2)
            .iter()
            .all(|j| j.column_id == ColumnId::Column2));
        assert_eq!(state.total_items(), 2);
    }

    #[test]
    fn test_one_per_column() {
        let jobs = fixtures::one_per_column();
        assert_eq!(jobs.len(), ColumnId::COUNT);
        assert_eq!(jobs[4].column_id, ColumnId::Column5);
    }

    #[test]
    fn test_failing_overrides_reject_writes_when_switched_on() {
        let overrides = fixtures::failing_overrides();
        overrides.write(ColumnId::Column1, &[]).unwrap();

        overrides.kv().fail_writes(true);
        assert!(overrides.write(ColumnId::Column2, &[]).is_err());
        assert_eq!(overrides.read().unwrap().unwrap().column_id, ColumnId::Column1);

        overrides.kv().fail_writes(false);
        overrides.write(ColumnId::Column2, &[]).unwrap();
        assert_eq!(overrides.read().unwrap().unwrap().column_id, ColumnId::Column2);
    }

    #[test]
    fn test_memory_overrides_start_empty() {
        assert!(fixtures::memory_overrides().read().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mock_store_update_moves_job() {
        let store = MockJobStore::with_jobs(vec![fixtures::job(1, ColumnId::Column1)]);
        let request = UpdateJobRequest {
            id: JobId::new(1),
            column_id: ColumnId::Column4,
        };

        let updated = store.update_job(request).await.unwrap();
        assert_eq!(updated.column_id, ColumnId::Column4);
        assert_eq!(store.jobs()[0].column_id, ColumnId::Column4);
        assert_eq!(store.updates(), vec![request]);
    }

    #[tokio::test]
    async fn test_mock_store_update_unknown_job() {
        let store = MockJobStore::new();
        let request = UpdateJobRequest {
            id: JobId::new(9),
            column_id: ColumnId::Column2,
        };
        let result = store.update_job(request).await;
        assert_eq!(result, Err(JobStoreError::NotFound { id: JobId::new(9) }));
    }

    #[tokio::test]
    async fn test_mock_store_scripted_fetch_failure() {
        let store = MockJobStore::with_jobs(fixtures::one_per_column());
        assert_eq!(store.fetch_jobs().await.unwrap().len(), ColumnId::COUNT);

        store.fail_fetch(JobStoreError::FetchFailed {
            reason: "offline".to_string(),
        });
        assert!(store.fetch_jobs().await.is_err());
    }

    proptest! {
        #[test]
        fn prop_job_list_ids_unique(jobs in generators::arb_job_list(40)) {
            let mut ids: Vec<JobId> = jobs.iter().map(|j| j.id).collect();
            ids.sort_by_key(|id| id.get());
            ids.dedup();
            prop_assert_eq!(ids.len(), jobs.len());
        }

        #[test]
        fn prop_column_state_respects_bounds(state in generators::arb_column_state(4)) {
            for column in state.iter() {
                prop_assert!(column.len() <= 4);
                prop_assert!(column.items.iter().all(|j| j.column_id == column.id));
            }
        }
    }
}
