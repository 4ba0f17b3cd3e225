//! The job store seam.

use crate::{JobRecord, JobStoreError, UpdateJobRequest};
use async_trait::async_trait;

/// Authoritative source of job records.
///
/// The board only ever reads the full list and asks for single-field column
/// updates; creating, editing, and deleting jobs happen elsewhere.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Fetch every job saved to the current account.
    async fn fetch_jobs(&self) -> Result<Vec<JobRecord>, JobStoreError>;

    /// Move a job to another column on the server.
    ///
    /// Returns the record as stored after the update.
    async fn update_job(&self, request: UpdateJobRequest) -> Result<JobRecord, JobStoreError>;
}
