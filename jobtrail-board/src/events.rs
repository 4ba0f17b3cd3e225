//! Results posted back to the board from detached tasks.

use jobtrail_core::{JobRecord, JobStoreError, UpdateJobRequest};

#[derive(Debug, Clone)]
pub enum BoardEvent {
    /// A dispatched column update finished.
    UpdateFinished {
        request: UpdateJobRequest,
        result: Result<JobRecord, JobStoreError>,
    },
}
