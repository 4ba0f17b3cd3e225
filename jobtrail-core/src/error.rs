//! Error types for jobtrail operations

use crate::JobId;
use thiserror::Error;

/// Errors reported by a job store implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JobStoreError {
    #[error("Fetching jobs failed: {reason}")]
    FetchFailed { reason: String },

    #[error("Updating job {id} failed: {reason}")]
    UpdateFailed { id: JobId, reason: String },

    #[error("Job not found: {id}")]
    NotFound { id: JobId },
}

/// Errors from the local key-value store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Read failed for key {key}: {reason}")]
    ReadFailed { key: String, reason: String },

    #[error("Write failed for key {key}: {reason}")]
    WriteFailed { key: String, reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}
