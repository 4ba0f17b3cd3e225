//! jobtrail Core - Board Types
//!
//! Pure data structures shared by every other crate: job records, the closed
//! set of board columns, the column layout, and the job store seam.
//! This crate contains no reconciliation logic.

pub mod column;
pub mod enums;
pub mod error;
pub mod identity;
pub mod job;
pub mod store;

pub use column::{Column, ColumnState};
pub use enums::{ColumnId, ColumnIdParseError};
pub use error::{JobStoreError, StorageError};
pub use identity::JobId;
pub use job::{map_pins, JobRecord, MapPin, UpdateJobRequest};
pub use store::JobStore;
