//! Identity types for job records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to a job record by the job store.
///
/// The store hands out numeric ids; the board only compares them and
/// echoes them back in update requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(i64);

impl JobId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for JobId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_id_serializes_as_bare_number() {
        let json = serde_json::to_string(&JobId::new(42)).unwrap();
        assert_eq!(json, "42");
        let back: JobId = serde_json::from_str("42").unwrap();
        assert_eq!(back, JobId::new(42));
    }

    #[test]
    fn test_job_id_display() {
        assert_eq!(JobId::new(7).to_string(), "7");
    }
}
