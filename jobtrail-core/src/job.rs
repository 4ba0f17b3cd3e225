//! Job records as served by the job store.

use crate::{ColumnId, JobId};
use serde::{Deserialize, Serialize};

/// A saved job posting.
///
/// Field names follow the job store's JSON. Display fields the board does not
/// interpret are kept in `extra` so a record survives a trip through the
/// override blob unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub column_id: ColumnId,
    #[serde(rename = "jobTitle", default)]
    pub job_title: String,
    #[serde(rename = "companyTitle", default)]
    pub company_title: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl JobRecord {
    pub fn new(id: JobId, column_id: ColumnId) -> Self {
        Self {
            id,
            column_id,
            job_title: String::new(),
            company_title: String::new(),
            logo: String::new(),
            location: None,
            lat: None,
            long: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_titles(mut self, job_title: impl Into<String>, company_title: impl Into<String>) -> Self {
        self.job_title = job_title.into();
        self.company_title = company_title.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_coordinates(mut self, lat: f64, long: f64) -> Self {
        self.lat = Some(lat);
        self.long = Some(long);
        self
    }

    /// `(lat, long)` once the record has been geocoded.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.long) {
            (Some(lat), Some(long)) => Some((lat, long)),
            _ => None,
        }
    }
}

/// The single update the board asks the job store to perform after a
/// cross-column drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateJobRequest {
    pub id: JobId,
    pub column_id: ColumnId,
}

/// A geocoded job, ready for a map marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPin<'a> {
    pub lat: f64,
    pub long: f64,
    pub job: &'a JobRecord,
}

/// Jobs that carry both coordinates, in list order.
pub fn map_pins(jobs: &[JobRecord]) -> Vec<MapPin<'_>> {
    jobs.iter()
        .filter_map(|job| {
            job.coordinates()
                .map(|(lat, long)| MapPin { lat, long, job })
        })
        .collect()
}
