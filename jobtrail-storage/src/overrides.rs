//! Single-slot column override.
//!
//! When a card is dropped, the destination column's new item order is
//! written here so the next reconcile pass shows it even before the job
//! store reflects the move. There is one slot: writing an override for any
//! column replaces whatever was there before. Nothing ever clears the slot;
//! it is simply superseded by the next drop.
//!
//! Because only the latest column is remembered, two drops in different
//! columns before the first one round-trips through the job store can leave
//! the board showing a stale order for the second column once the store
//! catches up. That gap is known and kept as-is.

use crate::kv::KeyValueStore;
use crate::scoped_key::{ScopedKey, Slot};
use jobtrail_core::{ColumnId, ColumnIdParseError, JobId, JobRecord, StorageError};

/// The remembered column and its literal item sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnOverride {
    pub column_id: ColumnId,
    pub items: Vec<JobRecord>,
}

#[derive(Debug, thiserror::Error)]
pub enum OverrideError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Corrupt override items: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    UnknownColumn(#[from] ColumnIdParseError),
}

/// Read/write access to the override slot.
pub trait OverrideStore: Send + Sync {
    /// The current override, if one has been written.
    fn read(&self) -> Result<Option<ColumnOverride>, OverrideError>;

    /// Replace the override with `items` for `column_id`.
    fn write(&self, column_id: ColumnId, items: &[JobRecord]) -> Result<(), OverrideError>;

    /// Remember which card is being dragged.
    fn record_drag_start(&self, _job_id: JobId) -> Result<(), OverrideError> {
        Ok(())
    }
}

/// [`OverrideStore`] over any [`KeyValueStore`], using the scoped
/// `destItems` / `destId` / `jobId` slots.
#[derive(Debug)]
pub struct LocalOverrideStore<S> {
    kv: S,
    items_key: ScopedKey,
    column_key: ScopedKey,
    dragged_key: ScopedKey,
}

impl<S: KeyValueStore> LocalOverrideStore<S> {
    pub fn new(kv: S, scope: &str) -> Self {
        Self {
            kv,
            items_key: ScopedKey::new(scope, Slot::DestinationItems),
            column_key: ScopedKey::new(scope, Slot::DestinationId),
            dragged_key: ScopedKey::new(scope, Slot::DraggedJob),
        }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }
}

impl<S: KeyValueStore> OverrideStore for LocalOverrideStore<S> {
    fn read(&self) -> Result<Option<ColumnOverride>, OverrideError> {
        // Items are checked first: an id with no items is no override at all.
        let Some(blob) = self.kv.get(self.items_key.as_str())? else {
            return Ok(None);
        };
        let items: Vec<JobRecord> = serde_json::from_str(&blob)?;

        let Some(raw_column) = self.kv.get(self.column_key.as_str())? else {
            return Ok(None);
        };
        let column_id = raw_column.parse::<ColumnId>()?;

        Ok(Some(ColumnOverride { column_id, items }))
    }

    fn write(&self, column_id: ColumnId, items: &[JobRecord]) -> Result<(), OverrideError> {
        let blob = serde_json::to_string(items)?;
        // Items go last: a write that fails part way leaves no override rather
        // than new items under the old column id.
        self.kv.remove(self.items_key.as_str())?;
        self.kv.set(self.column_key.as_str(), column_id.as_str())?;
        self.kv.set(self.items_key.as_str(), &blob)?;
        tracing::debug!(column = %column_id, items = items.len(), "Wrote column override");
        Ok(())
    }

    fn record_drag_start(&self, job_id: JobId) -> Result<(), OverrideError> {
        self.kv.set(self.dragged_key.as_str(), &job_id.to_string())?;
        Ok(())
    }
}
