//! Column layout of the board.

use crate::{ColumnId, JobId, JobRecord};
use serde::{Deserialize, Serialize};

/// One pipeline stage and the jobs currently shown in it.
///
/// `items` is in drag order. It is not sorted by any job field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    pub items: Vec<JobRecord>,
}

impl Column {
    pub fn empty(id: ColumnId) -> Self {
        Self {
            id,
            name: id.default_name().to_string(),
            items: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn position(&self, id: JobId) -> Option<usize> {
        self.items.iter().position(|job| job.id == id)
    }
}

/// The board's five columns, always all present and in board order.
///
/// Backed by a fixed array indexed by [`ColumnId::index`], so a column can
/// neither go missing nor be duplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnState {
    columns: [Column; ColumnId::COUNT],
}

impl ColumnState {
    /// Five empty columns with their default names.
    pub fn new() -> Self {
        Self {
            columns: ColumnId::all().map(Column::empty),
        }
    }

    pub fn column(&self, id: ColumnId) -> &Column {
        &self.columns[id.index()]
    }

    pub fn column_mut(&mut self, id: ColumnId) -> &mut Column {
        &mut self.columns[id.index()]
    }

    pub fn items(&self, id: ColumnId) -> &[JobRecord] {
        &self.columns[id.index()].items
    }

    pub fn set_items(&mut self, id: ColumnId, items: Vec<JobRecord>) {
        self.columns[id.index()].items = items;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    pub fn total_items(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Column currently showing the job, if any.
    pub fn locate(&self, id: JobId) -> Option<(ColumnId, usize)> {
        self.columns
            .iter()
            .find_map(|column| column.position(id).map(|index| (column.id, index)))
    }
}

impl Default for ColumnState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_state_new_has_five_empty_named_columns() {
        let state = ColumnState::new();
        let ids: Vec<ColumnId> = state.iter().map(|c| c.id).collect();
        assert_eq!(ids, ColumnId::all().to_vec());
        assert!(state.iter().all(Column::is_empty));
        assert_eq!(state.column(ColumnId::Column2).name, "Applied");
        assert_eq!(state.total_items(), 0);
    }

    #[test]
    fn test_set_items_touches_only_target_column() {
        let mut state = ColumnState::new();
        let job = JobRecord::new(JobId::new(5), ColumnId::Column3);
        state.set_items(ColumnId::Column3, vec![job]);

        assert_eq!(state.items(ColumnId::Column3).len(), 1);
        assert_eq!(state.total_items(), 1);
        assert_eq!(state.locate(JobId::new(5)), Some((ColumnId::Column3, 0)));
        assert_eq!(state.locate(JobId::new(6)), None);
    }

    #[test]
    fn test_column_state_serde_roundtrip_keeps_names() {
        let mut state = ColumnState::new();
        state.column_mut(ColumnId::Column1).name = "Wishlist".to_string();
        let json = serde_json::to_string(&state).unwrap();
        let back: ColumnState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
