//! Enum types for the board

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five pipeline stages on the board.
///
/// The set is closed: every column id the board knows about is a variant
/// here, and anything else coming off the wire or out of storage fails to
/// parse instead of creating a sixth column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColumnId {
    #[serde(rename = "column-1")]
    Column1,
    #[serde(rename = "column-2")]
    Column2,
    #[serde(rename = "column-3")]
    Column3,
    #[serde(rename = "column-4")]
    Column4,
    #[serde(rename = "column-5")]
    Column5,
}

impl ColumnId {
    pub const COUNT: usize = 5;

    /// All columns in board order.
    pub fn all() -> &'static [ColumnId; ColumnId::COUNT] {
        &[
            ColumnId::Column1,
            ColumnId::Column2,
            ColumnId::Column3,
            ColumnId::Column4,
            ColumnId::Column5,
        ]
    }

    /// Position of this column on the board, left to right.
    pub fn index(&self) -> usize {
        match self {
            ColumnId::Column1 => 0,
            ColumnId::Column2 => 1,
            ColumnId::Column3 => 2,
            ColumnId::Column4 => 3,
            ColumnId::Column5 => 4,
        }
    }

    /// Wire representation, e.g. `"column-3"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnId::Column1 => "column-1",
            ColumnId::Column2 => "column-2",
            ColumnId::Column3 => "column-3",
            ColumnId::Column4 => "column-4",
            ColumnId::Column5 => "column-5",
        }
    }

    /// Heading shown above the column on a freshly mounted board.
    pub fn default_name(&self) -> &'static str {
        match self {
            ColumnId::Column1 => "Saved",
            ColumnId::Column2 => "Applied",
            ColumnId::Column3 => "Interviewing",
            ColumnId::Column4 => "Offer",
            ColumnId::Column5 => "Closed",
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnId {
    type Err = ColumnIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "column-1" => Ok(ColumnId::Column1),
            "column-2" => Ok(ColumnId::Column2),
            "column-3" => Ok(ColumnId::Column3),
            "column-4" => Ok(ColumnId::Column4),
            "column-5" => Ok(ColumnId::Column5),
            _ => Err(ColumnIdParseError(s.to_string())),
        }
    }
}

/// Error when parsing an unknown column id string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIdParseError(pub String);

impl fmt::Display for ColumnIdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown column id: {}", self.0)
    }
}

impl std::error::Error for ColumnIdParseError {}
