//! Scoped keys for the board's local slots.
//!
//! Every key the board writes is prefixed with a scope so several boards, or
//! several accounts, can share one key-value store without clobbering each
//! other's slots.

use std::fmt;

/// Scope used when none is configured.
pub const DEFAULT_SCOPE: &str = "jobtrail";

/// Separator between scope and slot name.
const SEPARATOR: char = ':';

/// The fixed set of slots the board uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Serialized item sequence of the last dropped-on column.
    DestinationItems,
    /// Column id of the last dropped-on column.
    DestinationId,
    /// Id of the card most recently picked up.
    DraggedJob,
}

impl Slot {
    pub fn name(&self) -> &'static str {
        match self {
            Slot::DestinationItems => "destItems",
            Slot::DestinationId => "destId",
            Slot::DraggedJob => "jobId",
        }
    }
}

/// A key made of a scope and a [`Slot`].
///
/// Only constructible through [`ScopedKey::new`], so a slot is never written
/// without its scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopedKey {
    encoded: String,
}

impl ScopedKey {
    /// An empty scope yields the bare slot name.
    pub fn new(scope: &str, slot: Slot) -> Self {
        let encoded = if scope.is_empty() {
            slot.name().to_string()
        } else {
            format!("{}{}{}", scope, SEPARATOR, slot.name())
        };
        Self { encoded }
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }
}

impl fmt::Display for ScopedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}
