//! jobtrail Board - Column Reconciliation and Drag-and-Drop
//!
//! Three sources compete for what the board shows: the job list fetched from
//! the job store, the column layout already on screen, and the override slot
//! written at the last drop. [`reconcile`] merges them into a
//! [`ColumnState`](jobtrail_core::ColumnState); [`DragDropCoordinator`] turns
//! a drop into the next layout plus at most one job store update; [`Board`]
//! sequences both and dispatches updates optimistically.

pub mod board;
pub mod coordinator;
pub mod events;
pub mod notifications;
pub mod reconcile;

pub use board::{Board, BoardStatus, EMPTY_BOARD_MESSAGE};
pub use coordinator::{DragDropCoordinator, DragState, DropOutcome, DropResult};
pub use events::BoardEvent;
pub use notifications::{Notification, NotificationLevel};
pub use reconcile::{reconcile, server_items};
