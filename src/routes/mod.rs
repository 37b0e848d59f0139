use std::sync::{Mutex, MutexGuard};

use crate::board::Board;

pub mod api;
pub mod public;

/// Lock the board. A poisoned lock still holds a consistent post list
/// because every mutation is applied in one step.
pub(crate) fn lock(board: &Mutex<Board>) -> MutexGuard<'_, Board> {
    board.lock().unwrap_or_else(|e| e.into_inner())
}
