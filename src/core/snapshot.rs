//! Read-only board snapshots.
//!
//! A `QueryBoard` is an independently owned deep copy of the live board,
//! handed to rule checkers, players, and observers. Holding one confers no
//! way to mutate authoritative state: a misbehaving actor can scribble on
//! its copy all it likes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::board::Board;
use super::cell::{Cell, PlayerId, WorkerId};
use super::direction::Direction;
use super::error::BoardError;

/// An immutable, independently-owned view of a board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryBoard {
    board: Board,
}

impl QueryBoard {
    /// Wrap an owned board copy as a read-only view.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self { board }
    }

    /// Board width in cells.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.board.width()
    }

    /// Board height in cells.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.board.height()
    }

    /// The cell at the given coordinates.
    pub fn cell(&self, x: i32, y: i32) -> Result<&Cell, BoardError> {
        self.board.cell(x, y)
    }

    /// Building height at the given coordinates.
    pub fn height_at(&self, x: i32, y: i32) -> Result<u8, BoardError> {
        Ok(self.board.cell(x, y)?.height())
    }

    /// Whether the cell next to the worker in the given direction exists.
    ///
    /// `false` covers both out-of-bounds neighbors and an absent worker.
    #[must_use]
    pub fn neighbor_exists(&self, worker: &WorkerId, direction: Direction) -> bool {
        self.neighbor_cell(worker, direction).is_ok()
    }

    /// Whether the cell next to the worker holds another worker.
    ///
    /// `false` covers out-of-bounds neighbors as well.
    #[must_use]
    pub fn occupied(&self, worker: &WorkerId, direction: Direction) -> bool {
        self.neighbor_cell(worker, direction)
            .map(Cell::is_occupied)
            .unwrap_or(false)
    }

    /// Height of the neighboring building in the given direction.
    pub fn neighbor_height(&self, worker: &WorkerId, direction: Direction) -> Result<u8, BoardError> {
        Ok(self.neighbor_cell(worker, direction)?.height())
    }

    /// Position of the given worker.
    pub fn worker_position(&self, worker: &WorkerId) -> Result<(i32, i32), BoardError> {
        self.board.worker_position(worker)
    }

    /// All worker ids on the board, in row-major scan order.
    #[must_use]
    pub fn worker_ids(&self) -> SmallVec<[WorkerId; 4]> {
        self.board.workers().into_iter().map(|(id, _)| id).collect()
    }

    /// The given player's workers, in row-major scan order.
    #[must_use]
    pub fn workers_of(&self, player: &PlayerId) -> SmallVec<[WorkerId; 4]> {
        self.worker_ids()
            .into_iter()
            .filter(|w| &w.owner == player)
            .collect()
    }

    /// The underlying board copy, for validation against the same state
    /// the snapshot was taken from.
    #[must_use]
    pub fn as_board(&self) -> &Board {
        &self.board
    }

    fn neighbor_cell(&self, worker: &WorkerId, direction: Direction) -> Result<&Cell, BoardError> {
        let (x, y) = self.board.worker_position(worker)?;
        let (to_x, to_y) = direction.step(x, y);
        self.board.cell(to_x, to_y)
    }
}
