//! The live game board.
//!
//! The board is the single mutable authority on piece positions and
//! building heights. It knows no rules: callers are expected to validate
//! through the [`crate::rules::RuleChecker`] first, after which the board
//! applies the mechanical update unconditionally.
//!
//! Only the referee holds a `Board`. Every other component observes the
//! game through [`QueryBoard`](super::snapshot::QueryBoard) snapshots,
//! which are independent deep copies.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::cell::{Cell, WorkerId};
use super::direction::Direction;
use super::error::BoardError;
use super::snapshot::QueryBoard;

/// Default board width in cells.
pub const DEFAULT_WIDTH: i32 = 6;
/// Default board height in cells.
pub const DEFAULT_HEIGHT: i32 = 6;

/// A rectangular grid of [`Cell`]s, stored row-major (`rows[y][x]`).
///
/// Coordinates are signed so that out-of-range submissions from player
/// actors are representable and rejected rather than unencodable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: i32,
    height: i32,
    rows: Vec<Vec<Cell>>,
}

impl Board {
    /// Create an empty board of the default 6×6 dimensions.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dimensions(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Create an empty board of the given dimensions.
    #[must_use]
    pub fn with_dimensions(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "Board dimensions must be positive");

        let rows = (0..height)
            .map(|_| (0..width).map(|_| Cell::Height(0)).collect())
            .collect();

        Self {
            width,
            height,
            rows,
        }
    }

    /// Create a board from a possibly partial or ragged 2D input.
    ///
    /// Missing trailing cells are padded with `Height(0)` and the board's
    /// effective dimensions grow to the maximum of the defaults and the
    /// input's dimensions. Padding is only ever trailing, never leading.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let height = (rows.len() as i32).max(DEFAULT_HEIGHT);
        let width = rows
            .iter()
            .map(|row| row.len() as i32)
            .max()
            .unwrap_or(0)
            .max(DEFAULT_WIDTH);

        let mut completed: Vec<Vec<Cell>> = rows;
        for row in &mut completed {
            row.resize(width as usize, Cell::Height(0));
        }
        while (completed.len() as i32) < height {
            completed.push(vec![Cell::Height(0); width as usize]);
        }

        Self {
            width,
            height,
            rows: completed,
        }
    }

    /// Board width in cells.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Board height in cells.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The cell at the given coordinates.
    pub fn cell(&self, x: i32, y: i32) -> Result<&Cell, BoardError> {
        if self.out_of_bounds(x, y) {
            return Err(BoardError::OutOfBounds { x, y });
        }
        Ok(&self.rows[y as usize][x as usize])
    }

    /// Position of the given worker, scanning rows top to bottom.
    pub fn worker_position(&self, worker: &WorkerId) -> Result<(i32, i32), BoardError> {
        for (y, row) in self.rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if cell.worker_id() == Some(worker) {
                    return Ok((x as i32, y as i32));
                }
            }
        }
        Err(BoardError::WorkerNotFound(worker.clone()))
    }

    /// Put a worker on the board.
    ///
    /// Fails if the position is out of bounds, the destination already
    /// holds a worker, or this worker is already somewhere on the board.
    /// The placed worker adopts the destination cell's existing height.
    pub fn place(&mut self, worker: WorkerId, x: i32, y: i32) -> Result<(), BoardError> {
        let cell = self.cell(x, y)?;
        if cell.is_occupied() {
            return Err(BoardError::Occupied { x, y });
        }
        if self.worker_position(&worker).is_ok() {
            return Err(BoardError::AlreadyPlaced(worker));
        }

        let height = cell.height();
        self.rows[y as usize][x as usize] = Cell::Worker { id: worker, height };
        Ok(())
    }

    /// Move a worker one step in the given direction.
    ///
    /// The origin cell keeps its height as a bare building; the worker
    /// adopts the destination cell's prior height. No legality checks
    /// beyond resolvability of the destination.
    pub fn move_worker(&mut self, worker: &WorkerId, direction: Direction) -> Result<(), BoardError> {
        let (x, y) = self.worker_position(worker)?;
        let (to_x, to_y) = direction.step(x, y);
        let to_height = self.cell(to_x, to_y)?.height();

        let from_height = self.rows[y as usize][x as usize].height();
        self.rows[y as usize][x as usize] = Cell::Height(from_height);
        self.rows[to_y as usize][to_x as usize] = Cell::Worker {
            id: worker.clone(),
            height: to_height,
        };
        Ok(())
    }

    /// Build one floor in the given direction from the worker.
    ///
    /// The height cap is a rule, not a mechanical property: this method
    /// increments unconditionally.
    pub fn build(&mut self, worker: &WorkerId, direction: Direction) -> Result<(), BoardError> {
        let (x, y) = self.worker_position(worker)?;
        let (to_x, to_y) = direction.step(x, y);
        self.cell(to_x, to_y)?;

        let cell = &mut self.rows[to_y as usize][to_x as usize];
        match cell {
            Cell::Height(h) => *h += 1,
            Cell::Worker { height, .. } => *height += 1,
        }
        Ok(())
    }

    /// All workers with their positions, in row-major scan order.
    ///
    /// Scan order is load-bearing: game-over detection resolves ties by
    /// the first qualifying worker this iteration yields.
    #[must_use]
    pub fn workers(&self) -> SmallVec<[(WorkerId, (i32, i32)); 4]> {
        let mut workers = SmallVec::new();
        for (y, row) in self.rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if let Some(id) = cell.worker_id() {
                    workers.push((id.clone(), (x as i32, y as i32)));
                }
            }
        }
        workers
    }

    /// Take an independent deep-copy snapshot of the current state.
    #[must_use]
    pub fn query_snapshot(&self) -> QueryBoard {
        QueryBoard::new(self.clone())
    }

    fn out_of_bounds(&self, x: i32, y: i32) -> bool {
        x < 0 || x >= self.width || y < 0 || y >= self.height
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
