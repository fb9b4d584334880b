//! External (wire) board representation.
//!
//! A board travels as a row-major 2D array in which each cell is either a
//! bare height `0..=4` or a compact string `{height}{player}{worker}` for
//! an occupied cell: `"2a0"` is player `a`'s worker 0 standing on a
//! two-floor building. The serde shapes fall out of the untagged enum, so
//! a JSON board round-trips without any custom encoding code.

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::cell::{Cell, PlayerId, WorkerId};
use super::error::ReprError;
use super::snapshot::QueryBoard;

/// Wire form of a single cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellRepr {
    /// Unoccupied building height.
    Height(u8),
    /// Occupied cell, encoded `{height}{player}{worker}`.
    Occupied(String),
}

impl CellRepr {
    fn from_cell(cell: &Cell) -> Self {
        match cell {
            Cell::Height(h) => CellRepr::Height(*h),
            Cell::Worker { id, height } => CellRepr::Occupied(format!("{}{}", height, id)),
        }
    }

    fn to_cell(&self) -> Result<Cell, ReprError> {
        match self {
            CellRepr::Height(h) => {
                if *h > 4 {
                    return Err(ReprError::HeightOutOfRange(*h));
                }
                Ok(Cell::Height(*h))
            }
            CellRepr::Occupied(s) => {
                let malformed = || ReprError::MalformedCell(s.clone());

                // Shortest legal form is height + 1-char player + worker.
                if s.len() < 3 {
                    return Err(malformed());
                }

                let height = s
                    .chars()
                    .next()
                    .and_then(|c| c.to_digit(10))
                    .ok_or_else(malformed)? as u8;
                if height > 4 {
                    return Err(ReprError::HeightOutOfRange(height));
                }

                let number = s
                    .chars()
                    .last()
                    .and_then(|c| c.to_digit(10))
                    .ok_or_else(malformed)? as u8;

                let owner = &s[1..s.len() - 1];
                if owner.is_empty() {
                    return Err(malformed());
                }

                Ok(Cell::Worker {
                    id: WorkerId::new(PlayerId::new(owner), number),
                    height,
                })
            }
        }
    }
}

impl Board {
    /// Encode the board in its wire representation.
    #[must_use]
    pub fn to_repr(&self) -> Vec<Vec<CellRepr>> {
        (0..self.height())
            .map(|y| {
                (0..self.width())
                    .map(|x| CellRepr::from_cell(self.cell(x, y).expect("in-range scan")))
                    .collect()
            })
            .collect()
    }

    /// Decode a board from its wire representation.
    ///
    /// Partial and ragged inputs are completed with trailing empty cells,
    /// exactly as [`Board::from_rows`] completes them.
    pub fn from_repr(rows: &[Vec<CellRepr>]) -> Result<Self, ReprError> {
        let cells = rows
            .iter()
            .map(|row| row.iter().map(CellRepr::to_cell).collect::<Result<Vec<_>, _>>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Board::from_rows(cells))
    }
}

impl QueryBoard {
    /// Encode the snapshot in its wire representation.
    #[must_use]
    pub fn to_repr(&self) -> Vec<Vec<CellRepr>> {
        self.as_board().to_repr()
    }
}
