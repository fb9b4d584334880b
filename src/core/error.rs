//! Error taxonomy for board-level operations.
//!
//! These are local errors: the referee translates them into game-level
//! faults only when they arise from validating or applying an action a
//! player submitted. The same errors surfacing after validation has already
//! passed indicate an implementation bug, not a player fault.

use thiserror::Error;

use super::cell::WorkerId;

/// A board operation failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Coordinates fall outside the board's dimensions.
    #[error("position ({x}, {y}) is out of bounds")]
    OutOfBounds { x: i32, y: i32 },

    /// The named worker is not on the board.
    #[error("worker {0} is not on the board")]
    WorkerNotFound(WorkerId),

    /// The destination cell already holds a worker.
    #[error("cell ({x}, {y}) is already occupied")]
    Occupied { x: i32, y: i32 },

    /// The worker is already somewhere on the board.
    #[error("worker {0} is already placed")]
    AlreadyPlaced(WorkerId),
}

/// A wire-format board cell could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReprError {
    /// An occupied-cell string does not follow `{height}{player}{worker}`.
    #[error("malformed cell `{0}`")]
    MalformedCell(String),

    /// A bare height lies outside 0..=4.
    #[error("height {0} is out of range")]
    HeightOutOfRange(u8),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cell::PlayerId;

    #[test]
    fn test_board_error_display() {
        let err = BoardError::OutOfBounds { x: -1, y: 7 };
        assert_eq!(err.to_string(), "position (-1, 7) is out of bounds");

        let err = BoardError::WorkerNotFound(WorkerId::new(PlayerId::new("a"), 0));
        assert_eq!(err.to_string(), "worker a0 is not on the board");
    }

    #[test]
    fn test_repr_error_display() {
        let err = ReprError::MalformedCell("9".into());
        assert_eq!(err.to_string(), "malformed cell `9`");
    }
}
