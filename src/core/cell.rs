//! Player and worker identity, and the cells they stand on.
//!
//! ## PlayerId
//!
//! Participants report their own names, so ids are strings rather than
//! indices. The tournament layer enforces a naming policy and uniqueness;
//! everything below it treats the id as opaque.
//!
//! ## WorkerId
//!
//! A piece is identified by its owner plus a per-player worker number.
//! The pair is unique on any well-formed board.

use serde::{Deserialize, Serialize};

/// Identifier of a participant, as used on boards and in results.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a player id from a name.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identity of a single worker: its owner and the owner's worker number.
///
/// Displays as `{owner}{number}` (e.g. `a0`), the form used by the wire
/// representation of occupied cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkerId {
    /// Owning player.
    pub owner: PlayerId,
    /// Worker number within the owner's pieces (0 or 1 in a standard game).
    pub number: u8,
}

impl WorkerId {
    /// Create a worker id.
    #[must_use]
    pub fn new(owner: PlayerId, number: u8) -> Self {
        Self { owner, number }
    }
}

impl std::fmt::Display for WorkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.owner, self.number)
    }
}

/// One cell of a board: a bare building, or a worker standing on one.
///
/// Heights are 0..=4 under standard rules, but the cap is a *rule*: the
/// board applies mechanical updates unconditionally and the RuleChecker is
/// the layer that refuses to build past [`crate::rules::MAX_HEIGHT`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// Unoccupied building of the given height.
    Height(u8),
    /// A worker standing on a building of the given height.
    Worker {
        /// The worker occupying this cell.
        id: WorkerId,
        /// Height of the building under the worker.
        height: u8,
    },
}

impl Cell {
    /// Height of the building at this cell, occupied or not.
    #[must_use]
    pub fn height(&self) -> u8 {
        match self {
            Cell::Height(h) => *h,
            Cell::Worker { height, .. } => *height,
        }
    }

    /// Whether a worker stands here.
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        matches!(self, Cell::Worker { .. })
    }

    /// The occupying worker, if any.
    #[must_use]
    pub fn worker_id(&self) -> Option<&WorkerId> {
        match self {
            Cell::Height(_) => None,
            Cell::Worker { id, .. } => Some(id),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Height(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_display() {
        let id = PlayerId::new("alice");
        assert_eq!(id.as_str(), "alice");
        assert_eq!(format!("{}", id), "alice");
    }

    #[test]
    fn test_worker_id_display() {
        let wid = WorkerId::new(PlayerId::new("a"), 1);
        assert_eq!(format!("{}", wid), "a1");
    }

    #[test]
    fn test_cell_height() {
        assert_eq!(Cell::Height(3).height(), 3);

        let worker = Cell::Worker {
            id: WorkerId::new(PlayerId::new("a"), 0),
            height: 2,
        };
        assert_eq!(worker.height(), 2);
    }

    #[test]
    fn test_cell_occupancy() {
        let empty = Cell::Height(0);
        assert!(!empty.is_occupied());
        assert!(empty.worker_id().is_none());

        let wid = WorkerId::new(PlayerId::new("b"), 1);
        let worker = Cell::Worker {
            id: wid.clone(),
            height: 0,
        };
        assert!(worker.is_occupied());
        assert_eq!(worker.worker_id(), Some(&wid));
    }

    #[test]
    fn test_cell_default() {
        assert_eq!(Cell::default(), Cell::Height(0));
    }
}
