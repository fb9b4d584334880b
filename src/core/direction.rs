//! Compass directions for move and build targeting.
//!
//! The origin is the top-left corner of the board: going north means
//! `y - 1`, going west means `x - 1`. Each direction is a pure coordinate
//! step; two directions compose into a single combined step.

use serde::{Deserialize, Serialize};

/// One of the eight adjacency vectors on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl Direction {
    /// All eight directions, in a fixed scan-friendly order.
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::S,
        Direction::E,
        Direction::W,
        Direction::NE,
        Direction::NW,
        Direction::SE,
        Direction::SW,
    ];

    /// Coordinate delta of one step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::N => (0, -1),
            Direction::S => (0, 1),
            Direction::E => (1, 0),
            Direction::W => (-1, 0),
            Direction::NE => (1, -1),
            Direction::NW => (-1, -1),
            Direction::SE => (1, 1),
            Direction::SW => (-1, 1),
        }
    }

    /// Apply one step in this direction.
    #[must_use]
    pub const fn step(self, x: i32, y: i32) -> (i32, i32) {
        let (dx, dy) = self.delta();
        (x + dx, y + dy)
    }

    /// Combine two directions into a single step function.
    ///
    /// `N.compose(E)` steps the same way as `NE`; composing a direction
    /// with its opposite yields the identity step.
    #[must_use]
    pub fn compose(self, other: Direction) -> impl Fn(i32, i32) -> (i32, i32) {
        move |x, y| {
            let (x, y) = self.step(x, y);
            other.step(x, y)
        }
    }

    /// The direction leading from one cell to an adjacent cell.
    ///
    /// Returns `None` if the cells are equal or not within one step of
    /// each other.
    #[must_use]
    pub fn between(from: (i32, i32), to: (i32, i32)) -> Option<Direction> {
        let delta = (to.0 - from.0, to.1 - from.1);
        Direction::ALL.iter().copied().find(|d| d.delta() == delta)
    }
}

/// All cells adjacent to the given position, in [`Direction::ALL`] order.
///
/// Purely positional: out-of-bounds neighbors are included and left to the
/// caller's bounds checks.
pub fn adjacent(x: i32, y: i32) -> impl Iterator<Item = (i32, i32)> {
    Direction::ALL.iter().map(move |d| d.step(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_steps() {
        assert_eq!(Direction::N.step(3, 3), (3, 2));
        assert_eq!(Direction::S.step(3, 3), (3, 4));
        assert_eq!(Direction::E.step(3, 3), (4, 3));
        assert_eq!(Direction::W.step(3, 3), (2, 3));
    }

    #[test]
    fn test_diagonal_steps() {
        assert_eq!(Direction::NE.step(0, 1), (1, 0));
        assert_eq!(Direction::NW.step(1, 1), (0, 0));
        assert_eq!(Direction::SE.step(0, 0), (1, 1));
        assert_eq!(Direction::SW.step(1, 0), (0, 1));
    }

    #[test]
    fn test_compose_matches_diagonal() {
        let ne = Direction::N.compose(Direction::E);
        assert_eq!(ne(2, 2), Direction::NE.step(2, 2));

        let sw = Direction::S.compose(Direction::W);
        assert_eq!(sw(2, 2), Direction::SW.step(2, 2));
    }

    #[test]
    fn test_compose_with_opposite_is_identity() {
        let id = Direction::N.compose(Direction::S);
        assert_eq!(id(4, 1), (4, 1));
    }

    #[test]
    fn test_between() {
        assert_eq!(Direction::between((2, 2), (2, 1)), Some(Direction::N));
        assert_eq!(Direction::between((2, 2), (3, 3)), Some(Direction::SE));
        assert_eq!(Direction::between((2, 2), (2, 2)), None);
        assert_eq!(Direction::between((2, 2), (4, 2)), None);
    }

    #[test]
    fn test_adjacent_yields_eight_cells() {
        let cells: Vec<_> = adjacent(0, 0).collect();
        assert_eq!(cells.len(), 8);
        assert!(cells.contains(&(-1, -1)));
        assert!(cells.contains(&(1, 1)));
    }
}
