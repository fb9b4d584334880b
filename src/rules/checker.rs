//! Stateless rule validation against a borrowed board.
//!
//! A `RuleChecker` borrows the board it judges, so it is constructed at the
//! point of use and never caches state across mutations. All checks answer
//! plain booleans: what to *do* about an illegal action is the referee's
//! decision.

use crate::core::{adjacent, Board, Direction, PlayerId, WorkerId};

/// Maximum building height; a capped tower can be neither entered nor
/// built on.
pub const MAX_HEIGHT: u8 = 4;

/// A worker standing at this height wins the game for its owner.
pub const WIN_HEIGHT: u8 = 3;

/// Workers per player in a standard game.
pub const WORKERS_PER_PLAYER: usize = 2;

/// Total workers on a standard two-player board.
pub const MAX_WORKERS: usize = 2 * WORKERS_PER_PLAYER;

/// Validator for a single board state.
pub struct RuleChecker<'a> {
    board: &'a Board,
}

impl<'a> RuleChecker<'a> {
    /// Borrow a board for validation.
    #[must_use]
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    /// Whether `player` may place worker number `wid` at `(x, y)`.
    ///
    /// Valid iff the cell is in bounds, at ground level, unoccupied, the
    /// worker is not already on the board, and the board is not full.
    #[must_use]
    pub fn check_place(&self, player: &PlayerId, wid: u8, x: i32, y: i32) -> bool {
        let Ok(cell) = self.board.cell(x, y) else {
            return false;
        };
        let worker = WorkerId::new(player.clone(), wid);

        cell.height() == 0
            && !cell.is_occupied()
            && self.board.worker_position(&worker).is_err()
            && self.board.workers().len() < MAX_WORKERS
    }

    /// Whether `player` may move their worker from `(x1, y1)` to `(x2, y2)`.
    ///
    /// Valid iff both cells are in bounds, the source holds a worker owned
    /// by `player`, the destination is unoccupied, below the height cap,
    /// at most one floor above the source (descent is free), and adjacent.
    #[must_use]
    pub fn check_move(&self, player: &PlayerId, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        let (Ok(src), Ok(dst)) = (self.board.cell(x1, y1), self.board.cell(x2, y2)) else {
            return false;
        };

        src.worker_id().is_some_and(|w| &w.owner == player)
            && !dst.is_occupied()
            && dst.height() < MAX_HEIGHT
            && dst.height() <= src.height() + 1
            && chebyshev_adjacent(x1, y1, x2, y2)
    }

    /// Whether `player`'s worker `wid` at `(x1, y1)` may build at `(x2, y2)`.
    ///
    /// Valid iff both cells are in bounds, the source holds exactly that
    /// worker, and the destination is unoccupied, below the cap, and
    /// adjacent.
    #[must_use]
    pub fn check_build(
        &self,
        player: &PlayerId,
        wid: u8,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
    ) -> bool {
        let (Ok(src), Ok(dst)) = (self.board.cell(x1, y1), self.board.cell(x2, y2)) else {
            return false;
        };
        let worker = WorkerId::new(player.clone(), wid);

        src.worker_id() == Some(&worker)
            && !dst.is_occupied()
            && dst.height() < MAX_HEIGHT
            && chebyshev_adjacent(x1, y1, x2, y2)
    }

    /// Whether the game has ended, and who won.
    ///
    /// Workers are scanned in row-major order; the first worker found at
    /// [`WIN_HEIGHT`] wins for its owner, which makes the result
    /// deterministic when several qualify. Failing that, a player with no
    /// worker that can complete a move-then-build loses; `p1` is examined
    /// before `p2`.
    #[must_use]
    pub fn check_game_over(&self, p1: &PlayerId, p2: &PlayerId) -> Option<PlayerId> {
        if let Some(worker) = self.board.workers().iter().find(|(_, (x, y))| {
            self.board
                .cell(*x, *y)
                .is_ok_and(|c| c.height() == WIN_HEIGHT)
        }) {
            return Some(worker.0.owner.clone());
        }

        for (player, opponent) in [(p1, p2), (p2, p1)] {
            if !self.can_act(player) {
                return Some(opponent.clone());
            }
        }
        None
    }

    /// The winner's worker standing at [`WIN_HEIGHT`], if the game was won
    /// by climbing rather than by the opponent getting stuck.
    #[must_use]
    pub fn winning_worker(&self, winner: &PlayerId) -> Option<WorkerId> {
        self.board
            .workers()
            .into_iter()
            .find(|(id, (x, y))| {
                id.owner == *winner
                    && self
                        .board
                        .cell(*x, *y)
                        .is_ok_and(|c| c.height() == WIN_HEIGHT)
            })
            .map(|(id, _)| id)
    }

    /// Whether any of the player's workers can still make a legal move
    /// that leaves at least one legal build afterwards.
    ///
    /// The build is probed on a scratch copy of the board with the
    /// hypothetical move applied, since moving changes which cells the
    /// worker can reach.
    fn can_act(&self, player: &PlayerId) -> bool {
        for (worker, (x, y)) in self.board.workers() {
            if worker.owner != *player {
                continue;
            }

            for (to_x, to_y) in adjacent(x, y) {
                if !self.check_move(player, x, y, to_x, to_y) {
                    continue;
                }

                let direction = Direction::between((x, y), (to_x, to_y))
                    .expect("legal move targets an adjacent cell");
                let mut scratch = self.board.clone();
                scratch
                    .move_worker(&worker, direction)
                    .expect("legal move applies mechanically");

                let probe = RuleChecker::new(&scratch);
                if adjacent(to_x, to_y)
                    .any(|(bx, by)| probe.check_build(player, worker.number, to_x, to_y, bx, by))
                {
                    return true;
                }
            }
        }
        false
    }
}

fn chebyshev_adjacent(x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
    (x1, y1) != (x2, y2) && (x1 - x2).abs() <= 1 && (y1 - y2).abs() <= 1
}
