//! Minimal decision support for the built-in doubles.
//!
//! These are generators, not a strategy library: they enumerate rule-legal
//! actions in deterministic scan order so the doubles can pick one. Real
//! competitive strategies live with the participants, behind the
//! [`Player`](super::Player) interface.

use crate::core::{adjacent, BuildAction, Direction, MoveAction, PlaceAction, PlayerId, QueryBoard, WorkerId};
use crate::rules::RuleChecker;

/// Placement along the main diagonal: the first free ground-level cell on
/// it, falling back to row-major scan if the diagonal is exhausted.
#[must_use]
pub fn diagonal_placement(board: &QueryBoard, player: &PlayerId, wid: u8) -> Option<PlaceAction> {
    let checker = RuleChecker::new(board.as_board());
    let step = Direction::S.compose(Direction::E);

    let (mut x, mut y) = (0, 0);
    while x < board.width() && y < board.height() {
        if checker.check_place(player, wid, x, y) {
            return Some(PlaceAction { wid, xy: [x, y] });
        }
        let next = step(x, y);
        x = next.0;
        y = next.1;
    }

    for y in 0..board.height() {
        for x in 0..board.width() {
            if checker.check_place(player, wid, x, y) {
                return Some(PlaceAction { wid, xy: [x, y] });
            }
        }
    }
    None
}

/// All legal moves for the player's workers, in scan order.
#[must_use]
pub fn legal_moves(board: &QueryBoard, player: &PlayerId) -> Vec<MoveAction> {
    let checker = RuleChecker::new(board.as_board());
    let mut moves = Vec::new();

    for worker in board.workers_of(player) {
        let (x, y) = board
            .worker_position(&worker)
            .expect("listed worker has a position");
        for (to_x, to_y) in adjacent(x, y) {
            if checker.check_move(player, x, y, to_x, to_y) {
                moves.push(MoveAction {
                    xy1: [x, y],
                    xy2: [to_x, to_y],
                });
            }
        }
    }
    moves
}

/// Legal moves that still leave the moved worker a legal build, probed on
/// a scratch board with the move applied.
///
/// A move without a follow-up build loses the game, so well-behaved
/// doubles restrict themselves to these.
#[must_use]
pub fn surviving_moves(board: &QueryBoard, player: &PlayerId) -> Vec<MoveAction> {
    legal_moves(board, player)
        .into_iter()
        .filter(|mv| leaves_a_build(board, player, mv))
        .collect()
}

/// All legal builds for the player's worker `wid` from its current
/// position, in scan order.
#[must_use]
pub fn legal_builds(board: &QueryBoard, player: &PlayerId, wid: u8) -> Vec<BuildAction> {
    let checker = RuleChecker::new(board.as_board());
    let worker = WorkerId::new(player.clone(), wid);
    let Ok((x, y)) = board.worker_position(&worker) else {
        return Vec::new();
    };

    adjacent(x, y)
        .filter(|&(to_x, to_y)| checker.check_build(player, wid, x, y, to_x, to_y))
        .map(|(to_x, to_y)| BuildAction {
            xy1: [x, y],
            xy2: [to_x, to_y],
        })
        .collect()
}

fn leaves_a_build(board: &QueryBoard, player: &PlayerId, mv: &MoveAction) -> bool {
    let worker = board
        .cell(mv.xy1[0], mv.xy1[1])
        .ok()
        .and_then(|c| c.worker_id().cloned())
        .expect("legal move starts at a worker");
    let direction = Direction::between((mv.xy1[0], mv.xy1[1]), (mv.xy2[0], mv.xy2[1]))
        .expect("legal move targets an adjacent cell");

    let mut scratch = board.as_board().clone();
    scratch
        .move_worker(&worker, direction)
        .expect("legal move applies mechanically");

    let probe = RuleChecker::new(&scratch);
    adjacent(mv.xy2[0], mv.xy2[1])
        .any(|(bx, by)| probe.check_build(player, worker.number, mv.xy2[0], mv.xy2[1], bx, by))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, Cell};

    fn pid(name: &str) -> PlayerId {
        PlayerId::new(name)
    }

    fn worker(name: &str, number: u8) -> WorkerId {
        WorkerId::new(pid(name), number)
    }

    #[test]
    fn test_diagonal_placement_walks_the_diagonal() {
        let board = Board::new();
        let snapshot = board.query_snapshot();

        let first = diagonal_placement(&snapshot, &pid("a"), 0).unwrap();
        assert_eq!(first.xy, [0, 0]);

        let mut board = Board::new();
        board.place(worker("b", 0), 0, 0).unwrap();
        let snapshot = board.query_snapshot();

        let second = diagonal_placement(&snapshot, &pid("a"), 0).unwrap();
        assert_eq!(second.xy, [1, 1]);
    }

    #[test]
    fn test_diagonal_placement_falls_back_to_scan() {
        // Raised terrain blocks the whole diagonal; the first legal cell
        // in row-major order is (1, 0).
        let mut rows = vec![vec![Cell::Height(0); 6]; 6];
        for i in 0..6 {
            rows[i][i] = Cell::Height(1);
        }
        let board = Board::from_rows(rows);
        let snapshot = board.query_snapshot();

        let action = diagonal_placement(&snapshot, &pid("a"), 0).unwrap();
        assert_eq!(action.xy, [1, 0]);
    }

    #[test]
    fn test_diagonal_placement_none_on_full_board() {
        let mut board = Board::new();
        for i in 0..4 {
            let name = ["a", "a", "b", "b"][i as usize];
            let number = [0, 1, 0, 1][i as usize];
            board.place(worker(name, number), i, i).unwrap();
        }
        let snapshot = board.query_snapshot();

        assert_eq!(diagonal_placement(&snapshot, &pid("c"), 0), None);
    }

    #[test]
    fn test_legal_moves_scan_order() {
        let mut board = Board::new();
        board.place(worker("a", 0), 0, 0).unwrap();
        let snapshot = board.query_snapshot();

        let moves = legal_moves(&snapshot, &pid("a"));
        // Corner worker has exactly three neighbors.
        assert_eq!(moves.len(), 3);
        assert!(moves.iter().all(|m| m.xy1 == [0, 0]));
    }

    #[test]
    fn test_surviving_moves_filters_dead_ends() {
        // b on a capped tower: stepping down to (1,0) leaves no build, so
        // the move is legal but not surviving.
        let mut rows = vec![vec![Cell::Height(0); 6]; 6];
        rows[0][0] = Cell::Worker {
            id: worker("b", 0),
            height: 4,
        };
        rows[0][1] = Cell::Height(3);
        rows[0][2] = Cell::Height(4);
        rows[1][0] = Cell::Height(4);
        rows[1][1] = Cell::Height(4);
        rows[1][2] = Cell::Height(4);
        let board = Board::from_rows(rows);
        let snapshot = board.query_snapshot();

        assert_eq!(legal_moves(&snapshot, &pid("b")).len(), 1);
        assert!(surviving_moves(&snapshot, &pid("b")).is_empty());
    }

    #[test]
    fn test_legal_builds_from_current_position() {
        let mut board = Board::new();
        board.place(worker("a", 0), 2, 2).unwrap();
        board.place(worker("b", 0), 3, 2).unwrap();
        let snapshot = board.query_snapshot();

        let builds = legal_builds(&snapshot, &pid("a"), 0);
        // Eight neighbors minus the one occupied by b.
        assert_eq!(builds.len(), 7);
        assert!(builds.iter().all(|b| b.xy1 == [2, 2]));
        assert!(builds.iter().all(|b| b.xy2 != [3, 2]));
    }

    #[test]
    fn test_legal_builds_unknown_worker() {
        let board = Board::new();
        let snapshot = board.query_snapshot();

        assert!(legal_builds(&snapshot, &pid("a"), 0).is_empty());
    }
}
