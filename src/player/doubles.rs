//! Built-in player actors.
//!
//! `StrategyPlayer` and `RandomPlayer` are well-behaved participants; the
//! remaining doubles each exercise one fault path of the referee. The
//! misbehaving ones play correctly up to a configurable move so that games
//! reach the steady phase before breaking, matching how the fault paths
//! occur in the wild.

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;

use super::strategy;
use super::{GameStatus, Player};
use crate::core::{ArenaRng, BuildAction, MoveAction, PlaceAction, PlayerId, QueryBoard};

/// Deterministic well-behaved player: diagonal placement, first surviving
/// move, first legal build.
pub struct StrategyPlayer {
    id: PlayerId,
}

impl StrategyPlayer {
    /// Create a player with the given id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(id),
        }
    }
}

#[async_trait]
impl Player for StrategyPlayer {
    fn id(&self) -> &PlayerId {
        &self.id
    }

    fn set_id(&mut self, id: PlayerId) {
        self.id = id;
    }

    async fn get_placement(&mut self, board: QueryBoard, wid: u8) -> Result<PlaceAction> {
        strategy::diagonal_placement(&board, &self.id, wid)
            .ok_or_else(|| anyhow!("no legal placement available"))
    }

    async fn get_move(&mut self, board: QueryBoard) -> Result<MoveAction> {
        strategy::surviving_moves(&board, &self.id)
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("no legal move available"))
    }

    async fn get_build(&mut self, board: QueryBoard, wid: u8) -> Result<BuildAction> {
        strategy::legal_builds(&board, &self.id, wid)
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("no legal build available"))
    }

    async fn game_over(&mut self, _status: GameStatus) -> Result<()> {
        Ok(())
    }
}

/// Well-behaved player choosing uniformly among legal actions, seeded for
/// reproducibility.
pub struct RandomPlayer {
    id: PlayerId,
    rng: ArenaRng,
}

impl RandomPlayer {
    /// Create a player with the given id and RNG seed.
    #[must_use]
    pub fn new(id: impl Into<String>, seed: u64) -> Self {
        Self {
            id: PlayerId::new(id),
            rng: ArenaRng::new(seed),
        }
    }
}

#[async_trait]
impl Player for RandomPlayer {
    fn id(&self) -> &PlayerId {
        &self.id
    }

    fn set_id(&mut self, id: PlayerId) {
        self.id = id;
    }

    async fn get_placement(&mut self, board: QueryBoard, wid: u8) -> Result<PlaceAction> {
        // Random placement: any free ground-level cell.
        let mut cells = Vec::new();
        let checker = crate::rules::RuleChecker::new(board.as_board());
        for y in 0..board.height() {
            for x in 0..board.width() {
                if checker.check_place(&self.id, wid, x, y) {
                    cells.push([x, y]);
                }
            }
        }
        let xy = *self
            .rng
            .choose(&cells)
            .ok_or_else(|| anyhow!("no legal placement available"))?;
        Ok(PlaceAction { wid, xy })
    }

    async fn get_move(&mut self, board: QueryBoard) -> Result<MoveAction> {
        let moves = strategy::surviving_moves(&board, &self.id);
        self.rng
            .choose(&moves)
            .cloned()
            .ok_or_else(|| anyhow!("no legal move available"))
    }

    async fn get_build(&mut self, board: QueryBoard, wid: u8) -> Result<BuildAction> {
        let builds = strategy::legal_builds(&board, &self.id, wid);
        self.rng
            .choose(&builds)
            .cloned()
            .ok_or_else(|| anyhow!("no legal build available"))
    }

    async fn game_over(&mut self, _status: GameStatus) -> Result<()> {
        Ok(())
    }
}

/// Plays well, then submits a move with an out-of-bounds source on its
/// configured move number (counted from zero).
pub struct BreakerPlayer {
    id: PlayerId,
    break_on: u32,
    moves_taken: u32,
}

impl BreakerPlayer {
    /// Break on the third move, like the fault it was modeled on.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(id),
            break_on: 2,
            moves_taken: 0,
        }
    }

    /// Break on the given zero-based move number instead.
    #[must_use]
    pub fn breaking_on(mut self, move_number: u32) -> Self {
        self.break_on = move_number;
        self
    }
}

#[async_trait]
impl Player for BreakerPlayer {
    fn id(&self) -> &PlayerId {
        &self.id
    }

    fn set_id(&mut self, id: PlayerId) {
        self.id = id;
    }

    async fn get_placement(&mut self, board: QueryBoard, wid: u8) -> Result<PlaceAction> {
        strategy::diagonal_placement(&board, &self.id, wid)
            .ok_or_else(|| anyhow!("no legal placement available"))
    }

    async fn get_move(&mut self, board: QueryBoard) -> Result<MoveAction> {
        let taken = self.moves_taken;
        self.moves_taken += 1;

        if taken == self.break_on {
            return Ok(MoveAction {
                xy1: [-1, 0],
                xy2: [0, 0],
            });
        }
        strategy::surviving_moves(&board, &self.id)
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("no legal move available"))
    }

    async fn get_build(&mut self, board: QueryBoard, wid: u8) -> Result<BuildAction> {
        strategy::legal_builds(&board, &self.id, wid)
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("no legal build available"))
    }

    async fn game_over(&mut self, _status: GameStatus) -> Result<()> {
        Ok(())
    }
}

/// Plays well, then never answers its configured move request.
///
/// The hang is cooperative (a future that never resolves), which models an
/// unresponsive remote participant without burning a core.
pub struct InfiniteLoopPlayer {
    id: PlayerId,
    hang_on: u32,
    moves_taken: u32,
}

impl InfiniteLoopPlayer {
    /// Hang on the third move.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(id),
            hang_on: 2,
            moves_taken: 0,
        }
    }

    /// Hang on the given zero-based move number instead.
    #[must_use]
    pub fn hanging_on(mut self, move_number: u32) -> Self {
        self.hang_on = move_number;
        self
    }
}

#[async_trait]
impl Player for InfiniteLoopPlayer {
    fn id(&self) -> &PlayerId {
        &self.id
    }

    fn set_id(&mut self, id: PlayerId) {
        self.id = id;
    }

    async fn get_placement(&mut self, board: QueryBoard, wid: u8) -> Result<PlaceAction> {
        strategy::diagonal_placement(&board, &self.id, wid)
            .ok_or_else(|| anyhow!("no legal placement available"))
    }

    async fn get_move(&mut self, board: QueryBoard) -> Result<MoveAction> {
        let taken = self.moves_taken;
        self.moves_taken += 1;

        if taken == self.hang_on {
            std::future::pending::<()>().await;
            unreachable!("pending future never resolves");
        }
        strategy::surviving_moves(&board, &self.id)
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("no legal move available"))
    }

    async fn get_build(&mut self, board: QueryBoard, wid: u8) -> Result<BuildAction> {
        strategy::legal_builds(&board, &self.id, wid)
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("no legal build available"))
    }

    async fn game_over(&mut self, _status: GameStatus) -> Result<()> {
        Ok(())
    }
}

/// Plays well, then returns an error from its configured move request.
pub struct CrashingPlayer {
    id: PlayerId,
    crash_on: u32,
    moves_taken: u32,
}

impl CrashingPlayer {
    /// Crash on the third move.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(id),
            crash_on: 2,
            moves_taken: 0,
        }
    }

    /// Crash on the given zero-based move number instead.
    #[must_use]
    pub fn crashing_on(mut self, move_number: u32) -> Self {
        self.crash_on = move_number;
        self
    }
}

#[async_trait]
impl Player for CrashingPlayer {
    fn id(&self) -> &PlayerId {
        &self.id
    }

    fn set_id(&mut self, id: PlayerId) {
        self.id = id;
    }

    async fn get_placement(&mut self, board: QueryBoard, wid: u8) -> Result<PlaceAction> {
        strategy::diagonal_placement(&board, &self.id, wid)
            .ok_or_else(|| anyhow!("no legal placement available"))
    }

    async fn get_move(&mut self, board: QueryBoard) -> Result<MoveAction> {
        let taken = self.moves_taken;
        self.moves_taken += 1;

        if taken == self.crash_on {
            bail!("simulated runtime crash");
        }
        strategy::surviving_moves(&board, &self.id)
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("no legal move available"))
    }

    async fn get_build(&mut self, board: QueryBoard, wid: u8) -> Result<BuildAction> {
        strategy::legal_builds(&board, &self.id, wid)
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("no legal build available"))
    }

    async fn game_over(&mut self, _status: GameStatus) -> Result<()> {
        Ok(())
    }
}
