//! Turn orchestration for a single game or best-of-N series.
//!
//! The referee owns the live board for the duration of a game. It prompts
//! the players for their turn specifications, validates every submission
//! through the rule checker, applies the ones that pass, and converts
//! everything else (timeouts, crashes, illegal actions) into a win for
//! the opponent.
//!
//! Per game the machine runs **Init → Steady → Over**: alternating worker
//! placement, then alternating move+build turns until someone wins or
//! breaks. Faults short-circuit through the `Result` plumbing of the phase
//! functions rather than through unwinding.

pub mod game_over;

pub use game_over::{GameOver, GameOverCondition};

use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::core::{Board, BuildAction, Direction, MoveAction, PlaceAction, PlayerId, WorkerId};
use crate::observer::{Observer, ObserverManager};
use crate::player::{GameStatus, GuardedPlayer, Player};
use crate::rules::RuleChecker;

use game_over::BrokenPlayer;

/// Referee tuning knobs.
#[derive(Clone, Copy, Debug)]
pub struct RefereeConfig {
    /// Wall-clock budget for a single call into player or observer code.
    pub time_limit: Duration,
}

impl Default for RefereeConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(10),
        }
    }
}

impl RefereeConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom per-call time budget.
    #[must_use]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }
}

/// Seat-and-worker schedule for the init phase: strict alternation, each
/// player placing worker 0 then worker 1.
const PLACEMENT_ORDER: [(usize, u8); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];

/// Runs games of Santorini between two players.
pub struct Referee {
    players: [GuardedPlayer; 2],
    board: Board,
    observers: ObserverManager,
    config: RefereeConfig,
}

impl Referee {
    /// Create a referee over two actors with the default configuration.
    ///
    /// Panics if the actors share an id; the tournament layer guarantees
    /// uniqueness before a referee ever sees them.
    #[must_use]
    pub fn new(player_1: Box<dyn Player>, player_2: Box<dyn Player>) -> Self {
        Self::with_config(player_1, player_2, RefereeConfig::default())
    }

    /// Create a referee with a custom configuration.
    #[must_use]
    pub fn with_config(
        player_1: Box<dyn Player>,
        player_2: Box<dyn Player>,
        config: RefereeConfig,
    ) -> Self {
        assert!(
            player_1.id() != player_2.id(),
            "Players cannot share an id"
        );
        Self {
            players: [GuardedPlayer::new(player_1), GuardedPlayer::new(player_2)],
            board: Board::new(),
            observers: ObserverManager::new(Vec::new()).with_time_limit(config.time_limit),
            config,
        }
    }

    /// Add a spectator for the series.
    pub fn add_observer(&mut self, observer: Box<dyn Observer>) {
        self.observers.add(observer);
    }

    /// Run a best-of-N series.
    ///
    /// An even `best_of` is bumped to the next odd number so the series
    /// cannot tie. The first mover alternates between games. A single
    /// non-fair game ends the series immediately with that game's outcome:
    /// a misbehaving player forfeits the whole series.
    pub async fn run_games(&mut self, best_of: usize) -> GameOver {
        let best_of = if best_of % 2 == 0 { best_of + 1 } else { best_of };
        info!(
            player_1 = %self.players[0].id(),
            player_2 = %self.players[1].id(),
            best_of,
            "starting series"
        );

        let mut games = Vec::with_capacity(best_of);
        for game_number in 0..best_of {
            let game = self.run_game().await;
            debug!(game_number, winner = %game.winner(), "game finished");

            if !game.condition().is_fair() {
                return game;
            }
            games.push(game);
        }

        let (a, b) = (games[0].winner().clone(), games[0].loser().clone());
        let a_wins = games.iter().filter(|g| g.winner() == &a).count();
        let (winner, loser) = if 2 * a_wins > games.len() {
            (a, b)
        } else {
            (b, a)
        };

        info!(winner = %winner, "series finished");
        GameOver::new(winner, loser, GameOverCondition::FairGame)
    }

    /// Hand back the actors and surviving observers, in whatever seat
    /// order the series left them.
    #[must_use]
    pub fn into_parts(self) -> ([Box<dyn Player>; 2], Vec<Box<dyn Observer>>) {
        let [p1, p2] = self.players;
        (
            [p1.into_actor(), p2.into_actor()],
            self.observers.into_inner(),
        )
    }

    /// Run one game to completion, notify the players, and reset for the
    /// next game of the series.
    async fn run_game(&mut self) -> GameOver {
        let outcome = match self.play_game().await {
            Ok(winner_seat) => GameOver::new(
                self.players[winner_seat].id().clone(),
                self.players[1 - winner_seat].id().clone(),
                GameOverCondition::FairGame,
            ),
            Err(broken) => {
                let loser = self.players[broken.seat].id().clone();
                let winner = self.players[1 - broken.seat].id().clone();
                warn!(player = %loser, condition = %broken.condition, "player broke");
                self.observers.error(&loser, broken.condition).await;
                GameOver::new(winner, loser, broken.condition)
            }
        };

        self.notify_players(&outcome).await;
        self.reset();
        outcome
    }

    async fn play_game(&mut self) -> Result<usize, BrokenPlayer> {
        self.init_phase().await?;
        self.steady_phase().await
    }

    /// Alternating placement of the four workers.
    ///
    /// Any timeout, crash, or invalid placement aborts the game for the
    /// opponent right here.
    async fn init_phase(&mut self) -> Result<(), BrokenPlayer> {
        for (seat, wid) in PLACEMENT_ORDER {
            let action = self.prompt_placement(seat, wid).await?;
            let pid = self.players[seat].id().clone();

            let legal = RuleChecker::new(&self.board).check_place(
                &pid,
                action.wid,
                action.xy[0],
                action.xy[1],
            );
            if !legal {
                return Err(BrokenPlayer {
                    seat,
                    condition: GameOverCondition::InvalidAction,
                });
            }

            self.board
                .place(WorkerId::new(pid, action.wid), action.xy[0], action.xy[1])
                .expect("validated placement applies");
            self.observers.update_state(self.board.query_snapshot()).await;
        }
        Ok(())
    }

    /// Alternating move+build turns until the game ends.
    ///
    /// The cyclic seat index never exhausts; termination comes from the
    /// game-over checks or from a fault. Game over is probed again between
    /// move and build because a climb to the winning height ends the game
    /// before any build happens.
    async fn steady_phase(&mut self) -> Result<usize, BrokenPlayer> {
        let mut seat = 0usize;
        loop {
            if let Some(winner) = self.game_over_winner() {
                self.announce_fair_win(&winner).await;
                return Ok(self.seat_of(&winner));
            }

            let mv = self.prompt_move(seat).await?;
            let worker = self.apply_move(seat, &mv)?;
            self.observers.update_state(self.board.query_snapshot()).await;

            if let Some(winner) = self.game_over_winner() {
                self.announce_fair_win(&winner).await;
                return Ok(self.seat_of(&winner));
            }

            let build = self.prompt_build(seat, worker.number).await?;
            self.apply_build(seat, &worker, &build)?;
            self.observers.update_action(&worker, &mv, &build).await;
            self.observers.update_state(self.board.query_snapshot()).await;

            seat = 1 - seat;
        }
    }

    /// Validate and apply a submitted move, resolving the worker that
    /// moved.
    fn apply_move(&mut self, seat: usize, mv: &MoveAction) -> Result<WorkerId, BrokenPlayer> {
        let pid = self.players[seat].id().clone();
        let legal = RuleChecker::new(&self.board).check_move(
            &pid,
            mv.xy1[0],
            mv.xy1[1],
            mv.xy2[0],
            mv.xy2[1],
        );
        if !legal {
            return Err(BrokenPlayer {
                seat,
                condition: GameOverCondition::InvalidAction,
            });
        }

        // Validation has passed: a mechanical failure from here on is a
        // referee bug, not a player fault.
        let worker = self
            .board
            .cell(mv.xy1[0], mv.xy1[1])
            .expect("validated move source is in bounds")
            .worker_id()
            .cloned()
            .expect("validated move starts at a worker");
        let direction = Direction::between((mv.xy1[0], mv.xy1[1]), (mv.xy2[0], mv.xy2[1]))
            .expect("validated move targets an adjacent cell");
        self.board
            .move_worker(&worker, direction)
            .expect("validated move applies");
        Ok(worker)
    }

    /// Validate and apply a submitted build.
    fn apply_build(
        &mut self,
        seat: usize,
        worker: &WorkerId,
        build: &BuildAction,
    ) -> Result<(), BrokenPlayer> {
        let pid = self.players[seat].id().clone();
        let legal = RuleChecker::new(&self.board).check_build(
            &pid,
            worker.number,
            build.xy1[0],
            build.xy1[1],
            build.xy2[0],
            build.xy2[1],
        );
        if !legal {
            return Err(BrokenPlayer {
                seat,
                condition: GameOverCondition::InvalidAction,
            });
        }

        let direction = Direction::between((build.xy1[0], build.xy1[1]), (build.xy2[0], build.xy2[1]))
            .expect("validated build targets an adjacent cell");
        self.board
            .build(worker, direction)
            .expect("validated build applies");
        Ok(())
    }

    fn game_over_winner(&self) -> Option<PlayerId> {
        RuleChecker::new(&self.board).check_game_over(self.players[0].id(), self.players[1].id())
    }

    /// Tell observers how a fair game ended: a climb win carries the
    /// winning move, a stalemate means the loser gave up.
    async fn announce_fair_win(&mut self, winner: &PlayerId) {
        let climbed = RuleChecker::new(&self.board).winning_worker(winner).is_some();
        let winner_seat = self.seat_of(winner);

        if climbed {
            if let Some((wid, mv)) = self.players[winner_seat].last_move().cloned() {
                self.observers.game_over(winner, &wid, &mv).await;
                return;
            }
        }
        let loser = self.players[1 - winner_seat].id().clone();
        self.observers.give_up(&loser).await;
    }

    /// Deliver win/lose notifications under the usual time budget.
    ///
    /// Failures are swallowed: the outcome is already final and a player
    /// that cannot hear it loses nothing more.
    async fn notify_players(&mut self, outcome: &GameOver) {
        for seat in 0..2 {
            let status = if self.players[seat].id() == outcome.winner() {
                GameStatus::Win
            } else {
                GameStatus::Lose
            };
            let delivered =
                timeout(self.config.time_limit, self.players[seat].game_over(status)).await;
            if !matches!(delivered, Ok(Ok(()))) {
                debug!(player = %self.players[seat].id(), "game over notification not delivered");
            }
        }
    }

    /// Fresh board, cleared histories, reversed seat order for fairness.
    fn reset(&mut self) {
        self.board = Board::new();
        for player in &mut self.players {
            player.reset();
        }
        self.players.swap(0, 1);
    }

    fn seat_of(&self, pid: &PlayerId) -> usize {
        usize::from(self.players[0].id() != pid)
    }

    async fn prompt_placement(
        &mut self,
        seat: usize,
        wid: u8,
    ) -> Result<PlaceAction, BrokenPlayer> {
        let snapshot = self.board.query_snapshot();
        let prompt = self.players[seat].get_placement(snapshot, wid);
        match timeout(self.config.time_limit, prompt).await {
            Ok(Ok(action)) => Ok(action),
            Ok(Err(err)) => {
                debug!(error = %err, "actor crashed during placement");
                Err(BrokenPlayer {
                    seat,
                    condition: GameOverCondition::Crash,
                })
            }
            Err(_) => Err(BrokenPlayer {
                seat,
                condition: GameOverCondition::Timeout,
            }),
        }
    }

    async fn prompt_move(&mut self, seat: usize) -> Result<MoveAction, BrokenPlayer> {
        let snapshot = self.board.query_snapshot();
        let prompt = self.players[seat].get_move(snapshot);
        match timeout(self.config.time_limit, prompt).await {
            Ok(Ok(action)) => Ok(action),
            Ok(Err(err)) => {
                debug!(error = %err, "actor crashed during move");
                Err(BrokenPlayer {
                    seat,
                    condition: GameOverCondition::Crash,
                })
            }
            Err(_) => Err(BrokenPlayer {
                seat,
                condition: GameOverCondition::Timeout,
            }),
        }
    }

    async fn prompt_build(&mut self, seat: usize, wid: u8) -> Result<BuildAction, BrokenPlayer> {
        let snapshot = self.board.query_snapshot();
        let prompt = self.players[seat].get_build(snapshot, wid);
        match timeout(self.config.time_limit, prompt).await {
            Ok(Ok(action)) => Ok(action),
            Ok(Err(err)) => {
                debug!(error = %err, "actor crashed during build");
                Err(BrokenPlayer {
                    seat,
                    condition: GameOverCondition::Crash,
                })
            }
            Err(_) => Err(BrokenPlayer {
                seat,
                condition: GameOverCondition::Timeout,
            }),
        }
    }
}
