//! End-to-end tournament runs: fair round robins, mid-series faults, and
//! retroactive misbehavior propagation.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use santorini_arena::config::StandardConfiguration;
use santorini_arena::core::{BuildAction, MoveAction, PlaceAction, PlayerId, QueryBoard};
use santorini_arena::player::{strategy, GameStatus, Player, StrategyPlayer};
use santorini_arena::referee::GameOverCondition;
use santorini_arena::tournament::{TournamentConfig, TournamentManager};

fn config() -> TournamentConfig {
    TournamentConfig::new().with_time_limit(Duration::from_millis(200))
}

fn manager(players: Vec<Box<dyn Player>>) -> TournamentManager {
    TournamentManager::new(StandardConfiguration::new(players, Vec::new()), config())
}

/// Plays legally but refuses moves that would climb to the winning
/// height, so it loses every fair game eventually.
struct TimidPlayer {
    id: PlayerId,
}

impl TimidPlayer {
    fn new(id: &str) -> Self {
        Self {
            id: PlayerId::new(id),
        }
    }
}

#[async_trait]
impl Player for TimidPlayer {
    fn id(&self) -> &PlayerId {
        &self.id
    }

    fn set_id(&mut self, id: PlayerId) {
        self.id = id;
    }

    async fn get_placement(&mut self, board: QueryBoard, wid: u8) -> Result<PlaceAction> {
        strategy::diagonal_placement(&board, &self.id, wid)
            .ok_or_else(|| anyhow::anyhow!("no legal placement available"))
    }

    async fn get_move(&mut self, board: QueryBoard) -> Result<MoveAction> {
        let moves = strategy::surviving_moves(&board, &self.id);
        moves
            .iter()
            .find(|mv| {
                board
                    .height_at(mv.xy2[0], mv.xy2[1])
                    .map(|h| h < 3)
                    .unwrap_or(false)
            })
            .or_else(|| moves.first())
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no legal move available"))
    }

    async fn get_build(&mut self, board: QueryBoard, wid: u8) -> Result<BuildAction> {
        strategy::legal_builds(&board, &self.id, wid)
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("no legal build available"))
    }

    async fn game_over(&mut self, _status: GameStatus) -> Result<()> {
        Ok(())
    }
}

/// Plays cleanly through its first `fair_games` games, then breaks, by
/// submitting an out-of-bounds move, or by hanging if `sleeper` built it.
struct LateBreaker {
    inner: StrategyPlayer,
    fair_games: u32,
    games_finished: u32,
    hangs: bool,
}

impl LateBreaker {
    fn new(id: &str, fair_games: u32) -> Self {
        Self {
            inner: StrategyPlayer::new(id),
            fair_games,
            games_finished: 0,
            hangs: false,
        }
    }

    fn sleeper(id: &str, fair_games: u32) -> Self {
        Self {
            hangs: true,
            ..Self::new(id, fair_games)
        }
    }
}

#[async_trait]
impl Player for LateBreaker {
    fn id(&self) -> &PlayerId {
        self.inner.id()
    }

    fn set_id(&mut self, id: PlayerId) {
        self.inner.set_id(id);
    }

    async fn get_placement(&mut self, board: QueryBoard, wid: u8) -> Result<PlaceAction> {
        self.inner.get_placement(board, wid).await
    }

    async fn get_move(&mut self, board: QueryBoard) -> Result<MoveAction> {
        if self.games_finished >= self.fair_games {
            if self.hangs {
                std::future::pending::<()>().await;
            }
            return Ok(MoveAction {
                xy1: [-1, 0],
                xy2: [0, 0],
            });
        }
        self.inner.get_move(board).await
    }

    async fn get_build(&mut self, board: QueryBoard, wid: u8) -> Result<BuildAction> {
        self.inner.get_build(board, wid).await
    }

    async fn game_over(&mut self, status: GameStatus) -> Result<()> {
        self.games_finished += 1;
        self.inner.game_over(status).await
    }
}

/// Scenario: three participants, all fair, with the middle one too timid
/// to ever win. Nobody misbehaves and every pairing is recorded.
#[tokio::test]
async fn test_fair_round_robin() {
    let manager = manager(vec![
        Box::new(StrategyPlayer::new("a")),
        Box::new(TimidPlayer::new("b")),
        Box::new(StrategyPlayer::new("c")),
    ]);

    let result = manager.run_tournament().await;

    assert!(result.misbehaved().is_empty());
    assert_eq!(result.meet_ups().len(), 3);
    for meet_up in result.meet_ups() {
        assert_eq!(meet_up.condition(), GameOverCondition::FairGame);
    }

    // b never beats anyone; the first-listed strategy player takes the
    // a-vs-c series on first-mover tempo.
    assert_eq!(
        result.standings(),
        vec![
            [PlayerId::new("a"), PlayerId::new("b")],
            [PlayerId::new("a"), PlayerId::new("c")],
            [PlayerId::new("c"), PlayerId::new("b")],
        ]
    );
}

/// Scenario: a participant wins game 1 of a series, then its opponent
/// times out in game 2. Only the series outcome reaches the record, no
/// game-level result leaks into the tournament report.
#[tokio::test]
async fn test_mid_series_timeout_records_only_the_series() {
    let manager = manager(vec![
        Box::new(StrategyPlayer::new("x")),
        Box::new(LateBreaker::sleeper("y", 1)),
    ]);

    let result = manager.run_tournament().await;

    assert_eq!(result.misbehaved(), &[PlayerId::new("y")]);
    assert_eq!(result.meet_ups().len(), 1);

    let meet_up = &result.meet_ups()[0];
    assert_eq!(meet_up.winner(), &PlayerId::new("x"));
    assert_eq!(meet_up.loser(), &PlayerId::new("y"));
    assert_eq!(meet_up.condition(), GameOverCondition::Timeout);
}

/// Scenario: a participant wins its first series fairly, then breaks in
/// its second. The earlier win flips to the opponent and is reclassified.
#[tokio::test]
async fn test_late_breakage_rewrites_past_wins() {
    // b wins its series against a (first-mover tempo, breaking only after
    // the three games of that series), then breaks against c.
    let manager = manager(vec![
        Box::new(LateBreaker::new("b", 3)),
        Box::new(StrategyPlayer::new("a")),
        Box::new(StrategyPlayer::new("c")),
    ]);

    let result = manager.run_tournament().await;

    assert_eq!(result.misbehaved(), &[PlayerId::new("b")]);
    assert_eq!(result.meet_ups().len(), 3);

    // The (b, a) series b won fairly is now a win for a.
    let rewritten = &result.meet_ups()[0];
    assert_eq!(rewritten.winner(), &PlayerId::new("a"));
    assert_eq!(rewritten.loser(), &PlayerId::new("b"));
    assert_eq!(
        rewritten.condition(),
        GameOverCondition::LoserBrokeInTournament
    );

    // The series where b broke stands as c's win.
    let breaking = &result.meet_ups()[1];
    assert_eq!(breaking.winner(), &PlayerId::new("c"));
    assert_eq!(breaking.loser(), &PlayerId::new("b"));
    assert_eq!(breaking.condition(), GameOverCondition::InvalidAction);

    // a and c settled their pairing fairly afterwards.
    let fair = &result.meet_ups()[2];
    assert_eq!(fair.condition(), GameOverCondition::FairGame);
    assert_eq!(fair.winner(), &PlayerId::new("a"));
}
