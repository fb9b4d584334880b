//! Spectator notifications.
//!
//! Observers are produced-to only: nothing they do can affect a game's
//! outcome. Every notification runs under a deadline, and an observer that
//! errors or times out is silently dropped from the active list.

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::core::{BuildAction, MoveAction, PlayerId, QueryBoard, WorkerId};
use crate::referee::GameOverCondition;

/// Contract for a game spectator.
#[async_trait]
pub trait Observer: Send {
    /// The board changed.
    async fn update_state_of_game(&mut self, board: QueryBoard) -> Result<()>;

    /// A full move+build turn completed.
    async fn update_action(
        &mut self,
        wid: WorkerId,
        mv: MoveAction,
        build: BuildAction,
    ) -> Result<()>;

    /// The named player is stuck and forfeits.
    async fn give_up(&mut self, pid: PlayerId) -> Result<()>;

    /// The named player broke with the given condition.
    async fn error(&mut self, pid: PlayerId, condition: GameOverCondition) -> Result<()>;

    /// The game ended with a winning move by the named player's worker.
    async fn game_over(
        &mut self,
        pid: PlayerId,
        wid: WorkerId,
        winning_move: MoveAction,
    ) -> Result<()>;
}

/// Fan a notification out to every observer, dropping the broken ones.
///
/// The explicit loop form of the original's update helper: each call is
/// awaited under the manager's deadline, and only observers that answered
/// cleanly survive into the next round.
macro_rules! broadcast {
    ($manager:ident, $obs:ident => $call:expr) => {{
        let mut kept = Vec::with_capacity($manager.observers.len());
        for mut $obs in std::mem::take(&mut $manager.observers) {
            match tokio::time::timeout($manager.time_limit, $call).await {
                Ok(Ok(())) => kept.push($obs),
                Ok(Err(err)) => debug!(error = %err, "dropping broken observer"),
                Err(_) => debug!("dropping unresponsive observer"),
            }
        }
        $manager.observers = kept;
    }};
}

/// Owns the observer list for a referee and shields the game from it.
pub struct ObserverManager {
    observers: Vec<Box<dyn Observer>>,
    time_limit: Duration,
}

impl ObserverManager {
    /// Default deadline for a single observer notification.
    pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(10);

    /// Create a manager over the given observers.
    #[must_use]
    pub fn new(observers: Vec<Box<dyn Observer>>) -> Self {
        Self {
            observers,
            time_limit: Self::DEFAULT_TIME_LIMIT,
        }
    }

    /// Use a custom notification deadline.
    #[must_use]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Add another observer.
    pub fn add(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    /// How many observers are still healthy.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether no observers remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Hand the remaining healthy observers back.
    #[must_use]
    pub fn into_inner(self) -> Vec<Box<dyn Observer>> {
        self.observers
    }

    /// Notify observers of the new board state.
    pub async fn update_state(&mut self, board: QueryBoard) {
        broadcast!(self, obs => obs.update_state_of_game(board.clone()));
    }

    /// Notify observers of a completed move+build turn.
    pub async fn update_action(&mut self, wid: &WorkerId, mv: &MoveAction, build: &BuildAction) {
        broadcast!(self, obs => obs.update_action(wid.clone(), mv.clone(), build.clone()));
    }

    /// Notify observers that a player is stuck and forfeits.
    pub async fn give_up(&mut self, pid: &PlayerId) {
        broadcast!(self, obs => obs.give_up(pid.clone()));
    }

    /// Notify observers of a broken player.
    pub async fn error(&mut self, pid: &PlayerId, condition: GameOverCondition) {
        broadcast!(self, obs => obs.error(pid.clone(), condition));
    }

    /// Notify observers of a game won by a winning move.
    pub async fn game_over(&mut self, pid: &PlayerId, wid: &WorkerId, winning_move: &MoveAction) {
        broadcast!(self, obs => obs.game_over(pid.clone(), wid.clone(), winning_move.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Board;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingObserver {
        updates: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Observer for CountingObserver {
        async fn update_state_of_game(&mut self, _board: QueryBoard) -> Result<()> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn update_action(
            &mut self,
            _wid: WorkerId,
            _mv: MoveAction,
            _build: BuildAction,
        ) -> Result<()> {
            Ok(())
        }

        async fn give_up(&mut self, _pid: PlayerId) -> Result<()> {
            Ok(())
        }

        async fn error(&mut self, _pid: PlayerId, _condition: GameOverCondition) -> Result<()> {
            Ok(())
        }

        async fn game_over(
            &mut self,
            _pid: PlayerId,
            _wid: WorkerId,
            _winning_move: MoveAction,
        ) -> Result<()> {
            Ok(())
        }
    }

    struct FailingObserver;

    #[async_trait]
    impl Observer for FailingObserver {
        async fn update_state_of_game(&mut self, _board: QueryBoard) -> Result<()> {
            anyhow::bail!("observer exploded")
        }

        async fn update_action(
            &mut self,
            _wid: WorkerId,
            _mv: MoveAction,
            _build: BuildAction,
        ) -> Result<()> {
            Ok(())
        }

        async fn give_up(&mut self, _pid: PlayerId) -> Result<()> {
            Ok(())
        }

        async fn error(&mut self, _pid: PlayerId, _condition: GameOverCondition) -> Result<()> {
            Ok(())
        }

        async fn game_over(
            &mut self,
            _pid: PlayerId,
            _wid: WorkerId,
            _winning_move: MoveAction,
        ) -> Result<()> {
            Ok(())
        }
    }

    struct HangingObserver;

    #[async_trait]
    impl Observer for HangingObserver {
        async fn update_state_of_game(&mut self, _board: QueryBoard) -> Result<()> {
            std::future::pending::<()>().await;
            unreachable!()
        }

        async fn update_action(
            &mut self,
            _wid: WorkerId,
            _mv: MoveAction,
            _build: BuildAction,
        ) -> Result<()> {
            Ok(())
        }

        async fn give_up(&mut self, _pid: PlayerId) -> Result<()> {
            Ok(())
        }

        async fn error(&mut self, _pid: PlayerId, _condition: GameOverCondition) -> Result<()> {
            Ok(())
        }

        async fn game_over(
            &mut self,
            _pid: PlayerId,
            _wid: WorkerId,
            _winning_move: MoveAction,
        ) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_healthy_observer_survives_updates() {
        let updates = Arc::new(AtomicUsize::new(0));
        let mut manager = ObserverManager::new(vec![Box::new(CountingObserver {
            updates: updates.clone(),
        })]);

        manager.update_state(Board::new().query_snapshot()).await;
        manager.update_state(Board::new().query_snapshot()).await;

        assert_eq!(manager.len(), 1);
        assert_eq!(updates.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failing_observer_is_dropped() {
        let updates = Arc::new(AtomicUsize::new(0));
        let mut manager = ObserverManager::new(vec![
            Box::new(FailingObserver),
            Box::new(CountingObserver {
                updates: updates.clone(),
            }),
        ]);

        manager.update_state(Board::new().query_snapshot()).await;

        // The failure affected only the broken observer.
        assert_eq!(manager.len(), 1);
        assert_eq!(updates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_hanging_observer_is_dropped() {
        let mut manager = ObserverManager::new(vec![Box::new(HangingObserver)])
            .with_time_limit(Duration::from_millis(20));

        manager.update_state(Board::new().query_snapshot()).await;

        assert!(manager.is_empty());
    }
}
