//! # santorini-arena
//!
//! A referee-mediated game authority for two-player Santorini, with
//! round-robin tournament support.
//!
//! ## Design Principles
//!
//! 1. **Authority Owns the Board**: the referee holds the only mutable
//!    board. Players, rule checkers, and observers see deep-copy snapshots,
//!    so no participant can mutate authoritative state out-of-band.
//!
//! 2. **Validate Everything, Trust Nothing**: every action an actor
//!    submits goes through the rule checker; every call into actor code
//!    runs under a wall-clock deadline. Timeouts, crashes, and illegal
//!    actions all convert into a win for the opponent.
//!
//! 3. **Misbehavior Is Terminal**: a participant that breaks forfeits the
//!    series, is excluded from the rest of the tournament, and has its
//!    past victories rewritten or voided.
//!
//! ## Modules
//!
//! - `core`: cells, ids, directions, board, snapshots, actions, wire
//!   representation, deterministic RNG
//! - `rules`: place/move/build validation and game-over detection
//! - `player`: the actor contract, the guarded wrapper, built-in doubles
//! - `referee`: per-game orchestration, timeouts, fault handling, series
//! - `observer`: spectator notifications, isolated from game outcomes
//! - `tournament`: round-robin pairing and misbehavior propagation
//! - `config`: participant/observer sourcing

pub mod config;
pub mod core;
pub mod observer;
pub mod player;
pub mod referee;
pub mod rules;
pub mod tournament;

// Re-export commonly used types
pub use crate::core::{
    Action, ArenaRng, Board, BoardError, BuildAction, Cell, CellRepr, Direction, MoveAction,
    PlaceAction, PlayerId, QueryBoard, ReprError, WorkerId,
};

pub use crate::rules::{RuleChecker, MAX_HEIGHT, MAX_WORKERS, WIN_HEIGHT, WORKERS_PER_PLAYER};

pub use crate::player::{
    BreakerPlayer, CrashingPlayer, GameStatus, GuardedPlayer, InfiniteLoopPlayer, Player,
    RandomPlayer, StrategyPlayer,
};

pub use crate::referee::{GameOver, GameOverCondition, Referee, RefereeConfig};

pub use crate::observer::{Observer, ObserverManager};

pub use crate::tournament::{MeetUp, TournamentConfig, TournamentManager, TournamentResult};

pub use crate::config::{Configuration, PlayerKind, PlayerSpec, StandardConfiguration};
