//! Rule validation for places, moves, builds, and game termination.

pub mod checker;

pub use checker::{RuleChecker, MAX_HEIGHT, MAX_WORKERS, WIN_HEIGHT, WORKERS_PER_PLAYER};
