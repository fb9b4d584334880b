//! Tournament configuration.
//!
//! The tournament manager only needs two things from a configuration: the
//! participants and the observers. Where those come from (a static list,
//! a parsed JSON document, a socket handshake) is the configuration's
//! business.

use serde::{Deserialize, Serialize};

use crate::observer::Observer;
use crate::player::{BreakerPlayer, InfiniteLoopPlayer, Player, StrategyPlayer};

/// Source of participants and observers for a tournament.
///
/// Both methods drain: a configuration is consulted once, at admission.
pub trait Configuration {
    /// Hand over the participants.
    fn players(&mut self) -> Vec<Box<dyn Player>>;

    /// Hand over the observers.
    fn observers(&mut self) -> Vec<Box<dyn Observer>>;
}

/// Configuration over prebuilt player and observer lists.
#[derive(Default)]
pub struct StandardConfiguration {
    players: Vec<Box<dyn Player>>,
    observers: Vec<Box<dyn Observer>>,
}

impl StandardConfiguration {
    /// Create a configuration from prebuilt lists.
    #[must_use]
    pub fn new(players: Vec<Box<dyn Player>>, observers: Vec<Box<dyn Observer>>) -> Self {
        Self { players, observers }
    }

    /// Create a configuration by instantiating declarative player specs.
    #[must_use]
    pub fn from_specs(specs: &[PlayerSpec]) -> Self {
        Self {
            players: specs.iter().map(PlayerSpec::build).collect(),
            observers: Vec::new(),
        }
    }
}

impl Configuration for StandardConfiguration {
    fn players(&mut self) -> Vec<Box<dyn Player>> {
        std::mem::take(&mut self.players)
    }

    fn observers(&mut self) -> Vec<Box<dyn Observer>> {
        std::mem::take(&mut self.observers)
    }
}

/// Which built-in actor a declarative spec names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    /// Well-behaved deterministic player.
    Good,
    /// Submits an illegal action on its third move.
    Breaker,
    /// Stops answering on its third move.
    Infinite,
}

/// Declarative description of one participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    /// Which built-in actor to instantiate.
    pub kind: PlayerKind,
    /// The participant's self-reported name.
    pub name: String,
}

impl PlayerSpec {
    /// Instantiate the described actor.
    #[must_use]
    pub fn build(&self) -> Box<dyn Player> {
        match self.kind {
            PlayerKind::Good => Box::new(StrategyPlayer::new(self.name.as_str())),
            PlayerKind::Breaker => Box::new(BreakerPlayer::new(self.name.as_str())),
            PlayerKind::Infinite => Box::new(InfiniteLoopPlayer::new(self.name.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specs_parse_from_json() {
        let specs: Vec<PlayerSpec> = serde_json::from_str(
            r#"[
                {"kind": "good", "name": "alice"},
                {"kind": "breaker", "name": "mallory"},
                {"kind": "infinite", "name": "sleepy"}
            ]"#,
        )
        .unwrap();

        assert_eq!(specs.len(), 3);
        assert_eq!(specs[0].kind, PlayerKind::Good);
        assert_eq!(specs[1].kind, PlayerKind::Breaker);
        assert_eq!(specs[2].name, "sleepy");
    }

    #[test]
    fn test_from_specs_builds_named_players() {
        let mut configuration = StandardConfiguration::from_specs(&[
            PlayerSpec {
                kind: PlayerKind::Good,
                name: "alice".into(),
            },
            PlayerSpec {
                kind: PlayerKind::Breaker,
                name: "mallory".into(),
            },
        ]);

        let players = configuration.players();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].id().as_str(), "alice");
        assert_eq!(players[1].id().as_str(), "mallory");
        assert!(configuration.observers().is_empty());
    }

    #[test]
    fn test_configuration_drains_once() {
        let mut configuration = StandardConfiguration::from_specs(&[
            PlayerSpec {
                kind: PlayerKind::Good,
                name: "alice".into(),
            },
            PlayerSpec {
                kind: PlayerKind::Good,
                name: "bob".into(),
            },
        ]);

        assert_eq!(configuration.players().len(), 2);
        assert!(configuration.players().is_empty());
    }
}
