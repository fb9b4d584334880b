//! Round-robin tournament administration.
//!
//! The manager pairs every participant against every later one, runs each
//! pairing as a best-of-N series through a [`Referee`], and records one
//! meet-up per pairing. Participant misbehavior is terminal: the offender
//! is excluded from all future pairings and its past victories are
//! rewritten or voided.

use std::time::Duration;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::Configuration;
use crate::core::{ArenaRng, PlayerId};
use crate::observer::Observer;
use crate::player::Player;
use crate::referee::{GameOver, GameOverCondition, Referee, RefereeConfig};

/// Result of one pairing, possibly rewritten after the fact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetUp {
    winner: PlayerId,
    loser: PlayerId,
    condition: GameOverCondition,
}

impl MeetUp {
    /// Record a pairing result.
    #[must_use]
    pub fn new(winner: PlayerId, loser: PlayerId, condition: GameOverCondition) -> Self {
        Self {
            winner,
            loser,
            condition,
        }
    }

    /// The recorded winner.
    #[must_use]
    pub fn winner(&self) -> &PlayerId {
        &self.winner
    }

    /// The recorded loser.
    #[must_use]
    pub fn loser(&self) -> &PlayerId {
        &self.loser
    }

    /// How the series concluded (or was later reclassified).
    #[must_use]
    pub fn condition(&self) -> GameOverCondition {
        self.condition
    }
}

/// Everything a finished tournament reports.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentResult {
    misbehaved: Vec<PlayerId>,
    meet_ups: Vec<MeetUp>,
}

impl TournamentResult {
    /// Participants that misbehaved, in discovery order.
    #[must_use]
    pub fn misbehaved(&self) -> &[PlayerId] {
        &self.misbehaved
    }

    /// Retained meet-ups, in the order the pairings were attempted.
    #[must_use]
    pub fn meet_ups(&self) -> &[MeetUp] {
        &self.meet_ups
    }

    /// `[winner, loser]` pairs for every retained meet-up.
    #[must_use]
    pub fn standings(&self) -> Vec<[PlayerId; 2]> {
        self.meet_ups
            .iter()
            .map(|m| [m.winner.clone(), m.loser.clone()])
            .collect()
    }
}

/// Tournament tuning knobs.
#[derive(Clone, Copy, Debug)]
pub struct TournamentConfig {
    /// Games per pairing (forced odd by the referee).
    pub series_length: usize,
    /// Per-call time budget, tighter than a friendly game's default.
    pub time_limit: Duration,
    /// Seed for replacement-id generation.
    pub seed: u64,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            series_length: 3,
            time_limit: Duration::from_secs(3),
            seed: 42,
        }
    }
}

impl TournamentConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom series length.
    #[must_use]
    pub fn with_series_length(mut self, series_length: usize) -> Self {
        self.series_length = series_length;
        self
    }

    /// Use a custom per-call time budget.
    #[must_use]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Use a custom seed for replacement-id generation.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Runs a round-robin tournament among an arbitrary number of players.
pub struct TournamentManager {
    /// Actor slots; `None` only while a series borrows the actor.
    actors: Vec<Option<Box<dyn Player>>>,
    /// Authoritative ids, parallel to `actors`, fixed at admission.
    ids: Vec<PlayerId>,
    observers: Vec<Box<dyn Observer>>,
    config: TournamentConfig,
}

impl TournamentManager {
    /// Admit participants and observers from a configuration.
    ///
    /// Ids must be unique and policy-clean (non-empty, ASCII lowercase
    /// alphanumeric). The first participant with a given id keeps it;
    /// collisions and policy violations receive a freshly generated id,
    /// and the participant is told its new name through `set_id`.
    #[must_use]
    pub fn new(mut configuration: impl Configuration, config: TournamentConfig) -> Self {
        let mut actors = configuration.players();
        let observers = configuration.observers();
        assert!(
            actors.len() >= 2,
            "A tournament needs at least two participants"
        );

        let mut rng = ArenaRng::new(config.seed);
        let mut ids = Vec::with_capacity(actors.len());
        let mut seen: FxHashSet<PlayerId> = FxHashSet::default();

        for actor in &mut actors {
            let reported = actor.id().clone();
            let id = if !policy_clean(&reported) || seen.contains(&reported) {
                let fresh = fresh_name(&mut rng, &seen);
                info!(old = %reported, new = %fresh, "renaming participant");
                actor.set_id(fresh.clone());
                fresh
            } else {
                reported
            };
            seen.insert(id.clone());
            ids.push(id);
        }

        Self {
            actors: actors.into_iter().map(Some).collect(),
            ids,
            observers,
            config,
        }
    }

    /// The admitted participant ids, post renaming, in input order.
    #[must_use]
    pub fn participant_ids(&self) -> &[PlayerId] {
        &self.ids
    }

    /// Run the full round robin and report.
    pub async fn run_tournament(mut self) -> TournamentResult {
        let n = self.actors.len();
        info!(participants = n, "starting tournament");

        let mut misbehaved: Vec<PlayerId> = Vec::new();
        let mut meet_ups: Vec<MeetUp> = Vec::new();

        for i in 0..n {
            for j in (i + 1)..n {
                if misbehaved.contains(&self.ids[i]) {
                    break;
                }
                if misbehaved.contains(&self.ids[j]) {
                    continue;
                }

                let outcome = self.run_series(i, j).await;
                debug!(
                    winner = %outcome.winner(),
                    loser = %outcome.loser(),
                    condition = %outcome.condition(),
                    "pairing finished"
                );
                meet_ups.push(MeetUp::new(
                    outcome.winner().clone(),
                    outcome.loser().clone(),
                    outcome.condition(),
                ));

                if !outcome.condition().is_fair() {
                    let offender = outcome.loser().clone();
                    warn!(player = %offender, "participant misbehaved, voiding past wins");
                    void_past_wins(&mut meet_ups, &offender);
                    misbehaved.push(offender);
                }
            }
        }

        info!(
            misbehaved = misbehaved.len(),
            meet_ups = meet_ups.len(),
            "tournament finished"
        );
        TournamentResult {
            misbehaved,
            meet_ups,
        }
    }

    /// Run one pairing through a referee and put the actors back in their
    /// slots afterwards.
    async fn run_series(&mut self, i: usize, j: usize) -> GameOver {
        let a = self.actors[i].take().expect("actor present outside a series");
        let b = self.actors[j].take().expect("actor present outside a series");

        let mut referee = Referee::with_config(
            a,
            b,
            RefereeConfig::new().with_time_limit(self.config.time_limit),
        );
        for observer in self.observers.drain(..) {
            referee.add_observer(observer);
        }

        let outcome = referee.run_games(self.config.series_length).await;

        let (actors, observers) = referee.into_parts();
        self.observers = observers;
        // Seat order may have flipped during the series; restore by id,
        // falling back to the open slot if an actor mangled its own id.
        for actor in actors {
            if self.actors[i].is_none() && actor.id() == &self.ids[i] {
                self.actors[i] = Some(actor);
            } else if self.actors[j].is_none() && actor.id() == &self.ids[j] {
                self.actors[j] = Some(actor);
            } else if self.actors[i].is_none() {
                self.actors[i] = Some(actor);
            } else {
                self.actors[j] = Some(actor);
            }
        }
        outcome
    }
}

/// Rewrite history after a participant breaks: past fair wins flip to the
/// opponent under `LoserBrokeInTournament`; past unfair wins, earned only
/// through the other side's breakage, are dropped as no contest.
fn void_past_wins(meet_ups: &mut Vec<MeetUp>, offender: &PlayerId) {
    meet_ups.retain_mut(|m| {
        if &m.winner != offender {
            return true;
        }
        if m.condition.is_fair() {
            std::mem::swap(&mut m.winner, &mut m.loser);
            m.condition = GameOverCondition::LoserBrokeInTournament;
            true
        } else {
            false
        }
    });
}

fn policy_clean(id: &PlayerId) -> bool {
    !id.as_str().is_empty()
        && id
            .as_str()
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}

fn fresh_name(rng: &mut ArenaRng, taken: &FxHashSet<PlayerId>) -> PlayerId {
    loop {
        let candidate = PlayerId::new(rng.lowercase_name(8));
        if !taken.contains(&candidate) {
            return candidate;
        }
    }
}
