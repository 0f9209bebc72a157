//! Attack target selection.

use crate::action::Action;
use moor_core::{Agent, AgentId, AgentMap, DistanceMetric};
use rand::Rng;

/// Which agents an attacker may target.
///
/// Every filter also requires the target to be another agent that has
/// health, is alive and is on the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TargetFilter {
    /// Agents on a different team. An attacker without a team may target
    /// anyone; a target without a team is always eligible.
    #[default]
    OpposingTeam,
    /// Any living agent.
    Any,
}

impl TargetFilter {
    fn admits(self, attacker: &Agent, target: &Agent) -> bool {
        match self {
            TargetFilter::OpposingTeam => match (attacker.team(), target.team()) {
                (Some(a), Some(t)) => a != t,
                _ => true,
            },
            TargetFilter::Any => true,
        }
    }
}

/// Resolves `attack` requests to a target.
///
/// Candidates are scanned in agent insertion order and the first eligible
/// one within `attack.range` under `metric` is chosen. The actor only
/// picks the target; applying damage is up to the caller.
///
/// # Draw sequence
///
/// No random draw unless an eligible target exists and the attacker's
/// accuracy is below 1, in which case exactly one
/// [`random_bool`](Rng::random_bool) decides whether the attack lands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttackActor {
    metric: DistanceMetric,
    filter: TargetFilter,
}

impl AttackActor {
    /// Create an actor with the given range metric and target filter.
    pub fn new(metric: DistanceMetric, filter: TargetFilter) -> Self {
        Self { metric, filter }
    }

    /// The range metric.
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// The target filter.
    pub fn filter(&self) -> TargetFilter {
        self.filter
    }

    /// Resolve `action.attack` for `attacker` against `agents`.
    ///
    /// Returns the id of the agent hit, or `None` when no attack was
    /// requested, the attacker cannot attack or is not placed, no eligible
    /// target is in range, or the accuracy draw misses.
    pub fn process<R: Rng + ?Sized>(
        &self,
        attacker: &Agent,
        action: &Action,
        agents: &AgentMap,
        rng: &mut R,
    ) -> Option<AgentId> {
        if !action.attack {
            return None;
        }
        let profile = attacker.attack()?;
        let origin = attacker.position()?;

        let target = agents.values().find(|t| {
            t.id() != attacker.id()
                && t.health().is_some()
                && t.is_alive()
                && self.filter.admits(attacker, t)
                && t
                    .position()
                    .is_some_and(|p| self.metric.within(p - origin, profile.range))
        })?;

        if profile.accuracy < 1.0 && !rng.random_bool(profile.accuracy) {
            return None;
        }
        Some(target.id().clone())
    }
}
