//! Episode termination conditions.

use indexmap::IndexSet;
use moor_core::{Agent, AgentMap};

/// When agents and the episode are done.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DoneCondition {
    /// Nothing is ever done.
    #[default]
    Never,
    /// An agent is done once dead. The episode is done once every agent
    /// with health is dead (never, if no agent has health).
    Dead,
    /// An agent is done once dead. The episode is done once at most one
    /// team still has a living member.
    TeamDead,
}

impl DoneCondition {
    /// Whether `agent` is done.
    pub fn agent_done(self, agent: &Agent) -> bool {
        match self {
            DoneCondition::Never => false,
            DoneCondition::Dead | DoneCondition::TeamDead => !agent.is_alive(),
        }
    }

    /// Whether the episode is done.
    pub fn all_done(self, agents: &AgentMap) -> bool {
        match self {
            DoneCondition::Never => false,
            DoneCondition::Dead => {
                let mut mortal = agents.values().filter(|a| a.health().is_some()).peekable();
                mortal.peek().is_some() && mortal.all(|a| !a.is_alive())
            }
            DoneCondition::TeamDead => {
                let living: IndexSet<u32> = agents
                    .values()
                    .filter(|a| a.is_alive())
                    .filter_map(Agent::team)
                    .collect();
                living.len() <= 1
            }
        }
    }
}
