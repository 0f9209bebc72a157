//! Step outcomes and observation bundles.

use indexmap::IndexMap;
use moor_core::{AgentId, TickId};
use moor_obs::ObsWindow;

use crate::metrics::StepMetrics;

/// What one agent's action achieved during a step.
///
/// Each field is `None` when the matching request was absent or the
/// agent lacks the capability.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AgentOutcome {
    /// Amount harvested.
    pub harvested: Option<f64>,
    /// Agent hit by this agent's attack.
    pub attacked: Option<AgentId>,
    /// Whether the requested move succeeded.
    pub moved: Option<bool>,
}

/// Result of a [`GridWorld::step`](crate::GridWorld::step) call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    /// Tick reached by this step.
    pub tick: TickId,
    /// Outcomes of the agents that acted, in action order.
    pub outcomes: IndexMap<AgentId, AgentOutcome>,
    /// Agents that died this step, in order of death.
    pub deaths: Vec<AgentId>,
    /// Action keys naming no agent.
    pub unknown: Vec<AgentId>,
    /// Timing and counters.
    pub metrics: StepMetrics,
}

/// Everything one agent observes.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    /// Occlusion-masked agent encodings, if the agent can see and is on
    /// the grid.
    pub grid: Option<ObsWindow<i32>>,
    /// Resource values, if the agent has a resource view, the world has
    /// resources and the agent is on the grid.
    pub resources: Option<ObsWindow<f64>>,
    /// The agent's own health, if it has health.
    pub health: Option<f64>,
}
