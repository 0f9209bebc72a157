//! World configuration and validation.
//!
//! [`WorldConfig`] is the input for [`GridWorld::new`](crate::GridWorld::new).
//! [`validate()`](WorldConfig::validate) checks every structural invariant
//! up front so that construction and reset fail before mutating anything.

use indexmap::map::Entry;
use moor_actors::TargetFilter;
use moor_core::{Agent, AgentMap, ConfigError, DistanceMetric};
use moor_grid::Occupancy;
use moor_state::{LifeConfig, PositionState, ResourceConfig};

use crate::done::DoneCondition;

// ── AttackConfig ───────────────────────────────────────────────────

/// How attacks pick targets and move health.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackConfig {
    /// Range metric. Default: Chebyshev.
    pub metric: DistanceMetric,
    /// Eligible targets. Default: opposing team.
    pub filter: TargetFilter,
    /// Whether the attacker gains the health its target loses. Default: true.
    pub attacker_gain: bool,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            metric: DistanceMetric::Chebyshev,
            filter: TargetFilter::OpposingTeam,
            attacker_gain: true,
        }
    }
}

// ── WorldConfig ────────────────────────────────────────────────────

/// Complete configuration for a [`GridWorld`](crate::GridWorld).
///
/// Start from [`WorldConfig::new`] and override fields with struct update
/// syntax:
///
/// ```
/// use moor_core::Agent;
/// use moor_engine::WorldConfig;
///
/// let config = WorldConfig {
///     agents: vec![Agent::explorer("e", 2, 1).build().unwrap()],
///     seed: 7,
///     ..WorldConfig::new(4, 4)
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct WorldConfig {
    /// Grid rows.
    pub rows: u32,
    /// Grid columns.
    pub cols: u32,
    /// Occupancy model. Default: exclusive.
    pub occupancy: Occupancy,
    /// Seed for placement, resource and attack randomness.
    pub seed: u64,
    /// Agents in iteration order. Ids must be unique.
    pub agents: Vec<Agent>,
    /// Resource field, if the world has one.
    pub resources: Option<ResourceConfig>,
    /// Health decay.
    pub life: LifeConfig,
    /// Attack resolution.
    pub attack: AttackConfig,
    /// Done condition.
    pub done: DoneCondition,
}

impl WorldConfig {
    /// A `rows * cols` world with no agents and default components.
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            occupancy: Occupancy::default(),
            seed: 0,
            agents: Vec::new(),
            resources: None,
            life: LifeConfig::default(),
            attack: AttackConfig::default(),
            done: DoneCondition::default(),
        }
    }

    /// Validate all structural invariants.
    ///
    /// # Errors
    ///
    /// The first of: empty grid, duplicate agent id, invalid resource or
    /// life parameters, out-of-bounds or duplicate initial position, or
    /// too few free cells for random placement.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positions = PositionState::new(self.rows, self.cols, self.occupancy)?;
        let agents = self.agent_map()?;
        if let Some(resources) = &self.resources {
            resources.validate(self.rows, self.cols)?;
        }
        self.life.validate()?;
        positions.validate(&agents)
    }

    /// Key agents by id, rejecting duplicates.
    pub(crate) fn agent_map(&self) -> Result<AgentMap, ConfigError> {
        let mut map = AgentMap::with_capacity(self.agents.len());
        for agent in &self.agents {
            match map.entry(agent.id().clone()) {
                Entry::Occupied(_) => {
                    return Err(ConfigError::DuplicateAgentId {
                        agent: agent.id().clone(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(agent.clone());
                }
            }
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moor_core::{AgentError, Position};

    fn explorer(id: &str) -> Agent {
        Agent::explorer(id, 1, 1).build().unwrap()
    }

    #[test]
    fn default_config_validates() {
        assert!(WorldConfig::new(3, 3).validate().is_ok());
    }

    #[test]
    fn empty_grid_rejected() {
        assert_eq!(
            WorldConfig::new(0, 3).validate(),
            Err(ConfigError::EmptyGrid { rows: 0, cols: 3 })
        );
    }

    #[test]
    fn duplicate_ids_rejected() {
        let config = WorldConfig {
            agents: vec![explorer("a"), explorer("b"), explorer("a")],
            ..WorldConfig::new(3, 3)
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateAgentId { agent: "a".into() })
        );
    }

    #[test]
    fn duplicate_initial_positions_name_both_agents() {
        let wall = |id: &str| Agent::wall(id).initial_position((1, 2)).build().unwrap();
        let config = WorldConfig {
            agents: vec![wall("w1"), wall("w2")],
            ..WorldConfig::new(3, 3)
        };
        let err = config.validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateInitialPosition {
                agent: "w2".into(),
                occupant: "w1".into(),
                position: Position::new(1, 2),
            }
        );
        assert!(err.to_string().contains("w1"));
    }

    #[test]
    fn resource_shape_checked_against_grid() {
        let config = WorldConfig {
            resources: Some(ResourceConfig::fixed(vec![0.5; 8], 0.1)),
            ..WorldConfig::new(3, 3)
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ResourceShape {
                expected: 9,
                actual: 8
            })
        );
    }

    #[test]
    fn overcrowded_world_rejected() {
        let config = WorldConfig {
            agents: (0..5).map(|i| explorer(&format!("e{i}"))).collect(),
            ..WorldConfig::new(2, 2)
        };
        assert!(matches!(config.validate(), Err(ConfigError::GridFull { .. })));
    }

    #[test]
    fn agent_errors_convert() {
        let err: ConfigError = Agent::builder("x").encoding(-1).build().unwrap_err().into();
        assert!(matches!(
            err,
            ConfigError::Agent(AgentError::ReservedEncoding { value: -1, .. })
        ));
    }
}
