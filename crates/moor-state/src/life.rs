//! Agent health bookkeeping.

use moor_core::{Agent, AgentMap, ConfigError};

/// Health parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LifeConfig {
    /// Health lost by each acting agent at the end of every step.
    pub entropy: f64,
}

impl LifeConfig {
    /// Reject an entropy outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.entropy.is_finite() || !(0.0..=1.0).contains(&self.entropy) {
            return Err(ConfigError::InvalidParameter {
                name: "entropy",
                reason: format!("must lie in [0, 1], got {}", self.entropy),
            });
        }
        Ok(())
    }
}

/// Restores and decays health of agents that carry it.
///
/// Agents without the health capability are ignored by every method.
#[derive(Clone, Copy, Debug, Default)]
pub struct LifeState {
    config: LifeConfig,
}

impl LifeState {
    /// Create the component, validating `config`.
    pub fn new(config: LifeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active parameters.
    pub fn config(&self) -> LifeConfig {
        self.config
    }

    /// Restore every agent's health to its initial value.
    pub fn reset(&self, agents: &mut AgentMap) {
        for agent in agents.values_mut() {
            if let Some(initial) = agent.initial_health() {
                agent.set_health(initial);
            }
        }
    }

    /// Add `delta` to the agent's health, clamped into `[0, 1]`.
    ///
    /// Returns the health after the change, `None` if the agent has none.
    pub fn modify_health(&self, agent: &mut Agent, delta: f64) -> Option<f64> {
        let current = agent.health()?;
        agent.set_health(current + delta);
        agent.health()
    }

    /// Subtract the configured entropy from the agent's health.
    pub fn apply_entropy(&self, agent: &mut Agent) -> Option<f64> {
        self.modify_health(agent, -self.config.entropy)
    }
}
