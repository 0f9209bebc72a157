//! The turn-based grid world.

use std::time::Instant;

use indexmap::IndexMap;
use moor_actors::{Action, AttackActor, HarvestActor, MoveActor};
use moor_core::{Agent, AgentId, AgentMap, ConfigError, LookupError, Position, TickId};
use moor_grid::Grid;
use moor_obs::{GridObserver, ObsWindow, ResourceObserver};
use moor_state::{LifeState, PositionState, ResourceState};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace, warn};

use crate::config::WorldConfig;
use crate::done::DoneCondition;
use crate::metrics::StepMetrics;
use crate::report::{AgentOutcome, Observation, StepReport};

/// Actions for one step, resolved in iteration order.
pub type Actions = IndexMap<AgentId, Action>;

// Compile-time assertion: GridWorld is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<GridWorld>();
    }
};

/// A grid world with agents, optional resources and health.
///
/// Created from a [`WorldConfig`] via [`new()`](GridWorld::new), which
/// also performs the first [`reset`](GridWorld::reset) with the configured
/// seed. All randomness comes from one [`ChaCha8Rng`] owned by the world,
/// so a given seed and action sequence always reproduce the same episode.
///
/// # Example
///
/// ```
/// use moor_actors::{Action, Direction};
/// use moor_core::Agent;
/// use moor_engine::{Actions, GridWorld, WorldConfig};
///
/// let config = WorldConfig {
///     agents: vec![Agent::explorer("e", 2, 1).initial_position((1, 1)).build().unwrap()],
///     ..WorldConfig::new(3, 3)
/// };
/// let mut world = GridWorld::new(config).unwrap();
///
/// let mut actions = Actions::new();
/// actions.insert("e".into(), Action::moving(Direction::East));
/// let report = world.step(&actions);
/// assert_eq!(report.outcomes["e"].moved, Some(true));
/// assert_eq!(world.get_obs("e").unwrap().grid.unwrap().side(), 5);
/// ```
pub struct GridWorld {
    agents: AgentMap,
    positions: PositionState,
    resources: Option<ResourceState>,
    life: LifeState,
    attack: AttackActor,
    attacker_gain: bool,
    done: DoneCondition,
    rng: ChaCha8Rng,
    seed: u64,
    tick: TickId,
    last_metrics: StepMetrics,
}

impl GridWorld {
    /// Validate `config`, build every component and reset with `config.seed`.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            warn!(error = %e, "rejected world configuration");
            return Err(e);
        }
        let agents = config.agent_map()?;
        let positions = PositionState::new(config.rows, config.cols, config.occupancy)?;
        let resources = config
            .resources
            .map(|r| ResourceState::new(config.rows, config.cols, r))
            .transpose()?;
        let life = LifeState::new(config.life)?;

        let mut world = Self {
            agents,
            positions,
            resources,
            life,
            attack: AttackActor::new(config.attack.metric, config.attack.filter),
            attacker_gain: config.attack.attacker_gain,
            done: config.done,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            seed: config.seed,
            tick: TickId::default(),
            last_metrics: StepMetrics::default(),
        };
        world.reset(config.seed)?;
        Ok(world)
    }

    /// Start a new episode with `seed`.
    ///
    /// Restores health, places agents (fixed positions first, then random)
    /// and resets the resource field, in that order, drawing from a fresh
    /// generator seeded with `seed`. Fails before changing anything if the
    /// agents cannot be placed.
    pub fn reset(&mut self, seed: u64) -> Result<(), ConfigError> {
        if let Err(e) = self.positions.validate(&self.agents) {
            warn!(error = %e, "reset rejected");
            return Err(e);
        }
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.seed = seed;
        self.life.reset(&mut self.agents);
        self.positions.reset(&mut self.agents, &mut self.rng)?;
        if let Some(resources) = &mut self.resources {
            resources.reset(&mut self.rng);
        }
        self.tick = TickId::default();
        self.last_metrics = StepMetrics::default();
        debug!(
            rows = self.positions.grid().rows(),
            cols = self.positions.grid().cols(),
            agents = self.agents.len(),
            seed,
            "world reset"
        );
        Ok(())
    }

    /// Advance one tick.
    ///
    /// Actions naming unknown or dead agents are ignored. Illegal requests
    /// (blocked moves, empty cells, targets out of range) resolve to
    /// zero-effect outcomes in the returned report.
    pub fn step(&mut self, actions: &Actions) -> StepReport {
        let started = Instant::now();
        let mut report = StepReport::default();
        let mut metrics = StepMetrics::default();

        for id in actions.keys() {
            match self.agents.get(id) {
                None => {
                    trace!(agent = %id, "action for unknown agent ignored");
                    report.unknown.push(id.clone());
                }
                Some(agent) if agent.is_alive() => {
                    report.outcomes.insert(id.clone(), AgentOutcome::default());
                }
                Some(_) => trace!(agent = %id, "action for dead agent ignored"),
            }
        }

        let phase = Instant::now();
        self.harvest_phase(actions, &mut report, &mut metrics);
        metrics.phase_us.push(("harvest", elapsed_us(phase)));

        let phase = Instant::now();
        self.attack_phase(actions, &mut report, &mut metrics);
        metrics.phase_us.push(("attack", elapsed_us(phase)));

        let phase = Instant::now();
        self.move_phase(actions, &mut report, &mut metrics);
        metrics.phase_us.push(("move", elapsed_us(phase)));

        let phase = Instant::now();
        self.entropy_phase(actions, &mut report);
        if let Some(resources) = &mut self.resources {
            resources.regrow();
        }
        metrics.phase_us.push(("entropy_regrow", elapsed_us(phase)));

        self.tick = TickId(self.tick.0 + 1);
        metrics.deaths = report.deaths.len() as u32;
        metrics.total_us = elapsed_us(started);
        self.last_metrics = metrics.clone();
        report.tick = self.tick;
        report.metrics = metrics;
        report
    }

    fn harvest_phase(&mut self, actions: &Actions, report: &mut StepReport, m: &mut StepMetrics) {
        let Some(resources) = &mut self.resources else {
            return;
        };
        for (id, action) in actions {
            let Some(agent) = self.agents.get_mut(id).filter(|a| a.is_alive()) else {
                continue;
            };
            let Some(amount) = HarvestActor.process(resources, agent, action) else {
                continue;
            };
            if amount > 0.0 {
                self.life.modify_health(agent, amount);
            } else {
                trace!(agent = %id, "harvest found nothing");
            }
            m.harvested += amount;
            outcome(report, id).harvested = Some(amount);
        }
    }

    fn attack_phase(&mut self, actions: &Actions, report: &mut StepReport, m: &mut StepMetrics) {
        for (id, action) in actions {
            let Some(attacker) = self.agents.get(id).filter(|a| a.is_alive()) else {
                continue;
            };
            let strength = attacker.attack().map_or(0.0, |p| p.strength);
            let Some(target_id) = self
                .attack
                .process(attacker, action, &self.agents, &mut self.rng)
            else {
                if action.attack {
                    trace!(agent = %id, "attack found no target");
                }
                continue;
            };
            m.attacks_landed += 1;
            if let Some(target) = self.agents.get_mut(&target_id) {
                self.life.modify_health(target, -strength);
            }
            if self.attacker_gain {
                if let Some(attacker) = self.agents.get_mut(id) {
                    self.life.modify_health(attacker, strength);
                }
            }
            self.bury_if_dead(&target_id, report);
            outcome(report, id).attacked = Some(target_id);
        }
    }

    fn move_phase(&mut self, actions: &Actions, report: &mut StepReport, m: &mut StepMetrics) {
        for (id, action) in actions {
            let Some(agent) = self.agents.get_mut(id).filter(|a| a.is_alive()) else {
                continue;
            };
            let Some(moved) = MoveActor.process(&mut self.positions, agent, action) else {
                continue;
            };
            m.moves_attempted += 1;
            if moved {
                m.moves_succeeded += 1;
            } else {
                trace!(agent = %id, "move rejected");
            }
            outcome(report, id).moved = Some(moved);
        }
    }

    fn entropy_phase(&mut self, actions: &Actions, report: &mut StepReport) {
        for id in actions.keys() {
            let Some(agent) = self.agents.get_mut(id).filter(|a| a.is_alive()) else {
                continue;
            };
            self.life.apply_entropy(agent);
            self.bury_if_dead(id, report);
        }
    }

    /// Take a freshly dead agent off the grid and record its death.
    fn bury_if_dead(&mut self, id: &AgentId, report: &mut StepReport) {
        let Some(agent) = self.agents.get_mut(id) else {
            return;
        };
        if agent.is_alive() || agent.position().is_none() {
            return;
        }
        self.positions.remove(agent);
        debug!(agent = %id, tick = self.tick.0 + 1, "agent died");
        report.deaths.push(id.clone());
    }

    /// Everything `id` currently observes.
    pub fn get_obs(&self, id: &str) -> Result<Observation, LookupError> {
        let agent = self.lookup(id)?;
        Ok(Observation {
            grid: GridObserver.observe(agent, self.positions.grid(), &self.agents),
            resources: self
                .resources
                .as_ref()
                .and_then(|r| ResourceObserver.observe(agent, r)),
            health: agent.health(),
        })
    }

    /// The occlusion-masked grid window of `id`.
    ///
    /// # Errors
    ///
    /// [`LookupError::MissingCapability`] if the agent has no view range or
    /// is not on the grid.
    pub fn grid_window(&self, id: &str) -> Result<ObsWindow<i32>, LookupError> {
        let agent = self.lookup(id)?;
        if agent.view_range().is_none() {
            return Err(missing(agent, "view_range"));
        }
        GridObserver
            .observe(agent, self.positions.grid(), &self.agents)
            .ok_or_else(|| missing(agent, "position"))
    }

    /// The resource window of `id`.
    ///
    /// # Errors
    ///
    /// [`LookupError::MissingCapability`] if the agent has no resource view,
    /// the world has no resources, or the agent is not on the grid.
    pub fn resource_window(&self, id: &str) -> Result<ObsWindow<f64>, LookupError> {
        let agent = self.lookup(id)?;
        if agent.resource_view().is_none() {
            return Err(missing(agent, "resource_view"));
        }
        let resources = self
            .resources
            .as_ref()
            .ok_or_else(|| missing(agent, "resources"))?;
        ResourceObserver
            .observe(agent, resources)
            .ok_or_else(|| missing(agent, "position"))
    }

    /// Whether `id` is done under the configured condition.
    pub fn get_done(&self, id: &str) -> Result<bool, LookupError> {
        Ok(self.done.agent_done(self.lookup(id)?))
    }

    /// Whether the episode is done under the configured condition.
    pub fn get_all_done(&self) -> bool {
        self.done.all_done(&self.agents)
    }

    /// Move `id` to `to` if the cell is in bounds and vacant.
    ///
    /// Returns whether the agent moved; invalid targets are a silent no-op.
    pub fn set_position(&mut self, id: &str, to: Position) -> Result<bool, LookupError> {
        let agent = self
            .agents
            .get_mut(id)
            .ok_or_else(|| LookupError::UnknownAgent { agent: id.to_owned() })?;
        if !agent.is_alive() {
            return Ok(false);
        }
        Ok(self.positions.set_position(agent, to))
    }

    fn lookup(&self, id: &str) -> Result<&Agent, LookupError> {
        self.agents
            .get(id)
            .ok_or_else(|| LookupError::UnknownAgent { agent: id.to_owned() })
    }

    /// An agent by id.
    pub fn agent(&self, id: &str) -> Option<&Agent> {
        self.agents.get(id)
    }

    /// All agents in iteration order.
    pub fn agents(&self) -> &AgentMap {
        &self.agents
    }

    /// The occupancy grid.
    pub fn grid(&self) -> &dyn Grid {
        self.positions.grid()
    }

    /// The resource field, if configured.
    pub fn resources(&self) -> Option<&ResourceState> {
        self.resources.as_ref()
    }

    /// Ticks since the last reset.
    pub fn current_tick(&self) -> TickId {
        self.tick
    }

    /// Seed of the current episode.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Metrics from the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }
}

impl std::fmt::Debug for GridWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridWorld")
            .field("positions", &self.positions)
            .field("agents", &self.agents.len())
            .field("resources", &self.resources.is_some())
            .field("current_tick", &self.tick)
            .field("seed", &self.seed)
            .finish()
    }
}

fn outcome<'r>(report: &'r mut StepReport, id: &AgentId) -> &'r mut AgentOutcome {
    report.outcomes.entry(id.clone()).or_default()
}

fn missing(agent: &Agent, capability: &'static str) -> LookupError {
    LookupError::MissingCapability {
        agent: agent.id().clone(),
        capability,
    }
}

fn elapsed_us(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_micros()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use moor_actors::Direction;
    use moor_core::Offset;
    use moor_test_utils::{assert_grid_consistent, fixtures};

    fn actions(items: impl IntoIterator<Item = (&'static str, Action)>) -> Actions {
        items.into_iter().map(|(id, a)| (AgentId::from(id), a)).collect()
    }

    fn duel() -> GridWorld {
        let hunter = Agent::builder("hunter")
            .team(1)
            .health(0.5)
            .attack(1, 0.3, 1.0)
            .initial_position((0, 0))
            .build()
            .unwrap();
        let quarry = Agent::builder("quarry")
            .team(2)
            .health(0.5)
            .initial_position((0, 1))
            .build()
            .unwrap();
        GridWorld::new(WorldConfig {
            agents: vec![hunter, quarry],
            done: DoneCondition::TeamDead,
            ..WorldConfig::new(2, 2)
        })
        .unwrap()
    }

    #[test]
    fn new_places_agents_and_starts_at_tick_zero() {
        let world = GridWorld::new(WorldConfig {
            agents: fixtures::predator_prey(2, 3),
            seed: 4,
            ..WorldConfig::new(6, 6)
        })
        .unwrap();
        assert_eq!(world.current_tick(), TickId(0));
        assert!(world.agents().values().all(|a| a.position().is_some()));
        assert_grid_consistent(world.grid(), world.agents());
    }

    #[test]
    fn attack_transfers_health_and_kills() {
        let mut world = duel();
        let report = world.step(&actions([("hunter", Action::attacking())]));
        assert_eq!(report.outcomes["hunter"].attacked, Some("quarry".into()));
        assert!((world.agent("quarry").unwrap().health().unwrap() - 0.2).abs() < 1e-12);
        assert!((world.agent("hunter").unwrap().health().unwrap() - 0.8).abs() < 1e-12);
        assert!(!world.get_all_done());

        let report = world.step(&actions([("hunter", Action::attacking())]));
        assert_eq!(report.deaths, vec![AgentId::from("quarry")]);
        assert_eq!(world.agent("quarry").unwrap().position(), None);
        assert!(world.grid().is_vacant(Position::new(0, 1)));
        assert!(world.get_done("quarry").unwrap());
        assert!(world.get_all_done());
    }

    #[test]
    fn attacker_gain_can_be_disabled() {
        let hunter = Agent::builder("h")
            .team(1)
            .health(0.5)
            .attack(1, 0.3, 1.0)
            .build()
            .unwrap();
        let quarry = Agent::builder("q").team(2).health(0.5).build().unwrap();
        let mut world = GridWorld::new(WorldConfig {
            agents: vec![hunter, quarry],
            attack: crate::AttackConfig {
                attacker_gain: false,
                ..Default::default()
            },
            ..WorldConfig::new(1, 2)
        })
        .unwrap();
        world.step(&actions([("h", Action::attacking())]));
        assert_eq!(world.agent("h").unwrap().health(), Some(0.5));
    }

    #[test]
    fn dead_agents_ignore_actions() {
        let mut world = duel();
        world.step(&actions([("hunter", Action::attacking())]));
        world.step(&actions([("hunter", Action::attacking())]));
        let report = world.step(&actions([("quarry", Action::moving(Direction::South))]));
        assert!(report.outcomes.is_empty());
        assert_eq!(world.agent("quarry").unwrap().position(), None);
    }

    #[test]
    fn unknown_actions_are_reported_not_fatal() {
        let mut world = duel();
        let report = world.step(&actions([("ghost", Action::attacking())]));
        assert_eq!(report.unknown, vec![AgentId::from("ghost")]);
        assert_eq!(world.current_tick(), TickId(1));
    }

    #[test]
    fn entropy_applies_to_acting_agents_only() {
        let mk = |id: &str| Agent::builder(id).health(0.5).move_range(1).build().unwrap();
        let mut world = GridWorld::new(WorldConfig {
            agents: vec![mk("a"), mk("b")],
            life: moor_state::LifeConfig { entropy: 0.1 },
            ..WorldConfig::new(3, 3)
        })
        .unwrap();
        world.step(&actions([("a", Action::moving(Offset::ZERO))]));
        assert!((world.agent("a").unwrap().health().unwrap() - 0.4).abs() < 1e-12);
        assert_eq!(world.agent("b").unwrap().health(), Some(0.5));
    }

    #[test]
    fn reset_restores_health_positions_and_tick() {
        let mut world = duel();
        world.step(&actions([("hunter", Action::attacking())]));
        world.step(&actions([("hunter", Action::attacking())]));
        world.reset(9).unwrap();
        assert_eq!(world.current_tick(), TickId(0));
        assert_eq!(world.seed(), 9);
        assert_eq!(world.agent("quarry").unwrap().health(), Some(0.5));
        assert_eq!(
            world.agent("quarry").unwrap().position(),
            Some(Position::new(0, 1))
        );
        assert_grid_consistent(world.grid(), world.agents());
    }

    #[test]
    fn lookups_report_missing_agents_and_capabilities() {
        let world = duel();
        assert_eq!(
            world.get_obs("nobody").unwrap_err(),
            LookupError::UnknownAgent {
                agent: "nobody".into()
            }
        );
        assert!(matches!(
            world.grid_window("hunter"),
            Err(LookupError::MissingCapability {
                capability: "view_range",
                ..
            })
        ));
        assert!(matches!(
            world.resource_window("hunter"),
            Err(LookupError::MissingCapability { .. })
        ));
        let obs = world.get_obs("quarry").unwrap();
        assert_eq!(obs.grid, None);
        assert_eq!(obs.health, Some(0.5));
    }

    #[test]
    fn set_position_is_silent_on_invalid_target() {
        let mut world = duel();
        assert_eq!(world.set_position("hunter", Position::new(0, 1)), Ok(false));
        assert_eq!(world.set_position("hunter", Position::new(5, 5)), Ok(false));
        assert_eq!(world.set_position("hunter", Position::new(1, 1)), Ok(true));
        assert!(world.set_position("nobody", Position::new(1, 0)).is_err());
        assert_grid_consistent(world.grid(), world.agents());
    }

    #[test]
    fn metrics_count_activity() {
        let mut world = duel();
        let report = world.step(&actions([
            ("hunter", Action::attacking()),
            ("quarry", Action::moving(Direction::South)),
        ]));
        assert_eq!(report.metrics.attacks_landed, 1);
        assert_eq!(report.metrics.moves_attempted, 0);
        assert_eq!(report.metrics.phase_us.len(), 4);
        assert_eq!(world.last_metrics(), &report.metrics);
    }
}
