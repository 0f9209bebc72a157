//! Agent placement on the occupancy grid.

use indexmap::IndexMap;
use moor_core::{Agent, AgentMap, ConfigError, Position};
use moor_grid::{new_grid, Grid, Occupancy};
use rand::seq::index;
use rand::Rng;

/// Owns the occupancy grid and every agent's placement in it.
///
/// # Reset draw sequence
///
/// Agents with an `initial_position` are placed first, in insertion order.
/// The remaining `k` agents are placed with exactly one
/// [`index::sample`] call choosing `k` distinct cells out of the cells left
/// vacant, enumerated row-major. The i-th sampled cell goes to the i-th
/// unplaced agent in insertion order. No draw happens when `k == 0`.
pub struct PositionState {
    grid: Box<dyn Grid>,
}

impl PositionState {
    /// Create the state with an empty grid of the given occupancy model.
    pub fn new(rows: u32, cols: u32, occupancy: Occupancy) -> Result<Self, ConfigError> {
        Ok(Self {
            grid: new_grid(rows, cols, occupancy)?,
        })
    }

    /// The occupancy grid.
    pub fn grid(&self) -> &dyn Grid {
        &*self.grid
    }

    /// Check that `agents` can be placed, without touching the grid.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InitialPositionOutOfBounds`]
    /// - [`ConfigError::DuplicateInitialPosition`] when two fixed positions
    ///   collide (on an overlapping grid, unless both agents are overlappable)
    /// - [`ConfigError::GridFull`] when the vacant cells cannot hold every
    ///   agent lacking a fixed position
    pub fn validate(&self, agents: &AgentMap) -> Result<(), ConfigError> {
        let (rows, cols) = (self.grid.rows(), self.grid.cols());
        let shared = self.grid.occupancy() == Occupancy::Overlapping;
        let mut claimed: IndexMap<Position, &Agent> = IndexMap::new();
        let mut unplaced = 0usize;

        for agent in agents.values() {
            let Some(position) = agent.initial_position() else {
                unplaced += 1;
                continue;
            };
            if !position.in_bounds(rows, cols) {
                return Err(ConfigError::InitialPositionOutOfBounds {
                    agent: agent.id().clone(),
                    position,
                });
            }
            match claimed.get(&position) {
                Some(first) if !(shared && first.overlappable() && agent.overlappable()) => {
                    return Err(ConfigError::DuplicateInitialPosition {
                        agent: agent.id().clone(),
                        occupant: first.id().clone(),
                        position,
                    });
                }
                Some(_) => {}
                None => {
                    claimed.insert(position, agent);
                }
            }
        }

        let available = self.grid.cell_count() - claimed.len();
        if unplaced > available {
            return Err(ConfigError::GridFull {
                needed: unplaced,
                available,
            });
        }
        Ok(())
    }

    /// Clear the grid and give every agent a starting cell.
    ///
    /// Validation runs first; on error neither the grid nor any agent
    /// has been modified.
    pub fn reset<R: Rng + ?Sized>(
        &mut self,
        agents: &mut AgentMap,
        rng: &mut R,
    ) -> Result<(), ConfigError> {
        self.validate(agents)?;

        self.grid.reset();
        for agent in agents.values_mut() {
            agent.clear_position();
        }

        for agent in agents.values_mut() {
            if let Some(position) = agent.initial_position() {
                let placed = self.grid.place(agent, position);
                debug_assert!(placed, "validated placement of '{}' failed", agent.id());
            }
        }

        let unplaced = agents
            .values()
            .filter(|a| a.initial_position().is_none())
            .count();
        if unplaced == 0 {
            return Ok(());
        }

        let vacant: Vec<Position> = (0..self.grid.cell_count())
            .map(|i| Position::unravel(i, self.grid.cols()))
            .filter(|&cell| self.grid.is_vacant(cell))
            .collect();
        let picks = index::sample(rng, vacant.len(), unplaced);
        let movers = agents
            .values_mut()
            .filter(|a| a.initial_position().is_none());
        for (agent, pick) in movers.zip(picks) {
            let placed = self.grid.place(agent, vacant[pick]);
            debug_assert!(placed, "random placement of '{}' failed", agent.id());
        }
        Ok(())
    }

    /// Move `agent` to `to` if that cell is inside the grid and vacant.
    ///
    /// Anything else is a silent no-op. An agent not yet on the grid is
    /// placed. Returns whether the agent's position changed.
    pub fn set_position(&mut self, agent: &mut Agent, to: Position) -> bool {
        if !self.grid.is_vacant(to) {
            return false;
        }
        match agent.position() {
            Some(_) => self.grid.move_agent(agent, to),
            None => self.grid.place(agent, to),
        }
    }

    /// Move `agent` to `to` under the grid's occupancy rules.
    ///
    /// Unlike [`set_position`](Self::set_position) this allows entering a
    /// shared cell on an overlapping grid.
    pub fn move_agent(&mut self, agent: &mut Agent, to: Position) -> bool {
        self.grid.move_agent(agent, to)
    }

    /// Take `agent` off the grid and clear its position.
    pub fn remove(&mut self, agent: &mut Agent) {
        if let Some(cell) = agent.position() {
            self.grid.remove(agent, cell);
            agent.clear_position();
        }
    }
}

impl std::fmt::Debug for PositionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionState")
            .field("rows", &self.grid.rows())
            .field("cols", &self.grid.cols())
            .field("occupancy", &self.grid.occupancy())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moor_test_utils::{agent_map, assert_grid_consistent};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn plain(id: &str) -> Agent {
        Agent::builder(id).build().unwrap()
    }

    fn fixed(id: &str, row: i32, col: i32) -> Agent {
        Agent::builder(id).initial_position((row, col)).build().unwrap()
    }

    #[test]
    fn fixed_positions_are_honoured() {
        let mut state = PositionState::new(3, 3, Occupancy::Exclusive).unwrap();
        let mut agents = agent_map([fixed("a", 0, 0), fixed("b", 2, 1), plain("c")]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        state.reset(&mut agents, &mut rng).unwrap();

        assert_eq!(agents["a"].position(), Some(Position::new(0, 0)));
        assert_eq!(agents["b"].position(), Some(Position::new(2, 1)));
        let c = agents["c"].position().unwrap();
        assert_ne!(c, Position::new(0, 0));
        assert_ne!(c, Position::new(2, 1));
        assert_grid_consistent(state.grid(), &agents);
    }

    #[test]
    fn random_placement_fills_every_free_cell() {
        let mut state = PositionState::new(2, 2, Occupancy::Exclusive).unwrap();
        let mut agents = agent_map([fixed("w", 1, 1), plain("a"), plain("b"), plain("c")]);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        state.reset(&mut agents, &mut rng).unwrap();
        for i in 0..4 {
            assert!(!state.grid().is_vacant(Position::unravel(i, 2)));
        }
        assert_grid_consistent(state.grid(), &agents);
    }

    #[test]
    fn same_seed_same_placement() {
        let run = |seed| {
            let mut state = PositionState::new(6, 6, Occupancy::Exclusive).unwrap();
            let mut agents = agent_map((0..8).map(|i| plain(&format!("a{i}"))));
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            state.reset(&mut agents, &mut rng).unwrap();
            agents.values().map(|a| a.position()).collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }

    #[test]
    fn duplicate_initial_position_is_fatal_and_leaves_state_untouched() {
        let mut state = PositionState::new(3, 3, Occupancy::Exclusive).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut good = agent_map([fixed("a", 1, 1)]);
        state.reset(&mut good, &mut rng).unwrap();

        let mut bad = agent_map([fixed("x", 0, 2), fixed("y", 0, 2)]);
        let err = state.reset(&mut bad, &mut rng).unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateInitialPosition {
                agent: "y".into(),
                occupant: "x".into(),
                position: Position::new(0, 2),
            }
        );
        assert_eq!(bad["x"].position(), None);
        assert!(state.grid().is_vacant(Position::new(0, 2)));
        assert!(!state.grid().is_vacant(Position::new(1, 1)));
    }

    #[test]
    fn overlappable_agents_may_share_initial_position() {
        let mut state = PositionState::new(2, 2, Occupancy::Overlapping).unwrap();
        let ghost = |id: &str| {
            Agent::builder(id)
                .overlappable(true)
                .initial_position((0, 0))
                .build()
                .unwrap()
        };
        let mut agents = agent_map([ghost("a"), ghost("b")]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        state.reset(&mut agents, &mut rng).unwrap();
        assert_eq!(state.grid().occupants(Position::new(0, 0)).len(), 2);

        let mut exclusive = PositionState::new(2, 2, Occupancy::Exclusive).unwrap();
        let mut agents = agent_map([ghost("a"), ghost("b")]);
        assert!(matches!(
            exclusive.reset(&mut agents, &mut rng),
            Err(ConfigError::DuplicateInitialPosition { .. })
        ));
    }

    #[test]
    fn out_of_bounds_initial_position_rejected() {
        let state = PositionState::new(2, 2, Occupancy::Exclusive).unwrap();
        let agents = agent_map([fixed("a", 2, 0)]);
        assert!(matches!(
            state.validate(&agents),
            Err(ConfigError::InitialPositionOutOfBounds { .. })
        ));
    }

    #[test]
    fn too_many_agents_for_free_cells() {
        let state = PositionState::new(1, 2, Occupancy::Exclusive).unwrap();
        let agents = agent_map([fixed("w", 0, 0), plain("a"), plain("b")]);
        assert_eq!(
            state.validate(&agents),
            Err(ConfigError::GridFull {
                needed: 2,
                available: 1
            })
        );
    }

    #[test]
    fn set_position_requires_vacant_in_bounds_cell() {
        let mut state = PositionState::new(3, 3, Occupancy::Exclusive).unwrap();
        let mut agents = agent_map([fixed("a", 0, 0), fixed("b", 0, 1)]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        state.reset(&mut agents, &mut rng).unwrap();

        let a = &mut agents["a"];
        assert!(!state.set_position(a, Position::new(0, 1)));
        assert!(!state.set_position(a, Position::new(-1, 0)));
        assert!(!state.set_position(a, Position::new(0, 0)));
        assert_eq!(a.position(), Some(Position::new(0, 0)));
        assert!(state.set_position(a, Position::new(2, 2)));
        assert_eq!(a.position(), Some(Position::new(2, 2)));
        assert_grid_consistent(state.grid(), &agents);
    }

    #[test]
    fn remove_takes_agent_off_grid() {
        let mut state = PositionState::new(2, 2, Occupancy::Exclusive).unwrap();
        let mut agents = agent_map([fixed("a", 1, 0)]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        state.reset(&mut agents, &mut rng).unwrap();
        state.remove(&mut agents["a"]);
        assert_eq!(agents["a"].position(), None);
        assert!(state.grid().is_vacant(Position::new(1, 0)));
    }

    proptest! {
        #[test]
        fn reset_always_yields_consistent_grid(seed in any::<u64>(), n in 0usize..=16) {
            let mut state = PositionState::new(4, 4, Occupancy::Exclusive).unwrap();
            let loose = (0..n.min(15)).map(|i| plain(&format!("a{i}")));
            let mut agents = agent_map(std::iter::once(fixed("w", 3, 3)).chain(loose));
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            prop_assert!(state.reset(&mut agents, &mut rng).is_ok());
            prop_assert!(agents.values().all(|a| a.position().is_some()));
            assert_grid_consistent(state.grid(), &agents);
        }
    }
}
