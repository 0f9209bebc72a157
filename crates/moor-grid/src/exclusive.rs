//! Grid where each cell holds at most one agent.

use crate::grid::{check_dims, Grid, Occupancy, Occupants};
use moor_core::{Agent, AgentId, ConfigError, Position};
use smallvec::smallvec;

/// A grid with unique occupancy.
///
/// A cell is available iff it is inside the grid and empty.
///
/// # Examples
///
/// ```
/// use moor_core::{Agent, Position};
/// use moor_grid::{ExclusiveGrid, Grid};
///
/// let mut grid = ExclusiveGrid::new(3, 3).unwrap();
/// let mut a = Agent::builder("a").build().unwrap();
/// let mut b = Agent::builder("b").build().unwrap();
///
/// assert!(grid.place(&mut a, Position::new(1, 1)));
/// assert!(!grid.place(&mut b, Position::new(1, 1)));
/// assert_eq!(a.position(), Some(Position::new(1, 1)));
/// assert_eq!(b.position(), None);
/// ```
#[derive(Debug, Clone)]
pub struct ExclusiveGrid {
    rows: u32,
    cols: u32,
    cells: Vec<Option<AgentId>>,
}

impl ExclusiveGrid {
    /// Create an empty `rows * cols` grid.
    ///
    /// Returns `Err(ConfigError::EmptyGrid)` if either dimension is 0.
    pub fn new(rows: u32, cols: u32) -> Result<Self, ConfigError> {
        check_dims(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![None; rows as usize * cols as usize],
        })
    }

    /// The sole occupant of `cell`, if any.
    pub fn get(&self, cell: Position) -> Option<&AgentId> {
        let idx = cell.ravel(self.rows, self.cols)?;
        self.cells[idx].as_ref()
    }

    fn slot(&mut self, cell: Position) -> Option<&mut Option<AgentId>> {
        let idx = cell.ravel(self.rows, self.cols)?;
        Some(&mut self.cells[idx])
    }
}

impl Grid for ExclusiveGrid {
    fn rows(&self) -> u32 {
        self.rows
    }

    fn cols(&self) -> u32 {
        self.cols
    }

    fn occupancy(&self) -> Occupancy {
        Occupancy::Exclusive
    }

    fn reset(&mut self) {
        self.cells.fill(None);
    }

    fn query(&self, _agent: &Agent, cell: Position) -> bool {
        cell.ravel(self.rows, self.cols)
            .is_some_and(|idx| self.cells[idx].is_none())
    }

    fn place(&mut self, agent: &mut Agent, cell: Position) -> bool {
        if !self.query(agent, cell) {
            return false;
        }
        if let Some(slot) = self.slot(cell) {
            *slot = Some(agent.id().clone());
            agent.set_position(cell);
            return true;
        }
        false
    }

    fn move_agent(&mut self, agent: &mut Agent, to: Position) -> bool {
        let Some(from) = agent.position() else {
            return false;
        };
        if from == to {
            return true;
        }
        if !self.query(agent, to) {
            return false;
        }
        self.remove(agent, from);
        self.place(agent, to)
    }

    fn remove(&mut self, agent: &Agent, cell: Position) {
        if let Some(slot) = self.slot(cell) {
            debug_assert!(
                slot.as_ref().is_none_or(|id| id == agent.id()),
                "agent '{}' removed from {cell} held by another agent",
                agent.id()
            );
            *slot = None;
        }
    }

    fn occupants(&self, cell: Position) -> Occupants<'_> {
        match self.get(cell) {
            Some(id) => smallvec![id],
            None => Occupants::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use proptest::prelude::*;

    fn agent(id: &str) -> Agent {
        Agent::builder(id).build().unwrap()
    }

    #[test]
    fn place_sets_position() {
        let mut g = ExclusiveGrid::new(4, 4).unwrap();
        let mut a = agent("a");
        assert!(g.place(&mut a, Position::new(2, 3)));
        assert_eq!(a.position(), Some(Position::new(2, 3)));
        assert_eq!(g.get(Position::new(2, 3)), Some(a.id()));
    }

    #[test]
    fn place_rejects_occupied_cell_without_mutation() {
        let mut g = ExclusiveGrid::new(4, 4).unwrap();
        let mut a = agent("a");
        let mut b = agent("b");
        g.place(&mut a, Position::new(0, 0));
        assert!(!g.place(&mut b, Position::new(0, 0)));
        assert_eq!(b.position(), None);
        assert_eq!(g.get(Position::new(0, 0)), Some(a.id()));
    }

    #[test]
    fn place_rejects_out_of_bounds() {
        let mut g = ExclusiveGrid::new(2, 2).unwrap();
        let mut a = agent("a");
        assert!(!g.place(&mut a, Position::new(2, 0)));
        assert!(!g.place(&mut a, Position::new(0, -1)));
        assert_eq!(a.position(), None);
    }

    #[test]
    fn move_to_same_cell_is_noop_success() {
        let mut g = ExclusiveGrid::new(3, 3).unwrap();
        let mut a = agent("a");
        g.place(&mut a, Position::new(1, 1));
        assert!(g.move_agent(&mut a, Position::new(1, 1)));
        assert_eq!(g.get(Position::new(1, 1)), Some(a.id()));
    }

    #[test]
    fn move_vacates_old_cell() {
        let mut g = ExclusiveGrid::new(3, 3).unwrap();
        let mut a = agent("a");
        g.place(&mut a, Position::new(1, 1));
        assert!(g.move_agent(&mut a, Position::new(0, 1)));
        assert_eq!(g.get(Position::new(1, 1)), None);
        assert_eq!(g.get(Position::new(0, 1)), Some(a.id()));
        assert_eq!(a.position(), Some(Position::new(0, 1)));
    }

    #[test]
    fn blocked_move_leaves_everything_unchanged() {
        let mut g = ExclusiveGrid::new(3, 3).unwrap();
        let mut a = agent("a");
        let mut b = agent("b");
        g.place(&mut a, Position::new(1, 1));
        g.place(&mut b, Position::new(0, 1));
        assert!(!g.move_agent(&mut a, Position::new(0, 1)));
        assert!(!g.move_agent(&mut a, Position::new(-1, 1)));
        assert_eq!(a.position(), Some(Position::new(1, 1)));
        assert_eq!(g.get(Position::new(1, 1)), Some(a.id()));
        assert_eq!(g.get(Position::new(0, 1)), Some(b.id()));
    }

    #[test]
    fn unplaced_agent_cannot_move() {
        let mut g = ExclusiveGrid::new(3, 3).unwrap();
        let mut a = agent("a");
        assert!(!g.move_agent(&mut a, Position::new(0, 0)));
        assert!(g.is_vacant(Position::new(0, 0)));
    }

    #[test]
    fn reset_clears_all_cells() {
        let mut g = ExclusiveGrid::new(2, 2).unwrap();
        let mut a = agent("a");
        g.place(&mut a, Position::new(1, 0));
        g.reset();
        assert!(g.is_vacant(Position::new(1, 0)));
    }

    #[test]
    fn search_applies_predicate() {
        let mut g = ExclusiveGrid::new(2, 2).unwrap();
        let mut agents = moor_core::AgentMap::new();
        let mut wall = Agent::wall("w").build().unwrap();
        g.place(&mut wall, Position::new(0, 1));
        agents.insert(wall.id().clone(), wall);

        let found = g.search(Position::new(0, 1), &agents, &|a| a.view_blocking());
        assert_eq!(found.map(|a| a.id().as_str()), Some("w"));
        assert!(g
            .search(Position::new(0, 1), &agents, &|a| a.team().is_some())
            .is_none());
        assert!(g.search(Position::new(1, 1), &agents, &|_| true).is_none());
    }

    proptest! {
        #[test]
        fn random_moves_preserve_occupancy(
            moves in prop::collection::vec((0usize..4, -2i32..=2, -2i32..=2), 0..60)
        ) {
            let mut g = ExclusiveGrid::new(5, 5).unwrap();
            let mut agents: Vec<Agent> = (0..4).map(|i| agent(&format!("a{i}"))).collect();
            for (i, a) in agents.iter_mut().enumerate() {
                prop_assert!(g.place(a, Position::new(i as i32, i as i32)));
            }
            for (who, dr, dc) in moves {
                let a = &mut agents[who];
                let before = a.position().unwrap();
                let target = Position::new(before.row + dr, before.col + dc);
                let ok = g.move_agent(a, target);
                let after = a.position().unwrap();
                if ok {
                    prop_assert_eq!(after, target);
                } else {
                    prop_assert_eq!(after, before);
                }
                compliance::assert_consistent(&g, &agents);
            }
        }
    }
}
