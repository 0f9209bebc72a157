//! Grid where overlappable agents may share a cell.

use crate::grid::{check_dims, Grid, Occupancy, Occupants};
use indexmap::IndexMap;
use moor_core::{Agent, AgentId, ConfigError, Position};

/// A grid permitting co-location.
///
/// An agent may enter a cell if the cell is empty, or if both the agent and
/// the cell's first occupant are overlappable. Each cell remembers its
/// occupants in arrival order together with their overlappable flag.
#[derive(Debug, Clone)]
pub struct OverlapGrid {
    rows: u32,
    cols: u32,
    cells: Vec<IndexMap<AgentId, bool>>,
}

impl OverlapGrid {
    /// Create an empty `rows * cols` grid.
    pub fn new(rows: u32, cols: u32) -> Result<Self, ConfigError> {
        check_dims(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![IndexMap::new(); rows as usize * cols as usize],
        })
    }

    /// Number of agents in `cell`; 0 outside the grid.
    pub fn count(&self, cell: Position) -> usize {
        cell.ravel(self.rows, self.cols)
            .map_or(0, |idx| self.cells[idx].len())
    }
}

impl Grid for OverlapGrid {
    fn rows(&self) -> u32 {
        self.rows
    }

    fn cols(&self) -> u32 {
        self.cols
    }

    fn occupancy(&self) -> Occupancy {
        Occupancy::Overlapping
    }

    fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    fn query(&self, agent: &Agent, cell: Position) -> bool {
        let Some(idx) = cell.ravel(self.rows, self.cols) else {
            return false;
        };
        match self.cells[idx].first() {
            None => true,
            Some((_, &first_overlappable)) => first_overlappable && agent.overlappable(),
        }
    }

    fn place(&mut self, agent: &mut Agent, cell: Position) -> bool {
        if !self.query(agent, cell) {
            return false;
        }
        let Some(idx) = cell.ravel(self.rows, self.cols) else {
            return false;
        };
        self.cells[idx].insert(agent.id().clone(), agent.overlappable());
        agent.set_position(cell);
        true
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
        if let Some(idx) = cell.ravel(self.rows, self.cols) {
            self.cells[idx].shift_remove(agent.id());
        }
    }

    fn occupants(&self, cell: Position) -> Occupants<'_> {
        match cell.ravel(self.rows, self.cols) {
            Some(idx) => self.cells[idx].keys().collect(),
            None => Occupants::new(),
        }
    }
}
