//! The core [`Grid`] trait.

use crate::{ExclusiveGrid, OverlapGrid};
use moor_core::{Agent, AgentId, AgentMap, ConfigError, Position};
use smallvec::SmallVec;
use std::any::Any;

/// Ids of the agents in one cell, in insertion order.
pub type Occupants<'a> = SmallVec<[&'a AgentId; 4]>;

/// Occupancy model selecting the grid backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Occupancy {
    /// One agent per cell.
    #[default]
    Exclusive,
    /// Co-location allowed between overlappable agents.
    Overlapping,
}

/// Build an empty grid of the requested occupancy model.
///
/// # Errors
///
/// Returns [`ConfigError::EmptyGrid`] if either dimension is zero.
pub fn new_grid(rows: u32, cols: u32, occupancy: Occupancy) -> Result<Box<dyn Grid>, ConfigError> {
    Ok(match occupancy {
        Occupancy::Exclusive => Box::new(ExclusiveGrid::new(rows, cols)?),
        Occupancy::Overlapping => Box::new(OverlapGrid::new(rows, cols)?),
    })
}

/// A fixed-size 2D index of agent occupancy.
///
/// The grid stores agent ids, not agents: agents live in the simulation's
/// [`AgentMap`] and are passed in by reference. `place` and `move_agent`
/// update the agent's recorded position together with the index, so the
/// two never disagree.
///
/// # Contract
///
/// - `query` never mutates.
/// - `place` and `move_agent` either fully succeed or change nothing.
/// - Out-of-bounds cells are never available.
///
/// # Object safety
///
/// This trait is object-safe; worlds hold a `Box<dyn Grid>`. Use
/// `downcast_ref` to reach a concrete backend.
pub trait Grid: Any + Send + Sync + 'static {
    /// Number of rows.
    fn rows(&self) -> u32;

    /// Number of columns.
    fn cols(&self) -> u32;

    /// Which occupancy model this grid enforces.
    fn occupancy(&self) -> Occupancy;

    /// Clear every cell.
    fn reset(&mut self);

    /// Whether `agent` may occupy `cell` right now.
    fn query(&self, agent: &Agent, cell: Position) -> bool;

    /// Put `agent` at `cell` if [`query`](Self::query) allows it.
    ///
    /// On success the agent's position is set to `cell`. Returns whether
    /// the placement happened.
    fn place(&mut self, agent: &mut Agent, cell: Position) -> bool;

    /// Move `agent` from its current cell to `to`.
    ///
    /// Moving to the current cell succeeds without touching anything. An
    /// agent that is not on the grid cannot move.
    fn move_agent(&mut self, agent: &mut Agent, to: Position) -> bool;

    /// Evict `agent` from `cell`. Does not touch the agent's position.
    fn remove(&mut self, agent: &Agent, cell: Position);

    /// Ids occupying `cell`; empty for empty or out-of-bounds cells.
    fn occupants(&self, cell: Position) -> Occupants<'_>;

    /// Total number of cells.
    fn cell_count(&self) -> usize {
        self.rows() as usize * self.cols() as usize
    }

    /// Whether `cell` lies inside the grid.
    fn contains(&self, cell: Position) -> bool {
        cell.in_bounds(self.rows(), self.cols())
    }

    /// Whether `cell` is inside the grid and holds no agent.
    fn is_vacant(&self, cell: Position) -> bool {
        self.contains(cell) && self.occupants(cell).is_empty()
    }

    /// First occupant of `cell` (in insertion order) satisfying `predicate`.
    fn search<'a>(
        &self,
        cell: Position,
        agents: &'a AgentMap,
        predicate: &dyn Fn(&Agent) -> bool,
    ) -> Option<&'a Agent> {
        self.occupants(cell)
            .into_iter()
            .filter_map(|id| agents.get(id))
            .find(|a| predicate(*a))
    }
}

impl dyn Grid {
    /// Attempt to downcast to a concrete backend.
    pub fn downcast_ref<T: Grid>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}

/// Shared constructor check for both backends.
pub(crate) fn check_dims(rows: u32, cols: u32) -> Result<(), ConfigError> {
    if rows == 0 || cols == 0 || rows > i32::MAX as u32 || cols > i32::MAX as u32 {
        return Err(ConfigError::EmptyGrid { rows, cols });
    }
    Ok(())
}
