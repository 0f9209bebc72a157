//! Relative movement on the occupancy grid.

use crate::action::Action;
use moor_core::{Agent, Position};
use moor_state::PositionState;

/// Resolves `movement` requests.
///
/// The target is `position + displacement`; the grid decides whether the
/// agent may enter it. Displacements beyond the agent's move range on
/// either axis fail without touching the grid. Moves are resolved one
/// agent at a time, so each sees the grid as left by earlier movers.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveActor;

impl MoveActor {
    /// Resolve `action.movement` for `agent`.
    ///
    /// Returns `None` when the action has no movement request or the agent
    /// cannot move, otherwise whether the agent ended on the target cell.
    /// A zero displacement always succeeds for a placed agent.
    pub fn process(
        &self,
        positions: &mut PositionState,
        agent: &mut Agent,
        action: &Action,
    ) -> Option<bool> {
        let displacement = action.movement?;
        let range = agent.move_range()?;
        let Some(from) = agent.position() else {
            return Some(false);
        };
        if !displacement.within(range) {
            return Some(false);
        }
        let (Some(row), Some(col)) = (
            from.row.checked_add(displacement.dr),
            from.col.checked_add(displacement.dc),
        ) else {
            return Some(false);
        };
        Some(positions.move_agent(agent, Position::new(row, col)))
    }
}
