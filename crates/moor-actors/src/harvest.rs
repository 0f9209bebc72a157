//! Resource harvesting.

use crate::action::Action;
use moor_core::Agent;
use moor_state::ResourceState;

/// Resolves `harvest` requests against the resource field.
///
/// The amount taken is `min(requested, max_harvest, value at the agent's
/// cell)`, and the cell is decremented by exactly that amount.
#[derive(Clone, Copy, Debug, Default)]
pub struct HarvestActor;

impl HarvestActor {
    /// Resolve `action.harvest` for `agent`.
    ///
    /// Returns `None` when nothing was requested or the agent cannot
    /// harvest, otherwise the amount taken (0 for a NaN or non-positive
    /// request, an empty cell or an unplaced agent).
    pub fn process(
        &self,
        resources: &mut ResourceState,
        agent: &Agent,
        action: &Action,
    ) -> Option<f64> {
        let requested = action.harvest?;
        let max = agent.max_harvest()?;
        // `f64::min` drops a NaN operand, so screen the request first.
        if requested.is_nan() || requested <= 0.0 {
            return Some(0.0);
        }
        let Some(cell) = agent.position() else {
            return Some(0.0);
        };
        Some(resources.harvest(cell, requested.min(max)))
    }
}
