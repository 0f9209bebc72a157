//! Occlusion-masked views of agent occupancy.

use crate::occlusion::occlusion_mask;
use crate::window::ObsWindow;
use moor_core::encoding::{EMPTY, MASKED, OUT_OF_BOUNDS};
use moor_core::{Agent, AgentMap, Offset};
use moor_grid::Grid;
use smallvec::SmallVec;

/// Observes agent encodings within `view_range` of the observer.
///
/// Each cell of the window holds:
///
/// - `-2` if a view-blocking agent hides it (checked first, so occluded
///   cells outside the grid also read `-2`),
/// - `-1` if it lies outside the grid,
/// - `0` if it is empty,
/// - otherwise the encoding of the first occupant other than the
///   observer, or the observer's own encoding when it is alone.
#[derive(Clone, Copy, Debug, Default)]
pub struct GridObserver;

impl GridObserver {
    /// The observer's window, `None` if it has no view range or is not
    /// on the grid.
    pub fn observe(
        &self,
        observer: &Agent,
        grid: &dyn Grid,
        agents: &AgentMap,
    ) -> Option<ObsWindow<i32>> {
        let range = observer.view_range()?;
        let origin = observer.position()?;
        let mut blockers: SmallVec<[Offset; 8]> = SmallVec::new();

        let mut window = ObsWindow::from_fn(range, |offset| {
            let cell = origin + offset;
            if !grid.contains(cell) {
                return OUT_OF_BOUNDS;
            }
            let occupants = grid.occupants(cell);
            let others: SmallVec<[&Agent; 4]> = occupants
                .iter()
                .filter(|&&id| id != observer.id())
                .filter_map(|&id| agents.get(id))
                .collect();
            if others.iter().any(|a| a.view_blocking()) {
                blockers.push(offset);
            }
            match others.first() {
                Some(agent) => agent.encoding(),
                None if occupants.is_empty() => EMPTY,
                None => observer.encoding(),
            }
        });

        let mask = occlusion_mask(range, blockers);
        for (value, &hidden) in window.as_mut_slice().iter_mut().zip(mask.as_slice()) {
            if hidden {
                *value = MASKED;
            }
        }
        Some(window)
    }
}
