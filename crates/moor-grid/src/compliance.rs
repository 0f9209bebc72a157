//! Invariant checks shared by the backend test suites.

use crate::Grid;
use moor_core::{Agent, Position};

/// Assert that `grid` and the agents' recorded positions agree.
///
/// Every placed agent appears exactly once, in its recorded cell, and every
/// occupant of every cell is one of `agents` positioned there. Cells with
/// more than one occupant only hold overlappable agents.
pub(crate) fn assert_consistent(grid: &dyn Grid, agents: &[Agent]) {
    let mut seen = 0usize;
    for idx in 0..grid.cell_count() {
        let cell = Position::unravel(idx, grid.cols());
        let occupants = grid.occupants(cell);
        for id in &occupants {
            let agent = agents
                .iter()
                .find(|a| a.id() == *id)
                .unwrap_or_else(|| panic!("unknown occupant '{id}' at {cell}"));
            assert_eq!(agent.position(), Some(cell), "'{id}' indexed at wrong cell");
            if occupants.len() > 1 {
                assert!(agent.overlappable(), "'{id}' shares {cell} but is solid");
            }
        }
        seen += occupants.len();
    }
    let placed = agents.iter().filter(|a| a.position().is_some()).count();
    assert_eq!(seen, placed, "index and agent positions disagree");
}
