//! Test fixtures and invariant checks for Moor development.
//!
//! - [`agent_map`] builds an insertion-ordered [`AgentMap`] from agents.
//! - [`seated`] and [`seat_at_initial`] position loose agents for grid-free
//!   tests.
//! - [`assert_grid_consistent`] checks the occupancy invariant.
//! - [`fixtures`] holds hand-checked scenarios shared across crates.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use moor_core::{Agent, AgentMap, Position};
use moor_grid::Grid;

/// Key agents by id, preserving iteration order.
pub fn agent_map(agents: impl IntoIterator<Item = Agent>) -> AgentMap {
    agents.into_iter().map(|a| (a.id().clone(), a)).collect()
}

/// Record each agent's initial position as its current cell without a grid.
///
/// For component tests that read positions but never consult occupancy.
pub fn seat_at_initial<'a>(agents: impl IntoIterator<Item = &'a mut Agent>) {
    for agent in agents {
        if let Some(p) = agent.initial_position() {
            agent.set_position(p);
        }
    }
}

/// `agent` recorded at `at` without a grid.
pub fn seated(mut agent: Agent, at: impl Into<Position>) -> Agent {
    agent.set_position(at.into());
    agent
}

/// Assert that the grid index and agent positions agree.
///
/// Every occupant of every cell exists in `agents` and records that cell
/// as its position; every positioned agent is found in its cell exactly
/// once; only overlappable agents share a cell.
pub fn assert_grid_consistent(grid: &dyn Grid, agents: &AgentMap) {
    let mut indexed = 0usize;
    for i in 0..grid.cell_count() {
        let cell = Position::unravel(i, grid.cols());
        let occupants = grid.occupants(cell);
        for id in &occupants {
            let agent = agents
                .get(*id)
                .unwrap_or_else(|| panic!("grid holds unknown agent '{id}' at {cell}"));
            assert_eq!(
                agent.position(),
                Some(cell),
                "agent '{id}' is indexed at {cell} but records {:?}",
                agent.position()
            );
            if occupants.len() > 1 {
                assert!(agent.overlappable(), "solid agent '{id}' shares {cell}");
            }
        }
        indexed += occupants.len();
    }
    let positioned = agents.values().filter(|a| a.position().is_some()).count();
    assert_eq!(indexed, positioned, "grid index and agent positions disagree");
}
