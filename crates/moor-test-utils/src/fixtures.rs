//! Shared scenarios.

pub mod resource;

use moor_core::{Agent, AgentBuilder, Position};

/// Five explorers (move 1, view 2) on a 1x10 corridor at columns
/// 0, 1, 3, 5 and 7, named `c0`..`c4` left to right.
pub fn corridor() -> Vec<Agent> {
    [0, 1, 3, 5, 7]
        .into_iter()
        .enumerate()
        .map(|(i, col)| {
            Agent::explorer(format!("c{i}"), 2, 1)
                .initial_position((0, col))
                .build()
                .expect("corridor agent is valid")
        })
        .collect()
}

/// Team used by [`predator`].
pub const PREDATOR_TEAM: u32 = 1;
/// Team used by [`prey`].
pub const PREY_TEAM: u32 = 2;

/// A predator: sees 3, moves 1, attacks adjacent prey for 0.2 with
/// certainty, full health.
pub fn predator(id: &str) -> Agent {
    predator_builder(id)
        .build()
        .expect("predator preset is valid")
}

/// [`predator`] with a fixed initial position.
pub fn predator_at(id: &str, at: impl Into<Position>) -> Agent {
    predator_builder(id)
        .initial_position(at)
        .build()
        .expect("predator preset is valid")
}

fn predator_builder(id: &str) -> AgentBuilder {
    Agent::builder(id)
        .encoding(2)
        .render_shape('s')
        .team(PREDATOR_TEAM)
        .view_range(3)
        .move_range(1)
        .health(1.0)
        .attack(1, 0.2, 1.0)
}

/// A prey: sees 3, moves 1, harvests up to 0.1 within a resource view
/// of 2, half health.
pub fn prey(id: &str) -> Agent {
    prey_builder(id).build().expect("prey preset is valid")
}

/// [`prey`] with a fixed initial position.
pub fn prey_at(id: &str, at: impl Into<Position>) -> Agent {
    prey_builder(id)
        .initial_position(at)
        .build()
        .expect("prey preset is valid")
}

fn prey_builder(id: &str) -> AgentBuilder {
    Agent::builder(id)
        .encoding(3)
        .render_shape('o')
        .team(PREY_TEAM)
        .view_range(3)
        .move_range(1)
        .resource_view(2)
        .health(0.5)
        .max_harvest(0.1)
}

/// `predators` predators followed by `prey` prey, randomly placed.
pub fn predator_prey(predators: usize, prey_count: usize) -> Vec<Agent> {
    (0..predators)
        .map(|i| predator(&format!("predator{i}")))
        .chain((0..prey_count).map(|i| prey(&format!("prey{i}"))))
        .collect()
}
