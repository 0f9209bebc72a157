//! The 5x5 resource fixture: a hand-checked field, four harvesting
//! observers and the field after each regrow/harvest round.
//!
//! Harvesters (all `max_harvest` 0.5), by insertion order:
//!
//! | id | position | resource view |
//! |----|----------|---------------|
//! | `agent0` | (0, 0) | 1 |
//! | `agent1` | (2, 2) | 2 |
//! | `agent2` | (3, 1) | 3 |
//! | `agent3` | (1, 4) | 4 |

use moor_core::Agent;

/// Grid side length.
pub const SIZE: u32 = 5;

/// Regrowth per step.
pub const REGROW_RATE: f64 = 0.4;

/// Harvest cap of every fixture agent.
pub const MAX_HARVEST: f64 = 0.5;

/// The four fixture harvesters with fixed positions.
pub fn agents() -> Vec<Agent> {
    [((0, 0), 1), ((2, 2), 2), ((3, 1), 3), ((1, 4), 4)]
        .into_iter()
        .enumerate()
        .map(|(i, (position, view))| {
            Agent::builder(format!("agent{i}"))
                .initial_position(position)
                .resource_view(view)
                .max_harvest(MAX_HARVEST)
                .build()
                .expect("fixture agent is valid")
        })
        .collect()
}

/// Row-major starting field.
pub fn initial() -> Vec<f64> {
    [
        [0.84727271, 0.47440489, 0.29693299, 0.5311798, 0.25446477],
        [0.58155565, 0.79666705, 0.53135774, 0.51300926, 0.90118474],
        [0.7125912, 0.86805178, 0.0, 0.0, 0.38538807],
        [0.48882905, 0.36891643, 0.76354359, 0.0, 0.71936923],
        [0.55379678, 0.32311497, 0.46094834, 0.12981774, 0.0],
    ]
    .concat()
}

/// Field after one regrow from [`initial`].
pub fn after_first_regrow() -> Vec<f64> {
    [
        [1.0, 0.87440489, 0.69693299, 0.9311798, 0.65446477],
        [0.98155565, 1.0, 0.93135774, 0.91300926, 1.0],
        [1.0, 1.0, 0.0, 0.0, 0.78538807],
        [0.88882905, 0.76891643, 1.0, 0.0, 1.0],
        [0.95379678, 0.72311497, 0.86094834, 0.52981774, 0.0],
    ]
    .concat()
}

/// After every agent harvests 0.5 once.
pub fn after_first_harvest() -> Vec<f64> {
    [
        [0.5, 0.87440489, 0.69693299, 0.9311798, 0.65446477],
        [0.98155565, 1.0, 0.93135774, 0.91300926, 0.5],
        [1.0, 1.0, 0.0, 0.0, 0.78538807],
        [0.88882905, 0.26891643, 1.0, 0.0, 1.0],
        [0.95379678, 0.72311497, 0.86094834, 0.52981774, 0.0],
    ]
    .concat()
}

/// After `agent0`, `agent2` and `agent3` harvest 0.5 again.
pub fn after_second_harvest() -> Vec<f64> {
    [
        [0.0, 0.87440489, 0.69693299, 0.9311798, 0.65446477],
        [0.98155565, 1.0, 0.93135774, 0.91300926, 0.0],
        [1.0, 1.0, 0.0, 0.0, 0.78538807],
        [0.88882905, 0.0, 1.0, 0.0, 1.0],
        [0.95379678, 0.72311497, 0.86094834, 0.52981774, 0.0],
    ]
    .concat()
}

/// After the second regrow; depleted cells stay at 0.
pub fn after_second_regrow() -> Vec<f64> {
    [
        [0.0, 1.0, 1.0, 1.0, 1.0],
        [1.0, 1.0, 1.0, 1.0, 0.0],
        [1.0, 1.0, 0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0, 0.92981774, 0.0],
    ]
    .concat()
}

/// `agent0`'s 3x3 window over [`initial`].
pub fn window_agent0() -> Vec<Vec<f64>> {
    vec![
        vec![-1.0, -1.0, -1.0],
        vec![-1.0, 0.84727271, 0.47440489],
        vec![-1.0, 0.58155565, 0.79666705],
    ]
}

/// `agent1`'s 5x5 window: the whole field.
pub fn window_agent1() -> Vec<Vec<f64>> {
    vec![
        vec![0.84727271, 0.47440489, 0.29693299, 0.5311798, 0.25446477],
        vec![0.58155565, 0.79666705, 0.53135774, 0.51300926, 0.90118474],
        vec![0.7125912, 0.86805178, 0.0, 0.0, 0.38538807],
        vec![0.48882905, 0.36891643, 0.76354359, 0.0, 0.71936923],
        vec![0.55379678, 0.32311497, 0.46094834, 0.12981774, 0.0],
    ]
}

/// `agent2`'s 7x7 window.
pub fn window_agent2() -> Vec<Vec<f64>> {
    vec![
        vec![-1.0, -1.0, 0.84727271, 0.47440489, 0.29693299, 0.5311798, 0.25446477],
        vec![-1.0, -1.0, 0.58155565, 0.79666705, 0.53135774, 0.51300926, 0.90118474],
        vec![-1.0, -1.0, 0.7125912, 0.86805178, 0.0, 0.0, 0.38538807],
        vec![-1.0, -1.0, 0.48882905, 0.36891643, 0.76354359, 0.0, 0.71936923],
        vec![-1.0, -1.0, 0.55379678, 0.32311497, 0.46094834, 0.12981774, 0.0],
        vec![-1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0],
        vec![-1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0],
    ]
}

/// `agent3`'s 9x9 window.
pub fn window_agent3() -> Vec<Vec<f64>> {
    vec![
        vec![-1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0],
        vec![-1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0],
        vec![-1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0],
        vec![0.84727271, 0.47440489, 0.29693299, 0.5311798, 0.25446477, -1.0, -1.0, -1.0, -1.0],
        vec![0.58155565, 0.79666705, 0.53135774, 0.51300926, 0.90118474, -1.0, -1.0, -1.0, -1.0],
        vec![0.7125912, 0.86805178, 0.0, 0.0, 0.38538807, -1.0, -1.0, -1.0, -1.0],
        vec![0.48882905, 0.36891643, 0.76354359, 0.0, 0.71936923, -1.0, -1.0, -1.0, -1.0],
        vec![0.55379678, 0.32311497, 0.46094834, 0.12981774, 0.0, -1.0, -1.0, -1.0, -1.0],
        vec![-1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0],
    ]
}
