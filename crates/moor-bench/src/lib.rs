//! Benchmark profiles and utilities for the Moor grid-world framework.
//!
//! Provides pre-built [`WorldConfig`] profiles for benchmarking and examples:
//!
//! - [`reference_profile`]: 32x32 predator-prey world with walls and resources
//! - [`stress_profile`]: 128x128 world with 16x the agents
//! - [`random_actions`]: a uniform random policy over every living agent

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use moor_actors::{Action, Direction};
use moor_core::Agent;
use moor_engine::{Actions, DoneCondition, GridWorld, WorldConfig};
use moor_state::{LifeConfig, ResourceConfig};
use rand::Rng;

const DIRECTIONS: [Direction; 5] = [
    Direction::Stay,
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
];

/// Build the reference profile: 32x32 grid, 8 predators, 24 prey,
/// 40 walls, a default resource field and entropy 0.01.
pub fn reference_profile(seed: u64) -> WorldConfig {
    profile(32, 8, 24, 40, seed)
}

/// Build the stress profile: 128x128 grid, 128 predators, 384 prey,
/// 640 walls.
///
/// Same mix as [`reference_profile`] on 16x the cells.
pub fn stress_profile(seed: u64) -> WorldConfig {
    profile(128, 128, 384, 640, seed)
}

fn profile(side: u32, predators: usize, prey: usize, walls: usize, seed: u64) -> WorldConfig {
    let mut agents: Vec<Agent> = (0..walls)
        .map(|i| Agent::wall(format!("wall{i}")).build().expect("wall preset is valid"))
        .collect();
    agents.extend((0..predators).map(|i| predator(&format!("predator{i}"))));
    agents.extend((0..prey).map(|i| self::prey(&format!("prey{i}"))));

    WorldConfig {
        agents,
        seed,
        resources: Some(ResourceConfig::default()),
        life: LifeConfig { entropy: 0.01 },
        done: DoneCondition::TeamDead,
        ..WorldConfig::new(side, side)
    }
}

fn predator(id: &str) -> Agent {
    Agent::builder(id)
        .encoding(2)
        .render_shape('s')
        .team(1)
        .view_range(4)
        .move_range(1)
        .health(1.0)
        .attack(1, 0.2, 0.8)
        .build()
        .expect("predator preset is valid")
}

fn prey(id: &str) -> Agent {
    Agent::builder(id)
        .encoding(3)
        .render_shape('o')
        .team(2)
        .view_range(3)
        .move_range(1)
        .resource_view(2)
        .health(0.5)
        .max_harvest(0.1)
        .build()
        .expect("prey preset is valid")
}

/// One random action per living agent that can act.
///
/// Each agent moves in a uniform random direction, attacks with
/// probability 1/2 and harvests a uniform amount in `[0, 0.2)` with
/// probability 1/2. Walls are skipped.
pub fn random_actions<R: Rng + ?Sized>(world: &GridWorld, rng: &mut R) -> Actions {
    world
        .agents()
        .values()
        .filter(|a| a.is_alive() && a.move_range().is_some())
        .map(|agent| {
            let mut action = Action::moving(DIRECTIONS[rng.random_range(0..DIRECTIONS.len())]);
            if rng.random_bool(0.5) {
                action = action.with_attack();
            }
            if rng.random_bool(0.5) {
                action = action.with_harvest(rng.random::<f64>() * 0.2);
            }
            (agent.id().clone(), action)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn reference_profile_validates() {
        let config = reference_profile(42);
        assert_eq!(config.agents.len(), 72);
        config.validate().unwrap();
    }

    #[test]
    fn stress_profile_validates() {
        stress_profile(42).validate().unwrap();
    }

    #[test]
    fn random_actions_skip_walls() {
        let world = GridWorld::new(reference_profile(1)).unwrap();
        let actions = random_actions(&world, &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(actions.len(), 32);
        assert!(actions.keys().all(|id| !id.as_str().starts_with("wall")));
    }

    #[test]
    fn random_actions_deterministic() {
        let world = GridWorld::new(reference_profile(1)).unwrap();
        let a = random_actions(&world, &mut ChaCha8Rng::seed_from_u64(3));
        let b = random_actions(&world, &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
