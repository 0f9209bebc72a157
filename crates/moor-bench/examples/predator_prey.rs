//! End-to-end predator-prey loop.
//!
//! Demonstrates: build config → GridWorld → random actions → step → read
//! observations → reset → repeat. Set `RUST_LOG=moor_engine=debug` to see
//! deaths and resets.

use moor_bench::{random_actions, reference_profile};
use moor_engine::GridWorld;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Moor Predator-Prey Example ===\n");

    let mut world = GridWorld::new(reference_profile(42)).unwrap();
    let mut policy = ChaCha8Rng::seed_from_u64(7);

    for episode in 0..3u64 {
        println!("Episode {} (seed {})", episode + 1, world.seed());
        let mut deaths = 0usize;
        let mut harvested = 0.0;
        while !world.get_all_done() && world.current_tick().0 < 500 {
            let actions = random_actions(&world, &mut policy);
            let report = world.step(&actions);
            deaths += report.deaths.len();
            harvested += report.metrics.harvested;

            let tick = report.tick.0;
            if tick % 100 == 0 {
                let alive = world
                    .agents()
                    .values()
                    .filter(|a| a.health().is_some_and(|h| h > 0.0))
                    .count();
                println!(
                    "  tick {:>3}: alive={:>3}, deaths={:>3}, harvested={:>8.3}, time={:>6}μs",
                    tick, alive, deaths, harvested, report.metrics.total_us,
                );
            }
        }

        let obs = world.get_obs("predator0").unwrap();
        if let Some(window) = obs.grid {
            println!("  predator0 sees:");
            for row in window.rows() {
                let line: Vec<String> = row.iter().map(|v| format!("{v:>3}")).collect();
                println!("    {}", line.join(""));
            }
        }
        println!(
            "  finished at tick {} with {} deaths\n",
            world.current_tick().0,
            deaths
        );

        world.reset(42 + episode + 1).unwrap();
    }
}
