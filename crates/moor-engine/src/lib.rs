//! Grid-world simulation engine for Moor.
//!
//! [`GridWorld`] composes the state components (positions, resources,
//! health), the actors (harvest, attack, move) and the observers into a
//! turn-based simulation driven by `reset` / `step` / `get_obs`.
//!
//! # Step order
//!
//! Each [`step`](GridWorld::step) runs these phases, each over the action
//! map in its iteration order:
//!
//! 1. harvest (harvested amount is added to the harvester's health)
//! 2. attack (target loses the attacker's strength)
//! 3. move
//! 4. entropy (acting agents lose the configured entropy)
//! 5. regrow the resource field
//!
//! Agents whose health reaches zero are taken off the grid at once and
//! ignored for the rest of the episode.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod done;
pub mod metrics;
pub mod report;
pub mod world;

pub use config::{AttackConfig, WorldConfig};
pub use done::DoneCondition;
pub use metrics::StepMetrics;
pub use report::{AgentOutcome, Observation, StepReport};
pub use world::{Actions, GridWorld};
