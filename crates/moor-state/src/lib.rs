//! State components for Moor grid worlds.
//!
//! Each component owns one piece of world state and knows how to reset it:
//!
//! - [`PositionState`] owns the occupancy [`Grid`](moor_grid::Grid) and
//!   places agents at reset (fixed positions first, then random).
//! - [`ResourceState`] owns the regrowing resource field.
//! - [`LifeState`] restores and decays agent health.
//!
//! Agents themselves live in the caller's [`AgentMap`](moor_core::AgentMap)
//! and are passed in by reference. Randomness is always injected.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod life;
pub mod position;
pub mod resource;

pub use life::{LifeConfig, LifeState};
pub use position::PositionState;
pub use resource::{ResourceConfig, ResourceState};
