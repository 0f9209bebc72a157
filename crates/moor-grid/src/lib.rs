//! Occupancy grids for Moor simulations.
//!
//! This crate defines the [`Grid`] trait, the spatial index through which
//! every state, actor and observer component locates agents, along with
//! its two occupancy backends.
//!
//! # Backends
//!
//! - [`ExclusiveGrid`]: at most one agent per cell
//! - [`OverlapGrid`]: several agents per cell when every party is overlappable
//!
//! Both keep the same invariant: an agent present in the grid sits in
//! exactly one cell, and that cell equals the agent's recorded position.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod exclusive;
pub mod grid;
pub mod overlap;

#[cfg(test)]
pub(crate) mod compliance;

pub use exclusive::ExclusiveGrid;
pub use grid::{new_grid, Grid, Occupancy, Occupants};
pub use overlap::OverlapGrid;
