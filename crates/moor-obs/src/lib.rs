//! Local observations for Moor grid worlds.
//!
//! Observers turn world state into a square [`ObsWindow`] of side
//! `2 * range + 1` centred on the observing agent:
//!
//! - [`GridObserver`] reports agent encodings, hiding cells behind
//!   view-blocking agents (see [`occlusion`]).
//! - [`ResourceObserver`] reports resource values.
//!
//! Cells outside the grid read as [`OUT_OF_BOUNDS`](moor_core::encoding::OUT_OF_BOUNDS);
//! occluded cells read as [`MASKED`](moor_core::encoding::MASKED).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod grid_obs;
pub mod occlusion;
pub mod resource_obs;
pub mod window;

pub use grid_obs::GridObserver;
pub use occlusion::{occlusion_mask, Sector};
pub use resource_obs::ResourceObserver;
pub use window::ObsWindow;
