//! Moor: turn-based multi-agent grid worlds for reinforcement learning.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Moor sub-crates. For most users, adding `moor` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use moor::prelude::*;
//!
//! // A wall east of an explorer hides the cells behind it.
//! let config = WorldConfig {
//!     agents: vec![
//!         Agent::explorer("scout", 2, 1).initial_position((2, 2)).build().unwrap(),
//!         Agent::wall("wall").initial_position((2, 3)).build().unwrap(),
//!     ],
//!     ..WorldConfig::new(5, 5)
//! };
//! let mut world = GridWorld::new(config).unwrap();
//!
//! let window = world.grid_window("scout").unwrap();
//! assert_eq!(window[(2, 3)], 1);
//! assert_eq!(window[(2, 4)], moor::types::encoding::MASKED);
//!
//! let mut actions = Actions::new();
//! actions.insert("scout".into(), Action::moving(Direction::North));
//! let report = world.step(&actions);
//! assert_eq!(report.outcomes["scout"].moved, Some(true));
//! assert_eq!(world.current_tick(), TickId(1));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `moor-core` | Ids, positions, agents, errors, reserved encodings |
//! | [`grid`] | `moor-grid` | Exclusive and overlapping occupancy grids |
//! | [`state`] | `moor-state` | Position, resource and health components |
//! | [`actors`] | `moor-actors` | Actions and their move, harvest and attack resolution |
//! | [`obs`] | `moor-obs` | Observation windows and occlusion |
//! | [`engine`] | `moor-engine` | The `GridWorld` simulation loop |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and ids (`moor-core`).
///
/// Contains [`types::Agent`] and its builder, [`types::Position`] and
/// [`types::Offset`], the error enums and the reserved observation values
/// in [`types::encoding`].
pub use moor_core as types;

/// Occupancy grids (`moor-grid`).
///
/// Provides the [`grid::Grid`] trait with [`grid::ExclusiveGrid`] and
/// [`grid::OverlapGrid`] backends.
pub use moor_grid as grid;

/// State components (`moor-state`).
///
/// [`state::PositionState`], [`state::ResourceState`] and
/// [`state::LifeState`] own the mutable parts of a world.
pub use moor_state as state;

/// Actions and actors (`moor-actors`).
pub use moor_actors as actors;

/// Observation windows and occlusion (`moor-obs`).
///
/// [`obs::GridObserver`] and [`obs::ResourceObserver`] build square
/// [`obs::ObsWindow`]s centred on an agent.
pub use moor_obs as obs;

/// The simulation loop (`moor-engine`).
///
/// [`engine::GridWorld`] for `reset` / `step` / `get_obs` driven training
/// loops.
pub use moor_engine as engine;

/// Common imports for typical Moor usage.
///
/// ```rust
/// use moor::prelude::*;
/// ```
///
/// This imports the most frequently used types: agents and positions, the
/// world and its configuration, actions, and observation windows.
pub mod prelude {
    // Core types
    pub use moor_core::{Agent, AgentId, DistanceMetric, Offset, Position, TickId};

    // Errors
    pub use moor_core::{AgentError, ConfigError, LookupError};

    // Grid and state
    pub use moor_grid::{Grid, Occupancy};
    pub use moor_state::{LifeConfig, ResourceConfig};

    // Actions
    pub use moor_actors::{Action, Direction, TargetFilter};

    // Observation
    pub use moor_obs::ObsWindow;

    // Engine
    pub use moor_engine::{
        Actions, AttackConfig, DoneCondition, GridWorld, Observation, StepMetrics, StepReport,
        WorldConfig,
    };
}
