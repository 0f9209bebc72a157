//! Action resolution for Moor grid worlds.
//!
//! An [`Action`] carries one optional request per capability. Each actor
//! resolves one kind of request against the state it affects and reports
//! the outcome through its return value; illegal requests are silent
//! no-ops, never errors.
//!
//! | Actor | Request | Outcome |
//! |-------|---------|---------|
//! | [`MoveActor`] | `movement` | whether the agent moved |
//! | [`HarvestActor`] | `harvest` | amount taken from the field |
//! | [`AttackActor`] | `attack` | the chosen target, if any |
//!
//! Actors decide; they never apply health changes. The world composes the
//! health-transfer policy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod attack;
pub mod harvest;
pub mod movement;

pub use action::{Action, Direction};
pub use attack::{AttackActor, TargetFilter};
pub use harvest::HarvestActor;
pub use movement::MoveActor;
