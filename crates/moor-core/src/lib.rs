//! Core types for the Moor grid-world simulation toolkit.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other Moor crate: agent identifiers,
//! grid positions and offsets, the capability-composed [`Agent`] record,
//! observation encodings, and the error taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod encoding;
pub mod error;
pub mod id;
pub mod position;

pub use agent::{Agent, AgentBuilder, AgentMap, AttackProfile};
pub use error::{AgentError, ConfigError, LookupError};
pub use id::{AgentId, TickId};
pub use position::{DistanceMetric, Offset, Position};
