//! Error types for the Moor toolkit.
//!
//! Organized by when the failure is detected: agent construction,
//! world configuration (construction and reset), and lookups by id.
//! Illegal runtime actions are deliberately absent: they resolve to
//! zero-effect outcomes reported through return values.

use crate::id::AgentId;
use crate::position::Position;
use std::error::Error;
use std::fmt;

/// Invalid agent attribute values, detected by [`AgentBuilder::build`](crate::AgentBuilder::build).
#[derive(Clone, Debug, PartialEq)]
pub enum AgentError {
    /// The agent id is the empty string.
    EmptyId,
    /// The encoding collides with a reserved sentinel (0, -1, -2).
    ReservedEncoding {
        /// Offending agent.
        agent: AgentId,
        /// The reserved value.
        value: i32,
    },
    /// A numeric attribute lies outside its permitted range.
    OutOfRange {
        /// Offending agent.
        agent: AgentId,
        /// Attribute name (`"initial_health"`, `"attack_accuracy"`, ...).
        attribute: &'static str,
        /// The rejected value.
        value: f64,
        /// Human-readable description of the valid range.
        expected: &'static str,
    },
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "agent id must not be empty"),
            Self::ReservedEncoding { agent, value } => {
                write!(f, "agent '{agent}': encoding {value} is reserved")
            }
            Self::OutOfRange {
                agent,
                attribute,
                value,
                expected,
            } => write!(f, "agent '{agent}': {attribute} = {value}, expected {expected}"),
        }
    }
}

impl Error for AgentError {}

/// World configuration failures.
///
/// Raised by world construction and by `reset` before any state is
/// mutated, so a failed reset never leaves a partially populated grid.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The grid has zero rows or zero columns.
    EmptyGrid {
        /// Configured rows.
        rows: u32,
        /// Configured columns.
        cols: u32,
    },
    /// Two agents share the same id.
    DuplicateAgentId {
        /// The repeated id.
        agent: AgentId,
    },
    /// Two agents were given the same initial position.
    DuplicateInitialPosition {
        /// The agent whose placement was rejected.
        agent: AgentId,
        /// The agent already holding that position.
        occupant: AgentId,
        /// The contested position.
        position: Position,
    },
    /// An initial position lies outside the grid.
    InitialPositionOutOfBounds {
        /// Offending agent.
        agent: AgentId,
        /// The requested position.
        position: Position,
    },
    /// Fewer free cells remain than agents awaiting random placement.
    GridFull {
        /// Agents needing a random cell.
        needed: usize,
        /// Free cells left after fixed placement.
        available: usize,
    },
    /// A provided resource array does not match the grid shape.
    ResourceShape {
        /// Expected number of cells (`rows * cols`).
        expected: usize,
        /// Provided number of values.
        actual: usize,
    },
    /// A world-level parameter failed validation.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the failure.
        reason: String,
    },
    /// An agent failed attribute validation.
    Agent(AgentError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { rows, cols } => {
                write!(f, "grid must have at least one cell, got {rows}x{cols}")
            }
            Self::DuplicateAgentId { agent } => write!(f, "duplicate agent id '{agent}'"),
            Self::DuplicateInitialPosition {
                agent,
                occupant,
                position,
            } => write!(
                f,
                "agent '{agent}' has the same initial position {position} as '{occupant}'"
            ),
            Self::InitialPositionOutOfBounds { agent, position } => {
                write!(f, "agent '{agent}': initial position {position} is outside the grid")
            }
            Self::GridFull { needed, available } => write!(
                f,
                "cannot place {needed} agents randomly: only {available} free cells"
            ),
            Self::ResourceShape { expected, actual } => write!(
                f,
                "resource array has {actual} values, grid has {expected} cells"
            ),
            Self::InvalidParameter { name, reason } => write!(f, "{name}: {reason}"),
            Self::Agent(e) => write!(f, "{e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Agent(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AgentError> for ConfigError {
    fn from(e: AgentError) -> Self {
        Self::Agent(e)
    }
}

/// Failures when querying the world by agent id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupError {
    /// No agent with this id exists.
    UnknownAgent {
        /// The requested id.
        agent: String,
    },
    /// The agent exists but lacks the capability the query needs.
    MissingCapability {
        /// The agent queried.
        agent: AgentId,
        /// The capability name (`"view_range"`, ...).
        capability: &'static str,
    },
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAgent { agent } => write!(f, "unknown agent '{agent}'"),
            Self::MissingCapability { agent, capability } => {
                write!(f, "agent '{agent}' has no {capability}")
            }
        }
    }
}

impl Error for LookupError {}
