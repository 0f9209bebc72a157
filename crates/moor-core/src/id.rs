//! Strongly-typed identifiers.

use std::borrow::Borrow;
use std::fmt;

/// Unique identifier of an agent within one simulation.
///
/// Agents are keyed by human-readable names (`"prey3"`, `"wall12"`), so
/// the id wraps an owned `String`. It implements `Borrow<str>` so maps
/// keyed by `AgentId` can be queried with a plain `&str`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(String);

impl AgentId {
    /// Create an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    fn from(v: &str) -> Self {
        Self(v.to_owned())
    }
}

impl From<String> for AgentId {
    fn from(v: String) -> Self {
        Self(v)
    }
}

impl Borrow<str> for AgentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Monotonically increasing step counter.
///
/// Zero after construction or reset; incremented once per completed step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
