//! Reserved observation encodings.
//!
//! Observers report each visible cell as an integer. Agents carry a
//! nonzero `encoding` that identifies their type or team; the values
//! below are reserved and rejected by [`AgentBuilder`](crate::AgentBuilder).

/// An empty, visible cell.
pub const EMPTY: i32 = 0;

/// A cell outside the grid bounds.
pub const OUT_OF_BOUNDS: i32 = -1;

/// A cell hidden behind a view-blocking agent.
pub const MASKED: i32 = -2;

/// Whether `value` collides with a reserved sentinel.
pub fn is_reserved(value: i32) -> bool {
    matches!(value, EMPTY | OUT_OF_BOUNDS | MASKED)
}
