//! Per-step metrics.

/// Timing and activity counters collected during a single step.
///
/// Durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the whole step.
    pub total_us: u64,
    /// Per-phase times: `(phase, microseconds)` in execution order.
    pub phase_us: Vec<(&'static str, u64)>,
    /// Move requests resolved.
    pub moves_attempted: u32,
    /// Move requests that ended on the target cell.
    pub moves_succeeded: u32,
    /// Attacks that hit a target.
    pub attacks_landed: u32,
    /// Total resource harvested.
    pub harvested: f64,
    /// Agents that died during the step.
    pub deaths: u32,
}
