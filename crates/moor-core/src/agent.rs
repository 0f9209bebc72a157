//! The capability-composed [`Agent`] record.
//!
//! Every agent has an id, an observation encoding, and a grid position.
//! Everything else is an optional capability: an agent that can see has
//! a `view_range`, an agent that can fight has an [`AttackProfile`], and
//! so on. Components query capabilities directly instead of switching on
//! an agent "type"; a wall is simply an agent with `view_blocking` set
//! and no other capabilities.

use crate::encoding;
use crate::error::AgentError;
use crate::id::AgentId;
use crate::position::Position;
use indexmap::IndexMap;

/// Agents keyed by id, iterated in insertion order.
///
/// Insertion order is the deterministic tie-break for every component
/// that scans agents (attack target selection, random placement).
pub type AgentMap = IndexMap<AgentId, Agent>;

/// Reach, damage and hit probability of an attacking agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackProfile {
    /// Maximum distance (in cells) to a valid target.
    pub range: u32,
    /// Health removed from the target on a hit, in `[0, 1]`.
    pub strength: f64,
    /// Probability that an attack with an eligible target lands, in `[0, 1]`.
    pub accuracy: f64,
}

/// A simulation entity.
///
/// Construct through [`Agent::builder`], which validates every attribute.
/// The grid and position state own `position`; other components read it.
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    id: AgentId,
    encoding: i32,
    render_shape: char,
    view_blocking: bool,
    overlappable: bool,
    initial_position: Option<Position>,
    position: Option<Position>,
    view_range: Option<u32>,
    move_range: Option<u32>,
    resource_view: Option<u32>,
    team: Option<u32>,
    initial_health: Option<f64>,
    health: Option<f64>,
    attack: Option<AttackProfile>,
    max_harvest: Option<f64>,
}

impl Agent {
    /// Start building an agent with the given id.
    ///
    /// Defaults: encoding 1, not view-blocking, not overlappable,
    /// no capabilities.
    pub fn builder(id: impl Into<AgentId>) -> AgentBuilder {
        AgentBuilder {
            agent: Agent {
                id: id.into(),
                encoding: 1,
                render_shape: 's',
                view_blocking: false,
                overlappable: false,
                initial_position: None,
                position: None,
                view_range: None,
                move_range: None,
                resource_view: None,
                team: None,
                initial_health: None,
                health: None,
                attack: None,
                max_harvest: None,
            },
        }
    }

    /// An immobile, view-blocking wall with encoding 1.
    pub fn wall(id: impl Into<AgentId>) -> AgentBuilder {
        Self::builder(id).encoding(1).view_blocking(true)
    }

    /// A moving, observing explorer with encoding 2.
    pub fn explorer(id: impl Into<AgentId>, view_range: u32, move_range: u32) -> AgentBuilder {
        Self::builder(id)
            .encoding(2)
            .render_shape('o')
            .view_range(view_range)
            .move_range(move_range)
    }

    /// Unique id.
    pub fn id(&self) -> &AgentId {
        &self.id
    }

    /// Value other agents observe in this agent's cell.
    pub fn encoding(&self) -> i32 {
        self.encoding
    }

    /// Marker a renderer may use to draw this agent.
    pub fn render_shape(&self) -> char {
        self.render_shape
    }

    /// Whether this agent hides the cells behind it from observers.
    pub fn view_blocking(&self) -> bool {
        self.view_blocking
    }

    /// Whether this agent may share a cell on an overlapping grid.
    pub fn overlappable(&self) -> bool {
        self.overlappable
    }

    /// Position assigned at every reset, if fixed.
    pub fn initial_position(&self) -> Option<Position> {
        self.initial_position
    }

    /// Current cell, or `None` before the first reset or after removal.
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Record the agent's cell.
    ///
    /// Only grid backends call this, together with their own index update;
    /// move agents through `PositionState` or the world instead.
    #[doc(hidden)]
    pub fn set_position(&mut self, position: Position) {
        self.position = Some(position);
    }

    /// Forget the agent's cell after it leaves the grid.
    #[doc(hidden)]
    pub fn clear_position(&mut self) {
        self.position = None;
    }

    /// Observation radius, if the agent observes the grid.
    pub fn view_range(&self) -> Option<u32> {
        self.view_range
    }

    /// Maximum per-axis move distance, if the agent moves.
    pub fn move_range(&self) -> Option<u32> {
        self.move_range
    }

    /// Resource observation radius, if the agent observes resources.
    pub fn resource_view(&self) -> Option<u32> {
        self.resource_view
    }

    /// Team assignment.
    pub fn team(&self) -> Option<u32> {
        self.team
    }

    /// Health restored at reset.
    pub fn initial_health(&self) -> Option<f64> {
        self.initial_health
    }

    /// Current health in `[0, 1]`, if the agent has health.
    pub fn health(&self) -> Option<f64> {
        self.health
    }

    /// Set health, clamped into `[0, 1]`.
    ///
    /// No-op for agents without the health capability. NaN clamps to 0.
    pub fn set_health(&mut self, value: f64) {
        if self.health.is_some() {
            let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
            self.health = Some(v);
        }
    }

    /// Alive iff health is above zero. Agents without health never die.
    pub fn is_alive(&self) -> bool {
        self.health.is_none_or(|h| h > 0.0)
    }

    /// Attack capability.
    pub fn attack(&self) -> Option<&AttackProfile> {
        self.attack.as_ref()
    }

    /// Maximum amount harvested per step, if the agent harvests.
    pub fn max_harvest(&self) -> Option<f64> {
        self.max_harvest
    }
}

/// Builder for [`Agent`].
///
/// All setters are infallible; [`build`](Self::build) validates.
#[derive(Clone, Debug)]
pub struct AgentBuilder {
    agent: Agent,
}

impl AgentBuilder {
    /// Set the observation encoding. Must not be 0, -1 or -2.
    pub fn encoding(mut self, encoding: i32) -> Self {
        self.agent.encoding = encoding;
        self
    }

    /// Set the render marker.
    pub fn render_shape(mut self, shape: char) -> Self {
        self.agent.render_shape = shape;
        self
    }

    /// Set whether the agent occludes observers' line of sight.
    pub fn view_blocking(mut self, blocking: bool) -> Self {
        self.agent.view_blocking = blocking;
        self
    }

    /// Set whether the agent may share cells on an overlapping grid.
    pub fn overlappable(mut self, overlappable: bool) -> Self {
        self.agent.overlappable = overlappable;
        self
    }

    /// Fix the cell the agent starts in at every reset.
    pub fn initial_position(mut self, position: impl Into<Position>) -> Self {
        self.agent.initial_position = Some(position.into());
        self
    }

    /// Give the agent a grid view of radius `range`.
    pub fn view_range(mut self, range: u32) -> Self {
        self.agent.view_range = Some(range);
        self
    }

    /// Let the agent move up to `range` cells per axis per step.
    pub fn move_range(mut self, range: u32) -> Self {
        self.agent.move_range = Some(range);
        self
    }

    /// Give the agent a resource view of radius `range`.
    pub fn resource_view(mut self, range: u32) -> Self {
        self.agent.resource_view = Some(range);
        self
    }

    /// Assign a team.
    pub fn team(mut self, team: u32) -> Self {
        self.agent.team = Some(team);
        self
    }

    /// Give the agent health, starting (and reset) at `initial` in `(0, 1]`.
    pub fn health(mut self, initial: f64) -> Self {
        self.agent.initial_health = Some(initial);
        self.agent.health = Some(initial);
        self
    }

    /// Let the agent attack.
    pub fn attack(mut self, range: u32, strength: f64, accuracy: f64) -> Self {
        self.agent.attack = Some(AttackProfile {
            range,
            strength,
            accuracy,
        });
        self
    }

    /// Let the agent harvest up to `max` resource per step.
    pub fn max_harvest(mut self, max: f64) -> Self {
        self.agent.max_harvest = Some(max);
        self
    }

    /// Validate and produce the agent.
    ///
    /// # Errors
    ///
    /// - [`AgentError::EmptyId`] for an empty id
    /// - [`AgentError::ReservedEncoding`] for encodings 0, -1, -2
    /// - [`AgentError::OutOfRange`] for initial health outside `(0, 1]`,
    ///   attack strength or accuracy outside `[0, 1]`, or a negative or
    ///   non-finite max harvest
    pub fn build(self) -> Result<Agent, AgentError> {
        let agent = self.agent;
        if agent.id.as_str().is_empty() {
            return Err(AgentError::EmptyId);
        }
        if encoding::is_reserved(agent.encoding) {
            return Err(AgentError::ReservedEncoding {
                agent: agent.id,
                value: agent.encoding,
            });
        }
        let out_of_range = |attribute, value, expected| AgentError::OutOfRange {
            agent: agent.id.clone(),
            attribute,
            value,
            expected,
        };
        if let Some(h) = agent.initial_health {
            if !(h > 0.0 && h <= 1.0) {
                return Err(out_of_range("initial_health", h, "a value in (0, 1]"));
            }
        }
        if let Some(a) = &agent.attack {
            if !(0.0..=1.0).contains(&a.strength) {
                return Err(out_of_range("attack_strength", a.strength, "a value in [0, 1]"));
            }
            if !(0.0..=1.0).contains(&a.accuracy) {
                return Err(out_of_range("attack_accuracy", a.accuracy, "a value in [0, 1]"));
            }
        }
        if let Some(m) = agent.max_harvest {
            if !m.is_finite() || m < 0.0 {
                return Err(out_of_range("max_harvest", m, "a finite value >= 0"));
            }
        }
        Ok(agent)
    }
}
