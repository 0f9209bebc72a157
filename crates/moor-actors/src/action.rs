//! Per-step agent action payload.

use moor_core::Offset;

/// Unit moves for agents with `move_range >= 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Stay in place.
    Stay,
    /// Row - 1.
    North,
    /// Row + 1.
    South,
    /// Col + 1.
    East,
    /// Col - 1.
    West,
}

impl Direction {
    /// The displacement for this direction.
    pub fn offset(self) -> Offset {
        match self {
            Direction::Stay => Offset::ZERO,
            Direction::North => Offset::new(-1, 0),
            Direction::South => Offset::new(1, 0),
            Direction::East => Offset::new(0, 1),
            Direction::West => Offset::new(0, -1),
        }
    }
}

impl From<Direction> for Offset {
    fn from(d: Direction) -> Self {
        d.offset()
    }
}

/// What one agent asks to do in one step.
///
/// Every field is independent; an empty action is a no-op.
///
/// ```
/// use moor_actors::{Action, Direction};
///
/// let a = Action::moving(Direction::East).with_harvest(0.3);
/// assert!(a.movement.is_some());
/// assert!(!a.attack);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Action {
    /// Requested displacement, bounded per axis by the agent's move range.
    pub movement: Option<Offset>,
    /// Whether to attack.
    pub attack: bool,
    /// Requested harvest amount.
    pub harvest: Option<f64>,
}

impl Action {
    /// Request a move by `offset`.
    pub fn moving(offset: impl Into<Offset>) -> Self {
        Self {
            movement: Some(offset.into()),
            ..Self::default()
        }
    }

    /// Request an attack and nothing else.
    pub fn attacking() -> Self {
        Self {
            attack: true,
            ..Self::default()
        }
    }

    /// Request a harvest and nothing else.
    pub fn harvesting(amount: f64) -> Self {
        Self {
            harvest: Some(amount),
            ..Self::default()
        }
    }

    /// Add a move request.
    pub fn with_move(mut self, offset: impl Into<Offset>) -> Self {
        self.movement = Some(offset.into());
        self
    }

    /// Add an attack request.
    pub fn with_attack(mut self) -> Self {
        self.attack = true;
        self
    }

    /// Add a harvest request.
    pub fn with_harvest(mut self, amount: f64) -> Self {
        self.harvest = Some(amount);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_offsets() {
        assert_eq!(Offset::from(Direction::North), Offset::new(-1, 0));
        assert_eq!(Direction::West.offset(), Offset::new(0, -1));
        assert_eq!(Direction::Stay.offset(), Offset::ZERO);
    }

    #[test]
    fn builders_compose() {
        let a = Action::attacking().with_move(Offset::new(1, 1));
        assert!(a.attack);
        assert_eq!(a.movement, Some(Offset::new(1, 1)));
        assert_eq!(a.harvest, None);
        assert_eq!(Action::default(), Action { movement: None, attack: false, harvest: None });
    }
}
