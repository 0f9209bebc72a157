//! Grid positions, relative offsets, and distance metrics.
//!
//! Positions are `(row, col)` pairs with row 0 at the top of the grid.
//! Signed components let callers form out-of-bounds targets (e.g. a move
//! off the edge) that the grid then rejects instead of wrapping.

use std::fmt;
use std::ops::{Add, Sub};

/// An absolute cell index `(row, col)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Row index, increasing downward.
    pub row: i32,
    /// Column index, increasing rightward.
    pub col: i32,
}

impl Position {
    /// Construct a position.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Whether this position lies within `[0, rows) x [0, cols)`.
    pub fn in_bounds(self, rows: u32, cols: u32) -> bool {
        self.row >= 0 && self.col >= 0 && (self.row as u32) < rows && (self.col as u32) < cols
    }

    /// Row-major flat index, or `None` if out of bounds.
    pub fn ravel(self, rows: u32, cols: u32) -> Option<usize> {
        if self.in_bounds(rows, cols) {
            Some(self.row as usize * cols as usize + self.col as usize)
        } else {
            None
        }
    }

    /// Inverse of [`ravel`](Self::ravel).
    pub fn unravel(index: usize, cols: u32) -> Self {
        let cols = cols as usize;
        Self::new((index / cols) as i32, (index % cols) as i32)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

/// A relative displacement `(dr, dc)` between two cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    /// Row delta.
    pub dr: i32,
    /// Column delta.
    pub dc: i32,
}

impl Offset {
    /// The zero displacement.
    pub const ZERO: Offset = Offset { dr: 0, dc: 0 };

    /// Construct an offset.
    pub const fn new(dr: i32, dc: i32) -> Self {
        Self { dr, dc }
    }

    /// Chebyshev (king-move) length: `max(|dr|, |dc|)`.
    pub fn chebyshev(self) -> u32 {
        self.dr.unsigned_abs().max(self.dc.unsigned_abs())
    }

    /// Euclidean length.
    pub fn euclidean(self) -> f64 {
        f64::from(self.dr).hypot(f64::from(self.dc))
    }

    /// Whether both components lie within `[-range, range]`.
    pub fn within(self, range: u32) -> bool {
        self.chebyshev() <= range
    }
}

impl From<(i32, i32)> for Offset {
    fn from((dr, dc): (i32, i32)) -> Self {
        Self { dr, dc }
    }
}

impl Add<Offset> for Position {
    type Output = Position;

    fn add(self, rhs: Offset) -> Position {
        Position::new(self.row + rhs.dr, self.col + rhs.dc)
    }
}

impl Sub for Position {
    type Output = Offset;

    fn sub(self, rhs: Position) -> Offset {
        Offset::new(self.row - rhs.row, self.col - rhs.col)
    }
}

/// Distance metric used for range checks (attack reach).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DistanceMetric {
    /// `max(|dr|, |dc|)`: a square neighbourhood.
    #[default]
    Chebyshev,
    /// `sqrt(dr^2 + dc^2)`: a disk neighbourhood.
    Euclidean,
}

impl DistanceMetric {
    /// Whether `offset` lies within `range` under this metric.
    pub fn within(self, offset: Offset, range: u32) -> bool {
        match self {
            Self::Chebyshev => offset.chebyshev() <= range,
            Self::Euclidean => offset.euclidean() <= f64::from(range),
        }
    }
}
