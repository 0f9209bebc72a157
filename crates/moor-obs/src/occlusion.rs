//! Line-of-sight occlusion behind view-blocking agents.
//!
//! For a blocker at offset `(rd, cd)` from the observer, two boundary lines
//! through the origin pass near the corners of the blocker's cell (the
//! corners sit at `rd ± 0.5`, `cd ± 0.5`). A window cell `(r, c)` on the far
//! side of the blocker is occluded when it falls strictly between the two
//! lines. Which corners bound the shadow depends on the [`Sector`] the
//! blocker lies in:
//!
//! | Sector | Test | Lower / left slope | Upper / right slope |
//! |--------|------|--------------------|---------------------|
//! | `E`  | `lo*c < r < hi*c` | `(rd-.5)/(cd-.5)` | `(rd+.5)/(cd-.5)` |
//! | `SE` | `lo*c < r < hi*c` | `(rd-.5)/(cd+.5)` | `(rd+.5)/(cd-.5)` |
//! | `S`  | `lo*r < c < hi*r` | `(cd-.5)/(rd-.5)` | `(cd+.5)/(rd-.5)` |
//! | `SW` | `lo*c < r < hi*c` | `(rd-.5)/(cd-.5)` | `(rd+.5)/(cd+.5)` |
//! | `W`  | `lo*c < r < hi*c` | `(rd-.5)/(cd+.5)` | `(rd+.5)/(cd+.5)` |
//! | `NW` | `lo*c < r < hi*c` | `(rd-.5)/(cd+.5)` | `(rd+.5)/(cd-.5)` |
//! | `N`  | `lo*r < c < hi*r` | `(cd-.5)/(rd+.5)` | `(cd+.5)/(rd+.5)` |
//! | `NE` | `lo*c < r < hi*c` | `(rd-.5)/(cd-.5)` | `(rd+.5)/(cd+.5)` |
//!
//! Only cells at least as far out as the blocker on each non-zero axis are
//! tested, and the blocker's own cell is never occluded. Per-blocker
//! shadows are OR-ed together.
//!
//! The diagonal sectors pair their denominators asymmetrically (`SE` and
//! `NW` use `cd-.5` above and `cd+.5` below, `SW` and `NE` the reverse), so
//! shadows are not exactly 8-fold symmetric. The table is kept as is:
//! observation fixtures depend on the exact cells it produces.

use crate::window::ObsWindow;
use moor_core::Offset;
use std::ops::RangeInclusive;

/// Direction of a blocker relative to the observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sector {
    /// Straight up (`dr < 0`, `dc == 0`).
    N,
    /// Up and right.
    NE,
    /// Straight right.
    E,
    /// Down and right.
    SE,
    /// Straight down.
    S,
    /// Down and left.
    SW,
    /// Straight left.
    W,
    /// Up and left.
    NW,
}

impl Sector {
    /// Classify `offset`; `None` for the observer's own cell.
    pub fn of(offset: Offset) -> Option<Sector> {
        use std::cmp::Ordering::*;
        Some(match (offset.dr.cmp(&0), offset.dc.cmp(&0)) {
            (Less, Equal) => Sector::N,
            (Less, Greater) => Sector::NE,
            (Equal, Greater) => Sector::E,
            (Greater, Greater) => Sector::SE,
            (Greater, Equal) => Sector::S,
            (Greater, Less) => Sector::SW,
            (Equal, Less) => Sector::W,
            (Less, Less) => Sector::NW,
            (Equal, Equal) => return None,
        })
    }
}

/// A shadow's two boundary lines through the observer.
#[derive(Clone, Copy, Debug)]
enum Shadow {
    /// Occludes `lower * c < r < upper * c`.
    ByColumn { lower: f64, upper: f64 },
    /// Occludes `left * r < c < right * r`.
    ByRow { left: f64, right: f64 },
}

impl Shadow {
    fn of(sector: Sector, blocker: Offset) -> Shadow {
        let rd = f64::from(blocker.dr);
        let cd = f64::from(blocker.dc);
        let by_col = |lower: f64, upper: f64| Shadow::ByColumn { lower, upper };
        match sector {
            Sector::E => by_col((rd - 0.5) / (cd - 0.5), (rd + 0.5) / (cd - 0.5)),
            Sector::SE => by_col((rd - 0.5) / (cd + 0.5), (rd + 0.5) / (cd - 0.5)),
            Sector::SW => by_col((rd - 0.5) / (cd - 0.5), (rd + 0.5) / (cd + 0.5)),
            Sector::W => by_col((rd - 0.5) / (cd + 0.5), (rd + 0.5) / (cd + 0.5)),
            Sector::NW => by_col((rd - 0.5) / (cd + 0.5), (rd + 0.5) / (cd - 0.5)),
            Sector::NE => by_col((rd - 0.5) / (cd - 0.5), (rd + 0.5) / (cd + 0.5)),
            Sector::S => Shadow::ByRow {
                left: (cd - 0.5) / (rd - 0.5),
                right: (cd + 0.5) / (rd - 0.5),
            },
            Sector::N => Shadow::ByRow {
                left: (cd - 0.5) / (rd + 0.5),
                right: (cd + 0.5) / (rd + 0.5),
            },
        }
    }

    fn covers(self, r: i32, c: i32) -> bool {
        let (r, c) = (f64::from(r), f64::from(c));
        match self {
            Shadow::ByColumn { lower, upper } => lower * c < r && r < upper * c,
            Shadow::ByRow { left, right } => left * r < c && c < right * r,
        }
    }
}

/// Offsets from `from` outward to the window edge, on the side of `from`.
fn outward(from: i32, range: i32) -> RangeInclusive<i32> {
    match from.signum() {
        1 => from..=range,
        -1 => -range..=from,
        _ => -range..=range,
    }
}

/// Mark the cells `blocker` hides from the window centre.
///
/// Blockers on the centre or outside the window cast no shadow.
pub fn cast_shadow(mask: &mut ObsWindow<bool>, blocker: Offset) {
    let range = mask.range();
    if !blocker.within(range) {
        return;
    }
    let Some(sector) = Sector::of(blocker) else {
        return;
    };
    let shadow = Shadow::of(sector, blocker);
    let v = range as i32;
    for r in outward(blocker.dr, v) {
        for c in outward(blocker.dc, v) {
            if (r, c) == (blocker.dr, blocker.dc) {
                continue;
            }
            if shadow.covers(r, c) {
                if let Some(cell) = mask.get_mut(Offset::new(r, c)) {
                    *cell = true;
                }
            }
        }
    }
}

/// Occlusion mask of a `range` window given blocker offsets.
///
/// `true` marks an occluded cell.
pub fn occlusion_mask(range: u32, blockers: impl IntoIterator<Item = Offset>) -> ObsWindow<bool> {
    let mut mask = ObsWindow::filled(range, false);
    for blocker in blockers {
        cast_shadow(&mut mask, blocker);
    }
    mask
}
