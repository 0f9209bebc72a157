//! Square observation windows.

use moor_core::{Offset, Position};
use std::ops::{Index, IndexMut};

/// A `(2 * range + 1)`-square window of cells centred on an observer.
///
/// Storage is row-major. Cells are addressed either by window indices
/// `(row, col)` or by an [`Offset`] from the centre.
#[derive(Clone, Debug, PartialEq)]
pub struct ObsWindow<T> {
    range: u32,
    cells: Vec<T>,
}

impl<T: Clone> ObsWindow<T> {
    /// A window with every cell set to `value`.
    pub fn filled(range: u32, value: T) -> Self {
        let side = 2 * range as usize + 1;
        Self {
            range,
            cells: vec![value; side * side],
        }
    }

    /// Build a window by evaluating `f` at every offset, row-major.
    pub fn from_fn(range: u32, mut f: impl FnMut(Offset) -> T) -> Self {
        let r = range as i32;
        let cells = (-r..=r)
            .flat_map(|dr| (-r..=r).map(move |dc| Offset::new(dr, dc)))
            .map(&mut f)
            .collect();
        Self { range, cells }
    }

    /// Rows as nested vectors.
    pub fn to_nested(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }
}

impl<T> ObsWindow<T> {
    /// The view radius.
    pub fn range(&self) -> u32 {
        self.range
    }

    /// Side length.
    pub fn side(&self) -> usize {
        2 * self.range as usize + 1
    }

    /// Row-major cells.
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Mutable row-major cells.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// Iterate over rows.
    pub fn rows(&self) -> std::slice::Chunks<'_, T> {
        self.cells.chunks(self.side())
    }

    /// Window index of `offset`, `None` if it lies outside the window.
    pub fn index_of(&self, offset: Offset) -> Option<usize> {
        if !offset.within(self.range) {
            return None;
        }
        let r = self.range as i32;
        let centre = Position::new(r, r);
        (centre + offset).ravel(self.side() as u32, self.side() as u32)
    }

    /// Cell at `offset` from the centre.
    pub fn get(&self, offset: Offset) -> Option<&T> {
        self.index_of(offset).map(|i| &self.cells[i])
    }

    /// Mutable cell at `offset` from the centre.
    pub fn get_mut(&mut self, offset: Offset) -> Option<&mut T> {
        self.index_of(offset).map(move |i| &mut self.cells[i])
    }

    /// Cell under the observer.
    pub fn centre(&self) -> &T {
        &self.cells[self.cells.len() / 2]
    }
}

impl<T> Index<(usize, usize)> for ObsWindow<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(col < self.side(), "column {col} outside window");
        &self.cells[row * self.side() + col]
    }
}

impl<T> IndexMut<(usize, usize)> for ObsWindow<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(col < self.side(), "column {col} outside window");
        let side = self.side();
        &mut self.cells[row * side + col]
    }
}
