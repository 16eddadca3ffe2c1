//! Output grid geometry
//!
//! Cells are stored row-major and never hold references to each other; every
//! neighbour relation is answered here by coordinate arithmetic. The grid does
//! not wrap, so border cells simply have fewer neighbours.

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::direction::Direction;

/// Width and height of a non-wrapping 4-neighbour grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridShape {
    width: usize,
    height: usize,
}

impl GridShape {
    /// Create a grid shape
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when either dimension is zero
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 {
            return Err(invalid_parameter("width", &width, &"must be at least 1"));
        }
        if height == 0 {
            return Err(invalid_parameter("height", &height, &"must be at least 1"));
        }
        Ok(Self { width, height })
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false; a shape has at least one cell
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert a row-major index into `(x, y)`
    pub const fn coordinate(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    /// Convert `(x, y)` into a row-major index, or `None` outside the grid
    pub const fn index(&self, x: isize, y: isize) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as isize || y >= self.height as isize {
            return None;
        }
        Some(x as usize + y as usize * self.width)
    }

    /// Index of the cell reached by stepping from `index` in `direction`
    pub const fn neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        let (x, y) = self.coordinate(index);
        let (dx, dy) = direction.offset();
        self.index(x as isize + dx, y as isize + dy)
    }
}
