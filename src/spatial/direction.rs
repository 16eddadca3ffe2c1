//! The four grid directions used for tile adjacency and cell wiring

use crate::io::error::{AlgorithmError, Result};
use std::fmt;

/// Number of neighbour directions on the grid
pub const DIRECTION_COUNT: usize = 4;

/// One of the four orthogonal directions on a grid whose y axis grows downward
///
/// The discriminants are the direction indices used for per-direction tables,
/// so `opposite` is always `(index + 2) % 4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Positive x
    Right = 0,
    /// Negative y
    Up = 1,
    /// Negative x
    Left = 2,
    /// Positive y
    Down = 3,
}

impl Direction {
    /// All directions in index order
    pub const ALL: [Self; DIRECTION_COUNT] = [Self::Right, Self::Up, Self::Left, Self::Down];

    /// Look up a direction by its table index
    ///
    /// # Errors
    ///
    /// Returns `InvalidDirection` for any index outside `0..4`
    pub const fn from_index(index: usize) -> Result<Self> {
        match index {
            0 => Ok(Self::Right),
            1 => Ok(Self::Up),
            2 => Ok(Self::Left),
            3 => Ok(Self::Down),
            _ => Err(AlgorithmError::InvalidDirection { index }),
        }
    }

    /// Table index of this direction
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The direction pointing back the way this one came
    pub const fn opposite(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Left => Self::Right,
            Self::Down => Self::Up,
        }
    }

    /// Unit step `(dx, dy)` taken when moving in this direction
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Right => (1, 0),
            Self::Up => (0, -1),
            Self::Left => (-1, 0),
            Self::Down => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Right => "right",
            Self::Up => "up",
            Self::Left => "left",
            Self::Down => "down",
        };
        f.write_str(name)
    }
}
