//! Spatial data structures
//!
//! This module contains spatial-related functionality including:
//! - The four adjacency directions
//! - Output grid geometry and neighbour lookup
//! - Patterns, tiles and the tile palette

/// Grid directions and their opposites
pub mod direction;
/// Grid geometry and coordinate arithmetic
pub mod grid;
/// Patterns, weighted tiles and palettes
pub mod tiles;

pub use direction::Direction;
pub use grid::GridShape;
pub use tiles::{Palette, Pattern, Tile};
