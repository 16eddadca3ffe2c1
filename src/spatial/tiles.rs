//! Patterns, weighted tiles and the shared tile palette
//!
//! A `Pattern` is the raw NxN pixel block cut from a sample. A `Tile` is a
//! pattern that made it into the palette: it carries the occurrence weight and,
//! per direction, the indices of every tile allowed next to it. Tiles are only
//! ever compared by pixel content, never by identity.

use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::math::entropy::{log_weight, weighted_entropy};
use crate::spatial::direction::{DIRECTION_COUNT, Direction};
use std::sync::Arc;

/// Square block of palette-indexed pixels stored row-major
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pattern {
    pixels: Box<[u8]>,
    size: usize,
}

impl Pattern {
    /// Wrap a pixel buffer, deriving the side length from its length
    ///
    /// # Errors
    ///
    /// Returns `NonSquarePattern` if the pixel count is not a non-zero perfect
    /// square, and `PatternSizeMismatch` if `size` is given and disagrees with
    /// the derived side length.
    pub fn new(pixels: Vec<u8>, size: Option<usize>) -> Result<Self> {
        let len = pixels.len();
        let derived = len.isqrt();
        if len == 0 || derived * derived != len {
            return Err(AlgorithmError::NonSquarePattern { len });
        }

        if let Some(expected) = size
            && expected != derived
        {
            return Err(AlgorithmError::PatternSizeMismatch {
                expected,
                actual: derived,
            });
        }

        Ok(Self {
            pixels: pixels.into_boxed_slice(),
            size: derived,
        })
    }

    /// Side length N
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Row-major pixel values
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the pattern
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.pixels.get(x + y * self.size).copied()
    }

    /// Quarter turn clockwise (y pointing down): the left column becomes the top row
    #[must_use]
    pub fn rotated(&self) -> Self {
        let n = self.size;
        self.remap(|ox, oy| self.pixel(oy, n - 1 - ox))
    }

    /// Mirror across the vertical axis
    #[must_use]
    pub fn flipped(&self) -> Self {
        let n = self.size;
        self.remap(|ox, oy| self.pixel(n - 1 - ox, oy))
    }

    fn remap<F>(&self, source: F) -> Self
    where
        F: Fn(usize, usize) -> Option<u8>,
    {
        let n = self.size;
        let pixels = (0..n)
            .flat_map(|oy| (0..n).map(move |ox| (ox, oy)))
            .map(|(ox, oy)| source(ox, oy).unwrap_or(0))
            .collect();

        Self { pixels, size: n }
    }

    /// Test whether `other`, placed one step away in `direction`, agrees with
    /// this pattern on every overlapping pixel
    pub fn agrees(&self, other: &Self, direction: Direction) -> bool {
        if self.size != other.size {
            return false;
        }

        let n = self.size as isize;
        let (dx, dy) = direction.offset();
        let (x_min, x_max) = (dx.max(0), n + dx.min(0));
        let (y_min, y_max) = (dy.max(0), n + dy.min(0));

        (y_min..y_max).all(|y| {
            (x_min..x_max).all(|x| {
                let own = self.pixel(x as usize, y as usize);
                let theirs = other.pixel((x - dx) as usize, (y - dy) as usize);
                own.is_some() && own == theirs
            })
        })
    }
}

/// A palette entry: pattern, occurrence weight and per-direction adjacency
///
/// Immutable once built. The adjacency lists are fixed slices; their order
/// carries no meaning.
#[derive(Clone, Debug)]
pub struct Tile {
    pattern: Pattern,
    weight: f64,
    log_weight: f64,
    index: usize,
    adjacency: [Box<[usize]>; DIRECTION_COUNT],
}

impl Tile {
    /// Build a tile from its pattern, weight and adjacency lists (indexed by
    /// `Direction::index`)
    ///
    /// The palette index is assigned when the tile is placed in a `Palette`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when the weight is not a finite positive number
    pub fn new(
        pattern: Pattern,
        weight: f64,
        adjacency: [Vec<usize>; DIRECTION_COUNT],
    ) -> Result<Self> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(invalid_parameter("weight", &weight, &"must be positive"));
        }

        Ok(Self {
            pattern,
            weight,
            log_weight: log_weight(weight),
            index: 0,
            adjacency: adjacency.map(Vec::into_boxed_slice),
        })
    }

    /// The tile's pixel pattern
    pub const fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Occurrence weight
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// `weight * ln(weight)`
    pub const fn log_weight(&self) -> f64 {
        self.log_weight
    }

    /// Position of this tile in its palette
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Pixel reported for a cell resolved to this tile (the top-left pixel)
    pub fn representative(&self) -> u8 {
        self.pattern.pixels().first().copied().unwrap_or(0)
    }

    /// Indices of tiles allowed in the neighbouring cell reached via `direction`
    pub fn compatible(&self, direction: Direction) -> &[usize] {
        self.adjacency
            .get(direction.index())
            .map(|tiles| &**tiles)
            .unwrap_or_default()
    }

    /// Whether tile `other` may sit next to this one in `direction`
    pub fn is_compatible(&self, direction: Direction, other: usize) -> bool {
        self.compatible(direction).contains(&other)
    }
}

/// Ordered, shared, read-only list of tiles
///
/// Cloning is cheap; independent sessions share the same palette.
#[derive(Clone, Debug)]
pub struct Palette {
    tiles: Arc<[Tile]>,
}

impl Palette {
    /// Assign each tile its position as index and validate the adjacency lists
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `tiles` is empty
    /// - tiles have differing pattern sizes
    /// - an adjacency list names an index outside the palette
    pub fn new(mut tiles: Vec<Tile>) -> Result<Self> {
        let Some(first) = tiles.first() else {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "Palette contains no tiles".to_string(),
            });
        };

        let size = first.pattern.size();
        if let Some(odd) = tiles.iter().find(|tile| tile.pattern.size() != size) {
            return Err(invalid_parameter(
                "pattern size",
                &odd.pattern.size(),
                &format!("every tile in a palette must be {size}x{size}"),
            ));
        }

        let max_tiles = tiles.len();
        for (index, tile) in tiles.iter_mut().enumerate() {
            tile.index = index;
            if let Some(&bad) = tile
                .adjacency
                .iter()
                .flat_map(|list| list.iter())
                .find(|&&i| i >= max_tiles)
            {
                return Err(AlgorithmError::InvalidTileIndex {
                    index: bad,
                    max_tiles,
                });
            }
        }

        Ok(Self {
            tiles: tiles.into(),
        })
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false for a constructed palette
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile at `index`
    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// All tiles in index order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Iterate tiles in index order
    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    /// Side length shared by every pattern
    pub fn pattern_size(&self) -> usize {
        self.tiles.first().map_or(0, |tile| tile.pattern.size())
    }

    /// Sum of all tile weights
    pub fn total_weight(&self) -> f64 {
        self.tiles.iter().map(Tile::weight).sum()
    }

    /// Entropy of a cell where every tile is still possible
    pub fn starting_entropy(&self) -> f64 {
        let sum_of_log_weights = self.tiles.iter().map(Tile::log_weight).sum();
        weighted_entropy(self.total_weight(), sum_of_log_weights)
    }

    /// Whether every registration `a -> b` in direction `d` is mirrored by
    /// `b -> a` in the opposite direction
    pub fn is_adjacency_symmetric(&self) -> bool {
        self.tiles.iter().all(|tile| {
            Direction::ALL.iter().all(|&direction| {
                tile.compatible(direction).iter().all(|&other| {
                    self.get(other)
                        .is_some_and(|t| t.is_compatible(direction.opposite(), tile.index))
                })
            })
        })
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}
