//! Overlapping-model construction from a palette-indexed sample
//!
//! Every NxN window of the sample becomes a pattern, optionally expanded with
//! its rotations and mirror images. Identical patterns are merged into one
//! tile whose weight counts the occurrences. Two tiles may be neighbours in a
//! direction when they agree on every pixel after a one-pixel shift.

use crate::{
    io::{
        configuration::MAX_SYMMETRY,
        error::{AlgorithmError, Result, invalid_parameter, invalid_source},
    },
    spatial::{
        direction::{DIRECTION_COUNT, Direction},
        tiles::{Palette, Pattern, Tile},
    },
};
use ndarray::{Array2, ArrayView2};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Builder for a palette learned from a sample image
#[derive(Clone, Copy, Debug)]
pub struct TileModelBuilder {
    pattern_size: usize,
    periodic: bool,
    symmetry: usize,
}

impl TileModelBuilder {
    /// Start a builder for NxN patterns, non-periodic with full symmetry
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `pattern_size` is zero
    pub fn new(pattern_size: usize) -> Result<Self> {
        if pattern_size == 0 {
            return Err(invalid_parameter(
                "pattern_size",
                &pattern_size,
                &"must be at least 1",
            ));
        }

        Ok(Self {
            pattern_size,
            periodic: false,
            symmetry: MAX_SYMMETRY,
        })
    }

    /// Treat the sample edges as wrapping when cutting windows
    #[must_use]
    pub const fn periodic(mut self, periodic: bool) -> Self {
        self.periodic = periodic;
        self
    }

    /// Keep the first `symmetry` variants of each window
    ///
    /// Variants come in the order: original, mirrored, rotated, rotated and
    /// mirrored, then the same pair for two and three quarter turns.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `symmetry` is outside 1..=8
    pub fn symmetry(mut self, symmetry: usize) -> Result<Self> {
        if !(1..=MAX_SYMMETRY).contains(&symmetry) {
            return Err(invalid_parameter(
                "symmetry",
                &symmetry,
                &format!("must be between 1 and {MAX_SYMMETRY}"),
            ));
        }

        self.symmetry = symmetry;
        Ok(self)
    }

    /// Configured pattern side length
    pub const fn pattern_size(&self) -> usize {
        self.pattern_size
    }

    /// Whether windows wrap around the sample edges
    pub const fn is_periodic(&self) -> bool {
        self.periodic
    }

    /// Configured number of variants per window
    pub const fn symmetry_count(&self) -> usize {
        self.symmetry
    }

    /// Build a palette from a row-major pixel slice `width` pixels wide
    ///
    /// # Errors
    ///
    /// Returns an error if the slice is empty or its length is not a multiple
    /// of `width`, or under the conditions of [`Self::build`].
    pub fn build_from_pixels(&self, pixels: &[u8], width: usize) -> Result<Palette> {
        if width == 0 || pixels.is_empty() {
            return Err(invalid_source(&"Sample image is empty"));
        }
        if pixels.len() % width != 0 {
            return Err(invalid_parameter(
                "sample_width",
                &width,
                &format!("does not divide the sample length {}", pixels.len()),
            ));
        }

        let height = pixels.len() / width;
        let sample = ArrayView2::from_shape((height, width), pixels).map_err(|e| {
            AlgorithmError::InvalidSourceData {
                reason: format!("Sample does not form a {width}x{height} grid: {e}"),
            }
        })?;
        self.build_view(sample)
    }

    /// Build a palette from a sample indexed `(y, x)`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the sample is empty
    /// - the sample is smaller than a pattern and not periodic
    pub fn build(&self, sample: &Array2<u8>) -> Result<Palette> {
        self.build_view(sample.view())
    }

    #[instrument(
        skip(self, sample),
        fields(n = self.pattern_size, periodic = self.periodic, symmetry = self.symmetry)
    )]
    fn build_view(&self, sample: ArrayView2<'_, u8>) -> Result<Palette> {
        let (height, width) = sample.dim();
        if width == 0 || height == 0 {
            return Err(invalid_source(&"Sample image is empty"));
        }

        let n = self.pattern_size;
        let (x_positions, y_positions) = if self.periodic {
            (width, height)
        } else {
            if width < n || height < n {
                return Err(invalid_source(&format!(
                    "Sample of {width}x{height} is smaller than a {n}x{n} pattern"
                )));
            }
            (width - n + 1, height - n + 1)
        };

        let mut patterns: Vec<Pattern> = Vec::new();
        let mut weights: Vec<f64> = Vec::new();
        let mut lookup: HashMap<Pattern, usize> = HashMap::new();

        for y in 0..y_positions {
            for x in 0..x_positions {
                let window = crop(&sample, x, y, n)?;
                for variant in self.variants(window) {
                    if let Some(&existing) = lookup.get(&variant) {
                        if let Some(weight) = weights.get_mut(existing) {
                            *weight += 1.0;
                        }
                    } else {
                        lookup.insert(variant.clone(), patterns.len());
                        patterns.push(variant);
                        weights.push(1.0);
                    }
                }
            }
        }

        let adjacency = adjacency_lists(&patterns);
        let tiles = patterns
            .into_iter()
            .zip(weights)
            .zip(adjacency)
            .map(|((pattern, weight), lists)| Tile::new(pattern, weight, lists))
            .collect::<Result<Vec<_>>>()?;

        let palette = Palette::new(tiles)?;
        debug!(
            tiles = palette.len(),
            total_weight = palette.total_weight(),
            "Built overlapping model"
        );
        Ok(palette)
    }

    fn variants(&self, pattern: Pattern) -> Vec<Pattern> {
        let mut variants = Vec::with_capacity(MAX_SYMMETRY);
        let mut current = pattern;
        while variants.len() < self.symmetry {
            let mirrored = current.flipped();
            let next = current.rotated();
            variants.push(current);
            if variants.len() < self.symmetry {
                variants.push(mirrored);
            }
            current = next;
        }
        variants
    }
}

/// Cut the NxN window whose top-left corner is `(x, y)`, wrapping at the edges
fn crop(sample: &ArrayView2<'_, u8>, x: usize, y: usize, n: usize) -> Result<Pattern> {
    let (height, width) = sample.dim();
    let pixels = (0..n)
        .flat_map(|dy| (0..n).map(move |dx| (dx, dy)))
        .map(|(dx, dy)| {
            sample
                .get(((y + dy) % height, (x + dx) % width))
                .copied()
                .unwrap_or(0)
        })
        .collect();
    Pattern::new(pixels, Some(n))
}

/// Pairwise overlap test over every unordered pair, registered both ways
fn adjacency_lists(patterns: &[Pattern]) -> Vec<[Vec<usize>; DIRECTION_COUNT]> {
    let mut lists: Vec<[Vec<usize>; DIRECTION_COUNT]> = (0..patterns.len())
        .map(|_| std::array::from_fn(|_| Vec::new()))
        .collect();

    for (i, first) in patterns.iter().enumerate() {
        for (j, second) in patterns.iter().enumerate().skip(i) {
            for direction in Direction::ALL {
                if !first.agrees(second, direction) {
                    continue;
                }

                if let Some(list) = lists.get_mut(i).and_then(|l| l.get_mut(direction.index())) {
                    list.push(j);
                }
                if i != j
                    && let Some(list) = lists
                        .get_mut(j)
                        .and_then(|l| l.get_mut(direction.opposite().index()))
                {
                    list.push(i);
                }
            }
        }
    }

    lists
}
