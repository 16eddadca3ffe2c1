use crate::{
    algorithm::session::Session,
    analysis::patterns::TileModelBuilder,
    io::error::Result,
    spatial::{grid::GridShape, tiles::Palette},
};

/// A palette paired with the output grid it will be solved on
///
/// Building the model is the expensive part; sessions are cheap to start from
/// it, one per seed.
#[derive(Clone, Debug)]
pub struct TileModel {
    palette: Palette,
    shape: GridShape,
}

impl TileModel {
    /// Pair an existing palette with an output size
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either output dimension is zero
    pub fn new(palette: Palette, width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            palette,
            shape: GridShape::new(width, height)?,
        })
    }

    /// Learn an overlapping model from a palette-indexed sample
    ///
    /// `sample` is row-major with `sample_width` pixels per row.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - an output dimension or the pattern size is zero
    /// - `symmetry` is outside 1..=8
    /// - the sample is empty, ragged, or smaller than a pattern when not periodic
    pub fn overlapping(
        pattern_size: usize,
        width: usize,
        height: usize,
        sample: &[u8],
        sample_width: usize,
        periodic: bool,
        symmetry: usize,
    ) -> Result<Self> {
        let palette = TileModelBuilder::new(pattern_size)?
            .periodic(periodic)
            .symmetry(symmetry)?
            .build_from_pixels(sample, sample_width)?;
        Self::new(palette, width, height)
    }

    /// Start a solve with its own seeded random source
    pub fn init(&self, seed: u64) -> Session {
        Session::new(self.palette.clone(), self.shape, seed)
    }

    /// The learned tiles
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Output grid geometry
    pub const fn shape(&self) -> GridShape {
        self.shape
    }

    /// Output width in cells
    pub const fn width(&self) -> usize {
        self.shape.width()
    }

    /// Output height in cells
    pub const fn height(&self) -> usize {
        self.shape.height()
    }

    /// Side length of every tile's pattern
    pub fn pattern_size(&self) -> usize {
        self.palette.pattern_size()
    }
}
