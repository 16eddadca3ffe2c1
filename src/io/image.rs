//! PNG sample loading and result export
//!
//! Colours are mapped to palette indices starting at 1. Index 0 is reserved
//! for unresolved cells and is exported as transparent black.

use crate::io::configuration::UNRESOLVED_PIXEL;
use crate::io::error::{AlgorithmError, Result, invalid_source};
use image::{ImageBuffer, Rgba, RgbaImage};
use ndarray::Array2;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Colour of index 0 in every colour table
pub const UNRESOLVED_COLOR: [u8; 4] = [0, 0, 0, 0];

/// A sample image converted to palette indices
#[derive(Clone, Debug)]
pub struct SampleImage {
    pixels: Array2<u8>,
    colors: Vec<[u8; 4]>,
}

impl SampleImage {
    /// Load a PNG and index its colours
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened or decoded
    /// - The image has more distinct colours than fit in a byte index
    pub fn from_png_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img = image::open(&path_buf).map_err(|e| AlgorithmError::ImageLoad {
            path: path_buf,
            source: e,
        })?;
        let rgba_img = img.to_rgba8();

        let (width, height) = (rgba_img.width() as usize, rgba_img.height() as usize);
        let pixels: Vec<[u8; 4]> = rgba_img.pixels().map(|pixel| pixel.0).collect();
        Self::from_rgba(width, height, &pixels)
    }

    /// Index a row-major RGBA buffer
    ///
    /// Colours are sorted so the same image always yields the same indices.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The buffer is empty or does not hold `width * height` pixels
    /// - There are more than 255 distinct colours
    pub fn from_rgba(width: usize, height: usize, pixels: &[[u8; 4]]) -> Result<Self> {
        if width == 0 || height == 0 || pixels.len() != width * height {
            return Err(invalid_source(&format!(
                "Expected {width}x{height} pixels, got {}",
                pixels.len()
            )));
        }

        let mut unique_colors: Vec<[u8; 4]> = pixels
            .iter()
            .copied()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        unique_colors.sort_unstable();

        if unique_colors.len() > usize::from(u8::MAX) {
            return Err(invalid_source(&format!(
                "Sample has {} colours, at most {} are supported",
                unique_colors.len(),
                u8::MAX
            )));
        }

        let color_mapping: HashMap<[u8; 4], u8> = unique_colors
            .iter()
            .enumerate()
            .map(|(index, &color)| (color, (index + 1) as u8))
            .collect();

        let indexed: Vec<u8> = pixels
            .iter()
            .map(|color| color_mapping.get(color).copied().unwrap_or(UNRESOLVED_PIXEL))
            .collect();
        let pixels = Array2::from_shape_vec((height, width), indexed).map_err(|e| {
            invalid_source(&format!("Sample does not form a {width}x{height} grid: {e}"))
        })?;

        let mut colors = Vec::with_capacity(unique_colors.len() + 1);
        colors.push(UNRESOLVED_COLOR);
        colors.extend(unique_colors);

        Ok(Self { pixels, colors })
    }

    /// Palette-indexed pixels, indexed `(y, x)`
    pub const fn pixels(&self) -> &Array2<u8> {
        &self.pixels
    }

    /// Colour of each index; entry 0 is the unresolved colour
    pub fn colors(&self) -> &[[u8; 4]] {
        &self.colors
    }

    /// Number of distinct colours in the sample
    pub fn color_count(&self) -> usize {
        self.colors.len().saturating_sub(1)
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }
}

/// Write a solve result as a PNG with one pixel per cell
///
/// # Errors
///
/// Returns an error if:
/// - `result` does not hold `width * height` values
/// - A value has no entry in `colors`
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_result_as_png(
    result: &[u8],
    width: usize,
    height: usize,
    colors: &[[u8; 4]],
    output_path: &Path,
) -> Result<()> {
    if result.len() != width * height {
        return Err(invalid_source(&format!(
            "Result holds {} cells, expected {width}x{height}",
            result.len()
        )));
    }

    let mut img: RgbaImage = ImageBuffer::new(width as u32, height as u32);
    for (index, &value) in result.iter().enumerate() {
        let color = colors
            .get(usize::from(value))
            .copied()
            .ok_or(AlgorithmError::InvalidTileIndex {
                index: usize::from(value),
                max_tiles: colors.len(),
            })?;
        let x = (index % width) as u32;
        let y = (index / width) as u32;
        img.put_pixel(x, y, Rgba(color));
    }

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
