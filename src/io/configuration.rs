//! Solver constants and runtime configuration defaults

/// Scale of the random perturbation added to cell entropies when searching
/// for the minimum, so ties do not always resolve in raster order
pub const ENTROPY_NOISE: f64 = 1e-6;

/// Pixel value reported for cells that are not resolved to a single tile
pub const UNRESOLVED_PIXEL: u8 = 0;

/// Largest symmetry count (identity, rotations and their mirror images)
pub const MAX_SYMMETRY: usize = 8;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default side length of the extracted patterns
pub const DEFAULT_PATTERN_SIZE: usize = 3;

/// Default number of symmetry variants kept per pattern
pub const DEFAULT_SYMMETRY: usize = MAX_SYMMETRY;

/// Default output width in cells
pub const DEFAULT_OUTPUT_WIDTH: usize = 48;

/// Default output height in cells
pub const DEFAULT_OUTPUT_HEIGHT: usize = 48;

/// Default step budget per attempt (0 is unbounded)
pub const DEFAULT_STEP_LIMIT: usize = 0;

/// Default number of seeds tried before giving up on a sample
pub const DEFAULT_ATTEMPTS: usize = 10;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

/// Steps between progress bar refreshes
pub const PROGRESS_UPDATE_STEPS: usize = 64;
