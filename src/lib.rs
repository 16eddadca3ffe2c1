//! Overlapping-model wave function collapse
//!
//! Patterns are cut from a palette-indexed sample, merged into weighted tiles
//! and linked by pixel-overlap adjacency. A `Session` then fills an output grid
//! by repeatedly collapsing the lowest-entropy cell and propagating the bans
//! this causes, until every cell holds one tile or a cell runs out of tiles.

#![forbid(unsafe_code)]

/// Cells, propagation, selection and the solve loop
pub mod algorithm;
/// Pattern extraction and adjacency learning from samples
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Entropy helpers
pub mod math;
/// Directions, grid geometry and tiles
pub mod spatial;

pub use algorithm::model::TileModel;
pub use algorithm::session::{RunOutcome, Session, SessionState, StepOutcome};
pub use analysis::patterns::TileModelBuilder;
pub use io::error::{AlgorithmError, Result};
pub use spatial::{Direction, GridShape, Palette, Pattern, Tile};
