//! Input/output, configuration and error handling around the solver

/// Command-line interface and batch file processing
pub mod cli;
/// Solver constants and defaults
pub mod configuration;
/// Error types and result aliases
pub mod error;
/// PNG sample loading and result export
pub mod image;
/// Terminal progress display for batch runs
pub mod progress;
