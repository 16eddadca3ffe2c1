//! Mathematical utilities for the solver

/// Weighted entropy of a cell's remaining tiles
pub mod entropy;
