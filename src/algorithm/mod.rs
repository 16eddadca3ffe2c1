/// Possibility sets over palette indices
pub mod bitset;
/// Per-position constraint state and weighted collapse
pub mod cell;
/// Palette and output size, the entry point for starting sessions
pub mod model;
/// Grid ownership and ban propagation
pub mod propagation;
/// Minimum-entropy cell selection and weighted draws
pub mod selection;
/// The observe/propagate solve loop
pub mod session;
