//! Model construction from sample images

/// Overlapping pattern extraction and adjacency learning
pub mod patterns;
