//! Error types for mesh validation and contour extraction.

use thiserror::Error;

/// All the ways building the index or extracting a contour can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SliceError {
    /// The mesh contains no triangles, so there is nothing to index.
    #[error("mesh contains no triangles")]
    EmptyMesh,

    /// A triangle has a NaN or infinite vertex coordinate.
    #[error("triangle {triangle} has a non-finite vertex coordinate")]
    NonFiniteVertex { triangle: usize },

    /// An index references a vertex past the end of the position list.
    #[error("vertex index {index} out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds { index: u32, vertex_count: usize },

    /// The extracted contour needs more points than the buffer can hold.
    /// Recoverable: grow the buffer to `needed` and retry the extraction.
    #[error("contour needs {needed} points but the buffer capacity is {capacity}")]
    BufferOverflow { needed: usize, capacity: usize },
}
