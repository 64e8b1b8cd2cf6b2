//! BVH-accelerated plane/mesh cross-section extraction.
//!
//! Build a [`Bvh`] once over an immutable triangle mesh, then call
//! [`extract_contour`] every time the cutting plane moves: the traversal
//! prunes subtrees the plane misses and collects the chords where the plane
//! crosses triangle edges into a reusable [`SegmentBuffer`], ready to draw
//! as a dynamic line-segment buffer.

mod aabb;
pub mod bvh;
mod contour;
mod error;
mod mesh;
mod plane;

pub use aabb::Aabb;
pub use bvh::{Bvh, BvhNode, CollectingVisitor, FnVisitor, ShapecastVisitor};
pub use contour::{extract_contour, SegmentBuffer, DEFAULT_BUFFER_CAPACITY};
pub use error::SliceError;
pub use mesh::{TriMesh, Triangle};
pub use plane::{Plane, PlaneSide, PLANE_EPSILON};
