//! Bounding volume hierarchy over a triangle mesh.
//!
//! The tree is built once from an immutable [`TriMesh`](crate::TriMesh) and
//! queried repeatedly via [`Bvh::shapecast`]: a traversal driven by a bounds
//! predicate (prune whole subtrees) and a per-triangle callback (process the
//! leaves that survive). The contour extractor is one such visitor; tests
//! and ad-hoc queries can use [`CollectingVisitor`] or [`FnVisitor`].
//!
//! # Architecture
//!
//! - [`Bvh`]: the container, owning the mesh and the root node
//! - [`BvhNode`]: internal nodes (box + two children) and leaves (box +
//!   bounded triangle-index list)
//! - [`ShapecastVisitor`]: visitor trait driving pruned traversal

mod node;
mod tree;
mod visitor;

pub use node::BvhNode;
pub use tree::Bvh;
pub use visitor::{CollectingVisitor, FnVisitor, ShapecastVisitor};
