//! Visitor pattern for pruned BVH traversal.
//!
//! A shapecast is driven by two callbacks: a bounds predicate that decides
//! whether a subtree can possibly matter, and a per-triangle visitor invoked
//! on the leaves that survive pruning.

use crate::{Aabb, Triangle};

/// Visitor driving a [`shapecast`](crate::Bvh::shapecast) traversal.
///
/// `intersects_bounds` is called for every node reached; returning `false`
/// prunes the entire subtree. `visit_triangle` is called for each triangle
/// in leaves that pass the bounds test.
pub trait ShapecastVisitor {
    /// Tests whether the query overlaps a node's bounding box.
    fn intersects_bounds(&mut self, aabb: &Aabb) -> bool;

    /// Called for each triangle in an accepted leaf, with its mesh index.
    fn visit_triangle(&mut self, triangle: &Triangle, index: u32);
}

/// A visitor that accepts every node and records the triangle indices it
/// reaches, in traversal order.
#[derive(Debug, Default)]
pub struct CollectingVisitor {
    indices: Vec<u32>,
}

impl CollectingVisitor {
    /// Creates a new empty collecting visitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected triangle indices.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Returns the collected triangle indices, consuming the visitor.
    pub fn into_indices(self) -> Vec<u32> {
        self.indices
    }
}

impl ShapecastVisitor for CollectingVisitor {
    fn intersects_bounds(&mut self, _aabb: &Aabb) -> bool {
        true
    }

    fn visit_triangle(&mut self, _triangle: &Triangle, index: u32) {
        self.indices.push(index);
    }
}

/// A visitor built from a pair of closures.
pub struct FnVisitor<B, T>
where
    B: FnMut(&Aabb) -> bool,
    T: FnMut(&Triangle, u32),
{
    bounds: B,
    triangle: T,
}

impl<B, T> FnVisitor<B, T>
where
    B: FnMut(&Aabb) -> bool,
    T: FnMut(&Triangle, u32),
{
    /// Creates a visitor from a bounds predicate and a triangle callback.
    pub fn new(bounds: B, triangle: T) -> Self {
        Self { bounds, triangle }
    }
}

impl<B, T> ShapecastVisitor for FnVisitor<B, T>
where
    B: FnMut(&Aabb) -> bool,
    T: FnMut(&Triangle, u32),
{
    fn intersects_bounds(&mut self, aabb: &Aabb) -> bool {
        (self.bounds)(aabb)
    }

    fn visit_triangle(&mut self, triangle: &Triangle, index: u32) {
        (self.triangle)(triangle, index);
    }
}
