//! BVH node implementation.

use crate::Aabb;

/// A node in the bounding volume hierarchy.
///
/// Internal nodes hold a bounding box and two children; leaves hold a
/// bounding box and a small list of triangle indices into the mesh the
/// tree was built over.
///
/// # Invariants
///
/// - Every node's box contains its children's boxes and, transitively,
///   every triangle beneath it.
/// - Every triangle index appears in exactly one leaf.
/// - Leaves hold at most the `max_leaf_triangles` the tree was built with.
#[derive(Debug, Clone)]
pub enum BvhNode {
    /// An interior node with exactly two children.
    Internal {
        aabb: Aabb,
        left: Box<BvhNode>,
        right: Box<BvhNode>,
    },
    /// A terminal node holding triangle indices.
    Leaf { aabb: Aabb, triangles: Vec<u32> },
}

impl BvhNode {
    /// Returns the bounding box of this node.
    #[inline]
    pub fn aabb(&self) -> &Aabb {
        match self {
            BvhNode::Internal { aabb, .. } => aabb,
            BvhNode::Leaf { aabb, .. } => aabb,
        }
    }

    /// Returns `true` if this node is a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, BvhNode::Leaf { .. })
    }

    /// Returns the depth of this subtree (1 for a leaf).
    pub fn depth(&self) -> usize {
        match self {
            BvhNode::Leaf { .. } => 1,
            BvhNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Returns the number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            BvhNode::Leaf { .. } => 1,
            BvhNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Returns the total number of triangle indices stored in this subtree.
    pub fn triangle_count(&self) -> usize {
        match self {
            BvhNode::Leaf { triangles, .. } => triangles.len(),
            BvhNode::Internal { left, right, .. } => {
                left.triangle_count() + right.triangle_count()
            }
        }
    }
}
