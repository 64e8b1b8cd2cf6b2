//! BVH container and construction.

use crate::{Aabb, SliceError, TriMesh};

use super::node::BvhNode;
use super::visitor::ShapecastVisitor;

/// Default cap on triangles per leaf.
const DEFAULT_MAX_LEAF_TRIANGLES: usize = 3;

/// A bounding volume hierarchy over a triangle mesh.
///
/// The tree owns the mesh it was built over and is immutable after
/// construction, so repeated queries (one per frame for an interactive
/// slicer) never touch mutable shared state.
///
/// # Construction
///
/// ```ignore
/// use slice_bvh::{Bvh, TriMesh};
///
/// let mesh: TriMesh = /* ... */;
/// let bvh = Bvh::build(mesh, 3)?;
/// ```
///
/// # Queries
///
/// The tree supports a pruned depth-first traversal driven by a
/// [`ShapecastVisitor`]: subtrees whose bounding box fails the visitor's
/// bounds predicate are skipped entirely, turning a scan of every triangle
/// into roughly `O(log n + k)` work where `k` is the number of triangles
/// near the query shape.
#[derive(Debug, Clone)]
pub struct Bvh {
    mesh: TriMesh,
    root: BvhNode,
    max_leaf_triangles: usize,
}

impl Bvh {
    /// Builds a BVH over `mesh` with at most `max_leaf_triangles` triangle
    /// indices per leaf.
    ///
    /// Splits recursively at the median centroid along the longest axis of
    /// the centroid bounds. Every triangle lands in exactly one leaf.
    ///
    /// Fails with [`SliceError::EmptyMesh`] or
    /// [`SliceError::NonFiniteVertex`] if the mesh cannot be indexed.
    ///
    /// # Panics
    /// Panics if `max_leaf_triangles` is zero.
    pub fn build(mesh: TriMesh, max_leaf_triangles: usize) -> Result<Self, SliceError> {
        assert!(
            max_leaf_triangles > 0,
            "leaf triangle cap must be positive"
        );
        mesh.validate()?;

        let indices: Vec<u32> = (0..mesh.triangle_count() as u32).collect();
        let root = build_node(&mesh, indices, max_leaf_triangles);

        Ok(Self {
            mesh,
            root,
            max_leaf_triangles,
        })
    }

    /// Builds a BVH with the default leaf cap of 3 triangles.
    pub fn from_mesh(mesh: TriMesh) -> Result<Self, SliceError> {
        Self::build(mesh, DEFAULT_MAX_LEAF_TRIANGLES)
    }

    /// Returns the mesh the tree was built over.
    #[inline]
    pub fn mesh(&self) -> &TriMesh {
        &self.mesh
    }

    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> &BvhNode {
        &self.root
    }

    /// Returns the bounding box of the whole mesh.
    #[inline]
    pub fn aabb(&self) -> &Aabb {
        self.root.aabb()
    }

    /// Returns the leaf triangle cap the tree was built with.
    #[inline]
    pub fn max_leaf_triangles(&self) -> usize {
        self.max_leaf_triangles
    }

    /// Returns the maximum depth of the tree.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Returns the number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Returns the number of triangles covered by the tree.
    pub fn triangle_count(&self) -> usize {
        self.root.triangle_count()
    }

    /// Runs a pruned depth-first traversal.
    ///
    /// At each node the visitor's `intersects_bounds` is consulted; a
    /// `false` prunes the subtree. Triangles of accepted leaves are handed
    /// to `visit_triangle` one at a time. Child visit order is left then
    /// right but is not part of the contract.
    pub fn shapecast<V: ShapecastVisitor>(&self, visitor: &mut V) {
        shapecast_node(&self.root, &self.mesh, visitor);
    }
}

/// Recursively builds a subtree over the given triangle indices.
///
/// `indices` is non-empty by construction: the initial list covers a
/// validated non-empty mesh, and median splits never produce an empty half.
fn build_node(mesh: &TriMesh, mut indices: Vec<u32>, max_leaf_triangles: usize) -> BvhNode {
    let triangle = |index: u32| &mesh.triangles()[index as usize];

    let mut aabb = triangle(indices[0]).aabb();
    for &index in &indices[1..] {
        aabb = aabb.merged(&triangle(index).aabb());
    }

    if indices.len() <= max_leaf_triangles {
        return BvhNode::Leaf {
            aabb,
            triangles: indices,
        };
    }

    // Split at the median centroid along the longest axis of the centroid
    // bounds. Splitting by median index keeps both halves non-empty even
    // when all centroids coincide, so the recursion always terminates.
    let mut centroid_bounds = Aabb::from_point(triangle(indices[0]).centroid());
    for &index in &indices[1..] {
        centroid_bounds.take_point(triangle(index).centroid());
    }
    let axis = centroid_bounds.longest_axis();

    let mid = indices.len() / 2;
    indices.select_nth_unstable_by(mid, |&a, &b| {
        triangle(a).centroid()[axis].total_cmp(&triangle(b).centroid()[axis])
    });
    let right = indices.split_off(mid);

    BvhNode::Internal {
        aabb,
        left: Box::new(build_node(mesh, indices, max_leaf_triangles)),
        right: Box::new(build_node(mesh, right, max_leaf_triangles)),
    }
}

/// Traverses a subtree, pruning on the visitor's bounds test.
fn shapecast_node<V: ShapecastVisitor>(node: &BvhNode, mesh: &TriMesh, visitor: &mut V) {
    if !visitor.intersects_bounds(node.aabb()) {
        return;
    }

    match node {
        BvhNode::Leaf { triangles, .. } => {
            for &index in triangles {
                visitor.visit_triangle(&mesh.triangles()[index as usize], index);
            }
        }
        BvhNode::Internal { left, right, .. } => {
            shapecast_node(left, mesh, visitor);
            shapecast_node(right, mesh, visitor);
        }
    }
}

/// Tests whether a triangle straddles or touches a plane, without any
/// bounding-box involvement. Used by the traversal tests below.
#[cfg(test)]
fn triangle_crosses_plane(triangle: &crate::Triangle, plane: &crate::Plane) -> bool {
    let distances = triangle.vertices().map(|v| plane.signed_distance(v));
    let any_non_positive = distances.iter().any(|&d| d <= 0.0);
    let any_non_negative = distances.iter().any(|&d| d >= 0.0);
    any_non_positive && any_non_negative
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bvh::visitor::{CollectingVisitor, FnVisitor};
    use crate::{Plane, Triangle};
    use nalgebra::{Point3, Vector3};

    fn make_triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Triangle {
        Triangle::new(
            Point3::new(a[0], a[1], a[2]),
            Point3::new(b[0], b[1], b[2]),
            Point3::new(c[0], c[1], c[2]),
        )
    }

    /// A strip of small triangles marching along the x axis.
    fn strip_mesh(count: usize) -> TriMesh {
        let triangles = (0..count)
            .map(|i| {
                let x = i as f32;
                make_triangle([x, 0.0, 0.0], [x + 0.5, 0.0, 0.0], [x, 0.5, 0.0])
            })
            .collect();
        TriMesh::new(triangles)
    }

    fn check_containment(node: &BvhNode) {
        if let BvhNode::Internal { aabb, left, right } = node {
            assert!(aabb.contains(left.aabb()));
            assert!(aabb.contains(right.aabb()));
            check_containment(left);
            check_containment(right);
        }
    }

    fn check_leaf_cap(node: &BvhNode, cap: usize) {
        match node {
            BvhNode::Leaf { triangles, .. } => {
                assert!(!triangles.is_empty());
                assert!(triangles.len() <= cap);
            }
            BvhNode::Internal { left, right, .. } => {
                check_leaf_cap(left, cap);
                check_leaf_cap(right, cap);
            }
        }
    }

    #[test]
    fn build_rejects_empty_mesh() {
        let result = Bvh::from_mesh(TriMesh::new(vec![]));
        assert_eq!(result.unwrap_err(), SliceError::EmptyMesh);
    }

    #[test]
    fn build_rejects_non_finite_mesh() {
        let bad = make_triangle([0.0, 0.0, 0.0], [f32::INFINITY, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let result = Bvh::from_mesh(TriMesh::new(vec![bad]));
        assert_eq!(result.unwrap_err(), SliceError::NonFiniteVertex { triangle: 0 });
    }

    #[test]
    fn build_single_triangle() {
        let bvh = Bvh::from_mesh(strip_mesh(1)).unwrap();
        assert_eq!(bvh.depth(), 1);
        assert_eq!(bvh.leaf_count(), 1);
        assert_eq!(bvh.triangle_count(), 1);
    }

    #[test]
    fn every_triangle_in_exactly_one_leaf() {
        let bvh = Bvh::build(strip_mesh(100), 3).unwrap();

        let mut visitor = CollectingVisitor::new();
        bvh.shapecast(&mut visitor);

        let mut indices = visitor.into_indices();
        indices.sort_unstable();
        let expected: Vec<u32> = (0..100).collect();
        assert_eq!(indices, expected);
    }

    #[test]
    fn leaf_cap_respected() {
        let bvh = Bvh::build(strip_mesh(50), 3).unwrap();
        check_leaf_cap(bvh.root(), 3);
    }

    #[test]
    fn parent_boxes_contain_children() {
        let bvh = Bvh::build(strip_mesh(64), 4).unwrap();
        check_containment(bvh.root());

        // The root covers the whole strip
        let mesh_aabb = bvh.mesh().aabb().unwrap();
        assert!(bvh.aabb().contains(&mesh_aabb));
    }

    #[test]
    fn build_handles_coincident_centroids() {
        // Many copies of the same triangle: centroid bounds are a point,
        // so only the median-index fallback can make progress.
        let triangle = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let mesh = TriMesh::new(vec![triangle; 20]);

        let bvh = Bvh::build(mesh, 2).unwrap();
        assert_eq!(bvh.triangle_count(), 20);
        check_leaf_cap(bvh.root(), 2);
    }

    #[test]
    fn shapecast_prunes_but_never_drops() {
        // Strip along x, sliced by a plane at x = 10.25
        let mesh = strip_mesh(40);
        let plane = Plane::new(Vector3::new(-1.0, 0.0, 0.0), 10.25);
        let bvh = Bvh::build(mesh.clone(), 3).unwrap();

        let mut candidates = Vec::new();
        let mut visitor = FnVisitor::new(
            |aabb: &Aabb| plane.intersects_box(aabb),
            |_tri: &Triangle, index| candidates.push(index),
        );
        bvh.shapecast(&mut visitor);

        // Every genuinely crossing triangle must be among the candidates
        for (i, triangle) in mesh.triangles().iter().enumerate() {
            if triangle_crosses_plane(triangle, &plane) {
                assert!(
                    candidates.contains(&(i as u32)),
                    "pruning dropped crossing triangle {i}"
                );
            }
        }

        // And pruning must have skipped most of the strip
        assert!(candidates.len() < mesh.triangle_count() / 2);
    }

    #[test]
    fn shapecast_rejecting_everything_visits_nothing() {
        let bvh = Bvh::build(strip_mesh(10), 3).unwrap();

        let mut visited = 0;
        let mut visitor = FnVisitor::new(
            |_aabb: &Aabb| false,
            |_tri: &Triangle, _index| visited += 1,
        );
        bvh.shapecast(&mut visitor);

        assert_eq!(visited, 0);
    }

    #[test]
    #[should_panic(expected = "leaf triangle cap must be positive")]
    fn zero_leaf_cap_panics() {
        let _ = Bvh::build(strip_mesh(4), 0);
    }
}
