//! Plane/mesh cross-section contour extraction.
//!
//! [`extract_contour`] intersects a cutting plane with every mesh triangle
//! the BVH cannot prune and collects the resulting chords into a reusable
//! [`SegmentBuffer`]. It is meant to run once per frame as the plane moves:
//! each call overwrites the buffer's valid prefix from scratch.

use nalgebra::Point3;

use crate::bvh::{Bvh, ShapecastVisitor};
use crate::{Aabb, Plane, SliceError, Triangle};

/// Default point capacity, comfortably larger than any plausible per-frame
/// contour for the mesh sizes this targets.
pub const DEFAULT_BUFFER_CAPACITY: usize = 3333;

/// A fixed-capacity, reusable buffer of contour points.
///
/// Consecutive non-overlapping pairs (points `2i` and `2i + 1`) form the
/// line segments of the contour. Only the first [`len`](Self::len) points
/// are valid for the current frame; anything beyond is stale data from an
/// earlier extraction and must be ignored, mirroring a dynamic vertex
/// buffer drawn with a restricted range.
#[derive(Debug, Clone)]
pub struct SegmentBuffer {
    points: Vec<Point3<f32>>,
    len: usize,
}

impl SegmentBuffer {
    /// Creates a buffer with [`DEFAULT_BUFFER_CAPACITY`] points.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY)
    }

    /// Creates a buffer holding up to `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: vec![Point3::origin(); capacity],
            len: 0,
        }
    }

    /// Returns the point capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.points.len()
    }

    /// Returns the number of valid points (always even after a successful
    /// extraction).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer holds no valid points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of valid segments (point pairs).
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.len / 2
    }

    /// Returns the valid points of the current contour.
    #[inline]
    pub fn points(&self) -> &[Point3<f32>] {
        &self.points[..self.len]
    }

    /// Iterates over the valid segments as endpoint pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Point3<f32>, Point3<f32>)> + '_ {
        self.points().chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// Grows the buffer to hold at least `capacity` points, preserving any
    /// valid contents. Shrinking is not supported; a smaller `capacity` is
    /// a no-op.
    pub fn grow(&mut self, capacity: usize) {
        if capacity > self.points.len() {
            self.points.resize(capacity, Point3::origin());
        }
    }

    /// Discards the valid contents without touching capacity.
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl Default for SegmentBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes the plane/mesh intersection contour into `buffer`.
///
/// Traverses the BVH, pruning every subtree whose box lies entirely on one
/// side of the plane, and intersects each surviving triangle's three edges
/// with the plane. Triangles yielding exactly two intersection points
/// contribute one chord; triangles yielding 0, 1 or 3 points (misses and
/// vertex/edge-grazing degeneracies) are silently discarded. The discard is
/// a deliberate topology simplification, not an error: the output is a set
/// of chords, not a stitched polygon loop.
///
/// On success returns the number of valid points written, always even; the
/// drawable segment count is half that. On [`SliceError::BufferOverflow`]
/// nothing valid is left in the buffer, but the error carries the exact
/// point count needed, so one [`SegmentBuffer::grow`] makes a retry
/// succeed.
///
/// Calling this twice with the same tree and plane produces the same
/// contour: there is no hidden state between calls.
pub fn extract_contour(
    bvh: &Bvh,
    plane: &Plane,
    buffer: &mut SegmentBuffer,
) -> Result<usize, SliceError> {
    buffer.len = 0;
    let capacity = buffer.points.len();

    let mut extractor = ContourExtractor {
        plane,
        points: &mut buffer.points,
        index: 0,
    };
    bvh.shapecast(&mut extractor);

    let needed = extractor.index;
    if needed > capacity {
        return Err(SliceError::BufferOverflow { needed, capacity });
    }

    buffer.len = needed;
    Ok(needed)
}

/// Shapecast visitor writing intersection points into a borrowed buffer.
///
/// `index` is the running write position; it keeps counting past the end of
/// `points` (writes are dropped there) so an overflowing extraction still
/// learns the total it needed.
struct ContourExtractor<'a> {
    plane: &'a Plane,
    points: &'a mut [Point3<f32>],
    index: usize,
}

impl ContourExtractor<'_> {
    fn push(&mut self, point: Point3<f32>) {
        if let Some(slot) = self.points.get_mut(self.index) {
            *slot = point;
        }
        self.index += 1;
    }
}

impl ShapecastVisitor for ContourExtractor<'_> {
    fn intersects_bounds(&mut self, aabb: &Aabb) -> bool {
        self.plane.intersects_box(aabb)
    }

    fn visit_triangle(&mut self, triangle: &Triangle, _index: u32) {
        // Check each triangle edge against the plane; every hit appends
        // one point.
        let mut count = 0;

        for (start, end) in [
            (triangle.a(), triangle.b()),
            (triangle.b(), triangle.c()),
            (triangle.c(), triangle.a()),
        ] {
            if let Some(point) = self.plane.intersect_segment(start, end) {
                self.push(point);
                count += 1;
            }
        }

        // Only a clean two-point crossing forms a chord. Anything else is
        // rewound: the write index steps back over the points just
        // appended and the next accepted triangle overwrites them.
        if count != 2 {
            self.index -= count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TriMesh;
    use nalgebra::{Point3, Vector3};

    /// Triangulates the 6 faces of an axis-aligned cube into 12 triangles.
    fn cube_mesh(center: Point3<f32>, size: f32) -> TriMesh {
        let half = size / 2.0;

        let corners = [
            center + Vector3::new(-half, -half, -half),
            center + Vector3::new(half, -half, -half),
            center + Vector3::new(half, half, -half),
            center + Vector3::new(-half, half, -half),
            center + Vector3::new(-half, -half, half),
            center + Vector3::new(half, -half, half),
            center + Vector3::new(half, half, half),
            center + Vector3::new(-half, half, half),
        ];

        let faces: [[usize; 4]; 6] = [
            [4, 5, 6, 7], // front (+Z)
            [1, 0, 3, 2], // back (-Z)
            [0, 4, 7, 3], // left (-X)
            [5, 1, 2, 6], // right (+X)
            [7, 6, 2, 3], // top (+Y)
            [0, 1, 5, 4], // bottom (-Y)
        ];

        let mut triangles = Vec::with_capacity(12);
        for [q0, q1, q2, q3] in faces {
            triangles.push(Triangle::new(corners[q0], corners[q1], corners[q2]));
            triangles.push(Triangle::new(corners[q0], corners[q2], corners[q3]));
        }
        TriMesh::new(triangles)
    }

    fn cube_bvh() -> Bvh {
        Bvh::build(cube_mesh(Point3::origin(), 1.0), 3).unwrap()
    }

    fn z_plane(constant: f32) -> Plane {
        Plane::new(Vector3::new(0.0, 0.0, -1.0), constant)
    }

    #[test]
    fn plane_outside_mesh_yields_nothing() {
        let bvh = cube_bvh();
        let mut buffer = SegmentBuffer::new();

        for constant in [2.0, -2.0, 0.5001] {
            let count = extract_contour(&bvh, &z_plane(constant), &mut buffer).unwrap();
            assert_eq!(count, 0, "plane at {constant} should miss the cube");
            assert_eq!(buffer.segment_count(), 0);
        }
    }

    #[test]
    fn cube_midslice_is_the_square_perimeter() {
        let bvh = cube_bvh();
        let mut buffer = SegmentBuffer::new();

        let count = extract_contour(&bvh, &z_plane(0.0), &mut buffer).unwrap();

        // 4 side faces are crossed; each face's two triangles contribute
        // one chord apiece, covering half the square's side each.
        assert_eq!(count, 16);
        assert_eq!(buffer.segment_count(), 8);

        let mut total_length = 0.0;
        for (a, b) in buffer.segments() {
            total_length += (b - a).norm();
        }
        assert!((total_length - 4.0).abs() < 1e-4);

        for &point in buffer.points() {
            // On the plane...
            assert!(point.z.abs() < 1e-5);
            // ...and on the square's perimeter
            let on_x_face = (point.x.abs() - 0.5).abs() < 1e-5;
            let on_y_face = (point.y.abs() - 0.5).abs() < 1e-5;
            assert!(on_x_face || on_y_face, "point {point} off the perimeter");
            assert!(point.x.abs() <= 0.5 + 1e-5 && point.y.abs() <= 0.5 + 1e-5);
        }
    }

    #[test]
    fn count_is_always_even() {
        let bvh = cube_bvh();
        let mut buffer = SegmentBuffer::new();

        let mut constant = -0.6;
        while constant <= 0.6 {
            let count = extract_contour(&bvh, &z_plane(constant), &mut buffer).unwrap();
            assert_eq!(count % 2, 0, "odd count at constant {constant}");
            assert!(count <= buffer.capacity());
            constant += 0.05;
        }
    }

    #[test]
    fn plane_through_vertices_discards_degenerates() {
        let bvh = cube_bvh();
        let mut buffer = SegmentBuffer::new();

        // The plane coincides with the top cube face: its coplanar
        // triangles report a point per edge (3, discarded) and the side
        // triangles graze vertices (1 or 2 points).
        let count = extract_contour(&bvh, &z_plane(0.5), &mut buffer).unwrap();

        assert_eq!(count % 2, 0);
        for &point in buffer.points() {
            assert!((point.z - 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn triangles_strictly_one_side_contribute_nothing() {
        // A single triangle well below the plane, plus one crossing it: the
        // miss must add no points even though both share a leaf.
        let below = Triangle::new(
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(1.0, 0.0, -1.0),
            Point3::new(0.0, 1.0, -1.0),
        );
        let crossing = Triangle::new(
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        );
        let bvh = Bvh::build(TriMesh::new(vec![below, crossing]), 3).unwrap();
        let mut buffer = SegmentBuffer::new();

        let count = extract_contour(&bvh, &z_plane(0.0), &mut buffer).unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn extraction_is_idempotent() {
        let bvh = cube_bvh();
        let plane = z_plane(0.2);

        let mut first = SegmentBuffer::new();
        let mut second = SegmentBuffer::with_capacity(100);

        let count_a = extract_contour(&bvh, &plane, &mut first).unwrap();
        let count_b = extract_contour(&bvh, &plane, &mut second).unwrap();

        assert_eq!(count_a, count_b);
        assert_eq!(first.points(), second.points());
    }

    #[test]
    fn buffer_is_overwritten_each_call() {
        let bvh = cube_bvh();
        let mut buffer = SegmentBuffer::new();

        extract_contour(&bvh, &z_plane(0.0), &mut buffer).unwrap();
        assert_eq!(buffer.segment_count(), 8);

        // Move the plane off the mesh: the valid region collapses even
        // though stale points remain in memory.
        extract_contour(&bvh, &z_plane(2.0), &mut buffer).unwrap();
        assert!(buffer.is_empty());
        assert!(buffer.points().is_empty());
    }

    #[test]
    fn exact_capacity_succeeds() {
        let bvh = cube_bvh();
        let mut buffer = SegmentBuffer::with_capacity(16);

        let count = extract_contour(&bvh, &z_plane(0.0), &mut buffer).unwrap();
        assert_eq!(count, 16);
    }

    #[test]
    fn one_point_short_overflows_then_grow_recovers() {
        let bvh = cube_bvh();
        let mut buffer = SegmentBuffer::with_capacity(15);
        let plane = z_plane(0.0);

        let err = extract_contour(&bvh, &plane, &mut buffer).unwrap_err();
        assert_eq!(
            err,
            SliceError::BufferOverflow {
                needed: 16,
                capacity: 15
            }
        );
        assert!(buffer.is_empty());

        let SliceError::BufferOverflow { needed, .. } = err else {
            unreachable!();
        };
        buffer.grow(needed);
        let count = extract_contour(&bvh, &plane, &mut buffer).unwrap();
        assert_eq!(count, 16);
        assert_eq!(buffer.capacity(), 16);
    }

    #[test]
    fn grow_never_shrinks() {
        let mut buffer = SegmentBuffer::with_capacity(10);
        buffer.grow(4);
        assert_eq!(buffer.capacity(), 10);
        buffer.grow(20);
        assert_eq!(buffer.capacity(), 20);
    }

    #[test]
    fn segments_pair_consecutive_points() {
        let bvh = cube_bvh();
        let mut buffer = SegmentBuffer::new();

        let count = extract_contour(&bvh, &z_plane(0.1), &mut buffer).unwrap();
        let segments: Vec<_> = buffer.segments().collect();

        assert_eq!(segments.len(), count / 2);
        assert_eq!(segments[0].0, buffer.points()[0]);
        assert_eq!(segments[0].1, buffer.points()[1]);
    }
}
