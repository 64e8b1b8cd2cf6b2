//! CPU half-space clipping for displaying the cut solid.
//!
//! The extractor only produces the contour; the solid itself is shown cut
//! open by clipping every triangle against the same plane equation before
//! drawing, so the drawn contour sits exactly on the clipped boundary.

use nalgebra::Point3;
use slice_bvh::{Plane, PlaneSide, Triangle};

/// Clips a triangle to the front half-space of the plane (the side the
/// normal points away from is discarded).
///
/// Returns the kept part fan-triangulated: the whole triangle, two
/// triangles (kept quad), one triangle, or nothing. On-plane vertices are
/// kept, so coplanar triangles survive intact.
pub fn clip_triangle_front(triangle: &Triangle, plane: &Plane) -> Vec<Triangle> {
    let vertices = triangle.vertices();
    let sides = vertices.map(|v| plane.classify_point(v));

    // Fast paths: nothing to cut
    if sides.iter().all(|&s| s != PlaneSide::Back) {
        return vec![*triangle];
    }
    if sides.iter().all(|&s| s != PlaneSide::Front) {
        return Vec::new();
    }

    // Spanning: walk the edges, keeping front/on-plane vertices and
    // inserting crossing points
    let mut kept: Vec<Point3<f32>> = Vec::with_capacity(4);
    for i in 0..3 {
        let current = vertices[i];
        let next = vertices[(i + 1) % 3];

        if sides[i] != PlaneSide::Back {
            kept.push(current);
        }

        let crosses = matches!(
            (sides[i], sides[(i + 1) % 3]),
            (PlaneSide::Front, PlaneSide::Back) | (PlaneSide::Back, PlaneSide::Front)
        );
        if crosses {
            if let Some(point) = plane.intersect_segment(current, next) {
                kept.push(point);
            }
        }
    }

    match kept.len() {
        0..=2 => Vec::new(),
        3 => vec![Triangle::new(kept[0], kept[1], kept[2])],
        // Kept quad: fan triangulation from the first vertex
        _ => vec![
            Triangle::new(kept[0], kept[1], kept[2]),
            Triangle::new(kept[0], kept[2], kept[3]),
        ],
    }
}
