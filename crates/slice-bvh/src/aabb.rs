//! Axis-aligned bounding boxes for BVH nodes.

use nalgebra::{Point3, Vector3};

use crate::Triangle;

/// An axis-aligned bounding box, defined by its minimum and maximum corners.
///
/// Invariant: `mins.x <= maxs.x`, `mins.y <= maxs.y`, `mins.z <= maxs.z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// The corner with the smallest coordinate on each axis.
    pub mins: Point3<f32>,
    /// The corner with the largest coordinate on each axis.
    pub maxs: Point3<f32>,
}

impl Aabb {
    /// Creates a box from its minimum and maximum corners.
    #[inline]
    pub fn new(mins: Point3<f32>, maxs: Point3<f32>) -> Self {
        Self { mins, maxs }
    }

    /// Creates a degenerate box containing a single point.
    #[inline]
    pub fn from_point(point: Point3<f32>) -> Self {
        Self {
            mins: point,
            maxs: point,
        }
    }

    /// Creates the tightest box enclosing a triangle's three vertices.
    pub fn from_triangle(triangle: &Triangle) -> Self {
        let [a, b, c] = *triangle.vertices();
        let mut aabb = Self::from_point(a);
        aabb.take_point(b);
        aabb.take_point(c);
        aabb
    }

    /// Enlarges the box in place so it contains the given point.
    pub fn take_point(&mut self, point: Point3<f32>) {
        self.mins = self.mins.inf(&point);
        self.maxs = self.maxs.sup(&point);
    }

    /// Returns the smallest box containing both `self` and `other`.
    pub fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }

    /// Returns the center of the box.
    #[inline]
    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.mins, &self.maxs)
    }

    /// Returns the size of the box along each axis.
    #[inline]
    pub fn extents(&self) -> Vector3<f32> {
        self.maxs - self.mins
    }

    /// Returns the index (0 = x, 1 = y, 2 = z) of the longest axis.
    pub fn longest_axis(&self) -> usize {
        let extents = self.extents();
        let mut axis = 0;
        if extents.y > extents.x {
            axis = 1;
        }
        if extents.z > extents[axis] {
            axis = 2;
        }
        axis
    }

    /// Tests whether `other` is entirely inside `self` (boundaries included).
    pub fn contains(&self, other: &Aabb) -> bool {
        nalgebra::partial_le(&self.mins, &other.mins)
            && nalgebra::partial_ge(&self.maxs, &other.maxs)
    }

    /// Tests whether a point is inside the box (boundaries included).
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        nalgebra::partial_le(&self.mins, &point) && nalgebra::partial_ge(&self.maxs, &point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_triangle_encloses_vertices() {
        let triangle = Triangle::new(
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(-1.0, 4.0, 2.0),
            Point3::new(0.0, 0.0, 5.0),
        );
        let aabb = Aabb::from_triangle(&triangle);

        assert_eq!(aabb.mins, Point3::new(-1.0, 0.0, 2.0));
        assert_eq!(aabb.maxs, Point3::new(1.0, 4.0, 5.0));
        for &v in triangle.vertices() {
            assert!(aabb.contains_point(v));
        }
    }

    #[test]
    fn merged_contains_both() {
        let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Point3::new(-1.0, 0.5, 0.5), Point3::new(0.5, 2.0, 0.7));
        let merged = a.merged(&b);

        assert!(merged.contains(&a));
        assert!(merged.contains(&b));
        assert_eq!(merged.mins, Point3::new(-1.0, 0.0, 0.0));
        assert_eq!(merged.maxs, Point3::new(1.0, 2.0, 1.0));
    }

    #[test]
    fn contains_is_inclusive() {
        let outer = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        assert!(outer.contains(&outer));
        assert!(outer.contains_point(Point3::new(1.0, 1.0, 1.0)));
        assert!(!outer.contains_point(Point3::new(1.0, 1.0, 1.1)));
    }

    #[test]
    fn longest_axis_picks_largest_extent() {
        let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 3.0, 2.0));
        assert_eq!(aabb.longest_axis(), 1);

        let cube = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        assert_eq!(cube.longest_axis(), 0);
    }

    #[test]
    fn center_and_extents() {
        let aabb = Aabb::new(Point3::new(-1.0, -2.0, -3.0), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.center(), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(aabb.extents(), Vector3::new(2.0, 4.0, 6.0));
    }
}
