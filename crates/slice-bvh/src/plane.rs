//! Cutting plane representation and intersection tests.

use nalgebra::{Point3, Vector3};

use crate::Aabb;

/// Default tolerance for point-on-plane classification.
/// Points within this distance of the plane are considered "on" the plane.
pub const PLANE_EPSILON: f32 = 1e-5;

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of the normal)
    Front,
    /// Point is behind the plane (negative side of the normal)
    Back,
    /// Point lies on the plane (within epsilon tolerance)
    OnPlane,
}

/// A plane in 3D space, represented as `normal · x + constant = 0`.
///
/// Note the sign convention: `constant` is the negated distance from the
/// origin along the normal, so moving a plane with normal `(0, 0, -1)` to
/// `z = c` means setting `constant = c`. This matches how an interactive
/// slider drives the plane directly through [`set_constant`](Self::set_constant).
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    normal: Vector3<f32>,
    constant: f32,
}

impl Plane {
    /// Creates a new plane from a normal vector and constant.
    /// The normal will be normalized automatically.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn new(normal: Vector3<f32>, constant: f32) -> Self {
        let norm = normal.norm();
        assert!(norm > f32::EPSILON, "Plane normal cannot be zero");
        Self {
            normal: normal / norm,
            constant: constant / norm,
        }
    }

    /// Creates a plane from a point on the plane and a normal vector.
    /// The normal will be normalized automatically.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn from_point_and_normal(point: Point3<f32>, normal: Vector3<f32>) -> Self {
        let norm = normal.norm();
        assert!(norm > f32::EPSILON, "Plane normal cannot be zero");
        let unit_normal = normal / norm;
        Self {
            constant: -unit_normal.dot(&point.coords),
            normal: unit_normal,
        }
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Returns the plane constant (`normal · x + constant = 0`).
    #[inline]
    pub fn constant(&self) -> f32 {
        self.constant
    }

    /// Replaces the plane constant, sliding the plane along its normal.
    ///
    /// This is the per-frame update path: the normal stays fixed for the
    /// session while a UI control feeds in a new constant.
    #[inline]
    pub fn set_constant(&mut self, constant: f32) {
        self.constant = constant;
    }

    /// Computes the signed distance from a point to the plane.
    /// - Positive: point is in front (same side as the normal)
    /// - Negative: point is behind (opposite side from the normal)
    /// - Zero: point is on the plane
    #[inline]
    pub fn signed_distance(&self, point: Point3<f32>) -> f32 {
        self.normal.dot(&point.coords) + self.constant
    }

    /// Classifies which side of the plane a point lies on.
    /// Uses the default `PLANE_EPSILON` tolerance.
    #[inline]
    pub fn classify_point(&self, point: Point3<f32>) -> PlaneSide {
        let dist = self.signed_distance(point);
        if dist > PLANE_EPSILON {
            PlaneSide::Front
        } else if dist < -PLANE_EPSILON {
            PlaneSide::Back
        } else {
            PlaneSide::OnPlane
        }
    }

    /// Returns a new plane with the normal flipped (facing the opposite direction).
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            constant: -self.constant,
        }
    }

    /// Tests whether the plane passes through or touches an axis-aligned box.
    ///
    /// Uses the signed distances of the two extreme box corners along the
    /// normal: the plane overlaps the box iff zero lies between them.
    pub fn intersects_box(&self, aabb: &Aabb) -> bool {
        let mut min = 0.0;
        let mut max = 0.0;

        for i in 0..3 {
            if self.normal[i] > 0.0 {
                min += self.normal[i] * aabb.mins[i];
                max += self.normal[i] * aabb.maxs[i];
            } else {
                min += self.normal[i] * aabb.maxs[i];
                max += self.normal[i] * aabb.mins[i];
            }
        }

        min + self.constant <= 0.0 && max + self.constant >= 0.0
    }

    /// Computes the intersection of a line segment with the plane.
    ///
    /// Returns the intersection point if the segment crosses or touches the
    /// plane (interpolation parameter in the closed range `[0, 1]`). A
    /// segment lying entirely in the plane reports its start point.
    ///
    /// Returns `None` if the segment is parallel to the plane off of it, or
    /// if the crossing lies outside the segment.
    pub fn intersect_segment(
        &self,
        start: Point3<f32>,
        end: Point3<f32>,
    ) -> Option<Point3<f32>> {
        let direction = end - start;
        let denom = self.normal.dot(&direction);

        // Segment is parallel to the plane
        if denom.abs() < f32::EPSILON {
            if self.signed_distance(start).abs() < f32::EPSILON {
                return Some(start);
            }
            return None;
        }

        let t = -(self.normal.dot(&start.coords) + self.constant) / denom;

        // Crossing is outside the segment
        if !(0.0..=1.0).contains(&t) {
            return None;
        }

        Some(start + direction * t)
    }
}
