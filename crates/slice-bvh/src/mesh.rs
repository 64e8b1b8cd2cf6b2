//! Triangle and triangle-soup mesh types.

use nalgebra::{Point3, Vector3};

use crate::{Aabb, SliceError};

/// A triangle in 3D space, defined by three vertices.
///
/// The winding order determines the normal direction via the right-hand
/// rule, but plays no role in plane intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    vertices: [Point3<f32>; 3],
}

impl Triangle {
    /// Creates a new triangle from three points.
    pub fn new(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Returns the three vertices of the triangle.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f32>; 3] {
        &self.vertices
    }

    /// Returns the first vertex.
    #[inline]
    pub fn a(&self) -> Point3<f32> {
        self.vertices[0]
    }

    /// Returns the second vertex.
    #[inline]
    pub fn b(&self) -> Point3<f32> {
        self.vertices[1]
    }

    /// Returns the third vertex.
    #[inline]
    pub fn c(&self) -> Point3<f32> {
        self.vertices[2]
    }

    /// Computes the (unnormalized) normal vector of the triangle.
    ///
    /// The direction follows the right-hand rule based on vertex winding.
    pub fn normal(&self) -> Vector3<f32> {
        let [a, b, c] = &self.vertices;
        let ab = b - a;
        let ac = c - a;
        ab.cross(&ac)
    }

    /// Computes the centroid (center of mass) of the triangle.
    pub fn centroid(&self) -> Point3<f32> {
        let [a, b, c] = &self.vertices;
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Returns the tightest axis-aligned box enclosing the triangle.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_triangle(self)
    }

    /// Returns `true` if all vertex coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.vertices
            .iter()
            .all(|v| v.coords.iter().all(|c| c.is_finite()))
    }
}

/// An immutable triangle-soup mesh.
///
/// Created once at startup and never mutated afterwards; the BVH indexes
/// into it by triangle position.
#[derive(Debug, Clone, PartialEq)]
pub struct TriMesh {
    triangles: Vec<Triangle>,
}

impl TriMesh {
    /// Creates a mesh from a list of triangles.
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// Creates a mesh from a flat position list and per-triangle vertex
    /// indices, the form parametric generators and loaded assets produce.
    ///
    /// Fails with [`SliceError::IndexOutOfBounds`] if any index references
    /// a vertex past the end of `positions`.
    pub fn from_indexed(
        positions: &[Point3<f32>],
        indices: &[[u32; 3]],
    ) -> Result<Self, SliceError> {
        let lookup = |index: u32| {
            positions
                .get(index as usize)
                .copied()
                .ok_or(SliceError::IndexOutOfBounds {
                    index,
                    vertex_count: positions.len(),
                })
        };

        let mut triangles = Vec::with_capacity(indices.len());
        for &[ia, ib, ic] in indices {
            triangles.push(Triangle::new(lookup(ia)?, lookup(ib)?, lookup(ic)?));
        }

        Ok(Self { triangles })
    }

    /// Returns the triangles of the mesh.
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Returns the triangle at `index`, if it exists.
    #[inline]
    pub fn triangle(&self, index: u32) -> Option<&Triangle> {
        self.triangles.get(index as usize)
    }

    /// Returns the number of triangles in the mesh.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns `true` if the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Checks that the mesh is indexable: non-empty, all coordinates finite.
    pub fn validate(&self) -> Result<(), SliceError> {
        if self.triangles.is_empty() {
            return Err(SliceError::EmptyMesh);
        }
        for (i, triangle) in self.triangles.iter().enumerate() {
            if !triangle.is_finite() {
                return Err(SliceError::NonFiniteVertex { triangle: i });
            }
        }
        Ok(())
    }

    /// Computes the bounding box of the whole mesh.
    ///
    /// Returns `None` for an empty mesh.
    pub fn aabb(&self) -> Option<Aabb> {
        let mut triangles = self.triangles.iter();
        let mut aabb = triangles.next()?.aabb();
        for triangle in triangles {
            aabb = aabb.merged(&triangle.aabb());
        }
        Some(aabb)
    }
}
