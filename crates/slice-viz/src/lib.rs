//! Shared visualization utilities for the mesh slicing viewers.

use std::f32::consts::TAU;

use macroquad::models::{draw_mesh, Mesh, Vertex};
use macroquad::prelude::*;
use nalgebra::{Point3, Vector3};
use slice_bvh::{Plane, SegmentBuffer, SliceError, TriMesh, Triangle};

pub mod clip;
pub use clip::clip_triangle_front;

/// Solid color for surface facing the camera (the original's "hot pink").
pub const OUTSIDE_COLOR: Color = Color::new(1.0, 0.41, 0.71, 1.0);
/// Solid color for surface facing away (the darker interior pink).
pub const INSIDE_COLOR: Color = Color::new(0.91, 0.33, 0.5, 1.0);
/// Neon yellow for the extracted contour lines.
pub const CONTOUR_COLOR: Color = Color::new(0.8, 1.0, 0.08, 1.0);

/// How far contour lines are pushed out of the cut plane so they don't
/// z-fight with the coincident clipped surface.
const CONTOUR_OFFSET: f32 = 0.004;

/// Fixed light direction for the flat shading of solid triangles.
const LIGHT_DIR: Vector3<f32> = Vector3::new(0.44, 0.66, 0.61);

/// Generates a torus knot as a triangle mesh.
///
/// Follows the classic parametrization: the center curve winds `p` times
/// around the torus axis and `q` times through the hole, and a tube of the
/// given radius is swept along it with a finite-difference moving frame.
/// `tubular_segments` samples the curve, `radial_segments` the tube circle.
pub fn torus_knot(
    radius: f32,
    tube: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> Result<TriMesh, SliceError> {
    let ring = radial_segments + 1;
    let mut positions = Vec::with_capacity(((tubular_segments + 1) * ring) as usize);

    for i in 0..=tubular_segments {
        let u = i as f32 / tubular_segments as f32 * p as f32 * TAU;

        // Approximate the Frenet-like frame from two nearby curve samples
        let p1 = knot_curve_point(u, p, q, radius);
        let p2 = knot_curve_point(u + 0.01, p, q, radius);
        let tangent = p2 - p1;
        let normal = p2.coords + p1.coords;
        let binormal = tangent.cross(&normal).normalize();
        let normal = binormal.cross(&tangent).normalize();

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            positions.push(p1 + cx * normal + cy * binormal);
        }
    }

    let mut indices = Vec::with_capacity((tubular_segments * radial_segments * 2) as usize);
    for j in 1..=tubular_segments {
        for i in 1..=radial_segments {
            let a = ring * (j - 1) + (i - 1);
            let b = ring * j + (i - 1);
            let c = ring * j + i;
            let d = ring * (j - 1) + i;
            indices.push([a, b, d]);
            indices.push([b, c, d]);
        }
    }

    TriMesh::from_indexed(&positions, &indices)
}

/// A point on the (p, q) torus knot center curve.
fn knot_curve_point(u: f32, p: u32, q: u32, radius: f32) -> Point3<f32> {
    let qu_over_p = q as f32 / p as f32 * u;
    let cs = qu_over_p.cos();

    Point3::new(
        radius * (2.0 + cs) * 0.5 * u.cos(),
        radius * (2.0 + cs) * 0.5 * u.sin(),
        radius * qu_over_p.sin() * 0.5,
    )
}

/// Generates the 12 triangles of an axis-aligned cube.
pub fn cube_mesh(center: Point3<f32>, size: f32) -> TriMesh {
    let half = size / 2.0;

    // 8 corners of the cube
    let corners = [
        center + Vector3::new(-half, -half, -half), // 0: left-bottom-back
        center + Vector3::new(half, -half, -half),  // 1: right-bottom-back
        center + Vector3::new(half, half, -half),   // 2: right-top-back
        center + Vector3::new(-half, half, -half),  // 3: left-top-back
        center + Vector3::new(-half, -half, half),  // 4: left-bottom-front
        center + Vector3::new(half, -half, half),   // 5: right-bottom-front
        center + Vector3::new(half, half, half),    // 6: right-top-front
        center + Vector3::new(-half, half, half),   // 7: left-top-front
    ];

    // 6 faces with counter-clockwise winding (viewed from outside)
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

/// Draws a single triangle as a one-off macroquad Mesh.
pub fn draw_triangle_3d(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>, color: Color) {
    let vertices = vec![
        Vertex::new2(vec3(a.x, a.y, a.z), vec2(0.0, 0.0), color),
        Vertex::new2(vec3(b.x, b.y, b.z), vec2(0.0, 0.0), color),
        Vertex::new2(vec3(c.x, c.y, c.z), vec2(0.0, 0.0), color),
    ];

    let mesh = Mesh {
        vertices,
        indices: vec![0, 1, 2],
        texture: None,
    };

    draw_mesh(&mesh);
}

/// Draws the solid mesh cut open by the plane.
///
/// Each triangle is clipped to the plane's front half-space on the CPU
/// before drawing; triangles facing the eye take `outside`, the rest
/// `inside`, both flat-shaded against a fixed light so the form reads.
pub fn draw_sliced_mesh(
    mesh: &TriMesh,
    plane: &Plane,
    eye: Point3<f32>,
    outside: Color,
    inside: Color,
) {
    for triangle in mesh.triangles() {
        let normal = triangle.normal();
        let len = normal.norm();
        if len < f32::EPSILON {
            continue;
        }
        let normal = normal / len;

        let facing = normal.dot(&(eye - triangle.centroid()));
        let base = if facing > 0.0 { outside } else { inside };
        let shade = 0.6 + 0.4 * normal.dot(&LIGHT_DIR).abs();
        let color = Color::new(base.r * shade, base.g * shade, base.b * shade, base.a);

        for piece in clip_triangle_front(triangle, plane) {
            draw_triangle_3d(piece.a(), piece.b(), piece.c(), color);
        }
    }
}

/// Draws the extracted contour as line segments.
///
/// Points are offset slightly against the plane normal (out of the kept
/// half-space) so the lines render in front of the coincident cut surface.
pub fn draw_contour(buffer: &SegmentBuffer, plane: &Plane, color: Color) {
    let offset = -plane.normal() * CONTOUR_OFFSET;
    for (a, b) in buffer.segments() {
        let a = a + offset;
        let b = b + offset;
        draw_line_3d(vec3(a.x, a.y, a.z), vec3(b.x, b.y, b.z), color);
    }
}

/// Draws the slicing plane itself as a square quad of the given size,
/// either as a translucent pane or an opaque dark one.
pub fn draw_slice_plane(plane: &Plane, size: f32, transparent: bool) {
    let normal = plane.normal();
    let origin = Point3::from(-plane.constant() * normal);

    // Any vector not parallel to the normal gives a tangent basis
    let helper = if normal.x.abs() < 0.9 {
        Vector3::new(1.0, 0.0, 0.0)
    } else {
        Vector3::new(0.0, 1.0, 0.0)
    };
    let u = normal.cross(&helper).normalize() * (size / 2.0);
    let v = normal.cross(&u).normalize() * (size / 2.0);

    let color = if transparent {
        Color::new(0.96, 0.96, 0.96, 0.5)
    } else {
        Color::new(0.13, 0.13, 0.13, 1.0)
    };

    let corners = [
        origin - u - v,
        origin + u - v,
        origin + u + v,
        origin - u + v,
    ];
    draw_triangle_3d(corners[0], corners[1], corners[2], color);
    draw_triangle_3d(corners[0], corners[2], corners[3], color);
}

/// Simple orbit camera for 3D scene navigation.
pub struct OrbitCamera {
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub target: Vec3,
    /// Multiplier for scroll wheel zoom
    pub zoom_speed: f32,
    /// Minimum distance from target
    pub min_distance: f32,
    /// Maximum distance from target
    pub max_distance: f32,
}

impl OrbitCamera {
    /// Creates a new orbit camera with the given configuration.
    pub fn new(distance: f32, yaw: f32, pitch: f32) -> Self {
        Self {
            distance,
            yaw,
            pitch,
            target: vec3(0.0, 0.0, 0.0),
            zoom_speed: 0.5,
            min_distance: 1.5,
            max_distance: 20.0,
        }
    }

    /// Sets the zoom configuration (speed and distance limits).
    pub fn with_zoom(mut self, speed: f32, min: f32, max: f32) -> Self {
        self.zoom_speed = speed;
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    /// Updates camera state from user input (mouse drag, scroll).
    pub fn update(&mut self) {
        // Mouse drag for rotation
        if is_mouse_button_down(MouseButton::Left) {
            let delta = mouse_delta_position();
            self.yaw -= delta.x * 2.0;
            self.pitch -= delta.y * 2.0;
        }

        // Clamp pitch to avoid gimbal lock
        self.pitch = self.pitch.clamp(-1.5, 1.5);

        // Mouse wheel for zoom
        let scroll = mouse_wheel().1;
        self.distance -= scroll * self.zoom_speed;
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
    }

    /// Returns the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + vec3(x, y, z)
    }

    /// Converts to macroquad's Camera3D for rendering.
    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D {
            position: self.position(),
            up: vec3(0.0, 1.0, 0.0),
            target: self.target,
            ..Default::default()
        }
    }

    /// Returns the eye point as a nalgebra Point3 for facing tests.
    pub fn eye_point(&self) -> Point3<f32> {
        let pos = self.position();
        Point3::new(pos.x, pos.y, pos.z)
    }
}
