use macroquad::prelude::*;
use nalgebra::Vector3;
use slice_bvh::{extract_contour, Bvh, Plane, SegmentBuffer, SliceError};
use slice_viz::{
    draw_contour, draw_slice_plane, draw_sliced_mesh, torus_knot, OrbitCamera, CONTOUR_COLOR,
    INSIDE_COLOR, OUTSIDE_COLOR,
};

const PLANE_MIN: f32 = -1.0;
const PLANE_MAX: f32 = 1.0;
const PLANE_STEP: f32 = 0.01;

#[macroquad::main("Torus Knot Slice")]
async fn main() {
    println!("Generating torus knot mesh...");
    let mesh = match torus_knot(1.0, 0.2, 50, 50, 2, 3) {
        Ok(mesh) => mesh,
        Err(e) => {
            eprintln!("Failed to generate mesh: {e}");
            return;
        }
    };
    println!("Created {} triangles", mesh.triangle_count());

    println!("Building BVH...");
    let bvh = match Bvh::build(mesh, 3) {
        Ok(bvh) => bvh,
        Err(e) => {
            eprintln!("Failed to build BVH: {e}");
            return;
        }
    };
    println!(
        "BVH built: {} triangles, depth {}, {} leaves",
        bvh.triangle_count(),
        bvh.depth(),
        bvh.leaf_count()
    );

    let mut plane = Plane::new(Vector3::new(0.0, 0.0, -1.0), 0.0);
    let mut buffer = SegmentBuffer::new();
    let mut camera = OrbitCamera::new(4.0, 0.6, 0.4).with_zoom(0.4, 1.8, 12.0);

    let mut constant: f32 = 0.0;
    let mut transparent = true;

    loop {
        camera.update();

        if is_key_down(KeyCode::Left) || is_key_down(KeyCode::A) {
            constant -= PLANE_STEP;
        }
        if is_key_down(KeyCode::Right) || is_key_down(KeyCode::D) {
            constant += PLANE_STEP;
        }
        constant = constant.clamp(PLANE_MIN, PLANE_MAX);
        if is_key_pressed(KeyCode::T) {
            transparent = !transparent;
        }

        plane.set_constant(constant);

        if let Err(SliceError::BufferOverflow { needed, .. }) =
            extract_contour(&bvh, &plane, &mut buffer)
        {
            // Recoverable: grow once to the reported size and redo the
            // same extraction; if that still fails this frame draws no
            // contour.
            buffer.grow(needed);
            if extract_contour(&bvh, &plane, &mut buffer).is_err() {
                buffer.clear();
            }
        }

        clear_background(Color::from_rgba(173, 216, 230, 255));
        set_camera(&camera.to_camera3d());

        draw_sliced_mesh(
            bvh.mesh(),
            &plane,
            camera.eye_point(),
            OUTSIDE_COLOR,
            INSIDE_COLOR,
        );
        draw_slice_plane(&plane, 5.0, transparent);
        draw_contour(&buffer, &plane, CONTOUR_COLOR);

        set_default_camera();

        draw_text("Torus Knot Slice", 10.0, 25.0, 20.0, WHITE);
        draw_text(
            &format!(
                "Plane constant: {constant:.2} | Contour segments: {}",
                buffer.segment_count()
            ),
            10.0,
            45.0,
            18.0,
            YELLOW,
        );
        draw_text(
            "Left/Right (or A/D): move plane | T: plane transparency",
            10.0,
            65.0,
            16.0,
            DARKGRAY,
        );
        draw_text(
            "Drag mouse to rotate, scroll to zoom",
            10.0,
            85.0,
            16.0,
            DARKGRAY,
        );
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 105.0, 16.0, DARKGRAY);

        next_frame().await
    }
}
