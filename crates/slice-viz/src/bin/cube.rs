use macroquad::prelude::*;
use nalgebra::{Point3, Vector3};
use slice_bvh::{extract_contour, Bvh, Plane, SegmentBuffer, SliceError};
use slice_viz::{
    cube_mesh, draw_contour, draw_slice_plane, draw_sliced_mesh, OrbitCamera, CONTOUR_COLOR,
    INSIDE_COLOR, OUTSIDE_COLOR,
};

const PLANE_STEP: f32 = 0.01;

#[macroquad::main("Cube Slice")]
async fn main() {
    let mesh = cube_mesh(Point3::origin(), 1.0);
    let bvh = match Bvh::build(mesh, 3) {
        Ok(bvh) => bvh,
        Err(e) => {
            eprintln!("Failed to build BVH: {e}");
            return;
        }
    };
    println!(
        "BVH built: {} triangles, depth {}",
        bvh.triangle_count(),
        bvh.depth()
    );

    let mut plane = Plane::new(Vector3::new(0.0, 0.0, -1.0), 0.0);
    let mut buffer = SegmentBuffer::new();
    let mut camera = OrbitCamera::new(2.5, 0.7, 0.5).with_zoom(0.3, 1.2, 8.0);

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
        constant = constant.clamp(-1.0, 1.0);
        if is_key_pressed(KeyCode::T) {
            transparent = !transparent;
        }

        plane.set_constant(constant);

        if let Err(SliceError::BufferOverflow { needed, .. }) =
            extract_contour(&bvh, &plane, &mut buffer)
        {
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
        draw_slice_plane(&plane, 2.0, transparent);
        draw_contour(&buffer, &plane, CONTOUR_COLOR);

        set_default_camera();

        draw_text("Cube Slice", 10.0, 25.0, 20.0, WHITE);
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

        next_frame().await
    }
}
