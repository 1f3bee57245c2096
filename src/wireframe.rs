//! Wireframe drawing helpers: lines, boxes, axes, and grids projected
//! through the camera without depth testing.

use crate::camera::Camera;
use crate::color::Color;
use crate::framebuffer::Framebuffer;
use crate::math::{Mat4, Vec3};

/// Renders 3D line primitives into a framebuffer.
pub struct Wireframe<'a> {
    camera: &'a mut Camera,
    fb: &'a mut Framebuffer,
}

impl<'a> Wireframe<'a> {
    pub fn new(camera: &'a mut Camera, fb: &'a mut Framebuffer) -> Self {
        Self { camera, fb }
    }

    /// Draws a line between two world-space points.
    ///
    /// The line is skipped when both endpoints fall outside the view volume.
    /// Proper line clipping is not attempted; a partially visible line relies
    /// on the framebuffer's bounds checks.
    pub fn draw_line_3d(&mut self, p1: Vec3, p2: Vec3, color: Color) {
        let (w, h) = (self.fb.width(), self.fb.height());
        let (x1, y1, _, vis1) = self.camera.world_to_screen(p1, w, h);
        let (x2, y2, _, vis2) = self.camera.world_to_screen(p2, w, h);

        if !vis1 && !vis2 {
            return;
        }

        self.fb
            .draw_line(x1 as i32, y1 as i32, x2 as i32, y2 as i32, color);
    }

    /// Draws a wireframe cube from its 12 edges.
    pub fn draw_cube(&mut self, center: Vec3, size: f64, color: Color) {
        self.draw_transformed_cube(Mat4::translation(center), size, color);
    }

    /// Draws a wireframe cube transformed by an arbitrary matrix.
    pub fn draw_transformed_cube(&mut self, transform: Mat4, size: f64, color: Color) {
        let h = size / 2.0;

        let local = [
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ];

        let mut world = [Vec3::ZERO; 8];
        for (i, v) in local.iter().enumerate() {
            world[i] = transform.transform_point(*v);
        }

        const EDGES: [[usize; 2]; 12] = [
            // back face
            [0, 1],
            [1, 2],
            [2, 3],
            [3, 0],
            // front face
            [4, 5],
            [5, 6],
            [6, 7],
            [7, 4],
            // connecting edges
            [0, 4],
            [1, 5],
            [2, 6],
            [3, 7],
        ];

        for edge in EDGES {
            self.draw_line_3d(world[edge[0]], world[edge[1]], color);
        }
    }

    /// Draws the world axes at the origin: X red, Y green, Z blue.
    pub fn draw_axes(&mut self, length: f64) {
        self.draw_line_3d(Vec3::ZERO, Vec3::new(length, 0.0, 0.0), Color::RED);
        self.draw_line_3d(Vec3::ZERO, Vec3::new(0.0, length, 0.0), Color::GREEN);
        self.draw_line_3d(Vec3::ZERO, Vec3::new(0.0, 0.0, length), Color::BLUE);
    }

    /// Draws a grid on the XZ plane at y = 0.
    pub fn draw_grid(&mut self, size: f64, step: f64, color: Color) {
        let half = size / 2.0;
        let mut x = -half;
        while x <= half {
            self.draw_line_3d(Vec3::new(x, 0.0, -half), Vec3::new(x, 0.0, half), color);
            x += step;
        }
        let mut z = -half;
        while z <= half {
            self.draw_line_3d(Vec3::new(-half, 0.0, z), Vec3::new(half, 0.0, z), color);
            z += step;
        }
    }

    /// Draws a point as a small three-axis cross.
    pub fn draw_point(&mut self, pos: Vec3, size: f64, color: Color) {
        let h = size / 2.0;
        self.draw_line_3d(
            Vec3::new(pos.x - h, pos.y, pos.z),
            Vec3::new(pos.x + h, pos.y, pos.z),
            color,
        );
        self.draw_line_3d(
            Vec3::new(pos.x, pos.y - h, pos.z),
            Vec3::new(pos.x, pos.y + h, pos.z),
            color,
        );
        self.draw_line_3d(
            Vec3::new(pos.x, pos.y, pos.z - h),
            Vec3::new(pos.x, pos.y, pos.z + h),
            color,
        );
    }
}
