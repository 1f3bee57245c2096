//! Depth-buffered triangle rasterization.
//!
//! The [`Rasterizer`] is the heart of the pipeline. It borrows the camera
//! and framebuffer for the duration of a frame, owns the depth buffer, and
//! caches the view frustum behind a dirty flag.
//!
//! # Per-frame protocol
//!
//! 1. [`Rasterizer::clear_depth`] resets every depth cell to infinity.
//! 2. [`Rasterizer::invalidate_frustum`] after any camera change.
//! 3. [`Rasterizer::reset_culling_stats`] zeroes the culling counters.
//! 4. Issue draw calls; each lazily re-extracts the frustum when stale.
//!
//! # Triangle path
//!
//! Vertices are transformed to clip space by the camera's view-projection
//! matrix. A triangle is skipped only when every vertex has clip w <= 0.
//! After the perspective divide, NDC maps to screen with Y flipped (origin
//! top-left), which makes **clockwise** screen winding front-facing: the
//! screen cross product is negative for back faces, and those are discarded
//! unless [`Rasterizer::disable_backface_culling`] is set.
//!
//! Coverage and interpolation use incremental edge functions; color
//! interpolates with affine barycentric weights while UVs and lighting
//! intensity interpolate perspective-correctly.
//!
//! # Lighting
//!
//! Gouraud intensity per vertex is `0.3 + 0.7 * max(0, normal . light)`,
//! ambient plus Lambert diffuse. Flat paths compute one face normal from
//! world-space edges and shade the whole triangle with a single intensity.

mod edgefunction;
mod shader;

use crate::camera::Camera;
use crate::color::Color;
use crate::framebuffer::Framebuffer;
use crate::frustum::Frustum;
use crate::geometry::Aabb;
use crate::math::{Mat4, Vec2, Vec3, Vec4};
use crate::mesh::Geometry;
use crate::texture::Texture;

use shader::{FlatShader, GouraudShader, TextureGouraudShader, TextureShader};

const AMBIENT: f64 = 0.3;
const DIFFUSE: f64 = 0.7;

/// Ambient plus Lambert diffuse term. `light` must be normalized.
#[inline]
fn lambert(normal: Vec3, light: Vec3) -> f64 {
    AMBIENT + DIFFUSE * normal.dot(light).max(0.0)
}

/// A vertex with all attributes needed for rasterization.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    /// World-space position.
    pub position: Vec3,
    /// Normal vector for lighting; unit length expected when lit.
    pub normal: Vec3,
    /// Texture coordinates.
    pub uv: Vec2,
    /// Vertex color.
    pub color: Color,
}

/// A triangle to be rasterized.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Triangle {
    pub v: [Vertex; 3],
}

impl Triangle {
    pub fn new(v: [Vertex; 3]) -> Self {
        Self { v }
    }
}

/// Frustum culling counters, reset once per frame by convention.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CullingStats {
    /// Meshes tested against the frustum.
    pub meshes_tested: usize,
    /// Meshes rejected entirely.
    pub meshes_culled: usize,
    /// Meshes that passed the test.
    pub meshes_drawn: usize,
}

/// Software triangle rasterizer with a z-buffer.
pub struct Rasterizer<'a> {
    camera: &'a mut Camera,
    fb: &'a mut Framebuffer,
    zbuffer: Vec<f64>,
    frustum: Frustum,
    frustum_dirty: bool,
    pub culling_stats: CullingStats,
    /// When set, both sides of every triangle are rendered.
    pub disable_backface_culling: bool,
}

impl<'a> Rasterizer<'a> {
    /// Creates a rasterizer drawing through `camera` into `fb`.
    pub fn new(camera: &'a mut Camera, fb: &'a mut Framebuffer) -> Self {
        let size = fb.width() * fb.height();
        Self {
            camera,
            fb,
            zbuffer: vec![f64::INFINITY; size],
            frustum: Frustum::default(),
            frustum_dirty: true,
            culling_stats: CullingStats::default(),
            disable_backface_culling: false,
        }
    }

    pub fn width(&self) -> usize {
        self.fb.width()
    }

    pub fn height(&self) -> usize {
        self.fb.height()
    }

    /// Read access to the target framebuffer.
    pub fn framebuffer(&self) -> &Framebuffer {
        self.fb
    }

    /// Write access to the target framebuffer (clearing, overlays).
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        self.fb
    }

    /// Access to the camera. Invalidate the frustum after moving it.
    pub fn camera(&self) -> &Camera {
        self.camera
    }

    /// Mutable access to the camera. Invalidate the frustum after moving it.
    pub fn camera_mut(&mut self) -> &mut Camera {
        self.camera
    }

    /// Reallocates the depth buffer to match the framebuffer dimensions.
    pub fn resize(&mut self) {
        self.zbuffer = vec![f64::INFINITY; self.fb.width() * self.fb.height()];
    }

    /// Resets every depth cell to positive infinity. Call once per frame.
    pub fn clear_depth(&mut self) {
        self.zbuffer.fill(f64::INFINITY);
    }

    /// Returns the depth at (x, y), or positive infinity out of bounds.
    pub fn depth(&self, x: i32, y: i32) -> f64 {
        if x < 0 || x >= self.fb.width() as i32 || y < 0 || y >= self.fb.height() as i32 {
            return f64::INFINITY;
        }
        self.zbuffer[y as usize * self.fb.width() + x as usize]
    }

    /// Marks the cached frustum stale. Call after the camera moves or any
    /// projection parameter changes.
    pub fn invalidate_frustum(&mut self) {
        self.frustum_dirty = true;
    }

    fn update_frustum(&mut self) {
        if self.frustum_dirty {
            self.frustum = Frustum::from_matrix(self.camera.view_projection_matrix());
            self.frustum_dirty = false;
        }
    }

    /// The current view frustum, re-extracted first if stale.
    pub fn frustum(&mut self) -> Frustum {
        self.update_frustum();
        self.frustum
    }

    /// Zeroes the culling counters. Call once per frame.
    pub fn reset_culling_stats(&mut self) {
        self.culling_stats = CullingStats::default();
    }

    /// Tests whether a world-space AABB is at least partially visible.
    pub fn is_visible(&mut self, world_bounds: Aabb) -> bool {
        self.update_frustum();
        self.frustum.intersects_aabb(world_bounds)
    }

    /// Tests whether a local-space AABB is visible after transformation.
    pub fn is_visible_transformed(&mut self, local_bounds: Aabb, transform: Mat4) -> bool {
        let world_bounds = local_bounds.transform(transform);
        self.is_visible(world_bounds)
    }

    // =========================================================================
    // Triangle paths
    // =========================================================================

    /// Rasterizes a triangle, interpolating the vertex colors as-is.
    pub fn draw_triangle(&mut self, tri: &Triangle) {
        let (sv, all_behind) = self.project_triangle(positions(tri));
        if all_behind {
            return;
        }
        let shader = GouraudShader::new([tri.v[0].color, tri.v[1].color, tri.v[2].color]);
        self.fill_triangle(&sv, &shader);
    }

    /// Rasterizes a single-color triangle.
    pub fn draw_triangle_flat(&mut self, v0: Vec3, v1: Vec3, v2: Vec3, color: Color) {
        let (sv, all_behind) = self.project_triangle([v0, v1, v2]);
        if all_behind {
            return;
        }
        let shader = FlatShader::new(color);
        self.fill_triangle(&sv, &shader);
    }

    /// Rasterizes a triangle shaded by one face normal computed from its
    /// world-space edges.
    pub fn draw_triangle_lit(&mut self, v0: Vec3, v1: Vec3, v2: Vec3, color: Color, light_dir: Vec3) {
        let normal = (v1 - v0).cross(v2 - v0).normalize();
        let intensity = lambert(normal, light_dir.normalize());
        self.draw_triangle_flat(v0, v1, v2, color.multiply(intensity));
    }

    /// Rasterizes a Gouraud-shaded triangle: lighting is evaluated at each
    /// vertex and the lit colors interpolated across the face.
    pub fn draw_triangle_gouraud(&mut self, tri: &Triangle, light_dir: Vec3) {
        let (sv, all_behind) = self.project_triangle(positions(tri));
        if all_behind {
            return;
        }

        let light = light_dir.normalize();
        let lit = |v: &Vertex| v.color.multiply(lambert(v.normal, light));
        let shader = GouraudShader::new([lit(&tri.v[0]), lit(&tri.v[1]), lit(&tri.v[2])]);
        self.fill_triangle(&sv, &shader);
    }

    /// Rasterizes a textured triangle with perspective-correct UVs, lit by
    /// one face normal computed from its world-space edges.
    pub fn draw_triangle_textured(&mut self, tri: &Triangle, texture: &Texture, light_dir: Vec3) {
        let (sv, all_behind) = self.project_triangle(positions(tri));
        if all_behind {
            return;
        }

        let e1 = tri.v[1].position - tri.v[0].position;
        let e2 = tri.v[2].position - tri.v[0].position;
        let face_normal = e1.cross(e2).normalize();
        let intensity = lambert(face_normal, light_dir.normalize());

        let shader = TextureShader::new(texture, uvs(tri), Self::inverse_ws(&sv), intensity);
        self.fill_triangle(&sv, &shader);
    }

    /// Rasterizes a textured triangle with Gouraud lighting: per-vertex
    /// intensities interpolate perspective-correctly and modulate the
    /// texture sample.
    pub fn draw_triangle_textured_gouraud(
        &mut self,
        tri: &Triangle,
        texture: &Texture,
        light_dir: Vec3,
    ) {
        let (sv, all_behind) = self.project_triangle(positions(tri));
        if all_behind {
            return;
        }

        let light = light_dir.normalize();
        let intensities = [
            lambert(tri.v[0].normal, light),
            lambert(tri.v[1].normal, light),
            lambert(tri.v[2].normal, light),
        ];

        let shader =
            TextureGouraudShader::new(texture, uvs(tri), Self::inverse_ws(&sv), intensities);
        self.fill_triangle(&sv, &shader);
    }

    /// Draws a quad as two flat triangles.
    pub fn draw_quad(&mut self, v0: Vec3, v1: Vec3, v2: Vec3, v3: Vec3, color: Color) {
        self.draw_triangle_flat(v0, v1, v2, color);
        self.draw_triangle_flat(v0, v2, v3, color);
    }

    /// Projects a world-space line to the screen and draws it without depth
    /// testing. Skipped only when both endpoints are behind the camera.
    pub fn draw_line_3d(&mut self, a: Vec3, b: Vec3, color: Color) {
        let view_proj = self.camera.view_projection_matrix();

        let mut ca = view_proj * Vec4::from_vec3(a, 1.0);
        let mut cb = view_proj * Vec4::from_vec3(b, 1.0);

        if ca.w <= 0.0 && cb.w <= 0.0 {
            return;
        }

        if ca.w > 0.0 {
            ca.x /= ca.w;
            ca.y /= ca.w;
        }
        if cb.w > 0.0 {
            cb.x /= cb.w;
            cb.y /= cb.w;
        }

        let w = self.fb.width() as f64;
        let h = self.fb.height() as f64;
        let x0 = ((ca.x + 1.0) * 0.5 * w) as i32;
        let y0 = ((1.0 - ca.y) * 0.5 * h) as i32;
        let x1 = ((cb.x + 1.0) * 0.5 * w) as i32;
        let y1 = ((1.0 - cb.y) * 0.5 * h) as i32;

        self.fb.draw_line(x0, y0, x1, y1, color);
    }

    // =========================================================================
    // Mesh paths
    // =========================================================================

    /// Culls a mesh against the frustum when it exposes the bounds
    /// capability. Returns true when the mesh should be skipped.
    fn try_frustum_cull<M: Geometry + ?Sized>(&mut self, mesh: &M, transform: Mat4) -> bool {
        let Some(bounded) = mesh.as_bounded() else {
            return false;
        };

        self.culling_stats.meshes_tested += 1;

        let (min, max) = bounded.bounds();
        if !self.is_visible_transformed(Aabb::new(min, max), transform) {
            self.culling_stats.meshes_culled += 1;
            return true;
        }

        self.culling_stats.meshes_drawn += 1;
        false
    }

    /// Renders a mesh flat-shaded.
    ///
    /// The light is transformed into the mesh's local space (by the inverse
    /// transform) so rotating the model rotates the apparent lighting with
    /// it.
    pub fn draw_mesh<M: Geometry + ?Sized>(
        &mut self,
        mesh: &M,
        transform: Mat4,
        color: Color,
        light_dir: Vec3,
    ) {
        if self.try_frustum_cull(mesh, transform) {
            return;
        }

        let local_light = transform.inverse().transform_direction(light_dir).normalize();

        for i in 0..mesh.triangle_count() {
            let [i0, i1, i2] = mesh.face(i);
            let (p0, ..) = mesh.vertex(i0);
            let (p1, ..) = mesh.vertex(i1);
            let (p2, ..) = mesh.vertex(i2);

            let v0 = transform.transform_point(p0);
            let v1 = transform.transform_point(p1);
            let v2 = transform.transform_point(p2);

            self.draw_triangle_lit(v0, v1, v2, color, local_light);
        }
    }

    /// Renders a mesh with Gouraud shading.
    pub fn draw_mesh_gouraud<M: Geometry + ?Sized>(
        &mut self,
        mesh: &M,
        transform: Mat4,
        color: Color,
        light_dir: Vec3,
    ) {
        if self.try_frustum_cull(mesh, transform) {
            return;
        }

        for i in 0..mesh.triangle_count() {
            let tri = world_triangle(mesh, i, transform, color);
            self.draw_triangle_gouraud(&tri, light_dir);
        }
    }

    /// Renders a mesh with texture mapping and face lighting.
    pub fn draw_mesh_textured<M: Geometry + ?Sized>(
        &mut self,
        mesh: &M,
        transform: Mat4,
        texture: &Texture,
        light_dir: Vec3,
    ) {
        if self.try_frustum_cull(mesh, transform) {
            return;
        }

        for i in 0..mesh.triangle_count() {
            let tri = world_triangle(mesh, i, transform, Color::WHITE);
            self.draw_triangle_textured(&tri, texture, light_dir);
        }
    }

    /// Renders a mesh with texture mapping and Gouraud lighting.
    pub fn draw_mesh_textured_gouraud<M: Geometry + ?Sized>(
        &mut self,
        mesh: &M,
        transform: Mat4,
        texture: &Texture,
        light_dir: Vec3,
    ) {
        if self.try_frustum_cull(mesh, transform) {
            return;
        }

        for i in 0..mesh.triangle_count() {
            let tri = world_triangle(mesh, i, transform, Color::WHITE);
            self.draw_triangle_textured_gouraud(&tri, texture, light_dir);
        }
    }

    /// Renders a mesh as a wireframe, one line per triangle edge, without
    /// depth testing.
    pub fn draw_mesh_wireframe<M: Geometry + ?Sized>(
        &mut self,
        mesh: &M,
        transform: Mat4,
        color: Color,
    ) {
        if self.try_frustum_cull(mesh, transform) {
            return;
        }

        for i in 0..mesh.triangle_count() {
            let [i0, i1, i2] = mesh.face(i);
            let (p0, ..) = mesh.vertex(i0);
            let (p1, ..) = mesh.vertex(i1);
            let (p2, ..) = mesh.vertex(i2);

            let v0 = transform.transform_point(p0);
            let v1 = transform.transform_point(p1);
            let v2 = transform.transform_point(p2);

            self.draw_line_3d(v0, v1, color);
            self.draw_line_3d(v1, v2, color);
            self.draw_line_3d(v2, v0, color);
        }
    }

    // =========================================================================
    // Mesh paths with out-of-band bounds
    // =========================================================================

    /// Like [`Rasterizer::draw_mesh`], but culls with bounds supplied by the
    /// caller. Returns whether the mesh was drawn.
    pub fn draw_mesh_culled<M: Geometry + ?Sized>(
        &mut self,
        mesh: &M,
        transform: Mat4,
        local_bounds: Aabb,
        color: Color,
        light_dir: Vec3,
    ) -> bool {
        self.culling_stats.meshes_tested += 1;

        if !self.is_visible_transformed(local_bounds, transform) {
            self.culling_stats.meshes_culled += 1;
            return false;
        }

        self.culling_stats.meshes_drawn += 1;
        self.draw_mesh(mesh, transform, color, light_dir);
        true
    }

    /// Like [`Rasterizer::draw_mesh_gouraud`], with caller-supplied bounds.
    /// Returns whether the mesh was drawn.
    pub fn draw_mesh_gouraud_culled<M: Geometry + ?Sized>(
        &mut self,
        mesh: &M,
        transform: Mat4,
        local_bounds: Aabb,
        color: Color,
        light_dir: Vec3,
    ) -> bool {
        self.culling_stats.meshes_tested += 1;

        if !self.is_visible_transformed(local_bounds, transform) {
            self.culling_stats.meshes_culled += 1;
            return false;
        }

        self.culling_stats.meshes_drawn += 1;
        self.draw_mesh_gouraud(mesh, transform, color, light_dir);
        true
    }

    /// Like [`Rasterizer::draw_mesh_textured`], with caller-supplied bounds.
    /// Returns whether the mesh was drawn.
    pub fn draw_mesh_textured_culled<M: Geometry + ?Sized>(
        &mut self,
        mesh: &M,
        transform: Mat4,
        local_bounds: Aabb,
        texture: &Texture,
        light_dir: Vec3,
    ) -> bool {
        self.culling_stats.meshes_tested += 1;

        if !self.is_visible_transformed(local_bounds, transform) {
            self.culling_stats.meshes_culled += 1;
            return false;
        }

        self.culling_stats.meshes_drawn += 1;
        self.draw_mesh_textured(mesh, transform, texture, light_dir);
        true
    }

    /// Like [`Rasterizer::draw_mesh_textured_gouraud`], with caller-supplied
    /// bounds. Returns whether the mesh was drawn.
    pub fn draw_mesh_textured_gouraud_culled<M: Geometry + ?Sized>(
        &mut self,
        mesh: &M,
        transform: Mat4,
        local_bounds: Aabb,
        texture: &Texture,
        light_dir: Vec3,
    ) -> bool {
        self.culling_stats.meshes_tested += 1;

        if !self.is_visible_transformed(local_bounds, transform) {
            self.culling_stats.meshes_culled += 1;
            return false;
        }

        self.culling_stats.meshes_drawn += 1;
        self.draw_mesh_textured_gouraud(mesh, transform, texture, light_dir);
        true
    }
}

#[inline]
fn positions(tri: &Triangle) -> [Vec3; 3] {
    [tri.v[0].position, tri.v[1].position, tri.v[2].position]
}

#[inline]
fn uvs(tri: &Triangle) -> [Vec2; 3] {
    [tri.v[0].uv, tri.v[1].uv, tri.v[2].uv]
}

/// Builds a world-space triangle from mesh face `i`: positions transformed
/// as points, normals as renormalized directions.
fn world_triangle<M: Geometry + ?Sized>(
    mesh: &M,
    i: usize,
    transform: Mat4,
    color: Color,
) -> Triangle {
    let [i0, i1, i2] = mesh.face(i);

    let make = |index: usize| {
        let (position, normal, uv) = mesh.vertex(index);
        Vertex {
            position: transform.transform_point(position),
            normal: transform.transform_direction(normal).normalize(),
            uv,
            color,
        }
    };

    Triangle::new([make(i0), make(i1), make(i2)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;

    const LIGHT_FORWARD: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    /// Camera at (0, 0, 5) looking at the origin with a square aspect.
    fn test_camera() -> Camera {
        let mut camera = Camera::new();
        camera.set_position(Vec3::new(0.0, 0.0, 5.0));
        camera.look_at(Vec3::ZERO);
        camera.set_aspect(1.0);
        camera.set_clip_planes(0.1, 100.0);
        camera
    }

    /// Front-facing triangle at depth `z` covering the screen center.
    /// Clockwise on screen: bottom-left, top-center, bottom-right.
    fn front_triangle(z: f64, color: Color) -> Triangle {
        let vertex = |x: f64, y: f64| Vertex {
            position: Vec3::new(x, y, z),
            normal: Vec3::new(0.0, 0.0, 1.0),
            uv: Vec2::ZERO,
            color,
        };
        Triangle::new([vertex(-1.0, -1.0), vertex(0.0, 1.0), vertex(1.0, -1.0)])
    }

    fn reversed(tri: &Triangle) -> Triangle {
        Triangle::new([tri.v[0], tri.v[2], tri.v[1]])
    }

    fn lit_pixels(fb: &Framebuffer) -> usize {
        fb.pixels()
            .iter()
            .filter(|p| **p != Color::TRANSPARENT)
            .count()
    }

    #[test]
    fn gouraud_triangle_paints_the_center_red() {
        let mut camera = test_camera();
        let mut fb = Framebuffer::new(64, 64);
        let mut r = Rasterizer::new(&mut camera, &mut fb);
        r.clear_depth();

        r.draw_triangle_gouraud(&front_triangle(0.0, Color::RED), LIGHT_FORWARD);

        // Normal faces the light head-on: 0.3 + 0.7 * 1 = full intensity.
        // Interpolation may truncate a channel by one.
        let c = fb.get_pixel(32, 32);
        assert!(c.r >= 254, "center pixel r = {}", c.r);
        assert_eq!(c.g, 0);
        assert_eq!(c.b, 0);
        assert_eq!(c.a, 255);
    }

    #[test]
    fn reversed_winding_is_culled() {
        let mut camera = test_camera();
        let mut fb = Framebuffer::new(64, 64);
        let mut r = Rasterizer::new(&mut camera, &mut fb);
        r.clear_depth();

        r.draw_triangle_gouraud(&reversed(&front_triangle(0.0, Color::RED)), LIGHT_FORWARD);

        assert_eq!(lit_pixels(&fb), 0);
    }

    #[test]
    fn disabling_backface_culling_draws_both_windings() {
        let tri = front_triangle(0.0, Color::RED);

        for tri in [tri, reversed(&tri)] {
            let mut camera = test_camera();
            let mut fb = Framebuffer::new(64, 64);
            let mut r = Rasterizer::new(&mut camera, &mut fb);
            r.disable_backface_culling = true;
            r.clear_depth();

            r.draw_triangle_gouraud(&tri, LIGHT_FORWARD);

            assert_ne!(fb.get_pixel(32, 32), Color::TRANSPARENT);
        }
    }

    #[test]
    fn nearer_triangle_wins_regardless_of_draw_order() {
        // z = 1 sits nearer the camera at z = 5 than z = 0 does.
        let far = front_triangle(0.0, Color::RED);
        let near = front_triangle(1.0, Color::BLUE);

        for order in [[&far, &near], [&near, &far]] {
            let mut camera = test_camera();
            let mut fb = Framebuffer::new(64, 64);
            let mut r = Rasterizer::new(&mut camera, &mut fb);
            r.clear_depth();

            for tri in order {
                r.draw_triangle_gouraud(tri, LIGHT_FORWARD);
            }

            let c = fb.get_pixel(32, 32);
            assert!(c.b >= 254, "center pixel b = {}", c.b);
            assert_eq!(c.r, 0);
        }
    }

    #[test]
    fn coplanar_triangles_keep_the_first_writer() {
        // Equal depth at every shared pixel: the strict less-than test
        // rejects the second write.
        let red = front_triangle(0.0, Color::RED);
        let blue = front_triangle(0.0, Color::BLUE);

        let mut camera = test_camera();
        let mut fb = Framebuffer::new(64, 64);
        let mut r = Rasterizer::new(&mut camera, &mut fb);
        r.clear_depth();
        r.draw_triangle_gouraud(&red, LIGHT_FORWARD);
        r.draw_triangle_gouraud(&blue, LIGHT_FORWARD);
        let c = fb.get_pixel(32, 32);
        assert!(c.r > 0 && c.b == 0);

        let mut camera = test_camera();
        let mut fb = Framebuffer::new(64, 64);
        let mut r = Rasterizer::new(&mut camera, &mut fb);
        r.clear_depth();
        r.draw_triangle_gouraud(&blue, LIGHT_FORWARD);
        r.draw_triangle_gouraud(&red, LIGHT_FORWARD);
        let c = fb.get_pixel(32, 32);
        assert!(c.b > 0 && c.r == 0);
    }

    #[test]
    fn zero_area_triangle_writes_nothing() {
        let mut camera = test_camera();
        let mut fb = Framebuffer::new(64, 64);
        let mut r = Rasterizer::new(&mut camera, &mut fb);
        r.clear_depth();

        let vertex = |x: f64| Vertex {
            position: Vec3::new(x, 0.0, 0.0),
            color: Color::RED,
            ..Default::default()
        };
        let degenerate = Triangle::new([vertex(-1.0), vertex(0.0), vertex(1.0)]);
        r.draw_triangle(&degenerate);

        assert_eq!(lit_pixels(&fb), 0);
    }

    #[test]
    fn triangle_behind_the_camera_is_skipped() {
        let mut camera = test_camera();
        let mut fb = Framebuffer::new(64, 64);
        let mut r = Rasterizer::new(&mut camera, &mut fb);
        r.clear_depth();

        r.draw_triangle_gouraud(&front_triangle(20.0, Color::RED), LIGHT_FORWARD);

        assert_eq!(lit_pixels(&fb), 0);
    }

    #[test]
    fn clear_depth_resets_every_cell_to_infinity() {
        let mut camera = test_camera();
        let mut fb = Framebuffer::new(16, 16);
        let mut r = Rasterizer::new(&mut camera, &mut fb);
        r.clear_depth();

        r.draw_triangle_gouraud(&front_triangle(0.0, Color::RED), LIGHT_FORWARD);
        assert!(r.depth(8, 8) < f64::INFINITY);

        r.clear_depth();
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(r.depth(x, y), f64::INFINITY);
            }
        }
    }

    #[test]
    fn out_of_bounds_depth_reads_infinity() {
        let mut camera = test_camera();
        let mut fb = Framebuffer::new(8, 8);
        let r = Rasterizer::new(&mut camera, &mut fb);
        assert_eq!(r.depth(-1, 0), f64::INFINITY);
        assert_eq!(r.depth(100, 0), f64::INFINITY);
    }

    #[test]
    fn shared_edge_leaves_no_cracks() {
        // A quad split along its diagonal: every interior pixel must be
        // covered by exactly one of the two triangles.
        let mut camera = test_camera();
        let mut fb = Framebuffer::new(64, 64);
        let mut r = Rasterizer::new(&mut camera, &mut fb);
        r.clear_depth();

        // Clockwise on screen: (bl, tl, tr) and (bl, tr, br).
        let bl = Vec3::new(-1.0, -1.0, 0.0);
        let tl = Vec3::new(-1.0, 1.0, 0.0);
        let tr = Vec3::new(1.0, 1.0, 0.0);
        let br = Vec3::new(1.0, -1.0, 0.0);
        r.draw_triangle_flat(bl, tl, tr, Color::RED);
        r.draw_triangle_flat(bl, tr, br, Color::BLUE);

        for y in 25..40 {
            for x in 25..40 {
                let c = fb.get_pixel(x, y);
                assert_ne!(c, Color::TRANSPARENT, "hole at ({x}, {y})");
                assert!(
                    c == Color::RED || c == Color::BLUE,
                    "blended pixel at ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn mesh_outside_the_frustum_is_culled() {
        let mut camera = test_camera();
        let mut fb = Framebuffer::new(64, 64);
        let mut r = Rasterizer::new(&mut camera, &mut fb);
        r.clear_depth();
        r.reset_culling_stats();

        let cube = Mesh::cube(2.0);
        let far_left = Mat4::translation(Vec3::new(100.0, 0.0, 0.0));
        r.draw_mesh_gouraud(&cube, far_left, Color::RED, LIGHT_FORWARD);

        assert_eq!(r.culling_stats.meshes_tested, 1);
        assert_eq!(r.culling_stats.meshes_culled, 1);
        assert_eq!(r.culling_stats.meshes_drawn, 0);
        assert_eq!(lit_pixels(&fb), 0);
    }

    #[test]
    fn visible_mesh_draws_and_counts() {
        let mut camera = test_camera();
        let mut fb = Framebuffer::new(64, 64);
        let mut r = Rasterizer::new(&mut camera, &mut fb);
        r.clear_depth();
        r.reset_culling_stats();

        let cube = Mesh::cube(2.0);
        r.draw_mesh_gouraud(&cube, Mat4::identity(), Color::RED, Vec3::new(0.0, 0.0, 1.0));

        assert_eq!(r.culling_stats.meshes_drawn, 1);
        assert!(lit_pixels(&fb) > 0);
    }

    #[test]
    fn culled_variant_reports_whether_it_drew() {
        let mut camera = test_camera();
        let mut fb = Framebuffer::new(64, 64);
        let mut r = Rasterizer::new(&mut camera, &mut fb);
        r.clear_depth();

        let cube = Mesh::cube(2.0);
        let bounds = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::ONE);

        assert!(r.draw_mesh_gouraud_culled(
            &cube,
            Mat4::identity(),
            bounds,
            Color::RED,
            LIGHT_FORWARD,
        ));
        assert!(!r.draw_mesh_gouraud_culled(
            &cube,
            Mat4::translation(Vec3::new(100.0, 0.0, 0.0)),
            bounds,
            Color::RED,
            LIGHT_FORWARD,
        ));
    }

    #[test]
    fn invalidated_frustum_follows_the_camera() {
        let mut camera = test_camera();
        let mut fb = Framebuffer::new(64, 64);
        let mut r = Rasterizer::new(&mut camera, &mut fb);

        let origin_box = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::ONE);
        assert!(r.is_visible(origin_box));

        // Turn the camera around; the stale frustum still reports visible
        // until invalidated.
        r.camera_mut().look_at(Vec3::new(0.0, 0.0, 10.0));
        assert!(r.is_visible(origin_box));

        r.invalidate_frustum();
        assert!(!r.is_visible(origin_box));
    }

    #[test]
    fn textured_mesh_shows_texture_detail() {
        let mut camera = test_camera();
        let mut fb = Framebuffer::new(64, 64);
        let mut r = Rasterizer::new(&mut camera, &mut fb);
        r.clear_depth();

        // Quad facing the camera, clockwise winding.
        let mut quad = Mesh::new("quad");
        let corners = [
            (-1.0, -1.0, 0.0, 0.0),
            (1.0, -1.0, 1.0, 0.0),
            (1.0, 1.0, 1.0, 1.0),
            (-1.0, 1.0, 0.0, 1.0),
        ];
        for (x, y, u, v) in corners {
            quad.vertices.push(crate::mesh::MeshVertex {
                position: Vec3::new(x, y, 0.0),
                normal: Vec3::new(0.0, 0.0, 1.0),
                uv: Vec2::new(u, v),
            });
        }
        quad.faces = vec![[0, 3, 2], [0, 2, 1]];
        quad.calculate_bounds();

        let texture = Texture::checkerboard(4, 4, 1, Color::WHITE, Color::rgb(40, 40, 40));
        r.draw_mesh_textured_gouraud(&quad, Mat4::identity(), &texture, LIGHT_FORWARD);

        let mut whites = 0;
        let mut darks = 0;
        for p in fb.pixels() {
            if p.r >= 254 {
                whites += 1;
            } else if *p != Color::TRANSPARENT {
                darks += 1;
            }
        }
        assert!(whites > 0, "no light checker cells rendered");
        assert!(darks > 0, "no dark checker cells rendered");
    }

    #[test]
    fn wireframe_mesh_draws_edges() {
        let mut camera = test_camera();
        let mut fb = Framebuffer::new(64, 64);
        let mut r = Rasterizer::new(&mut camera, &mut fb);
        r.clear_depth();

        let cube = Mesh::cube(2.0);
        r.draw_mesh_wireframe(&cube, Mat4::identity(), Color::GREEN);

        assert!(lit_pixels(&fb) > 20);
    }

    #[test]
    fn resize_matches_the_framebuffer() {
        let mut camera = test_camera();
        let mut fb = Framebuffer::new(32, 32);
        let mut r = Rasterizer::new(&mut camera, &mut fb);
        assert_eq!(r.width(), 32);
        r.resize();
        assert_eq!(r.depth(31, 31), f64::INFINITY);
    }
}
