//! Mesh access traits and an indexed triangle mesh.
//!
//! The rasterizer consumes meshes through a narrow capability-based
//! abstraction: [`Geometry`] exposes vertices and faces, and [`Bounded`]
//! additionally exposes a local-space bounding box for frustum culling.
//! Draw calls check for the bounds capability through
//! [`Geometry::as_bounded`] and fall back to drawing everything when a mesh
//! cannot provide bounds.

use crate::math::{Mat4, Vec2, Vec3};

/// Read access to indexed triangle geometry.
pub trait Geometry {
    fn vertex_count(&self) -> usize;
    fn triangle_count(&self) -> usize;

    /// Returns (position, normal, uv) for vertex `i`.
    fn vertex(&self, i: usize) -> (Vec3, Vec3, Vec2);

    /// Returns the three vertex indices of face `i`.
    fn face(&self, i: usize) -> [usize; 3];

    /// Upgrade hook for the bounds capability. Implementors that can provide
    /// a bounding box override this to return `Some(self)`.
    fn as_bounded(&self) -> Option<&dyn Bounded> {
        None
    }
}

/// Geometry that also knows its local-space bounding box.
pub trait Bounded: Geometry {
    /// Returns (min, max) of the local-space axis-aligned bounding box.
    fn bounds(&self) -> (Vec3, Vec3);
}

/// A single vertex with all attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// An indexed triangle mesh with cached bounds.
///
/// Vertices and faces are public for direct construction; call
/// [`Mesh::calculate_bounds`] after editing geometry so the cached bounding
/// box (and with it frustum culling) stays correct.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    name: String,
    pub vertices: Vec<MeshVertex>,
    pub faces: Vec<[usize; 3]>,
    bounds_min: Vec3,
    bounds_max: Vec3,
}

impl Mesh {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Recomputes the axis-aligned bounding box from the vertices.
    pub fn calculate_bounds(&mut self) {
        let Some(first) = self.vertices.first() else {
            return;
        };

        let mut min = first.position;
        let mut max = first.position;
        for v in &self.vertices[1..] {
            min = min.min(v.position);
            max = max.max(v.position);
        }
        self.bounds_min = min;
        self.bounds_max = max;
    }

    pub fn center(&self) -> Vec3 {
        (self.bounds_min + self.bounds_max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.bounds_max - self.bounds_min
    }

    /// Computes face normals and assigns them to the face's vertices.
    /// Vertices shared between faces end up with the last face's normal,
    /// giving flat shading.
    pub fn calculate_normals(&mut self) {
        for fi in 0..self.faces.len() {
            let [i0, i1, i2] = self.faces[fi];
            let v0 = self.vertices[i0].position;
            let v1 = self.vertices[i1].position;
            let v2 = self.vertices[i2].position;

            let normal = (v1 - v0).cross(v2 - v0).normalize();

            self.vertices[i0].normal = normal;
            self.vertices[i1].normal = normal;
            self.vertices[i2].normal = normal;
        }
    }

    /// Computes smooth per-vertex normals by accumulating area-weighted face
    /// normals and normalizing the sums.
    pub fn calculate_smooth_normals(&mut self) {
        for v in &mut self.vertices {
            v.normal = Vec3::ZERO;
        }

        for fi in 0..self.faces.len() {
            let [i0, i1, i2] = self.faces[fi];
            let v0 = self.vertices[i0].position;
            let v1 = self.vertices[i1].position;
            let v2 = self.vertices[i2].position;

            // Unnormalized cross weights large faces more heavily.
            let normal = (v1 - v0).cross(v2 - v0);

            self.vertices[i0].normal = self.vertices[i0].normal + normal;
            self.vertices[i1].normal = self.vertices[i1].normal + normal;
            self.vertices[i2].normal = self.vertices[i2].normal + normal;
        }

        for v in &mut self.vertices {
            v.normal = v.normal.normalize();
        }
    }

    /// Bakes a transform into the mesh: positions as points, normals as
    /// renormalized directions. Bounds are recomputed.
    pub fn apply_transform(&mut self, m: Mat4) {
        for v in &mut self.vertices {
            v.position = m.transform_point(v.position);
            v.normal = m.transform_direction(v.normal).normalize();
        }
        self.calculate_bounds();
    }

    /// Builds an axis-aligned cube centered at the origin.
    ///
    /// Each face gets its own four vertices so per-face normals and UVs stay
    /// sharp: 24 vertices, 12 faces. Front faces wind clockwise on screen
    /// when viewed from outside the cube.
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;

        let corners = [
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ];

        // Corner indices per face, ordered bottom-left, bottom-right,
        // top-right, top-left as seen from outside.
        let face_corners: [[usize; 4]; 6] = [
            [0, 1, 2, 3], // back   (-Z)
            [5, 4, 7, 6], // front  (+Z)
            [4, 0, 3, 7], // left   (-X)
            [1, 5, 6, 2], // right  (+X)
            [3, 2, 6, 7], // top    (+Y)
            [4, 5, 1, 0], // bottom (-Y)
        ];

        let face_normals = [
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
        ];

        let face_uvs = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];

        let mut mesh = Mesh::new("cube");
        for (fi, indices) in face_corners.iter().enumerate() {
            let base = mesh.vertices.len();
            for (ci, &corner) in indices.iter().enumerate() {
                mesh.vertices.push(MeshVertex {
                    position: corners[corner],
                    normal: face_normals[fi],
                    uv: face_uvs[ci],
                });
            }
            mesh.faces.push([base, base + 1, base + 2]);
            mesh.faces.push([base, base + 2, base + 3]);
        }

        mesh.calculate_bounds();
        mesh
    }
}

impl Geometry for Mesh {
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    fn vertex(&self, i: usize) -> (Vec3, Vec3, Vec2) {
        let v = self.vertices[i];
        (v.position, v.normal, v.uv)
    }

    fn face(&self, i: usize) -> [usize; 3] {
        self.faces[i]
    }

    fn as_bounded(&self) -> Option<&dyn Bounded> {
        Some(self)
    }
}

impl Bounded for Mesh {
    fn bounds(&self) -> (Vec3, Vec3) {
        (self.bounds_min, self.bounds_max)
    }
}
