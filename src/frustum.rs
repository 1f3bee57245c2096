//! View frustum extraction and visibility tests.
//!
//! The six planes are pulled from a combined view-projection matrix with the
//! Gribb/Hartmann method: each plane is a sum or difference of row 3 and one
//! of rows 0-2. All planes are normalized after extraction and their normals
//! point inward, so a point is inside a plane's half-space when its signed
//! distance is >= 0.

use crate::geometry::{Aabb, Plane};
use crate::math::{Mat4, Vec3};

/// The six planes of a view frustum, in the order Left, Right, Bottom, Top,
/// Near, Far.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Frustum {
    pub planes: [Plane; 6],
}

impl Frustum {
    pub const LEFT: usize = 0;
    pub const RIGHT: usize = 1;
    pub const BOTTOM: usize = 2;
    pub const TOP: usize = 3;
    pub const NEAR: usize = 4;
    pub const FAR: usize = 5;

    /// Extracts frustum planes from a column-major view-projection matrix.
    pub fn from_matrix(m: Mat4) -> Self {
        // Row i of the matrix as a (normal, d) pair.
        let row = |i: usize| (Vec3::new(m.get(i, 0), m.get(i, 1), m.get(i, 2)), m.get(i, 3));

        let (r0, d0) = row(0);
        let (r1, d1) = row(1);
        let (r2, d2) = row(2);
        let (r3, d3) = row(3);

        let mut planes = [
            Plane::new(r3 + r0, d3 + d0), // Left:   row3 + row0
            Plane::new(r3 - r0, d3 - d0), // Right:  row3 - row0
            Plane::new(r3 + r1, d3 + d1), // Bottom: row3 + row1
            Plane::new(r3 - r1, d3 - d1), // Top:    row3 - row1
            Plane::new(r3 + r2, d3 + d2), // Near:   row3 + row2
            Plane::new(r3 - r2, d3 - d2), // Far:    row3 - row2
        ];

        for plane in &mut planes {
            plane.normalize();
        }

        Self { planes }
    }

    /// Tests whether a point is inside all six planes.
    pub fn contains_point(&self, p: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.signed_distance(p) >= 0.0)
    }

    /// Tests whether a sphere intersects or is inside the frustum.
    pub fn intersects_sphere(&self, center: Vec3, radius: f64) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(center) >= -radius)
    }

    /// Tests whether an AABB intersects or is inside the frustum, using the
    /// positive-vertex optimization: for each plane only the corner furthest
    /// along the plane normal is tested.
    ///
    /// This is a conservative overlap test. A box straddling a frustum corner
    /// can report `true` without actually overlapping; a visible box never
    /// reports `false`.
    pub fn intersects_aabb(&self, aabb: Aabb) -> bool {
        for plane in &self.planes {
            let p_vertex = Vec3::new(
                if plane.normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
                if plane.normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
                if plane.normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
            );

            // Positive vertex outside means the whole box is outside.
            if plane.signed_distance(p_vertex) < 0.0 {
                return false;
            }
        }
        true
    }

    /// Tests whether an AABB is completely inside the frustum, using the
    /// symmetric negative-vertex test.
    pub fn contains_aabb(&self, aabb: Aabb) -> bool {
        for plane in &self.planes {
            let n_vertex = Vec3::new(
                if plane.normal.x >= 0.0 { aabb.min.x } else { aabb.max.x },
                if plane.normal.y >= 0.0 { aabb.min.y } else { aabb.max.y },
                if plane.normal.z >= 0.0 { aabb.min.z } else { aabb.max.z },
            );

            if plane.signed_distance(n_vertex) < 0.0 {
                return false;
            }
        }
        true
    }
}
