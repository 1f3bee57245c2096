//! Culling primitives: planes and axis-aligned bounding boxes.

use crate::math::{Mat4, Vec3};

/// A plane in the form `normal . p + d = 0`.
///
/// After [`Plane::normalize`] the normal has unit length and `d` is the true
/// signed distance from the origin. A point is on the positive side (the
/// "inside" for frustum planes) when the signed distance is >= 0.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f64,
}

impl Plane {
    pub const fn new(normal: Vec3, d: f64) -> Self {
        Self { normal, d }
    }

    /// Scales the plane equation so the normal has unit length.
    /// A zero-length normal is left untouched.
    pub fn normalize(&mut self) {
        let len = self.normal.length();
        if len == 0.0 {
            return;
        }
        self.normal = self.normal * (1.0 / len);
        self.d /= len;
    }

    /// Signed distance from the plane to a point.
    /// Positive means the same side as the normal.
    #[inline]
    pub fn signed_distance(&self, point: Vec3) -> f64 {
        self.normal.dot(point) + self.d
    }
}

/// An axis-aligned bounding box.
///
/// `min.k <= max.k` is expected on every axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Half the dimensions (extents from the center).
    pub fn half_size(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// All 8 corners, min-to-max on each axis.
    pub fn corners(&self) -> [Vec3; 8] {
        [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ]
    }

    /// Returns the tightest axis-aligned box containing this box after
    /// transformation: all 8 corners are transformed as points and their
    /// component-wise min/max taken.
    pub fn transform(&self, m: Mat4) -> Self {
        let corners = self.corners();

        let first = m.transform_point(corners[0]);
        let mut new_min = first;
        let mut new_max = first;

        for corner in &corners[1..] {
            let p = m.transform_point(*corner);
            new_min = new_min.min(p);
            new_max = new_max.max(p);
        }

        Self {
            min: new_min,
            max: new_max,
        }
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn plane_signed_distance() {
        // Plane at z=0, normal pointing +Z.
        let plane = Plane::new(Vec3::new(0.0, 0.0, 1.0), 0.0);
        assert_relative_eq!(plane.signed_distance(Vec3::ZERO), 0.0, epsilon = 1e-9);
        assert_relative_eq!(
            plane.signed_distance(Vec3::new(0.0, 0.0, 5.0)),
            5.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            plane.signed_distance(Vec3::new(10.0, -5.0, -3.0)),
            -3.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn plane_normalize_scales_normal_and_d() {
        let mut plane = Plane::new(Vec3::new(0.0, 3.0, 4.0), 10.0);
        plane.normalize();
        assert_relative_eq!(plane.normal.length(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(plane.normal.y, 0.6, epsilon = 1e-9);
        assert_relative_eq!(plane.normal.z, 0.8, epsilon = 1e-9);
        assert_relative_eq!(plane.d, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn aabb_center_and_size() {
        let b = Aabb::new(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(b.center(), Vec3::ZERO);
        assert_eq!(b.size(), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(b.half_size(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn aabb_contains_point_includes_boundary() {
        let b = Aabb::new(Vec3::ZERO, Vec3::new(10.0, 10.0, 10.0));
        assert!(b.contains_point(Vec3::new(5.0, 5.0, 5.0)));
        assert!(b.contains_point(Vec3::ZERO));
        assert!(b.contains_point(Vec3::new(10.0, 10.0, 10.0)));
        assert!(!b.contains_point(Vec3::new(11.0, 5.0, 5.0)));
        assert!(!b.contains_point(Vec3::new(5.0, -1.0, 5.0)));
    }

    #[test]
    fn aabb_transform_translation() {
        let b = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::ONE);
        let t = b.transform(Mat4::translation(Vec3::new(10.0, 20.0, 30.0)));
        assert_eq!(t.min, Vec3::new(9.0, 19.0, 29.0));
        assert_eq!(t.max, Vec3::new(11.0, 21.0, 31.0));
    }

    #[test]
    fn aabb_transform_contains_all_transformed_corners() {
        let b = Aabb::new(Vec3::new(-1.0, -2.0, -0.5), Vec3::new(2.0, 1.0, 3.0));
        let m = Mat4::rotation_axis(Vec3::new(1.0, 1.0, 0.0), 0.8)
            * Mat4::translation(Vec3::new(3.0, -1.0, 2.0));
        let t = b.transform(m);

        for corner in b.corners() {
            let p = m.transform_point(corner);
            assert!(t.contains_point(p), "corner {corner:?} escaped the bounds");
        }
    }

    #[test]
    fn aabb_transform_rotation_grows_bounds() {
        // Rotating a unit cube 45 degrees around Y widens X/Z to sqrt(2).
        let b = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::ONE);
        let t = b.transform(Mat4::rotation_y(std::f64::consts::FRAC_PI_4));
        assert_relative_eq!(t.max.x, std::f64::consts::SQRT_2, epsilon = 1e-12);
        assert_relative_eq!(t.min.z, -std::f64::consts::SQRT_2, epsilon = 1e-12);
        assert_relative_eq!(t.max.y, 1.0, epsilon = 1e-12);
    }
}
