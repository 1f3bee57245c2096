//! 4x4 transformation matrix using column-major convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Element (row r, col c) lives at flat index `r + 4*c`
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//!
//! Memory layout (flat indices):
//!
//! ```text
//! | 0  4  8  12 |
//! | 1  5  9  13 |
//! | 2  6  10 14 |
//! | 3  7  11 15 |
//! ```
//!
//! For an affine transform the basis vectors occupy the first three columns
//! and the translation the fourth.

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as a flat `[f64; 16]` in column-major order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4 {
    m: [f64; 16],
}

impl Mat4 {
    /// Build a matrix from raw column-major storage.
    pub const fn from_cols(m: [f64; 16]) -> Self {
        Self { m }
    }

    pub const fn identity() -> Self {
        Self::from_cols([
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Creates a translation matrix (translation in the last column).
    pub const fn translation(v: Vec3) -> Self {
        Self::from_cols([
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            v.x, v.y, v.z, 1.0,
        ])
    }

    /// Creates a per-axis scale matrix.
    pub const fn scaling(v: Vec3) -> Self {
        Self::from_cols([
            v.x, 0.0, 0.0, 0.0, //
            0.0, v.y, 0.0, 0.0, //
            0.0, 0.0, v.z, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Creates a uniform scale matrix.
    pub const fn scaling_uniform(s: f64) -> Self {
        Self::scaling(Vec3::new(s, s, s))
    }

    /// Creates a rotation matrix around the X axis.
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols([
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, s, 0.0, //
            0.0, -s, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Creates a rotation matrix around the Y axis.
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols([
            c, 0.0, -s, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            s, 0.0, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Creates a rotation matrix around the Z axis.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols([
            c, s, 0.0, 0.0, //
            -s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Creates a rotation matrix around an arbitrary axis.
    /// The axis does not need to be normalized.
    pub fn rotation_axis(axis: Vec3, angle: f64) -> Self {
        let axis = axis.normalize();
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.x, axis.y, axis.z);

        Self::from_cols([
            t * x * x + c,
            t * x * y + s * z,
            t * x * z - s * y,
            0.0,
            t * x * y - s * z,
            t * y * y + c,
            t * y * z + s * x,
            0.0,
            t * x * z + s * y,
            t * y * z - s * x,
            t * z * z + c,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }

    /// Creates a view matrix looking from `eye` towards `center`.
    ///
    /// Builds an orthonormal basis (forward, right, recomputed up) and writes
    /// it as a rotation with the eye offset folded into the last column.
    pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Self {
        let f = (center - eye).normalize();
        let s = f.cross(up).normalize();
        let u = s.cross(f);

        Self::from_cols([
            s.x,
            u.x,
            -f.x,
            0.0,
            s.y,
            u.y,
            -f.y,
            0.0,
            s.z,
            u.z,
            -f.z,
            0.0,
            -s.dot(eye),
            -u.dot(eye),
            f.dot(eye),
            1.0,
        ])
    }

    /// Creates a perspective projection matrix.
    ///
    /// OpenGL-style: right-handed camera looking down negative Z, mapping the
    /// frustum to NDC in [-1, 1] on all axes. After transforming a camera-space
    /// point, clip-space w equals the negated camera-space z.
    ///
    /// `fovy` is the vertical field of view in radians, `aspect` is
    /// width / height.
    pub fn perspective(fovy: f64, aspect: f64, near: f64, far: f64) -> Self {
        let f = 1.0 / (fovy / 2.0).tan();
        let nf = 1.0 / (near - far);

        Self::from_cols([
            f / aspect,
            0.0,
            0.0,
            0.0,
            0.0,
            f,
            0.0,
            0.0,
            0.0,
            0.0,
            (far + near) * nf,
            -1.0,
            0.0,
            0.0,
            2.0 * far * near * nf,
            0.0,
        ])
    }

    /// Creates an orthographic projection matrix.
    pub fn orthographic(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        let rl = 1.0 / (right - left);
        let tb = 1.0 / (top - bottom);
        let fn_ = 1.0 / (far - near);

        Self::from_cols([
            2.0 * rl,
            0.0,
            0.0,
            0.0,
            0.0,
            2.0 * tb,
            0.0,
            0.0,
            0.0,
            0.0,
            -2.0 * fn_,
            0.0,
            -(right + left) * rl,
            -(top + bottom) * tb,
            -(far + near) * fn_,
            1.0,
        ])
    }

    /// Transform a Vec3 as a point (w=1), dividing by the resulting w.
    /// A zero w is treated as 1 so degenerate projections pass through.
    pub fn transform_point(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        let mut w = m[3] * v.x + m[7] * v.y + m[11] * v.z + m[15];
        if w == 0.0 {
            w = 1.0;
        }
        Vec3::new(
            (m[0] * v.x + m[4] * v.y + m[8] * v.z + m[12]) / w,
            (m[1] * v.x + m[5] * v.y + m[9] * v.z + m[13]) / w,
            (m[2] * v.x + m[6] * v.y + m[10] * v.z + m[14]) / w,
        )
    }

    /// Transform a Vec3 as a direction (w=0, no translation, no divide).
    pub fn transform_direction(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0] * v.x + m[4] * v.y + m[8] * v.z,
            m[1] * v.x + m[5] * v.y + m[9] * v.z,
            m[2] * v.x + m[6] * v.y + m[10] * v.z,
        )
    }

    /// Returns the transposed matrix.
    pub fn transpose(&self) -> Self {
        let m = &self.m;
        Self::from_cols([
            m[0], m[4], m[8], m[12], //
            m[1], m[5], m[9], m[13], //
            m[2], m[6], m[10], m[14], //
            m[3], m[7], m[11], m[15],
        ])
    }

    /// Returns the determinant of the matrix.
    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0] * (m[5] * (m[10] * m[15] - m[14] * m[11]) - m[9] * (m[6] * m[15] - m[14] * m[7])
            + m[13] * (m[6] * m[11] - m[10] * m[7]))
            - m[4]
                * (m[1] * (m[10] * m[15] - m[14] * m[11]) - m[9] * (m[2] * m[15] - m[14] * m[3])
                    + m[13] * (m[2] * m[11] - m[10] * m[3]))
            + m[8]
                * (m[1] * (m[6] * m[15] - m[14] * m[7]) - m[5] * (m[2] * m[15] - m[14] * m[3])
                    + m[13] * (m[2] * m[7] - m[6] * m[3]))
            - m[12]
                * (m[1] * (m[6] * m[11] - m[10] * m[7]) - m[5] * (m[2] * m[11] - m[10] * m[3])
                    + m[9] * (m[2] * m[7] - m[6] * m[3]))
    }

    /// Returns the inverse of the matrix, or the identity when the matrix
    /// is singular (determinant zero).
    pub fn inverse(&self) -> Self {
        let det = self.determinant();
        if det == 0.0 {
            return Self::identity();
        }

        let inv_det = 1.0 / det;
        let m = &self.m;
        let mut inv = [0.0f64; 16];

        inv[0] = (m[5] * (m[10] * m[15] - m[14] * m[11]) - m[9] * (m[6] * m[15] - m[14] * m[7])
            + m[13] * (m[6] * m[11] - m[10] * m[7]))
            * inv_det;
        inv[1] = -(m[1] * (m[10] * m[15] - m[14] * m[11]) - m[9] * (m[2] * m[15] - m[14] * m[3])
            + m[13] * (m[2] * m[11] - m[10] * m[3]))
            * inv_det;
        inv[2] = (m[1] * (m[6] * m[15] - m[14] * m[7]) - m[5] * (m[2] * m[15] - m[14] * m[3])
            + m[13] * (m[2] * m[7] - m[6] * m[3]))
            * inv_det;
        inv[3] = -(m[1] * (m[6] * m[11] - m[10] * m[7]) - m[5] * (m[2] * m[11] - m[10] * m[3])
            + m[9] * (m[2] * m[7] - m[6] * m[3]))
            * inv_det;

        inv[4] = -(m[4] * (m[10] * m[15] - m[14] * m[11]) - m[8] * (m[6] * m[15] - m[14] * m[7])
            + m[12] * (m[6] * m[11] - m[10] * m[7]))
            * inv_det;
        inv[5] = (m[0] * (m[10] * m[15] - m[14] * m[11]) - m[8] * (m[2] * m[15] - m[14] * m[3])
            + m[12] * (m[2] * m[11] - m[10] * m[3]))
            * inv_det;
        inv[6] = -(m[0] * (m[6] * m[15] - m[14] * m[7]) - m[4] * (m[2] * m[15] - m[14] * m[3])
            + m[12] * (m[2] * m[7] - m[6] * m[3]))
            * inv_det;
        inv[7] = (m[0] * (m[6] * m[11] - m[10] * m[7]) - m[4] * (m[2] * m[11] - m[10] * m[3])
            + m[8] * (m[2] * m[7] - m[6] * m[3]))
            * inv_det;

        inv[8] = (m[4] * (m[9] * m[15] - m[13] * m[11]) - m[8] * (m[5] * m[15] - m[13] * m[7])
            + m[12] * (m[5] * m[11] - m[9] * m[7]))
            * inv_det;
        inv[9] = -(m[0] * (m[9] * m[15] - m[13] * m[11]) - m[8] * (m[1] * m[15] - m[13] * m[3])
            + m[12] * (m[1] * m[11] - m[9] * m[3]))
            * inv_det;
        inv[10] = (m[0] * (m[5] * m[15] - m[13] * m[7]) - m[4] * (m[1] * m[15] - m[13] * m[3])
            + m[12] * (m[1] * m[7] - m[5] * m[3]))
            * inv_det;
        inv[11] = -(m[0] * (m[5] * m[11] - m[9] * m[7]) - m[4] * (m[1] * m[11] - m[9] * m[3])
            + m[8] * (m[1] * m[7] - m[5] * m[3]))
            * inv_det;

        inv[12] = -(m[4] * (m[9] * m[14] - m[13] * m[10]) - m[8] * (m[5] * m[14] - m[13] * m[6])
            + m[12] * (m[5] * m[10] - m[9] * m[6]))
            * inv_det;
        inv[13] = (m[0] * (m[9] * m[14] - m[13] * m[10]) - m[8] * (m[1] * m[14] - m[13] * m[2])
            + m[12] * (m[1] * m[10] - m[9] * m[2]))
            * inv_det;
        inv[14] = -(m[0] * (m[5] * m[14] - m[13] * m[6]) - m[4] * (m[1] * m[14] - m[13] * m[2])
            + m[12] * (m[1] * m[6] - m[5] * m[2]))
            * inv_det;
        inv[15] = (m[0] * (m[5] * m[10] - m[9] * m[6]) - m[4] * (m[1] * m[10] - m[9] * m[2])
            + m[8] * (m[1] * m[6] - m[5] * m[2]))
            * inv_det;

        Self::from_cols(inv)
    }

    /// Access element at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.m[row + col * 4]
    }

    /// Set element at (row, col).
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.m[row + col * 4] = value;
    }

    /// Extracts the translation component.
    pub fn translation_part(&self) -> Vec3 {
        Vec3::new(self.m[12], self.m[13], self.m[14])
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// For column-major convention, `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut out = [0.0f64; 16];
        for col in 0..4 {
            for row in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.m[row + k * 4] * rhs.m[k + col * 4];
                }
                out[row + col * 4] = sum;
            }
        }
        Mat4::from_cols(out)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let m = &self.m;
        Vec4::new(
            m[0] * v.x + m[4] * v.y + m[8] * v.z + m[12] * v.w,
            m[1] * v.x + m[5] * v.y + m[9] * v.z + m[13] * v.w,
            m[2] * v.x + m[6] * v.y + m[10] * v.z + m[14] * v.w,
            m[3] * v.x + m[7] * v.y + m[11] * v.z + m[15] * v.w,
        )
    }
}
