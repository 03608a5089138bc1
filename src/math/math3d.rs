/// 3D math for the raymarcher.
///
/// Vector and matrix operations over `Vec3D`/`Matrix3` plus the quaternion
/// type driving the Julia iteration. All arithmetic is f64.

use crate::engine::types::{Matrix3, Vec3D};

// ─── Vector operations ───────────────────────────────────────

#[inline(always)]
pub fn vec3d_add(a: &Vec3D, b: &Vec3D) -> Vec3D {
    Vec3D {
        x: a.x + b.x,
        y: a.y + b.y,
        z: a.z + b.z,
    }
}

#[inline(always)]
pub fn vec3d_sub(a: &Vec3D, b: &Vec3D) -> Vec3D {
    Vec3D {
        x: a.x - b.x,
        y: a.y - b.y,
        z: a.z - b.z,
    }
}

#[inline(always)]
pub fn vec3d_scale(v: &Vec3D, s: f64) -> Vec3D {
    Vec3D {
        x: v.x * s,
        y: v.y * s,
        z: v.z * s,
    }
}

#[inline(always)]
pub fn vec3d_dot(a: &Vec3D, b: &Vec3D) -> f64 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

#[inline(always)]
pub fn vec3d_cross(a: &Vec3D, b: &Vec3D) -> Vec3D {
    Vec3D {
        x: a.y * b.z - a.z * b.y,
        y: a.z * b.x - a.x * b.z,
        z: a.x * b.y - a.y * b.x,
    }
}

#[inline(always)]
pub fn vec3d_length(v: &Vec3D) -> f64 {
    (v.x * v.x + v.y * v.y + v.z * v.z).sqrt()
}

#[inline(always)]
pub fn vec3d_length_sqr(v: &Vec3D) -> f64 {
    v.x * v.x + v.y * v.y + v.z * v.z
}

#[inline(always)]
pub fn vec3d_normalize(v: &mut Vec3D) {
    let len = vec3d_length(v);
    if len > 1e-30 {
        let inv = 1.0 / len;
        v.x *= inv;
        v.y *= inv;
        v.z *= inv;
    }
}

#[inline(always)]
pub fn vec3d_normalized(v: &Vec3D) -> Vec3D {
    let mut result = *v;
    vec3d_normalize(&mut result);
    result
}

/// Mirror `v` across the plane with unit normal `n`.
#[inline(always)]
pub fn vec3d_reflect(v: &Vec3D, n: &Vec3D) -> Vec3D {
    let d = 2.0 * vec3d_dot(v, n);
    Vec3D {
        x: v.x - d * n.x,
        y: v.y - d * n.y,
        z: v.z - d * n.z,
    }
}

// ─── Matrix operations ───────────────────────────────────────

/// Multiply matrix × vector: result = M * v
#[inline]
pub fn mat3_mul_vec(m: &Matrix3, v: &Vec3D) -> Vec3D {
    Vec3D {
        x: m.m[0][0] * v.x + m.m[0][1] * v.y + m.m[0][2] * v.z,
        y: m.m[1][0] * v.x + m.m[1][1] * v.y + m.m[1][2] * v.z,
        z: m.m[2][0] * v.x + m.m[2][1] * v.y + m.m[2][2] * v.z,
    }
}

/// Multiply two 3×3 matrices: result = A * B
pub fn mat3_mul(a: &Matrix3, b: &Matrix3) -> Matrix3 {
    let mut result = Matrix3::default();
    for i in 0..3 {
        for j in 0..3 {
            result.m[i][j] = a.m[i][0] * b.m[0][j]
                           + a.m[i][1] * b.m[1][j]
                           + a.m[i][2] * b.m[2][j];
        }
    }
    result
}

/// Build identity matrix
pub fn mat3_identity() -> Matrix3 {
    Matrix3 {
        m: [
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ],
    }
}

/// Rotation about the X axis.
pub fn mat3_rotation_x(angle: f64) -> Matrix3 {
    let (s, c) = angle.sin_cos();
    Matrix3 {
        m: [
            [1.0, 0.0, 0.0],
            [0.0, c, -s],
            [0.0, s, c],
        ],
    }
}

/// Rotation about the Y axis.
pub fn mat3_rotation_y(angle: f64) -> Matrix3 {
    let (s, c) = angle.sin_cos();
    Matrix3 {
        m: [
            [c, 0.0, s],
            [0.0, 1.0, 0.0],
            [-s, 0.0, c],
        ],
    }
}

/// Rotation about the Z axis.
pub fn mat3_rotation_z(angle: f64) -> Matrix3 {
    let (s, c) = angle.sin_cos();
    Matrix3 {
        m: [
            [c, -s, 0.0],
            [s, c, 0.0],
            [0.0, 0.0, 1.0],
        ],
    }
}

/// Combined camera rotation: Rz * Ry * Rx.
///
/// The axis order is fixed; the orbit controls accumulate angles
/// independently but are always applied X, then Y, then Z.
pub fn mat3_rotate_xyz(rx: f64, ry: f64, rz: f64) -> Matrix3 {
    let m = mat3_mul(&mat3_rotation_y(ry), &mat3_rotation_x(rx));
    mat3_mul(&mat3_rotation_z(rz), &m)
}

// ─── Quaternion operations ───────────────────────────────────

/// Quaternion in vec4 layout: real part in `x`, imaginary parts in
/// `y`, `z`, `w`. A 3D point lifts to `(p.x, p.y, p.z, 0)`.
#[repr(C)]
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct Quat {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quat {
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Quat { x, y, z, w }
    }

    /// Lift a 3D point into quaternion space with zero fourth component.
    #[inline]
    pub fn from_point(p: &Vec3D) -> Self {
        Quat { x: p.x, y: p.y, z: p.z, w: 0.0 }
    }

    /// Quaternion square: (x² − y² − z² − w², 2xy, 2xz, 2xw).
    #[inline]
    pub fn sqr(&self) -> Quat {
        Quat {
            x: self.x * self.x - self.y * self.y - self.z * self.z - self.w * self.w,
            y: 2.0 * self.x * self.y,
            z: 2.0 * self.x * self.z,
            w: 2.0 * self.x * self.w,
        }
    }

    /// Hamilton product self * other.
    #[inline]
    pub fn mul(&self, other: &Quat) -> Quat {
        Quat {
            x: self.x * other.x - self.y * other.y - self.z * other.z - self.w * other.w,
            y: self.y * other.x + self.x * other.y + self.z * other.w - self.w * other.z,
            z: self.z * other.x + self.x * other.z + self.w * other.y - self.y * other.w,
            w: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
        }
    }

    /// Conjugate: negate the imaginary parts.
    #[inline]
    pub fn conj(&self) -> Quat {
        Quat { x: self.x, y: -self.y, z: -self.z, w: -self.w }
    }

    #[inline]
    pub fn length_sqr(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Componentwise dot product (vec4 dot, not the Hamilton product).
    #[inline]
    pub fn dot(&self, other: &Quat) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }
}

impl std::ops::Add for Quat {
    type Output = Quat;

    fn add(self, other: Quat) -> Quat {
        Quat {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
            w: self.w + other.w,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3d_normalize() {
        let mut v = Vec3D { x: 3.0, y: 0.0, z: 4.0 };
        vec3d_normalize(&mut v);
        assert!((v.x - 0.6).abs() < 1e-10);
        assert!((v.y - 0.0).abs() < 1e-10);
        assert!((v.z - 0.8).abs() < 1e-10);
    }

    #[test]
    fn test_vec3d_cross() {
        let a = Vec3D { x: 1.0, y: 0.0, z: 0.0 };
        let b = Vec3D { x: 0.0, y: 1.0, z: 0.0 };
        let c = vec3d_cross(&a, &b);
        assert!((c.x - 0.0).abs() < 1e-10);
        assert!((c.y - 0.0).abs() < 1e-10);
        assert!((c.z - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_vec3d_reflect() {
        let v = Vec3D { x: 1.0, y: -1.0, z: 0.0 };
        let n = Vec3D { x: 0.0, y: 1.0, z: 0.0 };
        let r = vec3d_reflect(&v, &n);
        assert!((r.x - 1.0).abs() < 1e-10);
        assert!((r.y - 1.0).abs() < 1e-10);
        assert!((r.z - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_rotate_xyz_zero_is_identity() {
        let m = mat3_rotate_xyz(0.0, 0.0, 0.0);
        let i = mat3_identity();
        for r in 0..3 {
            for c in 0..3 {
                assert!((m.m[r][c] - i.m[r][c]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_rotate_xyz_order_is_fixed() {
        // Rz*Ry*Rx must match successive application X, then Y, then Z.
        let (rx, ry, rz) = (0.3, 0.5, 0.7);
        let p = Vec3D { x: 1.0, y: 2.0, z: 3.0 };
        let combined = mat3_mul_vec(&mat3_rotate_xyz(rx, ry, rz), &p);
        let step = mat3_mul_vec(&mat3_rotation_x(rx), &p);
        let step = mat3_mul_vec(&mat3_rotation_y(ry), &step);
        let step = mat3_mul_vec(&mat3_rotation_z(rz), &step);
        assert!((combined.x - step.x).abs() < 1e-12);
        assert!((combined.y - step.y).abs() < 1e-12);
        assert!((combined.z - step.z).abs() < 1e-12);

        // The reverse order lands somewhere else entirely.
        let m = mat3_mul(
            &mat3_rotation_x(rx),
            &mat3_mul(&mat3_rotation_y(ry), &mat3_rotation_z(rz)),
        );
        let reversed = mat3_mul_vec(&m, &p);
        let diff = (combined.x - reversed.x).abs()
            + (combined.y - reversed.y).abs()
            + (combined.z - reversed.z).abs();
        assert!(diff > 1e-3);
    }

    #[test]
    fn test_rotation_preserves_length() {
        let p = Vec3D { x: 0.0, y: 0.0, z: 3.0 };
        let r = mat3_mul_vec(&mat3_rotate_xyz(0.4, -1.1, 2.2), &p);
        assert!((vec3d_length(&r) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_quat_sqr_matches_self_mul() {
        let q = Quat::new(0.3, -0.7, 0.2, 0.9);
        let s = q.sqr();
        let m = q.mul(&q);
        assert!((s.x - m.x).abs() < 1e-12);
        assert!((s.y - m.y).abs() < 1e-12);
        assert!((s.z - m.z).abs() < 1e-12);
        assert!((s.w - m.w).abs() < 1e-12);
    }

    #[test]
    fn test_quat_conj_norm() {
        let q = Quat::new(0.5, 1.5, -2.0, 0.25);
        let qc = q.conj();
        assert!((q.length_sqr() - qc.length_sqr()).abs() < 1e-12);
        // q * conj(q) is real with magnitude |q|².
        let prod = q.mul(&qc);
        assert!((prod.x - q.length_sqr()).abs() < 1e-12);
        assert!(prod.y.abs() < 1e-12);
        assert!(prod.z.abs() < 1e-12);
        assert!(prod.w.abs() < 1e-12);
    }

    #[test]
    fn test_quat_from_point() {
        let p = Vec3D { x: 1.0, y: 2.0, z: 3.0 };
        let q = Quat::from_point(&p);
        assert_eq!(q, Quat::new(1.0, 2.0, 3.0, 0.0));
        assert!((q.length_sqr() - 14.0).abs() < 1e-12);
    }
}
