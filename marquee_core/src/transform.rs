// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal column-major 4×4 transform.
//!
//! This covers what the carousel needs (card placement, the camera's view and
//! projection, and handing matrices to the GPU) without pulling in a full
//! linear-algebra crate.

use std::ops::Mul;

/// A column-major 4×4 transform stored as `[[f64; 4]; 4]`.
///
/// Each inner array is one *column* of the matrix, matching the memory layout
/// WGSL expects for `mat4x4<f32>` uniforms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform3d {
    /// Four columns, each a 4-element array `[x, y, z, w]`.
    pub cols: [[f64; 4]; 4],
}

impl Transform3d {
    /// The 4×4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Creates a pure translation transform.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    /// Creates a non-uniform scale transform.
    #[inline]
    #[must_use]
    pub const fn from_scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            cols: [
                [sx, 0.0, 0.0, 0.0],
                [0.0, sy, 0.0, 0.0],
                [0.0, 0.0, sz, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Creates a rotation around the Z axis (radians).
    #[inline]
    #[must_use]
    pub fn from_rotation_z(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self {
            cols: [
                [c, s, 0.0, 0.0],
                [-s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Right-handed perspective projection mapping view-space depth
    /// `[-near, -far]` to clip-space `z ∈ [0, 1]` (the wgpu convention).
    #[must_use]
    pub fn perspective(fov_y: f64, aspect: f64, near: f64, far: f64) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        let range = near - far;
        Self {
            cols: [
                [f / aspect, 0.0, 0.0, 0.0],
                [0.0, f, 0.0, 0.0],
                [0.0, 0.0, far / range, -1.0],
                [0.0, 0.0, near * far / range, 0.0],
            ],
        }
    }

    /// Returns the translation component.
    #[inline]
    #[must_use]
    pub const fn translation(self) -> [f64; 3] {
        [self.cols[3][0], self.cols[3][1], self.cols[3][2]]
    }

    /// Transforms a point, returning homogeneous `[x, y, z, w]`.
    #[must_use]
    pub fn transform_point(self, p: [f64; 3]) -> [f64; 4] {
        let c = &self.cols;
        let mut out = [0.0; 4];
        for (i, o) in out.iter_mut().enumerate() {
            *o = c[0][i] * p[0] + c[1][i] * p[1] + c[2][i] * p[2] + c[3][i];
        }
        out
    }

    /// Converts to a column-major `f32` array suitable for a uniform buffer.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "GPU uniforms are f32; scene coordinates are small"
    )]
    pub fn to_cols_f32(self) -> [[f32; 4]; 4] {
        self.cols.map(|col| col.map(|v| v as f32))
    }

    /// Is this transform [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.cols.iter().flatten().all(|v| v.is_finite())
    }
}

impl Default for Transform3d {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform3d {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let a = &self.cols;
        let b = &rhs.cols;
        let mut out = [[0.0_f64; 4]; 4];
        let mut j = 0;
        while j < 4 {
            let mut i = 0;
            while i < 4 {
                out[j][i] =
                    a[0][i] * b[j][0] + a[1][i] * b[j][1] + a[2][i] * b[j][2] + a[3][i] * b[j][3];
                i += 1;
            }
            j += 1;
        }
        Self { cols: out }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_identity() {
        assert_eq!(Transform3d::default(), Transform3d::IDENTITY);
    }

    #[test]
    fn identity_multiply() {
        let t = Transform3d::from_translation(1.0, 2.0, 3.0);
        assert_eq!(Transform3d::IDENTITY * t, t);
        assert_eq!(t * Transform3d::IDENTITY, t);
    }

    #[test]
    fn translation_composition() {
        let a = Transform3d::from_translation(1.0, 0.0, 0.0);
        let b = Transform3d::from_translation(0.0, 2.0, 0.0);
        assert_eq!((a * b).translation(), [1.0, 2.0, 0.0]);
    }

    #[test]
    fn card_placement_order() {
        // Translate · Rotate · Scale: the unit quad corner (0.5, 0.5) lands
        // at the scaled, rotated, then translated position.
        let m = Transform3d::from_translation(10.0, 1.0, 0.0)
            * Transform3d::from_rotation_z(std::f64::consts::FRAC_PI_2)
            * Transform3d::from_scale(4.0, 6.0, 1.0);
        let p = m.transform_point([0.5, 0.5, 0.0]);
        let eps = 1e-9;
        assert!((p[0] - 7.0).abs() < eps, "x = 10 - 3, got {}", p[0]);
        assert!((p[1] - 3.0).abs() < eps, "y = 1 + 2, got {}", p[1]);
        assert!((p[3] - 1.0).abs() < eps, "affine w");
    }

    #[test]
    fn rotation_z_ninety_degrees() {
        let r = Transform3d::from_rotation_z(std::f64::consts::FRAC_PI_2);
        let eps = 1e-6;
        assert!((r.cols[0][0] - 0.0).abs() < eps);
        assert!((r.cols[0][1] - 1.0).abs() < eps);
        assert!((r.cols[1][0] + 1.0).abs() < eps);
        assert!((r.cols[1][1] - 0.0).abs() < eps);
    }

    #[test]
    fn perspective_maps_near_and_far_to_unit_depth() {
        let p = Transform3d::perspective(45_f64.to_radians(), 1.5, 0.1, 100.0);
        let near = p.transform_point([0.0, 0.0, -0.1]);
        let far = p.transform_point([0.0, 0.0, -100.0]);
        let eps = 1e-9;
        assert!((near[2] / near[3]).abs() < eps, "near plane maps to z=0");
        assert!((far[2] / far[3] - 1.0).abs() < eps, "far plane maps to z=1");
    }

    #[test]
    fn f32_conversion_keeps_layout() {
        let t = Transform3d::from_translation(5.0, 6.0, 7.0);
        let cols = t.to_cols_f32();
        assert_eq!(cols[3], [5.0, 6.0, 7.0, 1.0]);
        assert_eq!(cols[0], [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn nan_detected() {
        let mut t = Transform3d::IDENTITY;
        assert!(t.is_finite());
        t.cols[2][1] = f64::NAN;
        assert!(!t.is_finite());
    }
}
