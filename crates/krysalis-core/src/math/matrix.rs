// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A column-major 4x4 matrix for entity transforms.

use super::vector::{Vec3, Vec4};
use super::EPSILON;
use std::ops::Mul;

/// A 4x4 column-major matrix, used for 3D affine transformations.
///
/// Vectors are treated as columns, so `a * b` applies `b` first. A transform built as
/// `T * R * S` scales object-local geometry, then rotates it, then translates it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat4 {
    /// The columns of the matrix. `cols[0]` is the first column, and so on.
    pub cols: [Vec4; 4],
}

impl Mat4 {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [Vec4::X, Vec4::Y, Vec4::Z, Vec4::W],
    };

    /// Creates a new matrix from four column vectors.
    #[inline]
    pub fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            cols: [c0, c1, c2, c3],
        }
    }

    /// Returns a row of the matrix as a `Vec4`.
    #[inline]
    pub fn get_row(&self, index: usize) -> Vec4 {
        Vec4 {
            x: self.cols[0].get(index),
            y: self.cols[1].get(index),
            z: self.cols[2].get(index),
            w: self.cols[3].get(index),
        }
    }

    /// Creates a translation matrix.
    #[inline]
    pub fn from_translation(v: Vec3) -> Self {
        Self::from_cols(Vec4::X, Vec4::Y, Vec4::Z, v.extend(1.0))
    }

    /// Creates a non-uniform scaling matrix.
    #[inline]
    pub fn from_scale(scale: Vec3) -> Self {
        Self::from_cols(
            Vec4::new(scale.x, 0.0, 0.0, 0.0),
            Vec4::new(0.0, scale.y, 0.0, 0.0),
            Vec4::new(0.0, 0.0, scale.z, 0.0),
            Vec4::W,
        )
    }

    /// Creates a right-handed rotation of `angle` radians around `axis`.
    ///
    /// The axis is normalized first. A degenerate (zero-length) axis yields the identity.
    #[inline]
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let [c0, c1, c2] = rotation_columns(axis, angle);
        Self::from_cols(c0.extend(0.0), c1.extend(0.0), c2.extend(0.0), Vec4::W)
    }

    /// Builds `T * R * S` in a single pass, without intermediate matrix products.
    pub fn from_scale_axis_angle_translation(
        scale: Vec3,
        axis: Vec3,
        angle: f32,
        translation: Vec3,
    ) -> Self {
        let [c0, c1, c2] = rotation_columns(axis, angle);
        Self::from_cols(
            (c0 * scale.x).extend(0.0),
            (c1 * scale.y).extend(0.0),
            (c2 * scale.z).extend(0.0),
            translation.extend(1.0),
        )
    }

    /// Transforms a point (w = 1).
    #[inline]
    pub fn transform_point3(&self, p: Vec3) -> Vec3 {
        (*self * p.extend(1.0)).truncate()
    }

    /// Compares two matrices element-wise within `epsilon`.
    pub fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.cols.iter().zip(other.cols.iter()).all(|(a, b)| {
            (0..4).all(|i| (a.get(i) - b.get(i)).abs() <= epsilon)
        })
    }
}

/// Rodrigues' rotation formula, returned as the three columns of a 3x3 matrix.
fn rotation_columns(axis: Vec3, angle: f32) -> [Vec3; 3] {
    if axis.length_squared() <= EPSILON * EPSILON {
        return [Vec3::X, Vec3::Y, Vec3::Z];
    }
    let Vec3 { x, y, z } = axis.normalize();
    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;

    [
        Vec3::new(t * x * x + c, t * x * y + s * z, t * x * z - s * y),
        Vec3::new(t * x * y - s * z, t * y * y + c, t * y * z + s * x),
        Vec3::new(t * x * z + s * y, t * y * z - s * x, t * z * z + c),
    ]
}

impl Default for Mat4 {
    /// Returns the 4x4 identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Mat4> for Mat4 {
    type Output = Self;
    /// Multiplies this matrix by another `Mat4`. Matrix multiplication is not commutative.
    #[inline]
    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut cols = [Vec4::ZERO; 4];
        for (col, rhs_col) in cols.iter_mut().zip(rhs.cols.iter()) {
            *col = Vec4 {
                x: self.get_row(0).dot(*rhs_col),
                y: self.get_row(1).dot(*rhs_col),
                z: self.get_row(2).dot(*rhs_col),
                w: self.get_row(3).dot(*rhs_col),
            };
        }
        Mat4 { cols }
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    /// Transforms a `Vec4` by this matrix.
    #[inline]
    fn mul(self, rhs: Vec4) -> Self::Output {
        self.cols[0] * rhs.x + self.cols[1] * rhs.y + self.cols[2] * rhs.z + self.cols[3] * rhs.w
    }
}
