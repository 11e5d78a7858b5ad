// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Float vectors and the 4x4 matrix.
//!
//! Every component is a little-endian binary32, in component order. The
//! matrix is sent row by row (`m11 m12 m13 m14 m21 ... m44`).

use crate::cursor::Cursor;
use crate::decode::{Decode, HandlerSource};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

/// Row-major 4x4 matrix; `rows[r][c]` is element `m{r+1}{c+1}`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Matrix4x4 {
    pub rows: [[f32; 4]; 4],
}

impl Matrix4x4 {
    pub const IDENTITY: Self = Self {
        rows: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Element at zero-based `row`, `col`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not below 4.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.rows[row][col]
    }

    /// Zero-based `row` as a vector.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not below 4.
    pub fn row(&self, row: usize) -> Vector4 {
        let [x, y, z, w] = self.rows[row];
        Vector4 { x, y, z, w }
    }
}

impl Cursor<'_> {
    pub fn read_vector2(&mut self) -> Result<Vector2> {
        Ok(Vector2 {
            x: self.read_f32()?,
            y: self.read_f32()?,
        })
    }

    pub fn read_vector3(&mut self) -> Result<Vector3> {
        Ok(Vector3 {
            x: self.read_f32()?,
            y: self.read_f32()?,
            z: self.read_f32()?,
        })
    }

    pub fn read_vector4(&mut self) -> Result<Vector4> {
        Ok(Vector4 {
            x: self.read_f32()?,
            y: self.read_f32()?,
            z: self.read_f32()?,
            w: self.read_f32()?,
        })
    }

    pub fn read_matrix4x4(&mut self) -> Result<Matrix4x4> {
        let mut rows = [[0f32; 4]; 4];
        for row in &mut rows {
            for cell in row.iter_mut() {
                *cell = self.read_f32()?;
            }
        }
        Ok(Matrix4x4 { rows })
    }
}

/// Generate built-in `Decode` impls for fixed-size domain values.
macro_rules! impl_decode_value {
    ($type:ty, $read:ident, $size:expr) => {
        impl Decode for $type {
            const SOURCE: HandlerSource = HandlerSource::Builtin;
            const MIN_WIRE_SIZE: usize = $size;

            fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
                cursor.$read()
            }
        }
    };
}

impl_decode_value!(Vector2, read_vector2, 8);
impl_decode_value!(Vector3, read_vector3, 12);
impl_decode_value!(Vector4, read_vector4, 16);
impl_decode_value!(Matrix4x4, read_matrix4x4, 64);
