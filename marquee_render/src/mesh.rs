// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The subdivided unit plane every card is drawn with.

use bytemuck::{Pod, Zeroable};

/// Columns of quads across the plane.
pub const WIDTH_SEGMENTS: u32 = 100;

/// Rows of quads down the plane.
pub const HEIGHT_SEGMENTS: u32 = 50;

/// One plane vertex.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CardVertex {
    /// Position on the unit plane centered at the origin, `z = 0`.
    pub position: [f32; 3],
    /// Texture coordinate, origin top-left.
    pub uv: [f32; 2],
}

/// Vertices and triangle indices of a plane.
#[derive(Clone, Debug, Default)]
pub struct PlaneMesh {
    /// Vertex data.
    pub vertices: Vec<CardVertex>,
    /// Triangle list indices.
    pub indices: Vec<u32>,
}

impl PlaneMesh {
    /// Builds a `1 × 1` plane split into `columns × rows` quads.
    ///
    /// The ripple displaces vertices along Z, so the plane needs enough
    /// vertices to bend smoothly.
    #[must_use]
    pub fn unit(columns: u32, rows: u32) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        let stride = columns + 1;

        let mut vertices = Vec::with_capacity(((columns + 1) * (rows + 1)) as usize);
        for row in 0..=rows {
            let v = row as f32 / rows as f32;
            for col in 0..=columns {
                let u = col as f32 / columns as f32;
                vertices.push(CardVertex {
                    position: [u - 0.5, 0.5 - v, 0.0],
                    uv: [u, v],
                });
            }
        }

        let mut indices = Vec::with_capacity((columns * rows * 6) as usize);
        for row in 0..rows {
            for col in 0..columns {
                let a = row * stride + col;
                let b = a + 1;
                let c = a + stride;
                let d = c + 1;
                // Counter-clockwise seen from +Z.
                indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }
        Self { vertices, indices }
    }

    /// Number of indices, as a draw range bound.
    #[must_use]
    pub fn index_count(&self) -> u32 {
        u32::try_from(self.indices.len()).unwrap_or(u32::MAX)
    }
}
