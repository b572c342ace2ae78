//! UV-sphere mesh with immutable canonical positions.

use glam::Vec3;
use std::f32::consts::PI;
use std::sync::Arc;

use super::{Mesh, Vertex};
use crate::params::SphereGeometry;

/// Triangulated UV sphere
pub struct SphereMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    /// Positions at creation time, shared and never mutated
    canonical: Arc<[Vec3]>,
    dirty: bool,
}

impl SphereMesh {
    /// Build a sphere (rows run from +Y pole to -Y pole, columns wrap around Y)
    pub fn new(geometry: &SphereGeometry) -> Self {
        let width = geometry.width_segments.max(3);
        let height = geometry.height_segments.max(2);
        let radius = geometry.radius;

        let mut positions = Vec::with_capacity(geometry.vertex_count());
        let mut grid = Vec::with_capacity(height as usize + 1);
        let mut next_index = 0u32;

        for iy in 0..=height {
            let v = iy as f32 / height as f32;
            let theta = v * PI;
            let mut row = Vec::with_capacity(width as usize + 1);

            for ix in 0..=width {
                let u = ix as f32 / width as f32;
                let phi = u * 2.0 * PI;

                positions.push(Vec3::new(
                    -radius * phi.cos() * theta.sin(),
                    radius * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                ));
                row.push(next_index);
                next_index += 1;
            }
            grid.push(row);
        }

        // Pole rows collapse to a point, so their fan needs one triangle per quad
        let mut indices = Vec::with_capacity((width * height * 6) as usize);
        for iy in 0..height as usize {
            for ix in 0..width as usize {
                let a = grid[iy][ix + 1];
                let b = grid[iy][ix];
                let c = grid[iy + 1][ix];
                let d = grid[iy + 1][ix + 1];

                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height as usize - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        let vertices = positions
            .iter()
            .map(|p| Vertex {
                position: p.to_array(),
                normal: p.normalize_or_zero().to_array(),
            })
            .collect();

        let mut mesh = Self {
            vertices,
            indices,
            canonical: positions.into(),
            dirty: true,
        };
        mesh.recompute_normals();
        mesh
    }

    /// Consume the dirty flag (true if positions changed since last call)
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    #[cfg(test)]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl Mesh for SphereMesh {
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn position(&self, index: usize) -> Vec3 {
        Vec3::from_array(self.vertices[index].position)
    }

    fn set_position(&mut self, index: usize, position: Vec3) {
        self.vertices[index].position = position.to_array();
    }

    fn canonical_positions(&self) -> &[Vec3] {
        &self.canonical
    }

    fn mark_positions_dirty(&mut self) {
        self.dirty = true;
    }

    /// Area-weighted vertex normals: face cross products summed per vertex
    fn recompute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];

        for tri in self.indices.chunks_exact(3) {
            let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let a = Vec3::from_array(self.vertices[ia].position);
            let b = Vec3::from_array(self.vertices[ib].position);
            let c = Vec3::from_array(self.vertices[ic].position);

            let face = (c - b).cross(a - b);
            normals[ia] += face;
            normals[ib] += face;
            normals[ic] += face;
        }

        // Seam corners at the poles belong to no triangle; point them along the radius
        for (vertex, normal) in self.vertices.iter_mut().zip(normals) {
            let normal = if normal == Vec3::ZERO {
                Vec3::from_array(vertex.position)
            } else {
                normal
            };
            vertex.normal = normal.normalize_or_zero().to_array();
        }
    }
}
