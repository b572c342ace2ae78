//! Audio-reactive sphere: mesh, displacement field and per-frame update.

mod deform;
mod displacement;
mod mesh;
mod system;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

pub use deform::{deform, reset};
pub use displacement::DisplacementField;
pub use mesh::SphereMesh;
pub use system::{FrameOutcome, SphereSystem};

/// Vertex data for the sphere mesh (position + normal)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Mesh whose vertex positions can be rewritten in place.
///
/// Vertex count and topology are fixed; only positions and the normals
/// derived from them change.
pub trait Mesh {
    fn vertex_count(&self) -> usize;

    fn position(&self, index: usize) -> Vec3;

    fn set_position(&mut self, index: usize, position: Vec3);

    /// Undeformed positions, same length and order as the live ones
    fn canonical_positions(&self) -> &[Vec3];

    /// Flag the position buffer for upload
    fn mark_positions_dirty(&mut self);

    fn recompute_normals(&mut self);
}
