//! Whole-mesh deformation and reset.

use crate::audio::BandLevels;
use crate::noise::NoiseField;
use crate::params::VisualParameters;

use super::{DisplacementField, Mesh};

/// Displace every vertex of `mesh`, then recompute normals once.
///
/// `bands` must be finite (both bands non-empty); the caller checks this.
pub fn deform<M: Mesh + ?Sized, N: NoiseField>(
    mesh: &mut M,
    field: &DisplacementField<N>,
    time_s: f32,
    params: &VisualParameters,
    bands: &BandLevels,
) {
    for i in 0..mesh.vertex_count() {
        let p = field.displace(mesh.position(i), time_s, params, bands);
        mesh.set_position(i, p);
    }

    mesh.mark_positions_dirty();
    mesh.recompute_normals();
}

/// Restore the canonical sphere shape
pub fn reset<M: Mesh + ?Sized>(mesh: &mut M) {
    for i in 0..mesh.vertex_count() {
        let p = mesh.canonical_positions()[i];
        mesh.set_position(i, p);
    }

    mesh.mark_positions_dirty();
    mesh.recompute_normals();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::classify;
    use crate::noise::SimplexNoise;
    use crate::params::SphereGeometry;
    use crate::sphere::SphereMesh;
    use glam::Vec3;

    /// Mesh double that records normal recomputations
    struct CountingMesh {
        positions: Vec<Vec3>,
        canonical: Vec<Vec3>,
        normal_passes: usize,
        dirty_marks: usize,
    }

    impl CountingMesh {
        fn new(canonical: Vec<Vec3>) -> Self {
            Self {
                positions: canonical.clone(),
                canonical,
                normal_passes: 0,
                dirty_marks: 0,
            }
        }
    }

    impl Mesh for CountingMesh {
        fn vertex_count(&self) -> usize {
            self.positions.len()
        }
        fn position(&self, index: usize) -> Vec3 {
            self.positions[index]
        }
        fn set_position(&mut self, index: usize, position: Vec3) {
            self.positions[index] = position;
        }
        fn canonical_positions(&self) -> &[Vec3] {
            &self.canonical
        }
        fn mark_positions_dirty(&mut self) {
            self.dirty_marks += 1;
        }
        fn recompute_normals(&mut self) {
            self.normal_passes += 1;
        }
    }

    fn loud_bands() -> BandLevels {
        classify(&(0..64).map(|i| (i * 7 % 255) as f32).collect::<Vec<_>>())
    }

    #[test]
    fn test_deform_recomputes_normals_once_per_batch() {
        let geometry = SphereGeometry::default();
        let field = DisplacementField::new(SimplexNoise::new(1), &geometry);
        let mut mesh = CountingMesh::new(vec![Vec3::X * 20.0, Vec3::Y * 20.0, Vec3::Z * 20.0]);

        deform(&mut mesh, &field, 0.3, &VisualParameters::default(), &loud_bands());

        assert_eq!(mesh.normal_passes, 1);
        assert_eq!(mesh.dirty_marks, 1);
        assert!(mesh.positions.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_deform_keeps_vertex_directions() {
        let geometry = SphereGeometry::default();
        let field = DisplacementField::new(SimplexNoise::new(1), &geometry);
        let mut mesh = SphereMesh::new(&geometry);
        let params = VisualParameters {
            spike_length: 2.0,
            ..VisualParameters::default()
        };

        deform(&mut mesh, &field, 1.0, &params, &loud_bands());

        for (i, canonical) in mesh.canonical_positions().iter().enumerate() {
            let p = mesh.position(i);
            // Spikes of at most 2 * high_boost never flip the direction
            assert!(p.normalize().dot(canonical.normalize()) > 0.999);
        }
    }

    #[test]
    fn test_reset_restores_canonical_and_is_idempotent() {
        let geometry = SphereGeometry::default();
        let field = DisplacementField::new(SimplexNoise::new(9), &geometry);
        let mut mesh = SphereMesh::new(&geometry);

        deform(&mut mesh, &field, 2.0, &VisualParameters::default(), &loud_bands());
        assert!((0..mesh.vertex_count()).any(|i| mesh.position(i) != mesh.canonical_positions()[i]));

        reset(&mut mesh);
        let once: Vec<_> = mesh.vertices.clone();
        reset(&mut mesh);

        assert_eq!(mesh.vertices, once);
        for i in 0..mesh.vertex_count() {
            assert_eq!(mesh.position(i), mesh.canonical_positions()[i]);
        }
    }

    #[test]
    fn test_reset_matches_fresh_mesh() {
        let geometry = SphereGeometry::default();
        let fresh = SphereMesh::new(&geometry);
        let field = DisplacementField::new(SimplexNoise::new(4), &geometry);
        let mut mesh = SphereMesh::new(&geometry);

        deform(&mut mesh, &field, 0.5, &VisualParameters::default(), &loud_bands());
        reset(&mut mesh);

        assert_eq!(mesh.vertices, fresh.vertices);
    }
}
