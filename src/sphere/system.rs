//! Per-frame sphere update: rotation, then deform or reset.

use log::trace;
use std::f32::consts::TAU;

use super::{deform, reset, DisplacementField, SphereMesh};
use crate::audio::{SpectrumSnapshot, SpectrumSource};
use crate::noise::{NoiseField, SimplexNoise};
use crate::params::{SphereGeometry, VisualParameters};

/// Which branches ran during a frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    /// Mesh was displaced from the live spectrum
    pub deformed: bool,
    /// Mesh was restored to the canonical sphere
    pub reset: bool,
}

/// Sphere mesh with rotation and audio-reactive deformation
pub struct SphereSystem<N = SimplexNoise> {
    pub mesh: SphereMesh,
    pub geometry: SphereGeometry,
    field: DisplacementField<N>,
    /// Accumulated rotation about Y, kept in [0, 2π)
    rotation_y: f32,
}

impl<N: NoiseField> SphereSystem<N> {
    pub fn new(geometry: SphereGeometry, noise: N) -> Self {
        let mesh = SphereMesh::new(&geometry);
        let field = DisplacementField::new(noise, &geometry);
        Self {
            mesh,
            geometry,
            field,
            rotation_y: 0.0,
        }
    }

    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    /// Advance one frame.
    ///
    /// With a source whose average is non-zero the mesh is deformed; when
    /// playback is paused (or there is no source) the mesh is reset. A source
    /// that is playing but silent leaves the mesh untouched.
    pub fn update(
        &mut self,
        time_s: f32,
        params: &VisualParameters,
        source: Option<&mut dyn SpectrumSource>,
    ) -> FrameOutcome {
        self.rotation_y =
            (self.rotation_y + params.speed * self.geometry.rotation_step).rem_euclid(TAU);

        let mut outcome = FrameOutcome::default();

        let playing = match source {
            Some(source) => {
                let snapshot = SpectrumSnapshot::capture(source);
                if snapshot.average_frequency() != 0.0 {
                    let bands = snapshot.classify();
                    if bands.is_finite() {
                        deform(&mut self.mesh, &self.field, time_s, params, &bands);
                        outcome.deformed = true;
                    } else {
                        trace!("Spectrum of {} bins too short to split", snapshot.bins.len());
                    }
                }
                source.is_playing()
            }
            None => false,
        };

        if !playing {
            reset(&mut self.mesh);
            outcome.reset = true;
        }

        trace!("Frame t={:.3}s {:?}", time_s, outcome);
        outcome
    }
}
