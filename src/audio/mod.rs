//! Audio file playback and spectrum analysis.
//!
//! Plays a decoded WAV file through cpal and exposes the live spectrum
//! as byte-scaled frequency bins for the deformation pipeline.

mod analyser;
mod bands;
mod decode;
mod system;

// Re-export public types
pub use analyser::{average_of, SpectrumAnalyser};
pub use bands::{band_ranges, classify, BandLevels};
pub use decode::DecodedTrack;
pub use system::{AudioSystem, Playback};

/// Live spectrum and playback state read once per frame
pub trait SpectrumSource {
    /// Fresh frequency-bin magnitudes (fixed length per source)
    fn frequency_bins(&mut self) -> Vec<f32>;

    /// Mean bin magnitude of a fresh snapshot.
    ///
    /// This consumes a read of `frequency_bins`, so a live analyser advances
    /// its smoothing. The frame loop reads once through `SpectrumSnapshot`
    /// and never mixes the two calls within a frame.
    fn average_frequency(&mut self) -> f32 {
        average_of(&self.frequency_bins())
    }

    /// True while audio is playing (false when paused, ended or unloaded)
    fn is_playing(&self) -> bool;
}

/// One frame's frequency bins
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpectrumSnapshot {
    pub bins: Vec<f32>,
}

impl SpectrumSnapshot {
    /// Sample the source once
    pub fn capture(source: &mut dyn SpectrumSource) -> Self {
        Self {
            bins: source.frequency_bins(),
        }
    }

    /// Mean of all bins (0 for an empty snapshot)
    pub fn average_frequency(&self) -> f32 {
        average_of(&self.bins)
    }

    /// Low/high band statistics
    pub fn classify(&self) -> BandLevels {
        classify(&self.bins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Source whose bins change on every read, like a smoothing analyser
    struct DecayingSource {
        level: f32,
        reads: usize,
    }

    impl SpectrumSource for DecayingSource {
        fn frequency_bins(&mut self) -> Vec<f32> {
            self.reads += 1;
            self.level *= 0.5;
            vec![self.level; 4]
        }

        fn is_playing(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_snapshot_reads_source_once() {
        let mut source = DecayingSource {
            level: 200.0,
            reads: 0,
        };
        let snapshot = SpectrumSnapshot::capture(&mut source);

        assert_eq!(source.reads, 1);
        assert_eq!(snapshot.average_frequency(), 100.0);
        assert_eq!(snapshot.classify().high_max, 100.0);
        assert_eq!(source.reads, 1);
    }

    #[test]
    fn test_average_frequency_consumes_a_read() {
        let mut source = DecayingSource {
            level: 200.0,
            reads: 0,
        };
        assert_eq!(source.average_frequency(), 100.0);
        assert_eq!(source.reads, 1);

        // A second read in the same frame would see a further-decayed spectrum
        assert_eq!(source.frequency_bins(), vec![50.0; 4]);
    }
}
