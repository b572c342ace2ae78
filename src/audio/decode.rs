//! WAV decoding into interleaved f32 frames.

use std::io::Read;
use std::path::Path;

use hound::{SampleFormat, WavReader};
use log::info;

use crate::error::{Result, VisualizerError};

/// Fully decoded audio track (interleaved, normalized to [-1, 1])
#[derive(Debug, Clone)]
pub struct DecodedTrack {
    pub sample_rate: u32,
    pub channels: u16,
    samples: Vec<f32>,
}

impl DecodedTrack {
    /// Build a track from interleaved samples (trailing partial frame dropped)
    pub fn from_interleaved(sample_rate: u32, channels: u16, mut samples: Vec<f32>) -> Self {
        let channels = channels.max(1);
        let whole = samples.len() / channels as usize * channels as usize;
        samples.truncate(whole);
        Self {
            sample_rate,
            channels,
            samples,
        }
    }

    /// Decode a WAV file from disk
    pub fn open(path: &Path) -> Result<Self> {
        let track = WavReader::open(path)
            .and_then(Self::from_reader)
            .map_err(|source| VisualizerError::Decode {
                path: path.to_path_buf(),
                source,
            })?;

        if track.frames() == 0 {
            return Err(VisualizerError::EmptyAudio(path.to_path_buf()));
        }

        info!(
            "Loaded {} ({} Hz, {} ch, {:.1}s)",
            path.display(),
            track.sample_rate,
            track.channels,
            track.duration_secs()
        );
        Ok(track)
    }

    /// Decode from an open WAV reader (integer PCM up to 32 bits, or float)
    pub fn from_reader<R: Read>(reader: WavReader<R>) -> hound::Result<Self> {
        let spec = reader.spec();
        let samples = match spec.sample_format {
            SampleFormat::Float => reader.into_samples::<f32>().collect::<hound::Result<Vec<_>>>()?,
            SampleFormat::Int => {
                let full_scale = (1_i64 << (spec.bits_per_sample.clamp(1, 32) - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / full_scale))
                    .collect::<hound::Result<Vec<_>>>()?
            }
        };

        Ok(Self::from_interleaved(spec.sample_rate, spec.channels, samples))
    }

    /// Number of sample frames
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn duration_secs(&self) -> f32 {
        self.frames() as f32 / self.sample_rate.max(1) as f32
    }

    /// Sample of `channel` at `frame` (channels past the last repeat it)
    pub fn sample(&self, frame: usize, channel: usize) -> f32 {
        let channels = self.channels as usize;
        let channel = channel.min(channels - 1);
        self.samples
            .get(frame * channels + channel)
            .copied()
            .unwrap_or(0.0)
    }

    /// Linearly interpolated sample at a fractional frame position
    pub fn sample_at(&self, position: f64, channel: usize) -> f32 {
        let frame = position.floor() as usize;
        let frac = (position - frame as f64) as f32;
        let a = self.sample(frame, channel);
        if frac == 0.0 {
            return a;
        }
        let b = self.sample(frame + 1, channel);
        a + (b - a) * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    type CursorWriter<'a> = hound::WavWriter<&'a mut Cursor<Vec<u8>>>;

    fn wav_bytes(spec: hound::WavSpec, write: impl FnOnce(&mut CursorWriter<'_>)) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            write(&mut writer);
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_decode_int16_stereo() {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let bytes = wav_bytes(spec, |w| {
            for _ in 0..4 {
                w.write_sample(16384_i16).unwrap();
                w.write_sample(-32768_i16).unwrap();
            }
        });

        let track = DecodedTrack::from_reader(WavReader::new(Cursor::new(bytes)).unwrap()).unwrap();
        assert_eq!(track.sample_rate, 22050);
        assert_eq!(track.frames(), 4);
        assert!((track.sample(0, 0) - 0.5).abs() < 1e-6);
        assert!((track.sample(3, 1) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_decode_float_mono() {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let bytes = wav_bytes(spec, |w| {
            w.write_sample(0.25_f32).unwrap();
            w.write_sample(-0.75_f32).unwrap();
        });

        let track = DecodedTrack::from_reader(WavReader::new(Cursor::new(bytes)).unwrap()).unwrap();
        assert_eq!(track.frames(), 2);
        // Mono feeds every output channel
        assert_eq!(track.sample(1, 0), -0.75);
        assert_eq!(track.sample(1, 1), -0.75);
    }

    #[test]
    fn test_interpolation_and_bounds() {
        let track = DecodedTrack::from_interleaved(8000, 1, vec![0.0, 1.0, 0.5]);
        assert!((track.sample_at(0.5, 0) - 0.5).abs() < 1e-6);
        assert!((track.sample_at(1.25, 0) - 0.875).abs() < 1e-6);
        assert_eq!(track.sample(10, 0), 0.0);
    }

    #[test]
    fn test_partial_frame_dropped() {
        let track = DecodedTrack::from_interleaved(8000, 2, vec![0.1, 0.2, 0.3]);
        assert_eq!(track.frames(), 1);
    }
}
