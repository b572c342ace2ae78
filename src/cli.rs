//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

use crate::error::{Result, VisualizerError};
use crate::params::{AnalyserConfig, NoiseConfig, ParameterKnob, SphereColor, VisualParameters};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Spikesphere")]
#[command(about = "Audio-reactive spiky sphere visualizer", long_about = None)]
pub struct Args {
    /// WAV file to load at startup (files can also be dropped on the window)
    #[arg(value_name = "FILE")]
    pub audio: Option<PathBuf>,

    /// Start playing immediately after loading
    #[arg(long)]
    pub autoplay: bool,

    /// Sphere color as hex RGB
    #[arg(long, value_name = "HEX", default_value = "ff0000")]
    pub color: SphereColor,

    /// Rotational speed (-10..10)
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub speed: f32,

    /// Spike frequency (0..10)
    #[arg(long, default_value_t = 5.0)]
    pub spike_frequency: f32,

    /// Spike length (0..20)
    #[arg(long, default_value_t = 10.0)]
    pub spike_length: f32,

    /// Low frequency sensitivity (1..10)
    #[arg(long, default_value_t = 5.0)]
    pub low_sensitivity: f32,

    /// High frequency sensitivity (1..10)
    #[arg(long, default_value_t = 5.0)]
    pub high_sensitivity: f32,

    /// Playback volume (0..1)
    #[arg(long, default_value_t = 0.1)]
    pub volume: f32,

    /// Analyser FFT size (power of 2; bins = half of this)
    #[arg(long, default_value_t = 64)]
    pub fft_size: usize,

    /// Noise seed
    #[arg(long, default_value_t = 0)]
    pub seed: u32,
}

impl Args {
    /// Initial visual parameters, validated against the knob ranges
    pub fn visual_parameters(&self) -> Result<VisualParameters> {
        let mut params = VisualParameters {
            sphere_color: self.color,
            ..VisualParameters::default()
        };
        params.set(ParameterKnob::Speed, self.speed)?;
        params.set(ParameterKnob::SpikeFrequency, self.spike_frequency)?;
        params.set(ParameterKnob::SpikeLength, self.spike_length)?;
        params.set(ParameterKnob::LowFrequencySensitivity, self.low_sensitivity)?;
        params.set(ParameterKnob::HighFrequencySensitivity, self.high_sensitivity)?;
        Ok(params)
    }

    /// Analyser configuration from the command line
    pub fn analyser_config(&self) -> Result<AnalyserConfig> {
        let config = AnalyserConfig {
            fft_size: self.fft_size,
            volume: self.volume,
            ..AnalyserConfig::default()
        };
        config.validate().map_err(VisualizerError::InvalidConfig)?;
        Ok(config)
    }

    pub fn noise_config(&self) -> NoiseConfig {
        NoiseConfig { seed: self.seed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["spikesphere"]);
        assert!(args.audio.is_none());
        assert_eq!(args.visual_parameters().unwrap(), VisualParameters::default());
        assert_eq!(args.analyser_config().unwrap().fft_size, 64);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "spikesphere",
            "song.wav",
            "--autoplay",
            "--color",
            "#00ff00",
            "--speed",
            "-3",
            "--spike-length",
            "15",
        ]);
        let params = args.visual_parameters().unwrap();
        assert_eq!(args.audio.as_deref(), Some(std::path::Path::new("song.wav")));
        assert!(args.autoplay);
        assert_eq!(params.sphere_color.to_hex(), 0x00FF00);
        assert_eq!(params.speed, -3.0);
        assert_eq!(params.spike_length, 15.0);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let args = Args::parse_from(["spikesphere", "--spike-frequency", "12"]);
        assert!(matches!(
            args.visual_parameters(),
            Err(VisualizerError::ParameterOutOfRange { .. })
        ));

        let args = Args::parse_from(["spikesphere", "--fft-size", "100"]);
        assert!(args.analyser_config().is_err());
    }
}
