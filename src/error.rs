//! Error types for the visualizer.

use std::path::PathBuf;

use thiserror::Error;

/// Visualizer errors
#[derive(Error, Debug)]
pub enum VisualizerError {
    /// WAV file could not be opened or decoded
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    /// WAV file decoded to zero frames
    #[error("Audio file {0} contains no samples")]
    EmptyAudio(PathBuf),

    /// No output device on the default host
    #[error("No audio output device found")]
    NoOutputDevice,

    /// Output device has no usable default configuration
    #[error("Audio config error: {0}")]
    AudioConfig(#[from] cpal::DefaultStreamConfigError),

    /// Output stream could not be built
    #[error("Audio stream error: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    /// Output stream could not be started
    #[error("Audio playback error: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    /// Analyser configuration rejected by `AnalyserConfig::validate`
    #[error("Invalid analyser config: {0}")]
    InvalidConfig(String),

    /// A visual parameter was given outside its allowed range
    #[error("{name} = {value} is outside [{min}, {max}]")]
    ParameterOutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// Color string could not be parsed
    #[error("Invalid color '{0}' (expected hex such as ff0000 or #ff0000)")]
    InvalidColor(String),

    /// GPU surface, adapter or device setup failed
    #[error("Render setup failed: {0}")]
    RenderSetup(String),
}

/// Result type for visualizer operations
pub type Result<T> = std::result::Result<T, VisualizerError>;
