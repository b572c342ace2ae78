//! Spectrum analyser and playback configuration.

/// Spectrum analyser configuration (Web Audio analyser semantics)
#[derive(Debug, Clone)]
pub struct AnalyserConfig {
    /// FFT window size (power of 2, 32..=32768). Bin count is half of this.
    pub fft_size: usize,

    /// Exponential smoothing between successive spectra (0 = none, <1)
    pub smoothing_time_constant: f32,

    /// Magnitude (dB) mapped to bin value 0
    pub min_decibels: f32,

    /// Magnitude (dB) mapped to bin value 255
    pub max_decibels: f32,

    /// Playback gain (0..=1)
    pub volume: f32,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            fft_size: 64,
            smoothing_time_constant: 0.8,
            min_decibels: -100.0,
            max_decibels: -30.0,
            volume: 0.1,
        }
    }
}

impl AnalyserConfig {
    /// Number of frequency bins produced per snapshot
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), String> {
        if !self.fft_size.is_power_of_two() || !(32..=32768).contains(&self.fft_size) {
            return Err(format!(
                "FFT size must be a power of 2 in 32..=32768, got {}",
                self.fft_size
            ));
        }
        if !(0.0..1.0).contains(&self.smoothing_time_constant) {
            return Err(format!(
                "Smoothing must be in [0, 1), got {}",
                self.smoothing_time_constant
            ));
        }
        if self.min_decibels >= self.max_decibels {
            return Err(format!(
                "min_decibels ({}) must be below max_decibels ({})",
                self.min_decibels, self.max_decibels
            ));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(format!("Volume must be in [0, 1], got {}", self.volume));
        }
        Ok(())
    }
}
