//! Byte-scaled frequency analysis of the most recent output samples.
//!
//! Each call to [`SpectrumAnalyser::analyse`] windows the last `fft_size`
//! samples, runs a forward FFT, smooths magnitudes against the previous
//! call and maps decibels onto 0..=255.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

use crate::params::AnalyserConfig;

/// Stateful spectrum analyser (smoothing carries across calls)
pub struct SpectrumAnalyser {
    config: AnalyserConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
    bins: Vec<f32>,
}

impl SpectrumAnalyser {
    pub fn new(config: AnalyserConfig) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(config.fft_size);
        let window = (0..config.fft_size)
            .map(|i| blackman_window(i, config.fft_size))
            .collect();

        Self {
            fft,
            window,
            scratch: vec![Complex::new(0.0, 0.0); config.fft_size],
            smoothed: vec![0.0; config.bin_count()],
            bins: vec![0.0; config.bin_count()],
            config,
        }
    }

    /// Analyse the newest `fft_size` samples of `recent` (older samples are
    /// ignored, missing ones count as silence) and return the bin values.
    pub fn analyse(&mut self, recent: &[f32]) -> &[f32] {
        let n = self.config.fft_size;
        let start = recent.len().saturating_sub(n);
        let tail = &recent[start..];
        let pad = n - tail.len();

        for (i, slot) in self.scratch.iter_mut().enumerate() {
            let sample = if i < pad { 0.0 } else { tail[i - pad] };
            *slot = Complex::new(sample * self.window[i], 0.0);
        }

        self.fft.process(&mut self.scratch);

        let tau = self.config.smoothing_time_constant;
        let db_range = self.config.max_decibels - self.config.min_decibels;
        let scale = 1.0 / n as f32;

        for k in 0..self.bins.len() {
            let magnitude = self.scratch[k].norm() * scale;
            let mut smoothed = tau * self.smoothed[k] + (1.0 - tau) * magnitude;
            if !smoothed.is_finite() {
                smoothed = 0.0;
            }
            self.smoothed[k] = smoothed;

            let db = linear_to_decibels(smoothed);
            let scaled = 255.0 / db_range * (db - self.config.min_decibels);
            self.bins[k] = scaled.floor().clamp(0.0, 255.0);
        }

        &self.bins
    }

    /// Bin values from the latest call to `analyse`
    #[cfg(test)]
    pub fn bins(&self) -> &[f32] {
        &self.bins
    }

    /// Forget smoothing history (new track loaded)
    pub fn clear(&mut self) {
        self.smoothed.fill(0.0);
        self.bins.fill(0.0);
    }
}

/// Blackman window function
pub fn blackman_window(index: usize, size: usize) -> f32 {
    let a0 = 0.42;
    let a1 = 0.5;
    let a2 = 0.08;
    let x = index as f32 / size as f32;
    a0 - a1 * (2.0 * PI * x).cos() + a2 * (4.0 * PI * x).cos()
}

fn linear_to_decibels(linear: f32) -> f32 {
    if linear > 0.0 {
        20.0 * linear.log10()
    } else {
        f32::NEG_INFINITY
    }
}

/// Mean of the bin values (0 for an empty snapshot)
pub fn average_of(bins: &[f32]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    bins.iter().sum::<f32>() / bins.len() as f32
}
