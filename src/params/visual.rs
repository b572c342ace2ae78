//! User-tunable visual parameters (the six knobs).

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::{Result, VisualizerError};

/// Sphere surface color (8-bit sRGB channels)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SphereColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl SphereColor {
    pub const RED: Self = Self::from_hex(0xFF0000);

    /// Colors visited by the cycle-color control
    pub const PALETTE: [Self; 6] = [
        Self::from_hex(0xFF0000),
        Self::from_hex(0xFF8800),
        Self::from_hex(0xFFEE00),
        Self::from_hex(0x22DD44),
        Self::from_hex(0x2288FF),
        Self::from_hex(0xAA44FF),
    ];

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    pub fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Linear-light RGB for the shader (surface format is sRGB)
    pub fn to_linear(self) -> [f32; 3] {
        [self.r, self.g, self.b].map(|c| srgb_to_linear(c as f32 / 255.0))
    }

    /// Next palette entry after this color (first entry if not in the palette)
    pub fn next_in_palette(self) -> Self {
        let idx = Self::PALETTE.iter().position(|c| *c == self);
        match idx {
            Some(i) => Self::PALETTE[(i + 1) % Self::PALETTE.len()],
            None => Self::PALETTE[0],
        }
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl Default for SphereColor {
    fn default() -> Self {
        Self::RED
    }
}

impl fmt::Display for SphereColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.to_hex())
    }
}

impl FromStr for SphereColor {
    type Err = VisualizerError;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .trim()
            .trim_start_matches('#')
            .trim_start_matches("0x")
            .trim_start_matches("0X");
        if digits.len() != 6 {
            return Err(VisualizerError::InvalidColor(s.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_hex)
            .map_err(|_| VisualizerError::InvalidColor(s.to_string()))
    }
}

/// Scalar knobs adjustable at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKnob {
    Speed,
    SpikeFrequency,
    SpikeLength,
    LowFrequencySensitivity,
    HighFrequencySensitivity,
}

impl ParameterKnob {
    pub const ALL: [Self; 5] = [
        Self::Speed,
        Self::SpikeFrequency,
        Self::SpikeLength,
        Self::LowFrequencySensitivity,
        Self::HighFrequencySensitivity,
    ];

    /// Allowed range for the knob
    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            Self::Speed => -10.0..=10.0,
            Self::SpikeFrequency => 0.0..=10.0,
            Self::SpikeLength => 0.0..=20.0,
            Self::LowFrequencySensitivity | Self::HighFrequencySensitivity => 1.0..=10.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Speed => "Rotational Speed",
            Self::SpikeFrequency => "Spike Frequency",
            Self::SpikeLength => "Spike Length",
            Self::LowFrequencySensitivity => "Low Frequency Sensitivity",
            Self::HighFrequencySensitivity => "High Frequency Sensitivity",
        }
    }
}

/// Visual parameters read once per frame
#[derive(Debug, Clone, PartialEq)]
pub struct VisualParameters {
    /// Sphere surface color
    pub sphere_color: SphereColor,

    /// Rotation rate (signed, radians per frame = speed * rotation step)
    pub speed: f32,

    /// Spatial frequency of noise sampling on the unit sphere
    pub spike_frequency: f32,

    /// Spike displacement amplitude (world units)
    pub spike_length: f32,

    /// Bass swelling sensitivity (1-10, scaled by 0.1)
    pub low_frequency_sensitivity: f32,

    /// Spike amplitude sensitivity to treble (1-10, scaled by 0.5)
    pub high_frequency_sensitivity: f32,
}

impl Default for VisualParameters {
    fn default() -> Self {
        Self {
            sphere_color: SphereColor::RED,
            speed: 1.0,
            spike_frequency: 5.0,
            spike_length: 10.0,
            low_frequency_sensitivity: 5.0,
            high_frequency_sensitivity: 5.0,
        }
    }
}

impl VisualParameters {
    pub fn get(&self, knob: ParameterKnob) -> f32 {
        match knob {
            ParameterKnob::Speed => self.speed,
            ParameterKnob::SpikeFrequency => self.spike_frequency,
            ParameterKnob::SpikeLength => self.spike_length,
            ParameterKnob::LowFrequencySensitivity => self.low_frequency_sensitivity,
            ParameterKnob::HighFrequencySensitivity => self.high_frequency_sensitivity,
        }
    }

    fn slot(&mut self, knob: ParameterKnob) -> &mut f32 {
        match knob {
            ParameterKnob::Speed => &mut self.speed,
            ParameterKnob::SpikeFrequency => &mut self.spike_frequency,
            ParameterKnob::SpikeLength => &mut self.spike_length,
            ParameterKnob::LowFrequencySensitivity => &mut self.low_frequency_sensitivity,
            ParameterKnob::HighFrequencySensitivity => &mut self.high_frequency_sensitivity,
        }
    }

    /// Set a knob, rejecting values outside its range
    pub fn set(&mut self, knob: ParameterKnob, value: f32) -> Result<()> {
        let range = knob.range();
        if !range.contains(&value) {
            return Err(VisualizerError::ParameterOutOfRange {
                name: knob.name(),
                value,
                min: *range.start(),
                max: *range.end(),
            });
        }
        *self.slot(knob) = value;
        Ok(())
    }

    /// Nudge a knob by `delta`, clamped to its range. Returns the new value.
    pub fn adjust(&mut self, knob: ParameterKnob, delta: f32) -> f32 {
        let range = knob.range();
        let slot = self.slot(knob);
        *slot = (*slot + delta).clamp(*range.start(), *range.end());
        *slot
    }

    /// Check every knob against its range
    pub fn validate(&self) -> Result<()> {
        let mut probe = self.clone();
        for knob in ParameterKnob::ALL {
            probe.set(knob, self.get(knob))?;
        }
        Ok(())
    }
}
