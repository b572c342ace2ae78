//! Parameter definitions with documented units and semantics.
//!
//! All magic numbers are extracted here with:
//! - Documented ranges and meanings
//! - Defaults tuned for a 20-unit sphere viewed from 100 units away

mod audio;
mod render;
mod sphere;
mod visual;

// Re-export all types
pub use audio::AnalyserConfig;
pub use render::RenderConfig;
pub use sphere::{NoiseConfig, SphereGeometry};
pub use visual::{ParameterKnob, SphereColor, VisualParameters};
