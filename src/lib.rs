//! Spikesphere library - Audio-reactive sphere deformation

pub mod audio;
pub mod camera;
pub mod cli;
pub mod controls;
pub mod error;
pub mod noise;
pub mod params;
pub mod rendering;
pub mod scene;
pub mod sphere;

pub use error::{Result, VisualizerError};
