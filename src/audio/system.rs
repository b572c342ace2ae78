//! Audio system managing file playback and spectrum analysis.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{error, info, warn};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use super::analyser::SpectrumAnalyser;
use super::decode::DecodedTrack;
use super::SpectrumSource;
use crate::error::{Result, VisualizerError};
use crate::params::AnalyserConfig;

/// Playback cursor and analysis window shared with the output callback
pub struct Playback {
    track: Option<DecodedTrack>,
    /// Position in track frames (fractional when sample rates differ)
    cursor: f64,
    /// Track frames advanced per output frame
    step: f64,
    paused: bool,
    ended: bool,
    volume: f32,
    /// Most recent mono output samples, newest last
    recent: VecDeque<f32>,
    window_len: usize,
}

impl Playback {
    pub fn new(volume: f32, window_len: usize) -> Self {
        Self {
            track: None,
            cursor: 0.0,
            step: 1.0,
            paused: true,
            ended: false,
            volume,
            recent: VecDeque::from(vec![0.0; window_len]),
            window_len,
        }
    }

    /// Replace the current track. Playback starts paused at the beginning.
    pub fn load(&mut self, track: DecodedTrack, output_rate: u32) {
        self.step = if output_rate > 0 {
            track.sample_rate as f64 / output_rate as f64
        } else {
            1.0
        };
        self.track = Some(track);
        self.cursor = 0.0;
        self.paused = true;
        self.ended = false;
    }

    pub fn has_track(&self) -> bool {
        self.track.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.track.is_some() && !self.paused
    }

    #[cfg(test)]
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Start playback (restarts from the beginning after the track ended)
    pub fn play(&mut self) {
        if self.track.is_none() {
            return;
        }
        if self.ended {
            self.cursor = 0.0;
            self.ended = false;
        }
        self.paused = false;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Fill an interleaved output buffer and record the mono mix for analysis.
    /// Paused, ended or empty playback writes silence.
    pub fn fill(&mut self, data: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        for frame in data.chunks_mut(channels) {
            let mut mono = 0.0;
            match &self.track {
                Some(track) if !self.paused => {
                    for (c, out) in frame.iter_mut().enumerate() {
                        let sample = track.sample_at(self.cursor, c) * self.volume;
                        *out = sample;
                        mono += sample;
                    }
                    mono /= frame.len() as f32;
                    self.cursor += self.step;
                    if self.cursor >= track.frames() as f64 {
                        self.ended = true;
                        self.paused = true;
                    }
                }
                _ => frame.fill(0.0),
            }
            self.push_recent(mono);
        }
    }

    fn push_recent(&mut self, sample: f32) {
        if self.recent.len() == self.window_len {
            self.recent.pop_front();
        }
        self.recent.push_back(sample);
    }

    /// Copy of the analysis window, oldest first
    pub fn recent_samples(&self) -> Vec<f32> {
        self.recent.iter().copied().collect()
    }
}

/// Audio system: cpal output stream plus spectrum analyser
pub struct AudioSystem {
    /// Shared playback state (locked by the output callback)
    playback: Arc<Mutex<Playback>>,

    analyser: SpectrumAnalyser,

    output_rate: u32,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,
}

impl AudioSystem {
    /// Open the default output device and start a (silent) stream
    pub fn new(config: AnalyserConfig) -> Result<Self> {
        config.validate().map_err(VisualizerError::InvalidConfig)?;

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(VisualizerError::NoOutputDevice)?;
        let stream_config = device.default_output_config()?;
        let output_rate = stream_config.sample_rate().0;
        let channels = stream_config.channels() as usize;

        info!(
            "Audio: {} @ {}Hz, {} ch",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            output_rate,
            channels
        );

        let playback = Arc::new(Mutex::new(Playback::new(config.volume, config.fft_size)));
        let playback_cb = Arc::clone(&playback);

        let stream = device.build_output_stream(
            &stream_config.into(),
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| match playback_cb.lock() {
                Ok(mut playback) => playback.fill(data, channels),
                Err(_) => data.fill(0.0),
            },
            |err| error!("Audio stream error: {}", err),
            None,
        )?;
        stream.play()?;

        Ok(Self {
            playback,
            analyser: SpectrumAnalyser::new(config),
            output_rate,
            _stream: stream,
        })
    }

    fn playback(&self) -> MutexGuard<'_, Playback> {
        self.playback
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace the current track (paused at the start)
    pub fn load(&mut self, track: DecodedTrack) {
        let output_rate = self.output_rate;
        self.playback().load(track, output_rate);
        self.analyser.clear();
    }

    pub fn has_track(&self) -> bool {
        self.playback().has_track()
    }

    /// Toggle play/pause. Returns true when now playing.
    pub fn toggle(&mut self) -> bool {
        let mut playback = self.playback();
        if playback.is_playing() {
            playback.pause();
            info!("Audio playback paused");
        } else if playback.has_track() {
            playback.play();
            info!("Audio playback started");
        } else {
            warn!("No audio file loaded; drop a WAV file on the window");
        }
        playback.is_playing()
    }

    pub fn play(&mut self) {
        self.playback().play();
    }
}

impl SpectrumSource for AudioSystem {
    fn frequency_bins(&mut self) -> Vec<f32> {
        let recent = self.playback().recent_samples();
        self.analyser.analyse(&recent).to_vec()
    }

    fn is_playing(&self) -> bool {
        self.playback().is_playing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_track(frames: usize, sample_rate: u32) -> DecodedTrack {
        let samples = (0..frames).map(|i| i as f32 / frames as f32).collect();
        DecodedTrack::from_interleaved(sample_rate, 1, samples)
    }

    #[test]
    fn test_starts_paused_and_silent() {
        let mut playback = Playback::new(1.0, 8);
        playback.load(ramp_track(16, 48000), 48000);
        assert!(!playback.is_playing());

        let mut out = [1.0; 8];
        playback.fill(&mut out, 2);
        assert!(out.iter().all(|&s| s == 0.0));
        assert!(playback.recent_samples().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_plays_with_volume_and_duplicates_mono() {
        let mut playback = Playback::new(0.5, 8);
        playback.load(ramp_track(4, 48000), 48000);
        playback.play();

        let mut out = [0.0; 4];
        playback.fill(&mut out, 2);
        assert_eq!(out, [0.0, 0.0, 0.125, 0.125]);
        assert_eq!(playback.recent_samples().len(), 8);
        assert_eq!(*playback.recent_samples().last().unwrap(), 0.125);
    }

    #[test]
    fn test_end_of_track_pauses_and_replay_restarts() {
        let mut playback = Playback::new(1.0, 4);
        playback.load(ramp_track(3, 48000), 48000);
        playback.play();

        let mut out = [0.0; 5];
        playback.fill(&mut out, 1);
        assert!(playback.is_ended());
        assert!(!playback.is_playing());
        assert_eq!(out[3], 0.0);
        assert_eq!(out[4], 0.0);

        playback.play();
        assert!(playback.is_playing());
        let mut out = [0.0; 1];
        playback.fill(&mut out, 1);
        assert_eq!(out[0], 0.0); // first frame of the ramp
        assert!(!playback.is_ended());
    }

    #[test]
    fn test_resamples_slower_track() {
        // 24 kHz track on a 48 kHz device advances half a frame per output frame
        let mut playback = Playback::new(1.0, 4);
        playback.load(DecodedTrack::from_interleaved(24000, 1, vec![0.0, 1.0, 1.0]), 48000);
        playback.play();

        let mut out = [0.0; 3];
        playback.fill(&mut out, 1);
        assert_eq!(out, [0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_play_without_track_is_noop() {
        let mut playback = Playback::new(1.0, 4);
        playback.play();
        assert!(!playback.is_playing());
    }
}
