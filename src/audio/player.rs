use anyhow::{anyhow, Result};
use log::warn;
use serde::Serialize;
use std::time::Duration;

use super::soundscape::Soundscape;

/// Output side of the player. The player keeps the bookkeeping; a backend
/// only has to make (or not make) sound.
pub trait AudioBackend {
    fn load(&mut self, soundscape: Soundscape) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
    fn set_volume(&mut self, volume: f32) -> Result<()>;
}

/// Backend for devices without audio output: playback is simulated and only
/// the player's clock moves.
#[derive(Debug, Default)]
pub struct SilentBackend {
    loaded: Option<Soundscape>,
    playing: bool,
}

impl SilentBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl AudioBackend for SilentBackend {
    fn load(&mut self, soundscape: Soundscape) -> Result<()> {
        self.loaded = Some(soundscape);
        self.playing = false;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if self.loaded.is_none() {
            return Err(anyhow!("no soundscape loaded"));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.playing = false;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.playing = false;
        Ok(())
    }

    fn set_volume(&mut self, _volume: f32) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AudioPlayerState {
    pub soundscape: Option<Soundscape>,
    pub is_playing: bool,
    pub current_time_secs: f64,
    pub duration_secs: f64,
    pub volume: f32,
    pub error: Option<String>,
}

impl Default for AudioPlayerState {
    fn default() -> Self {
        Self {
            soundscape: None,
            is_playing: false,
            current_time_secs: 0.0,
            duration_secs: 0.0,
            volume: 1.0,
            error: None,
        }
    }
}

impl AudioPlayerState {
    pub fn progress(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        (self.current_time_secs / self.duration_secs).clamp(0.0, 1.0)
    }
}

/// Ambient audio context created at the composition root and handed to the
/// screens that play sound. Backend failures are recorded in `error` rather
/// than propagated, matching how the UI reports them.
pub struct AudioPlayer<B: AudioBackend> {
    backend: B,
    state: AudioPlayerState,
}

impl<B: AudioBackend> AudioPlayer<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: AudioPlayerState::default(),
        }
    }

    pub fn state(&self) -> &AudioPlayerState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn load(&mut self, soundscape: Soundscape) {
        self.stop();
        match self.backend.load(soundscape) {
            Ok(()) => {
                self.state.soundscape = Some(soundscape);
                self.state.duration_secs = soundscape.session_secs();
                self.state.error = None;
            }
            Err(err) => self.record_error("Failed to load audio", err),
        }
    }

    pub fn play(&mut self) {
        match self.backend.play() {
            Ok(()) => {
                self.state.is_playing = true;
                self.state.error = None;
            }
            Err(err) => {
                self.state.is_playing = false;
                self.record_error("Failed to play audio", err);
            }
        }
    }

    pub fn pause(&mut self) {
        if let Err(err) = self.backend.pause() {
            self.record_error("Failed to pause audio", err);
        }
        self.state.is_playing = false;
    }

    /// Halt and rewind to the beginning.
    pub fn stop(&mut self) {
        if let Err(err) = self.backend.stop() {
            self.record_error("Failed to stop audio", err);
        }
        self.state.is_playing = false;
        self.state.current_time_secs = 0.0;
    }

    pub fn toggle(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        if let Err(err) = self.backend.set_volume(volume) {
            self.record_error("Failed to set volume", err);
        }
        self.state.volume = volume;
    }

    pub fn seek_to(&mut self, secs: f64) {
        self.state.current_time_secs = secs.clamp(0.0, self.state.duration_secs);
    }

    /// Move the playback clock. Reaching the end stops and rewinds.
    pub fn advance(&mut self, dt: Duration) {
        if !self.state.is_playing {
            return;
        }

        self.state.current_time_secs += dt.as_secs_f64();
        if self.state.current_time_secs >= self.state.duration_secs {
            self.stop();
        }
    }

    fn record_error(&mut self, context: &str, err: anyhow::Error) {
        warn!("{}: {:#}", context, err);
        self.state.error = Some(context.to_string());
    }
}
