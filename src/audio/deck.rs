//! Sink bookkeeping for the audio thread. The output is opened on the first
//! load and kept for the life of the thread, so stop only rewinds.

use anyhow::{bail, Result};

use super::soundscape::{NatureNoise, Soundscape};

/// The handful of sink operations the deck needs. `rodio::Sink` provides
/// all of them.
pub(crate) trait DeckSink {
    fn append(&self, source: NatureNoise);
    fn play(&self);
    fn pause(&self);
    /// Drop every queued source.
    fn clear(&self);
    fn set_volume(&self, volume: f32);
}

pub(crate) struct Deck<S> {
    sink: Option<S>,
    loaded: Option<Soundscape>,
    volume: f32,
}

impl<S: DeckSink> Deck<S> {
    pub fn new() -> Self {
        Self {
            sink: None,
            loaded: None,
            volume: 1.0,
        }
    }

    /// Queue `soundscape` from its start, paused. `open` is only called when
    /// no sink exists yet, and its error is returned untouched.
    pub fn load(&mut self, soundscape: Soundscape, open: impl FnOnce() -> Result<S>) -> Result<()> {
        let sink = match self.sink.take() {
            Some(sink) => sink,
            None => open()?,
        };
        cue(&sink, soundscape, self.volume);
        self.sink = Some(sink);
        self.loaded = Some(soundscape);
        Ok(())
    }

    pub fn play(&self) -> Result<()> {
        match (&self.sink, self.loaded) {
            (Some(sink), Some(_)) => {
                sink.play();
                Ok(())
            }
            _ => bail!("no soundscape loaded"),
        }
    }

    pub fn pause(&self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    /// Rewind the loaded soundscape and leave it paused.
    pub fn stop(&self) {
        if let (Some(sink), Some(soundscape)) = (&self.sink, self.loaded) {
            cue(sink, soundscape, self.volume);
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume);
        }
    }
}

fn cue<S: DeckSink>(sink: &S, soundscape: Soundscape, volume: f32) {
    sink.clear();
    sink.set_volume(volume);
    sink.append(soundscape.generator());
    sink.pause();
}
