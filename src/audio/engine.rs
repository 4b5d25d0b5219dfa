//! rodio output for the audio player. Audio objects are not `Send`, so they
//! live on a dedicated thread fed through a channel. Load and play wait for
//! the thread to answer so their failures reach the player.

use anyhow::{anyhow, Context, Result};
use log::{error, info};
use rodio::{OutputStream, Sink, Source};
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use super::deck::{Deck, DeckSink};
use super::player::AudioBackend;
use super::soundscape::{NatureNoise, Soundscape};

impl Source for NatureNoise {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        NatureNoise::sample_rate(self)
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

type Reply = Sender<Result<()>>;

enum AudioCommand {
    Load(Soundscape, Reply),
    Play(Reply),
    Pause,
    Stop,
    SetVolume(f32),
}

/// An open output stream and the sink playing into it. The stream must
/// outlive the sink.
struct RodioOutput {
    _stream: OutputStream,
    sink: Sink,
}

impl RodioOutput {
    fn open() -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().context("Failed to create audio output stream")?;
        let sink = Sink::try_new(&handle).context("Failed to create audio sink")?;
        Ok(Self {
            _stream: stream,
            sink,
        })
    }
}

impl DeckSink for RodioOutput {
    fn append(&self, source: NatureNoise) {
        self.sink.append(source);
    }

    fn play(&self) {
        self.sink.play();
    }

    fn pause(&self) {
        self.sink.pause();
    }

    fn clear(&self) {
        self.sink.clear();
    }

    fn set_volume(&self, volume: f32) {
        self.sink.set_volume(volume);
    }
}

pub struct RodioBackend {
    tx: Option<Sender<AudioCommand>>,
}

impl Default for RodioBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RodioBackend {
    pub fn new() -> Self {
        Self { tx: None }
    }

    fn ensure_thread(&mut self) -> Result<Sender<AudioCommand>> {
        if let Some(tx) = self.tx.as_ref() {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<AudioCommand>();

        thread::Builder::new()
            .name("soundscape-audio".to_string())
            .spawn(move || {
                let mut deck: Deck<RodioOutput> = Deck::new();

                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        AudioCommand::Load(soundscape, reply) => {
                            let result = deck.load(soundscape, RodioOutput::open);
                            match &result {
                                Ok(()) => info!("Loaded soundscape {}", soundscape.label()),
                                Err(e) => error!("{:#}", e),
                            }
                            let _ = reply.send(result);
                        }
                        AudioCommand::Play(reply) => {
                            let _ = reply.send(deck.play());
                        }
                        AudioCommand::Pause => deck.pause(),
                        AudioCommand::Stop => deck.stop(),
                        AudioCommand::SetVolume(v) => deck.set_volume(v),
                    }
                }
            })
            .context("Failed to spawn audio thread")?;

        self.tx = Some(tx.clone());
        Ok(tx)
    }

    fn send(&mut self, cmd: AudioCommand) -> Result<()> {
        self.ensure_thread()?
            .send(cmd)
            .map_err(|_| anyhow!("audio thread has exited"))
    }

    /// Send a command and wait for the audio thread's answer.
    fn request(&mut self, cmd: impl FnOnce(Reply) -> AudioCommand) -> Result<()> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.send(cmd(reply_tx))?;
        reply_rx
            .recv()
            .map_err(|_| anyhow!("audio thread has exited"))?
    }
}

impl AudioBackend for RodioBackend {
    fn load(&mut self, soundscape: Soundscape) -> Result<()> {
        self.request(|reply| AudioCommand::Load(soundscape, reply))
    }

    fn play(&mut self) -> Result<()> {
        self.request(AudioCommand::Play)
    }

    fn pause(&mut self) -> Result<()> {
        self.send(AudioCommand::Pause)
    }

    fn stop(&mut self) -> Result<()> {
        // Nothing to stop if the thread was never started.
        match self.tx.as_ref() {
            Some(tx) => tx
                .send(AudioCommand::Stop)
                .map_err(|_| anyhow!("audio thread has exited")),
            None => Ok(()),
        }
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.send(AudioCommand::SetVolume(volume))
    }
}
