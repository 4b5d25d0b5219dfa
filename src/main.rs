use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{info, warn};
use tokio::sync::mpsc;

use breathwell_lib::{
    audio::{AudioBackend, AudioPlayer},
    init_logging, BreathingSession, ExerciseConfig, SessionController, SessionStats,
};

const DEFAULT_CYCLES: u64 = 3;

#[cfg(feature = "playback")]
fn audio_backend() -> breathwell_lib::audio::RodioBackend {
    breathwell_lib::audio::RodioBackend::new()
}

#[cfg(not(feature = "playback"))]
fn audio_backend() -> breathwell_lib::SilentBackend {
    breathwell_lib::SilentBackend::new()
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => ExerciseConfig::load(&PathBuf::from(path))?,
        None => ExerciseConfig::default(),
    };
    let cycles = match args.next() {
        Some(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("cycle count must be a number, got {raw}"))?,
        None => DEFAULT_CYCLES,
    };

    let durations = config.durations()?;
    info!(
        "Breathing {}-{}-{} for {} cycles",
        durations.get(breathwell_lib::BreathingPhase::Inhale) / 1_000,
        durations.get(breathwell_lib::BreathingPhase::Hold) / 1_000,
        durations.get(breathwell_lib::BreathingPhase::Exhale) / 1_000,
        cycles
    );

    let mut audio = AudioPlayer::new(audio_backend());
    if let Some(soundscape) = config.soundscape {
        audio.set_volume(config.volume);
        audio.load(soundscape);
        audio.play();
    }

    let session = BreathingSession::new(SessionController::new(durations), config.tick_config()?);
    run_exercise(&session, &mut audio, cycles).await;

    let state = session.get_state().await;
    let stats = SessionStats::from_state(&state, &durations);
    info!(
        "Finished {} cycles ({} min of breathing)",
        stats.completed_cycles, stats.minutes
    );

    Ok(())
}

async fn run_exercise<B: AudioBackend>(
    session: &BreathingSession,
    audio: &mut AudioPlayer<B>,
    cycles: u64,
) {
    let (cycle_tx, mut cycle_rx) = mpsc::unbounded_channel();

    session
        .on_phase_change(|change| info!("{}", change.to.instruction()))
        .await;
    session
        .on_cycle_complete(move |completed| {
            let _ = cycle_tx.send(completed);
        })
        .await;

    let first = session.start().await;
    info!("{}", first.current_phase.instruction());

    loop {
        tokio::select! {
            completed = cycle_rx.recv() => match completed {
                Some(n) if n >= cycles => break,
                Some(n) => info!("Cycle {} of {}", n, cycles),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted; ending breathing session");
                break;
            }
        }
    }

    session.teardown().await;
    audio.stop();
}
