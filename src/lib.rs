pub mod animation;
pub mod audio;
pub mod breathing;
pub mod config;
pub mod error;
pub mod patterns;
pub mod stats;

pub use animation::ScaleAnimator;
pub use audio::{AudioBackend, AudioPlayer, SilentBackend, Soundscape};
pub use breathing::{
    BreathingPhase, BreathingSession, PhaseChange, PhaseDurations, SessionController,
    SessionState, SessionStatus, TickConfig,
};
pub use config::ExerciseConfig;
pub use error::PatternError;
pub use stats::SessionStats;

/// Initialise logging (reads RUST_LOG, defaults to info). Call once from the
/// binary; repeated calls are ignored.
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}
