#[cfg_attr(not(feature = "playback"), allow(dead_code))]
mod deck;
#[cfg(feature = "playback")]
pub mod engine;
pub mod player;
pub mod soundscape;

#[cfg(feature = "playback")]
pub use engine::RodioBackend;
pub use player::{AudioBackend, AudioPlayer, AudioPlayerState, SilentBackend};
pub use soundscape::{NatureNoise, Soundscape};
