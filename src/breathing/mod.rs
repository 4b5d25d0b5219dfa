pub mod controller;
pub mod counter;
pub mod driver;
pub mod phase;
pub mod sequencer;
pub mod state;
pub mod timer;

pub use controller::SessionController;
pub use driver::{BreathingSession, SessionSnapshot, TickConfig};
pub use phase::{BreathingPhase, PhaseDurations, FULL_SCALE, REST_SCALE};
pub use sequencer::{advance, PhaseChange};
pub use state::{SessionCommand, SessionState, SessionStatus};
