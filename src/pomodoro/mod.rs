pub mod appearance;
pub mod phase;
pub mod timer;

pub use appearance::Appearance;
pub use phase::Phase;
pub use timer::{LongBreakPolicy, PhaseTimer, TimerConfig, TimerError};
