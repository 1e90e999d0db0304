//! Pomo Timer - A Pomodoro work/break interval timer
//!
//! This library provides the timer state machine, the lock-guarded snapshot
//! it publishes, the audio cue collaborator and a small HTTP display that
//! polls the snapshot.

pub mod config;
pub mod error;
pub mod state;
pub mod timer;
pub mod api;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::AudioError;
pub use state::{AppState, TimerSnapshot, TimerState};
pub use timer::{Phase, TimerConfig, TimerEngine};
pub use api::create_router;
pub use services::{CuePlayer, RodioCuePlayer, SilentCuePlayer};
pub use utils::signals::shutdown_signal;
