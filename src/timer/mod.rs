//! Pomodoro timer module
//!
//! This module contains the phase state machine and its construction parameters.

pub mod config;
pub mod engine;
pub mod phase;

// Re-export main types
pub use config::TimerConfig;
pub use engine::TimerEngine;
pub use phase::{format_clock, Phase};
