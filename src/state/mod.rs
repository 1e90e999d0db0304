//! State management module
//!
//! This module contains the timer snapshot shared between the engine and readers.

pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use timer_state::{TimerSnapshot, TimerState};
