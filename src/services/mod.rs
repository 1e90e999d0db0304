//! External collaborator module
//!
//! This module contains the sound-emission collaborator used for phase cues.

pub mod audio;

// Re-export main types
pub use audio::*;
