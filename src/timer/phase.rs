//! Timer phases and message formatting

use std::fmt;

pub const WELCOME_MESSAGE: &str = "Welcome to Pomo Sessions";
pub const FINISHED_MESSAGE: &str = "Great Job!";

/// The four mutually exclusive states of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Welcome,
    Work,
    Break,
    Finished,
}

impl Phase {
    /// Label shown on the display for this phase
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Welcome => "Welcome",
            Phase::Work => "Work Time",
            Phase::Break => "Break Time",
            Phase::Finished => "Finished",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Format whole seconds as `MM:SS`
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Build the countdown line, e.g. `Work Time : Session 1 of 4 - 24:59`
pub fn countdown_message(phase: Phase, session: u32, cycles: u32, remaining_seconds: u64) -> String {
    format!(
        "{} : Session {} of {} - {}",
        phase.label(),
        session,
        cycles,
        format_clock(remaining_seconds)
    )
}
