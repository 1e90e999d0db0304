//! Engine construction parameters

use std::time::Duration;

pub const DEFAULT_CYCLES: u32 = 4;
pub const WORK_DURATION: Duration = Duration::from_secs(25 * 60);
pub const BREAK_DURATION: Duration = Duration::from_secs(5 * 60);
pub const WELCOME_PAUSE: Duration = Duration::from_secs(20);
pub const INTER_PHASE_PAUSE: Duration = Duration::from_secs(1);
pub const TICK: Duration = Duration::from_secs(1);
pub const DEFAULT_CUE_VOLUME: f32 = 1.0;

/// Durations and counts that drive a run
///
/// `Default` is the production schedule. Tests build shorter ones.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerConfig {
    /// Number of Work+Break cycles
    pub cycle_count: u32,
    pub work_duration: Duration,
    pub break_duration: Duration,
    /// How long the greeting stays up before the first cue
    pub welcome_pause: Duration,
    /// Pause between the end of Work and the start of Break
    pub inter_phase_pause: Duration,
    /// Countdown publish interval
    pub tick: Duration,
    /// Volume handed to the cue player, passed through uninterpreted
    pub cue_volume: f32,
}

impl TimerConfig {
    /// Override the cue volume
    pub fn with_cue_volume(mut self, volume: f32) -> Self {
        self.cue_volume = volume;
        self
    }

    /// Number of cues a full run triggers
    pub fn expected_cues(&self) -> u32 {
        if self.cycle_count == 0 {
            1
        } else {
            2 * (self.cycle_count - 1) + 1
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            cycle_count: DEFAULT_CYCLES,
            work_duration: WORK_DURATION,
            break_duration: BREAK_DURATION,
            welcome_pause: WELCOME_PAUSE,
            inter_phase_pause: INTER_PHASE_PAUSE,
            tick: TICK,
            cue_volume: DEFAULT_CUE_VOLUME,
        }
    }
}
