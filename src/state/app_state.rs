//! Main application state shared with the HTTP layer

use std::{sync::Arc, time::Instant};

use super::{TimerSnapshot, TimerState};

/// Read-side application state handed to every request handler
#[derive(Debug)]
pub struct AppState {
    /// Snapshot published by the timer engine
    timer_state: Arc<TimerState>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    /// Create a new AppState around the engine's timer state
    pub fn new(port: u16, host: String, timer_state: Arc<TimerState>) -> Self {
        Self {
            timer_state,
            start_time: Instant::now(),
            port,
            host,
        }
    }

    /// Get current timer snapshot
    pub fn get_timer_snapshot(&self) -> TimerSnapshot {
        self.timer_state.read()
    }

    /// Subscribe to snapshot updates
    pub fn subscribe_timer(&self) -> tokio::sync::broadcast::Receiver<TimerSnapshot> {
        self.timer_state.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed().as_secs())
    }
}

fn format_uptime(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
