//! Timer state structure and management

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

/// Snapshots buffered per subscriber before it starts lagging
const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// The externally visible pair published by the timer engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub message: String,
    pub remaining_seconds: u64,
}

impl TimerSnapshot {
    pub fn new(message: impl Into<String>, remaining_seconds: u64) -> Self {
        Self {
            message: message.into(),
            remaining_seconds,
        }
    }
}

/// Lock-guarded timer snapshot shared between the engine and its readers
///
/// The engine is the only writer. The lock is held just long enough to swap
/// or clone the snapshot, so readers never stall the tick cadence.
#[derive(Debug)]
pub struct TimerState {
    snapshot: Mutex<TimerSnapshot>,
    updates: broadcast::Sender<TimerSnapshot>,
}

impl TimerState {
    /// Create an empty timer state (`""`, 0)
    pub fn new() -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            snapshot: Mutex::new(TimerSnapshot::default()),
            updates,
        }
    }

    /// Replace message and remaining seconds together
    pub fn update(&self, message: impl Into<String>, remaining_seconds: u64) {
        let snapshot = TimerSnapshot::new(message, remaining_seconds);
        {
            // Snapshots are replaced wholesale, so a poisoned lock still guards a consistent pair
            let mut current = self.snapshot.lock().unwrap_or_else(PoisonError::into_inner);
            *current = snapshot.clone();
        }

        if self.updates.send(snapshot).is_err() {
            trace!("No snapshot subscribers");
        }
    }

    /// Read the most recently published snapshot
    pub fn read(&self) -> TimerSnapshot {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Subscribe to every snapshot published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<TimerSnapshot> {
        self.updates.subscribe()
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}
