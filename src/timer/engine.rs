//! Pomodoro run loop

use std::{sync::Arc, thread, time::Duration};
use tokio::time::{sleep, Instant};
use tracing::{debug, error, info, warn};

use super::{
    config::TimerConfig,
    phase::{countdown_message, Phase, FINISHED_MESSAGE, WELCOME_MESSAGE},
};
use crate::{services::CuePlayer, state::TimerState};

/// Drives one full Welcome → Work/Break × N → Finished run
pub struct TimerEngine {
    config: TimerConfig,
    state: Arc<TimerState>,
    cue: Arc<dyn CuePlayer>,
    current_session: u32,
}

impl TimerEngine {
    /// Create an engine with a fresh, empty timer state
    pub fn new(config: TimerConfig, cue: Arc<dyn CuePlayer>) -> Self {
        Self::with_state(config, Arc::new(TimerState::new()), cue)
    }

    /// Create an engine publishing into an existing timer state
    pub fn with_state(config: TimerConfig, state: Arc<TimerState>, cue: Arc<dyn CuePlayer>) -> Self {
        Self {
            config,
            state,
            cue,
            current_session: 0,
        }
    }

    /// Shared handle for readers
    pub fn state(&self) -> Arc<TimerState> {
        Arc::clone(&self.state)
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// 1-based index of the cycle in progress, 0 before the first Work phase
    pub fn current_session(&self) -> u32 {
        self.current_session
    }

    /// Run the engine on its own named thread
    ///
    /// The thread drives a single-threaded runtime with only the time driver
    /// enabled and exits once the run reaches Finished.
    pub fn spawn(mut self) -> std::io::Result<thread::JoinHandle<()>> {
        thread::Builder::new()
            .name("pomodoro-timer".to_string())
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread()
                    .enable_time()
                    .build()
                {
                    Ok(runtime) => runtime,
                    Err(e) => {
                        error!("Failed to build timer runtime: {}", e);
                        return;
                    }
                };
                runtime.block_on(self.run());
            })
    }

    /// Run the whole sequence once
    pub async fn run(&mut self) {
        let cycles = self.config.cycle_count;
        info!("Starting pomodoro run: {} cycles, {} cues expected", cycles, self.config.expected_cues());

        self.state.update(WELCOME_MESSAGE, 0);
        sleep(self.config.welcome_pause).await;
        self.play_cue();

        let mut previous = Phase::Welcome;
        for index in 0..cycles {
            self.current_session = index + 1;
            let last_cycle = self.current_session == cycles;

            self.transition(previous, Phase::Work);
            self.countdown(Phase::Work, self.config.work_duration).await;
            if !last_cycle {
                self.play_cue();
            }

            sleep(self.config.inter_phase_pause).await;

            self.transition(Phase::Work, Phase::Break);
            self.countdown(Phase::Break, self.config.break_duration).await;
            if !last_cycle {
                self.play_cue();
            }
            previous = Phase::Break;
        }

        self.transition(previous, Phase::Finished);
        self.state.update(FINISHED_MESSAGE, 0);
        info!("Pomodoro run complete");
    }

    /// Publish the remaining time once per tick until `duration` has elapsed
    async fn countdown(&self, phase: Phase, duration: Duration) {
        let start = Instant::now();

        loop {
            let elapsed = start.elapsed();
            if elapsed >= duration {
                break;
            }

            let remaining = remaining_seconds(duration, elapsed);
            self.publish(phase, remaining);
            sleep(self.config.tick).await;
        }

        self.publish(phase, 0);
    }

    fn publish(&self, phase: Phase, remaining: u64) {
        let message = countdown_message(phase, self.current_session, self.config.cycle_count, remaining);
        debug!(%phase, session = self.current_session, remaining, "Tick");
        self.state.update(message, remaining);
    }

    fn transition(&self, from: Phase, to: Phase) {
        info!(%from, %to, session = self.current_session, "Phase transition");
    }

    fn play_cue(&self) {
        let volume = self.config.cue_volume;
        match self.cue.play_cue(volume) {
            Ok(()) => debug!(volume, "Cue triggered"),
            Err(e) => warn!("Failed to play cue: {}", e),
        }
    }
}

/// Whole seconds left, rounded up so a phase starts at its full length
fn remaining_seconds(duration: Duration, elapsed: Duration) -> u64 {
    let left = duration.saturating_sub(elapsed);
    left.as_secs() + u64::from(left.subsec_nanos() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AudioError, state::TimerSnapshot};
    use std::sync::Mutex;
    use tokio::sync::broadcast;

    /// Records the message on display each time a cue fires
    struct RecordingCuePlayer {
        state: Arc<TimerState>,
        cues: Mutex<Vec<(String, f32)>>,
    }

    impl RecordingCuePlayer {
        fn new(state: Arc<TimerState>) -> Arc<Self> {
            Arc::new(Self {
                state,
                cues: Mutex::new(Vec::new()),
            })
        }

        fn cues(&self) -> Vec<(String, f32)> {
            self.cues.lock().unwrap().clone()
        }
    }

    impl CuePlayer for RecordingCuePlayer {
        fn play_cue(&self, volume: f32) -> Result<(), AudioError> {
            self.cues.lock().unwrap().push((self.state.read().message, volume));
            Ok(())
        }
    }

    struct FailingCuePlayer {
        calls: Mutex<u32>,
    }

    impl CuePlayer for FailingCuePlayer {
        fn play_cue(&self, _volume: f32) -> Result<(), AudioError> {
            *self.calls.lock().unwrap() += 1;
            Err(AudioError::Disconnected)
        }
    }

    fn short_config(cycle_count: u32, work_secs: u64, break_secs: u64) -> TimerConfig {
        TimerConfig {
            cycle_count,
            work_duration: Duration::from_secs(work_secs),
            break_duration: Duration::from_secs(break_secs),
            ..TimerConfig::default()
        }
    }

    fn drain(rx: &mut broadcast::Receiver<TimerSnapshot>) -> Vec<TimerSnapshot> {
        let mut snapshots = Vec::new();
        while let Ok(snapshot) = rx.try_recv() {
            snapshots.push(snapshot);
        }
        snapshots
    }

    #[test]
    fn remaining_rounds_up_and_clamps() {
        let two = Duration::from_secs(2);
        assert_eq!(remaining_seconds(two, Duration::ZERO), 2);
        assert_eq!(remaining_seconds(two, Duration::from_millis(1)), 2);
        assert_eq!(remaining_seconds(two, Duration::from_millis(1001)), 1);
        assert_eq!(remaining_seconds(two, two), 0);
        assert_eq!(remaining_seconds(two, Duration::from_secs(5)), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn single_cycle_message_sequence() {
        let state = Arc::new(TimerState::new());
        let cue = RecordingCuePlayer::new(Arc::clone(&state));
        let mut rx = state.subscribe();
        let mut engine = TimerEngine::with_state(short_config(1, 2, 1), Arc::clone(&state), cue.clone());

        let started = Instant::now();
        engine.run().await;

        let messages: Vec<_> = drain(&mut rx).into_iter().map(|s| (s.message, s.remaining_seconds)).collect();
        let expected = [
            ("Welcome to Pomo Sessions", 0),
            ("Work Time : Session 1 of 1 - 00:02", 2),
            ("Work Time : Session 1 of 1 - 00:01", 1),
            ("Work Time : Session 1 of 1 - 00:00", 0),
            ("Break Time : Session 1 of 1 - 00:01", 1),
            ("Break Time : Session 1 of 1 - 00:00", 0),
            ("Great Job!", 0),
        ];
        let expected: Vec<_> = expected.iter().map(|(m, r)| (m.to_string(), *r)).collect();
        assert_eq!(messages, expected);

        // only the welcome cue fires in a single-cycle run
        assert_eq!(cue.cues(), vec![("Welcome to Pomo Sessions".to_string(), 1.0)]);

        // 20s welcome + 2s work + 1s pause + 1s break
        assert_eq!(started.elapsed(), Duration::from_secs(24));
        assert_eq!(engine.current_session(), 1);
        assert_eq!(state.read(), TimerSnapshot::new("Great Job!", 0));
    }

    #[tokio::test(start_paused = true)]
    async fn full_run_cues_skip_last_cycle() {
        let state = Arc::new(TimerState::new());
        let cue = RecordingCuePlayer::new(Arc::clone(&state));
        let config = short_config(4, 3, 2).with_cue_volume(0.5);
        let mut engine = TimerEngine::with_state(config, Arc::clone(&state), cue.clone());

        engine.run().await;

        let cues = cue.cues();
        assert_eq!(cues.len() as u32, engine.config().expected_cues());
        assert_eq!(cues.len(), 7);
        assert!(cues.iter().all(|(_, volume)| *volume == 0.5));

        let at: Vec<_> = cues.into_iter().map(|(message, _)| message).collect();
        assert_eq!(
            at,
            vec![
                "Welcome to Pomo Sessions",
                "Work Time : Session 1 of 4 - 00:00",
                "Break Time : Session 1 of 4 - 00:00",
                "Work Time : Session 2 of 4 - 00:00",
                "Break Time : Session 2 of 4 - 00:00",
                "Work Time : Session 3 of 4 - 00:00",
                "Break Time : Session 3 of 4 - 00:00",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn countdowns_are_monotonic_and_sessions_follow_cycles() {
        let state = Arc::new(TimerState::new());
        let cue = RecordingCuePlayer::new(Arc::clone(&state));
        let mut rx = state.subscribe();
        let mut engine = TimerEngine::with_state(short_config(3, 4, 2), Arc::clone(&state), cue);

        engine.run().await;
        let snapshots = drain(&mut rx);

        for session in 1..=3u32 {
            for (label, duration) in [("Work Time", 4u64), ("Break Time", 2u64)] {
                let prefix = format!("{} : Session {} of 3 - ", label, session);
                let remaining: Vec<u64> = snapshots
                    .iter()
                    .filter(|s| s.message.starts_with(&prefix))
                    .map(|s| s.remaining_seconds)
                    .collect();

                assert_eq!(remaining.first(), Some(&duration), "{prefix}");
                assert_eq!(remaining.last(), Some(&0), "{prefix}");
                assert!(remaining.windows(2).all(|w| w[0] >= w[1]), "{prefix}: {remaining:?}");
            }
        }

        // sessions appear in order and never go backwards
        let sessions: Vec<u32> = snapshots
            .iter()
            .filter_map(|s| s.message.split("Session ").nth(1))
            .filter_map(|rest| rest.split(' ').next())
            .map(|n| n.parse().unwrap())
            .collect();
        assert!(sessions.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(sessions.first(), Some(&1));
        assert_eq!(sessions.last(), Some(&3));
        assert_eq!(engine.current_session(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_ends_on_elapsed_time_not_tick_count() {
        let config = TimerConfig {
            cycle_count: 1,
            work_duration: Duration::from_secs(2),
            break_duration: Duration::from_secs(1),
            welcome_pause: Duration::ZERO,
            inter_phase_pause: Duration::ZERO,
            tick: Duration::from_millis(700),
            ..TimerConfig::default()
        };
        let state = Arc::new(TimerState::new());
        let cue = RecordingCuePlayer::new(Arc::clone(&state));
        let mut rx = state.subscribe();
        let mut engine = TimerEngine::with_state(config, Arc::clone(&state), cue);

        let started = Instant::now();
        engine.run().await;
        let snapshots = drain(&mut rx);

        let remaining_for = |label: &str| -> Vec<u64> {
            snapshots
                .iter()
                .filter(|s| s.message.starts_with(label))
                .map(|s| s.remaining_seconds)
                .collect()
        };

        // ticks at 0, 0.7, 1.4 then stop at 2.1 > 2s
        assert_eq!(remaining_for("Work Time"), vec![2, 2, 1, 0]);
        // break starts at 2.1, ticks at 2.1, 2.8 then stops at 3.5
        assert_eq!(remaining_for("Break Time"), vec![1, 1, 0]);
        assert_eq!(snapshots.last(), Some(&TimerSnapshot::new("Great Job!", 0)));
        assert_eq!(started.elapsed(), Duration::from_millis(3500));
    }

    #[tokio::test(start_paused = true)]
    async fn failing_cues_do_not_stop_the_run() {
        let cue = Arc::new(FailingCuePlayer { calls: Mutex::new(0) });
        let mut engine = TimerEngine::new(short_config(2, 1, 1), cue.clone());
        let state = engine.state();

        engine.run().await;

        assert_eq!(*cue.calls.lock().unwrap(), 3);
        assert_eq!(state.read(), TimerSnapshot::new("Great Job!", 0));
    }

    #[tokio::test(start_paused = true)]
    async fn state_is_empty_until_run_starts() {
        let state = Arc::new(TimerState::new());
        let cue = RecordingCuePlayer::new(Arc::clone(&state));
        let engine = TimerEngine::with_state(TimerConfig::default(), Arc::clone(&state), cue);

        assert_eq!(engine.current_session(), 0);
        assert_eq!(engine.state().read(), TimerSnapshot::default());
    }

    #[test]
    fn spawned_engine_runs_to_completion() {
        let config = TimerConfig {
            cycle_count: 2,
            work_duration: Duration::from_millis(20),
            break_duration: Duration::from_millis(10),
            welcome_pause: Duration::ZERO,
            inter_phase_pause: Duration::ZERO,
            tick: Duration::from_millis(5),
            ..TimerConfig::default()
        };
        let state = Arc::new(TimerState::new());
        let cue = RecordingCuePlayer::new(Arc::clone(&state));
        let engine = TimerEngine::with_state(config, Arc::clone(&state), cue.clone());

        let handle = engine.spawn().unwrap();
        assert_eq!(handle.thread().name(), Some("pomodoro-timer"));
        handle.join().unwrap();

        assert_eq!(state.read(), TimerSnapshot::new("Great Job!", 0));
        assert_eq!(cue.cues().len(), 3);
    }
}
