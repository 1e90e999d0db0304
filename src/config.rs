//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

/// CLI argument parsing structure
///
/// Phase durations and the cycle count are deliberately absent; they are
/// fixed in [`crate::TimerConfig`].
#[derive(Debug, Parser)]
#[command(name = "pomo-timer")]
#[command(about = "A Pomodoro work/break interval timer with a web display")]
#[command(after_help = "A bell sound file (WAV, OGG or MP3) must exist at --bell, or pass --mute to run without audio.")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "5000")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Bell sound played at phase boundaries (WAV, OGG or MP3; not bundled)
    #[arg(short, long, default_value = "bell.wav")]
    pub bell: PathBuf,

    /// Bell volume, nominally 0.0 to 1.0
    #[arg(long, default_value = "1.0")]
    pub volume: f32,

    /// Run without initializing audio output
    #[arg(long)]
    pub mute: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
