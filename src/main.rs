//! Pomo Timer - A Pomodoro work/break interval timer
//!
//! This is the main entry point for the pomo-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomo_timer::{
    api::create_router,
    config::Config,
    services::{CuePlayer, RodioCuePlayer, SilentCuePlayer},
    state::AppState,
    timer::{TimerConfig, TimerEngine},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomo_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomo-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, bell={}, volume={}, mute={}",
          config.host, config.port, config.bell.display(), config.volume, config.mute);

    // The timer is pointless without its bell, so audio failures stop startup
    let cue: Arc<dyn CuePlayer> = if config.mute {
        Arc::new(SilentCuePlayer)
    } else {
        match RodioCuePlayer::new(&config.bell) {
            Ok(player) => Arc::new(player),
            Err(e) => {
                tracing::error!("{}", e);
                std::process::exit(1);
            }
        }
    };

    // Start the timer engine on its own thread
    let engine = TimerEngine::new(TimerConfig::default().with_cue_volume(config.volume), cue);
    let schedule = engine.config();
    info!("Schedule: {} cycles, work={}s, break={}s",
          schedule.cycle_count, schedule.work_duration.as_secs(), schedule.break_duration.as_secs());
    let state = Arc::new(AppState::new(config.port, config.host.clone(), engine.state()));
    engine.spawn()?;

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /        - Timer display page");
    info!("  GET  /status  - Current timer snapshot");
    info!("  GET  /events  - Snapshot stream (server-sent events)");
    info!("  GET  /health  - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
