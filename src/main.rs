//! Lift Off - a ten second launch countdown served over HTTP
//!
//! This is the main entry point for the lift-off application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use lift_off::{
    api::create_router,
    config::Config,
    state::{AppState, CountdownController, CountdownDisplay},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("lift_off={},tower_http=info", config.log_level()))
        .init();

    let countdown_config = config.countdown_config()?;

    info!("Starting lift-off server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, duration={}s, tick={}ms",
          config.host, config.port, config.duration, config.tick_interval_ms);

    let controller = CountdownController::new(countdown_config);
    let state = Arc::new(AppState::new(controller.clone(), config.port, config.host.clone()));

    // Observe the countdown and log what the screen would show
    let mut countdown_rx = controller.subscribe();
    let total_seconds = countdown_config.total_seconds();
    tokio::spawn(async move {
        while countdown_rx.changed().await.is_ok() {
            let countdown = *countdown_rx.borrow_and_update();
            info!("{}", CountdownDisplay::new(&countdown, total_seconds).headline());
        }
    });

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start  - Start the launch sequence");
    info!("  GET  /status - Current countdown and display");
    info!("  GET  /events - Server-sent countdown updates");
    info!("  GET  /health - Health check");

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

    controller.shutdown();
    info!("Server shutdown complete");
    Ok(())
}
