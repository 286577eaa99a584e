mod config;
mod routes;
mod services;
mod state;

use std::process::ExitCode;

use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let level = if config.debug_mode { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    if config.api_key.is_none() {
        tracing::warn!("API_KEY not set; /webhook will answer 503");
    }
    tracing::info!(
        host = %config.host,
        port = config.port,
        api_key = config.redacted_api_key(),
        debug_mode = config.debug_mode,
        static_dir = %config.static_dir.display(),
        lean_check_delay_ms = u64::try_from(config.lean_check_delay.as_millis()).unwrap_or(u64::MAX),
        "configuration loaded"
    );

    let addr = config.bind_addr();
    let app = routes::app(state::AppState::new(config));
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(%addr, "orchestrator listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
