use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use course_backend::api::router;
use course_backend::config::{Config, DEFAULT_LOG_FILTER};
use course_backend::db;
use course_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::new_from_env();

    // Log with the default filter when the configuration itself is broken
    let log_filter = config
        .as_ref()
        .map(|c| c.log_filter.as_str())
        .unwrap_or(DEFAULT_LOG_FILTER);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config.inspect_err(|e| error!("failed to load configuration: {}", e))?;

    let pool = db::connect(&config.database_url, config.max_connections).await?;

    let state = AppState::new(pool, &config.jwt_secret);

    let app = router(state);

    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
