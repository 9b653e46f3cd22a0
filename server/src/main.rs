#![recursion_limit = "256"]

mod config;
mod routes;
mod state;

use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] config::LoadError),
    #[error("listener: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "triage server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let server = config::ServerConfig::from_env();
    let dashboard = config::load_variant(&server, |key| std::env::var(key).ok())?;
    tracing::info!(
        variant = %dashboard.variant,
        project = %dashboard.backend.project_id,
        collection = %dashboard.backend.collection,
        "dashboard variant loaded"
    );

    let app = routes::app(state::AppState::new(dashboard));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", server.port)).await?;

    tracing::info!(port = server.port, "triage listening");
    axum::serve(listener, app).await?;
    Ok(())
}
