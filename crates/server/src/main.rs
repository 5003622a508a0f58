use std::process::ExitCode;
use std::sync::Arc;

use server::config::Settings;
use server::db::{self, AppState};
use server::repo::PgStore;

#[tokio::main]
async fn main() -> ExitCode {
    server::telemetry::init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "wash-server exited with an error");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    tracing::info!(?settings, "configuration loaded");

    let pool = db::create_pool(&settings)?;
    db::run_migrations(&pool).await?;
    server::health::record_start_time();

    let bind_addr = settings.bind_addr;
    let state = AppState::new(Arc::new(PgStore::new(pool)), settings);
    let app = server::app(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!(%bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
