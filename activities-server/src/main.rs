use std::sync::Arc;

use activities_server::{config::Config, errors::ServerResult, run, AppState};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ServerResult<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("activities_server=debug,tower_http=debug")),
        )
        .init();

    if config.banner {
        use colored::*;
        tracing::info!("{}", "🎓 Mergington Activities Server".bold().cyan());
        tracing::info!("{}", "==============================".cyan());
    }

    let state = Arc::new(AppState::seeded());
    tracing::info!(
        activities = state.registry.len(),
        static_dir = %config.static_dir.display(),
        "Loaded activity catalogue"
    );

    run(&config, state).await
}
