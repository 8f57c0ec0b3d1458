use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_app::config::AppConfig;
use portfolio_app::repos::GitHubClient;
use portfolio_app::server::{self, AppState};
use portfolio_app::content;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_app=info,portfolio_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🚀 Portfolio server");

    let config = AppConfig::load()?;
    let addr = config.socket_addr()?;

    if config.resume_path().exists() {
        tracing::info!("✅ Serving resume from {}", config.resume_path().display());
    } else {
        tracing::warn!("⚠️  No resume at {}, /resume.pdf will return 404", config.resume_path().display());
    }

    // Step 1: Build the search index
    let index = content::build_index()?;

    // Step 2: GitHub client for the portfolio tab
    let github = GitHubClient::new(&config.github_api_base, config.request_timeout())?;
    tracing::info!("📁 Listing repositories of {}", config.github_user);

    // Step 3: Start server
    let state = AppState::new(index, config, Arc::new(github));

    tracing::info!("✨ Ready! Open http://{} in your browser", addr);
    tracing::info!("Press Ctrl+C to stop");

    server::serve(addr, state).await?;

    Ok(())
}
