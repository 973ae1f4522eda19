//! company_postings_server - REST server for freight postings.
//!
//! Reads config from env vars (see `company_postings::config`), optionally
//! from a `.env` file.

use std::sync::Arc;

use anyhow::Context;
use company_postings::{
    api::build_router, HttpPostingSource, InMemoryCompanyDirectory, InMemoryPostingSource,
    PostingService, PostingSource, ServerConfig, SourceKind,
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "company_postings=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().context("invalid configuration")?;

    // Company directory is built once and shared read-only.
    let companies = Arc::new(InMemoryCompanyDirectory::seeded());
    tracing::info!("Company directory loaded ({} companies)", companies.len());

    let postings: Arc<dyn PostingSource> = match config.source {
        SourceKind::Http => {
            tracing::info!("Using posting API at {}", config.posting_api_url);
            Arc::new(
                HttpPostingSource::new(&config.posting_api_url, config.posting_api_timeout)
                    .context("failed to build posting API client")?,
            )
        }
        SourceKind::Memory => {
            tracing::warn!("Using in-memory posting source; postings are lost on restart");
            Arc::new(InMemoryPostingSource::default())
        }
    };

    let service = Arc::new(PostingService::new(companies, postings));
    let app = build_router(service);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind to {bind_addr}"))?;
    tracing::info!("company_postings_server listening on {bind_addr}");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
