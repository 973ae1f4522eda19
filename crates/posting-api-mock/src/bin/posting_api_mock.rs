//! posting_api_mock - runs the mock upstream posting API.
//!
//! Reads config from env vars:
//!   MOCK_POSTING_API_HOST - listen host (default: 127.0.0.1)
//!   MOCK_POSTING_API_PORT - listen port (default: 3000)

use posting_api_mock::{MockPostingApiConfig, MockPostingApiServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "posting_api_mock=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = MockPostingApiConfig::from_env()?;
    MockPostingApiServer::new(config).start().await
}
