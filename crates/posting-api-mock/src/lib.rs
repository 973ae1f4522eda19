//! Mock upstream Posting API
//!
//! Stands in for the external posting API that `company-postings` reads from
//! and writes to. Postings live in memory, seeded with a small fixed set, so
//! the service can be run and tested without the real upstream.
//!
//! ## Endpoints
//!
//! - `GET /` - every stored posting, insertion order
//! - `POST /` - store a posting and return it with an assigned id
//! - `GET /health`

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use posting_types::{Freight, FreightComment, NewPosting, Posting};
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Mock posting API server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockPostingApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for MockPostingApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl MockPostingApiConfig {
    /// `MOCK_POSTING_API_HOST` / `MOCK_POSTING_API_PORT`, falling back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        let port = match std::env::var("MOCK_POSTING_API_PORT") {
            Ok(v) => v.parse::<u16>().map_err(|_| {
                anyhow::anyhow!("MOCK_POSTING_API_PORT must be a port number, got '{v}'")
            })?,
            Err(_) => defaults.port,
        };
        Ok(Self {
            host: std::env::var("MOCK_POSTING_API_HOST").unwrap_or(defaults.host),
            port,
        })
    }
}

/// Shared posting store
#[derive(Clone, Default)]
pub struct MockAppState {
    pub postings: Arc<RwLock<Vec<Posting>>>,
}

impl MockAppState {
    pub fn new(postings: Vec<Posting>) -> Self {
        Self {
            postings: Arc::new(RwLock::new(postings)),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_postings())
    }
}

pub struct MockPostingApiServer {
    config: MockPostingApiConfig,
    app_state: MockAppState,
}

impl MockPostingApiServer {
    pub fn new(config: MockPostingApiConfig) -> Self {
        Self {
            config,
            app_state: MockAppState::seeded(),
        }
    }

    /// Start the mock posting API server
    pub async fn start(self) -> anyhow::Result<()> {
        let app = create_router(self.app_state.clone());
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!("Starting mock posting API on {}", addr);
        info!(
            "Serving {} seeded postings",
            self.app_state.postings.read().await.len()
        );

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Create the router with all endpoints
pub fn create_router(state: MockAppState) -> Router {
    Router::new()
        .route("/", get(list_postings).post(create_posting))
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any)),
        )
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn list_postings(State(state): State<MockAppState>) -> Json<Vec<Posting>> {
    let postings = state.postings.read().await.clone();
    info!("Mock API: listing {} postings", postings.len());
    Json(postings)
}

async fn create_posting(
    State(state): State<MockAppState>,
    Json(new_posting): Json<NewPosting>,
) -> (StatusCode, Json<Posting>) {
    let posting = new_posting.with_id(uuid::Uuid::new_v4().to_string());
    info!(
        "Mock API: created posting {} for company {}",
        posting.id, posting.company_id
    );
    state.postings.write().await.push(posting.clone());
    (StatusCode::CREATED, Json(posting))
}

fn freight(
    equipment_type: &str,
    full_partial: &str,
    weight_pounds: f64,
    length_feet: Option<f64>,
    comments: &[&str],
) -> Freight {
    Freight {
        equipment_type: equipment_type.to_string(),
        full_partial: full_partial.to_string(),
        weight_pounds,
        length_feet,
        comments: (!comments.is_empty()).then(|| {
            comments
                .iter()
                .map(|c| FreightComment {
                    comment: c.to_string(),
                })
                .collect()
        }),
    }
}

/// Fixed starting data; every `companyId` exists in the seeded company directory.
pub fn seed_postings() -> Vec<Posting> {
    let rows = [
        ("1", freight("Van", "Full", 42000.0, Some(53.0), &["Dock appointment required"])),
        ("1", freight("Reefer", "Full", 38000.0, Some(53.0), &["Keep at 34F"])),
        ("2", freight("Flatbed", "Partial", 12000.0, Some(24.0), &[])),
        ("3", freight("Van", "Partial", 8000.0, None, &[])),
        ("5", freight("Reefer", "Partial", 15000.0, Some(48.0), &["Produce", "No stacking"])),
        ("8", freight("Step Deck", "Full", 45000.0, Some(48.0), &[])),
        ("13", freight("Van", "Full", 30000.0, Some(53.0), &[])),
        ("21", freight("Flatbed", "Full", 47000.0, Some(48.0), &["Tarps needed"])),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(i, (company_id, freight))| Posting {
            id: format!("seed-{}", i + 1),
            company_id: company_id.to_string(),
            freight,
        })
        .collect()
}
