//! Posting source: the upstream store that owns posting records.
//!
//! `HttpPostingSource` talks to the external posting API; `InMemoryPostingSource`
//! keeps postings in process for local runs and tests.

use std::time::Duration;

use async_trait::async_trait;
use posting_types::{NewPosting, Posting};
use tokio::sync::RwLock;

use crate::error::SourceError;

pub type Result<T> = std::result::Result<T, SourceError>;

/// Port to the store that owns postings.
#[async_trait]
pub trait PostingSource: Send + Sync {
    /// Full, unfiltered collection in source order.
    async fn list_all(&self) -> Result<Vec<Posting>>;

    /// Persist a new posting; the source assigns the id.
    async fn create(&self, posting: NewPosting) -> Result<Posting>;
}

// ============================================================================
// Production Implementation using reqwest
// ============================================================================

/// Client for the upstream posting API.
///
/// `GET {base_url}` lists postings, `POST {base_url}` creates one.
#[derive(Clone)]
pub struct HttpPostingSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPostingSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| SourceError::Decode(e.to_string()))
    }
}

#[async_trait]
impl PostingSource for HttpPostingSource {
    #[tracing::instrument(skip(self), fields(url = %self.base_url))]
    async fn list_all(&self) -> Result<Vec<Posting>> {
        let response = self.client.get(&self.base_url).send().await.map_err(|e| {
            tracing::error!(error = %e, "Posting API list request failed");
            e
        })?;

        let postings: Vec<Posting> = Self::read_json(response).await?;
        tracing::debug!(count = postings.len(), "Fetched postings");
        Ok(postings)
    }

    #[tracing::instrument(skip(self, posting), fields(url = %self.base_url, company_id = %posting.company_id))]
    async fn create(&self, posting: NewPosting) -> Result<Posting> {
        let response = self
            .client
            .post(&self.base_url)
            .json(&posting)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Posting API create request failed");
                e
            })?;

        let created: Posting = Self::read_json(response).await?;
        tracing::info!(posting_id = %created.id, "Posting created upstream");
        Ok(created)
    }
}

// ============================================================================
// In-process implementation
// ============================================================================

/// Postings held in memory, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryPostingSource {
    postings: RwLock<Vec<Posting>>,
}

impl InMemoryPostingSource {
    pub fn new(postings: Vec<Posting>) -> Self {
        Self {
            postings: RwLock::new(postings),
        }
    }
}

#[async_trait]
impl PostingSource for InMemoryPostingSource {
    async fn list_all(&self) -> Result<Vec<Posting>> {
        Ok(self.postings.read().await.clone())
    }

    async fn create(&self, posting: NewPosting) -> Result<Posting> {
        let created = posting.with_id(uuid::Uuid::new_v4().to_string());
        self.postings.write().await.push(created.clone());
        Ok(created)
    }
}
