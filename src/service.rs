//! PostingService - the query and creation pipelines.
//!
//! Takes its collaborators via `Arc<dyn Port>` so the same logic runs against
//! the upstream HTTP API or in-memory test doubles. Holds no mutable state of
//! its own; every call is independent.

use std::collections::BTreeSet;
use std::sync::Arc;

use posting_types::{EnrichedPosting, PagedResult, PostingResponse};

use crate::{
    directory::CompanyDirectory,
    error::{PostingError, Result},
    pagination::page_window,
    source::PostingSource,
    validation::{validate_create, PostingFilter},
};

pub struct PostingService {
    companies: Arc<dyn CompanyDirectory>,
    postings: Arc<dyn PostingSource>,
}

impl PostingService {
    pub fn new(companies: Arc<dyn CompanyDirectory>, postings: Arc<dyn PostingSource>) -> Self {
        Self {
            companies,
            postings,
        }
    }

    /// Filter, paginate and enrich postings.
    ///
    /// Only the companies referenced by the returned page are resolved; any
    /// unknown company fails the whole query.
    #[tracing::instrument(skip(self), fields(page = filter.page, limit = filter.limit))]
    pub async fn query(&self, filter: &PostingFilter) -> Result<PagedResult<EnrichedPosting>> {
        let postings = self.postings.list_all().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch postings");
            PostingError::from(e)
        })?;

        let filtered: Vec<_> = postings.into_iter().filter(|p| filter.matches(p)).collect();
        let total = filtered.len();
        let page = &filtered[page_window(total, filter.page, filter.limit)];

        let company_ids: BTreeSet<String> = page.iter().map(|p| p.company_id.clone()).collect();
        let companies = self
            .companies
            .lookup_many(&company_ids)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Unresolvable company in result page");
                PostingError::from(e)
            })?;

        let data = page
            .iter()
            .map(|posting| {
                let company = companies.get(&posting.company_id).ok_or_else(|| {
                    PostingError::CompanyNotFound(vec![posting.company_id.clone()])
                })?;
                Ok(EnrichedPosting::new(posting, company.name.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(total, returned = data.len(), "Posting query complete");

        Ok(PagedResult {
            data,
            total,
            page: filter.page,
            limit: filter.limit,
        })
    }

    /// Validate, check the company exists, then create upstream.
    ///
    /// The company lookup always precedes the write, so an unknown company
    /// never reaches the posting source.
    #[tracing::instrument(skip_all)]
    pub async fn create(&self, body: &serde_json::Value) -> Result<PostingResponse> {
        let input = validate_create(body)?;

        let company = self
            .companies
            .lookup(&input.company_id)
            .await
            .map_err(|e| {
                tracing::warn!(company_id = %input.company_id, "Rejecting posting for unknown company");
                PostingError::from(e)
            })?;

        let created = self.postings.create(input).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to create posting");
            PostingError::from(e)
        })?;

        tracing::info!(posting_id = %created.id, company_id = %company.id, "Posting created");

        Ok(PostingResponse {
            company_name: company.name,
            freight: created.freight.summary(),
        })
    }
}
