//! Company posting API endpoints
//!
//! ## Endpoints
//!
//! - `GET /company-postings` - filtered, paginated listing
//! - `POST /company-postings` - create a posting for an existing company

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use posting_types::{EnrichedPosting, PagedResult, PostingResponse};

use crate::error::{ApiError, Operation, PostingError, ValidationErrors};
use crate::service::PostingService;
use crate::validation::parse_filter;

// ============================================================================
// Handlers
// ============================================================================

/// GET /company-postings
///
/// ## Query Parameters
///
/// - `companyId`, `equipmentType`, `fullPartial`, `lengthFeet`, `weightPounds`
///   (optional): exact-match filters
/// - `page` (optional): 1-based page, default 1
/// - `limit` (optional): page size, default 100, max 1000
///
/// Any other parameter is rejected with 400.
///
/// ## Example
///
/// ```text
/// GET /company-postings?equipmentType=Van&page=1&limit=10
/// ```
pub async fn list_postings(
    Extension(service): Extension<Arc<PostingService>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<PagedResult<EnrichedPosting>>, ApiError> {
    let Query(params) = query.map_err(|rejection| {
        ApiError::classify(
            Operation::Query,
            &PostingError::Validation(ValidationErrors::single(
                "query",
                rejection.body_text(),
            )),
        )
    })?;

    let filter = parse_filter(params).map_err(|errors| {
        tracing::debug!(%errors, "Rejected posting query");
        ApiError::classify(Operation::Query, &PostingError::Validation(errors))
    })?;

    let result = service
        .query(&filter)
        .await
        .map_err(|e| ApiError::classify(Operation::Query, &e))?;

    Ok(Json(result))
}

/// POST /company-postings
///
/// Body: `{companyId, freight: {equipmentType, fullPartial, weightPounds, lengthFeet?, comments?}}`.
/// Responds 201 with the created posting's company name and freight.
pub async fn create_posting(
    Extension(service): Extension<Arc<PostingService>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<(StatusCode, Json<PostingResponse>), ApiError> {
    let Json(body) = body.map_err(|rejection| {
        ApiError::classify(
            Operation::Create,
            &PostingError::Validation(ValidationErrors::single(
                "body",
                rejection.body_text(),
            )),
        )
    })?;

    let created = service
        .create(&body)
        .await
        .map_err(|e| ApiError::classify(Operation::Create, &e))?;

    Ok((StatusCode::CREATED, Json(created)))
}

// ============================================================================
// Router
// ============================================================================

/// Create router for posting endpoints
pub fn create_posting_router(service: Arc<PostingService>) -> Router {
    Router::new()
        .route("/company-postings", get(list_postings).post(create_posting))
        .layer(Extension(service))
}
