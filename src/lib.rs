//! Company Postings - freight posting query and creation service
//!
//! Lists freight postings from an upstream posting API with exact-match
//! filters and pagination, enriching each row with the company name from the
//! company directory, and creates postings for known companies.
//!
//! ## Call chain
//!
//! ```text
//! query params -> validation::parse_filter -> PostingService::query
//!     (fetch all -> filter -> page window -> resolve page companies -> enrich)
//! JSON body    -> PostingService::create
//!     (validate -> company lookup -> upstream create -> enrich)
//! ```
//!
//! Failures surface as `PostingError` and are turned into client-facing
//! `ApiError`s by `ApiError::classify`.

// Core error handling
pub mod error;

// Input validation and paging
pub mod pagination;
pub mod validation;

// Collaborators
pub mod directory;
pub mod source;

// Query and creation pipelines
pub mod service;

pub mod config;

// REST API (when enabled)
#[cfg(feature = "server")]
pub mod api;

pub use config::{ServerConfig, SourceKind};
pub use directory::{CompanyDirectory, InMemoryCompanyDirectory};
pub use error::{ApiError, Operation, PostingError, Result};
pub use service::PostingService;
pub use source::{HttpPostingSource, InMemoryPostingSource, PostingSource};
pub use validation::{parse_filter, validate_create, PostingFilter};
