//! Shared API Types for company postings
//!
//! This crate is the SINGLE SOURCE OF TRUTH for all types crossing HTTP boundaries.
//!
//! ## Boundaries
//!
//! ```text
//! ┌──────────────────┐  JSON   ┌──────────────────────┐  JSON   ┌──────────────┐
//! │  Upstream        │ ◄─────► │  company-postings    │ ◄─────► │  API client  │
//! │  Posting API     │         │  (Axum)              │         │              │
//! └──────────────────┘         └──────────────────────┘         └──────────────┘
//! ```
//!
//! ## Rules
//!
//! 1. All API types live here - no inline struct definitions in handlers
//! 2. camelCase on the wire, optional fields omitted when absent

use serde::{Deserialize, Serialize};

// ============================================================================
// COMPANIES
// ============================================================================

/// A shipping company known to the company directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
}

impl Company {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

// ============================================================================
// POSTINGS (upstream shape)
// ============================================================================

/// Free-text comment attached to a freight load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreightComment {
    pub comment: String,
}

/// Physical shipment attributes of a posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Freight {
    pub equipment_type: String,
    pub full_partial: String,
    pub weight_pounds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_feet: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<FreightComment>>,
}

impl Freight {
    /// Drop comments for client-facing responses.
    pub fn summary(&self) -> FreightSummary {
        FreightSummary {
            weight_pounds: self.weight_pounds,
            equipment_type: self.equipment_type.clone(),
            full_partial: self.full_partial.clone(),
            length_feet: self.length_feet,
        }
    }
}

/// A freight load offered by a company, as stored by the upstream posting API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Posting {
    pub id: String,
    pub company_id: String,
    pub freight: Freight,
}

/// Creation payload sent upstream; the upstream assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPosting {
    pub company_id: String,
    pub freight: Freight,
}

impl NewPosting {
    pub fn with_id(self, id: impl Into<String>) -> Posting {
        Posting {
            id: id.into(),
            company_id: self.company_id,
            freight: self.freight,
        }
    }
}

// ============================================================================
// CLIENT RESPONSES
// ============================================================================

/// Freight as returned to API clients (comments are not exposed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreightSummary {
    pub weight_pounds: f64,
    pub equipment_type: String,
    pub full_partial: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_feet: Option<f64>,
}

/// Result of creating a posting: the company id replaced by its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostingResponse {
    pub company_name: String,
    pub freight: FreightSummary,
}

/// One row of a posting listing, enriched with the resolved company name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPosting {
    pub id: String,
    pub company_id: String,
    pub company_name: String,
    pub freight: FreightSummary,
}

impl EnrichedPosting {
    pub fn new(posting: &Posting, company_name: impl Into<String>) -> Self {
        Self {
            id: posting.id.clone(),
            company_id: posting.company_id.clone(),
            company_name: company_name.into(),
            freight: posting.freight.summary(),
        }
    }
}

/// Envelope for a single page of results.
///
/// `total` counts every row that matched the filter, not just this page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub limit: u32,
}

// ============================================================================
// Tests
// ============================================================================
