//! Company directory: resolves company ids to company records.
//!
//! The directory is built once at startup and shared read-only (`Arc`) by
//! every request; nothing in the pipeline mutates it.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use posting_types::Company;

use crate::error::DirectoryError;

pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Lookup port for company records.
#[async_trait]
pub trait CompanyDirectory: Send + Sync {
    /// Resolve a single company.
    async fn lookup(&self, id: &str) -> Result<Company>;

    /// Resolve every id in `ids`. Fails with all unknown ids if any is missing.
    async fn lookup_many(&self, ids: &BTreeSet<String>) -> Result<HashMap<String, Company>>;
}

/// Seed data carried over from the original company database.
const SEED_COMPANIES: [(&str, &str); 29] = [
    ("1", "ACCELERATE SHIPPING"),
    ("2", "BARTER SHIPPING"),
    ("3", "BLINK SHIPPING"),
    ("4", "COMMAND SHIPPING"),
    ("5", "CORE SHIPPING"),
    ("6", "EXPERT SHIPPING"),
    ("7", "EXPRESS SHIPPING"),
    ("8", "FINEST SHIPPING"),
    ("9", "KART SHIPPING"),
    ("10", "LIFT SHIPPING"),
    ("11", "LIMITLESS SHIPPING"),
    ("12", "MEASURED SHIPPING"),
    ("13", "OPTIMUM SHIPPING"),
    ("14", "PROGRESS SHIPPING"),
    ("15", "PROPEL SHIPPING"),
    ("16", "RELY SHIPPING"),
    ("17", "RUSH SHIPPING"),
    ("18", "SECURE SHIPPING"),
    ("19", "SHEER SHIPPING"),
    ("20", "SHIPPINGADORA"),
    ("21", "SHIPPINGADRI"),
    ("22", "SHIPPINGLUX"),
    ("23", "SUPREME SHIPPING"),
    ("24", "TRUE SHIPPING"),
    ("25", "TOTAL SHIPPING"),
    ("26", "TRIUMPH SHIPPING"),
    ("27", "TURBO SHIPPING"),
    ("28", "UNLEASH SHIPPING"),
    ("29", "VANGUARD SHIPPING"),
];

/// In-memory directory keyed by company id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCompanyDirectory {
    companies: HashMap<String, Company>,
}

impl InMemoryCompanyDirectory {
    /// Build from an explicit list; later duplicates replace earlier ones.
    pub fn new(companies: impl IntoIterator<Item = Company>) -> Self {
        Self {
            companies: companies.into_iter().map(|c| (c.id.clone(), c)).collect(),
        }
    }

    /// The 29 shipping companies the service ships with.
    pub fn seeded() -> Self {
        Self::new(
            SEED_COMPANIES
                .iter()
                .map(|(id, name)| Company::new(*id, *name)),
        )
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}

#[async_trait]
impl CompanyDirectory for InMemoryCompanyDirectory {
    async fn lookup(&self, id: &str) -> Result<Company> {
        self.companies
            .get(id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(vec![id.to_string()]))
    }

    async fn lookup_many(&self, ids: &BTreeSet<String>) -> Result<HashMap<String, Company>> {
        let mut found = HashMap::with_capacity(ids.len());
        let mut missing = Vec::new();

        for id in ids {
            match self.companies.get(id) {
                Some(company) => {
                    found.insert(id.clone(), company.clone());
                }
                None => missing.push(id.clone()),
            }
        }

        if missing.is_empty() {
            Ok(found)
        } else {
            Err(DirectoryError::NotFound(missing))
        }
    }
}
