//! Shared fixtures for the HTTP integration tests.

#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use company_postings::{
    api::build_router,
    directory,
    error::SourceError,
    source, CompanyDirectory, InMemoryCompanyDirectory, InMemoryPostingSource, PostingService,
    PostingSource,
};
use http_body_util::BodyExt;
use hyper::Request;
use posting_types::{Company, Freight, FreightComment, NewPosting, Posting};

// ── Fixtures ───────────────────────────────────────────────────

pub fn freight(equipment_type: &str, full_partial: &str, weight: f64, length: Option<f64>) -> Freight {
    Freight {
        equipment_type: equipment_type.into(),
        full_partial: full_partial.into(),
        weight_pounds: weight,
        length_feet: length,
        comments: None,
    }
}

pub fn posting(id: &str, company_id: &str, freight: Freight) -> Posting {
    Posting {
        id: id.into(),
        company_id: company_id.into(),
        freight,
    }
}

pub fn companies() -> Vec<Company> {
    vec![
        Company::new("1", "Acme"),
        Company::new("2", "Globex"),
        Company::new("3", "Initech"),
    ]
}

/// Five postings over three companies; `p4` has no length.
pub fn postings() -> Vec<Posting> {
    let mut commented = freight("Van", "Full", 1000.0, Some(53.0));
    commented.comments = Some(vec![FreightComment {
        comment: "Liftgate".into(),
    }]);
    vec![
        posting("p1", "1", commented),
        posting("p2", "2", freight("Reefer", "Full", 2000.0, Some(48.0))),
        posting("p3", "1", freight("Van", "Partial", 500.0, Some(24.0))),
        posting("p4", "3", freight("Flatbed", "Full", 3000.0, None)),
        posting("p5", "2", freight("Van", "Full", 1000.0, Some(53.0))),
    ]
}

pub fn create_body(company_id: &str) -> serde_json::Value {
    serde_json::json!({
        "companyId": company_id,
        "freight": {
            "equipmentType": "Van",
            "fullPartial": "Full",
            "weightPounds": 1000,
            "lengthFeet": 53,
            "comments": [{ "comment": "Fragile" }]
        }
    })
}

// ── Counting doubles ───────────────────────────────────────────

/// In-memory posting source that records calls and can be told to fail.
pub struct CountingPostingSource {
    inner: InMemoryPostingSource,
    fail: bool,
    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
}

impl CountingPostingSource {
    pub fn new(postings: Vec<Posting>) -> Self {
        Self {
            inner: InMemoryPostingSource::new(postings),
            fail: false,
            list_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn calls(&self) -> (usize, usize) {
        (
            self.list_calls.load(Ordering::SeqCst),
            self.create_calls.load(Ordering::SeqCst),
        )
    }

    fn unavailable() -> SourceError {
        SourceError::Status {
            status: 503,
            body: "upstream unavailable".into(),
        }
    }
}

#[async_trait]
impl PostingSource for CountingPostingSource {
    async fn list_all(&self) -> source::Result<Vec<Posting>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Self::unavailable());
        }
        self.inner.list_all().await
    }

    async fn create(&self, posting: NewPosting) -> source::Result<Posting> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Self::unavailable());
        }
        self.inner.create(posting).await
    }
}

/// Company directory that records how often it was consulted.
pub struct CountingDirectory {
    inner: InMemoryCompanyDirectory,
    pub lookups: AtomicUsize,
}

impl CountingDirectory {
    pub fn new(companies: Vec<Company>) -> Self {
        Self {
            inner: InMemoryCompanyDirectory::new(companies),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompanyDirectory for CountingDirectory {
    async fn lookup(&self, id: &str) -> directory::Result<Company> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup(id).await
    }

    async fn lookup_many(&self, ids: &BTreeSet<String>) -> directory::Result<HashMap<String, Company>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup_many(ids).await
    }
}

// ── Test app builder ───────────────────────────────────────────

pub struct TestApp {
    pub router: axum::Router,
    pub source: Arc<CountingPostingSource>,
    pub directory: Arc<CountingDirectory>,
}

pub fn build_test_app_with(source: CountingPostingSource, companies: Vec<Company>) -> TestApp {
    let source = Arc::new(source);
    let directory = Arc::new(CountingDirectory::new(companies));
    let service = Arc::new(PostingService::new(directory.clone(), source.clone()));
    TestApp {
        router: build_router(service),
        source,
        directory,
    }
}

pub fn build_test_app() -> TestApp {
    build_test_app_with(CountingPostingSource::new(postings()), companies())
}

// ── Request helpers ────────────────────────────────────────────

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    post_raw(uri, body.to_string())
}

pub fn post_raw(uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

pub async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(
        |_| serde_json::json!({ "raw": String::from_utf8_lossy(&bytes).to_string() }),
    )
}
