//! Shared test harness for quote access layer testing
//!
//! Provides draft builders, a failing `QuoteService` for error paths, and the
//! `quote_service_tests!` contract suite.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod quote_harness;
//! use quote_harness::*;
//! ```

#![allow(dead_code)]

pub mod quote_service_tests;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use quotes::config::QuotesConfig;
use quotes::core::{Quote, QuoteDraft, QuoteError, QuoteId, QuoteService, QuoteStatus, RecordId};
use quotes::storage::{InMemoryQuoteService, RecordStore};

/// A valid draft for `contact_id`, expiring in two weeks
pub fn draft(title: &str, contact_id: RecordId, value: f64) -> QuoteDraft {
    QuoteDraft::new(title, contact_id, value)
        .with_contact_name(format!("Contact Person {}", contact_id))
        .with_expiry(Utc::now() + Duration::days(14))
}

/// Expected quotation number of `id` created this year
pub fn this_year_number(id: QuoteId) -> String {
    format!("QUO-{}-{:03}", Utc::now().year(), id)
}

/// An empty in-memory service without latency
pub fn empty_service() -> InMemoryQuoteService {
    InMemoryQuoteService::from_config(&QuotesConfig::instant())
        .expect("instant config builds a service")
}

/// An in-memory service over `quotes`, without latency
pub fn service_with(quotes: Vec<Quote>) -> InMemoryQuoteService {
    let config = QuotesConfig::instant();
    InMemoryQuoteService::new(
        RecordStore::with_records(quotes).expect("quotes have distinct ids"),
        quotes::core::EventBus::default(),
        &config,
    )
}

pub fn timestamp(days_ago: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days_ago)
}

/// Access layer whose every call fails, standing in for an unreachable backend
pub struct UnavailableService;

#[async_trait]
impl QuoteService for UnavailableService {
    async fn get_all(&self) -> Result<Vec<Quote>, QuoteError> {
        Err(QuoteError::operation_failed("list", "backend unreachable"))
    }

    async fn get_by_id(&self, _id: QuoteId) -> Option<Quote> {
        None
    }

    async fn create(&self, _draft: QuoteDraft) -> Result<Quote, QuoteError> {
        Err(QuoteError::operation_failed("create", "backend unreachable"))
    }

    async fn update(&self, _id: QuoteId, _draft: QuoteDraft) -> Result<Quote, QuoteError> {
        Err(QuoteError::operation_failed("update", "backend unreachable"))
    }

    async fn delete(&self, _id: QuoteId) -> Result<(), QuoteError> {
        Err(QuoteError::operation_failed("delete", "backend unreachable"))
    }

    async fn get_by_contact_id(&self, _contact_id: RecordId) -> Result<Vec<Quote>, QuoteError> {
        Err(QuoteError::operation_failed("list", "backend unreachable"))
    }

    async fn get_by_deal_id(&self, _deal_id: RecordId) -> Result<Vec<Quote>, QuoteError> {
        Err(QuoteError::operation_failed("list", "backend unreachable"))
    }

    async fn get_by_status(&self, _status: &QuoteStatus) -> Result<Vec<Quote>, QuoteError> {
        Err(QuoteError::operation_failed("list", "backend unreachable"))
    }
}

pub fn unavailable() -> Arc<dyn QuoteService> {
    Arc::new(UnavailableService)
}

/// Access layer whose first `failures` listings fail, then recovers
pub struct FlakyService {
    inner: InMemoryQuoteService,
    failures: AtomicUsize,
}

impl FlakyService {
    pub fn new(inner: InMemoryQuoteService, failures: usize) -> Self {
        Self {
            inner,
            failures: AtomicUsize::new(failures),
        }
    }
}

#[async_trait]
impl QuoteService for FlakyService {
    async fn get_all(&self) -> Result<Vec<Quote>, QuoteError> {
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(QuoteError::operation_failed("list", "backend unreachable"));
        }
        self.inner.get_all().await
    }

    async fn get_by_id(&self, id: QuoteId) -> Option<Quote> {
        self.inner.get_by_id(id).await
    }

    async fn create(&self, draft: QuoteDraft) -> Result<Quote, QuoteError> {
        self.inner.create(draft).await
    }

    async fn update(&self, id: QuoteId, draft: QuoteDraft) -> Result<Quote, QuoteError> {
        self.inner.update(id, draft).await
    }

    async fn delete(&self, id: QuoteId) -> Result<(), QuoteError> {
        self.inner.delete(id).await
    }

    async fn get_by_contact_id(&self, contact_id: RecordId) -> Result<Vec<Quote>, QuoteError> {
        self.inner.get_by_contact_id(contact_id).await
    }

    async fn get_by_deal_id(&self, deal_id: RecordId) -> Result<Vec<Quote>, QuoteError> {
        self.inner.get_by_deal_id(deal_id).await
    }

    async fn get_by_status(&self, status: &QuoteStatus) -> Result<Vec<Quote>, QuoteError> {
        self.inner.get_by_status(status).await
    }
}
