//! Service trait for quote data access

use crate::core::entity::{Quote, QuoteDraft, QuoteId, QuoteStatus, RecordId};
use crate::core::error::QuoteError;
use async_trait::async_trait;

/// Access layer for Quotes
///
/// Implementations provide CRUD operations plus a few exact-match lookups.
/// Every value handed out is an independent copy of the stored record.
///
/// Results follow one convention: single reads return `Option` (absent is
/// not an error), mutations return `Result<_, QuoteError>` with
/// [`QuoteError::NotFound`] for unknown ids, and listings return
/// `Result<Vec<_>, _>`.
#[async_trait]
pub trait QuoteService: Send + Sync {
    /// All quotes, in insertion order
    async fn get_all(&self) -> Result<Vec<Quote>, QuoteError>;

    /// The quote with this id, if any
    async fn get_by_id(&self, id: QuoteId) -> Option<Quote>;

    /// Create a quote, assigning its id, quotation number and timestamps
    async fn create(&self, draft: QuoteDraft) -> Result<Quote, QuoteError>;

    /// Merge `draft` over an existing quote
    async fn update(&self, id: QuoteId, draft: QuoteDraft) -> Result<Quote, QuoteError>;

    /// Remove a quote
    async fn delete(&self, id: QuoteId) -> Result<(), QuoteError>;

    /// Quotes addressed to a contact
    async fn get_by_contact_id(&self, contact_id: RecordId) -> Result<Vec<Quote>, QuoteError>;

    /// Quotes attached to a deal
    async fn get_by_deal_id(&self, deal_id: RecordId) -> Result<Vec<Quote>, QuoteError>;

    /// Quotes in a given status
    async fn get_by_status(&self, status: &QuoteStatus) -> Result<Vec<Quote>, QuoteError>;
}
