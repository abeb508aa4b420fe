//! Client-side filtering and summary of quote listings

use serde::{Deserialize, Serialize};

use crate::core::entity::{Quote, QuoteStatus};

/// Status part of a listing filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(QuoteStatus),
}

impl StatusFilter {
    /// `"All"` (or empty) keeps everything, any other value filters on it
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "All" => StatusFilter::All,
            other => StatusFilter::Only(QuoteStatus::from(other)),
        }
    }

    pub fn matches(&self, status: &QuoteStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

/// Search text plus status filter applied to a listing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuoteFilter {
    pub search: String,
    pub status: StatusFilter,
}

impl QuoteFilter {
    pub fn new(search: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            search: search.into(),
            status,
        }
    }

    /// Whether `quote` passes both the status filter and the search text
    ///
    /// The search is a case-insensitive substring match over title, contact
    /// name, quotation number and description. The text is matched as typed,
    /// surrounding spaces included; whitespace-only text matches everything.
    pub fn matches(&self, quote: &Quote) -> bool {
        if !self.status.matches(&quote.status) {
            return false;
        }

        if self.search.trim().is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();

        [
            &quote.title,
            &quote.contact_name,
            &quote.quotation_number,
            &quote.description,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.status != StatusFilter::All
    }
}

/// Keep the quotes matching `filter`, preserving order
pub fn filter_quotes(quotes: &[Quote], filter: &QuoteFilter) -> Vec<Quote> {
    quotes
        .iter()
        .filter(|quote| filter.matches(quote))
        .cloned()
        .collect()
}

/// Query parameters of the listing endpoint
///
/// # Example
/// ```text
/// GET /quotes?search=acme&status=Sent
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    pub search: Option<String>,
    pub status: Option<String>,
}

impl From<ListParams> for QuoteFilter {
    fn from(params: ListParams) -> Self {
        QuoteFilter::new(
            params.search.unwrap_or_default(),
            StatusFilter::parse(params.status.as_deref().unwrap_or("All")),
        )
    }
}

/// Aggregates shown above the quote list
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub total: usize,
    pub sent: usize,
    pub accepted: usize,
    pub total_value: f64,
}

impl QuoteSummary {
    pub fn from_quotes(quotes: &[Quote]) -> Self {
        quotes.iter().fold(Self::default(), |mut summary, quote| {
            summary.total += 1;
            match quote.status {
                QuoteStatus::Sent => summary.sent += 1,
                QuoteStatus::Accepted => summary.accepted += 1,
                _ => {}
            }
            if quote.value.is_finite() {
                summary.total_value += quote.value;
            }
            summary
        })
    }
}
