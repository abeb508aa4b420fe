//! Quote list page: listing, filters, and the create/edit/delete flow

use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, error, instrument};

use crate::config::QuotesConfig;
use crate::core::entity::{Quote, QuoteDraft, QuoteId};
use crate::core::events::EventBus;
use crate::core::query::{QuoteFilter, QuoteSummary, StatusFilter, filter_quotes};
use crate::core::service::QuoteService;
use crate::views::card::QuoteCardView;
use crate::views::form::QuoteForm;

/// Message shown when the listing cannot be fetched
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load quotes. Please try again.";

/// Loading state of the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    Loading,
    Error(String),
    Ready,
}

/// Which form, if any, is open over the list
#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Closed,
    Creating,
    Editing(Quote),
}

/// Why the visible list is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The store holds no quotes at all
    NoQuotes,
    /// Quotes exist but none passes the filter
    NoMatches,
}

pub struct QuoteListPage {
    service: Arc<dyn QuoteService>,
    events: EventBus,
    expiry_days: i64,
    expiring_soon_days: i64,
    quotes: Vec<Quote>,
    state: PageState,
    form: FormState,
    filter: QuoteFilter,
}

impl QuoteListPage {
    pub fn new(service: Arc<dyn QuoteService>, events: EventBus, config: &QuotesConfig) -> Self {
        Self {
            service,
            events,
            expiry_days: config.default_expiry_days,
            expiring_soon_days: config.expiring_soon_days,
            quotes: Vec::new(),
            state: PageState::Loading,
            form: FormState::Closed,
            filter: QuoteFilter::default(),
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn form_state(&self) -> &FormState {
        &self.form
    }

    /// Every loaded quote, unfiltered
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn filter(&self) -> &QuoteFilter {
        &self.filter
    }

    /// Fetch the listing
    ///
    /// On failure the previous list is kept and the page shows the error
    /// message until [`retry`](Self::retry) succeeds.
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        self.state = PageState::Loading;
        match self.service.get_all().await {
            Ok(quotes) => {
                debug!(count = quotes.len(), "quotes loaded");
                self.quotes = quotes;
                self.state = PageState::Ready;
            }
            Err(e) => {
                error!(error = %e, "Error loading quotes");
                self.state = PageState::Error(LOAD_ERROR_MESSAGE.to_string());
            }
        }
    }

    pub async fn retry(&mut self) {
        self.load().await;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.status = status;
    }

    /// Loaded quotes passing the current search and status filter
    pub fn visible_quotes(&self) -> Vec<Quote> {
        filter_quotes(&self.quotes, &self.filter)
    }

    /// Stats over every loaded quote, independent of the filter
    pub fn summary(&self) -> QuoteSummary {
        QuoteSummary::from_quotes(&self.quotes)
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.quotes.is_empty() {
            Some(EmptyState::NoQuotes)
        } else if self.visible_quotes().is_empty() {
            Some(EmptyState::NoMatches)
        } else {
            None
        }
    }

    /// Card views of the visible quotes
    pub fn cards(&self, now: DateTime<Utc>) -> Vec<QuoteCardView> {
        self.visible_quotes()
            .iter()
            .map(|quote| QuoteCardView::build(quote, now, self.expiring_soon_days))
            .collect()
    }

    pub fn open_create(&mut self) {
        self.form = FormState::Creating;
    }

    pub fn open_edit(&mut self, quote: Quote) {
        self.form = FormState::Editing(quote);
    }

    pub fn cancel_form(&mut self) {
        self.form = FormState::Closed;
    }

    /// A form matching the open form state
    pub fn build_form(&self, today: NaiveDate) -> Option<QuoteForm> {
        match &self.form {
            FormState::Closed => None,
            FormState::Creating => Some(QuoteForm::create(
                today,
                self.expiry_days,
                self.events.clone(),
            )),
            FormState::Editing(quote) => Some(QuoteForm::edit(quote, self.events.clone())),
        }
    }

    /// Send the form payload to the access layer
    ///
    /// Updates the quote being edited, otherwise creates a new one. On
    /// success the form closes and the list reloads; on failure the form
    /// stays open. Returns whether the save went through.
    #[instrument(skip(self, draft))]
    pub async fn submit_form(&mut self, draft: QuoteDraft) -> bool {
        let result = match &self.form {
            FormState::Editing(quote) => self.service.update(quote.id, draft).await,
            FormState::Creating | FormState::Closed => self.service.create(draft).await,
        };

        match result {
            Ok(quote) => {
                debug!(quote_id = quote.id, "quote saved");
                self.form = FormState::Closed;
                self.load().await;
                true
            }
            Err(e) => {
                error!(error = %e, "Error saving quote");
                false
            }
        }
    }

    /// Delete a quote once `confirm` agrees
    ///
    /// A failed delete keeps the current list as it is.
    #[instrument(skip(self, confirm))]
    pub async fn delete(&mut self, id: QuoteId, confirm: impl FnOnce() -> bool) -> bool {
        if !confirm() {
            return false;
        }

        match self.service.delete(id).await {
            Ok(()) => {
                self.load().await;
                true
            }
            Err(e) => {
                error!(error = %e, quote_id = id, "Error deleting quote");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::QuoteStatus;
    use crate::storage::InMemoryQuoteService;

    fn page() -> QuoteListPage {
        let config = QuotesConfig::instant();
        let service = InMemoryQuoteService::from_config(&config).unwrap();
        let events = service.events().clone();
        QuoteListPage::new(Arc::new(service), events, &config)
    }

    #[tokio::test]
    async fn test_empty_store_shows_no_quotes() {
        let mut page = page();
        assert_eq!(page.state(), &PageState::Loading);

        page.load().await;

        assert_eq!(page.state(), &PageState::Ready);
        assert_eq!(page.empty_state(), Some(EmptyState::NoQuotes));
    }

    #[tokio::test]
    async fn test_create_flow_closes_form_and_reloads() {
        let mut page = page();
        page.load().await;
        page.open_create();

        let saved = page
            .submit_form(QuoteDraft::new("Onboarding", 1, 800.0))
            .await;

        assert!(saved);
        assert_eq!(page.form_state(), &FormState::Closed);
        assert_eq!(page.quotes().len(), 1);
        assert_eq!(page.empty_state(), None);
    }

    #[tokio::test]
    async fn test_edit_flow_updates_the_quote() {
        let mut page = page();
        page.open_create();
        page.submit_form(QuoteDraft::new("Onboarding", 1, 800.0)).await;

        let quote = page.quotes()[0].clone();
        page.open_edit(quote.clone());
        let draft = QuoteDraft::from(&quote).with_status(QuoteStatus::Sent);
        assert!(page.submit_form(draft).await);

        assert_eq!(page.quotes().len(), 1);
        assert_eq!(page.quotes()[0].status, QuoteStatus::Sent);
    }

    #[tokio::test]
    async fn test_unconfirmed_delete_is_noop() {
        let mut page = page();
        page.open_create();
        page.submit_form(QuoteDraft::new("Onboarding", 1, 800.0)).await;

        assert!(!page.delete(1, || false).await);
        assert_eq!(page.quotes().len(), 1);

        assert!(page.delete(1, || true).await);
        assert!(page.quotes().is_empty());
    }

    #[tokio::test]
    async fn test_filter_without_matches() {
        let mut page = page();
        page.open_create();
        page.submit_form(QuoteDraft::new("Onboarding", 1, 800.0)).await;

        page.set_search("zzz");
        assert_eq!(page.empty_state(), Some(EmptyState::NoMatches));
        assert_eq!(page.summary().total, 1);

        page.set_search("  ");
        page.set_status_filter(StatusFilter::Only(QuoteStatus::Draft));
        assert_eq!(page.visible_quotes().len(), 1);
    }

    #[test]
    fn test_build_form_follows_form_state() {
        let mut page = page();
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();

        assert!(page.build_form(today).is_none());
        page.open_create();
        assert_eq!(page.build_form(today).unwrap().heading(), "Create New Quote");
        page.cancel_form();
        assert!(page.build_form(today).is_none());
    }
}
