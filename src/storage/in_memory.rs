//! In-memory record store and the quote access layer built on it

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::config::QuotesConfig;
use crate::core::entity::{Entity, Quote, QuoteDefaults, QuoteDraft, QuoteId, QuoteStatus, RecordId};
use crate::core::error::QuoteError;
use crate::core::events::{AppEvent, EventBus, Notification, QuoteEvent};
use crate::core::service::QuoteService;

/// In-memory record store
///
/// Keeps records in insertion order, keyed by id. Clones share the same
/// underlying data; create a new store for an isolated instance.
#[derive(Clone)]
pub struct RecordStore<T: Entity> {
    records: Arc<RwLock<IndexMap<RecordId, T>>>,
}

impl<T: Entity> RecordStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Create a store holding `records`, in the given order
    ///
    /// Fails when two records share an id.
    pub fn with_records(records: Vec<T>) -> Result<Self> {
        let mut map = IndexMap::with_capacity(records.len());
        for record in records {
            let id = record.id();
            if map.insert(id, record).is_some() {
                return Err(anyhow!(
                    "duplicate {} id {}",
                    T::resource_name_singular(),
                    id
                ));
            }
        }
        Ok(Self {
            records: Arc::new(RwLock::new(map)),
        })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, IndexMap<RecordId, T>>> {
        self.records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, IndexMap<RecordId, T>>> {
        self.records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))
    }

    /// Copies of all records, in insertion order
    pub fn list(&self) -> Result<Vec<T>> {
        Ok(self.read()?.values().cloned().collect())
    }

    /// Copies of the records matching `predicate`, in insertion order
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Result<Vec<T>> {
        Ok(self
            .read()?
            .values()
            .filter(|record| predicate(record))
            .cloned()
            .collect())
    }

    pub fn get(&self, id: RecordId) -> Result<Option<T>> {
        Ok(self.read()?.get(&id).cloned())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    /// Append a record built from the next id (max existing id + 1, or 1)
    ///
    /// Id assignment and insertion happen under the same write lock.
    pub fn insert_with(&self, build: impl FnOnce(RecordId) -> T) -> Result<T> {
        let mut records = self.write()?;
        let next_id = match records.keys().max() {
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| anyhow!("{} id space exhausted", T::resource_name_singular()))?,
            None => 1,
        };

        let record = build(next_id);
        if record.id() != next_id {
            return Err(anyhow!(
                "{} built with id {} instead of {}",
                T::resource_name_singular(),
                record.id(),
                next_id
            ));
        }

        records.insert(next_id, record.clone());
        Ok(record)
    }

    /// Mutate the record with `id` in place and return a copy of it,
    /// or `None` if no such record exists
    pub fn update_with(&self, id: RecordId, mutate: impl FnOnce(&mut T)) -> Result<Option<T>> {
        let mut records = self.write()?;
        let Some(record) = records.get_mut(&id) else {
            return Ok(None);
        };
        mutate(record);
        Ok(Some(record.clone()))
    }

    /// Remove the record with `id`, keeping the order of the others
    pub fn remove(&self, id: RecordId) -> Result<Option<T>> {
        Ok(self.write()?.shift_remove(&id))
    }
}

impl<T: Entity> Default for RecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Quote access layer backed by a [`RecordStore`]
///
/// Every call waits for the configured latency before touching the store.
/// Mutations publish a [`Notification`] on the event bus whether they
/// succeed or fail.
#[derive(Clone)]
pub struct InMemoryQuoteService {
    store: RecordStore<Quote>,
    events: EventBus,
    latency: Duration,
    defaults: QuoteDefaults,
}

impl InMemoryQuoteService {
    /// Create a service over an existing store
    pub fn new(store: RecordStore<Quote>, events: EventBus, config: &QuotesConfig) -> Self {
        Self {
            store,
            events,
            latency: config.latency(),
            defaults: config.quote_defaults(),
        }
    }

    /// Create a service with its own store, seeded when the config asks for it
    pub fn from_config(config: &QuotesConfig) -> Result<Self> {
        let store = if config.seed {
            crate::storage::seed::seeded_store()?
        } else {
            RecordStore::new()
        };
        Ok(Self::new(
            store,
            EventBus::new(config.event_capacity),
            config,
        ))
    }

    pub fn store(&self) -> &RecordStore<Quote> {
        &self.store
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn succeed(&self, message: &str, event: QuoteEvent) {
        self.events.publish(AppEvent::Quote(event));
        self.events.notify(Notification::success(message));
    }

    fn fail(&self, message: &str) {
        self.events.notify(Notification::error(message));
    }

    fn check_value(operation: &str, draft: &QuoteDraft) -> Result<(), QuoteError> {
        if draft.value.is_finite() {
            Ok(())
        } else {
            Err(QuoteError::operation_failed(
                operation,
                format!("value {} is not a finite number", draft.value),
            ))
        }
    }

    /// Fill in the default expiry outside the store lock, so an overflow is
    /// reported instead of panicking while the lock is held
    fn with_default_expiry(
        &self,
        mut draft: QuoteDraft,
        now: DateTime<Utc>,
    ) -> Result<QuoteDraft, QuoteError> {
        if draft.expiry_date.is_none() {
            let expiry = self.defaults.expiry_from(now).ok_or_else(|| {
                QuoteError::operation_failed(
                    "create",
                    format!("default expiry of {} days is out of range", self.defaults.expiry_days),
                )
            })?;
            draft.expiry_date = Some(expiry);
        }
        Ok(draft)
    }

    fn listing(&self, what: &str, result: Result<Vec<Quote>>) -> Vec<Quote> {
        result.unwrap_or_else(|e| {
            error!(error = %e, "Error fetching {}", what);
            Vec::new()
        })
    }
}

#[async_trait]
impl QuoteService for InMemoryQuoteService {
    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<Quote>, QuoteError> {
        self.delay().await;
        Ok(self.listing("quotes", self.store.list()))
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: QuoteId) -> Option<Quote> {
        self.delay().await;
        self.store.get(id).unwrap_or_else(|e| {
            error!(error = %e, quote_id = id, "Error fetching quote");
            None
        })
    }

    #[instrument(skip(self, draft), fields(title = %draft.title))]
    async fn create(&self, draft: QuoteDraft) -> Result<Quote, QuoteError> {
        self.delay().await;

        let now = Utc::now();
        let result = Self::check_value("create", &draft)
            .and_then(|()| self.with_default_expiry(draft, now))
            .and_then(|draft| {
                let defaults = &self.defaults;
                self.store
                    .insert_with(|id| Quote::from_draft(id, draft, defaults, now))
                    .map_err(|e| QuoteError::operation_failed("create", e))
            });

        match result {
            Ok(quote) => {
                info!(
                    quote_id = quote.id,
                    quotation_number = %quote.quotation_number,
                    "Quote created"
                );
                self.succeed(
                    "Quote created successfully",
                    QuoteEvent::Created {
                        quote: quote.clone(),
                    },
                );
                Ok(quote)
            }
            Err(e) => {
                error!(error = %e, "Error creating quote");
                self.fail("Failed to create quote");
                Err(e)
            }
        }
    }

    #[instrument(skip(self, draft))]
    async fn update(&self, id: QuoteId, draft: QuoteDraft) -> Result<Quote, QuoteError> {
        self.delay().await;

        let result = Self::check_value("update", &draft).and_then(|()| {
            let now = Utc::now();
            self.store
                .update_with(id, |quote| quote.apply(draft, now))
                .map_err(|e| QuoteError::operation_failed("update", e))
        });

        match result {
            Ok(Some(quote)) => {
                info!(quote_id = id, status = %quote.status, "Quote updated");
                self.succeed(
                    "Quote updated successfully",
                    QuoteEvent::Updated {
                        quote: quote.clone(),
                    },
                );
                Ok(quote)
            }
            Ok(None) => {
                warn!(quote_id = id, "Quote not found for update");
                self.fail("Quote not found");
                Err(QuoteError::not_found(id))
            }
            Err(e) => {
                error!(error = %e, quote_id = id, "Error updating quote");
                self.fail("Failed to update quote");
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: QuoteId) -> Result<(), QuoteError> {
        self.delay().await;

        match self.store.remove(id) {
            Ok(Some(_)) => {
                info!(quote_id = id, "Quote deleted");
                self.succeed(
                    "Quote deleted successfully",
                    QuoteEvent::Deleted { quote_id: id },
                );
                Ok(())
            }
            Ok(None) => {
                warn!(quote_id = id, "Quote not found for delete");
                self.fail("Quote not found");
                Err(QuoteError::not_found(id))
            }
            Err(e) => {
                error!(error = %e, quote_id = id, "Error deleting quote");
                self.fail("Failed to delete quote");
                Err(QuoteError::operation_failed("delete", e))
            }
        }
    }

    #[instrument(skip(self))]
    async fn get_by_contact_id(&self, contact_id: RecordId) -> Result<Vec<Quote>, QuoteError> {
        self.delay().await;
        let quotes = self.store.filter(|q| q.contact_id == contact_id);
        Ok(self.listing("quotes for contact", quotes))
    }

    #[instrument(skip(self))]
    async fn get_by_deal_id(&self, deal_id: RecordId) -> Result<Vec<Quote>, QuoteError> {
        self.delay().await;
        let quotes = self.store.filter(|q| q.deal_id == Some(deal_id));
        Ok(self.listing("quotes for deal", quotes))
    }

    #[instrument(skip(self))]
    async fn get_by_status(&self, status: &QuoteStatus) -> Result<Vec<Quote>, QuoteError> {
        self.delay().await;
        debug!(status = %status, "Filtering quotes by status");
        let quotes = self.store.filter(|q| &q.status == status);
        Ok(self.listing("quotes by status", quotes))
    }
}
