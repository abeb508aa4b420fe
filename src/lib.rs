//! # Quotes
//!
//! The Quotes module of a CRM: an in-memory access layer for Quotes plus the
//! view models of the screens built on it.
//!
//! ## Features
//!
//! - **Access Layer**: async CRUD over an injectable in-memory store, with
//!   sequential ids and `QUO-<year>-<seq>` quotation numbers
//! - **Notifications**: every mutation publishes a success or error toast on
//!   a broadcast [`EventBus`](core::events::EventBus)
//! - **Form**: raw input validation that reports every violation at once,
//!   and contact/deal name resolution with ordered fallbacks
//! - **List Page**: search and status filtering, summary stats, and the
//!   create/edit/delete flow
//! - **Card**: status colors, expiring-soon and won flags, USD formatting
//! - **REST API**: the access layer exposed through axum
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use quotes::prelude::*;
//!
//! let config = QuotesConfig::default();
//! let service = InMemoryQuoteService::from_config(&config)?;
//!
//! let quote = service
//!     .create(QuoteDraft::new("Website redesign", 1, 4800.0))
//!     .await?;
//! assert_eq!(quote.status, QuoteStatus::Draft);
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod telemetry;
pub mod views;

/// Re-exports of the most used types
pub mod prelude {
    pub use crate::config::{ConfigError, QuotesConfig};
    pub use crate::core::{
        AppEvent, Contact, Deal, Entity, EventBus, EventEnvelope, FieldError, FieldErrorKind,
        FormField, Notification, NotificationLevel, Quote, QuoteDraft, QuoteError, QuoteEvent,
        QuoteFilter, QuoteId, QuoteService, QuoteStatus, QuoteSummary, RecordId, ReferenceSource,
        StaticDirectory, StatusFilter, ValidationErrors, resolve_display_name,
    };
    pub use crate::server::{AppState, ServerBuilder, build_quote_routes};
    pub use crate::storage::{InMemoryQuoteService, RecordStore};
    pub use crate::views::{
        CancelOutcome, EmptyState, FormState, PageState, QuoteCard, QuoteCardView, QuoteForm,
        QuoteListPage, StatusColor,
    };

    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
}
