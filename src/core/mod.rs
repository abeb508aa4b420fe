//! Core module containing the quote model, its rules and the service traits

pub mod entity;
pub mod error;
pub mod events;
pub mod format;
pub mod quotation;
pub mod query;
pub mod reference;
pub mod service;
pub mod validation;

pub use entity::{Entity, Quote, QuoteDefaults, QuoteDraft, QuoteId, QuoteStatus, RecordId};
pub use error::{ErrorResponse, QuoteError};
pub use events::{AppEvent, EventBus, EventEnvelope, Notification, NotificationLevel, QuoteEvent};
pub use query::{QuoteFilter, QuoteSummary, StatusFilter, filter_quotes};
pub use reference::{Contact, Deal, NameFields, ReferenceSource, StaticDirectory, resolve_display_name};
pub use service::QuoteService;
pub use validation::{FieldError, FieldErrorKind, FormField, ValidationErrors};
