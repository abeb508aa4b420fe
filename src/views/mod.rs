//! View models of the quotes screens
//!
//! Rendering is left to the caller; these types hold the state and the
//! behavior of the list page, the quote form and the quote card.

pub mod card;
pub mod form;
pub mod page;

pub use card::{QuoteCard, QuoteCardView, StatusColor, days_until_expiry, is_expiring_soon};
pub use form::{CancelOutcome, FormMode, QuoteForm, SelectOption};
pub use page::{EmptyState, FormState, PageState, QuoteListPage};
