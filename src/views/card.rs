//! Read-only card presentation of one quote

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::entity::{Quote, QuoteId, QuoteStatus};
use crate::core::format::{format_date_label, format_usd};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Default number of days before expiry at which a card is flagged
pub const EXPIRING_SOON_DAYS: i64 = 7;

/// Badge color of a quote status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Gray,
    Blue,
    Green,
    Red,
    Orange,
}

impl StatusColor {
    /// Unknown statuses get the neutral gray badge
    pub fn for_status(status: &QuoteStatus) -> Self {
        match status {
            QuoteStatus::Draft => StatusColor::Gray,
            QuoteStatus::Sent => StatusColor::Blue,
            QuoteStatus::Accepted => StatusColor::Green,
            QuoteStatus::Rejected => StatusColor::Red,
            QuoteStatus::Expired => StatusColor::Orange,
            QuoteStatus::Other(_) => StatusColor::Gray,
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            StatusColor::Gray => "bg-gray-100 text-gray-800",
            StatusColor::Blue => "bg-blue-100 text-blue-800",
            StatusColor::Green => "bg-green-100 text-green-800",
            StatusColor::Red => "bg-red-100 text-red-800",
            StatusColor::Orange => "bg-orange-100 text-orange-800",
        }
    }
}

/// Whole days until `expiry`, rounded up (an expiry 1.2 days away is 2 days)
pub fn days_until_expiry(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (expiry - now).num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) > 0 {
        days + 1
    } else {
        days
    }
}

/// `0 < days_until_expiry <= window_days`
pub fn is_expiring_soon(expiry: DateTime<Utc>, now: DateTime<Utc>, window_days: i64) -> bool {
    let days = days_until_expiry(expiry, now);
    days > 0 && days <= window_days
}

/// Everything a card displays, derived from one quote
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteCardView {
    pub id: QuoteId,
    pub title: String,
    pub quotation_number: String,
    pub status_label: String,
    pub status_color: StatusColor,
    pub expiring_soon: bool,
    pub won: bool,
    pub contact_name: String,
    pub deal_name: Option<String>,
    pub value_label: String,
    pub description: Option<String>,
    pub created_label: String,
    pub expires_label: String,
}

impl QuoteCardView {
    pub fn build(quote: &Quote, now: DateTime<Utc>, window_days: i64) -> Self {
        Self {
            id: quote.id,
            title: quote.title.clone(),
            quotation_number: quote.quotation_number.clone(),
            status_label: quote.status.to_string(),
            status_color: StatusColor::for_status(&quote.status),
            expiring_soon: is_expiring_soon(quote.expiry_date, now, window_days),
            won: quote.is_accepted(),
            contact_name: quote.contact_name.clone(),
            deal_name: quote.deal_name.clone().filter(|name| !name.is_empty()),
            value_label: format_usd(quote.value),
            description: Some(quote.description.clone()).filter(|d| !d.is_empty()),
            created_label: format!("Created {}", format_date_label(&quote.created_at)),
            expires_label: format!("Expires {}", format_date_label(&quote.expiry_date)),
        }
    }
}

/// A quote card with caller-supplied edit and delete actions
///
/// The card holds no state of its own; the actions are forwarded untouched.
pub struct QuoteCard<'a, E, D>
where
    E: FnMut(&Quote),
    D: FnMut(QuoteId),
{
    quote: &'a Quote,
    view: QuoteCardView,
    on_edit: E,
    on_delete: D,
}

impl<'a, E, D> QuoteCard<'a, E, D>
where
    E: FnMut(&Quote),
    D: FnMut(QuoteId),
{
    pub fn new(quote: &'a Quote, now: DateTime<Utc>, on_edit: E, on_delete: D) -> Self {
        Self::with_window(quote, now, EXPIRING_SOON_DAYS, on_edit, on_delete)
    }

    pub fn with_window(
        quote: &'a Quote,
        now: DateTime<Utc>,
        window_days: i64,
        on_edit: E,
        on_delete: D,
    ) -> Self {
        Self {
            quote,
            view: QuoteCardView::build(quote, now, window_days),
            on_edit,
            on_delete,
        }
    }

    pub fn view(&self) -> &QuoteCardView {
        &self.view
    }

    pub fn edit(&mut self) {
        (self.on_edit)(self.quote);
    }

    pub fn delete(&mut self) {
        (self.on_delete)(self.quote.id);
    }
}
