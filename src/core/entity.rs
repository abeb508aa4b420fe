//! Entity traits and the Quote record

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::quotation::format_quotation_number;

/// Identifier type shared by every record in the store
pub type RecordId = i64;

/// Identifier of a Quote
pub type QuoteId = RecordId;

/// Base trait for all records kept in a [`RecordStore`](crate::storage::RecordStore).
///
/// All records have:
/// - id: integer identifier assigned by the store
/// - created_at / updated_at: lifecycle timestamps
/// - status: current lifecycle status as text
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "quotes")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "quote")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this record
    fn id(&self) -> RecordId;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Get the record status
    fn status(&self) -> &str;
}

/// Lifecycle status of a Quote
///
/// Unknown values are kept verbatim in [`QuoteStatus::Other`] so that records
/// coming from other systems survive the store untouched. Only the form
/// refuses them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuoteStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
    Other(String),
}

impl QuoteStatus {
    /// The statuses a user can pick, in display order
    pub const ALL: [QuoteStatus; 5] = [
        QuoteStatus::Draft,
        QuoteStatus::Sent,
        QuoteStatus::Accepted,
        QuoteStatus::Rejected,
        QuoteStatus::Expired,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            QuoteStatus::Draft => "Draft",
            QuoteStatus::Sent => "Sent",
            QuoteStatus::Accepted => "Accepted",
            QuoteStatus::Rejected => "Rejected",
            QuoteStatus::Expired => "Expired",
            QuoteStatus::Other(raw) => raw,
        }
    }

    /// Whether this is one of the five known statuses
    pub fn is_known(&self) -> bool {
        !matches!(self, QuoteStatus::Other(_))
    }
}

impl From<&str> for QuoteStatus {
    fn from(value: &str) -> Self {
        match value {
            "Draft" => QuoteStatus::Draft,
            "Sent" => QuoteStatus::Sent,
            "Accepted" => QuoteStatus::Accepted,
            "Rejected" => QuoteStatus::Rejected,
            "Expired" => QuoteStatus::Expired,
            other => QuoteStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for QuoteStatus {
    fn from(value: String) -> Self {
        QuoteStatus::from(value.as_str())
    }
}

impl From<QuoteStatus> for String {
    fn from(status: QuoteStatus) -> Self {
        match status {
            QuoteStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A priced proposal tied to a Contact and optionally a Deal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: QuoteId,
    pub title: String,
    pub contact_id: RecordId,
    pub contact_name: String,
    #[serde(default)]
    pub deal_id: Option<RecordId>,
    #[serde(default)]
    pub deal_name: Option<String>,
    pub value: f64,
    #[serde(default)]
    pub status: QuoteStatus,
    #[serde(default)]
    pub description: String,
    pub expiry_date: DateTime<Utc>,
    pub quotation_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Defaults applied when a Quote is built from a draft
#[derive(Debug, Clone)]
pub struct QuoteDefaults {
    pub quotation_prefix: String,
    pub expiry_days: i64,
}

impl Default for QuoteDefaults {
    fn default() -> Self {
        Self {
            quotation_prefix: "QUO".to_string(),
            expiry_days: 30,
        }
    }
}

impl QuoteDefaults {
    /// Default expiry of a quote created at `now`, `None` when it does not fit
    /// in a timestamp
    pub fn expiry_from(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        Duration::try_days(self.expiry_days).and_then(|days| now.checked_add_signed(days))
    }
}

impl Quote {
    /// Build a new Quote from a draft
    ///
    /// Assigns the quotation number from `id` and the year of `now`, and fills
    /// status, description, expiry date and contact name when the draft leaves
    /// them out. A default expiry past the last representable instant is
    /// clamped to it; callers reject that case with
    /// [`QuoteDefaults::expiry_from`] beforehand.
    pub fn from_draft(id: QuoteId, draft: QuoteDraft, defaults: &QuoteDefaults, now: DateTime<Utc>) -> Self {
        let contact_name = draft
            .contact_name
            .unwrap_or_else(|| format!("Contact {}", draft.contact_id));

        Self {
            id,
            title: draft.title,
            contact_id: draft.contact_id,
            contact_name,
            deal_id: draft.deal_id,
            deal_name: draft.deal_name,
            value: draft.value,
            status: draft.status.unwrap_or_default(),
            description: draft.description.unwrap_or_default(),
            expiry_date: draft
                .expiry_date
                .or_else(|| defaults.expiry_from(now))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            quotation_number: format_quotation_number(&defaults.quotation_prefix, now.year(), id),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a draft over this Quote
    ///
    /// `id`, `quotation_number` and `created_at` never change. Contact name,
    /// status, description and expiry keep their stored value when the draft
    /// omits them; the deal link is always replaced.
    pub fn apply(&mut self, draft: QuoteDraft, now: DateTime<Utc>) {
        self.title = draft.title;
        self.contact_id = draft.contact_id;
        if let Some(name) = draft.contact_name {
            self.contact_name = name;
        }
        self.deal_id = draft.deal_id;
        self.deal_name = draft.deal_name;
        self.value = draft.value;
        if let Some(status) = draft.status {
            self.status = status;
        }
        if let Some(description) = draft.description {
            self.description = description;
        }
        if let Some(expiry) = draft.expiry_date {
            self.expiry_date = expiry;
        }
        self.touch_at(now);
    }

    /// Refresh `updated_at`
    pub fn touch_at(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub fn is_accepted(&self) -> bool {
        self.status == QuoteStatus::Accepted
    }
}

impl Entity for Quote {
    fn resource_name() -> &'static str {
        "quotes"
    }

    fn resource_name_singular() -> &'static str {
        "quote"
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn status(&self) -> &str {
        self.status.as_str()
    }
}

/// Normalized payload accepted by create and update
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDraft {
    pub title: String,
    pub contact_id: RecordId,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub deal_id: Option<RecordId>,
    #[serde(default)]
    pub deal_name: Option<String>,
    pub value: f64,
    #[serde(default)]
    pub status: Option<QuoteStatus>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
}

impl QuoteDraft {
    pub fn new(title: impl Into<String>, contact_id: RecordId, value: f64) -> Self {
        Self {
            title: title.into(),
            contact_id,
            value,
            ..Default::default()
        }
    }

    pub fn with_contact_name(mut self, name: impl Into<String>) -> Self {
        self.contact_name = Some(name.into());
        self
    }

    pub fn with_deal(mut self, deal_id: RecordId, deal_name: Option<String>) -> Self {
        self.deal_id = Some(deal_id);
        self.deal_name = deal_name;
        self
    }

    pub fn with_status(mut self, status: QuoteStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_expiry(mut self, expiry: DateTime<Utc>) -> Self {
        self.expiry_date = Some(expiry);
        self
    }
}

impl From<&Quote> for QuoteDraft {
    fn from(quote: &Quote) -> Self {
        Self {
            title: quote.title.clone(),
            contact_id: quote.contact_id,
            contact_name: Some(quote.contact_name.clone()),
            deal_id: quote.deal_id,
            deal_name: quote.deal_name.clone(),
            value: quote.value,
            status: Some(quote.status.clone()),
            description: Some(quote.description.clone()),
            expiry_date: Some(quote.expiry_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_status_parses_known_values() {
        assert_eq!(QuoteStatus::from("Sent"), QuoteStatus::Sent);
        assert_eq!(QuoteStatus::from("Expired"), QuoteStatus::Expired);
        assert!(QuoteStatus::from("Accepted").is_known());
    }

    #[test]
    fn test_status_keeps_unknown_values() {
        let status = QuoteStatus::from("Negotiating");
        assert_eq!(status, QuoteStatus::Other("Negotiating".to_string()));
        assert!(!status.is_known());
        assert_eq!(status.to_string(), "Negotiating");
    }

    #[test]
    fn test_status_serializes_as_plain_string() {
        let json = serde_json::to_value(QuoteStatus::Accepted).unwrap();
        assert_eq!(json, serde_json::json!("Accepted"));

        let parsed: QuoteStatus = serde_json::from_value(serde_json::json!("Archived")).unwrap();
        assert_eq!(parsed.as_str(), "Archived");
    }

    #[test]
    fn test_from_draft_applies_defaults() {
        let quote = Quote::from_draft(
            7,
            QuoteDraft::new("Website redesign", 3, 1200.0),
            &QuoteDefaults::default(),
            fixed_now(),
        );

        assert_eq!(quote.status, QuoteStatus::Draft);
        assert_eq!(quote.description, "");
        assert_eq!(quote.contact_name, "Contact 3");
        assert_eq!(quote.quotation_number, "QUO-2026-007");
        assert_eq!(quote.expiry_date, fixed_now() + Duration::days(30));
        assert_eq!(quote.created_at, quote.updated_at);
    }

    #[test]
    fn test_default_expiry_overflow_does_not_panic() {
        let defaults = QuoteDefaults {
            expiry_days: 200_000_000,
            ..QuoteDefaults::default()
        };
        assert_eq!(defaults.expiry_from(fixed_now()), None);

        let quote = Quote::from_draft(1, QuoteDraft::new("Far", 1, 1.0), &defaults, fixed_now());
        assert_eq!(quote.expiry_date, DateTime::<Utc>::MAX_UTC);

        let huge = QuoteDefaults {
            expiry_days: i64::MAX,
            ..QuoteDefaults::default()
        };
        assert_eq!(huge.expiry_from(fixed_now()), None);
    }

    #[test]
    fn test_apply_preserves_identity_fields() {
        let mut quote = Quote::from_draft(
            1,
            QuoteDraft::new("Support plan", 2, 500.0).with_deal(4, Some("Renewal".into())),
            &QuoteDefaults::default(),
            fixed_now(),
        );
        let later = fixed_now() + Duration::hours(2);

        quote.apply(QuoteDraft::new("Support plan v2", 2, 650.0), later);

        assert_eq!(quote.id, 1);
        assert_eq!(quote.quotation_number, "QUO-2026-001");
        assert_eq!(quote.created_at, fixed_now());
        assert_eq!(quote.updated_at, later);
        assert_eq!(quote.contact_name, "Contact 2");
        assert_eq!(quote.deal_id, None);
        assert_eq!(quote.deal_name, None);
        assert_eq!(quote.title, "Support plan v2");
    }

    #[test]
    fn test_draft_from_quote_round_trips_editable_fields() {
        let quote = Quote::from_draft(
            2,
            QuoteDraft::new("Audit", 9, 99.5).with_status(QuoteStatus::Sent),
            &QuoteDefaults::default(),
            fixed_now(),
        );
        let draft = QuoteDraft::from(&quote);
        assert_eq!(draft.status, Some(QuoteStatus::Sent));
        assert_eq!(draft.expiry_date, Some(quote.expiry_date));
    }

    #[test]
    fn test_entity_metadata() {
        assert_eq!(Quote::resource_name(), "quotes");
        assert_eq!(Quote::resource_name_singular(), "quote");
    }
}
