//! Validation rules for quote input
//!
//! Every check runs; violations are collected so the caller can show all of
//! them at once.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::validators::{known_status, not_before, positive_amount, required};
use super::{FieldError, FieldErrorKind, FormField, ValidationErrors};
use crate::core::entity::{Quote, QuoteDraft, QuoteStatus};

/// Raw text of the quote form inputs
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteFormData {
    pub title: String,
    pub contact_id: String,
    pub deal_id: String,
    pub value: String,
    pub status: String,
    pub description: String,
    /// `YYYY-MM-DD`
    pub expiry_date: String,
}

impl QuoteFormData {
    /// Inputs of a blank form: status `Draft`, expiry `expiry_days` after `today`
    ///
    /// The expiry is left empty when that date is out of range.
    pub fn blank(today: NaiveDate, expiry_days: i64) -> Self {
        let expiry = Duration::try_days(expiry_days).and_then(|days| today.checked_add_signed(days));
        Self {
            status: QuoteStatus::Draft.to_string(),
            expiry_date: expiry
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Inputs prefilled from an existing quote
    pub fn from_quote(quote: &Quote) -> Self {
        Self {
            title: quote.title.clone(),
            contact_id: quote.contact_id.to_string(),
            deal_id: quote.deal_id.map(|id| id.to_string()).unwrap_or_default(),
            value: quote.value.to_string(),
            status: quote.status.to_string(),
            description: quote.description.clone(),
            expiry_date: quote.expiry_date.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Contact => &self.contact_id,
            FormField::Deal => &self.deal_id,
            FormField::Value => &self.value,
            FormField::Status => &self.status,
            FormField::Description => &self.description,
            FormField::ExpiryDate => &self.expiry_date,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Title => self.title = value,
            FormField::Contact => self.contact_id = value,
            FormField::Deal => self.deal_id = value,
            FormField::Value => self.value = value,
            FormField::Status => self.status = value,
            FormField::Description => self.description = value,
            FormField::ExpiryDate => self.expiry_date = value,
        }
    }
}

fn check(
    errors: &mut ValidationErrors,
    field: FormField,
    value: &str,
    validator: impl Fn(&str) -> Result<(), FieldErrorKind>,
) {
    if let Err(kind) = validator(value) {
        errors.push(FieldError::new(field, kind));
    }
}

/// Validate the raw form inputs against `today`
pub fn validate_form(data: &QuoteFormData, today: NaiveDate) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    check(&mut errors, FormField::Title, &data.title, required());
    check(&mut errors, FormField::Contact, &data.contact_id, required());
    check(&mut errors, FormField::Value, &data.value, positive_amount());
    check(&mut errors, FormField::ExpiryDate, &data.expiry_date, not_before(today));
    check(&mut errors, FormField::Status, &data.status, known_status());

    errors.into_result()
}

/// Validate an already normalized payload against `today`
///
/// A missing expiry date is accepted here because the access layer fills in
/// the default one.
pub fn validate_draft(draft: &QuoteDraft, today: NaiveDate) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    check(&mut errors, FormField::Title, &draft.title, required());
    if draft.contact_id <= 0 {
        errors.push(FieldError::new(FormField::Contact, FieldErrorKind::Required));
    }
    if !draft.value.is_finite() || draft.value <= 0.0 {
        errors.push(FieldError::new(FormField::Value, FieldErrorKind::InvalidAmount));
    }
    if let Some(expiry) = draft.expiry_date {
        if expiry.date_naive() < today {
            errors.push(FieldError::new(FormField::ExpiryDate, FieldErrorKind::PastDate));
        }
    }
    if let Some(status) = &draft.status {
        check(&mut errors, FormField::Status, status.as_str(), known_status());
    }

    errors.into_result()
}
