//! Create/edit form for a single quote

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, warn};

use crate::core::entity::{Quote, QuoteDraft, QuoteStatus, RecordId};
use crate::core::events::{EventBus, Notification};
use crate::core::reference::{Contact, Deal, ReferenceSource, resolve_display_name};
use crate::core::validation::validators::{parse_amount, parse_date};
use crate::core::validation::{
    FieldError, FieldErrorKind, FormField, QuoteFormData, ValidationErrors, validate_form,
};

/// Whether the form creates a new quote or edits an existing one
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit(Quote),
}

/// Result of asking the form to close
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The form may close, pending edits are dropped
    Discarded,
    /// The user chose to keep editing
    Kept,
}

/// An entry of the contact or deal dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// State of the quote form
///
/// Inputs are held as raw text until [`QuoteForm::submit`] turns them into a
/// [`QuoteDraft`]. The form never talks to the access layer itself; the page
/// owning it decides between create and update.
pub struct QuoteForm {
    mode: FormMode,
    data: QuoteFormData,
    initial: QuoteFormData,
    errors: ValidationErrors,
    contacts: Vec<Contact>,
    deals: Vec<Deal>,
    events: EventBus,
}

impl QuoteForm {
    /// A blank form: status `Draft`, expiry `expiry_days` after `today`
    pub fn create(today: NaiveDate, expiry_days: i64, events: EventBus) -> Self {
        Self::with_data(FormMode::Create, QuoteFormData::blank(today, expiry_days), events)
    }

    /// A form prefilled from `quote`
    pub fn edit(quote: &Quote, events: EventBus) -> Self {
        Self::with_data(
            FormMode::Edit(quote.clone()),
            QuoteFormData::from_quote(quote),
            events,
        )
    }

    fn with_data(mode: FormMode, data: QuoteFormData, events: EventBus) -> Self {
        Self {
            mode,
            initial: data.clone(),
            data,
            errors: ValidationErrors::new(),
            contacts: Vec::new(),
            deals: Vec::new(),
            events,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Create New Quote",
            FormMode::Edit(_) => "Edit Quote",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Create Quote",
            FormMode::Edit(_) => "Update Quote",
        }
    }

    /// Fetch the dropdown records
    ///
    /// A failing source leaves its list empty and publishes an error
    /// notification; the other source is still loaded.
    pub async fn load_references(
        &mut self,
        contacts: &dyn ReferenceSource<Contact>,
        deals: &dyn ReferenceSource<Deal>,
    ) {
        match contacts.get_all().await {
            Ok(records) => self.contacts = records,
            Err(e) => {
                warn!(error = %e, "loading contacts failed");
                self.contacts.clear();
                self.events.notify(Notification::error("Failed to load contacts"));
            }
        }

        match deals.get_all().await {
            Ok(records) => self.deals = records,
            Err(e) => {
                warn!(error = %e, "loading deals failed");
                self.deals.clear();
                self.events.notify(Notification::error("Failed to load deals"));
            }
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    pub fn contact_options(&self) -> Vec<SelectOption> {
        self.contacts
            .iter()
            .map(|c| SelectOption {
                value: c.id.to_string(),
                label: c.option_label(),
            })
            .collect()
    }

    pub fn deal_options(&self) -> Vec<SelectOption> {
        self.deals
            .iter()
            .map(|d| SelectOption {
                value: d.id.to_string(),
                label: d.option_label(),
            })
            .collect()
    }

    pub fn data(&self) -> &QuoteFormData {
        &self.data
    }

    pub fn field(&self, field: FormField) -> &str {
        self.data.get(field)
    }

    /// Change one input; its pending error is cleared
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.data.set(field, value);
        self.errors.clear(field);
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error_for(&self, field: FormField) -> Option<&FieldError> {
        self.errors.get(field)
    }

    /// Run every check and keep the violations for display
    pub fn validate(&mut self, today: NaiveDate) -> bool {
        self.errors = match validate_form(&self.data, today) {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        self.errors.is_empty()
    }

    /// Validate and build the normalized payload
    ///
    /// Contact and deal names are resolved from the loaded reference records;
    /// the expiry is midnight UTC of the chosen day.
    pub fn submit(&mut self, today: NaiveDate) -> Result<QuoteDraft, ValidationErrors> {
        if !self.validate(today) {
            debug!(errors = self.errors.len(), "quote form rejected");
            return Err(self.errors.clone());
        }

        let Ok(contact_id) = self.data.contact_id.trim().parse::<RecordId>() else {
            self.errors
                .push(FieldError::new(FormField::Contact, FieldErrorKind::Required));
            return Err(self.errors.clone());
        };

        let Some(value) = parse_amount(&self.data.value) else {
            self.errors
                .push(FieldError::new(FormField::Value, FieldErrorKind::InvalidAmount));
            return Err(self.errors.clone());
        };
        let Some(expiry) = parse_date(&self.data.expiry_date) else {
            self.errors
                .push(FieldError::new(FormField::ExpiryDate, FieldErrorKind::InvalidDate));
            return Err(self.errors.clone());
        };

        let contact_name = resolve_display_name(
            self.contacts.iter().find(|c| c.id == contact_id),
            contact_id,
        );

        let mut draft = QuoteDraft::new(self.data.title.trim(), contact_id, value)
            .with_contact_name(contact_name)
            .with_status(QuoteStatus::from(self.data.status.as_str()))
            .with_description(self.data.description.clone())
            .with_expiry(expiry.and_time(NaiveTime::MIN).and_utc());

        if let Ok(deal_id) = self.data.deal_id.trim().parse::<RecordId>() {
            let deal_name =
                resolve_display_name(self.deals.iter().find(|d| d.id == deal_id), deal_id);
            draft = draft.with_deal(deal_id, Some(deal_name));
        }

        Ok(draft)
    }

    /// Whether any input differs from what the form was opened with
    pub fn has_unsaved_changes(&self) -> bool {
        self.data != self.initial
    }

    /// Close the form, asking `confirm` first when there are unsaved changes
    pub fn cancel(&self, confirm: impl FnOnce() -> bool) -> CancelOutcome {
        if !self.has_unsaved_changes() || confirm() {
            CancelOutcome::Discarded
        } else {
            CancelOutcome::Kept
        }
    }
}
