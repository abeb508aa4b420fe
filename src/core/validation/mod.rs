//! Validation of quote input
//!
//! Field checks live in [`validators`]; [`rules`] wires them to the quote
//! form fields and collects every violation before rejecting a submission.

pub mod rules;
pub mod validators;

use serde::Serialize;
use std::fmt;

pub use rules::{QuoteFormData, validate_draft, validate_form};

/// Fields of the quote form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FormField {
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "contactId")]
    Contact,
    #[serde(rename = "dealId")]
    Deal,
    #[serde(rename = "value")]
    Value,
    #[serde(rename = "status")]
    Status,
    #[serde(rename = "description")]
    Description,
    #[serde(rename = "expiryDate")]
    ExpiryDate,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Title,
        FormField::Contact,
        FormField::Deal,
        FormField::Value,
        FormField::Status,
        FormField::Description,
        FormField::ExpiryDate,
    ];

    /// Input name of the field
    pub fn name(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Contact => "contactId",
            FormField::Deal => "dealId",
            FormField::Value => "value",
            FormField::Status => "status",
            FormField::Description => "description",
            FormField::ExpiryDate => "expiryDate",
        }
    }

    /// Human label used in error messages
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Quote title",
            FormField::Contact => "Contact",
            FormField::Deal => "Related deal",
            FormField::Value => "Quote value",
            FormField::Status => "Status",
            FormField::Description => "Description",
            FormField::ExpiryDate => "Expiry date",
        }
    }
}

/// Why a field failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldErrorKind {
    Required,
    InvalidAmount,
    InvalidDate,
    PastDate,
    InvalidStatus,
}

/// A single field violation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: FormField,
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(field: FormField, kind: FieldErrorKind) -> Self {
        let label = field.label();
        let message = match kind {
            FieldErrorKind::Required => format!("{} is required", label),
            FieldErrorKind::InvalidAmount => format!("{} must be greater than 0", label),
            FieldErrorKind::InvalidDate => format!("{} is not a valid date", label),
            FieldErrorKind::PastDate => format!("{} cannot be in the past", label),
            FieldErrorKind::InvalidStatus => format!("{} is not a recognized value", label),
        };
        Self {
            field,
            kind,
            message,
        }
    }
}

/// All violations found in one validation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// First error recorded for `field`
    pub fn get(&self, field: FormField) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn has(&self, field: FormField, kind: FieldErrorKind) -> bool {
        self.0.iter().any(|e| e.field == field && e.kind == kind)
    }

    /// Drop the errors of one field
    pub fn clear(&mut self, field: FormField) {
        self.0.retain(|e| e.field != field);
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field.name(), e.message))
            .collect();
        write!(f, "Validation errors: {}", msgs.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}
