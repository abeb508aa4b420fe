//! Reference records consumed by the quote form
//!
//! Contacts and Deals live in their own services; quotes only need their
//! `get_all` listing and a display name for each record.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::core::entity::RecordId;
use crate::core::format::format_number;

/// Records exposing optional name-like fields
///
/// `name_candidates` lists the candidates in priority order;
/// [`resolve_display_name`] picks the first one that is present.
pub trait NameFields {
    fn record_id(&self) -> RecordId;

    /// Name candidates, highest priority first
    fn name_candidates(&self) -> Vec<Option<String>>;

    /// Name used when no candidate is present
    fn placeholder(id: RecordId) -> String;
}

/// Return the first present, non-blank name of `record`, or the placeholder
/// for `id` when the record is missing or has no usable name
pub fn resolve_display_name<R: NameFields>(record: Option<&R>, id: RecordId) -> String {
    record
        .into_iter()
        .flat_map(|r| r.name_candidates())
        .flatten()
        .map(|name| name.trim().to_string())
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| R::placeholder(id))
}

fn blank_to_none(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// A contact a quote is addressed to
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: RecordId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Contact {
    /// First and last name joined, when at least one is set
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [blank_to_none(&self.first_name), blank_to_none(&self.last_name)]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    /// Label shown in the contact dropdown
    pub fn option_label(&self) -> String {
        let name = resolve_display_name(Some(self), self.record_id());
        match blank_to_none(&self.company) {
            Some(company) => format!("{} - {}", name, company),
            None => name,
        }
    }
}

impl NameFields for Contact {
    fn record_id(&self) -> RecordId {
        self.id
    }

    fn name_candidates(&self) -> Vec<Option<String>> {
        vec![self.name.clone(), self.full_name()]
    }

    fn placeholder(id: RecordId) -> String {
        format!("Contact {}", id)
    }
}

/// A deal a quote may belong to
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: RecordId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
}

impl Deal {
    /// Label shown in the deal dropdown
    pub fn option_label(&self) -> String {
        let name = resolve_display_name(Some(self), self.record_id());
        match self.value {
            Some(value) if value != 0.0 => format!("{} - ${}", name, format_number(value)),
            _ => name,
        }
    }
}

impl NameFields for Deal {
    fn record_id(&self) -> RecordId {
        self.id
    }

    fn name_candidates(&self) -> Vec<Option<String>> {
        vec![self.name.clone(), self.title.clone()]
    }

    fn placeholder(id: RecordId) -> String {
        format!("Deal {}", id)
    }
}

/// A service able to list reference records
#[async_trait]
pub trait ReferenceSource<T>: Send + Sync {
    async fn get_all(&self) -> Result<Vec<T>>;
}

/// Fixed in-memory list of reference records
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory<T> {
    records: Vec<T>,
}

impl<T> StaticDirectory<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }
}

impl<T: DeserializeOwned> StaticDirectory<T> {
    /// Load records from a JSON array
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

#[async_trait]
impl<T> ReferenceSource<T> for StaticDirectory<T>
where
    T: Clone + Send + Sync,
{
    async fn get_all(&self) -> Result<Vec<T>> {
        Ok(self.records.clone())
    }
}
