//! Bundled seed data, loaded once at startup

use anyhow::{Context, Result, bail};

use crate::core::entity::Quote;
use crate::core::quotation::QuotationNumber;
use crate::core::reference::{Contact, Deal, StaticDirectory};
use crate::storage::in_memory::RecordStore;

const QUOTES_JSON: &str = include_str!("../../data/quotes.json");
const CONTACTS_JSON: &str = include_str!("../../data/contacts.json");
const DEALS_JSON: &str = include_str!("../../data/deals.json");

/// The seed quotes, in file order
///
/// Every quotation number must be well formed and carry the quote's id.
pub fn seed_quotes() -> Result<Vec<Quote>> {
    let quotes: Vec<Quote> =
        serde_json::from_str(QUOTES_JSON).context("Failed to parse seed quotes")?;
    for quote in &quotes {
        let number = QuotationNumber::parse(&quote.quotation_number)
            .filter(|number| number.sequence == quote.id as u64);
        if number.is_none() {
            bail!(
                "seed quote {} has quotation number '{}'",
                quote.id,
                quote.quotation_number
            );
        }
    }
    Ok(quotes)
}

/// A fresh store holding the seed quotes
pub fn seeded_store() -> Result<RecordStore<Quote>> {
    RecordStore::with_records(seed_quotes()?)
}

pub fn seed_contacts() -> Result<StaticDirectory<Contact>> {
    StaticDirectory::from_json_str(CONTACTS_JSON).context("Failed to parse seed contacts")
}

pub fn seed_deals() -> Result<StaticDirectory<Deal>> {
    StaticDirectory::from_json_str(DEALS_JSON).context("Failed to parse seed deals")
}
