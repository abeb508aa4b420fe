//! Integration tests for InMemoryQuoteService using the quote harness.
//!
//! This file invokes `quote_service_tests!` to validate that the in-memory
//! access layer conforms to the QuoteService contract, then covers what is
//! specific to it: seeding, injected stores and notifications.

#[macro_use]
mod quote_harness;

use quote_harness::*;
use quotes::core::{AppEvent, NotificationLevel, QuoteEvent, QuoteService};
use quotes::storage::seed::seeded_store;

quote_service_tests!(empty_service());

#[tokio::test]
async fn test_ids_continue_after_injected_records() {
    let store = seeded_store().unwrap();
    let service = quotes::storage::InMemoryQuoteService::new(
        store,
        quotes::core::EventBus::default(),
        &quotes::config::QuotesConfig::instant(),
    );

    let created = service.create(draft("Next", 1, 10.0)).await.unwrap();

    assert_eq!(created.id, 6);
    assert_eq!(created.quotation_number, this_year_number(6));
    assert_eq!(service.get_all().await.unwrap().len(), 6);
}

#[tokio::test]
async fn test_store_injected_twice_is_shared() {
    let service = service_with(Vec::new());
    let twin = quotes::storage::InMemoryQuoteService::new(
        service.store().clone(),
        quotes::core::EventBus::default(),
        &quotes::config::QuotesConfig::instant(),
    );

    service.create(draft("Shared", 1, 10.0)).await.unwrap();

    assert_eq!(twin.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_mutations_publish_notifications() {
    let service = empty_service();
    let mut events = service.events().subscribe();

    let quote = service.create(draft("Notified", 1, 10.0)).await.unwrap();
    service.update(quote.id, draft("Notified again", 1, 12.0)).await.unwrap();
    service.delete(quote.id).await.unwrap();
    let _ = service.delete(quote.id).await;

    let mut messages = Vec::new();
    let mut deleted = None;
    while let Ok(envelope) = events.try_recv() {
        match envelope.event {
            AppEvent::Notification(n) => messages.push((n.level, n.message)),
            AppEvent::Quote(QuoteEvent::Deleted { quote_id }) => deleted = Some(quote_id),
            AppEvent::Quote(_) => {}
        }
    }

    assert_eq!(
        messages,
        vec![
            (NotificationLevel::Success, "Quote created successfully".to_string()),
            (NotificationLevel::Success, "Quote updated successfully".to_string()),
            (NotificationLevel::Success, "Quote deleted successfully".to_string()),
            (NotificationLevel::Error, "Quote not found".to_string()),
        ]
    );
    assert_eq!(deleted, Some(quote.id));
}

#[tokio::test]
async fn test_non_finite_value_is_an_unexpected_failure() {
    let service = empty_service();

    let err = service.create(draft("Broken", 1, f64::INFINITY)).await.unwrap_err();

    assert!(!err.is_not_found());
    assert!(service.get_all().await.unwrap().is_empty());
}
