//! Contract tests every `QuoteService` implementation must pass
//!
//! The factory expression must produce an empty service.

#[macro_export]
macro_rules! quote_service_tests {
    ($factory:expr) => {
        mod quote_service_contract_tests {
            use super::*;
            use quotes::core::{Entity, QuoteService, QuoteStatus};
            use quotes::views::QuoteCardView;

            #[tokio::test]
            async fn test_create_assigns_increasing_ids() {
                let service = $factory;

                let first = service.create(draft("First", 1, 100.0)).await.unwrap();
                let second = service.create(draft("Second", 1, 200.0)).await.unwrap();
                let third = service.create(draft("Third", 2, 300.0)).await.unwrap();

                assert!(first.id < second.id && second.id < third.id);
            }

            #[tokio::test]
            async fn test_first_quotation_numbers() {
                let service = $factory;

                let first = service.create(draft("First", 1, 100.0)).await.unwrap();
                let second = service.create(draft("Second", 1, 200.0)).await.unwrap();

                assert_eq!(first.quotation_number, this_year_number(1));
                assert_eq!(second.quotation_number, this_year_number(2));
            }

            #[tokio::test]
            async fn test_create_fills_defaults() {
                let service = $factory;

                let quote = service
                    .create(quotes::core::QuoteDraft::new("Bare", 3, 50.0))
                    .await
                    .unwrap();

                assert_eq!(quote.status, QuoteStatus::Draft);
                assert_eq!(quote.description, "");
                assert_eq!(quote.contact_name, "Contact 3");
                assert_eq!(quote.created_at, quote.updated_at);
                let days = (quote.expiry_date - quote.created_at).num_days();
                assert_eq!(days, 30);
            }

            #[tokio::test]
            async fn test_quotation_number_is_stable() {
                let service = $factory;
                let created = service.create(draft("Stable", 1, 100.0)).await.unwrap();

                let fetched = service.get_by_id(created.id).await.unwrap();
                assert_eq!(fetched.quotation_number, created.quotation_number);

                let updated = service
                    .update(created.id, draft("Renamed", 1, 150.0))
                    .await
                    .unwrap();
                assert_eq!(updated.quotation_number, created.quotation_number);
            }

            #[tokio::test]
            async fn test_get_missing_is_none() {
                let service = $factory;
                assert!(service.get_by_id(999).await.is_none());
            }

            #[tokio::test]
            async fn test_update_missing_leaves_store_unchanged() {
                let service = $factory;
                service.create(draft("Kept", 1, 100.0)).await.unwrap();
                let before = service.get_all().await.unwrap();

                let err = service.update(999, draft("Ghost", 1, 1.0)).await.unwrap_err();

                assert!(err.is_not_found());
                assert_eq!(service.get_all().await.unwrap(), before);
            }

            #[tokio::test]
            async fn test_delete_missing_leaves_store_unchanged() {
                let service = $factory;
                service.create(draft("Kept", 1, 100.0)).await.unwrap();
                let before = service.get_all().await.unwrap();

                let err = service.delete(999).await.unwrap_err();

                assert!(err.is_not_found());
                assert_eq!(service.get_all().await.unwrap(), before);
            }

            #[tokio::test]
            async fn test_delete_removes_exactly_one() {
                let service = $factory;
                let doomed = service.create(draft("Doomed", 1, 100.0)).await.unwrap();
                service.create(draft("Survivor", 1, 100.0)).await.unwrap();

                service.delete(doomed.id).await.unwrap();

                let remaining = service.get_all().await.unwrap();
                assert_eq!(remaining.len(), 1);
                assert_eq!(remaining[0].title, "Survivor");
                assert!(service.get_by_id(doomed.id).await.is_none());
            }

            #[tokio::test]
            async fn test_status_only_update() {
                let service = $factory;
                let created = service.create(draft("Deal closer", 1, 900.0)).await.unwrap();
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;

                let mut change = quotes::core::QuoteDraft::from(&created);
                change.status = Some(QuoteStatus::Accepted);
                let updated = service.update(created.id, change).await.unwrap();

                assert_eq!(updated.status, QuoteStatus::Accepted);
                assert!(updated.updated_at() > created.updated_at());
                assert_eq!(updated.created_at(), created.created_at());
                assert_eq!(updated.quotation_number, created.quotation_number);
                assert_eq!(updated.title, created.title);

                let card = QuoteCardView::build(&updated, chrono::Utc::now(), 7);
                assert!(card.won);
            }

            #[tokio::test]
            async fn test_unknown_status_is_stored_verbatim() {
                let service = $factory;

                let quote = service
                    .create(draft("Odd", 1, 10.0).with_status(QuoteStatus::from("Pending")))
                    .await
                    .unwrap();

                let fetched = service.get_by_id(quote.id).await.unwrap();
                assert_eq!(fetched.status.as_str(), "Pending");
            }

            #[tokio::test]
            async fn test_filtered_listings() {
                let service = $factory;
                service
                    .create(draft("A", 1, 10.0).with_deal(7, Some("Expansion".to_string())))
                    .await
                    .unwrap();
                service
                    .create(draft("B", 2, 20.0).with_status(QuoteStatus::Sent))
                    .await
                    .unwrap();
                service
                    .create(
                        draft("C", 1, 30.0)
                            .with_status(QuoteStatus::Sent)
                            .with_deal(8, None),
                    )
                    .await
                    .unwrap();

                let by_contact = service.get_by_contact_id(1).await.unwrap();
                assert_eq!(by_contact.len(), 2);
                assert!(by_contact.iter().all(|q| q.contact_id == 1));

                let by_deal = service.get_by_deal_id(7).await.unwrap();
                assert_eq!(by_deal.len(), 1);
                assert_eq!(by_deal[0].title, "A");

                let sent = service.get_by_status(&QuoteStatus::Sent).await.unwrap();
                let titles: Vec<&str> = sent.iter().map(|q| q.title.as_str()).collect();
                assert_eq!(titles, vec!["B", "C"]);

                assert!(service.get_by_contact_id(42).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_reads_are_independent_copies() {
                let service = $factory;
                let created = service.create(draft("Original", 1, 10.0)).await.unwrap();

                let mut copy = service.get_by_id(created.id).await.unwrap();
                copy.title = "Mutated locally".to_string();

                let fetched = service.get_by_id(created.id).await.unwrap();
                assert_eq!(fetched.title, "Original");
            }
        }
    };
}
