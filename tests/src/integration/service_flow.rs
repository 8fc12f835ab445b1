//! # Async Service Flows
//!
//! The same issuance lifecycle driven through the async `LedgerService`
//! façade: submit-and-run, stats, and the broadcast event feed.

#[cfg(test)]
mod tests {
    use crate::support::{deploy_value, COLLECTION_URI, MINT_PRICE, PROFILE_URI};
    use ledger_bus::{LedgerApi, LedgerEvent, LedgerService, ServiceConfig};
    use pm_profile_factory::prelude::{factory_address, ProfileFactory, FACTORY_CODE_TAG};
    use pm_profile_factory::FactoryMessage;
    use pm_profile_item::{item_address, ProfileItem};
    use shared_types::{Coins, ContentBlob};
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_full_lifecycle_through_the_service() {
        let service = LedgerService::new(&ServiceConfig::default());
        let owner = service.create_wallet(Coins::from_coins(1_000)).await;
        let student = service.create_wallet(Coins::from_coins(1_000)).await;
        let factory = factory_address(owner, 0);

        // Deploy and configure.
        let body = FactoryMessage::Configure {
            content: ContentBlob::off_chain(COLLECTION_URI),
            price: MINT_PRICE,
        }
        .encode()
        .unwrap();
        let records = service
            .submit_with_init(
                owner,
                factory,
                deploy_value(),
                body,
                Box::new(ProfileFactory::new(owner, 0)),
            )
            .await
            .unwrap();
        assert!(records[0].success);
        assert!(records[0].installed);

        // Issue for the student.
        let body = FactoryMessage::Issue {
            profile_content: ContentBlob::off_chain(PROFILE_URI),
        }
        .encode()
        .unwrap();
        let records = service
            .submit(student, factory, MINT_PRICE, body)
            .await
            .unwrap();
        assert!(records.iter().all(|r| r.success));

        let holder = service
            .query(item_address(factory, 0), |item: &ProfileItem| {
                item.data().holder
            })
            .await
            .unwrap();
        assert_eq!(holder, student);

        let stats = service.stats().await;
        assert_eq!(stats.messages_processed, 3);
        assert_eq!(stats.failed_deliveries, 0);
        assert_eq!(stats.contracts_installed, 2);
    }

    #[tokio::test]
    async fn test_event_feed_reports_install_and_delivery() {
        let service = LedgerService::new(&ServiceConfig::default());
        let owner = service.create_wallet(Coins::from_coins(1_000)).await;
        let factory = factory_address(owner, 0);
        let mut feed = service.subscribe().await;

        let body = FactoryMessage::Configure {
            content: ContentBlob::off_chain(COLLECTION_URI),
            price: MINT_PRICE,
        }
        .encode()
        .unwrap();
        service
            .submit_with_init(
                owner,
                factory,
                deploy_value(),
                body,
                Box::new(ProfileFactory::new(owner, 0)),
            )
            .await
            .unwrap();

        let first = timeout(Duration::from_millis(100), feed.recv())
            .await
            .expect("timeout waiting for event")
            .expect("should receive event");
        match first {
            LedgerEvent::ContractInstalled { address, code_tag } => {
                assert_eq!(address, factory);
                assert_eq!(code_tag, FACTORY_CODE_TAG);
            }
            other => panic!("expected ContractInstalled, got {other:?}"),
        }

        let second = timeout(Duration::from_millis(100), feed.recv())
            .await
            .expect("timeout waiting for event")
            .expect("should receive event");
        assert!(matches!(
            second,
            LedgerEvent::MessageDelivered { success: true, .. }
        ));
    }

    #[tokio::test]
    async fn test_failed_operation_shows_up_in_stats() {
        let service = LedgerService::new(&ServiceConfig::default());
        let owner = service.create_wallet(Coins::from_coins(1_000)).await;
        let stranger = service.create_wallet(Coins::from_coins(1_000)).await;
        let factory = factory_address(owner, 0);

        service
            .install_contract(Box::new(ProfileFactory::new(owner, 0)), Coins::ZERO)
            .await
            .unwrap();

        let body = FactoryMessage::Withdraw.encode().unwrap();
        let records = service
            .submit(stranger, factory, Coins::from_coins(1), body)
            .await
            .unwrap();
        assert!(records[0].is_failure());

        let stats = service.stats().await;
        assert_eq!(stats.failed_deliveries, 1);
        assert_eq!(stats.bounced_deliveries, 1);
    }
}
