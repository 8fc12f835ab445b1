//! # Test Fixtures
//!
//! A small bench wrapping a ledger with funded wallets and helpers for the
//! message flows every suite repeats: deploy-and-configure, issue,
//! withdraw, transfer.

use ledger_bus::{DeliveryRecord, Ledger, PROCESSING_FEE};
use pm_profile_factory::prelude::{
    factory_address, FactoryData, FactoryState, ProfileFactory, STORAGE_RESERVE,
};
use pm_profile_factory::FactoryMessage;
use pm_profile_item::{item_address, ItemData, ItemMessage, ProfileItem};
use shared_types::{Address, Coins, ContentBlob};
use std::sync::Once;

/// Collection metadata reference used throughout the suites.
pub const COLLECTION_URI: &str = "ipfs://bafkreiau-collection-metadata";

/// Per-item metadata reference used throughout the suites.
pub const PROFILE_URI: &str = "ipfs://bafkreiag-profile-metadata";

/// Funds each bench wallet starts with.
pub const INITIAL_WALLET_FUNDS: Coins = Coins::from_coins(100_000);

/// Mint price most suites configure.
pub const MINT_PRICE: Coins = Coins::from_coins(5);

/// Value that leaves a freshly configured factory holding exactly the
/// reserve: the reserve itself plus the one fee the delivery burns.
#[must_use]
pub fn deploy_value() -> Coins {
    STORAGE_RESERVE.saturating_add(PROCESSING_FEE)
}

/// Installs a fmt subscriber once for the whole test binary.
pub fn init_tracing() {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// A ledger with three funded wallets and one (not yet deployed) factory
/// address derived for the owner.
pub struct TestBench {
    pub ledger: Ledger,
    pub owner: Address,
    pub student: Address,
    pub stranger: Address,
    pub factory: Address,
}

impl TestBench {
    /// Fresh bench; the factory account is derived but vacant.
    #[must_use]
    pub fn new() -> Self {
        init_tracing();
        let mut ledger = Ledger::new();
        let owner = ledger.create_wallet(INITIAL_WALLET_FUNDS);
        let student = ledger.create_wallet(INITIAL_WALLET_FUNDS);
        let stranger = ledger.create_wallet(INITIAL_WALLET_FUNDS);
        let factory = factory_address(owner, 0);
        Self {
            ledger,
            owner,
            student,
            stranger,
            factory,
        }
    }

    /// Deploys and configures the owner's factory at `price` with exactly
    /// enough value to end at the reserve.
    pub fn deploy_factory(&mut self, price: Coins) -> Vec<DeliveryRecord> {
        self.configure_with_init(self.owner, price, deploy_value())
    }

    /// Sends a Configure carrying the owner's factory state init.
    pub fn configure_with_init(
        &mut self,
        from: Address,
        price: Coins,
        value: Coins,
    ) -> Vec<DeliveryRecord> {
        let body = FactoryMessage::Configure {
            content: ContentBlob::off_chain(COLLECTION_URI),
            price,
        }
        .encode()
        .expect("encode configure");
        self.ledger
            .send_with_init(
                from,
                self.factory,
                value,
                body,
                Box::new(ProfileFactory::new(self.owner, 0)),
            )
            .expect("queue configure");
        self.ledger.run()
    }

    /// Sends a Configure without a state init (factory already deployed).
    pub fn configure(&mut self, from: Address, price: Coins, value: Coins) -> Vec<DeliveryRecord> {
        let body = FactoryMessage::Configure {
            content: ContentBlob::off_chain(COLLECTION_URI),
            price,
        }
        .encode()
        .expect("encode configure");
        self.ledger
            .send(from, self.factory, value, body)
            .expect("queue configure");
        self.ledger.run()
    }

    /// Sends an Issue with the standard profile content.
    pub fn issue(&mut self, from: Address, value: Coins) -> Vec<DeliveryRecord> {
        let body = FactoryMessage::Issue {
            profile_content: ContentBlob::off_chain(PROFILE_URI),
        }
        .encode()
        .expect("encode issue");
        self.ledger
            .send(from, self.factory, value, body)
            .expect("queue issue");
        self.ledger.run()
    }

    /// Sends a Withdraw.
    pub fn withdraw(&mut self, from: Address, value: Coins) -> Vec<DeliveryRecord> {
        let body = FactoryMessage::Withdraw.encode().expect("encode withdraw");
        self.ledger
            .send(from, self.factory, value, body)
            .expect("queue withdraw");
        self.ledger.run()
    }

    /// Sends an empty-body top-up to the factory.
    pub fn top_up_factory(&mut self, from: Address, value: Coins) -> Vec<DeliveryRecord> {
        self.ledger
            .send(from, self.factory, value, Vec::new())
            .expect("queue top-up");
        self.ledger.run()
    }

    /// Sends a Transfer to the item minted at `index`.
    pub fn transfer_item(
        &mut self,
        from: Address,
        index: u64,
        value: Coins,
    ) -> Vec<DeliveryRecord> {
        let body = ItemMessage::Transfer {
            query_id: index,
            new_holder: from,
            response_destination: from,
            custom_payload: ContentBlob::empty(),
            forward_amount: Coins::ZERO,
            forward_payload: ContentBlob::empty(),
        }
        .encode()
        .expect("encode transfer");
        self.ledger
            .send(from, item_address(self.factory, index), value, body)
            .expect("queue transfer");
        self.ledger.run()
    }

    // -------------------------------------------------------------------------
    // Read-only views
    // -------------------------------------------------------------------------

    /// The factory's full configuration tuple.
    #[must_use]
    pub fn factory_data(&self) -> FactoryData {
        self.ledger
            .query(self.factory, |f: &ProfileFactory| f.factory_data())
            .expect("factory installed")
    }

    /// Snapshot of the factory's state (for invariant checks).
    #[must_use]
    pub fn factory_state(&self) -> FactoryState {
        self.ledger
            .query(self.factory, |f: &ProfileFactory| f.state().clone())
            .expect("factory installed")
    }

    /// The factory's live balance.
    #[must_use]
    pub fn factory_balance(&self) -> Coins {
        self.ledger.balance(self.factory)
    }

    /// The data tuple of the item at `index`, if it has been deployed.
    #[must_use]
    pub fn item_data(&self, index: u64) -> Option<ItemData> {
        self.ledger
            .query(item_address(self.factory, index), |i: &ProfileItem| i.data())
    }
}

impl Default for TestBench {
    fn default() -> Self {
        Self::new()
    }
}
