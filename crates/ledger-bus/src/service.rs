//! # Ledger Service
//!
//! Async façade over [`Ledger`] for callers living in a tokio runtime:
//! submit-and-run with delivery records back, read-only queries, and
//! running statistics.
//!
//! Domain logic stays synchronous; this layer only adds shared ownership
//! (`Arc<RwLock<_>>`), instrumentation, and counters.

use crate::errors::LedgerError;
use crate::events::LedgerEvent;
use crate::ledger::{DeliveryRecord, Ledger};
use shared_types::{Address, Coins, Contract};

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{info, instrument};

/// Ledger service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Capacity of the ledger event broadcast channel.
    pub event_channel_capacity: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            event_channel_capacity: crate::DEFAULT_EVENT_CAPACITY,
        }
    }
}

/// Running statistics for the ledger service.
#[derive(Debug, Default, Clone)]
pub struct ServiceStats {
    /// Total envelopes processed.
    pub messages_processed: u64,
    /// Deliveries that committed.
    pub successful_deliveries: u64,
    /// Deliveries that rolled back.
    pub failed_deliveries: u64,
    /// Bounce (refund) deliveries.
    pub bounced_deliveries: u64,
    /// Contracts installed (directly or on delivery).
    pub contracts_installed: u64,
    /// Total fees burned.
    pub fees_burned: Coins,
}

/// Primary async API for driving the ledger.
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// Submits an external message from a wallet, processes the queue to
    /// quiescence, and returns the delivery records of this run.
    async fn submit(
        &self,
        from: Address,
        dest: Address,
        value: Coins,
        body: Vec<u8>,
    ) -> Result<Vec<DeliveryRecord>, LedgerError>;

    /// Like [`Self::submit`], with a state init for deploy-on-delivery.
    async fn submit_with_init(
        &self,
        from: Address,
        dest: Address,
        value: Coins,
        body: Vec<u8>,
        init: Box<dyn Contract>,
    ) -> Result<Vec<DeliveryRecord>, LedgerError>;

    /// Current balance of an account.
    async fn balance(&self, address: Address) -> Coins;

    /// Current service statistics.
    async fn stats(&self) -> ServiceStats;
}

/// Shared-ownership wrapper around a [`Ledger`].
pub struct LedgerService {
    ledger: Arc<RwLock<Ledger>>,
    stats: Arc<RwLock<ServiceStats>>,
}

impl LedgerService {
    /// Creates a service around a fresh ledger.
    #[must_use]
    pub fn new(config: &ServiceConfig) -> Self {
        Self::with_ledger(Ledger::with_event_capacity(config.event_channel_capacity))
    }

    /// Wraps an existing ledger (useful when tests pre-seed accounts).
    #[must_use]
    pub fn with_ledger(ledger: Ledger) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(ledger)),
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        }
    }

    /// Creates a funded wallet.
    pub async fn create_wallet(&self, initial: Coins) -> Address {
        self.ledger.write().await.create_wallet(initial)
    }

    /// Installs a contract directly at its derived address.
    pub async fn install_contract(
        &self,
        contract: Box<dyn Contract>,
        endowment: Coins,
    ) -> Result<Address, LedgerError> {
        let address = self
            .ledger
            .write()
            .await
            .install_contract(contract, endowment)?;
        self.stats.write().await.contracts_installed += 1;
        Ok(address)
    }

    /// Subscribes to the ledger event feed.
    pub async fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.ledger.read().await.subscribe()
    }

    /// Runs a read-only query against the concrete contract at `address`.
    pub async fn query<C, R>(&self, address: Address, f: impl FnOnce(&C) -> R + Send) -> Option<R>
    where
        C: Contract,
    {
        self.ledger.read().await.query(address, f)
    }

    async fn absorb(&self, records: &[DeliveryRecord]) {
        let fees = self.ledger.read().await.fees_burned();
        let mut stats = self.stats.write().await;
        for record in records {
            stats.messages_processed += 1;
            if record.success {
                stats.successful_deliveries += 1;
            } else {
                stats.failed_deliveries += 1;
            }
            if record.bounced {
                stats.bounced_deliveries += 1;
            }
            if record.installed {
                stats.contracts_installed += 1;
            }
        }
        stats.fees_burned = fees;
    }
}

#[async_trait]
impl LedgerApi for LedgerService {
    #[instrument(skip(self, body), fields(%from, %dest, %value))]
    async fn submit(
        &self,
        from: Address,
        dest: Address,
        value: Coins,
        body: Vec<u8>,
    ) -> Result<Vec<DeliveryRecord>, LedgerError> {
        let records = {
            let mut ledger = self.ledger.write().await;
            ledger.send(from, dest, value, body)?;
            ledger.run()
        };
        self.absorb(&records).await;
        info!(deliveries = records.len(), "run complete");
        Ok(records)
    }

    #[instrument(skip(self, body, init), fields(%from, %dest, %value))]
    async fn submit_with_init(
        &self,
        from: Address,
        dest: Address,
        value: Coins,
        body: Vec<u8>,
        init: Box<dyn Contract>,
    ) -> Result<Vec<DeliveryRecord>, LedgerError> {
        let records = {
            let mut ledger = self.ledger.write().await;
            ledger.send_with_init(from, dest, value, body, init)?;
            ledger.run()
        };
        self.absorb(&records).await;
        info!(deliveries = records.len(), "run complete");
        Ok(records)
    }

    async fn balance(&self, address: Address) -> Coins {
        self.ledger.read().await.balance(address)
    }

    async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }
}

// =============================================================================
// TESTS
// =============================================================================
