//! # Ledger Core
//!
//! Accounts, balances, and the FIFO message router. This is the synchronous
//! heart of the substrate; [`crate::service::LedgerService`] wraps it for
//! async callers.
//!
//! ## Delivery Discipline
//!
//! For each queued envelope, in order:
//!
//! 1. credit the attached value and burn the flat fee (fee comes out of the
//!    attached value only, never the prior balance);
//! 2. install the carried state init if the account is vacant and the init
//!    derives to the destination address;
//! 3. run the handler (skipped for wallets and bounced envelopes) against a
//!    snapshot: on rejection or outbound overdraft, restore the snapshot and
//!    the prior balance, then queue a bounce carrying `value - fee` back to
//!    the sender;
//! 4. on success, debit the handler's outbound messages and queue them.
//!
//! Step 3 is what makes every contract operation all-or-nothing: a failed
//! message is indistinguishable from one that never arrived, except for the
//! burned fee.

use crate::errors::{ExitReason, LedgerError};
use crate::events::LedgerEvent;
use crate::{DEFAULT_EVENT_CAPACITY, MAX_HOPS_PER_RUN, PROCESSING_FEE, WALLET_CODE_TAG};
use shared_types::{
    derive_account_address, Address, Coins, Contract, MessageContext, MessageEnvelope,
};
use std::collections::{HashMap, VecDeque};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use uuid::Uuid;

// =============================================================================
// ACCOUNTS
// =============================================================================

/// One addressable unit of balance plus (optionally) an installed contract.
/// Accounts without a contract are plain wallets.
#[derive(Default)]
struct Account {
    balance: Coins,
    contract: Option<Box<dyn Contract>>,
}

// =============================================================================
// DELIVERY RECORD
// =============================================================================

/// The inspectable outcome of one processed envelope.
///
/// Callers learn what happened from these records (and from read-only
/// queries), never from a synchronous return value of the contract itself.
#[derive(Debug, Clone)]
pub struct DeliveryRecord {
    /// Correlation id of the processed envelope.
    pub envelope_id: Uuid,
    /// Sending account.
    pub source: Address,
    /// Destination account.
    pub dest: Address,
    /// Value that was attached.
    pub value: Coins,
    /// True if the delivery committed.
    pub success: bool,
    /// Failure reason, if the delivery rolled back.
    pub exit: Option<ExitReason>,
    /// True if this envelope was itself a bounce (refund) delivery.
    pub bounced: bool,
    /// True if a state init was installed during this delivery.
    pub installed: bool,
}

impl DeliveryRecord {
    /// Returns true if the delivery rolled back.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        !self.success
    }

    /// Returns the contract error this delivery failed with, if any.
    #[must_use]
    pub fn contract_error(&self) -> Option<&shared_types::ContractError> {
        self.exit.as_ref().and_then(ExitReason::as_contract_error)
    }
}

// =============================================================================
// LEDGER
// =============================================================================

/// The in-process ledger: account store plus message router.
pub struct Ledger {
    accounts: HashMap<Address, Account>,
    queue: VecDeque<MessageEnvelope>,
    records: Vec<DeliveryRecord>,
    fees_burned: Coins,
    events: broadcast::Sender<LedgerEvent>,
}

impl Ledger {
    /// Creates an empty ledger with the default event channel capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_event_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Creates an empty ledger with the given event channel capacity.
    #[must_use]
    pub fn with_event_capacity(capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity);
        Self {
            accounts: HashMap::new(),
            queue: VecDeque::new(),
            records: Vec::new(),
            fees_burned: Coins::ZERO,
            events,
        }
    }

    /// Subscribes to the ledger event feed.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events.subscribe()
    }

    // -------------------------------------------------------------------------
    // Account management
    // -------------------------------------------------------------------------

    /// Creates a funded wallet account and returns its address.
    pub fn create_wallet(&mut self, initial: Coins) -> Address {
        let id = Uuid::new_v4();
        let address = derive_account_address(WALLET_CODE_TAG, id.as_bytes());
        self.accounts.insert(
            address,
            Account {
                balance: initial,
                contract: None,
            },
        );
        debug!(%address, balance = %initial, "wallet created");
        address
    }

    /// Installs a contract directly at its derived address, endowing it with
    /// `endowment`. Fails if the address already hosts a contract.
    pub fn install_contract(
        &mut self,
        contract: Box<dyn Contract>,
        endowment: Coins,
    ) -> Result<Address, LedgerError> {
        let address = contract.address();
        let account = self.accounts.entry(address).or_default();
        if account.contract.is_some() {
            return Err(LedgerError::AccountOccupied(address));
        }
        let code_tag = contract.code_tag();
        account.balance = account.balance.saturating_add(endowment);
        account.contract = Some(contract);

        info!(%address, code_tag, "contract installed");
        let _ = self
            .events
            .send(LedgerEvent::ContractInstalled { address, code_tag });
        Ok(address)
    }

    // -------------------------------------------------------------------------
    // Read-only queries
    // -------------------------------------------------------------------------

    /// Current balance of an account (zero for unknown addresses).
    #[must_use]
    pub fn balance(&self, address: Address) -> Coins {
        self.accounts
            .get(&address)
            .map_or(Coins::ZERO, |account| account.balance)
    }

    /// Returns true if the account exists (has ever held value or code).
    #[must_use]
    pub fn account_exists(&self, address: Address) -> bool {
        self.accounts.contains_key(&address)
    }

    /// Returns true if a contract is installed at the address.
    #[must_use]
    pub fn has_contract(&self, address: Address) -> bool {
        self.accounts
            .get(&address)
            .is_some_and(|account| account.contract.is_some())
    }

    /// Runs a read-only query against the concrete contract at `address`.
    ///
    /// Queries carry no value, charge no fee, and cannot mutate state.
    /// Returns None if the account is vacant or hosts a different type.
    pub fn query<C, R>(&self, address: Address, f: impl FnOnce(&C) -> R) -> Option<R>
    where
        C: Contract,
    {
        let contract = self.accounts.get(&address)?.contract.as_ref()?;
        contract.as_any().downcast_ref::<C>().map(f)
    }

    /// Total fees burned since genesis.
    #[must_use]
    pub fn fees_burned(&self) -> Coins {
        self.fees_burned
    }

    /// Full delivery history since genesis.
    #[must_use]
    pub fn records(&self) -> &[DeliveryRecord] {
        &self.records
    }

    /// Sum of all account balances. With [`Self::fees_burned`] this is
    /// conserved across deliveries; the invariant checks in the test suites
    /// lean on it.
    #[must_use]
    pub fn total_balance(&self) -> Coins {
        self.accounts
            .values()
            .fold(Coins::ZERO, |acc, account| {
                acc.saturating_add(account.balance)
            })
    }

    // -------------------------------------------------------------------------
    // External sends
    // -------------------------------------------------------------------------

    /// Queues a message from a wallet. The value is debited immediately;
    /// delivery happens on the next [`Self::run`].
    pub fn send(
        &mut self,
        from: Address,
        dest: Address,
        value: Coins,
        body: Vec<u8>,
    ) -> Result<Uuid, LedgerError> {
        self.submit(from, MessageEnvelope::new(from, dest, value, body))
    }

    /// Queues a message carrying a state init for deploy-on-delivery.
    pub fn send_with_init(
        &mut self,
        from: Address,
        dest: Address,
        value: Coins,
        body: Vec<u8>,
        init: Box<dyn Contract>,
    ) -> Result<Uuid, LedgerError> {
        self.submit(
            from,
            MessageEnvelope::new(from, dest, value, body).with_state_init(init),
        )
    }

    fn submit(&mut self, from: Address, envelope: MessageEnvelope) -> Result<Uuid, LedgerError> {
        let wallet = self
            .accounts
            .get_mut(&from)
            .ok_or(LedgerError::UnknownAccount(from))?;
        if wallet.contract.is_some() {
            return Err(LedgerError::ContractAccount(from));
        }
        wallet.balance =
            wallet
                .balance
                .checked_sub(envelope.value)
                .ok_or(LedgerError::InsufficientFunds {
                    account: from,
                    required: envelope.value,
                    available: wallet.balance,
                })?;

        let id = envelope.id;
        debug!(%from, dest = %envelope.dest, value = %envelope.value, "external message queued");
        self.queue.push_back(envelope);
        Ok(id)
    }

    // -------------------------------------------------------------------------
    // Routing
    // -------------------------------------------------------------------------

    /// Processes queued messages to quiescence and returns the records of
    /// this run. Bounded by [`MAX_HOPS_PER_RUN`].
    pub fn run(&mut self) -> Vec<DeliveryRecord> {
        let mut processed = Vec::new();
        while let Some(envelope) = self.queue.pop_front() {
            if processed.len() >= MAX_HOPS_PER_RUN {
                warn!(
                    pending = self.queue.len() + 1,
                    "hop limit reached; leaving remaining messages queued"
                );
                self.queue.push_front(envelope);
                break;
            }
            let record = self.deliver(envelope);
            processed.push(record);
        }
        self.records.extend(processed.iter().cloned());
        processed
    }

    /// Delivers a single envelope. See the module docs for the discipline.
    fn deliver(&mut self, mut envelope: MessageEnvelope) -> DeliveryRecord {
        let account = self.accounts.entry(envelope.dest).or_default();
        let balance_before = account.balance;
        let fee = envelope.value.min(PROCESSING_FEE);
        let spendable = balance_before
            .saturating_add(envelope.value)
            .saturating_sub(fee);

        // Deploy-on-delivery.
        let mut installed_tag = None;
        if account.contract.is_none() && !envelope.bounced {
            if let Some(init) = envelope.state_init.take() {
                if init.address() == envelope.dest {
                    installed_tag = Some(init.code_tag());
                    account.contract = Some(init);
                } else {
                    warn!(
                        dest = %envelope.dest,
                        derived = %init.address(),
                        "state init does not derive to destination; ignored"
                    );
                }
            }
        }

        // Dispatch. Wallets and bounced envelopes take the plain-credit path.
        let mut exit: Option<ExitReason> = None;
        let mut outbound = Vec::new();
        if !envelope.bounced {
            if let Some(contract) = account.contract.as_mut() {
                let snapshot = contract.clone_box();
                let ctx = MessageContext {
                    envelope_id: envelope.id,
                    sender: envelope.source,
                    self_address: envelope.dest,
                    value: envelope.value,
                    balance: spendable,
                };
                match contract.handle(&ctx, &envelope.body) {
                    Ok(messages) => {
                        let mut requested = Coins::ZERO;
                        for message in &messages {
                            requested = requested.saturating_add(message.value);
                        }
                        if requested > spendable {
                            *contract = snapshot;
                            exit = Some(ExitReason::OutboundOverdraft {
                                requested,
                                available: spendable,
                            });
                        } else {
                            outbound = messages;
                        }
                    }
                    Err(err) => {
                        *contract = snapshot;
                        exit = Some(ExitReason::Contract(err));
                    }
                }
            }
        }

        // Commit or roll back.
        let success = exit.is_none();
        if success {
            let debit = outbound
                .iter()
                .fold(Coins::ZERO, |acc, m| acc.saturating_add(m.value));
            account.balance = spendable.saturating_sub(debit);
        } else {
            account.balance = balance_before;
        }
        self.fees_burned = self.fees_burned.saturating_add(fee);

        for message in outbound {
            let mut out = MessageEnvelope::new(
                envelope.dest,
                message.dest,
                message.value,
                message.body,
            );
            if let Some(init) = message.state_init {
                out = out.with_state_init(init);
            }
            debug!(
                source = %envelope.dest,
                dest = %out.dest,
                value = %out.value,
                "outbound message queued"
            );
            self.queue.push_back(out);
        }

        if !success {
            let refund = envelope.value.saturating_sub(fee);
            warn!(
                dest = %envelope.dest,
                sender = %envelope.source,
                reason = %exit.as_ref().map_or_else(String::new, ToString::to_string),
                refund = %refund,
                "delivery failed; rolling back"
            );
            if !refund.is_zero() {
                let bounce = MessageEnvelope {
                    id: Uuid::new_v4(),
                    source: envelope.dest,
                    dest: envelope.source,
                    value: refund,
                    body: Vec::new(),
                    state_init: None,
                    bounced: true,
                };
                let _ = self.events.send(LedgerEvent::MessageBounced {
                    envelope_id: bounce.id,
                    from: envelope.dest,
                    to: envelope.source,
                    value: refund,
                });
                self.queue.push_back(bounce);
            }
        }

        if let Some(code_tag) = installed_tag {
            info!(address = %envelope.dest, code_tag, "contract installed on delivery");
            let _ = self.events.send(LedgerEvent::ContractInstalled {
                address: envelope.dest,
                code_tag,
            });
        }
        let _ = self.events.send(LedgerEvent::MessageDelivered {
            envelope_id: envelope.id,
            dest: envelope.dest,
            success,
        });

        DeliveryRecord {
            envelope_id: envelope.id,
            source: envelope.source,
            dest: envelope.dest,
            value: envelope.value,
            success,
            exit,
            bounced: envelope.bounced,
            installed: installed_tag.is_some(),
        }
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
