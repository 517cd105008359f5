//! Off-chain account: the same transitions over plain memory.
//!
//! Used by the signer tooling to dry-run relayed transactions and by tests. The contract
//! gets atomicity from EVM reverts; [`InMemoryWallet`] gets it by running each call against
//! a copy of the committed account and swapping the copy in only on success.

use alloc::{collections::BTreeSet, vec::Vec};

use alloy_primitives::{Address, U256};

use crate::{
    account::{AccountState, RecoveryProposal, RecoveryStatus},
    digest::{Eip712Domain, MetaTransaction},
    errors::WalletError,
    events::WalletEvent,
    recovery, registry, relay,
    relay::SignerRecovery,
};

/// An outgoing value transfer performed by the relay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub to: Address,
    pub value: U256,
    pub data: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InMemoryAccount {
    owner: Address,
    sponsor: Address,
    guardians: Vec<Address>,
    proposal: Option<RecoveryProposal>,
    spent_nonces: BTreeSet<U256>,
    balance: U256,
    transfers: Vec<Transfer>,
    /// Recipients whose incoming call reverts.
    reverting: BTreeSet<Address>,
}

impl InMemoryAccount {
    pub fn new(owner: Address, sponsor: Address) -> Self {
        Self {
            owner,
            sponsor,
            guardians: Vec::new(),
            proposal: None,
            spent_nonces: BTreeSet::new(),
            balance: U256::ZERO,
            transfers: Vec::new(),
            reverting: BTreeSet::new(),
        }
    }

    /// Incoming native value.
    pub fn credit(&mut self, value: U256) {
        self.balance = self.balance.saturating_add(value);
    }

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    /// Make every later transfer to `recipient` fail, like a contract that reverts on receive.
    pub fn revert_transfers_to(&mut self, recipient: Address) {
        self.reverting.insert(recipient);
    }
}

impl AccountState for InMemoryAccount {
    fn owner(&self) -> Address {
        self.owner
    }

    fn set_owner(&mut self, owner: Address) {
        self.owner = owner;
    }

    fn sponsor(&self) -> Address {
        self.sponsor
    }

    fn set_sponsor(&mut self, sponsor: Address) {
        self.sponsor = sponsor;
    }

    fn guardians(&self) -> Vec<Address> {
        self.guardians.clone()
    }

    fn push_guardian(&mut self, guardian: Address) {
        self.guardians.push(guardian);
    }

    fn remove_guardian(&mut self, guardian: Address) {
        self.guardians.retain(|g| *g != guardian);
    }

    fn proposal(&self) -> Option<RecoveryProposal> {
        self.proposal.clone()
    }

    fn put_proposal(&mut self, proposal: Option<RecoveryProposal>) {
        self.proposal = proposal;
    }

    fn is_nonce_spent(&self, nonce: U256) -> bool {
        self.spent_nonces.contains(&nonce)
    }

    fn mark_nonce_spent(&mut self, nonce: U256) {
        self.spent_nonces.insert(nonce);
    }

    fn balance(&self) -> U256 {
        self.balance
    }

    fn transfer_out(&mut self, to: Address, value: U256, data: &[u8]) -> Result<(), WalletError> {
        if self.reverting.contains(&to) {
            return Err(WalletError::TransferFailed);
        }
        self.balance = self
            .balance
            .checked_sub(value)
            .ok_or(WalletError::InsufficientFunds)?;
        self.transfers.push(Transfer {
            to,
            value,
            data: data.to_vec(),
        });
        Ok(())
    }
}

/// Single-writer wallet with all-or-nothing commits.
///
/// Every entry point takes `&mut self`, so calls are totally ordered. `version` counts
/// committed calls; a failed call leaves both the account and the version untouched.
pub struct InMemoryWallet<R> {
    account: InMemoryAccount,
    version: u64,
    domain: Eip712Domain,
    recovery: R,
    log: Vec<WalletEvent>,
}

impl<R: SignerRecovery> InMemoryWallet<R> {
    pub fn new(
        owner: Address,
        sponsor: Address,
        domain: Eip712Domain,
        recovery: R,
    ) -> Result<Self, WalletError> {
        if owner == Address::ZERO || sponsor == Address::ZERO {
            return Err(WalletError::InvalidAddress);
        }
        Ok(Self {
            account: InMemoryAccount::new(owner, sponsor),
            version: 0,
            domain,
            recovery,
            log: Vec::new(),
        })
    }

    pub fn account(&self) -> &InMemoryAccount {
        &self.account
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn domain(&self) -> &Eip712Domain {
        &self.domain
    }

    /// Every event committed so far, in order.
    pub fn log(&self) -> &[WalletEvent] {
        &self.log
    }

    /// Simulate a recipient contract that reverts. Environment setup, not a wallet call, so
    /// it neither bumps the version nor logs.
    pub fn revert_transfers_to(&mut self, recipient: Address) {
        self.account.revert_transfers_to(recipient);
    }

    pub fn deposit(&mut self, from: Address, value: U256) -> Vec<WalletEvent> {
        let events = alloc::vec![WalletEvent::Deposited { from, value }];
        self.account.credit(value);
        self.version += 1;
        self.log.extend(events.iter().cloned());
        events
    }

    pub fn add_trusted_contact(
        &mut self,
        caller: Address,
        contact: Address,
    ) -> Result<Vec<WalletEvent>, WalletError> {
        self.commit(|acc, _, _| registry::add_trusted_contact(acc, caller, contact))
    }

    pub fn remove_trusted_contact(
        &mut self,
        caller: Address,
        contact: Address,
    ) -> Result<Vec<WalletEvent>, WalletError> {
        self.commit(|acc, _, _| registry::remove_trusted_contact(acc, caller, contact))
    }

    pub fn set_gas_sponsor(
        &mut self,
        caller: Address,
        sponsor: Address,
    ) -> Result<Vec<WalletEvent>, WalletError> {
        self.commit(|acc, _, _| registry::set_gas_sponsor(acc, caller, sponsor))
    }

    pub fn trusted_contacts(&self) -> Vec<Address> {
        registry::trusted_contacts(&self.account)
    }

    pub fn request_recovery(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<Vec<WalletEvent>, WalletError> {
        self.commit(|acc, _, _| recovery::request_recovery(acc, caller, new_owner))
    }

    pub fn approve_recovery(&mut self, caller: Address) -> Result<Vec<WalletEvent>, WalletError> {
        self.commit(|acc, _, _| recovery::approve_recovery(acc, caller))
    }

    pub fn cancel_recovery(&mut self, caller: Address) -> Result<Vec<WalletEvent>, WalletError> {
        self.commit(|acc, _, _| recovery::cancel_recovery(acc, caller))
    }

    pub fn recovery_status(&self) -> RecoveryStatus {
        recovery::recovery_status(&self.account)
    }

    pub fn execute_meta_transaction(
        &mut self,
        tx: &MetaTransaction,
        signature: &[u8],
    ) -> Result<Vec<WalletEvent>, WalletError> {
        self.commit(|acc, recovery, domain| {
            relay::execute_meta_transaction(acc, recovery, domain, tx, signature)
        })
    }

    fn commit<F>(&mut self, f: F) -> Result<Vec<WalletEvent>, WalletError>
    where
        F: FnOnce(&mut InMemoryAccount, &R, &Eip712Domain) -> Result<Vec<WalletEvent>, WalletError>,
    {
        let mut draft = self.account.clone();
        let events = f(&mut draft, &self.recovery, &self.domain)?;
        self.account = draft;
        self.version += 1;
        self.log.extend(events.iter().cloned());
        Ok(events)
    }
}
