//! Contract storage as the shared [`AccountState`].
//!
//! The proposal is stored as flat fields plus two address arrays and is loaded and written
//! back whole; guardian sets are small, and a full rewrite keeps the snapshot exact.

use alloc::vec::Vec;

use stylus_sdk::{
    alloy_primitives::{Address, U256},
    prelude::*,
    storage::{StorageAddress, StorageVec},
    stylus_core::calls::{context::Call, CallAccess, ValueTransfer},
};

use social_guard_wallet_core::{AccountState, RecoveryProposal, WalletError};

use crate::wallet::SocialGuardWallet;

fn load_addresses(vec: &StorageVec<StorageAddress>) -> Vec<Address> {
    (0..vec.len()).filter_map(|i| vec.get(i)).collect()
}

fn store_addresses(vec: &mut StorageVec<StorageAddress>, items: &[Address]) {
    vec.erase();
    for item in items {
        vec.push(*item);
    }
}

impl AccountState for SocialGuardWallet {
    fn owner(&self) -> Address {
        self.owner.get()
    }

    fn set_owner(&mut self, owner: Address) {
        self.owner.set(owner);
    }

    fn sponsor(&self) -> Address {
        self.gas_sponsor.get()
    }

    fn set_sponsor(&mut self, sponsor: Address) {
        self.gas_sponsor.set(sponsor);
    }

    fn guardians(&self) -> Vec<Address> {
        load_addresses(&self.trusted_contacts)
    }

    fn is_guardian(&self, who: Address) -> bool {
        self.is_trusted_contact.get(who)
    }

    fn push_guardian(&mut self, guardian: Address) {
        self.trusted_contacts.push(guardian);
        self.is_trusted_contact.insert(guardian, true);
    }

    fn remove_guardian(&mut self, guardian: Address) {
        let kept: Vec<Address> = self
            .guardians()
            .into_iter()
            .filter(|g| *g != guardian)
            .collect();
        store_addresses(&mut self.trusted_contacts, &kept);
        self.is_trusted_contact.insert(guardian, false);
    }

    fn proposal(&self) -> Option<RecoveryProposal> {
        if !self.recovery_active.get() {
            return None;
        }
        Some(RecoveryProposal {
            proposed_owner: self.recovery_new_owner.get(),
            guardians: load_addresses(&self.recovery_guardians),
            approvals: load_addresses(&self.recovery_approvals),
        })
    }

    fn put_proposal(&mut self, proposal: Option<RecoveryProposal>) {
        match proposal {
            Some(p) => {
                self.recovery_active.set(true);
                self.recovery_new_owner.set(p.proposed_owner);
                store_addresses(&mut self.recovery_guardians, &p.guardians);
                store_addresses(&mut self.recovery_approvals, &p.approvals);
            }
            None => {
                self.recovery_active.set(false);
                self.recovery_new_owner.set(Address::ZERO);
                self.recovery_guardians.erase();
                self.recovery_approvals.erase();
            }
        }
    }

    fn is_nonce_spent(&self, nonce: U256) -> bool {
        self.spent_nonces.get(nonce)
    }

    fn mark_nonce_spent(&mut self, nonce: U256) {
        self.spent_nonces.insert(nonce, true);
    }

    fn balance(&self) -> U256 {
        self.vm().balance(self.vm().contract_address())
    }

    fn transfer_out(&mut self, to: Address, value: U256, data: &[u8]) -> Result<(), WalletError> {
        // The host flushes storage before either call; the nonce is already final.
        let sent = if data.is_empty() {
            self.vm().transfer_eth(to, value).is_ok()
        } else {
            self.vm()
                .call(&Call::new().value(value), to, data)
                .is_ok()
        };
        if !sent {
            return Err(WalletError::TransferFailed);
        }
        Ok(())
    }
}
