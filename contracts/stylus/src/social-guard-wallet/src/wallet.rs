//! The SocialGuard wallet contract: storage layout and public ABI.
//!
//! Design notes:
//! - Every entry point passes the authenticated caller (`msg.sender`) and its arguments to
//!   the shared state machine explicitly; there is no other session state.
//! - Transitions validate before they write. When one returns an error the call reverts,
//!   so registry, proposal, nonce set and balance always commit together or not at all.
//! - `executeMetaTransaction` is open to any relayer. Authorisation comes only from the
//!   owner's EIP-712 signature, recovered with the `ecrecover` precompile.

use alloc::vec::Vec;

use stylus_sdk::{
    abi::Bytes,
    alloy_primitives::{Address, FixedBytes, U256},
    prelude::*,
};

use social_guard_wallet_core::{
    digest::{meta_transaction_digest, Eip712Domain, MetaTransaction},
    recovery, registry, relay, WalletEvent,
};

use crate::{
    errors::{AlreadyInitialized, IndexOutOfRange, InvalidAddress, SocialGuardWalletError},
    utils::crypto::EcrecoverPrecompile,
};

sol_storage! {
    #[entrypoint]
    pub struct SocialGuardWallet {
        address owner;
        /// Relayer the owner expects to sponsor fees. Informational: relay authorisation
        /// comes from signatures, not from this address.
        address gas_sponsor;

        /// Guardians in insertion order, plus a membership index.
        address[] trusted_contacts;
        mapping(address => bool) is_trusted_contact;

        /// Live recovery proposal; all fields are meaningless while `recovery_active` is false.
        bool recovery_active;
        address recovery_new_owner;
        /// Guardian snapshot taken when the proposal was requested.
        address[] recovery_guardians;
        address[] recovery_approvals;

        /// Meta-transaction nonces already consumed.
        mapping(uint256 => bool) spent_nonces;
    }
}

#[public]
impl SocialGuardWallet {
    /// Deployment hook: sets the owner and the gas sponsor.
    ///
    /// The owner is passed explicitly because Stylus deployments go through a factory, so
    /// `msg.sender` here is not the deploying account.
    #[constructor]
    pub fn constructor(
        &mut self,
        initial_owner: Address,
        gas_sponsor: Address,
    ) -> Result<(), SocialGuardWalletError> {
        if self.owner.get() != Address::ZERO {
            return Err(SocialGuardWalletError::AlreadyInitialized(AlreadyInitialized {}));
        }
        if initial_owner == Address::ZERO || gas_sponsor == Address::ZERO {
            return Err(SocialGuardWalletError::InvalidAddress(InvalidAddress {}));
        }
        self.owner.set(initial_owner);
        self.gas_sponsor.set(gas_sponsor);
        Ok(())
    }

    /// Plain value transfers fund the wallet.
    #[receive]
    #[payable]
    pub fn receive(&mut self) -> Result<(), Vec<u8>> {
        let from = self.vm().msg_sender();
        let value = self.vm().msg_value();
        self.emit(vec![WalletEvent::Deposited { from, value }]);
        Ok(())
    }

    pub fn owner(&self) -> Address {
        self.owner.get()
    }

    pub fn gas_sponsor(&self) -> Address {
        self.gas_sponsor.get()
    }

    pub fn get_trusted_contacts(&self) -> Vec<Address> {
        registry::trusted_contacts(self)
    }

    /// Indexed read, matching a Solidity public-array getter.
    pub fn trusted_contact(&self, index: U256) -> Result<Address, SocialGuardWalletError> {
        self.trusted_contacts.get(index).ok_or_else(|| {
            SocialGuardWalletError::IndexOutOfRange(IndexOutOfRange {
                index,
                length: U256::from(self.trusted_contacts.len()),
            })
        })
    }

    pub fn add_trusted_contact(&mut self, contact: Address) -> Result<(), SocialGuardWalletError> {
        let caller = self.vm().msg_sender();
        let events = registry::add_trusted_contact(self, caller, contact)?;
        self.emit(events);
        Ok(())
    }

    pub fn remove_trusted_contact(
        &mut self,
        contact: Address,
    ) -> Result<(), SocialGuardWalletError> {
        let caller = self.vm().msg_sender();
        let events = registry::remove_trusted_contact(self, caller, contact)?;
        self.emit(events);
        Ok(())
    }

    pub fn set_gas_sponsor(&mut self, sponsor: Address) -> Result<(), SocialGuardWalletError> {
        let caller = self.vm().msg_sender();
        let events = registry::set_gas_sponsor(self, caller, sponsor)?;
        self.emit(events);
        Ok(())
    }

    /// Owner or a current guardian proposes `new_owner`, replacing any live proposal.
    pub fn request_recovery(&mut self, new_owner: Address) -> Result<(), SocialGuardWalletError> {
        let caller = self.vm().msg_sender();
        let events = recovery::request_recovery(self, caller, new_owner)?;
        self.emit(events);
        Ok(())
    }

    /// Guardian vote; the last required vote transfers ownership in the same call.
    pub fn approve_recovery(&mut self) -> Result<(), SocialGuardWalletError> {
        let caller = self.vm().msg_sender();
        let events = recovery::approve_recovery(self, caller)?;
        self.emit(events);
        Ok(())
    }

    pub fn cancel_recovery(&mut self) -> Result<(), SocialGuardWalletError> {
        let caller = self.vm().msg_sender();
        let events = recovery::cancel_recovery(self, caller)?;
        self.emit(events);
        Ok(())
    }

    /// `(active, proposedOwner, approvals, required)`.
    pub fn pending_recovery(&self) -> (bool, Address, U256, U256) {
        let status = recovery::recovery_status(self);
        (
            status.active,
            status.proposed_owner,
            U256::from(status.approvals),
            U256::from(status.required),
        )
    }

    pub fn has_approved_recovery(&self, guardian: Address) -> bool {
        recovery::has_approved(self, guardian)
    }

    /// Relay an owner-signed transfer of `value` to `to`, forwarding `data` as call payload.
    pub fn execute_meta_transaction(
        &mut self,
        to: Address,
        value: U256,
        data: Bytes,
        nonce: U256,
        signature: Bytes,
    ) -> Result<(), SocialGuardWalletError> {
        let tx = MetaTransaction {
            to,
            value,
            data: data.to_vec(),
            nonce,
        };
        let domain = self.eip712_domain();
        let authorized = relay::authorize(
            &*self,
            &EcrecoverPrecompile::new(self.vm()),
            &domain,
            &tx,
            signature.as_slice(),
        )?;
        let events = relay::settle(self, authorized)?;
        self.emit(events);
        Ok(())
    }

    pub fn is_nonce_spent(&self, nonce: U256) -> bool {
        self.spent_nonces.get(nonce)
    }

    /// Digest the owner must sign for `executeMetaTransaction(to, value, data, nonce, ..)`.
    pub fn meta_transaction_digest(
        &self,
        to: Address,
        value: U256,
        data: Bytes,
        nonce: U256,
    ) -> FixedBytes<32> {
        let tx = MetaTransaction {
            to,
            value,
            data: data.to_vec(),
            nonce,
        };
        meta_transaction_digest(&self.eip712_domain(), &tx)
    }

    pub fn domain_separator(&self) -> FixedBytes<32> {
        self.eip712_domain().separator()
    }
}

impl SocialGuardWallet {
    fn eip712_domain(&self) -> Eip712Domain {
        Eip712Domain::new(self.vm().chain_id(), self.vm().contract_address())
    }
}
