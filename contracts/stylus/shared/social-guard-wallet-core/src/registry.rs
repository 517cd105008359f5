//! Ownership & guardian registry: who may do what.

use alloc::{vec, vec::Vec};

use alloy_primitives::Address;

use crate::{account::AccountState, errors::WalletError, events::WalletEvent};

pub(crate) fn require_owner<S: AccountState>(account: &S, caller: Address) -> Result<(), WalletError> {
    if caller != account.owner() {
        return Err(WalletError::Unauthorized);
    }
    Ok(())
}

/// Owner registers a new guardian at the end of the list.
pub fn add_trusted_contact<S: AccountState>(
    account: &mut S,
    caller: Address,
    contact: Address,
) -> Result<Vec<WalletEvent>, WalletError> {
    require_owner(account, caller)?;
    if contact == Address::ZERO || contact == account.owner() {
        return Err(WalletError::InvalidAddress);
    }
    if account.is_guardian(contact) {
        return Err(WalletError::DuplicateGuardian);
    }

    account.push_guardian(contact);
    Ok(vec![WalletEvent::TrustedContactAdded { contact }])
}

/// Owner drops a guardian. A proposal already in flight keeps its own snapshot.
pub fn remove_trusted_contact<S: AccountState>(
    account: &mut S,
    caller: Address,
    contact: Address,
) -> Result<Vec<WalletEvent>, WalletError> {
    require_owner(account, caller)?;
    if !account.is_guardian(contact) {
        return Err(WalletError::NotAGuardian);
    }

    account.remove_guardian(contact);
    Ok(vec![WalletEvent::TrustedContactRemoved { contact }])
}

pub fn set_gas_sponsor<S: AccountState>(
    account: &mut S,
    caller: Address,
    sponsor: Address,
) -> Result<Vec<WalletEvent>, WalletError> {
    require_owner(account, caller)?;
    if sponsor == Address::ZERO {
        return Err(WalletError::InvalidAddress);
    }

    account.set_sponsor(sponsor);
    Ok(vec![WalletEvent::GasSponsorUpdated { sponsor }])
}

pub fn trusted_contacts<S: AccountState>(account: &S) -> Vec<Address> {
    account.guardians()
}
