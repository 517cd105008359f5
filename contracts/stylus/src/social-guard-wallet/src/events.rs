//! Solidity events emitted by the wallet.

use alloc::vec::Vec;

use alloy_sol_types::sol;
use stylus_sdk::{alloy_primitives::U256, prelude::*, stylus_core::log};

use social_guard_wallet_core::WalletEvent;

use crate::wallet::SocialGuardWallet;

sol! {
    event TrustedContactAdded(address indexed contact);
    event TrustedContactRemoved(address indexed contact);
    event GasSponsorUpdated(address indexed sponsor);

    event RecoveryRequested(address indexed newOwner);
    event RecoveryApproved(address indexed guardian, uint256 approvals, uint256 required);
    event RecoveryFinalized(address indexed newOwner);
    event RecoveryCancelled(address indexed proposedOwner);

    event GaslessTransactionExecuted(address indexed to, uint256 value);
    event Deposited(address indexed from, uint256 value);
}

impl SocialGuardWallet {
    /// Log the events a transition produced, in order.
    pub(crate) fn emit(&self, events: Vec<WalletEvent>) {
        for event in events {
            match event {
                WalletEvent::TrustedContactAdded { contact } => {
                    log(self.vm(), TrustedContactAdded { contact })
                }
                WalletEvent::TrustedContactRemoved { contact } => {
                    log(self.vm(), TrustedContactRemoved { contact })
                }
                WalletEvent::GasSponsorUpdated { sponsor } => {
                    log(self.vm(), GasSponsorUpdated { sponsor })
                }
                WalletEvent::RecoveryRequested { new_owner } => {
                    log(self.vm(), RecoveryRequested { newOwner: new_owner })
                }
                WalletEvent::RecoveryApproved {
                    guardian,
                    approvals,
                    required,
                } => log(
                    self.vm(),
                    RecoveryApproved {
                        guardian,
                        approvals: U256::from(approvals),
                        required: U256::from(required),
                    },
                ),
                WalletEvent::RecoveryFinalized { new_owner } => {
                    log(self.vm(), RecoveryFinalized { newOwner: new_owner })
                }
                WalletEvent::RecoveryCancelled { proposed_owner } => log(
                    self.vm(),
                    RecoveryCancelled {
                        proposedOwner: proposed_owner,
                    },
                ),
                WalletEvent::GaslessTransactionExecuted { to, value } => {
                    log(self.vm(), GaslessTransactionExecuted { to, value })
                }
                WalletEvent::Deposited { from, value } => log(self.vm(), Deposited { from, value }),
            }
        }
    }
}
