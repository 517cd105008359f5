use alloy_primitives::{Address, U256};

/// State changes reported by the transition functions.
///
/// The contract maps each variant onto the Solidity event of the same name; the in-memory
/// wallet keeps them as its log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletEvent {
    TrustedContactAdded { contact: Address },
    TrustedContactRemoved { contact: Address },
    GasSponsorUpdated { sponsor: Address },
    RecoveryRequested { new_owner: Address },
    RecoveryApproved {
        guardian: Address,
        approvals: usize,
        required: usize,
    },
    RecoveryFinalized { new_owner: Address },
    RecoveryCancelled { proposed_owner: Address },
    GaslessTransactionExecuted { to: Address, value: U256 },
    Deposited { from: Address, value: U256 },
}
