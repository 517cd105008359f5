use core::fmt;

/// Reasons an entry point rejects a call.
///
/// Every variant is terminal for the invocation: the caller sees the error and no write from
/// the failed call survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletError {
    /// Caller lacks the role the entry point requires.
    Unauthorized,
    /// Zero address, or an address that may not take the requested role.
    InvalidAddress,
    DuplicateGuardian,
    NoActiveProposal,
    NotAGuardian,
    /// Guardian already approved the live proposal.
    AlreadyApproved,
    /// Proposed owner is already the owner.
    AlreadyOwner,
    /// Recovery requested with an empty guardian set.
    NoGuardians,
    InvalidSignature,
    NonceReplay,
    InsufficientFunds,
    /// Outgoing value transfer (or forwarded call) failed.
    TransferFailed,
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            WalletError::Unauthorized => "caller is not authorised for this call",
            WalletError::InvalidAddress => "invalid address",
            WalletError::DuplicateGuardian => "address is already a trusted contact",
            WalletError::NoActiveProposal => "no recovery proposal is active",
            WalletError::NotAGuardian => "address is not a guardian",
            WalletError::AlreadyApproved => "guardian already approved this recovery",
            WalletError::AlreadyOwner => "proposed owner is already the owner",
            WalletError::NoGuardians => "no trusted contacts registered",
            WalletError::InvalidSignature => "signature does not recover to the owner",
            WalletError::NonceReplay => "nonce already spent",
            WalletError::InsufficientFunds => "insufficient funds",
            WalletError::TransferFailed => "outgoing transfer failed",
        };
        f.write_str(msg)
    }
}
