//! Solidity custom errors returned by the wallet ABI.
//!
//! Every failure kind has its own selector so clients can tell them apart; returning any of
//! them reverts the whole call.

use alloy_sol_types::sol;
use stylus_sdk::stylus_proc::SolidityError;

use social_guard_wallet_core::WalletError;

sol! {
    error Unauthorized();
    error InvalidAddress();
    error DuplicateGuardian();
    error NoActiveProposal();
    error NotAGuardian();
    error AlreadyApproved();
    error AlreadyOwner();
    error NoGuardians();
    error InvalidSignature();
    error NonceReplay();
    error InsufficientFunds();
    error TransferFailed();

    error AlreadyInitialized();
    error IndexOutOfRange(uint256 index, uint256 length);
}

#[derive(SolidityError)]
pub enum SocialGuardWalletError {
    Unauthorized(Unauthorized),
    InvalidAddress(InvalidAddress),
    DuplicateGuardian(DuplicateGuardian),
    NoActiveProposal(NoActiveProposal),
    NotAGuardian(NotAGuardian),
    AlreadyApproved(AlreadyApproved),
    AlreadyOwner(AlreadyOwner),
    NoGuardians(NoGuardians),
    InvalidSignature(InvalidSignature),
    NonceReplay(NonceReplay),
    InsufficientFunds(InsufficientFunds),
    TransferFailed(TransferFailed),
    AlreadyInitialized(AlreadyInitialized),
    IndexOutOfRange(IndexOutOfRange),
}

impl From<WalletError> for SocialGuardWalletError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::Unauthorized => Self::Unauthorized(Unauthorized {}),
            WalletError::InvalidAddress => Self::InvalidAddress(InvalidAddress {}),
            WalletError::DuplicateGuardian => Self::DuplicateGuardian(DuplicateGuardian {}),
            WalletError::NoActiveProposal => Self::NoActiveProposal(NoActiveProposal {}),
            WalletError::NotAGuardian => Self::NotAGuardian(NotAGuardian {}),
            WalletError::AlreadyApproved => Self::AlreadyApproved(AlreadyApproved {}),
            WalletError::AlreadyOwner => Self::AlreadyOwner(AlreadyOwner {}),
            WalletError::NoGuardians => Self::NoGuardians(NoGuardians {}),
            WalletError::InvalidSignature => Self::InvalidSignature(InvalidSignature {}),
            WalletError::NonceReplay => Self::NonceReplay(NonceReplay {}),
            WalletError::InsufficientFunds => Self::InsufficientFunds(InsufficientFunds {}),
            WalletError::TransferFailed => Self::TransferFailed(TransferFailed {}),
        }
    }
}
