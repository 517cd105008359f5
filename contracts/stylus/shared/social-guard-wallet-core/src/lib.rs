//! Account state machine shared by the SocialGuard Stylus wallet and its off-chain tooling.
//!
//! The same transitions run on-chain (over contract storage) and off-chain (over
//! [`memory::InMemoryAccount`]); both sides implement [`account::AccountState`] and feed the
//! transition functions in [`registry`], [`recovery`] and [`relay`].

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod account;
pub mod digest;
pub mod errors;
pub mod events;
pub mod memory;
pub mod recovery;
pub mod registry;
pub mod relay;

#[cfg(test)]
mod testing;

pub use account::{recovery_quorum, AccountState, RecoveryProposal, RecoveryStatus};
pub use digest::{meta_transaction_digest, Eip712Domain, MetaTransaction};
pub use errors::WalletError;
pub use events::WalletEvent;
pub use memory::{InMemoryAccount, InMemoryWallet, Transfer};
pub use relay::{Authorized, SignerRecovery};
