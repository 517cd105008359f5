//! SocialGuard wallet for Arbitrum Stylus.
//!
//! A self-custodied account that:
//! - lets its owner register trusted contacts (guardians) who can jointly hand ownership to a
//!   new address when the owner key is lost, and
//! - executes transfers signed off-chain by the owner and submitted by any relayer, so the
//!   owner never pays fees directly.
//!
//! The state machine itself lives in `social-guard-wallet-core`; this crate owns the storage
//! layout, the Solidity ABI, and the host plumbing (`ecrecover`, value transfer, event logs).

#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
#![cfg_attr(not(any(test, feature = "export-abi")), no_std)]

#[macro_use]
extern crate alloc;

pub mod errors;
pub mod events;
mod store;
pub mod utils;
pub mod wallet;


pub use wallet::SocialGuardWallet;
