//! Host helpers for the wallet.
//!
//! Kept small and deterministic, as they run inside Stylus / WASM.

pub mod crypto;
