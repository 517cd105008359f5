//! ABI calldata a relayer submits to the wallet.

use alloy_primitives::Bytes;
use alloy_sol_types::{sol, SolCall};

use social_guard_wallet_core::MetaTransaction;

sol! {
    function executeMetaTransaction(address to, uint256 value, bytes data, uint256 nonce, bytes signature);
    function metaTransactionDigest(address to, uint256 value, bytes data, uint256 nonce) returns (bytes32);
}

pub fn execute_meta_transaction_calldata(tx: &MetaTransaction, signature: &[u8]) -> Vec<u8> {
    executeMetaTransactionCall {
        to: tx.to,
        value: tx.value,
        data: Bytes::copy_from_slice(&tx.data),
        nonce: tx.nonce,
        signature: Bytes::copy_from_slice(signature),
    }
    .abi_encode()
}

/// Calldata for the wallet's on-chain digest view, for cross-checking a signature.
pub fn meta_transaction_digest_calldata(tx: &MetaTransaction) -> Vec<u8> {
    metaTransactionDigestCall {
        to: tx.to,
        value: tx.value,
        data: Bytes::copy_from_slice(&tx.data),
        nonce: tx.nonce,
    }
    .abi_encode()
}
