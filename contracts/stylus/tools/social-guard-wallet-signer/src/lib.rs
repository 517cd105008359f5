//! Owner-side tooling for the SocialGuard wallet: EIP-712 signing of meta-transactions and
//! the calldata a relayer submits.

pub mod calldata;
pub mod signer;
pub mod types;


use alloy_primitives::Bytes;
use anyhow::Result;
use k256::ecdsa::SigningKey;

use social_guard_wallet_core::{Eip712Domain, MetaTransaction};

use crate::{calldata::execute_meta_transaction_calldata, signer::sign_meta_transaction, types::SignedMetaTransaction};

/// Sign `tx` and package it for a relayer.
pub fn build_signed(
    key: &SigningKey,
    domain: &Eip712Domain,
    tx: &MetaTransaction,
) -> Result<SignedMetaTransaction> {
    let (digest, signature) = sign_meta_transaction(key, domain, tx)?;
    Ok(SignedMetaTransaction {
        wallet: domain.verifying_contract,
        chain_id: domain.chain_id,
        to: tx.to,
        value: tx.value,
        data: Bytes::copy_from_slice(&tx.data),
        nonce: tx.nonce,
        digest,
        signature: Bytes::copy_from_slice(&signature),
        calldata: execute_meta_transaction_calldata(tx, &signature).into(),
    })
}
