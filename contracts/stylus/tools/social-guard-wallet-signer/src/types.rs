use alloy_primitives::{Address, Bytes, FixedBytes, U256};
use serde::{Deserialize, Serialize};

use social_guard_wallet_core::MetaTransaction;

/// Everything a relayer needs to submit one owner-signed transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedMetaTransaction {
    /// Wallet contract (EIP-712 verifying contract).
    pub wallet: Address,
    pub chain_id: u64,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub nonce: U256,
    /// Digest the owner signed.
    pub digest: FixedBytes<32>,
    /// `r || s || v`, 65 bytes.
    pub signature: Bytes,
    /// Ready-to-send `executeMetaTransaction` calldata.
    pub calldata: Bytes,
}

impl SignedMetaTransaction {
    pub fn meta_transaction(&self) -> MetaTransaction {
        MetaTransaction {
            to: self.to,
            value: self.value,
            data: self.data.to_vec(),
            nonce: self.nonce,
        }
    }
}
