//! EIP-712 digest of a meta-transaction.
//!
//! The owner signs this digest off-chain; the contract rebuilds it from the submitted fields
//! and recovers the signer. `data` enters the struct hash as `keccak256(data)`, so every field
//! is one fixed 32-byte word and the encoding is injective.

use alloc::vec::Vec;

use alloy_primitives::{keccak256, Address, FixedBytes, U256};

pub const DOMAIN_NAME: &[u8] = b"SocialGuard Wallet";
pub const DOMAIN_VERSION: &[u8] = b"1";

pub const DOMAIN_TYPE: &[u8] =
    b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";
pub const META_TRANSACTION_TYPE: &[u8] =
    b"MetaTransaction(address to,uint256 value,bytes data,uint256 nonce)";

/// Binds a signature to one chain and one wallet deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Eip712Domain {
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl Eip712Domain {
    pub fn new(chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            chain_id,
            verifying_contract,
        }
    }

    pub fn separator(&self) -> FixedBytes<32> {
        let mut buf = Vec::with_capacity(32 * 5);
        buf.extend_from_slice(keccak256(DOMAIN_TYPE).as_slice());
        buf.extend_from_slice(keccak256(DOMAIN_NAME).as_slice());
        buf.extend_from_slice(keccak256(DOMAIN_VERSION).as_slice());
        buf.extend_from_slice(&U256::from(self.chain_id).to_be_bytes::<32>());
        buf.extend_from_slice(&address_word(self.verifying_contract));
        keccak256(buf)
    }
}

/// Transfer instruction signed by the owner and submitted by any relayer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetaTransaction {
    pub to: Address,
    pub value: U256,
    pub data: Vec<u8>,
    pub nonce: U256,
}

impl MetaTransaction {
    pub fn struct_hash(&self) -> FixedBytes<32> {
        let mut buf = Vec::with_capacity(32 * 5);
        buf.extend_from_slice(keccak256(META_TRANSACTION_TYPE).as_slice());
        buf.extend_from_slice(&address_word(self.to));
        buf.extend_from_slice(&self.value.to_be_bytes::<32>());
        buf.extend_from_slice(keccak256(&self.data).as_slice());
        buf.extend_from_slice(&self.nonce.to_be_bytes::<32>());
        keccak256(buf)
    }
}

/// `keccak256("\x19\x01" || domainSeparator || structHash)`.
pub fn meta_transaction_digest(domain: &Eip712Domain, tx: &MetaTransaction) -> FixedBytes<32> {
    let mut buf = Vec::with_capacity(2 + 32 + 32);
    buf.extend_from_slice(b"\x19\x01");
    buf.extend_from_slice(domain.separator().as_slice());
    buf.extend_from_slice(tx.struct_hash().as_slice());
    keccak256(buf)
}

fn address_word(address: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..32].copy_from_slice(address.as_slice());
    word
}
