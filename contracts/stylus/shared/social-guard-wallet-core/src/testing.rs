//! Deterministic signer recovery for unit tests.

use alloc::vec::Vec;

use alloy_primitives::{Address, FixedBytes};

use crate::relay::SignerRecovery;

pub fn addr(n: u8) -> Address {
    Address::repeat_byte(n)
}

/// Mock "signature" = signer (20 bytes) || digest (32 bytes) || 13 zero bytes.
///
/// Recovery succeeds only when the embedded digest equals the digest being checked, so any
/// change to a signed field makes the signature stop recovering.
pub struct DigestBoundRecovery;

impl SignerRecovery for DigestBoundRecovery {
    fn recover_signer(&self, digest: FixedBytes<32>, signature: &[u8; 65]) -> Result<Address, ()> {
        if &signature[20..52] != digest.as_slice() {
            return Err(());
        }
        Ok(Address::from_slice(&signature[..20]))
    }
}

pub fn mock_sign(signer: Address, digest: FixedBytes<32>) -> Vec<u8> {
    let mut sig = Vec::with_capacity(65);
    sig.extend_from_slice(signer.as_slice());
    sig.extend_from_slice(digest.as_slice());
    sig.resize(65, 0);
    sig
}
