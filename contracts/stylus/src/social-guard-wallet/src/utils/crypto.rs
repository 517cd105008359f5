//! Signer recovery through the EVM `ecrecover` precompile.

use alloc::vec::Vec;

use stylus_sdk::{
    alloy_primitives::{Address, FixedBytes},
    prelude::*,
    stylus_core::calls::{context::Call, CallAccess},
};

use social_guard_wallet_core::SignerRecovery;

/// Gas handed to the precompile (it costs 3000).
const ECRECOVER_GAS: u64 = 50_000;

pub const ECRECOVER: Address = Address::with_last_byte(1);

/// Recovers owners from `r || s || v` signatures with the precompile at address `0x01`.
///
/// `v` may be given as 27/28 or as the raw recovery id 0/1; anything else is rejected.
pub struct EcrecoverPrecompile<'a> {
    vm: &'a dyn Host,
}

impl<'a> EcrecoverPrecompile<'a> {
    pub fn new(vm: &'a dyn Host) -> Self {
        Self { vm }
    }
}

/// Precompile input: `digest || v (as a word) || r || s`.
pub fn ecrecover_input(digest: FixedBytes<32>, sig: &[u8; 65]) -> Option<Vec<u8>> {
    let v = match sig[64] {
        27 | 28 => sig[64],
        0 | 1 => sig[64] + 27,
        _ => return None,
    };

    let mut input = vec![0u8; 128];
    input[0..32].copy_from_slice(digest.as_slice());
    input[63] = v;
    input[64..96].copy_from_slice(&sig[0..32]);
    input[96..128].copy_from_slice(&sig[32..64]);
    Some(input)
}

impl SignerRecovery for EcrecoverPrecompile<'_> {
    fn recover_signer(&self, digest: FixedBytes<32>, sig: &[u8; 65]) -> Result<Address, ()> {
        let input = ecrecover_input(digest, sig).ok_or(())?;
        let out = self
            .vm
            .static_call(&Call::new().gas(ECRECOVER_GAS), ECRECOVER, &input)
            .map_err(|_| ())?;
        // Empty return data means the signature did not recover.
        if out.len() < 32 {
            return Err(());
        }
        let recovered = Address::from_slice(&out[12..32]);
        if recovered == Address::ZERO {
            return Err(());
        }
        Ok(recovered)
    }
}
