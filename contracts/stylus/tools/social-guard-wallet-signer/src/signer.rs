use alloy_primitives::{Address, FixedBytes, U256};
use anyhow::{anyhow, Context, Result};
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use sha3::{Digest, Keccak256};
use tracing::debug;

use social_guard_wallet_core::{meta_transaction_digest, Eip712Domain, MetaTransaction, SignerRecovery};

/// Parse a hex private key, with or without `0x`, surrounding whitespace allowed.
pub fn parse_signing_key(hex_key: &str) -> Result<SigningKey> {
    let trimmed = hex_key.trim();
    let raw = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(raw).context("private key is not valid hex")?;
    SigningKey::from_slice(&bytes).map_err(|e| anyhow!("invalid secp256k1 private key: {e}"))
}

/// Ethereum address of a public key: last 20 bytes of keccak256 over the uncompressed point.
pub fn address_of(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = Keccak256::digest(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..32])
}

/// Fresh 256-bit nonce. The wallet only checks nonces for prior use, so random values let
/// several transfers be signed ahead of time without coordinating a counter.
pub fn random_nonce() -> U256 {
    U256::from_be_bytes(rand::random::<[u8; 32]>())
}

/// Sign `tx` for the wallet identified by `domain`; returns `r || s || v` with `v` in {27, 28}.
pub fn sign_meta_transaction(
    key: &SigningKey,
    domain: &Eip712Domain,
    tx: &MetaTransaction,
) -> Result<(FixedBytes<32>, [u8; 65])> {
    let digest = meta_transaction_digest(domain, tx);
    let (signature, recid) = key
        .sign_prehash_recoverable(digest.as_slice())
        .map_err(|e| anyhow!("signing failed: {e}"))?;

    let mut out = [0u8; 65];
    out[..64].copy_from_slice(&signature.to_bytes());
    out[64] = 27 + recid.to_byte();
    debug!(digest = %digest, signer = %address_of(key.verifying_key()), "signed meta-transaction");
    Ok((digest, out))
}

/// Off-chain counterpart of the `ecrecover` precompile, accepting the same `v` encodings.
///
/// The precompile accepts high-S signatures but k256 refuses them, so `s` is folded into the
/// lower half (flipping the recovery parity) before recovering.
pub struct K256Recovery;

impl SignerRecovery for K256Recovery {
    fn recover_signer(&self, digest: FixedBytes<32>, sig: &[u8; 65]) -> Result<Address, ()> {
        let v = match sig[64] {
            27 | 28 => sig[64] - 27,
            0 | 1 => sig[64],
            _ => return Err(()),
        };
        let mut recid = RecoveryId::from_byte(v).ok_or(())?;
        let mut signature = Signature::from_slice(&sig[..64]).map_err(|_| ())?;
        if let Some(low) = signature.normalize_s() {
            signature = low;
            recid = RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced());
        }
        let key = VerifyingKey::recover_from_prehash(digest.as_slice(), &signature, recid)
            .map_err(|_| ())?;
        Ok(address_of(&key))
    }
}
