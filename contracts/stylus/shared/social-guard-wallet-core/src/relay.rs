//! Meta-transaction relay.
//!
//! Anyone may submit; authorisation comes from the owner's signature over the EIP-712 digest,
//! never from the submitter's identity. The nonce is part of the digest, so a spent nonce
//! blocks every signature over it, malleated ones included.

use alloc::{vec, vec::Vec};

use alloy_primitives::{Address, FixedBytes};

use crate::{
    account::AccountState,
    digest::{meta_transaction_digest, Eip712Domain, MetaTransaction},
    errors::WalletError,
    events::WalletEvent,
};

/// Recovers the account that produced a 65-byte `r || s || v` signature over `digest`.
///
/// On-chain this is the `ecrecover` precompile; off-chain it is a k256 implementation.
pub trait SignerRecovery {
    fn recover_signer(&self, digest: FixedBytes<32>, signature: &[u8; 65]) -> Result<Address, ()>;
}

/// Proof that a meta-transaction carries the owner's signature and has an unused nonce.
///
/// Only [`authorize`] builds one, so [`settle`] cannot run on an unchecked transaction.
#[derive(Debug)]
pub struct Authorized<'a> {
    tx: &'a MetaTransaction,
}

impl Authorized<'_> {
    pub fn meta_transaction(&self) -> &MetaTransaction {
        self.tx
    }
}

/// Read-only half of the relay: recipient, signature, then nonce.
pub fn authorize<'a, S, R>(
    account: &S,
    recovery: &R,
    domain: &Eip712Domain,
    tx: &'a MetaTransaction,
    signature: &[u8],
) -> Result<Authorized<'a>, WalletError>
where
    S: AccountState,
    R: SignerRecovery,
{
    if tx.to == Address::ZERO {
        return Err(WalletError::InvalidAddress);
    }

    let signature: &[u8; 65] = signature
        .try_into()
        .map_err(|_| WalletError::InvalidSignature)?;
    let digest = meta_transaction_digest(domain, tx);
    let signer = recovery
        .recover_signer(digest, signature)
        .map_err(|_| WalletError::InvalidSignature)?;
    if signer != account.owner() {
        return Err(WalletError::InvalidSignature);
    }

    if account.is_nonce_spent(tx.nonce) {
        return Err(WalletError::NonceReplay);
    }
    Ok(Authorized { tx })
}

/// Writing half of the relay: funds check, nonce, outgoing call.
///
/// The nonce is recorded before the outgoing call; a failing call returns
/// [`WalletError::TransferFailed`] and the caller's rollback discards the nonce too.
pub fn settle<S: AccountState>(
    account: &mut S,
    authorized: Authorized<'_>,
) -> Result<Vec<WalletEvent>, WalletError> {
    let tx = authorized.tx;
    if account.balance() < tx.value {
        return Err(WalletError::InsufficientFunds);
    }

    account.mark_nonce_spent(tx.nonce);
    account.transfer_out(tx.to, tx.value, &tx.data)?;
    Ok(vec![WalletEvent::GaslessTransactionExecuted {
        to: tx.to,
        value: tx.value,
    }])
}

/// Validate an owner-signed transfer and execute it.
///
/// Checks run in order: recipient, signature, nonce, funds.
pub fn execute_meta_transaction<S, R>(
    account: &mut S,
    recovery: &R,
    domain: &Eip712Domain,
    tx: &MetaTransaction,
    signature: &[u8],
) -> Result<Vec<WalletEvent>, WalletError>
where
    S: AccountState,
    R: SignerRecovery,
{
    let authorized = authorize(account, recovery, domain, tx, signature)?;
    settle(account, authorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        memory::{InMemoryAccount, Transfer},
        testing::{addr, mock_sign, DigestBoundRecovery},
    };
    use alloy_primitives::U256;

    const OWNER: u8 = 0x01;
    const RECIPIENT: u8 = 0xAA;

    fn domain() -> Eip712Domain {
        Eip712Domain::new(412346, addr(0xC0))
    }

    fn funded(balance: u64) -> InMemoryAccount {
        let mut acc = InMemoryAccount::new(addr(OWNER), addr(0x02));
        acc.credit(U256::from(balance));
        acc
    }

    fn tx(value: u64, nonce: u64) -> MetaTransaction {
        MetaTransaction {
            to: addr(RECIPIENT),
            value: U256::from(value),
            data: Vec::new(),
            nonce: U256::from(nonce),
        }
    }

    fn signed(signer: u8, tx: &MetaTransaction) -> Vec<u8> {
        mock_sign(addr(signer), meta_transaction_digest(&domain(), tx))
    }

    #[test]
    fn executes_signed_transfer() {
        let mut acc = funded(100);
        let t = tx(40, 1);
        let events =
            execute_meta_transaction(&mut acc, &DigestBoundRecovery, &domain(), &t, &signed(OWNER, &t))
                .unwrap();

        assert_eq!(
            events,
            vec![WalletEvent::GaslessTransactionExecuted {
                to: addr(RECIPIENT),
                value: U256::from(40u64)
            }]
        );
        assert_eq!(acc.balance(), U256::from(60u64));
        assert!(acc.is_nonce_spent(U256::from(1u64)));
        assert_eq!(
            acc.transfers(),
            &[Transfer {
                to: addr(RECIPIENT),
                value: U256::from(40u64),
                data: Vec::new()
            }]
        );
    }

    #[test]
    fn signer_must_be_owner() {
        let mut acc = funded(100);
        let t = tx(40, 1);
        assert_eq!(
            execute_meta_transaction(&mut acc, &DigestBoundRecovery, &domain(), &t, &signed(0x03, &t)),
            Err(WalletError::InvalidSignature)
        );
        assert!(!acc.is_nonce_spent(U256::from(1u64)));
    }

    #[test]
    fn signature_length_must_be_65() {
        let mut acc = funded(100);
        let t = tx(40, 1);
        let mut sig = signed(OWNER, &t);
        sig.push(0);
        assert_eq!(
            execute_meta_transaction(&mut acc, &DigestBoundRecovery, &domain(), &t, &sig),
            Err(WalletError::InvalidSignature)
        );
        assert_eq!(
            execute_meta_transaction(&mut acc, &DigestBoundRecovery, &domain(), &t, &[]),
            Err(WalletError::InvalidSignature)
        );
    }

    #[test]
    fn zero_recipient_rejected() {
        let mut acc = funded(100);
        let mut t = tx(40, 1);
        t.to = Address::ZERO;
        assert_eq!(
            execute_meta_transaction(&mut acc, &DigestBoundRecovery, &domain(), &t, &signed(OWNER, &t)),
            Err(WalletError::InvalidAddress)
        );
    }

    #[test]
    fn insufficient_funds_leaves_nonce_unspent() {
        let mut acc = funded(10);
        let t = tx(40, 7);
        assert_eq!(
            execute_meta_transaction(&mut acc, &DigestBoundRecovery, &domain(), &t, &signed(OWNER, &t)),
            Err(WalletError::InsufficientFunds)
        );
        assert!(!acc.is_nonce_spent(U256::from(7u64)));
        assert_eq!(acc.balance(), U256::from(10u64));
    }

    #[test]
    fn spent_nonce_is_rejected_for_any_payload() {
        let mut acc = funded(100);
        let first = tx(40, 1);
        execute_meta_transaction(&mut acc, &DigestBoundRecovery, &domain(), &first, &signed(OWNER, &first))
            .unwrap();

        let mut other = tx(5, 1);
        other.to = addr(0xBB);
        assert_eq!(
            execute_meta_transaction(&mut acc, &DigestBoundRecovery, &domain(), &other, &signed(OWNER, &other)),
            Err(WalletError::NonceReplay)
        );
        assert_eq!(acc.balance(), U256::from(60u64));
    }

    #[test]
    fn authorization_is_read_only() {
        let mut acc = funded(100);
        let t = tx(40, 3);
        let sig = signed(OWNER, &t);

        let authorized = authorize(&acc, &DigestBoundRecovery, &domain(), &t, &sig).unwrap();
        assert_eq!(authorized.meta_transaction(), &t);
        assert!(!acc.is_nonce_spent(t.nonce));
        assert_eq!(acc.balance(), U256::from(100u64));

        settle(&mut acc, authorized).unwrap();
        assert!(acc.is_nonce_spent(t.nonce));
        assert_eq!(
            authorize(&acc, &DigestBoundRecovery, &domain(), &t, &sig).unwrap_err(),
            WalletError::NonceReplay
        );
    }
}
