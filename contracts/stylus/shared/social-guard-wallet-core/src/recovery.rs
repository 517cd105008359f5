//! Guardian-quorum social recovery.
//!
//! `NoActiveRecovery --request--> RecoveryPending --approve x quorum--> NoActiveRecovery`
//!
//! A request snapshots the guardian set; only guardians in that snapshot vote and the quorum
//! is computed from its size, so registry edits during the vote cannot move the target.

use alloc::{vec, vec::Vec};

use alloy_primitives::Address;

use crate::{
    account::{AccountState, RecoveryProposal, RecoveryStatus},
    errors::WalletError,
    events::WalletEvent,
    registry::require_owner,
};

/// Open a proposal to hand ownership to `new_owner`, replacing any live one.
///
/// Only the owner or a current guardian may ask.
pub fn request_recovery<S: AccountState>(
    account: &mut S,
    caller: Address,
    new_owner: Address,
) -> Result<Vec<WalletEvent>, WalletError> {
    let owner = account.owner();
    if caller != owner && !account.is_guardian(caller) {
        return Err(WalletError::Unauthorized);
    }
    if new_owner == Address::ZERO {
        return Err(WalletError::InvalidAddress);
    }
    if new_owner == owner {
        return Err(WalletError::AlreadyOwner);
    }
    let guardians = account.guardians();
    if guardians.is_empty() {
        return Err(WalletError::NoGuardians);
    }

    account.put_proposal(Some(RecoveryProposal::new(new_owner, guardians)));
    Ok(vec![WalletEvent::RecoveryRequested { new_owner }])
}

/// Record `caller`'s approval; finalises the transfer once the quorum is met.
pub fn approve_recovery<S: AccountState>(
    account: &mut S,
    caller: Address,
) -> Result<Vec<WalletEvent>, WalletError> {
    let mut proposal = account.proposal().ok_or(WalletError::NoActiveProposal)?;
    if !proposal.is_voter(caller) {
        return Err(WalletError::NotAGuardian);
    }
    if proposal.has_approved(caller) {
        return Err(WalletError::AlreadyApproved);
    }

    proposal.approvals.push(caller);
    let mut events = vec![WalletEvent::RecoveryApproved {
        guardian: caller,
        approvals: proposal.approvals.len(),
        required: proposal.required(),
    }];

    if !proposal.is_complete() {
        account.put_proposal(Some(proposal));
        return Ok(events);
    }

    let new_owner = proposal.proposed_owner;
    account.set_owner(new_owner);
    // owner never doubles as a guardian
    if account.is_guardian(new_owner) {
        account.remove_guardian(new_owner);
        events.push(WalletEvent::TrustedContactRemoved { contact: new_owner });
    }
    account.put_proposal(None);
    events.push(WalletEvent::RecoveryFinalized { new_owner });
    Ok(events)
}

/// Owner withdraws the live proposal.
pub fn cancel_recovery<S: AccountState>(
    account: &mut S,
    caller: Address,
) -> Result<Vec<WalletEvent>, WalletError> {
    require_owner(account, caller)?;
    let proposal = account.proposal().ok_or(WalletError::NoActiveProposal)?;

    account.put_proposal(None);
    Ok(vec![WalletEvent::RecoveryCancelled {
        proposed_owner: proposal.proposed_owner,
    }])
}

pub fn recovery_status<S: AccountState>(account: &S) -> RecoveryStatus {
    RecoveryStatus::of(account.proposal().as_ref())
}

pub fn has_approved<S: AccountState>(account: &S, guardian: Address) -> bool {
    account
        .proposal()
        .map(|p| p.has_approved(guardian))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        memory::InMemoryAccount,
        registry::{add_trusted_contact, remove_trusted_contact},
        testing::addr,
    };

    const OWNER: u8 = 0x01;
    const G1: u8 = 0x11;
    const G2: u8 = 0x12;
    const NEW_OWNER: u8 = 0x99;

    fn with_guardians(guardians: &[u8]) -> InMemoryAccount {
        let mut acc = InMemoryAccount::new(addr(OWNER), addr(0x02));
        for g in guardians {
            add_trusted_contact(&mut acc, addr(OWNER), addr(*g)).unwrap();
        }
        acc
    }

    #[test]
    fn two_guardian_quorum() {
        let mut acc = with_guardians(&[G1, G2]);
        let events = request_recovery(&mut acc, addr(OWNER), addr(NEW_OWNER)).unwrap();
        assert_eq!(events, vec![WalletEvent::RecoveryRequested { new_owner: addr(NEW_OWNER) }]);

        let events = approve_recovery(&mut acc, addr(G1)).unwrap();
        assert_eq!(
            events,
            vec![WalletEvent::RecoveryApproved {
                guardian: addr(G1),
                approvals: 1,
                required: 2
            }]
        );
        assert_eq!(acc.owner(), addr(OWNER));
        assert!(recovery_status(&acc).active);

        let events = approve_recovery(&mut acc, addr(G2)).unwrap();
        assert_eq!(
            events.last(),
            Some(&WalletEvent::RecoveryFinalized { new_owner: addr(NEW_OWNER) })
        );
        assert_eq!(acc.owner(), addr(NEW_OWNER));
        assert_eq!(acc.proposal(), None);
        assert!(!recovery_status(&acc).active);
    }

    #[test]
    fn non_guardian_cannot_approve() {
        let mut acc = with_guardians(&[G1, G2]);
        request_recovery(&mut acc, addr(OWNER), addr(NEW_OWNER)).unwrap();

        assert_eq!(approve_recovery(&mut acc, addr(0x77)), Err(WalletError::NotAGuardian));
        assert_eq!(approve_recovery(&mut acc, addr(OWNER)), Err(WalletError::NotAGuardian));
        assert_eq!(recovery_status(&acc).approvals, 0);
    }

    #[test]
    fn approval_without_proposal() {
        let mut acc = with_guardians(&[G1]);
        assert_eq!(approve_recovery(&mut acc, addr(G1)), Err(WalletError::NoActiveProposal));
    }

    #[test]
    fn second_approval_is_not_double_counted() {
        let mut acc = with_guardians(&[G1, G2]);
        request_recovery(&mut acc, addr(G1), addr(NEW_OWNER)).unwrap();
        approve_recovery(&mut acc, addr(G1)).unwrap();

        assert_eq!(approve_recovery(&mut acc, addr(G1)), Err(WalletError::AlreadyApproved));
        assert_eq!(recovery_status(&acc).approvals, 1);
        assert!(has_approved(&acc, addr(G1)));
        assert!(!has_approved(&acc, addr(G2)));
        assert_eq!(acc.owner(), addr(OWNER));
    }

    #[test]
    fn request_preconditions() {
        let mut acc = with_guardians(&[G1]);
        assert_eq!(
            request_recovery(&mut acc, addr(0x55), addr(NEW_OWNER)),
            Err(WalletError::Unauthorized)
        );
        assert_eq!(
            request_recovery(&mut acc, addr(OWNER), Address::ZERO),
            Err(WalletError::InvalidAddress)
        );
        assert_eq!(
            request_recovery(&mut acc, addr(G1), addr(OWNER)),
            Err(WalletError::AlreadyOwner)
        );

        let mut empty = with_guardians(&[]);
        assert_eq!(
            request_recovery(&mut empty, addr(OWNER), addr(NEW_OWNER)),
            Err(WalletError::NoGuardians)
        );
        assert_eq!(acc.proposal(), None);
    }

    #[test]
    fn guardian_added_mid_vote_neither_votes_nor_moves_quorum() {
        let mut acc = with_guardians(&[G1, G2]);
        request_recovery(&mut acc, addr(OWNER), addr(NEW_OWNER)).unwrap();
        add_trusted_contact(&mut acc, addr(OWNER), addr(0x13)).unwrap();

        assert_eq!(approve_recovery(&mut acc, addr(0x13)), Err(WalletError::NotAGuardian));
        assert_eq!(recovery_status(&acc).required, 2);

        approve_recovery(&mut acc, addr(G1)).unwrap();
        approve_recovery(&mut acc, addr(G2)).unwrap();
        assert_eq!(acc.owner(), addr(NEW_OWNER));
    }

    #[test]
    fn guardian_removed_mid_vote_still_votes_from_snapshot() {
        let mut acc = with_guardians(&[G1, G2]);
        request_recovery(&mut acc, addr(OWNER), addr(NEW_OWNER)).unwrap();
        remove_trusted_contact(&mut acc, addr(OWNER), addr(G2)).unwrap();

        assert_eq!(recovery_status(&acc).required, 2);
        approve_recovery(&mut acc, addr(G1)).unwrap();
        approve_recovery(&mut acc, addr(G2)).unwrap();
        assert_eq!(acc.owner(), addr(NEW_OWNER));
    }

    #[test]
    fn new_request_replaces_live_proposal_and_resets_votes() {
        let mut acc = with_guardians(&[G1, G2]);
        request_recovery(&mut acc, addr(OWNER), addr(NEW_OWNER)).unwrap();
        approve_recovery(&mut acc, addr(G1)).unwrap();

        request_recovery(&mut acc, addr(G2), addr(0x98)).unwrap();
        let status = recovery_status(&acc);
        assert_eq!(status.proposed_owner, addr(0x98));
        assert_eq!(status.approvals, 0);
    }

    #[test]
    fn guardian_promoted_to_owner_leaves_the_guardian_set() {
        let mut acc = with_guardians(&[G1, G2]);
        request_recovery(&mut acc, addr(OWNER), addr(G1)).unwrap();
        approve_recovery(&mut acc, addr(G1)).unwrap();
        let events = approve_recovery(&mut acc, addr(G2)).unwrap();

        assert!(events.contains(&WalletEvent::TrustedContactRemoved { contact: addr(G1) }));
        assert_eq!(acc.owner(), addr(G1));
        assert_eq!(acc.guardians(), vec![addr(G2)]);
    }

    #[test]
    fn owner_cancels() {
        let mut acc = with_guardians(&[G1]);
        assert_eq!(cancel_recovery(&mut acc, addr(OWNER)), Err(WalletError::NoActiveProposal));
        request_recovery(&mut acc, addr(G1), addr(NEW_OWNER)).unwrap();

        assert_eq!(cancel_recovery(&mut acc, addr(G1)), Err(WalletError::Unauthorized));
        let events = cancel_recovery(&mut acc, addr(OWNER)).unwrap();
        assert_eq!(
            events,
            vec![WalletEvent::RecoveryCancelled { proposed_owner: addr(NEW_OWNER) }]
        );
        assert_eq!(approve_recovery(&mut acc, addr(G1)), Err(WalletError::NoActiveProposal));
    }
}
