//! Persistent account record and the recovery proposal it owns.

use alloc::vec::Vec;

use alloy_primitives::{Address, U256};

use crate::errors::WalletError;

/// Approvals needed to finalise a recovery: every guardian in the frozen snapshot.
pub const fn recovery_quorum(guardian_count: usize) -> usize {
    guardian_count
}

/// Live ownership-transfer proposal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecoveryProposal {
    pub proposed_owner: Address,
    /// Guardian set captured when the proposal was requested. Registry changes made while
    /// the vote is open do not touch it.
    pub guardians: Vec<Address>,
    /// Guardians (from `guardians`) that approved, in approval order.
    pub approvals: Vec<Address>,
}

impl RecoveryProposal {
    pub fn new(proposed_owner: Address, guardians: Vec<Address>) -> Self {
        Self {
            proposed_owner,
            guardians,
            approvals: Vec::new(),
        }
    }

    pub fn required(&self) -> usize {
        recovery_quorum(self.guardians.len())
    }

    pub fn is_voter(&self, who: Address) -> bool {
        self.guardians.contains(&who)
    }

    pub fn has_approved(&self, who: Address) -> bool {
        self.approvals.contains(&who)
    }

    pub fn is_complete(&self) -> bool {
        self.approvals.len() >= self.required()
    }
}

/// Read-only view of the recovery state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecoveryStatus {
    pub active: bool,
    pub proposed_owner: Address,
    pub approvals: usize,
    pub required: usize,
}

impl RecoveryStatus {
    pub fn of(proposal: Option<&RecoveryProposal>) -> Self {
        match proposal {
            Some(p) => Self {
                active: true,
                proposed_owner: p.proposed_owner,
                approvals: p.approvals.len(),
                required: p.required(),
            },
            None => Self::default(),
        }
    }
}

/// The wallet's single piece of shared mutable state.
///
/// Implemented by contract storage on-chain and by [`crate::memory::InMemoryAccount`]
/// off-chain. Transition functions validate everything before their first write, and the
/// implementor is responsible for discarding all writes when a transition returns an error
/// (EVM revert on-chain, replace-on-write off-chain).
pub trait AccountState {
    fn owner(&self) -> Address;
    fn set_owner(&mut self, owner: Address);

    fn sponsor(&self) -> Address;
    fn set_sponsor(&mut self, sponsor: Address);

    /// Trusted contacts in insertion order.
    fn guardians(&self) -> Vec<Address>;

    fn is_guardian(&self, who: Address) -> bool {
        self.guardians().contains(&who)
    }

    fn push_guardian(&mut self, guardian: Address);

    /// Remove `guardian`, keeping the relative order of the others.
    fn remove_guardian(&mut self, guardian: Address);

    fn proposal(&self) -> Option<RecoveryProposal>;

    /// Replace the stored proposal wholesale; `None` clears it.
    fn put_proposal(&mut self, proposal: Option<RecoveryProposal>);

    fn is_nonce_spent(&self, nonce: U256) -> bool;
    fn mark_nonce_spent(&mut self, nonce: U256);

    /// Native value held by the account.
    fn balance(&self) -> U256;

    /// Send `value` to `to`, forwarding `data` as the call payload.
    fn transfer_out(&mut self, to: Address, value: U256, data: &[u8]) -> Result<(), WalletError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::addr;
    use alloc::vec;

    #[test]
    fn quorum_is_unanimous() {
        assert_eq!(recovery_quorum(0), 0);
        assert_eq!(recovery_quorum(1), 1);
        assert_eq!(recovery_quorum(5), 5);
    }

    #[test]
    fn proposal_completes_when_every_snapshot_guardian_approved() {
        let mut p = RecoveryProposal::new(addr(9), vec![addr(1), addr(2)]);
        assert!(!p.is_complete());
        p.approvals.push(addr(1));
        assert!(!p.is_complete());
        p.approvals.push(addr(2));
        assert!(p.is_complete());
    }

    #[test]
    fn status_reflects_proposal() {
        assert_eq!(RecoveryStatus::of(None), RecoveryStatus::default());

        let mut p = RecoveryProposal::new(addr(9), vec![addr(1), addr(2), addr(3)]);
        p.approvals.push(addr(3));
        let status = RecoveryStatus::of(Some(&p));
        assert!(status.active);
        assert_eq!(status.proposed_owner, addr(9));
        assert_eq!(status.approvals, 1);
        assert_eq!(status.required, 3);
    }
}
