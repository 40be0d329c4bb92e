//! Outcome proposal and dispute records, owned by the resolution flow.

use anchor_lang::prelude::*;

use crate::constants::MAX_REASON_LEN;
use crate::errors::{MathError, StateError, ValidationError};

use super::{EscalationPolicy, Outcome};

/// Per-market resolution record, created when an outcome is proposed.
///
/// Seeds: ["resolution", market]
#[account]
#[derive(InitSpace)]
pub struct ResolutionState {
    pub market: Pubkey,

    /// Resolver that proposed the outcome.
    pub proposer: Pubkey,
    pub proposed_outcome: Outcome,
    pub proposal_ts: i64,
    pub dispute_deadline: i64,

    /// Historical dispute totals, kept for the aggregation policy even
    /// though only the latest dispute is active.
    pub dispute_count: u8,
    pub dispute_bond_total: u64,

    /// Set once the escalation policy trips; blocks auto-finalization.
    pub escalated: bool,

    pub active_dispute: Option<DisputeRecord>,

    /// PDA bump seed.
    pub bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, InitSpace, Debug)]
pub struct DisputeRecord {
    pub disputer: Pubkey,
    pub bond: u64,
    #[max_len(MAX_REASON_LEN)]
    pub reason: String,
    pub timestamp: i64,
}

impl ResolutionState {
    pub const SEED: &'static [u8] = b"resolution";

    pub fn window_open(&self, now: i64) -> bool {
        now < self.dispute_deadline
    }

    /// Records a dispute inside the window. Returns true when this
    /// dispute tripped the escalation policy.
    pub fn record_dispute(
        &mut self,
        disputer: Pubkey,
        bond: u64,
        reason: String,
        now: i64,
        policy: &EscalationPolicy,
    ) -> Result<bool> {
        require!(self.window_open(now), StateError::DisputeWindowClosed);
        require!(
            !reason.is_empty() && reason.len() <= MAX_REASON_LEN,
            ValidationError::InvalidReason
        );
        self.dispute_count = self.dispute_count.saturating_add(1);
        self.dispute_bond_total = self
            .dispute_bond_total
            .checked_add(bond)
            .ok_or(MathError::Overflow)?;
        self.active_dispute = Some(DisputeRecord {
            disputer,
            bond,
            reason,
            timestamp: now,
        });
        if !self.escalated
            && policy.should_escalate(self.dispute_count, self.dispute_bond_total)
        {
            self.escalated = true;
            return Ok(true);
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::UNIT;

    const WINDOW_END: i64 = 5_000;

    fn resolution() -> ResolutionState {
        ResolutionState {
            market: Pubkey::new_unique(),
            proposer: Pubkey::new_unique(),
            proposed_outcome: Outcome::Yes,
            proposal_ts: 1_000,
            dispute_deadline: WINDOW_END,
            dispute_count: 0,
            dispute_bond_total: 0,
            escalated: false,
            active_dispute: None,
            bump: 255,
        }
    }

    #[test]
    fn disputes_only_land_inside_the_window() {
        let policy = EscalationPolicy::CountBased { max_disputes: 3 };
        let mut r = resolution();
        assert!(r
            .record_dispute(Pubkey::new_unique(), UNIT, "bad source".into(), WINDOW_END, &policy)
            .is_err());
        assert!(r
            .record_dispute(
                Pubkey::new_unique(),
                UNIT,
                "bad source".into(),
                WINDOW_END - 1,
                &policy
            )
            .is_ok());
    }

    #[test]
    fn rejects_blank_or_oversized_reasons() {
        let policy = EscalationPolicy::CountBased { max_disputes: 3 };
        let mut r = resolution();
        assert!(r
            .record_dispute(Pubkey::new_unique(), UNIT, String::new(), 2_000, &policy)
            .is_err());
        let long = "x".repeat(MAX_REASON_LEN + 1);
        assert!(r
            .record_dispute(Pubkey::new_unique(), UNIT, long, 2_000, &policy)
            .is_err());
    }

    #[test]
    fn history_accumulates_while_active_dispute_is_replaced() {
        let policy = EscalationPolicy::CountBased { max_disputes: 10 };
        let mut r = resolution();
        let second_disputer = Pubkey::new_unique();
        r.record_dispute(Pubkey::new_unique(), UNIT, "one".into(), 2_000, &policy)
            .unwrap();
        r.record_dispute(second_disputer, 2 * UNIT, "two".into(), 2_100, &policy)
            .unwrap();

        assert_eq!(r.dispute_count, 2);
        assert_eq!(r.dispute_bond_total, 3 * UNIT);
        let active = r.active_dispute.as_ref().unwrap();
        assert_eq!(active.disputer, second_disputer);
        assert_eq!(active.reason, "two");
    }

    #[test]
    fn count_policy_escalates_exactly_once() {
        let policy = EscalationPolicy::CountBased { max_disputes: 3 };
        let mut r = resolution();
        assert!(!r
            .record_dispute(Pubkey::new_unique(), UNIT, "a".into(), 2_000, &policy)
            .unwrap());
        assert!(!r
            .record_dispute(Pubkey::new_unique(), UNIT, "b".into(), 2_001, &policy)
            .unwrap());
        assert!(r
            .record_dispute(Pubkey::new_unique(), UNIT, "c".into(), 2_002, &policy)
            .unwrap());
        assert!(r.escalated);
        // Further disputes keep the flag without re-reporting the trip.
        assert!(!r
            .record_dispute(Pubkey::new_unique(), UNIT, "d".into(), 2_003, &policy)
            .unwrap());
        assert_eq!(r.dispute_count, 4);
    }

    #[test]
    fn bond_weighted_policy_watches_the_total() {
        let policy = EscalationPolicy::BondWeighted { bond_threshold: 5 * UNIT };
        let mut r = resolution();
        assert!(!r
            .record_dispute(Pubkey::new_unique(), 2 * UNIT, "a".into(), 2_000, &policy)
            .unwrap());
        assert!(r
            .record_dispute(Pubkey::new_unique(), 3 * UNIT, "b".into(), 2_001, &policy)
            .unwrap());
        assert!(r.escalated);
    }
}
