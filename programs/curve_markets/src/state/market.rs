//! Market account and lifecycle state machine.
//!
//! A market moves `Proposed → Approved → Active → Resolving → Disputed →
//! Finalized`, with an admin side-exit to `Cancelled` from Active or
//! Resolving. Finalized and Cancelled are terminal: from there the
//! account is read-only except for claims.
//!
//! Every time-sensitive method takes `now` explicitly; handlers pass the
//! clock in at the boundary, tests pass whatever instant they need.

use anchor_lang::prelude::*;

use crate::constants::{
    BPS_SCALE, MAX_CATEGORY_LEN, MAX_DESCRIPTION_LEN, MAX_LABEL_LEN, MAX_QUESTION_LEN,
};
use crate::curves::{fixed_math, CurveKind, Side};
use crate::errors::{EconomicError, MathError, StateError, ValidationError};

use super::Position;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum MarketState {
    /// Pending admin approval.
    #[default]
    Proposed,
    /// Approved, awaiting activation.
    Approved,
    /// Betting open.
    Active,
    /// Outcome proposed, dispute window running.
    Resolving,
    /// Under admin review.
    Disputed,
    /// Claims enabled.
    Finalized,
    /// Voided; principal refunds enabled.
    Cancelled,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum Outcome {
    /// Not yet determined.
    #[default]
    Invalid,
    Yes,
    No,
    /// Market was voided.
    Cancelled,
}

impl Outcome {
    pub fn side(self) -> Option<Side> {
        match self {
            Outcome::Yes => Some(Side::Yes),
            Outcome::No => Some(Side::No),
            _ => None,
        }
    }
}

/// Individual prediction market account.
///
/// Seeds: ["market", market_id.to_le_bytes()]
#[account]
#[derive(InitSpace)]
pub struct Market {
    /// Unique market identifier.
    pub id: u64,

    /// Market creator's address.
    pub creator: Pubkey,

    #[max_len(MAX_QUESTION_LEN)]
    pub question: String,

    #[max_len(MAX_DESCRIPTION_LEN)]
    pub description: String,

    #[max_len(MAX_CATEGORY_LEN)]
    pub category: String,

    #[max_len(MAX_LABEL_LEN)]
    pub yes_label: String,

    #[max_len(MAX_LABEL_LEN)]
    pub no_label: String,

    pub created_at: i64,

    /// Betting closes here.
    pub end_time: i64,

    /// Outcomes may be proposed from here on.
    pub resolution_time: i64,

    /// Bonding curve binding; the strategy is resolved through the
    /// registry at call time.
    pub curve_id: u16,
    pub curve_params: [u64; 4],

    pub state: MarketState,
    pub outcome: Outcome,

    /// Outstanding shares per side.
    pub yes_shares: u64,
    pub no_shares: u64,

    /// Collateral wagered per side. `yes_pool + no_pool == total_volume`
    /// at all times.
    pub yes_pool: u64,
    pub no_pool: u64,
    pub total_volume: u64,

    // Payout snapshot, frozen at finalization.
    pub payout_pool: u64,
    pub winning_shares: u64,
    pub fee_amount: u64,
    pub fees_collected: bool,
    /// Claims pay back principal instead of pool shares (cancelled
    /// markets, or finalized markets nobody won).
    pub refund_mode: bool,
    pub finalized_at: i64,

    /// PDA bump seed.
    pub bump: u8,
}

impl Market {
    pub const SEED: &'static [u8] = b"market";

    pub fn shares_on(&self, side: Side) -> u64 {
        match side {
            Side::Yes => self.yes_shares,
            Side::No => self.no_shares,
        }
    }

    pub fn pool_on(&self, side: Side) -> u64 {
        match side {
            Side::Yes => self.yes_pool,
            Side::No => self.no_pool,
        }
    }

    /// Current implied odds in basis points.
    pub fn odds(&self, kind: CurveKind) -> Result<(u64, u64)> {
        kind.strategy()
            .prices(&self.curve_params, self.yes_shares, self.no_shares)
    }

    // ---- trading ----

    pub fn assert_can_trade(&self, now: i64) -> Result<()> {
        require!(self.state == MarketState::Active, StateError::MarketNotActive);
        require!(now < self.end_time, StateError::BettingClosed);
        Ok(())
    }

    pub fn record_bet(&mut self, side: Side, amount: u64, shares: u64) -> Result<()> {
        let (pool, supply) = match side {
            Side::Yes => (&mut self.yes_pool, &mut self.yes_shares),
            Side::No => (&mut self.no_pool, &mut self.no_shares),
        };
        *pool = pool.checked_add(amount).ok_or(MathError::Overflow)?;
        *supply = supply.checked_add(shares).ok_or(MathError::Overflow)?;
        self.total_volume = self
            .total_volume
            .checked_add(amount)
            .ok_or(MathError::Overflow)?;
        Ok(())
    }

    pub fn record_sell(&mut self, side: Side, shares: u64, refund: u64) -> Result<()> {
        let (pool, supply) = match side {
            Side::Yes => (&mut self.yes_pool, &mut self.yes_shares),
            Side::No => (&mut self.no_pool, &mut self.no_shares),
        };
        require!(*supply >= shares, EconomicError::InsufficientShares);
        require!(*pool >= refund, EconomicError::InsufficientPool);
        *pool -= refund;
        *supply -= shares;
        self.total_volume -= refund;
        Ok(())
    }

    // ---- lifecycle ----

    pub fn approve(&mut self) -> Result<()> {
        require!(
            self.state == MarketState::Proposed,
            StateError::InvalidStateTransition
        );
        self.state = MarketState::Approved;
        Ok(())
    }

    pub fn activate(&mut self) -> Result<()> {
        require!(
            self.state == MarketState::Approved,
            StateError::InvalidStateTransition
        );
        self.state = MarketState::Active;
        Ok(())
    }

    pub fn begin_resolution(&mut self, now: i64) -> Result<()> {
        require!(
            self.state == MarketState::Active,
            StateError::InvalidStateTransition
        );
        require!(now >= self.resolution_time, StateError::ResolutionTooEarly);
        self.state = MarketState::Resolving;
        Ok(())
    }

    pub fn mark_disputed(&mut self) -> Result<()> {
        require!(
            matches!(self.state, MarketState::Resolving | MarketState::Disputed),
            StateError::MarketNotResolving
        );
        self.state = MarketState::Disputed;
        Ok(())
    }

    /// Freezes the payout snapshot and enters the terminal Finalized
    /// state. `calculate_payout` depends on nothing mutated afterwards.
    pub fn finalize(&mut self, outcome: Outcome, now: i64, fee_bps: u64) -> Result<()> {
        require!(
            matches!(self.state, MarketState::Resolving | MarketState::Disputed),
            StateError::InvalidStateTransition
        );
        let side = outcome.side().ok_or(ValidationError::InvalidOutcome)?;
        let winning_shares = self.shares_on(side);
        if winning_shares == 0 {
            // Nobody holds the winning side: fall back to principal
            // refunds, fee waived.
            self.refund_mode = true;
            self.payout_pool = self.total_volume;
            self.winning_shares = 0;
            self.fee_amount = 0;
        } else {
            let fee = fixed_math::mul_div(
                self.total_volume as u128,
                fee_bps as u128,
                BPS_SCALE as u128,
            )? as u64;
            self.fee_amount = fee;
            self.payout_pool = self.total_volume - fee;
            self.winning_shares = winning_shares;
        }
        self.outcome = outcome;
        self.state = MarketState::Finalized;
        self.finalized_at = now;
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<()> {
        require!(
            matches!(self.state, MarketState::Active | MarketState::Resolving),
            StateError::InvalidStateTransition
        );
        self.state = MarketState::Cancelled;
        self.outcome = Outcome::Cancelled;
        self.refund_mode = true;
        Ok(())
    }

    // ---- payouts ----

    /// Pure function of the payout snapshot and the user's position.
    pub fn calculate_payout(&self, position: &Position) -> Result<u64> {
        match self.state {
            MarketState::Cancelled => Ok(position.total_invested),
            MarketState::Finalized => {
                if self.refund_mode {
                    return Ok(position.total_invested);
                }
                let side = self.outcome.side().ok_or(ValidationError::InvalidOutcome)?;
                let held = position.shares_on(side);
                if held == 0 {
                    return Ok(0);
                }
                let raw = fixed_math::mul_div(
                    held as u128,
                    self.payout_pool as u128,
                    self.winning_shares as u128,
                )?;
                u64::try_from(raw).map_err(|_| error!(MathError::Overflow))
            }
            _ => err!(StateError::MarketNotFinalized),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::UNIT;

    const END: i64 = 10_000;
    const RESOLUTION: i64 = 20_000;

    fn market(state: MarketState) -> Market {
        Market {
            id: 1,
            creator: Pubkey::new_unique(),
            question: "Will it rain tomorrow?".into(),
            description: String::new(),
            category: "weather".into(),
            yes_label: "Yes".into(),
            no_label: "No".into(),
            created_at: 0,
            end_time: END,
            resolution_time: RESOLUTION,
            curve_id: 0,
            curve_params: [100 * UNIT, 0, 0, 0],
            state,
            outcome: Outcome::Invalid,
            yes_shares: 0,
            no_shares: 0,
            yes_pool: 0,
            no_pool: 0,
            total_volume: 0,
            payout_pool: 0,
            winning_shares: 0,
            fee_amount: 0,
            fees_collected: false,
            refund_mode: false,
            finalized_at: 0,
            bump: 255,
        }
    }

    fn position(yes: u64, no: u64, invested: u64) -> Position {
        Position {
            market: Pubkey::new_unique(),
            owner: Pubkey::new_unique(),
            yes_shares: yes,
            no_shares: no,
            total_invested: invested,
            claimed: false,
            bump: 255,
        }
    }

    fn expect_err<T: std::fmt::Debug>(res: Result<T>, name: &str) {
        let err = res.expect_err("expected an error");
        let text = format!("{err:?}");
        assert!(text.contains(name), "expected {name}, got {text}");
    }

    #[test]
    fn happy_path_through_the_state_machine() {
        let mut m = market(MarketState::Proposed);
        m.approve().unwrap();
        assert_eq!(m.state, MarketState::Approved);
        m.activate().unwrap();
        assert_eq!(m.state, MarketState::Active);
        m.begin_resolution(RESOLUTION).unwrap();
        assert_eq!(m.state, MarketState::Resolving);
        m.mark_disputed().unwrap();
        assert_eq!(m.state, MarketState::Disputed);
        m.finalize(Outcome::Yes, RESOLUTION + 100, 0).unwrap();
        assert_eq!(m.state, MarketState::Finalized);
        assert_eq!(m.outcome, Outcome::Yes);
    }

    #[test]
    fn backwards_and_skipping_transitions_revert() {
        expect_err(market(MarketState::Proposed).activate(), "InvalidStateTransition");
        expect_err(market(MarketState::Active).approve(), "InvalidStateTransition");
        expect_err(
            market(MarketState::Proposed).begin_resolution(RESOLUTION),
            "InvalidStateTransition",
        );
        expect_err(
            market(MarketState::Active).finalize(Outcome::Yes, RESOLUTION, 0),
            "InvalidStateTransition",
        );
        expect_err(market(MarketState::Finalized).cancel(), "InvalidStateTransition");
        expect_err(market(MarketState::Proposed).cancel(), "InvalidStateTransition");
        expect_err(market(MarketState::Finalized).approve(), "InvalidStateTransition");
        expect_err(market(MarketState::Cancelled).mark_disputed(), "MarketNotResolving");
    }

    #[test]
    fn resolution_respects_the_clock() {
        let mut m = market(MarketState::Active);
        expect_err(m.begin_resolution(RESOLUTION - 1), "ResolutionTooEarly");
        m.begin_resolution(RESOLUTION).unwrap();
    }

    #[test]
    fn trading_gates() {
        let m = market(MarketState::Active);
        m.assert_can_trade(END - 1).unwrap();
        expect_err(m.assert_can_trade(END), "BettingClosed");
        expect_err(market(MarketState::Proposed).assert_can_trade(0), "MarketNotActive");
        expect_err(market(MarketState::Resolving).assert_can_trade(0), "MarketNotActive");
    }

    #[test]
    fn pools_and_volume_stay_consistent() {
        let mut m = market(MarketState::Active);
        m.record_bet(Side::Yes, 30 * UNIT, 50 * UNIT).unwrap();
        m.record_bet(Side::No, 10 * UNIT, 18 * UNIT).unwrap();
        assert_eq!(m.total_volume, m.yes_pool + m.no_pool);
        assert_eq!(m.yes_shares, 50 * UNIT);

        m.record_sell(Side::Yes, 20 * UNIT, 8 * UNIT).unwrap();
        assert_eq!(m.yes_shares, 30 * UNIT);
        assert_eq!(m.total_volume, m.yes_pool + m.no_pool);
    }

    #[test]
    fn sells_cannot_drain_beyond_the_pool() {
        let mut m = market(MarketState::Active);
        m.record_bet(Side::Yes, 5 * UNIT, 10 * UNIT).unwrap();
        expect_err(m.record_sell(Side::Yes, UNIT, 6 * UNIT), "InsufficientPool");
        expect_err(m.record_sell(Side::Yes, 11 * UNIT, UNIT), "InsufficientShares");
    }

    #[test]
    fn finalize_snapshots_pool_and_fee() {
        let mut m = market(MarketState::Resolving);
        m.record_bet(Side::Yes, 600 * UNIT, 700 * UNIT).unwrap();
        m.record_bet(Side::No, 400 * UNIT, 500 * UNIT).unwrap();
        m.finalize(Outcome::Yes, RESOLUTION + 1, 500).unwrap();

        assert_eq!(m.fee_amount, 50 * UNIT);
        assert_eq!(m.payout_pool, 950 * UNIT);
        assert_eq!(m.winning_shares, 700 * UNIT);
        assert!(!m.refund_mode);
        assert_eq!(m.payout_pool + m.fee_amount, m.total_volume);
    }

    #[test]
    fn payouts_are_parimutuel_over_winning_shares() {
        let mut m = market(MarketState::Resolving);
        m.record_bet(Side::Yes, 600 * UNIT, 700 * UNIT).unwrap();
        m.record_bet(Side::No, 400 * UNIT, 500 * UNIT).unwrap();
        m.finalize(Outcome::Yes, RESOLUTION + 1, 0).unwrap();

        let big = position(420 * UNIT, 0, 350 * UNIT);
        let small = position(280 * UNIT, 0, 250 * UNIT);
        let loser = position(0, 500 * UNIT, 400 * UNIT);

        let big_pay = m.calculate_payout(&big).unwrap();
        let small_pay = m.calculate_payout(&small).unwrap();
        assert_eq!(big_pay, 600 * UNIT); // 420/700 of 1000
        assert_eq!(small_pay, 400 * UNIT);
        assert_eq!(m.calculate_payout(&loser).unwrap(), 0);
        assert!(big_pay + small_pay <= m.payout_pool);
    }

    #[test]
    fn payout_is_a_pure_function_of_the_snapshot() {
        let mut m = market(MarketState::Resolving);
        m.record_bet(Side::Yes, 100 * UNIT, 120 * UNIT).unwrap();
        m.record_bet(Side::No, 50 * UNIT, 80 * UNIT).unwrap();
        m.finalize(Outcome::Yes, RESOLUTION + 1, 250).unwrap();

        let p = position(60 * UNIT, 0, 50 * UNIT);
        let first = m.calculate_payout(&p).unwrap();
        // Nothing that happens later may change the number.
        let second = m.calculate_payout(&p).unwrap();
        assert_eq!(first, second);
        expect_err(m.assert_can_trade(0), "MarketNotActive");
    }

    #[test]
    fn unwon_market_falls_back_to_refunds() {
        let mut m = market(MarketState::Resolving);
        m.record_bet(Side::No, 100 * UNIT, 150 * UNIT).unwrap();
        m.finalize(Outcome::Yes, RESOLUTION + 1, 500).unwrap();

        assert!(m.refund_mode);
        assert_eq!(m.fee_amount, 0);
        let p = position(0, 150 * UNIT, 100 * UNIT);
        assert_eq!(m.calculate_payout(&p).unwrap(), 100 * UNIT);
    }

    #[test]
    fn cancelled_market_refunds_principal() {
        let mut m = market(MarketState::Active);
        m.record_bet(Side::Yes, 70 * UNIT, 90 * UNIT).unwrap();
        m.cancel().unwrap();
        assert_eq!(m.state, MarketState::Cancelled);
        assert_eq!(m.outcome, Outcome::Cancelled);

        let p = position(90 * UNIT, 0, 70 * UNIT);
        assert_eq!(m.calculate_payout(&p).unwrap(), 70 * UNIT);
    }

    #[test]
    fn payout_before_settlement_is_an_error() {
        let m = market(MarketState::Active);
        expect_err(m.calculate_payout(&position(1, 0, 1)), "MarketNotFinalized");
    }

    #[test]
    fn finalize_rejects_non_binary_outcomes() {
        expect_err(
            market(MarketState::Resolving).finalize(Outcome::Invalid, 0, 0),
            "InvalidOutcome",
        );
        expect_err(
            market(MarketState::Resolving).finalize(Outcome::Cancelled, 0, 0),
            "InvalidOutcome",
        );
    }

    #[test]
    fn lmsr_market_settles_end_to_end() {
        use crate::curves::{BondingCurve, LmsrCurve};

        let mut m = market(MarketState::Active);
        let params = m.curve_params;

        // Two bettors back Yes, one backs No, all priced by the curve.
        let mut positions = Vec::new();
        for (side, amount) in [
            (Side::Yes, 20 * UNIT),
            (Side::Yes, 5 * UNIT),
            (Side::No, 10 * UNIT),
        ] {
            let shares = LmsrCurve
                .shares_for_amount(&params, m.yes_shares, m.no_shares, side, amount)
                .unwrap();
            m.record_bet(side, amount, shares).unwrap();
            let mut p = position(0, 0, 0);
            p.credit(side, shares, amount).unwrap();
            positions.push(p);
        }
        assert_eq!(m.total_volume, 35 * UNIT);
        assert_eq!(m.total_volume, m.yes_pool + m.no_pool);
        let (py, pn) = m.odds(CurveKind::Lmsr).unwrap();
        assert!(py > pn);

        // Resolution: propose after the deadline, no dispute, finalize.
        m.begin_resolution(RESOLUTION).unwrap();
        m.finalize(Outcome::Yes, RESOLUTION + 48 * 3_600, 500).unwrap();

        // Winners split the pool net of fee, pro rata by shares; the
        // loser gets nothing; totals never exceed the snapshot pool.
        let payouts: Vec<u64> = positions
            .iter()
            .map(|p| m.calculate_payout(p).unwrap())
            .collect();
        assert!(payouts[0] > payouts[1]);
        assert!(payouts[1] > 0);
        assert_eq!(payouts[2], 0);
        assert!(payouts[0] + payouts[1] <= m.payout_pool);
        assert_eq!(m.payout_pool + m.fee_amount, m.total_volume);
    }

    #[test]
    fn odds_move_with_the_book() {
        let mut m = market(MarketState::Active);
        assert_eq!(m.odds(CurveKind::Lmsr).unwrap(), (5_000, 5_000));
        m.record_bet(Side::Yes, UNIT, UNIT).unwrap();
        let (py, pn) = m.odds(CurveKind::Lmsr).unwrap();
        assert!(py > pn);
        assert_eq!(py + pn, 10_000);
    }
}
