//! Bonding-curve strategies.
//!
//! Each market is bound to one pricing policy selected from the curve
//! registry at creation. A strategy is pure math over `(params, supplies,
//! side, delta)`; it never touches accounts. Markets resolve their
//! strategy through the registry at call time, so policies are swappable
//! without touching the market state layer.

use anchor_lang::prelude::*;

use crate::constants::{BPS_SCALE, REFUND_SPREAD_BPS, UNIT};
use crate::errors::{EconomicError, MathError};

pub mod exponential;
pub mod fixed_math;
pub mod linear;
pub mod lmsr;
pub mod sigmoid;

pub use exponential::ExponentialCurve;
pub use linear::LinearCurve;
pub use lmsr::LmsrCurve;
pub use sigmoid::SigmoidCurve;

/// Opaque numeric parameter blob; each strategy documents its layout.
pub type CurveParams = [u64; 4];

/// Which side of the book a trade targets.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub enum Side {
    Yes,
    No,
}

/// Concrete strategy selector stored in the registry.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub enum CurveKind {
    Lmsr,
    Linear,
    Exponential,
    Sigmoid,
}

static LMSR: LmsrCurve = LmsrCurve;
static LINEAR: LinearCurve = LinearCurve;
static EXPONENTIAL: ExponentialCurve = ExponentialCurve;
static SIGMOID: SigmoidCurve = SigmoidCurve;

impl CurveKind {
    pub fn strategy(self) -> &'static dyn BondingCurve {
        match self {
            CurveKind::Lmsr => &LMSR,
            CurveKind::Linear => &LINEAR,
            CurveKind::Exponential => &EXPONENTIAL,
            CurveKind::Sigmoid => &SIGMOID,
        }
    }
}

/// Pricing policy contract.
///
/// Quantities are u64 collateral base units ([`UNIT`] per whole share).
/// Costs round up and refunds round down, so a buy immediately followed
/// by the reverse sell can never return more than it took in.
pub trait BondingCurve {
    fn name(&self) -> &'static str;

    /// Checks a parameter blob before a market may bind to it.
    fn validate_params(&self, params: &CurveParams) -> (bool, &'static str);

    /// Charge for acquiring `delta` more units of `side`. Strictly
    /// positive for `delta > 0` and increasing in same-side supply.
    fn cost(&self, params: &CurveParams, q_yes: u64, q_no: u64, side: Side, delta: u64)
        -> Result<u64>;

    /// Proceeds from selling `delta` units of `side`. Fails with
    /// `InsufficientShares` when `delta` exceeds the outstanding supply.
    fn refund(
        &self,
        params: &CurveParams,
        q_yes: u64,
        q_no: u64,
        side: Side,
        delta: u64,
    ) -> Result<u64>;

    /// Implied odds in basis points; always sums to exactly 10000, and
    /// an empty market reports (5000, 5000).
    fn prices(&self, params: &CurveParams, q_yes: u64, q_no: u64) -> Result<(u64, u64)>;

    /// Inverse of [`BondingCurve::cost`]: the largest `delta` whose cost
    /// fits within `amount`, found by bisection so quotes and executions
    /// can never disagree by a rounding inversion.
    fn shares_for_amount(
        &self,
        params: &CurveParams,
        q_yes: u64,
        q_no: u64,
        side: Side,
        amount: u64,
    ) -> Result<u64> {
        if amount == 0 {
            return err!(MathError::AmountTooSmall);
        }
        let fits = |delta: u64| -> bool {
            matches!(self.cost(params, q_yes, q_no, side, delta), Ok(c) if c <= amount)
        };
        let mut hi: u64 = UNIT;
        while fits(hi) {
            if hi == u64::MAX {
                return Ok(hi);
            }
            hi = hi.saturating_mul(2);
        }
        // Invariant: cost(hi) exceeds amount (or fails); the answer is in [0, hi).
        let mut lo: u64 = 0;
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if fits(mid) {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        if lo == 0 {
            return err!(MathError::AmountTooSmall);
        }
        Ok(lo)
    }
}

/// Supply on each side of the book, ordered for a given trade side.
pub(crate) fn oriented(q_yes: u64, q_no: u64, side: Side) -> (u64, u64) {
    match side {
        Side::Yes => (q_yes, q_no),
        Side::No => (q_no, q_yes),
    }
}

/// Odds as the traded share of total supply, in basis points.
///
/// This is how the ratio-priced curves (linear, exponential, sigmoid)
/// report odds; the no-side price is derived by subtraction so the
/// 10000 invariant holds exactly.
pub(crate) fn ratio_prices(q_yes: u64, q_no: u64) -> Result<(u64, u64)> {
    let total = (q_yes as u128) + (q_no as u128);
    if total == 0 {
        return Ok((5_000, 5_000));
    }
    let yes = (q_yes as u128)
        .checked_mul(BPS_SCALE as u128)
        .ok_or(MathError::Overflow)?
        / total;
    let yes = yes as u64;
    Ok((yes, BPS_SCALE - yes))
}

/// Trapezoidal charge for `delta` units between two marginal prices
/// (base units per whole share). Rounds up.
pub(crate) fn trapezoid_cost(p_start: u128, p_end: u128, delta: u64) -> Result<u64> {
    let avg2 = p_start.checked_add(p_end).ok_or(MathError::Overflow)?;
    let raw = fixed_math::mul_div_ceil(delta as u128, avg2, 2 * UNIT as u128)?;
    let cost = u64::try_from(raw).map_err(|_| error!(MathError::Overflow))?;
    // A positive delta must never price at zero.
    Ok(cost.max(1))
}

/// Trapezoidal proceeds for `delta` units, less the sell spread. Rounds
/// down, which keeps every round trip weakly protocol-favorable.
pub(crate) fn trapezoid_refund(p_start: u128, p_end: u128, delta: u64) -> Result<u64> {
    let avg2 = p_start.checked_add(p_end).ok_or(MathError::Overflow)?;
    let gross = fixed_math::mul_div(delta as u128, avg2, 2 * UNIT as u128)?;
    let net = gross
        .checked_mul((BPS_SCALE - REFUND_SPREAD_BPS) as u128)
        .ok_or(MathError::Overflow)?
        / BPS_SCALE as u128;
    u64::try_from(net).map_err(|_| error!(MathError::Overflow))
}

/// Shared guard for sells.
pub(crate) fn check_sell(delta: u64, supply: u64) -> Result<()> {
    if delta == 0 {
        return err!(MathError::ShareAmountZero);
    }
    if delta > supply {
        return err!(EconomicError::InsufficientShares);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_prices_sum_to_scale() {
        for (y, n) in [(0, 0), (1, 1), (75, 25), (1, 999_999), (u64::MAX, 1)] {
            let (py, pn) = ratio_prices(y, n).unwrap();
            assert_eq!(py + pn, 10_000, "y={y} n={n}");
        }
        assert_eq!(ratio_prices(0, 0).unwrap(), (5_000, 5_000));
        assert_eq!(ratio_prices(75 * UNIT, 25 * UNIT).unwrap(), (7_500, 2_500));
        assert_eq!(ratio_prices(100, 0).unwrap(), (10_000, 0));
    }

    #[test]
    fn every_curve_reports_balanced_empty_market() {
        let cases: [(&dyn BondingCurve, CurveParams); 4] = [
            (&LmsrCurve, [100 * UNIT, 0, 0, 0]),
            (&LinearCurve, [UNIT / 1_000, 0, 0, 0]),
            (&ExponentialCurve, [UNIT / 1_000, 500, 10 * UNIT, 0]),
            (&SigmoidCurve, [UNIT / 1_000, UNIT / 100, 10, 50 * UNIT]),
        ];
        for (curve, params) in cases {
            let (py, pn) = curve.prices(&params, 0, 0).unwrap();
            assert_eq!((py, pn), (5_000, 5_000), "{}", curve.name());
        }
    }

    #[test]
    fn shares_for_amount_brackets_cost_for_every_curve() {
        let cases: [(&dyn BondingCurve, CurveParams); 4] = [
            (&LmsrCurve, [100 * UNIT, 0, 0, 0]),
            (&LinearCurve, [UNIT / 1_000, UNIT / 10_000, 0, 0]),
            (&ExponentialCurve, [UNIT / 1_000, 500, 10 * UNIT, 0]),
            (&SigmoidCurve, [UNIT / 1_000, UNIT / 100, 10, 50 * UNIT]),
        ];
        let q_yes = 40 * UNIT;
        let q_no = 25 * UNIT;
        for (curve, params) in cases {
            for amount in [UNIT / 2, UNIT, 17 * UNIT] {
                let shares = curve
                    .shares_for_amount(&params, q_yes, q_no, Side::Yes, amount)
                    .unwrap();
                let at = curve.cost(&params, q_yes, q_no, Side::Yes, shares).unwrap();
                assert!(at <= amount, "{}: cost {at} > amount {amount}", curve.name());
                let above = curve
                    .cost(&params, q_yes, q_no, Side::Yes, shares + 1)
                    .unwrap();
                assert!(above > amount, "{}: not maximal", curve.name());
            }
        }
    }

    #[test]
    fn round_trip_never_profits_on_any_curve() {
        let cases: [(&dyn BondingCurve, CurveParams); 4] = [
            (&LmsrCurve, [100 * UNIT, 0, 0, 0]),
            (&LinearCurve, [UNIT / 1_000, UNIT / 10_000, 0, 0]),
            (&ExponentialCurve, [UNIT / 1_000, 500, 10 * UNIT, 0]),
            (&SigmoidCurve, [UNIT / 1_000, UNIT / 100, 10, 50 * UNIT]),
        ];
        let q_yes = 30 * UNIT;
        let q_no = 60 * UNIT;
        let delta = 5 * UNIT;
        for (curve, params) in cases {
            let cost = curve.cost(&params, q_yes, q_no, Side::Yes, delta).unwrap();
            let refund = curve
                .refund(&params, q_yes + delta, q_no, Side::Yes, delta)
                .unwrap();
            assert!(refund <= cost, "{}: refund {refund} > cost {cost}", curve.name());
        }
    }
}
