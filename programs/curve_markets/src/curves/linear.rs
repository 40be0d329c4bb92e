//! Linear pricing policy.
//!
//! Marginal price grows linearly with same-side supply:
//! `p(q) = base_price + q * slope / UNIT`. A zero slope degenerates to a
//! constant-price market. Charges integrate the marginal price exactly
//! (trapezoidal rule); sells return the same integral less the spread.
//!
//! Parameter layout: `params[0] = base_price`, `params[1] = slope`, both
//! in base units per whole share; remaining slots must be zero.

use anchor_lang::prelude::*;

use super::{
    check_sell, oriented, ratio_prices, trapezoid_cost, trapezoid_refund, BondingCurve,
    CurveParams, Side,
};
use crate::constants::UNIT;
use crate::errors::{MathError, ValidationError};

pub struct LinearCurve;

impl LinearCurve {
    fn decode(params: &CurveParams) -> Result<(u64, u64)> {
        if params[0] == 0 || params[2] != 0 || params[3] != 0 {
            return err!(ValidationError::InvalidCurveParams);
        }
        Ok((params[0], params[1]))
    }

    fn marginal(base: u64, slope: u64, q: u64) -> Result<u128> {
        let rise = (q as u128)
            .checked_mul(slope as u128)
            .ok_or(MathError::Overflow)?
            / UNIT as u128;
        (base as u128)
            .checked_add(rise)
            .ok_or_else(|| error!(MathError::Overflow))
    }
}

impl BondingCurve for LinearCurve {
    fn name(&self) -> &'static str {
        "Linear"
    }

    fn validate_params(&self, params: &CurveParams) -> (bool, &'static str) {
        if params[2] != 0 || params[3] != 0 {
            return (false, "Unused parameter slots must be zero");
        }
        if params[0] == 0 {
            return (false, "Base price must be > 0");
        }
        (true, "")
    }

    fn cost(
        &self,
        params: &CurveParams,
        q_yes: u64,
        q_no: u64,
        side: Side,
        delta: u64,
    ) -> Result<u64> {
        let (base, slope) = Self::decode(params)?;
        if delta == 0 {
            return err!(MathError::ShareAmountZero);
        }
        let (q_side, _) = oriented(q_yes, q_no, side);
        let grown = q_side.checked_add(delta).ok_or(MathError::Overflow)?;
        let p_start = Self::marginal(base, slope, q_side)?;
        let p_end = Self::marginal(base, slope, grown)?;
        trapezoid_cost(p_start, p_end, delta)
    }

    fn refund(
        &self,
        params: &CurveParams,
        q_yes: u64,
        q_no: u64,
        side: Side,
        delta: u64,
    ) -> Result<u64> {
        let (base, slope) = Self::decode(params)?;
        let (q_side, _) = oriented(q_yes, q_no, side);
        check_sell(delta, q_side)?;
        let p_start = Self::marginal(base, slope, q_side - delta)?;
        let p_end = Self::marginal(base, slope, q_side)?;
        trapezoid_refund(p_start, p_end, delta)
    }

    fn prices(&self, params: &CurveParams, q_yes: u64, q_no: u64) -> Result<(u64, u64)> {
        Self::decode(params)?;
        ratio_prices(q_yes, q_no)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: u64 = UNIT / 1_000; // 0.001 per share
    const SLOPE: u64 = UNIT / 10_000; // +0.0001 per share sold

    fn flat() -> CurveParams {
        [BASE, 0, 0, 0]
    }

    fn rising() -> CurveParams {
        [BASE, SLOPE, 0, 0]
    }

    #[test]
    fn rejects_zero_base_price() {
        let (ok, reason) = LinearCurve.validate_params(&[0, SLOPE, 0, 0]);
        assert!(!ok);
        assert_eq!(reason, "Base price must be > 0");
        assert!(LinearCurve.validate_params(&flat()).0);
        assert!(LinearCurve.validate_params(&rising()).0);
    }

    #[test]
    fn constant_price_cost_is_exactly_linear() {
        let ten = LinearCurve.cost(&flat(), 0, 0, Side::Yes, 10 * UNIT).unwrap();
        let twenty = LinearCurve.cost(&flat(), 0, 0, Side::Yes, 20 * UNIT).unwrap();
        assert_eq!(ten, 10 * BASE);
        assert_eq!(twenty, 2 * ten);
    }

    #[test]
    fn cost_follows_trapezoidal_rule() {
        let shares = 10 * UNIT;
        let cost = LinearCurve.cost(&rising(), 0, 0, Side::Yes, shares).unwrap();
        // start price = base, end price = base + 10 * slope
        let p_end = (BASE + 10 * SLOPE) as u128;
        let expected = (shares as u128) * (BASE as u128 + p_end) / (2 * UNIT as u128);
        assert!(cost as u128 >= expected && (cost as u128) - expected <= 1);
    }

    #[test]
    fn existing_supply_raises_the_charge() {
        let from_zero = LinearCurve.cost(&rising(), 0, 0, Side::Yes, 10 * UNIT).unwrap();
        let from_fifty = LinearCurve
            .cost(&rising(), 50 * UNIT, 0, Side::Yes, 10 * UNIT)
            .unwrap();
        assert!(from_fifty > from_zero);
        // The flat curve is indifferent to supply.
        let flat_a = LinearCurve.cost(&flat(), 0, 0, Side::Yes, 10 * UNIT).unwrap();
        let flat_b = LinearCurve.cost(&flat(), 50 * UNIT, 0, Side::Yes, 10 * UNIT).unwrap();
        assert_eq!(flat_a, flat_b);
    }

    #[test]
    fn refund_carries_the_spread() {
        let shares = 10 * UNIT;
        let cost = LinearCurve.cost(&flat(), 0, 0, Side::Yes, shares).unwrap();
        let refund = LinearCurve.refund(&flat(), shares, 0, Side::Yes, shares).unwrap();
        let expected = cost * 99 / 100;
        assert!(refund.abs_diff(expected) <= 1, "refund={refund} expected={expected}");
        assert!(refund < cost);
    }

    #[test]
    fn cannot_sell_more_than_outstanding() {
        assert!(LinearCurve
            .refund(&flat(), 10 * UNIT, 0, Side::Yes, 20 * UNIT)
            .is_err());
    }

    #[test]
    fn odds_track_supply_ratio() {
        assert_eq!(LinearCurve.prices(&flat(), 0, 0).unwrap(), (5_000, 5_000));
        assert_eq!(
            LinearCurve.prices(&flat(), 75 * UNIT, 25 * UNIT).unwrap(),
            (7_500, 2_500)
        );
        assert_eq!(LinearCurve.prices(&flat(), 100 * UNIT, 0).unwrap(), (10_000, 0));
        assert_eq!(LinearCurve.prices(&flat(), 0, 100 * UNIT).unwrap(), (0, 10_000));
    }
}
