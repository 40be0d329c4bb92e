//! Exponential pricing policy.
//!
//! Marginal price compounds with same-side supply:
//! `p(q) = base_price * (1 + growth)^(q / scale)`, where `growth` is a
//! basis-point rate applied once per `scale` units sold. Steeper than
//! linear for momentum-style markets; charges use the trapezoidal rule
//! over the marginal price.
//!
//! Parameter layout: `params[0] = base_price` (base units per whole
//! share), `params[1] = growth_bps` (1..=50000), `params[2] = scale`
//! (base units per compounding period); `params[3]` must be zero.

use anchor_lang::prelude::*;

use super::fixed_math::{exp_pos_wad, ln_wad, mul_div, WAD};
use super::{
    check_sell, oriented, ratio_prices, trapezoid_cost, trapezoid_refund, BondingCurve,
    CurveParams, Side,
};
use crate::constants::BPS_SCALE;
use crate::errors::{MathError, ValidationError};

/// Growth per period is capped at 500%.
pub const MAX_GROWTH_BPS: u64 = 50_000;

pub struct ExponentialCurve;

impl ExponentialCurve {
    fn decode(params: &CurveParams) -> Result<(u64, u64, u64)> {
        let (base, growth, scale) = (params[0], params[1], params[2]);
        if base == 0 || growth == 0 || growth > MAX_GROWTH_BPS || scale == 0 || params[3] != 0 {
            return err!(ValidationError::InvalidCurveParams);
        }
        Ok((base, growth, scale))
    }

    fn marginal(base: u64, growth: u64, scale: u64, q: u64) -> Result<u128> {
        // ln(1 + growth), then e^(q/scale * ln(1+growth))
        let ln1p = ln_wad(WAD + mul_div(growth as u128, WAD, BPS_SCALE as u128)?)?;
        let x = mul_div(q as u128, ln1p, scale as u128)?;
        let factor = exp_pos_wad(x)?;
        mul_div(base as u128, factor, WAD)
    }
}

impl BondingCurve for ExponentialCurve {
    fn name(&self) -> &'static str {
        "Exponential"
    }

    fn validate_params(&self, params: &CurveParams) -> (bool, &'static str) {
        if params[3] != 0 {
            return (false, "Unused parameter slots must be zero");
        }
        if params[0] == 0 {
            return (false, "Base price must be > 0");
        }
        if params[1] == 0 {
            return (false, "Growth rate must be > 0 (use LinearCurve for constant price)");
        }
        if params[1] > MAX_GROWTH_BPS {
            return (false, "Growth rate too large");
        }
        if params[2] == 0 {
            return (false, "Scale must be > 0");
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
        let (base, growth, scale) = Self::decode(params)?;
        if delta == 0 {
            return err!(MathError::ShareAmountZero);
        }
        let (q_side, _) = oriented(q_yes, q_no, side);
        let grown = q_side.checked_add(delta).ok_or(MathError::Overflow)?;
        let p_start = Self::marginal(base, growth, scale, q_side)?;
        let p_end = Self::marginal(base, growth, scale, grown)?;
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
        let (base, growth, scale) = Self::decode(params)?;
        let (q_side, _) = oriented(q_yes, q_no, side);
        check_sell(delta, q_side)?;
        let p_start = Self::marginal(base, growth, scale, q_side - delta)?;
        let p_end = Self::marginal(base, growth, scale, q_side)?;
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
    use crate::constants::UNIT;

    const BASE: u64 = UNIT / 1_000;
    const SCALE: u64 = 10 * UNIT; // one growth period per 10 shares

    fn params(growth: u64) -> CurveParams {
        [BASE, growth, SCALE, 0]
    }

    #[test]
    fn validation_messages_match_contract() {
        assert!(ExponentialCurve.validate_params(&params(500)).0);

        let (ok, reason) = ExponentialCurve.validate_params(&[0, 500, SCALE, 0]);
        assert!(!ok);
        assert_eq!(reason, "Base price must be > 0");

        let (ok, reason) = ExponentialCurve.validate_params(&[BASE, 0, SCALE, 0]);
        assert!(!ok);
        assert!(reason.starts_with("Growth rate must be > 0"));

        let (ok, _) = ExponentialCurve.validate_params(&[BASE, MAX_GROWTH_BPS + 1, SCALE, 0]);
        assert!(!ok);

        let (ok, reason) = ExponentialCurve.validate_params(&[BASE, 500, 0, 0]);
        assert!(!ok);
        assert_eq!(reason, "Scale must be > 0");
    }

    #[test]
    fn first_shares_price_near_base() {
        // One share from an empty book: the factor has barely compounded.
        let cost = ExponentialCurve.cost(&params(500), 0, 0, Side::Yes, UNIT).unwrap();
        assert!(cost >= BASE);
        assert!(cost < BASE + BASE / 10, "cost={cost}");
    }

    #[test]
    fn faster_growth_charges_more() {
        let shares = 50 * UNIT;
        let low = ExponentialCurve.cost(&params(100), 0, 0, Side::Yes, shares).unwrap();
        let mid = ExponentialCurve.cost(&params(500), 0, 0, Side::Yes, shares).unwrap();
        let high = ExponentialCurve.cost(&params(2_000), 0, 0, Side::Yes, shares).unwrap();
        assert!(low < mid && mid < high);
    }

    #[test]
    fn existing_supply_compounds_the_price() {
        let from_zero = ExponentialCurve.cost(&params(500), 0, 0, Side::Yes, 10 * UNIT).unwrap();
        let from_fifty = ExponentialCurve
            .cost(&params(500), 50 * UNIT, 0, Side::Yes, 10 * UNIT)
            .unwrap();
        assert!(from_fifty > from_zero);
    }

    #[test]
    fn refund_stays_below_reverse_cost() {
        let p = params(500);
        let delta = 10 * UNIT;
        let cost = ExponentialCurve.cost(&p, 30 * UNIT, 0, Side::Yes, delta).unwrap();
        let refund = ExponentialCurve
            .refund(&p, 40 * UNIT, 0, Side::Yes, delta)
            .unwrap();
        assert!(refund < cost);
        // Roughly the 1% spread, not more.
        assert!(refund > cost / 2);
    }

    #[test]
    fn extreme_exposure_fails_deterministically() {
        // Far beyond the representable factor: whole-call error, no wrap.
        let r = ExponentialCurve.cost(&params(MAX_GROWTH_BPS), u64::MAX / 2, 0, Side::Yes, UNIT);
        assert!(r.is_err());
    }

    #[test]
    fn odds_track_supply_ratio() {
        assert_eq!(
            ExponentialCurve.prices(&params(500), 0, 0).unwrap(),
            (5_000, 5_000)
        );
        assert_eq!(
            ExponentialCurve
                .prices(&params(500), 10 * UNIT, 90 * UNIT)
                .unwrap(),
            (1_000, 9_000)
        );
    }
}
