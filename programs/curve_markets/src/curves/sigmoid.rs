//! Sigmoid pricing policy.
//!
//! Marginal price follows an S-curve between a floor and a ceiling:
//! `p(q) = min_price + (max_price - min_price) * sigma(steepness * (q - inflection) / inflection)`.
//! Cheap early exposure, a fast-moving band around the inflection point,
//! and a hard ceiling after it. The price is clamped to
//! `[min_price, max_price]` by construction of the logistic.
//!
//! Parameter layout: `params[0] = min_price`, `params[1] = max_price`
//! (base units per whole share), `params[2] = steepness` (1..=100),
//! `params[3] = inflection` (base units of supply at the midpoint).

use anchor_lang::prelude::*;

use super::fixed_math::{exp_neg_wad, mul_div, WAD};
use super::{
    check_sell, oriented, ratio_prices, trapezoid_cost, trapezoid_refund, BondingCurve,
    CurveParams, Side,
};
use crate::errors::{MathError, ValidationError};

pub const MAX_STEEPNESS: u64 = 100;

/// Logistic arguments beyond this saturate to 0 or 1.
const SIGMA_SATURATION: u128 = 42 * WAD;

pub struct SigmoidCurve;

impl SigmoidCurve {
    fn decode(params: &CurveParams) -> Result<(u64, u64, u64, u64)> {
        let (min, max, steepness, inflection) = (params[0], params[1], params[2], params[3]);
        if min == 0
            || max <= min
            || steepness == 0
            || steepness > MAX_STEEPNESS
            || inflection == 0
        {
            return err!(ValidationError::InvalidCurveParams);
        }
        Ok((min, max, steepness, inflection))
    }

    /// sigma(steepness * (q - inflection) / inflection) at WAD scale.
    fn logistic(steepness: u64, inflection: u64, q: u64) -> Result<u128> {
        let above = q >= inflection;
        let diff = if above { q - inflection } else { inflection - q };
        let ratio = mul_div(diff as u128, WAD, inflection as u128)?;
        let x = ratio.saturating_mul(steepness as u128);
        let sigma_hi = if x >= SIGMA_SATURATION {
            WAD
        } else {
            // 1 / (1 + e^-x)
            WAD * WAD / (WAD + exp_neg_wad(x))
        };
        Ok(if above { sigma_hi } else { WAD - sigma_hi })
    }

    fn marginal(min: u64, max: u64, steepness: u64, inflection: u64, q: u64) -> Result<u128> {
        let sigma = Self::logistic(steepness, inflection, q)?;
        let span = (max - min) as u128;
        let lift = mul_div(span, sigma, WAD)?;
        Ok(min as u128 + lift)
    }
}

impl BondingCurve for SigmoidCurve {
    fn name(&self) -> &'static str {
        "Sigmoid"
    }

    fn validate_params(&self, params: &CurveParams) -> (bool, &'static str) {
        if params[0] == 0 {
            return (false, "Min price must be > 0");
        }
        if params[1] <= params[0] {
            return (false, "Max price must be > min price");
        }
        if params[2] == 0 {
            return (false, "Steepness must be > 0");
        }
        if params[2] > MAX_STEEPNESS {
            return (false, "Steepness too high");
        }
        if params[3] == 0 {
            return (false, "Inflection point must be > 0");
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
        let (min, max, steepness, inflection) = Self::decode(params)?;
        if delta == 0 {
            return err!(MathError::ShareAmountZero);
        }
        let (q_side, _) = oriented(q_yes, q_no, side);
        let grown = q_side.checked_add(delta).ok_or(MathError::Overflow)?;
        let p_start = Self::marginal(min, max, steepness, inflection, q_side)?;
        let p_end = Self::marginal(min, max, steepness, inflection, grown)?;
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
        let (min, max, steepness, inflection) = Self::decode(params)?;
        let (q_side, _) = oriented(q_yes, q_no, side);
        check_sell(delta, q_side)?;
        let p_start = Self::marginal(min, max, steepness, inflection, q_side - delta)?;
        let p_end = Self::marginal(min, max, steepness, inflection, q_side)?;
        trapezoid_refund(p_start, p_end, delta)
    }

    fn prices(&self, params: &CurveParams, q_yes: u64, q_no: u64) -> Result<(u64, u64)> {
        Self::decode(params)?;
        ratio_prices(q_yes, q_no)
    }
}
