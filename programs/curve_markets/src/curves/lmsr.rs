//! Logarithmic market scoring rule.
//!
//! Cost potential `C(q) = b * ln(exp(q_yes/b) + exp(q_no/b))`; a trade is
//! charged the potential difference, and the marginal price of a side is
//! its softmax weight. The liquidity parameter `b` bounds the maker's
//! worst-case loss on a binary market at `b * ln 2` no matter how
//! one-sided the book becomes.
//!
//! Parameter layout: `params[0] = b` in base units; remaining slots must
//! be zero.
//!
//! The log-sum-exp is evaluated with the max-subtraction identity
//! `ln(e^x + e^y) = max + ln(1 + e^-|x-y|)`, keeping the exponential
//! argument non-positive and the logarithm argument inside [1, 2].

use anchor_lang::prelude::*;

use super::fixed_math::{exp_neg_wad, ln_wad, mul_div, mul_div_ceil, WAD};
use super::{check_sell, oriented, BondingCurve, CurveParams, Side};
use crate::constants::{BPS_SCALE, UNIT};
use crate::errors::{MathError, ValidationError};

/// Smallest accepted liquidity parameter (0.001 whole tokens).
pub const MIN_B: u64 = UNIT / 1_000;
/// Largest accepted liquidity parameter (one million whole tokens).
pub const MAX_B: u64 = 1_000_000 * UNIT;

pub struct LmsrCurve;

impl LmsrCurve {
    fn b(params: &CurveParams) -> Result<u64> {
        let b = params[0];
        if !(MIN_B..=MAX_B).contains(&b) || params[1] != 0 || params[2] != 0 || params[3] != 0 {
            return err!(ValidationError::InvalidCurveParams);
        }
        Ok(b)
    }

    /// `C(q)/b` at WAD scale: `max(q)/b + ln(1 + exp(-|q_yes-q_no|/b))`.
    fn potential(b: u64, q_yes: u64, q_no: u64) -> Result<u128> {
        let hi = q_yes.max(q_no);
        let lo = q_yes.min(q_no);
        let d = mul_div((hi - lo) as u128, WAD, b as u128)?;
        let tail = ln_wad(WAD + exp_neg_wad(d))?;
        let base = mul_div(hi as u128, WAD, b as u128)?;
        base.checked_add(tail).ok_or_else(|| error!(MathError::Overflow))
    }
}

impl BondingCurve for LmsrCurve {
    fn name(&self) -> &'static str {
        "LMSR"
    }

    fn validate_params(&self, params: &CurveParams) -> (bool, &'static str) {
        if params[1] != 0 || params[2] != 0 || params[3] != 0 {
            return (false, "Unused parameter slots must be zero");
        }
        if params[0] < MIN_B {
            return (false, "Liquidity parameter b too small");
        }
        if params[0] > MAX_B {
            return (false, "Liquidity parameter b too large");
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
        let b = Self::b(params)?;
        if delta == 0 {
            return err!(MathError::ShareAmountZero);
        }
        let (q_side, q_other) = oriented(q_yes, q_no, side);
        let grown = q_side.checked_add(delta).ok_or(MathError::Overflow)?;
        let before = Self::potential(b, q_side, q_other)?;
        let after = Self::potential(b, grown, q_other)?;
        // The potential is strictly increasing; saturation only absorbs
        // sub-wei rounding on dust-sized deltas.
        let diff = after.saturating_sub(before);
        let raw = mul_div_ceil(b as u128, diff, WAD)?;
        let cost = u64::try_from(raw).map_err(|_| error!(MathError::Overflow))?;
        Ok(cost.max(1))
    }

    fn refund(
        &self,
        params: &CurveParams,
        q_yes: u64,
        q_no: u64,
        side: Side,
        delta: u64,
    ) -> Result<u64> {
        let b = Self::b(params)?;
        let (q_side, q_other) = oriented(q_yes, q_no, side);
        check_sell(delta, q_side)?;
        let before = Self::potential(b, q_side, q_other)?;
        let after = Self::potential(b, q_side - delta, q_other)?;
        let diff = before.saturating_sub(after);
        let raw = mul_div(b as u128, diff, WAD)?;
        u64::try_from(raw).map_err(|_| error!(MathError::Overflow))
    }

    fn prices(&self, params: &CurveParams, q_yes: u64, q_no: u64) -> Result<(u64, u64)> {
        let b = Self::b(params)?;
        let hi = q_yes.max(q_no);
        let lo = q_yes.min(q_no);
        let d = mul_div((hi - lo) as u128, WAD, b as u128)?;
        // softmax weight of the heavier side: 1 / (1 + e^-d)
        let denom = WAD + exp_neg_wad(d);
        let p_heavy = mul_div(BPS_SCALE as u128, WAD, denom)? as u64;
        let p_light = BPS_SCALE - p_heavy;
        if q_yes >= q_no {
            Ok((p_heavy, p_light))
        } else {
            Ok((p_light, p_heavy))
        }
    }
}
