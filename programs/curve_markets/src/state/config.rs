//! Global protocol configuration.
//!
//! The config account doubles as the factory state and the parameter
//! store surface: tunables are admin-gated to mutate and freely
//! readable. Roles are two pubkeys (admin, resolver) standing in for the
//! external role directory.

use anchor_lang::prelude::*;

use crate::constants::MAX_FEE_BPS;
use crate::errors::{AuthorizationError, ValidationError};

/// Global configuration account (singleton PDA).
///
/// Seeds: ["config"]
#[account]
#[derive(InitSpace)]
pub struct Config {
    /// Protocol administrator.
    pub admin: Pubkey,

    /// Account authorized to propose market outcomes.
    pub resolver: Pubkey,

    /// Collateral token mint (e.g. USDC).
    pub collateral_mint: Pubkey,

    /// Whether market creation is paused.
    pub paused: bool,

    /// New markets start in Proposed and wait for admin approval.
    pub require_approval: bool,

    /// Curve used by the plain create_market path.
    pub default_curve_id: u16,

    /// Total markets created (used as incrementing ID).
    pub market_count: u64,

    /// Sum of all escrowed creator bonds.
    pub total_held_bonds: u64,

    /// Admin-settable tunables.
    pub params: ProtocolParams,

    /// Dispute auto-escalation rule.
    pub escalation_policy: EscalationPolicy,

    /// PDA bump seed.
    pub bump: u8,
}

impl Config {
    pub const SEED: &'static [u8] = b"config";

    pub fn require_admin(&self, key: &Pubkey) -> Result<()> {
        require_keys_eq!(*key, self.admin, AuthorizationError::AdminOnly);
        Ok(())
    }

    pub fn require_resolver(&self, key: &Pubkey) -> Result<()> {
        require_keys_eq!(*key, self.resolver, AuthorizationError::ResolverOnly);
        Ok(())
    }
}

/// Tunables consumed from the parameter store.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, InitSpace, Debug)]
pub struct ProtocolParams {
    /// Smallest accepted bet, in collateral base units.
    pub minimum_bet: u64,
    /// Largest accepted bet.
    pub maximum_bet: u64,
    /// Fee skimmed from the payout pool at finalization, basis points.
    pub platform_fee_bps: u64,
    /// Bond escrowed by a market creator.
    pub min_creator_bond: u64,
    /// Seconds after an outcome proposal during which it can be disputed.
    pub dispute_window: i64,
    /// Smallest accepted dispute bond.
    pub min_dispute_bond: u64,
}

impl ProtocolParams {
    pub fn validate(&self) -> Result<()> {
        require!(self.platform_fee_bps <= MAX_FEE_BPS, ValidationError::FeeTooHigh);
        require!(self.minimum_bet > 0, ValidationError::InvalidParamValue);
        require!(self.maximum_bet >= self.minimum_bet, ValidationError::InvalidParamValue);
        require!(self.dispute_window > 0, ValidationError::InvalidParamValue);
        require!(self.min_dispute_bond > 0, ValidationError::InvalidParamValue);
        Ok(())
    }
}

/// When accumulated dispute pressure forces a market out of the
/// auto-finalization path and into admin review.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, InitSpace, Debug, PartialEq, Eq)]
pub enum EscalationPolicy {
    /// Escalate once this many disputes have been recorded.
    CountBased { max_disputes: u8 },
    /// Escalate once posted dispute bonds reach this total.
    BondWeighted { bond_threshold: u64 },
}

impl EscalationPolicy {
    pub fn should_escalate(&self, dispute_count: u8, dispute_bond_total: u64) -> bool {
        match self {
            EscalationPolicy::CountBased { max_disputes } => dispute_count >= *max_disputes,
            EscalationPolicy::BondWeighted { bond_threshold } => {
                dispute_bond_total >= *bond_threshold
            }
        }
    }
}
