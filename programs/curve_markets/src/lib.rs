//! # Curve Markets: curve-priced binary prediction markets
//!
//! A binary prediction market engine on Solana. Each market is a
//! yes/no question priced by a pluggable bonding curve, moving through a
//! strict lifecycle from proposal to payout.
//!
//! ## Overview
//!
//! - The factory validates configs, escrows creator bonds, and
//!   instantiates markets bound to a curve from the registry.
//! - While a market is active, bets and sells are priced by its curve
//!   (LMSR by default; linear, exponential, and sigmoid policies are
//!   also shipped).
//! - After the resolution time, the resolver proposes an outcome; a
//!   dispute window follows, bonded disputes escalate to admin review,
//!   and finalization freezes a payout snapshot.
//! - Winners claim their parimutuel share of the snapshot pool exactly
//!   once; cancelled markets refund principal instead.

use anchor_lang::prelude::*;

pub mod constants;
pub mod curves;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

pub use curves::{CurveKind, Side};
pub use instructions::*;
pub use state::{EscalationPolicy, Outcome, ProtocolParams};

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod curve_markets {
    use super::*;

    /// Initialize the protocol with global configuration.
    pub fn initialize(
        ctx: Context<Initialize>,
        resolver: Pubkey,
        params: ProtocolParams,
        require_approval: bool,
        default_curve_id: u16,
    ) -> Result<()> {
        ctx.accounts
            .initialize(resolver, params, require_approval, default_curve_id, &ctx.bumps)
    }

    // ---- parameter store ----

    /// Replace the tunable parameter set (admin only).
    pub fn update_params(ctx: Context<UpdateParams>, params: ProtocolParams) -> Result<()> {
        ctx.accounts.update_params(params)
    }

    /// Swap the dispute auto-escalation policy (admin only).
    pub fn set_escalation_policy(
        ctx: Context<UpdateParams>,
        policy: EscalationPolicy,
    ) -> Result<()> {
        ctx.accounts.set_escalation_policy(policy)
    }

    /// Stop market creation (admin only).
    pub fn pause(ctx: Context<SetPause>) -> Result<()> {
        ctx.accounts.pause()
    }

    /// Resume market creation (admin only).
    pub fn unpause(ctx: Context<SetPause>) -> Result<()> {
        ctx.accounts.unpause()
    }

    // ---- curve registry ----

    /// Add a curve to the catalog (admin only).
    pub fn register_curve(
        ctx: Context<ManageCurves>,
        curve_id: u16,
        kind: CurveKind,
        name: String,
        version: String,
    ) -> Result<()> {
        ctx.accounts.register_curve(curve_id, kind, name, version)
    }

    /// Enable or disable a curve for new markets (admin only).
    pub fn set_curve_status(ctx: Context<ManageCurves>, curve_id: u16, active: bool) -> Result<()> {
        ctx.accounts.set_curve_status(curve_id, active)
    }

    // ---- factory ----

    /// Create a market on the default curve.
    pub fn create_market(
        ctx: Context<CreateMarket>,
        args: MarketConfigArgs,
        bond_amount: u64,
    ) -> Result<()> {
        ctx.accounts.create_market(args, bond_amount, None, &ctx.bumps)
    }

    /// Create a market on an explicitly chosen curve.
    pub fn create_market_with_curve(
        ctx: Context<CreateMarket>,
        args: MarketConfigArgs,
        bond_amount: u64,
        curve_id: u16,
    ) -> Result<()> {
        ctx.accounts
            .create_market(args, bond_amount, Some(curve_id), &ctx.bumps)
    }

    /// Release the creator bond after settlement (admin only).
    pub fn refund_creator_bond(ctx: Context<RefundCreatorBond>) -> Result<()> {
        ctx.accounts.refund_creator_bond()
    }

    // ---- lifecycle ----

    /// Approve a proposed market (admin only).
    pub fn approve_market(ctx: Context<AdminLifecycle>) -> Result<()> {
        ctx.accounts.approve_market()
    }

    /// Open an approved market for betting (admin only).
    pub fn activate_market(ctx: Context<AdminLifecycle>) -> Result<()> {
        ctx.accounts.activate_market()
    }

    /// Void a market; positions become refundable (admin only).
    pub fn cancel_market(ctx: Context<AdminLifecycle>, reason: String) -> Result<()> {
        ctx.accounts.cancel_market(reason)
    }

    // ---- trading ----

    /// Wager collateral on an outcome at curve prices.
    pub fn place_bet(
        ctx: Context<PlaceBet>,
        side: Side,
        amount: u64,
        min_odds_bps: u64,
    ) -> Result<()> {
        ctx.accounts.place_bet(side, amount, min_odds_bps, &ctx.bumps)
    }

    /// Sell shares back to the curve.
    pub fn sell_shares(
        ctx: Context<SellShares>,
        side: Side,
        shares: u64,
        min_refund: u64,
    ) -> Result<()> {
        ctx.accounts.sell_shares(side, shares, min_refund)
    }

    // ---- resolution ----

    /// Propose the outcome, opening the dispute window (resolver only).
    pub fn resolve_market(ctx: Context<ResolveMarket>, outcome: Outcome) -> Result<()> {
        ctx.accounts.resolve_market(outcome, &ctx.bumps)
    }

    /// Contest the proposed outcome with a bond.
    pub fn dispute(ctx: Context<Dispute>, reason: String, bond: u64) -> Result<()> {
        ctx.accounts.dispute(reason, bond)
    }

    /// Finalize once the dispute window has elapsed undisputed.
    pub fn finalize_market(ctx: Context<FinalizeMarket>) -> Result<()> {
        ctx.accounts.finalize_market()
    }

    /// Settle a disputed market, overriding the proposal (admin only).
    pub fn admin_resolve(
        ctx: Context<AdminResolve>,
        outcome: Outcome,
        reason: String,
    ) -> Result<()> {
        ctx.accounts.admin_resolve(outcome, reason)
    }

    // ---- claims ----

    /// Claim the snapshot-computed payout on a finalized market.
    pub fn claim_winnings(ctx: Context<Claim>) -> Result<u64> {
        ctx.accounts.claim_winnings()
    }

    /// Claim the principal refund on a cancelled market.
    pub fn claim_refund(ctx: Context<Claim>) -> Result<u64> {
        ctx.accounts.claim_refund()
    }

    /// Withdraw the platform fee frozen at finalization (admin only).
    pub fn collect_fees(ctx: Context<CollectFees>) -> Result<()> {
        ctx.accounts.collect_fees()
    }
}
