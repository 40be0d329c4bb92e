//! Permissionless finalization crank.
//!
//! Once the dispute window elapses with no live dispute, anyone may
//! finalize the market at the proposed outcome, freezing the payout
//! snapshot.

use anchor_lang::prelude::*;

use crate::errors::StateError;
use crate::events::MarketFinalized;
use crate::state::{Config, Market, MarketState, ResolutionState};

#[derive(Accounts)]
pub struct FinalizeMarket<'info> {
    pub cranker: Signer<'info>,

    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub market: Account<'info, Market>,

    #[account(
        seeds = [ResolutionState::SEED, market.key().as_ref()],
        bump = resolution.bump,
    )]
    pub resolution: Account<'info, ResolutionState>,
}

impl<'info> FinalizeMarket<'info> {
    pub fn finalize_market(&mut self) -> Result<()> {
        require!(
            self.market.state == MarketState::Resolving,
            StateError::MarketNotResolving
        );
        require!(!self.resolution.escalated, StateError::MarketEscalated);

        let now = Clock::get()?.unix_timestamp;
        require!(
            now >= self.resolution.dispute_deadline,
            StateError::DisputeWindowOpen
        );

        self.market.finalize(
            self.resolution.proposed_outcome,
            now,
            self.config.params.platform_fee_bps,
        )?;

        emit!(MarketFinalized {
            market_id: self.market.id,
            outcome: self.market.outcome,
            timestamp: now,
        });
        msg!("Market {} finalized at {:?}", self.market.id, self.market.outcome);

        Ok(())
    }
}
