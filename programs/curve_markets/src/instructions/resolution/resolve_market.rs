//! Outcome proposal.
//!
//! The resolver proposes Yes or No once the market's resolution time has
//! passed; this opens the dispute window. The proposal is a snapshot in
//! its own account so the dispute flow owns it exclusively.

use anchor_lang::prelude::*;

use crate::errors::{AuthorizationError, MathError, ValidationError};
use crate::events::MarketResolved;
use crate::state::{Config, Market, Outcome, ResolutionState};

#[derive(Accounts)]
pub struct ResolveMarket<'info> {
    #[account(
        mut,
        constraint = resolver.key() == config.resolver @ AuthorizationError::ResolverOnly
    )]
    pub resolver: Signer<'info>,

    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub market: Account<'info, Market>,

    #[account(
        init,
        payer = resolver,
        space = 8 + ResolutionState::INIT_SPACE,
        seeds = [ResolutionState::SEED, market.key().as_ref()],
        bump,
    )]
    pub resolution: Account<'info, ResolutionState>,

    pub system_program: Program<'info, System>,
}

impl<'info> ResolveMarket<'info> {
    pub fn resolve_market(&mut self, outcome: Outcome, bumps: &ResolveMarketBumps) -> Result<()> {
        require!(outcome.side().is_some(), ValidationError::InvalidOutcome);

        let now = Clock::get()?.unix_timestamp;
        self.market.begin_resolution(now)?;

        let deadline = now
            .checked_add(self.config.params.dispute_window)
            .ok_or(MathError::Overflow)?;
        self.resolution.set_inner(ResolutionState {
            market: self.market.key(),
            proposer: self.resolver.key(),
            proposed_outcome: outcome,
            proposal_ts: now,
            dispute_deadline: deadline,
            dispute_count: 0,
            dispute_bond_total: 0,
            escalated: false,
            active_dispute: None,
            bump: bumps.resolution,
        });

        emit!(MarketResolved {
            market_id: self.market.id,
            outcome,
            resolver: self.resolver.key(),
            timestamp: now,
        });
        msg!(
            "Market {} proposed {:?}; dispute window closes at {}",
            self.market.id,
            outcome,
            deadline
        );

        Ok(())
    }
}
