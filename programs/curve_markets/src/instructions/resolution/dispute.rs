//! Outcome disputes.
//!
//! Anyone may contest a proposed outcome inside the dispute window by
//! posting a bond. Each dispute replaces the active record but adds to
//! the historical count and bond total; the configured escalation policy
//! watches those aggregates and flags the market for mandatory admin
//! review once crossed.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::errors::{EconomicError, StateError};
use crate::events::{MarketDisputed, MarketEscalated};
use crate::state::{Config, Market, MarketState, ResolutionState};

#[derive(Accounts)]
pub struct Dispute<'info> {
    #[account(mut)]
    pub disputer: Signer<'info>,

    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub market: Account<'info, Market>,

    #[account(
        mut,
        seeds = [ResolutionState::SEED, market.key().as_ref()],
        bump = resolution.bump,
    )]
    pub resolution: Account<'info, ResolutionState>,

    #[account(
        constraint = collateral_mint.key() == config.collateral_mint
    )]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = disputer,
    )]
    pub disputer_token: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = config,
    )]
    pub bond_vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> Dispute<'info> {
    pub fn dispute(&mut self, reason: String, bond: u64) -> Result<()> {
        require!(
            matches!(
                self.market.state,
                MarketState::Resolving | MarketState::Disputed
            ),
            StateError::MarketNotResolving
        );
        require!(
            bond >= self.config.params.min_dispute_bond,
            EconomicError::BondBelowMinimum
        );

        let now = Clock::get()?.unix_timestamp;
        let escalated_now = self.resolution.record_dispute(
            self.disputer.key(),
            bond,
            reason.clone(),
            now,
            &self.config.escalation_policy,
        )?;
        self.market.mark_disputed()?;

        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.disputer_token.to_account_info(),
                    mint: self.collateral_mint.to_account_info(),
                    to: self.bond_vault.to_account_info(),
                    authority: self.disputer.to_account_info(),
                },
            ),
            bond,
            self.collateral_mint.decimals,
        )?;

        emit!(MarketDisputed {
            market_id: self.market.id,
            disputer: self.disputer.key(),
            reason,
            bond,
            timestamp: now,
        });
        if escalated_now {
            emit!(MarketEscalated {
                market_id: self.market.id,
                dispute_count: self.resolution.dispute_count,
                dispute_bond_total: self.resolution.dispute_bond_total,
            });
            msg!("Market {} escalated for admin review", self.market.id);
        }

        Ok(())
    }
}
