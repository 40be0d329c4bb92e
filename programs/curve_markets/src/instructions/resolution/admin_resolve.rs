//! Admin resolution of disputed markets.
//!
//! Overrides the proposed outcome. When the override vindicates the
//! active dispute, that disputer's bond is returned from the escrow;
//! otherwise it stays forfeited.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::errors::{AuthorizationError, StateError};
use crate::events::MarketFinalized;
use crate::state::{Config, Market, MarketState, Outcome, ResolutionState};

#[derive(Accounts)]
pub struct AdminResolve<'info> {
    #[account(
        constraint = admin.key() == config.admin @ AuthorizationError::AdminOnly
    )]
    pub admin: Signer<'info>,

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

    #[account(
        constraint = collateral_mint.key() == config.collateral_mint
    )]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = config,
    )]
    pub bond_vault: InterfaceAccount<'info, TokenAccount>,

    /// Collateral account of the active disputer, for a possible bond
    /// return.
    #[account(
        mut,
        constraint = disputer_token.mint == config.collateral_mint,
    )]
    pub disputer_token: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> AdminResolve<'info> {
    pub fn admin_resolve(&mut self, outcome: Outcome, reason: String) -> Result<()> {
        require!(
            self.market.state == MarketState::Disputed,
            StateError::MarketNotDisputed
        );

        let now = Clock::get()?.unix_timestamp;
        let overridden = outcome != self.resolution.proposed_outcome;
        self.market
            .finalize(outcome, now, self.config.params.platform_fee_bps)?;

        // A vindicated dispute gets its bond back; state settles first.
        if overridden {
            if let Some(dispute) = self.resolution.active_dispute.as_ref() {
                require_keys_eq!(
                    self.disputer_token.owner,
                    dispute.disputer,
                    AuthorizationError::Unauthorized
                );
                let config_seeds = &[Config::SEED, &[self.config.bump]];
                let signer = &[&config_seeds[..]];
                transfer_checked(
                    CpiContext::new_with_signer(
                        self.token_program.to_account_info(),
                        TransferChecked {
                            from: self.bond_vault.to_account_info(),
                            mint: self.collateral_mint.to_account_info(),
                            to: self.disputer_token.to_account_info(),
                            authority: self.config.to_account_info(),
                        },
                        signer,
                    ),
                    dispute.bond,
                    self.collateral_mint.decimals,
                )?;
                msg!("Dispute vindicated; bond of {} returned", dispute.bond);
            }
        }

        emit!(MarketFinalized {
            market_id: self.market.id,
            outcome,
            timestamp: now,
        });
        msg!(
            "Market {} admin-resolved to {:?}: {}",
            self.market.id,
            outcome,
            reason
        );

        Ok(())
    }
}
