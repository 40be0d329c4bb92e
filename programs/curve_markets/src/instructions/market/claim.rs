//! Settlement claims.
//!
//! `claim_winnings` pays the snapshot-computed parimutuel share on a
//! finalized market; `claim_refund` returns principal on a cancelled
//! one. Both are one-shot per position: the claimed flag flips before
//! the outbound transfer, so a replay observes it and fails.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::errors::{AuthorizationError, StateError};
use crate::events::{RefundClaimed, WinningsClaimed};
use crate::state::{Config, Market, MarketState, Position};

#[derive(Accounts)]
pub struct Claim<'info> {
    #[account(mut)]
    pub claimer: Signer<'info>,

    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    pub market: Account<'info, Market>,

    #[account(
        mut,
        seeds = [Position::SEED, market.key().as_ref(), claimer.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == claimer.key() @ AuthorizationError::Unauthorized,
    )]
    pub position: Account<'info, Position>,

    #[account(
        constraint = collateral_mint.key() == config.collateral_mint
    )]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = claimer,
    )]
    pub claimer_token: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = market,
    )]
    pub market_vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> Claim<'info> {
    pub fn claim_winnings(&mut self) -> Result<u64> {
        require!(
            self.market.state == MarketState::Finalized,
            StateError::MarketNotFinalized
        );
        self.payout(false)
    }

    pub fn claim_refund(&mut self) -> Result<u64> {
        require!(
            self.market.state == MarketState::Cancelled,
            StateError::MarketNotCancelled
        );
        self.payout(true)
    }

    fn payout(&mut self, refund: bool) -> Result<u64> {
        let amount = self.market.calculate_payout(&self.position)?;
        // Claimed flips before the transfer.
        self.position.claim_payout(amount)?;

        let id_bytes = self.market.id.to_le_bytes();
        let market_seeds = &[Market::SEED, id_bytes.as_ref(), &[self.market.bump]];
        let signer = &[&market_seeds[..]];

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.market_vault.to_account_info(),
                    mint: self.collateral_mint.to_account_info(),
                    to: self.claimer_token.to_account_info(),
                    authority: self.market.to_account_info(),
                },
                signer,
            ),
            amount,
            self.collateral_mint.decimals,
        )?;

        let now = Clock::get()?.unix_timestamp;
        if refund {
            emit!(RefundClaimed {
                market_id: self.market.id,
                claimer: self.claimer.key(),
                amount,
                timestamp: now,
            });
        } else {
            emit!(WinningsClaimed {
                market_id: self.market.id,
                claimer: self.claimer.key(),
                amount,
                timestamp: now,
            });
        }
        msg!("Paid {} to {}", amount, self.claimer.key());

        Ok(amount)
    }
}
