//! One-shot withdrawal of the platform fee frozen at finalization.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::errors::{AccountingError, AuthorizationError, StateError};
use crate::events::FeesCollected;
use crate::state::{Config, Market, MarketState};

#[derive(Accounts)]
pub struct CollectFees<'info> {
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
        constraint = collateral_mint.key() == config.collateral_mint
    )]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    /// Market's collateral vault.
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = market,
    )]
    pub market_vault: InterfaceAccount<'info, TokenAccount>,

    /// Admin's collateral account receiving the fee.
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = admin,
    )]
    pub admin_token: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> CollectFees<'info> {
    pub fn collect_fees(&mut self) -> Result<()> {
        require!(
            self.market.state == MarketState::Finalized,
            StateError::MarketNotFinalized
        );
        require!(self.market.fee_amount > 0, AccountingError::NoFeesAccrued);
        require!(
            !self.market.fees_collected,
            AccountingError::FeesAlreadyCollected
        );

        // Flag first, transfer second.
        self.market.fees_collected = true;
        let amount = self.market.fee_amount;

        let id_bytes = self.market.id.to_le_bytes();
        let market_seeds = &[Market::SEED, id_bytes.as_ref(), &[self.market.bump]];
        let signer = &[&market_seeds[..]];

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.market_vault.to_account_info(),
                    mint: self.collateral_mint.to_account_info(),
                    to: self.admin_token.to_account_info(),
                    authority: self.market.to_account_info(),
                },
                signer,
            ),
            amount,
            self.collateral_mint.decimals,
        )?;

        emit!(FeesCollected {
            market_id: self.market.id,
            amount,
        });
        Ok(())
    }
}
