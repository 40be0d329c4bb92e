//! Selling shares back to the curve.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::curves::Side;
use crate::errors::{AuthorizationError, EconomicError};
use crate::events::SharesSold;
use crate::state::{Config, CurveRegistry, Market, Position};

#[derive(Accounts)]
pub struct SellShares<'info> {
    #[account(mut)]
    pub seller: Signer<'info>,

    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [CurveRegistry::SEED],
        bump = registry.bump,
    )]
    pub registry: Account<'info, CurveRegistry>,

    #[account(mut)]
    pub market: Account<'info, Market>,

    #[account(
        mut,
        seeds = [Position::SEED, market.key().as_ref(), seller.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == seller.key() @ AuthorizationError::Unauthorized,
    )]
    pub position: Account<'info, Position>,

    #[account(
        constraint = collateral_mint.key() == config.collateral_mint
    )]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = seller,
    )]
    pub seller_token: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = market,
    )]
    pub market_vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> SellShares<'info> {
    pub fn sell_shares(&mut self, side: Side, shares: u64, min_refund: u64) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        self.market.assert_can_trade(now)?;

        let kind = self.registry.kind_of(self.market.curve_id)?;
        let refund = kind.strategy().refund(
            &self.market.curve_params,
            self.market.yes_shares,
            self.market.no_shares,
            side,
            shares,
        )?;
        require!(refund >= min_refund, EconomicError::SlippageTooHigh);

        self.position.debit(side, shares, refund)?;
        self.market.record_sell(side, shares, refund)?;

        let id_bytes = self.market.id.to_le_bytes();
        let market_seeds = &[Market::SEED, id_bytes.as_ref(), &[self.market.bump]];
        let signer = &[&market_seeds[..]];

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.market_vault.to_account_info(),
                    mint: self.collateral_mint.to_account_info(),
                    to: self.seller_token.to_account_info(),
                    authority: self.market.to_account_info(),
                },
                signer,
            ),
            refund,
            self.collateral_mint.decimals,
        )?;

        emit!(SharesSold {
            market_id: self.market.id,
            seller: self.seller.key(),
            shares,
            outcome: side,
            refund,
            timestamp: now,
        });

        Ok(())
    }
}
