//! Bet placement.
//!
//! The wager is priced through the market's bound curve: the bettor
//! sends collateral, the curve inversion determines how many shares that
//! buys at the current exposure, and the implied odds are checked
//! against the bettor's stated minimum before anything moves.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::constants::BPS_SCALE;
use crate::curves::Side;
use crate::errors::{EconomicError, MathError};
use crate::events::BetPlaced;
use crate::state::{Config, CurveRegistry, Market, Position};

/// Executed odds on the 0-20000 multiplier scale: shares received per
/// unit of collateral, in basis points.
pub fn implied_odds_bps(shares: u64, amount: u64) -> Result<u64> {
    if amount == 0 {
        return err!(MathError::DivisionByZero);
    }
    let odds = (shares as u128)
        .checked_mul(BPS_SCALE as u128)
        .ok_or(MathError::Overflow)?
        / amount as u128;
    Ok(u64::try_from(odds).unwrap_or(u64::MAX))
}

#[derive(Accounts)]
pub struct PlaceBet<'info> {
    #[account(mut)]
    pub bettor: Signer<'info>,

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
        init_if_needed,
        payer = bettor,
        space = 8 + Position::INIT_SPACE,
        seeds = [Position::SEED, market.key().as_ref(), bettor.key().as_ref()],
        bump,
    )]
    pub position: Account<'info, Position>,

    #[account(
        constraint = collateral_mint.key() == config.collateral_mint
    )]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = bettor,
    )]
    pub bettor_token: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = market,
    )]
    pub market_vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> PlaceBet<'info> {
    pub fn place_bet(
        &mut self,
        side: Side,
        amount: u64,
        min_odds_bps: u64,
        bumps: &PlaceBetBumps,
    ) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        self.market.assert_can_trade(now)?;
        require!(
            amount >= self.config.params.minimum_bet,
            EconomicError::BetBelowMinimum
        );
        require!(
            amount <= self.config.params.maximum_bet,
            EconomicError::BetAboveMaximum
        );

        let kind = self.registry.kind_of(self.market.curve_id)?;
        let shares = kind.strategy().shares_for_amount(
            &self.market.curve_params,
            self.market.yes_shares,
            self.market.no_shares,
            side,
            amount,
        )?;

        // min_odds_bps == 0 disables the slippage check.
        if min_odds_bps > 0 {
            let odds = implied_odds_bps(shares, amount)?;
            require!(odds >= min_odds_bps, EconomicError::SlippageTooHigh);
        }

        if self.position.market == Pubkey::default() {
            self.position.market = self.market.key();
            self.position.owner = self.bettor.key();
            self.position.bump = bumps.position;
        }
        self.position.credit(side, shares, amount)?;
        self.market.record_bet(side, amount, shares)?;

        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.bettor_token.to_account_info(),
                    mint: self.collateral_mint.to_account_info(),
                    to: self.market_vault.to_account_info(),
                    authority: self.bettor.to_account_info(),
                },
            ),
            amount,
            self.collateral_mint.decimals,
        )?;

        emit!(BetPlaced {
            market_id: self.market.id,
            bettor: self.bettor.key(),
            amount,
            outcome: side,
            shares_received: shares,
            timestamp: now,
        });

        Ok(())
    }
}
