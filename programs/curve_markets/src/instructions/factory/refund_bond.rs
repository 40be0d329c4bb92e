//! Creator bond release.
//!
//! The record is zeroed before the transfer leaves the program, so a
//! duplicate or reentrant call observes an empty bond and fails with
//! NoBondHeld instead of double-spending the escrow.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::errors::{AuthorizationError, StateError};
use crate::events::CreatorBondRefunded;
use crate::state::{Config, CreatorBond, Market, MarketState};

#[derive(Accounts)]
pub struct RefundCreatorBond<'info> {
    #[account(
        constraint = admin.key() == config.admin @ AuthorizationError::AdminOnly
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    pub market: Account<'info, Market>,

    #[account(
        mut,
        seeds = [CreatorBond::SEED, market.key().as_ref()],
        bump = creator_bond.bump,
    )]
    pub creator_bond: Account<'info, CreatorBond>,

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

    /// Creator's collateral account receiving the refund.
    #[account(
        mut,
        constraint = creator_token.owner == creator_bond.creator
            @ AuthorizationError::Unauthorized,
        constraint = creator_token.mint == config.collateral_mint,
    )]
    pub creator_token: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> RefundCreatorBond<'info> {
    pub fn refund_creator_bond(&mut self) -> Result<()> {
        require!(
            matches!(
                self.market.state,
                MarketState::Finalized | MarketState::Cancelled
            ),
            StateError::MarketNotFinalized
        );

        // Zero the record before moving funds.
        let amount = self.creator_bond.release()?;
        self.config.total_held_bonds = self.config.total_held_bonds.saturating_sub(amount);

        let config_seeds = &[Config::SEED, &[self.config.bump]];
        let signer = &[&config_seeds[..]];

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.bond_vault.to_account_info(),
                    mint: self.collateral_mint.to_account_info(),
                    to: self.creator_token.to_account_info(),
                    authority: self.config.to_account_info(),
                },
                signer,
            ),
            amount,
            self.collateral_mint.decimals,
        )?;

        emit!(CreatorBondRefunded {
            market_id: self.market.id,
            creator: self.creator_bond.creator,
            amount,
        });
        msg!("Creator bond of {} returned for market {}", amount, self.market.id);

        Ok(())
    }
}
