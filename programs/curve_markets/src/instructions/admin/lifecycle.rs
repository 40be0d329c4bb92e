//! Admin lifecycle controls: approval, activation, cancellation.

use anchor_lang::prelude::*;

use crate::errors::AuthorizationError;
use crate::events::{MarketActivated, MarketApproved, MarketCancelled};
use crate::state::{Config, Market};

#[derive(Accounts)]
pub struct AdminLifecycle<'info> {
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
}

impl<'info> AdminLifecycle<'info> {
    pub fn approve_market(&mut self) -> Result<()> {
        self.market.approve()?;
        emit!(MarketApproved {
            market_id: self.market.id,
        });
        msg!("Market {} approved", self.market.id);
        Ok(())
    }

    pub fn activate_market(&mut self) -> Result<()> {
        self.market.activate()?;
        emit!(MarketActivated {
            market_id: self.market.id,
        });
        msg!("Market {} activated", self.market.id);
        Ok(())
    }

    /// Voids the market and switches payouts to full-principal refunds.
    pub fn cancel_market(&mut self, reason: String) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        self.market.cancel()?;
        emit!(MarketCancelled {
            market_id: self.market.id,
            reason,
            timestamp: now,
        });
        msg!("Market {} cancelled", self.market.id);
        Ok(())
    }
}
