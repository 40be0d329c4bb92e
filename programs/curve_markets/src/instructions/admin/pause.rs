//! Factory pause switch.
//!
//! Pausing fails market creation closed on both creation paths; trading
//! and settlement on live markets are unaffected.

use anchor_lang::prelude::*;

use crate::errors::{AuthorizationError, StateError};
use crate::events::FactoryPaused;
use crate::state::Config;

#[derive(Accounts)]
pub struct SetPause<'info> {
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
}

impl<'info> SetPause<'info> {
    pub fn pause(&mut self) -> Result<()> {
        require!(!self.config.paused, StateError::AlreadyPaused);
        self.config.paused = true;
        emit!(FactoryPaused { paused: true });
        msg!("Factory paused");
        Ok(())
    }

    pub fn unpause(&mut self) -> Result<()> {
        require!(self.config.paused, StateError::NotPaused);
        self.config.paused = false;
        emit!(FactoryPaused { paused: false });
        msg!("Factory unpaused");
        Ok(())
    }
}
