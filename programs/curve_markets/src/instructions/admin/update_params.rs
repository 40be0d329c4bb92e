//! Parameter store mutations, admin-gated.

use anchor_lang::prelude::*;

use crate::errors::AuthorizationError;
use crate::events::ParamsUpdated;
use crate::state::{Config, EscalationPolicy, ProtocolParams};

#[derive(Accounts)]
pub struct UpdateParams<'info> {
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

impl<'info> UpdateParams<'info> {
    pub fn update_params(&mut self, params: ProtocolParams) -> Result<()> {
        params.validate()?;
        self.config.params = params;
        emit!(ParamsUpdated {
            admin: self.admin.key(),
        });
        Ok(())
    }

    pub fn set_escalation_policy(&mut self, policy: EscalationPolicy) -> Result<()> {
        self.config.escalation_policy = policy;
        emit!(ParamsUpdated {
            admin: self.admin.key(),
        });
        Ok(())
    }
}
