//! Curve catalog administration.

use anchor_lang::prelude::*;

use crate::curves::CurveKind;
use crate::errors::AuthorizationError;
use crate::events::{CurveRegistered, CurveStatusChanged};
use crate::state::{Config, CurveRegistry};

#[derive(Accounts)]
pub struct ManageCurves<'info> {
    #[account(
        constraint = admin.key() == config.admin @ AuthorizationError::AdminOnly
    )]
    pub admin: Signer<'info>,

    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [CurveRegistry::SEED],
        bump = registry.bump,
    )]
    pub registry: Account<'info, CurveRegistry>,
}

impl<'info> ManageCurves<'info> {
    pub fn register_curve(
        &mut self,
        curve_id: u16,
        kind: CurveKind,
        name: String,
        version: String,
    ) -> Result<()> {
        self.registry
            .register(curve_id, kind, name.clone(), version.clone())?;
        emit!(CurveRegistered {
            curve_id,
            name,
            version,
        });
        Ok(())
    }

    pub fn set_curve_status(&mut self, curve_id: u16, active: bool) -> Result<()> {
        self.registry.set_active(curve_id, active)?;
        emit!(CurveStatusChanged { curve_id, active });
        Ok(())
    }
}
