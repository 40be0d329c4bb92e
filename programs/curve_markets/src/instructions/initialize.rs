//! Protocol initialization.
//!
//! Sets up the global configuration, the curve registry, and the bond
//! vault. Called once during deployment; curves are registered
//! separately through the admin surface.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::state::{Config, CurveRegistry, EscalationPolicy, ProtocolParams};

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Protocol administrator (becomes the admin).
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Global configuration account (created).
    #[account(
        init,
        payer = admin,
        space = 8 + Config::INIT_SPACE,
        seeds = [Config::SEED],
        bump,
    )]
    pub config: Account<'info, Config>,

    /// Curve catalog (created empty).
    #[account(
        init,
        payer = admin,
        space = 8 + CurveRegistry::INIT_SPACE,
        seeds = [CurveRegistry::SEED],
        bump,
    )]
    pub registry: Account<'info, CurveRegistry>,

    /// Collateral token mint (e.g. USDC).
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    /// Escrow vault for creator and dispute bonds.
    #[account(
        init,
        payer = admin,
        associated_token::mint = collateral_mint,
        associated_token::authority = config,
    )]
    pub bond_vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    pub fn initialize(
        &mut self,
        resolver: Pubkey,
        params: ProtocolParams,
        require_approval: bool,
        default_curve_id: u16,
        bumps: &InitializeBumps,
    ) -> Result<()> {
        params.validate()?;

        self.config.set_inner(Config {
            admin: self.admin.key(),
            resolver,
            collateral_mint: self.collateral_mint.key(),
            paused: false,
            require_approval,
            default_curve_id,
            market_count: 0,
            total_held_bonds: 0,
            params,
            escalation_policy: EscalationPolicy::CountBased { max_disputes: 3 },
            bump: bumps.config,
        });

        self.registry.set_inner(CurveRegistry {
            curves: Vec::new(),
            bump: bumps.registry,
        });

        msg!("Protocol initialized");
        msg!("Admin: {}", self.admin.key());
        msg!("Resolver: {}", resolver);

        Ok(())
    }
}
