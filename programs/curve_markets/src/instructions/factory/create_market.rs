//! Market creation.
//!
//! Validates the market configuration, escrows the creator bond, and
//! instantiates a market bound to a registered curve. `create_market`
//! uses the configured default curve; `create_market_with_curve` lets
//! the creator pick any active one. Both paths fail closed while the
//! factory is paused.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::constants::{
    MAX_CATEGORY_LEN, MAX_DESCRIPTION_LEN, MAX_LABEL_LEN, MAX_MARKET_LIFETIME, MAX_QUESTION_LEN,
};
use crate::curves::CurveParams;
use crate::errors::{EconomicError, MathError, StateError, ValidationError};
use crate::events::MarketCreated;
use crate::state::{Config, CreatorBond, CurveRegistry, Market, MarketState, Outcome};

/// Creator-supplied market configuration.
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct MarketConfigArgs {
    pub question: String,
    pub description: String,
    pub category: String,
    pub yes_label: String,
    pub no_label: String,
    pub end_time: i64,
    pub resolution_time: i64,
    pub curve_params: CurveParams,
}

impl MarketConfigArgs {
    /// Structural validation; curve parameters are checked separately by
    /// the bound strategy. Labels are compared case-sensitively.
    pub fn validate(&self, now: i64) -> Result<()> {
        require!(!self.question.is_empty(), ValidationError::QuestionEmpty);
        require!(
            self.question.len() <= MAX_QUESTION_LEN,
            ValidationError::QuestionTooLong
        );
        require!(
            self.description.len() <= MAX_DESCRIPTION_LEN,
            ValidationError::DescriptionTooLong
        );
        require!(
            self.category.len() <= MAX_CATEGORY_LEN,
            ValidationError::CategoryTooLong
        );
        for label in [&self.yes_label, &self.no_label] {
            require!(!label.is_empty(), ValidationError::LabelEmpty);
            require!(label.len() <= MAX_LABEL_LEN, ValidationError::LabelTooLong);
        }
        require!(
            self.yes_label != self.no_label,
            ValidationError::LabelsNotDistinct
        );
        require!(now < self.end_time, ValidationError::EndTimeInPast);
        require!(
            self.end_time <= self.resolution_time,
            ValidationError::EndTimeAfterResolution
        );
        let horizon = now
            .checked_add(MAX_MARKET_LIFETIME)
            .ok_or(MathError::Overflow)?;
        require!(
            self.resolution_time <= horizon,
            ValidationError::ResolutionTooFar
        );
        Ok(())
    }
}

#[derive(Accounts)]
pub struct CreateMarket<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        mut,
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [CurveRegistry::SEED],
        bump = registry.bump,
    )]
    pub registry: Account<'info, CurveRegistry>,

    #[account(
        init,
        payer = creator,
        space = 8 + Market::INIT_SPACE,
        seeds = [Market::SEED, config.market_count.to_le_bytes().as_ref()],
        bump,
    )]
    pub market: Account<'info, Market>,

    #[account(
        init,
        payer = creator,
        space = 8 + CreatorBond::INIT_SPACE,
        seeds = [CreatorBond::SEED, market.key().as_ref()],
        bump,
    )]
    pub creator_bond: Account<'info, CreatorBond>,

    #[account(
        constraint = collateral_mint.key() == config.collateral_mint
    )]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    /// Creator's collateral account funding the bond.
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = creator,
    )]
    pub creator_token: InterfaceAccount<'info, TokenAccount>,

    /// Factory-owned bond escrow.
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = config,
    )]
    pub bond_vault: InterfaceAccount<'info, TokenAccount>,

    /// Market's collateral vault (created).
    #[account(
        init,
        payer = creator,
        associated_token::mint = collateral_mint,
        associated_token::authority = market,
    )]
    pub market_vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> CreateMarket<'info> {
    pub fn create_market(
        &mut self,
        args: MarketConfigArgs,
        bond_amount: u64,
        curve_id: Option<u16>,
        bumps: &CreateMarketBumps,
    ) -> Result<()> {
        require!(!self.config.paused, StateError::FactoryPaused);

        let now = Clock::get()?.unix_timestamp;
        args.validate(now)?;
        require!(
            bond_amount >= self.config.params.min_creator_bond,
            EconomicError::BondBelowMinimum
        );

        let curve_id = curve_id.unwrap_or(self.config.default_curve_id);
        let kind = self.registry.resolve(curve_id)?;
        let (valid, reason) = kind.strategy().validate_params(&args.curve_params);
        if !valid {
            msg!("Curve rejected parameters: {}", reason);
            return err!(ValidationError::InvalidCurveParams);
        }

        let id = self.config.market_count;
        let state = if self.config.require_approval {
            MarketState::Proposed
        } else {
            MarketState::Active
        };

        self.market.set_inner(Market {
            id,
            creator: self.creator.key(),
            question: args.question.clone(),
            description: args.description,
            category: args.category,
            yes_label: args.yes_label,
            no_label: args.no_label,
            created_at: now,
            end_time: args.end_time,
            resolution_time: args.resolution_time,
            curve_id,
            curve_params: args.curve_params,
            state,
            outcome: Outcome::Invalid,
            yes_shares: 0,
            no_shares: 0,
            yes_pool: 0,
            no_pool: 0,
            total_volume: 0,
            payout_pool: 0,
            winning_shares: 0,
            fee_amount: 0,
            fees_collected: false,
            refund_mode: false,
            finalized_at: 0,
            bump: bumps.market,
        });

        self.creator_bond.set_inner(CreatorBond {
            market: self.market.key(),
            creator: self.creator.key(),
            amount: bond_amount,
            bump: bumps.creator_bond,
        });

        self.config.market_count = id.checked_add(1).ok_or(MathError::Overflow)?;
        self.config.total_held_bonds = self
            .config
            .total_held_bonds
            .checked_add(bond_amount)
            .ok_or(MathError::Overflow)?;

        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.creator_token.to_account_info(),
                    mint: self.collateral_mint.to_account_info(),
                    to: self.bond_vault.to_account_info(),
                    authority: self.creator.to_account_info(),
                },
            ),
            bond_amount,
            self.collateral_mint.decimals,
        )?;

        emit!(MarketCreated {
            market_id: id,
            market: self.market.key(),
            creator: self.creator.key(),
            question: args.question,
            end_time: args.end_time,
            resolution_time: args.resolution_time,
        });
        msg!("Market {} created in state {:?}", id, state);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::UNIT;

    const NOW: i64 = 1_700_000_000;

    fn args() -> MarketConfigArgs {
        MarketConfigArgs {
            question: "Will the launch happen this quarter?".into(),
            description: "Counts scrubbed launches as no.".into(),
            category: "tech".into(),
            yes_label: "Yes".into(),
            no_label: "No".into(),
            end_time: NOW + 7 * 86_400,
            resolution_time: NOW + 8 * 86_400,
            curve_params: [100 * UNIT, 0, 0, 0],
        }
    }

    #[test]
    fn accepts_well_formed_config() {
        assert!(args().validate(NOW).is_ok());
    }

    #[test]
    fn question_boundary_is_exact() {
        let mut a = args();
        a.question = "q".repeat(MAX_QUESTION_LEN);
        assert!(a.validate(NOW).is_ok());
        a.question = "q".repeat(MAX_QUESTION_LEN + 1);
        assert!(a.validate(NOW).is_err());
        a.question = String::new();
        assert!(a.validate(NOW).is_err());
    }

    #[test]
    fn description_and_category_limits() {
        let mut a = args();
        a.description = "d".repeat(MAX_DESCRIPTION_LEN);
        assert!(a.validate(NOW).is_ok());
        a.description = "d".repeat(MAX_DESCRIPTION_LEN + 1);
        assert!(a.validate(NOW).is_err());

        let mut a = args();
        a.category = "c".repeat(MAX_CATEGORY_LEN + 1);
        assert!(a.validate(NOW).is_err());
    }

    #[test]
    fn labels_must_be_distinct_and_bounded() {
        let mut a = args();
        a.no_label = a.yes_label.clone();
        assert!(a.validate(NOW).is_err());

        // Case differences count as distinct.
        let mut a = args();
        a.yes_label = "yes".into();
        a.no_label = "YES".into();
        assert!(a.validate(NOW).is_ok());

        let mut a = args();
        a.yes_label = String::new();
        assert!(a.validate(NOW).is_err());

        let mut a = args();
        a.no_label = "l".repeat(MAX_LABEL_LEN + 1);
        assert!(a.validate(NOW).is_err());
    }

    #[test]
    fn time_window_boundaries_are_exact() {
        let mut a = args();
        a.end_time = NOW;
        assert!(a.validate(NOW).is_err());

        let mut a = args();
        a.resolution_time = a.end_time - 1;
        assert!(a.validate(NOW).is_err());

        // Exactly one year out is accepted; one second past is not.
        let mut a = args();
        a.resolution_time = NOW + MAX_MARKET_LIFETIME;
        assert!(a.validate(NOW).is_ok());
        a.resolution_time = NOW + MAX_MARKET_LIFETIME + 1;
        assert!(a.validate(NOW).is_err());
    }
}
