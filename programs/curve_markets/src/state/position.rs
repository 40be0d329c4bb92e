//! Per-user position bookkeeping.

use anchor_lang::prelude::*;

use crate::curves::Side;
use crate::errors::{AccountingError, EconomicError, MathError};

/// One user's holdings in one market.
///
/// Seeds: ["position", market, owner]
#[account]
#[derive(InitSpace)]
pub struct Position {
    pub market: Pubkey,
    pub owner: Pubkey,
    pub yes_shares: u64,
    pub no_shares: u64,
    /// Net collateral the user has put in (bets minus sell proceeds).
    pub total_invested: u64,
    /// One-way flag: flips true on the first successful claim.
    pub claimed: bool,
    /// PDA bump seed.
    pub bump: u8,
}

impl Position {
    pub const SEED: &'static [u8] = b"position";

    pub fn shares_on(&self, side: Side) -> u64 {
        match side {
            Side::Yes => self.yes_shares,
            Side::No => self.no_shares,
        }
    }

    pub fn credit(&mut self, side: Side, shares: u64, amount: u64) -> Result<()> {
        let slot = match side {
            Side::Yes => &mut self.yes_shares,
            Side::No => &mut self.no_shares,
        };
        *slot = slot.checked_add(shares).ok_or(MathError::Overflow)?;
        self.total_invested = self
            .total_invested
            .checked_add(amount)
            .ok_or(MathError::Overflow)?;
        Ok(())
    }

    pub fn debit(&mut self, side: Side, shares: u64, refund: u64) -> Result<()> {
        let slot = match side {
            Side::Yes => &mut self.yes_shares,
            Side::No => &mut self.no_shares,
        };
        require!(*slot >= shares, EconomicError::InsufficientShares);
        *slot -= shares;
        self.total_invested = self.total_invested.saturating_sub(refund);
        Ok(())
    }

    /// One-shot claim gate. Flips `claimed` exactly once; a replay fails
    /// with AlreadyClaimed, a zero payout fails with NoWinnings and
    /// leaves the position claimable.
    pub fn claim_payout(&mut self, amount: u64) -> Result<()> {
        require!(!self.claimed, AccountingError::AlreadyClaimed);
        require!(amount > 0, AccountingError::NoWinnings);
        self.claimed = true;
        Ok(())
    }
}
