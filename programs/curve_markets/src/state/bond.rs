//! Creator bond escrow record, owned exclusively by the factory.

use anchor_lang::prelude::*;

use crate::errors::AccountingError;

/// Bond held against one market.
///
/// Seeds: ["creator_bond", market]
///
/// `amount` transitions to zero exactly once, on refund; the refund
/// handler zeroes it before any transfer so a replay fails
/// deterministically.
#[account]
#[derive(InitSpace)]
pub struct CreatorBond {
    pub market: Pubkey,
    pub creator: Pubkey,
    pub amount: u64,
    /// PDA bump seed.
    pub bump: u8,
}

impl CreatorBond {
    pub const SEED: &'static [u8] = b"creator_bond";

    /// Zeroes the record and hands back the escrowed amount. The second
    /// call observes an empty bond and fails with NoBondHeld.
    pub fn release(&mut self) -> Result<u64> {
        require!(self.amount > 0, AccountingError::NoBondHeld);
        let amount = self.amount;
        self.amount = 0;
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_is_one_shot() {
        let mut bond = CreatorBond {
            market: Pubkey::new_unique(),
            creator: Pubkey::new_unique(),
            amount: 500,
            bump: 255,
        };
        assert_eq!(bond.release().unwrap(), 500);
        assert_eq!(bond.amount, 0);

        let err = bond.release().expect_err("second release must fail");
        assert!(format!("{err:?}").contains("NoBondHeld"));
    }
}
