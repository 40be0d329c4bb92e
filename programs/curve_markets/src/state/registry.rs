//! Curve registry.
//!
//! Admin-controlled catalog mapping a curve id to a concrete strategy
//! and version. Deactivating an id only blocks *new* markets from
//! selecting it; markets already bound keep pricing through the curve,
//! which is why [`CurveRegistry::kind_of`] ignores the active flag.

use anchor_lang::prelude::*;

use crate::constants::{MAX_CURVE_NAME_LEN, MAX_CURVE_VERSION_LEN, MAX_REGISTERED_CURVES};
use crate::curves::CurveKind;
use crate::errors::{EconomicError, ValidationError};

/// Registry account (singleton PDA).
///
/// Seeds: ["curve_registry"]
#[account]
#[derive(InitSpace)]
pub struct CurveRegistry {
    #[max_len(MAX_REGISTERED_CURVES)]
    pub curves: Vec<CurveRegistration>,

    /// PDA bump seed.
    pub bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, InitSpace, Debug)]
pub struct CurveRegistration {
    pub curve_id: u16,
    pub kind: CurveKind,
    #[max_len(MAX_CURVE_NAME_LEN)]
    pub name: String,
    #[max_len(MAX_CURVE_VERSION_LEN)]
    pub version: String,
    pub active: bool,
}

impl CurveRegistry {
    pub const SEED: &'static [u8] = b"curve_registry";

    pub fn register(
        &mut self,
        curve_id: u16,
        kind: CurveKind,
        name: String,
        version: String,
    ) -> Result<()> {
        require!(
            !name.is_empty() && name.len() <= MAX_CURVE_NAME_LEN,
            ValidationError::InvalidCurveName
        );
        require!(
            version.len() <= MAX_CURVE_VERSION_LEN,
            ValidationError::InvalidCurveName
        );
        require!(
            self.curves.len() < MAX_REGISTERED_CURVES,
            EconomicError::RegistryFull
        );
        require!(
            self.curves.iter().all(|c| c.curve_id != curve_id),
            EconomicError::CurveAlreadyRegistered
        );
        require!(
            self.curves.iter().all(|c| c.name != name),
            EconomicError::CurveNameTaken
        );
        self.curves.push(CurveRegistration {
            curve_id,
            kind,
            name,
            version,
            active: true,
        });
        Ok(())
    }

    pub fn set_active(&mut self, curve_id: u16, active: bool) -> Result<()> {
        let entry = self
            .curves
            .iter_mut()
            .find(|c| c.curve_id == curve_id)
            .ok_or(EconomicError::CurveNotFound)?;
        entry.active = active;
        Ok(())
    }

    /// Strategy lookup for market creation: the curve must exist and be
    /// active.
    pub fn resolve(&self, curve_id: u16) -> Result<CurveKind> {
        let entry = self
            .curves
            .iter()
            .find(|c| c.curve_id == curve_id)
            .ok_or(EconomicError::CurveNotFound)?;
        require!(entry.active, EconomicError::CurveInactive);
        Ok(entry.kind)
    }

    /// Strategy lookup for markets already bound to the curve.
    pub fn kind_of(&self, curve_id: u16) -> Result<CurveKind> {
        self.curves
            .iter()
            .find(|c| c.curve_id == curve_id)
            .map(|c| c.kind)
            .ok_or_else(|| error!(EconomicError::CurveNotFound))
    }
}
