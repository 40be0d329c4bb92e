//! Protocol-wide limits and scales.

/// Base units per whole share / whole collateral token (9 decimals).
pub const UNIT: u64 = 1_000_000_000;

/// Basis-point scale: 10000 = 100%.
pub const BPS_SCALE: u64 = 10_000;

/// Hard cap on the platform fee.
pub const MAX_FEE_BPS: u64 = 3_000;

/// Spread retained on sells for the linear/exponential/sigmoid curves.
pub const REFUND_SPREAD_BPS: u64 = 100;

pub const MAX_QUESTION_LEN: usize = 500;
pub const MAX_DESCRIPTION_LEN: usize = 2_000;
pub const MAX_CATEGORY_LEN: usize = 50;
pub const MAX_LABEL_LEN: usize = 100;
pub const MAX_REASON_LEN: usize = 200;

pub const MAX_CURVE_NAME_LEN: usize = 32;
pub const MAX_CURVE_VERSION_LEN: usize = 16;
pub const MAX_REGISTERED_CURVES: usize = 16;

/// Markets must resolve within a year of creation.
pub const MAX_MARKET_LIFETIME: i64 = 365 * 86_400;
