//! Error taxonomy.
//!
//! Failures are whole-call reverts grouped by class: what was malformed
//! (validation), who was not allowed (authorization), when the call was
//! illegal (state), how much was insufficient (economic), and what was
//! already settled (accounting). Curve math failures get their own bucket.

use anchor_lang::prelude::*;

#[error_code]
pub enum ValidationError {
    #[msg("Question cannot be empty")]
    QuestionEmpty,
    #[msg("Question exceeds maximum length")]
    QuestionTooLong,
    #[msg("Description exceeds maximum length")]
    DescriptionTooLong,
    #[msg("Category exceeds maximum length")]
    CategoryTooLong,
    #[msg("Outcome label cannot be empty")]
    LabelEmpty,
    #[msg("Outcome label exceeds maximum length")]
    LabelTooLong,
    #[msg("Outcome labels must be distinct")]
    LabelsNotDistinct,
    #[msg("End time must be in the future")]
    EndTimeInPast,
    #[msg("End time must not be after resolution time")]
    EndTimeAfterResolution,
    #[msg("Resolution time exceeds the one-year horizon")]
    ResolutionTooFar,
    #[msg("Curve rejected the supplied parameters")]
    InvalidCurveParams,
    #[msg("Proposed outcome must be Yes or No")]
    InvalidOutcome,
    #[msg("Dispute reason is empty or too long")]
    InvalidReason,
    #[msg("Platform fee exceeds the hard cap")]
    FeeTooHigh,
    #[msg("Parameter value out of range")]
    InvalidParamValue,
    #[msg("Curve name is empty or too long")]
    InvalidCurveName,
}

#[error_code]
pub enum AuthorizationError {
    #[msg("Only the admin can perform this action")]
    AdminOnly,
    #[msg("Only the resolver can perform this action")]
    ResolverOnly,
    #[msg("Account does not match the recorded party")]
    Unauthorized,
}

#[error_code]
pub enum StateError {
    #[msg("Invalid lifecycle transition for the current state")]
    InvalidStateTransition,
    #[msg("Market is not accepting trades")]
    MarketNotActive,
    #[msg("Betting period has ended")]
    BettingClosed,
    #[msg("Market has no outcome proposal to act on")]
    MarketNotResolving,
    #[msg("Market is not under dispute")]
    MarketNotDisputed,
    #[msg("Market is not finalized")]
    MarketNotFinalized,
    #[msg("Market is not cancelled")]
    MarketNotCancelled,
    #[msg("Resolution time has not been reached")]
    ResolutionTooEarly,
    #[msg("Dispute window has closed")]
    DisputeWindowClosed,
    #[msg("Dispute window is still open")]
    DisputeWindowOpen,
    #[msg("Market is escalated and requires admin resolution")]
    MarketEscalated,
    #[msg("Factory is paused")]
    FactoryPaused,
    #[msg("Factory is not paused")]
    NotPaused,
    #[msg("Factory is already paused")]
    AlreadyPaused,
}

#[error_code]
pub enum EconomicError {
    #[msg("Bet is below the minimum")]
    BetBelowMinimum,
    #[msg("Bet is above the maximum")]
    BetAboveMaximum,
    #[msg("Executed odds fell below the requested minimum")]
    SlippageTooHigh,
    #[msg("Insufficient shares to sell")]
    InsufficientShares,
    #[msg("Refund exceeds the outcome pool")]
    InsufficientPool,
    #[msg("Bond is below the minimum")]
    BondBelowMinimum,
    #[msg("Curve is not registered")]
    CurveNotFound,
    #[msg("Curve is deactivated for new markets")]
    CurveInactive,
    #[msg("Curve id is already registered")]
    CurveAlreadyRegistered,
    #[msg("Curve name is already taken")]
    CurveNameTaken,
    #[msg("Curve registry is full")]
    RegistryFull,
}

#[error_code]
pub enum AccountingError {
    #[msg("No creator bond is held for this market")]
    NoBondHeld,
    #[msg("Winnings already claimed")]
    AlreadyClaimed,
    #[msg("Nothing to claim")]
    NoWinnings,
    #[msg("Fees already collected")]
    FeesAlreadyCollected,
    #[msg("No fees to collect")]
    NoFeesAccrued,
}

#[error_code]
pub enum MathError {
    #[msg("Arithmetic overflow")]
    Overflow,
    #[msg("Division by zero")]
    DivisionByZero,
    #[msg("Amount too small to price")]
    AmountTooSmall,
    #[msg("Share amount must be greater than zero")]
    ShareAmountZero,
}
