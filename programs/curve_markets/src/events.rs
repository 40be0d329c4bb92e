//! Notification events emitted by the program.

use anchor_lang::prelude::*;

use crate::curves::Side;
use crate::state::Outcome;

#[event]
pub struct MarketCreated {
    pub market_id: u64,
    pub market: Pubkey,
    pub creator: Pubkey,
    pub question: String,
    pub end_time: i64,
    pub resolution_time: i64,
}

#[event]
pub struct MarketApproved {
    pub market_id: u64,
}

#[event]
pub struct MarketActivated {
    pub market_id: u64,
}

#[event]
pub struct BetPlaced {
    pub market_id: u64,
    pub bettor: Pubkey,
    pub amount: u64,
    pub outcome: Side,
    pub shares_received: u64,
    pub timestamp: i64,
}

#[event]
pub struct SharesSold {
    pub market_id: u64,
    pub seller: Pubkey,
    pub shares: u64,
    pub outcome: Side,
    pub refund: u64,
    pub timestamp: i64,
}

#[event]
pub struct MarketResolved {
    pub market_id: u64,
    pub outcome: Outcome,
    pub resolver: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct MarketDisputed {
    pub market_id: u64,
    pub disputer: Pubkey,
    pub reason: String,
    pub bond: u64,
    pub timestamp: i64,
}

#[event]
pub struct MarketEscalated {
    pub market_id: u64,
    pub dispute_count: u8,
    pub dispute_bond_total: u64,
}

#[event]
pub struct MarketFinalized {
    pub market_id: u64,
    pub outcome: Outcome,
    pub timestamp: i64,
}

#[event]
pub struct MarketCancelled {
    pub market_id: u64,
    pub reason: String,
    pub timestamp: i64,
}

#[event]
pub struct WinningsClaimed {
    pub market_id: u64,
    pub claimer: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct RefundClaimed {
    pub market_id: u64,
    pub claimer: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct CreatorBondRefunded {
    pub market_id: u64,
    pub creator: Pubkey,
    pub amount: u64,
}

#[event]
pub struct FeesCollected {
    pub market_id: u64,
    pub amount: u64,
}

#[event]
pub struct FactoryPaused {
    pub paused: bool,
}

#[event]
pub struct CurveRegistered {
    pub curve_id: u16,
    pub name: String,
    pub version: String,
}

#[event]
pub struct CurveStatusChanged {
    pub curve_id: u16,
    pub active: bool,
}

#[event]
pub struct ParamsUpdated {
    pub admin: Pubkey,
}
