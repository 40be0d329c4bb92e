pub mod claim;
pub mod place_bet;
pub mod sell_shares;

pub use claim::*;
pub use place_bet::*;
pub use sell_shares::*;
