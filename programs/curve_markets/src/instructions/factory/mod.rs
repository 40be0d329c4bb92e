pub mod create_market;
pub mod refund_bond;

pub use create_market::*;
pub use refund_bond::*;
