pub mod admin;
pub mod factory;
pub mod initialize;
pub mod market;
pub mod resolution;

pub use admin::*;
pub use factory::*;
pub use initialize::*;
pub use market::*;
pub use resolution::*;
