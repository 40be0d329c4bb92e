//! Program state accounts.

pub mod bond;
pub mod config;
pub mod market;
pub mod position;
pub mod registry;
pub mod resolution;

pub use bond::*;
pub use config::*;
pub use market::*;
pub use position::*;
pub use registry::*;
pub use resolution::*;
