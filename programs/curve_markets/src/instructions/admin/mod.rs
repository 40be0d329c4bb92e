pub mod collect_fees;
pub mod lifecycle;
pub mod pause;
pub mod register_curve;
pub mod update_params;

pub use collect_fees::*;
pub use lifecycle::*;
pub use pause::*;
pub use register_curve::*;
pub use update_params::*;
