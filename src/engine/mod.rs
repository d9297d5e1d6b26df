// ============================================================================
// Engine Module
// Exponent selection, rounding and the conversion pipeline
// ============================================================================

mod exponent;
mod rounder;
mod rounding;

pub mod factory;

pub use exponent::{decade, policy_exponent, select_exponent};
pub use factory::{create_from_config, RounderBuilder};
pub use rounder::Rounder;
pub use rounding::round_quarters;
