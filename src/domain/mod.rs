// ============================================================================
// Domain Models Module
// Rounding modes, precision policies and engine configuration
// ============================================================================

pub mod config;
pub mod mode;
pub mod policy;

pub use config::{RoundingConfig, DEFAULT_MAX_EXPONENT_MAGNITUDE};
pub use mode::RoundingMode;
pub use policy::PrecisionPolicy;

pub(crate) use mode::Direction;
