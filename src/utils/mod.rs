// ============================================================================
// Utilities Module
// Optional helpers for binaries, demos and benchmarks
// ============================================================================

#[cfg(feature = "logging")]
pub mod logging;

#[cfg(feature = "logging")]
pub use logging::init_logging;
