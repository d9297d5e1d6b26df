// ============================================================================
// Logging Setup
// Installs a `tracing` fmt subscriber for the pipeline's diagnostics
// ============================================================================

use tracing::Level;

/// Install a global fmt subscriber at `level`.
///
/// At `Level::TRACE` every pipeline stage is logged: the selected exponent,
/// the quarter representation and the rounded triple.
///
/// # Errors
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(level: Level) -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .map_err(|e| format!("Failed to install subscriber: {}", e))
}
