// ============================================================================
// Registry Module
// Numeric types known to the rounding pipeline
// ============================================================================

mod builtin;
pub mod type_registry;

pub use type_registry::{RegistryEntry, TypeRegistry};
