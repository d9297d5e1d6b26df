// ============================================================================
// Format Module
// Rendering rounded triples as digit strings
// ============================================================================

mod spec;
mod style;

pub use spec::{parse_spec, FormatKind, FormatSpec, DEFAULT_PRECISION};
pub use style::{render, Notation, RenderStyle, SignStyle};
