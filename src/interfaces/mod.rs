// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod converter;
mod type_tag;

pub use converter::{
    typed_source, typed_target, RegisteredType, SourceConverter, TargetConverter, TypedSource,
    TypedTarget,
};
pub use type_tag::{tags, TypeTag};
