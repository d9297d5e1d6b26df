// ============================================================================
// Type Registry
// Append-only table of source/target converters keyed by type tag
// ============================================================================

use super::builtin;
use crate::interfaces::{RegisteredType, SourceConverter, TargetConverter, TypeTag};
use crate::numeric::{RoundingError, RoundingResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// The converter pair registered for one numeric type.
pub struct RegistryEntry {
    tag: TypeTag,
    source: Box<dyn SourceConverter>,
    target: Box<dyn TargetConverter>,
}

impl RegistryEntry {
    #[inline]
    pub fn tag(&self) -> &TypeTag {
        &self.tag
    }

    #[inline]
    pub fn source(&self) -> &dyn SourceConverter {
        self.source.as_ref()
    }

    #[inline]
    pub fn target(&self) -> &dyn TargetConverter {
        self.target.as_ref()
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry").field("tag", &self.tag).finish_non_exhaustive()
    }
}

/// Registry of numeric types the pipeline can read from and write to.
///
/// Entries are never replaced or removed. Registration takes the write lock;
/// lookups take the read lock just long enough to clone the entry's `Arc`, so
/// conversions never run under the lock.
#[derive(Default)]
pub struct TypeRegistry {
    entries: RwLock<HashMap<TypeTag, Arc<RegistryEntry>>>,
}

static GLOBAL_REGISTRY: OnceLock<Arc<TypeRegistry>> = OnceLock::new();

impl TypeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the built-in numeric types.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        builtin::register_builtins(&registry);
        registry
    }

    /// The process-wide registry, populated with the built-ins on first use.
    pub fn global() -> Arc<TypeRegistry> {
        Arc::clone(GLOBAL_REGISTRY.get_or_init(|| Arc::new(Self::with_builtins())))
    }

    /// Register a converter pair under `tag`.
    ///
    /// # Errors
    /// Returns `DuplicateType` if the tag is already taken; the existing
    /// entry is left in place.
    pub fn register(
        &self,
        tag: impl Into<TypeTag>,
        source: impl SourceConverter + 'static,
        target: impl TargetConverter + 'static,
    ) -> RoundingResult<()> {
        let tag = tag.into();
        let mut entries = self.entries.write();
        if entries.contains_key(&tag) {
            tracing::warn!(tag = %tag, "rejected duplicate type registration");
            return Err(RoundingError::DuplicateType(tag.to_string()));
        }

        tracing::debug!(tag = %tag, "registered numeric type");
        let entry = RegistryEntry {
            tag: tag.clone(),
            source: Box::new(source),
            target: Box::new(target),
        };
        entries.insert(tag, Arc::new(entry));
        Ok(())
    }

    /// Register a converter pair under `T`'s own tag.
    pub fn register_type<T: RegisteredType>(
        &self,
        source: impl SourceConverter + 'static,
        target: impl TargetConverter + 'static,
    ) -> RoundingResult<()> {
        self.register(T::TAG, source, target)
    }

    /// The entry for `tag`, if registered.
    pub fn lookup(&self, tag: &TypeTag) -> Option<Arc<RegistryEntry>> {
        self.entries.read().get(tag).cloned()
    }

    /// The entry for `tag`, or `UnsupportedType`.
    pub fn require(&self, tag: &TypeTag) -> RoundingResult<Arc<RegistryEntry>> {
        self.lookup(tag)
            .ok_or_else(|| RoundingError::UnsupportedType(tag.to_string()))
    }

    pub fn contains(&self, tag: &TypeTag) -> bool {
        self.entries.read().contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Registered tags in sorted order.
    pub fn tags(&self) -> Vec<TypeTag> {
        let mut tags: Vec<TypeTag> = self.entries.read().keys().cloned().collect();
        tags.sort();
        tags
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry").field("tags", &self.tags()).finish()
    }
}
