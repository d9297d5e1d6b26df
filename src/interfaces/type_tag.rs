// ============================================================================
// Type Tags
// Names under which numeric types are registered
// ============================================================================

use std::borrow::Cow;
use std::fmt;

/// Registry key naming a source or target numeric type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(Cow<'static, str>);

impl TypeTag {
    /// Tag from a string literal; usable in constants.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TypeTag {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for TypeTag {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tags of the preloaded built-in types.
pub mod tags {
    use super::TypeTag;

    /// `f64`
    pub const F64: TypeTag = TypeTag::from_static("f64");
    /// `f32`
    pub const F32: TypeTag = TypeTag::from_static("f32");
    /// `i64`
    pub const I64: TypeTag = TypeTag::from_static("i64");
    /// `num_bigint::BigInt`
    pub const BIG_INT: TypeTag = TypeTag::from_static("bigint");
    /// `num_rational::BigRational`
    pub const RATIONAL: TypeTag = TypeTag::from_static("rational");
    /// `rust_decimal::Decimal`
    pub const DECIMAL: TypeTag = TypeTag::from_static("decimal");
    /// `bigdecimal::BigDecimal`
    pub const BIG_DECIMAL: TypeTag = TypeTag::from_static("bigdecimal");
    /// `String` (target only)
    pub const STRING: TypeTag = TypeTag::from_static("str");
}
