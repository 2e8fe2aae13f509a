//! Schema type definitions.
//!
//! This module contains the data structures representing XSD type
//! declarations: simple types with their facets, complex types, and the
//! built-in primitive table.

use crate::components::{Attribute, AttributeGroup, Element, Group};
use indexmap::IndexMap;
use regex::Regex;

/// XSD built-in primitive categories.
///
/// Several XSD names collapse onto one category when the target language has
/// no finer distinction (every string-derived type maps to [`Self::String`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XsdPrimitive {
    /// `string` and every string-valued built-in (dates, URIs, tokens).
    String,
    /// Whitespace-separated token lists (`IDREFS`, `ENTITIES`, `NMTOKENS`).
    StringList,
    /// `boolean`.
    Boolean,
    /// `float`.
    Float,
    /// `double` and `decimal`.
    Double,
    /// `byte`.
    Byte,
    /// `short`.
    Short,
    /// `int`.
    Int,
    /// `long`, `integer` and the negative integer types.
    Long,
    /// `unsignedByte`.
    UnsignedByte,
    /// `unsignedShort`.
    UnsignedShort,
    /// `unsignedInt`.
    UnsignedInt,
    /// `unsignedLong` and the non-negative integer types.
    UnsignedLong,
    /// `hexBinary` and `base64Binary`.
    Binary,
}

impl XsdPrimitive {
    /// Parses a primitive from its unqualified XSD name.
    #[must_use]
    pub fn from_xsd_name(name: &str) -> Option<Self> {
        let primitive = match name {
            "string" | "normalizedString" | "token" | "language" | "Name" | "NCName" | "ID"
            | "IDREF" | "ENTITY" | "NMTOKEN" | "anyURI" | "QName" | "NOTATION" | "date"
            | "time" | "dateTime" | "duration" | "gYear" | "gYearMonth" | "gMonth"
            | "gMonthDay" | "gDay" | "anySimpleType" | "anyType" => Self::String,
            "IDREFS" | "ENTITIES" | "NMTOKENS" => Self::StringList,
            "boolean" => Self::Boolean,
            "float" => Self::Float,
            "double" | "decimal" => Self::Double,
            "byte" => Self::Byte,
            "short" => Self::Short,
            "int" => Self::Int,
            "long" | "integer" | "negativeInteger" | "nonPositiveInteger" => Self::Long,
            "unsignedByte" => Self::UnsignedByte,
            "unsignedShort" => Self::UnsignedShort,
            "unsignedInt" => Self::UnsignedInt,
            "unsignedLong" | "nonNegativeInteger" | "positiveInteger" => Self::UnsignedLong,
            "hexBinary" | "base64Binary" => Self::Binary,
            _ => return None,
        };
        Some(primitive)
    }

    /// Returns the Rust type name for this primitive.
    #[must_use]
    pub const fn rust_type(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::StringList => "Vec<String>",
            Self::Boolean => "bool",
            Self::Float => "f32",
            Self::Double => "f64",
            Self::Byte => "i8",
            Self::Short => "i16",
            Self::Int => "i32",
            Self::Long => "i64",
            Self::UnsignedByte => "u8",
            Self::UnsignedShort => "u16",
            Self::UnsignedInt => "u32",
            Self::UnsignedLong => "u64",
            Self::Binary => "Vec<u8>",
        }
    }

    /// Returns true if this is a numeric type.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        !matches!(
            self,
            Self::String | Self::StringList | Self::Boolean | Self::Binary
        )
    }
}

/// Compiled `pattern` facet.
///
/// XSD patterns always match the whole lexical value, so the compiled
/// expression is anchored. Several patterns on one type are alternatives.
#[derive(Debug, Clone)]
pub struct Pattern {
    /// Patterns as written in the schema, in declaration order.
    pub sources: Vec<String>,
    regex: Regex,
}

impl Pattern {
    /// Compiles a single pattern.
    ///
    /// # Errors
    /// Returns the regex error if the pattern does not compile.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Self::compile(vec![source.to_string()])
    }

    /// Returns a new pattern accepting either this pattern or `source`.
    ///
    /// # Errors
    /// Returns the regex error if the combined pattern does not compile.
    pub fn alternate(&self, source: &str) -> Result<Self, regex::Error> {
        let mut sources = self.sources.clone();
        sources.push(source.to_string());
        Self::compile(sources)
    }

    fn compile(sources: Vec<String>) -> Result<Self, regex::Error> {
        let body = match sources.as_slice() {
            [single] => single.clone(),
            many => many
                .iter()
                .map(|s| format!("(?:{s})"))
                .collect::<Vec<_>>()
                .join("|"),
        };
        let regex = Regex::new(&format!("^(?:{body})$"))?;
        Ok(Self { sources, regex })
    }

    /// Returns the anchored expression used for matching.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns true if `value` matches the whole pattern.
    #[must_use]
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// Facets attached to a simple type, element or attribute.
///
/// A facet is present when its option is `Some`.
#[derive(Debug, Clone, Default)]
pub struct Restriction {
    /// `minLength` facet.
    pub min_length: Option<usize>,
    /// `maxLength` facet.
    pub max_length: Option<usize>,
    /// `minInclusive` facet.
    pub min_inclusive: Option<f64>,
    /// `maxInclusive` facet.
    pub max_inclusive: Option<f64>,
    /// `pattern` facet.
    pub pattern: Option<Pattern>,
    /// `enumeration` literals in declaration order.
    pub enumerations: Vec<String>,
}

impl Restriction {
    /// Creates an empty restriction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no facet is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_length.is_none()
            && self.max_length.is_none()
            && self.min_inclusive.is_none()
            && self.max_inclusive.is_none()
            && self.pattern.is_none()
            && self.enumerations.is_empty()
    }

    /// Returns true if any checkable facet is present.
    ///
    /// Enumerations are not checked on fields; they produce their own type.
    #[must_use]
    pub fn has_checks(&self) -> bool {
        self.min_length.is_some()
            || self.max_length.is_some()
            || self.min_inclusive.is_some()
            || self.max_inclusive.is_some()
            || self.pattern.is_some()
    }

    /// Fills every facet not present here from `base`.
    ///
    /// Enumerations are never inherited.
    pub fn inherit(&mut self, base: &Restriction) {
        self.min_length = self.min_length.or(base.min_length);
        self.max_length = self.max_length.or(base.max_length);
        self.min_inclusive = self.min_inclusive.or(base.min_inclusive);
        self.max_inclusive = self.max_inclusive.or(base.max_inclusive);
        if self.pattern.is_none() {
            self.pattern = base.pattern.clone();
        }
    }
}

/// Simple type declaration.
#[derive(Debug, Clone, Default)]
pub struct SimpleType {
    /// Type name.
    pub name: String,
    /// Documentation text.
    pub doc: Option<String>,
    /// Underlying type (restriction base or list item type).
    pub base: String,
    /// Facets.
    pub restriction: Restriction,
    /// True if this is a list of `base`.
    pub list: bool,
    /// True if this is a union of `member_types`.
    pub union: bool,
    /// Union members: member name to type name, empty when not yet resolved.
    pub member_types: IndexMap<String, String>,
    /// Facets of anonymous union members, keyed like `member_types`.
    pub member_restrictions: IndexMap<String, Restriction>,
}

impl SimpleType {
    /// Creates a new simple type.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns true if this type only restricts its base.
    ///
    /// Plain restrictions are transparent to type resolution.
    #[must_use]
    pub fn is_plain_restriction(&self) -> bool {
        !self.list && !self.union && self.restriction.enumerations.is_empty()
    }

    /// Returns true if this is a union with at least one member.
    #[must_use]
    pub fn has_members(&self) -> bool {
        self.union && !self.member_types.is_empty()
    }
}

/// Complex type declaration.
#[derive(Debug, Clone, Default)]
pub struct ComplexType {
    /// Type name.
    pub name: String,
    /// Documentation text.
    pub doc: Option<String>,
    /// Extension or restriction base.
    pub base: Option<String>,
    /// Child elements in declaration order.
    pub elements: Vec<Element>,
    /// Attributes in declaration order.
    pub attributes: Vec<Attribute>,
    /// Group references.
    pub groups: Vec<Group>,
    /// Attribute group references.
    pub attribute_groups: Vec<AttributeGroup>,
}

impl ComplexType {
    /// Creates a new complex type.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the base type name when one is declared.
    #[must_use]
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref().filter(|b| !b.is_empty())
    }
}
