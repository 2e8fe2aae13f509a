//! Intermediate representation for code generation.
//!
//! The [`ProtoTree`] is the ordered list of top-level declarations read from
//! a schema document. It is the single symbol table consulted by type
//! resolution and walked once by the generator.

use crate::components::{Attribute, AttributeGroup, Element, Group};
use crate::types::{ComplexType, SimpleType};
use std::fmt;

/// Declaration kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// Simple type.
    SimpleType,
    /// Complex type.
    ComplexType,
    /// Element.
    Element,
    /// Attribute.
    Attribute,
    /// Model group.
    Group,
    /// Attribute group.
    AttributeGroup,
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SimpleType => "simpleType",
            Self::ComplexType => "complexType",
            Self::Element => "element",
            Self::Attribute => "attribute",
            Self::Group => "group",
            Self::AttributeGroup => "attributeGroup",
        };
        f.write_str(name)
    }
}

/// Top-level declaration.
#[derive(Debug, Clone)]
pub enum Declaration {
    /// Simple type declaration.
    SimpleType(SimpleType),
    /// Complex type declaration.
    ComplexType(ComplexType),
    /// Element declaration.
    Element(Element),
    /// Attribute declaration.
    Attribute(Attribute),
    /// Model group definition.
    Group(Group),
    /// Attribute group definition.
    AttributeGroup(AttributeGroup),
}

impl Declaration {
    /// Returns the declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::SimpleType(v) => &v.name,
            Self::ComplexType(v) => &v.name,
            Self::Element(v) => &v.name,
            Self::Attribute(v) => &v.name,
            Self::Group(v) => &v.name,
            Self::AttributeGroup(v) => &v.name,
        }
    }

    /// Returns the kind tag.
    #[must_use]
    pub const fn kind(&self) -> DeclKind {
        match self {
            Self::SimpleType(_) => DeclKind::SimpleType,
            Self::ComplexType(_) => DeclKind::ComplexType,
            Self::Element(_) => DeclKind::Element,
            Self::Attribute(_) => DeclKind::Attribute,
            Self::Group(_) => DeclKind::Group,
            Self::AttributeGroup(_) => DeclKind::AttributeGroup,
        }
    }

    /// Returns true if this declares a type.
    #[must_use]
    pub const fn is_type(&self) -> bool {
        matches!(self, Self::SimpleType(_) | Self::ComplexType(_))
    }
}

/// Ordered sequence of top-level declarations.
#[derive(Debug, Clone, Default)]
pub struct ProtoTree {
    decls: Vec<Declaration>,
}

impl ProtoTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a declaration.
    pub fn push(&mut self, decl: Declaration) {
        self.decls.push(decl);
    }

    /// Returns the number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Returns true if the tree holds no declaration.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Iterates declarations in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Declaration> {
        self.decls.iter()
    }

    /// Finds the first simple or complex type named `name`.
    #[must_use]
    pub fn find_type(&self, name: &str) -> Option<&Declaration> {
        self.decls.iter().find(|d| d.is_type() && d.name() == name)
    }

    /// Finds the first declaration of any kind named `name`, preferring types.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Declaration> {
        self.find_type(name)
            .or_else(|| self.decls.iter().find(|d| d.name() == name))
    }

    /// Finds a simple type by name.
    #[must_use]
    pub fn simple_type(&self, name: &str) -> Option<&SimpleType> {
        self.decls.iter().find_map(|d| match d {
            Declaration::SimpleType(v) if v.name == name => Some(v),
            _ => None,
        })
    }

    /// Finds a complex type by name.
    #[must_use]
    pub fn complex_type(&self, name: &str) -> Option<&ComplexType> {
        self.decls.iter().find_map(|d| match d {
            Declaration::ComplexType(v) if v.name == name => Some(v),
            _ => None,
        })
    }

    /// Counts declarations of one kind.
    #[must_use]
    pub fn count(&self, kind: DeclKind) -> usize {
        self.decls.iter().filter(|d| d.kind() == kind).count()
    }
}

impl<'a> IntoIterator for &'a ProtoTree {
    type Item = &'a Declaration;
    type IntoIter = std::slice::Iter<'a, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Declaration> for ProtoTree {
    fn from_iter<I: IntoIterator<Item = Declaration>>(iter: I) -> Self {
        Self {
            decls: iter.into_iter().collect(),
        }
    }
}
