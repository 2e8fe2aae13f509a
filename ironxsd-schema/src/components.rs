//! Element, attribute and group declarations.
//!
//! These appear both as top-level declarations and nested inside complex
//! types and groups.

use crate::types::Restriction;

/// Element declaration.
#[derive(Debug, Clone, Default)]
pub struct Element {
    /// Element name (the `ref` value for references).
    pub name: String,
    /// Referenced type name, empty when untyped.
    pub type_name: String,
    /// True if the element may occur more than once.
    pub plural: bool,
    /// True if the element may be absent.
    pub optional: bool,
    /// Facets declared on the element itself.
    pub restriction: Restriction,
    /// Documentation text.
    pub doc: Option<String>,
}

impl Element {
    /// Creates a new element.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ..Self::default()
        }
    }
}

/// Attribute declaration.
#[derive(Debug, Clone, Default)]
pub struct Attribute {
    /// Attribute name (the `ref` value for references).
    pub name: String,
    /// Referenced type name.
    pub type_name: String,
    /// True for list-valued attributes.
    pub plural: bool,
    /// True unless `use="required"`.
    pub optional: bool,
    /// Facets declared on the attribute itself.
    pub restriction: Restriction,
    /// Documentation text.
    pub doc: Option<String>,
}

impl Attribute {
    /// Creates a new attribute.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ..Self::default()
        }
    }
}

/// Model group definition or reference.
#[derive(Debug, Clone, Default)]
pub struct Group {
    /// Group name (the `ref` value for references).
    pub name: String,
    /// Referenced group, set for `<group ref="…"/>`.
    pub reference: Option<String>,
    /// True if the group may occur more than once.
    pub plural: bool,
    /// True if the group may be absent.
    pub optional: bool,
    /// Elements of a group definition.
    pub elements: Vec<Element>,
    /// Nested group references.
    pub groups: Vec<Group>,
    /// Documentation text.
    pub doc: Option<String>,
}

impl Group {
    /// Creates a new group definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a reference to a named group.
    #[must_use]
    pub fn reference(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            reference: Some(name.clone()),
            name,
            ..Self::default()
        }
    }

    /// Returns true if this is a reference rather than a definition.
    #[must_use]
    pub fn is_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Returns the type name this group resolves to.
    #[must_use]
    pub fn target(&self) -> &str {
        self.reference.as_deref().unwrap_or(&self.name)
    }
}

/// Attribute group definition or reference.
#[derive(Debug, Clone, Default)]
pub struct AttributeGroup {
    /// Group name (the `ref` value for references).
    pub name: String,
    /// Referenced group, set for `<attributeGroup ref="…"/>`.
    pub reference: Option<String>,
    /// Attributes of a group definition.
    pub attributes: Vec<Attribute>,
    /// Nested attribute group references.
    pub attribute_groups: Vec<AttributeGroup>,
    /// Documentation text.
    pub doc: Option<String>,
}

impl AttributeGroup {
    /// Creates a new attribute group definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a reference to a named attribute group.
    #[must_use]
    pub fn reference(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            reference: Some(name.clone()),
            name,
            ..Self::default()
        }
    }

    /// Returns true if this is a reference rather than a definition.
    #[must_use]
    pub fn is_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Returns the type name this group resolves to.
    #[must_use]
    pub fn target(&self) -> &str {
        self.reference.as_deref().unwrap_or(&self.name)
    }
}
