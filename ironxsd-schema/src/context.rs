//! Parsing context stacks.
//!
//! Schema markup nests, so every end event has to find the declaration it
//! closes. Each declaration kind gets its own typed stack, and a scope list
//! records the order in which constructs were opened so the reader can tell
//! which enclosing declaration owns a child.

use crate::components::{Attribute, AttributeGroup, Element, Group};
use crate::types::{ComplexType, Restriction, SimpleType};

/// Typed LIFO stack of open declarations.
#[derive(Debug, Clone)]
pub struct ContextStack<T> {
    items: Vec<T>,
}

impl<T> Default for ContextStack<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> ContextStack<T> {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a declaration.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Pops the innermost declaration.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Returns the innermost declaration.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Returns the innermost declaration mutably.
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.items.last_mut()
    }

    /// Returns the number of open declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// An open construct, in nesting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Simple type; `consumed` once a facet end handler took it over.
    SimpleType {
        /// True if the declaration was already popped.
        consumed: bool,
    },
    /// Complex type.
    ComplexType,
    /// Element.
    Element,
    /// Attribute.
    Attribute,
    /// Model group definition or reference.
    Group,
    /// Attribute group definition or reference.
    AttributeGroup,
    /// `<list>` inside a simple type.
    List,
    /// `<union>` inside a simple type.
    Union,
}

impl Scope {
    /// Returns true if this scope owns a declaration on one of the stacks.
    #[must_use]
    pub const fn is_declaration(&self) -> bool {
        !matches!(self, Self::List | Self::Union)
    }
}

/// Occurrence modifiers contributed by `sequence`, `choice` and `all`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Particle {
    /// Children may repeat.
    pub plural: bool,
    /// Children may be absent.
    pub optional: bool,
}

/// All stacks used while reading one schema document.
#[derive(Debug, Default)]
pub struct ParseContext {
    /// Open simple types.
    pub simple_types: ContextStack<SimpleType>,
    /// Open complex types.
    pub complex_types: ContextStack<ComplexType>,
    /// Open elements.
    pub elements: ContextStack<Element>,
    /// Open attributes.
    pub attributes: ContextStack<Attribute>,
    /// Open groups.
    pub groups: ContextStack<Group>,
    /// Open attribute groups.
    pub attribute_groups: ContextStack<AttributeGroup>,
    /// Open particles.
    pub particles: ContextStack<Particle>,
    scopes: Vec<Scope>,
}

impl ParseContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that a construct was opened.
    pub fn enter(&mut self, scope: Scope) {
        self.scopes.push(scope);
    }

    /// Closes the innermost scope if it matches `expected`.
    ///
    /// A consumed simple type matches `Scope::SimpleType` regardless of its
    /// flag. Returns the closed scope.
    pub fn leave(&mut self, expected: Scope) -> Option<Scope> {
        let matches = match (self.scopes.last()?, expected) {
            (Scope::SimpleType { .. }, Scope::SimpleType { .. }) => true,
            (top, expected) => *top == expected,
        };
        if matches { self.scopes.pop() } else { None }
    }

    /// Returns the innermost scope.
    #[must_use]
    pub fn current(&self) -> Option<Scope> {
        self.scopes.last().copied()
    }

    /// Returns the innermost scope that owns a declaration.
    #[must_use]
    pub fn enclosing_declaration(&self) -> Option<Scope> {
        self.scopes.iter().rev().copied().find(Scope::is_declaration)
    }

    /// Returns true if the innermost declaration is a simple type that was
    /// not consumed.
    #[must_use]
    pub fn live_simple_type(&self) -> bool {
        matches!(
            self.enclosing_declaration(),
            Some(Scope::SimpleType { consumed: false })
        )
    }

    /// Marks the innermost simple type scope as consumed.
    pub fn consume_simple_type(&mut self) {
        if let Some(scope) = self
            .scopes
            .iter_mut()
            .rev()
            .find(|s| matches!(s, Scope::SimpleType { .. }))
        {
            *scope = Scope::SimpleType { consumed: true };
        }
    }

    /// Marks the innermost consumed simple type scope as live again.
    pub fn reopen_simple_type(&mut self) {
        if let Some(scope) = self
            .scopes
            .iter_mut()
            .rev()
            .find(|s| matches!(s, Scope::SimpleType { .. }))
        {
            *scope = Scope::SimpleType { consumed: false };
        }
    }

    /// Returns the element or attribute scope that directly encloses the
    /// innermost simple type, skipping `list`/`union` wrappers.
    #[must_use]
    pub fn simple_type_owner(&self) -> Option<Scope> {
        let mut seen_simple = false;
        for scope in self.scopes.iter().rev() {
            match scope {
                Scope::SimpleType { .. } if !seen_simple => seen_simple = true,
                Scope::Element | Scope::Attribute if seen_simple => return Some(*scope),
                Scope::List | Scope::Union => {}
                _ if seen_simple => return None,
                _ => {}
            }
        }
        None
    }

    /// Returns the restriction that facet events currently target.
    ///
    /// The innermost live simple type wins, then the innermost element or
    /// attribute. Returns `None` outside any such declaration.
    pub fn facet_target(&mut self) -> Option<&mut Restriction> {
        match self.enclosing_declaration()? {
            Scope::SimpleType { consumed: false } => {
                self.simple_types.peek_mut().map(|st| &mut st.restriction)
            }
            Scope::SimpleType { consumed: true } | Scope::Element | Scope::Attribute => {
                match self.innermost_field()? {
                    Scope::Element => self.elements.peek_mut().map(|e| &mut e.restriction),
                    _ => self.attributes.peek_mut().map(|a| &mut a.restriction),
                }
            }
            _ => None,
        }
    }

    /// Returns the innermost element or attribute scope.
    #[must_use]
    pub fn innermost_field(&self) -> Option<Scope> {
        self.scopes
            .iter()
            .rev()
            .copied()
            .find(|s| matches!(s, Scope::Element | Scope::Attribute))
    }

    /// Returns the combined occurrence modifiers of all open particles.
    #[must_use]
    pub fn particle(&self) -> Particle {
        self.particles.peek().copied().unwrap_or_default()
    }

    /// Returns the name of the innermost element or attribute, if any.
    #[must_use]
    pub fn owner_name(&self) -> Option<String> {
        match self.innermost_field()? {
            Scope::Element => self.elements.peek().map(|e| e.name.clone()),
            _ => self.attributes.peek().map(|a| a.name.clone()),
        }
    }
}
