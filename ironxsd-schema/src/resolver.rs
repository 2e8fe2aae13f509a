//! Type resolution over a [`ProtoTree`].
//!
//! Named type references may point at declarations that appear later in
//! the document, so resolution is a lookup into the finished (or partially
//! built) tree rather than a table filled during reading.

use crate::error::SchemaError;
use crate::ir::{Declaration, ProtoTree};
use crate::types::Restriction;

/// Strips a namespace prefix (`tns:Address` becomes `Address`).
#[must_use]
pub fn strip_ns_prefix(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

/// Result of resolving a type reference.
#[derive(Debug, Clone, Default)]
pub struct ResolvedType {
    /// Final type name: a primitive, or a declaration that ends the chain.
    pub name: String,
    /// Facets collected along the restriction chain; nearer declarations win.
    pub restriction: Restriction,
}

impl ResolvedType {
    /// Returns the facets after letting `own` override the inherited ones.
    #[must_use]
    pub fn facets_under(&self, own: &Restriction) -> Restriction {
        let mut merged = own.clone();
        merged.inherit(&self.restriction);
        merged
    }
}

/// Resolves type names against a tree.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    tree: &'a ProtoTree,
}

impl<'a> TypeResolver<'a> {
    /// Creates a resolver over `tree`.
    #[must_use]
    pub const fn new(tree: &'a ProtoTree) -> Self {
        Self { tree }
    }

    /// Returns the tree being resolved against.
    #[must_use]
    pub const fn tree(&self) -> &'a ProtoTree {
        self.tree
    }

    /// Looks up the declaration a (possibly qualified) name refers to.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&'a Declaration> {
        self.tree.find(strip_ns_prefix(name))
    }

    /// Resolves `name` to its effective type.
    ///
    /// Plain simple-type restrictions are followed to their base; elements and
    /// attributes found by name resolve through their declared type. Names with
    /// no declaration pass through unchanged (minus any prefix).
    ///
    /// # Errors
    /// Returns [`SchemaError::CircularReference`] if the chain revisits a name.
    pub fn resolve(&self, name: &str) -> Result<ResolvedType, SchemaError> {
        let mut current = strip_ns_prefix(name).to_string();
        let mut restriction = Restriction::new();
        let mut chain = vec![current.clone()];

        loop {
            let next = match self.tree.find(&current) {
                Some(Declaration::SimpleType(st)) if st.is_plain_restriction() => {
                    if st.base.is_empty() {
                        break;
                    }
                    restriction.inherit(&st.restriction);
                    strip_ns_prefix(&st.base)
                }
                Some(Declaration::Element(e)) if !e.type_name.is_empty() => {
                    let next = strip_ns_prefix(&e.type_name);
                    if next == current {
                        break;
                    }
                    restriction.inherit(&e.restriction);
                    next
                }
                Some(Declaration::Attribute(a)) if !a.type_name.is_empty() => {
                    let next = strip_ns_prefix(&a.type_name);
                    if next == current {
                        break;
                    }
                    restriction.inherit(&a.restriction);
                    next
                }
                _ => break,
            };

            let next = next.to_string();
            if chain.contains(&next) {
                chain.push(next);
                return Err(SchemaError::circular(&chain));
            }
            chain.push(next.clone());
            current = next;
        }

        Ok(ResolvedType {
            name: current,
            restriction,
        })
    }

    /// Resolves `name` and returns only the type name.
    ///
    /// # Errors
    /// Returns [`SchemaError::CircularReference`] on a cyclic chain.
    pub fn resolve_name(&self, name: &str) -> Result<String, SchemaError> {
        self.resolve(name).map(|resolved| resolved.name)
    }
}
