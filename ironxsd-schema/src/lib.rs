//! # IronXSD Schema
//!
//! XSD schema reader and data model.
//!
//! This crate provides:
//! - An event-driven reader for XML Schema documents
//! - The declaration model (simple/complex types, elements, attributes, groups)
//! - Restriction facets with compiled patterns
//! - Type resolution across restriction chains

pub mod components;
pub mod context;
pub mod error;
pub mod ir;
pub mod parser;
pub mod resolver;
pub mod types;

pub use components::{Attribute, AttributeGroup, Element, Group};
pub use error::{ParseError, SchemaError};
pub use ir::{DeclKind, Declaration, ProtoTree};
pub use parser::{
    Attrs, Construct, ReaderOptions, SchemaReader, parse_schema, parse_schema_file,
    parse_schema_with,
};
pub use resolver::{ResolvedType, TypeResolver, strip_ns_prefix};
pub use types::{ComplexType, Pattern, Restriction, SimpleType, XsdPrimitive};
