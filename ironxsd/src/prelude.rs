//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use ironxsd::prelude::*;
//! ```

// Schema types
pub use ironxsd_schema::{
    ParseError, ProtoTree, ReaderOptions, SchemaError, TypeResolver, parse_schema,
    parse_schema_file, parse_schema_with,
};

// Codegen types
pub use ironxsd_codegen::{
    Backend, CodegenConfig, CodegenError, Generator, RustBackend, generate_from_file,
    generate_from_xml, write_from_file,
};
