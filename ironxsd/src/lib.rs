//! # IronXSD
//!
//! Generates typed Rust definitions from XSD schemas.
//!
//! Every emitted struct and enum carries a `validate()` routine that checks
//! the length, range and pattern facets declared in the schema.
//!
//! ## Features
//!
//! - **Streaming schema reader** - Single pass over the XSD event stream
//! - **Type resolution** - Restriction chains followed to their builtin base
//! - **Deterministic output** - The same schema always yields the same code
//! - **Atomic writes** - Artifacts are written through a temporary file
//!
//! ## Quick Start
//!
//! ```ignore
//! use ironxsd::prelude::*;
//!
//! let config = CodegenConfig::new()
//!     .with_package("orders")
//!     .with_serde(true);
//! let code = generate_from_xml(xsd, &config)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - XSD reader, data model and type resolver
//! - [`codegen`] - Backend contract, generator driver and the Rust backend

pub mod prelude;

/// Schema reading and type resolution.
pub mod schema {
    pub use ironxsd_schema::*;
}

/// Code generation from XSD schemas.
pub mod codegen {
    pub use ironxsd_codegen::*;
}
