//! # IronXSD Codegen
//!
//! Code generation from XSD schemas.
//!
//! This crate provides:
//! - The backend contract and the generator driver
//! - Rust struct/enum generation with validation routines
//! - Atomic artifact writing

pub mod backend;
pub mod config;
pub mod error;
pub mod generator;
pub mod rust;
pub mod state;

pub use backend::Backend;
pub use config::CodegenConfig;
pub use error::CodegenError;
pub use generator::Generator;
pub use rust::RustBackend;
pub use state::GeneratorState;

use std::path::{Path, PathBuf};

/// Generates Rust code from an XSD schema string.
///
/// # Arguments
/// * `xml` - XSD document content
/// * `config` - Generation settings
///
/// # Returns
/// Generated Rust code as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing or generation fails.
pub fn generate_from_xml(xml: &str, config: &CodegenConfig) -> Result<String, CodegenError> {
    let tree = ironxsd_schema::parse_schema_with(xml, config.reader_options())?;
    let mut backend = RustBackend::new(config.clone());
    Generator::new(&tree, config).generate(&mut backend)
}

/// Generates Rust code from an XSD schema file.
///
/// # Arguments
/// * `path` - Path to the XSD file
/// * `config` - Generation settings
///
/// # Returns
/// Generated Rust code as a string.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or generation fails.
pub fn generate_from_file(path: &Path, config: &CodegenConfig) -> Result<String, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml, config)
}

/// Generates Rust code from an XSD file and writes it to
/// `<output_dir>/<file_stem>.rs`.
///
/// # Returns
/// Path of the written artifact.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, generation or writing fails.
pub fn write_from_file(path: &Path, config: &CodegenConfig) -> Result<PathBuf, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    let tree = ironxsd_schema::parse_schema_with(&xml, config.reader_options())?;
    let mut backend = RustBackend::new(config.clone());
    Generator::new(&tree, config).write(&mut backend)
}
