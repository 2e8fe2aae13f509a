//! Generator driver.

use crate::backend::Backend;
use crate::config::CodegenConfig;
use crate::error::CodegenError;
use ironxsd_schema::{Declaration, ProtoTree, TypeResolver};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Walks a [`ProtoTree`] once and feeds every declaration to a backend.
pub struct Generator<'a> {
    tree: &'a ProtoTree,
    config: &'a CodegenConfig,
}

impl<'a> Generator<'a> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(tree: &'a ProtoTree, config: &'a CodegenConfig) -> Self {
        Self { tree, config }
    }

    /// Generates the artifact text.
    ///
    /// # Errors
    /// Returns `CodegenError` if a backend handler fails; the backend state
    /// is reset either way.
    pub fn generate<B: Backend>(&self, backend: &mut B) -> Result<String, CodegenError> {
        let resolver = TypeResolver::new(self.tree);

        if let Err(err) = self.dispatch(&resolver, backend) {
            backend.finish();
            return Err(err);
        }

        let code = backend.finish();
        tracing::info!(
            "generated {} bytes from {} declarations",
            code.len(),
            self.tree.len()
        );
        Ok(code)
    }

    fn dispatch<B: Backend>(
        &self,
        resolver: &TypeResolver<'_>,
        backend: &mut B,
    ) -> Result<(), CodegenError> {
        for decl in self.tree {
            match decl {
                Declaration::SimpleType(v) => backend.on_simple_type(resolver, v)?,
                Declaration::ComplexType(v) => backend.on_complex_type(resolver, v)?,
                Declaration::Element(v) => backend.on_element(resolver, v)?,
                Declaration::Attribute(v) => backend.on_attribute(resolver, v)?,
                Declaration::Group(v) => backend.on_group(resolver, v)?,
                Declaration::AttributeGroup(v) => backend.on_attribute_group(resolver, v)?,
            }
        }
        Ok(())
    }

    /// Generates the artifact and writes it to
    /// `<output_dir>/<file_stem>.<extension>`.
    ///
    /// The text goes to a temporary file in the output directory first and
    /// is renamed into place, so a failed run leaves no partial artifact.
    ///
    /// # Errors
    /// Returns `CodegenError` if generation fails or the file cannot be
    /// written.
    pub fn write<B: Backend>(&self, backend: &mut B) -> Result<PathBuf, CodegenError> {
        if self.config.file_stem.is_empty() {
            return Err(CodegenError::generation("empty output file stem"));
        }
        let code = self.generate(backend)?;
        let path = self.config.output_path(backend.extension());

        std::fs::create_dir_all(&self.config.output_dir)?;
        let mut file = NamedTempFile::new_in(&self.config.output_dir)?;
        file.write_all(code.as_bytes())?;
        file.flush()?;
        file.persist(&path)?;

        tracing::info!("wrote {}", path.display());
        Ok(path)
    }
}
