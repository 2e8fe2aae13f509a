//! Backend contract.
//!
//! A backend lowers each declaration kind into target-language source text.
//! The generator driver calls exactly one `on_*` handler per declaration, in
//! tree order, and then [`Backend::finish`] once.

use crate::error::CodegenError;
use ironxsd_schema::{
    Attribute, AttributeGroup, ComplexType, Element, Group, SimpleType, TypeResolver,
};

/// Target-language code generator.
pub trait Backend {
    /// File extension of the emitted artifact, without the dot.
    fn extension(&self) -> &'static str;

    /// Converts a schema name to a field identifier.
    fn field_name(&self, raw: &str) -> String;

    /// Converts a schema name to a type identifier.
    ///
    /// With `unique`, every repeat of the same identifier within the run is
    /// suffixed with its count.
    fn struct_name(&mut self, raw: &str, unique: bool) -> String;

    /// Maps a resolved type name to a target type.
    fn field_type(&self, name: &str) -> String;

    /// Handles a simple type declaration.
    ///
    /// # Errors
    /// Returns `CodegenError` if type resolution fails.
    fn on_simple_type(
        &mut self,
        resolver: &TypeResolver<'_>,
        decl: &SimpleType,
    ) -> Result<(), CodegenError>;

    /// Handles a complex type declaration.
    ///
    /// # Errors
    /// Returns `CodegenError` if type resolution fails.
    fn on_complex_type(
        &mut self,
        resolver: &TypeResolver<'_>,
        decl: &ComplexType,
    ) -> Result<(), CodegenError>;

    /// Handles a top-level element.
    ///
    /// # Errors
    /// Returns `CodegenError` if type resolution fails.
    fn on_element(&mut self, resolver: &TypeResolver<'_>, decl: &Element)
    -> Result<(), CodegenError>;

    /// Handles a top-level attribute.
    ///
    /// # Errors
    /// Returns `CodegenError` if type resolution fails.
    fn on_attribute(
        &mut self,
        resolver: &TypeResolver<'_>,
        decl: &Attribute,
    ) -> Result<(), CodegenError>;

    /// Handles a model group definition.
    ///
    /// # Errors
    /// Returns `CodegenError` if type resolution fails.
    fn on_group(&mut self, resolver: &TypeResolver<'_>, decl: &Group) -> Result<(), CodegenError>;

    /// Handles an attribute group definition.
    ///
    /// # Errors
    /// Returns `CodegenError` if type resolution fails.
    fn on_attribute_group(
        &mut self,
        resolver: &TypeResolver<'_>,
        decl: &AttributeGroup,
    ) -> Result<(), CodegenError>;

    /// Assembles the artifact and resets the per-run state.
    fn finish(&mut self) -> String;
}
