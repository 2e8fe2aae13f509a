//! Group, attribute group and top-level element/attribute generation.

use super::RustBackend;
use super::fields::{FieldCode, SerdeField};
use super::records::Record;
use crate::backend::Backend;
use crate::error::CodegenError;
use ironxsd_schema::{Attribute, AttributeGroup, Element, Group, TypeResolver, strip_ns_prefix};

impl RustBackend {
    /// Builds the field embedding a group or attribute group reference.
    ///
    /// Single occurrences are flattened into the enclosing record.
    pub(super) fn group_field(
        &self,
        resolver: &TypeResolver<'_>,
        target: &str,
        plural: bool,
        optional: bool,
    ) -> Result<FieldCode, CodegenError> {
        let name = strip_ns_prefix(target);
        let type_name = resolver.resolve_name(target)?;
        let serde = if plural {
            SerdeField::Rename(name.to_string())
        } else {
            SerdeField::Flatten
        };
        Ok(FieldCode::new(self.field_name(name), self.field_type(&type_name))
            .plural(plural)
            .optional(optional)
            .serde(serde))
    }

    /// Builds the field for a nested element.
    pub(super) fn element_field(
        &self,
        resolver: &TypeResolver<'_>,
        element: &Element,
    ) -> Result<FieldCode, CodegenError> {
        let resolved = resolver.resolve(&element.type_name)?;
        Ok(self
            .resolved_field(&element.name, &resolved, &element.restriction)
            .plural(element.plural)
            .optional(element.optional)
            .doc(element.doc.as_deref())
            .serde(SerdeField::Rename(RustBackend::rename(&element.name))))
    }

    pub(super) fn emit_group(
        &mut self,
        resolver: &TypeResolver<'_>,
        v: &Group,
    ) -> Result<(), CodegenError> {
        if v.name.is_empty() || self.state.is_emitted(&v.name) {
            return Ok(());
        }

        let mut record = Record::new(self.struct_name(&v.name, true)).doc(v.doc.as_deref());
        for element in &v.elements {
            record.push(self.element_field(resolver, element)?);
        }
        for group in &v.groups {
            record.push(self.group_field(resolver, group.target(), group.plural, group.optional)?);
        }
        self.emit_record(&v.name, &record);
        Ok(())
    }

    pub(super) fn emit_attribute_group(
        &mut self,
        resolver: &TypeResolver<'_>,
        v: &AttributeGroup,
    ) -> Result<(), CodegenError> {
        if v.name.is_empty() || self.state.is_emitted(&v.name) {
            return Ok(());
        }

        let mut record = Record::new(self.struct_name(&v.name, true)).doc(v.doc.as_deref());
        for attribute in &v.attributes {
            record.push(self.attribute_field(resolver, attribute)?);
        }
        for group in &v.attribute_groups {
            record.push(self.group_field(resolver, group.target(), false, false)?);
        }
        self.emit_record(&v.name, &record);
        Ok(())
    }

    /// Builds the field for an attribute.
    pub(super) fn attribute_field(
        &self,
        resolver: &TypeResolver<'_>,
        attribute: &Attribute,
    ) -> Result<FieldCode, CodegenError> {
        let resolved = resolver.resolve(&attribute.type_name)?;
        Ok(self
            .resolved_field(&attribute.name, &resolved, &attribute.restriction)
            .plural(attribute.plural)
            .optional(attribute.optional)
            .doc(attribute.doc.as_deref())
            .serde(SerdeField::Rename(RustBackend::rename(&attribute.name))))
    }

    /// Emits a top-level element as a one-field record.
    pub(super) fn emit_element(
        &mut self,
        resolver: &TypeResolver<'_>,
        v: &Element,
    ) -> Result<(), CodegenError> {
        if v.name.is_empty() || self.state.is_emitted(&v.name) {
            return Ok(());
        }

        let mut field = self.element_field(resolver, v)?;
        field.doc = None;
        let mut record = Record::new(self.struct_name(&v.name, true)).doc(v.doc.as_deref());
        record.push(field);
        self.emit_record(&v.name, &record);
        Ok(())
    }

    /// Emits a top-level attribute as a one-field record.
    pub(super) fn emit_attribute(
        &mut self,
        resolver: &TypeResolver<'_>,
        v: &Attribute,
    ) -> Result<(), CodegenError> {
        if v.name.is_empty() || self.state.is_emitted(&v.name) {
            return Ok(());
        }

        let mut field = self.attribute_field(resolver, v)?;
        field.doc = None;
        let mut record = Record::new(self.struct_name(&v.name, true)).doc(v.doc.as_deref());
        record.push(field);
        self.emit_record(&v.name, &record);
        Ok(())
    }
}
