//! Simple and complex type code generation.

use super::RustBackend;
use super::enums::EnumCode;
use super::fields::{FieldCode, SerdeField};
use super::naming;
use super::records::Record;
use crate::backend::Backend;
use crate::error::CodegenError;
use ironxsd_schema::{ComplexType, SimpleType, TypeResolver};

impl RustBackend {
    /// Emits a simple type along the first matching path: list, union,
    /// string enumeration, plain restriction.
    pub(super) fn emit_simple_type(
        &mut self,
        resolver: &TypeResolver<'_>,
        v: &SimpleType,
    ) -> Result<(), CodegenError> {
        if v.name.is_empty() {
            tracing::warn!("skipping unnamed simple type");
            return Ok(());
        }
        if self.state.is_emitted(&v.name) {
            tracing::debug!("simple type '{}' already emitted", v.name);
            return Ok(());
        }

        if v.list {
            let item = resolver.resolve(&v.base)?;
            let field = self
                .resolved_field(&v.name, &item, &v.restriction)
                .plural(true)
                .serde(SerdeField::Rename(RustBackend::rename(&v.name)));
            let mut record = Record::new(self.struct_name(&v.name, true)).doc(v.doc.as_deref());
            record.push(field);
            self.emit_record(&v.name, &record);
            return Ok(());
        }

        if v.union && v.has_members() {
            let mut fields = Vec::with_capacity(v.member_types.len());
            for (member, type_name) in &v.member_types {
                let type_name = if type_name.is_empty() {
                    resolver.resolve_name(member)?
                } else {
                    type_name.clone()
                };
                let resolved = resolver.resolve(&type_name)?;
                let mut own = v.member_restrictions.get(member).cloned().unwrap_or_default();
                own.inherit(&v.restriction);
                fields.push(
                    self.resolved_field(member, &resolved, &own)
                        .optional(true)
                        .serde(SerdeField::Rename(RustBackend::rename(member))),
                );
            }
            let mut record = Record::new(self.struct_name(&v.name, true)).doc(v.doc.as_deref());
            for field in fields {
                record.push(field);
            }
            self.emit_record(&v.name, &record);
            return Ok(());
        }

        if !v.restriction.enumerations.is_empty() && resolver.resolve_name(&v.base)? == "String" {
            let code = EnumCode::new(self.struct_name(&v.name, true), &v.restriction.enumerations)
                .doc(v.doc.as_deref());
            self.emit_enum(&v.name, &code);
            return Ok(());
        }

        let base = resolver.resolve(&v.base)?;
        let field = self.resolved_field(&v.name, &base, &v.restriction);
        let mut record = Record::new(self.struct_name(&v.name, true))
            .doc(v.doc.as_deref())
            .transparent();
        record.push(field);
        self.emit_record(&v.name, &record);
        Ok(())
    }

    /// Emits a complex type.
    ///
    /// The field text is built before the memo check, so a repeated name
    /// costs the work but emits nothing.
    pub(super) fn emit_complex_type(
        &mut self,
        resolver: &TypeResolver<'_>,
        v: &ComplexType,
    ) -> Result<(), CodegenError> {
        if v.name.is_empty() {
            tracing::warn!("skipping unnamed complex type");
            return Ok(());
        }

        let mut fields = Vec::new();
        for group in &v.attribute_groups {
            fields.push(self.group_field(resolver, group.target(), false, false)?);
        }
        for attribute in &v.attributes {
            let resolved = resolver.resolve(&attribute.type_name)?;
            fields.push(
                self.resolved_field(&attribute.name, &resolved, &attribute.restriction)
                    .plural(attribute.plural)
                    .optional(attribute.optional)
                    .doc(attribute.doc.as_deref())
                    .serde(SerdeField::Rename(RustBackend::rename(&attribute.name))),
            );
        }
        for group in &v.groups {
            fields.push(self.group_field(resolver, group.target(), group.plural, group.optional)?);
        }
        for element in &v.elements {
            fields.push(self.element_field(resolver, element)?);
        }
        if let Some(base) = v.base() {
            let resolved = resolver.resolve(base)?;
            if naming::is_builtin(&resolved.name) {
                fields.push(
                    FieldCode::new("value", resolved.name.as_str())
                        .restriction(resolved.restriction)
                        .serde(SerdeField::Rename("$value".to_string())),
                );
            } else {
                fields.push(
                    FieldCode::new(self.field_name(&resolved.name), self.field_type(&resolved.name))
                        .serde(SerdeField::Flatten),
                );
            }
        }

        if self.state.is_emitted(&v.name) {
            tracing::debug!("complex type '{}' already emitted, discarding", v.name);
            return Ok(());
        }

        let mut record = Record::new(self.struct_name(&v.name, true)).doc(v.doc.as_deref());
        for field in fields {
            record.push(field);
        }
        self.emit_record(&v.name, &record);
        Ok(())
    }
}
