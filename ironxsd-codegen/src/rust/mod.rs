//! Rust backend.
//!
//! Lowers every declaration into a struct or enum with a `validate()`
//! routine. The emitted artifact is self-contained apart from `regex` (only
//! when a pattern check is emitted) and `serde` (only when enabled).

pub mod enums;
pub mod fields;
pub mod groups;
pub mod naming;
pub mod records;
pub mod types;

pub use enums::EnumCode;
pub use fields::{FieldCode, SerdeField, ValidationCode};
pub use records::Record;

use crate::backend::Backend;
use crate::config::CodegenConfig;
use crate::error::CodegenError;
use crate::state::GeneratorState;
use ironxsd_schema::{
    Attribute, AttributeGroup, ComplexType, Element, Group, ResolvedType, Restriction,
    SimpleType, TypeResolver, strip_ns_prefix,
};
use records::indent_block;

/// Header line of every artifact.
pub const HEADER: &str = "// Code generated by ironxsd. DO NOT EDIT.";

/// Error type declared at the top of every artifact.
pub const VALIDATION_ERROR: &str = r#"/// Error returned by generated `validate()` routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Numeric code in `1001..=1005`.
    pub code: u32,
    /// Description naming the field and the violated facet.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}
"#;

/// Rust code generation backend.
#[derive(Debug, Clone)]
pub struct RustBackend {
    config: CodegenConfig,
    state: GeneratorState,
}

impl RustBackend {
    /// Creates a new backend.
    #[must_use]
    pub fn new(config: CodegenConfig) -> Self {
        Self {
            config,
            state: GeneratorState::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Returns the state of the current run.
    #[must_use]
    pub fn state(&self) -> &GeneratorState {
        &self.state
    }

    /// Serialized name of a schema component.
    fn rename(raw: &str) -> String {
        match strip_ns_prefix(raw) {
            "value" => "$value".to_string(),
            local => local.to_string(),
        }
    }

    /// Builds a field of a resolved type, with `own` facets taking
    /// precedence over inherited ones.
    fn resolved_field(&self, raw: &str, resolved: &ResolvedType, own: &Restriction) -> FieldCode {
        FieldCode::new(self.field_name(raw), self.field_type(&resolved.name))
            .restriction(resolved.facets_under(own))
    }

    fn emit_record(&mut self, key: &str, record: &Record) {
        self.state.uses_regex |= record.uses_regex();
        self.state
            .remember(key, record.field_text(self.config.serde));
        self.state.push_definition(&record.render(&self.config));
        tracing::debug!("emitted struct {} for '{}'", record.name, key);
    }

    fn emit_enum(&mut self, key: &str, code: &EnumCode) {
        let variants = code
            .variants()
            .into_iter()
            .map(|(variant, _)| variant)
            .collect::<Vec<_>>()
            .join(",\n");
        self.state.remember(key, variants);
        self.state.push_definition(&code.render(&self.config));
        tracing::debug!("emitted enum {} for '{}'", code.name, key);
    }

    fn render_body(&self, state: &GeneratorState) -> String {
        let mut body = String::new();
        if state.uses_regex {
            body.push_str("use regex::Regex;\n");
        }
        if self.config.serde {
            body.push_str("use serde::{Deserialize, Serialize};\n");
        }
        if !body.is_empty() {
            body.push('\n');
        }
        body.push_str(VALIDATION_ERROR);
        if !state.field.is_empty() {
            body.push('\n');
            body.push_str(&state.field);
        }
        body
    }
}

impl Backend for RustBackend {
    fn extension(&self) -> &'static str {
        "rs"
    }

    fn field_name(&self, raw: &str) -> String {
        naming::field_name(raw)
    }

    fn struct_name(&mut self, raw: &str, unique: bool) -> String {
        let ident = naming::struct_ident(raw);
        if unique {
            self.state.unique_name(&ident)
        } else {
            ident
        }
    }

    fn field_type(&self, name: &str) -> String {
        if naming::is_builtin(name) {
            return name.to_string();
        }
        let ident = naming::struct_ident(name);
        if ident.is_empty() {
            "char".to_string()
        } else {
            ident
        }
    }

    fn on_simple_type(
        &mut self,
        resolver: &TypeResolver<'_>,
        decl: &SimpleType,
    ) -> Result<(), CodegenError> {
        self.emit_simple_type(resolver, decl)
    }

    fn on_complex_type(
        &mut self,
        resolver: &TypeResolver<'_>,
        decl: &ComplexType,
    ) -> Result<(), CodegenError> {
        self.emit_complex_type(resolver, decl)
    }

    fn on_element(
        &mut self,
        resolver: &TypeResolver<'_>,
        decl: &Element,
    ) -> Result<(), CodegenError> {
        self.emit_element(resolver, decl)
    }

    fn on_attribute(
        &mut self,
        resolver: &TypeResolver<'_>,
        decl: &Attribute,
    ) -> Result<(), CodegenError> {
        self.emit_attribute(resolver, decl)
    }

    fn on_group(&mut self, resolver: &TypeResolver<'_>, decl: &Group) -> Result<(), CodegenError> {
        self.emit_group(resolver, decl)
    }

    fn on_attribute_group(
        &mut self,
        resolver: &TypeResolver<'_>,
        decl: &AttributeGroup,
    ) -> Result<(), CodegenError> {
        self.emit_attribute_group(resolver, decl)
    }

    fn finish(&mut self) -> String {
        let state = self.state.reset();
        let body = self.render_body(&state);

        let mut output = String::new();
        output.push_str(HEADER);
        output.push('\n');
        if let Some(source) = &self.config.source_name {
            output.push_str(&format!("// Source: {source}\n"));
        }
        output.push('\n');

        match &self.config.package {
            Some(package) => {
                output.push_str(&format!("pub mod {} {{\n", naming::field_name(package)));
                output.push_str(&indent_block(&body, 1));
                output.push_str("}\n");
            }
            None => output.push_str(&body),
        }

        tracing::debug!("{} definitions emitted", state.struct_ast.len());
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Generator;
    use ironxsd_schema::parse_schema;

    const ORDERS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" xmlns:tns="urn:orders">
    <xs:simpleType name="Sku">
        <xs:restriction base="xs:string">
            <xs:pattern value="[A-Z]{3}-[0-9]{4}"/>
        </xs:restriction>
    </xs:simpleType>
    <xs:complexType name="Line">
        <xs:sequence>
            <xs:element name="sku" type="tns:Sku"/>
            <xs:element name="qty" type="xs:int"/>
        </xs:sequence>
    </xs:complexType>
</xs:schema>"#;

    fn run(config: CodegenConfig) -> String {
        let tree = parse_schema(ORDERS).expect("Failed to parse");
        let mut backend = RustBackend::new(config.clone());
        Generator::new(&tree, &config)
            .generate(&mut backend)
            .expect("Failed to generate")
    }

    #[test]
    fn test_header_and_support_block() {
        let out = run(CodegenConfig::new().with_source_name("orders.xsd"));
        assert!(out.starts_with(
            "// Code generated by ironxsd. DO NOT EDIT.\n// Source: orders.xsd\n\nuse regex::Regex;\n\n"
        ));
        assert!(out.contains("pub struct ValidationError {"));
        assert!(!out.contains("use serde"));
    }

    #[test]
    fn test_regex_import_only_when_needed() {
        let tree = parse_schema(
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
<xs:simpleType name="Count"><xs:restriction base="xs:int"/></xs:simpleType>
</xs:schema>"#,
        )
        .expect("Failed to parse");
        let config = CodegenConfig::default();
        let mut backend = RustBackend::new(config.clone());
        let out = Generator::new(&tree, &config)
            .generate(&mut backend)
            .expect("Failed to generate");
        assert!(!out.contains("use regex::Regex;"));
    }

    #[test]
    fn test_package_wrapper_indents_body() {
        let out = run(CodegenConfig::new().with_package("orders").with_serde(true));
        assert!(out.contains("\npub mod orders {\n    use regex::Regex;\n    use serde::{Deserialize, Serialize};\n"));
        assert!(out.contains("\n    pub struct Line {\n        #[serde(rename = \"sku\")]\n        pub sku: String,\n"));
        assert!(out.contains("let sku_pattern = Regex::new("));
        assert!(out.ends_with("    }\n}\n"));
    }

    #[test]
    fn test_runs_are_identical() {
        let tree = parse_schema(ORDERS).expect("Failed to parse");
        let config = CodegenConfig::default();
        let mut backend = RustBackend::new(config.clone());
        let generator = Generator::new(&tree, &config);

        let first = generator.generate(&mut backend).expect("first run");
        let second = generator.generate(&mut backend).expect("second run");
        assert_eq!(first, second);
        assert!(backend.state().struct_ast.is_empty());
    }

    #[test]
    fn test_struct_name_counter() {
        let mut backend = RustBackend::new(CodegenConfig::default());
        assert_eq!(backend.struct_name("line-item", true), "Lineitem");
        assert_eq!(backend.struct_name("line_item", true), "Lineitem2");
        assert_eq!(backend.struct_name("line_item", false), "Lineitem");
        assert_eq!(backend.field_type("Vec<u8>"), "Vec<u8>");
        assert_eq!(backend.field_type("tns:line"), "TnsLine");
        assert_eq!(backend.field_type(""), "char");
    }

    #[test]
    fn test_rename() {
        assert_eq!(RustBackend::rename("tns:sku"), "sku");
        assert_eq!(RustBackend::rename("value"), "$value");
    }
}
