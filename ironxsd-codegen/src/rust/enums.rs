//! Enumeration code generation.

use super::naming::variant_name;
use super::records::doc_lines;
use crate::config::CodegenConfig;

/// A string enumeration emitted as a Rust `enum`.
#[derive(Debug, Clone)]
pub struct EnumCode {
    /// Type identifier.
    pub name: String,
    /// Documentation text.
    pub doc: Option<String>,
    /// Schema literals in declaration order.
    pub literals: Vec<String>,
}

impl EnumCode {
    /// Creates a new enumeration.
    #[must_use]
    pub fn new(name: impl Into<String>, literals: &[String]) -> Self {
        Self {
            name: name.into(),
            doc: None,
            literals: literals.to_vec(),
        }
    }

    /// Sets the documentation.
    #[must_use]
    pub fn doc(mut self, doc: Option<&str>) -> Self {
        self.doc = doc.map(str::to_string);
        self
    }

    /// Returns `(variant, literal)` pairs with unique variant names.
    #[must_use]
    pub fn variants(&self) -> Vec<(String, &str)> {
        let mut variants: Vec<(String, &str)> = Vec::with_capacity(self.literals.len());
        for literal in &self.literals {
            let base = variant_name(literal);
            let mut variant = base.clone();
            let mut n = 2;
            while variants.iter().any(|(v, _)| *v == variant) {
                variant = format!("{base}_{n}");
                n += 1;
            }
            variants.push((variant, literal.as_str()));
        }
        variants
    }

    /// Renders the enum, `as_str()` and `validate()`.
    #[must_use]
    pub fn render(&self, config: &CodegenConfig) -> String {
        let mut output = String::new();
        let variants = self.variants();

        for line in doc_lines(self.doc.as_deref()) {
            output.push_str(&line);
            output.push('\n');
        }
        if let Some(derive) = config.derive_attribute() {
            output.push_str(&derive);
            output.push('\n');
        }
        output.push_str("#[allow(non_camel_case_types)]\n");
        output.push_str(&format!("pub enum {} {{\n", self.name));
        for (i, (variant, literal)) in variants.iter().enumerate() {
            if i == 0 && config.derive_default {
                output.push_str("    #[default]\n");
            }
            if config.serde {
                output.push_str(&format!("    #[serde(rename = {literal:?})]\n"));
            }
            output.push_str(&format!("    {variant},\n"));
        }
        output.push_str("}\n\n");

        output.push_str(&format!("impl {} {{\n", self.name));
        output.push_str("    /// Returns the literal as written in the schema.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub fn as_str(&self) -> &'static str {\n");
        output.push_str("        match self {\n");
        for (variant, literal) in &variants {
            output.push_str(&format!("            Self::{variant} => {literal:?},\n"));
        }
        output.push_str("        }\n");
        output.push_str("    }\n\n");
        output.push_str("    /// Enumerations are valid by construction.\n");
        output.push_str("    pub fn validate(&self) -> Result<(), ValidationError> {\n");
        output.push_str("        Ok(())\n");
        output.push_str("    }\n");
        output.push_str("}\n");

        output
    }
}
