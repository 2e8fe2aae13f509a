//! Record (struct) rendering.

use super::fields::FieldCode;
use crate::config::CodegenConfig;

/// An emitted struct together with its `validate()` routine.
#[derive(Debug, Clone)]
pub struct Record {
    /// Type identifier.
    pub name: String,
    /// Documentation text.
    pub doc: Option<String>,
    /// Serialized as its single field.
    pub transparent: bool,
    /// Fields in declaration order.
    pub fields: Vec<FieldCode>,
}

/// Renders documentation as `///` lines.
pub(crate) fn doc_lines(doc: Option<&str>) -> Vec<String> {
    doc.map(|d| d.lines().map(|l| format!("/// {}", l.trim())).collect())
        .unwrap_or_default()
}

/// Indents every non-empty line of `text` by `depth` levels.
pub(crate) fn indent_block(text: &str, depth: usize) -> String {
    let pad = "    ".repeat(depth);
    let mut out = String::with_capacity(text.len() + text.lines().count() * pad.len());
    for line in text.lines() {
        if !line.is_empty() {
            out.push_str(&pad);
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            transparent: false,
            fields: Vec::new(),
        }
    }

    /// Sets the documentation.
    #[must_use]
    pub fn doc(mut self, doc: Option<&str>) -> Self {
        self.doc = doc.map(str::to_string);
        self
    }

    /// Marks the record as a transparent newtype.
    #[must_use]
    pub fn transparent(mut self) -> Self {
        self.transparent = true;
        self
    }

    /// Appends a field, renaming its identifier if already taken.
    pub fn push(&mut self, mut field: FieldCode) {
        if self.fields.iter().any(|f| f.ident == field.ident) {
            let base = field.ident.clone();
            let mut n = 2;
            while self.fields.iter().any(|f| f.ident == format!("{base}_{n}")) {
                n += 1;
            }
            field.ident = format!("{base}_{n}");
        }
        self.fields.push(field);
    }

    /// Returns true if any field carries a pattern check.
    #[must_use]
    pub fn uses_regex(&self) -> bool {
        self.fields.iter().any(FieldCode::uses_regex)
    }

    /// Returns the field declarations as one block of text.
    #[must_use]
    pub fn field_text(&self, serde: bool) -> String {
        self.fields
            .iter()
            .flat_map(|f| f.declaration(serde))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Renders the struct and its `impl` block.
    #[must_use]
    pub fn render(&self, config: &CodegenConfig) -> String {
        let mut output = String::new();

        for line in doc_lines(self.doc.as_deref()) {
            output.push_str(&line);
            output.push('\n');
        }
        if let Some(derive) = config.derive_attribute() {
            output.push_str(&derive);
            output.push('\n');
        }
        if config.serde && self.transparent {
            output.push_str("#[serde(transparent)]\n");
        }

        if self.fields.is_empty() {
            output.push_str(&format!("pub struct {} {{}}\n\n", self.name));
        } else {
            output.push_str(&format!("pub struct {} {{\n", self.name));
            let fields = self.field_text(config.serde && !self.transparent);
            output.push_str(&indent_block(&fields, 1));
            output.push_str("}\n\n");
        }

        let checks: Vec<String> = self.fields.iter().flat_map(FieldCode::validation).collect();

        output.push_str(&format!("impl {} {{\n", self.name));
        output.push_str("    /// Checks every field against its schema facets.\n");
        output.push_str("    pub fn validate(&self) -> Result<(), ValidationError> {\n");
        output.push_str(&indent_block(&checks.join("\n"), 2));
        output.push_str("        Ok(())\n");
        output.push_str("    }\n");
        output.push_str("}\n");

        output
    }
}
