//! Field declarations and their validation code.

use super::naming;
use ironxsd_schema::Restriction;

/// Error codes reported by generated `validate()` routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ValidationCode {
    /// Value shorter than `minLength`.
    MinLength = 1001,
    /// Value longer than `maxLength`.
    MaxLength = 1002,
    /// Value below `minInclusive`.
    MinInclusive = 1003,
    /// Value above `maxInclusive`.
    MaxInclusive = 1004,
    /// Value not matching `pattern`.
    Pattern = 1005,
}

impl ValidationCode {
    /// Returns the numeric code.
    #[must_use]
    pub const fn code(self) -> u32 {
        self as u32
    }
}

/// Serde treatment of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerdeField {
    /// `#[serde(rename = "...")]`.
    Rename(String),
    /// `#[serde(flatten)]`.
    Flatten,
    /// No attribute.
    Plain,
}

/// One field of an emitted record.
#[derive(Debug, Clone)]
pub struct FieldCode {
    /// Field identifier.
    pub ident: String,
    /// Unwrapped field type.
    pub item_type: String,
    /// Wrapped in `Vec`.
    pub plural: bool,
    /// Wrapped in `Option`.
    pub optional: bool,
    /// Facets checked by `validate()`.
    pub restriction: Restriction,
    /// Documentation copied onto the field.
    pub doc: Option<String>,
    /// Serde treatment.
    pub serde: SerdeField,
}

/// How the checked value is reached inside `validate()`.
#[derive(Debug, Clone, Copy)]
enum Place<'a> {
    Field(&'a str),
    Item,
    Value,
}

impl Place<'_> {
    /// Expression for method calls (`.len()`, `.as_str()`).
    fn expr(&self) -> String {
        match self {
            Self::Field(ident) => format!("self.{ident}"),
            Self::Item => "item".to_string(),
            Self::Value => "value".to_string(),
        }
    }

    /// Expression of the value cast to `f64`.
    fn as_f64(&self) -> String {
        match self {
            Self::Field(ident) => format!("(self.{ident} as f64)"),
            Self::Item => "(*item as f64)".to_string(),
            Self::Value => "(*value as f64)".to_string(),
        }
    }
}

/// Formats a float as a Rust expression.
fn float_literal(value: f64) -> String {
    if value.is_nan() {
        "f64::NAN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "f64::INFINITY".to_string()
        } else {
            "f64::NEG_INFINITY".to_string()
        }
    } else {
        format!("{value:?}")
    }
}

fn failure(code: ValidationCode, message: &str) -> String {
    format!(
        "    return Err(ValidationError::new({}, {:?}));",
        code.code(),
        message
    )
}

fn indent(lines: Vec<String>, depth: usize) -> Vec<String> {
    let pad = "    ".repeat(depth);
    lines
        .into_iter()
        .map(|line| {
            if line.is_empty() {
                line
            } else {
                format!("{pad}{line}")
            }
        })
        .collect()
}

impl FieldCode {
    /// Creates a required, single-valued field of `item_type`.
    #[must_use]
    pub fn new(ident: impl Into<String>, item_type: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            item_type: item_type.into(),
            plural: false,
            optional: false,
            restriction: Restriction::new(),
            doc: None,
            serde: SerdeField::Plain,
        }
    }

    /// Sets the `Vec` wrapper.
    #[must_use]
    pub fn plural(mut self, plural: bool) -> Self {
        self.plural = plural;
        self
    }

    /// Sets the `Option` wrapper.
    #[must_use]
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Sets the checked facets.
    #[must_use]
    pub fn restriction(mut self, restriction: Restriction) -> Self {
        self.restriction = restriction;
        self
    }

    /// Sets the field documentation.
    #[must_use]
    pub fn doc(mut self, doc: Option<&str>) -> Self {
        self.doc = doc.map(str::to_string);
        self
    }

    /// Sets the serde treatment.
    #[must_use]
    pub fn serde(mut self, serde: SerdeField) -> Self {
        self.serde = serde;
        self
    }

    /// Returns true if the field type is emitted verbatim.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        naming::is_builtin(&self.item_type)
    }

    /// Returns the wrapped field type.
    #[must_use]
    pub fn rust_type(&self) -> String {
        let mut ty = self.item_type.clone();
        if self.plural {
            ty = format!("Vec<{ty}>");
        }
        if self.optional {
            ty = format!("Option<{ty}>");
        }
        ty
    }

    /// Returns true if the field carries a pattern check.
    #[must_use]
    pub fn uses_regex(&self) -> bool {
        self.item_type == "String" && self.restriction.pattern.is_some()
    }

    fn pattern_var(&self) -> String {
        format!("{}_pattern", self.ident)
    }

    /// Returns the declaration lines, unindented.
    #[must_use]
    pub fn declaration(&self, serde: bool) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(doc) = &self.doc {
            lines.extend(doc.lines().map(|line| format!("/// {}", line.trim())));
        }
        if serde {
            match &self.serde {
                SerdeField::Rename(name) if self.optional => lines.push(format!(
                    "#[serde(rename = {name:?}, skip_serializing_if = \"Option::is_none\")]"
                )),
                SerdeField::Rename(name) => lines.push(format!("#[serde(rename = {name:?})]")),
                SerdeField::Flatten => lines.push("#[serde(flatten)]".to_string()),
                SerdeField::Plain if self.optional => {
                    lines.push("#[serde(skip_serializing_if = \"Option::is_none\")]".to_string());
                }
                SerdeField::Plain => {}
            }
        }
        lines.push(format!("pub {}: {},", self.ident, self.rust_type()));
        lines
    }

    /// Facet checks against one value.
    fn checks(&self, place: Place<'_>) -> Vec<String> {
        let r = &self.restriction;
        let ty = self.item_type.as_str();
        let name = &self.ident;
        let mut lines = Vec::new();

        let length = if ty == "String" {
            Some(format!("{}.chars().count()", place.expr()))
        } else if naming::is_vec(ty) {
            Some(format!("{}.len()", place.expr()))
        } else {
            None
        };

        if let Some(length) = &length {
            if let Some(min) = r.min_length {
                lines.push(format!("if {length} < {min} {{"));
                lines.push(failure(
                    ValidationCode::MinLength,
                    &format!("{name} is shorter than the minimum length of {min}"),
                ));
                lines.push("}".to_string());
            }
            if let Some(max) = r.max_length {
                lines.push(format!("if {length} > {max} {{"));
                lines.push(failure(
                    ValidationCode::MaxLength,
                    &format!("{name} exceeds the maximum length of {max}"),
                ));
                lines.push("}".to_string());
            }
        }

        if naming::is_numeric(ty) {
            if let Some(min) = r.min_inclusive {
                lines.push(format!("if {} < {} {{", place.as_f64(), float_literal(min)));
                lines.push(failure(
                    ValidationCode::MinInclusive,
                    &format!("{name} is less than the minimum value of {min}"),
                ));
                lines.push("}".to_string());
            }
            if let Some(max) = r.max_inclusive {
                lines.push(format!("if {} > {} {{", place.as_f64(), float_literal(max)));
                lines.push(failure(
                    ValidationCode::MaxInclusive,
                    &format!("{name} exceeds the maximum value of {max}"),
                ));
                lines.push("}".to_string());
            }
        }

        if let (true, Some(pattern)) = (self.uses_regex(), &r.pattern) {
            lines.push(format!(
                "if !{}.is_match({}.as_str()) {{",
                self.pattern_var(),
                place.expr()
            ));
            lines.push(failure(
                ValidationCode::Pattern,
                &format!("{name} does not match the pattern {}", pattern.as_str()),
            ));
            lines.push("}".to_string());
        }

        lines
    }

    /// Wraps per-value statements in the iteration the field shape needs.
    fn over_values(&self, body: impl Fn(Place<'_>) -> Vec<String>) -> Vec<String> {
        let ident = &self.ident;
        match (self.plural, self.optional) {
            (false, false) => body(Place::Field(ident)),
            (true, false) => {
                let mut lines = vec![format!("for item in &self.{ident} {{")];
                lines.extend(indent(body(Place::Item), 1));
                lines.push("}".to_string());
                lines
            }
            (false, true) => {
                let mut lines = vec![format!("if let Some(value) = &self.{ident} {{")];
                lines.extend(indent(body(Place::Value), 1));
                lines.push("}".to_string());
                lines
            }
            (true, true) => {
                let mut lines = vec![
                    format!("if let Some(items) = &self.{ident} {{"),
                    "    for item in items {".to_string(),
                ];
                lines.extend(indent(body(Place::Item), 2));
                lines.push("    }".to_string());
                lines.push("}".to_string());
                lines
            }
        }
    }

    /// Returns the statements this field adds to `validate()`, unindented.
    ///
    /// Built-in types get facet checks in code order 1001 to 1005; other
    /// types delegate to their own `validate()`.
    #[must_use]
    pub fn validation(&self) -> Vec<String> {
        if !self.is_builtin() {
            return self.over_values(|place| vec![format!("{}.validate()?;", place.expr())]);
        }
        if self.checks(Place::Item).is_empty() {
            return Vec::new();
        }

        let mut lines = Vec::new();
        if let (true, Some(pattern)) = (self.uses_regex(), &self.restriction.pattern) {
            lines.push(format!(
                "let {} = Regex::new({:?}).map_err(|e| ValidationError::new({}, e.to_string()))?;",
                self.pattern_var(),
                pattern.as_str(),
                ValidationCode::Pattern.code()
            ));
        }
        lines.extend(self.over_values(|place| self.checks(place)));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironxsd_schema::Pattern;

    fn bounded() -> Restriction {
        Restriction {
            min_inclusive: Some(5.0),
            max_inclusive: Some(10.0),
            ..Restriction::default()
        }
    }

    #[test]
    fn test_validation_codes() {
        assert_eq!(ValidationCode::MinLength.code(), 1001);
        assert_eq!(ValidationCode::Pattern.code(), 1005);
    }

    #[test]
    fn test_rust_type_wrapping() {
        let field = FieldCode::new("tag", "String").plural(true).optional(true);
        assert_eq!(field.rust_type(), "Option<Vec<String>>");
        assert_eq!(FieldCode::new("id", "i64").rust_type(), "i64");
    }

    #[test]
    fn test_numeric_checks_on_plain_field() {
        let field = FieldCode::new("age", "i32").restriction(bounded());
        let lines = field.validation();
        assert_eq!(lines[0], "if (self.age as f64) < 5.0 {");
        assert!(lines[1].contains("ValidationError::new(1003"));
        assert_eq!(lines[3], "if (self.age as f64) > 10.0 {");
        assert!(lines[4].contains("ValidationError::new(1004"));
    }

    #[test]
    fn test_numeric_facets_ignored_on_strings() {
        let field = FieldCode::new("name", "String").restriction(bounded());
        assert!(field.validation().is_empty());
    }

    #[test]
    fn test_length_checks() {
        let restriction = Restriction {
            min_length: Some(3),
            max_length: Some(8),
            ..Restriction::default()
        };
        let field = FieldCode::new("code", "String").restriction(restriction.clone());
        let lines = field.validation();
        assert_eq!(lines[0], "if self.code.chars().count() < 3 {");
        assert_eq!(lines[3], "if self.code.chars().count() > 8 {");

        let bytes = FieldCode::new("blob", "Vec<u8>").restriction(restriction);
        assert_eq!(bytes.validation()[0], "if self.blob.len() < 3 {");
    }

    #[test]
    fn test_plural_and_optional_iterate() {
        let plural = FieldCode::new("score", "u8").plural(true).restriction(bounded());
        let lines = plural.validation();
        assert_eq!(lines[0], "for item in &self.score {");
        assert_eq!(lines[1], "    if (*item as f64) < 5.0 {");
        assert_eq!(lines.last().map(String::as_str), Some("}"));

        let optional = FieldCode::new("score", "u8").optional(true).restriction(bounded());
        let lines = optional.validation();
        assert_eq!(lines[0], "if let Some(value) = &self.score {");
        assert_eq!(lines[1], "    if (*value as f64) < 5.0 {");

        let both = FieldCode::new("score", "u8")
            .plural(true)
            .optional(true)
            .restriction(bounded());
        let lines = both.validation();
        assert_eq!(lines[0], "if let Some(items) = &self.score {");
        assert_eq!(lines[1], "    for item in items {");
        assert_eq!(lines[2], "        if (*item as f64) < 5.0 {");
    }

    #[test]
    fn test_pattern_compiled_once() {
        let restriction = Restriction {
            pattern: Some(Pattern::new("[A-Z]{2}").expect("valid")),
            ..Restriction::default()
        };
        let field = FieldCode::new("country", "String")
            .plural(true)
            .restriction(restriction);
        assert!(field.uses_regex());

        let lines = field.validation();
        assert!(lines[0].starts_with("let country_pattern = Regex::new(\"^(?:[A-Z]{2})$\")"));
        assert_eq!(lines[1], "for item in &self.country {");
        assert_eq!(lines[2], "    if !country_pattern.is_match(item.as_str()) {");
        assert!(lines[3].contains("ValidationError::new(1005"));
    }

    #[test]
    fn test_pattern_variable_keeps_identifier_prefix() {
        let restriction = Restriction {
            pattern: Some(Pattern::new("[a-z]+").expect("valid")),
            ..Restriction::default()
        };
        let field = FieldCode::new(naming::field_name("3d"), "String").restriction(restriction);
        let lines = field.validation();
        assert!(lines[0].starts_with("let _3d_pattern = Regex::new("));
        assert_eq!(lines[1], "if !_3d_pattern.is_match(self._3d.as_str()) {");
    }

    #[test]
    fn test_delegated_validation() {
        let field = FieldCode::new("address", "Address");
        assert_eq!(field.validation(), vec!["self.address.validate()?;"]);

        let lines = FieldCode::new("line", "Line").plural(true).validation();
        assert_eq!(lines, vec!["for item in &self.line {", "    item.validate()?;", "}"]);
    }

    #[test]
    fn test_declaration_with_serde() {
        let field = FieldCode::new("note", "String")
            .optional(true)
            .doc(Some("Free text."))
            .serde(SerdeField::Rename("note".to_string()));
        assert_eq!(
            field.declaration(true),
            vec![
                "/// Free text.".to_string(),
                "#[serde(rename = \"note\", skip_serializing_if = \"Option::is_none\")]".to_string(),
                "pub note: Option<String>,".to_string(),
            ]
        );
        assert_eq!(field.declaration(false).len(), 2);
    }

    #[test]
    fn test_float_literal() {
        assert_eq!(float_literal(5.0), "5.0");
        assert_eq!(float_literal(0.25), "0.25");
        assert_eq!(float_literal(f64::INFINITY), "f64::INFINITY");
    }
}
