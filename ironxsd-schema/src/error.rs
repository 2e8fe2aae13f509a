//! Error types for schema reading and type resolution.

use thiserror::Error;

/// Error type for schema reading operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed character or entity reference in an attribute value.
    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// Invalid attribute value.
    #[error("invalid value '{value}' for attribute '{attribute}' on element '{element}'")]
    InvalidAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Invalid value.
        value: String,
    },

    /// A numeric or length facet whose literal could not be parsed.
    #[error("invalid literal '{value}' for facet '{facet}'")]
    InvalidFacet {
        /// Facet name.
        facet: String,
        /// Offending literal.
        value: String,
    },

    /// A pattern facet that is not a valid regular expression.
    #[error("invalid pattern '{pattern}' in declaration '{declaration}': {source}")]
    InvalidPattern {
        /// Name of the declaration carrying the facet.
        declaration: String,
        /// Pattern as written in the schema.
        pattern: String,
        /// Regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// Type resolution failed while finalizing a declaration.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Error type for type resolution over a ProtoTree.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Circular simple-type restriction chain.
    #[error("circular type reference detected: {path}")]
    CircularReference {
        /// Chain of names visited, joined with `->`.
        path: String,
    },
}

impl ParseError {
    /// Creates an invalid attribute error.
    pub fn invalid_attr(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates an invalid facet error.
    pub fn invalid_facet(facet: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidFacet {
            facet: facet.into(),
            value: value.into(),
        }
    }
}

impl SchemaError {
    /// Creates a circular reference error from the visited chain.
    pub fn circular<S: AsRef<str>>(chain: &[S]) -> Self {
        let path = chain.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" -> ");
        Self::CircularReference { path }
    }
}
