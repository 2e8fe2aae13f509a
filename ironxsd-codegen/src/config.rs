//! Code generation settings.

use std::path::{Path, PathBuf};

use ironxsd_schema::ReaderOptions;

/// Settings consumed by backends and the artifact writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenConfig {
    /// Module wrapper name; no wrapper when `None`.
    pub package: Option<String>,
    /// Schema file name recorded in the header.
    pub source_name: Option<String>,
    /// Derives applied to every emitted definition.
    pub derives: Vec<String>,
    /// Adds `Serialize`/`Deserialize` derives and field attributes.
    pub serde: bool,
    /// Adds a `Default` derive.
    pub derive_default: bool,
    /// Directory the artifact is written to.
    pub output_dir: PathBuf,
    /// Artifact file name without extension.
    pub file_stem: String,
    /// Reads malformed numeric facet literals as zero instead of failing.
    pub lenient_facets: bool,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            package: None,
            source_name: None,
            derives: vec![
                "Debug".to_string(),
                "Clone".to_string(),
                "PartialEq".to_string(),
            ],
            serde: false,
            derive_default: false,
            output_dir: PathBuf::from("."),
            file_stem: "schema".to_string(),
            lenient_facets: false,
        }
    }
}

impl CodegenConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the output in `pub mod <package>`.
    #[must_use]
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Records the schema file name in the header.
    #[must_use]
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// Replaces the derive list.
    #[must_use]
    pub fn with_derives<I, S>(mut self, derives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.derives = derives.into_iter().map(Into::into).collect();
        self
    }

    /// Enables or disables serde support.
    #[must_use]
    pub fn with_serde(mut self, enabled: bool) -> Self {
        self.serde = enabled;
        self
    }

    /// Enables or disables the `Default` derive.
    #[must_use]
    pub fn with_derive_default(mut self, enabled: bool) -> Self {
        self.derive_default = enabled;
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Sets the artifact file stem.
    #[must_use]
    pub fn with_file_stem(mut self, stem: impl Into<String>) -> Self {
        self.file_stem = stem.into();
        self
    }

    /// Enables or disables lenient reading of numeric facet literals.
    #[must_use]
    pub fn with_lenient_facets(mut self, enabled: bool) -> Self {
        self.lenient_facets = enabled;
        self
    }

    /// Returns the schema reader options these settings imply.
    #[must_use]
    pub fn reader_options(&self) -> ReaderOptions {
        ReaderOptions::new().lenient_facets(self.lenient_facets)
    }

    /// Returns `<output_dir>/<file_stem>.<extension>`.
    #[must_use]
    pub fn output_path(&self, extension: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.file_stem, extension))
    }

    /// Returns the full derive list, including the optional derives.
    #[must_use]
    pub fn derive_list(&self) -> Vec<&str> {
        let mut derives: Vec<&str> = self.derives.iter().map(String::as_str).collect();
        if self.derive_default && !derives.contains(&"Default") {
            derives.push("Default");
        }
        if self.serde {
            for name in ["Serialize", "Deserialize"] {
                if !derives.contains(&name) {
                    derives.push(name);
                }
            }
        }
        derives
    }

    /// Returns the `#[derive(...)]` line, or `None` when nothing is derived.
    #[must_use]
    pub fn derive_attribute(&self) -> Option<String> {
        let derives = self.derive_list();
        if derives.is_empty() {
            None
        } else {
            Some(format!("#[derive({})]", derives.join(", ")))
        }
    }
}
