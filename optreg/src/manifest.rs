//! Declaration manifests.
//!
//! A manifest is a YAML document listing declaration overrides, the
//! file-based counterpart to declaring options in code. Manifests carry the
//! same three fields as [`OptionDeclaration`](crate::OptionDeclaration):
//! name, optional section override, and the startup-validation flag.
//!
//! ```yaml
//! declarations:
//!   - name: app::db::DatabaseOptions
//!     section_name: Primary
//!   - name: app::http::HttpOptions
//!     skip_startup_validation: true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::declaration::OptionDeclaration;
use crate::error::Result;

/// A list of declaration overrides loaded from YAML.
///
/// Manifests are applied to a
/// [`RegistryBuilder`](crate::RegistryBuilder) and adjust already-declared
/// option types by name. Entries are plain [`OptionDeclaration`] values;
/// since deserialization bypasses the validating constructor, the builder
/// re-validates every entry and skips malformed ones.
///
/// # Examples
///
/// ```
/// use optreg::Manifest;
///
/// let manifest = Manifest::from_yaml_str(
///     "declarations:\n  - name: Example\n    section_name: Custom\n",
/// )
/// .unwrap();
/// assert_eq!(manifest.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// The declaration overrides, in document order.
    #[serde(default)]
    pub declarations: Vec<OptionDeclaration>,
}

impl Manifest {
    /// Parses a manifest from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`](crate::Error::Parse) if the text is not a
    /// valid manifest document.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Loads a manifest from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the file cannot be read,
    /// or [`Error::Parse`](crate::Error::Parse) if it cannot be parsed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use optreg::Manifest;
    /// use std::path::Path;
    ///
    /// let manifest = Manifest::load(Path::new("optreg.yaml")).unwrap();
    /// println!("{} declaration overrides", manifest.len());
    /// ```
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// The number of declaration overrides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Checks whether the manifest has no overrides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
