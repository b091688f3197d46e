//! Configuration sources.
//!
//! This module provides [`ConfigSource`], the hierarchical configuration
//! tree that registration procedures bind option types against. Sources are
//! constructed from YAML or JSON text (or an in-memory value) and expose
//! named top-level sections.

use serde::de::DeserializeOwned;
use serde_yaml::Value;

use crate::error::{Error, Result};

/// A hierarchical configuration source with named top-level sections.
///
/// # Examples
///
/// ```
/// use optreg::ConfigSource;
///
/// let source = ConfigSource::from_yaml_str(
///     "Database:\n  url: postgres://db\n  pool_size: 8\n",
/// )
/// .unwrap();
///
/// assert!(source.has_section("Database"));
/// assert!(!source.has_section("Http"));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigSource {
    root: Value,
}

impl ConfigSource {
    /// Creates an empty configuration source with no sections.
    ///
    /// # Examples
    ///
    /// ```
    /// use optreg::ConfigSource;
    ///
    /// let source = ConfigSource::empty();
    /// assert!(source.section_names().is_empty());
    /// ```
    #[must_use]
    pub fn empty() -> Self {
        Self {
            root: Value::Mapping(serde_yaml::Mapping::new()),
        }
    }

    /// Parses a configuration source from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the text is not valid YAML.
    ///
    /// # Examples
    ///
    /// ```
    /// use optreg::ConfigSource;
    ///
    /// let source = ConfigSource::from_yaml_str("Http:\n  listen: 0.0.0.0:8080\n").unwrap();
    /// assert!(source.has_section("Http"));
    /// ```
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(text)?;
        Ok(Self::from_value(root))
    }

    /// Parses a configuration source from JSON text.
    ///
    /// The parsed document is converted into the same value model as YAML
    /// sources, so section lookup and binding behave identically.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseJson`] if the text is not valid JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use optreg::ConfigSource;
    ///
    /// let source = ConfigSource::from_json_str(r#"{"Http": {"listen": "0.0.0.0:8080"}}"#)
    ///     .unwrap();
    /// assert!(source.has_section("Http"));
    /// ```
    pub fn from_json_str(text: &str) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        let root = serde_yaml::to_value(json)?;
        Ok(Self::from_value(root))
    }

    /// Wraps an in-memory value as a configuration source.
    ///
    /// Non-mapping roots (scalars, sequences, null) yield a source with no
    /// sections.
    #[must_use]
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Looks up a named top-level section.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.root.get(name)
    }

    /// Checks whether a named top-level section exists.
    #[must_use]
    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Returns the names of all top-level sections.
    ///
    /// # Examples
    ///
    /// ```
    /// use optreg::ConfigSource;
    ///
    /// let source = ConfigSource::from_yaml_str("A: 1\nB: 2\n").unwrap();
    /// assert_eq!(source.section_names(), vec!["A", "B"]);
    /// ```
    #[must_use]
    pub fn section_names(&self) -> Vec<&str> {
        match &self.root {
            Value::Mapping(map) => map.keys().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Deserializes a named section into a typed payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSection`] if the section does not exist, or
    /// [`Error::Binding`] if it cannot be deserialized into `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use optreg::ConfigSource;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Http {
    ///     listen: String,
    /// }
    ///
    /// let source = ConfigSource::from_yaml_str("Http:\n  listen: 0.0.0.0:8080\n").unwrap();
    /// let http: Http = source.deserialize_section("Http").unwrap();
    /// assert_eq!(http.listen, "0.0.0.0:8080");
    /// ```
    pub fn deserialize_section<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let value = self.section(name).ok_or_else(|| Error::MissingSection {
            section: name.to_string(),
        })?;
        serde_yaml::from_value(value.clone()).map_err(|source| Error::Binding {
            section: name.to_string(),
            source,
        })
    }
}

impl Default for ConfigSource {
    fn default() -> Self {
        Self::empty()
    }
}
