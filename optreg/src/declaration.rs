//! Option declarations.
//!
//! This module provides [`OptionDeclaration`], the unit of input to the
//! registry builder: a named option type, an optional configuration-section
//! override, and a validation-timing flag.

use std::fmt;

use serde::{Deserialize, Serialize};

/// When a registered binding is validated.
///
/// # Examples
///
/// ```
/// use optreg::ValidationTiming;
///
/// assert_eq!(format!("{}", ValidationTiming::Startup), "startup");
/// assert_eq!(format!("{}", ValidationTiming::FirstAccess), "first access");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationTiming {
    /// Eager validation at application startup, before first use (fail fast).
    Startup,
    /// Validation deferred to the first access of the binding.
    FirstAccess,
}

impl fmt::Display for ValidationTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Startup => write!(f, "startup"),
            Self::FirstAccess => write!(f, "first access"),
        }
    }
}

/// A declared option type.
///
/// Declarations carry a name (a fully-qualified type identifier), an
/// optional configuration-section override, and a flag deferring startup
/// validation. The configuration section a declaration binds to is the
/// explicit override if present, otherwise the last segment of the name
/// (segments are delimited by `::` or `.`).
///
/// # Examples
///
/// ```
/// use optreg::OptionDeclaration;
///
/// // Section defaults to the last segment of the name.
/// let decl = OptionDeclaration::new("App.Config.Database").unwrap();
/// assert_eq!(decl.resolved_section(), "Database");
///
/// // An explicit override wins regardless of the name.
/// let decl = OptionDeclaration::new("Example")
///     .unwrap()
///     .with_section("Custom")
///     .defer_startup_validation();
/// assert_eq!(decl.resolved_section(), "Custom");
/// assert!(decl.skip_startup_validation());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionDeclaration {
    name: String,
    #[serde(default)]
    section_name: Option<String>,
    #[serde(default)]
    skip_startup_validation: bool,
}

impl OptionDeclaration {
    /// Creates a declaration with the given name, no section override, and
    /// startup validation enabled.
    ///
    /// The name is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns a [`DeclarationError`] if the name is empty, contains null
    /// bytes, exceeds 255 characters, or begins or ends with a segment
    /// delimiter.
    ///
    /// # Examples
    ///
    /// ```
    /// use optreg::OptionDeclaration;
    ///
    /// assert!(OptionDeclaration::new("app::HttpOptions").is_ok());
    /// assert!(OptionDeclaration::new("").is_err());
    /// assert!(OptionDeclaration::new("app.").is_err());
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self, DeclarationError> {
        let declaration = Self {
            name: name.into().trim().to_string(),
            section_name: None,
            skip_startup_validation: false,
        };
        declaration.validate()?;
        Ok(declaration)
    }

    /// Creates a declaration named after a Rust type.
    ///
    /// The name is the fully-qualified type path, so the default section is
    /// the bare type name.
    ///
    /// # Examples
    ///
    /// ```
    /// use optreg::OptionDeclaration;
    ///
    /// struct HttpOptions;
    ///
    /// let decl = OptionDeclaration::for_type::<HttpOptions>();
    /// assert_eq!(decl.resolved_section(), "HttpOptions");
    /// ```
    #[must_use]
    pub fn for_type<T>() -> Self {
        Self {
            name: std::any::type_name::<T>().to_string(),
            section_name: None,
            skip_startup_validation: false,
        }
    }

    /// Sets an explicit configuration-section override.
    #[must_use]
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section_name = Some(section.into());
        self
    }

    /// Defers validation of this binding to its first access.
    #[must_use]
    pub fn defer_startup_validation(mut self) -> Self {
        self.skip_startup_validation = true;
        self
    }

    /// The declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The explicit section override, if any.
    #[must_use]
    pub fn section_name(&self) -> Option<&str> {
        self.section_name.as_deref()
    }

    /// Whether startup validation is skipped for this declaration.
    #[must_use]
    pub fn skip_startup_validation(&self) -> bool {
        self.skip_startup_validation
    }

    /// The validation timing implied by the declaration.
    #[must_use]
    pub fn timing(&self) -> ValidationTiming {
        if self.skip_startup_validation {
            ValidationTiming::FirstAccess
        } else {
            ValidationTiming::Startup
        }
    }

    /// The configuration section this declaration binds to.
    ///
    /// Returns the explicit override if set, otherwise the last segment of
    /// the name (segments are delimited by `::` or `.`).
    ///
    /// # Examples
    ///
    /// ```
    /// use optreg::OptionDeclaration;
    ///
    /// let decl = OptionDeclaration::new("app::db::DatabaseOptions").unwrap();
    /// assert_eq!(decl.resolved_section(), "DatabaseOptions");
    /// ```
    #[must_use]
    pub fn resolved_section(&self) -> &str {
        match &self.section_name {
            Some(section) => section,
            None => last_segment(&self.name),
        }
    }

    /// Validates the declaration.
    ///
    /// Declarations constructed through [`OptionDeclaration::new`] are
    /// always valid; this re-check exists for declarations deserialized
    /// from manifests, which bypass the constructor.
    ///
    /// # Errors
    ///
    /// Returns a [`DeclarationError`] describing the first violated rule.
    pub fn validate(&self) -> Result<(), DeclarationError> {
        let trimmed = self.name.trim();

        if trimmed.is_empty() {
            return Err(self.invalid("name cannot be empty or only whitespace"));
        }
        if trimmed.contains('\0') {
            return Err(self.invalid("name cannot contain null bytes"));
        }
        if trimmed.len() > 255 {
            return Err(self.invalid("name cannot exceed 255 characters"));
        }
        if trimmed.starts_with('.') || trimmed.starts_with("::") {
            return Err(self.invalid("name cannot begin with a segment delimiter"));
        }
        if trimmed.ends_with('.') || trimmed.ends_with("::") {
            return Err(self.invalid("name cannot end with a segment delimiter"));
        }

        if let Some(section) = &self.section_name {
            if section.trim().is_empty() {
                return Err(self.invalid("section override cannot be empty"));
            }
            if section.contains('\0') {
                return Err(self.invalid("section override cannot contain null bytes"));
            }
        }

        Ok(())
    }

    fn invalid(&self, reason: &str) -> DeclarationError {
        DeclarationError {
            name: self.name.clone(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for OptionDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Returns the last `::`- or `.`-delimited segment of a name.
fn last_segment(name: &str) -> &str {
    let tail = name.rsplit("::").next().unwrap_or(name);
    tail.rsplit('.').next().unwrap_or(tail)
}

/// Error produced when an option declaration is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationError {
    /// The offending declaration name.
    pub name: String,
    /// The reason the declaration is invalid.
    pub reason: String,
}

impl fmt::Display for DeclarationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid declaration '{}': {}", self.name, self.reason)
    }
}

impl std::error::Error for DeclarationError {}
