//! Error types for the optreg library.
//!
//! This module provides the error hierarchy for declaration, binding, and
//! validation failures, using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Result type alias for operations that may fail with an optreg error.
///
/// # Examples
///
/// ```
/// use optreg::{Error, Result};
///
/// fn example_operation() -> Result<u16> {
///     Ok(8080)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the optreg library.
///
/// This enum encompasses all error conditions that can occur while declaring
/// option types, building a registration procedure, and materializing
/// bindings from a configuration source.
#[derive(Debug, Error)]
pub enum Error {
    /// An option declaration was malformed.
    #[error("invalid declaration '{name}': {reason}")]
    InvalidDeclaration {
        /// The declared name (possibly empty).
        name: String,
        /// The reason the declaration is invalid.
        reason: String,
    },

    /// An option type failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The named configuration section does not exist in the source.
    #[error("configuration section not found: {section}")]
    MissingSection {
        /// The resolved section name that was looked up.
        section: String,
    },

    /// A configuration section could not be deserialized into its option type.
    #[error("failed to bind section '{section}': {source}")]
    Binding {
        /// The section that was being bound.
        section: String,
        /// The underlying deserialization error.
        #[source]
        source: serde_yaml::Error,
    },

    /// Configuration or manifest text could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// JSON configuration text could not be parsed.
    #[error("failed to parse JSON configuration: {0}")]
    ParseJson(#[from] serde_json::Error),

    /// An I/O error occurred while loading a manifest file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No binding is registered for the requested option type.
    #[error("no options registered for type {type_name}")]
    NotRegistered {
        /// The Rust type name that was requested.
        type_name: &'static str,
    },
}

// Additional conversions for better ergonomics

impl From<crate::declaration::DeclarationError> for Error {
    fn from(err: crate::declaration::DeclarationError) -> Self {
        Self::InvalidDeclaration {
            name: err.name,
            reason: err.reason,
        }
    }
}

impl From<crate::validate::ValidationError> for Error {
    fn from(err: crate::validate::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Check if error indicates a validation failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use optreg::Error;
    ///
    /// let err = Error::Validation {
    ///     field: "url".to_string(),
    ///     message: "must be non-empty".to_string(),
    /// };
    /// assert!(err.is_validation());
    /// ```
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if error indicates a missing configuration section.
    ///
    /// # Examples
    ///
    /// ```
    /// use optreg::Error;
    ///
    /// let err = Error::MissingSection { section: "Database".to_string() };
    /// assert!(err.is_missing_section());
    /// ```
    #[must_use]
    pub fn is_missing_section(&self) -> bool {
        matches!(self, Self::MissingSection { .. })
    }

    /// Check if error indicates a lookup for an unregistered option type.
    ///
    /// # Examples
    ///
    /// ```
    /// use optreg::Error;
    ///
    /// let err = Error::NotRegistered { type_name: "app::HttpOptions" };
    /// assert!(err.is_not_registered());
    /// ```
    #[must_use]
    pub fn is_not_registered(&self) -> bool {
        matches!(self, Self::NotRegistered { .. })
    }
}
