#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # optreg
//!
//! A library for declarative registration of validated configuration
//! options.
//!
//! Option types are declared once (each with a name, an optional
//! configuration-section override, and a validation-timing flag) and
//! composed into a single registration procedure. Applying the procedure to
//! a configuration source and a service container binds every option type
//! to its section; each binding is deserialized and validated either
//! eagerly at startup (fail fast) or lazily on first access.
//!
//! ## Core Types
//!
//! - [`OptionDeclaration`]: a declared option type with its section and
//!   validation timing
//! - [`RegistryBuilder`] and [`RegistrationProcedure`]: the registry and
//!   the composed procedure it builds
//! - [`ConfigSource`] and [`ServiceContainer`]: the configuration and
//!   container pair the procedure executes against
//! - [`Validate`]: schema validation implemented by option types
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use optreg::{ConfigSource, RegistryBuilder, ServiceContainer, Validate, ValidationError};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct DatabaseOptions {
//!     url: String,
//!     pool_size: u32,
//! }
//!
//! impl Validate for DatabaseOptions {
//!     fn validate(&self) -> Result<(), ValidationError> {
//!         optreg::non_empty("url", &self.url)?;
//!         optreg::in_range("pool_size", self.pool_size, 1, 64)
//!     }
//! }
//!
//! // Compose a registration procedure from the declared option types.
//! let procedure = RegistryBuilder::new().declare::<DatabaseOptions>().build();
//!
//! // Apply it to a configuration source and a service container.
//! let source = ConfigSource::from_yaml_str(
//!     "DatabaseOptions:\n  url: postgres://db\n  pool_size: 8\n",
//! )
//! .unwrap();
//! let mut container = ServiceContainer::new();
//! procedure.apply(&source, &mut container);
//!
//! // Fail fast before first use.
//! container.validate_startup().unwrap();
//!
//! let db = container.get::<DatabaseOptions>().unwrap();
//! assert_eq!(db.pool_size, 8);
//! ```

pub mod container;
pub mod declaration;
pub mod error;
pub mod manifest;
pub mod registry;
pub mod source;
pub mod validate;

// Re-export key types at crate root for convenience
pub use container::ServiceContainer;
pub use declaration::{DeclarationError, OptionDeclaration, ValidationTiming};
pub use error::{Error, Result};
pub use manifest::Manifest;
pub use registry::{Binding, RegistrationProcedure, RegistrationReport, RegistryBuilder};
pub use source::ConfigSource;
pub use validate::{in_range, non_empty, Validate, ValidationError};
