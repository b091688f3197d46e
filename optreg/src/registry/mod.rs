//! Options registry.
//!
//! This module provides the registry builder and the registration procedure
//! it produces:
//!
//! - [`RegistryBuilder`] collects typed option declarations, applies
//!   manifest overrides, and normalizes the set (malformed declarations are
//!   skipped, duplicates collapse to the first occurrence).
//! - [`RegistrationProcedure`] is the composed result: an ordered,
//!   inspectable sequence of bindings that can be applied to a
//!   configuration source and a service container.
//!
//! # Examples
//!
//! ```
//! use optreg::{ConfigSource, RegistryBuilder, ServiceContainer, Validate, ValidationError};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct HttpOptions {
//!     listen: String,
//! }
//!
//! impl Validate for HttpOptions {
//!     fn validate(&self) -> Result<(), ValidationError> {
//!         optreg::non_empty("listen", &self.listen)
//!     }
//! }
//!
//! let procedure = RegistryBuilder::new().declare::<HttpOptions>().build();
//!
//! let source = ConfigSource::from_yaml_str("HttpOptions:\n  listen: 0.0.0.0:8080\n").unwrap();
//! let mut container = ServiceContainer::new();
//! procedure.apply(&source, &mut container);
//! container.validate_startup().unwrap();
//!
//! let http = container.get::<HttpOptions>().unwrap();
//! assert_eq!(http.listen, "0.0.0.0:8080");
//! ```

pub mod builder;
pub mod procedure;

// Re-export key types at module root
pub use builder::RegistryBuilder;
pub use procedure::{Binding, RegistrationProcedure, RegistrationReport};
