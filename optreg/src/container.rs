//! Service container for registered option bindings.
//!
//! This module provides [`ServiceContainer`], the runtime target of a
//! registration procedure: an insertion-ordered map of named, typed
//! configuration bindings. Bindings are materialized (deserialized and
//! validated) either eagerly during [`ServiceContainer::validate_startup`]
//! or lazily on first [`ServiceContainer::get`], according to their
//! declared validation timing.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use serde_yaml::Value;

use crate::declaration::ValidationTiming;
use crate::error::{Error, Result};
use crate::registry::procedure::{Binder, Binding};

/// One registered binding with its snapshotted section value.
struct RegisteredOption {
    name: String,
    section: String,
    timing: ValidationTiming,
    binder: Binder,
    section_value: Option<Value>,
    cell: OnceLock<Arc<dyn Any + Send + Sync>>,
}

impl RegisteredOption {
    /// Deserializes and validates the binding, caching the result.
    ///
    /// A failed materialization leaves the cell empty, so the same error
    /// resurfaces on every subsequent attempt.
    fn materialize(&self) -> Result<Arc<dyn Any + Send + Sync>> {
        if let Some(options) = self.cell.get() {
            return Ok(options.clone());
        }

        let options = (self.binder)(&self.section, self.section_value.as_ref())?;
        log::debug!(
            "materialized options '{}' from section '{}'",
            self.name,
            self.section
        );
        Ok(self.cell.get_or_init(|| options).clone())
    }
}

/// An insertion-ordered container of named, typed configuration bindings.
///
/// The container is the in-crate stand-in for a dependency-injection
/// runtime: a registration procedure registers bindings into it, and
/// consumers retrieve validated option payloads by type.
///
/// # Examples
///
/// ```
/// use optreg::{ConfigSource, RegistryBuilder, ServiceContainer, Validate, ValidationError};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct DatabaseOptions {
///     url: String,
/// }
///
/// impl Validate for DatabaseOptions {
///     fn validate(&self) -> Result<(), ValidationError> {
///         optreg::non_empty("url", &self.url)
///     }
/// }
///
/// let procedure = RegistryBuilder::new().declare::<DatabaseOptions>().build();
/// let source = ConfigSource::from_yaml_str(
///     "DatabaseOptions:\n  url: postgres://db\n",
/// )
/// .unwrap();
///
/// let mut container = ServiceContainer::new();
/// procedure.apply(&source, &mut container);
/// container.validate_startup().unwrap();
///
/// let db = container.get::<DatabaseOptions>().unwrap();
/// assert_eq!(db.url, "postgres://db");
/// ```
#[derive(Default)]
pub struct ServiceContainer {
    entries: HashMap<TypeId, RegisteredOption>,
    order: Vec<TypeId>,
}

impl ServiceContainer {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a binding, snapshotting its configuration section.
    ///
    /// Re-registering the same option type replaces the existing entry
    /// (and its cached payload) without duplicating it; the entry keeps
    /// its original position in the registration order.
    pub(crate) fn register(&mut self, binding: &Binding, section_value: Option<Value>) {
        let entry = RegisteredOption {
            name: binding.name().to_string(),
            section: binding.section().to_string(),
            timing: binding.timing(),
            binder: binding.binder.clone(),
            section_value,
            cell: OnceLock::new(),
        };

        if self.entries.insert(binding.type_id, entry).is_none() {
            self.order.push(binding.type_id);
        }
    }

    /// The number of registered bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Checks whether no bindings are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Checks whether option type `T` is registered.
    #[must_use]
    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// The declared names of all registered bindings, in registration
    /// order.
    #[must_use]
    pub fn registered_names(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id))
            .map(|entry| entry.name.as_str())
            .collect()
    }

    /// Materializes every binding marked for startup validation, in
    /// registration order, failing fast on the first error.
    ///
    /// Bindings that defer validation are left untouched; they are
    /// materialized on first access instead.
    ///
    /// # Errors
    ///
    /// Returns the first binding or validation error encountered:
    /// [`Error::MissingSection`], [`Error::Binding`], or
    /// [`Error::Validation`].
    pub fn validate_startup(&self) -> Result<()> {
        for id in &self.order {
            if let Some(entry) = self.entries.get(id) {
                if entry.timing == ValidationTiming::Startup {
                    entry.materialize()?;
                }
            }
        }
        Ok(())
    }

    /// Retrieves the validated payload for option type `T`.
    ///
    /// Bindings with deferred validation are materialized on their first
    /// access and cached; subsequent calls share the same payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotRegistered`] if `T` was never registered, or
    /// the binding/validation error if materialization fails.
    pub fn get<T: Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        let entry = self
            .entries
            .get(&TypeId::of::<T>())
            .ok_or(Error::NotRegistered {
                type_name: std::any::type_name::<T>(),
            })?;

        let options = entry.materialize()?;
        // Entries are keyed by TypeId, so the downcast cannot fail.
        options.downcast::<T>().map_err(|_| Error::NotRegistered {
            type_name: std::any::type_name::<T>(),
        })
    }
}

impl fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("registered", &self.registered_names())
            .finish()
    }
}
