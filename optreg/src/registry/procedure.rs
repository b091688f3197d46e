//! Registration procedures.
//!
//! This module defines the composed registration procedure produced by the
//! registry builder: an ordered sequence of bindings that can be inspected,
//! previewed, or applied to a configuration source and a service container.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use serde_yaml::Value;

use crate::container::ServiceContainer;
use crate::declaration::{OptionDeclaration, ValidationTiming};
use crate::error::Result;
use crate::source::ConfigSource;

/// Type-erased materializer for one option type.
///
/// Given the resolved section name and the snapshotted section value,
/// deserializes and validates the concrete option type.
pub(crate) type Binder =
    Arc<dyn Fn(&str, Option<&Value>) -> Result<Arc<dyn Any + Send + Sync>> + Send + Sync>;

/// A single named, typed configuration binding within a procedure.
///
/// Bindings pair a declaration with the type-erased materializer for its
/// option type. They are created by the registry builder and consumed by
/// [`RegistrationProcedure::apply`].
#[derive(Clone)]
pub struct Binding {
    pub(crate) type_id: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) declaration: OptionDeclaration,
    pub(crate) binder: Binder,
}

impl Binding {
    /// The declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.declaration.name()
    }

    /// The configuration section this binding reads.
    #[must_use]
    pub fn section(&self) -> &str {
        self.declaration.resolved_section()
    }

    /// When this binding is validated.
    #[must_use]
    pub fn timing(&self) -> ValidationTiming {
        self.declaration.timing()
    }

    /// Returns a human-readable description of this binding.
    #[must_use]
    pub fn description(&self) -> String {
        format!(
            "bind '{}' to section '{}' (validate at {})",
            self.name(),
            self.section(),
            self.timing()
        )
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("name", &self.name())
            .field("section", &self.section())
            .field("timing", &self.timing())
            .finish_non_exhaustive()
    }
}

/// A composed registration procedure.
///
/// Procedures are built once from a declaration set and applied to a
/// (configuration source, service container) pair. Application is ordered,
/// infallible, and idempotent: binding and validation errors surface later,
/// at startup validation or first access, according to each binding's
/// timing, and re-applying a procedure registers the same set of bindings
/// without duplication.
///
/// # Examples
///
/// ```
/// use optreg::RegistryBuilder;
///
/// let procedure = RegistryBuilder::new().build();
/// assert!(procedure.is_empty());
/// assert!(procedure.preview().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct RegistrationProcedure {
    bindings: Vec<Binding>,
    warnings: Vec<String>,
}

impl RegistrationProcedure {
    pub(crate) fn new(bindings: Vec<Binding>, warnings: Vec<String>) -> Self {
        Self { bindings, warnings }
    }

    /// The bindings, in declaration order.
    #[must_use]
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Warnings accumulated while normalizing the declaration set.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// The number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Checks whether the procedure has no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Returns descriptions of the registrations this procedure performs,
    /// without touching a container.
    ///
    /// # Examples
    ///
    /// ```
    /// use optreg::{OptionDeclaration, RegistryBuilder, Validate, ValidationError};
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Example {
    ///     value: u32,
    /// }
    ///
    /// impl Validate for Example {
    ///     fn validate(&self) -> Result<(), ValidationError> {
    ///         Ok(())
    ///     }
    /// }
    ///
    /// let procedure = RegistryBuilder::new()
    ///     .declare_with::<Example>(
    ///         OptionDeclaration::new("Example").unwrap().with_section("Custom"),
    ///     )
    ///     .build();
    ///
    /// let preview = procedure.preview();
    /// assert_eq!(preview.len(), 1);
    /// assert!(preview[0].contains("Custom"));
    /// ```
    #[must_use]
    pub fn preview(&self) -> Vec<String> {
        self.bindings.iter().map(Binding::description).collect()
    }

    /// Applies the procedure: registers every binding, in order, in the
    /// container, snapshotting each binding's configuration section from
    /// the source.
    ///
    /// Application never fails. A missing or malformed section surfaces
    /// later, when the binding is materialized at startup validation or on
    /// first access. Applying the same procedure again replaces the
    /// existing registrations without duplicating them.
    pub fn apply(
        &self,
        source: &ConfigSource,
        container: &mut ServiceContainer,
    ) -> RegistrationReport {
        let mut actions_taken = Vec::with_capacity(self.bindings.len());
        for binding in &self.bindings {
            let section_value = source.section(binding.section()).cloned();
            container.register(binding, section_value);
            actions_taken.push(binding.description());
        }

        RegistrationReport {
            actions_taken,
            warnings: self.warnings.clone(),
        }
    }
}

/// Result of applying a registration procedure.
///
/// Reports what was registered and carries forward any warnings from the
/// build phase.
#[derive(Debug, Clone)]
pub struct RegistrationReport {
    /// Descriptions of the bindings that were registered, in order.
    pub actions_taken: Vec<String>,

    /// Warnings accumulated while the procedure was built.
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryBuilder;
    use crate::validate::{Validate, ValidationError};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Example {
        #[allow(dead_code)]
        value: u32,
    }

    impl Validate for Example {
        fn validate(&self) -> std::result::Result<(), ValidationError> {
            Ok(())
        }
    }

    #[test]
    fn test_empty_procedure() {
        let procedure = RegistryBuilder::new().build();
        assert!(procedure.is_empty());
        assert_eq!(procedure.len(), 0);
        assert!(procedure.warnings().is_empty());
    }

    #[test]
    fn test_empty_procedure_applies_without_effect() {
        let procedure = RegistryBuilder::new().build();
        let source = ConfigSource::empty();
        let mut container = ServiceContainer::new();

        let report = procedure.apply(&source, &mut container);
        assert!(report.actions_taken.is_empty());
        assert!(report.warnings.is_empty());
        assert!(container.is_empty());
    }

    #[test]
    fn test_binding_description() {
        let procedure = RegistryBuilder::new()
            .declare_with::<Example>(
                OptionDeclaration::new("App.Config.Example")
                    .unwrap()
                    .defer_startup_validation(),
            )
            .build();

        let binding = &procedure.bindings()[0];
        let desc = binding.description();
        assert!(desc.contains("App.Config.Example"));
        assert!(desc.contains("'Example'"));
        assert!(desc.contains("first access"));
    }

    #[test]
    fn test_preview_matches_bindings() {
        let procedure = RegistryBuilder::new().declare::<Example>().build();
        assert_eq!(procedure.preview().len(), procedure.len());
    }

    #[test]
    fn test_apply_reports_actions_in_order() {
        #[derive(Debug, Deserialize)]
        struct Other {
            #[allow(dead_code)]
            value: u32,
        }

        impl Validate for Other {
            fn validate(&self) -> std::result::Result<(), ValidationError> {
                Ok(())
            }
        }

        let procedure = RegistryBuilder::new()
            .declare_with::<Example>(OptionDeclaration::new("A").unwrap())
            .declare_with::<Other>(OptionDeclaration::new("B").unwrap())
            .build();

        let source = ConfigSource::empty();
        let mut container = ServiceContainer::new();
        let report = procedure.apply(&source, &mut container);

        assert_eq!(report.actions_taken.len(), 2);
        assert!(report.actions_taken[0].contains("'A'"));
        assert!(report.actions_taken[1].contains("'B'"));
        assert_eq!(container.len(), 2);
    }

    #[test]
    fn test_binding_debug_elides_binder() {
        let procedure = RegistryBuilder::new().declare::<Example>().build();
        let debug = format!("{:?}", procedure.bindings()[0]);
        assert!(debug.contains("Binding"));
        assert!(debug.contains("section"));
    }
}
