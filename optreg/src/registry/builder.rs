//! Registry builder.
//!
//! This module implements the options registry: an ordered, transient set
//! of typed declarations that is normalized and composed into a
//! [`RegistrationProcedure`].

use std::any::{Any, TypeId};
use std::collections::HashSet;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_yaml::Value;

use crate::declaration::OptionDeclaration;
use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::registry::procedure::{Binder, Binding, RegistrationProcedure};
use crate::validate::Validate;

/// Builds a [`RegistrationProcedure`] from a set of typed declarations.
///
/// Declarations are collected in order. [`build`](Self::build) normalizes
/// the set deterministically: malformed declarations are skipped with a
/// warning, and duplicates (by name or by Rust type) collapse to the first
/// occurrence. An empty set builds a valid no-op procedure.
///
/// # Examples
///
/// ```
/// use optreg::{OptionDeclaration, RegistryBuilder, Validate, ValidationError};
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
/// #[derive(Deserialize)]
/// struct HttpOptions {
///     listen: String,
/// }
///
/// impl Validate for HttpOptions {
///     fn validate(&self) -> Result<(), ValidationError> {
///         optreg::non_empty("listen", &self.listen)
///     }
/// }
///
/// let procedure = RegistryBuilder::new()
///     .declare::<DatabaseOptions>()
///     .declare_with::<HttpOptions>(
///         OptionDeclaration::new("app.Http")
///             .unwrap()
///             .defer_startup_validation(),
///     )
///     .build();
///
/// assert_eq!(procedure.len(), 2);
/// ```
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<Binding>,
    warnings: Vec<String>,
}

impl RegistryBuilder {
    /// Creates an empty registry builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares option type `T` with defaults: named after the type, bound
    /// to the section matching the bare type name, validated at startup.
    #[must_use]
    pub fn declare<T>(self) -> Self
    where
        T: DeserializeOwned + Validate + Send + Sync + 'static,
    {
        self.declare_with::<T>(OptionDeclaration::for_type::<T>())
    }

    /// Declares option type `T` under an explicit declaration.
    ///
    /// The declaration supplies the name, the optional section override,
    /// and the validation timing; `T` supplies the deserialization and
    /// validation behavior.
    #[must_use]
    pub fn declare_with<T>(mut self, declaration: OptionDeclaration) -> Self
    where
        T: DeserializeOwned + Validate + Send + Sync + 'static,
    {
        let binder: Binder = Arc::new(
            |section: &str, value: Option<&Value>| -> Result<Arc<dyn Any + Send + Sync>> {
                let value = value.ok_or_else(|| Error::MissingSection {
                    section: section.to_string(),
                })?;
                let options: T =
                    serde_yaml::from_value(value.clone()).map_err(|source| Error::Binding {
                        section: section.to_string(),
                        source,
                    })?;
                options.validate()?;
                Ok(Arc::new(options))
            },
        );

        self.entries.push(Binding {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            declaration,
            binder,
        });
        self
    }

    /// Applies manifest overrides to the declared set.
    ///
    /// Each manifest entry replaces the section override and validation
    /// timing of the declared option type with the matching name. Entries
    /// naming nothing declared, malformed entries, and repeated entries for
    /// the same name are skipped with a warning; they never abort the
    /// batch. The first entry for a name wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use optreg::{Manifest, OptionDeclaration, RegistryBuilder, Validate, ValidationError};
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
    /// let manifest = Manifest::from_yaml_str(
    ///     "declarations:\n  - name: Example\n    section_name: Custom\n",
    /// )
    /// .unwrap();
    ///
    /// let procedure = RegistryBuilder::new()
    ///     .declare_with::<Example>(OptionDeclaration::new("Example").unwrap())
    ///     .apply_manifest(&manifest)
    ///     .build();
    ///
    /// assert_eq!(procedure.bindings()[0].section(), "Custom");
    /// ```
    #[must_use]
    pub fn apply_manifest(mut self, manifest: &Manifest) -> Self {
        let mut overridden: HashSet<&str> = HashSet::new();

        for declaration in &manifest.declarations {
            if let Err(err) = declaration.validate() {
                log::warn!("manifest: skipped invalid declaration: {err}");
                self.warnings
                    .push(format!("manifest: skipped invalid declaration: {err}"));
                continue;
            }

            if !overridden.insert(declaration.name()) {
                log::warn!(
                    "manifest: repeated entry for '{}' ignored (first entry wins)",
                    declaration.name()
                );
                self.warnings.push(format!(
                    "manifest: repeated entry for '{}' ignored (first entry wins)",
                    declaration.name()
                ));
                continue;
            }

            match self
                .entries
                .iter_mut()
                .find(|entry| entry.declaration.name() == declaration.name())
            {
                Some(entry) => {
                    entry.declaration = declaration.clone();
                }
                None => {
                    log::warn!(
                        "manifest: no declared option type named '{}'",
                        declaration.name()
                    );
                    self.warnings.push(format!(
                        "manifest: no declared option type named '{}'",
                        declaration.name()
                    ));
                }
            }
        }

        self
    }

    /// The number of collected declarations, before normalization.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks whether no declarations have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Normalizes the declared set and composes the registration procedure.
    ///
    /// Normalization walks the declarations in input order: malformed
    /// declarations (possible only for serde-sourced ones, which bypass the
    /// validating constructor) are skipped, and duplicates by name or by
    /// Rust type collapse to the first occurrence. Every skip is recorded
    /// as a warning on the procedure and logged.
    ///
    /// The result is deterministic: the same declarations in the same
    /// order always compose the same procedure.
    #[must_use]
    pub fn build(self) -> RegistrationProcedure {
        let mut warnings = self.warnings;
        let mut seen_names: HashSet<String> = HashSet::new();
        let mut seen_types: HashSet<TypeId> = HashSet::new();
        let mut bindings = Vec::with_capacity(self.entries.len());

        for entry in self.entries {
            if let Err(err) = entry.declaration.validate() {
                log::warn!("skipped invalid declaration: {err}");
                warnings.push(format!("skipped invalid declaration: {err}"));
                continue;
            }

            if !seen_names.insert(entry.declaration.name().to_string()) {
                log::warn!(
                    "duplicate declaration '{}' ignored (first occurrence wins)",
                    entry.declaration.name()
                );
                warnings.push(format!(
                    "duplicate declaration '{}' ignored (first occurrence wins)",
                    entry.declaration.name()
                ));
                continue;
            }

            if !seen_types.insert(entry.type_id) {
                log::warn!(
                    "duplicate declaration for type {} ignored (first occurrence wins)",
                    entry.type_name
                );
                warnings.push(format!(
                    "duplicate declaration for type {} ignored (first occurrence wins)",
                    entry.type_name
                ));
                continue;
            }

            bindings.push(entry);
        }

        RegistrationProcedure::new(bindings, warnings)
    }
}
