//! Integration tests for manifest-driven declaration overrides.
//!
//! This suite verifies loading manifests from files and applying their
//! overrides through the full registration pipeline.

mod common;

use std::fs;
use std::path::{Path, PathBuf};

use common::{sample_source, DatabaseOptions, HttpOptions};
use optreg::{ConfigSource, Manifest, OptionDeclaration, RegistryBuilder, ServiceContainer};
use tempfile::TempDir;

/// Helper to write a manifest file into a temporary directory.
fn write_manifest(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("optreg.yaml");
    fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_manifest_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(
        dir.path(),
        r"
declarations:
  - name: App.Config.Database
    section_name: Primary
  - name: Http
    skip_startup_validation: true
",
    );

    let manifest = Manifest::load(&path).unwrap();
    assert_eq!(manifest.len(), 2);
    assert_eq!(manifest.declarations[0].section_name(), Some("Primary"));
    assert!(manifest.declarations[1].skip_startup_validation());
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Manifest::load(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, optreg::Error::Io(_)));
}

#[test]
fn test_load_unparseable_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(dir.path(), "declarations: [unclosed");
    let err = Manifest::load(&path).unwrap_err();
    assert!(matches!(err, optreg::Error::Parse(_)));
}

// =============================================================================
// Overrides through the pipeline
// =============================================================================

#[test]
fn test_manifest_redirects_binding_to_new_section() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(
        dir.path(),
        r"
declarations:
  - name: App.Config.Database
    section_name: Replica
",
    );
    let manifest = Manifest::load(&path).unwrap();

    let procedure = RegistryBuilder::new()
        .declare_with::<DatabaseOptions>(OptionDeclaration::new("App.Config.Database").unwrap())
        .apply_manifest(&manifest)
        .build();

    assert_eq!(procedure.bindings()[0].section(), "Replica");

    let source = ConfigSource::from_yaml_str(
        r"
Replica:
  url: postgres://replica
  pool_size: 4
",
    )
    .unwrap();
    let mut container = ServiceContainer::new();
    procedure.apply(&source, &mut container);
    container.validate_startup().unwrap();

    assert_eq!(
        container.get::<DatabaseOptions>().unwrap().url,
        "postgres://replica"
    );
}

#[test]
fn test_manifest_defers_startup_validation() {
    let manifest = Manifest::from_yaml_str(
        r"
declarations:
  - name: App.Config.Database
    skip_startup_validation: true
",
    )
    .unwrap();

    let procedure = RegistryBuilder::new()
        .declare_with::<DatabaseOptions>(OptionDeclaration::new("App.Config.Database").unwrap())
        .apply_manifest(&manifest)
        .build();

    // The Database section is missing, but the deferred binding no longer
    // fails startup validation.
    let mut container = ServiceContainer::new();
    procedure.apply(&ConfigSource::empty(), &mut container);
    container.validate_startup().unwrap();

    assert!(container
        .get::<DatabaseOptions>()
        .unwrap_err()
        .is_missing_section());
}

#[test]
fn test_manifest_unknown_and_malformed_entries_do_not_abort() {
    let manifest = Manifest::from_yaml_str(
        r#"
declarations:
  - name: ""
  - name: NoSuchOptions
  - name: Http
    section_name: Http
"#,
    )
    .unwrap();

    let procedure = RegistryBuilder::new()
        .declare_with::<HttpOptions>(OptionDeclaration::new("Http").unwrap())
        .apply_manifest(&manifest)
        .build();

    // The valid entry still applied; the bad ones only produced warnings.
    assert_eq!(procedure.len(), 1);
    assert_eq!(procedure.warnings().len(), 2);

    let mut container = ServiceContainer::new();
    procedure.apply(&sample_source(), &mut container);
    container.validate_startup().unwrap();
    assert_eq!(container.get::<HttpOptions>().unwrap().listen, "0.0.0.0:8080");
}

#[test]
fn test_empty_manifest_changes_nothing() {
    let manifest = Manifest::from_yaml_str("declarations: []\n").unwrap();

    let procedure = RegistryBuilder::new()
        .declare_with::<DatabaseOptions>(OptionDeclaration::new("App.Config.Database").unwrap())
        .apply_manifest(&manifest)
        .build();

    assert_eq!(procedure.len(), 1);
    assert!(procedure.warnings().is_empty());
    assert_eq!(procedure.bindings()[0].section(), "Database");
}
