//! Common test utilities for integration tests.
//!
//! This module provides the option types and configuration fixtures shared
//! by the integration suites.

use optreg::{in_range, non_empty, ConfigSource, Validate, ValidationError};
use serde::Deserialize;

/// Database option type used across the integration suites.
#[allow(dead_code)]
#[derive(Debug, Deserialize, PartialEq)]
pub struct DatabaseOptions {
    pub url: String,
    pub pool_size: u32,
}

impl Validate for DatabaseOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("url", &self.url)?;
        in_range("pool_size", self.pool_size, 1, 64)
    }
}

/// HTTP option type used across the integration suites.
#[allow(dead_code)]
#[derive(Debug, Deserialize, PartialEq)]
pub struct HttpOptions {
    pub listen: String,
    #[serde(default)]
    pub tls: bool,
}

impl Validate for HttpOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("listen", &self.listen)
    }
}

/// Option type whose validation always fails, for surfacing-timing tests.
#[allow(dead_code)]
#[derive(Debug, Deserialize)]
pub struct BrokenOptions {
    #[allow(dead_code)]
    pub limit: u32,
}

impl Validate for BrokenOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        Err(ValidationError::new("limit", "always rejected"))
    }
}

/// A configuration source containing valid `Database` and `Http` sections
/// plus a `Broken` section.
#[allow(dead_code)]
pub fn sample_source() -> ConfigSource {
    ConfigSource::from_yaml_str(
        r"
Database:
  url: postgres://db
  pool_size: 8
Http:
  listen: 0.0.0.0:8080
  tls: true
Broken:
  limit: 1
",
    )
    .unwrap()
}

/// The same configuration as [`sample_source`], expressed as JSON.
#[allow(dead_code)]
pub fn sample_json_source() -> ConfigSource {
    ConfigSource::from_json_str(
        r#"{
            "Database": {"url": "postgres://db", "pool_size": 8},
            "Http": {"listen": "0.0.0.0:8080", "tls": true},
            "Broken": {"limit": 1}
        }"#,
    )
    .unwrap()
}
