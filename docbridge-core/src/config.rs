//! Configuration consumed by the access layer.
//!
//! The layer consumes, but does not own, three settings supplied by the
//! surrounding process: the connection string, the database name, and an
//! environment indicator gating whether diagnostic logs are emitted.

use std::env;

use crate::error::{AccessError, AccessResult};

/// Deployment environment; gates diagnostic logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Parses an environment name, case-insensitively.
    ///
    /// Anything other than `"production"` is treated as development, matching
    /// the "log unless production" diagnostics policy.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Connection settings for a document store.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection string for the store (e.g. `mongodb://localhost:27017`).
    pub uri: String,
    /// Name of the database to operate on.
    pub database: String,
    /// Deployment environment.
    pub environment: Environment,
}

impl Config {
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            environment: Environment::default(),
        }
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Reads configuration from `DOCBRIDGE_URI`, `DOCBRIDGE_DATABASE` and
    /// `DOCBRIDGE_ENV`. The environment variable is optional and defaults to
    /// development.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Connection`] if a required variable is missing.
    pub fn from_env() -> AccessResult<Self> {
        let uri = env::var("DOCBRIDGE_URI")
            .map_err(|_| AccessError::Connection("DOCBRIDGE_URI is not set".to_string()))?;
        let database = env::var("DOCBRIDGE_DATABASE")
            .map_err(|_| AccessError::Connection("DOCBRIDGE_DATABASE is not set".to_string()))?;
        let environment = env::var("DOCBRIDGE_ENV")
            .map(|value| Environment::parse(&value))
            .unwrap_or_default();

        Ok(Self {
            uri,
            database,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Environment::parse("PRODUCTION"), Environment::Production);
        assert_eq!(Environment::parse("production"), Environment::Production);
        assert_eq!(Environment::parse("Production"), Environment::Production);
    }

    #[test]
    fn anything_else_is_development() {
        for value in ["development", "dev", "staging", "test", ""] {
            assert_eq!(Environment::parse(value), Environment::Development);
        }
    }

    #[test]
    fn default_environment_is_development() {
        let config = Config::new("mongodb://localhost:27017", "app");

        assert!(!config.environment.is_production());
    }
}
