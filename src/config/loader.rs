//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::RunnerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `network.rpc_url`.
pub const RPC_URL_ENV_VAR: &str = "SUI_RPC_URL";

/// Error type for configuration loading. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    /// Signing key missing or malformed.
    #[error("Signing key error: {0}")]
    SigningKey(String),

    /// RPC endpoint rejected by the client.
    #[error("Endpoint error: {0}")]
    Endpoint(String),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from a TOML file, apply environment overrides and
/// validate the result.
pub fn load_config(path: &Path) -> Result<RunnerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    finish(toml::from_str(&content)?)
}

/// Load from `path` if given, otherwise use defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<RunnerConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => finish(RunnerConfig::default()),
    }
}

fn finish(mut config: RunnerConfig) -> Result<RunnerConfig, ConfigError> {
    if let Ok(url) = std::env::var(RPC_URL_ENV_VAR) {
        if !url.trim().is_empty() {
            config.network.rpc_url = Some(url.trim().to_string());
        }
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(
        network = %config.network.name,
        endpoint = %config.network.endpoint(),
        gas_budget = config.fees.gas_budget,
        "Configuration loaded"
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [network]
            name = "localnet"

            [contracts]
            marketplace = "0xabc"
            "#
        )
        .unwrap();

        let config = load_or_default(Some(file.path())).unwrap();
        assert_eq!(config.network.name, "localnet");
        assert_eq!(config.contracts.marketplace, "0xabc");
    }

    #[test]
    fn test_load_config_reports_validation_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[fees]\ngas_budget = 0").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation failed: fees.gas_budget: must be greater than 0"
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[fees]\ngas_budget = \"lots\"").unwrap();
        assert!(matches!(load_config(file.path()), Err(ConfigError::Parse(_))));
    }
}
