//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, gas budget > 0)
//! - Check that every object ID and coin type is well-formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RunnerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::blockchain::transaction::TypeTag;
use crate::blockchain::types::SuiAddress;
use crate::config::schema::{NetworkConfig, RunnerConfig};

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &RunnerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    validate_network(&config.network, &mut errors);

    if config.fees.gas_budget == 0 {
        errors.push(ValidationError::new("fees.gas_budget", "must be greater than 0"));
    }
    check_type_tag("fees.coin_type", &config.fees.coin_type, &mut errors);

    let contracts = &config.contracts;
    for (field, value) in [
        ("contracts.tokensmith_package", &contracts.tokensmith_package),
        ("contracts.mock_coins_package", &contracts.mock_coins_package),
        ("contracts.usdc_treasury_cap", &contracts.usdc_treasury_cap),
        ("contracts.option_treasury_cap", &contracts.option_treasury_cap),
        ("contracts.marketplace", &contracts.marketplace),
        ("contracts.vault_owner", &contracts.vault_owner),
        ("contracts.asset_coin", &contracts.asset_coin),
    ] {
        if let Err(e) = value.parse::<SuiAddress>() {
            errors.push(ValidationError::new(field, e.to_string()));
        }
    }
    for (field, value) in [
        ("contracts.asset_type", &contracts.asset_type),
        ("contracts.usdc_type", &contracts.usdc_type),
        ("contracts.option_type", &contracts.option_type),
    ] {
        check_type_tag(field, value, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_network(network: &NetworkConfig, errors: &mut Vec<ValidationError>) {
    if network.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "network.rpc_timeout_secs",
            "must be greater than 0",
        ));
    }

    match &network.rpc_url {
        Some(url) => {
            if let Err(e) = url.parse::<url::Url>() {
                errors.push(ValidationError::new(
                    "network.rpc_url",
                    format!("invalid URL '{}': {}", url, e),
                ));
            }
        }
        None if NetworkConfig::fullnode_url(&network.name).is_none() => {
            errors.push(ValidationError::new(
                "network.name",
                format!(
                    "unknown network '{}' (expected mainnet, testnet, devnet or localnet) and no rpc_url given",
                    network.name
                ),
            ));
        }
        None => {}
    }
}

fn check_type_tag(field: &str, value: &str, errors: &mut Vec<ValidationError>) {
    if let Err(e) = value.parse::<TypeTag>() {
        errors.push(ValidationError::new(field, e.to_string()));
    }
}
