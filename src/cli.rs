//! Command-line surface.

use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

use crate::blockchain::client::{LedgerClient, SuiClient};
use crate::blockchain::types::{Balance, GasBudget, Receipt};
use crate::blockchain::wallet::{Signer, Wallet};
use crate::config::loader::{load_or_default, ConfigError};
use crate::config::schema::RunnerConfig;
use crate::config::validation::ValidationError;
use crate::runner::actions::{
    ActionKind, InitVaultAction, MintAction, OptionKind, WriteCallAction, DEFAULT_EXPIRY_MS,
    DEFAULT_MINT_AMOUNT,
};
use crate::runner::error::RunError;
use crate::runner::executor::TransactionRunner;

#[derive(Debug, Parser)]
#[command(name = "tokensmith")]
#[command(about = "Submit tokensmith transactions to a Sui network", long_about = None)]
pub struct Cli {
    /// TOML configuration file (defaults are used when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override fees.gas_budget
    #[arg(long, global = true)]
    pub gas_budget: Option<u64>,

    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Mint mock USDC with the treasury cap
    MintUsdc {
        #[arg(long, default_value_t = DEFAULT_MINT_AMOUNT)]
        amount: u64,
    },
    /// Initialise an option vault on the marketplace
    InitOptionVault {
        #[arg(long, value_enum, default_value_t = OptionKind::Call)]
        option_type: OptionKind,
        /// Expiry relative to now, in milliseconds
        #[arg(long, default_value_t = DEFAULT_EXPIRY_MS)]
        expires_in_ms: u64,
        #[arg(long, default_value_t = 100)]
        price_numerator: u64,
        #[arg(long, default_value_t = 1)]
        price_denominator: u64,
        #[arg(long, default_value_t = 8)]
        asset_decimals: u8,
        #[arg(long, default_value_t = 6)]
        usdc_decimals: u8,
    },
    /// Deposit the asset coin and write a covered call
    WriteCoveredCall,
    /// Show the signer address and its fee coin balance
    Balance,
}

impl Commands {
    /// The transaction this command submits, if any.
    pub fn action(&self) -> Option<ActionKind> {
        match self {
            Commands::MintUsdc { amount } => Some(ActionKind::Mint(MintAction { amount: *amount })),
            Commands::InitOptionVault {
                option_type,
                expires_in_ms,
                price_numerator,
                price_denominator,
                asset_decimals,
                usdc_decimals,
            } => Some(ActionKind::InitVault(InitVaultAction {
                option_kind: *option_type,
                price_numerator: *price_numerator,
                price_denominator: *price_denominator,
                asset_decimals: *asset_decimals,
                usdc_decimals: *usdc_decimals,
                ..InitVaultAction::expiring_in(*expires_in_ms)
            })),
            Commands::WriteCoveredCall => Some(ActionKind::WriteCall(WriteCallAction)),
            Commands::Balance => None,
        }
    }
}

/// What a successful invocation produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Receipt(Receipt),
    Balance(Balance),
}

impl Outcome {
    /// JSON printed on stdout.
    pub fn to_json(&self) -> Value {
        match self {
            Outcome::Receipt(receipt) => receipt.raw().clone(),
            Outcome::Balance(balance) => serde_json::json!({
                "coinType": balance.coin_type,
                "totalBalance": balance.total.to_string(),
            }),
        }
    }
}

/// Load configuration and apply command-line overrides.
pub fn resolve_config(cli: &Cli) -> Result<(RunnerConfig, GasBudget), RunError> {
    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(gas_budget) = cli.gas_budget {
        config.fees.gas_budget = gas_budget;
    }
    let gas_budget = GasBudget::new(config.fees.gas_budget).ok_or_else(|| {
        ConfigError::Validation(vec![ValidationError::new(
            "fees.gas_budget",
            "must be greater than 0",
        )])
    })?;
    Ok((config, gas_budget))
}

/// Execute a parsed command against the given collaborators.
pub async fn dispatch(
    command: &Commands,
    config: &RunnerConfig,
    gas_budget: GasBudget,
    ledger: &dyn LedgerClient,
    signer: &dyn Signer,
) -> Result<Outcome, RunError> {
    match command.action() {
        Some(kind) => {
            let request = kind.request(&config.contracts);
            let runner = TransactionRunner::new(ledger, signer, gas_budget, &config.fees.coin_type);
            runner.run(&request).await.map(Outcome::Receipt)
        }
        None => {
            let address = signer.address();
            let balance = ledger
                .get_balance(&address, &config.fees.coin_type)
                .await
                .map_err(RunError::BalanceQuery)?;
            tracing::info!(address = %address, balance = %balance, "Current balance");
            Ok(Outcome::Balance(balance))
        }
    }
}

/// Full invocation: configuration, key, client, then the command.
///
/// The key and configuration are resolved before any network traffic.
pub async fn run(cli: &Cli) -> Result<Outcome, RunError> {
    let (config, gas_budget) = resolve_config(cli)?;
    let wallet =
        Wallet::from_env().map_err(|e| ConfigError::SigningKey(e.to_string()))?;
    let client =
        SuiClient::new(&config.network).map_err(|e| ConfigError::Endpoint(e.to_string()))?;

    dispatch(&cli.command, &config, gas_budget, &client, &wallet).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mint_defaults() {
        let cli = Cli::try_parse_from(["tokensmith", "mint-usdc"]).unwrap();
        assert_eq!(
            cli.command.action(),
            Some(ActionKind::Mint(MintAction { amount: 100_000_000 }))
        );
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_init_vault_options() {
        let cli = Cli::try_parse_from([
            "tokensmith",
            "init-option-vault",
            "--option-type",
            "put",
            "--price-numerator",
            "250",
            "--gas-budget",
            "20000000",
        ])
        .unwrap();
        assert_eq!(cli.gas_budget, Some(20_000_000));
        match cli.command.action() {
            Some(ActionKind::InitVault(vault)) => {
                assert_eq!(vault.option_kind, OptionKind::Put);
                assert_eq!(vault.price_numerator, 250);
                assert_eq!(vault.price_denominator, 1);
                assert_eq!(vault.asset_decimals, 8);
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_balance_has_no_action() {
        let cli = Cli::try_parse_from(["tokensmith", "balance"]).unwrap();
        assert!(cli.command.action().is_none());
    }

    #[test]
    fn test_non_numeric_amount_is_rejected_by_parser() {
        assert!(Cli::try_parse_from(["tokensmith", "mint-usdc", "--amount", "lots"]).is_err());
    }

    #[test]
    fn test_zero_gas_budget_override_is_a_configuration_error() {
        let cli = Cli::try_parse_from(["tokensmith", "--gas-budget", "0", "write-covered-call"])
            .unwrap();
        let err = resolve_config(&cli).unwrap_err();
        assert!(matches!(err, RunError::Configuration(ConfigError::Validation(_))));
    }
}
