//! Tokensmith operator tooling.
//!
//! Submits one predefined Move call (mint mock USDC, initialise an option
//! vault, write a covered call) per invocation, after a preflight balance
//! check, and classifies failures for the operator.

pub mod blockchain;
pub mod cli;
pub mod config;
pub mod observability;
pub mod runner;

pub use blockchain::{LedgerClient, Signer, SuiClient, Wallet};
pub use config::RunnerConfig;
pub use runner::{ActionKind, RunError, TransactionRunner};
