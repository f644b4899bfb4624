//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (private key, RPC URL)
//!     → wallet.rs (key loading, signing)
//!     → transaction.rs (Move call construction, local validation)
//!     → client.rs (JSON-RPC: balance, prepare, execute)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::{LedgerClient, SuiClient};
pub use transaction::{Action, ActionBuilder, ActionError, Argument, MoveTarget, PureType, PureValue, TypeTag};
pub use types::{
    Balance, BlockchainError, GasBudget, ObjectId, Receipt, SignedTransaction, SuiAddress,
    TransactionBytes,
};
pub use wallet::{Signer, Wallet};
