//! Runner error taxonomy.

use thiserror::Error;

use crate::blockchain::transaction::ActionError;
use crate::blockchain::types::{BlockchainError, SuiAddress};
use crate::config::loader::ConfigError;
use crate::runner::actions::ActionKind;
use crate::runner::classify::{classify, ErrorClass};
use crate::runner::executor::RunState;

/// Every way a run can end badly.
#[derive(Debug, Error)]
pub enum RunError {
    /// Missing or invalid signing key or configuration. Raised before any
    /// network call.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The action could not be constructed locally.
    #[error("Invalid action: {0}")]
    InvalidAction(#[from] ActionError),

    /// The fee coin balance is exactly zero.
    #[error("Wallet {address} has no {coin_type} tokens. Please get some from the faucet first.")]
    InsufficientFunds {
        address: SuiAddress,
        coin_type: String,
    },

    /// The preflight balance query itself failed.
    #[error("Error checking balance: {0}")]
    BalanceQuery(#[source] BlockchainError),

    /// Preparing, signing or executing the transaction failed.
    #[error("Transaction failed: {0}")]
    Submission(#[source] BlockchainError),
}

impl RunError {
    /// The underlying ledger error, for errors that came from the network.
    pub fn ledger_error(&self) -> Option<&BlockchainError> {
        match self {
            RunError::BalanceQuery(e) | RunError::Submission(e) => Some(e),
            _ => None,
        }
    }

    /// Classification of the underlying message. Local failures are never
    /// classified.
    pub fn class(&self) -> ErrorClass {
        self.ledger_error()
            .map(|e| classify(&e.message()))
            .unwrap_or(ErrorClass::Unclassified)
    }

    /// Hint for the operator, if the failure matches a known class.
    pub fn hint(&self, action: &ActionKind) -> Option<String> {
        self.class().hint(action)
    }

    /// Last state reached before the failure.
    pub fn stage(&self) -> RunState {
        match self {
            RunError::Configuration(_)
            | RunError::InvalidAction(_)
            | RunError::InsufficientFunds { .. }
            | RunError::BalanceQuery(_) => RunState::Idle,
            RunError::Submission(_) => RunState::Submitted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::actions::WriteCallAction;

    #[test]
    fn test_submission_errors_are_classified() {
        let err = RunError::Submission(BlockchainError::Rpc {
            code: -32002,
            message: "Transaction validator signing failed due to issues with transaction inputs: object not found".to_string(),
        });
        assert_eq!(err.class(), ErrorClass::ObjectNotFound);
        assert_eq!(err.stage(), RunState::Submitted);
        assert!(err
            .hint(&ActionKind::WriteCall(WriteCallAction))
            .unwrap()
            .contains("contracts.asset_coin"));
    }

    #[test]
    fn test_local_errors_are_not_classified() {
        let err = RunError::InvalidAction(ActionError::InvalidTarget("type mismatch".to_string()));
        assert_eq!(err.class(), ErrorClass::Unclassified);
        assert_eq!(err.stage(), RunState::Idle);
    }

    #[test]
    fn test_insufficient_funds_message() {
        let err = RunError::InsufficientFunds {
            address: SuiAddress::CLOCK,
            coin_type: "0x2::sui::SUI".to_string(),
        };
        assert!(err.to_string().contains("faucet"));
    }
}
