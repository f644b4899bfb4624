//! Single-shot transaction workflow.
//!
//! # Flow
//! ```text
//! Idle ──validate──▶ (local only)
//!      ──balance──▶ BalanceChecked ──build──▶ ActionBuilt
//!      ──prepare/sign/execute──▶ Submitted ──▶ Succeeded | Failed
//! ```
//!
//! # Guarantees
//! - Nothing touches the network until the action's literals validate
//! - Nothing is submitted unless the fee coin balance is non-zero
//! - No retries; the one submission is awaited to completion
//!
//! # Cancellation
//! There is no in-band cancellation. If the process dies after `execute`
//! was sent but before it returned, the transaction may or may not have
//! landed; check the sender's history before running again.

use tracing::Instrument;
use uuid::Uuid;

use crate::blockchain::client::LedgerClient;
use crate::blockchain::transaction::Action;
use crate::blockchain::types::{BlockchainError, GasBudget, Receipt, SuiAddress};
use crate::blockchain::wallet::Signer;
use crate::runner::actions::ActionRequest;
use crate::runner::error::RunError;

/// Workflow states. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunState {
    Idle,
    BalanceChecked,
    ActionBuilt,
    Submitted,
    Succeeded,
    Failed,
}

/// Orchestrates balance check, construction, submission and failure
/// reporting for one action. Consumed by [`TransactionRunner::run`].
pub struct TransactionRunner<'a> {
    ledger: &'a dyn LedgerClient,
    signer: &'a dyn Signer,
    gas_budget: GasBudget,
    fee_coin_type: String,
    state: RunState,
}

impl<'a> TransactionRunner<'a> {
    pub fn new(
        ledger: &'a dyn LedgerClient,
        signer: &'a dyn Signer,
        gas_budget: GasBudget,
        fee_coin_type: impl Into<String>,
    ) -> Self {
        Self {
            ledger,
            signer,
            gas_budget,
            fee_coin_type: fee_coin_type.into(),
            state: RunState::Idle,
        }
    }

    fn advance(&mut self, next: RunState) {
        debug_assert!(next > self.state, "{:?} -> {:?}", self.state, next);
        tracing::debug!(from = ?self.state, to = ?next, "State transition");
        self.state = next;
    }

    /// Run the workflow to completion.
    pub async fn run(mut self, request: &ActionRequest) -> Result<Receipt, RunError> {
        let span = tracing::info_span!(
            "run",
            run_id = %Uuid::new_v4(),
            action = request.kind.name(),
        );
        async move {
            match self.execute(request).await {
                Ok(receipt) => {
                    self.advance(RunState::Succeeded);
                    Ok(receipt)
                }
                Err(e) => {
                    self.report(&e, request);
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn execute(&mut self, request: &ActionRequest) -> Result<Receipt, RunError> {
        request.draft.validate()?;

        let address = self.signer.address();
        tracing::info!(address = %address, "Current address");

        let balance = self
            .ledger
            .get_balance(&address, &self.fee_coin_type)
            .await
            .map_err(RunError::BalanceQuery)?;
        tracing::info!(balance = %balance, "Current balance");

        if balance.is_zero() {
            return Err(RunError::InsufficientFunds {
                address,
                coin_type: self.fee_coin_type.clone(),
            });
        }
        self.advance(RunState::BalanceChecked);

        let action = request.draft.build()?;
        self.advance(RunState::ActionBuilt);
        tracing::info!(
            call = %action.target(),
            arguments = action.arguments().len(),
            type_arguments = action.type_arguments().len(),
            gas_budget = %self.gas_budget,
            "Action built"
        );

        self.advance(RunState::Submitted);
        tracing::info!("Attempting to sign and execute transaction...");
        let receipt = self
            .submit(&action, &address)
            .await
            .map_err(RunError::Submission)?;

        tracing::info!(digest = receipt.digest().unwrap_or("<none>"), "Transaction executed");
        if receipt.execution_status() == Some("failure") {
            tracing::warn!(
                error = receipt.execution_error().unwrap_or("<unknown>"),
                "Transaction was included but its execution failed"
            );
        }
        Ok(receipt)
    }

    async fn submit(
        &self,
        action: &Action,
        address: &SuiAddress,
    ) -> Result<Receipt, BlockchainError> {
        let tx_bytes = self.ledger.prepare(action, address, self.gas_budget).await?;
        let signed = self.signer.sign(tx_bytes)?;
        self.ledger.execute(signed).await
    }

    fn report(&mut self, error: &RunError, request: &ActionRequest) {
        self.advance(RunState::Failed);

        let class = error.class();
        tracing::error!(
            error = %error,
            details = ?error,
            stage = ?error.stage(),
            class = %class,
            "Run failed"
        );
        if let Some(hint) = class.hint(&request.kind) {
            tracing::error!("{}", hint);
        }
    }
}
