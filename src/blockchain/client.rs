//! Sui JSON-RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to a fullnode JSON-RPC endpoint
//! - Query fee-coin balances
//! - Resolve an [`Action`] into transaction bytes
//! - Execute signed transactions and return the receipt
//!
//! Every request is bounded by the configured timeout. Nothing is retried:
//! a submission that timed out may still have been accepted by the network.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::transaction::{Action, Argument, PureValue};
use crate::blockchain::types::{
    Balance, BlockchainError, BlockchainResult, GasBudget, NetworkConfig, Receipt,
    SignedTransaction, SuiAddress, TransactionBytes,
};

/// Read and write access to the ledger.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Total balance of `coin_type` owned by `owner`.
    async fn get_balance(&self, owner: &SuiAddress, coin_type: &str) -> BlockchainResult<Balance>;

    /// Turn an action into unsigned transaction bytes for `sender`.
    async fn prepare(
        &self,
        action: &Action,
        sender: &SuiAddress,
        gas_budget: GasBudget,
    ) -> BlockchainResult<TransactionBytes>;

    /// Submit a signed transaction and wait for the node's verdict.
    async fn execute(&self, signed: SignedTransaction) -> BlockchainResult<Receipt>;
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceResult {
    coin_type: String,
    total_balance: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionBlockBytes {
    tx_bytes: String,
}

/// JSON-RPC client for a Sui fullnode.
pub struct SuiClient {
    http: reqwest::Client,
    rpc_url: url::Url,
    timeout_duration: Duration,
    next_id: AtomicU64,
}

impl SuiClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `config` - Network configuration
    ///
    /// # Returns
    /// A new client, or an error if the endpoint URL is invalid
    pub fn new(config: &NetworkConfig) -> BlockchainResult<Self> {
        let endpoint = config.endpoint();
        let rpc_url: url::Url = endpoint.parse().map_err(|e| {
            BlockchainError::Transport(format!("Invalid RPC URL '{}': {}", endpoint, e))
        })?;

        tracing::info!(rpc_url = %rpc_url, network = %config.name, "Sui client initialized");

        Ok(Self {
            http: reqwest::Client::new(),
            rpc_url,
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn rpc_url(&self) -> &url::Url {
        &self.rpc_url
    }

    async fn call(&self, method: &str, params: Value) -> BlockchainResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        tracing::debug!(method, id, "Sending JSON-RPC request");

        let request = async {
            let response = self
                .http
                .post(self.rpc_url.clone())
                .json(&body)
                .send()
                .await
                .map_err(|e| BlockchainError::Transport(e.to_string()))?;
            response
                .json::<RpcResponse>()
                .await
                .map_err(|e| BlockchainError::MalformedResponse(e.to_string()))
        };

        let response = timeout(self.timeout_duration, request)
            .await
            .map_err(|_| BlockchainError::Timeout(self.timeout_duration.as_secs()))??;

        match response {
            RpcResponse {
                error: Some(err), ..
            } => Err(BlockchainError::Rpc {
                code: err.code,
                message: err.message,
            }),
            RpcResponse {
                result: Some(result),
                ..
            } => Ok(result),
            _ => Err(BlockchainError::MalformedResponse(format!(
                "{method}: response carries neither result nor error"
            ))),
        }
    }
}

/// JSON form of a call argument as understood by `unsafe_moveCall`.
fn argument_json(argument: &Argument) -> Value {
    match argument {
        Argument::Object(id) => json!(id.to_string()),
        Argument::Pure(PureValue::U8(v)) => json!(v),
        Argument::Pure(PureValue::U64(v)) => json!(v.to_string()),
        Argument::Pure(PureValue::Bool(v)) => json!(v),
        Argument::Pure(PureValue::Address(a)) => json!(a.to_string()),
    }
}

#[async_trait]
impl LedgerClient for SuiClient {
    async fn get_balance(&self, owner: &SuiAddress, coin_type: &str) -> BlockchainResult<Balance> {
        let result = self
            .call("suix_getBalance", json!([owner.to_string(), coin_type]))
            .await?;
        let parsed: BalanceResult = serde_json::from_value(result)
            .map_err(|e| BlockchainError::MalformedResponse(e.to_string()))?;
        let total = parsed.total_balance.parse::<u128>().map_err(|e| {
            BlockchainError::MalformedResponse(format!(
                "totalBalance '{}': {}",
                parsed.total_balance, e
            ))
        })?;

        Ok(Balance {
            coin_type: parsed.coin_type,
            total,
        })
    }

    async fn prepare(
        &self,
        action: &Action,
        sender: &SuiAddress,
        gas_budget: GasBudget,
    ) -> BlockchainResult<TransactionBytes> {
        let target = action.target();
        let type_arguments: Vec<String> = action
            .type_arguments()
            .iter()
            .map(ToString::to_string)
            .collect();
        let arguments: Vec<Value> = action.arguments().iter().map(argument_json).collect();

        let result = self
            .call(
                "unsafe_moveCall",
                json!([
                    sender.to_string(),
                    target.package.to_string(),
                    target.module,
                    target.function,
                    type_arguments,
                    arguments,
                    Value::Null,
                    gas_budget.units().to_string(),
                    Value::Null,
                ]),
            )
            .await?;

        let block: TransactionBlockBytes = serde_json::from_value(result)
            .map_err(|e| BlockchainError::MalformedResponse(e.to_string()))?;
        let bytes = BASE64
            .decode(&block.tx_bytes)
            .map_err(|e| BlockchainError::MalformedResponse(format!("txBytes: {}", e)))?;
        Ok(TransactionBytes::new(bytes))
    }

    async fn execute(&self, signed: SignedTransaction) -> BlockchainResult<Receipt> {
        let result = self
            .call(
                "sui_executeTransactionBlock",
                json!([
                    BASE64.encode(signed.tx_bytes.as_bytes()),
                    [signed.signature],
                    {
                        "showEffects": true,
                        "showEvents": true,
                        "showObjectChanges": true,
                    },
                    "WaitForLocalExecution",
                ]),
            )
            .await?;
        Ok(Receipt::new(result))
    }
}

impl std::fmt::Debug for SuiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiClient")
            .field("rpc_url", &self.rpc_url.as_str())
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
