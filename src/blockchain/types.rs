//! Chain-specific types and error definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// Re-export NetworkConfig from config module to avoid duplication
pub use crate::config::schema::NetworkConfig;

/// Length in bytes of addresses and object IDs.
pub const ADDRESS_LENGTH: usize = 32;

/// Native fee coin on every Sui network.
pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// HTTP transport failed before a JSON-RPC response arrived.
    #[error("RPC transport error: {0}")]
    Transport(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// The node answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The node answered with something we could not decode.
    #[error("Malformed RPC response: {0}")]
    MalformedResponse(String),

    /// Invalid private key format or signing failure.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Address or object ID could not be parsed.
    #[error("Invalid address '{value}': {reason}")]
    InvalidAddress { value: String, reason: String },
}

impl BlockchainError {
    /// Text used for error classification.
    ///
    /// Only the human-readable message is considered, never the variant.
    pub fn message(&self) -> String {
        match self {
            Self::Rpc { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// A 32-byte account address or object ID.
///
/// Parsed from `0x`-prefixed hex with up to 64 digits; short forms such as
/// `0x6` are left-padded with zeros.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SuiAddress([u8; ADDRESS_LENGTH]);

/// On-chain objects share the address space.
pub type ObjectId = SuiAddress;

impl SuiAddress {
    /// Shared clock object.
    pub const CLOCK: SuiAddress = {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[ADDRESS_LENGTH - 1] = 6;
        SuiAddress(bytes)
    };

    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }
}

impl FromStr for SuiAddress {
    type Err = BlockchainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| BlockchainError::InvalidAddress {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let digits = s
            .trim()
            .strip_prefix("0x")
            .or_else(|| s.trim().strip_prefix("0X"))
            .ok_or_else(|| invalid("missing 0x prefix"))?;

        if digits.is_empty() {
            return Err(invalid("no hex digits"));
        }
        if digits.len() > ADDRESS_LENGTH * 2 {
            return Err(invalid("more than 64 hex digits"));
        }

        let padded = format!("{:0>width$}", digits, width = ADDRESS_LENGTH * 2);
        let mut bytes = [0u8; ADDRESS_LENGTH];
        hex::decode_to_slice(&padded, &mut bytes).map_err(|e| invalid(&e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SuiAddress({})", self)
    }
}

impl Serialize for SuiAddress {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SuiAddress {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Balance of one coin type owned by an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Balance {
    pub coin_type: String,
    pub total: u128,
}

impl Balance {
    pub fn is_zero(&self) -> bool {
        self.total == 0
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.total, self.coin_type)
    }
}

/// Upper bound on gas units a submission may consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GasBudget(u64);

impl GasBudget {
    /// Returns `None` for a zero budget.
    pub fn new(units: u64) -> Option<Self> {
        (units > 0).then_some(Self(units))
    }

    pub fn units(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GasBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unsigned BCS transaction data produced by the node for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionBytes(Vec<u8>);

impl TransactionBytes {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Transaction bytes together with the serialized signature authorizing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub tx_bytes: TransactionBytes,
    /// Base64 of `flag || signature || public key`.
    pub signature: String,
}

/// Success record returned by the network. Kept opaque.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Receipt(Value);

impl Receipt {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// Transaction digest, if the node reported one.
    pub fn digest(&self) -> Option<&str> {
        self.0.get("digest").and_then(Value::as_str)
    }

    /// `effects.status.status` ("success" or "failure"), if effects were returned.
    pub fn execution_status(&self) -> Option<&str> {
        self.0
            .pointer("/effects/status/status")
            .and_then(Value::as_str)
    }

    /// `effects.status.error` for failed executions.
    pub fn execution_error(&self) -> Option<&str> {
        self.0
            .pointer("/effects/status/error")
            .and_then(Value::as_str)
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }

    pub fn into_raw(self) -> Value {
        self.0
    }
}
