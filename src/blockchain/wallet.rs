//! Key loading and transaction signing.
//!
//! # Security
//! - Private keys are loaded ONLY from the environment (or a `.env` file)
//! - Keys are never logged or serialized

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use ed25519_dalek::{Signer as _, SigningKey};

use crate::blockchain::types::{
    BlockchainError, BlockchainResult, SignedTransaction, SuiAddress, TransactionBytes,
};

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "privatekey";

/// Human-readable part of Bech32-encoded Sui private keys.
pub const SUI_PRIVATE_KEY_PREFIX: &str = "suiprivkey";

/// Signature scheme flag for Ed25519.
pub const ED25519_FLAG: u8 = 0x00;

/// Intent prefix for transaction data: scope, version, app id.
const TRANSACTION_INTENT: [u8; 3] = [0, 0, 0];

type Blake2b256 = Blake2b<U32>;

/// Anything able to authorize a transaction on behalf of an address.
pub trait Signer: Send + Sync {
    /// Address the signatures are valid for.
    fn address(&self) -> SuiAddress;

    /// Sign transaction bytes produced by the ledger.
    fn sign(&self, tx_bytes: TransactionBytes) -> BlockchainResult<SignedTransaction>;
}

/// Ed25519 wallet.
pub struct Wallet {
    signing_key: SigningKey,
    address: SuiAddress,
}

impl Wallet {
    /// Create a wallet from raw 32-byte secret key material.
    pub fn from_secret_bytes(secret: [u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(&secret);
        let address = derive_address(&signing_key.verifying_key().to_bytes());
        Self {
            signing_key,
            address,
        }
    }

    /// Create a wallet from an encoded private key.
    ///
    /// Accepts Bech32 (`suiprivkey1...`), base64 of `flag || key` or of the
    /// bare key, and hex with or without `0x`.
    ///
    /// # Security
    /// Error messages never echo the key.
    pub fn from_private_key(encoded: &str) -> BlockchainResult<Self> {
        let encoded = encoded.trim();
        if encoded.is_empty() {
            return Err(BlockchainError::Wallet("Private key is empty".to_string()));
        }

        let secret = if encoded.starts_with(SUI_PRIVATE_KEY_PREFIX) {
            decode_bech32(encoded)?
        } else if let Some(bytes) = decode_hex(encoded) {
            bytes
        } else {
            decode_base64(encoded)?
        };

        let wallet = Self::from_secret_bytes(secret);
        tracing::info!(address = %wallet.address, "Wallet initialized");
        Ok(wallet)
    }

    /// Load wallet from environment variable.
    ///
    /// Reads `privatekey`; a `.env` file in the working directory is
    /// consulted first.
    pub fn from_env() -> BlockchainResult<Self> {
        check_dotenv(dotenvy::dotenv())?;
        let private_key = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
            BlockchainError::Wallet(format!(
                "Environment variable {} not set",
                PRIVATE_KEY_ENV_VAR
            ))
        })?;

        Self::from_private_key(&private_key)
    }

    /// Ed25519 public key bytes.
    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }
}

impl Signer for Wallet {
    fn address(&self) -> SuiAddress {
        self.address
    }

    fn sign(&self, tx_bytes: TransactionBytes) -> BlockchainResult<SignedTransaction> {
        let digest = intent_digest(tx_bytes.as_bytes());
        let signature = self.signing_key.sign(&digest);

        let mut serialized = Vec::with_capacity(1 + 64 + 32);
        serialized.push(ED25519_FLAG);
        serialized.extend_from_slice(&signature.to_bytes());
        serialized.extend_from_slice(&self.public_key());

        Ok(SignedTransaction {
            tx_bytes,
            signature: BASE64.encode(serialized),
        })
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Sui address of an Ed25519 public key: `blake2b256(flag || pubkey)`.
pub fn derive_address(public_key: &[u8; 32]) -> SuiAddress {
    let mut hasher = Blake2b256::new();
    hasher.update([ED25519_FLAG]);
    hasher.update(public_key);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hasher.finalize());
    SuiAddress::new(bytes)
}

/// Digest that is actually signed for a transaction.
pub fn intent_digest(tx_bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(TRANSACTION_INTENT);
    hasher.update(tx_bytes);
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&hasher.finalize());
    digest
}

fn strip_scheme_flag(bytes: &[u8]) -> BlockchainResult<[u8; 32]> {
    let key = match bytes {
        [ED25519_FLAG, rest @ ..] if rest.len() == 32 => rest,
        [flag, rest @ ..] if rest.len() == 32 => {
            return Err(BlockchainError::Wallet(format!(
                "Unsupported signature scheme flag {flag:#04x}, only Ed25519 keys are supported"
            )))
        }
        _ => bytes,
    };
    key.try_into().map_err(|_| {
        BlockchainError::Wallet(format!("Invalid private key length: {} bytes", bytes.len()))
    })
}

fn decode_bech32(encoded: &str) -> BlockchainResult<[u8; 32]> {
    let (hrp, data) = bech32::decode(encoded)
        .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;
    if hrp.to_string() != SUI_PRIVATE_KEY_PREFIX {
        return Err(BlockchainError::Wallet(format!(
            "Invalid private key format: unexpected prefix '{}'",
            hrp
        )));
    }
    strip_scheme_flag(&data)
}

fn decode_hex(encoded: &str) -> Option<[u8; 32]> {
    let digits = encoded.strip_prefix("0x").unwrap_or(encoded);
    if digits.len() != 64 {
        return None;
    }
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(digits, &mut bytes).ok()?;
    Some(bytes)
}

fn decode_base64(encoded: &str) -> BlockchainResult<[u8; 32]> {
    let bytes = BASE64
        .decode(encoded)
        .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;
    strip_scheme_flag(&bytes)
}

/// A missing `.env` is fine; an unreadable or malformed one is not.
/// Parse errors report only the position since the line may hold the key.
fn check_dotenv<T>(result: Result<T, dotenvy::Error>) -> BlockchainResult<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(dotenvy::Error::LineParse(_, position)) => Err(BlockchainError::Wallet(format!(
            "Malformed .env file at position {}",
            position
        ))),
        Err(e) => Err(BlockchainError::Wallet(format!("Failed to load .env: {}", e))),
    }
}
