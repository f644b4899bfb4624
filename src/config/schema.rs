//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the runner.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so an empty file (or no file) is valid.

use serde::{Deserialize, Serialize};

use crate::blockchain::types::SUI_COIN_TYPE;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RunnerConfig {
    /// Which network to talk to and how.
    pub network: NetworkConfig,

    /// Fee settings.
    pub fees: FeeConfig,

    /// On-chain object and type references.
    pub contracts: ContractsConfig,
}

/// Network connection settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    /// Network name: mainnet, testnet, devnet or localnet.
    pub name: String,

    /// Explicit JSON-RPC endpoint; overrides the URL derived from `name`.
    pub rpc_url: Option<String>,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl NetworkConfig {
    /// Known fullnode endpoints.
    pub fn fullnode_url(name: &str) -> Option<&'static str> {
        match name {
            "mainnet" => Some("https://fullnode.mainnet.sui.io:443"),
            "testnet" => Some("https://fullnode.testnet.sui.io:443"),
            "devnet" => Some("https://fullnode.devnet.sui.io:443"),
            "localnet" => Some("http://127.0.0.1:9000"),
            _ => None,
        }
    }

    /// Endpoint the client should connect to.
    pub fn endpoint(&self) -> String {
        match &self.rpc_url {
            Some(url) => url.clone(),
            None => Self::fullnode_url(&self.name).unwrap_or_default().to_string(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: "testnet".to_string(),
            rpc_url: None,
            rpc_timeout_secs: 30,
        }
    }
}

/// Fee settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FeeConfig {
    /// Maximum gas units a submission may consume.
    pub gas_budget: u64,

    /// Coin type checked in the preflight balance query.
    pub coin_type: String,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            gas_budget: 10_000_000,
            coin_type: SUI_COIN_TYPE.to_string(),
        }
    }
}

/// Addresses of the deployed packages, shared objects and coin types.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ContractsConfig {
    /// Package containing `tokensmith`.
    pub tokensmith_package: String,

    /// Package containing `mock_usdc` and `mock_coin`.
    pub mock_coins_package: String,

    /// Treasury cap of the mock USDC coin.
    pub usdc_treasury_cap: String,

    /// Treasury cap of the option coin.
    pub option_treasury_cap: String,

    /// Shared marketplace object.
    pub marketplace: String,

    /// Vault owner capability.
    pub vault_owner: String,

    /// Asset coin deposited as collateral.
    pub asset_coin: String,

    pub asset_type: String,
    pub usdc_type: String,
    pub option_type: String,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            tokensmith_package:
                "0xd82198a8369825beb19a2c4c5209bbe33b1b6dcd320c1b2e7145a54ced05f8b6".to_string(),
            mock_coins_package:
                "0x0ba87d5477f2ff33f9c51b479329a73736e0f1eb847db96ab902a80ef09ae9eb".to_string(),
            usdc_treasury_cap:
                "0x353cd8638d91ce0f2169c13ba8d1334d6b72a8927681261caba2268fd8a916f0".to_string(),
            option_treasury_cap:
                "0xb7a34897a47a39cb8576efcd504fa129300c9a78ca1d83b2903bb19adf2757bf".to_string(),
            marketplace:
                "0x6231761053767f8680abc0ae9570483d9aae0fb19f6388c9749dd9574d6afa54".to_string(),
            vault_owner:
                "0xe34b00924a15146dc156d5160f03f387ff927b1c2e1bd945e20d566acbdacdaa".to_string(),
            asset_coin:
                "0x44c2eafa033c9c08f684fb0578b5175aec231b99933b3a324f70db300fc65130".to_string(),
            asset_type: "0x0ba87d5477f2ff33f9c51b479329a73736e0f1eb847db96ab902a80ef09ae9eb::mock_coin::MOCK_COIN".to_string(),
            usdc_type: "0x0ba87d5477f2ff33f9c51b479329a73736e0f1eb847db96ab902a80ef09ae9eb::mock_usdc::MOCK_USDC".to_string(),
            option_type: "0x1324676a00603e868b87d29997926e2bc5015889a986dc857ee84543a1cd0ead::mock_option::MOCK_OPTION".to_string(),
        }
    }
}
