//! The three predefined operations and how each maps to a Move call.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::blockchain::transaction::{ActionBuilder, PureType};
use crate::blockchain::types::SuiAddress;
use crate::config::schema::ContractsConfig;

/// Default mint amount (100 USDC with 6 decimals).
pub const DEFAULT_MINT_AMOUNT: u64 = 100_000_000;

/// Default vault lifetime: one hour.
pub const DEFAULT_EXPIRY_MS: u64 = 3_600_000;

/// Option flavour as encoded by the `tokensmith` package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OptionKind {
    Call,
    Put,
}

impl OptionKind {
    pub fn code(self) -> u8 {
        match self {
            OptionKind::Call => 0,
            OptionKind::Put => 1,
        }
    }
}

/// `mock_usdc::mint(treasury_cap, amount)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintAction {
    pub amount: u64,
}

impl Default for MintAction {
    fn default() -> Self {
        Self {
            amount: DEFAULT_MINT_AMOUNT,
        }
    }
}

/// `tokensmith::init_option_vault(clock, treasury_cap, option_type, expire_date,
/// price_numerator, price_denominator, asset_decimals, usdc_decimals, marketplace)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitVaultAction {
    pub option_kind: OptionKind,
    /// Expiry as a Unix timestamp in milliseconds.
    pub expire_at_ms: u64,
    pub price_numerator: u64,
    pub price_denominator: u64,
    pub asset_decimals: u8,
    pub usdc_decimals: u8,
}

impl InitVaultAction {
    /// Call option expiring `expires_in_ms` from now, with the reference pricing.
    pub fn expiring_in(expires_in_ms: u64) -> Self {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or_default();
        Self {
            option_kind: OptionKind::Call,
            expire_at_ms: now_ms.saturating_add(expires_in_ms),
            price_numerator: 100,
            price_denominator: 1,
            asset_decimals: 8,
            usdc_decimals: 6,
        }
    }
}

/// `tokensmith::write_covered_call(marketplace, vault_owner, clock, asset_coin)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteCallAction;

/// One of the supported operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    Mint(MintAction),
    InitVault(InitVaultAction),
    WriteCall(WriteCallAction),
}

impl ActionKind {
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Mint(_) => "mint_usdc",
            ActionKind::InitVault(_) => "init_option_vault",
            ActionKind::WriteCall(_) => "write_covered_call",
        }
    }

    /// Config keys worth double-checking when the node cannot find an object.
    pub fn referenced_objects(&self) -> &'static str {
        match self {
            ActionKind::Mint(_) => "contracts.mock_coins_package and contracts.usdc_treasury_cap",
            ActionKind::InitVault(_) => {
                "contracts.tokensmith_package, contracts.option_treasury_cap and contracts.marketplace"
            }
            ActionKind::WriteCall(_) => {
                "contracts.marketplace, contracts.vault_owner and contracts.asset_coin"
            }
        }
    }

    /// Unvalidated call for this operation against the configured contracts.
    pub fn draft(&self, contracts: &ContractsConfig) -> ActionBuilder {
        let clock = SuiAddress::CLOCK;
        match self {
            ActionKind::Mint(mint) => {
                ActionBuilder::new(format!("{}::mock_usdc::mint", contracts.mock_coins_package))
                    .object(&contracts.usdc_treasury_cap)
                    .pure(PureType::U64, mint.amount)
                    .arity(2)
            }
            ActionKind::InitVault(vault) => ActionBuilder::new(format!(
                "{}::tokensmith::init_option_vault",
                contracts.tokensmith_package
            ))
            .object(clock)
            .object(&contracts.option_treasury_cap)
            .pure(PureType::U8, vault.option_kind.code())
            .pure(PureType::U64, vault.expire_at_ms)
            .pure(PureType::U64, vault.price_numerator)
            .pure(PureType::U64, vault.price_denominator)
            .pure(PureType::U8, vault.asset_decimals)
            .pure(PureType::U8, vault.usdc_decimals)
            .object(&contracts.marketplace)
            .arity(9)
            .type_argument(&contracts.asset_type)
            .type_argument(&contracts.usdc_type)
            .type_argument(&contracts.option_type),
            ActionKind::WriteCall(_) => ActionBuilder::new(format!(
                "{}::tokensmith::write_covered_call",
                contracts.tokensmith_package
            ))
            .object(&contracts.marketplace)
            .object(&contracts.vault_owner)
            .object(clock)
            .object(&contracts.asset_coin)
            .arity(4)
            .type_argument(&contracts.asset_type)
            .type_argument(&contracts.usdc_type)
            .type_argument(&contracts.option_type),
        }
    }

    /// Pair this operation with its draft call.
    pub fn request(&self, contracts: &ContractsConfig) -> ActionRequest {
        ActionRequest::new(self.clone(), self.draft(contracts))
    }
}

/// What the runner is asked to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub kind: ActionKind,
    pub draft: ActionBuilder,
}

impl ActionRequest {
    pub fn new(kind: ActionKind, draft: ActionBuilder) -> Self {
        Self { kind, draft }
    }
}
