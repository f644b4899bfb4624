//! Transaction runner subsystem.
//!
//! # Data Flow
//! ```text
//! ActionKind (mint / init vault / write call) + ContractsConfig
//!     → actions.rs (draft Move call)
//!     → executor.rs (validate → balance → build → prepare/sign/execute)
//!     → classify.rs (failure text → ErrorClass → hint)
//!     → error.rs (RunError, re-raised to the process boundary)
//! ```

pub mod actions;
pub mod classify;
pub mod error;
pub mod executor;

pub use actions::{ActionKind, ActionRequest, InitVaultAction, MintAction, OptionKind, WriteCallAction};
pub use classify::{classify, ErrorClass};
pub use error::RunError;
pub use executor::{RunState, TransactionRunner};
