//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, env overrides)
//!     → validation.rs (semantic checks)
//!     → RunnerConfig (validated, immutable for the run)
//! ```
//!
//! # Design Decisions
//! - Config is read once per invocation and never reloaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - The signing key is NOT part of the file; it comes from the environment

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{ContractsConfig, FeeConfig, NetworkConfig, RunnerConfig};
