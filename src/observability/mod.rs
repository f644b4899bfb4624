//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Runner, client and wallet produce:
//!     → logging.rs (structured log events on stderr)
//!
//! Consumers:
//!     → Operator terminal
//!     → Log aggregation when run from CI or cron
//! ```
//!
//! # Design Decisions
//! - Structured fields (address, balance, digest) instead of formatted blobs
//! - Every run carries a `run_id` span field
//! - stdout is reserved for the receipt

pub mod logging;
