//! Failure classification.
//!
//! Maps the text of a node error onto a known failure class so the operator
//! gets a pointed hint. Matching is a case-sensitive substring search over a
//! single ordered table; the first matching entry wins. Classification only
//! annotates: the original error is always propagated unchanged.
//!
//! The node's wording is not a stable contract. When it changes, update
//! [`CLASSIFICATION_TABLE`] and nothing else.

use std::fmt;

use crate::runner::actions::ActionKind;

/// Known failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    InvalidOptionType,
    InsufficientGas,
    InvalidSignature,
    ObjectNotFound,
    TypeMismatch,
    Unclassified,
}

/// Substring → class, checked in order.
pub const CLASSIFICATION_TABLE: &[(&str, ErrorClass)] = &[
    ("EOptionType", ErrorClass::InvalidOptionType),
    ("insufficient gas", ErrorClass::InsufficientGas),
    ("authority signature", ErrorClass::InvalidSignature),
    ("object not found", ErrorClass::ObjectNotFound),
    ("type mismatch", ErrorClass::TypeMismatch),
];

/// Classify an error message. Depends on nothing but the text.
pub fn classify(message: &str) -> ErrorClass {
    CLASSIFICATION_TABLE
        .iter()
        .find(|(needle, _)| message.contains(needle))
        .map(|(_, class)| *class)
        .unwrap_or(ErrorClass::Unclassified)
}

impl ErrorClass {
    /// Operator-facing hint, `None` for unclassified failures.
    pub fn hint(self, action: &ActionKind) -> Option<String> {
        let hint = match self {
            ErrorClass::InvalidOptionType => {
                "Invalid option type. Must be a CALL option.".to_string()
            }
            ErrorClass::InsufficientGas => {
                "Transaction failed due to insufficient gas. Try increasing the gas budget (--gas-budget or fees.gas_budget).".to_string()
            }
            ErrorClass::InvalidSignature => {
                "Transaction failed due to invalid signature. Check your keypair.".to_string()
            }
            ErrorClass::ObjectNotFound => format!(
                "One or more referenced objects not found. Check {}.",
                action.referenced_objects()
            ),
            ErrorClass::TypeMismatch => {
                "Type arguments mismatch. Check your asset, USDC, and option coin types.".to_string()
            }
            ErrorClass::Unclassified => return None,
        };
        Some(hint)
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorClass::InvalidOptionType => "invalid_option_type",
            ErrorClass::InsufficientGas => "insufficient_gas",
            ErrorClass::InvalidSignature => "invalid_signature",
            ErrorClass::ObjectNotFound => "object_not_found",
            ErrorClass::TypeMismatch => "type_mismatch",
            ErrorClass::Unclassified => "unclassified",
        };
        f.write_str(name)
    }
}
