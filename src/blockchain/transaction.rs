//! Move call construction.
//!
//! # Responsibilities
//! - Parse and validate the call target (`package::module::function`)
//! - Parse typed argument literals (u8, u64, bool, address, object)
//! - Validate type arguments
//! - Produce an immutable [`Action`] descriptor
//!
//! Construction is purely local. Every malformed literal is reported here,
//! before anything is sent to the network.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::blockchain::types::{ObjectId, SuiAddress};

/// Errors raised while constructing an action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Invalid call target '{0}': expected <package>::<module>::<function>")]
    InvalidTarget(String),

    #[error("Argument {index}: '{literal}' is not a valid {expected}")]
    InvalidArgument {
        index: usize,
        expected: PureType,
        literal: String,
    },

    #[error("Argument {index}: '{literal}' is not a valid object ID")]
    InvalidObject { index: usize, literal: String },

    #[error("Invalid type argument '{0}'")]
    InvalidTypeArgument(String),

    #[error("Expected {expected} arguments, got {actual}")]
    Arity { expected: usize, actual: usize },
}

pub type ActionResult<T> = Result<T, ActionError>;

/// Primitive types accepted as pure arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PureType {
    U8,
    U64,
    Bool,
    Address,
}

impl fmt::Display for PureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PureType::U8 => "u8",
            PureType::U64 => "u64",
            PureType::Bool => "bool",
            PureType::Address => "address",
        };
        f.write_str(name)
    }
}

/// A parsed pure value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PureValue {
    U8(u8),
    U64(u64),
    Bool(bool),
    Address(SuiAddress),
}

impl PureValue {
    fn parse(ty: PureType, literal: &str) -> Option<Self> {
        let literal = literal.trim();
        match ty {
            PureType::U8 => literal.parse().ok().map(PureValue::U8),
            PureType::U64 => literal.parse().ok().map(PureValue::U64),
            PureType::Bool => literal.parse().ok().map(PureValue::Bool),
            PureType::Address => literal.parse().ok().map(PureValue::Address),
        }
    }

    pub fn pure_type(&self) -> PureType {
        match self {
            PureValue::U8(_) => PureType::U8,
            PureValue::U64(_) => PureType::U64,
            PureValue::Bool(_) => PureType::Bool,
            PureValue::Address(_) => PureType::Address,
        }
    }
}

/// One positional call argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Argument {
    Pure(PureValue),
    Object(ObjectId),
}

/// Fully-qualified Move function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MoveTarget {
    pub package: SuiAddress,
    pub module: String,
    pub function: String,
}

impl FromStr for MoveTarget {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ActionError::InvalidTarget(s.to_string());
        let mut parts = s.trim().split("::");
        let (Some(package), Some(module), Some(function), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if !is_identifier(module) || !is_identifier(function) {
            return Err(invalid());
        }
        Ok(Self {
            package: package.parse().map_err(|_| invalid())?,
            module: module.to_string(),
            function: function.to_string(),
        })
    }
}

impl fmt::Display for MoveTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.package, self.module, self.function)
    }
}

/// A Move struct type tag such as `0x2::sui::SUI`.
///
/// The address is normalised; generic parameters are kept verbatim after
/// a bracket balance check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct TypeTag(String);

impl FromStr for TypeTag {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ActionError::InvalidTypeArgument(s.to_string());
        let s = s.trim();

        let (head, generics) = match s.find('<') {
            Some(pos) if s.ends_with('>') => (&s[..pos], &s[pos..]),
            Some(_) => return Err(invalid()),
            None => (s, ""),
        };
        if !brackets_balanced(generics) {
            return Err(invalid());
        }

        let mut parts = head.split("::");
        let (Some(address), Some(module), Some(name), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        let address: SuiAddress = address.parse().map_err(|_| invalid())?;
        if !is_identifier(module) || !is_identifier(name) {
            return Err(invalid());
        }
        Ok(Self(format!("{address}::{module}::{name}{generics}")))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<TypeTag> for String {
    fn from(tag: TypeTag) -> Self {
        tag.0
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn brackets_balanced(s: &str) -> bool {
    let mut depth = 0i32;
    for c in s.chars() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// An immutable, validated Move call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Action {
    target: MoveTarget,
    arguments: Vec<Argument>,
    type_arguments: Vec<TypeTag>,
}

impl Action {
    pub fn target(&self) -> &MoveTarget {
        &self.target
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn type_arguments(&self) -> &[TypeTag] {
        &self.type_arguments
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ArgLiteral {
    Pure(PureType, String),
    Object(String),
}

/// Collects raw call pieces and turns them into an [`Action`].
///
/// Nothing is parsed until [`ActionBuilder::build`] or
/// [`ActionBuilder::validate`]; both are pure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBuilder {
    target: String,
    arguments: Vec<ArgLiteral>,
    type_arguments: Vec<String>,
    expected_arity: Option<usize>,
}

impl ActionBuilder {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            arguments: Vec::new(),
            type_arguments: Vec::new(),
            expected_arity: None,
        }
    }

    /// Append a pure argument given as text.
    pub fn pure(mut self, ty: PureType, literal: impl ToString) -> Self {
        self.arguments.push(ArgLiteral::Pure(ty, literal.to_string()));
        self
    }

    /// Append an object reference.
    pub fn object(mut self, id: impl ToString) -> Self {
        self.arguments.push(ArgLiteral::Object(id.to_string()));
        self
    }

    pub fn type_argument(mut self, tag: impl Into<String>) -> Self {
        self.type_arguments.push(tag.into());
        self
    }

    /// Require exactly `n` positional arguments.
    pub fn arity(mut self, n: usize) -> Self {
        self.expected_arity = Some(n);
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Check every literal without producing an action.
    pub fn validate(&self) -> ActionResult<()> {
        self.build().map(|_| ())
    }

    pub fn build(&self) -> ActionResult<Action> {
        let target: MoveTarget = self.target.parse()?;

        if let Some(expected) = self.expected_arity {
            if expected != self.arguments.len() {
                return Err(ActionError::Arity {
                    expected,
                    actual: self.arguments.len(),
                });
            }
        }

        let arguments = self
            .arguments
            .iter()
            .enumerate()
            .map(|(index, arg)| match arg {
                ArgLiteral::Pure(ty, literal) => PureValue::parse(*ty, literal)
                    .map(Argument::Pure)
                    .ok_or_else(|| ActionError::InvalidArgument {
                        index,
                        expected: *ty,
                        literal: literal.clone(),
                    }),
                ArgLiteral::Object(literal) => literal
                    .parse()
                    .map(Argument::Object)
                    .map_err(|_| ActionError::InvalidObject {
                        index,
                        literal: literal.clone(),
                    }),
            })
            .collect::<ActionResult<Vec<_>>>()?;

        let type_arguments = self
            .type_arguments
            .iter()
            .map(|t| t.parse())
            .collect::<ActionResult<Vec<TypeTag>>>()?;

        Ok(Action {
            target,
            arguments,
            type_arguments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACKAGE: &str = "0x0ba87d5477f2ff33f9c51b479329a73736e0f1eb847db96ab902a80ef09ae9eb";

    fn mint_builder(amount: &str) -> ActionBuilder {
        ActionBuilder::new(format!("{PACKAGE}::mock_usdc::mint"))
            .object("0x353cd8638d91ce0f2169c13ba8d1334d6b72a8927681261caba2268fd8a916f0")
            .pure(PureType::U64, amount)
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = mint_builder("100000000").build().unwrap();
        let b = mint_builder("100000000").build().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.arguments().len(), 2);
        assert_eq!(a.arguments()[1], Argument::Pure(PureValue::U64(100_000_000)));
        assert_eq!(a.target().module, "mock_usdc");
        assert_eq!(a.target().function, "mint");
    }

    #[test]
    fn test_non_numeric_u64_is_rejected() {
        let err = mint_builder("lots").build().unwrap_err();
        assert_eq!(
            err,
            ActionError::InvalidArgument {
                index: 1,
                expected: PureType::U64,
                literal: "lots".to_string(),
            }
        );
        assert!(mint_builder("lots").validate().is_err());
    }

    #[test]
    fn test_u8_overflow_is_rejected() {
        let err = ActionBuilder::new(format!("{PACKAGE}::tokensmith::f"))
            .pure(PureType::U8, 256)
            .build()
            .unwrap_err();
        assert!(matches!(err, ActionError::InvalidArgument { expected: PureType::U8, .. }));
    }

    #[test]
    fn test_bad_object_reference() {
        let err = ActionBuilder::new(format!("{PACKAGE}::m::f"))
            .object("treasury")
            .build()
            .unwrap_err();
        assert!(matches!(err, ActionError::InvalidObject { index: 0, .. }));
    }

    #[test]
    fn test_target_must_have_three_parts() {
        for bad in ["0x2::sui", "0x2::sui::transfer::extra", "pkg::m::f", "0x2::1m::f"] {
            assert!(
                matches!(bad.parse::<MoveTarget>(), Err(ActionError::InvalidTarget(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_arity_is_enforced() {
        let err = mint_builder("1").arity(3).build().unwrap_err();
        assert_eq!(err, ActionError::Arity { expected: 3, actual: 2 });
    }

    #[test]
    fn test_type_tags() {
        let tag: TypeTag = "0x2::sui::SUI".parse().unwrap();
        assert_eq!(
            tag.to_string(),
            "0x0000000000000000000000000000000000000000000000000000000000000002::sui::SUI"
        );

        let generic: TypeTag = "0x2::coin::Coin<0x2::sui::SUI>".parse().unwrap();
        assert!(generic.to_string().ends_with("::coin::Coin<0x2::sui::SUI>"));

        assert!("0x2::coin::Coin<0x2::sui::SUI".parse::<TypeTag>().is_err());
        assert!("mock_coin::MOCK_COIN".parse::<TypeTag>().is_err());
    }
}
