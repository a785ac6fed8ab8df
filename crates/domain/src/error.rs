//! Unified error types for the domain layer
//!
//! Provides a common error type for callers that don't care which value object
//! rejected their input.

use thiserror::Error;

use crate::value_objects::{DiceLimitError, DiceParseError};

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// A configured limit was exceeded
    #[error("Out of range: {0}")]
    Range(String),
}

impl DomainError {
    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant or format.
    ///
    /// # Example
    /// ```ignore
    /// impl FromStr for Ability {
    ///     type Err = DomainError;
    ///     fn from_str(s: &str) -> Result<Self, Self::Err> {
    ///         match s {
    ///             "STR" => Ok(Self::Strength),
    ///             _ => Err(DomainError::parse(format!("Unknown ability code: {}", s))),
    ///         }
    ///     }
    /// }
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

impl From<DiceParseError> for DomainError {
    fn from(err: DiceParseError) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<DiceLimitError> for DomainError {
    fn from(err: DiceLimitError) -> Self {
        Self::Range(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{DiceExpression, DiceLimits};

    #[test]
    fn test_parse_error() {
        let err = DomainError::parse("Unknown ability code: LUK");
        assert!(matches!(err, DomainError::Parse(_)));
        assert_eq!(err.to_string(), "Parse error: Unknown ability code: LUK");
    }

    #[test]
    fn test_from_dice_parse_error() {
        let err: DomainError = DiceExpression::parse("d20").unwrap_err().into();
        assert_eq!(
            err.to_string(),
            "Parse error: Invalid dice expression: 'd20'"
        );
    }

    #[test]
    fn test_from_dice_limit_error() {
        let expr = DiceExpression::new(500, 6, 0).unwrap();
        let err: DomainError = DiceLimits::default().check(&expr).unwrap_err().into();
        assert!(matches!(err, DomainError::Range(_)));
        assert_eq!(err.to_string(), "Out of range: Too many dice: 500 (limit is 100)");
    }
}
