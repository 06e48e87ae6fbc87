//! Stock adjustment payload and operation tag

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Direction of a stock adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockOperation {
    Plus,
    Minus,
}

impl StockOperation {
    /// Signed delta for a non-negative magnitude.
    pub fn signed(self, amount: i64) -> i64 {
        match self {
            Self::Plus => amount,
            Self::Minus => -amount,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plus => "plus",
            Self::Minus => "minus",
        }
    }
}

impl FromStr for StockOperation {
    type Err = ValidationError;

    /// Only the exact lowercase tags are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plus" => Ok(Self::Plus),
            "minus" => Ok(Self::Minus),
            other => Err(ValidationError::InvalidVariant {
                field: "operation",
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for StockOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `PUT /product/manage/{id}`.
///
/// `operation` stays a raw string so that an unknown tag is reported as an
/// invalid operation rather than a JSON rejection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAdjustment {
    pub operation: String,
    pub stock: i64,
}
