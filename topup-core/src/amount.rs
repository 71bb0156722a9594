//! Amount specification parsing and top-up calculation.
//!
//! A spec ending in `%` takes that share of the current balance; anything
//! else is an absolute ARIO quantity. Pure, no network access.

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use crate::error::TopupError;

/// A requested top-up quantity, tagged by how the user expressed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountSpec {
    /// A fixed ARIO quantity.
    Absolute(Decimal),
    /// A share of the current balance, in `(0, 100]`.
    Percentage(Decimal),
}

impl FromStr for AmountSpec {
    type Err = TopupError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if let Some(pct) = raw.strip_suffix('%') {
            let value = Decimal::from_str(pct.trim()).map_err(|_| {
                TopupError::InvalidAmount("Invalid percentage. Must be between 0 and 100.".into())
            })?;
            if value <= Decimal::ZERO || value > Decimal::from(100) {
                return Err(TopupError::InvalidAmount(
                    "Invalid percentage. Must be between 0 and 100.".into(),
                ));
            }
            Ok(AmountSpec::Percentage(value))
        } else {
            let value = Decimal::from_str(raw).map_err(|_| {
                TopupError::InvalidAmount("Invalid amount. Must be a positive number.".into())
            })?;
            if value <= Decimal::ZERO {
                return Err(TopupError::InvalidAmount(
                    "Invalid amount. Must be a positive number.".into(),
                ));
            }
            Ok(AmountSpec::Absolute(value))
        }
    }
}

impl AmountSpec {
    /// Apply the spec to a concrete balance, producing the final quantity.
    /// Absolute amounts must not exceed the balance; percentages cannot.
    pub fn apply(&self, balance: Decimal) -> Result<CalculatedAmount, TopupError> {
        match *self {
            AmountSpec::Percentage(pct) => Ok(CalculatedAmount {
                amount: (balance * pct / Decimal::from(100)).normalize(),
                kind: AmountKind::Percentage,
                value: pct,
            }),
            AmountSpec::Absolute(amount) => {
                if amount > balance {
                    return Err(TopupError::InsufficientBalance {
                        available: balance.normalize(),
                        requested: amount.normalize(),
                    });
                }
                Ok(CalculatedAmount {
                    amount: amount.normalize(),
                    kind: AmountKind::Absolute,
                    value: amount.normalize(),
                })
            }
        }
    }
}

/// How the top-up quantity was specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountKind {
    Absolute,
    Percentage,
}

impl fmt::Display for AmountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountKind::Absolute => write!(f, "absolute"),
            AmountKind::Percentage => write!(f, "percentage"),
        }
    }
}

/// A validated top-up quantity derived from a spec and the current balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculatedAmount {
    /// The ARIO quantity to submit.
    pub amount: Decimal,
    pub kind: AmountKind,
    /// The number the user supplied: the percentage, or the absolute quantity.
    pub value: Decimal,
}

/// Resolve a raw amount spec against the current decimal balance.
pub fn calculate(raw_spec: &str, balance: Decimal) -> Result<CalculatedAmount, TopupError> {
    let spec: AmountSpec = raw_spec.parse()?;
    spec.apply(balance)
}
