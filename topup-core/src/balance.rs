//! Balance and token-unit conversions.
//!
//! ARIO quantities travel as raw integer units on the wire; one ARIO is
//! 10^6 raw units. User-facing math happens on exact decimals.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::TopupError;

/// Decimal places in the raw unit scale.
pub const TOKEN_DECIMALS: u32 = 6;

/// Raw units per whole ARIO token.
const UNITS_PER_TOKEN: u64 = 1_000_000;

/// A queried wallet balance in both wire and display representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    /// Smallest-denomination integer units as reported by the gateway.
    pub raw: u64,
    /// Exact decimal value, `raw / 10^6`, trailing zeros stripped.
    pub decimal: Decimal,
}

impl Balance {
    pub fn from_raw(raw: u64) -> Self {
        let decimal = Decimal::from_i128_with_scale(raw as i128, TOKEN_DECIMALS).normalize();
        Balance { raw, decimal }
    }

    /// True when there is anything to top up from.
    pub fn has_funds(&self) -> bool {
        self.raw > 0
    }
}

/// A top-up quantity in the submission service's native raw-unit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAmount(pub u64);

impl TokenAmount {
    /// Convert a decimal ARIO quantity to raw units, rounding half away from
    /// zero. Quantities that round to zero raw units are rejected rather than
    /// submitted as empty transfers.
    pub fn from_decimal(amount: Decimal) -> Result<Self, TopupError> {
        let raw = (amount * Decimal::from(UNITS_PER_TOKEN))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
            .ok_or_else(|| {
                TopupError::InvalidAmount(format!(
                    "Amount {amount} cannot be represented in raw units"
                ))
            })?;
        if raw == 0 {
            return Err(TopupError::InvalidAmount(format!(
                "Amount {amount} is below the smallest transferable unit"
            )));
        }
        Ok(TokenAmount(raw))
    }
}

impl std::fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_balance_from_raw() {
        let b = Balance::from_raw(5_000_000);
        assert_eq!(b.decimal, Decimal::from(5));
        assert!(b.has_funds());
    }

    #[test]
    fn test_fractional_balance() {
        let b = Balance::from_raw(2_500_000);
        assert_eq!(b.decimal, dec("2.5"));
    }

    #[test]
    fn test_zero_balance_has_no_funds() {
        let b = Balance::from_raw(0);
        assert_eq!(b.decimal, Decimal::ZERO);
        assert!(!b.has_funds());
    }

    #[test]
    fn test_token_amount_from_decimal() {
        assert_eq!(
            TokenAmount::from_decimal(dec("2.5")).unwrap(),
            TokenAmount(2_500_000)
        );
    }

    #[test]
    fn test_token_amount_rounds_half_away_from_zero() {
        assert_eq!(
            TokenAmount::from_decimal(dec("0.0000015")).unwrap(),
            TokenAmount(2)
        );
        assert_eq!(
            TokenAmount::from_decimal(dec("0.0000025")).unwrap(),
            TokenAmount(3)
        );
    }

    #[test]
    fn test_token_amount_rejects_dust() {
        let err = TokenAmount::from_decimal(dec("0.0000001")).unwrap_err();
        assert!(matches!(err, TopupError::InvalidAmount(_)));
    }
}
