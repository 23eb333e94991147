use bigdecimal::{BigDecimal, FromPrimitive, Signed, ToPrimitive, Zero};

use crate::error::LedgerError;

// all money is stored with two fractional digits
pub const MONEY_SCALE: i64 = 2;

// NUMERIC(20,2) leaves 18 integer digits
const MONEY_LIMIT: i64 = 1_000_000_000_000_000_000;

fn in_range(amount: &BigDecimal) -> bool {
    amount.abs() < BigDecimal::from(MONEY_LIMIT)
}

// converts a wire number into a money value, rounding to minor units
pub fn from_wire(value: f64) -> Option<BigDecimal> {
    if !value.is_finite() {
        return None;
    }
    BigDecimal::from_f64(value)
        .map(|v| v.round(MONEY_SCALE))
        .filter(in_range)
}

// parses a strictly positive amount, the only kind ledger movements accept
pub fn positive_from_wire(value: f64) -> Result<BigDecimal, LedgerError> {
    match from_wire(value) {
        Some(amount) if amount.is_positive() => Ok(amount),
        _ => Err(LedgerError::InvalidAmount(value.to_string())),
    }
}

pub fn non_negative_from_wire(value: f64) -> Result<BigDecimal, LedgerError> {
    match from_wire(value) {
        Some(amount) if !amount.is_negative() => Ok(amount),
        _ => Err(LedgerError::InvalidAmount(value.to_string())),
    }
}

pub fn ensure_positive(amount: &BigDecimal) -> Result<(), LedgerError> {
    if amount.is_positive() && in_range(amount) {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount(amount.to_string()))
    }
}

pub fn ensure_non_negative(amount: &BigDecimal) -> Result<(), LedgerError> {
    if !amount.is_negative() && in_range(amount) {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount(amount.to_string()))
    }
}

pub fn to_wire(value: &BigDecimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

pub fn zero() -> BigDecimal {
    BigDecimal::zero().with_scale(MONEY_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_from_wire_rounds_to_cents() {
        assert_eq!(from_wire(0.1).unwrap(), BigDecimal::from_str("0.10").unwrap());
        assert_eq!(from_wire(12.344).unwrap(), BigDecimal::from_str("12.34").unwrap());
        assert_eq!(from_wire(200.0).unwrap(), BigDecimal::from(200));
        assert!(from_wire(f64::NAN).is_none());
        assert!(from_wire(f64::INFINITY).is_none());
    }

    #[test]
    fn test_positive_from_wire() {
        assert!(positive_from_wire(1.0).is_ok());
        assert!(matches!(positive_from_wire(0.0), Err(LedgerError::InvalidAmount(_))));
        assert!(matches!(positive_from_wire(-5.0), Err(LedgerError::InvalidAmount(_))));
        // rounds to zero
        assert!(matches!(positive_from_wire(0.001), Err(LedgerError::InvalidAmount(_))));
    }

    #[test]
    fn test_non_negative_from_wire() {
        assert_eq!(non_negative_from_wire(0.0).unwrap(), BigDecimal::zero());
        assert!(non_negative_from_wire(-0.5).is_err());
    }

    #[test]
    fn test_amounts_must_fit_the_column() {
        assert!(from_wire(1e19).is_none());
        assert!(from_wire(-1e19).is_none());
        assert!(from_wire(1e18).is_none());
        assert!(matches!(positive_from_wire(1e19), Err(LedgerError::InvalidAmount(_))));
        assert!(matches!(non_negative_from_wire(1e18), Err(LedgerError::InvalidAmount(_))));
        assert!(positive_from_wire(999_999_999_999.99).is_ok());

        let huge = BigDecimal::from_str("10000000000000000000").unwrap();
        assert!(matches!(ensure_positive(&huge), Err(LedgerError::InvalidAmount(_))));
        assert!(matches!(ensure_non_negative(&huge), Err(LedgerError::InvalidAmount(_))));
        let largest = BigDecimal::from_str("999999999999999999.99").unwrap();
        assert!(ensure_positive(&largest).is_ok());
        assert!(ensure_non_negative(&zero()).is_ok());
        assert!(ensure_non_negative(&BigDecimal::from(-1)).is_err());
    }

    #[test]
    fn test_decimal_sums_are_exact() {
        let a = from_wire(0.1).unwrap();
        let b = from_wire(0.2).unwrap();
        assert_eq!(a + b, BigDecimal::from_str("0.3").unwrap());
    }

    #[test]
    fn test_to_wire() {
        assert_eq!(to_wire(&BigDecimal::from_str("1200.50").unwrap()), 1200.5);
        assert_eq!(to_wire(&zero()), 0.0);
    }
}
