//! Decimal helpers for amounts crossing the API boundary.
//!
//! Amounts arrive as JSON strings and are parsed into `Decimal`; floating
//! point never touches a monetary value.

use crate::error::ServiceError;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

pub const MONEY_SCALE: u32 = 2;

/// Integer digits an amount may carry. Anything wider leaves no headroom
/// for fee arithmetic or the two-place rescale.
pub const MAX_INTEGER_DIGITS: u32 = 15;

/// Parse a positive amount with at most two decimal places.
pub fn parse_amount(field: &str, raw: &str) -> Result<Decimal, ServiceError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(ServiceError::invalid_field(field, "required", "amount cannot be empty"));
    }
    if s.starts_with('.') || s.ends_with('.') || s.starts_with('+') {
        return Err(ServiceError::invalid_field(
            field,
            "format",
            "amount must be written like 10 or 10.50",
        ));
    }
    if s.contains('e') || s.contains('E') {
        return Err(ServiceError::invalid_field(
            field,
            "format",
            "scientific notation is not allowed",
        ));
    }

    let value = Decimal::from_str(s).map_err(|_| {
        ServiceError::invalid_field(field, "format", format!("'{}' is not a decimal amount", s))
    })?;

    if value <= Decimal::ZERO {
        return Err(ServiceError::invalid_field(field, "range", "amount must be greater than 0"));
    }
    if value.trunc() >= Decimal::from(10u64.pow(MAX_INTEGER_DIGITS)) {
        return Err(ServiceError::invalid_field(
            field,
            "range",
            format!("amount supports at most {} integer digits", MAX_INTEGER_DIGITS),
        ));
    }
    if value.normalize().scale() > MONEY_SCALE {
        return Err(ServiceError::invalid_field(
            field,
            "precision",
            "amount supports at most 2 decimal places",
        ));
    }

    Ok(to_money(value))
}

/// Rescale to exactly two decimal places, rounding half away from zero.
pub fn to_money(value: Decimal) -> Decimal {
    let mut v = value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    v.rescale(MONEY_SCALE);
    v
}

pub fn zero() -> Decimal {
    to_money(Decimal::ZERO)
}

/// Percentage fee on an amount, `None` when the rate is zero.
pub fn fee_for(amount: Decimal, fee_percent: Decimal) -> anyhow::Result<Option<Decimal>> {
    if fee_percent.is_zero() {
        return Ok(None);
    }
    let fee = amount
        .checked_mul(fee_percent)
        .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
        .ok_or_else(|| anyhow::anyhow!("fee overflow: {} at {}%", amount, fee_percent))?;
    Ok(Some(to_money(fee)))
}

pub fn normalize_currency(raw: Option<&str>) -> Result<String, ServiceError> {
    let code = raw.map(str::trim).unwrap_or("USD").to_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ServiceError::invalid_field(
            "currency",
            "format",
            "currency must be a 3-letter ISO code",
        ));
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_rescales() {
        assert_eq!(parse_amount("amount", "100").unwrap().to_string(), "100.00");
        assert_eq!(parse_amount("amount", "12.5").unwrap().to_string(), "12.50");
        assert_eq!(parse_amount("amount", "0.01").unwrap().to_string(), "0.01");
    }

    #[test]
    fn rejects_bad_amounts() {
        for raw in ["", ".5", "5.", "+5", "1e3", "abc", "0", "-3.00", "1.001"] {
            assert!(parse_amount("amount", raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn trailing_zeros_do_not_count_as_precision() {
        assert_eq!(parse_amount("amount", "7.500").unwrap().to_string(), "7.50");
    }

    #[test]
    fn zero_renders_with_two_places() {
        assert_eq!(zero().to_string(), "0.00");
    }

    #[test]
    fn fee_rounds_to_cents() {
        let fee = fee_for(Decimal::new(3333, 2), Decimal::new(25, 1)).unwrap();
        assert_eq!(fee.unwrap().to_string(), "0.83");
        assert!(fee_for(Decimal::new(100, 0), Decimal::ZERO).unwrap().is_none());
    }

    #[test]
    fn fee_overflow_is_an_error() {
        assert!(fee_for(Decimal::MAX, Decimal::new(25, 1)).is_err());
    }

    #[test]
    fn amounts_wider_than_fifteen_digits_are_out_of_range() {
        let widest = parse_amount("amount", "999999999999999.99").unwrap();
        assert_eq!(widest.scale(), MONEY_SCALE);

        for raw in ["1000000000000000", "79228162514264337593543950335"] {
            match parse_amount("amount", raw).unwrap_err() {
                ServiceError::Validation { details, .. } => assert_eq!(details[0].code, "range"),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn currency_defaults_and_uppercases() {
        assert_eq!(normalize_currency(None).unwrap(), "USD");
        assert_eq!(normalize_currency(Some("zwl")).unwrap(), "ZWL");
        assert!(normalize_currency(Some("US")).is_err());
    }
}
