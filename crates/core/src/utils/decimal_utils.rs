use std::str::FromStr;

use rust_decimal::Decimal;

/// Coerces a stored amount into a decimal.
///
/// Missing, blank or non-numeric values become zero. Scientific notation
/// (`1e3`) is accepted.
pub fn parse_amount(raw: Option<&str>) -> Decimal {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Decimal::ZERO;
    };
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .unwrap_or(Decimal::ZERO)
}

/// Adds `amounts`, saturating at `Decimal::MAX` / `Decimal::MIN` instead of panicking.
pub fn saturating_sum<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount))
}

/// Strict variant used when validating user input.
pub fn parse_positive_amount(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim())
        .ok()
        .filter(|amount| *amount > Decimal::ZERO)
}
