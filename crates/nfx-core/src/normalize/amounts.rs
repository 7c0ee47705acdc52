//! Currency amount normalization.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Convert a currency string into a non-negative decimal amount.
///
/// Strips currency symbols, letters and whitespace, then resolves the
/// separator convention: when both `.` and `,` appear, the later one is the
/// decimal separator and the other marks thousands (`"3.449,00"` → 3449.00,
/// `"3,449.00"` → 3449.00). A lone comma is a decimal comma. Negative or
/// ambiguous input yields `None`; a canonical value passes through
/// unchanged.
pub fn normalize_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.contains('-') {
        // Negative amounts are not valid invoice totals.
        return None;
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let normalized = if cleaned.contains(',') && cleaned.contains('.') {
        let comma_pos = cleaned.rfind(',');
        let dot_pos = cleaned.rfind('.');
        match (comma_pos, dot_pos) {
            (Some(c), Some(d)) if c > d => cleaned.replace('.', "").replace(',', "."),
            (Some(_), Some(_)) => cleaned.replace(',', ""),
            _ => cleaned,
        }
    } else if cleaned.contains(',') {
        cleaned.replace(',', ".")
    } else {
        cleaned
    };

    let amount = Decimal::from_str(&normalized).ok()?;
    if amount.is_sign_negative() {
        return None;
    }

    Some(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_brazilian_format() {
        assert_eq!(normalize_amount("3.449,00"), Some(dec("3449.00")));
        assert_eq!(normalize_amount("1.234.567,89"), Some(dec("1234567.89")));
        assert_eq!(normalize_amount("1234,56"), Some(dec("1234.56")));
    }

    #[test]
    fn test_currency_symbols_stripped() {
        assert_eq!(normalize_amount("R$ 3.449,00"), Some(dec("3449.00")));
        assert_eq!(normalize_amount("R$1.000,00"), Some(dec("1000.00")));
        assert_eq!(normalize_amount("US$ 99.90"), Some(dec("99.90")));
    }

    #[test]
    fn test_dot_decimal_format() {
        assert_eq!(normalize_amount("3449.00"), Some(dec("3449.00")));
        assert_eq!(normalize_amount("3,449.00"), Some(dec("3449.00")));
    }

    #[test]
    fn test_canonical_is_idempotent() {
        let first = normalize_amount("R$ 3.449,00").unwrap();
        let second = normalize_amount(&first.to_string()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_plain_integer() {
        assert_eq!(normalize_amount("500"), Some(dec("500")));
    }

    #[test]
    fn test_malformed_degrades_to_absent() {
        assert_eq!(normalize_amount(""), None);
        assert_eq!(normalize_amount("grátis"), None);
        assert_eq!(normalize_amount("1,2,3"), None);
    }

    #[test]
    fn test_negative_degrades_to_absent() {
        assert_eq!(normalize_amount("-100,00"), None);
        assert_eq!(normalize_amount("R$ -5.00"), None);
    }
}
