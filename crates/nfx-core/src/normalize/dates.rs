//! Date normalization to canonical ISO `YYYY-MM-DD`.

use chrono::NaiveDate;

use super::patterns::{DATE_DMY, DATE_PT_LONG, DATE_YMD};

/// Convert a date-like string into a calendar date.
///
/// Accepted forms, tried in order: ISO `YYYY-MM-DD` (and `/`/`.` variants),
/// Brazilian day-first `DD/MM/YYYY` (also `.`/`-`, two-digit years), and the
/// Portuguese long form `15 de janeiro de 2024`. Returns `None` when no
/// confident conversion exists. Normalizing an already-ISO value yields the
/// same date unchanged.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = DATE_YMD.captures(trimmed) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = DATE_DMY.captures(trimmed) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year = parse_year(&caps[3]);
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = DATE_PT_LONG.captures(trimmed) {
        let day: u32 = caps[1].parse().ok()?;
        let month = portuguese_month_to_number(&caps[2])?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

fn parse_year(s: &str) -> i32 {
    let year: i32 = s.parse().unwrap_or(0);
    if year < 100 {
        // Two-digit year: assume 2000s for 00-50, 1900s for 51-99
        if year <= 50 { 2000 + year } else { 1900 + year }
    } else {
        year
    }
}

fn portuguese_month_to_number(month: &str) -> Option<u32> {
    match month.to_lowercase().as_str() {
        "janeiro" => Some(1),
        "fevereiro" => Some(2),
        "março" => Some(3),
        "abril" => Some(4),
        "maio" => Some(5),
        "junho" => Some(6),
        "julho" => Some(7),
        "agosto" => Some(8),
        "setembro" => Some(9),
        "outubro" => Some(10),
        "novembro" => Some(11),
        "dezembro" => Some(12),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_iso_passes_through() {
        assert_eq!(normalize_date("2024-01-15"), Some(date(2024, 1, 15)));
        assert_eq!(normalize_date("2024/01/15"), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_iso_is_idempotent() {
        let normalized = normalize_date("15/01/2024").unwrap();
        let canonical = normalized.format("%Y-%m-%d").to_string();
        assert_eq!(normalize_date(&canonical), Some(normalized));
    }

    #[test]
    fn test_day_first_forms() {
        assert_eq!(normalize_date("15/01/2024"), Some(date(2024, 1, 15)));
        assert_eq!(normalize_date("15.01.2024"), Some(date(2024, 1, 15)));
        assert_eq!(normalize_date("15-01-2024"), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(normalize_date("15/01/24"), Some(date(2024, 1, 15)));
        assert_eq!(normalize_date("15/01/99"), Some(date(1999, 1, 15)));
    }

    #[test]
    fn test_portuguese_long_form() {
        assert_eq!(
            normalize_date("15 de janeiro de 2024"),
            Some(date(2024, 1, 15))
        );
        assert_eq!(normalize_date("1 de Março de 2023"), Some(date(2023, 3, 1)));
    }

    #[test]
    fn test_invalid_degrades_to_absent() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("amanhã"), None);
        assert_eq!(normalize_date("32/01/2024"), None);
        assert_eq!(normalize_date("15/13/2024"), None);
        assert_eq!(normalize_date("2024-02-30"), None);
    }
}
