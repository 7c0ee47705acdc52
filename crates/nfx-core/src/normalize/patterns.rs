//! Common regex patterns for field normalization.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // DD/MM/YYYY, DD.MM.YYYY, DD-MM-YYYY (two-digit years allowed)
    pub static ref DATE_DMY: Regex = Regex::new(
        r"^(\d{1,2})[./\-](\d{1,2})[./\-](\d{4}|\d{2})$"
    ).unwrap();

    // YYYY-MM-DD, YYYY/MM/DD, YYYY.MM.DD
    pub static ref DATE_YMD: Regex = Regex::new(
        r"^(\d{4})[./\-](\d{1,2})[./\-](\d{1,2})$"
    ).unwrap();

    // Portuguese long format: "15 de janeiro de 2024"
    pub static ref DATE_PT_LONG: Regex = Regex::new(
        r"(?i)^(\d{1,2})\s+de\s+(janeiro|fevereiro|março|abril|maio|junho|julho|agosto|setembro|outubro|novembro|dezembro)\s+de\s+(\d{4})$"
    ).unwrap();
}
