//! Tax identifier (CNPJ/CPF) normalization, validation and formatting.

/// Keep only the decimal digits of a string, in original order.
pub fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normalize a tax identifier by stripping all non-digit characters.
///
/// Returns `None` when nothing remains, so a junk value degrades to absent
/// instead of producing an empty string.
pub fn normalize_tax_id(s: &str) -> Option<String> {
    let digits = digits_only(s);
    if digits.is_empty() { None } else { Some(digits) }
}

/// Validate a CNPJ using the two check-digit algorithm.
///
/// CNPJ format: 14 digits where the last two are checksums computed with
/// weights 5,4,3,2,9,8,7,6,5,4,3,2 and 6,5,4,3,2,9,8,7,6,5,4,3,2.
pub fn validate_cnpj(cnpj: &str) -> bool {
    let digits: Vec<u32> = cnpj
        .chars()
        .filter(|c| c.is_ascii_digit())
        .filter_map(|c| c.to_digit(10))
        .collect();

    if digits.len() != 14 {
        return false;
    }

    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    const WEIGHTS_1: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    const WEIGHTS_2: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

    cnpj_check_digit(&digits[..12], &WEIGHTS_1) == digits[12]
        && cnpj_check_digit(&digits[..13], &WEIGHTS_2) == digits[13]
}

fn cnpj_check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights.iter()).map(|(d, w)| d * w).sum();
    let remainder = sum % 11;
    if remainder < 2 { 0 } else { 11 - remainder }
}

/// Validate a CPF using the two check-digit algorithm.
///
/// CPF format: 11 digits where the last two are checksums over the
/// preceding digits with descending weights.
pub fn validate_cpf(cpf: &str) -> bool {
    let digits: Vec<u32> = cpf
        .chars()
        .filter(|c| c.is_ascii_digit())
        .filter_map(|c| c.to_digit(10))
        .collect();

    if digits.len() != 11 {
        return false;
    }

    // Sequences of a single repeated digit pass the checksum but are invalid.
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    cpf_check_digit(&digits[..9]) == digits[9] && cpf_check_digit(&digits[..10]) == digits[10]
}

fn cpf_check_digit(digits: &[u32]) -> u32 {
    let len = digits.len() as u32;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (len + 1 - i as u32))
        .sum();
    (sum * 10) % 11 % 10
}

/// Format a CNPJ with standard punctuation (XX.XXX.XXX/XXXX-XX).
pub fn format_cnpj(cnpj: &str) -> String {
    let digits = digits_only(cnpj);
    if digits.len() != 14 {
        return cnpj.to_string();
    }

    format!(
        "{}.{}.{}/{}-{}",
        &digits[0..2],
        &digits[2..5],
        &digits[5..8],
        &digits[8..12],
        &digits[12..14]
    )
}

/// Format a CPF with standard punctuation (XXX.XXX.XXX-XX).
pub fn format_cpf(cpf: &str) -> String {
    let digits = digits_only(cpf);
    if digits.len() != 11 {
        return cpf.to_string();
    }

    format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    )
}
