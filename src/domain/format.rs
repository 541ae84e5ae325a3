//! Fixed-width field formatting shared by every bank dialect.
//!
//! All functions are pure and always return exactly `width` ASCII characters,
//! so a layout can place their output at a fixed column range.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

const ACCENTS: &[(char, char)] = &[
    ('á', 'a'),
    ('à', 'a'),
    ('â', 'a'),
    ('ã', 'a'),
    ('ä', 'a'),
    ('é', 'e'),
    ('è', 'e'),
    ('ê', 'e'),
    ('ë', 'e'),
    ('í', 'i'),
    ('ì', 'i'),
    ('î', 'i'),
    ('ï', 'i'),
    ('ó', 'o'),
    ('ò', 'o'),
    ('ô', 'o'),
    ('õ', 'o'),
    ('ö', 'o'),
    ('ú', 'u'),
    ('ù', 'u'),
    ('û', 'u'),
    ('ü', 'u'),
    ('ç', 'c'),
    ('ñ', 'n'),
    ('Á', 'A'),
    ('À', 'A'),
    ('Â', 'A'),
    ('Ã', 'A'),
    ('Ä', 'A'),
    ('É', 'E'),
    ('È', 'E'),
    ('Ê', 'E'),
    ('Ë', 'E'),
    ('Í', 'I'),
    ('Ì', 'I'),
    ('Î', 'I'),
    ('Ï', 'I'),
    ('Ó', 'O'),
    ('Ò', 'O'),
    ('Ô', 'O'),
    ('Õ', 'O'),
    ('Ö', 'O'),
    ('Ú', 'U'),
    ('Ù', 'U'),
    ('Û', 'U'),
    ('Ü', 'U'),
    ('Ç', 'C'),
    ('Ñ', 'N'),
    ('º', 'o'),
    ('ª', 'a'),
];

/// Keeps only the digits of `value`, left-padded with zeros.
///
/// When there are more digits than `width` the leftmost ones are dropped,
/// so `numeric("123456", 4)` is `"3456"`.
pub fn numeric(value: &str, width: usize) -> String {
    let digits: Vec<char> = value.chars().filter(char::is_ascii_digit).collect();
    if digits.len() >= width {
        digits[digits.len() - width..].iter().collect()
    } else {
        let mut out = "0".repeat(width - digits.len());
        out.extend(digits);
        out
    }
}

/// Counter or quantity, zero-padded like [`numeric`].
pub fn integer(value: u64, width: usize) -> String {
    numeric(&value.to_string(), width)
}

/// Upper-cased, accent-free text, right-padded with spaces or cut on the right.
pub fn alphanumeric(value: &str, width: usize) -> String {
    let mut out: String = value
        .chars()
        .filter_map(fold_char)
        .map(|c| c.to_ascii_uppercase())
        .take(width)
        .collect();
    let len = out.len();
    out.push_str(&" ".repeat(width - len));
    out
}

fn fold_char(c: char) -> Option<char> {
    if c.is_ascii_control() {
        return Some(' ');
    }
    if c.is_ascii() {
        return Some(c);
    }
    ACCENTS
        .iter()
        .find(|(accented, _)| *accented == c)
        .map(|(_, plain)| *plain)
}

/// Amount in cents without separator or sign, zero-padded on the left.
pub fn monetary(value: Decimal, width: usize) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    numeric(&format!("{rounded:.2}"), width)
}

/// `DDMMYYYY` for width 8, `DDMMYY` for width 6.
///
/// Accepts `YYYY-MM-DD` or `DD/MM/YYYY`. Anything else, including an empty
/// string, produces a field of zeros.
pub fn date(value: &str, width: usize) -> String {
    calendar_date(parse_date_input(value), width)
}

pub fn calendar_date(value: Option<NaiveDate>, width: usize) -> String {
    match value {
        Some(d) if width == 6 => d.format("%d%m%y").to_string(),
        Some(d) => numeric(&d.format("%d%m%Y").to_string(), width),
        None => zeros(width),
    }
}

/// `YYYYMMDD`, or eight zeros when absent.
pub fn iso_date(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%Y%m%d").to_string())
        .unwrap_or_else(|| zeros(8))
}

pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d/%m/%Y"))
        .ok()
}

pub fn blank(width: usize) -> String {
    " ".repeat(width)
}

pub fn zeros(width: usize) -> String {
    "0".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_numeric_pads_and_strips() {
        assert_eq!(numeric("", 5), "00000");
        assert_eq!(numeric("12.345-6", 8), "00123456");
        assert_eq!(numeric("abc", 3), "000");
    }

    #[test]
    fn test_numeric_drops_leftmost_excess() {
        assert_eq!(numeric("123456", 4), "3456");
        assert_eq!(numeric("123456", 6), "123456");
    }

    #[test]
    fn test_integer() {
        assert_eq!(integer(7, 6), "000007");
        assert_eq!(integer(1_234_567, 6), "234567");
    }

    #[test]
    fn test_alphanumeric_strips_accents_and_pads() {
        assert_eq!(alphanumeric("ação", 10), "ACAO      ");
        assert_eq!(alphanumeric("São João", 8), "SAO JOAO");
        assert_eq!(alphanumeric("Conceição", 4), "CONC");
    }

    #[test]
    fn test_alphanumeric_output_is_ascii_of_exact_width() {
        let out = alphanumeric("Rua nº 5\r\n€ apto", 20);
        assert_eq!(out.len(), 20);
        assert!(out.is_ascii());
        assert_eq!(out, "RUA NO 5   APTO     ");
    }

    #[test]
    fn test_monetary() {
        assert_eq!(monetary(dec!(1234.5), 10), "0000123450");
        assert_eq!(monetary(dec!(150.00), 13), "0000000015000");
        assert_eq!(monetary(dec!(0.005), 4), "0001");
        assert_eq!(monetary(Decimal::ZERO, 4), "0000");
    }

    #[test]
    fn test_date_formats() {
        assert_eq!(date("2025-03-10", 8), "10032025");
        assert_eq!(date("2025-03-10", 6), "100325");
        assert_eq!(date("10/03/2025", 6), "100325");
    }

    #[test]
    fn test_date_invalid_is_zero_filled() {
        assert_eq!(date("", 6), "000000");
        assert_eq!(date("31/02/2025", 8), "00000000");
        assert_eq!(date("not a date", 8), "00000000");
    }

    #[test]
    fn test_iso_date() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 10);
        assert_eq!(iso_date(d), "20250310");
        assert_eq!(iso_date(None), "00000000");
    }
}
