//! Verification-digit algorithms used by the bank dialects.
//!
//! Characters other than ASCII digits are ignored, so formatted values such
//! as `"1234-5"` can be passed directly.

fn digits_rev(digits: &str) -> impl Iterator<Item = u32> + '_ {
    digits.chars().rev().filter_map(|c| c.to_digit(10))
}

/// Raw `sum mod 11` with weights cycling from 2 up to `cycle_base`.
pub fn modulo11_remainder(digits: &str, cycle_base: u32) -> u32 {
    let cycle_base = cycle_base.max(2);
    let mut weight = 2;
    let mut sum = 0;
    for d in digits_rev(digits) {
        sum += d * weight;
        weight = if weight >= cycle_base { 2 } else { weight + 1 };
    }
    sum % 11
}

/// Modulo-11 check digit. Remainders 0 and 1 map to `0`.
pub fn modulo11(digits: &str, cycle_base: u32) -> u8 {
    match modulo11_remainder(digits, cycle_base) {
        0 | 1 => 0,
        r => (11 - r) as u8,
    }
}

/// Modulo-10 check digit with alternating 2/1 weights from the right.
pub fn modulo10(digits: &str) -> u8 {
    let sum: u32 = digits_rev(digits)
        .zip([2, 1].into_iter().cycle())
        .map(|(d, w)| {
            let product = d * w;
            if product > 9 { product / 10 + product % 10 } else { product }
        })
        .sum();
    match sum % 10 {
        0 => 0,
        r => (10 - r) as u8,
    }
}
