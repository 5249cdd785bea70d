//! Payment card number check (Luhn / mod-10)

/// Shortest accepted card number
pub const MIN_CARD_DIGITS: usize = 13;

/// Longest accepted card number
pub const MAX_CARD_DIGITS: usize = 19;

/// Characters removed before checking: Unicode `White_Space` plus U+FEFF,
/// without U+0085.
fn is_separator(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// Luhn sum over a string of ASCII digits, or `None` if any character is
/// not a digit.
///
/// Walking from the rightmost digit, every second digit is doubled and
/// reduced by 9 when the result exceeds 9.
pub fn luhn_checksum(digits: &str) -> Option<u32> {
    let mut sum = 0;
    for (position, ch) in digits.chars().rev().enumerate() {
        let mut digit = ch.to_digit(10)?;
        if position % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }
    Some(sum)
}

/// Whether `value` looks like a real card number: 13 to 19 digits once
/// whitespace is removed, with a valid Luhn checksum.
pub fn is_valid_card_number(value: &str) -> bool {
    let sanitized: String = value.chars().filter(|c| !is_separator(*c)).collect();

    if !(MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&sanitized.len())
        || !sanitized.bytes().all(|b| b.is_ascii_digit())
    {
        return false;
    }

    matches!(luhn_checksum(&sanitized), Some(sum) if sum % 10 == 0)
}
