use chrono::{NaiveDate, NaiveTime};

/// Field-level format checks shared by registration, scheduling, and
/// payments.
///
/// Every function here is pure: no clock, no store, no side effects. The
/// callers decide which failures are worth reporting and in what order; this
/// module only answers yes/no questions about a single field.

/// True iff `s` is exactly 8 ASCII decimal digits.
pub fn valid_national_id(s: &str) -> bool {
    s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit())
}

/// True iff `s` is at least 10 characters long and all ASCII decimal digits.
pub fn valid_phone(s: &str) -> bool {
    s.len() >= 10 && s.bytes().all(|b| b.is_ascii_digit())
}

/// True iff `s` parses as a real calendar date in `YYYY-MM-DD` form.
/// Rejects impossible dates like `2024-02-30`.
pub fn valid_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// True iff `s` parses as a 24-hour clock time in `HH:MM` form.
pub fn valid_time(s: &str) -> bool {
    NaiveTime::parse_from_str(s, "%H:%M").is_ok()
}

/// Strips every non-digit character from a card number as entered, so that
/// spaced or dashed numbers ("4242 4242 ...") validate the same as compact
/// ones.
pub fn card_digits(card: &str) -> String {
    card.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Luhn mod-10 checksum over the digits of `card`.
///
/// Non-digit characters are stripped first. An input with no digits at all
/// fails. Every second digit counted from the rightmost is doubled, digits of
/// products above 9 are summed (equivalently, 9 is subtracted), and the total
/// must be divisible by 10.
pub fn luhn_valid(card: &str) -> bool {
    let digits = card_digits(card);
    if digits.is_empty() {
        return false;
    }

    let mut checksum: u32 = 0;
    for (i, c) in digits.chars().rev().enumerate() {
        // `card_digits` only keeps ASCII digits, so to_digit cannot fail.
        let mut d = c.to_digit(10).unwrap_or(0);
        if i % 2 == 1 {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        checksum += d;
    }
    checksum % 10 == 0
}

/// True iff `s` contains both `@` and `.`.
///
/// Intentionally weak: the business rule only wants a plausible address
/// shape, never a full RFC check.
pub fn valid_email_shape(s: &str) -> bool {
    s.contains('@') && s.contains('.')
}
