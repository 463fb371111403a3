//! Numeric keys pulled out of free-text doctor fields.
//!
//! Both extractors are total: text that carries no usable number yields 0
//! instead of an error, so a malformed record only sorts first (fees) or
//! last (experience).

/// Keeps every ASCII digit in `text` and reads them as one base-10 number.
///
/// `"₹1,000"` becomes 1000. Values that do not fit in a `u64` yield 0.
pub fn numeric_fees(text: &str) -> u64 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Reads the first run of ASCII digits in `text`.
///
/// `"13 Years of experience"` becomes 13.
pub fn numeric_experience(text: &str) -> u64 {
    let Some(start) = text.find(|c: char| c.is_ascii_digit()) else {
        return 0;
    };
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fees() {
        assert_eq!(numeric_fees("₹1,000"), 1000);
        assert_eq!(numeric_fees("₹ 500"), 500);
        assert_eq!(numeric_fees(""), 0);
        assert_eq!(numeric_fees("free"), 0);
    }

    #[test]
    fn test_fees_joins_all_digit_groups() {
        assert_eq!(numeric_fees("300 - 450"), 300450);
    }

    #[test]
    fn test_fees_overflow_degrades_to_zero() {
        assert_eq!(numeric_fees("99999999999999999999999"), 0);
    }

    #[test]
    fn test_experience() {
        assert_eq!(numeric_experience("13 Years of experience"), 13);
        assert_eq!(numeric_experience("experienced"), 0);
        assert_eq!(numeric_experience(""), 0);
        assert_eq!(numeric_experience("Over 7 years, 2 clinics"), 7);
        assert_eq!(numeric_experience("exp: 21"), 21);
    }
}
