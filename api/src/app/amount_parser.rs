//! Currency-text parsing
//!
//! Turns free monetary text - Korean numeral units included - into an
//! integer 만원 amount. Parsing never fails: anything unrecognizable is 0,
//! which callers must treat as "unspecified", never as an asserted
//! zero-value figure.

use regex::Regex;

/// Parse free currency text into a 만원 amount.
///
/// `+`-joined expressions ("50+3천만") are split and each term parsed
/// independently with the same grammar, then summed.
pub fn normalize_amount(text: &str) -> i64 {
    if text.contains('+') {
        text.split('+').map(parse_term).sum()
    } else {
        parse_term(text)
    }
}

/// Grammar for a single term, components consumed in fixed order:
/// 1. `<int>억` plus any bare digits left attached without a unit suffix
///    (added directly as 만원, e.g. "6억 5,500" -> 65500)
/// 2. `<int>천만` -> int * 1000
/// 3. `<int>만`   -> int
/// 4. `<int>천`   -> int / 10 (thousand-KRW as a 만원 fraction)
/// 5. no unit marker: trailing 원 or a digit string of 7+ characters is
///    raw KRW floor-divided by 10,000; anything else is already 만원
///
/// The sum is floored once, after all components.
fn parse_term(text: &str) -> i64 {
    let clean = text.replace(',', "");
    let clean = clean.trim();
    if clean.is_empty() {
        return 0;
    }

    let mut remaining = clean.to_string();
    let mut total = 0.0_f64;
    let mut matched_unit = false;
    let mut matched_eok = false;

    if let Some((value, rest)) = consume(&remaining, r"(\d+)억") {
        total += value * 10_000.0;
        remaining = rest;
        matched_unit = true;
        matched_eok = true;
    }
    if let Some((value, rest)) = consume(&remaining, r"(\d+)천만") {
        total += value * 1_000.0;
        remaining = rest;
        matched_unit = true;
    }
    if let Some((value, rest)) = consume(&remaining, r"(\d+)만") {
        total += value;
        remaining = rest;
        matched_unit = true;
    }
    if let Some((value, rest)) = consume(&remaining, r"(\d+)천") {
        total += value / 10.0;
        remaining = rest;
        matched_unit = true;
    }

    if matched_unit {
        // Digits left attached after an 억 component carry no unit suffix
        // and count directly as 만원
        if matched_eok {
            if let Some((value, _)) = consume(&remaining, r"(\d+)") {
                total += value;
            }
        }
        return total.floor() as i64;
    }

    // No Korean unit marker: decide between raw KRW and 만원 input
    let digits: String = clean.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }
    let value: i64 = digits.parse().unwrap_or(0);
    if clean.ends_with('원') || digits.len() >= 7 {
        value / 10_000
    } else {
        value
    }
}

/// Match `pattern` once, returning the captured number and the text with
/// the whole match removed.
fn consume(text: &str, pattern: &str) -> Option<(f64, String)> {
    let re = Regex::new(pattern).ok()?;
    let caps = re.captures(text)?;
    let whole = caps.get(0)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let mut rest = String::with_capacity(text.len());
    rest.push_str(&text[..whole.start()]);
    rest.push_str(&text[whole.end()..]);
    Some((value, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eok_with_attached_digits() {
        assert_eq!(normalize_amount("6억 5,500"), 65_500);
        assert_eq!(normalize_amount("6억5500"), 65_500);
        assert_eq!(normalize_amount("3억"), 30_000);
    }

    #[test]
    fn eok_with_suffixed_components() {
        assert_eq!(normalize_amount("1억 2천만"), 12_000);
        assert_eq!(normalize_amount("2억 3,500만"), 23_500);
    }

    #[test]
    fn cheonman_unit() {
        assert_eq!(normalize_amount("2천만"), 2_000);
        assert_eq!(normalize_amount("15천만"), 15_000);
    }

    #[test]
    fn man_unit() {
        assert_eq!(normalize_amount("5000만"), 5_000);
    }

    #[test]
    fn cheon_is_a_manwon_fraction() {
        assert_eq!(normalize_amount("5천"), 0);
        assert_eq!(normalize_amount("1만5천"), 1);
        assert_eq!(normalize_amount("30천"), 3);
    }

    #[test]
    fn raw_krw_by_won_suffix() {
        assert_eq!(normalize_amount("1,234,567원"), 123);
        assert_eq!(normalize_amount("50000원"), 5);
    }

    #[test]
    fn raw_krw_by_digit_length() {
        // 7+ digits reads as KRW even without the suffix
        assert_eq!(normalize_amount("238800000"), 23_880);
        assert_eq!(normalize_amount("1000000"), 100);
    }

    #[test]
    fn plain_number_is_already_manwon() {
        assert_eq!(normalize_amount("12000"), 12_000);
        assert_eq!(normalize_amount("12,000"), 12_000);
        assert_eq!(normalize_amount("500"), 500);
    }

    #[test]
    fn plus_joined_terms_sum() {
        assert_eq!(normalize_amount("50+3천만"), 3_050);
        assert_eq!(normalize_amount("1억+5000"), 15_000);
        assert_eq!(normalize_amount("2천만 + 300"), 2_300);
    }

    #[test]
    fn unparseable_is_zero() {
        assert_eq!(normalize_amount(""), 0);
        assert_eq!(normalize_amount("   "), 0);
        assert_eq!(normalize_amount("금액미상"), 0);
        assert_eq!(normalize_amount("원"), 0);
    }

    #[test]
    fn floor_applies_once_after_summing() {
        // 5천 + 5천 = 0.5 + 0.5 = 1.0 within one term would floor to 1,
        // but as separate + terms each floors to 0
        assert_eq!(normalize_amount("1만5천"), 1);
        assert_eq!(normalize_amount("5천+5천"), 0);
    }
}
