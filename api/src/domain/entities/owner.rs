//! Owner and ownership-share domain entities
//!
//! Share text arrives in several shapes - scraped registry output like
//! `"1/2 (50.0%)"`, a bare fraction, or a hand-typed number. The percent is
//! extracted with parenthesised values taking priority, and the original
//! text is preserved for display when it already carries a fraction or
//! percent marker.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A property co-owner under share-limit evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    /// Raw share text as entered or scraped, e.g. "1/2 (50.0%)" or "50"
    #[serde(default)]
    pub share: String,
}

impl Owner {
    /// Extracted share percent, valid only in the open interval (0, 100)
    pub fn share_percent(&self) -> Option<f64> {
        parse_share_percent(&self.share)
    }

    /// Display text for memos: verbatim when the source already carries a
    /// fraction/percent shape, otherwise synthesized from the percent.
    pub fn display_share(&self) -> Option<String> {
        let percent = self.share_percent()?;
        let raw = self.share.trim();
        if raw.contains('/') || raw.contains('(') || raw.contains('%') {
            Some(raw.to_string())
        } else {
            Some(format_percent(percent))
        }
    }
}

/// Parse a share percent from free text.
///
/// Priority: parenthesised percent, then fraction, then bare number.
/// Exactly 0 and anything >= 100 are rejected - a full owner is not a
/// share evaluation, and a paired owner always gets the complement.
pub fn parse_share_percent(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let paren = Regex::new(r"\(([\d.]+)%?\)").ok()?;
    if let Some(caps) = paren.captures(text) {
        return validate(caps.get(1)?.as_str().parse().ok()?);
    }

    let fraction = Regex::new(r"^([\d.]+)\s*/\s*([\d.]+)").ok()?;
    if let Some(caps) = fraction.captures(text) {
        let numerator: f64 = caps.get(1)?.as_str().parse().ok()?;
        let denominator: f64 = caps.get(2)?.as_str().parse().ok()?;
        if denominator == 0.0 {
            return None;
        }
        return validate(numerator / denominator * 100.0);
    }

    let number = Regex::new(r"([\d.]+)").ok()?;
    let caps = number.captures(text)?;
    validate(caps.get(1)?.as_str().parse().ok()?)
}

fn validate(percent: f64) -> Option<f64> {
    if percent > 0.0 && percent < 100.0 {
        Some(percent)
    } else {
        None
    }
}

fn format_percent(percent: f64) -> String {
    if (percent - percent.round()).abs() < f64::EPSILON {
        format!("{}%", percent as i64)
    } else {
        format!("{}%", percent)
    }
}
