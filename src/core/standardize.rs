use crate::domain::model::{Identifier, LookupKey};
use regex::Regex;
use std::sync::OnceLock;

// Provisional designations: year, half-month letters, optional cycle count.
// "2001JE2", "2001 je2" and "2001_JE2" are all the same designation.
fn provisional_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([12][0-9]{3})[ _]?([A-Za-z]{2})([0-9]*)$")
            .expect("provisional designation pattern is valid")
    })
}

// Palomar-Leiden and Trojan survey designations, e.g. "2040 P-L", "3138 T-1".
fn survey_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^([0-9]{4})[ _]?(P-L|T-[123])$")
            .expect("survey designation pattern is valid")
    })
}

/// Normalize a raw identifier into a lookup key.
///
/// Pure, no side effects. `None` is the "not found" sentinel: NaN,
/// infinities, fractional or negative numbers and empty strings all map
/// to it, so unresolvable inputs soft-fail before any lookup happens.
pub fn standardize(identifier: &Identifier) -> Option<LookupKey> {
    match identifier {
        Identifier::Number(n) => Some(LookupKey::Number(*n)),
        Identifier::Float(x) => standardize_float(*x),
        Identifier::Name(s) => standardize_name(s),
    }
}

fn standardize_float(x: f64) -> Option<LookupKey> {
    if x.is_finite() && x >= 0.0 && x.fract() == 0.0 {
        Some(LookupKey::Number(x as u64))
    } else {
        None
    }
}

fn standardize_name(raw: &str) -> Option<LookupKey> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }

    // Numeric strings are numbers, "0001" included
    if collapsed.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(number) = collapsed.parse::<u64>() {
            return Some(LookupKey::Number(number));
        }
    }

    if let Some(caps) = provisional_re().captures(&collapsed) {
        return Some(LookupKey::Designation(format!(
            "{} {}{}",
            &caps[1],
            caps[2].to_ascii_uppercase(),
            &caps[3],
        )));
    }

    if let Some(caps) = survey_re().captures(&collapsed) {
        return Some(LookupKey::Designation(format!(
            "{} {}",
            &caps[1],
            caps[2].to_ascii_uppercase(),
        )));
    }

    Some(LookupKey::Name(collapsed.to_lowercase()))
}
