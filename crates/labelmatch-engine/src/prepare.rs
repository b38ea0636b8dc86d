//! Cleanup applied to merchant export fields before they reach a resolver or
//! the label export.
//!
//! These are formatting fixes only; no catalog lookups happen here.

/// Placeholders merchants type when an address has no house number.
const NO_NUMBER_MARKERS: [&str; 5] = ["SN", "S/N", "S N", "-", ""];

/// Reduces a house number to its digits.
///
/// "Sin número" placeholders and values without any digit become `"0"`, the
/// carrier's convention for an unnumbered address.
#[must_use]
pub fn clean_house_number(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    if NO_NUMBER_MARKERS.contains(&upper.as_str()) {
        return "0".to_owned();
    }
    let digits: String = upper.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        "0".to_owned()
    } else {
        digits
    }
}

/// Drops quote characters and line breaks that break the carrier's CSV import.
#[must_use]
pub fn sanitize_text(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '"' && *c != '\'')
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_owned()
}

/// Removes `-` and `/` from a floor/apartment field (`"1-A"` → `"1A"`).
#[must_use]
pub fn sanitize_floor(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| *c != '-' && *c != '/')
        .collect::<String>()
        .trim()
        .to_owned()
}
