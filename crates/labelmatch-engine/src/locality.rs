//! Home-delivery locality resolution.
//!
//! Stages run in a fixed order over a working set that starts as the whole
//! locality index: postal code, locality/city tokens, base-form equality,
//! province, then the federal-capital tie-break. A stage that keeps nothing
//! is skipped; as soon as one candidate is left it is the answer.

use crate::index::{LocalityCatalogEntry, LocalityIndex};
use crate::normalize::{digits, long_tokens, normalize, tokenize};
use crate::outcome::{MatchOutcome, LOCALITY_SUGGESTION_LIMIT};
use crate::query::AddressQuery;

/// Directional and administrative qualifiers merchants tack onto locality
/// names ("Rosario Centro", "Ciudad de Mendoza", "Tigre Norte").
const LOCALITY_STOP_TOKENS: [&str; 16] = [
    "CAPITAL", "CENTRO", "CIUDAD", "BARRIO", "NOROESTE", "NORESTE", "SUDOESTE", "SUDESTE",
    "NORTE", "SUR", "ESTE", "OESTE", "N", "S", "E", "O",
];

const CAPITAL_FEDERAL: &str = "CAPITAL FEDERAL";
const CABA_LOCALITY: &str = "CIUDAD AUTONOMA BUENOS AIRES";

type Candidates<'a> = Vec<&'a LocalityCatalogEntry>;

enum Narrowed<'a> {
    One(&'a LocalityCatalogEntry),
    Many(Candidates<'a>),
}

/// Applies one stage: an empty result leaves the set as it was, and a set of
/// one ends the funnel.
fn narrow<'a, F>(working: Candidates<'a>, stage: F) -> Narrowed<'a>
where
    F: FnOnce(&[&'a LocalityCatalogEntry]) -> Candidates<'a>,
{
    let filtered = stage(&working);
    let next = if filtered.is_empty() { working } else { filtered };
    if next.len() == 1 {
        Narrowed::One(next[0])
    } else {
        Narrowed::Many(next)
    }
}

/// Resolves a home-delivery address against the locality index.
#[must_use]
pub fn resolve_locality<'a>(
    index: &'a LocalityIndex,
    query: &AddressQuery,
) -> MatchOutcome<&'a LocalityCatalogEntry> {
    let postal_code = postal_code_digits(&query.postal_code);
    let place = normalize(&format!("{} {}", query.locality, query.city));
    let bases = [base_form(&query.locality), base_form(&query.city)];
    let province = normalize(&query.province);

    let working: Candidates<'a> = index.entries().iter().collect();

    let working = match narrow(working, |set| filter_by_postal_code(set, &postal_code)) {
        Narrowed::One(entry) => return MatchOutcome::Resolved(entry),
        Narrowed::Many(set) => set,
    };
    let working = match narrow(working, |set| filter_by_place_tokens(set, &place)) {
        Narrowed::One(entry) => return MatchOutcome::Resolved(entry),
        Narrowed::Many(set) => set,
    };
    let working = match narrow(working, |set| filter_by_base_form(set, &bases)) {
        Narrowed::One(entry) => return MatchOutcome::Resolved(entry),
        Narrowed::Many(set) => set,
    };
    let working = match narrow(working, |set| filter_by_province(set, &province)) {
        Narrowed::One(entry) => return MatchOutcome::Resolved(entry),
        Narrowed::Many(set) => set,
    };

    if let Some(entry) = capital_tie_break(&working, &province) {
        tracing::debug!(
            candidates = working.len(),
            locality = %entry.raw,
            "locality resolved by capital tie-break"
        );
        return MatchOutcome::Resolved(entry);
    }

    tracing::debug!(
        %postal_code,
        %province,
        candidates = working.len(),
        "locality left ambiguous"
    );
    MatchOutcome::ambiguous(&working, LOCALITY_SUGGESTION_LIMIT)
}

/// Digits of a postal code, ignoring a trailing decimal artifact such as the
/// `.0` spreadsheets append to numeric cells.
#[must_use]
pub fn postal_code_digits(raw: &str) -> String {
    let trimmed = raw.trim();
    let integral = match trimmed.rsplit_once('.') {
        Some((head, fraction))
            if !fraction.is_empty() && fraction.chars().all(|c| c == '0') =>
        {
            head
        }
        _ => trimmed,
    };
    digits(integral)
}

/// Normalized text with directional/administrative qualifiers removed.
#[must_use]
pub fn base_form(text: &str) -> String {
    let normalized = normalize(text);
    tokenize(&normalized)
        .into_iter()
        .filter(|t| !LOCALITY_STOP_TOKENS.contains(t))
        .collect::<Vec<_>>()
        .join(" ")
}

fn filter_by_postal_code<'a>(
    candidates: &[&'a LocalityCatalogEntry],
    postal_code: &str,
) -> Candidates<'a> {
    if postal_code.is_empty() {
        return Vec::new();
    }
    candidates
        .iter()
        .copied()
        .filter(|entry| entry.postal_code == postal_code)
        .collect()
}

fn filter_by_place_tokens<'a>(
    candidates: &[&'a LocalityCatalogEntry],
    place: &str,
) -> Candidates<'a> {
    let tokens = long_tokens(place, 3);
    if tokens.is_empty() {
        return Vec::new();
    }
    candidates
        .iter()
        .copied()
        .filter(|entry| {
            let haystack = format!(
                "{} {} {}",
                entry.normalized_full, entry.normalized_province, entry.normalized_locality
            );
            tokens.iter().any(|t| haystack.contains(t))
        })
        .collect()
}

fn filter_by_base_form<'a>(
    candidates: &[&'a LocalityCatalogEntry],
    bases: &[String],
) -> Candidates<'a> {
    candidates
        .iter()
        .copied()
        .filter(|entry| {
            bases
                .iter()
                .any(|base| !base.is_empty() && entry.normalized_locality == *base)
        })
        .collect()
}

fn filter_by_province<'a>(
    candidates: &[&'a LocalityCatalogEntry],
    province: &str,
) -> Candidates<'a> {
    if province.is_empty() {
        return Vec::new();
    }
    candidates
        .iter()
        .copied()
        .filter(|entry| {
            let candidate = entry.normalized_province.as_str();
            candidate.contains(province)
                || entry.normalized_full.contains(province)
                || (!candidate.is_empty() && province.contains(candidate))
                || province.contains(entry.normalized_full.as_str())
        })
        .collect()
}

/// First survivor naming the autonomous city when the buyer wrote
/// "Capital Federal".
fn capital_tie_break<'a>(
    candidates: &[&'a LocalityCatalogEntry],
    province: &str,
) -> Option<&'a LocalityCatalogEntry> {
    if !province.contains(CAPITAL_FEDERAL) {
        return None;
    }
    candidates
        .iter()
        .copied()
        .find(|entry| entry.normalized_locality.contains(CABA_LOCALITY))
}
