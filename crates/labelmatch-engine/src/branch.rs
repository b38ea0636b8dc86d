//! Pickup-branch resolution.
//!
//! A record is matched to a branch through a fixed funnel of exact
//! containment tests over a shrinking working set:
//!
//! 1. blank street → unresolved
//! 2. province filter (applied once, never revisited)
//! 3. street phrase containment
//! 4. locality/city/province token boost
//! 5. house-number cross-check
//!
//! There is no scoring. When the funnel cannot isolate one branch it returns
//! the surviving candidates for a human to pick from.

use std::sync::LazyLock;

use regex::Regex;

use crate::index::{BranchCatalogEntry, BranchIndex};
use crate::normalize::{digits, long_tokens, normalize};
use crate::outcome::{MatchOutcome, BRANCH_SUGGESTION_LIMIT};
use crate::query::AddressQuery;

/// Markers that put a normalized province in the federal-capital class.
const CABA_MARKERS: [&str; 3] = ["CAPITAL FEDERAL", "CABA", "AUTONOMA"];

/// Standalone digit runs inside catalog text.
static NUMERIC_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]+\b").expect("valid numeric token regex"));

type Candidates<'a> = Vec<&'a BranchCatalogEntry>;

/// Resolves a pickup address against the branch index.
#[must_use]
pub fn resolve_branch<'a>(
    index: &'a BranchIndex,
    query: &AddressQuery,
) -> MatchOutcome<&'a BranchCatalogEntry> {
    let street = normalize(&query.street);
    if street.is_empty() {
        tracing::debug!("branch query has no street");
        return MatchOutcome::Unresolved;
    }

    let all: Candidates<'a> = index.entries().iter().collect();
    let province = normalize(&query.province);
    let by_province = filter_by_province(&all, &province);

    let by_phrase = filter_by_phrase(&by_province, &street);
    tracing::debug!(
        %street,
        %province,
        after_province = by_province.len(),
        after_phrase = by_phrase.len(),
        "branch phrase stage"
    );
    // A phrase miss empties the working set on purpose: suggesting every
    // branch of the province is worse than sending the record to review.
    if let [only] = by_phrase.as_slice() {
        return MatchOutcome::Resolved(*only);
    }
    let working = by_phrase;

    let place = normalize(&format!(
        "{} {} {}",
        query.locality, query.city, query.province
    ));
    let boosted = filter_by_place_tokens(&working, &place);
    if let [only] = boosted.as_slice() {
        return MatchOutcome::Resolved(*only);
    }
    let working = if boosted.is_empty() { working } else { boosted };

    let number = digits(&query.house_number);
    if number.is_empty() {
        tracing::debug!(candidates = working.len(), "branch query has no house number");
        return MatchOutcome::Unresolved;
    }

    let by_number = filter_by_house_number(&working, &number);
    tracing::debug!(
        %number,
        before = working.len(),
        after = by_number.len(),
        "branch house-number stage"
    );
    match by_number.as_slice() {
        [only] => MatchOutcome::Resolved(*only),
        [] => MatchOutcome::ambiguous(&working, BRANCH_SUGGESTION_LIMIT),
        _ => MatchOutcome::ambiguous(&by_number, BRANCH_SUGGESTION_LIMIT),
    }
}

/// Whether normalized province text names the federal capital.
#[must_use]
pub fn is_caba_class(normalized_province: &str) -> bool {
    CABA_MARKERS
        .iter()
        .any(|marker| normalized_province.contains(marker))
}

/// Keeps branches whose province is compatible with the query province.
///
/// The capital is matched by class, since "CABA", "Capital Federal" and
/// "Ciudad Autónoma de Buenos Aires" share no common substring; any other
/// province matches by substring in either direction. An empty query province
/// keeps everything.
pub(crate) fn filter_by_province<'a>(
    candidates: &[&'a BranchCatalogEntry],
    province: &str,
) -> Candidates<'a> {
    if province.is_empty() {
        return candidates.to_vec();
    }
    let query_is_caba = is_caba_class(province);
    candidates
        .iter()
        .copied()
        .filter(|entry| {
            let candidate = entry.normalized_province.as_str();
            match (query_is_caba, is_caba_class(candidate)) {
                (true, true) => true,
                (true, false) | (false, true) => false,
                (false, false) => candidate.contains(province) || province.contains(candidate),
            }
        })
        .collect()
}

/// Keeps branches whose name + address contains the whole street phrase.
pub(crate) fn filter_by_phrase<'a>(
    candidates: &[&'a BranchCatalogEntry],
    street: &str,
) -> Candidates<'a> {
    candidates
        .iter()
        .copied()
        .filter(|entry| entry.combined_text().contains(street))
        .collect()
}

/// Keeps branches mentioning any long token of the place text.
///
/// Returns an empty set when the place text has no usable tokens.
pub(crate) fn filter_by_place_tokens<'a>(
    candidates: &[&'a BranchCatalogEntry],
    place: &str,
) -> Candidates<'a> {
    let tokens = long_tokens(place, 3);
    if tokens.is_empty() {
        return Vec::new();
    }
    candidates
        .iter()
        .copied()
        .filter(|entry| tokens.iter().any(|t| entry.combined_text().contains(t)))
        .collect()
}

/// Keeps branches carrying a number that equals, prefixes, or is prefixed by
/// the query number.
pub(crate) fn filter_by_house_number<'a>(
    candidates: &[&'a BranchCatalogEntry],
    number: &str,
) -> Candidates<'a> {
    candidates
        .iter()
        .copied()
        .filter(|entry| {
            NUMERIC_TOKEN
                .find_iter(entry.combined_text())
                .map(|m| m.as_str())
                .any(|token| number.starts_with(token) || token.starts_with(number))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use labelmatch_core::{BranchRow, Scalar};

    use super::*;

    fn index(rows: &[(&str, &str)]) -> BranchIndex {
        let rows: Vec<BranchRow> = rows
            .iter()
            .map(|(name, address)| BranchRow {
                name: Some(Scalar::from(*name)),
                address: Some(Scalar::from(*address)),
            })
            .collect();
        BranchIndex::build(&rows)
    }

    fn names(candidates: &[&BranchCatalogEntry]) -> Vec<String> {
        candidates.iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn caba_class_markers() {
        assert!(is_caba_class("CABA"));
        assert!(is_caba_class("CAPITAL FEDERAL"));
        assert!(is_caba_class("CIUDAD AUTONOMA DE BUENOS AIRES"));
        assert!(!is_caba_class("BUENOS AIRES"));
        assert!(!is_caba_class(""));
    }

    #[test]
    fn province_filter_empty_query_keeps_all() {
        let idx = index(&[("A", "Salta / Belgrano 10"), ("B", "Jujuy / Belgrano 20")]);
        let all: Vec<_> = idx.entries().iter().collect();
        assert_eq!(filter_by_province(&all, "").len(), 2);
    }

    #[test]
    fn province_filter_matches_substring_both_ways() {
        let idx = index(&[
            ("A", "Provincia de Buenos Aires / Mitre 10"),
            ("B", "Santa Fe / Mitre 20"),
            ("C", "Buenos Aires / Mitre 30"),
        ]);
        let all: Vec<_> = idx.entries().iter().collect();
        assert_eq!(names(&filter_by_province(&all, "BUENOS AIRES")), vec!["A", "C"]);
        assert_eq!(
            names(&filter_by_province(&all, "PROVINCIA DE BUENOS AIRES")),
            vec!["A", "C"]
        );
    }

    #[test]
    fn province_filter_separates_capital_from_province() {
        let idx = index(&[
            ("Palermo", "Ciudad Autónoma de Buenos Aires / Santa Fe 3253"),
            ("La Plata", "Buenos Aires / Calle 7 1000"),
            ("Centro", "Capital Federal / Corrientes 1234"),
        ]);
        let all: Vec<_> = idx.entries().iter().collect();
        assert_eq!(names(&filter_by_province(&all, "CABA")), vec!["Palermo", "Centro"]);
        assert_eq!(names(&filter_by_province(&all, "BUENOS AIRES")), vec!["La Plata"]);
    }

    #[test]
    fn province_filter_keeps_branches_without_province_for_regular_query() {
        let idx = index(&[("Sin provincia", "Mitre 10")]);
        let all: Vec<_> = idx.entries().iter().collect();
        assert_eq!(filter_by_province(&all, "SALTA").len(), 1);
        assert!(filter_by_province(&all, "CABA").is_empty());
    }

    #[test]
    fn phrase_filter_searches_name_and_address() {
        let idx = index(&[("Sucursal Once", "Pueyrredon 50"), ("Sucursal Centro", "Corrientes 1234")]);
        let all: Vec<_> = idx.entries().iter().collect();
        assert_eq!(names(&filter_by_phrase(&all, "ONCE")), vec!["Sucursal Once"]);
        assert_eq!(names(&filter_by_phrase(&all, "CORRIENTES")), vec!["Sucursal Centro"]);
        assert!(filter_by_phrase(&all, "RIVADAVIA").is_empty());
    }

    #[test]
    fn place_tokens_ignore_short_words() {
        let idx = index(&[("Sucursal Sur", "Mitre 10"), ("Sucursal Quilmes", "Mitre 20")]);
        let all: Vec<_> = idx.entries().iter().collect();
        assert!(filter_by_place_tokens(&all, "SUR").is_empty());
        assert_eq!(names(&filter_by_place_tokens(&all, "QUILMES")), vec!["Sucursal Quilmes"]);
    }

    #[test]
    fn house_number_prefix_in_both_directions() {
        let idx = index(&[("A", "Mitre 12"), ("B", "Mitre 1234"), ("C", "Mitre 99")]);
        let all: Vec<_> = idx.entries().iter().collect();
        assert_eq!(names(&filter_by_house_number(&all, "123")), vec!["A", "B"]);
        assert_eq!(names(&filter_by_house_number(&all, "12345")), vec!["A", "B"]);
        assert_eq!(names(&filter_by_house_number(&all, "99")), vec!["C"]);
    }

    #[test]
    fn house_number_ignores_digits_glued_to_letters() {
        let idx = index(&[("A", "Ruta KM25")]);
        let all: Vec<_> = idx.entries().iter().collect();
        assert!(filter_by_house_number(&all, "25").is_empty());
    }

    #[test]
    fn resolves_single_phrase_match() {
        let idx = index(&[("Sucursal Centro", "Av. Corrientes 1234"), ("Sucursal Once", "Pueyrredon 50")]);
        let outcome = resolve_branch(&idx, &AddressQuery::street("Pueyrredón", "50"));
        assert_eq!(outcome.matched(), Some("Sucursal Once"));
    }

    #[test]
    fn token_boost_breaks_phrase_tie() {
        let idx = index(&[
            ("Sucursal Quilmes", "Buenos Aires / Mitre 100"),
            ("Sucursal Moron", "Buenos Aires / Mitre 200"),
        ]);
        let query = AddressQuery::street("Mitre", "999").with_city("Morón");
        assert_eq!(resolve_branch(&idx, &query).matched(), Some("Sucursal Moron"));
    }

    #[test]
    fn token_boost_without_hits_keeps_phrase_set() {
        let idx = index(&[("A", "Mitre 100"), ("B", "Mitre 200")]);
        let query = AddressQuery::street("Mitre", "200").with_city("Rosario");
        assert_eq!(resolve_branch(&idx, &query).matched(), Some("B"));
    }

    #[test]
    fn missing_house_number_digits_is_unresolved() {
        let idx = index(&[("A", "Mitre 100"), ("B", "Mitre 200")]);
        let outcome = resolve_branch(&idx, &AddressQuery::street("Mitre", "S/N"));
        assert_eq!(outcome, MatchOutcome::Unresolved);
    }

    #[test]
    fn several_number_matches_are_ambiguous() {
        let idx = index(&[("A", "Mitre 100"), ("B", "Mitre 1000"), ("C", "Mitre 300")]);
        let outcome = resolve_branch(&idx, &AddressQuery::street("Mitre", "100"));
        assert_eq!(
            outcome,
            MatchOutcome::Ambiguous(vec!["A".to_owned(), "B".to_owned()])
        );
    }
}
