//! Attaches match results to merchant records.
//!
//! The annotator only dispatches on shipment type and copies resolver
//! output; all matching decisions live in [`crate::branch`] and
//! [`crate::locality`].

use std::cmp::Ordering;
use std::collections::HashSet;

use labelmatch_core::{field_text, RawAddressRecord, ShipmentType};
use serde::Serialize;

use crate::branch::resolve_branch;
use crate::index::{CatalogIndex, CatalogSummary};
use crate::locality::resolve_locality;
use crate::normalize::normalize;
use crate::outcome::{CatalogDisplay, MatchOutcome};
use crate::prepare::{sanitize_floor, sanitize_text};
use crate::query::AddressQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchStatus {
    /// A single catalog entry was matched.
    #[serde(rename = "OK")]
    Ok,
    /// Needs a human: either ambiguous (suggestions present) or unresolved.
    #[serde(rename = "MISSING")]
    Missing,
}

/// A merchant record with its cleaned address fields and match result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedRecord {
    pub order_number: String,
    pub shipment_type: ShipmentType,
    pub street: String,
    pub house_number: String,
    pub floor: String,
    pub locality: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub normalized_province: String,
    /// Display string of the matched catalog entry, empty when unmatched.
    #[serde(rename = "match")]
    pub match_value: String,
    pub suggestions: Vec<String>,
    pub status: MatchStatus,
}

/// Resolves one record against the catalog.
#[must_use]
pub fn annotate_record(index: &CatalogIndex, record: &RawAddressRecord) -> AnnotatedRecord {
    let query = AddressQuery::from_record(record);
    let shipment_type = record.effective_shipment_type();
    let (match_value, suggestions) = match shipment_type {
        ShipmentType::Pickup => outcome_fields(&resolve_branch(&index.branches, &query)),
        ShipmentType::HomeDelivery => {
            outcome_fields(&resolve_locality(&index.localities, &query))
        }
    };
    let status = if match_value.is_empty() {
        MatchStatus::Missing
    } else {
        MatchStatus::Ok
    };

    AnnotatedRecord {
        order_number: order_key(record),
        shipment_type,
        floor: sanitize_floor(&field_text(record.floor.as_ref())),
        normalized_province: normalize(&query.province),
        street: query.street,
        house_number: query.house_number,
        locality: query.locality,
        city: query.city,
        province: query.province,
        postal_code: query.postal_code,
        match_value,
        suggestions,
        status,
    }
}

fn outcome_fields<E: CatalogDisplay>(outcome: &MatchOutcome<E>) -> (String, Vec<String>) {
    (
        outcome.matched().unwrap_or_default().to_owned(),
        outcome.suggestions().to_vec(),
    )
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub pickup: usize,
    pub home_delivery: usize,
    /// Records with status `MISSING`.
    pub needs_review: usize,
    /// Repeated order numbers dropped before annotation.
    pub duplicates: usize,
}

/// Annotated records plus the counts and catalog lists a review screen needs.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub records: Vec<AnnotatedRecord>,
    pub summary: BatchSummary,
    pub catalog: CatalogSummary,
}

/// Annotates every record, in order, then sorts the result: home deliveries
/// before pickups, each group by order number.
///
/// Exports repeat an order once per purchased item, so only the first record
/// of each order number is kept. Records without an order number are all kept.
#[must_use]
pub fn annotate_batch(index: &CatalogIndex, records: &[RawAddressRecord]) -> BatchReport {
    let mut seen = HashSet::new();
    let mut duplicates = 0;
    let mut annotated: Vec<AnnotatedRecord> = Vec::with_capacity(records.len());
    for record in records {
        let key = order_key(record);
        if !key.is_empty() && !seen.insert(key.clone()) {
            tracing::debug!(order_number = %key, "skipping repeated order");
            duplicates += 1;
            continue;
        }
        annotated.push(annotate_record(index, record));
    }
    annotated.sort_by(|a, b| {
        a.shipment_type
            .cmp(&b.shipment_type)
            .then_with(|| compare_order_numbers(&a.order_number, &b.order_number))
    });

    let summary = BatchSummary {
        total: annotated.len(),
        pickup: annotated
            .iter()
            .filter(|r| r.shipment_type == ShipmentType::Pickup)
            .count(),
        home_delivery: annotated
            .iter()
            .filter(|r| r.shipment_type == ShipmentType::HomeDelivery)
            .count(),
        needs_review: annotated
            .iter()
            .filter(|r| r.status == MatchStatus::Missing)
            .count(),
        duplicates,
    };
    tracing::info!(
        total = summary.total,
        pickup = summary.pickup,
        home_delivery = summary.home_delivery,
        needs_review = summary.needs_review,
        duplicates = summary.duplicates,
        "annotated batch"
    );

    BatchReport {
        records: annotated,
        summary,
        catalog: index.summary(),
    }
}

fn order_key(record: &RawAddressRecord) -> String {
    sanitize_text(&field_text(record.order_number.as_ref()))
}

/// All-digit order numbers compare numerically and sort before any other
/// order number, which compare as text.
fn compare_order_numbers(a: &str, b: &str) -> Ordering {
    let numeric = |s: &str| {
        if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
            s.parse::<u128>().ok()
        } else {
            None
        }
    };
    match (numeric(a), numeric(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
