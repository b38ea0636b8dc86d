//! Immutable in-memory indices over the carrier catalog.
//!
//! Built once from a [`CatalogFile`]; every normalized field a resolver needs
//! is computed here so queries never re-normalize catalog text.

use labelmatch_core::{field_text, BranchRow, CatalogFile, LocalityRow};
use serde::Serialize;

use crate::normalize::{digits, normalize};

/// Separator between the segments of catalog addresses and locality strings.
const SEGMENT_SEPARATOR: char = '/';

/// A pickup branch, ready for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchCatalogEntry {
    /// Display name, exactly as in the catalog.
    pub name: String,
    pub address: String,
    pub normalized_name: String,
    pub normalized_address: String,
    /// First `/` segment of the address, normalized; empty when the address
    /// has no separator.
    pub normalized_province: String,
    /// `normalized_name + " " + normalized_address`, the text every branch
    /// stage searches.
    pub(crate) combined: String,
}

impl BranchCatalogEntry {
    /// Builds an entry from a catalog row, or `None` when the row has no name.
    #[must_use]
    pub fn from_row(row: &BranchRow) -> Option<Self> {
        let name = field_text(row.name.as_ref()).trim().to_owned();
        if name.is_empty() {
            return None;
        }
        let address = field_text(row.address.as_ref()).trim().to_owned();

        let normalized_name = normalize(&name);
        let normalized_address = normalize(&address);
        let normalized_province = address
            .split_once(SEGMENT_SEPARATOR)
            .map(|(province, _)| normalize(province))
            .unwrap_or_default();
        let combined = format!("{normalized_name} {normalized_address}")
            .trim()
            .to_owned();

        Some(Self {
            name,
            address,
            normalized_name,
            normalized_address,
            normalized_province,
            combined,
        })
    }

    /// Normalized name and address joined by a space.
    #[must_use]
    pub fn combined_text(&self) -> &str {
        &self.combined
    }
}

/// A serviceable locality, ready for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalityCatalogEntry {
    /// The compound `"Province / Locality / PostalCode"` string as given.
    pub raw: String,
    pub normalized_full: String,
    pub normalized_province: String,
    /// Second segment, normalized; empty for single-segment rows.
    pub normalized_locality: String,
    /// Digits of the last segment; empty when it has none.
    pub postal_code: String,
}

impl LocalityCatalogEntry {
    /// Builds an entry from a catalog row, or `None` when the compound field
    /// is absent or blank.
    #[must_use]
    pub fn from_row(row: &LocalityRow) -> Option<Self> {
        let raw = field_text(row.value.as_ref()).trim().to_owned();
        if raw.is_empty() {
            return None;
        }

        let segments: Vec<&str> = raw.split(SEGMENT_SEPARATOR).map(str::trim).collect();
        let normalized_province = segments.first().map(|s| normalize(s)).unwrap_or_default();
        let normalized_locality = segments.get(1).map(|s| normalize(s)).unwrap_or_default();
        let postal_code = segments.last().map(|s| digits(s)).unwrap_or_default();

        Some(Self {
            normalized_full: normalize(&raw),
            raw,
            normalized_province,
            normalized_locality,
            postal_code,
        })
    }
}

/// Autocomplete row for a branch: `{value: name, context: normalized_address}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchSummary {
    pub value: String,
    pub context: String,
}

/// Autocomplete row for a locality: `{value: raw, province: normalized_province}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalitySummary {
    pub value: String,
    pub province: String,
}

#[derive(Debug, Clone, Default)]
pub struct BranchIndex {
    entries: Vec<BranchCatalogEntry>,
    summary: Vec<BranchSummary>,
}

impl BranchIndex {
    /// Indexes every row with a name, in catalog order.
    #[must_use]
    pub fn build(rows: &[BranchRow]) -> Self {
        let mut entries = Vec::with_capacity(rows.len());
        for (position, row) in rows.iter().enumerate() {
            match BranchCatalogEntry::from_row(row) {
                Some(entry) => entries.push(entry),
                None => tracing::debug!(position, "skipping branch row without a name"),
            }
        }

        let summary = entries
            .iter()
            .map(|e| BranchSummary {
                value: e.name.clone(),
                context: e.normalized_address.clone(),
            })
            .collect();

        tracing::info!(
            indexed = entries.len(),
            skipped = rows.len() - entries.len(),
            "built branch index"
        );
        Self { entries, summary }
    }

    #[must_use]
    pub fn entries(&self) -> &[BranchCatalogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn summary(&self) -> &[BranchSummary] {
        &self.summary
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocalityIndex {
    entries: Vec<LocalityCatalogEntry>,
    summary: Vec<LocalitySummary>,
}

impl LocalityIndex {
    /// Indexes every row with a non-blank compound value, in catalog order.
    #[must_use]
    pub fn build(rows: &[LocalityRow]) -> Self {
        let mut entries = Vec::with_capacity(rows.len());
        for (position, row) in rows.iter().enumerate() {
            match LocalityCatalogEntry::from_row(row) {
                Some(entry) => entries.push(entry),
                None => tracing::debug!(position, "skipping locality row without a value"),
            }
        }

        let summary = entries
            .iter()
            .map(|e| LocalitySummary {
                value: e.raw.clone(),
                province: e.normalized_province.clone(),
            })
            .collect();

        tracing::info!(
            indexed = entries.len(),
            skipped = rows.len() - entries.len(),
            "built locality index"
        );
        Self { entries, summary }
    }

    #[must_use]
    pub fn entries(&self) -> &[LocalityCatalogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn summary(&self) -> &[LocalitySummary] {
        &self.summary
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Both catalog summaries, as handed to UI autocomplete.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSummary {
    pub branches: Vec<BranchSummary>,
    pub localities: Vec<LocalitySummary>,
}

/// The complete, read-only catalog the resolvers run against.
///
/// Build it once at startup and share it by reference; nothing mutates it
/// afterwards, so concurrent readers need no locking.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    pub branches: BranchIndex,
    pub localities: LocalityIndex,
}

impl CatalogIndex {
    #[must_use]
    pub fn build(catalog: &CatalogFile) -> Self {
        Self {
            branches: BranchIndex::build(&catalog.branches),
            localities: LocalityIndex::build(&catalog.localities),
        }
    }

    #[must_use]
    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            branches: self.branches.summary().to_vec(),
            localities: self.localities.summary().to_vec(),
        }
    }
}
