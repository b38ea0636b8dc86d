use std::io::Write;
use std::path::Path;

use anyhow::Context;
use labelmatch_core::RawAddressRecord;
use labelmatch_engine::{annotate_batch, annotate_record, CatalogIndex};

/// Load the catalog file and build the index the whole run shares.
pub(crate) fn load_index(path: &Path) -> anyhow::Result<CatalogIndex> {
    let catalog = labelmatch_core::load_catalog(path)
        .with_context(|| format!("loading catalog from {}", path.display()))?;
    let index = CatalogIndex::build(&catalog);
    if index.branches.is_empty() && index.localities.is_empty() {
        tracing::warn!(path = %path.display(), "catalog has no usable rows");
    }
    Ok(index)
}

/// Read a JSON array of records from `path`.
pub(crate) fn read_records(path: &Path) -> anyhow::Result<Vec<RawAddressRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading records from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parsing records from {}", path.display()))
}

pub(crate) fn annotate(
    index: &CatalogIndex,
    records_path: &Path,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let records = read_records(records_path)?;
    let report = annotate_batch(index, &records);
    write_json(out, &report)
}

pub(crate) fn catalog(index: &CatalogIndex, out: &mut impl Write) -> anyhow::Result<()> {
    write_json(out, &index.summary())
}

pub(crate) fn single(
    index: &CatalogIndex,
    record: &RawAddressRecord,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    write_json(out, &annotate_record(index, record))
}

fn write_json<T: serde::Serialize>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
