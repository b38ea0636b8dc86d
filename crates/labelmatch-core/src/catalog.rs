//! Carrier catalog file: pickup branches and serviceable localities.
//!
//! Rows are kept loosely typed here. Deciding which rows are usable is the
//! indexer's job, so a row with a missing field loads fine and is skipped at
//! index-build time instead of failing the whole file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::records::Scalar;
use crate::ConfigError;

/// A pickup branch row: display name plus a free-text address whose first
/// `/`-separated segment names the province.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchRow {
    pub name: Option<Scalar>,
    pub address: Option<Scalar>,
}

/// A serviceable locality row, `"<Province> / <Locality> / <PostalCode>"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalityRow {
    pub value: Option<Scalar>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub branches: Vec<BranchRow>,
    #[serde(default)]
    pub localities: Vec<LocalityRow>,
}

/// Load the carrier catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or is not valid YAML of
/// the expected shape.
pub fn load_catalog(path: &Path) -> Result<CatalogFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_catalog(&content)
}

/// Parse catalog YAML already held in memory.
///
/// # Errors
///
/// Returns [`ConfigError::CatalogFileParse`] on malformed YAML.
pub fn parse_catalog(content: &str) -> Result<CatalogFile, ConfigError> {
    if content.trim().is_empty() {
        return Ok(CatalogFile::default());
    }
    Ok(serde_yaml::from_str(content)?)
}
