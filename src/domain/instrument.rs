//! Instrument name derivation from source file names.
//!
//! Table names double as instrument identifiers, so the derivation is treated
//! as untrusted input: extension stripped, lower-cased, then filtered through
//! an allow-list of characters that are safe as SQLite identifiers.

use crate::domain::error::StocklensError;
use std::path::Path;

/// Derive the instrument table name from a source file path.
///
/// `data/MSFT.csv` becomes `msft`. Characters outside `a-z`, `0-9` and `_`
/// are dropped; a name that filters down to nothing is an error rather than
/// an empty identifier.
pub fn table_name_from_path(path: &Path) -> Result<String, StocklensError> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let name: String = stem
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect();

    if name.is_empty() {
        return Err(StocklensError::InvalidInstrumentName {
            source_name: path.display().to_string(),
        });
    }

    Ok(name)
}

/// True iff `name` contains only allow-listed identifier characters.
///
/// Every validated instrument name satisfies this by construction; the store
/// adapter re-checks before splicing a name into query text.
pub fn is_safe_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
