//! The loader/cleaner stage of the pipeline.
//!
//! Reads the Latin-1 encoded export, drops rows that violate the row-level
//! invariants, and derives the `amount` and `month` fields. Row-level
//! failures are silent by design; only file-level problems abort the load.

use crate::fs;
use crate::model::{CleanedRecord, Columns, Mapping, MappingError, RawRecord};
use serde::Serialize;
use std::error::Error as StdError;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use tracing::debug;

/// An error that aborts the whole load.
///
/// Row-level problems never produce a `CleanError`; rows that fail the
/// cleaning rules are silently excluded from the result.
#[derive(Debug)]
pub enum CleanError {
    /// The file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The header row is unusable: a required column is missing or a header
    /// is duplicated.
    Format { source: MappingError },
    /// The file is not structurally valid CSV.
    Csv { source: csv::Error },
}

impl Display for CleanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CleanError::Io { path, source } => {
                write!(f, "Unable to read file {}: {source}", path.display())
            }
            CleanError::Format { source } => Display::fmt(source, f),
            CleanError::Csv { source } => write!(f, "Unable to parse CSV data: {source}"),
        }
    }
}

impl StdError for CleanError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CleanError::Io { source, .. } => Some(source),
            CleanError::Format { source } => Some(source),
            CleanError::Csv { source } => Some(source),
        }
    }
}

impl From<MappingError> for CleanError {
    fn from(source: MappingError) -> Self {
        CleanError::Format { source }
    }
}

impl From<csv::Error> for CleanError {
    fn from(source: csv::Error) -> Self {
        CleanError::Csv { source }
    }
}

/// The cleaned table produced by [`clean`]. Immutable once built.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CleanedTable {
    rows: Vec<CleanedRecord>,
}

impl CleanedTable {
    pub fn rows(&self) -> &[CleanedRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Loads and cleans the export at `path`.
///
/// The steps run in a fixed order; later steps assume earlier invariants:
/// 1. Read the file and decode it as ISO-8859-1.
/// 2. Resolve the required columns from the header row.
/// 3. Drop rows with a missing description or customer id.
/// 4. Parse the invoice timestamp; mismatches leave the date unset.
/// 5. Coerce quantity and unit price; keep only rows where both are
///    strictly positive.
/// 6. Derive `amount` and `month`.
pub fn clean(path: impl AsRef<Path>) -> Result<CleanedTable, CleanError> {
    let path = path.as_ref();
    let text = fs::read_latin1(path).map_err(|source| CleanError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // Short rows read as empty cells rather than failing the load.
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let mapping = Mapping::new(rdr.headers()?.iter())?;
    let columns = Columns::resolve(&mapping)?;

    let mut rows = Vec::new();
    let mut discarded = 0usize;
    for result in rdr.records() {
        let record = result?;
        let raw = RawRecord::from_csv(&record, &columns);
        match CleanedRecord::from_raw(raw) {
            Some(row) => rows.push(row),
            None => discarded += 1,
        }
    }

    debug!(
        "Cleaned {}: kept {} rows, discarded {discarded}",
        path.display(),
        rows.len()
    );
    Ok(CleanedTable { rows })
}
