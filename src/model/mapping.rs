use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt::{Display, Formatter};

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct MappingError(String);

impl Display for MappingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl StdError for MappingError {}

/// Maps header names from the export's header row to column indices.
///
/// The export may carry columns beyond the ones we care about; those remain in
/// the mapping but are never looked up. Duplicate headers are rejected because
/// a lookup would be ambiguous.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Mapping {
    headers: Vec<String>,
    header_map: HashMap<String, usize>,
}

impl Mapping {
    /// Create a new `Mapping` from the strings of a header row.
    pub fn new<S, I>(headers: I) -> Result<Self, MappingError>
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        let headers: Vec<String> = headers.into_iter().map(|s| s.into()).collect();
        let header_map: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, key)| (key.to_owned(), idx))
            .collect();

        if header_map.len() != headers.len() {
            return Err(MappingError(String::from("Encountered a duplicate header")));
        }

        Ok(Self {
            headers,
            header_map,
        })
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The index of `header`, if the export has that column.
    pub fn index_of(&self, header: impl AsRef<str>) -> Option<usize> {
        self.header_map.get(header.as_ref()).copied()
    }

    /// The index of a column that must exist. Errors when the column is
    /// absent from the header row.
    pub fn require(&self, header: impl AsRef<str>) -> Result<usize, MappingError> {
        let header = header.as_ref();
        self.index_of(header).ok_or_else(|| {
            MappingError(format!(
                "Required column '{header}' was not found in the header row"
            ))
        })
    }
}
