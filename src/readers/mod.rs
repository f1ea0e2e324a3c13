pub mod observation_reader;
pub mod reference_reader;

pub use observation_reader::ObservationReader;
pub use reference_reader::ReferenceReader;

/// Resolve a column by header name, tolerating stray whitespace in the header
/// row. `None` means the source lacks the column and every dependent
/// computation degrades to "unavailable".
pub(crate) fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

/// Fetch a trimmed, non-empty cell from a row.
pub(crate) fn cell<'a>(row: &'a csv::StringRecord, index: Option<usize>) -> Option<&'a str> {
    let value = row.get(index?)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
