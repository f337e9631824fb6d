use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Model search
// ---------------------------------------------------------------------------

/// Trim and lower-case a raw search string.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Whether a record's model contains an already-normalized query.
///
/// A record without a model only matches the empty query.
pub fn matches(record: &Record, normalized_query: &str) -> bool {
    record
        .model()
        .unwrap_or("")
        .to_lowercase()
        .contains(normalized_query)
}

/// Return indices of records whose model contains `query`, in dataset order.
///
/// The query is normalized here; only the `model` field is searched.
pub fn filtered_indices(dataset: &Dataset, query: &str) -> Vec<usize> {
    let query = normalize_query(query);
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches(record, &query))
        .map(|(i, _)| i)
        .collect()
}
