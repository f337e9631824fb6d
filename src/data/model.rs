/// Field used as card title and search key.
pub const MODEL_FIELD: &str = "model";

/// Canonical form of a field name: trimmed and lower-cased.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Canonical form of a cell value: trimmed.
pub fn normalize_value(value: &str) -> String {
    value.trim().to_string()
}

// ---------------------------------------------------------------------------
// Record – one normalized spreadsheet row
// ---------------------------------------------------------------------------

/// A product entry: field name → value, in order of first appearance.
///
/// Keys and values are always stored normalized, so building a record from
/// another record's fields yields an identical record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field. An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: &str, value: &str) {
        let key = normalize_key(key);
        let value = normalize_value(value);
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Look up a field by name (case and surrounding whitespace ignored).
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = normalize_key(key);
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The model name, if present and non-empty.
    pub fn model(&self) -> Option<&str> {
        self.get(MODEL_FIELD).filter(|m| !m.is_empty())
    }

    /// All fields in stored order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Fields in the given column order first, then any the columns don't name.
    pub fn fields_in_order<'a>(
        &'a self,
        columns: &'a [String],
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        let known = columns
            .iter()
            .filter_map(move |col| self.get(col).map(|v| (col.as_str(), v)));
        let rest = self
            .fields()
            .filter(move |(k, _)| !columns.iter().any(|c| c.as_str() == *k));
        known.chain(rest)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k.as_ref(), v.as_ref());
        }
        record
    }
}

// ---------------------------------------------------------------------------
// Dataset – everything loaded from one sheet
// ---------------------------------------------------------------------------

/// The full parsed sheet: ordered records plus the declared column order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Normalized header names, de-duplicated, in sheet order.
    pub columns: Vec<String>,
    /// All rows, including ones without a model.
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(columns.len());
        for col in columns {
            let col = normalize_key(&col);
            if !col.is_empty() && !unique.contains(&col) {
                unique.push(col);
            }
        }
        Dataset {
            columns: unique,
            records,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records that can be displayed (non-empty model).
    pub fn displayable(&self) -> usize {
        self.records.iter().filter(|r| r.model().is_some()).count()
    }
}
