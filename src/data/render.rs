use super::model::{Record, MODEL_FIELD};

/// Shown in place of an empty value.
pub const PLACEHOLDER: &str = "N/A";

/// Link text used for datasheet fields.
pub const DOWNLOAD_LABEL: &str = "Download";

// ---------------------------------------------------------------------------
// Field formatting
// ---------------------------------------------------------------------------

/// Turn a raw field name into a label: `opening-speed` → `Opening Speed`.
pub fn humanize(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut word_start = true;
    for ch in key.chars() {
        let ch = if ch == '-' || ch == '_' { ' ' } else { ch };
        if ch.is_alphanumeric() {
            if word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.push(ch);
            }
            word_start = false;
        } else {
            out.push(ch);
            word_start = true;
        }
    }
    out
}

/// How a single value is displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// Opens in the browser.
    Link { url: String, text: String },
    Missing,
}

impl FieldValue {
    pub fn display(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Link { text, .. } => text,
            FieldValue::Missing => PLACEHOLDER,
        }
    }
}

/// Classify a value for display under field `key`.
pub fn format_value(key: &str, value: &str) -> FieldValue {
    if value.is_empty() {
        FieldValue::Missing
    } else if value.starts_with("http") {
        let text = if key.to_lowercase().contains("datasheet") {
            DOWNLOAD_LABEL.to_string()
        } else {
            value.to_string()
        };
        FieldValue::Link {
            url: value.to_string(),
            text,
        }
    } else {
        FieldValue::Text(value.to_string())
    }
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLine {
    pub label: String,
    pub value: FieldValue,
}

impl CardLine {
    /// `Label: value` as plain text.
    pub fn to_text(&self) -> String {
        format!("{}: {}", self.label, self.value.display())
    }
}

/// One collapsible entry.
#[derive(Debug, Clone)]
pub struct Card {
    /// Position of the source record in the dataset.
    pub record_index: usize,
    pub title: String,
    pub lines: Vec<CardLine>,
    pub expanded: bool,
}

impl Card {
    fn from_record(record_index: usize, record: &Record, columns: &[String]) -> Option<Self> {
        let model = record.model()?;
        let lines = record
            .fields_in_order(columns)
            .filter(|(key, _)| *key != MODEL_FIELD)
            .map(|(key, value)| CardLine {
                label: humanize(key),
                value: format_value(key, value),
            })
            .collect();
        Some(Card {
            record_index,
            title: format!("Model: {model}"),
            lines,
            expanded: false,
        })
    }

    /// Arrow reflecting the expanded flag.
    pub fn indicator(&self) -> &'static str {
        if self.expanded {
            "▼"
        } else {
            "▶"
        }
    }
}

/// The rendered list. Always rebuilt whole; never patched.
#[derive(Debug, Clone, Default)]
pub struct CardList {
    cards: Vec<Card>,
}

impl CardList {
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Flip one card. Returns the new state, or `None` for a bad index.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let card = self.cards.get_mut(index)?;
        card.expanded = !card.expanded;
        Some(card.expanded)
    }
}

/// Build cards for `(dataset index, record)` pairs.
///
/// Records without a model are skipped. Every card starts collapsed.
pub fn render<'a, I>(columns: &[String], records: I) -> CardList
where
    I: IntoIterator<Item = (usize, &'a Record)>,
{
    let cards = records
        .into_iter()
        .filter_map(|(i, record)| Card::from_record(i, record, columns))
        .collect();
    CardList { cards }
}
