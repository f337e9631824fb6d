/// Data layer: records, loading, filtering and the card view-model.
///
/// Architecture:
/// ```text
///  published sheet (CSV over HTTPS) / local .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse → normalized Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, declared column order
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  search text → matching indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  render   │  indices → collapsible cards
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod render;
