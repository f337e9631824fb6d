use std::path::Path;
use std::sync::mpsc::{Receiver, TryRecvError};

use crate::config::{Catalog, Config};
use crate::data::filter::filtered_indices;
use crate::data::loader::{self, LoadResult};
use crate::data::model::Dataset;
use crate::data::render::{render, CardList};
use crate::theme::Theme;

/// Replaces the list when a load fails.
pub const LOAD_ERROR_MESSAGE: &str = "Error loading door data.";

// ---------------------------------------------------------------------------
// Load / search state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing requested yet.
    Idle,
    Loading,
    Loaded,
    /// Holds the error text for the log line / tooltip.
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Raw text as typed.
    pub query: String,
    /// "No results" text; `None` while hidden.
    pub no_results: Option<String>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full page state, independent of rendering.
pub struct AppState {
    pub config: Config,

    /// Sheet currently shown.
    pub catalog: Catalog,

    /// Full dataset of the last successful load (empty until then).
    pub dataset: Dataset,

    /// Indices of records passing the current search (cached).
    pub visible_indices: Vec<usize>,

    /// Cards currently displayed.
    pub cards: CardList,

    pub search: SearchState,

    pub status: LoadStatus,

    pub theme: Theme,

    /// Result channel of the in-flight load, if any.
    pending: Option<Receiver<LoadResult>>,
}

impl AppState {
    pub fn new(config: Config, catalog: Catalog, theme: Theme) -> Self {
        Self {
            config,
            catalog,
            dataset: Dataset::default(),
            visible_indices: Vec::new(),
            cards: CardList::default(),
            search: SearchState::default(),
            status: LoadStatus::Idle,
            theme,
            pending: None,
        }
    }

    /// URL of the active catalog's sheet.
    pub fn source_url(&self) -> &str {
        self.config.url_for(self.catalog)
    }

    /// Kick off a background download of the active catalog.
    ///
    /// Any load still in flight is superseded; its result is dropped.
    pub fn start_load<F>(&mut self, on_done: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let url = self.source_url().to_string();
        log::info!("Loading {} from {url}", self.catalog.label());
        self.status = LoadStatus::Loading;
        self.pending = Some(loader::spawn_load(url, self.config.timeout(), on_done));
    }

    /// Pick up a finished load, if one arrived. Call once per frame.
    pub fn poll_load(&mut self) {
        let Some(rx) = &self.pending else {
            return;
        };
        match rx.try_recv() {
            Ok(result) => {
                self.pending = None;
                self.finish_load(result);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                self.fail_load("load worker exited without a result".to_string());
            }
        }
    }

    /// Text shown while the active catalog is being fetched.
    pub fn loading_message(&self) -> String {
        format!("Loading {} data…", self.catalog.label().to_lowercase())
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// Apply the outcome of a load.
    pub fn finish_load(&mut self, result: LoadResult) {
        match result {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records ({} displayable) with columns {:?}",
                    dataset.len(),
                    dataset.displayable(),
                    dataset.columns
                );
                self.set_dataset(dataset);
            }
            Err(e) => self.fail_load(e.to_string()),
        }
    }

    /// Load a local CSV export synchronously.
    pub fn load_file(&mut self, path: &Path) {
        log::info!("Loading {}", path.display());
        self.pending = None;
        let result = loader::load_file(path);
        self.finish_load(result);
    }

    /// Replace the dataset and redraw.
    ///
    /// A search typed while loading is applied to the new data; otherwise
    /// the full list is shown with no indicator.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.status = LoadStatus::Loaded;
        if self.search.query.trim().is_empty() {
            self.show_all();
        } else {
            self.apply_search();
        }
    }

    fn fail_load(&mut self, message: String) {
        log::error!("Failed to load {}: {message}", self.catalog.label());
        self.dataset = Dataset::default();
        self.visible_indices.clear();
        self.cards = CardList::default();
        self.status = LoadStatus::Failed(message);
    }

    /// Re-run the search for the current query and redraw.
    pub fn apply_search(&mut self) {
        self.visible_indices = filtered_indices(&self.dataset, &self.search.query);
        log::debug!(
            "Search {:?}: {} of {} records",
            self.search.query,
            self.visible_indices.len(),
            self.dataset.len()
        );
        self.search.no_results = if self.visible_indices.is_empty() {
            Some(format!("🔍 No results found for \"{}\"", self.search.query))
        } else {
            None
        };
        self.rerender();
    }

    /// Empty the query, hide the indicator and show the full dataset.
    pub fn clear_search(&mut self) {
        self.search.query.clear();
        self.show_all();
    }

    fn show_all(&mut self) {
        self.search.no_results = None;
        self.visible_indices = (0..self.dataset.len()).collect();
        self.rerender();
    }

    fn rerender(&mut self) {
        let records = &self.dataset.records;
        self.cards = render(
            &self.dataset.columns,
            self.visible_indices.iter().map(|&i| (i, &records[i])),
        );
    }

    /// Expand/collapse one card.
    pub fn toggle_card(&mut self, index: usize) {
        self.cards.toggle(index);
    }

    /// Show another sheet: reset search and data, then load it.
    pub fn switch_catalog<F>(&mut self, catalog: Catalog, on_done: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if catalog == self.catalog {
            return;
        }
        self.catalog = catalog;
        self.search = SearchState::default();
        self.dataset = Dataset::default();
        self.visible_indices.clear();
        self.cards = CardList::default();
        self.start_load(on_done);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }
}
