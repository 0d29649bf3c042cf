use std::path::Path;

use crate::color::ColorMap;
use crate::data::filter::FilterState;
use crate::data::loader::load_file;
use crate::data::model::SalesDataset;
use crate::data::pipeline::{build_view, DashboardView};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<SalesDataset>,

    /// Category / sub-category selection. None while no rows are loaded.
    pub filters: Option<FilterState>,

    /// Everything derived from `dataset` + `filters`, rebuilt on each change.
    pub view: Option<DashboardView>,

    /// Colours for the sub-categories of the selected category.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded dataset and reset the selection.
    pub fn set_dataset(&mut self, dataset: SalesDataset) {
        self.filters = FilterState::for_dataset(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refresh();
    }

    /// Load `path`, replacing the current dataset on success. On failure the
    /// previous dataset stays and the error goes to the status line.
    pub fn open_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} orders in {} categories from {}",
                    dataset.len(),
                    dataset.categories.len(),
                    path.display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Choose the category in the dropdown.
    pub fn select_category(&mut self, category: &str) {
        if let (Some(ds), Some(filters)) = (&self.dataset, &mut self.filters) {
            filters.set_category(ds, category);
        }
        self.refresh();
    }

    /// Toggle one entry of the sub-category multi-select.
    pub fn toggle_sub_category(&mut self, sub_category: &str) {
        if let Some(filters) = &mut self.filters {
            filters.toggle_sub_category(sub_category);
        }
        self.refresh();
    }

    /// Select every sub-category of the current category.
    pub fn select_all(&mut self) {
        if let (Some(ds), Some(filters)) = (&self.dataset, &mut self.filters) {
            filters.select_all(ds);
        }
        self.refresh();
    }

    /// Deselect all sub-categories.
    pub fn select_none(&mut self) {
        if let Some(filters) = &mut self.filters {
            filters.select_none();
        }
        self.refresh();
    }

    /// Recompute the whole derived view from the current selection.
    fn refresh(&mut self) {
        self.view = match (&self.dataset, &self.filters) {
            (Some(ds), Some(filters)) => Some(build_view(ds, filters)),
            _ => None,
        };
        self.color_map = self
            .view
            .as_ref()
            .map(|v| ColorMap::new(&v.sub_category_options))
            .unwrap_or_default();
    }
}
