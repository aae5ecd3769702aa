//! The operations the studio front end triggers, independent of transport.
//!
//! Both the HTTP handlers and the CLI go through [`Studio`], so persistence
//! and logging behave the same whichever surface is used.

use crate::analytics::{self, AnalysisOutput, AnalysisRequest};
use crate::catalog::{self, ChartType, ChartTypeInfo};
use crate::config::ChartConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::options::build_options;
use crate::settings::StudioSettings;
use crate::store::{ConfigStore, SavedChart};
use serde_json::Value;
use std::path::PathBuf;

pub struct Studio {
    store: ConfigStore,
    settings: StudioSettings,
}

impl Studio {
    /// Opens the store named by the settings, or an empty in-memory one
    pub fn open(settings: StudioSettings) -> Result<Self> {
        let store = match &settings.store_path {
            Some(path) => ConfigStore::open_or_default(path)?,
            None => ConfigStore::new(),
        };
        log::info!(
            "studio ready with {} saved chart(s), store: {}",
            store.len(),
            settings
                .store_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "memory".to_string())
        );
        Ok(Studio { store, settings })
    }

    /// A studio that never touches the disk
    pub fn in_memory() -> Self {
        Studio {
            store: ConfigStore::new(),
            settings: StudioSettings {
                store_path: None,
                ..StudioSettings::default()
            },
        }
    }

    pub fn settings(&self) -> &StudioSettings {
        &self.settings
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    fn store_path(&self) -> Option<&PathBuf> {
        self.settings.store_path.as_ref()
    }

    /// Applies one store mutation and autosaves it
    ///
    /// When the save fails the store is put back as it was, so memory never
    /// holds a change the caller was told did not happen.
    fn commit<T>(&mut self, change: impl FnOnce(&mut ConfigStore) -> Result<T>) -> Result<T> {
        if !self.settings.autosave || self.store_path().is_none() {
            return change(&mut self.store);
        }
        let snapshot = self.store.clone();
        let out = change(&mut self.store)?;
        if let Err(e) = self.flush() {
            log::warn!("autosave failed, change rolled back: {}", e);
            self.store = snapshot;
            return Err(e);
        }
        Ok(out)
    }

    /// Writes the store to its file, if it has one
    pub fn flush(&self) -> Result<()> {
        if let Some(path) = self.store_path() {
            self.store.save_to_file(path)?;
        }
        Ok(())
    }

    pub fn chart_types(&self) -> Vec<ChartTypeInfo> {
        catalog::catalog()
    }

    /// A fresh configuration for the picker, using the default theme
    pub fn new_config(&self, chart_type: ChartType) -> ChartConfig {
        let mut config = ChartConfig::new(chart_type);
        config.theme = self.settings.default_theme;
        config
    }

    pub fn list_charts(&self) -> &[SavedChart] {
        self.store.list()
    }

    pub fn get_chart(&self, id: &str) -> Result<&SavedChart> {
        self.store.get(id)
    }

    pub fn create_chart(&mut self, name: &str, config: ChartConfig) -> Result<SavedChart> {
        self.commit(|store| Ok(store.create(name, config)?.clone()))
    }

    pub fn update_chart(&mut self, id: &str, name: &str, config: ChartConfig) -> Result<SavedChart> {
        self.commit(|store| Ok(store.update(id, name, config)?.clone()))
    }

    pub fn delete_chart(&mut self, id: &str) -> Result<SavedChart> {
        self.commit(|store| store.delete(id))
    }

    /// A saved chart as standalone JSON
    pub fn export_chart(&self, id: &str) -> Result<String> {
        self.store.export_json(id)
    }

    /// Saves a chart exported from another studio under a fresh id
    pub fn import_chart(&mut self, json: &str) -> Result<SavedChart> {
        self.commit(|store| Ok(store.import_json(json)?.clone()))
    }

    pub fn build_options(&self, config: &ChartConfig) -> Result<Value> {
        build_options(config)
    }

    /// Options of a saved chart
    pub fn build_options_for(&self, id: &str) -> Result<Value> {
        build_options(&self.store.get(id)?.config)
    }

    /// Thumbnail size from the settings
    #[cfg(feature = "preview")]
    pub fn preview_options(&self) -> crate::preview::PreviewOptions {
        crate::preview::PreviewOptions {
            width: self.settings.preview_width,
            height: self.settings.preview_height,
        }
    }

    /// PNG thumbnail at the configured preview size
    #[cfg(feature = "preview")]
    pub fn preview(&self, config: &ChartConfig) -> Result<Vec<u8>> {
        crate::preview::render_preview(config, &self.preview_options())
    }

    pub fn analyze(&self, dataset: &Dataset, request: &AnalysisRequest) -> Result<AnalysisOutput> {
        analytics::run_analysis(dataset, request)
    }

    pub fn import_csv(&self, text: &str) -> Result<Dataset> {
        let dataset = Dataset::from_csv_str(text)?;
        log::info!(
            "imported dataset with {} column(s) and {} row(s)",
            dataset.column_count(),
            dataset.row_count()
        );
        Ok(dataset)
    }
}
