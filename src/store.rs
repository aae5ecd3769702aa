use crate::config::ChartConfig;
use crate::error::{Result, StudioError};
use bincode::{deserialize_from, serialize_into};
use chrono::{DateTime, Utc};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use uuid::Uuid;

pub const MAX_NAME_LEN: usize = 120;

/// A named chart configuration as kept by the save/load dialog
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedChart {
    pub id: String,
    pub name: String,
    pub config: ChartConfig,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Saved charts keyed by id, kept in creation order
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConfigStore {
    charts: Vec<SavedChart>,
}

fn check_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StudioError::invalid("Chart name must not be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(StudioError::invalid(format!(
            "Chart name is longer than {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(name.to_string())
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// All saved charts, oldest first
    pub fn list(&self) -> &[SavedChart] {
        &self.charts
    }

    pub fn get(&self, id: &str) -> Result<&SavedChart> {
        self.charts
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| StudioError::NotFound(id.to_string()))
    }

    /// Case-insensitive lookup by display name
    pub fn find_by_name(&self, name: &str) -> Option<&SavedChart> {
        let wanted = name.trim().to_lowercase();
        self.charts.iter().find(|c| c.name.to_lowercase() == wanted)
    }

    fn ensure_unique_name(&self, name: &str, except_id: Option<&str>) -> Result<()> {
        match self.find_by_name(name) {
            Some(existing) if Some(existing.id.as_str()) != except_id => Err(
                StudioError::Conflict(format!("A chart named '{}' already exists", existing.name)),
            ),
            _ => Ok(()),
        }
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.charts
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StudioError::NotFound(id.to_string()))
    }

    /// Saves a new chart under a fresh id and returns it
    pub fn create(&mut self, name: &str, config: ChartConfig) -> Result<&SavedChart> {
        let name = check_name(name)?;
        self.ensure_unique_name(&name, None)?;
        config.validate()?;

        let now = Utc::now();
        let chart = SavedChart {
            id: Uuid::new_v4().to_string(),
            name,
            config,
            created_at: now,
            updated_at: now,
        };
        log::info!("created chart '{}' ({})", chart.name, chart.id);
        self.charts.push(chart);
        Ok(&self.charts[self.charts.len() - 1])
    }

    /// Replaces the name and configuration of an existing chart
    pub fn update(&mut self, id: &str, name: &str, config: ChartConfig) -> Result<&SavedChart> {
        let idx = self.position(id)?;
        let name = check_name(name)?;
        self.ensure_unique_name(&name, Some(id))?;
        config.validate()?;

        let chart = &mut self.charts[idx];
        chart.name = name;
        chart.config = config;
        chart.updated_at = Utc::now().max(chart.created_at);
        log::info!("updated chart '{}' ({})", chart.name, chart.id);
        Ok(&self.charts[idx])
    }

    pub fn rename(&mut self, id: &str, name: &str) -> Result<&SavedChart> {
        let config = self.get(id)?.config.clone();
        self.update(id, name, config)
    }

    /// Removes a chart and hands it back
    pub fn delete(&mut self, id: &str) -> Result<SavedChart> {
        let idx = self.position(id)?;
        let chart = self.charts.remove(idx);
        log::info!("deleted chart '{}' ({})", chart.name, chart.id);
        Ok(chart)
    }

    /// Writes the whole store as gzip-compressed bincode
    pub fn save_to_file(&self, filename: impl AsRef<Path>) -> Result<()> {
        let file = File::create(filename.as_ref())?;
        self.write_to(file)?;
        log::debug!(
            "saved {} chart(s) to {}",
            self.charts.len(),
            filename.as_ref().display()
        );
        Ok(())
    }

    /// Reads a store written by [`ConfigStore::save_to_file`]
    pub fn load_from_file(filename: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(filename.as_ref())?;
        let store = Self::read_from(file)?;
        log::debug!(
            "loaded {} chart(s) from {}",
            store.charts.len(),
            filename.as_ref().display()
        );
        Ok(store)
    }

    /// Loads the store at `filename`, or starts empty when the file does not exist yet
    pub fn open_or_default(filename: impl AsRef<Path>) -> Result<Self> {
        if filename.as_ref().exists() {
            Self::load_from_file(filename)
        } else {
            Ok(Self::new())
        }
    }

    /// Serializes the store into any writer using the on-disk format
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let encoder = GzEncoder::new(writer, Compression::default());
        let mut writer = BufWriter::new(encoder);
        serialize_into(&mut writer, self)?;
        let encoder = writer
            .into_inner()
            .map_err(|e| StudioError::Io(e.into_error()))?;
        encoder.finish()?;
        Ok(())
    }

    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        let decoder = GzDecoder::new(reader);
        let mut reader = BufReader::new(decoder);
        let store: ConfigStore = deserialize_from(&mut reader)?;
        Ok(store)
    }

    /// One saved chart as pretty JSON, for sharing outside the studio
    pub fn export_json(&self, id: &str) -> Result<String> {
        Ok(serde_json::to_string_pretty(self.get(id)?)?)
    }

    /// Imports a chart exported with [`ConfigStore::export_json`]
    ///
    /// The imported chart gets a fresh id and timestamps so it never
    /// overwrites an existing entry; the name must still be unique.
    pub fn import_json(&mut self, json: &str) -> Result<&SavedChart> {
        let chart: SavedChart = serde_json::from_str(json)?;
        self.create(&chart.name, chart.config)
    }
}
