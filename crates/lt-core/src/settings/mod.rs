//! Dashboard settings

use std::path::Path;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::pagination::DEFAULT_ITEMS_PER_PAGE;

/// Errors that can occur while loading or saving settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Dashboard-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Page size new list views start with
    pub default_page_size: usize,

    /// Page sizes offered by the page-size selector
    pub page_size_options: Vec<usize>,

    /// Whether tables show absolute row numbers
    pub show_row_numbers: bool,

    /// Whether tables alternate row backgrounds
    pub striped_rows: bool,

    /// Whether to use dark mode
    pub dark_mode: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_ITEMS_PER_PAGE,
            page_size_options: vec![5, 10, 20, 50],
            show_row_numbers: true,
            striped_rows: true,
            dark_mode: true,
        }
    }
}

impl DashboardSettings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&text)?;
        tracing::info!("Loaded dashboard settings from {:?}", path);
        Ok(settings)
    }

    /// Parse and validate settings from JSON text
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        self.validate()?;
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        tracing::debug!("Saved dashboard settings to {:?}", path);
        Ok(())
    }

    /// Check that page sizes are usable
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.default_page_size == 0 {
            return Err(SettingsError::Invalid("default_page_size must be positive".to_string()));
        }
        if self.page_size_options.is_empty() {
            return Err(SettingsError::Invalid("page_size_options must not be empty".to_string()));
        }
        if self.page_size_options.contains(&0) {
            return Err(SettingsError::Invalid("page_size_options must not contain 0".to_string()));
        }
        Ok(())
    }

    /// Page-size options with the default included, sorted and deduplicated
    pub fn page_size_choices(&self) -> Vec<usize> {
        let mut choices = self.page_size_options.clone();
        choices.push(self.default_page_size);
        choices.sort_unstable();
        choices.dedup();
        choices
    }
}
