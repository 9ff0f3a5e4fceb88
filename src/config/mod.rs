//! Configuration management module
//!
//! Chart scenarios (input file, axis label, title) and figure settings,
//! with loading, saving and validation of the settings file.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::models::figure::DEFAULT_SIZE;
use crate::models::table::TIMING_COLUMNS;
use crate::{BmkError, Result, APP_NAME, CONFIG_FILE, DOUBLE_FILE, NODES_FILE};

/// One chart pipeline: where the data lives and how the chart is labeled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Tab-separated measurement file
    pub input_path: PathBuf,
    /// Label given to the independent variable column
    pub x_column: String,
    /// X axis label
    pub x_label: String,
    /// Chart title
    pub title: String,
    /// Whether the first line of the input is a header to discard
    #[serde(default = "default_has_header")]
    pub has_header: bool,
}

fn default_has_header() -> bool {
    true
}

/// Known measurement scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// Integer keys, insertion-size sweep
    Nodes,
    /// Double keys, lookup-count sweep
    Double,
}

impl Scenario {
    /// Independent variable column name for this scenario
    pub fn x_column(&self) -> &'static str {
        match self {
            Scenario::Nodes => "#nodes",
            Scenario::Double => "#elements",
        }
    }

    /// Default measurement file name
    pub fn file_name(&self) -> &'static str {
        match self {
            Scenario::Nodes => NODES_FILE,
            Scenario::Double => DOUBLE_FILE,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::nodes()
    }
}

impl ChartConfig {
    /// Chart for `bmk_measures.txt`
    pub fn nodes() -> Self {
        Self {
            input_path: PathBuf::from(Scenario::Nodes.file_name()),
            x_column: Scenario::Nodes.x_column().to_string(),
            x_label: "# nodes".to_string(),
            title: "Benchmarking comparison".to_string(),
            has_header: true,
        }
    }

    /// Chart for `bmk_measures_double.txt`
    pub fn double() -> Self {
        Self {
            input_path: PathBuf::from(Scenario::Double.file_name()),
            x_column: Scenario::Double.x_column().to_string(),
            x_label: "# elements".to_string(),
            title: "Benchmarking comparison (double)".to_string(),
            has_header: true,
        }
    }

    /// Preset for a scenario
    pub fn for_scenario(scenario: Scenario) -> Self {
        match scenario {
            Scenario::Nodes => Self::nodes(),
            Scenario::Double => Self::double(),
        }
    }

    /// Validate the chart parameters
    pub fn validate(&self) -> Result<()> {
        if self.input_path.as_os_str().is_empty() {
            return Err(BmkError::ConfigError(
                "Input path must not be empty".to_string()
            ));
        }

        if self.x_column.trim().is_empty() {
            return Err(BmkError::ConfigError(
                "Independent column name must not be empty".to_string()
            ));
        }

        // Lookups by label would become ambiguous
        if TIMING_COLUMNS.contains(&self.x_column.as_str()) {
            return Err(BmkError::ConfigError(format!(
                "Independent column name '{}' clashes with a timing column",
                self.x_column
            )));
        }

        Ok(())
    }

    /// Set the input file
    pub fn with_input_path(mut self, path: PathBuf) -> Self {
        self.input_path = path;
        self
    }

    /// Set the chart title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the x axis label
    pub fn with_x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    /// Set whether the input starts with a header line
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }
}

/// Persistent settings: figure size and the two chart presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Figure width in pixels
    pub width: u32,
    /// Figure height in pixels
    pub height: u32,
    pub nodes: ChartConfig,
    pub double: ChartConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIZE.0,
            height: DEFAULT_SIZE.1,
            nodes: ChartConfig::nodes(),
            double: ChartConfig::double(),
        }
    }
}

impl Settings {
    const MIN_DIMENSION: u32 = 200;
    const MAX_DIMENSION: u32 = 10_000;

    /// Chart configuration for a scenario
    pub fn chart(&self, scenario: Scenario) -> &ChartConfig {
        match scenario {
            Scenario::Nodes => &self.nodes,
            Scenario::Double => &self.double,
        }
    }

    /// Figure size in pixels
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Set the figure size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Validate settings and both chart presets
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !(Self::MIN_DIMENSION..=Self::MAX_DIMENSION).contains(&value) {
                return Err(BmkError::ConfigError(format!(
                    "Figure {} must be between {} and {} pixels, got {}",
                    name,
                    Self::MIN_DIMENSION,
                    Self::MAX_DIMENSION,
                    value
                )));
            }
        }

        self.nodes.validate()?;
        self.double.validate()?;
        Ok(())
    }

    /// Load settings from the standard config file location
    /// Returns default settings if the file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        Self::load_from(&config_path)
    }

    /// Load settings from an explicit path, defaulting when it is missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            debug!("No settings at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .map_err(|e| BmkError::ConfigError(
                format!("Failed to read config file {}: {}", config_path.display(), e)
            ))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| BmkError::ConfigError(
                format!("Failed to parse config file {}: {}", config_path.display(), e)
            ))?;

        settings.validate()?;
        debug!("Loaded settings from {}", config_path.display());

        Ok(settings)
    }

    /// Save settings to the standard config file location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path()?;
        self.save_to(&config_path)
    }

    /// Save settings to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| BmkError::ConfigError(
                    format!("Failed to create config directory {}: {}", parent.display(), e)
                ))?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content)
            .map_err(|e| BmkError::ConfigError(
                format!("Failed to write config file {}: {}", config_path.display(), e)
            ))?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/bmkplot/bmkplot.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| BmkError::ConfigError(
                "Unable to determine config directory".to_string()
            ))?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_presets() {
        let nodes = ChartConfig::nodes();
        assert_eq!(nodes.input_path, PathBuf::from("bmk_measures.txt"));
        assert_eq!(nodes.x_column, "#nodes");
        assert_eq!(nodes.title, "Benchmarking comparison");

        let double = ChartConfig::for_scenario(Scenario::Double);
        assert_eq!(double.input_path, PathBuf::from("bmk_measures_double.txt"));
        assert_eq!(double.x_column, "#elements");
        assert_eq!(double.title, "Benchmarking comparison (double)");
    }

    #[test]
    fn test_validate_rejects_clashing_column() {
        let mut config = ChartConfig::nodes();
        config.x_column = "map".to_string();
        assert!(matches!(config.validate(), Err(BmkError::ConfigError(_))));
    }

    #[test]
    fn test_validate_rejects_empty_path() {
        let config = ChartConfig::nodes().with_input_path(PathBuf::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_settings_size_bounds() {
        assert!(Settings::default().validate().is_ok());
        assert!(Settings::default().with_size(10, 1000).validate().is_err());
        assert!(Settings::default().with_size(1000, 20_000).validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("bmkplot.toml");
        let settings = Settings {
            nodes: ChartConfig::nodes().with_title("Insert sweep"),
            ..Settings::default().with_size(800, 600)
        };

        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_has_header_defaults_true() {
        let toml_str = r##"
            width = 1500
            height = 1000

            [nodes]
            input_path = "a.txt"
            x_column = "#nodes"
            x_label = "# nodes"
            title = "A"

            [double]
            input_path = "b.txt"
            x_column = "#elements"
            x_label = "# elements"
            title = "B"
        "##;
        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert!(settings.nodes.has_header);
        assert_eq!(settings.chart(Scenario::Double).title, "B");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Settings::load_from(&temp_dir.path().join("none.toml")).unwrap();
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_config_file_path() {
        if let Ok(path) = Settings::config_file_path() {
            assert!(path.to_string_lossy().contains("bmkplot.toml"));
        }
    }
}
