// User settings
// Loaded from ~/.config/taskgrid/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use taskgrid_engine::{GridLimits, DEFAULT_COLUMN_WIDTH, MIN_COLUMN_WIDTH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Grid
    #[serde(rename = "grid.defaultColumnWidth")]
    pub default_column_width: f32,

    #[serde(rename = "grid.minColumnWidth")]
    pub min_column_width: f32,

    // Storage (None = <data_dir>/taskgrid/grid.sqlite3)
    #[serde(rename = "storage.path", skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_column_width: DEFAULT_COLUMN_WIDTH,
            min_column_width: MIN_COLUMN_WIDTH,
            storage_path: None,
        }
    }
}

const DEFAULT_FILE: &str = r#"{
    // Width of a column nobody has resized yet
    "grid.defaultColumnWidth": 150,

    // Columns can't be dragged narrower than this
    "grid.minColumnWidth": 50

    // Where the grid is stored (defaults to the user data directory)
    // "storage.path": "/path/to/grid.sqlite3"
}
"#;

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("taskgrid")
            .join("settings.json")
    }

    /// Load settings from the default location, writing a commented default
    /// file on first run.
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            create_default_file(&path);
            return Self::default();
        }
        Self::load_from(&path)
    }

    /// Load settings from `path`. Missing or unreadable files give defaults.
    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                if path.exists() {
                    log::warn!("error reading {}: {e}", path.display());
                }
                return Self::default();
            }
        };

        // Strip comments (lines starting with //)
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        match serde_json::from_str(&cleaned) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("error parsing {}: {e}; using default settings", path.display());
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Width limits for the grid store.
    ///
    /// The minimum can be raised but never set below the built-in 50px
    /// floor, and the default width is raised to the minimum if below it.
    pub fn grid_limits(&self) -> GridLimits {
        let min_width = if self.min_column_width.is_finite() {
            self.min_column_width.max(MIN_COLUMN_WIDTH)
        } else {
            MIN_COLUMN_WIDTH
        };
        let default_width = if self.default_column_width.is_finite() {
            self.default_column_width.max(min_width)
        } else {
            DEFAULT_COLUMN_WIDTH.max(min_width)
        };
        GridLimits {
            default_width,
            min_width,
        }
    }

    /// Blob store location, with the user data directory as fallback.
    pub fn storage_path(&self) -> PathBuf {
        self.storage_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("taskgrid")
                .join("grid.sqlite3")
        })
    }
}

fn create_default_file(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            log::warn!("error creating config directory: {e}");
            return;
        }
    }
    if let Err(e) = fs::write(path, DEFAULT_FILE) {
        log::warn!("error writing default settings.json: {e}");
    }
}
