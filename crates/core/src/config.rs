use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::chdman::{Chdman, DEFAULT_PROGRAM};
use crate::error::Result;
use crate::schema::ResourceStore;

/// Overrides `chdman_path` when set.
pub const CHDMAN_ENV: &str = "CHDGUI_CHDMAN";
pub const DEFAULT_MAX_OPTIONS_PER_COLUMN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub chdman_path: PathBuf,
    pub max_options_per_column: usize,
    pub default_output_dir: Option<PathBuf>,
    pub resources_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chdman_path: PathBuf::from(DEFAULT_PROGRAM),
            max_options_per_column: DEFAULT_MAX_OPTIONS_PER_COLUMN,
            default_output_dir: None,
            resources_dir: None,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(std::env::temp_dir);
        path.push("chdgui");
        path.push("config.json");
        path
    }

    /// Loads the user config and applies the environment override.
    pub fn load() -> Result<Self> {
        let config = Self::load_from(&Self::default_path())?;
        Ok(config.with_chdman_override(std::env::var_os(CHDMAN_ENV)))
    }

    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let config = serde_json::from_str(&contents)?;
                log::debug!("loaded config from {}", path.display());
                Ok(config)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Stores `output_dir` as the default in the file at `path`, leaving
    /// every other stored field as written. Runtime overrides are never
    /// persisted.
    pub fn remember_output_dir(path: &Path, output_dir: &Path) -> Result<()> {
        let mut stored = Self::load_from(path)?;
        stored.default_output_dir = Some(output_dir.to_path_buf());
        stored.save_to(path)
    }

    pub fn with_chdman_override(mut self, program: Option<OsString>) -> Self {
        if let Some(program) = program.filter(|p| !p.is_empty()) {
            self.chdman_path = PathBuf::from(program);
        }
        self
    }

    pub fn chdman(&self) -> Chdman {
        Chdman::new(&self.chdman_path)
    }

    pub fn resource_store(&self) -> ResourceStore {
        match &self.resources_dir {
            Some(dir) => ResourceStore::Directory(dir.clone()),
            None => ResourceStore::Embedded,
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.default_output_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
