//! Configuration and data file handling
//!
//! Two small YAML records are persisted at platform-convention locations:
//! user preferences in the config directory and the active-project list in
//! the data directory. Loading and saving are tolerant by design: a missing
//! file yields defaults, a corrupt file yields defaults with a warning, and
//! a failed write is a warning rather than an error.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use colored::Colorize;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Environment variable that overrides the configured projects folder.
pub const PROJECTS_FOLDER_ENV: &str = "DOCKER_CAPTAIN_PROJECTS_FOLDER";

const APP_NAME: &str = "docker-captain";

#[derive(Debug, Error)]
enum RecordError {
    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("Failed to serialize {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// A record persisted as a YAML file at a fixed default path.
///
/// Unknown keys in the file are dropped and missing keys fall back to the
/// field defaults, so older and newer files both load cleanly.
pub trait CaptainFile: Default + Serialize + DeserializeOwned {
    /// Platform-convention location for this record.
    fn default_path() -> PathBuf;

    /// Load the record from `path` (or the default path).
    fn load(path: Option<&Path>) -> Self {
        let path = path.map_or_else(Self::default_path, Path::to_path_buf);

        match read_record(&path) {
            Ok(Some(record)) => record,
            Ok(None) => Self::default(),
            Err(err) => {
                println!("{} Warning: {}", "⚠".yellow(), err);
                Self::default()
            }
        }
    }

    /// Write the record to `path` (or the default path) as YAML,
    /// creating parent directories as needed.
    fn save(&self, path: Option<&Path>) {
        let path = path.map_or_else(Self::default_path, Path::to_path_buf);

        if let Err(err) = write_record(self, &path) {
            println!("{} Warning: {}", "⚠".yellow(), err);
        }
    }
}

fn read_record<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, RecordError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|source| RecordError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let record = serde_yaml::from_str(&content).map_err(|source| RecordError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Some(record))
}

fn write_record<T: Serialize>(record: &T, path: &Path) -> Result<(), RecordError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| RecordError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let content = serde_yaml::to_string(record).map_err(|source| RecordError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, content).map_err(|source| RecordError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// User preferences, stored in the platform config directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptainConfig {
    pub theme: String,
    pub auto_update: bool,
    pub recent_files: Vec<PathBuf>,
    /// Fallback projects folder, overridden by [`PROJECTS_FOLDER_ENV`].
    pub projects_folder: Option<PathBuf>,
}

impl Default for CaptainConfig {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            auto_update: true,
            recent_files: Vec::new(),
            projects_folder: None,
        }
    }
}

impl CaptainFile for CaptainConfig {
    fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
            .join("config.yaml")
    }
}

/// Active-project bookkeeping, stored in the platform data directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptainData {
    /// Project names marked active, kept sorted and deduplicated.
    pub active_projects: Vec<String>,
}

impl CaptainFile for CaptainData {
    fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
            .join("data.yaml")
    }
}
