//! User settings, persisted as TOML.
//!
//! Settings live in the platform configuration folder unless a path is given
//! with `--config`:
//! - macOS: ~/Library/Application Support/org.dosecalc.dosecalc/
//! - Windows: %APPDATA%/dosecalc/dosecalc/config/
//! - Linux: ~/.config/dosecalc/

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use dosecalc_model::{CreatinineUnit, PatientInputs, Sex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "dosecalc";
const APP_NAME: &str = "dosecalc";
const CONFIG_FILENAME: &str = "settings.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write settings {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse settings {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize settings")]
    Serialize(#[from] toml::ser::Error),

    #[error("could not determine the settings directory")]
    NoConfigDir,
}

/// Application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub defaults: PatientDefaults,
    pub output: OutputSettings,
}

/// Values used when the corresponding flag or batch column is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientDefaults {
    pub sex: Sex,
    pub creatinine_unit: CreatinineUnit,
}

impl PatientDefaults {
    /// An empty input snapshot carrying these defaults.
    pub fn inputs(&self) -> PatientInputs {
        PatientInputs::new()
            .with_sex(self.sex)
            .with_creatinine_unit(self.creatinine_unit)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Default settings file location.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings.
///
/// An explicit path must exist and parse. Without one, the default location
/// is tried and any problem falls back to defaults with a log message.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, SettingsError> {
    if let Some(path) = explicit {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = parse_settings(&content, path)?;
        tracing::info!("Loaded settings from {:?}", path);
        return Ok(settings);
    }

    let Some(path) = settings_path() else {
        tracing::warn!("Could not determine settings path, using defaults");
        return Ok(Settings::default());
    };

    match fs::read_to_string(&path) {
        Ok(content) => match parse_settings(&content, &path) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {:?}", path);
                Ok(settings)
            }
            Err(e) => {
                let detail = std::error::Error::source(&e)
                    .map(ToString::to_string)
                    .unwrap_or_default();
                tracing::warn!("{}: {}, using defaults", e, detail);
                Ok(Settings::default())
            }
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!("No settings file found at {:?}, using defaults", path);
            Ok(Settings::default())
        }
        Err(e) => {
            tracing::warn!("Failed to read settings file: {}, using defaults", e);
            Ok(Settings::default())
        }
    }
}

/// Load settings that are about to be written back with `config --init`.
///
/// Same as [`load_settings`], except that a missing explicit file yields
/// defaults instead of an error.
pub fn load_settings_for_init(explicit: Option<&Path>) -> Result<Settings, SettingsError> {
    match explicit {
        Some(path) if !path.exists() => {
            tracing::info!("No settings file at {:?}, starting from defaults", path);
            Ok(Settings::default())
        }
        _ => load_settings(explicit),
    }
}

pub fn parse_settings(content: &str, path: &Path) -> Result<Settings, SettingsError> {
    toml::from_str(content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize settings to pretty TOML.
pub fn render_settings(settings: &Settings) -> Result<String, SettingsError> {
    Ok(toml::to_string_pretty(settings)?)
}

/// Save settings, creating the parent directory if needed.
pub fn save_settings(settings: &Settings, path: &Path) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let content = render_settings(settings)?;
    fs::write(path, content).map_err(|source| SettingsError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Saved settings to {:?}", path);
    Ok(())
}
