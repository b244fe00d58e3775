use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::error::{Result, WxError};

pub const DEFAULT_ZIP_CODE: &str = "10001";

/// Display mode forwarded verbatim to the weather API as `units=`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    /// Suffix used on every temperature label.
    pub fn degree_suffix(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Metric, UnitSystem::Imperial]
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = WxError;

    fn try_from(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "metric" | "celsius" => Ok(UnitSystem::Metric),
            "imperial" | "fahrenheit" => Ok(UnitSystem::Imperial),
            _ => Err(WxError::Config(format!(
                "unknown unit system '{value}', expected metric or imperial"
            ))),
        }
    }
}

/// The three user settings. Empty strings are accepted as-is.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub zip_code: String,
    pub units: UnitSystem,
    pub api_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            zip_code: DEFAULT_ZIP_CODE.to_string(),
            units: UnitSystem::default(),
            api_key: String::new(),
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("zip_code", &self.zip_code)
            .field("units", &self.units)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// On-disk layout:
///
/// ```toml
/// [settings]
/// zip_code = "10001"
/// units = "metric"
/// api_key = ""
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    settings: Settings,
}

/// Reads and writes [`Settings`] at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform config directory.
    pub fn at_default_location() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn default_path() -> Result<PathBuf> {
        let dirs = project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings from disk. `Ok(None)` means the app has never been configured.
    pub fn load(&self) -> Result<Option<Settings>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no settings file yet");
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)?;
        let file: SettingsFile = toml::from_str(&contents).map_err(|e| {
            WxError::Config(format!("failed to parse {}: {e}", self.path.display()))
        })?;

        Ok(Some(file.settings))
    }

    /// Replace the whole settings file. Writes a sibling temp file and renames it
    /// over the target so readers never see a half-written file.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let file = SettingsFile { settings: settings.clone() };
        let body = toml::to_string_pretty(&file)
            .map_err(|e| WxError::Config(format!("failed to serialize settings: {e}")))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&parent)?;
        tmp.write_all(body.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| WxError::Io(e.error))?;

        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

/// Default location of the GeoNames postal dump used by the state resolver.
pub fn default_postal_data_path() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    Ok(dirs.data_dir().join("US.txt"))
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "hamwx", "hamwx")
        .ok_or_else(|| WxError::Config("could not determine platform directories".to_string()))
}
