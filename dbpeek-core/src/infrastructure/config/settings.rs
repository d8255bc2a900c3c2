// dbpeek-core/src/infrastructure/config/settings.rs
//
// Layering: settings file < environment < command line.
// Environment and command line are merged by clap before reaching `with_overrides`.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::domain::{Engine, OutputFormat};
use crate::infrastructure::error::InfrastructureError;

pub const SETTINGS_CANDIDATES: [&str; 2] = ["dbpeek.yaml", "dbpeek.yml"];

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PeekSettings {
    /// Database file to inspect. Relative paths are resolved against the settings file.
    pub database: Option<PathBuf>,
    /// `None` means auto-detect.
    pub engine: Option<Engine>,
    pub format: OutputFormat,
}

/// Fully resolved input of one inspection run.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectRequest {
    pub database: PathBuf,
    pub engine: Option<Engine>,
    pub format: OutputFormat,
}

impl PeekSettings {
    pub fn with_overrides(
        mut self,
        database: Option<PathBuf>,
        engine: Option<Engine>,
        format: Option<OutputFormat>,
    ) -> Self {
        if let Some(val) = database {
            debug!(old = ?self.database, new = ?val, "Overriding database path");
            self.database = Some(val);
        }
        if let Some(val) = engine {
            self.engine = Some(val);
        }
        if let Some(val) = format {
            self.format = val;
        }
        self
    }

    pub fn into_request(self) -> Result<InspectRequest, InfrastructureError> {
        let database = self.database.ok_or_else(|| {
            InfrastructureError::ConfigError("no database path configured".to_string())
        })?;
        Ok(InspectRequest {
            database,
            engine: self.engine,
            format: self.format,
        })
    }
}

/// Loads the settings file.
///
/// An explicit path must exist. Without one, `dbpeek.yaml` / `dbpeek.yml`
/// are looked up in `search_dir`; finding neither yields the defaults.
#[instrument(skip(explicit, search_dir))]
pub fn load_settings(
    explicit: Option<&Path>,
    search_dir: &Path,
) -> Result<PeekSettings, InfrastructureError> {
    let path = match explicit {
        Some(path) if path.is_file() => path.to_path_buf(),
        Some(path) => {
            return Err(InfrastructureError::ConfigNotFound(
                path.display().to_string(),
            ));
        }
        None => match find_settings_file(search_dir) {
            Some(path) => path,
            None => {
                debug!(dir = ?search_dir, "No settings file, using defaults");
                return Ok(PeekSettings::default());
            }
        },
    };

    info!(path = ?path, "Loading settings");
    let content = fs::read_to_string(&path)?;
    let mut settings: PeekSettings = if content.trim().is_empty() {
        PeekSettings::default()
    } else {
        serde_yaml::from_str(&content)?
    };

    if let Some(database) = settings.database.take() {
        settings.database = Some(resolve_relative(&path, database));
    }
    Ok(settings)
}

fn find_settings_file(dir: &Path) -> Option<PathBuf> {
    SETTINGS_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
}

fn resolve_relative(settings_file: &Path, database: PathBuf) -> PathBuf {
    if database.is_absolute() {
        return database;
    }
    match settings_file.parent() {
        Some(dir) => dir.join(database),
        None => database,
    }
}
