//! Scenario configuration
//!
//! A scenario bundles everything one evaluation needs: initial pressure,
//! rock and fluid properties, the well set and the time grid. It is read
//! from TOML; every section is optional and falls back to the two-well
//! demonstration values.
//!
//! ## Loading Order
//!
//! 1. `SUPERPOSITION_CONFIG` environment variable (path to TOML file)
//! 2. `superposition.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ```toml
//! initial_pressure = 7500.0
//!
//! [reservoir]
//! permeability = 51.6
//! thickness = 55.8
//!
//! [[wells]]
//! distance = 500.0
//! rate = 500.0
//!
//! [time]
//! start = 0.1
//! stop = 10000.0
//! step = 0.1
//! ```

use std::path::{Path, PathBuf};

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::error::SuperpositionError;
use crate::reservoir::{ReservoirProperties, WellSet};
use crate::superposition::time_grid;

/// Environment variable naming the scenario file.
pub const CONFIG_ENV_VAR: &str = "SUPERPOSITION_CONFIG";
/// Scenario file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "superposition.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),
    #[error("config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),
    #[error("config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Half-open time grid in hr.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeGridConfig {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl Default for TimeGridConfig {
    fn default() -> Self {
        Self {
            start: 0.1,
            stop: 10000.0,
            step: 0.1,
        }
    }
}

impl TimeGridConfig {
    pub fn samples(&self) -> Result<Array1<f64>, SuperpositionError> {
        time_grid(self.start, self.stop, self.step)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// initial reservoir pressure, psia
    pub initial_pressure: f64,
    pub reservoir: ReservoirProperties,
    pub wells: WellSet,
    pub time: TimeGridConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            initial_pressure: 7500.0,
            reservoir: ReservoirProperties::default(),
            wells: WellSet::default(),
            time: TimeGridConfig::default(),
        }
    }
}

impl ScenarioConfig {
    /// Load using the standard search order, falling back to defaults.
    ///
    /// A file that exists but fails to load is logged and skipped.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded scenario from {}", CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(
                            path = %p.display(),
                            error = %e,
                            "Failed to load scenario, falling back"
                        );
                    }
                }
            } else {
                warn!(path = %p.display(), "{} points to a missing file", CONFIG_ENV_VAR);
            }
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(local) {
                Ok(config) => {
                    info!(path = %local.display(), "Loaded scenario");
                    return config;
                }
                Err(e) => {
                    warn!(
                        path = %local.display(),
                        error = %e,
                        "Failed to load scenario, falling back"
                    );
                }
            }
        }

        info!("Using built-in scenario defaults");
        Self::default()
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservoir::Well;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config: ScenarioConfig = toml::from_str("").unwrap();
        assert_eq!(config, ScenarioConfig::default());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: ScenarioConfig = toml::from_str(
            r#"
            initial_pressure = 5000.0

            [reservoir]
            permeability = 100.0

            [[wells]]
            distance = 250.0
            rate = -300.0
            "#,
        )
        .unwrap();
        assert_eq!(config.initial_pressure, 5000.0);
        assert_eq!(config.reservoir.permeability, 100.0);
        assert_eq!(config.reservoir.thickness, 55.8);
        assert_eq!(config.wells, WellSet::from(vec![Well::new(250.0, -300.0)]));
        assert_eq!(config.time, TimeGridConfig::default());
    }

    #[test]
    fn load_from_file_round_trips_to_toml() {
        let config = ScenarioConfig {
            initial_pressure: 6000.0,
            wells: WellSet::from(vec![
                Well::new(100.0, 1000.0),
                Well::new(300.0, 200.0),
                Well::new(900.0, -50.0),
            ]),
            ..Default::default()
        };
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_toml().unwrap().as_bytes()).unwrap();

        let loaded = ScenarioConfig::load_from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn malformed_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"initial_pressure = \"high\"").unwrap();

        let err = ScenarioConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(ref p, _) if p == file.path()));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ScenarioConfig::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }

    #[test]
    fn time_section_builds_grid() {
        let time = TimeGridConfig {
            start: 1.0,
            stop: 2.0,
            step: 0.25,
        };
        assert_eq!(time.samples().unwrap().len(), 4);
    }

    #[test]
    fn tiny_time_step_is_an_error() {
        let config: ScenarioConfig =
            toml::from_str("[time]\nstart = 0.1\nstop = 10000.0\nstep = 1e-300").unwrap();
        assert!(matches!(
            config.time.samples(),
            Err(SuperpositionError::Domain { .. })
        ));
    }
}
