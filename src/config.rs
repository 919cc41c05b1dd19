use serde::{Deserialize, Deserializer};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::conjunction::WARNING_DISTANCE_KM;
use crate::propagation::SECONDS_PER_HOUR;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub screening: ScreeningConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScreeningConfig {
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold_km: f64,
    #[serde(default = "default_horizon", deserialize_with = "deserialize_duration")]
    pub prediction_horizon: Duration,
    #[serde(default = "default_horizon", deserialize_with = "deserialize_duration")]
    pub analysis_horizon: Duration,
    #[serde(default = "default_trajectory_steps")]
    pub trajectory_steps: usize,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            alert_threshold_km: default_alert_threshold(),
            prediction_horizon: default_horizon(),
            analysis_horizon: default_horizon(),
            trajectory_steps: default_trajectory_steps(),
        }
    }
}

impl ScreeningConfig {
    pub fn prediction_hours(&self) -> f64 {
        self.prediction_horizon.as_secs_f64() / SECONDS_PER_HOUR
    }

    pub fn analysis_hours(&self) -> f64 {
        self.analysis_horizon.as_secs_f64() / SECONDS_PER_HOUR
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    #[serde(
        default = "default_immediate_interval",
        deserialize_with = "deserialize_duration"
    )]
    pub immediate_interval: Duration,
    #[serde(
        default = "default_prediction_interval",
        deserialize_with = "deserialize_duration"
    )]
    pub prediction_interval: Duration,
    #[serde(default = "default_max_alerts")]
    pub max_alerts: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            immediate_interval: default_immediate_interval(),
            prediction_interval: default_prediction_interval(),
            max_alerts: default_max_alerts(),
        }
    }
}

fn default_alert_threshold() -> f64 {
    WARNING_DISTANCE_KM
}

fn default_horizon() -> Duration {
    Duration::from_secs(24 * 3600)
}

fn default_trajectory_steps() -> usize {
    100
}

fn default_immediate_interval() -> Duration {
    Duration::from_secs(5)
}

fn default_prediction_interval() -> Duration {
    Duration::from_secs(60)
}

fn default_max_alerts() -> usize {
    500
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Loads `path` if given and present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => Self::from_file(path),
            Some(path) => {
                log::warn!("Config file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_str("{}").unwrap();
        assert_eq!(config.screening.alert_threshold_km, 25.0);
        assert_eq!(config.screening.prediction_hours(), 24.0);
        assert_eq!(config.screening.trajectory_steps, 100);
        assert_eq!(config.monitor.immediate_interval, Duration::from_secs(5));
        assert_eq!(config.monitor.prediction_interval, Duration::from_secs(60));
    }

    #[test]
    fn humantime_durations_are_parsed() {
        let yaml = "screening:\n  alert_threshold_km: 10\n  prediction_horizon: 7days\n  analysis_horizon: 90m\nmonitor:\n  immediate_interval: 2s\n";
        let config = Config::from_str(yaml).unwrap();
        assert_eq!(config.screening.alert_threshold_km, 10.0);
        assert_eq!(config.screening.prediction_hours(), 168.0);
        assert_eq!(config.screening.analysis_hours(), 1.5);
        assert_eq!(config.monitor.immediate_interval, Duration::from_secs(2));
        assert_eq!(config.monitor.max_alerts, 500);
    }

    #[test]
    fn bad_duration_is_an_error() {
        let yaml = "monitor:\n  immediate_interval: soon\n";
        assert!(matches!(Config::from_str(yaml), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn config_loads_from_file() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"screening:\n  trajectory_steps: 250\n").unwrap();
        let config = Config::from_file(temp.path()).unwrap();
        assert_eq!(config.screening.trajectory_steps, 250);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.yaml"))).unwrap();
        assert_eq!(config.screening.alert_threshold_km, 25.0);
        assert_eq!(Config::load(None).unwrap().monitor.max_alerts, 500);
    }
}
