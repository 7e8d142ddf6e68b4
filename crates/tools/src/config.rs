use std::fs;
use std::path::{Path, PathBuf};

use globe::DEFAULT_GLOBE_RADIUS;
use globe::spin::DEFAULT_SPIN_RATE_RAD_PER_S;
use serde::{Deserialize, Serialize};

pub const ENV_CONFIG: &str = "DEEPWAVE_CONFIG";
pub const ENV_TERRITORIES: &str = "DEEPWAVE_TERRITORIES";
pub const ENV_RADIUS: &str = "DEEPWAVE_RADIUS";
pub const ENV_SPIN_RATE: &str = "DEEPWAVE_SPIN_RATE";

/// Runtime settings. Precedence, lowest first: defaults, JSON file,
/// environment, command-line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// GeoJSON territory dataset: a local path or an http(s) URL.
    pub territories: Option<String>,
    pub radius: f64,
    pub spin_rate_rad_per_s: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            territories: None,
            radius: DEFAULT_GLOBE_RADIUS,
            spin_rate_rad_per_s: DEFAULT_SPIN_RATE_RAD_PER_S,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidEnv {
        key: &'static str,
        value: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse config {}: {source}", path.display())
            }
            ConfigError::InvalidEnv { key, value } => {
                write!(f, "invalid value for {key}: {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let payload = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&payload).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults, then the config file (explicit path or `DEEPWAVE_CONFIG`),
    /// then environment overrides.
    pub fn resolve<F>(explicit: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = explicit
            .map(Path::to_path_buf)
            .or_else(|| lookup(ENV_CONFIG).map(PathBuf::from));
        let mut config = match file {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };
        config.apply_env(lookup)?;
        Ok(config)
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_TERRITORIES)
            && !v.trim().is_empty()
        {
            self.territories = Some(v);
        }
        if let Some(v) = lookup(ENV_RADIUS) {
            self.radius = parse_env_f64(ENV_RADIUS, &v)?;
        }
        if let Some(v) = lookup(ENV_SPIN_RATE) {
            self.spin_rate_rad_per_s = parse_env_f64(ENV_SPIN_RATE, &v)?;
        }
        Ok(())
    }
}

fn parse_env_f64(key: &'static str, value: &str) -> Result<f64, ConfigError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::InvalidEnv {
            key,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, ENV_RADIUS, ENV_SPIN_RATE, ENV_TERRITORIES};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_match_the_rendered_globe() {
        let c = AppConfig::default();
        assert_eq!(c.radius, 2.0);
        assert_eq!(c.spin_rate_rad_per_s, 0.1);
        assert_eq!(c.territories, None);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let c = AppConfig::from_json_str(r#"{"territories":"data/countries.geojson"}"#).unwrap();
        assert_eq!(
            c,
            AppConfig {
                territories: Some("data/countries.geojson".to_string()),
                ..AppConfig::default()
            }
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(AppConfig::from_json_str(r#"{"radus": 3.0}"#).is_err());
    }

    #[test]
    fn env_overrides_file_values() {
        let mut c = AppConfig::from_json_str(r#"{"radius": 5.0}"#).unwrap();
        c.apply_env(env(&[
            (ENV_RADIUS, " 3.5 "),
            (ENV_SPIN_RATE, "0.25"),
            (ENV_TERRITORIES, "https://example.test/countries.geojson"),
        ]))
        .unwrap();
        assert_eq!(c.radius, 3.5);
        assert_eq!(c.spin_rate_rad_per_s, 0.25);
        assert_eq!(
            c.territories.as_deref(),
            Some("https://example.test/countries.geojson")
        );
    }

    #[test]
    fn bad_env_values_are_reported() {
        let mut c = AppConfig::default();
        let err = c.apply_env(env(&[(ENV_RADIUS, "two")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { key, .. } if key == ENV_RADIUS));

        let err = c.apply_env(env(&[(ENV_SPIN_RATE, "NaN")])).unwrap_err();
        assert!(err.to_string().contains(ENV_SPIN_RATE));
    }

    #[test]
    fn resolve_without_file_uses_env_only() {
        let c = AppConfig::resolve(None, env(&[(ENV_RADIUS, "1.5")])).unwrap();
        assert_eq!(c.radius, 1.5);
    }

    #[test]
    fn resolve_reports_missing_file() {
        let err = AppConfig::resolve(
            Some(std::path::Path::new("/nonexistent/deepwave.json")),
            env(&[]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
