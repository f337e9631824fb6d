use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Env var pointing at an optional JSON config file.
pub const CONFIG_ENV: &str = "DOOR_SPECS_CONFIG";
/// Env var overriding the sheet URL of the initial catalog.
pub const URL_ENV: &str = "DOOR_SPECS_URL";
/// Env var overriding the initial catalog.
pub const CATALOG_ENV: &str = "DOOR_SPECS_CATALOG";

const DOORS_SHEET: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vTI34lxrAWXmVwfwTukxCbWtKRNcAK1WV3r7SieyULannTwpsRF2WXBS35VJj0kH-3tLPXzTkye2kyI/pub?output=csv";
const CONTROLLERS_SHEET: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vTERjt8-EVQ4R3r4ZjzqSVUeQooVKbNo5YzikgWX_SzrYBt3FmjDxQigeGv6pG6a4qELL-cRGIOCzFf/pub?output=csv";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown catalog {0:?} (expected \"doors\" or \"controllers\")")]
    UnknownCatalog(String),
}

// ---------------------------------------------------------------------------
// Catalog – which published sheet is shown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Catalog {
    #[default]
    Doors,
    Controllers,
}

impl Catalog {
    pub const ALL: [Catalog; 2] = [Catalog::Doors, Catalog::Controllers];

    /// Key used in persisted storage and env vars.
    pub fn as_str(self) -> &'static str {
        match self {
            Catalog::Doors => "doors",
            Catalog::Controllers => "controllers",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Catalog::Doors => "Roller Doors",
            Catalog::Controllers => "Door Controllers",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_lowercase().as_str() {
            "doors" => Ok(Catalog::Doors),
            "controllers" => Ok(Catalog::Controllers),
            _ => Err(ConfigError::UnknownCatalog(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Catalog shown at startup unless storage remembers another one.
    pub catalog: Catalog,
    pub doors_url: String,
    pub controllers_url: String,
    /// HTTP client timeout for one sheet download.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: Catalog::Doors,
            doors_url: DOORS_SHEET.to_string(),
            controllers_url: CONTROLLERS_SHEET.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn url_for(&self, catalog: Catalog) -> &str {
        match catalog {
            Catalog::Doors => &self.doors_url,
            Catalog::Controllers => &self.controllers_url,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build from an optional JSON document plus env-style overrides.
    ///
    /// Later sources win: defaults, then `file_text`, then `env`.
    pub fn from_sources<F>(file_text: Option<&str>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match file_text {
            Some(text) => serde_json::from_str(text)?,
            None => Config::default(),
        };

        if let Some(catalog) = env(CATALOG_ENV) {
            config.catalog = Catalog::parse(&catalog)?;
        }
        if let Some(url) = env(URL_ENV).filter(|u| !u.trim().is_empty()) {
            let url = url.trim().to_string();
            match config.catalog {
                Catalog::Doors => config.doors_url = url,
                Catalog::Controllers => config.controllers_url = url,
            }
        }
        Ok(config)
    }
}

/// Load config from the process environment.
pub fn load() -> Result<Config, ConfigError> {
    let file_text = match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            let path = PathBuf::from(path);
            let text = std::fs::read_to_string(&path)
                .map_err(|source| ConfigError::Read { path, source })?;
            Some(text)
        }
        None => None,
    };
    Config::from_sources(file_text.as_deref(), |key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_sources() {
        let cfg = Config::from_sources(None, env(&[])).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.catalog, Catalog::Doors);
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn file_values_fill_in_over_defaults() {
        let cfg = Config::from_sources(
            Some(r#"{ "catalog": "controllers", "timeout_secs": 5 }"#),
            env(&[]),
        )
        .unwrap();
        assert_eq!(cfg.catalog, Catalog::Controllers);
        assert_eq!(cfg.timeout_secs, 5);
        assert_eq!(cfg.doors_url, DOORS_SHEET);
    }

    #[test]
    fn env_url_overrides_active_catalog() {
        let cfg = Config::from_sources(
            None,
            env(&[(CATALOG_ENV, "Controllers"), (URL_ENV, " http://localhost/c.csv ")]),
        )
        .unwrap();
        assert_eq!(cfg.catalog, Catalog::Controllers);
        assert_eq!(cfg.url_for(Catalog::Controllers), "http://localhost/c.csv");
        assert_eq!(cfg.url_for(Catalog::Doors), DOORS_SHEET);
    }

    #[test]
    fn bad_inputs_are_errors() {
        assert!(matches!(
            Config::from_sources(Some("{ not json"), env(&[])),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::from_sources(Some(r#"{ "colour": "red" }"#), env(&[])),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::from_sources(None, env(&[(CATALOG_ENV, "windows")])),
            Err(ConfigError::UnknownCatalog(_))
        ));
    }

    #[test]
    fn catalog_round_trips_through_storage_key() {
        for c in Catalog::ALL {
            assert_eq!(Catalog::parse(c.as_str()).unwrap(), c);
        }
    }
}
