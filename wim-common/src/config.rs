//! Configuration loading and folder resolution
//!
//! Every setting resolves in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (both handled by clap's `env` attribute)
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default Storywrangler API base URL
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
/// Default Wikidata search endpoint
pub const DEFAULT_WIKIDATA_ENDPOINT: &str = "https://www.wikidata.org/w/api.php";
/// User agent sent to Wikidata, per their API etiquette
pub const DEFAULT_USER_AGENT: &str =
    "WomenInMathAdapter/0.1 (https://github.com/Vermont-Complex-Systems/women-in-mathematics)";

/// TOML configuration file contents
///
/// All fields are optional; a missing file is equivalent to an empty one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Folder the default data/text/output locations hang off
    pub root_folder: Option<PathBuf>,
    /// Folder holding `personal.csv`
    pub data_dir: Option<PathBuf>,
    /// Folder holding extracted biography `.txt` files
    pub text_dir: Option<PathBuf>,
    /// Folder receiving `dataset.json` and `texts.json`
    pub output_dir: Option<PathBuf>,
    /// Storywrangler API base URL
    pub api_url: Option<String>,
    pub logging: LoggingConfig,
    pub wikidata: WikidataConfig,
    pub submit: SubmitConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Wikidata entity search settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WikidataConfig {
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Number of search hits requested per name
    pub search_limit: usize,
}

impl Default for WikidataConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_WIKIDATA_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            search_limit: 3,
        }
    }
}

/// Submission HTTP settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitConfig {
    /// Per-request timeout; ingestion of long biographies can be slow
    pub timeout_secs: u64,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self { timeout_secs: 120 }
    }
}

/// Folder overrides taken from CLI/environment
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub root_folder: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub text_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

/// Fully resolved folders for a run
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterPaths {
    pub data_dir: PathBuf,
    pub text_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl TomlConfig {
    /// Resolve data/text/output folders
    ///
    /// Unset folders default to `join/output`, `extract/output` and
    /// `adapter/output` under the root folder (itself defaulting to `.`).
    pub fn resolve_paths(&self, overrides: &PathOverrides) -> AdapterPaths {
        let root = overrides
            .root_folder
            .clone()
            .or_else(|| self.root_folder.clone())
            .unwrap_or_else(|| PathBuf::from("."));

        let pick = |cli: &Option<PathBuf>, toml: &Option<PathBuf>, stage: &str| {
            cli.clone()
                .or_else(|| toml.clone())
                .unwrap_or_else(|| root.join(stage).join("output"))
        };

        AdapterPaths {
            data_dir: pick(&overrides.data_dir, &self.data_dir, "join"),
            text_dir: pick(&overrides.text_dir, &self.text_dir, "extract"),
            output_dir: pick(&overrides.output_dir, &self.output_dir, "adapter"),
        }
    }

    /// Resolve the API base URL, trailing slashes removed
    pub fn resolve_api_url(&self, cli: Option<&str>) -> String {
        cli.or(self.api_url.as_deref())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string()
    }
}

/// Default configuration file location (`~/.config/women-in-math/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("women-in-math").join("config.toml"))
}

/// Load the TOML configuration
///
/// An explicitly requested file must exist. The default location is optional;
/// when absent, defaults are returned.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("No config file found, using defaults");
                return Ok(TomlConfig::default());
            }
        },
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    debug!(path = %path.display(), "Loaded config file");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_paths_hang_off_root() {
        let config = TomlConfig::default();
        let paths = config.resolve_paths(&PathOverrides {
            root_folder: Some(PathBuf::from("/srv/wim")),
            ..Default::default()
        });

        assert_eq!(paths.data_dir, PathBuf::from("/srv/wim/join/output"));
        assert_eq!(paths.text_dir, PathBuf::from("/srv/wim/extract/output"));
        assert_eq!(paths.output_dir, PathBuf::from("/srv/wim/adapter/output"));
    }

    #[test]
    fn test_cli_overrides_toml() {
        let config = TomlConfig {
            root_folder: Some(PathBuf::from("/toml-root")),
            text_dir: Some(PathBuf::from("/toml-texts")),
            output_dir: Some(PathBuf::from("/toml-out")),
            ..Default::default()
        };
        let paths = config.resolve_paths(&PathOverrides {
            output_dir: Some(PathBuf::from("/cli-out")),
            ..Default::default()
        });

        assert_eq!(paths.data_dir, PathBuf::from("/toml-root/join/output"));
        assert_eq!(paths.text_dir, PathBuf::from("/toml-texts"));
        assert_eq!(paths.output_dir, PathBuf::from("/cli-out"));
    }

    #[test]
    fn test_api_url_priority() {
        let config = TomlConfig {
            api_url: Some("http://storywrangler:9000/".to_string()),
            ..Default::default()
        };

        assert_eq!(config.resolve_api_url(Some("http://cli:1")), "http://cli:1");
        assert_eq!(config.resolve_api_url(None), "http://storywrangler:9000");
        assert_eq!(TomlConfig::default().resolve_api_url(None), DEFAULT_API_URL);
    }

    #[test]
    fn test_load_partial_toml_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
root_folder = "/data/wim"

[wikidata]
search_limit = 5

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let config = load_toml_config(Some(&path)).unwrap();

        assert_eq!(config.root_folder, Some(PathBuf::from("/data/wim")));
        assert_eq!(config.wikidata.search_limit, 5);
        assert_eq!(config.wikidata.timeout_secs, 10);
        assert_eq!(config.wikidata.endpoint, DEFAULT_WIKIDATA_ENDPOINT);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.submit.timeout_secs, 120);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let err = load_toml_config(Some(&temp.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "root_folder = [").unwrap();

        assert!(matches!(load_toml_config(Some(&path)), Err(Error::Config(_))));
    }
}
