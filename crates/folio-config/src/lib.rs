//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Article Filtering
//!
//! The `[articles]` section selects one of two filter modes:
//!
//! ```toml
//! [articles]
//! excluded = ["drafts-2019"]   # exclude mode: publish everything else
//! ```
//!
//! ```toml
//! [articles]
//! released = ["hello-world"]   # include mode: publish only these
//! ```
//!
//! Setting both lists is a validation error. Omitting the section publishes
//! every article.
//!
//! ## Environment Variable Expansion
//!
//! `server.host` and `log.access_log` support `${VAR}` and `${VAR:-default}`.

mod expand;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override content root directory.
    pub content_root: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Content layout (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Article filter lists.
    articles: ArticlesConfigRaw,
    /// Access log configuration.
    log: LogConfigRaw,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Resolved article filter (set after loading).
    #[serde(skip)]
    pub filter: ArticleFilter,
    /// Resolved access log path (set after loading).
    #[serde(skip)]
    pub access_log: Option<PathBuf>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 4991,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    root: Option<String>,
    static_dir: Option<String>,
    meta_filename: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ArticlesConfigRaw {
    excluded: Option<Vec<String>>,
    released: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct LogConfigRaw {
    access_log: Option<String>,
}

/// Resolved content layout with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Directory holding one folder per article.
    pub root: PathBuf,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
    /// Name of the per-article metadata file.
    pub meta_filename: String,
}

/// Which routes are published.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArticleFilter {
    /// Publish everything except these routes.
    Excluded(BTreeSet<String>),
    /// Publish only these routes.
    Released(BTreeSet<String>),
}

impl Default for ArticleFilter {
    fn default() -> Self {
        Self::Excluded(BTreeSet::new())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`FOLIO_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the values left after CLI overrides are invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(root) = &settings.content_root {
            self.content_resolved.root.clone_from(root);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            content: ContentConfigRaw::default(),
            articles: ArticlesConfigRaw::default(),
            log: LogConfigRaw::default(),
            content_resolved: ContentConfig {
                root: base.join("views"),
                static_dir: base.join("static"),
                meta_filename: "meta.json".to_owned(),
            },
            filter: ArticleFilter::default(),
            access_log: None,
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 would let the OS pick, which is never what a deployment wants
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        require_non_empty(&self.content_resolved.meta_filename, "content.meta_filename")?;

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref path) = self.log.access_log {
            self.log.access_log = Some(expand::expand_env(path, "log.access_log")?);
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory and pick the filter mode.
    fn resolve(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.content_resolved = ContentConfig {
            root: resolve(self.content.root.as_deref(), "views"),
            static_dir: resolve(self.content.static_dir.as_deref(), "static"),
            meta_filename: self
                .content
                .meta_filename
                .clone()
                .unwrap_or_else(|| "meta.json".to_owned()),
        };

        self.filter = match (&self.articles.excluded, &self.articles.released) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::Validation(
                    "[articles] accepts either excluded or released, not both".to_owned(),
                ));
            }
            (Some(excluded), None) => ArticleFilter::Excluded(excluded.iter().cloned().collect()),
            (None, Some(released)) => ArticleFilter::Released(released.iter().cloned().collect()),
            (None, None) => ArticleFilter::default(),
        };

        self.access_log = self.log.access_log.as_deref().map(|p| config_dir.join(p));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/site"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 4991);
        assert_eq!(config.content_resolved.root, PathBuf::from("/site/views"));
        assert_eq!(
            config.content_resolved.static_dir,
            PathBuf::from("/site/static")
        );
        assert_eq!(config.content_resolved.meta_filename, "meta.json");
        assert_eq!(config.filter, ArticleFilter::Excluded(BTreeSet::new()));
        assert!(config.access_log.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 4991);
    }

    #[test]
    fn test_parse_server_config() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[content]
root = "articles"
static_dir = "public"
meta_filename = "meta.yaml"

[log]
access_log = "log.txt"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve(Path::new("/project")).unwrap();

        assert_eq!(
            config.content_resolved.root,
            PathBuf::from("/project/articles")
        );
        assert_eq!(
            config.content_resolved.static_dir,
            PathBuf::from("/project/public")
        );
        assert_eq!(config.content_resolved.meta_filename, "meta.yaml");
        assert_eq!(config.access_log, Some(PathBuf::from("/project/log.txt")));
    }

    #[test]
    fn test_resolve_excluded_filter() {
        let toml = r#"
[articles]
excluded = ["drafts", "old-post"]
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve(Path::new("/project")).unwrap();

        assert_eq!(
            config.filter,
            ArticleFilter::Excluded(["drafts".to_owned(), "old-post".to_owned()].into())
        );
    }

    #[test]
    fn test_resolve_released_filter() {
        let toml = r#"
[articles]
released = ["hello-world"]
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve(Path::new("/project")).unwrap();

        assert_eq!(
            config.filter,
            ArticleFilter::Released(["hello-world".to_owned()].into())
        );
    }

    #[test]
    fn test_resolve_empty_released_publishes_nothing() {
        let toml = r"
[articles]
released = []
";
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve(Path::new("/project")).unwrap();

        assert_eq!(config.filter, ArticleFilter::Released(BTreeSet::new()));
    }

    #[test]
    fn test_resolve_both_filters_is_error() {
        let toml = r#"
[articles]
excluded = ["a"]
released = ["b"]
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.resolve(Path::new("/project")).unwrap_err();

        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("excluded"));
    }

    #[test]
    fn test_apply_cli_settings_host_and_port() {
        let mut config = Config::default_with_base(Path::new("/site"));
        let overrides = CliSettings {
            host: Some("0.0.0.0".to_owned()),
            port: Some(8080),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.content_resolved.root, PathBuf::from("/site/views"));
    }

    #[test]
    fn test_apply_cli_settings_content_root() {
        let mut config = Config::default_with_base(Path::new("/site"));
        let overrides = CliSettings {
            content_root: Some(PathBuf::from("/elsewhere/articles")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.content_resolved.root,
            PathBuf::from("/elsewhere/articles")
        );
        assert_eq!(config.server.port, 4991);
    }

    #[test]
    fn test_expand_env_vars_server_host() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_TEST_HOST", "0.0.0.0");
        }

        let toml = r#"
[server]
host = "${FOLIO_TEST_HOST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");

        unsafe {
            std::env::remove_var("FOLIO_TEST_HOST");
        }
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[server]
port = 5000

[articles]
released = ["intro"]
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.content_resolved.root, dir.path().join("views"));
        assert_eq!(
            config.filter,
            ArticleFilter::Released(["intro".to_owned()].into())
        );
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[server\nport = ").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_rejects_zero_port_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();
        let overrides = CliSettings {
            port: Some(0),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)), "got {err:?}");
    }

    #[test]
    fn test_load_rejects_empty_host_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();
        let overrides = CliSettings {
            host: Some(String::new()),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();

        assert!(err.to_string().contains("server.host"), "got {err}");
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/site"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_server_host_empty() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.server.host = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.host"));
    }

    #[test]
    fn test_validate_server_port_zero() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.server.port = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("server.port"));
    }
}
