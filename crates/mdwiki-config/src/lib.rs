//! Configuration management for mdwiki.
//!
//! Parses `mdwiki.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `confluence.base_url`
//! - `confluence.space_key`
//! - `confluence.username`
//! - `confluence.password`
//! - `confluence.token`
//!
//! ## Example
//!
//! ```toml
//! [docs]
//! source_dir = "content"
//! image_dir = "content/Images"
//!
//! [confluence]
//! base_url = "http://localhost:8090"
//! space_key = "TEST"
//! username = "admin"
//! password = "${CONFLUENCE_PASSWORD}"
//! ```

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override Markdown source directory.
    pub source_dir: Option<PathBuf>,
    /// Override image directory.
    pub image_dir: Option<PathBuf>,
    /// Override Confluence base URL.
    pub base_url: Option<String>,
    /// Override Confluence space key.
    pub space_key: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdwiki.toml";

/// Default source directory, relative to the config file.
const DEFAULT_SOURCE_DIR: &str = "docs";

/// Default image directory name inside the source directory.
const DEFAULT_IMAGE_DIR: &str = "Images";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Confluence configuration.
    pub confluence: Option<ConfluenceConfig>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    image_dir: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default, Clone)]
pub struct DocsConfig {
    /// Root directory walked for Markdown files.
    pub source_dir: PathBuf,
    /// Flat directory that image references are resolved against.
    pub image_dir: PathBuf,
}

/// Confluence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfluenceConfig {
    /// Confluence server base URL.
    pub base_url: String,
    /// Key of the space pages are published into.
    pub space_key: String,
    /// Username for HTTP Basic authentication.
    #[serde(default)]
    pub username: Option<String>,
    /// Password or API token for HTTP Basic authentication.
    #[serde(default)]
    pub password: Option<String>,
    /// Personal access token (sent as a Bearer token).
    #[serde(default)]
    pub token: Option<String>,
}

/// Credentials resolved from [`ConfluenceConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// HTTP Basic authentication.
    Basic {
        /// Username.
        username: String,
        /// Password or API token.
        password: String,
    },
    /// Bearer personal access token.
    Token(String),
}

impl ConfluenceConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty, has invalid
    /// format, or the credentials are ambiguous.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.base_url, "confluence.base_url")?;
        require_http_url(&self.base_url, "confluence.base_url")?;
        require_space_key(&self.space_key)?;
        self.credentials()?;
        Ok(())
    }

    /// Resolve the configured credentials.
    ///
    /// Exactly one of `token` or `username` + `password` must be set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` when no credentials, both kinds, or
    /// an incomplete Basic pair are configured.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        match (&self.token, &self.username, &self.password) {
            (Some(token), None, None) => {
                require_non_empty(token, "confluence.token")?;
                Ok(Credentials::Token(token.clone()))
            }
            (None, Some(username), Some(password)) => {
                require_non_empty(username, "confluence.username")?;
                require_non_empty(password, "confluence.password")?;
                Ok(Credentials::Basic {
                    username: username.clone(),
                    password: password.clone(),
                })
            }
            (Some(_), _, _) => Err(ConfigError::Validation(
                "confluence.token cannot be combined with username/password".to_owned(),
            )),
            (None, Some(_), None) => Err(ConfigError::Validation(
                "confluence.password is required when confluence.username is set".to_owned(),
            )),
            (None, None, Some(_)) => Err(ConfigError::Validation(
                "confluence.username is required when confluence.password is set".to_owned(),
            )),
            (None, None, None) => Err(ConfigError::Validation(
                "confluence credentials required: set token, or username and password".to_owned(),
            )),
        }
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
        /// Config field path (e.g., "`confluence.password`").
        field: String,
        /// Error message (e.g., "${`CONFLUENCE_PASSWORD`} not set").
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

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Require a Confluence space key: alphanumeric, optionally `~`-prefixed
/// for personal spaces.
fn require_space_key(key: &str) -> Result<(), ConfigError> {
    require_non_empty(key, "confluence.space_key")?;
    let body = key.strip_prefix('~').unwrap_or(key);
    if body.is_empty() || !body.chars().all(char::is_alphanumeric) {
        return Err(ConfigError::Validation(format!(
            "confluence.space_key must be alphanumeric, got '{key}'"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdwiki.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
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

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
            // A relocated source tree brings its default image folder along
            if self.docs.image_dir.is_none() {
                self.docs_resolved.image_dir = source_dir.join(DEFAULT_IMAGE_DIR);
            }
        }
        if let Some(image_dir) = &settings.image_dir {
            self.docs_resolved.image_dir.clone_from(image_dir);
        }
        if let Some(confluence) = self.confluence.as_mut() {
            if let Some(base_url) = &settings.base_url {
                confluence.base_url.clone_from(base_url);
            }
            if let Some(space_key) = &settings.space_key {
                confluence.space_key.clone_from(space_key);
            }
        }
    }

    /// Get validated Confluence configuration.
    ///
    /// Returns the Confluence config if the `[confluence]` section is present
    /// and all fields are valid. Use this instead of accessing the `confluence`
    /// field directly when the command requires Confluence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_confluence(&self) -> Result<&ConfluenceConfig, ConfigError> {
        let conf = self.confluence.as_ref().ok_or_else(|| {
            ConfigError::Validation("[confluence] section required in config".into())
        })?;
        conf.validate()?;
        Ok(conf)
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

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let source_dir = base.join(DEFAULT_SOURCE_DIR);
        Self {
            docs: DocsConfigRaw::default(),
            confluence: None,
            docs_resolved: DocsConfig {
                image_dir: source_dir.join(DEFAULT_IMAGE_DIR),
                source_dir,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// The `[confluence]` section is not validated here; commands that need
    /// it call [`Config::require_confluence`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(source_dir) = &self.docs.source_dir {
            require_non_empty(source_dir, "docs.source_dir")?;
        }
        if let Some(image_dir) = &self.docs.image_dir {
            require_non_empty(image_dir, "docs.image_dir")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref mut confluence) = self.confluence {
            confluence.base_url = expand::expand_env(&confluence.base_url, "confluence.base_url")?;
            confluence.space_key =
                expand::expand_env(&confluence.space_key, "confluence.space_key")?;
            expand::expand_opt(&mut confluence.username, "confluence.username")?;
            expand::expand_opt(&mut confluence.password, "confluence.password")?;
            expand::expand_opt(&mut confluence.token, "confluence.token")?;
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    ///
    /// The image directory defaults to `Images` inside the source directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let source_dir = config_dir.join(
            self.docs
                .source_dir
                .as_deref()
                .unwrap_or(DEFAULT_SOURCE_DIR),
        );
        let image_dir = match self.docs.image_dir.as_deref() {
            Some(dir) => config_dir.join(dir),
            None => source_dir.join(DEFAULT_IMAGE_DIR),
        };

        self.docs_resolved = DocsConfig {
            source_dir,
            image_dir,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(
            config.docs_resolved.image_dir,
            PathBuf::from("/test/docs/Images")
        );
        assert!(config.confluence.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.confluence.is_none());
        assert!(config.docs.source_dir.is_none());
    }

    #[test]
    fn test_parse_confluence_config_basic() {
        let toml = r#"
[confluence]
base_url = "http://localhost:8090"
space_key = "TEST"
username = "admin"
password = "secret"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let confluence = config.confluence.unwrap();
        assert_eq!(confluence.base_url, "http://localhost:8090");
        assert_eq!(confluence.space_key, "TEST");
        assert_eq!(
            confluence.credentials().unwrap(),
            Credentials::Basic {
                username: "admin".to_owned(),
                password: "secret".to_owned(),
            }
        );
    }

    #[test]
    fn test_parse_confluence_config_token() {
        let toml = r#"
[confluence]
base_url = "https://wiki.example.com"
space_key = "DOCS"
token = "pat-123"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let confluence = config.confluence.unwrap();
        assert_eq!(
            confluence.credentials().unwrap(),
            Credentials::Token("pat-123".to_owned())
        );
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "content"
image_dir = "assets/img"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/content")
        );
        assert_eq!(
            config.docs_resolved.image_dir,
            PathBuf::from("/project/assets/img")
        );
    }

    #[test]
    fn test_resolve_paths_image_dir_defaults_inside_source() {
        let toml = r#"
[docs]
source_dir = "content"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.image_dir,
            PathBuf::from("/project/content/Images")
        );
    }

    #[test]
    fn test_apply_cli_settings_source_dir_moves_default_image_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/wiki")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/wiki"));
        assert_eq!(
            config.docs_resolved.image_dir,
            PathBuf::from("/wiki/Images")
        );
    }

    #[test]
    fn test_apply_cli_settings_source_dir_keeps_explicit_image_dir() {
        let toml = r#"
[docs]
image_dir = "media"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/wiki")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.image_dir,
            PathBuf::from("/project/media")
        );
    }

    #[test]
    fn test_apply_cli_settings_confluence_overrides() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.confluence = Some(valid_confluence_config());
        let overrides = CliSettings {
            base_url: Some("https://other.example.com".to_owned()),
            space_key: Some("OTHER".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        let confluence = config.confluence.unwrap();
        assert_eq!(confluence.base_url, "https://other.example.com");
        assert_eq!(confluence.space_key, "OTHER");
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let config_before = Config::default_with_base(Path::new("/test"));
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(
            config.docs_resolved.source_dir,
            config_before.docs_resolved.source_dir
        );
        assert_eq!(
            config.docs_resolved.image_dir,
            config_before.docs_resolved.image_dir
        );
    }

    #[test]
    fn test_expand_env_vars_confluence() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("MDWIKI_TEST_CONFLUENCE_URL", "https://confluence.test.com");
            std::env::set_var("MDWIKI_TEST_PASSWORD", "hunter2");
        }

        let toml = r#"
[confluence]
base_url = "${MDWIKI_TEST_CONFLUENCE_URL}"
space_key = "${MDWIKI_TEST_SPACE:-TEST}"
username = "admin"
password = "${MDWIKI_TEST_PASSWORD}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        let confluence = config.confluence.unwrap();
        assert_eq!(confluence.base_url, "https://confluence.test.com");
        assert_eq!(confluence.space_key, "TEST");
        assert_eq!(confluence.password.as_deref(), Some("hunter2"));

        unsafe {
            std::env::remove_var("MDWIKI_TEST_CONFLUENCE_URL");
            std::env::remove_var("MDWIKI_TEST_PASSWORD");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MDWIKI_MISSING_VAR_CONFIG_TEST");
        }

        let toml = r#"
[confluence]
base_url = "http://localhost:8090"
space_key = "TEST"
token = "${MDWIKI_MISSING_VAR_CONFIG_TEST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MDWIKI_MISSING_VAR_CONFIG_TEST"));
        assert!(err.to_string().contains("confluence.token"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[docs]
source_dir = "content"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.docs_resolved.source_dir, dir.path().join("content"));
        assert_eq!(
            config.docs_resolved.image_dir,
            dir.path().join("content").join("Images")
        );
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/mdwiki.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error_on_confluence(
        config: &ConfluenceConfig,
        expected_substrings: &[&str],
    ) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    /// Create a valid Confluence config for testing.
    fn valid_confluence_config() -> ConfluenceConfig {
        ConfluenceConfig {
            base_url: "https://confluence.example.com".to_owned(),
            space_key: "TEST".to_owned(),
            username: Some("admin".to_owned()),
            password: Some("secret".to_owned()),
            token: None,
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_source_dir() {
        let toml = r#"
[docs]
source_dir = ""
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("docs.source_dir"));
    }

    #[test]
    fn test_confluence_config_validate_valid() {
        assert!(valid_confluence_config().validate().is_ok());
    }

    #[test]
    fn test_confluence_config_validate_personal_space() {
        let config = ConfluenceConfig {
            space_key: "~jdoe".to_owned(),
            ..valid_confluence_config()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_confluence_config_validate_invalid_space_key() {
        let config = ConfluenceConfig {
            space_key: "MY SPACE".to_owned(),
            ..valid_confluence_config()
        };
        assert_validation_error_on_confluence(&config, &["space_key", "alphanumeric"]);
    }

    #[test]
    fn test_confluence_config_validate_invalid_url() {
        let config = ConfluenceConfig {
            base_url: "not-a-url".to_owned(),
            ..valid_confluence_config()
        };
        assert_validation_error_on_confluence(&config, &["base_url", "http"]);
    }

    #[test]
    fn test_confluence_config_validate_missing_credentials() {
        let config = ConfluenceConfig {
            username: None,
            password: None,
            ..valid_confluence_config()
        };
        assert_validation_error_on_confluence(&config, &["credentials"]);
    }

    #[test]
    fn test_confluence_config_validate_mixed_credentials() {
        let config = ConfluenceConfig {
            token: Some("pat".to_owned()),
            ..valid_confluence_config()
        };
        assert_validation_error_on_confluence(&config, &["token", "username"]);
    }

    #[test]
    fn test_confluence_config_validate_username_without_password() {
        let config = ConfluenceConfig {
            password: None,
            ..valid_confluence_config()
        };
        assert_validation_error_on_confluence(&config, &["confluence.password"]);
    }

    #[test]
    fn test_config_require_confluence_missing_section() {
        let config = Config::default_with_base(Path::new("/test"));
        let err = config.require_confluence().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("[confluence]"));
    }

    #[test]
    fn test_config_require_confluence_returns_validated() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.confluence = Some(valid_confluence_config());
        assert!(config.require_confluence().is_ok());
    }
}
