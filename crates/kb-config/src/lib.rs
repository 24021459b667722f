//! Host site configuration for the knowledge base generator.
//!
//! Loads the host generator's `mkdocs.yml` as a raw YAML mapping (so it can
//! be modified and written back untouched apart from the navigation) and
//! resolves the few values the generator needs from it:
//!
//! - `docs_dir`: documentation source directory, relative to the config file
//! - the `blog` plugin's `blog_dir` and `post_url_format`
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `docs_dir` supports `${VAR}` and `${VAR:-default}` expansion as well as
//! the host's `!ENV` tag.

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub docs_dir: Option<PathBuf>,
}

/// Configuration filenames to search for, in order of preference.
const CONFIG_FILENAMES: [&str; 2] = ["mkdocs.yml", "mkdocs.yaml"];

/// Default documentation directory, relative to the config file.
const DEFAULT_DOCS_DIR: &str = "docs";

/// Plugin names under which the blog plugin may be registered.
const BLOG_PLUGIN_NAMES: [&str; 2] = ["blog", "material/blog"];

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    /// Raw host configuration mapping.
    pub host: Mapping,
    /// Resolved documentation source directory.
    pub docs_dir: PathBuf,
    /// Blog plugin settings that shape post URLs.
    pub blog: BlogConfig,
    /// Path to the config file (set after loading).
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Settings of the host's blog plugin that determine post URLs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Blog directory inside `docs_dir`; also the URL prefix.
    pub blog_dir: String,
    /// Post URL template with `{date}`, `{slug}` and `{file}` placeholders.
    pub post_url_format: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            blog_dir: "blog".to_owned(),
            post_url_format: "{date}/{slug}".to_owned(),
        }
    }
}

impl BlogConfig {
    /// Directory holding the topic folders, relative to `docs_dir`.
    #[must_use]
    pub fn posts_dir(&self) -> PathBuf {
        Path::new(&self.blog_dir).join("posts")
    }

    /// Blog landing page, relative to `docs_dir`.
    #[must_use]
    pub fn index_page(&self) -> String {
        format!("{}/index.md", self.blog_dir)
    }

    /// Read blog settings from the host's `plugins` entry.
    ///
    /// Accepts both the list form (`- blog` / `- blog: {...}`) and the
    /// mapping form (`blog: {...}`). Returns defaults when the plugin isn't
    /// configured or has no options.
    ///
    /// # Errors
    ///
    /// Returns an error if the plugin options have the wrong types.
    pub fn from_plugins(plugins: Option<&Value>) -> Result<Self, ConfigError> {
        let options = match plugins {
            Some(Value::Sequence(items)) => items.iter().find_map(|item| match item {
                Value::Mapping(m) => blog_options(m),
                _ => None,
            }),
            Some(Value::Mapping(m)) => blog_options(m),
            _ => None,
        };

        match options {
            Some(value @ Value::Mapping(_)) => {
                serde_yaml::from_value(value.clone()).map_err(ConfigError::Parse)
            }
            _ => Ok(Self::default()),
        }
    }
}

fn blog_options(plugins: &Mapping) -> Option<&Value> {
    BLOG_PLUGIN_NAMES.iter().find_map(|name| plugins.get(*name))
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
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_DIR`} not set").
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
    /// Otherwise, searches for `mkdocs.yml` in current directory and parents.
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
            tracing::info!("No mkdocs.yml found, using defaults");
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Build configuration from an in-memory host mapping.
    ///
    /// Relative paths resolve against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if a field can't be resolved or fails validation.
    pub fn from_mapping(host: Mapping, base_dir: &Path) -> Result<Self, ConfigError> {
        let docs_dir = resolve_docs_dir(&host, base_dir)?;
        let blog = BlogConfig::from_plugins(host.get("plugins"))?;
        let config = Self {
            host,
            docs_dir,
            blog,
            config_path: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(docs_dir) = &settings.docs_dir {
            self.docs_dir.clone_from(docs_dir);
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.blog.blog_dir, "plugins.blog.blog_dir")?;
        require_non_empty(&self.blog.post_url_format, "plugins.blog.post_url_format")?;
        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            for name in CONFIG_FILENAMES {
                let candidate = current.join(name);
                if candidate.exists() {
                    return Some(candidate);
                }
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
        Self {
            host: Mapping::new(),
            docs_dir: base.join(DEFAULT_DOCS_DIR),
            blog: BlogConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let host = match serde_yaml::from_str::<Value>(&content)? {
            Value::Null => Mapping::new(),
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(ConfigError::Validation(
                    "configuration must be a mapping".to_owned(),
                ));
            }
        };

        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_mapping(host, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), docs_dir = %config.docs_dir.display(), "Loaded configuration");

        Ok(config)
    }
}

/// Resolve `docs_dir` against the config directory.
fn resolve_docs_dir(host: &Mapping, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let raw = host
        .get("docs_dir")
        .and_then(expand::resolve_env_tag)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_DOCS_DIR.to_owned());
    let expanded = expand::expand_env(&raw, "docs_dir")?;
    Ok(config_dir.join(expanded))
}
