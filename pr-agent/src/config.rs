//! Configuration management for PR Agent
//!
//! Settings are resolved from defaults, then `PR_AGENT_*` environment
//! variables, then an optional `pr-agent.yaml` file. Command line flags are
//! applied on top by the CLI.

use crate::common::env_loader::EnvLoader;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_BASE_BRANCH: &str = "main";
const DEFAULT_TEMPLATES_DIR: &str = "templates";
const DEFAULT_EVENTS_FILE: &str = "github_events.json";
const CONFIG_FILE_NAME: &str = "pr-agent.yaml";
const MAX_BRANCH_NAME_LENGTH: usize = 255;

/// Default character budget applied to diffs when no line limit is requested
pub const DEFAULT_MAX_DIFF_CHARS: usize = 20_000;
/// Default number of events returned by the recent events tool
pub const DEFAULT_EVENT_LIMIT: usize = 10;

const INVALID_BRANCH_CHARS: [char; 9] = ['\0', ' ', '~', '^', ':', '?', '*', '[', '\\'];

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file from disk
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        /// Path to the configuration file that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse YAML content from a configuration file
    #[error("Invalid YAML syntax in {path}:\n{source}\n\nHint: Check for proper indentation and YAML formatting")]
    YamlParse {
        /// Path to the configuration file with invalid YAML content
        path: PathBuf,
        /// Underlying YAML parsing error
        #[source]
        source: serde_yaml::Error,
    },

    /// Invalid configuration value for a specific field
    #[error("Invalid configuration value for '{field}': {value}\n{hint}")]
    InvalidValue {
        /// Name of the configuration field
        field: String,
        /// The rejected value
        value: String,
        /// How to fix it
        hint: String,
    },
}

/// How the template catalog is enumerated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCatalog {
    /// Every `*.md` file in the templates directory
    #[default]
    Scan,
    /// The fixed list of built-in template names
    Fixed,
}

impl FromStr for TemplateCatalog {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scan" => Ok(Self::Scan),
            "fixed" => Ok(Self::Fixed),
            other => Err(ConfigError::InvalidValue {
                field: "template_catalog".to_string(),
                value: other.to_string(),
                hint: "template_catalog must be 'scan' or 'fixed'".to_string(),
            }),
        }
    }
}

/// Configuration settings for PR Agent
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `<type>.md` PR templates (default: "templates")
    pub templates_dir: PathBuf,
    /// How templates are enumerated (default: scan)
    pub template_catalog: TemplateCatalog,
    /// JSON log of CI events written by the webhook listener
    pub events_file: PathBuf,
    /// Branch compared against when the caller does not name one (default: "main")
    pub base_branch: String,
    /// Character budget for diffs (default: 20000)
    pub max_diff_chars: usize,
    /// Number of events returned when the caller does not give a limit (default: 10)
    pub default_event_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
            template_catalog: TemplateCatalog::Scan,
            events_file: PathBuf::from(DEFAULT_EVENTS_FILE),
            base_branch: DEFAULT_BASE_BRANCH.to_string(),
            max_diff_chars: DEFAULT_MAX_DIFF_CHARS,
            default_event_limit: DEFAULT_EVENT_LIMIT,
        }
    }
}

impl Config {
    /// Create a new configuration instance with values loaded from:
    /// 1. YAML file (highest precedence)
    /// 2. Environment variables
    /// 3. Defaults (lowest precedence)
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env_vars();

        match YamlConfig::load_or_default() {
            Ok(yaml_config) => yaml_config.apply_to_config(&mut config),
            Err(e) => {
                tracing::warn!(
                    "Failed to load YAML configuration, falling back to env vars and defaults: {}",
                    e
                );
            }
        }

        config
    }

    /// Apply environment variable configuration to this config
    fn apply_env_vars(&mut self) {
        let loader = EnvLoader::new("PR_AGENT");

        self.templates_dir = loader.load_path("TEMPLATES_DIR", self.templates_dir.clone());
        self.template_catalog = loader.load_parsed("TEMPLATE_CATALOG", self.template_catalog);
        self.events_file = loader.load_path("EVENTS_FILE", self.events_file.clone());
        self.base_branch = loader.load_string("BASE_BRANCH", &self.base_branch);
        self.max_diff_chars = loader.load_parsed("MAX_DIFF_CHARS", self.max_diff_chars);
        self.default_event_limit =
            loader.load_parsed("DEFAULT_EVENT_LIMIT", self.default_event_limit);
    }

    /// Resolve relative resource paths against a working directory
    pub fn resolve_paths(mut self, work_dir: &Path) -> Self {
        if self.templates_dir.is_relative() {
            self.templates_dir = work_dir.join(&self.templates_dir);
        }
        if self.events_file.is_relative() {
            self.events_file = work_dir.join(&self.events_file);
        }
        self
    }

    /// Find the pr-agent.yaml configuration file
    ///
    /// Search order:
    /// 1. Current working directory: `pr-agent.yaml`
    /// 2. `~/.config/pr-agent/pr-agent.yaml`
    /// 3. `~/pr-agent.yaml`
    pub fn find_yaml_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(CONFIG_FILE_NAME)];

        if let Some(home_dir) = dirs::home_dir() {
            search_paths.push(
                home_dir
                    .join(".config")
                    .join("pr-agent")
                    .join(CONFIG_FILE_NAME),
            );
            search_paths.push(home_dir.join(CONFIG_FILE_NAME));
        }

        let found = search_paths.into_iter().find(|path| path.is_file());
        match &found {
            Some(path) => tracing::debug!("Found configuration file: {:?}", path),
            None => tracing::debug!("No {} found in any search location", CONFIG_FILE_NAME),
        }
        found
    }

    /// Validate the current configuration settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_branch_name(&self.base_branch, "base_branch")?;

        if self.max_diff_chars == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_diff_chars".to_string(),
                value: "0".to_string(),
                hint: "max_diff_chars must be greater than zero".to_string(),
            });
        }

        if self.default_event_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "default_event_limit".to_string(),
                value: "0".to_string(),
                hint: "default_event_limit must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Generate an example YAML configuration file content
    pub fn example_yaml_config() -> &'static str {
        r#"# pr-agent.yaml
# Branch that pull requests will merge into
base_branch: "main"
# Directory of <type>.md pull request templates
templates_dir: "templates"
# "scan" lists every *.md file, "fixed" lists the built-in template names
template_catalog: "scan"
# JSON log written by the GitHub webhook listener
events_file: "github_events.json"
# Character budget for diffs returned by analyze_file_changes
max_diff_chars: 20000
"#
    }
}

/// Check that a branch name is acceptable to git
fn validate_branch_name(branch_name: &str, field_name: &str) -> Result<(), ConfigError> {
    let invalid = |hint: String| ConfigError::InvalidValue {
        field: field_name.to_string(),
        value: branch_name.to_string(),
        hint,
    };

    if branch_name.trim().is_empty() {
        return Err(invalid(format!("{field_name} cannot be empty")));
    }

    if branch_name.len() > MAX_BRANCH_NAME_LENGTH {
        return Err(invalid(format!(
            "{field_name} is too long (maximum {MAX_BRANCH_NAME_LENGTH} characters)"
        )));
    }

    if let Some(ch) = INVALID_BRANCH_CHARS
        .iter()
        .find(|ch| branch_name.contains(**ch))
    {
        return Err(invalid(format!(
            "{field_name} contains invalid character {ch:?}"
        )));
    }

    if branch_name.contains("..") {
        return Err(invalid(format!(
            "{field_name} cannot contain consecutive dots '..'"
        )));
    }

    if branch_name.starts_with(&['.', '/'][..]) || branch_name.ends_with(&['.', '/'][..]) {
        return Err(invalid(format!(
            "{field_name} cannot start or end with '.' or '/'"
        )));
    }

    if branch_name.ends_with(".lock") {
        return Err(invalid(format!("{field_name} cannot end with '.lock'")));
    }

    Ok(())
}

/// Configuration loaded from a pr-agent.yaml file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct YamlConfig {
    /// Base branch for pull requests
    pub base_branch: Option<String>,
    /// Templates directory
    pub templates_dir: Option<PathBuf>,
    /// Template catalog mode
    pub template_catalog: Option<TemplateCatalog>,
    /// Events log path
    pub events_file: Option<PathBuf>,
    /// Diff character budget
    pub max_diff_chars: Option<usize>,
    /// Default event limit
    pub default_event_limit: Option<usize>,
}

impl YamlConfig {
    /// Apply YAML configuration values to an existing Config
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(ref base_branch) = self.base_branch {
            config.base_branch = base_branch.clone();
        }
        if let Some(ref templates_dir) = self.templates_dir {
            config.templates_dir = templates_dir.clone();
        }
        if let Some(catalog) = self.template_catalog {
            config.template_catalog = catalog;
        }
        if let Some(ref events_file) = self.events_file {
            config.events_file = events_file.clone();
        }
        if let Some(max_diff_chars) = self.max_diff_chars {
            config.max_diff_chars = max_diff_chars;
        }
        if let Some(limit) = self.default_event_limit {
            config.default_event_limit = limit;
        }
    }

    /// Load YAML configuration from a file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::info!("Loading YAML configuration from: {:?}", path);

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: YamlConfig =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::YamlParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        if let Some(ref base_branch) = config.base_branch {
            validate_branch_name(base_branch, "base_branch")?;
        }

        Ok(config)
    }

    /// Try to load YAML configuration, returning default if file not found
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Config::find_yaml_config_file() {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }
}
