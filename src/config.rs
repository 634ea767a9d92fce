//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/chartsort/chartsort.toml`
//! 3. Local config: `<project_dir>/.chartsort.toml`
//! 4. Environment variables: `CHARTSORT_*` prefix

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::OrphanPolicy;

/// How the `chart` command prints its result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented tree with groups and their accounts
    #[default]
    Tree,
    /// One line per group or account, in display order
    List,
    /// Nested JSON document
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Tree => "tree",
            Self::List => "list",
            Self::Json => "json",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tree" => Ok(Self::Tree),
            "list" => Ok(Self::List),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other} (expected tree, list or json)")),
        }
    }
}

/// Raw settings for intermediate parsing.
///
/// Every field is optional so a layer only overrides what it specifies.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub chart_file: Option<PathBuf>,
    pub orphan_policy: Option<OrphanPolicy>,
    pub format: Option<OutputFormat>,
}

/// Unified configuration for chartsort.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Chart file used when a command gets no FILE argument
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_file: Option<PathBuf>,
    /// Handling of accounts whose group does not exist
    pub orphan_policy: OrphanPolicy,
    /// Default output format of `chart`
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chart_file: None,
            orphan_policy: OrphanPolicy::Lenient,
            format: OutputFormat::Tree,
        }
    }
}

/// Get the XDG config directory for chartsort.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "chartsort").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("chartsort.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".chartsort.toml")
}

/// Expand `~`, `$VAR` and `${VAR}`; unknown variables leave the input unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(chart_file) = &self.chart_file {
            let expanded = expand_env_vars(chart_file.to_string_lossy().as_ref());
            self.chart_file = Some(PathBuf::from(expanded));
        }
    }

    /// Merge overlay config onto self (base): overlay wins where it is Some.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            chart_file: overlay.chart_file.clone().or_else(|| self.chart_file.clone()),
            orphan_policy: overlay.orphan_policy.unwrap_or(self.orphan_policy),
            format: overlay.format.unwrap_or(self.format),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory for local config
    ///
    /// A relative `chart_file` in the local config is resolved against the
    /// project directory; `~` and `$VAR` are expanded last.
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!(path = %global_path.display(), "loading global config");
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(project) = project_dir {
            let local_path = local_config_path(project);
            if local_path.exists() {
                debug!(path = %local_path.display(), "loading local config");
                let mut raw = load_raw_settings(&local_path)?;
                raw.chart_file = raw.chart_file.map(|file| {
                    if file.is_relative() && !file.starts_with("~") {
                        project.join(file)
                    } else {
                        file
                    }
                });
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply CHARTSORT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("CHARTSORT").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("chart_file") {
            settings.chart_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("orphan_policy") {
            settings.orphan_policy = val.parse().map_err(|message| ApplicationError::Config {
                message: format!("CHARTSORT_ORPHAN_POLICY: {message}"),
            })?;
        }
        if let Ok(val) = config.get_string("format") {
            settings.format = val.parse().map_err(|message| ApplicationError::Config {
                message: format!("CHARTSORT_FORMAT: {message}"),
            })?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# chartsort configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/chartsort/chartsort.toml
#   Local:  <project_dir>/.chartsort.toml
#   Env:    CHARTSORT_* environment variables

# Chart used when no FILE argument is given (relative to the project in local config)
# chart_file = "chart.toml"

# Accounts whose group does not exist: "lenient" drops them, "strict" fails
# orphan_policy = "lenient"

# Output of `chartsort chart`: "tree", "list" or "json"
# format = "tree"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_overlay_when_merging_then_keeps_base() {
        let base = Settings {
            chart_file: Some(PathBuf::from("chart.toml")),
            orphan_policy: OrphanPolicy::Strict,
            format: OutputFormat::Json,
        };

        let merged = base.merge_with(&RawSettings::default());

        assert_eq!(merged, base);
    }

    #[test]
    fn given_overlay_when_merging_then_overlay_wins() {
        let base = Settings::default();
        let overlay = RawSettings {
            chart_file: Some(PathBuf::from("other.json")),
            orphan_policy: Some(OrphanPolicy::Strict),
            format: None,
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.chart_file, Some(PathBuf::from("other.json")));
        assert_eq!(merged.orphan_policy, OrphanPolicy::Strict);
        assert_eq!(merged.format, OutputFormat::Tree);
    }

    #[test]
    fn given_tilde_in_chart_file_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            chart_file: Some(PathBuf::from("~/charts/main.toml")),
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let chart = settings.chart_file.unwrap();
        assert!(
            chart.to_string_lossy().starts_with(&home),
            "chart_file should start with home dir: {}",
            chart.display()
        );
    }

    #[test]
    fn given_output_format_names_when_parsing_then_case_insensitive() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("list".parse::<OutputFormat>(), Ok(OutputFormat::List));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn given_default_settings_when_serialized_then_omits_chart_file() {
        let toml = Settings::default().to_toml().unwrap();

        assert!(!toml.contains("chart_file"));
        assert!(toml.contains("orphan_policy = \"lenient\""));
        assert!(toml.contains("format = \"tree\""));
    }
}
