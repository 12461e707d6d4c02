//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/advisor/advisor.toml`
//! 3. Local config: `<project_dir>/.advisor.toml`
//! 4. Environment variables: `ADVISOR_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{CatalogOptions, DuplicatePolicy, FieldTrim};

/// Source file used when no `--file` is given.
pub const DEFAULT_SOURCE: &str = "CS 300 ABCU_Advising_Program_Input.csv";

/// Unified configuration for advisor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Course source read when no file is given on the command line
    pub default_source: PathBuf,
    /// Trim identifier and title fields, not only prerequisites
    pub trim_fields: bool,
    /// Handling of repeated course identifiers
    pub duplicates: DuplicatePolicy,
    /// Upper-case lookup queries before searching
    pub uppercase_queries: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_source: PathBuf::from(DEFAULT_SOURCE),
            trim_fields: false,
            duplicates: DuplicatePolicy::Overwrite,
            uppercase_queries: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub default_source: Option<PathBuf>,
    pub trim_fields: Option<bool>,
    pub duplicates: Option<DuplicatePolicy>,
    pub uppercase_queries: Option<bool>,
}

/// Get the XDG config directory for advisor.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "advisor").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("advisor.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".advisor.toml")
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

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

fn parse_duplicates(value: &str) -> Result<DuplicatePolicy, ApplicationError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "overwrite" => Ok(DuplicatePolicy::Overwrite),
        "reject" => Ok(DuplicatePolicy::Reject),
        other => Err(ApplicationError::Config {
            message: format!(
                "invalid duplicates policy '{}': expected overwrite or reject",
                other
            ),
        }),
    }
}

impl Settings {
    /// Domain options derived from these settings.
    pub fn catalog_options(&self) -> CatalogOptions {
        CatalogOptions {
            trim: if self.trim_fields {
                FieldTrim::AllFields
            } else {
                FieldTrim::Verbatim
            },
            duplicates: self.duplicates,
        }
    }

    /// Expand `~`, `$VAR` and `${VAR}` in the source path.
    ///
    /// An undefined variable is a config error rather than a literal path.
    fn expand_paths(&mut self) -> Result<(), ApplicationError> {
        let raw = self.default_source.to_string_lossy().to_string();
        let expanded = shellexpand::full(&raw).map_err(|e| ApplicationError::Config {
            message: format!("expand default_source '{}': {}", raw, e),
        })?;
        self.default_source = PathBuf::from(expanded.as_ref());
        Ok(())
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            default_source: overlay
                .default_source
                .clone()
                .unwrap_or_else(|| self.default_source.clone()),
            trim_fields: overlay.trim_fields.unwrap_or(self.trim_fields),
            duplicates: overlay.duplicates.unwrap_or(self.duplicates),
            uppercase_queries: overlay.uppercase_queries.unwrap_or(self.uppercase_queries),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory for local config
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path();
        let local = project_dir.map(local_config_path);
        let settings = Self::load_files(global.as_deref(), local.as_deref())?;
        let mut settings = Self::apply_env_overrides(settings)?;
        settings.expand_paths()?;
        Ok(settings)
    }

    /// Defaults overlaid with the given config files; missing files are ignored.
    ///
    /// Environment variables are not consulted.
    pub fn load_files(
        global: Option<&Path>,
        local: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();
        for path in [global, local].into_iter().flatten() {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }
        Ok(current)
    }

    /// Apply ADVISOR_* environment variables as explicit overrides.
    ///
    /// Keys follow the prefix after a single underscore: `ADVISOR_TRIM_FIELDS`.
    pub fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ADVISOR")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("default_source") {
            settings.default_source = PathBuf::from(val);
        }
        if let Ok(val) = config.get_bool("trim_fields") {
            settings.trim_fields = val;
        }
        if let Ok(val) = config.get_string("duplicates") {
            settings.duplicates = parse_duplicates(&val)?;
        }
        if let Ok(val) = config.get_bool("uppercase_queries") {
            settings.uppercase_queries = val;
        }

        Ok(settings)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("overwrite", DuplicatePolicy::Overwrite)]
    #[case("Reject", DuplicatePolicy::Reject)]
    #[case(" reject ", DuplicatePolicy::Reject)]
    fn given_policy_name_when_parsing_then_matches(
        #[case] input: &str,
        #[case] expected: DuplicatePolicy,
    ) {
        assert_eq!(parse_duplicates(input).unwrap(), expected);
    }

    #[test]
    fn given_unknown_policy_when_parsing_then_config_error() {
        let err = parse_duplicates("merge").unwrap_err();
        assert!(matches!(err, ApplicationError::Config { .. }));
    }

    #[test]
    fn given_trim_fields_when_deriving_options_then_trims_all() {
        let settings = Settings {
            trim_fields: true,
            duplicates: DuplicatePolicy::Reject,
            ..Settings::default()
        };
        let options = settings.catalog_options();
        assert_eq!(options.trim, FieldTrim::AllFields);
        assert_eq!(options.duplicates, DuplicatePolicy::Reject);
    }

    #[test]
    fn given_undefined_variable_in_source_when_expanding_then_config_error() {
        let mut settings = Settings {
            default_source: PathBuf::from("$ADVISOR_UNSET_SOURCE_DIR_1F3A/courses.csv"),
            ..Settings::default()
        };
        let err = settings.expand_paths().unwrap_err();
        match err {
            ApplicationError::Config { message } => {
                assert!(message.contains("ADVISOR_UNSET_SOURCE_DIR_1F3A"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn given_tilde_in_source_when_expanding_then_home_is_substituted() {
        let mut settings = Settings {
            default_source: PathBuf::from("~/courses.csv"),
            ..Settings::default()
        };
        settings.expand_paths().unwrap();
        assert!(!settings.default_source.starts_with("~"));
        assert!(settings.default_source.ends_with("courses.csv"));
    }

    #[test]
    fn given_defaults_then_faithful_policies() {
        let options = Settings::default().catalog_options();
        assert_eq!(options, CatalogOptions::default());
    }
}
