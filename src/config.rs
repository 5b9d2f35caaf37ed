//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/zettl/zettl.toml`
//! 3. Local config: `<project_dir>/.zettl.toml`
//! 4. Environment variables: `ZETTL_*` prefix

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// Raw settings for intermediate parsing.
///
/// Every field is optional so merging can tell "not specified" apart from
/// an explicit value, including an explicit empty `exclude = []`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub notes_dir: Option<PathBuf>,
    pub extension: Option<String>,
    pub editor: Option<String>,
    pub exclude: Option<Vec<String>>,
}

/// Unified configuration for zettl.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the note files (default: ~/.zettl/zettel)
    pub notes_dir: PathBuf,
    /// Note file extension without the dot (default: md)
    pub extension: String,
    /// Editor command (default: $EDITOR or "vim")
    pub editor: String,
    /// File stems in the notes directory that are not notes
    pub exclude: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".into());

        Self {
            notes_dir: default_notes_dir(),
            extension: "md".into(),
            editor,
            exclude: vec![],
        }
    }
}

fn default_notes_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".zettl").join("zettel"))
        .unwrap_or_else(|| PathBuf::from("~/.zettl/zettel"))
}

/// Get the XDG config directory for zettl.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "zettl").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("zettl.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".zettl.toml")
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
    /// Merge arrays with union semantics and negation support.
    ///
    /// - Items from overlay are added to base
    /// - Items prefixed with `!` remove the corresponding item from the result
    /// - Duplicates are de-duplicated, output is sorted
    ///
    /// # Examples
    /// ```ignore
    /// merge_array(&["README"], &["index"])            // → ["README", "index"]
    /// merge_array(&["README", "index"], &["!index"])  // → ["README"]
    /// ```
    pub fn merge_array(base: &[String], overlay: &[String]) -> Vec<String> {
        let mut result: HashSet<String> = base.iter().cloned().collect();

        for pattern in overlay {
            if let Some(negated) = pattern.strip_prefix('!') {
                result.remove(negated);
            } else {
                result.insert(pattern.clone());
            }
        }

        let mut vec: Vec<String> = result.into_iter().collect();
        vec.sort();
        vec
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.notes_dir.to_string_lossy().as_ref());
        self.notes_dir = PathBuf::from(expanded);

        // may contain a path like ~/bin/myeditor
        self.editor = expand_env_vars(&self.editor);
    }

    /// Merge local config onto self with union semantics for `exclude`.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            notes_dir: overlay
                .notes_dir
                .clone()
                .unwrap_or_else(|| self.notes_dir.clone()),
            extension: overlay
                .extension
                .clone()
                .unwrap_or_else(|| self.extension.clone()),
            editor: overlay
                .editor
                .clone()
                .unwrap_or_else(|| self.editor.clone()),
            exclude: overlay
                .exclude
                .as_ref()
                .map(|o| Self::merge_array(&self.exclude, o))
                .unwrap_or_else(|| self.exclude.clone()),
        }
    }

    /// Apply global config onto defaults with REPLACE semantics for `exclude`.
    fn apply_global(&self, global: &RawSettings) -> Self {
        Self {
            notes_dir: global
                .notes_dir
                .clone()
                .unwrap_or_else(|| self.notes_dir.clone()),
            extension: global
                .extension
                .clone()
                .unwrap_or_else(|| self.extension.clone()),
            editor: global.editor.clone().unwrap_or_else(|| self.editor.clone()),
            exclude: global
                .exclude
                .clone()
                .unwrap_or_else(|| self.exclude.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional directory holding a local `.zettl.toml`
    ///
    /// # Array Merge Semantics
    /// - Defaults → Global: REPLACE
    /// - Global → Local: UNION with `!name` negation
    /// - Any → Env vars: REPLACE
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                let raw = load_raw_settings(&global_path)?;
                current = current.apply_global(&raw);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("local config: {}", local_path.display());
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply ZETTL_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("ZETTL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("exclude"),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("notes_dir") {
            settings.notes_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("extension") {
            settings.extension = val;
        }
        if let Ok(val) = config.get_string("editor") {
            settings.editor = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("exclude") {
            settings.exclude = val;
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
        r#"# zettl configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/zettl/zettl.toml   (defines your baseline)
#   Local:  <project_dir>/.zettl.toml    (per-project additions)
#   Env:    ZETTL_* environment variables (explicit overrides)
#
# Array Merge Semantics:
#   Global config REPLACES compiled defaults.
#   Local config UNIONS with global.
#   Use "!name" in local config to REMOVE an inherited item:
#     exclude = ["drafts", "!README"]

# Directory holding one file per note, named <identifier>.<extension>
# notes_dir = "~/.zettl/zettel"

# Note file extension
# extension = "md"

# Editor for new and edited notes
# editor = "vim"

# File stems in notes_dir that are not notes
# exclude = ["README", "index"]
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

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load(None).expect("load defaults");
        assert!(!settings.editor.is_empty());
        assert!(!settings.extension.is_empty());
    }

    #[test]
    fn given_tilde_in_notes_dir_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            notes_dir: PathBuf::from("~/notes"),
            extension: "md".into(),
            editor: "~/bin/myeditor".into(),
            exclude: vec![],
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let notes = settings.notes_dir.to_string_lossy();
        assert!(notes.starts_with(&home), "notes_dir should start with home: {notes}");
        assert!(!notes.contains('~'));
        assert!(settings.editor.starts_with(&home));
    }

    #[test]
    fn test_merge_array_union() {
        let result = Settings::merge_array(&strings(&["a", "b"]), &strings(&["c"]));
        assert_eq!(result, strings(&["a", "b", "c"]));
    }

    #[test]
    fn test_merge_array_negation() {
        let result = Settings::merge_array(&strings(&["a", "b"]), &strings(&["!a", "c"]));
        assert_eq!(result, strings(&["b", "c"]));
    }

    #[test]
    fn test_merge_array_negation_nonexistent() {
        let result = Settings::merge_array(&strings(&["a", "b"]), &strings(&["!x"]));
        assert_eq!(result, strings(&["a", "b"]));
    }

    #[test]
    fn test_merge_array_duplicates() {
        let result = Settings::merge_array(&strings(&["a", "b"]), &strings(&["a", "c"]));
        assert_eq!(result, strings(&["a", "b", "c"]));
    }

    #[test]
    fn test_apply_global_replaces_exclude() {
        let base = Settings {
            exclude: strings(&["README"]),
            ..Settings::default()
        };
        let global = RawSettings {
            extension: Some("txt".into()),
            exclude: Some(strings(&["index"])),
            ..RawSettings::default()
        };

        let result = base.apply_global(&global);

        assert_eq!(result.extension, "txt");
        assert_eq!(result.exclude, strings(&["index"]));
        assert_eq!(result.notes_dir, base.notes_dir);
    }

    #[test]
    fn test_merge_with_unions_exclude() {
        let base = Settings {
            exclude: strings(&["README", "index"]),
            ..Settings::default()
        };
        let local = RawSettings {
            exclude: Some(strings(&["!index", "drafts"])),
            ..RawSettings::default()
        };

        let result = base.merge_with(&local);

        assert_eq!(result.exclude, strings(&["README", "drafts"]));
        assert_eq!(result.extension, base.extension);
    }

    #[test]
    fn given_template_when_parsed_then_all_defaults() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("template parses");
        assert!(raw.notes_dir.is_none());
        assert!(raw.exclude.is_none());
    }
}
