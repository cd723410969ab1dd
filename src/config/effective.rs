//! Effective build settings with provenance
//!
//! Captures the merged settings plus where each contributing layer came
//! from.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Component, Path, PathBuf};

use super::defaults::BuiltinDefaults;
use super::merge::merge_layers;
use crate::build::ProjectLayout;

/// Settings file looked up in the project root
pub const PROJECT_FILE: &str = "rcsc-ui.toml";

/// Origin of a settings layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    Project,
    Cli,
}

/// A contributing settings layer with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    pub origin: ConfigOrigin,

    /// File path (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of raw file bytes (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PathSettings {
    root: String,
    source_dir: String,
    assets_dir: String,
    output_dir: String,
}

#[derive(Debug, Deserialize)]
struct Settings {
    paths: PathSettings,
}

/// Effective settings for one build invocation
#[derive(Debug, Clone)]
pub struct EffectiveSettings {
    /// The merged settings object
    pub settings: Value,

    /// Contributing layers in precedence order
    pub sources: Vec<ConfigSource>,

    /// Resolved project layout
    pub layout: ProjectLayout,
}

impl EffectiveSettings {
    /// Build effective settings for the project at `root`.
    ///
    /// `config_path` overrides the project file location; when given it must
    /// exist. Without it, `<root>/rcsc-ui.toml` is used if present. A
    /// `paths.root` setting is resolved against `root`.
    pub fn build(
        root: &Path,
        config_path: Option<&Path>,
        cli_overrides: Option<Value>,
    ) -> Result<Self, ConfigError> {
        let mut layers = Vec::new();
        let mut sources = Vec::new();

        // Layer 1: Built-in defaults
        layers.push(BuiltinDefaults::default().to_value());
        sources.push(ConfigSource {
            origin: ConfigOrigin::Builtin,
            path: None,
            digest: None,
        });

        // Layer 2: Project file
        let project_file = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::IoError(format!(
                        "config file does not exist: {}",
                        path.display()
                    )));
                }
                Some(path.to_path_buf())
            }
            None => {
                let default = root.join(PROJECT_FILE);
                default.exists().then_some(default)
            }
        };
        if let Some(path) = project_file {
            let (value, digest) = Self::load_toml_file(&path)?;
            tracing::debug!(path = %path.display(), %digest, "loaded project settings");
            layers.push(value);
            sources.push(ConfigSource {
                origin: ConfigOrigin::Project,
                path: Some(path.to_string_lossy().to_string()),
                digest: Some(digest),
            });
        }

        // Layer 3: CLI overrides
        if let Some(cli) = cli_overrides {
            layers.push(cli);
            sources.push(ConfigSource {
                origin: ConfigOrigin::Cli,
                path: None,
                digest: None,
            });
        }

        let merged = merge_layers(layers);
        let layout = Self::layout_from(root, &merged)?;

        Ok(Self {
            settings: merged,
            sources,
            layout,
        })
    }

    /// Load and parse a TOML file, returning the value and digest
    fn load_toml_file(path: &Path) -> Result<(Value, String), ConfigError> {
        let bytes = fs::read(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hex::encode(hasher.finalize());

        let contents = String::from_utf8(bytes)
            .map_err(|e| ConfigError::ParseError(format!("Invalid UTF-8: {}", e)))?;

        let toml_value: toml::Value = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;

        Ok((Self::toml_to_json(toml_value), digest))
    }

    /// Convert TOML Value to JSON Value
    fn toml_to_json(toml: toml::Value) -> Value {
        match toml {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(i) => Value::Number(i.into()),
            toml::Value::Float(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => Value::String(dt.to_string()),
            toml::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Self::toml_to_json).collect())
            }
            toml::Value::Table(table) => Value::Object(
                table
                    .into_iter()
                    .map(|(k, v)| (k, Self::toml_to_json(v)))
                    .collect(),
            ),
        }
    }

    fn layout_from(root: &Path, merged: &Value) -> Result<ProjectLayout, ConfigError> {
        let settings: Settings = serde_json::from_value(merged.clone())
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        let paths = settings.paths;

        if paths.root.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "paths.root must not be empty".to_string(),
            ));
        }

        for (name, dir) in [
            ("paths.source_dir", &paths.source_dir),
            ("paths.assets_dir", &paths.assets_dir),
            ("paths.output_dir", &paths.output_dir),
        ] {
            if dir.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!("{} must not be empty", name)));
            }
            if Path::new(dir).is_absolute() {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be relative to the project root",
                    name
                )));
            }
        }

        Ok(ProjectLayout {
            root: Self::resolve_root(root, &paths.root),
            source_dir: paths.source_dir,
            assets_dir: paths.assets_dir,
            output_dir: paths.output_dir,
        })
    }

    /// `setting` joined onto `base`, ignoring `.` components. An absolute
    /// setting replaces `base`.
    fn resolve_root(base: &Path, setting: &str) -> PathBuf {
        let relative: PathBuf = Path::new(setting)
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        if relative.as_os_str().is_empty() {
            base.to_path_buf()
        } else {
            base.join(relative)
        }
    }
}

/// Settings errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
