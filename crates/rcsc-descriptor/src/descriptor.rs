//! The build descriptor data model.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::pattern::{MatchPattern, PatternError};
use crate::plugin::PluginSpec;

/// Bundle name -> ordered module requests bundled under that name.
pub type EntryPoints = BTreeMap<String, Vec<String>>;

/// Complete description of one bundler invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDescriptor {
    /// Entry bundles.
    pub entry_points: EntryPoints,

    /// Where and under which names bundles are written.
    pub output_rule: OutputRule,

    /// Transform rules in precedence order. Order is significant.
    pub transform_rules: Vec<TransformRule>,

    /// Files the engine must not scan for module requests.
    #[serde(default)]
    pub no_parse: Vec<MatchPattern>,

    /// Plugins in execution order.
    #[serde(default)]
    pub plugins: Vec<PluginSpec>,

    /// Development server options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServerOptions>,

    /// Source map generation mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devtool: Option<SourceMapMode>,
}

/// Output naming and location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRule {
    /// Filename pattern; `[name]` expands to the bundle name.
    pub filename_pattern: String,

    /// Output directory.
    pub directory: PathBuf,
}

impl OutputRule {
    /// Filename the engine writes for `bundle`.
    pub fn filename_for(&self, bundle: &str) -> String {
        self.filename_pattern.replace("[name]", bundle)
    }
}

/// One class of source asset and the loader chain that converts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformRule {
    pub match_pattern: MatchPattern,

    #[serde(default)]
    pub exclude_patterns: Vec<MatchPattern>,

    /// Loaders applied to matching assets, in the order listed.
    pub loader_chain: Vec<LoaderSpec>,
}

impl TransformRule {
    pub fn new(match_pattern: MatchPattern, loader_chain: Vec<LoaderSpec>) -> Self {
        Self {
            match_pattern,
            exclude_patterns: Vec::new(),
            loader_chain,
        }
    }

    pub fn excluding(mut self, patterns: Vec<MatchPattern>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    /// True when `path` matches the rule test and none of its exclusions.
    pub fn applies_to(&self, path: &str) -> Result<bool, PatternError> {
        if !self.match_pattern.is_match(path)? {
            return Ok(false);
        }
        for exclude in &self.exclude_patterns {
            if exclude.is_match(path)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// A loader and its options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderSpec {
    pub loader: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, Value>,
}

impl LoaderSpec {
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: BTreeMap::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Development server options. Every field is optional so overlays can set
/// individual keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServerOptions {
    /// Directory served as static content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_base: Option<PathBuf>,

    /// Console output verbosity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatsLevel>,

    /// Listening port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// Dev server log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatsLevel {
    ErrorsOnly,
    Minimal,
    Normal,
    Verbose,
}

impl StatsLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ErrorsOnly => "errors-only",
            Self::Minimal => "minimal",
            Self::Normal => "normal",
            Self::Verbose => "verbose",
        }
    }
}

/// Source map generation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceMapMode {
    /// Full source maps including original sources.
    SourceMap,
    /// Source maps without the original source content.
    NosourcesSourceMap,
}

impl SourceMapMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SourceMap => "source-map",
            Self::NosourcesSourceMap => "nosources-source-map",
        }
    }
}

impl BuildDescriptor {
    /// First transform rule that applies to `path`, honoring rule order.
    pub fn rule_for(&self, path: &str) -> Result<Option<&TransformRule>, PatternError> {
        for rule in &self.transform_rules {
            if rule.applies_to(path)? {
                return Ok(Some(rule));
            }
        }
        Ok(None)
    }

    /// Whether `path` is exempt from module-request scanning.
    pub fn is_exempt(&self, path: &str) -> Result<bool, PatternError> {
        for pattern in &self.no_parse {
            if pattern.is_match(path)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Minification setting from the last minify plugin, if any.
    pub fn minify(&self) -> Option<bool> {
        self.plugins.iter().rev().find_map(|p| match p {
            PluginSpec::Minify { enabled } => Some(*enabled),
            _ => None,
        })
    }
}
