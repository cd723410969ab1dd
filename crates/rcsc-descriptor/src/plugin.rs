//! Plugin specifications handed to the bundler engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A plugin the engine runs after transforms, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PluginSpec {
    /// Copy static files into the output directory verbatim.
    AssetCopy { patterns: Vec<CopyPattern> },

    /// Inline environment variables into the bundle, falling back to the
    /// given defaults.
    EnvironmentInjection { defaults: BTreeMap<String, String> },

    /// Toggle loader minimization.
    Minify { enabled: bool },
}

impl PluginSpec {
    /// Short identifier used in logs and rendered configs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AssetCopy { .. } => "asset-copy",
            Self::EnvironmentInjection { .. } => "environment-injection",
            Self::Minify { .. } => "minify",
        }
    }
}

/// Source and destination of one copy operation. `to` is relative to the
/// output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyPattern {
    pub from: PathBuf,
    pub to: PathBuf,
}

impl CopyPattern {
    pub fn new(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Values an environment injection plugin inlines at build time.
///
/// A variable that is defined in `env` wins even when empty; only an
/// undefined variable falls back to its default. Variables not declared in
/// `defaults` are never injected.
pub fn resolve_injected(
    defaults: &BTreeMap<String, String>,
    env: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    defaults
        .iter()
        .map(|(key, default)| {
            let value = env.get(key).unwrap_or(default);
            (key.clone(), value.clone())
        })
        .collect()
}
