//! Build descriptors for the UI bundle
//!
//! One shared base descriptor plus one overlay per target environment.
//! Exactly one overlay is merged per build invocation.

pub mod base;
pub mod overlay;

use rcsc_descriptor::{merge, BuildDescriptor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Target environment of a build invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the project's sources, assets and output live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Project root; every other directory is relative to it.
    pub root: PathBuf,
    pub source_dir: String,
    pub assets_dir: String,
    pub output_dir: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ProjectLayout {
    /// Layout with the conventional directory names under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            source_dir: "src".to_string(),
            assets_dir: "assets".to_string(),
            output_dir: "build".to_string(),
        }
    }

    pub fn source_path(&self) -> PathBuf {
        self.root.join(&self.source_dir)
    }

    pub fn assets_path(&self) -> PathBuf {
        self.root.join(&self.assets_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output_dir)
    }

    /// `path` relative to the source directory, rooted at the project root.
    pub fn source_file(&self, path: impl AsRef<Path>) -> PathBuf {
        self.source_path().join(path)
    }
}

/// The effective descriptor for `mode`: the base merged with that mode's
/// overlay.
pub fn effective(mode: Mode, layout: &ProjectLayout) -> BuildDescriptor {
    let base = base::build(layout);
    let overlay = match mode {
        Mode::Development => overlay::development(),
        Mode::Production => overlay::production(),
    };

    let descriptor = merge(&base, &overlay);
    tracing::debug!(
        mode = %mode,
        rules = descriptor.transform_rules.len(),
        plugins = descriptor.plugins.len(),
        "merged build overlay"
    );
    descriptor
}
