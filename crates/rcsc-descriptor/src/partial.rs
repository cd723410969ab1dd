//! Overlay descriptors: the differences one environment applies to a base.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::descriptor::{DevServerOptions, EntryPoints, SourceMapMode, TransformRule};
use crate::pattern::MatchPattern;
use crate::plugin::PluginSpec;

/// A build descriptor in which every field is optional.
///
/// Empty collections and `None` mean "no change from the base".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialBuildDescriptor {
    /// Entry bundles added or replaced by name.
    #[serde(default)]
    pub entry_points: EntryPoints,

    #[serde(default)]
    pub output_rule: Option<PartialOutputRule>,

    /// Rules appended after the base rules.
    #[serde(default)]
    pub transform_rules: Vec<TransformRule>,

    /// Parse exemptions appended after the base exemptions.
    #[serde(default)]
    pub no_parse: Vec<MatchPattern>,

    /// Plugins appended after the base plugins.
    #[serde(default)]
    pub plugins: Vec<PluginSpec>,

    #[serde(default)]
    pub dev_server: Option<DevServerOptions>,

    #[serde(default)]
    pub devtool: Option<SourceMapMode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialOutputRule {
    #[serde(default)]
    pub filename_pattern: Option<String>,

    #[serde(default)]
    pub directory: Option<PathBuf>,
}
