//! Typed build descriptors for the RCSC web UI bundle.
//!
//! A [`BuildDescriptor`] declares what the external bundler engine consumes:
//! entry bundles, output naming, ordered transform rules, plugins and
//! dev-server options. Environment overlays are expressed as a
//! [`PartialBuildDescriptor`] and folded onto a base with [`merge`].

mod descriptor;
mod merge;
mod partial;
mod pattern;
mod plugin;

pub use descriptor::{
    BuildDescriptor, DevServerOptions, EntryPoints, LoaderSpec, OutputRule, SourceMapMode,
    StatsLevel, TransformRule,
};
pub use merge::merge;
pub use partial::{PartialBuildDescriptor, PartialOutputRule};
pub use pattern::{MatchPattern, PatternError};
pub use plugin::{resolve_injected, CopyPattern, PluginSpec};
