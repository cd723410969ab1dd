//! Environment overlays applied on top of the base descriptor.

use rcsc_descriptor::{
    DevServerOptions, MatchPattern, PartialBuildDescriptor, PluginSpec, SourceMapMode,
};

/// Dev server port used by both targets.
pub const DEV_SERVER_PORT: u16 = 3003;

/// Development overlay: minification off.
pub fn development() -> PartialBuildDescriptor {
    overlay(false)
}

/// Production overlay: minification on.
pub fn production() -> PartialBuildDescriptor {
    overlay(true)
}

fn overlay(minimize: bool) -> PartialBuildDescriptor {
    PartialBuildDescriptor {
        devtool: Some(SourceMapMode::NosourcesSourceMap),
        dev_server: Some(DevServerOptions {
            port: Some(DEV_SERVER_PORT),
            ..Default::default()
        }),
        // Appended after the base plugins so copy and injection run first.
        plugins: vec![PluginSpec::Minify { enabled: minimize }],
        no_parse: vec![MatchPattern::new(r"\.min\.js$")],
        ..Default::default()
    }
}
