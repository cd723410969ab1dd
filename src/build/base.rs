//! Base build descriptor shared by every target environment.

use rcsc_descriptor::{
    BuildDescriptor, CopyPattern, DevServerOptions, EntryPoints, LoaderSpec, MatchPattern,
    OutputRule, PluginSpec, StatsLevel, TransformRule,
};

use super::ProjectLayout;
use crate::env;

/// Prefix of every emitted bundle filename.
pub const PRODUCT_PREFIX: &str = "rcsc_ui";

/// Third-party UI framework modules bundled as `vendor`, in load order.
pub const VENDOR_MODULES: &[&str] = &[
    "bootstrap",
    "@webcomponents/webcomponentsjs/webcomponents-loader",
    "@webcomponents/webcomponentsjs/custom-elements-es5-adapter",
    "web-component",
];

/// Polyfill loaded ahead of the application entry module.
pub const POLYFILL: &str = "babel-polyfill";

/// Dependency and build-artifact directories skipped by source transforms.
const SKIPPED_DIRS: &[&str] = &["elm-stuff", "node_modules"];

/// Build the base descriptor for `layout`.
pub fn build(layout: &ProjectLayout) -> BuildDescriptor {
    BuildDescriptor {
        entry_points: entry_points(layout),
        output_rule: OutputRule {
            filename_pattern: format!("{}-[name].js", PRODUCT_PREFIX),
            directory: layout.output_path(),
        },
        transform_rules: transform_rules(layout),
        // Only the compiler's own extension; wider exemptions would let the
        // generic script rule process the same files twice.
        no_parse: vec![MatchPattern::new(r"\.elm$")],
        plugins: plugins(layout),
        dev_server: Some(DevServerOptions {
            content_base: Some(layout.source_path()),
            stats: Some(StatsLevel::ErrorsOnly),
            port: None,
        }),
        devtool: None,
    }
}

fn entry_points(layout: &ProjectLayout) -> EntryPoints {
    let mut entry_points = EntryPoints::new();
    entry_points.insert(
        "application".to_string(),
        vec![
            POLYFILL.to_string(),
            layout.source_file("index.js").to_string_lossy().to_string(),
        ],
    );
    entry_points.insert(
        "vendor".to_string(),
        VENDOR_MODULES.iter().map(|m| m.to_string()).collect(),
    );
    entry_points
}

fn skipped_dirs() -> Vec<MatchPattern> {
    SKIPPED_DIRS.iter().map(|d| MatchPattern::new(*d)).collect()
}

/// Rules in precedence order: markup, stylesheets, scripts, Elm sources.
fn transform_rules(layout: &ProjectLayout) -> Vec<TransformRule> {
    vec![
        TransformRule::new(
            MatchPattern::case_insensitive(r"\.html$"),
            vec![LoaderSpec::new("file-loader")],
        ),
        TransformRule::new(
            MatchPattern::new(r"\.(sass|less|css)$"),
            vec![
                LoaderSpec::new("style-loader"),
                LoaderSpec::new("css-loader"),
                LoaderSpec::new("less-loader"),
            ],
        ),
        TransformRule::new(MatchPattern::new(r"\.js$"), vec![LoaderSpec::new("babel-loader")])
            .excluding(skipped_dirs()),
        TransformRule::new(
            MatchPattern::new(r"\.elm$"),
            vec![LoaderSpec::new("elm-webpack-loader").with_option("cwd", layout.source_dir.as_str())],
        )
        .excluding(skipped_dirs()),
    ]
}

fn plugins(layout: &ProjectLayout) -> Vec<PluginSpec> {
    let assets = layout.assets_path();
    vec![
        PluginSpec::AssetCopy {
            patterns: vec![
                CopyPattern::new(assets.join("images"), "images"),
                CopyPattern::new(layout.source_file("index.html"), "."),
                CopyPattern::new(assets.join("favicon.ico"), "."),
            ],
        },
        PluginSpec::EnvironmentInjection {
            defaults: env::build_time_defaults(),
        },
    ]
}
