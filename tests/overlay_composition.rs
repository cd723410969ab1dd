//! Overlay composition tests
//!
//! Exercises the full base + overlay path for both target environments.

use rcsc_descriptor::{merge, PluginSpec, SourceMapMode, StatsLevel};
use rcsc_ui_build::build::{base, effective, overlay, Mode, ProjectLayout};
use rcsc_ui_build::engine::render;

fn layout() -> ProjectLayout {
    ProjectLayout::new("/srv/rcsc/app")
}

fn loaders(mode: Mode) -> Vec<String> {
    effective(mode, &layout())
        .transform_rules
        .iter()
        .map(|r| r.loader_chain[0].loader.clone())
        .collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_development_port_and_minify_off() {
    let d = effective(Mode::Development, &layout());

    assert_eq!(d.dev_server.as_ref().and_then(|s| s.port), Some(3003));
    assert_eq!(d.minify(), Some(false));
    assert_eq!(d.devtool, Some(SourceMapMode::NosourcesSourceMap));
}

#[test]
fn test_production_port_and_minify_on() {
    let d = effective(Mode::Production, &layout());

    assert_eq!(d.dev_server.as_ref().and_then(|s| s.port), Some(3003));
    assert_eq!(d.minify(), Some(true));
}

#[test]
fn test_dev_server_base_options_survive() {
    for mode in [Mode::Development, Mode::Production] {
        let server = effective(mode, &layout()).dev_server.unwrap();
        assert_eq!(server.stats, Some(StatsLevel::ErrorsOnly));
        assert_eq!(server.content_base, Some(layout().source_path()));
    }
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn test_base_plugins_run_before_minify() {
    for mode in [Mode::Development, Mode::Production] {
        let names: Vec<&str> = effective(mode, &layout())
            .plugins
            .iter()
            .map(PluginSpec::name)
            .collect();
        assert_eq!(names, vec!["asset-copy", "environment-injection", "minify"]);
    }
}

#[test]
fn test_rule_precedence_preserved() {
    for mode in [Mode::Development, Mode::Production] {
        let order = loaders(mode);
        let markup = order.iter().position(|l| l == "file-loader").unwrap();
        let script = order.iter().position(|l| l == "babel-loader").unwrap();
        assert!(markup < script);
        assert_eq!(order.len(), 4);
    }
}

#[test]
fn test_plugins_are_base_then_overlay() {
    let base = base::build(&layout());
    for o in [overlay::development(), overlay::production()] {
        let merged = merge(&base, &o);
        let expected: Vec<PluginSpec> = base.plugins.iter().chain(&o.plugins).cloned().collect();
        assert_eq!(merged.plugins, expected);
    }
}

#[test]
fn test_base_unchanged_by_merge() {
    let base = base::build(&layout());
    let snapshot = base.clone();

    let _ = merge(&base, &overlay::development());
    let _ = merge(&base, &overlay::production());

    assert_eq!(base, snapshot);
}

// =============================================================================
// Exemptions and routing on the effective descriptor
// =============================================================================

#[test]
fn test_no_parse_after_merge() {
    let d = effective(Mode::Development, &layout());

    assert!(d.is_exempt("src/Main.elm").unwrap());
    assert!(d.is_exempt("vendor/jquery.min.js").unwrap());
    assert!(!d.is_exempt("src/index.js").unwrap());
}

#[test]
fn test_routing_after_merge() {
    let d = effective(Mode::Production, &layout());
    let rule = d.rule_for("src/index.html").unwrap().unwrap();
    assert_eq!(rule.loader_chain[0].loader, "file-loader");

    let rule = d.rule_for("src/Page/Home.elm").unwrap().unwrap();
    assert_eq!(rule.loader_chain[0].loader, "elm-webpack-loader");
}

#[test]
fn test_rendered_modes_differ_only_in_minimize() {
    let mut dev = render(&effective(Mode::Development, &layout())).unwrap();
    let mut prod = render(&effective(Mode::Production, &layout())).unwrap();

    assert_eq!(dev["plugins"][2]["options"]["minimize"], false);
    assert_eq!(prod["plugins"][2]["options"]["minimize"], true);

    dev["plugins"][2]["options"]["minimize"] = serde_json::Value::Bool(true);
    prod["plugins"][2]["options"]["minimize"] = serde_json::Value::Bool(true);
    assert_eq!(dev, prod);
}
