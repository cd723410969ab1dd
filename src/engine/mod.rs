//! Bundler engine boundary
//!
//! The asset bundler is an external collaborator. [`BundlerEngine`] is the
//! capability the build side calls against; [`render`] converts an
//! effective descriptor into the configuration shape the engine reads.

mod json;

pub use json::{DescriptorArtifact, JsonEmitter, SCHEMA_ID, SCHEMA_VERSION};

use rcsc_descriptor::{BuildDescriptor, PatternError, PluginSpec, TransformRule};
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Errors raised while handing a descriptor to an engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    InvalidPattern(#[from] PatternError),

    #[error("failed to serialize descriptor: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An asset bundler that consumes one effective descriptor per invocation.
pub trait BundlerEngine {
    type Output;

    fn build(&mut self, descriptor: &BuildDescriptor) -> Result<Self::Output, EngineError>;
}

/// Render `descriptor` in the bundler's configuration shape.
///
/// Every pattern is compiled first, so the engine never receives a rule it
/// cannot evaluate.
pub fn render(descriptor: &BuildDescriptor) -> Result<Value, EngineError> {
    validate(descriptor)?;

    let rules: Vec<Value> = descriptor.transform_rules.iter().map(render_rule).collect();
    let no_parse: Vec<String> = descriptor.no_parse.iter().map(|p| p.to_string()).collect();
    let plugins: Vec<Value> = descriptor.plugins.iter().map(render_plugin).collect();

    let mut config = Map::new();
    config.insert("entry".to_string(), serde_json::to_value(&descriptor.entry_points)?);
    config.insert(
        "output".to_string(),
        json!({
            "filename": descriptor.output_rule.filename_pattern,
            "path": descriptor.output_rule.directory,
        }),
    );
    config.insert(
        "module".to_string(),
        json!({
            "rules": rules,
            "noParse": no_parse,
        }),
    );
    config.insert("plugins".to_string(), Value::Array(plugins));

    if let Some(dev_server) = &descriptor.dev_server {
        let mut server = Map::new();
        if let Some(content_base) = &dev_server.content_base {
            server.insert("contentBase".to_string(), json!(content_base));
        }
        if let Some(stats) = dev_server.stats {
            server.insert("stats".to_string(), json!(stats.as_str()));
        }
        if let Some(port) = dev_server.port {
            server.insert("port".to_string(), json!(port));
        }
        config.insert("devServer".to_string(), Value::Object(server));
    }

    if let Some(devtool) = descriptor.devtool {
        config.insert("devtool".to_string(), json!(devtool.as_str()));
    }

    Ok(Value::Object(config))
}

fn validate(descriptor: &BuildDescriptor) -> Result<(), PatternError> {
    for rule in &descriptor.transform_rules {
        rule.match_pattern.compile()?;
        for exclude in &rule.exclude_patterns {
            exclude.compile()?;
        }
    }
    for pattern in &descriptor.no_parse {
        pattern.compile()?;
    }
    Ok(())
}

fn render_rule(rule: &TransformRule) -> Value {
    let uses: Vec<Value> = rule
        .loader_chain
        .iter()
        .map(|l| {
            if l.options.is_empty() {
                json!({ "loader": l.loader })
            } else {
                json!({ "loader": l.loader, "options": l.options })
            }
        })
        .collect();

    let mut out = Map::new();
    out.insert("test".to_string(), json!(rule.match_pattern.to_string()));
    if !rule.exclude_patterns.is_empty() {
        let excludes: Vec<String> = rule.exclude_patterns.iter().map(|p| p.to_string()).collect();
        out.insert("exclude".to_string(), json!(excludes));
    }
    out.insert("use".to_string(), Value::Array(uses));
    Value::Object(out)
}

fn render_plugin(plugin: &PluginSpec) -> Value {
    match plugin {
        PluginSpec::AssetCopy { patterns } => json!({
            "plugin": "CopyWebpackPlugin",
            "options": { "patterns": patterns },
        }),
        PluginSpec::EnvironmentInjection { defaults } => json!({
            "plugin": "EnvironmentPlugin",
            "options": defaults,
        }),
        PluginSpec::Minify { enabled } => json!({
            "plugin": "LoaderOptionsPlugin",
            "options": { "minimize": enabled },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{self, Mode, ProjectLayout};
    use rcsc_descriptor::MatchPattern;

    fn rendered(mode: Mode) -> Value {
        let descriptor = build::effective(mode, &ProjectLayout::new("/app"));
        render(&descriptor).unwrap()
    }

    #[test]
    fn test_render_output_and_entry() {
        let config = rendered(Mode::Production);
        assert_eq!(config["output"]["filename"], "rcsc_ui-[name].js");
        assert_eq!(config["output"]["path"], "/app/build");
        assert_eq!(config["entry"]["vendor"][0], "bootstrap");
        assert_eq!(config["entry"]["application"][0], "babel-polyfill");
    }

    #[test]
    fn test_render_rules() {
        let config = rendered(Mode::Development);
        let rules = config["module"]["rules"].as_array().unwrap();

        assert_eq!(rules.len(), 4);
        assert_eq!(rules[0]["test"], r"/\.html$/i");
        assert!(rules[0].get("exclude").is_none());
        assert_eq!(rules[2]["exclude"], json!(["/elm-stuff/", "/node_modules/"]));
        assert_eq!(rules[3]["use"][0]["loader"], "elm-webpack-loader");
        assert_eq!(rules[3]["use"][0]["options"]["cwd"], "src");
        assert!(rules[2]["use"][0].get("options").is_none());
    }

    #[test]
    fn test_render_no_parse_and_devtool() {
        let config = rendered(Mode::Development);
        assert_eq!(config["module"]["noParse"], json!([r"/\.elm$/", r"/\.min\.js$/"]));
        assert_eq!(config["devtool"], "nosources-source-map");
    }

    #[test]
    fn test_render_plugins_in_order() {
        let config = rendered(Mode::Production);
        let plugins = config["plugins"].as_array().unwrap();

        let names: Vec<&str> = plugins.iter().map(|p| p["plugin"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["CopyWebpackPlugin", "EnvironmentPlugin", "LoaderOptionsPlugin"]);
        assert_eq!(plugins[0]["options"]["patterns"][0]["to"], "images");
        assert_eq!(plugins[1]["options"]["CS_ADMIN_SECRET"], "admin-secret");
        assert_eq!(plugins[2]["options"]["minimize"], true);
    }

    #[test]
    fn test_render_dev_server() {
        let config = rendered(Mode::Development);
        assert_eq!(config["devServer"]["port"], 3003);
        assert_eq!(config["devServer"]["stats"], "errors-only");
        assert_eq!(config["devServer"]["contentBase"], "/app/src");
    }

    #[test]
    fn test_render_rejects_invalid_pattern() {
        let mut descriptor = build::effective(Mode::Development, &ProjectLayout::new("/app"));
        descriptor.no_parse.push(MatchPattern::new("(unclosed"));

        let err = render(&descriptor).unwrap_err();
        assert!(matches!(err, EngineError::InvalidPattern(_)));
    }
}
