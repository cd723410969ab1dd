//! Built-in settings defaults (layer 1)

use serde::{Deserialize, Serialize};

/// Built-in default settings values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Project root, relative to the directory the build is invoked for (default: ".")
    pub root: String,

    /// Application sources, relative to the project root (default: "src")
    pub source_dir: String,

    /// Static assets, relative to the project root (default: "assets")
    pub assets_dir: String,

    /// Bundle output, relative to the project root (default: "build")
    pub output_dir: String,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            source_dir: "src".to_string(),
            assets_dir: "assets".to_string(),
            output_dir: "build".to_string(),
        }
    }
}

impl BuiltinDefaults {
    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "paths": {
                "root": self.root,
                "source_dir": self.source_dir,
                "assets_dir": self.assets_dir,
                "output_dir": self.output_dir
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let defaults = BuiltinDefaults::default();
        assert_eq!(defaults.root, ".");
        assert_eq!(defaults.source_dir, "src");
        assert_eq!(defaults.assets_dir, "assets");
        assert_eq!(defaults.output_dir, "build");
    }

    #[test]
    fn test_to_value() {
        let value = BuiltinDefaults::default().to_value();
        assert_eq!(value["paths"]["source_dir"], "src");
        assert_eq!(value["paths"]["output_dir"], "build");
    }
}
