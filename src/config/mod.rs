//! Build settings
//!
//! Settings locate the project's directories. They are merged from three
//! layers:
//! 1. Built-in defaults
//! 2. Project file (<root>/rcsc-ui.toml)
//! 3. CLI overrides

mod defaults;
mod effective;
mod merge;

pub use defaults::BuiltinDefaults;
pub use effective::{ConfigError, ConfigOrigin, ConfigSource, EffectiveSettings, PROJECT_FILE};
pub use merge::{deep_merge, merge_layers};
