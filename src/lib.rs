//! RCSC UI build composition and runtime bootstrap.
//!
//! The build side composes the bundler descriptor from a shared base and
//! one environment overlay; the runtime side resolves startup flags from
//! the environment and mounts the application.

pub mod bootstrap;
pub mod build;
pub mod config;
pub mod engine;
pub mod env;

pub use bootstrap::{start, Application, BootstrapError, Document, InitOptions, MOUNT_ID};
pub use build::{effective, Mode, ProjectLayout};
pub use config::{ConfigError, EffectiveSettings};
pub use engine::{render, BundlerEngine, DescriptorArtifact, EngineError, JsonEmitter};
pub use env::{resolve, ConfigFlags, EnvMap};
