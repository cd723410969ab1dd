//! JSON descriptor artifact
//!
//! Renders the effective descriptor and wraps it with the build mode and
//! settings provenance, ready to be written where the bundler picks it up.

use chrono::{DateTime, Utc};
use rcsc_descriptor::BuildDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use super::{render, BundlerEngine, EngineError};
use crate::build::Mode;
use crate::config::ConfigSource;

/// Schema version for descriptor artifacts
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier
pub const SCHEMA_ID: &str = "rcsc-ui/build_descriptor@1";

/// A rendered descriptor with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptorArtifact {
    pub schema_version: u32,

    pub schema_id: String,

    /// When this artifact was rendered
    pub created_at: DateTime<Utc>,

    /// Target environment
    pub mode: Mode,

    /// Settings layers that located the project files
    pub sources: Vec<ConfigSource>,

    /// Engine configuration
    pub config: Value,
}

impl DescriptorArtifact {
    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write to file, creating the parent directory if needed
    pub fn write_to_file(&self, path: &Path) -> Result<(), EngineError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        tracing::info!(path = %path.display(), mode = %self.mode, "wrote build descriptor");
        Ok(())
    }
}

/// Engine that emits a [`DescriptorArtifact`] instead of bundling.
#[derive(Debug, Clone)]
pub struct JsonEmitter {
    mode: Mode,
    sources: Vec<ConfigSource>,
}

impl JsonEmitter {
    pub fn new(mode: Mode, sources: Vec<ConfigSource>) -> Self {
        Self { mode, sources }
    }
}

impl BundlerEngine for JsonEmitter {
    type Output = DescriptorArtifact;

    fn build(&mut self, descriptor: &BuildDescriptor) -> Result<DescriptorArtifact, EngineError> {
        Ok(DescriptorArtifact {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            mode: self.mode,
            sources: self.sources.clone(),
            config: render(descriptor)?,
        })
    }
}
