//! Renderer configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty document is a
//! valid configuration.
//!
//! ```toml
//! worker_threads = 4
//! visibility_batch_size = 25
//! clear_colour = { r = 0.1, g = 0.1, b = 0.1, a = 1.0 }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{GraphicsError, GraphicsResult};
use crate::pass::DEFAULT_VISIBILITY_BATCH_SIZE;
use crate::types::Colour;

/// Tunables for the frame pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererConfig {
    /// Worker thread count for pass compilation. `None` uses the available
    /// parallelism of the machine.
    pub worker_threads: Option<usize>,
    /// Number of objects tested per culling task.
    pub visibility_batch_size: usize,
    /// Clear colour used by snapshots created through the renderer.
    pub clear_colour: Colour,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            worker_threads: None,
            visibility_batch_size: DEFAULT_VISIBILITY_BATCH_SIZE,
            clear_colour: Colour::BLACK,
        }
    }
}

impl RendererConfig {
    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml_str(source: &str) -> GraphicsResult<Self> {
        let config: RendererConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> GraphicsResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        log::debug!("Loaded renderer config from {}", path.display());
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> GraphicsResult<()> {
        if self.visibility_batch_size == 0 {
            return Err(GraphicsError::InvalidConfig(
                "visibility_batch_size must be greater than zero".to_string(),
            ));
        }
        if self.worker_threads == Some(0) {
            return Err(GraphicsError::InvalidConfig(
                "worker_threads must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
