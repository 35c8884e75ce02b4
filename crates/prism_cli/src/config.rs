//! Render settings: JSON file first, then command-line overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use prism_renderer::RenderConfig;

/// Load a config file, or the defaults when no path is given.
///
/// Fields missing from the file keep their default values.
pub fn load(path: Option<&Path>) -> Result<RenderConfig> {
    let Some(path) = path else {
        return Ok(RenderConfig::default());
    };

    let text = fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = serde_json::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Values given on the command line; `None` leaves the config untouched.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub samples: Option<u32>,
    pub depth: Option<u32>,
    pub seed: Option<u64>,
}

impl Overrides {
    pub fn apply(&self, mut config: RenderConfig) -> RenderConfig {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(samples) = self.samples {
            config.samples_per_pixel = samples;
        }
        if let Some(depth) = self.depth {
            config.max_depth = depth;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config
    }
}
