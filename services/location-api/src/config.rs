//! Named raster stacks loaded from YAML.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Every stack the service can query by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StacksConfig {
    #[serde(default)]
    pub stacks: BTreeMap<String, StackDefinition>,
}

/// One named stack: raster files relative to the data directory, land
/// surface first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackDefinition {
    #[serde(default)]
    pub description: Option<String>,
    pub rasters: Vec<String>,
}

impl StacksConfig {
    /// Load stacks from a YAML file.
    ///
    /// A missing file yields an empty configuration; a file that exists but
    /// does not parse is an error.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                "Stacks file {} does not exist, no named stacks available",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read: {:?}", path))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse stacks config: {:?}", path))?;

        tracing::info!("Loaded {} stacks from {:?}", config.stacks.len(), path);
        Ok(config)
    }

    /// Parse stacks from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;

        if let Some((name, _)) = config.stacks.iter().find(|(_, s)| s.rasters.is_empty()) {
            anyhow::bail!("stack {name} lists no rasters");
        }

        Ok(config)
    }

    pub fn get(&self, name: &str) -> Option<&StackDefinition> {
        self.stacks.get(name)
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}
