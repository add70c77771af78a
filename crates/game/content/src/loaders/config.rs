//! Simulation configuration loader.

use std::path::Path;

use hostile_core::SimConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for simulation configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<SimConfig> {
        let content = read_file(path)?;
        let config: SimConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "world_width = 1024.0\nsummon_spacing = 10").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.world_width, 1024.0);
        assert_eq!(config.summon_spacing, 10);
        assert_eq!(config.world_height, SimConfig::DEFAULT_WORLD_HEIGHT);
    }

    #[test]
    fn rejects_wrong_types() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "drone_interval = \"often\"").unwrap();
        assert!(ConfigLoader::load(file.path()).is_err());
    }
}
