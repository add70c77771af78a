//! Content factory for loading every data file from one directory.

use std::path::{Path, PathBuf};

use hostile_core::{ArchetypeTable, SimConfig};

use crate::loaders::{
    ArchetypeLoader, ConfigLoader, DifficultyLoader, DifficultyPresets, LoadResult,
};

/// Content factory that loads ship content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── sim.toml
/// ├── difficulty.toml
/// └── archetypes.ron
/// ```
///
/// Every file is optional; a missing file yields the built-in value.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load simulation configuration from `sim.toml`.
    pub fn load_config(&self) -> LoadResult<SimConfig> {
        let path = self.data_dir.join("sim.toml");
        if !path.exists() {
            return Ok(SimConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load difficulty presets from `difficulty.toml`.
    pub fn load_difficulty(&self) -> LoadResult<DifficultyPresets> {
        let path = self.data_dir.join("difficulty.toml");
        if !path.exists() {
            return Ok(DifficultyPresets::default());
        }
        DifficultyLoader::load(&path)
    }

    /// Load the archetype table from `archetypes.ron`.
    pub fn load_archetypes(&self) -> LoadResult<ArchetypeTable> {
        let path = self.data_dir.join("archetypes.ron");
        if !path.exists() {
            return crate::catalog::builtin_archetypes()
                .map_err(|e| anyhow::anyhow!("Invalid built-in catalog: {}", e));
        }
        ArchetypeLoader::load(&path)
    }
}
