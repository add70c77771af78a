//! Content loaders for reading ship data from files.

pub mod archetypes;
pub mod config;
pub mod difficulty;
pub mod factory;

pub use archetypes::ArchetypeLoader;
pub use config::ConfigLoader;
pub use difficulty::{DifficultyLoader, DifficultyPresets};
pub use factory::ContentFactory;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
