//! Difficulty preset loader.

use std::collections::BTreeMap;
use std::path::Path;

use hostile_core::Difficulty;

use crate::loaders::{LoadResult, read_file};

/// Named difficulty bundles.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct DifficultyPresets {
    #[serde(default)]
    presets: BTreeMap<String, Difficulty>,
}

impl DifficultyPresets {
    /// Looks up `name`, falling back to the built-in presets.
    pub fn get(&self, name: &str) -> Option<Difficulty> {
        self.presets
            .get(name)
            .copied()
            .or_else(|| Difficulty::preset(name))
            .map(Difficulty::sanitized)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }
}

/// Loader for difficulty presets from TOML files.
pub struct DifficultyLoader;

impl DifficultyLoader {
    /// Load presets from a TOML file of `[presets.<name>]` tables.
    pub fn load(path: &Path) -> LoadResult<DifficultyPresets> {
        let content = read_file(path)?;
        let presets: DifficultyPresets = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse difficulty TOML: {}", e))?;

        Ok(presets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_presets_override_builtins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[presets.hard]\nhealth_mult = 2.0\ndamage_mult = 2.0\nfire_rate_mult = 0.5\nspeed_mult = 1.5\n\n\
             [presets.broken]\nhealth_mult = -1.0\ndamage_mult = 1.0\nfire_rate_mult = 1.0\nspeed_mult = 1.0"
        )
        .unwrap();

        let presets = DifficultyLoader::load(file.path()).unwrap();
        assert_eq!(presets.get("hard").unwrap().health_mult, 2.0);
        assert_eq!(presets.get("nightmare"), Some(Difficulty::NIGHTMARE));
        assert_eq!(presets.get("broken").unwrap().health_mult, 1.0);
        assert!(presets.get("impossible").is_none());
    }
}
