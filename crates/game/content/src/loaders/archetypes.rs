//! Archetype table loader.

use std::path::Path;

use hostile_core::{Archetype, ArchetypeTable};

use crate::loaders::{LoadResult, read_file};

/// Loader for archetype tables from RON files.
pub struct ArchetypeLoader;

impl ArchetypeLoader {
    /// Load an archetype table from a RON file.
    ///
    /// RON format: `Vec<(String, Archetype)>`. Every entry is validated;
    /// duplicate ids and impossible stats fail the whole load.
    pub fn load(path: &Path) -> LoadResult<ArchetypeTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ArchetypeTable> {
        let entries: Vec<(String, Archetype)> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse archetype RON: {}", e))?;
        ArchetypeTable::from_entries(entries)
            .map_err(|e| anyhow::anyhow!("Invalid archetype table: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostile_core::{AttackId, BehaviorTag, WeaponProfile};

    const SAMPLE: &str = r#"[
        ("frigate", (
            name: "Frigate",
            class: Frigate,
            shields: 20.0,
            armor: 10.0,
            hull: 20.0,
            speed: 2.0,
            fire_interval: 90,
            damage: 8.0,
            score: 100,
            refugees: 1,
            behavior: Standard,
            weapon: Pulse,
        )),
        ("tyrant", (
            name: "Tyrant",
            class: Boss,
            shields: 500.0,
            armor: 500.0,
            hull: 500.0,
            speed: 1.0,
            fire_interval: 60,
            damage: 12.0,
            score: 5000,
            refugees: 40,
            behavior: Cruiser,
            weapon: DualHeavy,
            boss: Some((
                signatures: [Spiral, LaserSweep],
                phase_bonus: Speed(1.2),
                max_summons: 6,
            )),
        )),
    ]"#;

    #[test]
    fn parses_regular_and_boss_entries() {
        let table = ArchetypeLoader::parse(SAMPLE).unwrap();
        assert_eq!(table.len(), 2);
        let frigate = table.get("frigate").unwrap();
        assert_eq!(frigate.behavior, BehaviorTag::Standard);
        assert!(frigate.boss.is_none());
        let tyrant = table.get("tyrant").unwrap();
        assert_eq!(tyrant.weapon, WeaponProfile::DualHeavy);
        assert_eq!(
            tyrant.boss.as_ref().unwrap().signatures,
            vec![AttackId::Spiral, AttackId::LaserSweep]
        );
    }

    #[test]
    fn rejects_invalid_stats() {
        let bad = SAMPLE.replace("hull: 20.0", "hull: 0.0");
        let err = ArchetypeLoader::parse(&bad).unwrap_err();
        assert!(err.to_string().contains("hull must be positive"));
    }

    #[test]
    fn reports_missing_file() {
        let err = ArchetypeLoader::load(Path::new("/nonexistent/archetypes.ron")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
