//! Scripted spawn schedules.
//!
//! A scenario is an ordered list of timed spawns. It stands in for the game's
//! wave director in tests and in the headless harness: it decides what
//! appears and when, and nothing else.
//!
//! Followers name their leader by index into the same list, so a formation
//! can be scripted before any handle exists.

use std::path::Path;

use hostile_core::{ArchetypeTable, SpawnEdge, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RuntimeError};

/// Formation slot of a scripted follower.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptedFollow {
    /// Index of the leader's entry in [`Scenario::spawns`].
    pub leader: usize,
    pub offset: Vec2,
}

/// One scheduled spawn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptedSpawn {
    /// Tick on which the entity appears.
    pub at: u64,
    pub archetype: String,
    pub position: Vec2,
    #[serde(default)]
    pub edge: SpawnEdge,
    #[serde(default)]
    pub follow: Option<ScriptedFollow>,
}

impl ScriptedSpawn {
    pub fn new(at: u64, archetype: impl Into<String>, position: Vec2) -> Self {
        Self {
            at,
            archetype: archetype.into(),
            position,
            edge: SpawnEdge::Top,
            follow: None,
        }
    }

    pub fn edge(mut self, edge: SpawnEdge) -> Self {
        self.edge = edge;
        self
    }

    pub fn follow(mut self, leader: usize, offset: Vec2) -> Self {
        self.follow = Some(ScriptedFollow { leader, offset });
        self
    }
}

/// Timed spawn list played by a [`Simulation`](crate::Simulation).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub spawns: Vec<ScriptedSpawn>,
}

impl Scenario {
    /// Creates a new scenario.
    pub fn new(name: impl Into<String>, spawns: Vec<ScriptedSpawn>) -> Self {
        Self {
            name: name.into(),
            spawns,
        }
    }

    /// Load scenario from a RON file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| RuntimeError::ScenarioRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&content)
    }

    pub fn from_ron(content: &str) -> Result<Self> {
        ron::from_str(content).map_err(RuntimeError::ScenarioParse)
    }

    /// Tick of the last scheduled spawn, or 0 for an empty scenario.
    pub fn last_tick(&self) -> u64 {
        self.spawns.iter().map(|s| s.at).max().unwrap_or(0)
    }

    /// Checks archetype ids and leader references.
    ///
    /// A leader must be listed earlier and must not appear later than its
    /// follower.
    pub fn validate(&self, archetypes: &ArchetypeTable) -> Result<()> {
        for (index, spawn) in self.spawns.iter().enumerate() {
            if !archetypes.contains(&spawn.archetype) {
                return Err(RuntimeError::InvalidScenario(format!(
                    "spawn {} uses unknown archetype '{}'",
                    index, spawn.archetype
                )));
            }
            if let Some(follow) = spawn.follow {
                let leader = self
                    .spawns
                    .get(follow.leader)
                    .filter(|_| follow.leader < index)
                    .ok_or_else(|| {
                        RuntimeError::InvalidScenario(format!(
                            "spawn {} follows {}, which is not an earlier entry",
                            index, follow.leader
                        ))
                    })?;
                if leader.at > spawn.at {
                    return Err(RuntimeError::InvalidScenario(format!(
                        "spawn {} appears before its leader {}",
                        index, follow.leader
                    )));
                }
            }
        }
        Ok(())
    }

    /// Spawn indices ordered by tick, list order breaking ties.
    pub(crate) fn schedule(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.spawns.len()).collect();
        order.sort_by_key(|&i| (self.spawns[i].at, i));
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostile_content::builtin_archetypes;

    const WAVE: &str = r#"(
        name: "opening",
        spawns: [
            (at: 30, archetype: "interceptor", position: (400.0, -40.0)),
            (at: 30, archetype: "interceptor", position: (360.0, -60.0),
                follow: Some((leader: 0, offset: (-40.0, -20.0)))),
            (at: 10, archetype: "wolf", position: (120.0, 560.0), edge: BottomLeft),
        ],
    )"#;

    #[test]
    fn parses_ron_with_defaults() {
        let scenario = Scenario::from_ron(WAVE).unwrap();
        assert_eq!(scenario.name, "opening");
        assert_eq!(scenario.spawns[0].edge, SpawnEdge::Top);
        assert_eq!(scenario.spawns[2].edge, SpawnEdge::BottomLeft);
        assert_eq!(scenario.spawns[1].follow.unwrap().offset, Vec2::new(-40.0, -20.0));
        assert_eq!(scenario.last_tick(), 30);
        scenario.validate(&builtin_archetypes().unwrap()).unwrap();
    }

    #[test]
    fn schedule_orders_by_tick_then_index() {
        let scenario = Scenario::from_ron(WAVE).unwrap();
        assert_eq!(scenario.schedule(), vec![2, 0, 1]);
    }

    #[test]
    fn rejects_forward_leader_reference() {
        let scenario = Scenario::new(
            "bad",
            vec![
                ScriptedSpawn::new(0, "interceptor", Vec2::ZERO).follow(1, Vec2::X),
                ScriptedSpawn::new(0, "interceptor", Vec2::ZERO),
            ],
        );
        let err = scenario.validate(&builtin_archetypes().unwrap()).unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidScenario(_)));
    }

    #[test]
    fn rejects_unknown_archetype() {
        let scenario = Scenario::new("bad", vec![ScriptedSpawn::new(0, "ghost", Vec2::ZERO)]);
        assert!(scenario.validate(&builtin_archetypes().unwrap()).is_err());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("wave.ron");
        std::fs::write(&path, WAVE).unwrap();
        assert_eq!(Scenario::load_from_file(&path).unwrap().spawns.len(), 3);

        let err = Scenario::load_from_file(&dir.path().join("missing.ron")).unwrap_err();
        assert!(matches!(err, RuntimeError::ScenarioRead { .. }));
    }
}
