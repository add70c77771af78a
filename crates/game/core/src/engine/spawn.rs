use glam::Vec2;

use super::SimEngine;
use crate::boss::BossState;
use crate::combat::{DefenseStack, FireControl};
use crate::env::{Difficulty, RngSource};
use crate::movement::{self, Bounds, PatternId, PatternState};
use crate::state::{Entity, EntityHandle, EntityStats, SpawnError, Tick, Transform};
use crate::tactical::{FormationSlot, SpawnEdge, TacticalCoordinator, TacticalRole};

/// Request from the spawn director to create one entity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnRequest {
    pub archetype_id: String,
    pub position: Vec2,
    #[cfg_attr(feature = "serde", serde(default))]
    pub edge: SpawnEdge,
    #[cfg_attr(feature = "serde", serde(default))]
    pub difficulty: Difficulty,
    #[cfg_attr(feature = "serde", serde(default))]
    pub formation: Option<FormationSlot>,
}

impl SpawnRequest {
    pub fn new(archetype_id: impl Into<String>, position: Vec2) -> Self {
        Self {
            archetype_id: archetype_id.into(),
            position,
            edge: SpawnEdge::Top,
            difficulty: Difficulty::NORMAL,
            formation: None,
        }
    }

    pub fn edge(mut self, edge: SpawnEdge) -> Self {
        self.edge = edge;
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn follow(mut self, leader: EntityHandle, offset: Vec2) -> Self {
        self.formation = Some(FormationSlot { leader, offset });
        self
    }
}

impl SimEngine<'_> {
    /// Creates an entity from `request`.
    ///
    /// Health, damage and speed are scaled once here; the fire-rate
    /// multiplier is kept on the entity and applied to every shot.
    pub fn spawn(
        &mut self,
        request: &SpawnRequest,
        now: Tick,
        rng: &mut impl RngSource,
    ) -> Result<EntityHandle, SpawnError> {
        let archetype = self
            .archetypes
            .get(&request.archetype_id)
            .ok_or_else(|| SpawnError::UnknownArchetype(request.archetype_id.clone()))?;
        let role = TacticalCoordinator::assign(self.world, request.formation, request.edge)?;
        if self.world.len() >= self.world.capacity() {
            return Err(SpawnError::WorldFull {
                max: self.world.capacity(),
            });
        }

        let difficulty = request.difficulty.sanitized();
        let bounds = Bounds::from_config(self.config);
        let h = difficulty.health_mult;
        let defense = DefenseStack::new(archetype.shields * h, archetype.armor * h, archetype.hull * h);
        let stats = EntityStats {
            class: archetype.class,
            speed: archetype.speed * difficulty.speed_mult,
            damage: archetype.damage * difficulty.damage_mult,
            score: archetype.score,
            refugees: archetype.refugees,
            behavior: archetype.behavior,
            weapon: archetype.weapon,
            non_combat: archetype.is_non_combat(),
        };

        let mut transform = Transform::at(request.position);
        let pattern_id = match role {
            TacticalRole::Follower(_) => PatternId::Formation,
            _ => movement::select_pattern(archetype.behavior, request.edge, rng),
        };
        if role == TacticalRole::Flanker {
            transform.velocity =
                TacticalCoordinator::flank_velocity(transform.position, stats.speed, &bounds, rng);
        }
        let pattern = PatternState::init(pattern_id, &transform, stats.speed, &bounds, rng);
        let fire = FireControl::new(archetype.fire_interval, difficulty.fire_rate_mult, now);
        let boss = archetype.boss.as_ref().map(|_| BossState::new());
        let boss_profile = archetype.boss.clone();
        let archetype_id = request.archetype_id.clone();

        let handle = self.world.insert_with(|handle| Entity {
            handle,
            archetype_id,
            stats,
            defense,
            transform,
            pattern,
            role,
            fire,
            boss,
            boss_profile,
            spawned_at: now,
            entered: false,
            drone_timer: 0,
        })?;

        if let TacticalRole::Follower(link) = role {
            if let Some(leader) = link.leader {
                TacticalCoordinator::promote_leader(self.world, leader);
            }
        }
        Ok(handle)
    }
}
