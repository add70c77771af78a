use glam::Vec2;

use super::{EntityHandle, Tick};
use crate::boss::BossState;
use crate::combat::{DefenseStack, FireControl};
use crate::env::{BehaviorTag, BossProfile, ShipClass, WeaponProfile};
use crate::movement::PatternState;
use crate::tactical::TacticalRole;

/// Position, per-tick velocity and facing of one entity.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub position: Vec2,
    /// Pixels moved during the most recent tick.
    pub velocity: Vec2,
    /// Degrees, `[-180, 180]`.
    pub facing: f32,
}

impl Transform {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            // pointing down the screen
            facing: 90.0,
        }
    }
}

/// Archetype stats after difficulty scaling, fixed for the entity's lifetime.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityStats {
    pub class: ShipClass,
    pub speed: f32,
    pub damage: f32,
    pub score: u32,
    pub refugees: u32,
    pub behavior: BehaviorTag,
    pub weapon: WeaponProfile,
    pub non_combat: bool,
}

/// A live hostile entity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub handle: EntityHandle,
    pub archetype_id: String,
    pub stats: EntityStats,
    pub defense: DefenseStack,
    pub transform: Transform,
    pub pattern: PatternState,
    pub role: TacticalRole,
    pub fire: FireControl,
    pub boss: Option<BossState>,
    pub boss_profile: Option<BossProfile>,
    pub spawned_at: Tick,
    /// Set once the entity has been inside the visible playfield.
    pub entered: bool,
    /// Ticks since the last carrier drone launch.
    pub drone_timer: u32,
}

impl Entity {
    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    pub fn is_alive(&self) -> bool {
        self.defense.is_alive()
    }

    pub fn is_boss(&self) -> bool {
        self.boss.is_some()
    }

    pub fn health_fraction(&self) -> f32 {
        self.defense.health_fraction()
    }

    /// Scaled speed times any boss speed bonus.
    pub fn effective_speed(&self) -> f32 {
        let factor = self.boss.as_ref().map_or(1.0, |boss| boss.speed_factor);
        self.stats.speed * factor
    }

    /// Boss fire-rate factor, 1 for regular ships.
    pub fn fire_factor(&self) -> f32 {
        self.boss.as_ref().map_or(1.0, |boss| boss.fire_factor)
    }
}
