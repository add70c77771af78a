use crate::boss::{AttackId, BossSignal};
use crate::combat::{DamageReport, ProjectileDescriptor};
use crate::state::EntityHandle;

/// Discrete happenings for audio, screen-shake, scoring and the spawner.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimEvent {
    PhaseChanged { entity: EntityHandle, phase: u8 },
    Enraged { entity: EntityHandle },
    AttackStarted { entity: EntityHandle, attack: AttackId },
    SummonRequested { entity: EntityHandle },
    DroneSpawnRequested { entity: EntityHandle, x: f32, y: f32 },
    Destroyed { entity: EntityHandle, score: u32, refugees: u32 },
    /// A non-combat ship left the playfield for good.
    Departed { entity: EntityHandle },
}

impl SimEvent {
    pub fn from_signal(entity: EntityHandle, signal: BossSignal) -> Self {
        match signal {
            BossSignal::PhaseChanged(phase) => Self::PhaseChanged { entity, phase },
            BossSignal::Enraged => Self::Enraged { entity },
            BossSignal::AttackStarted(attack) => Self::AttackStarted { entity, attack },
            BossSignal::SummonRequested => Self::SummonRequested { entity },
            BossSignal::DroneSpawnRequested(at) => Self::DroneSpawnRequested {
                entity,
                x: at.x,
                y: at.y,
            },
        }
    }

    pub fn entity(&self) -> EntityHandle {
        match *self {
            Self::PhaseChanged { entity, .. }
            | Self::Enraged { entity }
            | Self::AttackStarted { entity, .. }
            | Self::SummonRequested { entity }
            | Self::DroneSpawnRequested { entity, .. }
            | Self::Destroyed { entity, .. }
            | Self::Departed { entity } => entity,
        }
    }

    /// Stable snake_case name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PhaseChanged { .. } => "phase_changed",
            Self::Enraged { .. } => "enraged",
            Self::AttackStarted { .. } => "attack_started",
            Self::SummonRequested { .. } => "summon_requested",
            Self::DroneSpawnRequested { .. } => "drone_spawn_requested",
            Self::Destroyed { .. } => "destroyed",
            Self::Departed { .. } => "departed",
        }
    }
}

/// Everything one tick produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickOutput {
    pub projectiles: Vec<ProjectileDescriptor>,
    pub events: Vec<SimEvent>,
}

/// Result of applying one hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitOutcome {
    pub report: DamageReport,
    /// [`SimEvent::Destroyed`] when the hit killed the target.
    pub destroyed: Option<SimEvent>,
    /// Followers whose leader link was cleared by this kill.
    pub released_followers: usize,
}
