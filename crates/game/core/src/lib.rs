//! Deterministic hostile-entity AI and combat rules.
//!
//! `hostile-core` defines what a spawned enemy does once it exists: how it
//! moves, when it fires, how incoming damage is absorbed and how bosses
//! escalate. All mutation flows through [`engine::SimEngine`]; randomness is
//! threaded in through a seeded [`env::RngSource`], so a session replays
//! exactly from its seed. Rendering, collision detection and spawn policy
//! live outside this crate.
pub mod boss;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod movement;
pub mod state;
pub mod tactical;

pub use boss::{AttackId, BossSignal, BossState};
pub use combat::{DamageReport, DefenseStack, Hit, ProjectileDescriptor, ProjectileStyle};
pub use config::SimConfig;
pub use engine::{HitOutcome, SimEngine, SimEvent, SpawnRequest, TickInput, TickOutput};
pub use env::{
    Archetype, ArchetypeError, ArchetypeTable, BehaviorTag, BossProfile, Difficulty, PcgRng,
    PhaseBonus, RngSource, ShipClass, WeaponProfile,
};
pub use error::{ErrorSeverity, GameError};
pub use movement::{Bounds, PatternId, PatternState};
pub use state::{Entity, EntityHandle, SpawnError, Tick, Transform, World};
pub use tactical::{FormationSlot, SpawnEdge, TacticalCoordinator, TacticalRole};

pub use glam::Vec2;
