//! Static inputs to the simulation: archetype stats, difficulty, randomness.
//!
//! Nothing in this module changes during a run. The archetype table and the
//! difficulty bundle are read at spawn; the RNG handle is advanced by the tick.

mod archetypes;
mod difficulty;
mod rng;

pub use archetypes::{
    Archetype, ArchetypeBuilder, ArchetypeError, ArchetypeTable, BehaviorTag, BossProfile,
    PhaseBonus, ShipClass, WeaponProfile,
};
pub use difficulty::Difficulty;
pub use rng::{PcgRng, RngSource};
