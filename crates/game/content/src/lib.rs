//! Ship content: the built-in archetype catalog and RON/TOML loaders.
//!
//! - Archetype tables (data-driven via RON)
//! - Difficulty presets (data-driven via TOML)
//! - Simulation config (data-driven via TOML)
//!
//! Content is read once at startup and handed to the simulation as
//! immutable tables; it never appears in entity state.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{builtin_archetypes, ids};

#[cfg(feature = "loaders")]
pub use loaders::{
    ArchetypeLoader, ConfigLoader, ContentFactory, DifficultyLoader, DifficultyPresets,
};
