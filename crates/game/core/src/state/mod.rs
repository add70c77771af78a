//! Authoritative entity state.
//!
//! [`World`] owns every live [`Entity`]. Other modules refer to entities by
//! [`EntityHandle`] only and resolve the handle each time they need it, so a
//! destroyed ship can never be reached through a stale reference.
mod entity;
mod error;
mod handle;
mod world;

pub use entity::{Entity, EntityStats, Transform};
pub use error::SpawnError;
pub use handle::{EntityHandle, Tick};
pub use world::{PositionSnapshot, World};
