//! Combat resolution: layered damage absorption and outgoing fire.
//!
//! # Core Functions
//!
//! - [`DefenseStack::apply_damage`]: shield → armor → hull cascade
//! - [`FireControl::can_fire`]: per-entity fire-rate gate
//! - [`weapon_volley`]: archetype gun layouts for regular fire
//!
//! The resolver never owns projectiles. It returns [`ProjectileDescriptor`]s
//! for the caller to instantiate.

mod defense;
mod fire;
mod projectile;

pub use defense::{DamageReport, DefenseStack, Hit};
pub use fire::{FireControl, weapon_volley};
pub use projectile::{ProjectileDescriptor, ProjectileStyle, aim_angle};
