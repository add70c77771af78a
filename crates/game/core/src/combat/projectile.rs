//! Projectile descriptors handed to the projectile owner.

use glam::Vec2;

/// Visual/behavioral family of a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ProjectileStyle {
    Bolt,
    Beam,
    HeavyBeam,
    MegaBeam,
    Plasma,
    Orb,
    Laser,
}

/// Everything the caller needs to instantiate one projectile.
///
/// The core never owns projectile entities; it only describes them.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectileDescriptor {
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub vx: f32,
    pub vy: f32,
    pub damage: f32,
    pub style: ProjectileStyle,
}

impl ProjectileDescriptor {
    /// Projectile leaving `origin` along `angle_deg` at `speed` pixels per tick.
    pub fn at_angle(origin: Vec2, angle_deg: f32, speed: f32, damage: f32, style: ProjectileStyle) -> Self {
        let velocity = Vec2::from_angle(angle_deg.to_radians()) * speed;
        Self {
            spawn_x: origin.x,
            spawn_y: origin.y,
            vx: velocity.x,
            vy: velocity.y,
            damage,
            style,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.vx, self.vy)
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.spawn_x, self.spawn_y)
    }

    /// Heading in degrees, `atan2(vy, vx)`.
    pub fn angle_deg(&self) -> f32 {
        self.vy.atan2(self.vx).to_degrees()
    }
}

/// Angle in degrees of the vector from `from` to `to`; straight down when they coincide.
pub fn aim_angle(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    if delta.length_squared() < f32::EPSILON {
        90.0
    } else {
        delta.y.atan2(delta.x).to_degrees()
    }
}
