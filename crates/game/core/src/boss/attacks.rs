//! Boss attack catalog: tier table and projectile-geometry registry.
//!
//! Attack selection is declarative. Each boss archetype lists its signature
//! attacks; [`AttackTiers::from_signatures`] expands that list into the three
//! escalation tiers, and [`geometry`] maps an attack id to a pure function
//! producing projectile descriptors.

use arrayvec::ArrayVec;
use glam::Vec2;

use crate::combat::{ProjectileDescriptor, ProjectileStyle, aim_angle};

/// Catalog of boss special attacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttackId {
    /// ±60° fan in 15° steps around the to-player vector.
    Spread,
    /// 8 bullets on a continuously advancing phase angle.
    Spiral,
    /// `16 + 4 * phase` bullets evenly around 360°.
    Ring,
    /// 5 beams swinging ±45° sinusoidally.
    LaserSweep,
    /// 12 fast inner-ring bullets plus 20 slow outer-ring bullets.
    Doomsday,
    /// Three aimed bolts.
    Barrage,
    /// Queue reinforcements with the spawn director.
    Summon,
    /// Launch a stream of drones beside the boss.
    DroneStream,
}

impl AttackId {
    /// Whether this attack may appear in an archetype's signature list.
    pub const fn is_signature_candidate(self) -> bool {
        matches!(
            self,
            Self::Spiral | Self::LaserSweep | Self::Doomsday | Self::Barrage
        )
    }
}

/// Escalation tier of available boss attacks.
pub fn tier_for(phase: u8, enraged: bool) -> usize {
    if phase >= 2 || enraged {
        2
    } else if phase >= 1 {
        1
    } else {
        0
    }
}

/// Attack candidates per tier for one boss archetype.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackTiers {
    tiers: [ArrayVec<AttackId, { AttackTiers::MAX_PER_TIER }>; 3],
}

impl AttackTiers {
    pub const MAX_SIGNATURES: usize = 8;
    pub const MAX_PER_TIER: usize = Self::MAX_SIGNATURES + 3;

    /// Expands a signature list into tiers.
    ///
    /// - tier 0: first two signatures + spread
    /// - tier 1: all signatures + summon + drone stream
    /// - tier 2: tier 1 + ring
    pub fn from_signatures(signatures: &[AttackId]) -> Self {
        let signatures = &signatures[..signatures.len().min(Self::MAX_SIGNATURES)];

        let mut tier0 = ArrayVec::new();
        tier0.extend(signatures.iter().take(2).copied());
        tier0.push(AttackId::Spread);

        let mut tier1 = ArrayVec::new();
        tier1.extend(signatures.iter().copied());
        tier1.push(AttackId::Summon);
        tier1.push(AttackId::DroneStream);

        let mut tier2 = tier1.clone();
        tier2.push(AttackId::Ring);

        Self {
            tiers: [tier0, tier1, tier2],
        }
    }

    pub fn tier(&self, tier: usize) -> &[AttackId] {
        &self.tiers[tier.min(2)]
    }
}

/// Inputs to a projectile-geometry function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackContext {
    pub origin: Vec2,
    pub player: Vec2,
    pub phase: u8,
    pub damage: f32,
    /// Degrees; advanced every tick by the controller.
    pub spiral_phase: f32,
    /// Radians of sweep progress; advanced every tick by the controller.
    pub sweep_time: f32,
}

pub type AttackFn = fn(&AttackContext) -> Vec<ProjectileDescriptor>;

/// Looks up the geometry for a projectile-emitting attack.
///
/// Returns `None` for spawn signals ([`AttackId::Summon`], [`AttackId::DroneStream`]).
pub fn geometry(id: AttackId) -> Option<AttackFn> {
    match id {
        AttackId::Spread => Some(spread),
        AttackId::Spiral => Some(spiral),
        AttackId::Ring => Some(ring),
        AttackId::LaserSweep => Some(laser_sweep),
        AttackId::Doomsday => Some(doomsday),
        AttackId::Barrage => Some(barrage),
        AttackId::Summon | AttackId::DroneStream => None,
    }
}

pub fn spread(ctx: &AttackContext) -> Vec<ProjectileDescriptor> {
    let base = aim_angle(ctx.origin, ctx.player);
    (-4..=4)
        .map(|step| {
            ProjectileDescriptor::at_angle(
                ctx.origin,
                base + step as f32 * 15.0,
                4.0,
                ctx.damage,
                ProjectileStyle::Bolt,
            )
        })
        .collect()
}

pub fn spiral(ctx: &AttackContext) -> Vec<ProjectileDescriptor> {
    (0..8)
        .map(|i| {
            ProjectileDescriptor::at_angle(
                ctx.origin,
                ctx.spiral_phase + i as f32 * 45.0,
                3.5,
                ctx.damage,
                ProjectileStyle::Orb,
            )
        })
        .collect()
}

pub fn ring(ctx: &AttackContext) -> Vec<ProjectileDescriptor> {
    let count = 16 + 4 * u32::from(ctx.phase);
    let step = 360.0 / count as f32;
    (0..count)
        .map(|i| {
            ProjectileDescriptor::at_angle(
                ctx.origin,
                i as f32 * step,
                3.0,
                ctx.damage,
                ProjectileStyle::Orb,
            )
        })
        .collect()
}

pub fn laser_sweep(ctx: &AttackContext) -> Vec<ProjectileDescriptor> {
    // centered on straight down, swinging ±45°
    let center = 90.0 + 45.0 * ctx.sweep_time.sin();
    (-2..=2)
        .map(|i| {
            ProjectileDescriptor::at_angle(
                ctx.origin,
                center + i as f32 * 12.0,
                7.0,
                ctx.damage * 1.5,
                ProjectileStyle::Laser,
            )
        })
        .collect()
}

pub fn doomsday(ctx: &AttackContext) -> Vec<ProjectileDescriptor> {
    let inner = (0..12).map(|i| {
        ProjectileDescriptor::at_angle(
            ctx.origin,
            i as f32 * 30.0,
            6.0,
            ctx.damage * 1.25,
            ProjectileStyle::Plasma,
        )
    });
    // offset by half a step so the rings interleave
    let outer = (0..20).map(|i| {
        ProjectileDescriptor::at_angle(
            ctx.origin,
            i as f32 * 18.0 + 9.0,
            3.0,
            ctx.damage,
            ProjectileStyle::Orb,
        )
    });
    inner.chain(outer).collect()
}

pub fn barrage(ctx: &AttackContext) -> Vec<ProjectileDescriptor> {
    let base = aim_angle(ctx.origin, ctx.player);
    [-6.0, 0.0, 6.0]
        .into_iter()
        .map(|offset| {
            ProjectileDescriptor::at_angle(
                ctx.origin,
                base + offset,
                5.5,
                ctx.damage,
                ProjectileStyle::Bolt,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(phase: u8) -> AttackContext {
        AttackContext {
            origin: Vec2::new(400.0, 100.0),
            player: Vec2::new(400.0, 500.0),
            phase,
            damage: 10.0,
            spiral_phase: 0.0,
            sweep_time: 0.0,
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn tiers_expand_signatures() {
        let sigs = [AttackId::Spiral, AttackId::LaserSweep, AttackId::Doomsday];
        let tiers = AttackTiers::from_signatures(&sigs);
        assert_eq!(
            tiers.tier(0),
            &[AttackId::Spiral, AttackId::LaserSweep, AttackId::Spread]
        );
        assert_eq!(
            tiers.tier(1),
            &[
                AttackId::Spiral,
                AttackId::LaserSweep,
                AttackId::Doomsday,
                AttackId::Summon,
                AttackId::DroneStream
            ]
        );
        assert_eq!(tiers.tier(2).last(), Some(&AttackId::Ring));
        assert_eq!(tiers.tier(2).len(), 6);
    }

    #[test]
    fn enrage_unlocks_top_tier_at_phase_zero() {
        assert_eq!(tier_for(0, false), 0);
        assert_eq!(tier_for(1, false), 1);
        assert_eq!(tier_for(0, true), 2);
        assert_eq!(tier_for(2, false), 2);
    }

    #[test]
    fn spread_fans_around_player_vector() {
        let shots = spread(&ctx(0));
        assert_eq!(shots.len(), 9);
        assert!(approx(shots[0].angle_deg(), 30.0));
        assert!(approx(shots[4].angle_deg(), 90.0));
        assert!(approx(shots[8].angle_deg(), 150.0));
    }

    #[test]
    fn ring_grows_with_phase() {
        assert_eq!(ring(&ctx(0)).len(), 16);
        assert_eq!(ring(&ctx(2)).len(), 24);
    }

    #[test]
    fn spiral_follows_phase_angle() {
        let mut c = ctx(0);
        c.spiral_phase = 10.0;
        let shots = spiral(&c);
        assert_eq!(shots.len(), 8);
        assert!(approx(shots[0].angle_deg(), 10.0));
        assert!(approx(shots[1].angle_deg(), 55.0));
    }

    #[test]
    fn laser_sweep_stays_within_swing() {
        let mut c = ctx(1);
        for step in 0..64 {
            c.sweep_time = step as f32 * 0.2;
            let beams = laser_sweep(&c);
            assert_eq!(beams.len(), 5);
            let center = beams[2].angle_deg();
            assert!(center >= 45.0 - 1e-3 && center <= 135.0 + 1e-3);
        }
    }

    #[test]
    fn doomsday_has_two_speed_rings() {
        let shots = doomsday(&ctx(2));
        assert_eq!(shots.len(), 32);
        let fast = shots.iter().filter(|s| approx(s.velocity().length(), 6.0)).count();
        let slow = shots.iter().filter(|s| approx(s.velocity().length(), 3.0)).count();
        assert_eq!((fast, slow), (12, 20));
    }

    #[test]
    fn spawn_signals_have_no_geometry() {
        assert!(geometry(AttackId::Summon).is_none());
        assert!(geometry(AttackId::DroneStream).is_none());
        assert!(geometry(AttackId::Ring).is_some());
    }
}
