//! Fire-rate gating and regular weapon volleys.

use glam::Vec2;

use super::projectile::{ProjectileDescriptor, ProjectileStyle, aim_angle};
use crate::env::{RngSource, WeaponProfile};
use crate::state::Tick;

/// Fire-rate state for one entity.
///
/// The cooldown is `fire_interval * fire_rate_mult * boss_factor` ticks and
/// the gate is strict: a volley is allowed only when more than one full
/// cooldown has elapsed since the previous one. `last_shot` starts at the
/// spawn tick, so nothing fires on its first frame and no shots are banked.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FireControl {
    pub fire_interval: u32,
    pub fire_rate_mult: f32,
    pub last_shot: Tick,
    /// Volleys fired so far; drives alternating gun layouts.
    pub volleys: u32,
}

impl FireControl {
    pub fn new(fire_interval: u32, fire_rate_mult: f32, spawned_at: Tick) -> Self {
        Self {
            fire_interval,
            fire_rate_mult,
            last_shot: spawned_at,
            volleys: 0,
        }
    }

    /// Effective cooldown in ticks.
    pub fn cooldown(&self, boss_factor: f32) -> f32 {
        (self.fire_interval as f32 * self.fire_rate_mult * boss_factor).max(0.0)
    }

    pub fn can_fire(&self, now: Tick, boss_factor: f32) -> bool {
        let elapsed = now.since(self.last_shot);
        elapsed as f32 > self.cooldown(boss_factor)
    }

    /// Records a volley at `now` and returns its index.
    pub fn record(&mut self, now: Tick) -> u32 {
        self.last_shot = now;
        let index = self.volleys;
        self.volleys = self.volleys.wrapping_add(1);
        index
    }
}

/// Builds the projectiles of one regular volley.
///
/// Every projectile is aimed along the unit vector toward `target` plus a
/// small per-profile random inaccuracy.
pub fn weapon_volley(
    weapon: WeaponProfile,
    origin: Vec2,
    target: Vec2,
    damage: f32,
    volley: u32,
    rng: &mut impl RngSource,
) -> Vec<ProjectileDescriptor> {
    let base = aim_angle(origin, target);
    let mut jitter = |spread: f32| rng.range_f32(-spread, spread);

    match weapon {
        WeaponProfile::None => Vec::new(),
        WeaponProfile::Pulse => vec![ProjectileDescriptor::at_angle(
            origin,
            base + jitter(4.0),
            5.0,
            damage,
            ProjectileStyle::Bolt,
        )],
        WeaponProfile::TripleBeam => {
            // alternate port/starboard emitters
            let side = if volley % 2 == 0 { -1.0 } else { 1.0 };
            let muzzle = origin + Vec2::new(side * 14.0, 0.0);
            [-8.0, 0.0, 8.0]
                .into_iter()
                .map(|offset| {
                    ProjectileDescriptor::at_angle(
                        muzzle,
                        base + offset + jitter(2.0),
                        6.0,
                        damage,
                        ProjectileStyle::Beam,
                    )
                })
                .collect()
        }
        WeaponProfile::DualHeavy => {
            let mut shots: Vec<_> = [-18.0, 18.0]
                .into_iter()
                .map(|dx| {
                    ProjectileDescriptor::at_angle(
                        origin + Vec2::new(dx, 0.0),
                        base + jitter(2.0),
                        5.5,
                        damage,
                        ProjectileStyle::HeavyBeam,
                    )
                })
                .collect();
            if volley % 4 == 3 {
                shots.push(ProjectileDescriptor::at_angle(
                    origin,
                    base,
                    4.5,
                    damage * 2.5,
                    ProjectileStyle::MegaBeam,
                ));
            }
            shots
        }
        WeaponProfile::HeavyPlasma => vec![ProjectileDescriptor::at_angle(
            origin,
            base + jitter(1.5),
            2.5,
            damage * 3.0,
            ProjectileStyle::Plasma,
        )],
        WeaponProfile::Scatter => [-15.0, 0.0, 15.0]
            .into_iter()
            .map(|offset| {
                ProjectileDescriptor::at_angle(
                    origin,
                    base + offset + jitter(3.0),
                    4.5,
                    damage,
                    ProjectileStyle::Bolt,
                )
            })
            .collect(),
    }
}
