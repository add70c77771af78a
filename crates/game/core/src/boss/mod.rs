//! Boss phase escalation, enrage and special-attack timing.
//!
//! Runs once per tick for boss entities, after movement. It reads the
//! entity's total-health fraction, advances the phase and enrage flags
//! (both monotonic within a lifetime), ticks the special-attack timer and
//! drains the summon queue. Output is a list of projectile descriptors
//! plus [`BossSignal`]s for the engine to forward as events.

mod attacks;

pub use attacks::{
    AttackContext, AttackFn, AttackId, AttackTiers, barrage, doomsday, geometry, laser_sweep,
    ring, spiral, spread, tier_for,
};

use glam::Vec2;

use crate::combat::ProjectileDescriptor;
use crate::config::SimConfig;
use crate::env::{BossProfile, PhaseBonus, RngSource};

/// Health fraction below which phase 1 begins.
pub const PHASE_ONE_THRESHOLD: f32 = 0.6;
/// Health fraction below which phase 2 begins.
pub const PHASE_TWO_THRESHOLD: f32 = 0.3;
/// Health fraction below which the boss enrages.
pub const ENRAGE_THRESHOLD: f32 = 0.2;

const ENRAGE_SPEED_FACTOR: f32 = 1.5;
const ENRAGE_FIRE_FACTOR: f32 = 0.5;
const SPIRAL_STEP_DEG: f32 = 3.0;
const SWEEP_STEP_RAD: f32 = 0.05;
const SUMMONS_PER_ATTACK: u32 = 2;
const DRONES_PER_STREAM: u32 = 3;

/// Phase implied by a total-health fraction (0, 1 or 2).
pub fn phase_for_fraction(fraction: f32) -> u8 {
    if fraction < PHASE_TWO_THRESHOLD {
        2
    } else if fraction < PHASE_ONE_THRESHOLD {
        1
    } else {
        0
    }
}

/// Discrete boss happenings consumed by audio, screen-shake and the spawner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BossSignal {
    PhaseChanged(u8),
    Enraged,
    AttackStarted(AttackId),
    SummonRequested,
    DroneSpawnRequested(Vec2),
}

/// Per-boss mutable state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossState {
    /// Monotonic, starts at 0.
    pub phase: u8,
    /// One-way.
    pub enraged: bool,
    /// Lockout after a special fires; blocks immediate re-triggering.
    pub special_cooldown: u32,
    pub attack_interval_timer: u32,
    pub queued_summons: u32,
    /// Entities already requested through summon and drone-stream attacks.
    pub summons_issued: u32,
    pub summon_timer: u32,
    pub spiral_phase: f32,
    pub sweep_time: f32,
    /// Product of phase and enrage fire-rate bonuses applied to the cooldown.
    pub fire_factor: f32,
    /// Product of phase and enrage speed bonuses.
    pub speed_factor: f32,
    pub last_attack: Option<AttackId>,
}

impl Default for BossState {
    fn default() -> Self {
        Self::new()
    }
}

impl BossState {
    pub fn new() -> Self {
        Self {
            phase: 0,
            enraged: false,
            special_cooldown: 0,
            attack_interval_timer: 0,
            queued_summons: 0,
            summons_issued: 0,
            summon_timer: 0,
            spiral_phase: 0.0,
            sweep_time: 0.0,
            fire_factor: 1.0,
            speed_factor: 1.0,
            last_attack: None,
        }
    }

    /// Advances phase and enrage from the current health fraction.
    ///
    /// Each threshold fires once; a hit that skips a phase emits both
    /// phase changes in order.
    pub fn check_phase(
        &mut self,
        fraction: f32,
        profile: &BossProfile,
        origin: Vec2,
        config: &SimConfig,
        signals: &mut Vec<BossSignal>,
    ) {
        let target = phase_for_fraction(fraction);
        while self.phase < target {
            self.phase += 1;
            match profile.phase_bonus {
                PhaseBonus::FireRate(factor) => self.fire_factor *= factor,
                PhaseBonus::Speed(factor) => self.speed_factor *= factor,
            }
            signals.push(BossSignal::PhaseChanged(self.phase));
        }

        if !self.enraged && fraction < ENRAGE_THRESHOLD {
            self.enraged = true;
            self.speed_factor *= ENRAGE_SPEED_FACTOR;
            self.fire_factor *= ENRAGE_FIRE_FACTOR;
            signals.push(BossSignal::Enraged);
            // forced burst, outside the summon cap
            let burst = config.enrage_drone_burst;
            for i in 0..burst {
                let angle = i as f32 / burst.max(1) as f32 * core::f32::consts::TAU;
                signals.push(BossSignal::DroneSpawnRequested(
                    origin + Vec2::from_angle(angle) * 60.0,
                ));
            }
        }
    }

    /// Ticks timers, fires a special attack when due and drains queued summons.
    pub fn update_attacks(
        &mut self,
        ctx: AttackContext,
        profile: &BossProfile,
        config: &SimConfig,
        rng: &mut impl RngSource,
        projectiles: &mut Vec<ProjectileDescriptor>,
        signals: &mut Vec<BossSignal>,
    ) {
        self.spiral_phase = (self.spiral_phase + SPIRAL_STEP_DEG) % 360.0;
        self.sweep_time += SWEEP_STEP_RAD;
        self.attack_interval_timer = self.attack_interval_timer.saturating_add(1);
        self.special_cooldown = self.special_cooldown.saturating_sub(1);

        if self.special_cooldown == 0 && self.attack_interval_timer >= config.special_interval(self.phase) {
            self.attack_interval_timer = 0;
            self.special_cooldown = SimConfig::SPECIAL_LOCKOUT;

            let tiers = profile.tiers();
            let candidates = tiers.tier(tier_for(self.phase, self.enraged));
            let attack = candidates[rng.index(candidates.len())];
            self.last_attack = Some(attack);
            signals.push(BossSignal::AttackStarted(attack));

            let ctx = AttackContext {
                spiral_phase: self.spiral_phase,
                sweep_time: self.sweep_time,
                phase: self.phase,
                ..ctx
            };
            self.execute(attack, &ctx, profile, projectiles, signals);
        }

        self.drain_summons(config, signals);
    }

    fn execute(
        &mut self,
        attack: AttackId,
        ctx: &AttackContext,
        profile: &BossProfile,
        projectiles: &mut Vec<ProjectileDescriptor>,
        signals: &mut Vec<BossSignal>,
    ) {
        match attack {
            AttackId::Summon => {
                let granted = self.summon_room(profile).min(SUMMONS_PER_ATTACK);
                self.queued_summons += granted;
            }
            AttackId::DroneStream => {
                let granted = self.summon_room(profile).min(DRONES_PER_STREAM);
                for i in 0..granted {
                    let offset = Vec2::new((i as f32 - 1.0) * 40.0, 30.0);
                    signals.push(BossSignal::DroneSpawnRequested(ctx.origin + offset));
                }
                self.summons_issued += granted;
            }
            _ => {
                if let Some(pattern) = geometry(attack) {
                    projectiles.extend(pattern(ctx));
                }
            }
        }
    }

    fn summon_room(&self, profile: &BossProfile) -> u32 {
        profile
            .max_summons
            .saturating_sub(self.summons_issued + self.queued_summons)
    }

    fn drain_summons(&mut self, config: &SimConfig, signals: &mut Vec<BossSignal>) {
        if self.queued_summons == 0 {
            self.summon_timer = 0;
            return;
        }
        self.summon_timer += 1;
        if self.summon_timer >= config.summon_spacing {
            self.summon_timer = 0;
            self.queued_summons -= 1;
            self.summons_issued += 1;
            signals.push(BossSignal::SummonRequested);
        }
    }
}
