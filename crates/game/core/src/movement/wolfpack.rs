//! Pack hunting: circle the player at a distance and take turns lunging in.

use core::f32::consts::TAU;

use glam::Vec2;

use super::Bounds;
use crate::env::RngSource;
use crate::state::Transform;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WolfpackStage {
    Approach,
    Orbit,
    Attack,
    Scatter,
    Regroup,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wolfpack {
    pub stage: WolfpackStage,
    pub orbit_angle: f32,
    pub orbit_radius: f32,
    pub orbit_direction: f32,
    /// `[0, 1]`; scales the per-tick chance of breaking orbit to attack.
    pub aggression: f32,
    /// Heading frozen when the attack starts, radians.
    pub attack_angle: f32,
    pub scatter_side: f32,
    pub timer: u32,
    /// Attacks started over the entity's lifetime.
    pub attacks: u32,
}

impl Wolfpack {
    const MIN_ORBIT_TICKS: u32 = 30;
    const ATTACK_CHANCE: f32 = 0.03;
    const ATTACK_TICKS: u32 = 40;
    const SCATTER_TICKS: u32 = 30;
    const ORBIT_STEP: f32 = 0.025;

    pub fn new(rng: &mut impl RngSource) -> Self {
        let aggression = rng.next_f32();
        Self::with_aggression(aggression, rng)
    }

    pub fn with_aggression(aggression: f32, rng: &mut impl RngSource) -> Self {
        Self {
            stage: WolfpackStage::Approach,
            orbit_angle: rng.range_f32(0.0, TAU),
            orbit_radius: rng.range_f32(140.0, 200.0),
            orbit_direction: rng.sign(),
            aggression: aggression.clamp(0.0, 1.0),
            attack_angle: 0.0,
            scatter_side: 1.0,
            timer: 0,
            attacks: 0,
        }
    }

    fn orbit_point(&self, player: Vec2) -> Vec2 {
        player + Vec2::from_angle(self.orbit_angle) * self.orbit_radius
    }

    fn bearing(from: Vec2, to: Vec2) -> f32 {
        let d = to - from;
        d.y.atan2(d.x)
    }

    pub fn steer(&mut self, t: &mut Transform, speed: f32, player: Vec2, rng: &mut impl RngSource) {
        self.timer += 1;
        match self.stage {
            WolfpackStage::Approach => {
                let target = self.orbit_point(player);
                t.velocity = ((target - t.position) * 0.1).clamp_length_max(speed * 1.2);
                if t.position.distance(player) <= self.orbit_radius + 30.0 {
                    self.stage = WolfpackStage::Orbit;
                    self.orbit_angle = Self::bearing(player, t.position);
                    self.timer = 0;
                }
            }
            WolfpackStage::Orbit => {
                self.orbit_angle += Self::ORBIT_STEP * self.orbit_direction;
                let target = self.orbit_point(player);
                t.velocity = ((target - t.position) * 0.15).clamp_length_max(speed * 1.5);
                if self.timer >= Self::MIN_ORBIT_TICKS && rng.chance(self.aggression * Self::ATTACK_CHANCE) {
                    self.stage = WolfpackStage::Attack;
                    self.attack_angle = Self::bearing(t.position, player);
                    self.attacks += 1;
                    self.timer = 0;
                }
            }
            WolfpackStage::Attack => {
                t.velocity = Vec2::from_angle(self.attack_angle) * speed * 2.5;
                if self.timer >= Self::ATTACK_TICKS {
                    self.stage = WolfpackStage::Scatter;
                    self.scatter_side = rng.sign();
                    self.timer = 0;
                }
            }
            WolfpackStage::Scatter => {
                let heading = self.attack_angle + self.scatter_side * core::f32::consts::FRAC_PI_2;
                t.velocity = Vec2::from_angle(heading) * speed * 1.8;
                if self.timer >= Self::SCATTER_TICKS {
                    self.stage = WolfpackStage::Regroup;
                    self.timer = 0;
                }
            }
            WolfpackStage::Regroup => {
                // restart the orbit from wherever the scatter left us
                self.orbit_angle = Self::bearing(player, t.position);
                t.velocity *= 0.5;
                self.stage = WolfpackStage::Approach;
                self.timer = 0;
            }
        }
    }

    pub fn settle(&mut self, t: &mut Transform, bounds: &Bounds) {
        t.position = bounds.clamp(t.position, 10.0, bounds.height - 10.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    fn run_attacks(aggression: f32, seed: u64) -> u32 {
        let b = Bounds::new(800.0, 600.0, 64.0);
        let mut rng = PcgRng::new(seed);
        let mut wolf = Wolfpack::with_aggression(aggression, &mut rng);
        let mut t = Transform::at(Vec2::new(400.0, 0.0));
        let player = Vec2::new(400.0, 500.0);
        for _ in 0..3_600 {
            wolf.steer(&mut t, 2.5, player, &mut rng);
            t.position += t.velocity;
            wolf.settle(&mut t, &b);
        }
        wolf.attacks
    }

    #[test]
    fn higher_aggression_attacks_more_often() {
        let bold: u32 = (0..20).map(|seed| run_attacks(0.9, seed)).sum();
        let timid: u32 = (0..20).map(|seed| run_attacks(0.4, seed)).sum();
        assert!(bold > timid, "bold {bold} vs timid {timid}");
    }

    #[test]
    fn zero_aggression_never_attacks() {
        assert_eq!(run_attacks(0.0, 1), 0);
    }

    #[test]
    fn attack_heading_is_frozen() {
        let mut rng = PcgRng::new(2);
        let mut wolf = Wolfpack::with_aggression(1.0, &mut rng);
        wolf.stage = WolfpackStage::Attack;
        wolf.attack_angle = 1.0;
        let mut t = Transform::at(Vec2::new(100.0, 100.0));
        wolf.steer(&mut t, 2.0, Vec2::new(700.0, 500.0), &mut rng);
        let first = t.velocity;
        wolf.steer(&mut t, 2.0, Vec2::new(0.0, 0.0), &mut rng);
        assert_eq!(t.velocity, first);
    }
}
