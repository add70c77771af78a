//! Long-lived capital-ship patterns. These never leave the playfield on
//! their own; they cycle through stages and are clamped to the screen.

use glam::Vec2;

use super::Bounds;
use crate::boss::phase_for_fraction;
use crate::env::RngSource;
use crate::state::Transform;

/// Top of the band capital ships may occupy, as a fraction of height.
const CAPITAL_MAX_Y: f32 = 0.7;

fn seek(t: &Transform, target: Vec2, gain: f32, max_speed: f32) -> Vec2 {
    ((target - t.position) * gain).clamp_length_max(max_speed)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CruiserStage {
    Entering,
    Positioning,
    Engaging,
}

/// Enter, orbit a point that shadows the player from one side, and
/// occasionally push in for an engagement before switching sides.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cruiser {
    pub stage: CruiserStage,
    pub center: Vec2,
    pub orbit_angle: f32,
    pub orbit_radius: f32,
    pub side: f32,
    pub aggression: f32,
    pub timer: u32,
    pub engage_left: u32,
}

impl Cruiser {
    const MIN_POSITIONING_TICKS: u32 = 180;
    const ENGAGE_CHANCE: f32 = 0.02;
    const STANDOFF: f32 = 220.0;

    pub fn new(rng: &mut impl RngSource) -> Self {
        Self {
            stage: CruiserStage::Entering,
            center: Vec2::ZERO,
            orbit_angle: 0.0,
            orbit_radius: rng.range_f32(30.0, 60.0),
            side: rng.sign(),
            aggression: rng.range_f32(0.2, 1.0),
            timer: 0,
            engage_left: 0,
        }
    }

    pub fn steer(&mut self, t: &mut Transform, speed: f32, player: Vec2, bounds: &Bounds, rng: &mut impl RngSource) {
        let entry_y = bounds.y_at(0.22);
        match self.stage {
            CruiserStage::Entering => {
                t.velocity = Vec2::new(0.0, speed);
                if t.position.y >= entry_y {
                    self.stage = CruiserStage::Positioning;
                    self.center = t.position;
                    self.timer = 0;
                }
            }
            CruiserStage::Positioning => {
                let desired = (player.x + self.side * bounds.x_at(0.25))
                    .clamp(bounds.x_at(0.15), bounds.x_at(0.85));
                self.center.x += (desired - self.center.x) * 0.01;
                self.center.y = entry_y;
                self.orbit_angle += 0.015;
                let target = self.center
                    + Vec2::new(self.orbit_angle.cos(), self.orbit_angle.sin() * 0.5) * self.orbit_radius;
                t.velocity = seek(t, target, 0.08, speed);
                self.timer += 1;
                if self.timer >= Self::MIN_POSITIONING_TICKS && rng.chance(self.aggression * Self::ENGAGE_CHANCE) {
                    self.stage = CruiserStage::Engaging;
                    self.engage_left = rng.range_u32(60, 120);
                }
            }
            CruiserStage::Engaging => {
                let to_player = player - t.position;
                t.velocity = if to_player.length() > Self::STANDOFF {
                    to_player.normalize_or(Vec2::Y) * speed * 1.3
                } else {
                    t.velocity * 0.9
                };
                self.engage_left = self.engage_left.saturating_sub(1);
                if self.engage_left == 0 {
                    self.stage = CruiserStage::Positioning;
                    self.side = -self.side;
                    self.timer = 0;
                }
            }
        }
    }

    pub fn settle(&mut self, t: &mut Transform, bounds: &Bounds) {
        if self.stage != CruiserStage::Entering {
            t.position = bounds.clamp(t.position, bounds.x_at(0.05), bounds.y_at(CAPITAL_MAX_Y));
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArtilleryStage {
    Positioning,
    Bombarding,
    Repositioning,
}

/// Move to a firing anchor, bombard while drifting, then relocate.
///
/// Escalates through three tiers as health drops: faster repositioning and
/// shorter bombardments. Weapons are live only while bombarding.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Artillery {
    pub stage: ArtilleryStage,
    pub anchor: Vec2,
    pub timer: u32,
    pub drift_phase: f32,
    /// 0..=2, monotonic.
    pub tier: u8,
}

impl Artillery {
    const BASE_BOMBARD_TICKS: u32 = 240;
    const BOMBARD_STEP: u32 = 60;

    pub fn new(bounds: &Bounds, rng: &mut impl RngSource) -> Self {
        Self {
            stage: ArtilleryStage::Positioning,
            anchor: Self::pick_anchor(bounds, rng),
            timer: 0,
            drift_phase: 0.0,
            tier: 0,
        }
    }

    fn pick_anchor(bounds: &Bounds, rng: &mut impl RngSource) -> Vec2 {
        Vec2::new(
            rng.range_f32(bounds.x_at(0.15), bounds.x_at(0.85)),
            rng.range_f32(bounds.y_at(0.08), bounds.y_at(0.25)),
        )
    }

    pub fn bombard_ticks(tier: u8) -> u32 {
        Self::BASE_BOMBARD_TICKS - Self::BOMBARD_STEP * u32::from(tier.min(2))
    }

    pub fn weapons_free(&self) -> bool {
        self.stage == ArtilleryStage::Bombarding
    }

    pub fn steer(&mut self, t: &mut Transform, speed: f32, health_fraction: f32, bounds: &Bounds, rng: &mut impl RngSource) {
        self.tier = self.tier.max(phase_for_fraction(health_fraction));
        match self.stage {
            ArtilleryStage::Positioning | ArtilleryStage::Repositioning => {
                let travel = speed * (1.0 + 0.2 * f32::from(self.tier));
                t.velocity = seek(t, self.anchor, 1.0, travel);
                if t.position.distance(self.anchor) <= travel {
                    self.stage = ArtilleryStage::Bombarding;
                    self.timer = Self::bombard_ticks(self.tier);
                }
            }
            ArtilleryStage::Bombarding => {
                self.drift_phase += 0.03;
                t.velocity = Vec2::new(
                    self.drift_phase.sin() * speed * 0.25,
                    (self.drift_phase * 0.5).cos() * speed * 0.1,
                );
                self.timer = self.timer.saturating_sub(1);
                if self.timer == 0 {
                    self.stage = ArtilleryStage::Repositioning;
                    self.anchor = Self::pick_anchor(bounds, rng);
                }
            }
        }
    }

    pub fn settle(&mut self, t: &mut Transform, bounds: &Bounds) {
        t.position = bounds.clamp(t.position, 0.0, bounds.y_at(CAPITAL_MAX_Y));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DestroyerStage {
    Approach,
    Strafe,
    Retreat,
    Reposition,
}

/// Drop to a firing row and strafe between per-entity lane bounds. Each
/// reversal counts as a burst; after a random number of bursts it backs
/// off, picks new bounds and a new row, and starts over.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Destroyer {
    pub stage: DestroyerStage,
    pub hold_y: f32,
    pub left: f32,
    pub right: f32,
    pub direction: f32,
    pub bursts: u32,
    pub burst_cap: u32,
    pub timer: u32,
}

impl Destroyer {
    const RETREAT_TICKS: u32 = 50;

    pub fn new(bounds: &Bounds, rng: &mut impl RngSource) -> Self {
        let mut destroyer = Self {
            stage: DestroyerStage::Approach,
            hold_y: 0.0,
            left: 0.0,
            right: bounds.width,
            direction: rng.sign(),
            bursts: 0,
            burst_cap: 0,
            timer: 0,
        };
        destroyer.reroll(bounds, rng);
        destroyer
    }

    fn reroll(&mut self, bounds: &Bounds, rng: &mut impl RngSource) {
        self.hold_y = rng.range_f32(bounds.y_at(0.12), bounds.y_at(0.35));
        self.left = rng.range_f32(bounds.x_at(0.05), bounds.x_at(0.3));
        self.right = rng.range_f32(bounds.x_at(0.7), bounds.x_at(0.95));
        self.burst_cap = rng.range_u32(3, 6);
        self.bursts = 0;
    }

    pub fn steer(&mut self, t: &mut Transform, speed: f32, bounds: &Bounds, rng: &mut impl RngSource) {
        match self.stage {
            DestroyerStage::Approach | DestroyerStage::Reposition => {
                let dy = self.hold_y - t.position.y;
                t.velocity = Vec2::new(0.0, dy.clamp(-speed, speed));
                if dy.abs() <= speed {
                    self.stage = DestroyerStage::Strafe;
                }
            }
            DestroyerStage::Strafe => {
                t.velocity = Vec2::new(self.direction * speed * 1.3, 0.0);
                let x = t.position.x;
                if (self.direction > 0.0 && x >= self.right) || (self.direction < 0.0 && x <= self.left) {
                    self.direction = -self.direction;
                    self.bursts += 1;
                    if self.bursts >= self.burst_cap {
                        self.stage = DestroyerStage::Retreat;
                        self.timer = Self::RETREAT_TICKS;
                    }
                }
            }
            DestroyerStage::Retreat => {
                t.velocity = Vec2::new(0.0, -speed);
                self.timer = self.timer.saturating_sub(1);
                if self.timer == 0 || t.position.y <= bounds.y_at(0.05) {
                    self.stage = DestroyerStage::Reposition;
                    self.reroll(bounds, rng);
                }
            }
        }
    }

    pub fn settle(&mut self, t: &mut Transform, bounds: &Bounds) {
        t.position = bounds.clamp(t.position, 0.0, bounds.y_at(0.6));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    fn bounds() -> Bounds {
        Bounds::new(800.0, 600.0, 64.0)
    }

    #[test]
    fn cruiser_switches_sides_after_engaging() {
        let b = bounds();
        let mut rng = PcgRng::new(8);
        let mut c = Cruiser::new(&mut rng);
        c.stage = CruiserStage::Engaging;
        c.side = 1.0;
        c.engage_left = 2;
        c.timer = 400;
        let mut t = Transform::at(Vec2::new(200.0, 130.0));
        let player = Vec2::new(400.0, 550.0);

        c.steer(&mut t, 1.2, player, &b, &mut rng);
        assert_eq!(c.stage, CruiserStage::Engaging);
        assert_eq!(c.side, 1.0);

        c.steer(&mut t, 1.2, player, &b, &mut rng);
        assert_eq!(c.stage, CruiserStage::Positioning);
        assert_eq!(c.side, -1.0);
        assert_eq!(c.timer, 0);
    }

    #[test]
    fn destroyer_bounds_are_per_entity_and_ordered() {
        let b = bounds();
        let mut rng = PcgRng::new(8);
        let first = Destroyer::new(&b, &mut rng);
        let second = Destroyer::new(&b, &mut rng);
        for d in [first, second] {
            assert!(d.left >= 40.0 && d.left <= 240.0);
            assert!(d.right >= 560.0 && d.right <= 760.0);
            assert!((3..=6).contains(&d.burst_cap));
        }
        assert_ne!(first.left, second.left);
    }

    #[test]
    fn destroyer_retreats_after_burst_cap() {
        let b = bounds();
        let mut rng = PcgRng::new(8);
        let mut d = Destroyer::new(&b, &mut rng);
        let mut t = Transform::at(Vec2::new(400.0, -20.0));
        let cap = d.burst_cap;
        let mut retreated = false;
        for _ in 0..5_000 {
            d.steer(&mut t, 3.0, &b, &mut rng);
            t.position += t.velocity;
            d.settle(&mut t, &b);
            if d.stage == DestroyerStage::Retreat {
                retreated = true;
                assert_eq!(d.bursts, cap);
                break;
            }
        }
        assert!(retreated);
    }

    #[test]
    fn artillery_fires_only_while_bombarding() {
        let b = bounds();
        let mut rng = PcgRng::new(8);
        let mut a = Artillery::new(&b, &mut rng);
        let mut t = Transform::at(Vec2::new(400.0, -20.0));
        assert!(!a.weapons_free());
        let mut seen_bombard = false;
        for _ in 0..2_000 {
            a.steer(&mut t, 1.5, 1.0, &b, &mut rng);
            t.position += t.velocity;
            a.settle(&mut t, &b);
            assert_eq!(a.weapons_free(), a.stage == ArtilleryStage::Bombarding);
            seen_bombard |= a.weapons_free();
        }
        assert!(seen_bombard);
    }

    #[test]
    fn artillery_tier_escalates_and_never_drops() {
        let b = bounds();
        let mut rng = PcgRng::new(8);
        let mut a = Artillery::new(&b, &mut rng);
        let mut t = Transform::at(Vec2::new(400.0, 100.0));
        a.steer(&mut t, 1.5, 0.25, &b, &mut rng);
        assert_eq!(a.tier, 2);
        a.steer(&mut t, 1.5, 1.0, &b, &mut rng);
        assert_eq!(a.tier, 2);
        assert_eq!(Artillery::bombard_ticks(2), 120);
    }

    #[test]
    fn cruiser_stays_on_screen_and_eventually_engages() {
        let b = bounds();
        let mut rng = PcgRng::new(8);
        let mut c = Cruiser::new(&mut rng);
        c.aggression = 1.0;
        let mut t = Transform::at(Vec2::new(400.0, -30.0));
        let mut engaged = false;
        for _ in 0..3_000 {
            c.steer(&mut t, 1.5, Vec2::new(400.0, 550.0), &b, &mut rng);
            t.position += t.velocity;
            c.settle(&mut t, &b);
            engaged |= c.stage == CruiserStage::Engaging;
            if c.stage != CruiserStage::Entering {
                assert!(t.position.y <= 420.0 + 1e-3);
            }
        }
        assert!(engaged);
    }
}
