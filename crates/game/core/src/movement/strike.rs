//! Patterns that commit to the player: dives, crossings and swarming.

use glam::Vec2;

use super::Bounds;
use crate::env::RngSource;
use crate::state::Transform;
use crate::tactical::TacticalCoordinator;

fn toward(from: Vec2, to: Vec2, fallback: Vec2) -> Vec2 {
    (to - from).normalize_or(fallback)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwoopStage {
    Enter,
    Dive,
}

/// Enter to a set depth, then dive at the player's column with growing speed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swoop {
    pub stage: SwoopStage,
    pub dive_y: f32,
    pub boost: f32,
}

impl Swoop {
    pub fn new(bounds: &Bounds, rng: &mut impl RngSource) -> Self {
        Self {
            stage: SwoopStage::Enter,
            dive_y: rng.range_f32(bounds.y_at(0.15), bounds.y_at(0.35)),
            boost: 0.0,
        }
    }

    pub fn steer(&mut self, t: &mut Transform, speed: f32, player: Vec2) {
        match self.stage {
            SwoopStage::Enter => {
                t.velocity = Vec2::new(0.0, speed);
                if t.position.y >= self.dive_y {
                    self.stage = SwoopStage::Dive;
                }
            }
            SwoopStage::Dive => {
                self.boost = (self.boost + 0.04).min(2.0);
                let limit = speed * 1.5;
                let vx = ((player.x - t.position.x) * 0.04).clamp(-limit, limit);
                t.velocity = Vec2::new(vx, speed * (1.0 + self.boost));
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlankStage {
    Descend,
    Cross,
}

/// Descend along a side lane, then cut across the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flank {
    pub stage: FlankStage,
    /// -1 for the left lane, 1 for the right lane.
    pub side: f32,
    pub cut_y: f32,
}

impl Flank {
    pub fn new(position: Vec2, bounds: &Bounds, rng: &mut impl RngSource) -> Self {
        Self {
            stage: FlankStage::Descend,
            side: if position.x < bounds.x_at(0.5) { -1.0 } else { 1.0 },
            cut_y: rng.range_f32(bounds.y_at(0.3), bounds.y_at(0.55)),
        }
    }

    pub fn steer(&mut self, t: &mut Transform, speed: f32, bounds: &Bounds) {
        match self.stage {
            FlankStage::Descend => {
                let lane = if self.side < 0.0 { bounds.x_at(0.12) } else { bounds.x_at(0.88) };
                t.velocity = Vec2::new((lane - t.position.x) * 0.05, speed);
                if t.position.y >= self.cut_y {
                    self.stage = FlankStage::Cross;
                }
            }
            FlankStage::Cross => {
                t.velocity = Vec2::new(-self.side * speed * 1.6, speed * 0.25);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlybyStage {
    Approach,
    Cross,
}

/// Drop to a cruise row and cross horizontally at high speed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flyby {
    pub stage: FlybyStage,
    pub direction: f32,
    pub cruise_y: f32,
}

impl Flyby {
    pub fn new(bounds: &Bounds, rng: &mut impl RngSource) -> Self {
        Self {
            stage: FlybyStage::Approach,
            direction: rng.sign(),
            cruise_y: rng.range_f32(bounds.y_at(0.2), bounds.y_at(0.5)),
        }
    }

    pub fn steer(&mut self, t: &mut Transform, speed: f32) {
        match self.stage {
            FlybyStage::Approach => {
                t.velocity = Vec2::new(0.0, speed * 1.2);
                if t.position.y >= self.cruise_y {
                    self.stage = FlybyStage::Cross;
                }
            }
            FlybyStage::Cross => {
                t.velocity = Vec2::new(self.direction * speed * 2.5, 0.0);
            }
        }
    }

    /// Re-enters from above once the crossing leaves the screen, keeping direction.
    pub fn settle(&mut self, t: &mut Transform, bounds: &Bounds, rng: &mut impl RngSource) {
        if self.stage == FlybyStage::Cross && bounds.is_outside(t.position) {
            t.position = Vec2::new(
                rng.range_f32(bounds.x_at(0.2), bounds.x_at(0.8)),
                -bounds.margin * 0.5,
            );
            self.stage = FlybyStage::Approach;
            self.cruise_y = rng.range_f32(bounds.y_at(0.2), bounds.y_at(0.5));
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackRunStage {
    Approach,
    Dive,
}

/// Approach to a depth, lock the player's position and dive straight at it.
/// Each cycle re-enters from above and captures a fresh target.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackRun {
    pub stage: AttackRunStage,
    pub dive_y: f32,
    pub dive: Vec2,
}

impl AttackRun {
    pub fn new(bounds: &Bounds, rng: &mut impl RngSource) -> Self {
        Self {
            stage: AttackRunStage::Approach,
            dive_y: rng.range_f32(bounds.y_at(0.12), bounds.y_at(0.3)),
            dive: Vec2::Y,
        }
    }

    pub fn steer(&mut self, t: &mut Transform, speed: f32, player: Vec2) {
        if self.stage == AttackRunStage::Approach {
            t.velocity = Vec2::new(0.0, speed);
            if t.position.y >= self.dive_y {
                // target captured once; the dive does not track
                self.dive = toward(t.position, player, Vec2::Y);
                self.stage = AttackRunStage::Dive;
            }
        }
        if self.stage == AttackRunStage::Dive {
            t.velocity = self.dive * speed * 2.2;
        }
    }

    pub fn settle(&mut self, t: &mut Transform, bounds: &Bounds, rng: &mut impl RngSource) {
        if self.stage == AttackRunStage::Dive && bounds.is_outside(t.position) {
            t.position = bounds.respawn_above(rng);
            *self = Self::new(bounds, rng);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwarmStage {
    Converge,
    Disperse,
}

/// Close on the player with jitter, break away, repeat.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swarm {
    pub stage: SwarmStage,
    pub timer: u32,
    pub jitter: Vec2,
}

impl Swarm {
    const CLOSE_RANGE: f32 = 90.0;
    const DISPERSE_TICKS: u32 = 40;
    const JITTER_REFRESH: u32 = 10;

    pub fn new() -> Self {
        Self {
            stage: SwarmStage::Converge,
            timer: 0,
            jitter: Vec2::ZERO,
        }
    }

    pub fn steer(&mut self, t: &mut Transform, speed: f32, player: Vec2, rng: &mut impl RngSource) {
        self.timer += 1;
        match self.stage {
            SwarmStage::Converge => {
                if self.timer % Self::JITTER_REFRESH == 0 {
                    let spread = speed * 0.6;
                    self.jitter = Vec2::new(rng.range_f32(-spread, spread), rng.range_f32(-spread, spread));
                }
                let desired = toward(t.position, player, Vec2::Y) * speed * 1.1 + self.jitter;
                t.velocity = t.velocity.lerp(desired, 0.1);
                if t.position.distance(player) < Self::CLOSE_RANGE {
                    self.stage = SwarmStage::Disperse;
                    self.timer = 0;
                }
            }
            SwarmStage::Disperse => {
                let desired = toward(player, t.position, Vec2::NEG_Y) * speed * 1.3;
                t.velocity = t.velocity.lerp(desired, 0.15);
                if self.timer >= Self::DISPERSE_TICKS {
                    self.stage = SwarmStage::Converge;
                    self.timer = 0;
                }
            }
        }
    }

    pub fn settle(&mut self, t: &mut Transform, speed: f32, bounds: &Bounds, rng: &mut impl RngSource) {
        if bounds.is_outside(t.position) {
            t.position = bounds.respawn_above(rng);
            t.velocity = Vec2::new(0.0, speed);
            *self = Self::new();
        }
    }
}

impl Default for Swarm {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlankingStage {
    Enter,
    Sweep,
    Exit,
}

/// Rise from below, sweep toward the player, peel off and come back around.
///
/// The entry velocity is set by the tactical coordinator at spawn.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flanking {
    pub stage: FlankingStage,
    pub timer: u32,
}

impl Flanking {
    const ENTER_TICKS: u32 = 45;
    const SWEEP_TICKS: u32 = 120;

    pub fn new() -> Self {
        Self {
            stage: FlankingStage::Enter,
            timer: 0,
        }
    }

    pub fn steer(&mut self, t: &mut Transform, speed: f32, player: Vec2) {
        self.timer += 1;
        match self.stage {
            FlankingStage::Enter => {
                if self.timer >= Self::ENTER_TICKS {
                    self.stage = FlankingStage::Sweep;
                    self.timer = 0;
                }
            }
            FlankingStage::Sweep => {
                let desired = toward(t.position, player, Vec2::NEG_Y) * speed * 1.2;
                t.velocity = t.velocity.lerp(desired, 0.05);
                if self.timer >= Self::SWEEP_TICKS {
                    self.stage = FlankingStage::Exit;
                    self.timer = 0;
                }
            }
            FlankingStage::Exit => {
                let side = if t.velocity.x < 0.0 { -1.0 } else { 1.0 };
                let desired = Vec2::new(side * 0.3, -1.0).normalize_or(Vec2::NEG_Y) * speed * 1.5;
                t.velocity = t.velocity.lerp(desired, 0.08);
            }
        }
    }

    /// Once gone, re-enters from a random bottom corner.
    pub fn settle(&mut self, t: &mut Transform, speed: f32, bounds: &Bounds, rng: &mut impl RngSource) {
        if self.stage == FlankingStage::Exit && bounds.is_outside(t.position) {
            let x = if rng.chance(0.5) { bounds.x_at(0.08) } else { bounds.x_at(0.92) };
            t.position = Vec2::new(x, bounds.height + bounds.margin * 0.5);
            t.velocity = TacticalCoordinator::flank_velocity(t.position, speed, bounds, rng);
            *self = Self::new();
        }
    }
}

impl Default for Flanking {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    fn bounds() -> Bounds {
        Bounds::new(800.0, 600.0, 64.0)
    }

    fn integrate(t: &mut Transform) {
        t.position += t.velocity;
    }

    #[test]
    fn swoop_dives_toward_player_column() {
        let mut rng = PcgRng::new(5);
        let mut swoop = Swoop::new(&bounds(), &mut rng);
        let mut t = Transform::at(Vec2::new(200.0, -20.0));
        let player = Vec2::new(600.0, 550.0);
        for _ in 0..200 {
            swoop.steer(&mut t, 2.0, player);
            integrate(&mut t);
        }
        assert_eq!(swoop.stage, SwoopStage::Dive);
        assert!(t.position.x > 200.0);
    }

    #[test]
    fn flyby_reenters_with_same_direction() {
        let b = bounds();
        let mut rng = PcgRng::new(5);
        let mut flyby = Flyby::new(&b, &mut rng);
        let direction = flyby.direction;
        let mut t = Transform::at(Vec2::new(400.0, -20.0));
        let mut reentered = false;
        for _ in 0..2_000 {
            flyby.steer(&mut t, 2.0);
            integrate(&mut t);
            let before = flyby.stage;
            flyby.settle(&mut t, &b, &mut rng);
            if before == FlybyStage::Cross && flyby.stage == FlybyStage::Approach {
                reentered = true;
                assert!(t.position.y < 0.0);
                break;
            }
        }
        assert!(reentered);
        assert_eq!(flyby.direction, direction);
    }

    #[test]
    fn attack_run_dive_is_locked_at_capture() {
        let b = bounds();
        let mut rng = PcgRng::new(5);
        let mut run = AttackRun::new(&b, &mut rng);
        let mut t = Transform::at(Vec2::new(400.0, -20.0));
        let mut player = Vec2::new(400.0, 550.0);
        while run.stage != AttackRunStage::Dive {
            run.steer(&mut t, 2.0, player);
            integrate(&mut t);
        }
        let locked = run.dive;
        player.x = 0.0;
        run.steer(&mut t, 2.0, player);
        assert_eq!(run.dive, locked);
        assert!(locked.y > 0.9);
    }

    #[test]
    fn swarm_alternates_converge_and_disperse() {
        let mut rng = PcgRng::new(5);
        let mut swarm = Swarm::new();
        let mut t = Transform::at(Vec2::new(400.0, 0.0));
        let player = Vec2::new(400.0, 400.0);
        let mut dispersed = false;
        for _ in 0..600 {
            swarm.steer(&mut t, 3.0, player, &mut rng);
            integrate(&mut t);
            if swarm.stage == SwarmStage::Disperse {
                dispersed = true;
            }
        }
        assert!(dispersed);
    }

    #[test]
    fn flanking_respawns_at_bottom_corner() {
        let b = bounds();
        let mut rng = PcgRng::new(5);
        let mut flanking = Flanking::new();
        let mut t = Transform::at(Vec2::new(50.0, 630.0));
        t.velocity = TacticalCoordinator::flank_velocity(t.position, 2.0, &b, &mut rng);
        let mut respawned = false;
        for _ in 0..3_000 {
            flanking.steer(&mut t, 2.0, Vec2::new(400.0, 550.0));
            integrate(&mut t);
            let before = flanking.stage;
            flanking.settle(&mut t, 2.0, &b, &mut rng);
            if before == FlankingStage::Exit && flanking.stage == FlankingStage::Enter {
                respawned = true;
                assert!(t.position.y > b.height);
                assert!(t.velocity.y < 0.0);
                break;
            }
        }
        assert!(respawned);
    }
}
