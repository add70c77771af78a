//! Simple periodic patterns. Each one layers a lateral motion over a
//! steady downward drift and leaves the screen through the wrap policy.

use core::f32::consts::TAU;

use glam::Vec2;

use super::Bounds;
use crate::env::RngSource;
use crate::state::Transform;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Drift {
    pub phase: f32,
    pub sway: f32,
}

impl Drift {
    pub fn new(rng: &mut impl RngSource) -> Self {
        Self {
            phase: rng.range_f32(0.0, TAU),
            sway: rng.range_f32(0.2, 0.5),
        }
    }

    pub fn steer(&mut self, t: &mut Transform, speed: f32) {
        self.phase = (self.phase + 0.02) % TAU;
        t.velocity = Vec2::new(self.phase.sin() * speed * self.sway, speed * 0.5);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sine {
    pub phase: f32,
    pub amplitude: f32,
    pub frequency: f32,
}

impl Sine {
    pub fn new(rng: &mut impl RngSource) -> Self {
        Self {
            phase: rng.range_f32(0.0, TAU),
            amplitude: rng.range_f32(30.0, 80.0),
            frequency: rng.range_f32(0.02, 0.05),
        }
    }

    pub fn steer(&mut self, t: &mut Transform, speed: f32) {
        self.phase = (self.phase + self.frequency) % TAU;
        // derivative of amplitude * sin(phase)
        let vx = self.amplitude * self.frequency * self.phase.cos();
        t.velocity = Vec2::new(vx, speed * 0.6);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zigzag {
    pub direction: f32,
    pub timer: u32,
    pub period: u32,
}

impl Zigzag {
    pub fn new(rng: &mut impl RngSource) -> Self {
        Self {
            direction: rng.sign(),
            timer: 0,
            period: rng.range_u32(40, 80),
        }
    }

    pub fn steer(&mut self, t: &mut Transform, speed: f32, bounds: &Bounds) {
        self.timer += 1;
        let x = t.position.x;
        let at_edge = (x <= 0.0 && self.direction < 0.0) || (x >= bounds.width && self.direction > 0.0);
        if self.timer >= self.period || at_edge {
            self.timer = 0;
            self.direction = -self.direction;
        }
        t.velocity = Vec2::new(self.direction * speed, speed * 0.5);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    pub angle: f32,
    pub radius: f32,
    /// Radians per tick, signed for direction.
    pub angular_speed: f32,
}

impl Circle {
    pub fn new(rng: &mut impl RngSource) -> Self {
        Self {
            angle: rng.range_f32(0.0, TAU),
            radius: rng.range_f32(40.0, 90.0),
            angular_speed: rng.range_f32(0.03, 0.05) * rng.sign(),
        }
    }

    pub fn steer(&mut self, t: &mut Transform, speed: f32) {
        self.angle = (self.angle + self.angular_speed).rem_euclid(TAU);
        let tangent = Vec2::new(-self.angle.sin(), self.angle.cos());
        t.velocity = tangent * self.radius * self.angular_speed + Vec2::new(0.0, speed * 0.4);
    }
}

/// Straight line at a fixed velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagonal {
    pub velocity: Vec2,
}

impl Diagonal {
    pub fn new(speed: f32, rng: &mut impl RngSource) -> Self {
        Self {
            velocity: Vec2::new(0.6 * rng.sign(), 0.8) * speed,
        }
    }

    pub fn steer(&mut self, t: &mut Transform) {
        t.velocity = self.velocity;
    }
}
