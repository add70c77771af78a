//! Playfield geometry shared by exit handling and the self-managed patterns.

use glam::Vec2;

use crate::config::SimConfig;
use crate::env::RngSource;

/// Playfield rectangle `[0, width] x [0, height]` plus an off-screen margin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32, margin: f32) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.world_width, config.world_height, config.offscreen_margin)
    }

    /// Inside the visible playfield.
    pub fn contains(&self, p: Vec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// Beyond the margin on any side.
    pub fn is_outside(&self, p: Vec2) -> bool {
        p.x < -self.margin
            || p.x > self.width + self.margin
            || p.y < -self.margin
            || p.y > self.height + self.margin
    }

    /// Moves a point that left along its direction of travel to the opposite edge.
    pub fn wrap(&self, p: Vec2, velocity: Vec2) -> Vec2 {
        let mut out = p;
        if p.y > self.height + self.margin && velocity.y >= 0.0 {
            out.y = -self.margin;
        } else if p.y < -self.margin && velocity.y < 0.0 {
            out.y = self.height + self.margin;
        }
        if p.x > self.width + self.margin && velocity.x >= 0.0 {
            out.x = -self.margin;
        } else if p.x < -self.margin && velocity.x < 0.0 {
            out.x = self.width + self.margin;
        }
        out
    }

    /// Clamps into the playfield shrunk by `inset` on each side, with the top
    /// edge relaxed to the margin so ships may sit just above the screen.
    pub fn clamp(&self, p: Vec2, inset: f32, max_y: f32) -> Vec2 {
        Vec2::new(
            p.x.clamp(inset, (self.width - inset).max(inset)),
            p.y.clamp(-self.margin, max_y.max(-self.margin)),
        )
    }

    /// Random point just above the top edge.
    pub fn respawn_above(&self, rng: &mut impl RngSource) -> Vec2 {
        Vec2::new(
            rng.range_f32(self.width * 0.1, self.width * 0.9),
            -self.margin * 0.5,
        )
    }

    /// Fraction of the width, for lane and anchor placement.
    pub fn x_at(&self, fraction: f32) -> f32 {
        self.width * fraction
    }

    /// Fraction of the height.
    pub fn y_at(&self, fraction: f32) -> f32 {
        self.height * fraction
    }
}
