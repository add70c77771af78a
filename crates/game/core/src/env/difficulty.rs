//! Difficulty multiplier bundle.

/// Multipliers applied to an archetype's base stats.
///
/// `health_mult`, `damage_mult` and `speed_mult` are baked into the entity at
/// spawn. `fire_rate_mult` stays live: it scales the fire cooldown on every
/// shot, so values below 1.0 fire faster.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Difficulty {
    pub health_mult: f32,
    pub damage_mult: f32,
    pub fire_rate_mult: f32,
    pub speed_mult: f32,
}

impl Difficulty {
    pub const EASY: Self = Self::new(0.75, 0.7, 1.4, 0.85);
    pub const NORMAL: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const HARD: Self = Self::new(1.35, 1.25, 0.8, 1.15);
    pub const NIGHTMARE: Self = Self::new(1.8, 1.6, 0.6, 1.3);

    pub const fn new(health_mult: f32, damage_mult: f32, fire_rate_mult: f32, speed_mult: f32) -> Self {
        Self {
            health_mult,
            damage_mult,
            fire_rate_mult,
            speed_mult,
        }
    }

    /// Looks up a built-in preset by lowercase name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "easy" => Some(Self::EASY),
            "normal" => Some(Self::NORMAL),
            "hard" => Some(Self::HARD),
            "nightmare" => Some(Self::NIGHTMARE),
            _ => None,
        }
    }

    /// Replaces non-finite or non-positive multipliers with 1.0.
    pub fn sanitized(self) -> Self {
        let fix = |v: f32| if v.is_finite() && v > 0.0 { v } else { 1.0 };
        Self {
            health_mult: fix(self.health_mult),
            damage_mult: fix(self.damage_mult),
            fire_rate_mult: fix(self.fire_rate_mult),
            speed_mult: fix(self.speed_mult),
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::NORMAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_resolve_by_name() {
        assert_eq!(Difficulty::preset("hard"), Some(Difficulty::HARD));
        assert_eq!(Difficulty::preset("impossible"), None);
    }

    #[test]
    fn sanitize_replaces_bad_values() {
        let d = Difficulty::new(0.0, f32::NAN, -2.0, 1.5).sanitized();
        assert_eq!(d, Difficulty::new(1.0, 1.0, 1.0, 1.5));
    }
}
