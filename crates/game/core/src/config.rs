/// Simulation constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Playfield width in pixels.
    pub world_width: f32,
    /// Playfield height in pixels.
    pub world_height: f32,
    /// Distance past an edge before an entity counts as off-screen.
    pub offscreen_margin: f32,
    /// Ticks between boss special attacks at phase 0.
    pub special_base_interval: u32,
    /// Ticks between two queued summons leaving the boss queue.
    pub summon_spacing: u32,
    /// Drones force-queued when a boss enrages.
    pub enrage_drone_burst: u32,
    /// Ticks between drone launches for drone carriers.
    pub drone_interval: u32,
}

impl SimConfig {
    // ===== compile-time constants =====
    /// Upper bound on simultaneously live entities.
    pub const MAX_ENTITIES: usize = 512;
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Special-attack interval shrinks by this many ticks per boss phase.
    pub const PHASE_INTERVAL_STEP: u32 = 60;
    /// Floor for the special-attack interval after phase reductions.
    pub const MIN_SPECIAL_INTERVAL: u32 = 45;
    /// Lockout applied after a special attack fires.
    pub const SPECIAL_LOCKOUT: u32 = 30;
    /// Fraction of the remaining offset a follower closes each tick.
    pub const FORMATION_LAG: f32 = 0.25;
    pub const FACING_SMOOTHING: f32 = 0.08;
    pub const FACING_SMOOTHING_TIGHT: f32 = 0.15;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_WORLD_WIDTH: f32 = 800.0;
    pub const DEFAULT_WORLD_HEIGHT: f32 = 600.0;
    pub const DEFAULT_OFFSCREEN_MARGIN: f32 = 64.0;
    pub const DEFAULT_SPECIAL_BASE_INTERVAL: u32 = 240;
    pub const DEFAULT_SUMMON_SPACING: u32 = 20;
    pub const DEFAULT_ENRAGE_DRONE_BURST: u32 = 4;
    pub const DEFAULT_DRONE_INTERVAL: u32 = 300;

    pub fn new() -> Self {
        Self {
            world_width: Self::DEFAULT_WORLD_WIDTH,
            world_height: Self::DEFAULT_WORLD_HEIGHT,
            offscreen_margin: Self::DEFAULT_OFFSCREEN_MARGIN,
            special_base_interval: Self::DEFAULT_SPECIAL_BASE_INTERVAL,
            summon_spacing: Self::DEFAULT_SUMMON_SPACING,
            enrage_drone_burst: Self::DEFAULT_ENRAGE_DRONE_BURST,
            drone_interval: Self::DEFAULT_DRONE_INTERVAL,
        }
    }

    /// Special-attack interval for a boss at `phase`.
    pub fn special_interval(&self, phase: u8) -> u32 {
        self.special_base_interval
            .saturating_sub(u32::from(phase) * Self::PHASE_INTERVAL_STEP)
            .max(Self::MIN_SPECIAL_INTERVAL)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn special_interval_shrinks_per_phase() {
        let config = SimConfig::new();
        assert_eq!(config.special_interval(0), 240);
        assert_eq!(config.special_interval(1), 180);
        assert_eq!(config.special_interval(2), 120);
    }

    #[test]
    fn special_interval_never_drops_below_floor() {
        let config = SimConfig {
            special_base_interval: 100,
            ..SimConfig::new()
        };
        assert_eq!(config.special_interval(2), SimConfig::MIN_SPECIAL_INTERVAL);
    }
}
