//! Harness configuration from environment variables.
use std::env;
use std::path::PathBuf;

/// Headless harness configuration.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub seed: u64,
    pub ticks: u64,
    /// Difficulty preset name.
    pub difficulty: String,
    /// Content directory (`archetypes.ron`, `difficulty.toml`, `sim.toml`).
    pub data_dir: PathBuf,
    /// RON scenario; the built-in demo wave when unset.
    pub scenario: Option<PathBuf>,
    /// TOML overriding `sim.toml` from the data directory.
    pub config: Option<PathBuf>,
    pub hits: HitConfig,
}

/// Scripted player gunfire.
#[derive(Clone, Copy, Debug)]
pub struct HitConfig {
    /// Ticks between hits on the nearest enemy.
    pub interval: u64,
    pub damage: f32,
    pub shield_mult: f32,
    pub armor_mult: f32,
}

impl Default for HitConfig {
    fn default() -> Self {
        Self {
            interval: 6,
            damage: 12.0,
            shield_mult: 1.0,
            armor_mult: 1.0,
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            ticks: 3_600,
            difficulty: "normal".to_string(),
            data_dir: PathBuf::from("crates/game/content/data"),
            scenario: None,
            config: None,
            hits: HitConfig::default(),
        }
    }
}

impl CliConfig {
    /// Construct harness configuration from environment variables.
    ///
    /// Environment variables:
    /// - `HOSTILE_SEED` - RNG seed (default: 1)
    /// - `HOSTILE_TICKS` - Ticks to simulate (default: 3600, one minute)
    /// - `HOSTILE_DIFFICULTY` - Preset name (default: normal)
    /// - `HOSTILE_DATA_DIR` - Content directory
    /// - `HOSTILE_SCENARIO` - Path to a RON scenario
    /// - `HOSTILE_CONFIG` - Path to a simulation TOML
    /// - `HOSTILE_HIT_INTERVAL` / `HOSTILE_HIT_DAMAGE` - Player gunfire
    /// - `HOSTILE_HIT_SHIELD_MULT` / `HOSTILE_HIT_ARMOR_MULT` - Ammo multipliers
    ///   against shields and armor (default: 1.0)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(seed) = parse::<u64>(lookup("HOSTILE_SEED")) {
            config.seed = seed;
        }
        if let Some(ticks) = parse::<u64>(lookup("HOSTILE_TICKS")) {
            config.ticks = ticks;
        }
        if let Some(difficulty) = lookup("HOSTILE_DIFFICULTY") {
            config.difficulty = difficulty.to_lowercase();
        }
        if let Some(dir) = parse::<PathBuf>(lookup("HOSTILE_DATA_DIR")) {
            config.data_dir = dir;
        }
        config.scenario = parse::<PathBuf>(lookup("HOSTILE_SCENARIO"));
        config.config = parse::<PathBuf>(lookup("HOSTILE_CONFIG"));
        if let Some(interval) = parse::<u64>(lookup("HOSTILE_HIT_INTERVAL")) {
            config.hits.interval = interval.max(1);
        }
        if let Some(damage) = parse::<f32>(lookup("HOSTILE_HIT_DAMAGE")) {
            config.hits.damage = damage;
        }
        if let Some(mult) = parse::<f32>(lookup("HOSTILE_HIT_SHIELD_MULT")) {
            config.hits.shield_mult = mult;
        }
        if let Some(mult) = parse::<f32>(lookup("HOSTILE_HIT_ARMOR_MULT")) {
            config.hits.armor_mult = mult;
        }

        config
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.parse().ok()
}
