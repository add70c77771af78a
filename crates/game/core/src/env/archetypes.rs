//! Immutable per-type base stats.
//!
//! An [`Archetype`] describes a ship type: its layered defenses, speed, weapon,
//! rewards and the behavior tag that drives movement-pattern selection. The
//! [`ArchetypeTable`] is keyed by string id because wave definitions refer to
//! archetypes by name; an unknown name is a content bug and is rejected at
//! spawn time rather than replaced with defaults.

use std::collections::BTreeMap;

use crate::boss::{AttackId, AttackTiers};
use crate::error::{ErrorSeverity, GameError};

/// Hull class, used for stat grouping and reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ShipClass {
    Drone,
    Frigate,
    Destroyer,
    Cruiser,
    Battlecruiser,
    Industrial,
    Boss,
}

/// Behavior tag steering movement-pattern selection at spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BehaviorTag {
    /// Mixed bag of simple oscillators.
    Standard,
    /// Swoop, flyby and attack runs.
    Aggressive,
    /// Weaving oscillators and side entries.
    Evasive,
    Swarm,
    Wolfpack,
    Cruiser,
    Destroyer,
    Artillery,
    /// Drifts and launches drones periodically.
    DroneCarrier,
    /// Non-combat hauler crossing the screen; leaves for good when off-screen.
    Patrol,
}

/// Per-archetype gun layout used by regular fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum WeaponProfile {
    /// Unarmed.
    None,
    /// Single aimed bolt.
    Pulse,
    /// Three beams, alternating between the port and starboard emitters.
    TripleBeam,
    /// Two heavy beams; every fourth volley adds a center mega-beam.
    DualHeavy,
    /// One slow, heavy plasma ball.
    HeavyPlasma,
    /// Three-way spread.
    Scatter,
}

/// Multiplier a boss gains each time its phase advances.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhaseBonus {
    /// Fire cooldown is multiplied by this factor per phase (< 1 fires faster).
    FireRate(f32),
    /// Movement speed is multiplied by this factor per phase.
    Speed(f32),
}

/// Boss-only data: signature attacks and escalation parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossProfile {
    /// Archetype-specific signature attacks, in tier-unlock order.
    pub signatures: Vec<AttackId>,
    pub phase_bonus: PhaseBonus,
    /// Cap on entities requested through summon and drone-stream attacks.
    pub max_summons: u32,
}

impl BossProfile {
    pub fn new(signatures: Vec<AttackId>, phase_bonus: PhaseBonus, max_summons: u32) -> Self {
        Self {
            signatures,
            phase_bonus,
            max_summons,
        }
    }

    /// Tiered attack candidates derived from the signature list.
    pub fn tiers(&self) -> AttackTiers {
        AttackTiers::from_signatures(&self.signatures)
    }
}

/// Base stats for one ship type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Archetype {
    pub name: String,
    pub class: ShipClass,
    pub shields: f32,
    pub armor: f32,
    pub hull: f32,
    /// Pixels per tick before difficulty scaling.
    pub speed: f32,
    /// Minimum ticks between regular volleys before difficulty scaling.
    pub fire_interval: u32,
    /// Damage per projectile before difficulty scaling.
    pub damage: f32,
    pub score: u32,
    pub refugees: u32,
    pub behavior: BehaviorTag,
    pub weapon: WeaponProfile,
    #[cfg_attr(feature = "serde", serde(default))]
    pub boss: Option<BossProfile>,
}

impl Archetype {
    pub fn builder(name: impl Into<String>) -> ArchetypeBuilder {
        ArchetypeBuilder::new(name)
    }

    pub fn is_boss(&self) -> bool {
        self.boss.is_some()
    }

    /// Haulers and other unarmed traffic.
    pub fn is_non_combat(&self) -> bool {
        self.behavior == BehaviorTag::Patrol || self.weapon == WeaponProfile::None
    }

    fn validate(&self) -> Result<(), &'static str> {
        let finite_non_negative = |v: f32| v.is_finite() && v >= 0.0;
        if !(finite_non_negative(self.shields) && finite_non_negative(self.armor)) {
            return Err("shields and armor must be finite and non-negative");
        }
        if !(self.hull.is_finite() && self.hull > 0.0) {
            return Err("hull must be positive");
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err("speed must be positive");
        }
        if !finite_non_negative(self.damage) {
            return Err("damage must be finite and non-negative");
        }
        if let Some(boss) = &self.boss {
            if boss.signatures.len() < 2 {
                return Err("bosses need at least two signature attacks");
            }
            if boss.signatures.len() > AttackTiers::MAX_SIGNATURES {
                return Err("too many signature attacks");
            }
            if boss
                .signatures
                .iter()
                .any(|attack| !attack.is_signature_candidate())
            {
                return Err("summon, drone stream, spread and ring are not signature attacks");
            }
            let factor = match boss.phase_bonus {
                PhaseBonus::FireRate(f) | PhaseBonus::Speed(f) => f,
            };
            if !(factor.is_finite() && factor > 0.0) {
                return Err("phase bonus factor must be positive");
            }
        }
        Ok(())
    }
}

/// Builder for archetypes; unspecified fields take frigate-like defaults.
pub struct ArchetypeBuilder {
    archetype: Archetype,
}

impl ArchetypeBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            archetype: Archetype {
                name: name.into(),
                class: ShipClass::Frigate,
                shields: 20.0,
                armor: 10.0,
                hull: 20.0,
                speed: 2.0,
                fire_interval: 90,
                damage: 8.0,
                score: 100,
                refugees: 0,
                behavior: BehaviorTag::Standard,
                weapon: WeaponProfile::Pulse,
                boss: None,
            },
        }
    }

    pub fn class(mut self, class: ShipClass) -> Self {
        self.archetype.class = class;
        self
    }

    pub fn defenses(mut self, shields: f32, armor: f32, hull: f32) -> Self {
        self.archetype.shields = shields;
        self.archetype.armor = armor;
        self.archetype.hull = hull;
        self
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.archetype.speed = speed;
        self
    }

    pub fn fire_interval(mut self, ticks: u32) -> Self {
        self.archetype.fire_interval = ticks;
        self
    }

    pub fn damage(mut self, damage: f32) -> Self {
        self.archetype.damage = damage;
        self
    }

    pub fn rewards(mut self, score: u32, refugees: u32) -> Self {
        self.archetype.score = score;
        self.archetype.refugees = refugees;
        self
    }

    pub fn behavior(mut self, behavior: BehaviorTag) -> Self {
        self.archetype.behavior = behavior;
        self
    }

    pub fn weapon(mut self, weapon: WeaponProfile) -> Self {
        self.archetype.weapon = weapon;
        self
    }

    pub fn boss(mut self, profile: BossProfile) -> Self {
        self.archetype.class = ShipClass::Boss;
        self.archetype.boss = Some(profile);
        self
    }

    pub fn build(self) -> Archetype {
        self.archetype
    }
}

/// Errors raised while assembling an archetype table.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArchetypeError {
    #[error("archetype '{0}' is defined more than once")]
    Duplicate(String),

    #[error("archetype '{id}' is invalid: {reason}")]
    Invalid { id: String, reason: &'static str },
}

impl GameError for ArchetypeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Duplicate(_) => "ARCHETYPE_DUPLICATE",
            Self::Invalid { .. } => "ARCHETYPE_INVALID",
        }
    }
}

/// Immutable lookup of archetypes by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArchetypeTable {
    entries: BTreeMap<String, Archetype>,
}

impl ArchetypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an archetype after validating its stats.
    pub fn insert(&mut self, id: impl Into<String>, archetype: Archetype) -> Result<(), ArchetypeError> {
        let id = id.into();
        if self.entries.contains_key(&id) {
            return Err(ArchetypeError::Duplicate(id));
        }
        archetype
            .validate()
            .map_err(|reason| ArchetypeError::Invalid {
                id: id.clone(),
                reason,
            })?;
        self.entries.insert(id, archetype);
        Ok(())
    }

    /// Builds a table from `(id, archetype)` pairs, failing on the first bad entry.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, Archetype)>,
    ) -> Result<Self, ArchetypeError> {
        let mut table = Self::new();
        for (id, archetype) in entries {
            table.insert(id, archetype)?;
        }
        Ok(table)
    }

    pub fn get(&self, id: &str) -> Option<&Archetype> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
