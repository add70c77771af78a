//! Movement pattern engine.
//!
//! Every entity runs exactly one of sixteen patterns, picked at spawn and
//! stored as a [`PatternState`] variant carrying the pattern's own sub-state.
//! One tick of movement is:
//!
//! 1. steer: the pattern writes this tick's velocity
//! 2. integrate: `position += velocity`
//! 3. exit handling by pattern family (wrap, self-managed, respawn above)
//!
//! Patterns never touch another entity. Formation followers receive their
//! leader's start-of-tick position through [`MoveContext`].

mod bounds;
mod capital;
mod facing;
mod formation;
mod oscillators;
mod strike;
mod wolfpack;

pub use bounds::Bounds;
pub use capital::{Artillery, ArtilleryStage, Cruiser, CruiserStage, Destroyer, DestroyerStage};
pub use facing::{normalize_delta, smooth_facing};
pub use formation::follow;
pub use oscillators::{Circle, Diagonal, Drift, Sine, Zigzag};
pub use strike::{
    AttackRun, AttackRunStage, Flank, FlankStage, Flanking, FlankingStage, Flyby, FlybyStage,
    Swarm, SwarmStage, Swoop, SwoopStage,
};
pub use wolfpack::{Wolfpack, WolfpackStage};

use glam::Vec2;

use crate::config::SimConfig;
use crate::env::{BehaviorTag, RngSource};
use crate::state::{Entity, Transform};
use crate::tactical::SpawnEdge;

/// Enumerated movement patterns.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PatternId {
    Drift,
    Sine,
    Zigzag,
    Circle,
    Swoop,
    Flank,
    Swarm,
    Flyby,
    AttackRun,
    Diagonal,
    Flanking,
    Formation,
    Cruiser,
    Artillery,
    Wolfpack,
    Destroyer,
}

/// What happens when an entity leaves the playfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitPolicy {
    /// Reappear at the opposite edge.
    Wrap,
    /// The pattern's own sub-state machine handles it.
    SelfManaged,
    /// Reappear above the screen at a random X with fresh pattern state.
    RespawnAbove,
}

impl PatternId {
    pub const fn exit_policy(self) -> ExitPolicy {
        match self {
            Self::Drift
            | Self::Sine
            | Self::Zigzag
            | Self::Circle
            | Self::Diagonal
            | Self::Formation => ExitPolicy::Wrap,
            Self::Flyby
            | Self::AttackRun
            | Self::Flanking
            | Self::Cruiser
            | Self::Artillery
            | Self::Wolfpack
            | Self::Destroyer
            | Self::Swarm => ExitPolicy::SelfManaged,
            Self::Swoop | Self::Flank => ExitPolicy::RespawnAbove,
        }
    }

    pub const fn facing_smoothing(self) -> f32 {
        match self {
            Self::Formation | Self::Diagonal => SimConfig::FACING_SMOOTHING_TIGHT,
            _ => SimConfig::FACING_SMOOTHING,
        }
    }
}

/// Active pattern plus its sub-state.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternState {
    Drift(Drift),
    Sine(Sine),
    Zigzag(Zigzag),
    Circle(Circle),
    Swoop(Swoop),
    Flank(Flank),
    Swarm(Swarm),
    Flyby(Flyby),
    AttackRun(AttackRun),
    Diagonal(Diagonal),
    Flanking(Flanking),
    /// Slot and leader live in the entity's tactical role.
    Formation,
    Cruiser(Cruiser),
    Artillery(Artillery),
    Wolfpack(Wolfpack),
    Destroyer(Destroyer),
}

impl PatternState {
    /// Fresh sub-state for `id` at the given transform.
    pub fn init(id: PatternId, t: &Transform, speed: f32, bounds: &Bounds, rng: &mut impl RngSource) -> Self {
        match id {
            PatternId::Drift => Self::Drift(Drift::new(rng)),
            PatternId::Sine => Self::Sine(Sine::new(rng)),
            PatternId::Zigzag => Self::Zigzag(Zigzag::new(rng)),
            PatternId::Circle => Self::Circle(Circle::new(rng)),
            PatternId::Swoop => Self::Swoop(Swoop::new(bounds, rng)),
            PatternId::Flank => Self::Flank(Flank::new(t.position, bounds, rng)),
            PatternId::Swarm => Self::Swarm(Swarm::new()),
            PatternId::Flyby => Self::Flyby(Flyby::new(bounds, rng)),
            PatternId::AttackRun => Self::AttackRun(AttackRun::new(bounds, rng)),
            PatternId::Diagonal => Self::Diagonal(Diagonal::new(speed, rng)),
            PatternId::Flanking => Self::Flanking(Flanking::new()),
            PatternId::Formation => Self::Formation,
            PatternId::Cruiser => Self::Cruiser(Cruiser::new(rng)),
            PatternId::Artillery => Self::Artillery(Artillery::new(bounds, rng)),
            PatternId::Wolfpack => Self::Wolfpack(Wolfpack::new(rng)),
            PatternId::Destroyer => Self::Destroyer(Destroyer::new(bounds, rng)),
        }
    }

    pub fn id(&self) -> PatternId {
        match self {
            Self::Drift(_) => PatternId::Drift,
            Self::Sine(_) => PatternId::Sine,
            Self::Zigzag(_) => PatternId::Zigzag,
            Self::Circle(_) => PatternId::Circle,
            Self::Swoop(_) => PatternId::Swoop,
            Self::Flank(_) => PatternId::Flank,
            Self::Swarm(_) => PatternId::Swarm,
            Self::Flyby(_) => PatternId::Flyby,
            Self::AttackRun(_) => PatternId::AttackRun,
            Self::Diagonal(_) => PatternId::Diagonal,
            Self::Flanking(_) => PatternId::Flanking,
            Self::Formation => PatternId::Formation,
            Self::Cruiser(_) => PatternId::Cruiser,
            Self::Artillery(_) => PatternId::Artillery,
            Self::Wolfpack(_) => PatternId::Wolfpack,
            Self::Destroyer(_) => PatternId::Destroyer,
        }
    }

    /// Whether the pattern allows regular fire this tick.
    pub fn weapons_free(&self) -> bool {
        match self {
            Self::Artillery(artillery) => artillery.weapons_free(),
            _ => true,
        }
    }
}

fn weights(tag: BehaviorTag) -> &'static [(PatternId, u32)] {
    use PatternId::*;
    match tag {
        BehaviorTag::Standard => &[(Drift, 3), (Sine, 3), (Zigzag, 2), (Circle, 2), (Diagonal, 1)],
        BehaviorTag::Aggressive => &[(Swoop, 3), (Flyby, 2), (AttackRun, 3)],
        BehaviorTag::Evasive => &[(Sine, 2), (Zigzag, 3), (Circle, 2), (Flank, 3)],
        BehaviorTag::Swarm => &[(Swarm, 1)],
        BehaviorTag::Wolfpack => &[(Wolfpack, 1)],
        BehaviorTag::Cruiser => &[(Cruiser, 1)],
        BehaviorTag::Destroyer => &[(Destroyer, 1)],
        BehaviorTag::Artillery => &[(Artillery, 1)],
        BehaviorTag::DroneCarrier => &[(Drift, 1)],
        BehaviorTag::Patrol => &[(Diagonal, 1), (Drift, 1)],
    }
}

/// Weighted pick by behavior tag; a flank edge always yields [`PatternId::Flanking`].
pub fn select_pattern(tag: BehaviorTag, edge: SpawnEdge, rng: &mut impl RngSource) -> PatternId {
    if edge.is_flank() {
        return PatternId::Flanking;
    }
    let table = weights(tag);
    let total: u32 = table.iter().map(|(_, weight)| weight).sum();
    let mut roll = rng.range_u32(0, total.saturating_sub(1));
    for &(id, weight) in table {
        if roll < weight {
            return id;
        }
        roll -= weight;
    }
    table[0].0
}

/// Per-tick inputs to movement.
#[derive(Clone, Copy, Debug)]
pub struct MoveContext {
    pub player: Vec2,
    /// Leader position from the start-of-tick snapshot, formation only.
    pub leader: Option<Vec2>,
    pub health_fraction: f32,
    pub bounds: Bounds,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Active,
    /// A non-combat ship left the playfield after having entered it.
    Departed,
}

/// Runs one tick of movement for `entity`.
pub fn advance(entity: &mut Entity, ctx: &MoveContext, rng: &mut impl RngSource) -> MoveOutcome {
    let speed = entity.effective_speed();
    let bounds = &ctx.bounds;
    let Entity {
        pattern,
        transform: t,
        role,
        stats,
        entered,
        ..
    } = entity;

    let mut leader_lost = false;
    match pattern {
        PatternState::Drift(p) => p.steer(t, speed),
        PatternState::Sine(p) => p.steer(t, speed),
        PatternState::Zigzag(p) => p.steer(t, speed, bounds),
        PatternState::Circle(p) => p.steer(t, speed),
        PatternState::Swoop(p) => p.steer(t, speed, ctx.player),
        PatternState::Flank(p) => p.steer(t, speed, bounds),
        PatternState::Swarm(p) => p.steer(t, speed, ctx.player, rng),
        PatternState::Flyby(p) => p.steer(t, speed),
        PatternState::AttackRun(p) => p.steer(t, speed, ctx.player),
        PatternState::Diagonal(p) => p.steer(t),
        PatternState::Flanking(p) => p.steer(t, speed, ctx.player),
        PatternState::Formation => {
            let offset = role.follower_link().map_or(Vec2::ZERO, |link| link.offset);
            leader_lost = !follow(t, ctx.leader, offset, bounds);
        }
        PatternState::Cruiser(p) => p.steer(t, speed, ctx.player, bounds, rng),
        PatternState::Artillery(p) => p.steer(t, speed, ctx.health_fraction, bounds, rng),
        PatternState::Wolfpack(p) => p.steer(t, speed, ctx.player, rng),
        PatternState::Destroyer(p) => p.steer(t, speed, bounds, rng),
    }
    if leader_lost {
        // keep the last velocity, for good
        *pattern = PatternState::Diagonal(Diagonal { velocity: t.velocity });
    }

    t.position += t.velocity;
    if bounds.contains(t.position) {
        *entered = true;
    }

    if stats.non_combat && *entered && bounds.is_outside(t.position) {
        return MoveOutcome::Departed;
    }

    match pattern.id().exit_policy() {
        ExitPolicy::Wrap => {
            if bounds.is_outside(t.position) {
                t.position = bounds.wrap(t.position, t.velocity);
            }
        }
        ExitPolicy::RespawnAbove => {
            if bounds.is_outside(t.position) {
                let id = pattern.id();
                t.position = bounds.respawn_above(rng);
                *pattern = PatternState::init(id, t, speed, bounds, rng);
            }
        }
        ExitPolicy::SelfManaged => match pattern {
            PatternState::Flyby(p) => p.settle(t, bounds, rng),
            PatternState::AttackRun(p) => p.settle(t, bounds, rng),
            PatternState::Flanking(p) => p.settle(t, speed, bounds, rng),
            PatternState::Swarm(p) => p.settle(t, speed, bounds, rng),
            PatternState::Cruiser(p) => p.settle(t, bounds),
            PatternState::Artillery(p) => p.settle(t, bounds),
            PatternState::Wolfpack(p) => p.settle(t, bounds),
            PatternState::Destroyer(p) => p.settle(t, bounds),
            _ => {}
        },
    }
    MoveOutcome::Active
}

/// Eases the entity's facing toward its heading for this tick.
pub fn update_facing(entity: &mut Entity) {
    let smoothing = entity.pattern.id().facing_smoothing();
    let t = &mut entity.transform;
    t.facing = smooth_facing(t.facing, t.velocity, smoothing);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn sixteen_patterns_with_exit_policies() {
        assert_eq!(PatternId::COUNT, 16);
        let managed = PatternId::iter()
            .filter(|id| id.exit_policy() == ExitPolicy::SelfManaged)
            .count();
        assert_eq!(managed, 8);
    }

    #[test]
    fn init_round_trips_id() {
        let mut rng = PcgRng::new(1);
        let bounds = Bounds::new(800.0, 600.0, 64.0);
        let t = Transform::at(Vec2::new(400.0, -20.0));
        for id in PatternId::iter() {
            assert_eq!(PatternState::init(id, &t, 2.0, &bounds, &mut rng).id(), id);
        }
    }

    #[test]
    fn flank_edge_overrides_every_tag() {
        let mut rng = PcgRng::new(1);
        for edge in [SpawnEdge::Bottom, SpawnEdge::BottomLeft, SpawnEdge::BottomRight] {
            for tag in [BehaviorTag::Artillery, BehaviorTag::Aggressive, BehaviorTag::Patrol] {
                assert_eq!(select_pattern(tag, edge, &mut rng), PatternId::Flanking);
            }
        }
    }

    #[test]
    fn aggressive_tag_picks_strike_patterns() {
        let mut rng = PcgRng::new(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            let id = select_pattern(BehaviorTag::Aggressive, SpawnEdge::Top, &mut rng);
            assert!(matches!(id, PatternId::Swoop | PatternId::Flyby | PatternId::AttackRun));
            seen.insert(id);
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn single_pattern_tags_are_fixed() {
        let mut rng = PcgRng::new(1);
        assert_eq!(select_pattern(BehaviorTag::Artillery, SpawnEdge::Top, &mut rng), PatternId::Artillery);
        assert_eq!(select_pattern(BehaviorTag::DroneCarrier, SpawnEdge::Left, &mut rng), PatternId::Drift);
    }

    #[test]
    fn artillery_holds_fire_while_moving() {
        let mut rng = PcgRng::new(1);
        let bounds = Bounds::new(800.0, 600.0, 64.0);
        let t = Transform::at(Vec2::new(400.0, -20.0));
        let state = PatternState::init(PatternId::Artillery, &t, 1.0, &bounds, &mut rng);
        assert!(!state.weapons_free());
        assert!(PatternState::Drift(Drift::new(&mut rng)).weapons_free());
    }
}
