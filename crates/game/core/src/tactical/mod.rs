//! Squad roles: formation leaders and followers, and flanking entries.
//!
//! Followers store their leader as an [`EntityHandle`] and resolve it every
//! tick. When a leader dies the coordinator clears the link, and the
//! follower falls back to straight-line flight on its next update.

use glam::Vec2;

use crate::env::RngSource;
use crate::movement::Bounds;
use crate::state::{EntityHandle, SpawnError, World};

/// Edge of the playfield an entity enters from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SpawnEdge {
    #[default]
    Top,
    Left,
    Right,
    Bottom,
    BottomLeft,
    BottomRight,
}

impl SpawnEdge {
    /// Entries from below, which override pattern selection with flanking.
    pub fn is_flank(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }
}

/// Follower's view of its leader.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FollowerLink {
    /// `None` once the leader has been destroyed.
    pub leader: Option<EntityHandle>,
    pub offset: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TacticalRole {
    #[default]
    None,
    Leader,
    Follower(FollowerLink),
    Flanker,
}

impl TacticalRole {
    pub fn follower_link(&self) -> Option<&FollowerLink> {
        match self {
            TacticalRole::Follower(link) => Some(link),
            _ => None,
        }
    }
}

/// Requested place in a formation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormationSlot {
    pub leader: EntityHandle,
    pub offset: Vec2,
}

/// Stateless helpers that keep squad links consistent with the world.
pub struct TacticalCoordinator;

impl TacticalCoordinator {
    /// Role for a new entity; a formation slot must name a live leader.
    ///
    /// A flank edge wins over a formation slot: the entity becomes a
    /// flanker and the slot is dropped.
    pub fn assign(
        world: &World,
        formation: Option<FormationSlot>,
        edge: SpawnEdge,
    ) -> Result<TacticalRole, SpawnError> {
        if edge.is_flank() {
            return Ok(TacticalRole::Flanker);
        }
        if let Some(slot) = formation {
            if !world.contains(slot.leader) {
                return Err(SpawnError::InvalidLeader(slot.leader));
            }
            return Ok(TacticalRole::Follower(FollowerLink {
                leader: Some(slot.leader),
                offset: slot.offset,
            }));
        }
        Ok(TacticalRole::None)
    }

    /// Marks the leader once a follower has attached to it.
    pub fn promote_leader(world: &mut World, leader: EntityHandle) {
        if let Some(entity) = world.get_mut(leader) {
            if entity.role == TacticalRole::None {
                entity.role = TacticalRole::Leader;
            }
        }
    }

    /// Clears follower links to `leader`; returns how many were detached.
    pub fn release_followers(world: &mut World, leader: EntityHandle) -> usize {
        let mut released = 0;
        for entity in world.iter_mut() {
            if let TacticalRole::Follower(link) = &mut entity.role {
                if link.leader == Some(leader) {
                    link.leader = None;
                    released += 1;
                }
            }
        }
        released
    }

    /// Entry velocity for an entity coming up from below: mostly upward,
    /// biased toward the middle of the playfield.
    pub fn flank_velocity(
        position: Vec2,
        speed: f32,
        bounds: &Bounds,
        rng: &mut impl RngSource,
    ) -> Vec2 {
        let center = bounds.x_at(0.5);
        let inward = if position.x < center { 1.0 } else { -1.0 };
        let lateral = inward * rng.range_f32(0.35, 0.7);
        Vec2::new(lateral, -1.0).normalize_or(Vec2::NEG_Y) * speed * 1.2
    }

    /// Spawn point for a flank entry along the bottom edge.
    pub fn flank_origin(edge: SpawnEdge, bounds: &Bounds, rng: &mut impl RngSource) -> Vec2 {
        let y = bounds.height + bounds.margin * 0.5;
        let x = match edge {
            SpawnEdge::BottomLeft => rng.range_f32(bounds.x_at(0.02), bounds.x_at(0.15)),
            SpawnEdge::BottomRight => rng.range_f32(bounds.x_at(0.85), bounds.x_at(0.98)),
            _ => rng.range_f32(bounds.x_at(0.1), bounds.x_at(0.9)),
        };
        Vec2::new(x, y)
    }
}
