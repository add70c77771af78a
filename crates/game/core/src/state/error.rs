//! Spawn-time errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityHandle;

/// Reasons a spawn request is rejected.
///
/// Rejection is all-or-nothing: a failed spawn leaves the world untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpawnError {
    /// Archetype id is not present in the table.
    #[error("unknown archetype '{0}'")]
    UnknownArchetype(String),

    /// Formation leader handle does not resolve to a live entity.
    #[error("formation leader {0} is not alive")]
    InvalidLeader(EntityHandle),

    /// Entity arena is at capacity.
    #[error("world is full (max: {max})")]
    WorldFull { max: usize },
}

impl SpawnError {
    pub const UNKNOWN_ARCHETYPE: &'static str = "SPAWN_UNKNOWN_ARCHETYPE";
    pub const INVALID_LEADER: &'static str = "SPAWN_INVALID_LEADER";
    pub const WORLD_FULL: &'static str = "SPAWN_WORLD_FULL";
}

impl GameError for SpawnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            // content bug; the wave table names a ship that does not exist
            SpawnError::UnknownArchetype(_) => ErrorSeverity::Validation,
            SpawnError::InvalidLeader(_) => ErrorSeverity::Recoverable,
            SpawnError::WorldFull { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SpawnError::UnknownArchetype(_) => Self::UNKNOWN_ARCHETYPE,
            SpawnError::InvalidLeader(_) => Self::INVALID_LEADER,
            SpawnError::WorldFull { .. } => Self::WORLD_FULL,
        }
    }
}
