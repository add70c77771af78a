//! Unified error type surfaced by the runtime API.
//!
//! Wraps failures from spawning, hooks and scenario loading so clients can
//! bubble them up with consistent context.
use std::path::PathBuf;

use hostile_core::{ArchetypeError, ErrorSeverity, GameError, SpawnError};
use thiserror::Error;

use crate::hooks::HookError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to spawn '{archetype}'")]
    Spawn {
        archetype: String,
        #[source]
        source: SpawnError,
    },

    #[error("critical hook '{hook}' failed")]
    Hook {
        hook: &'static str,
        #[source]
        source: HookError,
    },

    #[error("built-in archetype catalog is invalid")]
    Catalog(#[from] ArchetypeError),

    #[error("reinforcement archetype '{0}' is not in the archetype table")]
    UnknownReinforcement(String),

    #[error("failed to read scenario file {path}")]
    ScenarioRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario RON")]
    ScenarioParse(#[source] ron::error::SpannedError),

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Spawn { source, .. } => source.severity(),
            Self::Hook { .. } => ErrorSeverity::Internal,
            Self::Catalog(_) => ErrorSeverity::Fatal,
            Self::UnknownReinforcement(_)
            | Self::ScenarioRead { .. }
            | Self::ScenarioParse(_)
            | Self::InvalidScenario(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Spawn { source, .. } => source.error_code(),
            Self::Hook { .. } => "RUNTIME_HOOK_FAILED",
            Self::Catalog(_) => "RUNTIME_CATALOG_INVALID",
            Self::UnknownReinforcement(_) => "RUNTIME_UNKNOWN_REINFORCEMENT",
            Self::ScenarioRead { .. } => "RUNTIME_SCENARIO_READ",
            Self::ScenarioParse(_) => "RUNTIME_SCENARIO_PARSE",
            Self::InvalidScenario(_) => "RUNTIME_SCENARIO_INVALID",
        }
    }
}
