//! Event hooks for runtime orchestration.
//!
//! The core reports boss escalation, kills and departures as [`SimEvent`]s.
//! Hooks consume those events after every step: they log, score, or turn
//! summon and drone requests into spawn requests that the simulation
//! executes at the start of the next tick.
//!
//! # Architecture
//!
//! - Hooks are registered on the [`SimulationBuilder`](crate::SimulationBuilder)
//!   and sorted by priority
//! - Every event is offered to every hook in priority order
//! - Spawn requests returned by hooks go through the same validation as
//!   scripted spawns

mod context;
mod registry;
mod reinforcement;
mod trace;

pub use context::HookContext;
pub use registry::HookRegistry;
pub use reinforcement::ReinforcementHook;
pub use trace::TracingHook;

use hostile_core::{EntityHandle, SpawnRequest};

/// Defines the criticality level of a hook for error handling.
///
/// - Critical hooks must succeed or the step fails
/// - Important hooks log errors but allow continuation
/// - Optional hooks can fail silently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCriticality {
    /// Hook failure fails the whole step.
    Critical,

    /// Hook failure is logged as an error; the step continues.
    ///
    /// This is the default level.
    Important,

    /// Hook failure is logged at debug level only.
    ///
    /// Use for cosmetic consumers such as audio or screen-shake bridges.
    Optional,
}

/// Failure raised by a hook while handling one event.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HookError {
    #[error("entity {0} is no longer in the world")]
    MissingEntity(EntityHandle),

    #[error("{0}")]
    Rejected(String),
}

/// Consumer of simulation events.
///
/// # Execution Order
///
/// Hooks are sorted by priority (lower values execute first):
/// - Negative priorities: bookkeeping that must see events first
/// - Zero: default priority, including reinforcements
/// - Positive priorities: logging and cosmetic hooks
pub trait SimHook: Send + Sync {
    /// Returns a human-readable name for this hook (used in logging and debugging).
    fn name(&self) -> &'static str;

    /// Returns the execution priority. Lower values execute first.
    fn priority(&self) -> i32 {
        0
    }

    /// Returns the criticality level of this hook for error handling.
    fn criticality(&self) -> HookCriticality {
        HookCriticality::Important
    }

    /// Determines whether this hook wants the event in `ctx`.
    fn should_trigger(&self, ctx: &HookContext<'_>) -> bool;

    /// Handles the event, optionally requesting new entities.
    ///
    /// Returned requests are spawned at the start of the next tick.
    fn on_event(&self, ctx: &HookContext<'_>) -> Result<Vec<SpawnRequest>, HookError>;
}
