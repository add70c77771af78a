//! Runtime orchestration for the deterministic hostile simulation.
//!
//! This crate wraps the pure `hostile-core` engine into a driver that owns
//! state between ticks. Consumers embed [`Simulation`] to advance the world,
//! apply hits and receive projectiles and events.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the driver and builder
//! - [`hooks`] dispatches simulation events to logging and reinforcements
//! - [`scenario`] plays scripted spawn schedules
//! - [`report`] holds per-step output and session totals
pub mod error;
pub mod hooks;
pub mod report;
pub mod runtime;
pub mod scenario;

pub use error::{Result, RuntimeError};
pub use hooks::{
    HookContext, HookCriticality, HookError, HookRegistry, ReinforcementHook, SimHook, TracingHook,
};
pub use report::{SimStats, TickReport};
pub use runtime::{Simulation, SimulationBuilder, SimulationConfig};
pub use scenario::{Scenario, ScriptedFollow, ScriptedSpawn};
