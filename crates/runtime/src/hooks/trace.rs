//! Structured logging of simulation events.

use hostile_core::{SimEvent, SpawnRequest};
use tracing::{debug, info};

use super::{HookContext, HookCriticality, HookError, SimHook};

/// Logs every event through `tracing`.
///
/// Boss escalation is logged at info level, everything else at debug.
pub struct TracingHook;

impl SimHook for TracingHook {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Optional
    }

    fn should_trigger(&self, _ctx: &HookContext<'_>) -> bool {
        true
    }

    fn on_event(&self, ctx: &HookContext<'_>) -> Result<Vec<SpawnRequest>, HookError> {
        let tick = ctx.now.0;
        match *ctx.event {
            SimEvent::PhaseChanged { entity, phase } => info!(
                target: "runtime::events",
                tick,
                entity = %entity,
                phase,
                "Boss phase changed"
            ),
            SimEvent::Enraged { entity } => info!(
                target: "runtime::events",
                tick,
                entity = %entity,
                "Boss enraged"
            ),
            SimEvent::AttackStarted { entity, attack } => debug!(
                target: "runtime::events",
                tick,
                entity = %entity,
                attack = %attack,
                "Boss special attack"
            ),
            SimEvent::SummonRequested { entity } => debug!(
                target: "runtime::events",
                tick,
                entity = %entity,
                "Summon requested"
            ),
            SimEvent::DroneSpawnRequested { entity, x, y } => debug!(
                target: "runtime::events",
                tick,
                entity = %entity,
                x,
                y,
                "Drone spawn requested"
            ),
            SimEvent::Destroyed {
                entity,
                score,
                refugees,
            } => debug!(
                target: "runtime::events",
                tick,
                entity = %entity,
                score,
                refugees,
                "Entity destroyed"
            ),
            SimEvent::Departed { entity } => debug!(
                target: "runtime::events",
                tick,
                entity = %entity,
                "Entity departed"
            ),
        }
        Ok(Vec::new())
    }
}
