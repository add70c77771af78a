//! Turns boss summon and drone requests into spawn requests.

use hostile_content::ids;
use hostile_core::{SimEvent, SpawnEdge, SpawnRequest, Vec2};

use super::{HookContext, HookError, SimHook};

/// Distance below the boss where summoned ships appear.
const SUMMON_DROP: f32 = 40.0;
/// Horizontal spacing between consecutive summon slots.
const SUMMON_SPREAD: f32 = 30.0;
/// Number of distinct summon slots before the pattern repeats.
const SUMMON_SLOTS: u64 = 5;

/// Spawns reinforcements for [`SimEvent::SummonRequested`] and
/// [`SimEvent::DroneSpawnRequested`].
///
/// Summons appear in a row of slots under the requesting boss, picked from
/// the tick so that a queue drained over several ticks fans out. Drones
/// appear exactly where the core asked for them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReinforcementHook {
    summon_archetype: String,
    drone_archetype: String,
}

impl ReinforcementHook {
    pub fn new(summon_archetype: impl Into<String>, drone_archetype: impl Into<String>) -> Self {
        Self {
            summon_archetype: summon_archetype.into(),
            drone_archetype: drone_archetype.into(),
        }
    }

    pub fn summon_archetype(&self) -> &str {
        &self.summon_archetype
    }

    pub fn drone_archetype(&self) -> &str {
        &self.drone_archetype
    }

    fn summon_offset(now: u64) -> Vec2 {
        let slot = (now % SUMMON_SLOTS) as f32 - (SUMMON_SLOTS / 2) as f32;
        Vec2::new(slot * SUMMON_SPREAD, SUMMON_DROP)
    }
}

impl Default for ReinforcementHook {
    fn default() -> Self {
        Self::new(ids::INTERCEPTOR, ids::DRONE)
    }
}

impl SimHook for ReinforcementHook {
    fn name(&self) -> &'static str {
        "reinforcement"
    }

    fn should_trigger(&self, ctx: &HookContext<'_>) -> bool {
        matches!(
            ctx.event,
            SimEvent::SummonRequested { .. } | SimEvent::DroneSpawnRequested { .. }
        )
    }

    fn on_event(&self, ctx: &HookContext<'_>) -> Result<Vec<SpawnRequest>, HookError> {
        let request = match *ctx.event {
            SimEvent::SummonRequested { entity } => {
                let boss = ctx.world.get(entity).ok_or(HookError::MissingEntity(entity))?;
                SpawnRequest::new(
                    self.summon_archetype.clone(),
                    boss.position() + Self::summon_offset(ctx.now.0),
                )
            }
            SimEvent::DroneSpawnRequested { x, y, .. } => {
                SpawnRequest::new(self.drone_archetype.clone(), Vec2::new(x, y))
            }
            _ => return Ok(Vec::new()),
        };
        Ok(vec![request.edge(SpawnEdge::Top).difficulty(ctx.difficulty)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostile_core::{Difficulty, EntityHandle, Tick, World};

    #[test]
    fn drone_request_spawns_at_requested_point() {
        let world = World::new();
        let event = SimEvent::DroneSpawnRequested {
            entity: EntityHandle::new(0, 0),
            x: 120.0,
            y: 80.0,
        };
        let ctx = HookContext::new(&event, Tick(10), &world, Difficulty::HARD);
        let hook = ReinforcementHook::default();

        assert!(hook.should_trigger(&ctx));
        let requests = hook.on_event(&ctx).unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].archetype_id, ids::DRONE);
        assert_eq!(requests[0].position, Vec2::new(120.0, 80.0));
        assert_eq!(requests[0].difficulty, Difficulty::HARD);
    }

    #[test]
    fn summon_for_missing_boss_fails() {
        let world = World::new();
        let entity = EntityHandle::new(3, 1);
        let event = SimEvent::SummonRequested { entity };
        let ctx = HookContext::new(&event, Tick(10), &world, Difficulty::NORMAL);

        let err = ReinforcementHook::default().on_event(&ctx).unwrap_err();
        assert_eq!(err, HookError::MissingEntity(entity));
    }

    #[test]
    fn summon_slots_fan_out() {
        let offsets: Vec<f32> = (0..SUMMON_SLOTS)
            .map(|t| ReinforcementHook::summon_offset(t).x)
            .collect();
        assert_eq!(offsets, vec![-60.0, -30.0, 0.0, 30.0, 60.0]);
    }

    #[test]
    fn ignores_other_events() {
        let world = World::new();
        let event = SimEvent::Enraged {
            entity: EntityHandle::new(0, 0),
        };
        let ctx = HookContext::new(&event, Tick(1), &world, Difficulty::NORMAL);
        assert!(!ReinforcementHook::default().should_trigger(&ctx));
    }
}
