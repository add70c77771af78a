//! Hook registry for dispatching simulation events.

use std::sync::Arc;

use hostile_core::SpawnRequest;
use tracing::{debug, error};

use super::{HookContext, HookCriticality, HookError, ReinforcementHook, SimHook, TracingHook};
use crate::error::{Result, RuntimeError};

/// Registry that owns the hooks and offers each event to them in priority order.
#[derive(Clone)]
pub struct HookRegistry {
    hooks: Vec<Arc<dyn SimHook>>,
}

impl HookRegistry {
    /// Creates a registry; hooks are sorted by priority (lower values first).
    ///
    /// The sort is stable, so hooks of equal priority keep their given order.
    pub fn new(mut hooks: Vec<Arc<dyn SimHook>>) -> Self {
        hooks.sort_by_key(|h| h.priority());
        Self { hooks }
    }

    /// Creates a registry with no hooks.
    pub fn empty() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Creates a registry with the default set of hooks.
    ///
    /// Default hooks include:
    /// - ReinforcementHook: spawns summons and drones (priority 0)
    /// - TracingHook: logs every event (priority 100)
    pub fn default_hooks() -> Self {
        Self::with_reinforcements(ReinforcementHook::default())
    }

    /// Default hooks with a custom reinforcement mapping.
    pub fn with_reinforcements(reinforcements: ReinforcementHook) -> Self {
        Self::new(vec![
            Arc::new(reinforcements) as Arc<dyn SimHook>,
            Arc::new(TracingHook) as Arc<dyn SimHook>,
        ])
    }

    /// Adds a hook, keeping priority order.
    pub fn register(&mut self, hook: Arc<dyn SimHook>) {
        let at = self
            .hooks
            .partition_point(|h| h.priority() <= hook.priority());
        self.hooks.insert(at, hook);
    }

    /// Offers one event to every hook and collects the requested spawns.
    ///
    /// # Error Handling
    ///
    /// - `Critical`: returns the error immediately
    /// - `Important`: logs an error and continues (default)
    /// - `Optional`: logs at debug level and continues
    pub fn dispatch(&self, ctx: &HookContext<'_>) -> Result<Vec<SpawnRequest>> {
        let mut requests = Vec::new();
        for hook in self.hooks.iter() {
            if !hook.should_trigger(ctx) {
                continue;
            }
            match hook.on_event(ctx) {
                Ok(mut spawned) => requests.append(&mut spawned),
                Err(e) => self.handle_hook_error(hook.as_ref(), e)?,
            }
        }
        Ok(requests)
    }

    /// Returns the number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns true if no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Returns an iterator over hook names and priorities (for debugging).
    pub fn hooks(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.hooks.iter().map(|h| (h.name(), h.priority()))
    }

    /// Handles hook errors based on criticality level.
    fn handle_hook_error(&self, hook: &dyn SimHook, error: HookError) -> Result<()> {
        match hook.criticality() {
            HookCriticality::Critical => {
                error!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "critical",
                    error = %error,
                    "Critical hook failed, aborting step"
                );
                return Err(RuntimeError::Hook {
                    hook: hook.name(),
                    source: error,
                });
            }
            HookCriticality::Important => error!(
                target: "runtime::hooks",
                hook = hook.name(),
                criticality = "important",
                error = %error,
                "Hook failed, continuing"
            ),
            HookCriticality::Optional => debug!(
                target: "runtime::hooks",
                hook = hook.name(),
                criticality = "optional",
                error = %error,
                "Optional hook failed"
            ),
        }

        Ok(())
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::default_hooks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostile_core::{Difficulty, EntityHandle, SimEvent, Tick, Vec2, World};
    use std::sync::Mutex;

    struct Probe {
        name: &'static str,
        priority: i32,
        criticality: HookCriticality,
        fail: bool,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl SimHook for Probe {
        fn name(&self) -> &'static str {
            self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn criticality(&self) -> HookCriticality {
            self.criticality
        }

        fn should_trigger(&self, _ctx: &HookContext<'_>) -> bool {
            true
        }

        fn on_event(&self, _ctx: &HookContext<'_>) -> std::result::Result<Vec<SpawnRequest>, HookError> {
            self.log.lock().unwrap().push(self.name);
            if self.fail {
                return Err(HookError::Rejected("probe".into()));
            }
            Ok(vec![SpawnRequest::new(self.name, Vec2::ZERO)])
        }
    }

    fn probe(
        name: &'static str,
        priority: i32,
        criticality: HookCriticality,
        fail: bool,
        log: &Arc<Mutex<Vec<&'static str>>>,
    ) -> Arc<dyn SimHook> {
        Arc::new(Probe {
            name,
            priority,
            criticality,
            fail,
            log: Arc::clone(log),
        })
    }

    fn dispatch(registry: &HookRegistry) -> Result<Vec<SpawnRequest>> {
        let world = World::new();
        let event = SimEvent::Enraged {
            entity: EntityHandle::new(0, 0),
        };
        registry.dispatch(&HookContext::new(&event, Tick(1), &world, Difficulty::NORMAL))
    }

    #[test]
    fn runs_in_priority_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = HookRegistry::new(vec![
            probe("late", 10, HookCriticality::Important, false, &log),
            probe("early", -10, HookCriticality::Important, false, &log),
        ]);
        registry.register(probe("middle", 0, HookCriticality::Important, false, &log));

        let requests = dispatch(&registry).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["early", "middle", "late"]);
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].archetype_id, "early");
    }

    #[test]
    fn important_failure_continues() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let registry = HookRegistry::new(vec![
            probe("broken", 0, HookCriticality::Important, true, &log),
            probe("after", 1, HookCriticality::Optional, false, &log),
        ]);
        let requests = dispatch(&registry).unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(*log.lock().unwrap(), vec!["broken", "after"]);
    }

    #[test]
    fn critical_failure_aborts() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let registry = HookRegistry::new(vec![
            probe("guard", 0, HookCriticality::Critical, true, &log),
            probe("after", 1, HookCriticality::Important, false, &log),
        ]);
        let err = dispatch(&registry).unwrap_err();
        assert!(matches!(err, RuntimeError::Hook { hook: "guard", .. }));
        assert_eq!(*log.lock().unwrap(), vec!["guard"]);
    }

    #[test]
    fn default_hooks_are_ordered() {
        let names: Vec<_> = HookRegistry::default_hooks().hooks().collect();
        assert_eq!(names, vec![("reinforcement", 0), ("tracing", 100)]);
    }
}
