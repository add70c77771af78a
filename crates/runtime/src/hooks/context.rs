use hostile_core::{Difficulty, SimEvent, Tick, World};

/// Context passed to hooks for one event.
pub struct HookContext<'a> {
    pub event: &'a SimEvent,
    pub now: Tick,
    /// World after the step that produced the event.
    pub world: &'a World,
    /// Session difficulty, applied to reinforcements.
    pub difficulty: Difficulty,
}

impl<'a> HookContext<'a> {
    pub fn new(event: &'a SimEvent, now: Tick, world: &'a World, difficulty: Difficulty) -> Self {
        Self {
            event,
            now,
            world,
            difficulty,
        }
    }
}
