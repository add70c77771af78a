//! High-level simulation driver.
//!
//! [`Simulation`] owns the entity world, the seeded RNG and the tick clock,
//! and exposes a builder-based API for clients to drive the core one step at
//! a time.

use std::sync::Arc;

use hostile_content::builtin_archetypes;
use hostile_core::{
    ArchetypeTable, Difficulty, EntityHandle, GameError, Hit, HitOutcome, PcgRng, SimConfig,
    SimEngine, SimEvent, SpawnRequest, Tick, TickInput, Vec2, World,
};
use tracing::{debug, warn};

use crate::error::{Result, RuntimeError};
use crate::hooks::{HookContext, HookRegistry, ReinforcementHook, SimHook};
use crate::report::{SimStats, TickReport};
use crate::scenario::Scenario;

/// Session configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub sim: SimConfig,
    /// Applied to scripted spawns and reinforcements.
    pub difficulty: Difficulty,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            difficulty: Difficulty::NORMAL,
            seed: 0,
        }
    }
}

/// Playback position inside a scenario.
struct ScriptCursor {
    scenario: Scenario,
    order: Vec<usize>,
    next: usize,
    /// Handle of each entry once spawned; `None` before or after a failed spawn.
    handles: Vec<Option<EntityHandle>>,
}

impl ScriptCursor {
    fn new(scenario: Scenario) -> Self {
        let order = scenario.schedule();
        let handles = vec![None; scenario.spawns.len()];
        Self {
            scenario,
            order,
            next: 0,
            handles,
        }
    }

    fn is_done(&self) -> bool {
        self.next >= self.order.len()
    }
}

/// Deterministic driver around [`SimEngine`].
///
/// One [`step`](Simulation::step) is one tick: due spawns are created, every
/// entity is advanced, and the resulting events are dispatched to hooks.
pub struct Simulation {
    config: SimulationConfig,
    archetypes: ArchetypeTable,
    world: World,
    rng: PcgRng,
    now: Tick,
    hooks: HookRegistry,
    script: Option<ScriptCursor>,
    /// Hook requests waiting for the next tick.
    pending: Vec<SpawnRequest>,
    stats: SimStats,
}

impl Simulation {
    /// Create a new simulation builder
    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::new()
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn archetypes(&self) -> &ArchetypeTable {
        &self.archetypes
    }

    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Reinforcements waiting for the next tick.
    pub fn pending_spawns(&self) -> &[SpawnRequest] {
        &self.pending
    }

    /// True once the scenario has played out and the world is empty.
    pub fn is_finished(&self) -> bool {
        let script_done = self.script.as_ref().is_none_or(ScriptCursor::is_done);
        script_done && self.pending.is_empty() && self.world.is_empty()
    }

    /// Spawns `request` immediately, at the current tick.
    ///
    /// The request is used as given; its difficulty is not replaced by the
    /// session difficulty.
    pub fn spawn(&mut self, request: &SpawnRequest) -> Result<EntityHandle> {
        let mut engine = SimEngine::new(&mut self.world, &self.archetypes, &self.config.sim);
        let handle = engine
            .spawn(request, self.now, &mut self.rng)
            .map_err(|source| RuntimeError::Spawn {
                archetype: request.archetype_id.clone(),
                source,
            })?;
        self.stats.spawned += 1;
        debug!(
            target: "runtime::simulation",
            tick = self.now.0,
            entity = %handle,
            archetype = %request.archetype_id,
            "Spawned entity"
        );
        Ok(handle)
    }

    /// Advances the simulation by one tick.
    ///
    /// Recoverable spawn failures (full world, dead leader) are logged and
    /// counted; anything else aborts the step.
    pub fn step(&mut self, player: Vec2) -> Result<TickReport> {
        self.now = self.now + 1;
        let mut report = TickReport {
            tick: self.now,
            ..TickReport::default()
        };

        for request in std::mem::take(&mut self.pending) {
            if let Some(handle) = self.try_spawn(&request)? {
                report.spawned.push(handle);
            }
        }
        self.spawn_scripted(&mut report)?;

        let output = {
            let mut engine = SimEngine::new(&mut self.world, &self.archetypes, &self.config.sim);
            engine.tick(TickInput::new(self.now, player), &mut self.rng)
        };
        report.projectiles = output.projectiles;
        report.events = output.events;

        for event in &report.events {
            self.stats.record(event);
            let mut requests = self.dispatch(event)?;
            self.pending.append(&mut requests);
        }

        self.stats.ticks += 1;
        self.stats.projectiles += report.projectiles.len() as u64;
        Ok(report)
    }

    /// Applies one hit to `handle`.
    ///
    /// Returns `Ok(None)` for a stale handle. A kill is recorded and
    /// dispatched to hooks like any tick event.
    pub fn apply_hit(&mut self, handle: EntityHandle, hit: Hit) -> Result<Option<HitOutcome>> {
        let outcome = {
            let mut engine = SimEngine::new(&mut self.world, &self.archetypes, &self.config.sim);
            engine.apply_hit(handle, hit)
        };
        if let Some(event) = outcome.as_ref().and_then(|o| o.destroyed) {
            self.stats.record(&event);
            let mut requests = self.dispatch(&event)?;
            self.pending.append(&mut requests);
        }
        Ok(outcome)
    }

    fn dispatch(&self, event: &SimEvent) -> Result<Vec<SpawnRequest>> {
        let ctx = HookContext::new(event, self.now, &self.world, self.config.difficulty);
        self.hooks.dispatch(&ctx)
    }

    fn try_spawn(&mut self, request: &SpawnRequest) -> Result<Option<EntityHandle>> {
        match self.spawn(request) {
            Ok(handle) => Ok(Some(handle)),
            Err(RuntimeError::Spawn { archetype, source }) if source.severity().is_recoverable() => {
                self.stats.spawn_failures += 1;
                warn!(
                    target: "runtime::simulation",
                    tick = self.now.0,
                    archetype = %archetype,
                    error = %source,
                    code = source.error_code(),
                    "Spawn skipped"
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn spawn_scripted(&mut self, report: &mut TickReport) -> Result<()> {
        let Some(mut script) = self.script.take() else {
            return Ok(());
        };
        let result = self.play_due(&mut script, report);
        self.script = Some(script);
        result
    }

    fn play_due(&mut self, script: &mut ScriptCursor, report: &mut TickReport) -> Result<()> {
        while let Some(&index) = script.order.get(script.next) {
            let spawn = &script.scenario.spawns[index];
            if spawn.at > self.now.0 {
                break;
            }
            let follow = spawn.follow;
            let mut request = SpawnRequest::new(spawn.archetype.clone(), spawn.position)
                .edge(spawn.edge)
                .difficulty(self.config.difficulty);
            script.next += 1;

            if let Some(follow) = follow {
                let Some(leader) = script.handles[follow.leader] else {
                    self.stats.spawn_failures += 1;
                    warn!(
                        target: "runtime::simulation",
                        tick = self.now.0,
                        spawn = index,
                        leader = follow.leader,
                        "Scripted leader never spawned, skipping follower"
                    );
                    continue;
                };
                request = request.follow(leader, follow.offset);
            }

            script.handles[index] = self.try_spawn(&request)?;
            if let Some(handle) = script.handles[index] {
                report.spawned.push(handle);
            }
        }
        Ok(())
    }
}

/// Builder for [`Simulation`] with flexible configuration.
pub struct SimulationBuilder {
    config: SimulationConfig,
    archetypes: Option<ArchetypeTable>,
    hooks: Option<HookRegistry>,
    extra_hooks: Vec<Arc<dyn SimHook>>,
    reinforcements: ReinforcementHook,
    scenario: Option<Scenario>,
    capacity: usize,
}

impl SimulationBuilder {
    fn new() -> Self {
        Self {
            config: SimulationConfig::default(),
            archetypes: None,
            hooks: None,
            extra_hooks: Vec::new(),
            reinforcements: ReinforcementHook::default(),
            scenario: None,
            capacity: SimConfig::MAX_ENTITIES,
        }
    }

    /// Override the whole session configuration
    pub fn config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the core tuning only
    pub fn sim_config(mut self, sim: SimConfig) -> Self {
        self.config.sim = sim;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.config.difficulty = difficulty.sanitized();
        self
    }

    /// Set the archetype table (defaults to the built-in catalog)
    pub fn archetypes(mut self, archetypes: ArchetypeTable) -> Self {
        self.archetypes = Some(archetypes);
        self
    }

    /// Archetypes used for boss summons and carrier drones.
    ///
    /// Ignored when a custom hook registry is supplied.
    pub fn reinforcements(
        mut self,
        summon_archetype: impl Into<String>,
        drone_archetype: impl Into<String>,
    ) -> Self {
        self.reinforcements = ReinforcementHook::new(summon_archetype, drone_archetype);
        self
    }

    /// Replace the hook registry entirely.
    ///
    /// If not provided, the default hooks (reinforcement, tracing) are used.
    pub fn hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Add a hook on top of the registry in use.
    pub fn hook(mut self, hook: Arc<dyn SimHook>) -> Self {
        self.extra_hooks.push(hook);
        self
    }

    pub fn scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = Some(scenario);
        self
    }

    /// Upper bound on simultaneously live entities
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn build(self) -> Result<Simulation> {
        let archetypes = match self.archetypes {
            Some(table) => table,
            None => builtin_archetypes()?,
        };

        let mut hooks = match self.hooks {
            Some(hooks) => hooks,
            None => {
                for id in [
                    self.reinforcements.summon_archetype(),
                    self.reinforcements.drone_archetype(),
                ] {
                    if !archetypes.contains(id) {
                        return Err(RuntimeError::UnknownReinforcement(id.to_string()));
                    }
                }
                HookRegistry::with_reinforcements(self.reinforcements)
            }
        };
        for hook in self.extra_hooks {
            hooks.register(hook);
        }

        if let Some(scenario) = &self.scenario {
            scenario.validate(&archetypes)?;
            debug!(
                target: "runtime::simulation",
                scenario = %scenario.name,
                spawns = scenario.spawns.len(),
                "Scenario loaded"
            );
        }

        Ok(Simulation {
            rng: PcgRng::new(self.config.seed),
            config: self.config,
            archetypes,
            world: World::with_capacity(self.capacity),
            now: Tick::ZERO,
            hooks,
            script: self.scenario.map(ScriptCursor::new),
            pending: Vec::new(),
            stats: SimStats::default(),
        })
    }
}
