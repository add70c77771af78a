//! Scripted player and session loop.

use std::fmt;

use hostile_content::ids;
use hostile_core::{Bounds, EntityHandle, Hit, SpawnEdge, Vec2, World};
use hostile_runtime::{Result, Scenario, ScriptedSpawn, SimStats, Simulation};

use crate::config::HitConfig;

/// Player stand-in that strafes along the bottom of the screen.
#[derive(Clone, Copy, Debug)]
pub struct ScriptedPlayer {
    bounds: Bounds,
    /// Pixels per tick.
    speed: f32,
}

impl ScriptedPlayer {
    const ROW: f32 = 0.9;
    const INSET: f32 = 0.1;

    pub fn new(bounds: Bounds, speed: f32) -> Self {
        Self { bounds, speed }
    }

    /// Triangle wave between the insets.
    pub fn position(&self, tick: u64) -> Vec2 {
        let left = self.bounds.x_at(Self::INSET);
        let span = (self.bounds.x_at(1.0 - Self::INSET) - left).max(1.0);
        let travel = (tick as f32 * self.speed) % (2.0 * span);
        let x = if travel <= span { travel } else { 2.0 * span - travel };
        Vec2::new(left + x, self.bounds.y_at(Self::ROW))
    }
}

/// Closest on-screen entity to `from`.
pub fn nearest_target(world: &World, bounds: &Bounds, from: Vec2) -> Option<EntityHandle> {
    world
        .iter()
        .filter(|entity| bounds.contains(entity.position()))
        .min_by(|a, b| {
            a.position()
                .distance_squared(from)
                .total_cmp(&b.position().distance_squared(from))
        })
        .map(|entity| entity.handle)
}

/// Demo wave: a formation, raiders, a flanking pack, capital ships and a boss.
pub fn demo_scenario() -> Scenario {
    let mut spawns = vec![ScriptedSpawn::new(0, ids::INTERCEPTOR, Vec2::new(400.0, -30.0))];
    for (dx, dy) in [(-40.0, -20.0), (40.0, -20.0), (-80.0, -40.0), (80.0, -40.0)] {
        spawns.push(
            ScriptedSpawn::new(0, ids::INTERCEPTOR, Vec2::new(400.0 + dx, -30.0 + dy))
                .follow(0, Vec2::new(dx, dy)),
        );
    }
    spawns.extend([
        ScriptedSpawn::new(120, ids::RAIDER, Vec2::new(200.0, -30.0)),
        ScriptedSpawn::new(140, ids::RAIDER, Vec2::new(600.0, -30.0)),
        ScriptedSpawn::new(240, ids::WOLF, Vec2::new(60.0, 620.0)).edge(SpawnEdge::BottomLeft),
        ScriptedSpawn::new(240, ids::WOLF, Vec2::new(740.0, 620.0)).edge(SpawnEdge::BottomRight),
        ScriptedSpawn::new(300, ids::SKIRMISHER, Vec2::new(-30.0, 120.0)).edge(SpawnEdge::Left),
        ScriptedSpawn::new(360, ids::HAULER, Vec2::new(300.0, -30.0)),
        ScriptedSpawn::new(480, ids::DESTROYER, Vec2::new(400.0, -40.0)),
        ScriptedSpawn::new(600, ids::CARRIER, Vec2::new(250.0, -40.0)),
        ScriptedSpawn::new(720, ids::BATTLECRUISER, Vec2::new(550.0, -40.0)),
        ScriptedSpawn::new(900, ids::CRUISER, Vec2::new(400.0, -40.0)),
        ScriptedSpawn::new(1_200, ids::DREADNOUGHT, Vec2::new(400.0, -60.0)),
    ]);
    Scenario::new("demo", spawns)
}

/// Session outcome printed by the binary.
#[derive(Clone, Copy, Debug)]
pub struct Summary {
    pub ticks: u64,
    pub live: usize,
    pub hits: u64,
    pub stats: SimStats,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.stats;
        writeln!(f, "ticks:          {}", self.ticks)?;
        writeln!(f, "spawned:        {} ({} skipped)", s.spawned, s.spawn_failures)?;
        writeln!(f, "live at end:    {}", self.live)?;
        writeln!(f, "projectiles:    {}", s.projectiles)?;
        writeln!(f, "hits landed:    {}", self.hits)?;
        writeln!(f, "destroyed:      {} (score {}, refugees {})", s.destroyed, s.score, s.refugees)?;
        writeln!(f, "departed:       {}", s.departed)?;
        writeln!(f, "boss phases:    {}", s.phase_changes)?;
        writeln!(f, "enrages:        {}", s.enrages)?;
        writeln!(f, "specials:       {}", s.specials)?;
        write!(f, "reinforcements: {} summons, {} drones", s.summons, s.drones)
    }
}

/// Runs `ticks` steps, landing a hit on the nearest enemy every `hits.interval`.
///
/// Stops early once the scenario has played out and the field is clear.
pub fn run(sim: &mut Simulation, ticks: u64, hits: HitConfig) -> Result<Summary> {
    let bounds = Bounds::from_config(&sim.config().sim);
    let player = ScriptedPlayer::new(bounds, 3.0);
    let hit = Hit::new(hits.damage, hits.shield_mult, hits.armor_mult);
    let mut landed = 0;

    for _ in 0..ticks {
        let at = player.position(sim.now().0);
        sim.step(at)?;

        if sim.now().0 % hits.interval.max(1) == 0 {
            if let Some(target) = nearest_target(sim.world(), &bounds, at) {
                if sim.apply_hit(target, hit)?.is_some() {
                    landed += 1;
                }
            }
        }
        if sim.is_finished() {
            break;
        }
    }

    Ok(Summary {
        ticks: sim.now().0,
        live: sim.world().len(),
        hits: landed,
        stats: *sim.stats(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(800.0, 600.0, 64.0)
    }

    #[test]
    fn player_strafes_inside_insets() {
        let player = ScriptedPlayer::new(bounds(), 3.0);
        let xs: Vec<f32> = (0..1_000).map(|t| player.position(t).x).collect();
        assert!(xs.iter().all(|x| (80.0..=720.0).contains(x)));
        assert!(xs.iter().any(|x| *x > 700.0));
        assert_eq!(player.position(0).y, 540.0);
    }

    #[test]
    fn demo_scenario_is_valid() {
        let table = hostile_content::builtin_archetypes().unwrap();
        demo_scenario().validate(&table).unwrap();
    }

    #[test]
    fn harness_lands_hits_and_kills() {
        let mut sim = Simulation::builder()
            .seed(4)
            .scenario(demo_scenario())
            .build()
            .unwrap();
        let summary = run(&mut sim, 900, HitConfig::default()).unwrap();
        assert_eq!(summary.ticks, 900);
        assert!(summary.hits > 0);
        assert!(summary.stats.destroyed > 0);
        assert!(summary.stats.projectiles > 0);
    }
}
