//! Per-tick simulation of hostile entities.
//!
//! [`SimEngine`] borrows the [`World`] for the duration of one operation and
//! is the only place entities are created, advanced, damaged or removed.
//! The archetype table and config are read-only inputs; randomness comes
//! from the caller's seeded [`RngSource`](crate::env::RngSource), so a run
//! is reproducible from its seed.

mod events;
mod spawn;
mod tick;

pub use events::{HitOutcome, SimEvent, TickOutput};
pub use spawn::SpawnRequest;
pub use tick::TickInput;

use crate::combat::Hit;
use crate::config::SimConfig;
use crate::env::ArchetypeTable;
use crate::state::{EntityHandle, World};
use crate::tactical::TacticalCoordinator;

pub struct SimEngine<'a> {
    world: &'a mut World,
    archetypes: &'a ArchetypeTable,
    config: &'a SimConfig,
}

impl<'a> SimEngine<'a> {
    pub fn new(world: &'a mut World, archetypes: &'a ArchetypeTable, config: &'a SimConfig) -> Self {
        Self {
            world,
            archetypes,
            config,
        }
    }

    /// Applies one incoming hit through the defense cascade.
    ///
    /// Returns `None` for a stale handle. A killing hit removes the entity,
    /// clears the leader link of its followers and carries the reward.
    pub fn apply_hit(&mut self, handle: EntityHandle, hit: Hit) -> Option<HitOutcome> {
        let entity = self.world.get_mut(handle)?;
        let report = entity.defense.take_hit(hit);
        if !report.destroyed {
            return Some(HitOutcome {
                report,
                destroyed: None,
                released_followers: 0,
            });
        }

        let entity = self.world.remove(handle)?;
        let released_followers = TacticalCoordinator::release_followers(self.world, handle);
        Some(HitOutcome {
            report,
            destroyed: Some(SimEvent::Destroyed {
                entity: handle,
                score: entity.stats.score,
                refugees: entity.stats.refugees,
            }),
            released_followers,
        })
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::boss::AttackId;
    use crate::env::{
        Archetype, BehaviorTag, BossProfile, Difficulty, PcgRng, PhaseBonus, ShipClass,
        WeaponProfile,
    };
    use crate::movement::{self, Diagonal, Drift, PatternId, PatternState};
    use crate::state::{SpawnError, Tick};
    use crate::tactical::{SpawnEdge, TacticalRole};

    fn table() -> ArchetypeTable {
        let mut table = ArchetypeTable::new();
        let entries = [
            (
                "frigate",
                Archetype::builder("Frigate")
                    .defenses(20.0, 10.0, 30.0)
                    .speed(2.0)
                    .fire_interval(30)
                    .rewards(100, 2)
                    .build(),
            ),
            (
                "hauler",
                Archetype::builder("Hauler")
                    .class(ShipClass::Industrial)
                    .behavior(BehaviorTag::Patrol)
                    .weapon(WeaponProfile::None)
                    .speed(3.0)
                    .build(),
            ),
            (
                "carrier",
                Archetype::builder("Carrier")
                    .behavior(BehaviorTag::DroneCarrier)
                    .speed(0.5)
                    .build(),
            ),
            (
                "boss",
                Archetype::builder("Dreadnought")
                    .defenses(100.0, 100.0, 100.0)
                    .behavior(BehaviorTag::Cruiser)
                    .speed(1.0)
                    .boss(BossProfile::new(
                        vec![AttackId::Spiral, AttackId::Doomsday],
                        PhaseBonus::FireRate(0.8),
                        6,
                    ))
                    .build(),
            ),
        ];
        for (id, archetype) in entries {
            table.insert(id, archetype).expect("valid archetype");
        }
        table
    }

    fn player() -> Vec2 {
        Vec2::new(400.0, 550.0)
    }

    #[test]
    fn unknown_archetype_is_rejected_without_mutation() {
        let (table, config) = (table(), SimConfig::default());
        let mut world = World::new();
        let mut rng = PcgRng::new(1);
        let mut engine = SimEngine::new(&mut world, &table, &config);
        let err = engine
            .spawn(&SpawnRequest::new("ghost", Vec2::ZERO), Tick(0), &mut rng)
            .unwrap_err();
        assert_eq!(err, SpawnError::UnknownArchetype("ghost".into()));
        assert!(world.is_empty());
    }

    #[test]
    fn full_world_rejects_spawn() {
        let (table, config) = (table(), SimConfig::default());
        let mut world = World::with_capacity(1);
        let mut rng = PcgRng::new(1);
        let mut engine = SimEngine::new(&mut world, &table, &config);
        let request = SpawnRequest::new("frigate", Vec2::new(100.0, 100.0));
        engine.spawn(&request, Tick(0), &mut rng).unwrap();
        assert_eq!(
            engine.spawn(&request, Tick(0), &mut rng),
            Err(SpawnError::WorldFull { max: 1 })
        );
    }

    #[test]
    fn difficulty_scales_stats_at_spawn() {
        let (table, config) = (table(), SimConfig::default());
        let mut world = World::new();
        let mut rng = PcgRng::new(1);
        let mut engine = SimEngine::new(&mut world, &table, &config);
        let request = SpawnRequest::new("frigate", Vec2::new(100.0, 100.0))
            .difficulty(Difficulty::new(2.0, 1.5, 0.5, 1.25));
        let handle = engine.spawn(&request, Tick(0), &mut rng).unwrap();
        let entity = world.get(handle).unwrap();
        assert_eq!(entity.defense.max_total(), 120.0);
        assert_eq!(entity.stats.speed, 2.5);
        assert_eq!(entity.stats.damage, 12.0);
        assert_eq!(entity.fire.cooldown(1.0), 15.0);
    }

    #[test]
    fn flank_spawn_forces_flanking_and_upward_velocity() {
        let (table, config) = (table(), SimConfig::default());
        let mut world = World::new();
        let mut rng = PcgRng::new(1);
        let mut engine = SimEngine::new(&mut world, &table, &config);
        let request = SpawnRequest::new("boss", Vec2::new(40.0, 630.0)).edge(SpawnEdge::BottomLeft);
        let handle = engine.spawn(&request, Tick(0), &mut rng).unwrap();
        let entity = world.get(handle).unwrap();
        assert_eq!(entity.pattern.id(), PatternId::Flanking);
        assert_eq!(entity.role, TacticalRole::Flanker);
        assert!(entity.transform.velocity.y < 0.0 && entity.transform.velocity.x > 0.0);
    }

    #[test]
    fn destroying_leader_degrades_followers_without_teleport() {
        let (table, config) = (table(), SimConfig::default());
        let mut world = World::new();
        let mut rng = PcgRng::new(7);
        let mut engine = SimEngine::new(&mut world, &table, &config);
        let leader = engine
            .spawn(&SpawnRequest::new("frigate", Vec2::new(400.0, 100.0)), Tick(0), &mut rng)
            .unwrap();
        let follower = engine
            .spawn(
                &SpawnRequest::new("frigate", Vec2::new(380.0, 80.0)).follow(leader, Vec2::new(-30.0, -20.0)),
                Tick(0),
                &mut rng,
            )
            .unwrap();
        for now in 1..30 {
            engine.tick(TickInput::new(Tick(now), player()), &mut rng);
        }

        let outcome = engine.apply_hit(leader, Hit::plain(1_000.0)).unwrap();
        assert!(outcome.report.destroyed);
        assert_eq!(outcome.released_followers, 1);
        assert!(matches!(outcome.destroyed, Some(SimEvent::Destroyed { score: 100, refugees: 2, .. })));

        let before = world.get(follower).unwrap().transform;
        let mut engine = SimEngine::new(&mut world, &table, &config);
        engine.tick(TickInput::new(Tick(30), player()), &mut rng);
        let after = world.get(follower).unwrap();
        assert_eq!(after.pattern.id(), PatternId::Diagonal);
        assert!((after.transform.position - before.position).length() <= before.velocity.length() + 1e-4);
        assert!(world.get(leader).is_none());
    }

    #[test]
    fn follower_crosses_the_seam_with_a_wrapping_leader() {
        let (table, config) = (table(), SimConfig::default());
        let mut world = World::new();
        let mut rng = PcgRng::new(3);
        let mut engine = SimEngine::new(&mut world, &table, &config);
        let leader = engine
            .spawn(&SpawnRequest::new("frigate", Vec2::new(400.0, 500.0)), Tick(0), &mut rng)
            .unwrap();
        let follower = engine
            .spawn(
                &SpawnRequest::new("frigate", Vec2::new(400.0, 480.0)).follow(leader, Vec2::new(0.0, -20.0)),
                Tick(0),
                &mut rng,
            )
            .unwrap();
        world.get_mut(leader).unwrap().pattern = PatternState::Diagonal(Diagonal {
            velocity: Vec2::new(0.0, 3.0),
        });

        let mut leader_wrapped = false;
        let mut max_vy = 0.0_f32;
        for now in 1..=200 {
            SimEngine::new(&mut world, &table, &config).tick(TickInput::new(Tick(now), player()), &mut rng);
            leader_wrapped |= world.get(leader).unwrap().transform.position.y < 0.0;
            max_vy = max_vy.max(world.get(follower).unwrap().transform.velocity.y.abs());
        }

        assert!(leader_wrapped);
        assert!(max_vy < 6.0, "follower reached |vy| = {max_vy}");
        let slot = world.get(leader).unwrap().transform.position + Vec2::new(0.0, -20.0);
        assert!(world.get(follower).unwrap().transform.position.distance(slot) < 20.0);
        assert_eq!(world.get(follower).unwrap().pattern.id(), PatternId::Formation);
    }

    #[test]
    fn flank_edge_overrides_formation_slot() {
        let (table, config) = (table(), SimConfig::default());
        let mut world = World::new();
        let mut rng = PcgRng::new(1);
        let mut engine = SimEngine::new(&mut world, &table, &config);
        let leader = engine
            .spawn(&SpawnRequest::new("frigate", Vec2::new(400.0, 100.0)), Tick(0), &mut rng)
            .unwrap();
        let flanker = engine
            .spawn(
                &SpawnRequest::new("frigate", Vec2::new(60.0, 630.0))
                    .edge(SpawnEdge::BottomLeft)
                    .follow(leader, Vec2::new(-30.0, -20.0)),
                Tick(0),
                &mut rng,
            )
            .unwrap();
        let entity = world.get(flanker).unwrap();
        assert_eq!(entity.role, TacticalRole::Flanker);
        assert_eq!(entity.pattern.id(), PatternId::Flanking);
        assert!(entity.transform.velocity.y < 0.0);
        assert_eq!(world.get(leader).unwrap().role, TacticalRole::None);
    }

    #[test]
    fn formation_and_diagonal_turn_faster_than_free_flight() {
        let (table, config) = (table(), SimConfig::default());
        let mut world = World::new();
        let mut rng = PcgRng::new(1);
        let mut engine = SimEngine::new(&mut world, &table, &config);
        let handle = engine
            .spawn(&SpawnRequest::new("frigate", Vec2::new(100.0, 100.0)), Tick(0), &mut rng)
            .unwrap();
        let entity = world.get_mut(handle).unwrap();

        let patterns = [
            (PatternState::Formation, 13.5),
            (PatternState::Diagonal(Diagonal { velocity: Vec2::Y }), 13.5),
            (PatternState::Drift(Drift::new(&mut rng)), 7.2),
        ];
        for (pattern, expected) in patterns {
            entity.pattern = pattern;
            entity.transform.facing = 0.0;
            entity.transform.velocity = Vec2::new(0.0, 2.0);
            movement::update_facing(entity);
            assert!(
                (entity.transform.facing - expected).abs() < 1e-4,
                "{:?} turned to {}",
                entity.pattern.id(),
                entity.transform.facing
            );
        }
    }

    #[test]
    fn stale_handle_hit_is_ignored() {
        let (table, config) = (table(), SimConfig::default());
        let mut world = World::new();
        let mut rng = PcgRng::new(1);
        let mut engine = SimEngine::new(&mut world, &table, &config);
        let handle = engine
            .spawn(&SpawnRequest::new("frigate", Vec2::new(100.0, 100.0)), Tick(0), &mut rng)
            .unwrap();
        engine.apply_hit(handle, Hit::plain(500.0)).unwrap();
        assert!(engine.apply_hit(handle, Hit::plain(1.0)).is_none());

        // the freed slot is reused under a new generation
        let reused = engine
            .spawn(&SpawnRequest::new("frigate", Vec2::new(100.0, 100.0)), Tick(0), &mut rng)
            .unwrap();
        assert_eq!(reused.index, handle.index);
        assert_ne!(reused.generation, handle.generation);
    }

    #[test]
    fn regular_fire_waits_for_screen_and_cooldown() {
        let (table, config) = (table(), SimConfig::default());
        let mut world = World::new();
        let mut rng = PcgRng::new(1);
        let mut engine = SimEngine::new(&mut world, &table, &config);
        let offscreen = engine
            .spawn(&SpawnRequest::new("frigate", Vec2::new(-500.0, -500.0)), Tick(0), &mut rng)
            .unwrap();
        let out = engine.tick(TickInput::new(Tick(100), player()), &mut rng);
        assert!(out.projectiles.is_empty());
        assert!(world.get(offscreen).is_some());

        let mut world = World::new();
        let mut engine = SimEngine::new(&mut world, &table, &config);
        engine
            .spawn(&SpawnRequest::new("frigate", Vec2::new(400.0, 200.0)), Tick(0), &mut rng)
            .unwrap();
        let volleys: usize = (1..=61)
            .map(|now| {
                let out = engine.tick(TickInput::new(Tick(now), player()), &mut rng);
                usize::from(!out.projectiles.is_empty())
            })
            .sum();
        // interval 30 with a strict gate: ticks 31 and 62 would fire, so one in range
        assert_eq!(volleys, 1);
    }

    #[test]
    fn hauler_departs_after_crossing() {
        let (table, config) = (table(), SimConfig::default());
        let mut world = World::new();
        let mut rng = PcgRng::new(1);
        let mut engine = SimEngine::new(&mut world, &table, &config);
        let hauler = engine
            .spawn(&SpawnRequest::new("hauler", Vec2::new(400.0, -20.0)), Tick(0), &mut rng)
            .unwrap();
        let mut departed = false;
        for now in 1..2_000 {
            let out = engine.tick(TickInput::new(Tick(now), player()), &mut rng);
            assert!(out.projectiles.is_empty());
            if out.events.contains(&SimEvent::Departed { entity: hauler }) {
                departed = true;
                break;
            }
        }
        assert!(departed);
        assert!(world.is_empty());
    }

    #[test]
    fn carrier_requests_drones_periodically() {
        let (table, config) = (table(), SimConfig::default());
        let mut world = World::new();
        let mut rng = PcgRng::new(1);
        let mut engine = SimEngine::new(&mut world, &table, &config);
        engine
            .spawn(&SpawnRequest::new("carrier", Vec2::new(400.0, 50.0)), Tick(0), &mut rng)
            .unwrap();
        let requests = (1..=config.drone_interval as u64 * 2)
            .flat_map(|now| engine.tick(TickInput::new(Tick(now), player()), &mut rng).events)
            .filter(|event| matches!(event, SimEvent::DroneSpawnRequested { .. }))
            .count();
        assert_eq!(requests, 2);
    }

    #[test]
    fn boss_phase_events_follow_damage() {
        let (table, config) = (table(), SimConfig::default());
        let mut world = World::new();
        let mut rng = PcgRng::new(1);
        let mut engine = SimEngine::new(&mut world, &table, &config);
        let boss = engine
            .spawn(&SpawnRequest::new("boss", Vec2::new(400.0, 150.0)), Tick(0), &mut rng)
            .unwrap();

        // 300 total; drop straight to 25% to skip phase 1
        engine.apply_hit(boss, Hit::plain(225.0)).unwrap();
        let out = engine.tick(TickInput::new(Tick(1), player()), &mut rng);
        let phases: Vec<u8> = out
            .events
            .iter()
            .filter_map(|event| match event {
                SimEvent::PhaseChanged { phase, .. } => Some(*phase),
                _ => None,
            })
            .collect();
        assert_eq!(phases, vec![1, 2]);
        assert!(!out.events.iter().any(|event| matches!(event, SimEvent::Enraged { .. })));

        engine.apply_hit(boss, Hit::plain(20.0)).unwrap();
        let out = engine.tick(TickInput::new(Tick(2), player()), &mut rng);
        assert!(out.events.iter().any(|event| matches!(event, SimEvent::Enraged { .. })));
        let drones = out
            .events
            .iter()
            .filter(|event| matches!(event, SimEvent::DroneSpawnRequested { .. }))
            .count();
        assert_eq!(drones, config.enrage_drone_burst as usize);

        let entity = world.get(boss).unwrap();
        let state = entity.boss.as_ref().unwrap();
        assert!(state.enraged);
        assert!((state.fire_factor - 0.8 * 0.8 * 0.5).abs() < 1e-6);
        assert!((entity.effective_speed() - 1.5).abs() < 1e-6);
    }
}
