use super::{SimEngine, SimEvent, TickOutput};
use crate::boss::AttackContext;
use crate::combat::weapon_volley;
use crate::config::SimConfig;
use crate::env::{BehaviorTag, RngSource};
use crate::movement::{self, Bounds, MoveContext, MoveOutcome};
use crate::state::{Entity, PositionSnapshot, Tick};
use crate::tactical::TacticalCoordinator;

use glam::Vec2;

/// Read-only per-tick input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickInput {
    pub now: Tick,
    pub player: Vec2,
}

impl TickInput {
    pub fn new(now: Tick, player: Vec2) -> Self {
        Self { now, player }
    }
}

/// Offset of a carrier's launch bay from its center.
const DRONE_BAY_OFFSET: Vec2 = Vec2::new(0.0, 24.0);

impl SimEngine<'_> {
    /// Advances every entity by one tick, in slot order.
    ///
    /// Per entity: movement, facing, boss phase and specials, carrier
    /// launches, then the regular fire gate.
    pub fn tick(&mut self, input: TickInput, rng: &mut impl RngSource) -> TickOutput {
        let snapshot = self.world.snapshot();
        let bounds = Bounds::from_config(self.config);
        let mut out = TickOutput::default();
        let mut departed = Vec::new();

        for handle in self.world.handles() {
            let Some(entity) = self.world.get_mut(handle) else {
                continue;
            };
            let ctx = move_context(entity, &snapshot, input.player, bounds);
            if movement::advance(entity, &ctx, rng) == MoveOutcome::Departed {
                departed.push(handle);
                continue;
            }
            movement::update_facing(entity);
            update_boss(entity, input.player, &bounds, self.config, rng, &mut out);
            update_carrier(entity, &bounds, self.config, &mut out);
            update_fire(entity, input, &bounds, rng, &mut out);
        }

        for handle in departed {
            if self.world.remove(handle).is_some() {
                TacticalCoordinator::release_followers(self.world, handle);
                out.events.push(SimEvent::Departed { entity: handle });
            }
        }
        out
    }
}

fn move_context(entity: &Entity, snapshot: &PositionSnapshot, player: Vec2, bounds: Bounds) -> MoveContext {
    let leader = entity
        .role
        .follower_link()
        .and_then(|link| link.leader)
        .and_then(|leader| snapshot.position(leader));
    MoveContext {
        player,
        leader,
        health_fraction: entity.health_fraction(),
        bounds,
    }
}

fn update_boss(
    entity: &mut Entity,
    player: Vec2,
    bounds: &Bounds,
    config: &SimConfig,
    rng: &mut impl RngSource,
    out: &mut TickOutput,
) {
    let handle = entity.handle;
    let on_screen = bounds.contains(entity.position());
    let Entity {
        boss: Some(boss),
        boss_profile: Some(profile),
        transform,
        defense,
        stats,
        ..
    } = entity
    else {
        return;
    };

    let mut signals = Vec::new();
    boss.check_phase(defense.health_fraction(), profile, transform.position, config, &mut signals);
    // specials wait until the boss is on screen
    if on_screen {
        let ctx = AttackContext {
            origin: transform.position,
            player,
            phase: boss.phase,
            damage: stats.damage,
            spiral_phase: boss.spiral_phase,
            sweep_time: boss.sweep_time,
        };
        boss.update_attacks(ctx, profile, config, rng, &mut out.projectiles, &mut signals);
    }
    out.events
        .extend(signals.into_iter().map(|signal| SimEvent::from_signal(handle, signal)));
}

fn update_carrier(entity: &mut Entity, bounds: &Bounds, config: &SimConfig, out: &mut TickOutput) {
    if entity.stats.behavior != BehaviorTag::DroneCarrier || !bounds.contains(entity.position()) {
        return;
    }
    entity.drone_timer += 1;
    if entity.drone_timer >= config.drone_interval {
        entity.drone_timer = 0;
        let at = entity.position() + DRONE_BAY_OFFSET;
        out.events.push(SimEvent::DroneSpawnRequested {
            entity: entity.handle,
            x: at.x,
            y: at.y,
        });
    }
}

fn update_fire(
    entity: &mut Entity,
    input: TickInput,
    bounds: &Bounds,
    rng: &mut impl RngSource,
    out: &mut TickOutput,
) {
    if entity.stats.non_combat || !entity.pattern.weapons_free() || !bounds.contains(entity.position()) {
        return;
    }
    if !entity.fire.can_fire(input.now, entity.fire_factor()) {
        return;
    }
    let volley = entity.fire.record(input.now);
    out.projectiles.extend(weapon_volley(
        entity.stats.weapon,
        entity.position(),
        input.player,
        entity.stats.damage,
        volley,
        rng,
    ));
}
