//! Per-step output and running totals.

use hostile_core::{EntityHandle, ProjectileDescriptor, SimEvent, Tick};

/// Everything one [`Simulation::step`](crate::Simulation::step) produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub tick: Tick,
    /// Entities created at the start of this tick (scripted and reinforcements).
    pub spawned: Vec<EntityHandle>,
    pub projectiles: Vec<ProjectileDescriptor>,
    pub events: Vec<SimEvent>,
}

impl TickReport {
    pub fn count(&self, kind: &str) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

/// Session totals for the harness summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    pub ticks: u64,
    pub spawned: u64,
    pub spawn_failures: u64,
    pub projectiles: u64,
    pub destroyed: u64,
    pub departed: u64,
    pub score: u64,
    pub refugees: u64,
    pub phase_changes: u64,
    pub enrages: u64,
    pub specials: u64,
    pub summons: u64,
    pub drones: u64,
}

impl SimStats {
    pub fn record(&mut self, event: &SimEvent) {
        match *event {
            SimEvent::PhaseChanged { .. } => self.phase_changes += 1,
            SimEvent::Enraged { .. } => self.enrages += 1,
            SimEvent::AttackStarted { .. } => self.specials += 1,
            SimEvent::SummonRequested { .. } => self.summons += 1,
            SimEvent::DroneSpawnRequested { .. } => self.drones += 1,
            SimEvent::Destroyed {
                score, refugees, ..
            } => {
                self.destroyed += 1;
                self.score += u64::from(score);
                self.refugees += u64::from(refugees);
            }
            SimEvent::Departed { .. } => self.departed += 1,
        }
    }
}
