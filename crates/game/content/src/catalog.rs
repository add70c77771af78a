//! Built-in archetype catalog.
//!
//! Used when no `archetypes.ron` is supplied, and as the fixture for tests
//! across the workspace.

use hostile_core::{
    Archetype, ArchetypeError, ArchetypeTable, AttackId, BehaviorTag, BossProfile, PhaseBonus,
    ShipClass, WeaponProfile,
};

/// Archetype ids of the built-in catalog.
pub mod ids {
    pub const DRONE: &str = "drone";
    pub const INTERCEPTOR: &str = "interceptor";
    pub const RAIDER: &str = "raider";
    pub const SKIRMISHER: &str = "skirmisher";
    pub const SWARMER: &str = "swarmer";
    pub const WOLF: &str = "wolf";
    pub const DESTROYER: &str = "destroyer";
    pub const CRUISER: &str = "cruiser";
    pub const BATTLECRUISER: &str = "battlecruiser";
    pub const CARRIER: &str = "carrier";
    pub const HAULER: &str = "hauler";
    pub const DREADNOUGHT: &str = "dreadnought";
    pub const MOTHERSHIP: &str = "mothership";
}

/// Every built-in ship type.
pub fn builtin_archetypes() -> Result<ArchetypeTable, ArchetypeError> {
    let entries = vec![
        (
            ids::DRONE,
            Archetype::builder("Drone")
                .class(ShipClass::Drone)
                .defenses(0.0, 0.0, 8.0)
                .speed(3.2)
                .fire_interval(120)
                .damage(4.0)
                .rewards(25, 0)
                .behavior(BehaviorTag::Swarm)
                .build(),
        ),
        (
            ids::INTERCEPTOR,
            Archetype::builder("Interceptor")
                .defenses(10.0, 5.0, 15.0)
                .speed(2.4)
                .fire_interval(80)
                .rewards(100, 1)
                .build(),
        ),
        (
            ids::RAIDER,
            Archetype::builder("Raider")
                .defenses(15.0, 10.0, 20.0)
                .speed(3.0)
                .fire_interval(70)
                .damage(10.0)
                .rewards(150, 1)
                .behavior(BehaviorTag::Aggressive)
                .weapon(WeaponProfile::Scatter)
                .build(),
        ),
        (
            ids::SKIRMISHER,
            Archetype::builder("Skirmisher")
                .defenses(25.0, 5.0, 15.0)
                .speed(2.6)
                .fire_interval(75)
                .rewards(125, 1)
                .behavior(BehaviorTag::Evasive)
                .build(),
        ),
        (
            ids::SWARMER,
            Archetype::builder("Swarmer")
                .class(ShipClass::Drone)
                .defenses(0.0, 0.0, 10.0)
                .speed(3.5)
                .fire_interval(150)
                .damage(5.0)
                .rewards(40, 0)
                .behavior(BehaviorTag::Swarm)
                .build(),
        ),
        (
            ids::WOLF,
            Archetype::builder("Wolf")
                .defenses(20.0, 15.0, 25.0)
                .speed(2.5)
                .fire_interval(90)
                .rewards(175, 2)
                .behavior(BehaviorTag::Wolfpack)
                .build(),
        ),
        (
            ids::DESTROYER,
            Archetype::builder("Destroyer")
                .class(ShipClass::Destroyer)
                .defenses(60.0, 80.0, 80.0)
                .speed(1.6)
                .fire_interval(45)
                .damage(9.0)
                .rewards(400, 5)
                .behavior(BehaviorTag::Destroyer)
                .weapon(WeaponProfile::TripleBeam)
                .build(),
        ),
        (
            ids::CRUISER,
            Archetype::builder("Cruiser")
                .class(ShipClass::Cruiser)
                .defenses(120.0, 150.0, 150.0)
                .speed(1.2)
                .fire_interval(60)
                .damage(12.0)
                .rewards(800, 10)
                .behavior(BehaviorTag::Cruiser)
                .weapon(WeaponProfile::DualHeavy)
                .build(),
        ),
        (
            ids::BATTLECRUISER,
            Archetype::builder("Battlecruiser")
                .class(ShipClass::Battlecruiser)
                .defenses(200.0, 250.0, 250.0)
                .speed(0.9)
                .fire_interval(100)
                .damage(14.0)
                .rewards(1_500, 20)
                .behavior(BehaviorTag::Artillery)
                .weapon(WeaponProfile::HeavyPlasma)
                .build(),
        ),
        (
            ids::CARRIER,
            Archetype::builder("Carrier")
                .class(ShipClass::Cruiser)
                .defenses(150.0, 120.0, 180.0)
                .speed(0.7)
                .fire_interval(140)
                .rewards(900, 15)
                .behavior(BehaviorTag::DroneCarrier)
                .build(),
        ),
        (
            ids::HAULER,
            Archetype::builder("Hauler")
                .class(ShipClass::Industrial)
                .defenses(30.0, 60.0, 60.0)
                .speed(1.0)
                .damage(0.0)
                .rewards(200, 25)
                .behavior(BehaviorTag::Patrol)
                .weapon(WeaponProfile::None)
                .build(),
        ),
        (
            ids::DREADNOUGHT,
            Archetype::builder("Dreadnought")
                .defenses(800.0, 1_000.0, 1_200.0)
                .speed(1.0)
                .fire_interval(50)
                .damage(12.0)
                .rewards(10_000, 50)
                .behavior(BehaviorTag::Cruiser)
                .weapon(WeaponProfile::DualHeavy)
                .boss(BossProfile::new(
                    vec![AttackId::Spiral, AttackId::Doomsday, AttackId::Barrage],
                    PhaseBonus::FireRate(0.8),
                    8,
                ))
                .build(),
        ),
        (
            ids::MOTHERSHIP,
            Archetype::builder("Mothership")
                .defenses(1_200.0, 600.0, 1_000.0)
                .speed(0.8)
                .fire_interval(70)
                .damage(10.0)
                .rewards(12_000, 80)
                .behavior(BehaviorTag::Artillery)
                .weapon(WeaponProfile::Scatter)
                .boss(BossProfile::new(
                    vec![AttackId::LaserSweep, AttackId::Spiral, AttackId::Barrage],
                    PhaseBonus::Speed(1.2),
                    12,
                ))
                .build(),
        ),
    ];

    ArchetypeTable::from_entries(
        entries
            .into_iter()
            .map(|(id, archetype)| (id.to_string(), archetype)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_valid() {
        let table = builtin_archetypes().unwrap();
        assert_eq!(table.len(), 13);
        assert!(table.get(ids::DREADNOUGHT).unwrap().is_boss());
        assert!(table.get(ids::HAULER).unwrap().is_non_combat());
        assert!(!table.get(ids::CRUISER).unwrap().is_boss());
    }
}
