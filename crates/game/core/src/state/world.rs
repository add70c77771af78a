use glam::Vec2;

use super::{Entity, EntityHandle, SpawnError};
use crate::config::SimConfig;

#[derive(Clone, Debug, Default)]
struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

/// Arena of live entities addressed by generational handles.
///
/// Iteration runs in slot order, which together with the seeded RNG makes a
/// tick reproducible. Freed slots are reused last-in first-out.
#[derive(Clone, Debug)]
pub struct World {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    capacity: usize,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self::with_capacity(SimConfig::MAX_ENTITIES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Allocates a slot and stores the entity built for its handle.
    pub fn insert_with(
        &mut self,
        build: impl FnOnce(EntityHandle) -> Entity,
    ) -> Result<EntityHandle, SpawnError> {
        if self.live >= self.capacity {
            return Err(SpawnError::WorldFull { max: self.capacity });
        }
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        let handle = EntityHandle::new(index, slot.generation);
        slot.entity = Some(build(handle));
        self.live += 1;
        Ok(handle)
    }

    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: EntityHandle) -> Option<&Entity> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entity.as_ref())
    }

    pub fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut Entity> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entity.as_mut())
    }

    /// Removes an entity; its handle and every copy of it go stale.
    pub fn remove(&mut self, handle: EntityHandle) -> Option<Entity> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let entity = slot.entity.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.live -= 1;
        Some(entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.slots.iter().filter_map(|slot| slot.entity.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.slots.iter_mut().filter_map(|slot| slot.entity.as_mut())
    }

    /// Live handles in slot order.
    pub fn handles(&self) -> Vec<EntityHandle> {
        self.iter().map(|entity| entity.handle).collect()
    }

    /// Frozen positions of every live entity, read by followers during a tick.
    pub fn snapshot(&self) -> PositionSnapshot {
        PositionSnapshot {
            slots: self
                .slots
                .iter()
                .map(|slot| {
                    slot.entity
                        .as_ref()
                        .map(|entity| (slot.generation, entity.position()))
                })
                .collect(),
        }
    }
}

/// Start-of-tick positions, so follower updates do not depend on slot order.
#[derive(Clone, Debug, Default)]
pub struct PositionSnapshot {
    slots: Vec<Option<(u32, Vec2)>>,
}

impl PositionSnapshot {
    pub fn position(&self, handle: EntityHandle) -> Option<Vec2> {
        match self.slots.get(handle.index as usize) {
            Some(Some((generation, position))) if *generation == handle.generation => {
                Some(*position)
            }
            _ => None,
        }
    }
}
