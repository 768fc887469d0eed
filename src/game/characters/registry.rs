// Generational character registry
//
// Ids carry the generation of the slot they were issued for. Once a
// character is removed its slot's generation moves on, so every id that
// still points at it stops resolving instead of aliasing whoever reuses
// the slot.

use std::fmt;

use super::character::Character;

/// Weak, copyable handle to a character in a [`CharacterRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharacterId {
    index: u32,
    generation: u32,
}

impl CharacterId {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    character: Option<Character>,
}

/// Owns every live character in the arena
#[derive(Debug, Default)]
pub struct CharacterRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl CharacterRegistry {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Insert a character built for the id it is about to receive
    pub fn insert_with(&mut self, build: impl FnOnce(CharacterId) -> Character) -> CharacterId {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    character: None,
                });
                (self.slots.len() - 1) as u32
            }
        };

        let slot = &mut self.slots[index as usize];
        let id = CharacterId::new(index, slot.generation);
        slot.character = Some(build(id));
        id
    }

    /// Get a character by id; `None` once it has been removed
    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.character.as_ref())
    }

    /// Get a mutable character by id; `None` once it has been removed
    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.character.as_mut())
    }

    /// Check whether an id still resolves
    pub fn contains(&self, id: CharacterId) -> bool {
        self.get(id).is_some()
    }

    /// Remove a character, invalidating every copy of its id
    pub fn remove(&mut self, id: CharacterId) -> Option<Character> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)?;
        let character = slot.character.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(character)
    }

    /// Ids of all live characters, in slot order
    pub fn ids(&self) -> Vec<CharacterId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.character.is_some())
            .map(|(index, slot)| CharacterId::new(index as u32, slot.generation))
            .collect()
    }

    /// Iterate over all live characters
    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.slots.iter().filter_map(|slot| slot.character.as_ref())
    }

    /// Get the number of characters
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Get the number of characters that have not started dying
    pub fn alive_count(&self) -> usize {
        self.iter().filter(|c| c.is_alive()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::{ColliderHandle, RigidBodyHandle};
    use crate::game::characters::CharacterCatalog;

    fn insert(registry: &mut CharacterRegistry) -> CharacterId {
        let profile = CharacterCatalog::builtin()
            .unwrap()
            .get("spider_monster")
            .unwrap();
        registry.insert_with(|id| {
            Character::new(
                id,
                "spider_monster",
                profile,
                RigidBodyHandle::invalid(),
                ColliderHandle::invalid(),
            )
        })
    }

    #[test]
    fn test_registry_new() {
        let registry = CharacterRegistry::new();
        assert_eq!(registry.count(), 0);
        assert!(registry.ids().is_empty());
    }

    #[test]
    fn test_character_knows_its_id() {
        let mut registry = CharacterRegistry::new();
        let a = insert(&mut registry);
        let b = insert(&mut registry);
        assert_ne!(a, b);
        assert_eq!(registry.get(b).unwrap().id, b);
        assert_eq!(registry.ids(), vec![a, b]);
    }

    #[test]
    fn test_removed_id_goes_stale() {
        let mut registry = CharacterRegistry::new();
        let a = insert(&mut registry);
        assert!(registry.remove(a).is_some());
        assert!(registry.get(a).is_none());
        assert!(registry.remove(a).is_none());
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_reused_slot_does_not_alias_old_id() {
        let mut registry = CharacterRegistry::new();
        let old = insert(&mut registry);
        registry.remove(old);

        let new = insert(&mut registry);
        assert_eq!(new.index(), old.index());
        assert_ne!(new.generation(), old.generation());
        assert!(registry.get(old).is_none());
        assert!(registry.get_mut(old).is_none());
        assert!(registry.contains(new));
    }

    #[test]
    fn test_alive_count() {
        let mut registry = CharacterRegistry::new();
        let a = insert(&mut registry);
        insert(&mut registry);

        let mut physics = crate::engine::physics::PhysicsWorld::new(1.0 / 60.0);
        registry.get_mut(a).unwrap().die(&mut physics);
        assert_eq!(registry.count(), 2);
        assert_eq!(registry.alive_count(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(CharacterId::new(4, 2).to_string(), "#4v2");
    }
}
