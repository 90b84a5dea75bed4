use std::collections::HashMap;

use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Entity storage using a flat Vec, plus the name registry used for
/// cross-entity lookup.
/// Designed for small-to-medium entity counts (hundreds, not millions).
pub struct Scene {
    entities: Vec<Entity>,
    names: HashMap<String, EntityId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a scene with a specific entity capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            names: HashMap::new(),
        }
    }

    /// Add an entity to the scene.
    /// A name already owned by a live entity keeps resolving to that entity.
    pub fn spawn(&mut self, entity: Entity) {
        if !entity.name.is_empty() {
            self.names.entry(entity.name.clone()).or_insert(entity.id);
        }
        self.entities.push(entity);
    }

    /// Remove an entity by ID. Returns the removed entity if found.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        // Keep spawn order so a released name passes to the next-oldest holder.
        let entity = self.entities.remove(idx);
        if self.names.get(&entity.name) == Some(&id) {
            self.names.remove(&entity.name);
            if let Some(next) = self.entities.iter().find(|e| e.name == entity.name) {
                self.names.insert(entity.name.clone(), next.id);
            }
        }
        Some(entity)
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Iterate over all entities mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Resolve a name through the registry.
    pub fn find_by_name(&self, name: &str) -> Option<EntityId> {
        self.names.get(name).copied()
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Clear all entities and names.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.names.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
