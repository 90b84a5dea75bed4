/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A contact event between two entities.
/// Produced by the physics step or pushed by the host; consumed by the runner
/// once per fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub entity_a: EntityId,
    pub entity_b: EntityId,
    /// `true` when the contact just started, `false` when it ended.
    pub started: bool,
}

impl CollisionPair {
    pub fn began(entity_a: EntityId, entity_b: EntityId) -> Self {
        Self { entity_a, entity_b, started: true }
    }

    pub fn ended(entity_a: EntityId, entity_b: EntityId) -> Self {
        Self { entity_a, entity_b, started: false }
    }

    /// Whether this pair involves the given entity.
    pub fn involves(&self, id: EntityId) -> bool {
        self.entity_a == id || self.entity_b == id
    }
}
