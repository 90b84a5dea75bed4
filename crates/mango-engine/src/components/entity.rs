use glam::Vec2;
use crate::api::types::EntityId;
use crate::components::rigidbody::RigidbodyConfig;
#[cfg(feature = "physics")]
use crate::core::physics::PhysicsBody;

/// Fat entity: one struct with optional components.
/// Scripted behavior lives outside the entity and addresses it by id.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// Logical name used for cross-entity lookup. Empty means unnamed.
    pub name: String,
    /// Whether this entity is active (inactive entities are skipped by the physics sync).
    pub active: bool,
    /// Position in world space.
    pub pos: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Box half-extents. A unit-scaled entity spans [-1, 1] on both axes.
    pub scale: Vec2,
    /// Rigidbody parameters, present while the entity is rigid.
    pub rigidbody: Option<RigidbodyConfig>,
    /// Physics body (requires "physics" feature).
    #[cfg(feature = "physics")]
    pub body: Option<PhysicsBody>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            name: String::new(),
            active: true,
            pos: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            rigidbody: None,
            #[cfg(feature = "physics")]
            body: None,
        }
    }

    // -- Builder pattern --

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Mark the entity rigid. The physics body is created when the entity is spawned.
    pub fn with_rigidbody(mut self, config: RigidbodyConfig) -> Self {
        self.rigidbody = Some(config);
        self
    }

    pub fn is_rigid(&self) -> bool {
        self.rigidbody.is_some()
    }

    #[cfg(feature = "physics")]
    pub fn with_body(mut self, body: PhysicsBody) -> Self {
        self.body = Some(body);
        self
    }
}
