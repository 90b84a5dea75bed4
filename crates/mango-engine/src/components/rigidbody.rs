use serde::{Deserialize, Serialize};

/// Rigidbody parameters attached to an entity.
/// Mirrors the host call `ConfigureRigidbody(mass, friction, is_static)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidbodyConfig {
    pub mass: f32,
    pub friction: f32,
    /// Static bodies never move under simulation; they can still be teleported.
    pub is_static: bool,
}

impl RigidbodyConfig {
    pub fn new(mass: f32, friction: f32, is_static: bool) -> Self {
        Self { mass, friction, is_static }
    }
}

impl Default for RigidbodyConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            friction: 0.3,
            is_static: false,
        }
    }
}
