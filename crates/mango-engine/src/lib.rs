pub mod api;
pub mod core;
pub mod components;
pub mod input;
pub mod runner;

// Re-export key types at crate root for convenience
pub use api::game::{Behavior, EngineContext, GameConfig, Peers, Scope};
pub use api::types::{CollisionPair, EntityId};
pub use components::entity::Entity;
pub use components::rigidbody::RigidbodyConfig;
pub use core::error::EngineError;
pub use core::rng::Rng;
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use input::keyboard::{InputEvent, InputQueue, InputState, Key};
pub use runner::{RunState, Runner};

#[cfg(feature = "physics")]
pub use core::physics::{BodyDesc, ColliderDesc, PhysicsBody, PhysicsWorld, COLLIDER_SHRINK};
