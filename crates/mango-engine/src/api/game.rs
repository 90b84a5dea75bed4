use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::{CollisionPair, EntityId};
use crate::components::entity::Entity;
use crate::components::rigidbody::RigidbodyConfig;
use crate::core::error::EngineError;
use crate::core::scene::Scene;
use crate::input::keyboard::InputState;
#[cfg(feature = "physics")]
use crate::core::physics::{BodyDesc, ColliderDesc, PhysicsBody, PhysicsWorld};

/// Engine configuration, provided by the game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Gravity vector for physics simulation. Y-up: negative Y pulls down.
    pub gravity: Vec2,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            gravity: Vec2::new(0.0, -9.81),
        }
    }
}

impl GameConfig {
    /// Parse engine settings from JSON. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Scripted per-entity logic driven by the runner.
///
/// A game implements this on a closed enum of its behavior kinds. Every hook
/// receives a [`Scope`] giving access to the engine, the sampled input and
/// every other registered behavior.
pub trait Behavior: Sized {
    /// One-time setup, called when the runner starts playing.
    fn on_create(&mut self, _scope: &mut Scope<'_, Self>) -> Result<(), EngineError> {
        Ok(())
    }

    /// Called once per fixed step, before the physics step.
    fn on_fixed_update(&mut self, scope: &mut Scope<'_, Self>) -> Result<(), EngineError>;

    /// Called once when a contact between this entity and `other` starts.
    fn on_collision_begin(
        &mut self,
        _scope: &mut Scope<'_, Self>,
        _other: EntityId,
    ) -> Result<(), EngineError> {
        Ok(())
    }

    /// Called once when a contact between this entity and `other` ends.
    fn on_collision_end(
        &mut self,
        _scope: &mut Scope<'_, Self>,
        _other: EntityId,
    ) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Everything a behavior hook may touch while it runs.
pub struct Scope<'a, B> {
    /// The entity the running behavior is attached to.
    pub id: EntityId,
    pub ctx: &'a mut EngineContext,
    pub input: &'a InputState,
    pub peers: Peers<'a, B>,
}

pub(crate) struct BehaviorSlot<B> {
    pub(crate) id: EntityId,
    /// `None` only while this behavior's own hook is running.
    pub(crate) behavior: Option<B>,
}

/// Synchronous access to the other registered behaviors.
/// The running behavior is not reachable through its own peers.
pub struct Peers<'a, B> {
    slots: &'a mut [BehaviorSlot<B>],
}

impl<'a, B> Peers<'a, B> {
    pub(crate) fn new(slots: &'a mut [BehaviorSlot<B>]) -> Self {
        Self { slots }
    }

    pub fn get(&self, id: EntityId) -> Option<&B> {
        self.slots
            .iter()
            .find(|s| s.id == id)
            .and_then(|s| s.behavior.as_ref())
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut B> {
        self.slots
            .iter_mut()
            .find(|s| s.id == id)
            .and_then(|s| s.behavior.as_mut())
    }

    /// Ids of every reachable peer, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots
            .iter()
            .filter(|s| s.behavior.is_some())
            .map(|s| s.id)
    }
}

/// Mutable access to engine state: entities, names, physics and pending contacts.
pub struct EngineContext {
    pub scene: Scene,
    next_id: u32,
    #[cfg(feature = "physics")]
    pub physics: PhysicsWorld,
    collision_events: Vec<CollisionPair>,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    /// Create a context whose physics world uses the configured gravity and timestep.
    pub fn with_config(config: &GameConfig) -> Self {
        #[cfg(feature = "physics")]
        let physics = {
            let mut world = PhysicsWorld::new(config.gravity);
            world.set_dt(config.fixed_dt);
            world
        };
        #[cfg(not(feature = "physics"))]
        let _ = config;

        Self {
            scene: Scene::new(),
            next_id: 1,
            #[cfg(feature = "physics")]
            physics,
            collision_events: Vec::new(),
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn a blank entity at the origin.
    pub fn create_entity(&mut self) -> EntityId {
        let id = self.next_id();
        self.scene.spawn(Entity::new(id));
        id
    }

    /// Spawn a prepared entity. Rigid entities get their physics body here.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        #[cfg(feature = "physics")]
        let entity = match entity.rigidbody {
            Some(config) => {
                let body = build_body(&mut self.physics, &entity, config);
                entity.with_body(body)
            }
            None => entity,
        };
        self.scene.spawn(entity);
        id
    }

    /// Despawn an entity, cleaning up its physics body if present.
    pub fn destroy_entity(&mut self, id: EntityId) -> Result<Entity, EngineError> {
        let entity = self.scene.despawn(id).ok_or(EngineError::EntityNotFound(id))?;
        #[cfg(feature = "physics")]
        if let Some(body) = &entity.body {
            self.physics.remove_body(body);
        }
        Ok(entity)
    }

    /// Resolve a logical name through the scene registry.
    pub fn find_entity_by_name(&self, name: &str) -> Result<EntityId, EngineError> {
        self.scene
            .find_by_name(name)
            .ok_or_else(|| EngineError::NameNotFound(name.to_string()))
    }

    pub fn entity(&self, id: EntityId) -> Result<&Entity, EngineError> {
        self.scene.get(id).ok_or(EngineError::EntityNotFound(id))
    }

    fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, EngineError> {
        self.scene.get_mut(id).ok_or(EngineError::EntityNotFound(id))
    }

    pub fn position(&self, id: EntityId) -> Result<Vec2, EngineError> {
        Ok(self.entity(id)?.pos)
    }

    /// Move an entity. Rigid entities are teleported along with their body.
    pub fn set_position(&mut self, id: EntityId, pos: Vec2) -> Result<(), EngineError> {
        let entity = self.scene.get_mut(id).ok_or(EngineError::EntityNotFound(id))?;
        entity.pos = pos;
        #[cfg(feature = "physics")]
        if let Some(body) = &entity.body {
            self.physics.set_translation(body, pos);
        }
        Ok(())
    }

    pub fn scale(&self, id: EntityId) -> Result<Vec2, EngineError> {
        Ok(self.entity(id)?.scale)
    }

    /// Resize an entity. Rigid entities get a matching collider.
    pub fn set_scale(&mut self, id: EntityId, scale: Vec2) -> Result<(), EngineError> {
        let entity = self.scene.get_mut(id).ok_or(EngineError::EntityNotFound(id))?;
        entity.scale = scale;
        #[cfg(feature = "physics")]
        if let Some(body) = &entity.body {
            self.physics.set_collider(body, ColliderDesc::from_scale(scale));
        }
        Ok(())
    }

    /// Give an entity a default rigidbody, or take it away.
    pub fn set_rigid(&mut self, id: EntityId, rigid: bool) -> Result<(), EngineError> {
        let entity = self.scene.get_mut(id).ok_or(EngineError::EntityNotFound(id))?;
        match (rigid, entity.rigidbody.is_some()) {
            (true, false) => {
                let config = RigidbodyConfig::default();
                entity.rigidbody = Some(config);
                #[cfg(feature = "physics")]
                {
                    entity.body = Some(build_body(&mut self.physics, entity, config));
                }
            }
            (false, true) => {
                entity.rigidbody = None;
                #[cfg(feature = "physics")]
                if let Some(body) = entity.body.take() {
                    self.physics.remove_body(&body);
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Update mass, friction and static flag of a rigid entity.
    pub fn configure_rigidbody(
        &mut self,
        id: EntityId,
        config: RigidbodyConfig,
    ) -> Result<(), EngineError> {
        let entity = self.scene.get_mut(id).ok_or(EngineError::EntityNotFound(id))?;
        if entity.rigidbody.is_none() {
            return Err(EngineError::NotRigid(id));
        }
        entity.rigidbody = Some(config);
        #[cfg(feature = "physics")]
        if let Some(body) = &entity.body {
            self.physics.configure(body, config);
        }
        Ok(())
    }

    /// Apply an instantaneous impulse to a rigid entity.
    /// Without the physics feature the impulse is validated and dropped.
    pub fn apply_impulse(&mut self, id: EntityId, impulse: Vec2) -> Result<(), EngineError> {
        let entity = self.scene.get(id).ok_or(EngineError::EntityNotFound(id))?;
        if !entity.is_rigid() {
            return Err(EngineError::NotRigid(id));
        }
        #[cfg(feature = "physics")]
        if let Some(body) = &entity.body {
            self.physics.apply_impulse(body, impulse);
        }
        #[cfg(not(feature = "physics"))]
        let _ = impulse;
        Ok(())
    }

    /// Linear velocity of a rigid entity; zero for everything else.
    pub fn velocity(&self, id: EntityId) -> Result<Vec2, EngineError> {
        let _entity = self.entity(id)?;
        #[cfg(feature = "physics")]
        if let Some(body) = &_entity.body {
            return Ok(self.physics.velocity(body));
        }
        Ok(Vec2::ZERO)
    }

    /// Queue a contact event for the current fixed step.
    pub fn push_collision(&mut self, pair: CollisionPair) {
        self.collision_events.push(pair);
    }

    /// Contact events queued for dispatch.
    pub fn collisions(&self) -> &[CollisionPair] {
        &self.collision_events
    }

    pub(crate) fn take_collisions(&mut self) -> Vec<CollisionPair> {
        std::mem::take(&mut self.collision_events)
    }

    /// Step the physics simulation and sync body positions back to entities.
    /// Called by the runner after every behavior's fixed update.
    #[cfg(feature = "physics")]
    pub fn step_physics(&mut self) {
        self.physics.step_into(&mut self.collision_events);

        for entity in self.scene.iter_mut().filter(|e| e.active) {
            if let Some(body) = &entity.body {
                let (pos, rot) = self.physics.body_position(body);
                entity.pos = pos;
                entity.rotation = rot;
            }
        }
    }

    /// Without physics only host-pushed contacts reach behaviors.
    #[cfg(not(feature = "physics"))]
    pub fn step_physics(&mut self) {}
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "physics")]
fn build_body(physics: &mut PhysicsWorld, entity: &Entity, config: RigidbodyConfig) -> PhysicsBody {
    let desc = BodyDesc::new(ColliderDesc::from_scale(entity.scale))
        .with_position(entity.pos)
        .with_rotation(entity.rotation);
    physics.create_body(entity.id, &desc, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_config_from_partial_json() {
        let config = GameConfig::from_json(r#"{ "gravity": [0.0, 0.0] }"#).unwrap();
        assert_eq!(config.gravity, Vec2::ZERO);
        assert!((config.fixed_dt - 1.0 / 60.0).abs() < f32::EPSILON);
        assert!(GameConfig::from_json("{ \"fixed_dt\": \"fast\" }").is_err());
    }

    #[test]
    fn create_entity_assigns_fresh_ids() {
        let mut ctx = EngineContext::new();
        let a = ctx.create_entity();
        let b = ctx.create_entity();
        assert_ne!(a, b);
        assert_eq!(ctx.scene.len(), 2);
        assert_eq!(ctx.position(a).unwrap(), Vec2::ZERO);
    }

    #[test]
    fn unknown_entity_is_an_error() {
        let mut ctx = EngineContext::new();
        let ghost = EntityId(99);
        assert_eq!(ctx.position(ghost), Err(EngineError::EntityNotFound(ghost)));
        assert_eq!(
            ctx.set_position(ghost, Vec2::ONE),
            Err(EngineError::EntityNotFound(ghost))
        );
        assert!(ctx.destroy_entity(ghost).is_err());
    }

    #[test]
    fn find_entity_by_name_reports_missing_names() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        ctx.spawn(Entity::new(id).with_name("ObstaclesController"));
        assert_eq!(ctx.find_entity_by_name("ObstaclesController"), Ok(id));
        assert_eq!(
            ctx.find_entity_by_name("Nobody"),
            Err(EngineError::NameNotFound("Nobody".into()))
        );
    }

    #[test]
    fn position_and_scale_round_trip() {
        let mut ctx = EngineContext::new();
        let id = ctx.create_entity();
        ctx.set_position(id, Vec2::new(3.0, -5.0)).unwrap();
        ctx.set_scale(id, Vec2::new(0.2, 4.5)).unwrap();
        assert_eq!(ctx.position(id).unwrap(), Vec2::new(3.0, -5.0));
        assert_eq!(ctx.scale(id).unwrap(), Vec2::new(0.2, 4.5));
    }

    #[test]
    fn rigidbody_configuration_requires_rigid_entity() {
        let mut ctx = EngineContext::new();
        let id = ctx.create_entity();
        let cfg = RigidbodyConfig::new(1.0, 1.0, true);
        assert_eq!(ctx.configure_rigidbody(id, cfg), Err(EngineError::NotRigid(id)));
        assert_eq!(ctx.apply_impulse(id, Vec2::Y), Err(EngineError::NotRigid(id)));

        ctx.set_rigid(id, true).unwrap();
        ctx.configure_rigidbody(id, cfg).unwrap();
        assert_eq!(ctx.entity(id).unwrap().rigidbody, Some(cfg));

        ctx.set_rigid(id, false).unwrap();
        assert!(!ctx.entity(id).unwrap().is_rigid());
    }

    #[test]
    fn pushed_collisions_are_visible_until_taken() {
        let mut ctx = EngineContext::new();
        ctx.push_collision(CollisionPair::began(EntityId(1), EntityId(2)));
        assert_eq!(ctx.collisions().len(), 1);
        let taken = ctx.take_collisions();
        assert_eq!(taken.len(), 1);
        assert!(ctx.collisions().is_empty());
    }
}
