//! The bird: jumps on key press, resets the course on any contact.

use glam::Vec2;
use mango_engine::{EngineError, EntityId, RigidbodyConfig, Scope};

use crate::config::PlayerConfig;
use crate::game::{BirbEntity, OBSTACLES_CONTROLLER};

/// Jump latch. One impulse per press, however long the key is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpState {
    #[default]
    Grounded,
    Jumping,
}

pub struct Player {
    config: PlayerConfig,
    state: JumpState,
    impulses: u32,
    crashes: u32,
}

impl Player {
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            config,
            state: JumpState::Grounded,
            impulses: 0,
            crashes: 0,
        }
    }

    /// Feed this step's key state. Returns the impulse to apply, if any.
    pub fn sample(&mut self, held: bool) -> Option<Vec2> {
        match (self.state, held) {
            (JumpState::Grounded, true) => {
                self.state = JumpState::Jumping;
                Some(self.config.jump_impulse)
            }
            (JumpState::Jumping, true) => None,
            (_, false) => {
                self.state = JumpState::Grounded;
                None
            }
        }
    }

    pub fn on_create(&mut self, scope: &mut Scope<'_, BirbEntity>) -> Result<(), EngineError> {
        let id = scope.id;
        scope.ctx.set_rigid(id, true)?;
        scope.ctx.configure_rigidbody(
            id,
            RigidbodyConfig::new(self.config.mass, self.config.friction, false),
        )?;
        scope.ctx.set_scale(id, self.config.scale)?;
        scope.ctx.set_position(id, self.config.spawn)
    }

    pub fn on_fixed_update(&mut self, scope: &mut Scope<'_, BirbEntity>) -> Result<(), EngineError> {
        let held = scope.input.is_key_pressed(self.config.jump_key);
        if let Some(impulse) = self.sample(held) {
            scope.ctx.apply_impulse(scope.id, impulse)?;
            self.impulses += 1;
        }
        Ok(())
    }

    /// Any contact restarts the obstacle course and puts the bird back at spawn.
    pub fn on_collision_begin(
        &mut self,
        scope: &mut Scope<'_, BirbEntity>,
        other: EntityId,
    ) -> Result<(), EngineError> {
        let controller = scope.ctx.find_entity_by_name(OBSTACLES_CONTROLLER)?;
        match scope.peers.get_mut(controller) {
            Some(BirbEntity::Obstacles(obstacles)) => obstacles.restart(scope.ctx)?,
            _ => return Err(EngineError::MissingBehavior(controller)),
        }
        scope.ctx.set_position(scope.id, self.config.spawn)?;
        self.crashes += 1;
        log::info!("player {} hit {}; course restarted", scope.id, other);
        Ok(())
    }

    pub fn state(&self) -> JumpState {
        self.state
    }

    pub fn is_jumping(&self) -> bool {
        self.state == JumpState::Jumping
    }

    pub fn impulses_applied(&self) -> u32 {
        self.impulses
    }

    pub fn crashes(&self) -> u32 {
        self.crashes
    }
}
