//! Floppy Birb - an endless obstacle run on a fixed pool of obstacle pairs.
//! The controller scrolls and recycles the pairs; the player jumps and
//! restarts the course on contact.

use mango_engine::{
    Behavior, EngineContext, EngineError, Entity, EntityId, InputEvent, Runner, Scope,
};

use crate::config::BirbConfig;
use crate::error::BirbError;
use crate::obstacles::controller::ObstaclesController;
use crate::player::Player;

/// Name the player uses to find the obstacle controller.
pub const OBSTACLES_CONTROLLER: &str = "ObstaclesController";
pub const PLAYER: &str = "Player";

/// Every scripted entity kind in the game.
pub enum BirbEntity {
    Obstacles(ObstaclesController),
    Player(Player),
}

impl Behavior for BirbEntity {
    fn on_create(&mut self, scope: &mut Scope<'_, Self>) -> Result<(), EngineError> {
        match self {
            BirbEntity::Obstacles(controller) => controller.on_create(scope.ctx),
            BirbEntity::Player(player) => player.on_create(scope),
        }
    }

    fn on_fixed_update(&mut self, scope: &mut Scope<'_, Self>) -> Result<(), EngineError> {
        match self {
            BirbEntity::Obstacles(controller) => controller.tick(scope.ctx),
            BirbEntity::Player(player) => player.on_fixed_update(scope),
        }
    }

    fn on_collision_begin(
        &mut self,
        scope: &mut Scope<'_, Self>,
        other: EntityId,
    ) -> Result<(), EngineError> {
        match self {
            BirbEntity::Player(player) => player.on_collision_begin(scope, other),
            BirbEntity::Obstacles(_) => Ok(()),
        }
    }
}

/// A running game: the runner plus the ids of its two scripted entities.
pub struct FloppyBirb {
    runner: Runner<BirbEntity>,
    controller: EntityId,
    player: EntityId,
    config: BirbConfig,
}

impl FloppyBirb {
    /// Validate `config`, spawn the controller and the player, and start playing.
    pub fn new(config: BirbConfig) -> Result<Self, BirbError> {
        config.validate()?;
        let mut runner = Runner::new(config.engine.clone());

        let obstacles = ObstaclesController::new(config.field.clone())?;
        let id = runner.ctx_mut().next_id();
        let controller = runner.attach(
            Entity::new(id).with_name(OBSTACLES_CONTROLLER),
            BirbEntity::Obstacles(obstacles),
        )?;

        let id = runner.ctx_mut().next_id();
        let player = runner.attach(
            Entity::new(id)
                .with_name(PLAYER)
                .with_pos(config.player.spawn)
                .with_scale(config.player.scale),
            BirbEntity::Player(Player::new(config.player.clone())),
        )?;

        runner.play()?;
        log::info!(
            "floppy birb ready: {} obstacle pairs, {} entities",
            config.field.count,
            runner.ctx().scene.len()
        );

        Ok(Self {
            runner,
            controller,
            player,
            config,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, BirbError> {
        Self::new(BirbConfig::from_json(json)?)
    }

    /// Advance by a frame time. Returns the number of fixed steps run.
    pub fn tick(&mut self, frame_dt: f32) -> Result<u32, BirbError> {
        Ok(self.runner.tick(frame_dt)?)
    }

    pub fn fixed_step(&mut self) -> Result<(), BirbError> {
        Ok(self.runner.fixed_step()?)
    }

    /// Queue a raw host input event for the next `tick`.
    pub fn push_input(&mut self, event: InputEvent) {
        self.runner.push_input(event);
    }

    /// Hold the jump key down, effective from the next fixed step.
    pub fn press_jump(&mut self) {
        let key = self.config.player.jump_key;
        self.runner.input_mut().press(key);
    }

    pub fn release_jump(&mut self) {
        let key = self.config.player.jump_key;
        self.runner.input_mut().release(key);
    }

    pub fn controller(&self) -> Option<&ObstaclesController> {
        match self.runner.behavior(self.controller)? {
            BirbEntity::Obstacles(controller) => Some(controller),
            BirbEntity::Player(_) => None,
        }
    }

    pub fn player(&self) -> Option<&Player> {
        match self.runner.behavior(self.player)? {
            BirbEntity::Player(player) => Some(player),
            BirbEntity::Obstacles(_) => None,
        }
    }

    pub fn controller_id(&self) -> EntityId {
        self.controller
    }

    pub fn player_id(&self) -> EntityId {
        self.player
    }

    pub fn ctx(&self) -> &EngineContext {
        self.runner.ctx()
    }

    pub fn ctx_mut(&mut self) -> &mut EngineContext {
        self.runner.ctx_mut()
    }

    pub fn runner(&self) -> &Runner<BirbEntity> {
        &self.runner
    }

    pub fn config(&self) -> &BirbConfig {
        &self.config
    }
}
