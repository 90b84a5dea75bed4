//! Mirrors the obstacle field onto engine entities.

use mango_engine::{EngineContext, EngineError, EntityId, RigidbodyConfig};

use crate::config::FieldConfig;
use crate::error::ConfigError;

use super::field::ObstacleField;
use super::pair::{ObstacleHandle, ObstaclePair};

/// Obstacles never move under physics; the controller places them every step.
const OBSTACLE_BODY: RigidbodyConfig = RigidbodyConfig {
    mass: 1.0,
    friction: 1.0,
    is_static: true,
};

/// Entities backing one storage slot of the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairEntities {
    pub top: EntityId,
    pub bottom: EntityId,
}

pub struct ObstaclesController {
    field: ObstacleField,
    /// Indexed by field slot, not by sequence position.
    entities: Vec<PairEntities>,
    restarts: u32,
}

impl ObstaclesController {
    pub fn new(config: FieldConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            field: ObstacleField::new(config)?,
            entities: Vec::new(),
            restarts: 0,
        })
    }

    /// Spawn two rigid entities per pair and place them.
    pub fn on_create(&mut self, ctx: &mut EngineContext) -> Result<(), EngineError> {
        self.entities.clear();
        for _ in 0..self.field.len() {
            let top = spawn_obstacle(ctx)?;
            let bottom = spawn_obstacle(ctx)?;
            self.entities.push(PairEntities { top, bottom });
        }
        self.sync_all(ctx)?;
        log::info!("spawned {} obstacle pairs", self.entities.len());
        Ok(())
    }

    /// Advance the field one step and push the result to the entities.
    /// Only recycled pairs get new scales.
    pub fn tick(&mut self, ctx: &mut EngineContext) -> Result<(), EngineError> {
        let recycled = self.field.tick();
        let fresh_from = self.field.len() - recycled;

        for (index, (slot, pair)) in self.field.iter_slots().enumerate() {
            let Some(ids) = self.entities.get(slot) else {
                continue;
            };
            ctx.set_position(ids.top, pair.top.position)?;
            ctx.set_position(ids.bottom, pair.bottom.position)?;
            if index >= fresh_from {
                ctx.set_scale(ids.top, pair.top.scale)?;
                ctx.set_scale(ids.bottom, pair.bottom.scale)?;
            }
        }
        if recycled > 0 {
            log::debug!("recycled {} obstacle pairs", recycled);
        }
        Ok(())
    }

    /// Reset the field to its initial layout.
    pub fn restart(&mut self, ctx: &mut EngineContext) -> Result<(), EngineError> {
        self.field.restart();
        self.restarts += 1;
        self.sync_all(ctx)
    }

    fn sync_all(&self, ctx: &mut EngineContext) -> Result<(), EngineError> {
        for (slot, pair) in self.field.iter_slots() {
            if let Some(ids) = self.entities.get(slot) {
                place(ctx, ids.top, &pair.top)?;
                place(ctx, ids.bottom, &pair.bottom)?;
            }
        }
        Ok(())
    }

    pub fn field(&self) -> &ObstacleField {
        &self.field
    }

    /// Entity pairs in sequence order, matched with the pair they display.
    pub fn entities(&self) -> impl Iterator<Item = (PairEntities, &ObstaclePair)> + '_ {
        self.field
            .iter_slots()
            .filter_map(|(slot, pair)| self.entities.get(slot).map(|ids| (*ids, pair)))
    }

    /// Whether `id` is one of the obstacle entities.
    pub fn owns(&self, id: EntityId) -> bool {
        self.entities.iter().any(|e| e.top == id || e.bottom == id)
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }
}

fn spawn_obstacle(ctx: &mut EngineContext) -> Result<EntityId, EngineError> {
    let id = ctx.create_entity();
    ctx.set_rigid(id, true)?;
    ctx.configure_rigidbody(id, OBSTACLE_BODY)?;
    Ok(id)
}

fn place(ctx: &mut EngineContext, id: EntityId, handle: &ObstacleHandle) -> Result<(), EngineError> {
    ctx.set_scale(id, handle.scale)?;
    ctx.set_position(id, handle.position)
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::config::Boundaries;

    fn assert_mirrored(controller: &ObstaclesController, ctx: &EngineContext) {
        for (ids, pair) in controller.entities() {
            assert_eq!(ctx.position(ids.top).unwrap(), pair.top.position);
            assert_eq!(ctx.position(ids.bottom).unwrap(), pair.bottom.position);
            assert_eq!(ctx.scale(ids.top).unwrap(), pair.top.scale);
            assert_eq!(ctx.scale(ids.bottom).unwrap(), pair.bottom.scale);
        }
    }

    #[test]
    fn on_create_spawns_two_static_bodies_per_pair() {
        let mut ctx = EngineContext::new();
        let mut controller = ObstaclesController::new(FieldConfig::default()).unwrap();
        controller.on_create(&mut ctx).unwrap();

        assert_eq!(controller.entities().count(), 15);
        assert_eq!(ctx.scene.len(), 30);
        for (ids, _) in controller.entities() {
            let top = ctx.entity(ids.top).unwrap();
            assert_eq!(top.rigidbody, Some(OBSTACLE_BODY));
            assert!(controller.owns(ids.bottom));
        }
        assert_mirrored(&controller, &ctx);
    }

    #[test]
    fn entities_follow_the_field_through_recycling() {
        let cfg = FieldConfig {
            count: 4,
            speed: 0.5,
            step: 1.0,
            boundaries: Boundaries { left: -1.0, right: 0.0 },
            ..FieldConfig::default()
        };
        let mut ctx = EngineContext::new();
        let mut controller = ObstaclesController::new(cfg).unwrap();
        controller.on_create(&mut ctx).unwrap();

        for _ in 0..40 {
            controller.tick(&mut ctx).unwrap();
            assert_mirrored(&controller, &ctx);
        }
    }

    #[test]
    fn restart_counts_and_resyncs() {
        let mut ctx = EngineContext::new();
        let mut controller = ObstaclesController::new(FieldConfig::default()).unwrap();
        controller.on_create(&mut ctx).unwrap();
        for _ in 0..2_000 {
            controller.tick(&mut ctx).unwrap();
        }
        controller.restart(&mut ctx).unwrap();

        assert_eq!(controller.restarts(), 1);
        let (first, pair) = controller.entities().next().unwrap();
        assert_eq!(pair.x(), 10.0);
        assert_eq!(ctx.position(first.top).unwrap(), Vec2::new(10.0, 5.0));
        assert_mirrored(&controller, &ctx);
    }

    #[test]
    fn tick_surfaces_missing_entities() {
        let mut ctx = EngineContext::new();
        let mut controller = ObstaclesController::new(FieldConfig::default()).unwrap();
        controller.on_create(&mut ctx).unwrap();
        let (ids, _) = controller.entities().next().unwrap();
        ctx.destroy_entity(ids.top).unwrap();

        assert_eq!(
            controller.tick(&mut ctx),
            Err(EngineError::EntityNotFound(ids.top))
        );
    }
}
