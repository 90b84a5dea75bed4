use crate::api::game::{Behavior, BehaviorSlot, EngineContext, GameConfig, Peers, Scope};
use crate::api::types::{CollisionPair, EntityId};
use crate::components::entity::Entity;
use crate::core::error::EngineError;
use crate::core::time::FixedTimestep;
use crate::input::keyboard::{InputEvent, InputQueue, InputState};

/// Whether the runner is advancing the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Playing,
}

/// Drives behaviors through the fixed-step loop.
///
/// Each fixed step runs, in order: every behavior's `on_fixed_update`
/// (registration order), the physics step, `on_collision_begin` for each
/// started contact, `on_collision_end` for each ended contact. Everything a
/// hook triggers completes before the next step begins.
pub struct Runner<B: Behavior> {
    ctx: EngineContext,
    slots: Vec<BehaviorSlot<B>>,
    input: InputQueue,
    keys: InputState,
    timestep: FixedTimestep,
    /// Fixed steps run while playing.
    steps: u64,
    config: GameConfig,
    state: RunState,
    created: bool,
}

impl<B: Behavior> Runner<B> {
    pub fn new(config: GameConfig) -> Self {
        Self {
            ctx: EngineContext::with_config(&config),
            slots: Vec::new(),
            input: InputQueue::new(),
            keys: InputState::new(),
            timestep: FixedTimestep::new(config.fixed_dt),
            steps: 0,
            config,
            state: RunState::Stopped,
            created: false,
        }
    }

    /// Spawn an entity and attach a behavior to it.
    /// Behaviors attached after `play()` get `on_create` immediately.
    pub fn attach(&mut self, entity: Entity, behavior: B) -> Result<EntityId, EngineError> {
        let id = self.ctx.spawn(entity);
        self.slots.push(BehaviorSlot {
            id,
            behavior: Some(behavior),
        });
        if self.created {
            let index = self.slots.len() - 1;
            self.dispatch(index, |b, scope| b.on_create(scope))?;
        }
        Ok(id)
    }

    /// Run `on_create` for every behavior (first call only) and start stepping.
    pub fn play(&mut self) -> Result<(), EngineError> {
        if !self.created {
            self.created = true;
            for index in 0..self.slots.len() {
                self.dispatch(index, |b, scope| b.on_create(scope))?;
            }
            log::info!("runner: created {} behaviors", self.slots.len());
        }
        self.state = RunState::Playing;
        Ok(())
    }

    /// Pause stepping. State is kept; `play()` resumes without re-creating.
    pub fn stop(&mut self) {
        self.state = RunState::Stopped;
    }

    pub fn is_playing(&self) -> bool {
        self.state == RunState::Playing
    }

    /// Queue an input event; it takes effect at the next `tick`.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Direct access to the held-key state, bypassing the event queue.
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.keys
    }

    /// Advance by a variable frame time. Returns the number of fixed steps run.
    pub fn tick(&mut self, frame_dt: f32) -> Result<u32, EngineError> {
        for event in self.input.drain() {
            self.keys.apply(&event);
        }
        if !self.is_playing() {
            return Ok(0);
        }

        let steps = self.timestep.accumulate(frame_dt);
        for _ in 0..steps {
            self.fixed_step()?;
        }
        Ok(steps)
    }

    /// Run exactly one fixed step with the current input state.
    pub fn fixed_step(&mut self) -> Result<(), EngineError> {
        if !self.is_playing() {
            return Ok(());
        }
        self.steps += 1;

        for index in 0..self.slots.len() {
            self.dispatch(index, |b, scope| b.on_fixed_update(scope))?;
        }

        self.ctx.step_physics();

        let contacts = self.ctx.take_collisions();
        for pair in contacts.iter().filter(|p| p.started) {
            self.dispatch_contact(pair, true)?;
        }
        for pair in contacts.iter().filter(|p| !p.started) {
            self.dispatch_contact(pair, false)?;
        }
        Ok(())
    }

    pub fn ctx(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut EngineContext {
        &mut self.ctx
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fixed steps started while playing, whether from `tick` or `fixed_step`.
    pub fn ticks(&self) -> u64 {
        self.steps
    }

    /// The behavior attached to an entity.
    pub fn behavior(&self, id: EntityId) -> Option<&B> {
        self.slots
            .iter()
            .find(|s| s.id == id)
            .and_then(|s| s.behavior.as_ref())
    }

    pub fn behavior_mut(&mut self, id: EntityId) -> Option<&mut B> {
        self.slots
            .iter_mut()
            .find(|s| s.id == id)
            .and_then(|s| s.behavior.as_mut())
    }

    fn dispatch_contact(&mut self, pair: &CollisionPair, started: bool) -> Result<(), EngineError> {
        for (this, other) in [(pair.entity_a, pair.entity_b), (pair.entity_b, pair.entity_a)] {
            let Some(index) = self.slots.iter().position(|s| s.id == this) else {
                continue;
            };
            if started {
                self.dispatch(index, |b, scope| b.on_collision_begin(scope, other))?;
            } else {
                self.dispatch(index, |b, scope| b.on_collision_end(scope, other))?;
            }
        }
        Ok(())
    }

    /// Take the behavior out of its slot so the hook can reach its peers, then put it back.
    fn dispatch<F>(&mut self, index: usize, hook: F) -> Result<(), EngineError>
    where
        F: FnOnce(&mut B, &mut Scope<'_, B>) -> Result<(), EngineError>,
    {
        let Some(mut behavior) = self.slots[index].behavior.take() else {
            return Ok(());
        };
        let id = self.slots[index].id;
        let result = {
            let mut scope = Scope {
                id,
                ctx: &mut self.ctx,
                input: &self.keys,
                peers: Peers::new(&mut self.slots),
            };
            hook(&mut behavior, &mut scope)
        };
        self.slots[index].behavior = Some(behavior);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keyboard::Key;
    use glam::Vec2;

    /// Test behavior: counts hooks and can poke a named peer.
    #[derive(Debug, Default)]
    struct Recorder {
        created: u32,
        updates: u32,
        began: Vec<EntityId>,
        ended: Vec<EntityId>,
        pokes: u32,
        poke_target: Option<&'static str>,
        space_seen: u32,
    }

    impl Behavior for Recorder {
        fn on_create(&mut self, _scope: &mut Scope<'_, Self>) -> Result<(), EngineError> {
            self.created += 1;
            Ok(())
        }

        fn on_fixed_update(&mut self, scope: &mut Scope<'_, Self>) -> Result<(), EngineError> {
            self.updates += 1;
            if scope.input.is_key_pressed(Key::Space) {
                self.space_seen += 1;
            }
            Ok(())
        }

        fn on_collision_begin(
            &mut self,
            scope: &mut Scope<'_, Self>,
            other: EntityId,
        ) -> Result<(), EngineError> {
            self.began.push(other);
            if let Some(name) = self.poke_target {
                let target = scope.ctx.find_entity_by_name(name)?;
                let peer = scope
                    .peers
                    .get_mut(target)
                    .ok_or(EngineError::MissingBehavior(target))?;
                peer.pokes += 1;
            }
            Ok(())
        }

        fn on_collision_end(
            &mut self,
            _scope: &mut Scope<'_, Self>,
            other: EntityId,
        ) -> Result<(), EngineError> {
            self.ended.push(other);
            Ok(())
        }
    }

    fn runner() -> Runner<Recorder> {
        Runner::new(GameConfig {
            gravity: Vec2::ZERO,
            ..GameConfig::default()
        })
    }

    fn spawn(runner: &mut Runner<Recorder>, name: &str, recorder: Recorder) -> EntityId {
        let id = runner.ctx_mut().next_id();
        runner
            .attach(Entity::new(id).with_name(name), recorder)
            .unwrap()
    }

    #[test]
    fn play_creates_once() {
        let mut r = runner();
        let a = spawn(&mut r, "a", Recorder::default());
        r.play().unwrap();
        r.stop();
        r.play().unwrap();
        assert_eq!(r.behavior(a).unwrap().created, 1);
    }

    #[test]
    fn attach_after_play_creates_immediately() {
        let mut r = runner();
        r.play().unwrap();
        let a = spawn(&mut r, "late", Recorder::default());
        assert_eq!(r.behavior(a).unwrap().created, 1);
    }

    #[test]
    fn stopped_runner_does_not_step() {
        let mut r = runner();
        let a = spawn(&mut r, "a", Recorder::default());
        assert_eq!(r.tick(1.0 / 60.0).unwrap(), 0);
        r.fixed_step().unwrap();
        assert_eq!(r.behavior(a).unwrap().updates, 0);

        r.play().unwrap();
        assert_eq!(r.tick(1.0 / 60.0).unwrap(), 1);
        assert_eq!(r.behavior(a).unwrap().updates, 1);
        assert_eq!(r.ticks(), 1);
    }

    #[test]
    fn step_count_covers_frames_and_direct_steps() {
        let mut r = runner();
        let a = spawn(&mut r, "a", Recorder::default());
        r.play().unwrap();
        assert_eq!(r.tick(2.5 / 60.0).unwrap(), 2);
        r.fixed_step().unwrap();
        assert_eq!(r.ticks(), 3);
        assert_eq!(r.behavior(a).unwrap().updates, 3);

        r.stop();
        r.fixed_step().unwrap();
        assert_eq!(r.tick(1.0).unwrap(), 0);
        assert_eq!(r.ticks(), 3);
    }

    #[test]
    fn queued_input_is_visible_to_fixed_update() {
        let mut r = runner();
        let a = spawn(&mut r, "a", Recorder::default());
        r.play().unwrap();
        r.push_input(InputEvent::KeyDown { key_code: 32 });
        r.tick(1.0 / 60.0).unwrap();
        r.push_input(InputEvent::KeyUp { key_code: 32 });
        r.tick(1.0 / 60.0).unwrap();
        assert_eq!(r.behavior(a).unwrap().space_seen, 1);
    }

    #[test]
    fn contacts_reach_both_sides_and_skip_plain_entities() {
        let mut r = runner();
        let a = spawn(&mut r, "a", Recorder::default());
        let b = spawn(&mut r, "b", Recorder::default());
        let wall = r.ctx_mut().create_entity();
        r.play().unwrap();

        r.ctx_mut().push_collision(CollisionPair::began(a, b));
        r.ctx_mut().push_collision(CollisionPair::began(a, wall));
        r.ctx_mut().push_collision(CollisionPair::ended(b, a));
        r.fixed_step().unwrap();

        assert_eq!(r.behavior(a).unwrap().began, vec![b, wall]);
        assert_eq!(r.behavior(b).unwrap().began, vec![a]);
        assert_eq!(r.behavior(a).unwrap().ended, vec![b]);
        assert!(r.ctx().collisions().is_empty());
    }

    #[test]
    fn hook_reaches_named_peer_in_same_step() {
        let mut r = runner();
        let target = spawn(&mut r, "target", Recorder::default());
        let poker = spawn(
            &mut r,
            "poker",
            Recorder {
                poke_target: Some("target"),
                ..Recorder::default()
            },
        );
        r.play().unwrap();
        r.ctx_mut().push_collision(CollisionPair::began(poker, EntityId(999)));
        r.fixed_step().unwrap();
        assert_eq!(r.behavior(target).unwrap().pokes, 1);
    }

    #[test]
    fn missing_named_peer_surfaces_as_error() {
        let mut r = runner();
        let poker = spawn(
            &mut r,
            "poker",
            Recorder {
                poke_target: Some("target"),
                ..Recorder::default()
            },
        );
        r.play().unwrap();
        r.ctx_mut().push_collision(CollisionPair::began(poker, EntityId(999)));
        assert_eq!(
            r.fixed_step(),
            Err(EngineError::NameNotFound("target".into()))
        );
        // The failing behavior is put back.
        assert!(r.behavior(poker).is_some());
    }

    #[test]
    fn behavior_cannot_reach_itself_through_peers() {
        let mut r = runner();
        let selfish = spawn(
            &mut r,
            "me",
            Recorder {
                poke_target: Some("me"),
                ..Recorder::default()
            },
        );
        r.play().unwrap();
        r.ctx_mut().push_collision(CollisionPair::began(selfish, EntityId(999)));
        assert_eq!(r.fixed_step(), Err(EngineError::MissingBehavior(selfish)));
    }
}
