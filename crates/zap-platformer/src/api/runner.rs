use crate::api::game::{EngineContext, Game, GameConfig};
use crate::core::time::FixedTimestep;
use crate::error::PlatformerError;
use crate::input::{InputEvent, InputQueue, InputState};

/// Generic game runner that wires up the engine loop.
///
/// The host pushes input events and calls [`tick`](Self::tick) once per
/// rendered frame; the runner turns frame time into fixed simulation steps.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    queue: InputQueue,
    input: InputState,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        Self {
            ctx: EngineContext::from_config(&config),
            queue: InputQueue::new(),
            input: InputState::new(config.bindings.clone()),
            timestep: FixedTimestep::new(config.fixed_dt)
                .with_max_steps(config.max_steps_per_frame),
            game,
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    /// On error the runner stays inactive and `tick` does nothing.
    pub fn init(&mut self) -> Result<(), PlatformerError> {
        self.config = self.game.config();
        self.config.validate()?;

        self.ctx = EngineContext::from_config(&self.config);
        self.input = InputState::new(self.config.bindings.clone());
        self.timestep = FixedTimestep::new(self.config.fixed_dt)
            .with_max_steps(self.config.max_steps_per_frame);

        self.game.init(&mut self.ctx)?;
        self.initialized = true;
        log::info!(
            "runner initialized: {} entities, step {}s",
            self.ctx.scene.len(),
            self.config.fixed_dt
        );
        Ok(())
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.queue.push(event);
    }

    /// Run one frame: ingest queued input, then as many fixed steps as the
    /// accumulated time allows. Returns the number of steps run.
    pub fn tick(&mut self, frame_dt: f32) -> u32 {
        if !self.initialized {
            return 0;
        }

        let events = self.queue.drain();
        self.input.ingest_all(&events);

        let steps = self.timestep.accumulate(frame_dt);
        for _ in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
            self.ctx.step_physics();
            self.game.after_physics(&mut self.ctx);
            self.input.end_tick();
        }
        steps
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fraction of a step left over, for render interpolation.
    pub fn alpha(&self) -> f32 {
        self.timestep.alpha()
    }

    pub fn ctx(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn game(&self) -> &G {
        &self.game
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::camera::{CameraConfig, CameraFollower};
    use crate::components::entity::Entity;
    use crate::core::physics::{BodyDesc, ColliderDesc, ColliderMaterial, CollisionLayers};
    use crate::core::scene::PLAYER_TAG;
    use crate::input::state::keys;
    use crate::movement::{MovementConfig, MovementController};
    use glam::Vec2;

    const DT: f32 = 1.0 / 50.0;

    struct Platformer {
        player: Option<MovementController>,
        camera: CameraFollower,
        player_id: EntityId,
        updates: u32,
        skip_body: bool,
    }

    impl Platformer {
        fn new() -> Self {
            Self {
                player: None,
                camera: CameraFollower::new(CameraConfig::default()),
                player_id: EntityId(0),
                updates: 0,
                skip_body: false,
            }
        }
    }

    impl Game for Platformer {
        fn init(&mut self, ctx: &mut EngineContext) -> Result<(), PlatformerError> {
            let floor = ctx.next_id();
            ctx.spawn_with_body(
                Entity::new(floor),
                BodyDesc::fixed(ColliderDesc::Cuboid {
                    half_width: 50.0,
                    half_height: 0.5,
                })
                .with_position(Vec2::new(0.0, -0.5))
                .with_layers(CollisionLayers::GROUND, CollisionLayers::ALL),
                ColliderMaterial::default(),
            );

            self.player_id = ctx.next_id();
            let player = Entity::new(self.player_id).with_tag(PLAYER_TAG);
            if self.skip_body {
                ctx.scene.spawn(player);
            } else {
                ctx.spawn_with_body(
                    player,
                    BodyDesc::dynamic(ColliderDesc::Cuboid {
                        half_width: 0.5,
                        half_height: 0.5,
                    })
                    .with_position(Vec2::new(0.0, 0.5))
                    .with_fixed_rotation(true)
                    .with_layers(CollisionLayers::PLAYER, CollisionLayers::ALL),
                    ColliderMaterial::frictionless(),
                );
            }

            let mut controller = MovementController::new(self.player_id, MovementConfig::default());
            controller.initialize(ctx)?;
            self.player = Some(controller);
            self.camera.initialize(&ctx.scene)
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputState) {
            self.updates += 1;
            if let Some(player) = &mut self.player {
                player.tick(&mut ctx.physics, &ctx.maps, input);
            }
        }

        fn after_physics(&mut self, ctx: &mut EngineContext) {
            self.camera.tick(&mut ctx.camera, &ctx.scene);
        }
    }

    fn runner() -> GameRunner<Platformer> {
        let mut runner = GameRunner::new(Platformer::new());
        runner.init().unwrap();
        runner
    }

    fn player_pos(runner: &GameRunner<Platformer>) -> Vec2 {
        runner.ctx().scene.position_of(runner.game().player_id).unwrap()
    }

    #[test]
    fn one_update_per_fixed_step() {
        let mut runner = runner();
        for _ in 0..3 {
            assert_eq!(runner.tick(DT), 1);
        }
        assert_eq!(runner.tick(DT * 0.5), 0);
        assert_eq!(runner.game().updates, 3);
    }

    #[test]
    fn walking_right_moves_player_and_camera() {
        let mut runner = runner();
        runner.push_input(InputEvent::KeyDown { key_code: keys::RIGHT });
        for _ in 0..25 {
            runner.tick(DT);
        }

        let pos = player_pos(&runner);
        // 8 units/s for half a second.
        assert!((pos.x - 4.0).abs() < 0.2, "x={}", pos.x);

        let cam = runner.ctx().camera.position;
        assert!(cam.x > 0.0 && cam.x < pos.x, "camera x={}", cam.x);
        assert_eq!(cam.z, -10.0);
    }

    #[test]
    fn jump_pressed_between_steps_is_not_lost() {
        let mut runner = runner();
        runner.tick(DT);
        runner.push_input(InputEvent::KeyDown { key_code: keys::SPACE });
        runner.tick(DT * 0.5);
        runner.push_input(InputEvent::KeyUp { key_code: keys::SPACE });
        runner.tick(DT * 0.5);

        let controller = runner.game().player.as_ref().unwrap();
        assert_eq!(controller.jump_count(), 1);

        for _ in 0..10 {
            runner.tick(DT);
        }
        assert!(player_pos(&runner).y > 0.6);
    }

    #[test]
    fn init_failure_is_propagated() {
        let mut game = Platformer::new();
        game.skip_body = true;
        let mut runner = GameRunner::new(game);

        assert!(matches!(runner.init(), Err(PlatformerError::MissingBody(_))));
        assert!(!runner.is_initialized());
        assert_eq!(runner.tick(DT), 0);
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let mut runner = GameRunner::new(Platformer::new());
        assert_eq!(runner.tick(DT), 0);
        assert_eq!(runner.game().updates, 0);
    }
}
