use glam::Vec2;
use zap_platformer::*;

const FLOOR_HALF_W: f32 = 30.0;
const FLOOR_THICKNESS: f32 = 1.0;
const WALL_X: f32 = 15.5;
const WALL_HALF_H: f32 = 5.0;
const PLAYER_HALF: f32 = 0.5;
const PLAYER_SPAWN: Vec2 = Vec2::new(2.0, 0.55);

/// Ladder column at x in [6, 7), six tiles tall. Rows are listed top first.
const LADDER_ROWS: [&str; 8] = [
    "",
    "",
    "......#",
    "......#",
    "......#",
    "......#",
    "......#",
    "......#",
];
/// Sticky floor at x in [10, 13).
const TRAP_ROWS: [&str; 1] = ["..........###"];

pub struct PlatformerDemo {
    config: PlatformerConfig,
    player: Option<MovementController>,
    camera: CameraFollower,
}

impl PlatformerDemo {
    pub fn new(config: PlatformerConfig) -> Self {
        let camera = CameraFollower::new(config.camera.clone());
        Self {
            config,
            player: None,
            camera,
        }
    }

    pub fn player(&self) -> Option<&MovementController> {
        self.player.as_ref()
    }

    fn build_level(ctx: &mut EngineContext) {
        let floor = ctx.next_id();
        ctx.spawn_with_body(
            Entity::new(floor).with_tag("ground"),
            BodyDesc::fixed(ColliderDesc::Cuboid {
                half_width: FLOOR_HALF_W,
                half_height: FLOOR_THICKNESS / 2.0,
            })
            .with_position(Vec2::new(FLOOR_HALF_W - 10.0, -FLOOR_THICKNESS / 2.0))
            .with_layers(CollisionLayers::GROUND, CollisionLayers::ALL),
            ColliderMaterial::default(),
        );

        let wall = ctx.next_id();
        ctx.spawn_with_body(
            Entity::new(wall).with_tag("ground"),
            BodyDesc::fixed(ColliderDesc::Cuboid {
                half_width: 0.5,
                half_height: WALL_HALF_H,
            })
            .with_position(Vec2::new(WALL_X, WALL_HALF_H))
            .with_layers(CollisionLayers::GROUND, CollisionLayers::ALL),
            ColliderMaterial::default(),
        );

        ctx.maps.climb = Some(CollisionTilemap::from_rows(&LADDER_ROWS, 1.0, Vec2::ZERO));
        ctx.maps.trap = Some(CollisionTilemap::from_rows(&TRAP_ROWS, 1.0, Vec2::ZERO));
    }

    fn spawn_player(ctx: &mut EngineContext) -> EntityId {
        let id = ctx.next_id();
        ctx.spawn_with_body(
            Entity::new(id).with_tag(PLAYER_TAG),
            BodyDesc::dynamic(ColliderDesc::Cuboid {
                half_width: PLAYER_HALF,
                half_height: PLAYER_HALF,
            })
            .with_position(PLAYER_SPAWN)
            .with_fixed_rotation(true)
            .with_layers(CollisionLayers::PLAYER, CollisionLayers::ALL),
            ColliderMaterial::frictionless(),
        )
    }
}

impl Game for PlatformerDemo {
    fn config(&self) -> GameConfig {
        self.config.game.clone()
    }

    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), PlatformerError> {
        Self::build_level(ctx);
        let player_id = Self::spawn_player(ctx);

        let mut player = MovementController::new(player_id, self.config.movement.clone());
        player.initialize(ctx)?;
        self.player = Some(player);

        self.camera.initialize(&ctx.scene)
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputState) {
        if let Some(player) = &mut self.player {
            player.tick(&mut ctx.physics, &ctx.maps, input);
        }
    }

    fn after_physics(&mut self, ctx: &mut EngineContext) {
        self.camera.tick(&mut ctx.camera, &ctx.scene);
    }
}
