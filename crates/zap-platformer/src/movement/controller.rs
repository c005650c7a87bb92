use glam::Vec2;

use crate::api::game::EngineContext;
use crate::api::types::EntityId;
use crate::components::tilemap::CollisionMaps;
use crate::core::physics::{PhysicsBody, PhysicsWorld};
use crate::error::PlatformerError;
use crate::input::{Action, InputSource};
use crate::movement::config::MovementConfig;
use crate::movement::state::{JumpOutcome, Locomotion, MovementState, WallContact};

/// Fixed slack added to the side probes beyond the collider's half width.
pub const WALL_PROBE_MARGIN: f32 = 0.05;

/// Speed cap for the tick: walking speed, slowed by traps, boosted by sprint.
pub fn current_speed(config: &MovementConfig, state: &MovementState) -> f32 {
    let base = if state.on_trap {
        config.player_speed * config.trap_slow_multiplier
    } else {
        config.player_speed
    };
    if state.sprinting {
        base * config.sprint_speed_multiplier
    } else {
        base
    }
}

/// New body velocity given the tick's state, input axes and current velocity.
pub fn resolve_velocity(
    config: &MovementConfig,
    state: &MovementState,
    axes: Vec2,
    velocity: Vec2,
) -> Vec2 {
    let speed = current_speed(config, state);
    match state.resolve_locomotion() {
        Locomotion::Climbing => Vec2::new(axes.x * speed, axes.y * config.climb_speed),
        Locomotion::WallSliding => {
            // Vertical velocity is left to gravity; that is the slide.
            let x = if state.wall.is_away(axes.x) { axes.x * speed } else { 0.0 };
            Vec2::new(x, velocity.y)
        }
        Locomotion::Free => Vec2::new(axes.x * speed, velocity.y),
    }
}

#[derive(Debug, Clone, Copy)]
struct Attachment {
    body: PhysicsBody,
    half_extents: Vec2,
    base_gravity_scale: f32,
}

/// Drives one player entity's rigid body from input.
pub struct MovementController {
    entity: EntityId,
    config: MovementConfig,
    attachment: Option<Attachment>,
    jump_count: u32,
    state: MovementState,
}

impl MovementController {
    pub fn new(entity: EntityId, config: MovementConfig) -> Self {
        Self {
            entity,
            config,
            attachment: None,
            jump_count: 0,
            state: MovementState::default(),
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// State computed by the most recent tick.
    pub fn state(&self) -> &MovementState {
        &self.state
    }

    /// Jumps used since the last grounded tick.
    pub fn jump_count(&self) -> u32 {
        self.jump_count
    }

    /// Gravity scale captured at initialization.
    pub fn base_gravity_scale(&self) -> Option<f32> {
        self.attachment.map(|a| a.base_gravity_scale)
    }

    pub fn is_initialized(&self) -> bool {
        self.attachment.is_some()
    }

    /// Bind to the entity's body and collider and capture its gravity scale.
    ///
    /// Fails if the config is invalid or the entity lacks a body or a
    /// collider. Missing ladder or trap maps only disable that terrain.
    pub fn initialize(&mut self, ctx: &EngineContext) -> Result<(), PlatformerError> {
        self.config.validate()?;

        let entity = ctx
            .scene
            .get(self.entity)
            .ok_or(PlatformerError::EntityNotFound(self.entity))?;
        let body = entity
            .body
            .filter(|b| ctx.physics.contains(b))
            .ok_or(PlatformerError::MissingBody(self.entity))?;
        let shape = ctx
            .physics
            .collider_shape(&body)
            .ok_or(PlatformerError::MissingCollider(self.entity))?;

        if ctx.maps.climb.is_none() {
            log::warn!("{:?}: no climb map, ladders disabled", self.entity);
        }
        if ctx.maps.trap.is_none() {
            log::warn!("{:?}: no trap map, traps disabled", self.entity);
        }
        if let Some(friction) = ctx.physics.collider_friction(&body).filter(|f| *f > 0.0) {
            log::warn!(
                "{:?}: player collider friction is {}; wall slides will stick \
                 unless the material is frictionless",
                self.entity,
                friction
            );
        }

        let base_gravity_scale = ctx.physics.gravity_scale(&body);
        self.attachment = Some(Attachment {
            body,
            half_extents: shape.half_extents(),
            base_gravity_scale,
        });
        self.jump_count = 0;
        self.state = MovementState::default();

        log::info!(
            "movement controller attached to {:?} (gravity scale {})",
            self.entity,
            base_gravity_scale
        );
        Ok(())
    }

    /// Run one fixed simulation step. Does nothing before `initialize` or
    /// after the body has been removed.
    ///
    /// There is no `dt`: velocities are assigned, not integrated, so the
    /// result does not depend on the step length.
    pub fn tick(
        &mut self,
        physics: &mut PhysicsWorld,
        maps: &CollisionMaps,
        input: &dyn InputSource,
    ) {
        let Some(att) = self.attachment else {
            return;
        };
        if !physics.contains(&att.body) {
            return;
        }

        let (pos, _) = physics.body_position(&att.body);
        let axes = Vec2::new(input.horizontal_axis(), input.vertical_axis());

        let mut state = MovementState {
            grounded: self.probe_ground(physics, &att, pos),
            ..MovementState::default()
        };
        if self.config.enable_wall_slide {
            state.wall = self.probe_walls(physics, &att, pos, axes.x);
        }

        state.on_trap = maps.is_trap(pos);
        state.sprinting = input.held(Action::Sprint) && !state.on_trap;
        if state.on_trap && input.pressed(Action::Sprint) {
            log::debug!("{:?}: in a trap, sprint disabled", self.entity);
        }

        if state.grounded && self.jump_count > 0 {
            log::trace!("{:?}: landed, jump count reset", self.entity);
            self.jump_count = 0;
        }

        state.on_ladder = maps.is_climbable(pos);
        let gravity_scale = if state.on_ladder { 0.0 } else { att.base_gravity_scale };
        physics.set_gravity_scale(&att.body, gravity_scale);

        state.locomotion = state.resolve_locomotion();
        let velocity = resolve_velocity(&self.config, &state, axes, physics.velocity(&att.body));
        physics.set_velocity(&att.body, velocity);

        if input.pressed(Action::Jump) {
            state.last_jump = self.try_jump(physics, &att.body, &state);
        }

        self.state = state;
    }

    fn probe_ground(&self, physics: &PhysicsWorld, att: &Attachment, pos: Vec2) -> bool {
        let feet = pos - Vec2::new(0.0, att.half_extents.y);
        let hit = physics.cast_ray(
            feet,
            Vec2::NEG_Y,
            self.config.ground_check_distance,
            self.config.ground_layers,
            Some(&att.body),
        );
        log::trace!("{:?}: ground probe {:?}", self.entity, hit);
        hit.is_some()
    }

    /// A wall only counts while the player pushes into it.
    fn probe_walls(
        &self,
        physics: &PhysicsWorld,
        att: &Attachment,
        pos: Vec2,
        h: f32,
    ) -> WallContact {
        let reach = att.half_extents.x + WALL_PROBE_MARGIN + self.config.wall_check_distance;
        let touches = |dir: Vec2| {
            physics
                .cast_ray(pos, dir, reach, self.config.ground_layers, Some(&att.body))
                .is_some()
        };

        if h > 0.0 && touches(Vec2::X) {
            WallContact::Right
        } else if h < 0.0 && touches(Vec2::NEG_X) {
            WallContact::Left
        } else {
            WallContact::None
        }
    }

    fn try_jump(
        &mut self,
        physics: &mut PhysicsWorld,
        body: &PhysicsBody,
        state: &MovementState,
    ) -> JumpOutcome {
        if state.on_trap {
            log::debug!("{:?}: in a trap, jump disabled", self.entity);
            return JumpOutcome::BlockedByTrap;
        }
        if state.on_ladder {
            return JumpOutcome::BlockedByLadder;
        }
        if self.jump_count >= self.config.max_additional_jumps {
            return JumpOutcome::Exhausted;
        }

        // Zeroing first makes every jump reach the same height.
        let velocity = physics.velocity(body);
        physics.set_velocity(body, Vec2::new(velocity.x, 0.0));
        physics.apply_impulse(body, Vec2::new(0.0, self.config.jump_force));
        self.jump_count += 1;

        log::debug!(
            "{:?}: jump {} of {}",
            self.entity,
            self.jump_count,
            self.config.max_additional_jumps
        );
        JumpOutcome::Jumped {
            count: self.jump_count,
        }
    }
}
