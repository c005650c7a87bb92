use glam::Vec2;
use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;

// ---------------------------------------------------------------------------
// Conversion helpers (private): glam to nalgebra and back
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn na_to_vec2(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

fn na_iso_to_pos_rot(iso: &nalgebra::Isometry2<f32>) -> (Vec2, f32) {
    let pos = Vec2::new(iso.translation.x, iso.translation.y);
    let rot = iso.rotation.angle();
    (pos, rot)
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Bit set of collision layers. A collider belongs to some layers and
/// collides with (or is found by queries against) others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollisionLayers(pub u32);

impl CollisionLayers {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);
    /// Terrain the player stands on and slides down.
    pub const GROUND: Self = Self(1 << 0);
    pub const PLAYER: Self = Self(1 << 1);

    fn to_group(self) -> Group {
        Group::from_bits_truncate(self.0)
    }
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self::ALL
    }
}

/// The kind of rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    Fixed,
}

impl BodyType {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyType::Dynamic => RigidBodyType::Dynamic,
            BodyType::Fixed => RigidBodyType::Fixed,
        }
    }
}

/// Shape description for a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderDesc {
    Ball { radius: f32 },
    Cuboid { half_width: f32, half_height: f32 },
    CapsuleY { half_height: f32, radius: f32 },
}

impl ColliderDesc {
    fn build_collider(&self) -> ColliderBuilder {
        match *self {
            ColliderDesc::Ball { radius } => ColliderBuilder::ball(radius),
            ColliderDesc::Cuboid { half_width, half_height } => {
                ColliderBuilder::cuboid(half_width, half_height)
            }
            ColliderDesc::CapsuleY { half_height, radius } => {
                ColliderBuilder::capsule_y(half_height, radius)
            }
        }
    }

    /// Half-size of the axis-aligned box enclosing the unrotated shape.
    pub fn half_extents(&self) -> Vec2 {
        match *self {
            ColliderDesc::Ball { radius } => Vec2::splat(radius),
            ColliderDesc::Cuboid { half_width, half_height } => Vec2::new(half_width, half_height),
            ColliderDesc::CapsuleY { half_height, radius } => {
                Vec2::new(radius, half_height + radius)
            }
        }
    }
}

/// Physical material properties for a collider.
#[derive(Debug, Clone, Copy)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl ColliderMaterial {
    /// No bounce, no friction. Player bodies want this so that pressing into a
    /// wall does not hold them against gravity.
    pub fn frictionless() -> Self {
        Self {
            restitution: 0.0,
            friction: 0.0,
            density: 1.0,
        }
    }
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.3,
            friction: 0.5,
            density: 1.0,
        }
    }
}

/// Builder for describing a rigid body before creation.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub position: Vec2,
    pub gravity_scale: f32,
    pub fixed_rotation: bool,
    pub collider: ColliderDesc,
    /// Layers this body's collider belongs to.
    pub membership: CollisionLayers,
    /// Layers this body's collider interacts with.
    pub filter: CollisionLayers,
}

impl BodyDesc {
    /// Create a dynamic body description with the given collider shape.
    pub fn dynamic(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position: Vec2::ZERO,
            gravity_scale: 1.0,
            fixed_rotation: false,
            collider,
            membership: CollisionLayers::ALL,
            filter: CollisionLayers::ALL,
        }
    }

    /// Create a fixed (static) body description with the given collider shape.
    pub fn fixed(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Fixed,
            position: Vec2::ZERO,
            gravity_scale: 0.0,
            fixed_rotation: true,
            collider,
            membership: CollisionLayers::ALL,
            filter: CollisionLayers::ALL,
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = scale;
        self
    }

    pub fn with_fixed_rotation(mut self, fixed: bool) -> Self {
        self.fixed_rotation = fixed;
        self
    }

    /// Set which layers the collider is on and which layers it interacts with.
    pub fn with_layers(mut self, membership: CollisionLayers, filter: CollisionLayers) -> Self {
        self.membership = membership;
        self.filter = filter;
        self
    }
}

/// Handle pair stored on an Entity, referencing Rapier internals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// Result of a ray query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Entity owning the collider that was hit, if it has one.
    pub entity: Option<EntityId>,
    /// Distance along the (normalized) ray direction.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec2,
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier2D boilerplate into a single, easy-to-use struct.
///
/// Coordinates are Y-up: use negative Y gravity for downward pull.
pub struct PhysicsWorld {
    gravity: nalgebra::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    pub(crate) bodies: RigidBodySet,
    pub(crate) colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a new physics world with the given gravity vector
    /// (e.g. `Vec2::new(0.0, -9.81)`).
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Set the integration timestep.
    pub fn set_dt(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    /// Create a rigid body + collider and return handles.
    /// The EntityId is stored in the body's `user_data` for query lookups.
    pub fn create_body(
        &mut self,
        entity_id: EntityId,
        desc: &BodyDesc,
        material: ColliderMaterial,
    ) -> PhysicsBody {
        let rb = RigidBodyBuilder::new(desc.body_type.to_rapier())
            .translation(vec2_to_na(desc.position))
            .gravity_scale(desc.gravity_scale)
            .locked_axes(if desc.fixed_rotation {
                LockedAxes::ROTATION_LOCKED
            } else {
                LockedAxes::empty()
            })
            .user_data(entity_id.0 as u128)
            .build();

        let body_handle = self.bodies.insert(rb);

        let collider = desc
            .collider
            .build_collider()
            .restitution(material.restitution)
            .friction(material.friction)
            .friction_combine_rule(if material.friction == 0.0 {
                // Zero must win against the other collider's friction.
                CoefficientCombineRule::Min
            } else {
                CoefficientCombineRule::Average
            })
            .density(material.density)
            .collision_groups(InteractionGroups::new(
                desc.membership.to_group(),
                desc.filter.to_group(),
            ))
            .build();

        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        // Ray queries must see new colliders before the first step.
        self.query_pipeline.update(&self.colliders);

        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    /// Remove a body and all its colliders from the simulation.
    pub fn remove_body(&mut self, body: &PhysicsBody) {
        self.bodies.remove(
            body.body_handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        self.query_pipeline.update(&self.colliders);
    }

    /// Whether the body still exists in the simulation.
    pub fn contains(&self, body: &PhysicsBody) -> bool {
        self.bodies.contains(body.body_handle)
    }

    /// Advance the simulation by one integration timestep.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Apply an instantaneous impulse to a body.
    pub fn apply_impulse(&mut self, body: &PhysicsBody, impulse: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.apply_impulse(vec2_to_na(impulse), true);
        }
    }

    /// Set the linear velocity of a body directly.
    pub fn set_velocity(&mut self, body: &PhysicsBody, vel: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_linvel(vec2_to_na(vel), true);
        }
    }

    /// Get the current linear velocity of a body.
    pub fn velocity(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec2(rb.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Per-body multiplier applied to world gravity. Missing bodies report 0.
    pub fn gravity_scale(&self, body: &PhysicsBody) -> f32 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| rb.gravity_scale())
            .unwrap_or(0.0)
    }

    pub fn set_gravity_scale(&mut self, body: &PhysicsBody, scale: f32) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_gravity_scale(scale, true);
        }
    }

    /// Get the current position and rotation of a body.
    pub fn body_position(&self, body: &PhysicsBody) -> (Vec2, f32) {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_iso_to_pos_rot(rb.position()))
            .unwrap_or((Vec2::ZERO, 0.0))
    }

    /// Teleport a body. Its velocity is kept.
    pub fn set_body_position(&mut self, body: &PhysicsBody, pos: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_translation(vec2_to_na(pos), true);
        }
    }

    /// Number of rigid bodies in the simulation.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Query the collider shape of a physics body.
    /// Returns `None` if the collider no longer exists or has an unsupported shape.
    pub fn collider_shape(&self, body: &PhysicsBody) -> Option<ColliderDesc> {
        let collider = self.colliders.get(body.collider_handle)?;
        let shape = collider.shape();
        if let Some(ball) = shape.as_ball() {
            Some(ColliderDesc::Ball { radius: ball.radius })
        } else if let Some(cuboid) = shape.as_cuboid() {
            Some(ColliderDesc::Cuboid {
                half_width: cuboid.half_extents.x,
                half_height: cuboid.half_extents.y,
            })
        } else if let Some(capsule) = shape.as_capsule() {
            Some(ColliderDesc::CapsuleY {
                half_height: capsule.half_height(),
                radius: capsule.radius,
            })
        } else {
            None
        }
    }

    /// Friction coefficient of the body's collider.
    pub fn collider_friction(&self, body: &PhysicsBody) -> Option<f32> {
        self.colliders
            .get(body.collider_handle)
            .map(|c| c.friction())
    }

    /// Cast a ray and return the closest hit within `max_distance`.
    ///
    /// Only colliders on one of `layers` are considered. `exclude` skips a
    /// body, typically the one issuing the probe. `direction` need not be
    /// normalized; a zero direction never hits.
    pub fn cast_ray(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layers: CollisionLayers,
        exclude: Option<&PhysicsBody>,
    ) -> Option<RayHit> {
        let dir = direction.try_normalize()?;
        let ray = Ray::new(
            nalgebra::Point2::new(origin.x, origin.y),
            vec2_to_na(dir),
        );

        let mut filter = QueryFilter::new()
            .groups(InteractionGroups::new(Group::ALL, layers.to_group()));
        if let Some(body) = exclude {
            filter = filter.exclude_rigid_body(body.body_handle);
        }

        let (handle, toi) = self.query_pipeline.cast_ray(
            &self.bodies,
            &self.colliders,
            &ray,
            max_distance,
            true,
            filter,
        )?;

        Some(RayHit {
            entity: self.collider_to_entity(handle),
            distance: toi,
            point: origin + dir * toi,
        })
    }

    // -- private helpers --

    fn collider_to_entity(&self, collider_handle: ColliderHandle) -> Option<EntityId> {
        let collider = self.colliders.get(collider_handle)?;
        let body_handle = collider.parent()?;
        let body = self.bodies.get(body_handle)?;
        Some(EntityId(body.user_data as u32))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
