use super::collision::CollisionGroups;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    linvel: Vector<Real>,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    /// Create a new kinematic velocity-based body
    ///
    /// Arena actors are driven purely by the velocity we hand them, so the
    /// solver never pushes them around.
    pub fn new_kinematic_velocity_based() -> Self {
        Self {
            body_type: RigidBodyType::KinematicVelocityBased,
            position: Isometry::identity(),
            linvel: Vector::zeros(),
            can_sleep: false,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    /// Set the initial linear velocity
    pub fn linvel(mut self, x: Real, y: Real) -> Self {
        self.linvel = vector![x, y];
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Lock rotation (sprites never spin)
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .linvel(self.linvel)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .build()
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder2D {
    shape: SharedShape,
    offset: Vector<Real>,
    collision_groups: CollisionGroups,
    is_sensor: bool,
    active_events: ActiveEvents,
}

impl ColliderBuilder2D {
    /// Create a circle-shaped collider
    pub fn circle(radius: Real) -> Self {
        Self {
            shape: SharedShape::ball(radius),
            offset: Vector::zeros(),
            collision_groups: CollisionGroups::Default,
            is_sensor: false,
            active_events: ActiveEvents::COLLISION_EVENTS,
        }
    }

    /// Offset the shape from the body origin
    pub fn offset(mut self, x: Real, y: Real) -> Self {
        self.offset = vector![x, y];
        self
    }

    /// Set the collision groups for filtering
    pub fn collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    /// Make this a sensor (detects collisions but doesn't cause physical response)
    pub fn sensor(mut self, is_sensor: bool) -> Self {
        self.is_sensor = is_sensor;
        self
    }

    /// Build the collider
    pub fn build(self) -> Collider {
        rapier2d::prelude::ColliderBuilder::new(self.shape)
            .translation(self.offset)
            .collision_groups(self.collision_groups.to_interaction_groups())
            .sensor(self.is_sensor)
            .active_events(self.active_events)
            .active_collision_types(ActiveCollisionTypes::all())
            .build()
    }
}

/// Common rigid body configurations for arena objects
pub mod presets {
    use super::*;

    /// Create a character body (kinematic, rotation locked)
    pub fn character_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_kinematic_velocity_based()
            .position(x, y)
            .lock_rotation()
            .can_sleep(false)
            .build()
    }

    /// Create a character collider (circle with per-type offset)
    pub fn character_collider(radius: Real, offset_x: Real, offset_y: Real) -> Collider {
        ColliderBuilder2D::circle(radius)
            .offset(offset_x, offset_y)
            .collision_groups(CollisionGroups::Character)
            .build()
    }

    /// Create a projectile body already travelling along its aim
    pub fn projectile_body(x: Real, y: Real, vel_x: Real, vel_y: Real) -> RigidBody {
        BodyBuilder::new_kinematic_velocity_based()
            .position(x, y)
            .linvel(vel_x, vel_y)
            .lock_rotation()
            .can_sleep(false)
            .build()
    }

    /// Create a projectile collider (small sensor circle)
    pub fn projectile_collider(radius: Real) -> Collider {
        ColliderBuilder2D::circle(radius)
            .collision_groups(CollisionGroups::Projectile)
            .sensor(true)
            .build()
    }
}
