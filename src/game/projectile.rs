// Projectile service
//
// Characters only ask for a projectile and get an id back; flight and
// expiry live here. Hit detection and damage are not modelled.

use glam::Vec2;

use super::characters::CharacterId;
use crate::engine::physics::{presets, Kinematics, PhysicsWorld, RigidBodyHandle};

/// Radius of the projectile sensor
const PROJECTILE_RADIUS: f32 = 4.0;

/// Identifier of a spawned projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectileId(pub u64);

/// Everything needed to launch a projectile
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileRequest {
    /// Character that fired it
    pub owner: CharacterId,
    /// Projectile type tag
    pub kind: String,
    /// Muzzle position in world space
    pub origin: Vec2,
    /// Aim point in world space
    pub target: Vec2,
    /// Distance travelled before expiring
    pub range: f32,
    /// Travel speed (units/second)
    pub speed: f32,
}

/// Creates projectiles on behalf of characters
pub trait ProjectileFactory {
    fn spawn_projectile(&mut self, request: ProjectileRequest) -> ProjectileId;
}

/// A projectile in flight
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: ProjectileId,
    pub owner: CharacterId,
    pub kind: String,
    pub origin: Vec2,
    pub range: f32,
    pub body_handle: RigidBodyHandle,
}

/// Tracks every projectile in flight
#[derive(Debug, Default)]
pub struct ProjectileManager {
    projectiles: Vec<Projectile>,
    next_id: u64,
}

impl ProjectileManager {
    pub fn new() -> Self {
        Self {
            projectiles: Vec::new(),
            next_id: 0,
        }
    }

    /// Launch a projectile from `request.origin` toward `request.target`
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, request: ProjectileRequest) -> ProjectileId {
        let id = ProjectileId(self.next_id);
        self.next_id += 1;

        let velocity = (request.target - request.origin).normalize_or_zero() * request.speed;
        let body_handle = physics.add_rigid_body(presets::projectile_body(
            request.origin.x,
            request.origin.y,
            velocity.x,
            velocity.y,
        ));
        physics.add_collider(presets::projectile_collider(PROJECTILE_RADIUS), body_handle);

        log::debug!(
            "Projectile {} ({}) from {} at {:?} toward {:?}",
            id.0,
            request.kind,
            request.owner,
            request.origin,
            request.target
        );

        self.projectiles.push(Projectile {
            id,
            owner: request.owner,
            kind: request.kind,
            origin: request.origin,
            range: request.range,
            body_handle,
        });
        id
    }

    /// Despawn projectiles that went past their range or are not moving
    pub fn update(&mut self, physics: &mut PhysicsWorld) {
        self.projectiles.retain(|projectile| {
            let position = physics.body_position(projectile.body_handle);
            let moving = physics
                .velocity(projectile.body_handle)
                .is_some_and(|v| v != Vec2::ZERO);
            let spent = match position {
                Some(position) => !moving || position.distance(projectile.origin) >= projectile.range,
                None => true,
            };
            if spent {
                log::trace!("Projectile {} expired", projectile.id.0);
                physics.remove_rigid_body(projectile.body_handle);
            }
            !spent
        });
    }

    /// Get a projectile by id
    pub fn get(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id == id)
    }

    /// Get all projectiles in flight
    pub fn all(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Get the number of projectiles in flight
    pub fn count(&self) -> usize {
        self.projectiles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn request(target: Vec2) -> ProjectileRequest {
        ProjectileRequest {
            owner: CharacterId::new(0, 0),
            kind: "fireball".to_string(),
            origin: Vec2::ZERO,
            target,
            range: 10.0,
            speed: 60.0,
        }
    }

    #[test]
    fn test_spawn_travels_toward_target() {
        let mut physics = PhysicsWorld::new(1.0 / 60.0);
        let mut projectiles = ProjectileManager::new();
        let id = projectiles.spawn(&mut physics, request(Vec2::new(0.0, 100.0)));

        let handle = projectiles.get(id).unwrap().body_handle;
        let velocity = physics.velocity(handle).unwrap();
        assert_relative_eq!(velocity.x, 0.0);
        assert_relative_eq!(velocity.y, 60.0);
    }

    #[test]
    fn test_expires_after_range() {
        let mut physics = PhysicsWorld::new(1.0 / 60.0);
        let mut projectiles = ProjectileManager::new();
        projectiles.spawn(&mut physics, request(Vec2::new(100.0, 0.0)));

        // 60 u/s at 60 Hz covers the 10 unit range in 10 steps
        for _ in 0..5 {
            physics.step();
            projectiles.update(&mut physics);
        }
        assert_eq!(projectiles.count(), 1);

        for _ in 0..10 {
            physics.step();
            projectiles.update(&mut physics);
        }
        assert_eq!(projectiles.count(), 0);
        assert_eq!(physics.body_count(), 0);
    }

    #[test]
    fn test_degenerate_aim_expires_immediately() {
        let mut physics = PhysicsWorld::new(1.0 / 60.0);
        let mut projectiles = ProjectileManager::new();
        let id = projectiles.spawn(&mut physics, request(Vec2::ZERO));
        assert!(projectiles.get(id).is_some());

        projectiles.update(&mut physics);
        assert!(projectiles.get(id).is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut physics = PhysicsWorld::new(1.0 / 60.0);
        let mut projectiles = ProjectileManager::new();
        let a = projectiles.spawn(&mut physics, request(Vec2::X));
        let b = projectiles.spawn(&mut physics, request(Vec2::Y));
        assert_ne!(a, b);
        assert_eq!(projectiles.all().len(), 2);
    }
}
