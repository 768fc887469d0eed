// Character entity
//
// Wires the action state machine to its collaborators: the body that carries
// it (velocity out, position in), the animation player and the projectile
// service. The character never reaches into physics beyond that.

use std::sync::Arc;

use glam::Vec2;

use super::animation::{AnimationLibrary, AnimationPlayer, ClipKey};
use super::orientation::Orientation;
use super::profile::CharacterProfile;
use super::registry::CharacterId;
use super::state::{ActionState, CharacterStateMachine, CycleOutcome};
use crate::core::math::is_finite_vec;
use crate::engine::physics::{presets, ColliderHandle, Kinematics, PhysicsWorld, RigidBodyHandle};
use crate::game::projectile::{ProjectileFactory, ProjectileId, ProjectileRequest};
use crate::game::pursuit::PursuitAi;

/// A hero or monster in the arena
#[derive(Debug)]
pub struct Character {
    /// Registry id
    pub id: CharacterId,
    /// Type tag (e.g. "knight_hero")
    pub character_type: String,
    /// Shared per-type configuration
    pub profile: Arc<CharacterProfile>,

    // Physics
    /// Handle to the character's rigid body in the physics world
    pub body_handle: RigidBodyHandle,
    /// Handle to the character's collider
    pub collider_handle: ColliderHandle,

    /// Optional pursuit controller
    pub pursuit: PursuitAi,

    state_machine: CharacterStateMachine,
    animation: AnimationPlayer,
}

impl Character {
    /// Wrap an already created body
    pub fn new(
        id: CharacterId,
        character_type: &str,
        profile: Arc<CharacterProfile>,
        body_handle: RigidBodyHandle,
        collider_handle: ColliderHandle,
    ) -> Self {
        let mut character = Self {
            id,
            character_type: character_type.to_string(),
            state_machine: CharacterStateMachine::new(profile.orientation),
            profile,
            body_handle,
            collider_handle,
            pursuit: PursuitAi::default(),
            animation: AnimationPlayer::new(),
        };
        character.play_current_clip();
        character
    }

    /// Create a character and add its body to the physics world
    pub fn spawn(
        id: CharacterId,
        character_type: &str,
        profile: Arc<CharacterProfile>,
        physics: &mut PhysicsWorld,
        position: Vec2,
    ) -> Self {
        let body_handle = physics.add_rigid_body(presets::character_body(position.x, position.y));
        let collider = presets::character_collider(
            profile.collider.size,
            profile.collider.offset.x,
            profile.collider.offset.y,
        );
        let collider_handle = physics.add_collider(collider, body_handle);

        log::debug!("Spawned {} {} at {:?}", character_type, id, position);
        Self::new(id, character_type, profile, body_handle, collider_handle)
    }

    /// Move along `vector` (scaled by the base speed)
    ///
    /// Silently ignored while dying or mid-attack. Returns whether the
    /// command was honored.
    pub fn set_motion<K: Kinematics>(&mut self, vector: Vec2, body: &mut K) -> bool {
        if !self.state_machine.set_motion(vector) {
            return false;
        }

        body.set_body_velocity(self.body_handle, vector * self.profile.base_speed);
        self.play_current_clip();
        true
    }

    /// Attack toward `target`, launching this type's projectile
    ///
    /// Returns the projectile id, or `None` if the character is dying,
    /// already attacking, has no body, or the target is not finite.
    pub fn fire<S>(&mut self, target: Vec2, stage: &mut S) -> Option<ProjectileId>
    where
        S: Kinematics + ProjectileFactory,
    {
        if !is_finite_vec(target) {
            log::warn!("{} rejected non-finite fire target {:?}", self.id, target);
            return None;
        }
        let position = stage.body_position(self.body_handle)?;
        if !self.state_machine.fire() {
            return None;
        }

        self.play_current_clip();
        stage.set_body_velocity(self.body_handle, Vec2::ZERO);

        let projectile = &self.profile.projectile;
        let id = stage.spawn_projectile(ProjectileRequest {
            owner: self.id,
            kind: projectile.kind.clone(),
            origin: self.profile.muzzle(position),
            target,
            range: projectile.base_range,
            speed: projectile.speed,
        });
        Some(id)
    }

    /// Kill the character. Overrides whatever it was doing.
    pub fn die<K: Kinematics>(&mut self, body: &mut K) {
        if self.state_machine.is_alive() {
            log::info!("{} {} dies", self.character_type, self.id);
        }
        self.state_machine.die();
        body.set_body_velocity(self.body_handle, Vec2::ZERO);
        self.play_current_clip();
    }

    /// Called by the animation service each time a clip finishes a cycle
    pub fn on_animation_cycle_complete(&mut self, clip: ActionState) -> CycleOutcome {
        let outcome = self.state_machine.animation_cycle_complete(clip);
        match outcome {
            CycleOutcome::ReturnedToIdle => self.play_current_clip(),
            CycleOutcome::Destroy => {
                log::debug!("{} {} death clip finished", self.character_type, self.id)
            }
            CycleOutcome::Ignored => {}
        }
        outcome
    }

    /// Advance the clip and deliver the cycle-end event for attack and death
    /// clips
    pub fn update_animation(&mut self, dt: f32, library: &AnimationLibrary) -> CycleOutcome {
        self.state_machine.update(dt);

        if self.animation.update(dt, library) == 0 {
            return CycleOutcome::Ignored;
        }
        match self.animation.current_clip().map(|clip| clip.action) {
            Some(action) if action.notifies_cycle_end() => self.on_animation_cycle_complete(action),
            _ => CycleOutcome::Ignored,
        }
    }

    fn play_current_clip(&mut self) {
        self.animation.play(ClipKey::new(
            &self.character_type,
            self.state_machine.state(),
            self.state_machine.orientation(),
        ));
    }

    /// Get character's current position
    pub fn position<K: Kinematics>(&self, body: &K) -> Option<Vec2> {
        body.body_position(self.body_handle)
    }

    /// Get the current action state
    pub fn state(&self) -> ActionState {
        self.state_machine.state()
    }

    /// Get the current facing
    pub fn orientation(&self) -> Orientation {
        self.state_machine.orientation()
    }

    /// Last accepted motion vector
    pub fn motion(&self) -> Vec2 {
        self.state_machine.motion()
    }

    /// Check if character is alive
    pub fn is_alive(&self) -> bool {
        self.state_machine.is_alive()
    }

    /// Whether an attack clip is still running
    pub fn is_attack_in_progress(&self) -> bool {
        self.state_machine.is_attack_in_progress()
    }

    /// Clip the animation service was last asked to play
    pub fn current_clip(&self) -> Option<&ClipKey> {
        self.animation.current_clip()
    }

    /// Read-only view of the state machine
    pub fn state_machine(&self) -> &CharacterStateMachine {
        &self.state_machine
    }
}
