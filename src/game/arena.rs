// Arena: owns every character and drives them tick by tick
//
// Per tick and per character the order is fixed: pursuit decision, apply
// its motion/fire commands, then advance the animation (which may close an
// attack or remove a dead character). Physics and projectile expiry run
// once all characters are done, so a projectile fired this tick exists
// before the next tick's AI pass.

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::characters::{
    ActionState, AnimationLibrary, CatalogError, Character, CharacterCatalog, CharacterId,
    CharacterRegistry, CycleOutcome,
};
use super::projectile::{ProjectileFactory, ProjectileId, ProjectileManager, ProjectileRequest};
use super::pursuit::PursuitConfig;
use crate::core::math::is_finite_vec;
use crate::engine::game_loop::FIXED_TIMESTEP;
use crate::engine::physics::{Kinematics, PhysicsWorld, RigidBodyHandle};

/// Arena errors
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Invalid spawn position: {0:?}")]
    InvalidPosition(Vec2),
}

/// Arena-wide settings
#[derive(Debug, Clone, Copy)]
pub struct ArenaConfig {
    /// Seed for every random decision made in the arena
    pub seed: u64,
    /// Physics timestep used until `tick` is called with another one
    pub timestep: f32,
    /// Pursuit tuning given to every spawned character
    pub pursuit: PursuitConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            timestep: FIXED_TIMESTEP,
            pursuit: PursuitConfig::default(),
        }
    }
}

/// Physics world plus the projectiles living in it
///
/// This is what characters see of the world: body positions, velocity
/// setters and a projectile factory.
pub struct Stage {
    pub physics: PhysicsWorld,
    pub projectiles: ProjectileManager,
}

impl Stage {
    pub fn new(timestep: f32) -> Self {
        Self {
            physics: PhysicsWorld::new(timestep),
            projectiles: ProjectileManager::new(),
        }
    }
}

impl Kinematics for Stage {
    fn body_position(&self, body: RigidBodyHandle) -> Option<Vec2> {
        self.physics.body_position(body)
    }

    fn set_body_velocity(&mut self, body: RigidBodyHandle, velocity: Vec2) {
        self.physics.set_body_velocity(body, velocity);
    }
}

impl ProjectileFactory for Stage {
    fn spawn_projectile(&mut self, request: ProjectileRequest) -> ProjectileId {
        self.projectiles.spawn(&mut self.physics, request)
    }
}

/// The arena simulation
pub struct Arena {
    catalog: CharacterCatalog,
    library: AnimationLibrary,
    characters: CharacterRegistry,
    stage: Stage,
    rng: ChaCha8Rng,
    config: ArenaConfig,
    tick_count: u64,
}

impl Arena {
    /// Create an empty arena; builds the animation library for every type in
    /// the catalog
    pub fn new(catalog: CharacterCatalog, config: ArenaConfig) -> Self {
        let library = AnimationLibrary::build(catalog.types());
        log::info!(
            "Arena ready: {} character types, {} clips, seed {:#x}",
            catalog.len(),
            library.len(),
            config.seed
        );

        Self {
            catalog,
            library,
            characters: CharacterRegistry::new(),
            stage: Stage::new(config.timestep),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            tick_count: 0,
        }
    }

    /// Spawn a character of `character_type` at `position`
    pub fn spawn(&mut self, character_type: &str, position: Vec2) -> Result<CharacterId, ArenaError> {
        if !is_finite_vec(position) {
            return Err(ArenaError::InvalidPosition(position));
        }
        let profile = self.catalog.get(character_type)?;
        let physics = &mut self.stage.physics;
        let pursuit = self.config.pursuit;

        let id = self.characters.insert_with(|id| {
            let mut character = Character::spawn(id, character_type, profile, physics, position);
            character.pursuit.set_config(pursuit);
            character
        });
        Ok(id)
    }

    /// Forward a motion command; `false` if the id is stale or the command
    /// was refused
    pub fn set_motion(&mut self, id: CharacterId, vector: Vec2) -> bool {
        match self.characters.get_mut(id) {
            Some(character) => character.set_motion(vector, &mut self.stage),
            None => false,
        }
    }

    /// Forward a fire command
    pub fn fire(&mut self, id: CharacterId, target: Vec2) -> Option<ProjectileId> {
        self.characters
            .get_mut(id)?
            .fire(target, &mut self.stage)
    }

    /// Kill a character; `false` if the id is stale
    pub fn kill(&mut self, id: CharacterId) -> bool {
        match self.characters.get_mut(id) {
            Some(character) => {
                character.die(&mut self.stage);
                true
            }
            None => false,
        }
    }

    /// Make `id` stalk `target`; `false` if either id is stale
    pub fn attach_ai(&mut self, id: CharacterId, target: CharacterId) -> bool {
        if !self.characters.contains(target) {
            return false;
        }
        match self.characters.get_mut(id) {
            Some(character) => {
                character.pursuit.attach(target);
                log::debug!("{} now pursues {}", id, target);
                true
            }
            None => false,
        }
    }

    /// Turn off `id`'s pursuit controller; `false` if the id is stale
    pub fn detach_ai(&mut self, id: CharacterId) -> bool {
        match self.characters.get_mut(id) {
            Some(character) => {
                character.pursuit.detach();
                true
            }
            None => false,
        }
    }

    /// Deliver a clip-cycle event from an external animation driver
    pub fn on_animation_cycle_complete(&mut self, id: CharacterId, clip: ActionState) -> CycleOutcome {
        let Some(character) = self.characters.get_mut(id) else {
            return CycleOutcome::Ignored;
        };
        let outcome = character.on_animation_cycle_complete(clip);
        if outcome == CycleOutcome::Destroy {
            self.destroy(id);
        }
        outcome
    }

    /// Run one tick of `dt` seconds; a negative or non-finite `dt` is
    /// rejected and nothing advances
    pub fn tick(&mut self, dt: f32) {
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("Rejected tick with invalid dt {}", dt);
            return;
        }

        for id in self.characters.ids() {
            self.run_pursuit(id);
            self.advance_animation(id, dt);
        }

        self.stage.physics.set_timestep(dt);
        self.stage.physics.step();
        self.stage.projectiles.update(&mut self.stage.physics);
        self.tick_count += 1;
    }

    fn run_pursuit(&mut self, id: CharacterId) {
        let Some(character) = self.characters.get(id) else {
            return;
        };
        let Some(target) = character.pursuit.target() else {
            return;
        };
        let Some(own) = character.position(&self.stage) else {
            return;
        };

        let target_position = self
            .characters
            .get(target)
            .and_then(|t| t.position(&self.stage));
        let Some(target_position) = target_position else {
            log::debug!("{} lost its target {}, detaching", id, target);
            if let Some(character) = self.characters.get_mut(id) {
                character.pursuit.detach();
            }
            return;
        };

        let Some(decision) = character.pursuit.decide(own, target_position, &mut self.rng) else {
            return;
        };
        log::trace!("{} pursuit: {:?}", id, decision);

        let Some(character) = self.characters.get_mut(id) else {
            return;
        };
        character.set_motion(decision.step, &mut self.stage);
        if let Some(aim) = decision.aim {
            character.fire(aim, &mut self.stage);
        }
    }

    fn advance_animation(&mut self, id: CharacterId, dt: f32) {
        let outcome = match self.characters.get_mut(id) {
            Some(character) => character.update_animation(dt, &self.library),
            None => return,
        };
        if outcome == CycleOutcome::Destroy {
            self.destroy(id);
        }
    }

    fn destroy(&mut self, id: CharacterId) {
        if let Some(character) = self.characters.remove(id) {
            self.stage.physics.remove_rigid_body(character.body_handle);
            log::info!("{} {} removed from the arena", character.character_type, id);
        }
    }

    /// Get a character by id
    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(id)
    }

    /// Get a character's current position
    pub fn position(&self, id: CharacterId) -> Option<Vec2> {
        self.characters.get(id)?.position(&self.stage)
    }

    /// Get a character's current velocity
    pub fn velocity(&self, id: CharacterId) -> Option<Vec2> {
        let character = self.characters.get(id)?;
        self.stage.physics.velocity(character.body_handle)
    }

    pub fn characters(&self) -> &CharacterRegistry {
        &self.characters
    }

    pub fn projectiles(&self) -> &ProjectileManager {
        &self.stage.projectiles
    }

    pub fn catalog(&self) -> &CharacterCatalog {
        &self.catalog
    }

    pub fn library(&self) -> &AnimationLibrary {
        &self.library
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Number of ticks run so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
