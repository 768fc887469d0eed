// Pursuit AI
//
// Stalks a single target: step toward it on both axes and take a shot most
// ticks while it is within the engagement radius. The target is held as a
// registry id, never a reference, so a destroyed target simply stops
// resolving.

use glam::Vec2;
use rand::Rng;

use super::characters::CharacterId;
use crate::core::math::{is_finite_vec, step_toward};

/// Default engagement radius (world units)
pub const DEFAULT_ENGAGEMENT_RADIUS: f32 = 300.0;
/// Default probability of firing on an in-range tick
pub const DEFAULT_FIRE_CHANCE: f64 = 0.85;
/// Default half-width of the uniform aim jitter
pub const DEFAULT_AIM_JITTER: f32 = 12.5;

/// Tuning for a pursuit controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PursuitConfig {
    engagement_radius: f32,
    fire_chance: f64,
    aim_jitter: f32,
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self {
            engagement_radius: DEFAULT_ENGAGEMENT_RADIUS,
            fire_chance: DEFAULT_FIRE_CHANCE,
            aim_jitter: DEFAULT_AIM_JITTER,
        }
    }
}

impl PursuitConfig {
    /// Build a config, clamping every value into its usable range
    pub fn new(engagement_radius: f32, fire_chance: f64, aim_jitter: f32) -> Self {
        Self::default()
            .with_engagement_radius(engagement_radius)
            .with_fire_chance(fire_chance)
            .with_aim_jitter(aim_jitter)
    }

    pub fn with_engagement_radius(mut self, radius: f32) -> Self {
        self.engagement_radius = if radius.is_nan() { 0.0 } else { radius.max(0.0) };
        self
    }

    pub fn with_fire_chance(mut self, chance: f64) -> Self {
        self.fire_chance = if chance.is_nan() { 0.0 } else { chance.clamp(0.0, 1.0) };
        self
    }

    pub fn with_aim_jitter(mut self, jitter: f32) -> Self {
        self.aim_jitter = if jitter.is_finite() { jitter.abs() } else { 0.0 };
        self
    }

    pub fn engagement_radius(&self) -> f32 {
        self.engagement_radius
    }

    pub fn fire_chance(&self) -> f64 {
        self.fire_chance
    }

    pub fn aim_jitter(&self) -> f32 {
        self.aim_jitter
    }
}

/// Commands produced by one pursuit tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PursuitDecision {
    /// Per-axis step toward the target, each component -1, 0 or +1
    pub step: Vec2,
    /// Where to shoot this tick, if at all
    pub aim: Option<Vec2>,
}

/// Per-character pursuit controller
#[derive(Debug, Clone, Default)]
pub struct PursuitAi {
    target: Option<CharacterId>,
    enabled: bool,
    config: PursuitConfig,
}

impl PursuitAi {
    pub fn new(config: PursuitConfig) -> Self {
        Self {
            target: None,
            enabled: false,
            config,
        }
    }

    /// Start stalking `target`, replacing any previous binding
    pub fn attach(&mut self, target: CharacterId) {
        self.enabled = true;
        self.target = Some(target);
    }

    /// Stop stalking and forget the target
    pub fn detach(&mut self) {
        self.enabled = false;
        self.target = None;
    }

    /// Bound target, if the controller is on
    pub fn target(&self) -> Option<CharacterId> {
        if self.enabled {
            self.target
        } else {
            None
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn config(&self) -> &PursuitConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PursuitConfig) {
        self.config = config;
    }

    /// Decide this tick's commands given both positions
    ///
    /// Returns `None` when detached, when the target is beyond the engagement
    /// radius, or when either position is not finite.
    pub fn decide<R: Rng + ?Sized>(
        &self,
        own: Vec2,
        target_position: Vec2,
        rng: &mut R,
    ) -> Option<PursuitDecision> {
        self.target()?;
        if !is_finite_vec(own) || !is_finite_vec(target_position) {
            return None;
        }
        if own.distance(target_position) > self.config.engagement_radius {
            return None;
        }

        let step = step_toward(own, target_position);
        let aim = if rng.gen_bool(self.config.fire_chance) {
            let jitter = self.config.aim_jitter;
            Some(
                target_position
                    + Vec2::new(rng.gen_range(-jitter..=jitter), rng.gen_range(-jitter..=jitter)),
            )
        } else {
            None
        };

        Some(PursuitDecision { step, aim })
    }
}
