// Per-type character configuration
//
// Every character type (knight_hero, fire_monster, ...) has one profile in
// the catalog; characters of that type share it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::orientation::Orientation;

/// 2D offset as written in data files
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl From<Offset> for Vec2 {
    fn from(offset: Offset) -> Self {
        Vec2::new(offset.x, offset.y)
    }
}

/// Circle collider attached to the character body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColliderConfig {
    /// Circle radius in world units
    pub size: f32,
    /// Circle center relative to the body origin
    #[serde(default)]
    pub offset: Offset,
}

/// What the character fires and from where
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileConfig {
    /// Projectile type tag handed to the projectile service
    #[serde(rename = "type")]
    pub kind: String,
    /// Muzzle position relative to the body origin, before scaling
    #[serde(default)]
    pub fire_offset: Offset,
    /// Distance the projectile travels before it expires
    pub base_range: f32,
    /// Travel speed (units/second)
    #[serde(default = "default_projectile_speed")]
    pub speed: f32,
}

fn default_projectile_speed() -> f32 {
    240.0
}

/// Static properties of one character type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProfile {
    /// Movement speed (units/second per unit of motion vector)
    pub base_speed: f32,
    /// Sprite scale; also scales the muzzle offset
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Facing when spawned
    #[serde(default)]
    pub orientation: Orientation,
    pub collider: ColliderConfig,
    pub projectile: ProjectileConfig,
}

fn default_scale() -> f32 {
    1.0
}

impl CharacterProfile {
    /// Check the numeric invariants the behaviour code relies on
    pub fn validate(&self) -> Result<(), String> {
        if !self.base_speed.is_finite() || self.base_speed < 0.0 {
            return Err(format!("base_speed must be finite and >= 0, got {}", self.base_speed));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(format!("scale must be > 0, got {}", self.scale));
        }
        if !self.collider.size.is_finite() || self.collider.size <= 0.0 {
            return Err(format!("collider.size must be > 0, got {}", self.collider.size));
        }
        let offsets = [self.collider.offset, self.projectile.fire_offset];
        if offsets.iter().any(|o| !o.x.is_finite() || !o.y.is_finite()) {
            return Err("offsets must be finite".to_string());
        }
        if !self.projectile.base_range.is_finite() || self.projectile.base_range <= 0.0 {
            return Err(format!(
                "projectile.base_range must be > 0, got {}",
                self.projectile.base_range
            ));
        }
        if !self.projectile.speed.is_finite() || self.projectile.speed <= 0.0 {
            return Err(format!("projectile.speed must be > 0, got {}", self.projectile.speed));
        }
        Ok(())
    }

    /// Muzzle position for a body at `position`
    pub fn muzzle(&self, position: Vec2) -> Vec2 {
        position + Vec2::from(self.projectile.fire_offset) * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CharacterProfile {
        serde_json::from_str(
            r#"{
                "base_speed": 80,
                "scale": 2.0,
                "collider": { "size": 14, "offset": { "x": 0, "y": 6 } },
                "projectile": {
                    "type": "arcane_bolt",
                    "fire_offset": { "x": 8, "y": -16 },
                    "base_range": 320
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let profile = sample();
        assert_eq!(profile.orientation, Orientation::South);
        assert_eq!(profile.projectile.speed, 240.0);
        assert_eq!(profile.projectile.kind, "arcane_bolt");
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_muzzle_scales_offset() {
        let profile = sample();
        assert_eq!(
            profile.muzzle(Vec2::new(100.0, 50.0)),
            Vec2::new(116.0, 18.0)
        );
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        let mut profile = sample();
        profile.base_speed = f32::NAN;
        assert!(profile.validate().is_err());

        let mut profile = sample();
        profile.scale = 0.0;
        assert!(profile.validate().is_err());

        let mut profile = sample();
        profile.projectile.base_range = -1.0;
        assert!(profile.validate().is_err());
    }
}
