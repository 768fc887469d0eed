// Eight-way facing derived from motion

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compass facing used to pick directional animation clips
///
/// Screen coordinates: +x is east, +y is south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "NE")]
    NorthEast,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "SE")]
    SouthEast,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "SW")]
    SouthWest,
    #[serde(rename = "W")]
    West,
    #[serde(rename = "NW")]
    NorthWest,
}

impl Default for Orientation {
    fn default() -> Self {
        Self::South
    }
}

impl Orientation {
    /// All facings, clockwise from north
    pub const ALL: [Orientation; 8] = [
        Orientation::North,
        Orientation::NorthEast,
        Orientation::East,
        Orientation::SouthEast,
        Orientation::South,
        Orientation::SouthWest,
        Orientation::West,
        Orientation::NorthWest,
    ];

    /// Derive a facing from the sign pattern of a motion vector
    ///
    /// The vertical component picks S/N, the horizontal one E/W, vertical
    /// first. Returns `None` for a zero (or non-finite) vector.
    pub fn from_vector(v: Vec2) -> Option<Self> {
        if !v.is_finite() {
            return None;
        }
        let south = v.y > 0.0;
        let north = v.y < 0.0;
        let east = v.x > 0.0;
        let west = v.x < 0.0;

        match (north, south, east, west) {
            (true, _, true, _) => Some(Self::NorthEast),
            (true, _, _, true) => Some(Self::NorthWest),
            (true, _, _, _) => Some(Self::North),
            (_, true, true, _) => Some(Self::SouthEast),
            (_, true, _, true) => Some(Self::SouthWest),
            (_, true, _, _) => Some(Self::South),
            (_, _, true, _) => Some(Self::East),
            (_, _, _, true) => Some(Self::West),
            _ => None,
        }
    }

    /// Compass label, as used in clip keys ("N", "SE", ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::North => "N",
            Self::NorthEast => "NE",
            Self::East => "E",
            Self::SouthEast => "SE",
            Self::South => "S",
            Self::SouthWest => "SW",
            Self::West => "W",
            Self::NorthWest => "NW",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_patterns() {
        assert_eq!(Orientation::from_vector(Vec2::new(5.0, 5.0)), Some(Orientation::SouthEast));
        assert_eq!(Orientation::from_vector(Vec2::new(-3.0, 0.0)), Some(Orientation::West));
        assert_eq!(Orientation::from_vector(Vec2::new(0.0, -7.0)), Some(Orientation::North));
        assert_eq!(Orientation::from_vector(Vec2::new(-1.0, -1.0)), Some(Orientation::NorthWest));
        assert_eq!(Orientation::from_vector(Vec2::new(0.2, -9.0)), Some(Orientation::NorthEast));
        assert_eq!(Orientation::from_vector(Vec2::new(-4.0, 0.5)), Some(Orientation::SouthWest));
    }

    #[test]
    fn test_zero_vector_has_no_orientation() {
        assert_eq!(Orientation::from_vector(Vec2::ZERO), None);
        assert_eq!(Orientation::from_vector(Vec2::new(f32::NAN, 1.0)), None);
    }

    #[test]
    fn test_magnitude_does_not_matter() {
        for dir in [(1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (-1.0, 1.0), (-1.0, -1.0)] {
            let unit = Vec2::new(dir.0, dir.1);
            assert_eq!(
                Orientation::from_vector(unit),
                Orientation::from_vector(unit * 250.0)
            );
        }
    }

    #[test]
    fn test_every_nonzero_pattern_maps_to_one_of_eight() {
        let mut seen = std::collections::HashSet::new();
        for x in [-1.0, 0.0, 1.0] {
            for y in [-1.0, 0.0, 1.0] {
                if let Some(o) = Orientation::from_vector(Vec2::new(x, y)) {
                    assert!(Orientation::ALL.contains(&o));
                    seen.insert(o);
                }
            }
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn test_labels_vertical_then_horizontal() {
        assert_eq!(Orientation::SouthEast.to_string(), "SE");
        assert_eq!(Orientation::NorthWest.as_str(), "NW");
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Orientation::SouthWest).unwrap();
        assert_eq!(json, "\"SW\"");
        let parsed: Orientation = serde_json::from_str("\"NE\"").unwrap();
        assert_eq!(parsed, Orientation::NorthEast);
    }
}
