// Character type catalog loaded from data files

use std::collections::BTreeMap;
use std::sync::Arc;

use super::profile::CharacterProfile;
use crate::engine::assets::{AssetError, AssetLoader, AssetType};

/// Catalog file shipped with the game
pub const DEFAULT_CATALOG: &str = "characters.json";

const BUILTIN_CATALOG: &str = include_str!("../../../assets/data/characters.json");

/// Errors raised while loading or querying the catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("Malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid profile for {character_type}: {reason}")]
    Invalid {
        character_type: String,
        reason: String,
    },

    #[error("Unknown character type: {0}")]
    UnknownType(String),
}

/// Profiles of every spawnable character type, keyed by type tag
#[derive(Debug, Clone, Default)]
pub struct CharacterCatalog {
    profiles: BTreeMap<String, Arc<CharacterProfile>>,
}

impl CharacterCatalog {
    /// Parse and validate a catalog from JSON text
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let raw: BTreeMap<String, CharacterProfile> = serde_json::from_str(text)?;
        let mut catalog = Self::default();
        for (character_type, profile) in raw {
            catalog.insert(character_type, profile)?;
        }
        Ok(catalog)
    }

    /// The catalog compiled into the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Load a catalog file from the data directory
    pub fn load(loader: &AssetLoader, name: &str) -> Result<Self, CatalogError> {
        let text = loader.load_string(AssetType::Data, name)?;
        let catalog = Self::from_json(&text)?;
        log::info!("Loaded {} character types from {}", catalog.len(), name);
        Ok(catalog)
    }

    /// Add or replace a profile after validating it
    pub fn insert(
        &mut self,
        character_type: impl Into<String>,
        profile: CharacterProfile,
    ) -> Result<(), CatalogError> {
        let character_type = character_type.into();
        profile.validate().map_err(|reason| CatalogError::Invalid {
            character_type: character_type.clone(),
            reason,
        })?;
        self.profiles.insert(character_type, Arc::new(profile));
        Ok(())
    }

    /// Look up a profile by type tag
    pub fn get(&self, character_type: &str) -> Result<Arc<CharacterProfile>, CatalogError> {
        self.profiles
            .get(character_type)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownType(character_type.to_string()))
    }

    /// All type tags, sorted
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::Orientation;

    #[test]
    fn test_builtin_catalog_has_all_types() {
        let catalog = CharacterCatalog::builtin().unwrap();
        let types: Vec<&str> = catalog.types().collect();
        assert_eq!(
            types,
            [
                "fire_monster",
                "golem_monster",
                "ice_monster",
                "knight_hero",
                "mage_hero",
                "priest_hero",
                "spider_monster"
            ]
        );
    }

    #[test]
    fn test_builtin_heroes_face_north() {
        let catalog = CharacterCatalog::builtin().unwrap();
        assert_eq!(catalog.get("mage_hero").unwrap().orientation, Orientation::North);
    }

    #[test]
    fn test_unknown_type() {
        let catalog = CharacterCatalog::builtin().unwrap();
        let err = catalog.get("dragon").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownType(ref t) if t == "dragon"));
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let text = r#"{
            "slime": {
                "base_speed": -5,
                "collider": { "size": 4 },
                "projectile": { "type": "goo", "base_range": 10 }
            }
        }"#;
        let err = CharacterCatalog::from_json(text).unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { ref character_type, .. } if character_type == "slime"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            CharacterCatalog::from_json("{ nope").unwrap_err(),
            CatalogError::Parse(_)
        ));
    }

    #[test]
    fn test_load_from_asset_directory() {
        let catalog = CharacterCatalog::load(&AssetLoader::default(), DEFAULT_CATALOG).unwrap();
        assert_eq!(catalog.len(), 7);
    }
}
