// Asset loading functionality

use super::AssetError;
use std::path::{Path, PathBuf};

/// Supported asset types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    /// Structured game data (character catalogs, ...)
    Data,
}

impl AssetType {
    /// Get the default directory for this asset type
    pub fn default_directory(&self) -> &'static str {
        match self {
            AssetType::Data => "data",
        }
    }

    /// Get supported file extensions for this asset type
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            AssetType::Data => &["json"],
        }
    }
}

/// Asset loader responsible for finding and loading asset files
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, asset_type: AssetType, name: &str) -> PathBuf {
        self.base_path
            .join(asset_type.default_directory())
            .join(name)
    }

    /// Load an asset as UTF-8 text
    pub fn load_string(&self, asset_type: AssetType, name: &str) -> Result<String, AssetError> {
        let path = self.resolve_path(asset_type, name);

        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        std::fs::read_to_string(&path)
            .map_err(|e| AssetError::LoadError(format!("Failed to read {}: {}", name, e)))
    }

    /// Check if an asset exists
    pub fn exists(&self, asset_type: AssetType, name: &str) -> bool {
        self.resolve_path(asset_type, name).exists()
    }

    /// List all assets of a given type
    pub fn list_assets(&self, asset_type: AssetType) -> Result<Vec<String>, AssetError> {
        let dir = self.base_path.join(asset_type.default_directory());

        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut assets = Vec::new();
        let extensions = asset_type.extensions();

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();

            if !path.is_file() {
                continue;
            }
            let matches = path
                .extension()
                .is_some_and(|ext| extensions.contains(&ext.to_string_lossy().as_ref()));
            if let (true, Some(name)) = (matches, path.file_name()) {
                assets.push(name.to_string_lossy().to_string());
            }
        }

        assets.sort();
        Ok(assets)
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_type_directories() {
        assert_eq!(AssetType::Data.default_directory(), "data");
        assert!(AssetType::Data.extensions().contains(&"json"));
    }

    #[test]
    fn test_loader_path_resolution() {
        let loader = AssetLoader::new("/game/assets");
        let path = loader.resolve_path(AssetType::Data, "characters.json");

        assert_eq!(
            path.to_str().unwrap(),
            "/game/assets/data/characters.json"
        );
    }

    #[test]
    fn test_missing_asset_is_not_found() {
        let loader = AssetLoader::new("/definitely/not/here");
        let err = loader
            .load_string(AssetType::Data, "characters.json")
            .unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }

    #[test]
    fn test_default_loader_finds_bundled_catalog() {
        let loader = AssetLoader::default();
        assert!(loader.exists(AssetType::Data, "characters.json"));
        let listed = loader.list_assets(AssetType::Data).unwrap();
        assert!(listed.contains(&"characters.json".to_string()));
    }
}
