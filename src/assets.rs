//! Base mannequin model lookup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::AssetsConfig;
use crate::error::{AssetError, Result};
use crate::shape::Gender;

/// Resolves per-gender base models under the configured directory.
#[derive(Debug)]
pub struct ModelCatalog {
    /// Base directory for models
    models_dir: PathBuf,
    /// Cached model paths (gender -> absolute path)
    models: HashMap<Gender, PathBuf>,
}

impl ModelCatalog {
    /// Create a catalog from configuration and scan for the model files
    pub fn new(config: &AssetsConfig) -> Self {
        let models_dir = if config.models_dir.is_absolute() {
            config.models_dir.clone()
        } else {
            std::env::current_dir()
                .unwrap_or_default()
                .join(&config.models_dir)
        };

        let mut catalog = Self {
            models_dir,
            models: HashMap::new(),
        };
        catalog.scan(config);
        catalog
    }

    /// Scan the models directory and cache the files that are present
    fn scan(&mut self, config: &AssetsConfig) {
        if !self.models_dir.exists() {
            tracing::warn!(
                "Models directory does not exist: {}",
                self.models_dir.display()
            );
            return;
        }

        for (gender, filename) in [
            (Gender::Neutral, &config.neutral_model),
            (Gender::Male, &config.male_model),
            (Gender::Female, &config.female_model),
        ] {
            let path = self.models_dir.join(filename);
            if path.exists() {
                tracing::debug!("Found base model: {} -> {}", gender, filename);
                self.models.insert(gender, path);
            } else {
                tracing::warn!("Base model not found: {} ({})", gender, path.display());
            }
        }
    }

    /// Path of the base model for `gender`, falling back to the neutral
    /// model when the gendered one is missing
    pub fn model_for(&self, gender: Gender) -> Result<&Path> {
        self.models
            .get(&gender)
            .or_else(|| self.models.get(&Gender::Neutral))
            .map(PathBuf::as_path)
            .ok_or_else(|| AssetError::NotFound(format!("base model for {}", gender)).into())
    }

    /// Whether a model file was found for `gender` itself (no fallback)
    pub fn has_model(&self, gender: Gender) -> bool {
        self.models.contains_key(&gender)
    }

    /// Get the models directory
    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_models() -> (TempDir, AssetsConfig) {
        let dir = TempDir::new().unwrap();

        std::fs::write(dir.path().join("neutral_base.glb"), b"fake glb data").unwrap();
        std::fs::write(dir.path().join("male_base.glb"), b"fake glb data").unwrap();

        let mut config = AssetsConfig::default();
        config.models_dir = dir.path().to_path_buf();

        (dir, config)
    }

    #[test]
    fn test_catalog_resolves_models() {
        let (_dir, config) = create_test_models();
        let catalog = ModelCatalog::new(&config);

        assert!(catalog.has_model(Gender::Male));
        assert!(catalog.has_model(Gender::Neutral));
        assert!(catalog.model_for(Gender::Male).unwrap().ends_with("male_base.glb"));
    }

    #[test]
    fn test_missing_gender_falls_back_to_neutral() {
        let (_dir, config) = create_test_models();
        let catalog = ModelCatalog::new(&config);

        assert!(!catalog.has_model(Gender::Female));
        let path = catalog.model_for(Gender::Female).unwrap();
        assert!(path.ends_with("neutral_base.glb"));
    }

    #[test]
    fn test_empty_catalog_errors() {
        let dir = TempDir::new().unwrap();
        let mut config = AssetsConfig::default();
        config.models_dir = dir.path().to_path_buf();

        let catalog = ModelCatalog::new(&config);
        assert!(catalog.model_for(Gender::Male).is_err());
    }
}
