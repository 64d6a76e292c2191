//! Configuration parsing and management for Mannequin

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, MannequinError};
use crate::shape::Gender;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub shape: ShapeTuning,
    pub chroma: ChromaKeyTuning,
    pub sprite: SpriteTuning,
    pub assets: AssetsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shape: ShapeTuning::default(),
            chroma: ChromaKeyTuning::default(),
            sprite: SpriteTuning::default(),
            assets: AssetsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MannequinError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::ReadFile(format!("{}: {}", path.as_ref().display(), e))
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(s: &str) -> Result<Self, MannequinError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }

    /// Load configuration from default paths
    pub fn load() -> Result<Self, MannequinError> {
        // Try config paths in order
        let paths = [
            PathBuf::from("config.toml"),
            PathBuf::from("config/default.toml"),
            dirs_path().join("config.toml"),
        ];

        for path in &paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), MannequinError> {
        for (field, value) in [
            ("shape.base_height_neutral", self.shape.base_height_neutral),
            ("shape.base_height_male", self.shape.base_height_male),
            ("shape.base_height_female", self.shape.base_height_female),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: "Base height must be greater than 0".to_string(),
                }
                .into());
            }
        }

        if self.chroma.tolerance < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "chroma.tolerance".to_string(),
                message: "Tolerance must not be negative".to_string(),
            }
            .into());
        }

        if self.sprite.layer_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sprite.layer_count".to_string(),
                message: "At least one layer is required".to_string(),
            }
            .into());
        }

        if self.sprite.total_depth <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "sprite.total_depth".to_string(),
                message: "Stack depth must be greater than 0".to_string(),
            }
            .into());
        }

        if self.sprite.plane_size <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "sprite.plane_size".to_string(),
                message: "Plane size must be greater than 0".to_string(),
            }
            .into());
        }

        if !(0.0..=1.0).contains(&self.sprite.alpha_test) {
            return Err(ConfigError::InvalidValue {
                field: "sprite.alpha_test".to_string(),
                message: "Alpha test must be between 0.0 and 1.0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Body shape tuning parameters.
///
/// Base heights are in centimeters and anchor the uniform root scale; the
/// modifiers bias girth per gender the way the sliders expect.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeTuning {
    // --- Base heights (cm) ---
    #[serde(default = "default_170_0")]
    pub base_height_neutral: f32,
    #[serde(default = "default_180_0")]
    pub base_height_male: f32,
    #[serde(default = "default_165_0")]
    pub base_height_female: f32,

    // --- Gender girth modifiers ---
    /// Torso weight multiplier for male avatars
    #[serde(default = "default_1_05")]
    pub weight_mod_male: f32,
    /// Torso weight multiplier for female avatars
    #[serde(default = "default_0_95")]
    pub weight_mod_female: f32,
    /// Waist narrowing multiplier for female avatars
    #[serde(default = "default_0_9")]
    pub waist_mod_female: f32,
    /// Shoulder broadening multiplier for male avatars
    #[serde(default = "default_1_1")]
    pub shoulder_mod_male: f32,
}

fn default_170_0() -> f32 { 170.0 }
fn default_180_0() -> f32 { 180.0 }
fn default_165_0() -> f32 { 165.0 }
fn default_1_05() -> f32 { 1.05 }
fn default_0_95() -> f32 { 0.95 }
fn default_0_9() -> f32 { 0.9 }
fn default_1_1() -> f32 { 1.1 }

impl Default for ShapeTuning {
    fn default() -> Self {
        Self {
            base_height_neutral: default_170_0(),
            base_height_male: default_180_0(),
            base_height_female: default_165_0(),
            weight_mod_male: default_1_05(),
            weight_mod_female: default_0_95(),
            waist_mod_female: default_0_9(),
            shoulder_mod_male: default_1_1(),
        }
    }
}

impl ShapeTuning {
    /// Base height in centimeters for the given gender
    pub fn base_height(&self, gender: Gender) -> f32 {
        match gender {
            Gender::Neutral => self.base_height_neutral,
            Gender::Male => self.base_height_male,
            Gender::Female => self.base_height_female,
        }
    }

    /// Torso weight multiplier for the given gender
    pub fn weight_mod(&self, gender: Gender) -> f32 {
        match gender {
            Gender::Male => self.weight_mod_male,
            Gender::Female => self.weight_mod_female,
            Gender::Neutral => 1.0,
        }
    }

    /// Waist multiplier for the given gender
    pub fn waist_mod(&self, gender: Gender) -> f32 {
        match gender {
            Gender::Female => self.waist_mod_female,
            _ => 1.0,
        }
    }

    /// Shoulder multiplier for the given gender
    pub fn shoulder_mod(&self, gender: Gender) -> f32 {
        match gender {
            Gender::Male => self.shoulder_mod_male,
            _ => 1.0,
        }
    }
}

/// Chroma-key background removal tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromaKeyTuning {
    /// Euclidean RGB distance below which a pixel counts as background
    pub tolerance: f32,
}

impl Default for ChromaKeyTuning {
    fn default() -> Self {
        Self { tolerance: 30.0 }
    }
}

/// Volumetric try-on sprite tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteTuning {
    /// Number of stacked planes giving the cutout its depth
    #[serde(default = "default_15")]
    pub layer_count: u32,
    /// Total depth of the stack along local Z, in scene units
    #[serde(default = "default_0_04")]
    pub total_depth: f32,
    /// Edge length of each square plane, in scene units
    #[serde(default = "default_0_6")]
    pub plane_size: f32,
    /// Alpha cutoff below which a fragment is discarded
    #[serde(default = "default_0_1")]
    pub alpha_test: f32,
    /// Chest anchor offset in the avatar's local frame
    #[serde(default = "default_anchor_offset")]
    pub anchor_offset: [f32; 3],
}

fn default_15() -> u32 { 15 }
fn default_0_04() -> f32 { 0.04 }
fn default_0_6() -> f32 { 0.6 }
fn default_0_1() -> f32 { 0.1 }
fn default_anchor_offset() -> [f32; 3] { [0.0, 1.2, 0.3] }

impl Default for SpriteTuning {
    fn default() -> Self {
        Self {
            layer_count: default_15(),
            total_depth: default_0_04(),
            plane_size: default_0_6(),
            alpha_test: default_0_1(),
            anchor_offset: default_anchor_offset(),
        }
    }
}

/// Base mannequin model locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory containing the base mannequin models
    pub models_dir: PathBuf,
    /// Gender-neutral base model file name
    pub neutral_model: String,
    /// Male base model file name
    pub male_model: String,
    /// Female base model file name
    pub female_model: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("assets/models"),
            neutral_model: "neutral_base.glb".to_string(),
            male_model: "male_base.glb".to_string(),
            female_model: "female_base.glb".to_string(),
        }
    }
}

/// Get the platform-specific configuration directory
fn dirs_path() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        if let Some(config_dir) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(config_dir).join("mannequin");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config/mannequin");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join("Library/Application Support/mannequin");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("mannequin");
        }
    }

    PathBuf::from(".")
}
