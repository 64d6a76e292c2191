//! Shape slider values and the gender tag they are applied under.

use serde::{Deserialize, Serialize};

/// Gender preset selecting the base height and girth modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Neutral,
    Male,
    Female,
}

impl Default for Gender {
    fn default() -> Self {
        Self::Neutral
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "neutral" => Ok(Self::Neutral),
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(format!("unknown gender: {}", other)),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Neutral => "neutral",
            Self::Male => "male",
            Self::Female => "female",
        })
    }
}

/// The four body-shape sliders.
///
/// `height_cm` is absolute; the multipliers are relative to the base model's
/// rest girth. Values are taken as-is, slider ranges clamp upstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeParams {
    /// Target body height in centimeters
    pub height_cm: i32,
    /// Overall body mass multiplier
    pub weight: f32,
    /// Waist girth multiplier, stacked on top of weight
    pub waist: f32,
    /// Arm girth multiplier
    pub arms: f32,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            height_cm: 170,
            weight: 1.0,
            waist: 1.0,
            arms: 1.0,
        }
    }
}
