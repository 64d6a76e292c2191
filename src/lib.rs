//! Mannequin - Headless avatar fitting-room toolkit
//!
//! Body-customization building blocks behind a virtual try-on flow:
//! - Maps body-shape sliders (height, weight, waist, arms) onto the named
//!   joints of a skinned avatar skeleton
//! - Chroma-keys photographed garments into transparent cutouts
//! - Stacks cutouts into volumetric sprites anchored in front of the avatar
//! - Loads base mannequin models and garment photos asynchronously

pub mod assets;
pub mod chroma;
pub mod config;
pub mod error;
pub mod fitting;
pub mod loader;
pub mod scene;
pub mod shape;
pub mod skeleton;
pub mod sprite;

pub use config::Config;
pub use error::{MannequinError, Result};
pub use fitting::{FittingRoom, TryOnOutcome, TryOnTicket};
pub use shape::{apply_shape, Gender, ShapeParams};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
