//! Body shape mapping: four sliders plus a gender tag turned into per-joint
//! scale assignments on a named skeleton.

pub mod mapper;
pub mod params;
pub mod roles;

pub use mapper::apply_shape;
pub use params::{Gender, ShapeParams};
pub use roles::{classify_joint, JointRole};
