//! Named joint tree extracted from avatar models.

pub mod gltf;

use glam::Vec3;

/// A single named joint.
#[derive(Debug, Clone)]
pub struct Joint {
    /// Name as authored in the model
    pub name: String,
    /// Parent joint index within the skeleton (None for roots)
    pub parent: Option<usize>,
    /// Local scale, starting at the model's rest pose
    pub scale: Vec3,
}

impl Joint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            scale: Vec3::ONE,
        }
    }

    /// Set the parent joint index
    pub fn with_parent(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Assign girth on X and Z, leaving height (Y) untouched
    pub fn set_girth(&mut self, girth: f32) {
        self.scale.x = girth;
        self.scale.z = girth;
    }
}

/// Joint tree plus the uniform scale applied to the skeleton as a whole.
#[derive(Debug, Clone)]
pub struct Skeleton {
    joints: Vec<Joint>,
    /// Uniform whole-body scale, 1.0 until a height is applied
    pub root_scale: f32,
}

impl Skeleton {
    pub fn new() -> Self {
        Self {
            joints: Vec::new(),
            root_scale: 1.0,
        }
    }

    /// Append a joint and return its index
    pub fn add_joint(&mut self, joint: Joint) -> usize {
        self.joints.push(joint);
        self.joints.len() - 1
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn joints_mut(&mut self) -> &mut [Joint] {
        &mut self.joints
    }

    /// Look up a joint by name, case-insensitively
    pub fn joint_named(&self, name: &str) -> Option<&Joint> {
        self.joints
            .iter()
            .find(|j| j.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_girth_leaves_height_alone() {
        let mut joint = Joint::new("Spine");
        joint.scale = Vec3::new(1.0, 2.0, 1.0);
        joint.set_girth(1.3);

        assert_eq!(joint.scale, Vec3::new(1.3, 2.0, 1.3));
    }

    #[test]
    fn test_joint_named_ignores_case() {
        let mut skeleton = Skeleton::new();
        skeleton.add_joint(Joint::new("mixamorig:Hips"));
        skeleton.add_joint(Joint::new("Spine"));

        assert!(skeleton.joint_named("spine").is_some());
        assert!(skeleton.joint_named("MIXAMORIG:HIPS").is_some());
        assert!(skeleton.joint_named("tail").is_none());
    }

    #[test]
    fn test_new_skeleton_is_unscaled() {
        let skeleton = Skeleton::new();
        assert_eq!(skeleton.root_scale, 1.0);
        assert!(skeleton.is_empty());
    }
}
