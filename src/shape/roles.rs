//! Joint-role classification from loosely-named skeleton joints.
//!
//! Names are matched case-insensitively by the substring and exact-name
//! rules the shape mapper is defined over. Classification is pure so the
//! matching rules stay testable apart from scale assignment.

/// Role a joint plays under the shape sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointRole {
    /// Whole-skeleton height anchor
    Root,
    /// Torso core, takes the weight girth
    Spine,
    /// Designated waist joint, its assignment overrides the torso one
    Waist,
    /// Arms and shoulders
    Arms,
    /// Legs
    Legs,
}

impl std::fmt::Display for JointRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Root => "root",
            Self::Spine => "spine",
            Self::Waist => "waist",
            Self::Arms => "arms",
            Self::Legs => "legs",
        })
    }
}

/// Exact lower-cased names marking the designated waist joint
const WAIST_JOINTS: &[&str] = &["spine", "mixamorigspine"];

/// Substring marking the skeleton root
const ROOT_TOKEN: &str = "hips";

/// Classify a joint name into the role its scale rule is keyed on.
///
/// Rules are probed in reverse precedence order so that a name matching
/// several rules resolves to the one whose assignment would have landed
/// last. Returns `None` for joints no rule touches.
pub fn classify_joint(name: &str) -> Option<JointRole> {
    let n = name.to_lowercase();

    if n.contains("leg") || n.contains("thigh") || n.contains("calf") {
        return Some(JointRole::Legs);
    }
    if n.contains("arm") || n.contains("shoulder") {
        return Some(JointRole::Arms);
    }
    if WAIST_JOINTS.iter().any(|w| n == *w) {
        return Some(JointRole::Waist);
    }
    if n.contains("spine") {
        return Some(JointRole::Spine);
    }
    if n.contains(ROOT_TOKEN) {
        return Some(JointRole::Root);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_names() {
        assert_eq!(classify_joint("Hips"), Some(JointRole::Root));
        assert_eq!(classify_joint("mixamorigHips"), Some(JointRole::Root));
        assert_eq!(classify_joint("ROOT_HIPS"), Some(JointRole::Root));
    }

    #[test]
    fn test_waist_is_exact_match_only() {
        assert_eq!(classify_joint("Spine"), Some(JointRole::Waist));
        assert_eq!(classify_joint("mixamorigSpine"), Some(JointRole::Waist));
        // Longer spine names fall back to the torso rule
        assert_eq!(classify_joint("Spine1"), Some(JointRole::Spine));
        assert_eq!(classify_joint("Spine2"), Some(JointRole::Spine));
        assert_eq!(classify_joint("mixamorigSpine2"), Some(JointRole::Spine));
    }

    #[test]
    fn test_arm_names() {
        assert_eq!(classify_joint("LeftArm"), Some(JointRole::Arms));
        assert_eq!(classify_joint("RightForeArm"), Some(JointRole::Arms));
        assert_eq!(classify_joint("LeftShoulder"), Some(JointRole::Arms));
    }

    #[test]
    fn test_leg_names() {
        assert_eq!(classify_joint("LeftLeg"), Some(JointRole::Legs));
        assert_eq!(classify_joint("RightUpLeg"), Some(JointRole::Legs));
        assert_eq!(classify_joint("thigh_l"), Some(JointRole::Legs));
        assert_eq!(classify_joint("calf_r"), Some(JointRole::Legs));
    }

    #[test]
    fn test_unmatched_names() {
        assert_eq!(classify_joint("LeftFoot"), None);
        assert_eq!(classify_joint("Neck"), None);
        assert_eq!(classify_joint("Head"), None);
        assert_eq!(classify_joint("LeftHand"), None);
    }
}
