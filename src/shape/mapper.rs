//! Scale assignment from shape sliders to classified joints.

use crate::config::ShapeTuning;
use crate::skeleton::Skeleton;

use super::params::{Gender, ShapeParams};
use super::roles::{classify_joint, JointRole};

/// Apply the four shape sliders to every matched joint.
///
/// Girth rules assign X/Z absolutely and never touch Y. The height rule
/// sets the skeleton's uniform root scale, once per call no matter how
/// many root joints match, so reapplying identical params yields identical
/// scales. Unmatched joints are left untouched. `height_cm` of zero or
/// below produces a degenerate root scale; slider ranges clamp upstream.
pub fn apply_shape(
    skeleton: &mut Skeleton,
    params: &ShapeParams,
    gender: Gender,
    tuning: &ShapeTuning,
) {
    let mut saw_root = false;

    for joint in skeleton.joints_mut() {
        let Some(role) = classify_joint(&joint.name) else {
            continue;
        };

        match role {
            JointRole::Root => saw_root = true,
            JointRole::Spine => {
                joint.set_girth(params.weight * tuning.weight_mod(gender));
            }
            JointRole::Waist => {
                joint.set_girth(params.waist * params.weight * tuning.waist_mod(gender));
            }
            JointRole::Arms => {
                joint.set_girth(params.arms * tuning.shoulder_mod(gender));
            }
            JointRole::Legs => {
                joint.set_girth(params.weight);
            }
        }
    }

    if saw_root {
        skeleton.root_scale = params.height_cm as f32 / tuning.base_height(gender);
        tracing::debug!(
            "Root scale {} for height {} cm ({})",
            skeleton.root_scale,
            params.height_cm,
            gender
        );
    }
}
