//! Volumetric try-on sprites: a garment cutout stacked into parallel
//! planes to fake thickness in front of the avatar.

use std::sync::Arc;

use glam::Vec3;
use image::RgbaImage;

use crate::config::SpriteTuning;
use crate::scene::{Material, NodeId, Scene, SceneNode};

/// Reserved scene name for the try-on artifact. At most one node carries
/// it at any time.
pub const TRY_ON_NODE: &str = "virtual-try-on";

/// Handle to an inserted sprite stack.
pub struct SpriteStack {
    /// Grouping node carrying the reserved name
    pub group: NodeId,
    /// Layer planes in depth order
    pub layers: Vec<NodeId>,
    /// Material shared by every layer
    pub material: Arc<Material>,
}

/// Build the try-on stack under `anchor` from an already chroma-keyed
/// cutout.
///
/// `layer_count` identical planes share one alpha-tested, double-sided
/// material; layer `i` sits at `(i / layer_count) * total_depth` along
/// local Z, and the group hangs at the chest offset in the anchor's local
/// frame. Any previous stack is removed first. Returns `None` without
/// touching the scene when the anchor is gone.
pub fn build_try_on_sprite(
    scene: &mut Scene,
    anchor: NodeId,
    image: RgbaImage,
    tuning: &SpriteTuning,
) -> Option<SpriteStack> {
    if !scene.contains(anchor) {
        tracing::warn!("Try-on anchor is no longer in the scene");
        return None;
    }

    if let Some(existing) = scene.find_by_name(TRY_ON_NODE) {
        scene.remove(existing);
    }

    let material = Arc::new(Material {
        texture: Arc::new(image),
        alpha_test: tuning.alpha_test,
        double_sided: true,
    });

    let group = scene.add_child(
        anchor,
        SceneNode::group(TRY_ON_NODE).with_translation(Vec3::from(tuning.anchor_offset)),
    )?;

    let mut layers = Vec::with_capacity(tuning.layer_count as usize);
    for i in 0..tuning.layer_count {
        let z = (i as f32 / tuning.layer_count as f32) * tuning.total_depth;
        let layer = SceneNode::plane(
            format!("try-on-layer-{}", i),
            tuning.plane_size,
            Arc::clone(&material),
        )
        .with_translation(Vec3::new(0.0, 0.0, z));
        layers.push(scene.add_child(group, layer)?);
    }

    tracing::info!("Built try-on sprite with {} layers", layers.len());

    Some(SpriteStack {
        group,
        layers,
        material,
    })
}
