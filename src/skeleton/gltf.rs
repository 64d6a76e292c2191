//! Skeleton extraction from GLB/glTF avatar files.

use std::collections::HashMap;
use std::path::Path;

use glam::Vec3;

use super::{Joint, Skeleton};
use crate::error::{AssetError, Result};

/// Load the skinned skeleton out of a GLB/glTF file.
///
/// Collects the union of all skins' joints with their names, rest scales,
/// and parent links remapped into skeleton indices. A model without any
/// skinned joints is an error.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Skeleton> {
    let path = path.as_ref();
    let (document, _buffers, _images) = gltf::import(path)
        .map_err(|e| AssetError::ModelLoad(format!("{}: {}", path.display(), e)))?;

    // Build parent map over glTF nodes
    let node_count = document.nodes().count();
    let mut parents = vec![None; node_count];
    for node in document.nodes() {
        for child in node.children() {
            parents[child.index()] = Some(node.index());
        }
    }

    // Union of all skins' joints, in first-seen order
    let mut node_to_joint: HashMap<usize, usize> = HashMap::new();
    let mut skeleton = Skeleton::new();
    for skin in document.skins() {
        for joint in skin.joints() {
            let node_index = joint.index();
            if node_to_joint.contains_key(&node_index) {
                continue;
            }
            let (_, _, scale) = joint.transform().decomposed();
            let name = joint
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("joint_{}", node_index));

            let mut entry = Joint::new(name);
            entry.scale = Vec3::from(scale);
            let joint_index = skeleton.add_joint(entry);
            node_to_joint.insert(node_index, joint_index);
        }
    }

    if skeleton.is_empty() {
        return Err(
            AssetError::ModelLoad(format!("{}: no skinned joints", path.display())).into(),
        );
    }

    // Remap parent links, walking past intermediate non-joint nodes
    for (&node_index, &joint_index) in &node_to_joint {
        let mut ancestor = parents[node_index];
        while let Some(a) = ancestor {
            if let Some(&parent_joint) = node_to_joint.get(&a) {
                skeleton.joints_mut()[joint_index].parent = Some(parent_joint);
                break;
            }
            ancestor = parents[a];
        }
    }

    tracing::debug!(
        "Extracted {} joints from {}",
        skeleton.len(),
        path.display()
    );

    Ok(skeleton)
}
