//! Minimal retained scene graph for fitting-room artifacts.
//!
//! Owns plain node arrays plus parent/child links rather than wrapping a
//! renderer; the renderer-facing side consumes this model, it never feeds
//! back into it.

use std::sync::Arc;

use glam::Vec3;
use image::RgbaImage;

/// Stable node handle. Ids are never reused within a scene, so a held id
/// either resolves to the node it was created for or to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Texture material shared across sprite layers.
pub struct Material {
    /// RGBA texture, alpha already carved by the chroma key
    pub texture: Arc<RgbaImage>,
    /// Alpha cutoff below which a fragment is discarded
    pub alpha_test: f32,
    /// Render both faces (sprite planes are viewed from either side)
    pub double_sided: bool,
}

/// What a node is, beyond its transform.
pub enum NodeKind {
    /// Pure grouping node
    Group,
    /// Square textured plane with edge length `size`
    Plane { size: f32, material: Arc<Material> },
    /// Stand-in box shown when an avatar fails to load, with full extents
    Placeholder { extents: Vec3 },
}

/// A named node with a local transform.
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    pub translation: Vec3,
    pub scale: Vec3,
}

impl SceneNode {
    /// Create a grouping node
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Group,
            translation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Create a textured plane node
    pub fn plane(name: impl Into<String>, size: f32, material: Arc<Material>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Plane { size, material },
            translation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Create a placeholder box node
    pub fn placeholder(name: impl Into<String>, extents: Vec3) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Placeholder { extents },
            translation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Set the local translation
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// Set the local scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

/// Retained node tree.
///
/// Nodes live in a slab indexed by [`NodeId`]; removal leaves the slot
/// empty so ids stay unambiguous for the life of the scene.
pub struct Scene {
    nodes: Vec<Option<SceneNode>>,
    parents: Vec<Option<NodeId>>,
    children: Vec<Vec<NodeId>>,
    roots: Vec<NodeId>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            parents: Vec::new(),
            children: Vec::new(),
            roots: Vec::new(),
        }
    }

    fn push(&mut self, node: SceneNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(node));
        self.parents.push(parent);
        self.children.push(Vec::new());
        id
    }

    /// Add a node without a parent
    pub fn add_root(&mut self, node: SceneNode) -> NodeId {
        let id = self.push(node, None);
        self.roots.push(id);
        id
    }

    /// Add a node under `parent`. Returns `None` when the parent is no
    /// longer in the scene.
    pub fn add_child(&mut self, parent: NodeId, node: SceneNode) -> Option<NodeId> {
        if !self.contains(parent) {
            return None;
        }
        let id = self.push(node, Some(parent));
        self.children[parent.0].push(id);
        Some(id)
    }

    /// Detach `id` from its parent and drop it together with its whole
    /// subtree. Returns whether anything was removed.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if !self.contains(id) {
            return false;
        }

        match self.parents[id.0] {
            Some(parent) => self.children[parent.0].retain(|c| *c != id),
            None => self.roots.retain(|r| *r != id),
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            stack.extend(std::mem::take(&mut self.children[current.0]));
            self.nodes[current.0] = None;
            self.parents[current.0] = None;
        }

        true
    }

    /// First node carrying `name`, in creation order
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|n| n.name == name))
            .map(NodeId)
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)?.as_ref()
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0)?.as_mut()
    }

    /// Child ids of `id`, empty when the node is gone
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(id.0).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.get(id.0).is_some_and(Option::is_some)
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
