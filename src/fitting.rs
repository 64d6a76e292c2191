//! The fitting room: one explicit context owning the scene, the loaded
//! skeleton, and the try-on state, passed into every operation instead of
//! process-wide globals.

use std::path::Path;

use glam::Vec3;
use image::RgbaImage;

use crate::assets::ModelCatalog;
use crate::chroma;
use crate::config::Config;
use crate::error::Result;
use crate::loader;
use crate::scene::{NodeId, Scene, SceneNode};
use crate::shape::{self, Gender, ShapeParams};
use crate::skeleton::Skeleton;
use crate::sprite::{self, SpriteStack, TRY_ON_NODE};

/// Name of the stand-in node shown while no avatar is loaded.
const PLACEHOLDER_NODE: &str = "placeholder";

/// Ticket identifying one try-on request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryOnTicket(u64);

/// What completing a try-on request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryOnOutcome {
    /// The cutout was keyed and the sprite stack rebuilt
    Applied,
    /// A newer request superseded this one; nothing changed
    Superseded,
}

/// Explicit fitting-room context.
pub struct FittingRoom {
    config: Config,
    catalog: ModelCatalog,
    scene: Scene,
    /// Anchor node everything avatar-relative hangs under
    avatar: NodeId,
    skeleton: Option<Skeleton>,
    gender: Gender,
    sprite: Option<SpriteStack>,
    /// Serial of the most recent try-on request
    try_on_serial: u64,
}

impl FittingRoom {
    /// Create a fitting room from configuration
    pub fn new(config: Config) -> Self {
        let catalog = ModelCatalog::new(&config.assets);
        let mut scene = Scene::new();
        let avatar = scene.add_root(SceneNode::group("avatar"));

        Self {
            config,
            catalog,
            scene,
            avatar,
            skeleton: None,
            gender: Gender::default(),
            sprite: None,
            try_on_serial: 0,
        }
    }

    /// Set the gender preset
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    /// Load an avatar skeleton from a GLB/glTF file.
    ///
    /// On failure a placeholder box stands in for the avatar and the error
    /// is returned; a previously loaded skeleton is dropped either way.
    /// Try-on state is untouched by both outcomes.
    pub async fn load_avatar<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        match loader::load_skeleton(path.as_ref()).await {
            Ok(skeleton) => {
                tracing::info!(
                    "Loaded avatar with {} joints from {}",
                    skeleton.len(),
                    path.as_ref().display()
                );
                self.skeleton = Some(skeleton);
                self.remove_placeholder();
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Avatar load failed, installing placeholder: {}", e);
                self.skeleton = None;
                self.install_placeholder();
                Err(e)
            }
        }
    }

    /// Load the configured base model for the current gender
    pub async fn load_base_model(&mut self) -> Result<()> {
        let path = self.catalog.model_for(self.gender)?.to_path_buf();
        self.load_avatar(path).await
    }

    /// Run the shape mapper over the loaded skeleton. Without a skeleton
    /// this is a no-op, matching the slider handlers firing before any
    /// avatar is in.
    pub fn apply_shape(&mut self, params: &ShapeParams) {
        let Some(skeleton) = self.skeleton.as_mut() else {
            tracing::debug!("No skeleton loaded, shape change ignored");
            return;
        };
        shape::apply_shape(skeleton, params, self.gender, &self.config.shape);
    }

    /// Start a try-on request. Any request still in flight when a newer
    /// one is issued completes as superseded.
    pub fn request_try_on(&mut self) -> TryOnTicket {
        self.try_on_serial += 1;
        TryOnTicket(self.try_on_serial)
    }

    /// Finish a try-on request with the loaded garment photo.
    pub fn complete_try_on(&mut self, ticket: TryOnTicket, image: RgbaImage) -> TryOnOutcome {
        if ticket.0 < self.try_on_serial {
            tracing::debug!(
                "Discarding try-on result {} (latest is {})",
                ticket.0,
                self.try_on_serial
            );
            return TryOnOutcome::Superseded;
        }

        let cutout = chroma::remove_background(&image, &self.config.chroma);

        // The anchor is owned by the room and never removed, so the build
        // cannot miss it
        self.sprite =
            sprite::build_try_on_sprite(&mut self.scene, self.avatar, cutout, &self.config.sprite);

        TryOnOutcome::Applied
    }

    /// Try on a garment photo from disk: request, load, complete. A load
    /// error leaves the prior stack (or its absence) unchanged.
    pub async fn try_on<P: AsRef<Path>>(&mut self, path: P) -> Result<TryOnOutcome> {
        let ticket = self.request_try_on();
        let image = loader::load_image(path).await?;
        Ok(self.complete_try_on(ticket, image))
    }

    /// Remove the current try-on stack, if any
    pub fn clear_try_on(&mut self) -> bool {
        self.sprite = None;
        match self.scene.find_by_name(TRY_ON_NODE) {
            Some(id) => self.scene.remove(id),
            None => false,
        }
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.gender = gender;
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The anchor node the try-on stack hangs under
    pub fn avatar_node(&self) -> NodeId {
        self.avatar
    }

    pub fn skeleton(&self) -> Option<&Skeleton> {
        self.skeleton.as_ref()
    }

    pub fn sprite(&self) -> Option<&SpriteStack> {
        self.sprite.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    fn install_placeholder(&mut self) {
        self.remove_placeholder();
        let extents = Vec3::new(0.5, 1.7, 0.3);
        let node = SceneNode::placeholder(PLACEHOLDER_NODE, extents)
            .with_translation(Vec3::new(0.0, extents.y / 2.0, 0.0));
        self.scene.add_child(self.avatar, node);
    }

    fn remove_placeholder(&mut self) {
        if let Some(id) = self.scene.find_by_name(PLACEHOLDER_NODE) {
            self.scene.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::NodeKind;
    use image::Rgba;

    fn test_image() -> RgbaImage {
        // White background with a red square in the middle
        RgbaImage::from_fn(8, 8, |x, y| {
            if (2..6).contains(&x) && (2..6).contains(&y) {
                Rgba([200, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        })
    }

    #[test]
    fn test_shape_without_skeleton_is_noop() {
        let mut room = FittingRoom::new(Config::default());
        room.apply_shape(&ShapeParams::default());
        assert!(room.skeleton().is_none());
    }

    #[test]
    fn test_complete_current_ticket_applies() {
        let mut room = FittingRoom::new(Config::default());
        let ticket = room.request_try_on();

        let outcome = room.complete_try_on(ticket, test_image());
        assert_eq!(outcome, TryOnOutcome::Applied);
        assert!(room.sprite().is_some());
        assert!(room.scene().find_by_name(TRY_ON_NODE).is_some());
    }

    #[test]
    fn test_superseded_ticket_changes_nothing() {
        let mut room = FittingRoom::new(Config::default());

        let stale = room.request_try_on();
        let current = room.request_try_on();

        assert_eq!(
            room.complete_try_on(stale, test_image()),
            TryOnOutcome::Superseded
        );
        assert!(room.sprite().is_none());
        assert!(room.scene().find_by_name(TRY_ON_NODE).is_none());

        assert_eq!(
            room.complete_try_on(current, test_image()),
            TryOnOutcome::Applied
        );
        assert!(room.sprite().is_some());
    }

    #[test]
    fn test_try_on_keys_out_background() {
        let mut room = FittingRoom::new(Config::default());
        let ticket = room.request_try_on();
        room.complete_try_on(ticket, test_image());

        let stack = room.sprite().unwrap();
        let texture = &stack.material.texture;

        // The white surround went transparent, the red square survived
        assert_eq!(texture.get_pixel(0, 0)[3], 0);
        assert_eq!(texture.get_pixel(3, 3)[3], 255);
    }

    #[test]
    fn test_second_try_on_replaces_first() {
        let mut room = FittingRoom::new(Config::default());

        let first = room.request_try_on();
        room.complete_try_on(first, test_image());
        let first_group = room.sprite().unwrap().group;

        let second = room.request_try_on();
        room.complete_try_on(second, test_image());
        let second_group = room.sprite().unwrap().group;

        assert_ne!(first_group, second_group);
        assert!(!room.scene().contains(first_group));
        assert_eq!(room.scene().find_by_name(TRY_ON_NODE), Some(second_group));
    }

    #[test]
    fn test_clear_try_on() {
        let mut room = FittingRoom::new(Config::default());
        let ticket = room.request_try_on();
        room.complete_try_on(ticket, test_image());

        assert!(room.clear_try_on());
        assert!(room.sprite().is_none());
        assert!(room.scene().find_by_name(TRY_ON_NODE).is_none());
        assert!(!room.clear_try_on());
    }

    #[tokio::test]
    async fn test_failed_avatar_load_installs_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.glb");
        std::fs::write(&path, b"not a model").unwrap();

        let mut room = FittingRoom::new(Config::default());
        assert!(room.load_avatar(&path).await.is_err());
        assert!(room.skeleton().is_none());

        let id = room.scene().find_by_name(PLACEHOLDER_NODE).unwrap();
        match room.scene().get(id).unwrap().kind {
            NodeKind::Placeholder { extents } => {
                assert_eq!(extents, Vec3::new(0.5, 1.7, 0.3));
            }
            _ => panic!("placeholder node has wrong kind"),
        }
    }

    #[tokio::test]
    async fn test_failed_try_on_leaves_prior_stack() {
        let mut room = FittingRoom::new(Config::default());
        let ticket = room.request_try_on();
        room.complete_try_on(ticket, test_image());
        let group = room.sprite().unwrap().group;

        assert!(room.try_on("does/not/exist.png").await.is_err());
        assert!(room.scene().contains(group));
        assert_eq!(room.scene().find_by_name(TRY_ON_NODE), Some(group));
    }

    #[tokio::test]
    async fn test_load_base_model_without_assets_errors() {
        let mut config = Config::default();
        config.assets.models_dir = std::path::PathBuf::from("definitely/missing");

        let mut room = FittingRoom::new(config).with_gender(Gender::Female);
        assert!(room.load_base_model().await.is_err());
    }
}
